//! Breakfast Wheel Entry Point
//!
//! Launches the terminal UI.
//!
//! ```bash
//! # Built-in menu, any mood
//! breakfast-wheel
//!
//! # Own card file, start on the healthy shelf
//! breakfast-wheel --catalog ~/menu.toml --mood healthy
//!
//! # Same spins every run
//! breakfast-wheel --seed 42
//!
//! # Verbose logging (goes to a file, never the terminal)
//! RUST_LOG=debug breakfast-wheel --log-file /tmp/wheel.log
//! ```

use std::fs;
use std::io::{self, IsTerminal};
use std::panic;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use breakfast_wheel_tui::App;
use wheel_core::{load_config_from_path, Catalog, ConfigOverrides, Mood, WheelConfig};

/// Breakfast Wheel - spin for your breakfast
#[derive(Parser, Debug)]
#[command(name = "breakfast-wheel")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long, env = "WHEEL_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Card catalog (TOML) to spin instead of the built-in menu
    #[arg(long, value_name = "FILE")]
    catalog: Option<PathBuf>,

    /// Mood to start with (any, comfort, healthy, rushed, relaxed)
    #[arg(short = 'm', long)]
    mood: Option<String>,

    /// Spin duration in milliseconds
    #[arg(long, value_name = "MS")]
    spin_duration_ms: Option<u64>,

    /// Line appended to shared results
    #[arg(long, value_name = "TEXT")]
    share_text: Option<String>,

    /// Seed for the random picks, to replay the same spins
    #[arg(long, env = "WHEEL_SEED", value_name = "N")]
    seed: Option<u64>,

    /// Log file path (default: <cache dir>/breakfast-wheel/wheel.log)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("breakfast-wheel")
        .join("wheel.log")
}

/// Log to a file so the alternate screen is never written over
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {parent:?}"))?;
    }
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {path:?}"))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file)),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path)?;

    let mut config = load_config_from_path(args.config.clone()).context("Failed to load config")?;
    let mut overrides = ConfigOverrides::new();
    if let Some(path) = &args.catalog {
        overrides = overrides.with_catalog_path(path.clone());
    }
    if let Some(ms) = args.spin_duration_ms {
        overrides = overrides.with_spin_duration_ms(ms);
    }
    if let Some(text) = &args.share_text {
        overrides = overrides.with_call_to_action(text.clone());
    }
    overrides.apply(&mut config);
    config.validate().context("Invalid command-line overrides")?;

    let catalog = Catalog::load_or_builtin(config.catalog_path.as_deref())
        .context("Failed to load card catalog")?;
    let mood = args.mood.as_deref().map(Mood::new);

    tracing::info!(
        cards = catalog.len(),
        source = %config.source(),
        log = ?log_path,
        "Starting Breakfast Wheel"
    );

    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        eprintln!("❌ Error: breakfast-wheel requires a terminal (TTY)");
        eprintln!();
        eprintln!("This usually means:");
        eprintln!("  • Running in a non-interactive environment (CI, container)");
        eprintln!("  • SSH without -t flag");
        eprintln!("  • Piped stdin/stdout");
        std::process::exit(1);
    }

    // Restore the terminal before a panic message is printed
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, catalog, config, mood, args.seed).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Show the goodbye after the TUI closes
    if let Some(goodbye) = result? {
        println!("\n🍳 {goodbye}\n");
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    catalog: Catalog,
    config: WheelConfig,
    mood: Option<Mood>,
    seed: Option<u64>,
) -> Result<Option<String>> {
    let mut app = App::new(catalog, config, mood, seed).await?;
    app.run(terminal).await?;
    Ok(app.goodbye().map(str::to_string))
}
