//! Integration Test: Core Independence
//!
//! **Policy**: `wheel-core` MUST NOT depend on any terminal UI crate. Every
//! visual effect leaves the core as a `WheelMessage`; drawing belongs to the
//! surfaces.

use std::fs;

use architectural_enforcement::{code_part, rust_sources, workspace_root};

const UI_CRATES: [&str; 3] = ["ratatui", "crossterm", "termion"];

#[test]
fn test_core_manifest_has_no_ui_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("wheel/core/Cargo.toml"))
        .expect("wheel/core/Cargo.toml is readable");

    for krate in UI_CRATES {
        let declared = manifest
            .lines()
            .map(str::trim)
            .any(|line| line.starts_with(&format!("{krate} ")) || line.starts_with(&format!("{krate}=")));
        assert!(!declared, "wheel-core must not depend on {krate}");
    }
}

#[test]
fn test_core_sources_never_import_ui_crates() {
    let mut violations = Vec::new();

    for file in rust_sources("wheel/core/src") {
        for (idx, line) in file.content.lines().enumerate() {
            let code = code_part(line);
            for krate in UI_CRATES {
                if code.contains(&format!("{krate}::")) {
                    violations.push(format!("{}:{}: {}", file.path.display(), idx + 1, line.trim()));
                }
            }
        }
    }

    assert!(
        violations.is_empty(),
        "UI crates used in wheel-core:\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_tui_depends_on_core() {
    let manifest = fs::read_to_string(workspace_root().join("tui/Cargo.toml"))
        .expect("tui/Cargo.toml is readable");
    assert!(manifest.contains("wheel-core = { path = \"../wheel/core\" }"));
}
