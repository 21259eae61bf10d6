//! Integration Test: Sleep Prohibition
//!
//! **Policy**: production code MUST NOT sleep to wait for something. The
//! wheel waits on sequencer deadlines (`sleep_until`) and channel events.
//! **Exception**: frame pacing in the TUI app loop.

use architectural_enforcement::{code_part, rust_sources, test_module_start};

/// Lines above a sleep that may name the frame pacing it belongs to
const FRAME_CONTEXT_LINES: usize = 4;

fn sleep_calls(dir: &str, allow_frame_pacing: bool) -> Vec<String> {
    let mut violations = Vec::new();

    for file in rust_sources(dir) {
        let lines: Vec<&str> = file.content.lines().collect();
        let end = test_module_start(&file.content).unwrap_or(lines.len());

        for (idx, line) in lines.iter().enumerate().take(end) {
            let code = code_part(line);
            let thread_sleep = code.contains("thread::sleep(");
            let timer_sleep = code.contains("::sleep(") || code.contains(".sleep(");
            if !thread_sleep && !timer_sleep {
                continue;
            }

            if !thread_sleep && allow_frame_pacing && file.path.ends_with("tui/src/app.rs") {
                let from = idx.saturating_sub(FRAME_CONTEXT_LINES);
                let in_frame_code = lines[from..=idx]
                    .iter()
                    .any(|l| l.to_lowercase().contains("frame"));
                if in_frame_code {
                    continue;
                }
            }

            violations.push(format!("{}:{}: {}", file.path.display(), idx + 1, line.trim()));
        }
    }

    violations
}

#[test]
fn test_no_sleep_in_core() {
    let violations = sleep_calls("wheel/core/src", false);
    assert!(
        violations.is_empty(),
        "Sleep calls in wheel-core (wait on a deadline instead):\n{}",
        violations.join("\n")
    );
}

#[test]
fn test_tui_only_sleeps_for_frame_pacing() {
    let violations = sleep_calls("tui/src", true);
    assert!(
        violations.is_empty(),
        "Sleep calls in the TUI outside frame pacing:\n{}",
        violations.join("\n")
    );
}
