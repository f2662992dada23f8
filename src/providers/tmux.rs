use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use crate::utils::debug_with_context;

pub const TMUX_TIMEOUT: Duration = Duration::from_millis(500);

/// Current tmux session name, when running inside tmux.
pub async fn tmux_session_id() -> Option<String> {
    std::env::var_os("TMUX")?;

    let output = timeout(
        TMUX_TIMEOUT,
        Command::new("tmux")
            .args(["display-message", "-p", "#S"])
            .output(),
    )
    .await
    .ok()?
    .ok()?;

    if !output.status.success() {
        debug_with_context("tmux", "display-message failed");
        return None;
    }
    parse_session_name(&String::from_utf8_lossy(&output.stdout))
}

pub fn parse_session_name(output: &str) -> Option<String> {
    let name = output.trim();
    (!name.is_empty()).then(|| name.to_string())
}
