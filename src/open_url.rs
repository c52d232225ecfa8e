use anyhow::{Context, Result};
use std::process::Command;

/// Opens `url` with `open_command` when configured, else the system default.
pub fn open_url(url: &str, open_command: Option<&str>) -> Result<()> {
    if let Some(cmd) = open_command.filter(|c| !c.trim().is_empty()) {
        let mut parts = cmd.split_whitespace();
        let program = parts.next().unwrap_or(cmd);
        Command::new(program)
            .args(parts)
            .arg(url)
            .spawn()
            .with_context(|| format!("failed to run {}", program))?;
        return Ok(());
    }
    open::that(url).with_context(|| format!("failed to open {}", url))
}
