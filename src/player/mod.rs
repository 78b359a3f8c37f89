//! Hands a video's playback URL to an external player.

use crate::archive::models::Video;
use crate::config::PlayerConfig;
use anyhow::Context;
use tokio::process::Command;

fn build_command(cfg: &PlayerConfig, url: &str) -> anyhow::Result<Command> {
    let program = cfg.command.trim();
    if program.is_empty() {
        anyhow::bail!("no player command configured");
    }
    let mut cmd = Command::new(program);
    cmd.args(&cfg.args)
        .arg(url)
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .kill_on_drop(false);
    Ok(cmd)
}

/// Start the configured player on the video's first playback URL. The player
/// runs detached; its exit is only logged.
pub fn launch(cfg: &PlayerConfig, video: &Video) -> anyhow::Result<String> {
    let url = video
        .primary_playback_url()
        .with_context(|| format!("{} has no playback URL", video.identifier))?
        .to_string();

    let mut child = build_command(cfg, &url)?
        .spawn()
        .with_context(|| format!("spawn {}", cfg.command))?;

    let identifier = video.identifier.clone();
    tokio::spawn(async move {
        match child.wait().await {
            Ok(status) => tracing::debug!(identifier, %status, "player exited"),
            Err(e) => tracing::warn!(identifier, error = %e, "waiting on player failed"),
        }
    });
    tracing::info!(identifier = %video.identifier, url, "player launched");
    Ok(url)
}
