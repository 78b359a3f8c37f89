use anyhow::Context;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub mod defaults;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub input: InputConfig,
    pub browse: BrowseConfig,
    pub player: PlayerConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base address of the archive browsing API, e.g. `http://localhost:8000/api/v1`.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub mouse: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Collection opened by the "featured" shortcut.
    pub featured_collection: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// External program used to play a video's first playback URL.
    pub command: String,
    /// Extra arguments placed before the URL.
    pub args: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where the TUI log file lives.
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        defaults::defaults()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::BASE_URL.to_string(),
            timeout_secs: defaults::TIMEOUT_SECS,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { mouse: true }
    }
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            featured_collection: defaults::FEATURED_COLLECTION.to_string(),
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: "mpv".to_string(),
            args: Vec::new(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        let data_dir = project_dirs()
            .as_ref()
            .map(|p| p.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("arcbrowse"));
        Self { data_dir }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs.max(1))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "arcbrowse", "arcbrowse")
}

pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj = project_dirs().context("ProjectDirs unavailable")?;
    Ok(proj.config_dir().join("config.toml"))
}

fn resolve(override_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    match override_path {
        Some(p) => Ok(p.to_path_buf()),
        None => default_config_path(),
    }
}

pub fn save(cfg: &Config, override_path: Option<&Path>) -> anyhow::Result<()> {
    let path = resolve(override_path)?;
    write_config(cfg, &path)
}

fn write_config(cfg: &Config, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("create dir {}", parent.display()))?;
    }
    let raw = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }
    Ok(())
}

/// Load the config, writing the defaults on first run.
pub fn load(override_path: Option<&Path>) -> anyhow::Result<Config> {
    let path = resolve(override_path)?;

    if !path.exists() {
        let cfg = defaults::defaults();
        write_config(&cfg, &path).context("write default config")?;
        tracing::info!(path = %path.display(), "wrote default config");
        return Ok(cfg);
    }

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let cfg = toml::from_str::<Config>(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("arcbrowse-test-{}-{name}", std::process::id()))
            .join("config.toml")
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let cfg: Config = toml::from_str(
            r#"
[api]
base_url = "https://archive.example/api/v1"
"#,
        )
        .unwrap();
        assert_eq!(cfg.api.base_url, "https://archive.example/api/v1");
        assert_eq!(cfg.api.timeout_secs, defaults::TIMEOUT_SECS);
        assert_eq!(cfg.browse.featured_collection, "TV-FOXNEWSW");
        assert_eq!(cfg.player.command, "mpv");
    }

    #[test]
    fn test_load_writes_defaults_then_roundtrips_save() {
        let path = scratch_path("roundtrip");
        let _ = fs::remove_file(&path);

        let cfg = load(Some(&path)).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.api.base_url, defaults::BASE_URL);

        let mut cfg = cfg;
        cfg.api.base_url = "http://10.0.0.2:8000/api/v1".into();
        save(&cfg, Some(&path)).unwrap();
        let again = load(Some(&path)).unwrap();
        assert_eq!(again.api.base_url, "http://10.0.0.2:8000/api/v1");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_timeout_is_never_zero() {
        let api = ApiConfig {
            base_url: String::new(),
            timeout_secs: 0,
        };
        assert_eq!(api.timeout(), std::time::Duration::from_secs(1));
    }
}
