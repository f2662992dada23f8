use crate::config::{Config, DisplayStyle};
use crate::utils::{debug_with_context, warn};
use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tokio::fs;

pub const CONFIG_ENV: &str = "CC_POWERLINE_CONFIG";
pub const THEME_ENV: &str = "CC_POWERLINE_THEME";
pub const STYLE_ENV: &str = "CC_POWERLINE_STYLE";

/// Load configuration with priority: explicit path > Env vars > Config files > Defaults
pub async fn load_config(config_path: Option<PathBuf>) -> Result<Config> {
    let mut config = match config_path.or_else(|| env::var(CONFIG_ENV).ok().map(PathBuf::from)) {
        Some(path) => load_config_file(&path).await?,
        None => load_config_from_default_locations().await,
    };

    apply_env_overrides(&mut config);

    Ok(config)
}

/// First config file that parses wins; broken files are reported and skipped.
async fn load_config_from_default_locations() -> Config {
    for path in get_config_search_paths() {
        if !path.exists() {
            continue;
        }
        match load_config_file(&path).await {
            Ok(config) => {
                debug_with_context("config", &format!("Loaded {}", path.display()));
                return config;
            }
            Err(e) => warn(&format!("Failed to load config from {}: {:#}", path.display(), e)),
        }
    }

    debug_with_context("config", "No config file found, using defaults");
    Config::default()
}

pub fn get_config_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(".cc-powerline.json")];

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".claude").join("cc-powerline.json"));
        paths.push(home.join(".config").join("cc-powerline").join("config.json"));
    }

    paths
}

pub async fn load_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content).with_context(|| format!("Failed to parse config file: {}", path.display()))
}

pub fn parse_config(content: &str) -> Result<Config> {
    Ok(serde_json::from_str(content)?)
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(theme) = env::var(THEME_ENV) {
        config.theme = theme;
    }

    if let Ok(style) = env::var(STYLE_ENV) {
        match style.parse::<DisplayStyle>() {
            Ok(style) => config.display.style = style,
            Err(e) => warn(&format!("{}: {}", STYLE_ENV, e)),
        }
    }
}
