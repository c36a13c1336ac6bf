mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Environment variables that carry secrets, checked in order.
const EXPECTED_KEY_VARS: [&str; 2] = ["expected_key", "CINEREDUX_EXPECTED_KEY"];
const TMDB_API_KEY_VARS: [&str; 2] = ["api_key", "TMDB_API_KEY"];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./cineredux.toml",
        "./config.toml",
        "~/.config/cineredux/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Load the config file (if any), read `.env`, then let secrets from the
/// process environment override whatever the file said.
pub fn load_runtime_config(custom_path: Option<&Path>) -> Result<Config> {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded environment from {:?}", path),
        Err(dotenvy::Error::Io(_)) => {}
        Err(e) => return Err(e).context("Failed to parse .env file"),
    }

    let mut config = load_config_or_default(custom_path)?;
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate_config(&config)?;
    warn_missing_secrets(&config);

    Ok(config)
}

/// Overlay secrets from an environment lookup onto `config`.
///
/// Empty values are ignored so an exported-but-blank variable does not wipe
/// a key set in the config file.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let first = |names: &[&str]| {
        names
            .iter()
            .filter_map(|name| lookup(name))
            .find(|value| !value.is_empty())
    };

    if let Some(key) = first(&EXPECTED_KEY_VARS) {
        config.auth.expected_key = Some(key);
    }
    if let Some(key) = first(&TMDB_API_KEY_VARS) {
        config.tmdb.api_key = key;
    }
}

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    if config.server.port == 0 {
        anyhow::bail!("Server port cannot be 0");
    }

    if !(1..=20).contains(&config.catalog.list_limit) {
        anyhow::bail!(
            "catalog.list_limit must be between 1 and 20, got {}",
            config.catalog.list_limit
        );
    }

    if config.catalog.enrichment_concurrency == 0 {
        anyhow::bail!("catalog.enrichment_concurrency must be at least 1");
    }

    for (name, url) in [
        ("tmdb.base_url", &config.tmdb.base_url),
        ("critics.base_url", &config.critics.base_url),
    ] {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            anyhow::bail!("{} must be an http(s) URL, got {:?}", name, url);
        }
    }

    Ok(())
}

fn warn_missing_secrets(config: &Config) {
    if config.auth.expected_key.as_deref().unwrap_or("").is_empty() {
        tracing::warn!("No expected API key configured; all public endpoints will reject");
    }
    if config.tmdb.api_key.is_empty() {
        tracing::warn!("No TMDB API key configured; upstream calls will fail");
    }
}
