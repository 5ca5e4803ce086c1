//! Decoder config loader (strict parsing).

pub mod schema;

use std::fs;

use srenvelope_core::error::{Result, SrEnvelopeError};

pub use schema::{DecodeSection, DecoderConfig, RegistrySection};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "SRENVELOPE_CONFIG";
/// Config file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "srenvelope.yaml";
/// Environment variable overriding `registry.url`.
pub const REGISTRY_URL_ENV: &str = "SCHEMA_REGISTRY_URL";

pub fn load_from_file(path: &str) -> Result<DecoderConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SrEnvelopeError::Config(format!("read config failed ({path}): {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<DecoderConfig> {
    let cfg: DecoderConfig = serde_yaml::from_str(s)
        .map_err(|e| SrEnvelopeError::Config(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Load the config named by the environment, then apply the registry url override.
pub fn load_from_env() -> Result<DecoderConfig> {
    let path = env_or_default(CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH);
    let cfg = load_from_file(&path)?;
    with_registry_url(cfg, std::env::var(REGISTRY_URL_ENV).ok())
}

/// Replace `registry.url` when `url` is set and re-validate.
pub fn with_registry_url(mut cfg: DecoderConfig, url: Option<String>) -> Result<DecoderConfig> {
    if let Some(url) = url {
        cfg.registry.url = url;
        cfg.validate()?;
    }
    Ok(cfg)
}

/// Value of environment variable `key`, or `default` when unset.
pub fn env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
