use std::time::Duration;

use serde::Deserialize;
use srenvelope_core::envelope::text::PAYLOAD_OFFSET;
use srenvelope_core::error::{Result, SrEnvelopeError};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecoderConfig {
    pub version: u32,

    pub registry: RegistrySection,

    #[serde(default)]
    pub decode: DecodeSection,
}

impl DecoderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SrEnvelopeError::Config(format!(
                "unsupported config version {}",
                self.version
            )));
        }

        self.registry.validate()?;
        self.decode.validate()?;

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistrySection {
    pub url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    /// Cache schema text per id. Off by default: every decode hits the registry.
    #[serde(default)]
    pub cache: bool,
}

impl RegistrySection {
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(SrEnvelopeError::Config(
                "registry.url must start with http:// or https://".into(),
            ));
        }
        if !(100..=60000).contains(&self.timeout_ms) {
            return Err(SrEnvelopeError::Config(
                "registry.timeout_ms must be between 100 and 60000".into(),
            ));
        }
        if self.username.is_some() != self.password.is_some() {
            return Err(SrEnvelopeError::Config(
                "registry.username and registry.password must be set together".into(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Basic auth credentials, when both halves are non-empty.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some((u, p)),
            _ => None,
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DecodeSection {
    /// Bytes skipped before the schema-encoded payload.
    #[serde(default = "default_payload_offset")]
    pub payload_offset: usize,
}

impl Default for DecodeSection {
    fn default() -> Self {
        Self {
            payload_offset: default_payload_offset(),
        }
    }
}

impl DecodeSection {
    pub fn validate(&self) -> Result<()> {
        if !(PAYLOAD_OFFSET..=64).contains(&self.payload_offset) {
            return Err(SrEnvelopeError::Config(format!(
                "decode.payload_offset must be between {PAYLOAD_OFFSET} and 64"
            )));
        }
        Ok(())
    }
}

fn default_payload_offset() -> usize {
    PAYLOAD_OFFSET
}
