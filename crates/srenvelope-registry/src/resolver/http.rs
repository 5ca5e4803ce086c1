//! Blocking HTTP client for a Confluent-compatible schema registry.
//!
//! - `GET {url}/schemas/ids/{id}` -> `{"schema": "<schema text>"}`
//! - Non-2xx, transport failures, and bodies without `schema` all map to
//!   `SchemaLookup`; nothing partial is returned.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;

use srenvelope_core::error::{Result, SrEnvelopeError};

use super::SchemaRegistry;
use crate::config::RegistrySection;

const ACCEPT: &str = "application/vnd.schemaregistry.v1+json, application/json";

#[derive(Debug, Deserialize)]
struct SchemaResponse {
    schema: String,
}

#[derive(Debug)]
pub struct HttpSchemaRegistry {
    base_url: String,
    agent: ureq::Agent,
    timeout: Duration,
    authorization: Option<String>,
}

impl HttpSchemaRegistry {
    pub fn new(url: &str, timeout: Duration) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            agent: ureq::AgentBuilder::new()
                .timeout_connect(timeout)
                .timeout_read(timeout)
                .timeout_write(timeout)
                .build(),
            timeout,
            authorization: None,
        }
    }

    pub fn from_config(cfg: &RegistrySection) -> Self {
        let registry = Self::new(&cfg.url, cfg.timeout());
        match cfg.credentials() {
            Some((user, pass)) => registry.with_basic_auth(user, pass),
            None => registry,
        }
    }

    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        let token = STANDARD.encode(format!("{username}:{password}"));
        self.authorization = Some(format!("Basic {token}"));
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up `id` with an explicit overall deadline for this request.
    pub fn lookup_with_timeout(&self, id: u32, timeout: Duration) -> Result<String> {
        let url = format!("{}/schemas/ids/{id}", self.base_url);
        tracing::debug!(schema_id = id, %url, "fetching schema");

        let mut req = self.agent.get(&url).set("Accept", ACCEPT).timeout(timeout);
        if let Some(auth) = &self.authorization {
            req = req.set("Authorization", auth);
        }

        let resp = req.call().map_err(|e| {
            let err = lookup_error(id, &url, e);
            tracing::warn!(schema_id = id, error = %err, "schema lookup failed");
            err
        })?;

        let body: SchemaResponse = resp.into_json().map_err(|e| SrEnvelopeError::SchemaLookup {
            id,
            reason: format!("invalid registry response from {url}: {e}"),
        })?;

        Ok(body.schema)
    }
}

impl SchemaRegistry for HttpSchemaRegistry {
    fn lookup_schema_by_id(&self, id: u32) -> Result<String> {
        self.lookup_with_timeout(id, self.timeout)
    }
}

fn lookup_error(id: u32, url: &str, err: ureq::Error) -> SrEnvelopeError {
    let reason = match err {
        ureq::Error::Status(code, resp) => {
            let detail = resp.into_string().unwrap_or_default();
            format!("http status {code} from {url}: {}", detail.trim())
        }
        ureq::Error::Transport(transport) => format!("transport error for {url}: {transport}"),
    };
    SrEnvelopeError::SchemaLookup { id, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let r = HttpSchemaRegistry::new("http://registry:8081/", Duration::from_secs(1));
        assert_eq!(r.base_url(), "http://registry:8081");
    }

    #[test]
    fn basic_auth_header_is_precomputed() {
        let r = HttpSchemaRegistry::new("http://registry:8081", Duration::from_secs(1))
            .with_basic_auth("user", "pass");
        assert_eq!(r.authorization.as_deref(), Some("Basic dXNlcjpwYXNz"));
    }
}
