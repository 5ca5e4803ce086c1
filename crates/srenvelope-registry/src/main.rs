//! srenvelope-decode
//!
//! Reads quoted base64 messages from stdin (one per line), decodes each
//! against the registry, and writes one JSON object per line to stdout.
//! - Config: `$SRENVELOPE_CONFIG` (default `srenvelope.yaml`)
//! - Registry url override: `$SCHEMA_REGISTRY_URL`
//! - Log filter: `$RUST_LOG`

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use srenvelope_registry::{config, MessageDecoder};

fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    match run() {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            tracing::warn!(failed, "some messages could not be decoded");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(error = %e, "srenvelope-decode failed");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<usize, Box<dyn Error>> {
    let cfg = config::load_from_env()?;
    let decoder = MessageDecoder::from_config(&cfg);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut failed = 0;

    for (idx, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match decoder.decode_text(line) {
            Ok(msg) => {
                serde_json::to_writer(&mut out, &msg)?;
                writeln!(out)?;
            }
            Err(e) => {
                failed += 1;
                tracing::warn!(line = idx + 1, code = e.code().as_str(), error = %e, "decode failed");
            }
        }
    }

    out.flush()?;
    Ok(failed)
}
