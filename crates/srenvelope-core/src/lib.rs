//! srenvelope core: schema-registry envelope codec, text framing, and
//! schema-driven payload decoding.
//!
//! This crate defines the wire-level contracts and error surface shared by the
//! registry client and the decode pipeline. It performs no I/O, so it can be
//! used wherever schema text is already at hand.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `SrEnvelopeError`/`Result` so a bad
//! message fails its own decode instead of taking down the process.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod envelope;
pub mod error;
pub mod schema;
pub mod value;

/// Shared result type.
pub use error::{ErrorCode, Result, SrEnvelopeError};
pub use value::{Object, Value};
