//! srenvelope registry library entry.
//!
//! This crate resolves schema ids against a remote registry and wires the
//! core codec into a full decode pipeline. It is consumed by the binary
//! (`main.rs`) and by integration tests.

pub mod config;
pub mod pipeline;
pub mod resolver;

pub use pipeline::{DecodedMessage, MessageDecoder};
pub use resolver::{
    parse_schema_id, resolve_schema_str, CachedSchemaRegistry, HttpSchemaRegistry,
    InMemorySchemaRegistry, SchemaRegistry,
};
