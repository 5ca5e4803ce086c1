//! Top-level facade crate for srenvelope.
//!
//! Re-exports the codec core and the registry pipeline so users can depend on a single crate.

pub mod core {
    pub use srenvelope_core::*;
}

pub mod registry {
    pub use srenvelope_registry::*;
}
