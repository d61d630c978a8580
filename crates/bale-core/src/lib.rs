//! Document model, platform model, and attribute catalog for bale
//! specifications.
//!
//! A bale specification is a hierarchical manifest describing a
//! distributable software component: its files, platforms, dependencies,
//! and lifecycle hooks. This crate owns the in-memory representation:
//!
//! - **Document / SpecNode** — the specification tree, with raw attribute
//!   hashes exactly as authored.
//! - **Consumer** — the platform-resolved, read-only projection the
//!   analysis layer works against.
//! - **Attribute catalog** — the static schema table describing every
//!   attribute the toolchain knows.
//!
//! Loading validates attribute shapes once; everything downstream relies on
//! the validated document and performs pure reads.

pub mod attribute;
pub mod consumer;
pub mod error;
pub mod platform;
pub mod specification;
pub mod value;

// Re-exports for convenience.
pub use attribute::Attribute;
pub use consumer::Consumer;
pub use error::{Result, SpecError};
pub use platform::Platform;
pub use specification::{Document, SpecId, SpecNode};
pub use value::Patterns;
