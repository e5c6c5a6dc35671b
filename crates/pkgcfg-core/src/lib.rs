//! Domain types and collaborator contracts for pkgcfg.
//!
//! This crate has no I/O of its own. It defines the package source value
//! object, the key/value [`settings::Settings`] contract, the workspace
//! lifecycle contract and the legacy storage contracts that the
//! infrastructure crate implements and the application crate composes.

pub mod error;
pub mod legacy;
pub mod settings;
pub mod source;
pub mod workspace;

// Re-export common error type
pub use error::{PkgcfgError, Result};
