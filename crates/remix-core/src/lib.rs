//! Remix Core: shared types, traits, errors, and document loading.
//!
//! This crate provides the foundational types used across all remix crates.
//! It has no internal dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration abstraction
//! - [`util`]: Document loading

#![doc = include_str!("../README.md")]

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;
pub use util::files::{Document, load_document};
