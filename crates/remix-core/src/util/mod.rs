//! Utility modules.
//!
//! - [`files`]: Markdown document loading

pub mod files;
