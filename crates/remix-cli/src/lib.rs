//! Command-line interface and HTTP endpoint for Content Remixer.
//!
//! # Key Abstractions
//!
//! - [`RemixCli<C>`]: the application, parameterized over a config provider
//! - [`RemixConfig`]: file/env/default configuration loaded with `confyg`
//! - [`server::router`]: the axum routes behind `remix serve`

#![doc = include_str!("../README.md")]

pub mod app;
pub mod cli;
pub mod config;
pub mod config_handlers;
pub mod highlight_handlers;
pub mod remix_handlers;
pub mod server;

pub use app::RemixCli;
pub use cli::{CliArgs, Command};
pub use config::RemixConfig;
