//! Core traits for remix configuration.
//!
//! The primary trait is [`ConfigProvider`], which lets the CLI and HTTP
//! surfaces run against any configuration source (a TOML file, a test
//! fixture, or an embedding application's own settings).

use crate::Result;

/// Trait for application configuration.
///
/// # Bounds
///
/// - `Send + Sync`: Configuration must be shareable across threads
/// - `Clone`: Configuration can be duplicated for passing to subsystems
/// - `'static`: Configuration lifetime is not borrowed
///
/// # Example
///
/// ```
/// use remix_core::traits::ConfigProvider;
/// use remix_core::Result;
///
/// #[derive(Clone)]
/// struct FixedConfig;
///
/// impl ConfigProvider for FixedConfig {
///     fn project_name(&self) -> &str {
///         "remix"
///     }
///
///     fn api_key(&self) -> Result<String> {
///         Ok("sk-test".to_string())
///     }
///
///     fn model(&self) -> &str {
///         "claude-3-opus-20240229"
///     }
/// }
///
/// assert_eq!(FixedConfig.max_selection(), 6);
/// ```
pub trait ConfigProvider: Send + Sync + Clone + 'static {
    /// The project name, used in log lines and the version banner.
    fn project_name(&self) -> &str;

    /// API key for the hosted language model.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no key is configured.
    fn api_key(&self) -> Result<String>;

    /// Model identifier sent with each completion request.
    fn model(&self) -> &str;

    /// Maximum tokens the model may generate per remix.
    fn max_tokens(&self) -> u32 {
        1024
    }

    /// Heading line that opens the highlights section of a markdown document.
    fn section_marker(&self) -> &str {
        "### Highlights"
    }

    /// Upper bound on quotes drawn per selection.
    fn max_selection(&self) -> usize {
        6
    }
}
