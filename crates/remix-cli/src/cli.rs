//! CLI argument parsing and command definitions.
//!
//! Global flags (configuration, verbosity) plus the remix commands:
//! highlights, remix, serve, version, and config.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};
use remix_content::Platform;

/// Most selections `remix highlights --rounds` will draw.
pub const MAX_ROUNDS: u16 = 100;

// ============================================================================
// CLI argument types
// ============================================================================

/// Turn long-form text and reading highlights into social posts.
#[derive(Parser, Debug)]
#[command(name = "remix", author, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "REMIX_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Extract quotes from a markdown highlights section and print a random selection.
    Highlights(HighlightsArgs),

    /// Rewrite text as posts for a social platform.
    Remix(RemixArgs),

    /// Start the HTTP server.
    Serve {
        /// Port to listen on (defaults to server.port).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print version information.
    Version,

    /// Configuration operations.
    Config(ConfigCommand),
}

/// Arguments for `remix highlights`.
#[derive(Args, Debug)]
pub struct HighlightsArgs {
    /// Markdown file containing a highlights section.
    pub file: PathBuf,

    /// Maximum quotes per selection (defaults to highlights.max_selection).
    #[arg(short = 'n', long)]
    pub count: Option<usize>,

    /// Seed for a reproducible selection.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of selections to draw from the same quotes.
    #[arg(
        long,
        default_value = "1",
        value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_ROUNDS))
    )]
    pub rounds: u16,

    /// Print every extracted quote instead of a selection.
    #[arg(long)]
    pub all: bool,
}

/// Arguments for `remix remix`.
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["text", "file", "highlights"])
))]
pub struct RemixArgs {
    /// Text to remix.
    #[arg(short, long)]
    pub text: Option<String>,

    /// Read the text to remix from a file.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Remix a random selection of quotes from a markdown highlights file.
    #[arg(long)]
    pub highlights: Option<PathBuf>,

    /// Target platform: twitter, instagram, or linkedin.
    #[arg(short, long, default_value = "twitter")]
    pub platform: Platform,

    /// Custom instructions replacing the platform prompt.
    #[arg(long)]
    pub prompt: Option<String>,

    /// Seed for the highlights selection.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print a tweet link under each post.
    #[arg(long)]
    pub tweet_links: bool,

    /// Save the remix as JSON.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "llm.model").
        key: String,
    },

    /// Set a configuration value by dotted key.
    Set {
        /// Dotted key (e.g., "llm.model").
        key: String,

        /// Value to set.
        value: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },

    /// Export configuration as environment variables.
    Export {
        /// Format as Docker --env flags.
        #[arg(long)]
        docker_env: bool,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_args_default() {
        let args = CliArgs::parse_from(["remix"]);
        assert!(!args.verbose);
        assert!(!args.quiet);
        assert!(args.command.is_none());
    }

    #[test]
    fn test_cli_args_verbose_and_quiet() {
        let args = CliArgs::parse_from(["remix", "--verbose"]);
        assert!(args.verbose);
        assert!(!args.quiet);

        let args = CliArgs::parse_from(["remix", "-q"]);
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_args_config() {
        let args = CliArgs::parse_from(["remix", "--config", "/path/to/config.toml"]);
        assert_eq!(args.config, Some("/path/to/config.toml".to_string()));
    }

    #[test]
    fn test_highlights_command_defaults() {
        let args = CliArgs::parse_from(["remix", "highlights", "book.md"]);
        match args.command {
            Some(Command::Highlights(h)) => {
                assert_eq!(h.file, PathBuf::from("book.md"));
                assert!(h.count.is_none());
                assert!(h.seed.is_none());
                assert_eq!(h.rounds, 1);
                assert!(!h.all);
            }
            _ => panic!("Expected Highlights command"),
        }
    }

    #[test]
    fn test_highlights_command_options() {
        let args = CliArgs::parse_from([
            "remix",
            "highlights",
            "book.md",
            "-n",
            "3",
            "--seed",
            "42",
            "--rounds",
            "2",
        ]);
        match args.command {
            Some(Command::Highlights(h)) => {
                assert_eq!(h.count, Some(3));
                assert_eq!(h.seed, Some(42));
                assert_eq!(h.rounds, 2);
            }
            _ => panic!("Expected Highlights command"),
        }
    }

    #[test]
    fn test_highlights_rounds_bounds() {
        for rounds in ["0", "101", "18446744073709551615"] {
            let result =
                CliArgs::try_parse_from(["remix", "highlights", "book.md", "--rounds", rounds]);
            assert!(result.is_err(), "--rounds {rounds} should be rejected");
        }

        let args = CliArgs::parse_from(["remix", "highlights", "book.md", "--rounds", "100"]);
        match args.command {
            Some(Command::Highlights(h)) => assert_eq!(h.rounds, MAX_ROUNDS),
            _ => panic!("Expected Highlights command"),
        }
    }

    #[test]
    fn test_remix_command_text() {
        let args = CliArgs::parse_from(["remix", "remix", "--text", "hello"]);
        match args.command {
            Some(Command::Remix(r)) => {
                assert_eq!(r.text.as_deref(), Some("hello"));
                assert_eq!(r.platform, Platform::Twitter);
                assert!(!r.tweet_links);
                assert!(r.output.is_none());
            }
            _ => panic!("Expected Remix command"),
        }
    }

    #[test]
    fn test_remix_command_platform_and_highlights() {
        let args = CliArgs::parse_from([
            "remix",
            "remix",
            "--highlights",
            "book.md",
            "--platform",
            "linkedin",
            "--seed",
            "7",
            "--output",
            "out.json",
        ]);
        match args.command {
            Some(Command::Remix(r)) => {
                assert_eq!(r.highlights, Some(PathBuf::from("book.md")));
                assert_eq!(r.platform, Platform::LinkedIn);
                assert_eq!(r.seed, Some(7));
                assert_eq!(r.output, Some(PathBuf::from("out.json")));
            }
            _ => panic!("Expected Remix command"),
        }
    }

    #[test]
    fn test_remix_command_requires_one_source() {
        assert!(CliArgs::try_parse_from(["remix", "remix"]).is_err());
        assert!(
            CliArgs::try_parse_from(["remix", "remix", "--text", "a", "--file", "b.txt"]).is_err()
        );
    }

    #[test]
    fn test_remix_command_rejects_unknown_platform() {
        let result =
            CliArgs::try_parse_from(["remix", "remix", "--text", "a", "--platform", "myspace"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_serve_command() {
        let args = CliArgs::parse_from(["remix", "serve"]);
        match args.command {
            Some(Command::Serve { port }) => assert!(port.is_none()),
            _ => panic!("Expected Serve command"),
        }

        let args = CliArgs::parse_from(["remix", "serve", "--port", "8080"]);
        match args.command {
            Some(Command::Serve { port }) => assert_eq!(port, Some(8080)),
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_version_command() {
        let args = CliArgs::parse_from(["remix", "version"]);
        assert!(matches!(args.command, Some(Command::Version)));
    }

    // ------------------------------------------------------------------------
    // Config command tests
    // ------------------------------------------------------------------------

    #[test]
    fn test_config_get_command() {
        let args = CliArgs::parse_from(["remix", "config", "get", "llm.model"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Get { key },
            })) => {
                assert_eq!(key, "llm.model");
            }
            _ => panic!("Expected Config Get command"),
        }
    }

    #[test]
    fn test_config_set_command() {
        let args = CliArgs::parse_from(["remix", "config", "set", "server.port", "8080"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Set { key, value },
            })) => {
                assert_eq!(key, "server.port");
                assert_eq!(value, "8080");
            }
            _ => panic!("Expected Config Set command"),
        }
    }

    #[test]
    fn test_config_init_force() {
        let args = CliArgs::parse_from(["remix", "config", "init", "--force"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Init { file, force },
            })) => {
                assert!(file.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command with force"),
        }
    }

    #[test]
    fn test_config_export_docker_env() {
        let args = CliArgs::parse_from(["remix", "config", "export", "--docker-env"]);
        match args.command {
            Some(Command::Config(ConfigCommand {
                command: ConfigAction::Export { docker_env },
            })) => {
                assert!(docker_env);
            }
            _ => panic!("Expected Config Export command with docker_env"),
        }
    }
}
