//! CLI argument definitions using clap derive

use crate::config::CacheOverrides;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// fetch-cache - Local artifact cache for vendoring fetchers
///
/// Stores fetched trees (git checkouts, images, charts, downloads) on disk
/// keyed by fetcher namespace and cache id, and restores them on a hit.
#[derive(Parser, Debug)]
#[command(name = "fetch-cache")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "FETCH_CACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding .vendir-cache/ (default: home directory)
    #[arg(long, global = true, env = "FETCH_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Largest tree to cache, e.g. 1Mi, 500Ki, 2G
    #[arg(long, global = true, env = "FETCH_CACHE_MAX_SIZE")]
    pub max_size: Option<String>,

    /// Disable caching: lookups miss and saves are skipped
    #[arg(long, global = true)]
    pub no_cache: bool,
}

impl Cli {
    /// Cache settings that override the config file
    pub fn overrides(&self) -> CacheOverrides {
        CacheOverrides {
            root: self.cache_dir.clone(),
            max_size: self.max_size.clone(),
            disable: self.no_cache,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check whether an entry is cached (exit code 1 on a miss)
    Has(EntryArgs),

    /// Copy a fetched directory into the cache
    Save(SaveArgs),

    /// Copy a cached entry into a directory
    Restore(RestoreArgs),

    /// Print the total size of the regular files in a directory
    Size(SizeArgs),

    /// Show where an entry is stored and whether it exists
    Inspect(EntryArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Identifies a cache entry
#[derive(Parser, Debug)]
pub struct EntryArgs {
    /// Fetcher namespace (e.g. git, image, helm-chart; "" for none)
    pub namespace: String,

    /// Cache id (commit SHA, digest, version)
    pub key: String,

    /// Output format
    #[arg(short, long, default_value = "plain")]
    pub format: OutputFormat,
}

/// Arguments for the save command
#[derive(Parser, Debug)]
pub struct SaveArgs {
    /// Fetcher namespace ("" for none)
    pub namespace: String,

    /// Cache id
    pub key: String,

    /// Directory to cache
    pub source: PathBuf,
}

/// Arguments for the restore command
#[derive(Parser, Debug)]
pub struct RestoreArgs {
    /// Fetcher namespace ("" for none)
    pub namespace: String,

    /// Cache id
    pub key: String,

    /// Destination directory (created if missing)
    pub dest: PathBuf,
}

/// Arguments for the size command
#[derive(Parser, Debug)]
pub struct SizeArgs {
    /// Directory to measure
    pub dir: PathBuf,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show effective configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

/// Output format for entry commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Simple text
    Plain,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_has() {
        let cli = Cli::parse_from(["fetch-cache", "has", "git", "sha256:abc"]);
        match cli.command {
            Commands::Has(args) => {
                assert_eq!(args.namespace, "git");
                assert_eq!(args.key, "sha256:abc");
                assert_eq!(args.format, OutputFormat::Plain);
            }
            _ => panic!("expected Has command"),
        }
    }

    #[test]
    fn cli_parses_empty_namespace() {
        let cli = Cli::parse_from(["fetch-cache", "save", "", "v1", "/tmp/src"]);
        match cli.command {
            Commands::Save(args) => {
                assert_eq!(args.namespace, "");
                assert_eq!(args.source, PathBuf::from("/tmp/src"));
            }
            _ => panic!("expected Save command"),
        }
    }

    #[test]
    fn cli_parses_inspect_json() {
        let cli = Cli::parse_from(["fetch-cache", "inspect", "image", "v1", "--format", "json"]);
        match cli.command {
            Commands::Inspect(args) => assert_eq!(args.format, OutputFormat::Json),
            _ => panic!("expected Inspect command"),
        }
    }

    #[test]
    fn cli_global_overrides() {
        let cli = Cli::parse_from([
            "fetch-cache",
            "restore",
            "git",
            "v1",
            "out",
            "--cache-dir",
            "/srv/cache",
            "--max-size",
            "10Mi",
            "--no-cache",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.root, Some(PathBuf::from("/srv/cache")));
        assert_eq!(overrides.max_size.as_deref(), Some("10Mi"));
        assert!(overrides.disable);
    }

    #[test]
    fn cli_parses_config_init_force() {
        let cli = Cli::parse_from(["fetch-cache", "config", "init", "--force"]);
        match cli.command {
            Commands::Config(ConfigArgs {
                action: Some(ConfigAction::Init { force }),
            }) => assert!(force),
            _ => panic!("expected Config Init command"),
        }
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["fetch-cache", "size", "."]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["fetch-cache", "-vv", "size", "."]);
        assert_eq!(cli.verbose, 2);
    }
}
