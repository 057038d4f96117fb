//! varscope - Entry Point

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use varscope::config::{CliOverrides, ResolvedConfig};
use varscope::view::ColorConfig;

/// varscope - browse captured debugger variables with large collections split into bands
#[derive(Parser, Debug)]
#[command(name = "varscope")]
#[command(version)]
#[command(about = "Inspect a captured variable snapshot; large collections are split into bands")]
pub struct Args {
    /// Path to snapshot JSON file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Items per band when a collection is split
    #[arg(short, long)]
    pub band_size: Option<usize>,

    /// Print the tree as indented text instead of starting the TUI
    #[arg(short, long, conflicts_with = "json")]
    pub print: bool,

    /// Print the tree as JSON instead of starting the TUI
    #[arg(long)]
    pub json: bool,

    /// Levels expanded by --print and --json
    #[arg(short, long)]
    pub depth: Option<usize>,

    /// Start with the Globals section expanded
    #[arg(short, long)]
    pub globals: bool,

    /// Show underscore-prefixed attributes and globals
    #[arg(long)]
    pub show_hidden: bool,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// CLI layer of the configuration; unset flags leave lower layers alone.
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            band_size: self.band_size,
            show_globals: self.globals.then_some(true),
            show_hidden: self.show_hidden.then_some(true),
            print_depth: self.depth,
        }
    }
}

/// Resolve configuration with full precedence chain:
/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, varscope::config::ConfigError> {
    let config_file = varscope::config::load_config_with_precedence(args.config.clone())?;
    let merged = varscope::config::merge_config(config_file)?;
    let with_env = varscope::config::apply_env_overrides(merged)?;
    varscope::config::apply_cli_overrides(with_env, args.overrides())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = resolve_config(&args)?;

    // Initialize tracing with configured log file path
    varscope::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    let input_source = varscope::source::detect_input_source(args.file.clone())?;
    let colors = ColorConfig::from_env_and_args(args.no_color);

    if args.print || args.json {
        let snapshot = input_source.read_snapshot()?;
        let options = config.inspect_options();
        let output = if args.json {
            varscope::view::render_json(&snapshot, options, config.print_depth)?
        } else {
            varscope::view::render_text(&snapshot, options, config.print_depth)
        };
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(output.as_bytes())?;
        if args.json {
            stdout.write_all(b"\n")?;
        }
        return Ok(());
    }

    varscope::view::run_with_source(input_source, &config, colors)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["varscope", "--help"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let err = Args::try_parse_from(["varscope", "--version"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["varscope"]);
        assert_eq!(args.file, None);
        assert_eq!(args.band_size, None);
        assert!(!args.print);
        assert!(!args.json);
        assert_eq!(args.depth, None);
        assert!(!args.globals);
        assert!(!args.show_hidden);
        assert!(!args.no_color);
        assert_eq!(args.config, None);
        assert_eq!(args.overrides(), CliOverrides::default());
    }

    #[test]
    fn test_file_path_populates_file_field() {
        let args = Args::parse_from(["varscope", "snapshot.json"]);
        assert_eq!(args.file, Some(PathBuf::from("snapshot.json")));
    }

    #[test]
    fn test_band_size_flag() {
        let args = Args::parse_from(["varscope", "-b", "25"]);
        assert_eq!(args.band_size, Some(25));
        assert_eq!(args.overrides().band_size, Some(25));
    }

    #[test]
    fn test_band_size_rejects_non_numbers() {
        assert!(Args::try_parse_from(["varscope", "--band-size", "many"]).is_err());
    }

    #[test]
    fn test_zero_band_size_is_rejected_by_config() {
        let args = Args::parse_from(["varscope", "--band-size", "0", "--config", "/nonexistent/varscope.toml"]);
        let err = resolve_config(&args).unwrap_err();
        assert!(matches!(
            err,
            varscope::config::ConfigError::InvalidBandSize { .. }
        ));
    }

    #[test]
    fn test_print_and_json_conflict() {
        assert!(Args::try_parse_from(["varscope", "--print", "--json"]).is_err());
    }

    #[test]
    fn test_flags_become_overrides() {
        let args = Args::parse_from(["varscope", "--globals", "--show-hidden", "--depth", "4"]);
        let overrides = args.overrides();
        assert_eq!(overrides.show_globals, Some(true));
        assert_eq!(overrides.show_hidden, Some(true));
        assert_eq!(overrides.print_depth, Some(4));
    }
}
