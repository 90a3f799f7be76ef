//! typoh CLI - Typography for markup documents.
//!
//! Reads a document (a file, or standard input), replaces typing shortcuts
//! in its prose with typographic characters, and writes the result to
//! standard output or `--output`. Tags are copied through untouched.
//!
//! `--list` prints the active substitution tables instead.

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use typoh_config::Config;

use commands::ConvertArgs;
use error::CliError;
use output::Output;

/// typoh - Typography for markup documents.
#[derive(Parser)]
#[command(name = "typoh", version, about)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,

    /// Path to configuration file (default: auto-discover typoh.toml).
    #[arg(short, long, env = "TYPOH_CONFIG")]
    config: Option<PathBuf>,

    /// Print the active substitutions and exit.
    #[arg(short, long, conflicts_with_all = ["input", "output"])]
    list: bool,

    /// Enable verbose output (debug logging on stderr).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn execute(self, output: &Output) -> Result<(), CliError> {
        let config = Config::load(self.config.as_deref())?;

        if self.list {
            commands::list::execute(&config, output);
            return Ok(());
        }

        self.convert.execute(&config, output)
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    // Logs go to stderr; stdout carries the document.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = cli.execute(&output) {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_input_and_output() {
        let cli = Cli::try_parse_from(["typoh", "in.html", "-o", "out.html"]).unwrap();
        assert_eq!(cli.convert.input, Some(PathBuf::from("in.html")));
        assert_eq!(cli.convert.output, Some(PathBuf::from("out.html")));
        assert!(!cli.list);
    }

    #[test]
    fn test_cli_defaults_to_stdin() {
        let cli = Cli::try_parse_from(["typoh"]).unwrap();
        assert!(cli.convert.input.is_none());
        assert!(cli.convert.output.is_none());
    }

    #[test]
    fn test_cli_list_conflicts_with_input() {
        assert!(Cli::try_parse_from(["typoh", "--list", "in.html"]).is_err());
        assert!(Cli::try_parse_from(["typoh", "--list"]).is_ok());
    }
}
