//! Document conversion.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use clap::Args;
use typoh_config::{Config, Pass};
use typoh_core::{RunSummary, Typographer};

use super::pattern_table;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for converting a document.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Document to transform (default: standard input).
    pub input: Option<PathBuf>,

    /// Write the result to a file instead of standard output.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ConvertArgs {
    /// Execute the conversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be opened or read, or the output
    /// cannot be created or written.
    pub(crate) fn execute(self, config: &Config, output: &Output) -> Result<(), CliError> {
        tracing::debug!(input = ?self.input, output = ?self.output, "Converting document");

        let input: Box<dyn Read> = match &self.input {
            Some(path) => Box::new(File::open(path).map_err(|source| CliError::Open {
                path: path.clone(),
                source,
            })?),
            None => Box::new(io::stdin().lock()),
        };

        let Some(path) = self.output else {
            convert(config, input, BufWriter::new(io::stdout().lock()))?;
            return Ok(());
        };

        let file = File::create(&path).map_err(|source| CliError::Create {
            path: path.clone(),
            source,
        })?;
        let summary = convert(config, input, BufWriter::new(file))?;

        output.success(&format!(
            "Wrote {} bytes to {}",
            summary.bytes_out,
            path.display()
        ));
        Ok(())
    }
}

/// Run both configured passes over `input`.
fn convert<R: Read, W: Write>(
    config: &Config,
    input: R,
    sink: W,
) -> Result<RunSummary, CliError> {
    let mut typographer = Typographer::new(
        pattern_table(config, Pass::First),
        pattern_table(config, Pass::Second),
    );
    Ok(typographer.run(input, sink)?)
}
