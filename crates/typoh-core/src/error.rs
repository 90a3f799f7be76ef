//! Pipeline error types.

/// Error returned by [`Typographer::run`](crate::Typographer::run).
///
/// Both variants are fatal: output written before the failure stays written.
#[derive(Debug, thiserror::Error)]
pub enum TypographyError {
    /// The input source failed.
    #[error("Failed to read input: {0}")]
    Read(#[source] std::io::Error),

    /// The output sink rejected a write.
    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),
}
