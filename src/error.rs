use thiserror::Error;

/// Errors that can surface from rendering a ZPL document.
///
/// The analyzer itself never fails on user input; unknown commands and
/// malformed parameters are absorbed with documented defaults.
#[derive(Debug, Error)]
pub enum ZplError {
    /// The document did not produce any label.
    #[error("document produced no labels")]
    EmptyDocument,

    /// The delegated barcode engine rejected the data. Recovered locally
    /// with placeholder dimensions; surfaced only in logs.
    #[error("barcode generation error: {0}")]
    BarcodeError(String),

    /// The final PNG encode failed.
    #[error("PNG encoding error: {0}")]
    EncodeError(String),
}

/// A specialized Result type for ZPL operations.
pub type ZplResult<T> = Result<T, ZplError>;
