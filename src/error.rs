//! Error type for the cyclecount library.

use thiserror::Error;

use crate::config::ValidationError;

/// Errors raised by the quantizer, the signal reader and the histogram builder.
///
/// Peak extraction and cycle counting themselves are total and never fail.
#[derive(Debug, Error)]
pub enum RainflowError {
    /// `sample * scale` does not fit in an `i32`.
    #[error("sample {index} ({value} * {scale}) overflows i32")]
    QuantizeOverflow {
        /// Position of the offending sample in the signal.
        index: usize,
        /// The raw sample value.
        value: f64,
        /// Scale factor that was applied.
        scale: f64,
    },

    /// `sample * scale` is NaN or infinite.
    #[error("sample {index} is not finite after scaling ({value} * {scale})")]
    NonFinite {
        index: usize,
        value: f64,
        scale: f64,
    },

    /// A histogram was requested with zero bins.
    #[error("histogram needs at least one bin, got {0}")]
    InvalidBinCount(usize),

    /// The requested column is not present in the signal file.
    #[error("column '{0}' not found in signal file")]
    MissingColumn(String),

    /// A data row ends before the selected column.
    #[error("line {line}: row has no column {column}")]
    ShortRow { line: usize, column: usize },

    /// The signal section of the configuration is unusable.
    #[error("invalid signal configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    /// A cell in the signal column could not be parsed as a number.
    #[error("line {line}: cannot parse '{value}' as a number")]
    ParseValue { line: usize, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, RainflowError>;
