// Error types module

use thiserror::Error;

use crate::watermark::WatermarkError;

/// Top-level error for the `brandmark` binary.
///
/// Library callers normally deal with [`WatermarkError`] directly; this type
/// adds the startup failures around it.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Logging initialization failed: {0}")]
    Logging(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Watermarking failed: {0}")]
    Failed(String),

    #[error(transparent)]
    Watermark(#[from] WatermarkError),
}

impl Error {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::Logging(_) => 2,
            Error::Io(_) | Error::Failed(_) | Error::Watermark(_) => 1,
        }
    }
}
