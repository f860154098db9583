use std::path::PathBuf;

/// Errors that can occur while parsing a `.dat` file
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Input path does not exist (or is not a file)
    #[error("DAT file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// No usable encoding, no `[Data]` marker, or no column header line
    #[error("Invalid DAT format: {0}")]
    InvalidFormat(String),

    /// The caller cancelled the parse
    #[error("Parse cancelled")]
    Cancelled,

    /// I/O error reading the file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
