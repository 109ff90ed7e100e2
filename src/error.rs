use std::fmt;

/// An error that can occur when constructing or querying a container or
/// index.
///
/// Query outcomes that are merely empty (no occurrence, empty interval,
/// exhausted `select`) are not errors; they are reported through empty
/// collections and [`Option`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// An index or range lies outside the container's defined domain.
    OutOfRange { index: usize, len: usize },
    /// Two operands were required to have equal length.
    LengthMismatch { left: usize, right: usize },
    /// An element width of 0 or more than 64 bits was requested.
    InvalidWidth { width: usize },
    /// Text and pattern are packed with different element widths.
    WidthMismatch { text: usize, pattern: usize },
    /// The sentinel contract on an input text is violated.
    MalformedInput(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::OutOfRange { index, len } => {
                write!(f, "index {} is out of range for length {}", index, len)
            }
            Error::LengthMismatch { left, right } => {
                write!(f, "operands must have equal length: {} != {}", left, right)
            }
            Error::InvalidWidth { width } => {
                write!(f, "element width must be in [1, 64], got {}", width)
            }
            Error::WidthMismatch { text, pattern } => write!(
                f,
                "pattern width {} does not match text width {}",
                pattern, text
            ),
            Error::MalformedInput(msg) => write!(f, "malformed input text: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

/// A specialized result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
