//! Contains the Error and Result type used throughout the crate.
use crate::TagType;

/// Various errors that can occur while building, decoding or encoding trees.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The source ran out part way through a value.
    #[error("eof: unexpectedly ran out of input")]
    UnexpectedEndOfStream,

    /// A decoded string length, array length or list count was negative.
    #[error("invalid nbt: negative length {0}")]
    NegativeLength(i64),

    /// A tag id, or the element id of a list, is not a known tag type.
    #[error("invalid nbt tag value: {0}")]
    InvalidTagType(u8),

    /// The factory was asked for a node it cannot build, ie. `End`.
    #[error("unsupported tag type: {0:?}")]
    UnsupportedTagType(TagType),

    /// Conversion between two node types that is not a lossless widening.
    #[error("invalid cast from {from:?} to {to:?}")]
    InvalidCast { from: TagType, to: TagType },

    /// A node of the wrong type was put into a list.
    #[error("invalid assignment: list holds {expected:?}, got {found:?}")]
    InvalidAssignment { expected: TagType, found: TagType },

    /// Writing a tree that has no root.
    #[error("nbt tree not initialized yet")]
    TreeNotInitialized,

    /// Expected unicode data but was not valid. Contains the invalid bytes.
    #[error("invalid nbt string: nonunicode: {}", String::from_utf8_lossy(.0))]
    Nonunicode(Vec<u8>),

    /// A string or sequence too long for its length prefix.
    #[error("len too large: {0}")]
    LengthTooLarge(usize),

    /// Compounds and lists nested deeper than the configured limit.
    #[error("nbt nested deeper than {0} levels")]
    DepthLimit(usize),

    /// Any other IO error from the underlying source or sink.
    #[error("io error: {0}")]
    Io(#[source] std::io::Error),
}

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEndOfStream,
            _ => Error::Io(e),
        }
    }
}

impl Error {
    pub(crate) fn invalid_cast(from: TagType, to: TagType) -> Error {
        Error::InvalidCast { from, to }
    }

    pub(crate) fn invalid_assignment(expected: TagType, found: TagType) -> Error {
        Error::InvalidAssignment { expected, found }
    }

    /// Whether this error came from the source or sink rather than the data.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io(_))
    }
}
