//! Error types for redlite.

use crate::kind::ValueKind;
use std::fmt;

/// The main error type for redlite operations.
///
/// Absence of a value is not an error: lookups return `Ok(None)`.
#[derive(Debug)]
pub enum Error {
    /// A lock was poisoned (internal error)
    LockPoisoned,

    /// I/O error
    Io(std::io::Error),

    /// Error raised by the underlying transactional store, kept as its source
    Store(Box<dyn std::error::Error + Send + Sync + 'static>),

    /// The key already holds a value of another kind
    WrongType {
        /// Kind currently stored under the key
        found: ValueKind,
        /// Kind the operation needed
        wanted: ValueKind,
    },

    /// Malformed argument (range bounds, counts, keys, values)
    InvalidArgument(String),

    /// The element set of a list violates its structural invariant
    CorruptList(String),

    /// A push would move a list index outside the encodable range
    IndexOverflow {
        /// Last valid index before the overflow
        index: i64,
    },

    /// A type marker carries a tag byte outside the known kinds
    UnknownKind(u8),

    /// A write was attempted on a store opened read-only
    ReadOnly,

    /// The store has been closed
    Closed,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::LockPoisoned => write!(f, "Lock poisoned"),
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Store(e) => write!(f, "Store error: {}", e),
            Error::WrongType { found, wanted } => write!(
                f,
                "WRONGTYPE Operation against a key holding the wrong kind of value (found {}, wanted {})",
                found, wanted
            ),
            Error::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            Error::CorruptList(msg) => write!(f, "Corrupt list: {}", msg),
            Error::IndexOverflow { index } => {
                write!(f, "List index headroom exhausted at index {}", index)
            }
            Error::UnknownKind(tag) => write!(f, "Unknown value kind tag 0x{:02x}", tag),
            Error::ReadOnly => write!(f, "Store is opened read-only"),
            Error::Closed => write!(f, "Store is closed"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Store(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

/// A specialized `Result` type for redlite operations.
pub type Result<T> = std::result::Result<T, Error>;
