//! Value kinds sharing the logical keyspace.

use std::fmt;

/// Kind of value stored under a logical key.
///
/// Each kind is persisted as a single tag byte in its type marker entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// No value occupies the key
    None,
    /// Opaque byte string
    String,
    /// Field/value map (reserved, no accessor yet)
    Hash,
    /// Double-ended list
    List,
    /// Scored set (reserved, no accessor yet)
    SortedSet,
}

impl ValueKind {
    /// Tag byte written into type marker entries.
    pub const fn tag(self) -> u8 {
        match self {
            ValueKind::None => b'0',
            ValueKind::String => b's',
            ValueKind::Hash => b'h',
            ValueKind::List => b'l',
            ValueKind::SortedSet => b'z',
        }
    }

    /// Parses a tag byte, returning `None` for bytes outside the known kinds.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'0' => Some(ValueKind::None),
            b's' => Some(ValueKind::String),
            b'h' => Some(ValueKind::Hash),
            b'l' => Some(ValueKind::List),
            b'z' => Some(ValueKind::SortedSet),
            _ => None,
        }
    }

    /// Human readable name, as reported by `TYPE`.
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueKind::None => "none",
            ValueKind::String => "string",
            ValueKind::Hash => "hash",
            ValueKind::List => "list",
            ValueKind::SortedSet => "sortedset",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
