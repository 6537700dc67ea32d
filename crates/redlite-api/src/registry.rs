//! Type registry.
//!
//! Finds which kind occupies a logical key by probing for its type marker
//! (`+<key>,<tag>`). Strings store their value in the marker itself, lists
//! keep an empty marker while they hold elements.

use redlite_core::keys::marker_prefix;
use redlite_core::{Error, ReadView, Result, ValueKind};

/// Kind currently stored under `key`, or [`ValueKind::None`].
pub fn type_of<V: ReadView + ?Sized>(view: &V, key: &[u8]) -> Result<ValueKind> {
    let prefix = marker_prefix(key);
    let Some((physical, _)) = view.first_with_prefix(&prefix)? else {
        return Ok(ValueKind::None);
    };
    match physical.get(prefix.len()) {
        Some(&tag) => ValueKind::from_tag(tag).ok_or(Error::UnknownKind(tag)),
        None => Ok(ValueKind::None),
    }
}

/// Fails with [`Error::WrongType`] when `key` holds a kind other than `wanted`.
pub fn ensure_kind<V: ReadView + ?Sized>(view: &V, key: &[u8], wanted: ValueKind) -> Result<()> {
    match type_of(view, key)? {
        ValueKind::None => Ok(()),
        found if found == wanted => Ok(()),
        found => Err(Error::WrongType { found, wanted }),
    }
}
