//! Transaction views over the ordered keyspace.
//!
//! The engine behind these traits provides snapshot reads and atomic
//! read-write transactions. Keys and values are opaque bytes ordered
//! lexicographically.

use std::ops::ControlFlow;

/// Read access to one transaction's snapshot.
pub trait ReadView {
    /// Retrieve a value by key
    fn get(&self, key: &[u8]) -> crate::Result<Option<Vec<u8>>>;

    /// First entry (in ascending order) whose key starts with `prefix`
    fn first_with_prefix(&self, prefix: &[u8]) -> crate::Result<Option<(Vec<u8>, Vec<u8>)>>;

    /// Last entry (in ascending order) whose key starts with `prefix`
    fn last_with_prefix(&self, prefix: &[u8]) -> crate::Result<Option<(Vec<u8>, Vec<u8>)>>;

    /// Visit every entry with `start <= key <= end` in ascending order.
    ///
    /// Iteration stops early when `visit` returns [`ControlFlow::Break`].
    fn scan(
        &self,
        start: &[u8],
        end: &[u8],
        visit: &mut dyn FnMut(&[u8], &[u8]) -> ControlFlow<()>,
    ) -> crate::Result<()>;
}

/// Write access inside a read-write transaction.
///
/// Writes become visible to other transactions only after commit.
pub trait WriteView: ReadView {
    /// Insert or update a key-value pair
    fn set(&mut self, key: &[u8], value: &[u8]) -> crate::Result<()>;

    /// Delete a key, returning whether it existed
    fn delete(&mut self, key: &[u8]) -> crate::Result<bool>;
}
