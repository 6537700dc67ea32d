//! Double-ended lists.
//!
//! A list is the contiguous run of element keys `l[<key>]\0<index>` with
//! occupied indices forming one interval `[left, right]`. The interval is
//! never stored: every operation rediscovers it inside its own transaction
//! from the first and last key under the list prefix, so the element set is
//! always self-describing and concurrent pushes cannot race a size header.
//!
//! Logical positions are offsets from `left`; callers never see raw indices.
//! While the list is non-empty an empty type marker `+<key>,l` exists so the
//! type registry can tell lists and strings apart.

use std::borrow::Cow;
use std::ops::ControlFlow;
use std::sync::Arc;

use redlite_core::keys::{
    decode_list_index, element_key, encode_list_prefix, encode_scalar_key, LIST_BIAS,
    MIN_LIST_INDEX,
};
use redlite_core::{Error, ReadView, Result, ValueKind, WriteView};
use redlite_storage::Store;
use tracing::{debug, warn};

use crate::registry::ensure_kind;
use crate::validate::validate_value;

/// Which end of a list an operation works on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum End {
    Left,
    Right,
}

/// Occupied index interval of a non-empty list
#[derive(Debug, Clone, Copy)]
struct Bounds {
    left: i64,
    right: i64,
}

impl Bounds {
    fn len(&self) -> i64 {
        // Both ends are validated non-negative with right >= left.
        self.right - self.left + 1
    }
}

/// Accessor for one list.
///
/// Holds no data: every call opens exactly one transaction on the shared
/// [`Store`]. Obtain it from [`Bucket::list`](crate::Bucket::list).
///
/// # Examples
///
/// ```rust
/// use redlite::Db;
///
/// let db = Db::in_memory()?;
/// let list = db.bucket("0")?.list("letters")?;
///
/// list.rpush(&["b", "c"])?;
/// list.lpush(&["a"])?;
/// assert_eq!(list.len()?, 3);
/// assert_eq!(list.index(0)?, Some(b"a".to_vec()));
/// assert_eq!(list.rpop()?, Some(b"c".to_vec()));
/// # Ok::<(), redlite::Error>(())
/// ```
pub struct List {
    store: Arc<Store>,
    key: Vec<u8>,
    prefix: Vec<u8>,
}

impl List {
    pub(crate) fn new(store: Arc<Store>, key: Vec<u8>) -> Self {
        let prefix = encode_list_prefix(&key);
        Self { store, key, prefix }
    }

    /// The logical key of this list
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Number of elements; 0 for a list that does not exist
    pub fn len(&self) -> Result<i64> {
        self.store.view(|view| {
            Ok(bounds(view, &self.prefix)?
                .map(|b| b.len())
                .unwrap_or(0))
        })
    }

    /// Whether the list holds no element
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Element at 0-based position `i`
    ///
    /// Positions outside the list (including negative ones) yield `None`.
    pub fn index(&self, i: i64) -> Result<Option<Vec<u8>>> {
        self.store.view(|view| {
            let Some(b) = bounds(view, &self.prefix)? else {
                return Ok(None);
            };
            match b.left.checked_add(i) {
                Some(index) if index >= b.left && index <= b.right => {
                    view.get(&element_key(&self.prefix, index))
                }
                _ => Ok(None),
            }
        })
    }

    /// Visit positions `start..=stop` in order
    ///
    /// `start` must be >= 0 and `stop` either -1 (to the end) or >= `start`.
    /// A `stop` past the end is clamped. `visit` receives the position and
    /// value of each element and may end the walk with
    /// [`ControlFlow::Break`].
    ///
    /// # Errors
    ///
    /// Returns Error::InvalidArgument for malformed bounds, before any I/O.
    pub fn range<F>(&self, start: i64, stop: i64, mut visit: F) -> Result<()>
    where
        F: FnMut(i64, &[u8]) -> ControlFlow<()>,
    {
        if start < 0 || (stop != -1 && start > stop) {
            return Err(Error::InvalidArgument(format!(
                "bad start/stop index {}..{}",
                start, stop
            )));
        }

        self.store.view(|view| {
            let Some(b) = bounds(view, &self.prefix)? else {
                return Ok(());
            };
            let first = match b.left.checked_add(start) {
                Some(first) if first <= b.right => first,
                _ => return Ok(()),
            };
            let last = if stop == -1 {
                b.right
            } else {
                b.left.checked_add(stop).map_or(b.right, |last| last.min(b.right))
            };

            let mut outcome = Ok(());
            view.scan(
                &element_key(&self.prefix, first),
                &element_key(&self.prefix, last),
                &mut |physical, value| match decode_list_index(physical, &self.prefix) {
                    Some(index) => visit(index - b.left, value),
                    None => {
                        outcome = Err(self.corrupt("undecodable element key"));
                        ControlFlow::Break(())
                    }
                },
            )?;
            outcome
        })
    }

    /// Every element, left to right
    pub fn to_vec(&self) -> Result<Vec<Vec<u8>>> {
        let mut out = Vec::new();
        self.range(0, -1, |_, value| {
            out.push(value.to_vec());
            ControlFlow::Continue(())
        })?;
        Ok(out)
    }

    /// Append `values` at the right end, returning the new length
    ///
    /// All values land in one transaction. Pushing nothing writes nothing.
    pub fn rpush<V: AsRef<[u8]>>(&self, values: &[V]) -> Result<i64> {
        self.push(End::Right, values)
    }

    /// Prepend `values` at the left end, returning the new length
    ///
    /// Values are inserted one after the other, so the last one ends up
    /// leftmost: `lpush(&["b", "a"])` on `[c]` gives `[a, b, c]`.
    pub fn lpush<V: AsRef<[u8]>>(&self, values: &[V]) -> Result<i64> {
        self.push(End::Left, values)
    }

    /// Remove and return the leftmost element
    pub fn lpop(&self) -> Result<Option<Vec<u8>>> {
        self.pop(End::Left)
    }

    /// Remove and return the rightmost element
    pub fn rpop(&self) -> Result<Option<Vec<u8>>> {
        self.pop(End::Right)
    }

    /// Remove up to `count` elements from the left end
    ///
    /// Returns the number removed. A `count` of at least the length clears
    /// the list.
    ///
    /// # Errors
    ///
    /// Returns Error::InvalidArgument when `count < 1`.
    pub fn lbatch_delete(&self, count: i64) -> Result<i64> {
        self.batch_delete(End::Left, count)
    }

    /// Remove up to `count` elements from the right end
    ///
    /// # Errors
    ///
    /// Returns Error::InvalidArgument when `count < 1`.
    pub fn rbatch_delete(&self, count: i64) -> Result<i64> {
        self.batch_delete(End::Right, count)
    }

    fn push<V: AsRef<[u8]>>(&self, end: End, values: &[V]) -> Result<i64> {
        for value in values {
            validate_value(value.as_ref())?;
        }
        if values.is_empty() {
            return self.len();
        }

        let len = self.store.update(|txn| {
            ensure_kind(&*txn, &self.key, ValueKind::List)?;

            // `cursor` is the index next to which the first value goes.
            let (existing, mut cursor) = match (bounds(&*txn, &self.prefix)?, end) {
                (Some(b), End::Right) => (b.len(), b.right),
                (Some(b), End::Left) => (b.len(), b.left),
                (None, _) => {
                    txn.set(&encode_scalar_key(&self.key, ValueKind::List), &[])?;
                    debug!(key = %self.display_key(), "Created list");
                    let start = match end {
                        End::Right => LIST_BIAS - 1,
                        End::Left => LIST_BIAS + 1,
                    };
                    (0, start)
                }
            };

            for value in values {
                cursor = match end {
                    End::Right => cursor.checked_add(1),
                    End::Left => cursor.checked_sub(1).filter(|i| *i >= MIN_LIST_INDEX),
                }
                .ok_or(Error::IndexOverflow { index: cursor })?;
                txn.set(&element_key(&self.prefix, cursor), value.as_ref())?;
            }

            Ok(existing + values.len() as i64)
        })?;

        debug!(key = %self.display_key(), ?end, pushed = values.len(), len, "Pushed");
        Ok(len)
    }

    fn pop(&self, end: End) -> Result<Option<Vec<u8>>> {
        let popped = self.store.update(|txn| {
            ensure_kind(&*txn, &self.key, ValueKind::List)?;

            let Some(b) = bounds(&*txn, &self.prefix)? else {
                return Ok(None);
            };
            let index = match end {
                End::Left => b.left,
                End::Right => b.right,
            };
            let physical = element_key(&self.prefix, index);
            let Some(value) = txn.get(&physical)? else {
                return Err(self.corrupt("boundary element missing"));
            };
            txn.delete(&physical)?;
            if b.len() == 1 {
                self.remove_marker(txn)?;
            }
            Ok(Some(value))
        })?;

        if popped.is_some() {
            debug!(key = %self.display_key(), ?end, "Popped");
        }
        Ok(popped)
    }

    fn batch_delete(&self, end: End, count: i64) -> Result<i64> {
        if count < 1 {
            return Err(Error::InvalidArgument(format!(
                "bad delete count {}",
                count
            )));
        }

        let removed = self.store.update(|txn| {
            ensure_kind(&*txn, &self.key, ValueKind::List)?;
            match bounds(&*txn, &self.prefix)? {
                Some(b) => self.delete_from(txn, b, end, count),
                None => Ok(0),
            }
        })?;

        debug!(key = %self.display_key(), ?end, removed, "Batch deleted");
        Ok(removed)
    }

    /// Delete every element and the marker inside an open transaction
    pub(crate) fn clear_in<W: WriteView + ?Sized>(&self, txn: &mut W) -> Result<i64> {
        match bounds(&*txn, &self.prefix)? {
            Some(b) => self.delete_from(txn, b, End::Left, b.len()),
            None => Ok(0),
        }
    }

    fn delete_from<W: WriteView + ?Sized>(
        &self,
        txn: &mut W,
        b: Bounds,
        end: End,
        count: i64,
    ) -> Result<i64> {
        let size = b.len();
        let count = count.min(size);

        for i in 0..count {
            let index = match end {
                End::Left => b.left + i,
                End::Right => b.right - i,
            };
            if !txn.delete(&element_key(&self.prefix, index))? {
                return Err(self.corrupt("gap inside index interval"));
            }
        }
        if count == size {
            self.remove_marker(txn)?;
        }
        Ok(count)
    }

    fn remove_marker<W: WriteView + ?Sized>(&self, txn: &mut W) -> Result<()> {
        txn.delete(&encode_scalar_key(&self.key, ValueKind::List))?;
        debug!(key = %self.display_key(), "List emptied");
        Ok(())
    }

    fn corrupt(&self, reason: &str) -> Error {
        warn!(key = %self.display_key(), reason, "Corrupt list");
        Error::CorruptList(format!("{}: {}", self.display_key(), reason))
    }

    fn display_key(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.key)
    }
}

impl std::fmt::Debug for List {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("List")
            .field("key", &self.display_key())
            .finish()
    }
}

/// Discover the occupied interval of the list under `prefix`.
fn bounds<V: ReadView + ?Sized>(view: &V, prefix: &[u8]) -> Result<Option<Bounds>> {
    let Some((first, _)) = view.first_with_prefix(prefix)? else {
        return Ok(None);
    };
    let Some((last, _)) = view.last_with_prefix(prefix)? else {
        return Err(Error::CorruptList("last element vanished".to_string()));
    };

    let decode = |physical: &[u8]| {
        decode_list_index(physical, prefix)
            .filter(|index| *index >= MIN_LIST_INDEX)
            .ok_or_else(|| Error::CorruptList("undecodable element key".to_string()))
    };
    let left = decode(&first)?;
    let right = decode(&last)?;

    if right < left || right - left == i64::MAX {
        warn!(left, right, "Negative or unrepresentable list size");
        return Err(Error::CorruptList(format!(
            "bad list struct: left {} right {}",
            left, right
        )));
    }
    Ok(Some(Bounds { left, right }))
}
