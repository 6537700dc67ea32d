//! Buckets: typed access to logical keys.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use redlite_core::keys::encode_scalar_key;
use redlite_core::{Error, ReadView, Result, ValueKind, WriteView};
use redlite_storage::Store;
use tracing::debug;

use crate::list::List;
use crate::registry::{ensure_kind, type_of};
use crate::validate::{validate_key, validate_value};

/// A named group of logical keys.
///
/// Strings are read and written directly on the bucket; lists go through a
/// [`List`] accessor. A key holds at most one kind of value at a time and
/// using it as another kind fails with [`Error::WrongType`].
///
/// Buckets do not partition the keyspace: two buckets of the same [`Db`]
/// see the same keys.
///
/// [`Db`]: crate::Db
///
/// # Examples
///
/// ```rust
/// use redlite::{Db, Error, ValueKind};
///
/// let db = Db::in_memory()?;
/// let bucket = db.bucket("0")?;
///
/// bucket.set("version", "1.0.0")?;
/// assert_eq!(bucket.get("version")?, Some(b"1.0.0".to_vec()));
/// assert_eq!(bucket.type_of("version")?, ValueKind::String);
///
/// // "version" is a string, it cannot be used as a list
/// assert!(matches!(bucket.list("version"), Err(Error::WrongType { .. })));
/// # Ok::<(), redlite::Error>(())
/// ```
pub struct Bucket {
    name: Vec<u8>,
    store: Arc<Store>,
    lists: Mutex<HashMap<Vec<u8>, Arc<List>>>,
}

impl Bucket {
    pub(crate) fn new(name: Vec<u8>, store: Arc<Store>) -> Self {
        Self {
            name,
            store,
            lists: Mutex::new(HashMap::new()),
        }
    }

    /// Name the bucket was created with
    pub fn name(&self) -> &[u8] {
        &self.name
    }

    /// Kind of value stored under `key`
    pub fn type_of(&self, key: impl AsRef<[u8]>) -> Result<ValueKind> {
        let key = key.as_ref();
        validate_key(key)?;
        self.store.view(|view| type_of(view, key))
    }

    /// Retrieve the string stored under `key`
    ///
    /// Returns `None` when the key is absent or holds another kind.
    pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Option<Vec<u8>>> {
        let key = key.as_ref();
        validate_key(key)?;
        self.store
            .view(|view| view.get(&encode_scalar_key(key, ValueKind::String)))
    }

    /// Store `value` as the string under `key`
    ///
    /// # Errors
    ///
    /// Returns Error::WrongType if `key` holds a list.
    pub fn set(&self, key: impl AsRef<[u8]>, value: impl AsRef<[u8]>) -> Result<()> {
        let (key, value) = (key.as_ref(), value.as_ref());
        validate_key(key)?;
        validate_value(value)?;

        self.store.update(|txn| {
            ensure_kind(&*txn, key, ValueKind::String)?;
            txn.set(&encode_scalar_key(key, ValueKind::String), value)
        })?;
        debug!(key = %String::from_utf8_lossy(key), len = value.len(), "Set string");
        Ok(())
    }

    /// Remove whatever value `key` holds
    ///
    /// A list loses every element in one transaction. Returns `true` if
    /// something was removed.
    pub fn delete(&self, key: impl AsRef<[u8]>) -> Result<bool> {
        let key = key.as_ref();
        validate_key(key)?;

        let kind = self.store.update(|txn| {
            let kind = type_of(&*txn, key)?;
            match kind {
                ValueKind::None => {}
                ValueKind::List => {
                    List::new(Arc::clone(&self.store), key.to_vec()).clear_in(txn)?;
                }
                ValueKind::String | ValueKind::Hash | ValueKind::SortedSet => {
                    txn.delete(&encode_scalar_key(key, kind))?;
                }
            }
            Ok(kind)
        })?;

        if kind != ValueKind::None {
            debug!(key = %String::from_utf8_lossy(key), %kind, "Deleted");
        }
        Ok(kind != ValueKind::None)
    }

    /// List accessor for `key`
    ///
    /// The accessor is cached per key; the kind check runs on every call.
    ///
    /// # Errors
    ///
    /// Returns Error::WrongType if `key` holds another kind.
    pub fn list(&self, key: impl AsRef<[u8]>) -> Result<Arc<List>> {
        let key = key.as_ref();
        validate_key(key)?;
        self.store
            .view(|view| ensure_kind(view, key, ValueKind::List))?;

        let mut lists = self.lists.lock().map_err(|_| Error::LockPoisoned)?;
        let list = lists
            .entry(key.to_vec())
            .or_insert_with(|| Arc::new(List::new(Arc::clone(&self.store), key.to_vec())));
        Ok(Arc::clone(list))
    }
}

impl std::fmt::Debug for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bucket")
            .field("name", &String::from_utf8_lossy(&self.name))
            .finish()
    }
}
