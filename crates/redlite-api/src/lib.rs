//! # redlite
//!
//! Redis-like strings and lists on top of a transactional, ordered,
//! byte-oriented key-value store.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redlite::Db;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Db::open("./my_database")?;
//!     let bucket = db.bucket("0")?;
//!
//!     // Strings
//!     bucket.set("user:1:name", "Alice")?;
//!     if let Some(name) = bucket.get("user:1:name")? {
//!         println!("Name: {}", String::from_utf8_lossy(&name));
//!     }
//!
//!     // Lists
//!     let queue = bucket.list("jobs")?;
//!     queue.rpush(&["resize", "upload"])?;
//!     while let Some(job) = queue.lpop()? {
//!         println!("Job: {}", String::from_utf8_lossy(&job));
//!     }
//!
//!     db.close()?;
//!     Ok(())
//! }
//! ```
//!
//! ## Data model
//!
//! All values share one flat keyspace. A logical key holds at most one
//! kind of value ([`ValueKind`]); the physical layout is documented in
//! [`keys`]. Every operation runs in exactly one transaction: reads see a
//! consistent snapshot, writes commit atomically or not at all. Sequences
//! of calls (`len` then `rpush`) are not atomic together.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub mod bucket;
pub mod list;
pub mod logging;
pub mod registry;
pub mod validate;

pub use bucket::Bucket;
pub use list::List;

// Re-export core types
pub use redlite_core::{keys, Error, ReadView, Result, ValueKind, WriteView};

// Storage components
pub use redlite_storage::{SnapshotView, Store, StoreConfig, SyncMode, TxnView};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The main database handle.
///
/// Owns the shared [`Store`] and a cache of [`Bucket`]s. Thread-safe and
/// cheap to clone; clones share the store and the cache.
///
/// # Examples
///
/// ```rust,no_run
/// use redlite::Db;
///
/// let db = Db::open("./my_data")?;
/// db.bucket("0")?.set("key", "value")?;
///
/// // Data persists across restarts
/// db.close()?;
/// let db = Db::open("./my_data")?;
/// assert_eq!(db.bucket("0")?.get("key")?, Some(b"value".to_vec()));
/// # Ok::<(), redlite::Error>(())
/// ```
#[derive(Clone)]
pub struct Db {
    inner: Arc<DbInner>,
}

struct DbInner {
    store: Arc<Store>,
    buckets: Mutex<HashMap<Vec<u8>, Arc<Bucket>>>,
}

impl Db {
    /// Opens a persistent database in the given directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_config(path, StoreConfig::default())
    }

    /// Opens a persistent database with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `path` - Directory where the database file is stored
    /// * `config` - Read-only mode, cache size and durability
    pub fn open_with_config<P: AsRef<Path>>(path: P, config: StoreConfig) -> Result<Self> {
        Ok(Self::with_store(Store::open_with_config(path, config)?))
    }

    /// Creates an in-memory database.
    ///
    /// Data is lost when the last handle is dropped. Useful for testing.
    ///
    /// ```rust
    /// use redlite::Db;
    ///
    /// let db = Db::in_memory()?;
    /// db.bucket("tmp")?.set("k", "v")?;
    /// # Ok::<(), redlite::Error>(())
    /// ```
    pub fn in_memory() -> Result<Self> {
        Ok(Self::with_store(Store::in_memory()?))
    }

    fn with_store(store: Store) -> Self {
        Db {
            inner: Arc::new(DbInner {
                store: Arc::new(store),
                buckets: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Returns the bucket called `name`, creating it on first use.
    ///
    /// Later calls with the same name return the same `Arc`.
    pub fn bucket(&self, name: impl AsRef<[u8]>) -> Result<Arc<Bucket>> {
        let name = name.as_ref();
        validate::validate_bucket_name(name)?;

        let mut buckets = self.inner.buckets.lock().map_err(|_| Error::LockPoisoned)?;
        let bucket = buckets.entry(name.to_vec()).or_insert_with(|| {
            tracing::debug!(bucket = %String::from_utf8_lossy(name), "Created bucket");
            Arc::new(Bucket::new(name.to_vec(), Arc::clone(&self.inner.store)))
        });
        Ok(Arc::clone(bucket))
    }

    /// Closes the underlying store.
    ///
    /// Every clone, bucket and list of this database fails with
    /// [`Error::Closed`] afterwards.
    pub fn close(&self) -> Result<()> {
        self.inner
            .buckets
            .lock()
            .map_err(|_| Error::LockPoisoned)?
            .clear();
        self.inner.store.close()
    }

    /// Returns whether the database has been closed.
    pub fn is_closed(&self) -> bool {
        self.inner.store.is_closed()
    }

    /// The shared transactional store.
    pub fn store(&self) -> &Arc<Store> {
        &self.inner.store
    }
}

impl std::fmt::Debug for Db {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Db")
            .field("dir", &self.inner.store.dir())
            .field("closed", &self.is_closed())
            .finish()
    }
}
