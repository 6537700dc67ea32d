//! # redlite Storage
//!
//! Binding between redlite and its transactional, ordered key-value engine.
//!
//! ## ⚠️ Internal Implementation Detail
//!
//! **This crate is an internal implementation detail of redlite.**
//!
//! Users should depend on the main `redlite` crate instead, which provides
//! the stable public API. This crate's API may change without notice
//! between minor versions.
//!
//! ---
//!
//! The engine is [redb](https://docs.rs/redb): copy-on-write B-trees with
//! snapshot-isolated readers and a single serialized writer. Every redlite
//! key lives in one table; each call to [`Store::view`] or
//! [`Store::update`] is exactly one redb transaction.
//!
//! ```text
//! Store::view   → begin_read  → SnapshotView (ReadView)          → drop
//! Store::update → begin_write → TxnView (ReadView + WriteView)   → commit | abort
//! ```

use redb::backends::InMemoryBackend;
use redb::{Database, Durability, TableDefinition, TableError};
use redlite_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tracing::{debug, info};

pub mod view;

pub use view::{SnapshotView, TxnView};

/// Table holding every physical key
const DATA_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("redlite");

/// File name of the database inside the store directory
pub const DATA_FILE: &str = "data.redb";

/// Default page cache size (64MB)
const DEFAULT_CACHE_SIZE: usize = 64 * 1024 * 1024;

/// Durability of committed write transactions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncMode {
    /// fsync before commit returns (strongest durability)
    Sync,
    /// Commits are persisted eventually; a crash may lose the latest ones
    Async,
    /// Never fsync (fastest, unsafe for power loss)
    None,
}

impl From<SyncMode> for Durability {
    fn from(mode: SyncMode) -> Self {
        match mode {
            SyncMode::Sync => Durability::Immediate,
            SyncMode::Async => Durability::Eventual,
            SyncMode::None => Durability::None,
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Open an existing store and refuse every write transaction
    pub read_only: bool,
    /// Page cache size in bytes
    pub cache_size: usize,
    /// Durability of commits
    pub sync_mode: SyncMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            read_only: false,
            cache_size: DEFAULT_CACHE_SIZE,
            sync_mode: SyncMode::Sync,
        }
    }
}

/// Converts any redb error into [`Error::Store`], keeping it as the source.
pub(crate) fn store_err<E: Into<redb::Error>>(err: E) -> Error {
    Error::Store(Box::new(err.into()))
}

/// Shared handle to the transactional store.
///
/// Safe to use from many threads at once. Readers never block each other
/// or the writer; write transactions are serialized by the engine.
pub struct Store {
    /// `None` once closed
    db: RwLock<Option<Database>>,
    /// Configuration
    config: StoreConfig,
    /// Store directory, `None` for in-memory stores
    dir: Option<PathBuf>,
}

impl Store {
    /// Open or create a store in the given directory
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, StoreConfig::default())
    }

    /// Open or create a store with custom configuration
    ///
    /// A read-only store must already exist.
    pub fn open_with_config(path: impl AsRef<Path>, config: StoreConfig) -> Result<Self> {
        let dir = path.as_ref().to_path_buf();
        let file = dir.join(DATA_FILE);

        let db = if config.read_only {
            Database::builder()
                .set_cache_size(config.cache_size)
                .open(&file)
                .map_err(store_err)?
        } else {
            std::fs::create_dir_all(&dir)?;
            let db = Database::builder()
                .set_cache_size(config.cache_size)
                .create(&file)
                .map_err(store_err)?;
            create_table(&db)?;
            db
        };

        info!(
            path = %dir.display(),
            read_only = config.read_only,
            "Opened redlite store"
        );

        Ok(Self {
            db: RwLock::new(Some(db)),
            config,
            dir: Some(dir),
        })
    }

    /// Create a store that lives only in memory
    pub fn in_memory() -> Result<Self> {
        let db = Database::builder()
            .create_with_backend(InMemoryBackend::new())
            .map_err(store_err)?;
        create_table(&db)?;
        debug!("Opened in-memory redlite store");

        Ok(Self {
            db: RwLock::new(Some(db)),
            config: StoreConfig::default(),
            dir: None,
        })
    }

    /// Run `f` against a consistent snapshot
    pub fn view<T>(&self, f: impl FnOnce(&SnapshotView) -> Result<T>) -> Result<T> {
        let guard = self.db.read().map_err(|_| Error::LockPoisoned)?;
        let db = guard.as_ref().ok_or(Error::Closed)?;

        let txn = db.begin_read().map_err(store_err)?;
        let view = match txn.open_table(DATA_TABLE) {
            Ok(table) => SnapshotView::new(Some(table)),
            Err(TableError::TableDoesNotExist(_)) => SnapshotView::new(None),
            Err(e) => return Err(store_err(e)),
        };
        f(&view)
    }

    /// Run `f` inside one read-write transaction
    ///
    /// Commits when `f` returns `Ok`, aborts when it returns `Err`; no
    /// partial write of a failed closure is ever visible.
    pub fn update<T>(&self, f: impl FnOnce(&mut TxnView<'_>) -> Result<T>) -> Result<T> {
        if self.config.read_only {
            return Err(Error::ReadOnly);
        }
        let guard = self.db.read().map_err(|_| Error::LockPoisoned)?;
        let db = guard.as_ref().ok_or(Error::Closed)?;

        let mut txn = db.begin_write().map_err(store_err)?;
        txn.set_durability(self.config.sync_mode.into());

        let outcome = {
            let table = txn.open_table(DATA_TABLE).map_err(store_err)?;
            let mut view = TxnView::new(table);
            f(&mut view)
        };

        match outcome {
            Ok(value) => {
                txn.commit().map_err(store_err)?;
                Ok(value)
            }
            Err(err) => {
                txn.abort().map_err(store_err)?;
                Err(err)
            }
        }
    }

    /// Close the store
    ///
    /// Waits for running transactions; later ones fail with
    /// [`Error::Closed`]. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let mut guard = self.db.write().map_err(|_| Error::LockPoisoned)?;
        if guard.take().is_some() {
            info!("Closed redlite store");
        }
        Ok(())
    }

    /// Whether [`close`](Self::close) has been called
    pub fn is_closed(&self) -> bool {
        self.db.read().map(|db| db.is_none()).unwrap_or(true)
    }

    /// Store configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Store directory, `None` for in-memory stores
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

fn create_table(db: &Database) -> Result<()> {
    let txn = db.begin_write().map_err(store_err)?;
    txn.open_table(DATA_TABLE).map_err(store_err)?;
    txn.commit().map_err(store_err)?;
    Ok(())
}
