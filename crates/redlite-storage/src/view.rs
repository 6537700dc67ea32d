//! [`ReadView`] and [`WriteView`] over redb tables.

use redb::{ReadOnlyTable, ReadableTable, Table};
use redlite_core::keys::prefix_successor;
use redlite_core::{ReadView, Result, WriteView};
use std::ops::ControlFlow;

use crate::store_err;

type Bytes = &'static [u8];

/// Snapshot view handed to [`Store::view`](crate::Store::view) closures.
///
/// A store that never had a write transaction has no table yet; the view
/// then behaves as an empty keyspace.
pub struct SnapshotView {
    table: Option<ReadOnlyTable<Bytes, Bytes>>,
}

impl SnapshotView {
    pub(crate) fn new(table: Option<ReadOnlyTable<Bytes, Bytes>>) -> Self {
        Self { table }
    }
}

impl ReadView for SnapshotView {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        match &self.table {
            Some(table) => get_in(table, key),
            None => Ok(None),
        }
    }

    fn first_with_prefix(&self, prefix: &[u8]) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        match &self.table {
            Some(table) => edge_in(table, prefix, Edge::First),
            None => Ok(None),
        }
    }

    fn last_with_prefix(&self, prefix: &[u8]) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        match &self.table {
            Some(table) => edge_in(table, prefix, Edge::Last),
            None => Ok(None),
        }
    }

    fn scan(
        &self,
        start: &[u8],
        end: &[u8],
        visit: &mut dyn FnMut(&[u8], &[u8]) -> ControlFlow<()>,
    ) -> Result<()> {
        match &self.table {
            Some(table) => scan_in(table, start, end, visit),
            None => Ok(()),
        }
    }
}

/// Read-write view handed to [`Store::update`](crate::Store::update) closures.
pub struct TxnView<'txn> {
    table: Table<'txn, Bytes, Bytes>,
}

impl<'txn> TxnView<'txn> {
    pub(crate) fn new(table: Table<'txn, Bytes, Bytes>) -> Self {
        Self { table }
    }
}

impl ReadView for TxnView<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        get_in(&self.table, key)
    }

    fn first_with_prefix(&self, prefix: &[u8]) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        edge_in(&self.table, prefix, Edge::First)
    }

    fn last_with_prefix(&self, prefix: &[u8]) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
        edge_in(&self.table, prefix, Edge::Last)
    }

    fn scan(
        &self,
        start: &[u8],
        end: &[u8],
        visit: &mut dyn FnMut(&[u8], &[u8]) -> ControlFlow<()>,
    ) -> Result<()> {
        scan_in(&self.table, start, end, visit)
    }
}

impl WriteView for TxnView<'_> {
    fn set(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        self.table.insert(key, value).map_err(store_err)?;
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<bool> {
        Ok(self.table.remove(key).map_err(store_err)?.is_some())
    }
}

#[derive(Clone, Copy)]
enum Edge {
    First,
    Last,
}

fn get_in<T: ReadableTable<Bytes, Bytes>>(table: &T, key: &[u8]) -> Result<Option<Vec<u8>>> {
    Ok(table
        .get(key)
        .map_err(store_err)?
        .map(|guard| guard.value().to_vec()))
}

fn edge_in<T: ReadableTable<Bytes, Bytes>>(
    table: &T,
    prefix: &[u8],
    edge: Edge,
) -> Result<Option<(Vec<u8>, Vec<u8>)>> {
    let upper = prefix_successor(prefix);
    let mut range = match upper.as_deref() {
        Some(upper) => table.range::<&[u8]>(prefix..upper),
        None => table.range::<&[u8]>(prefix..),
    }
    .map_err(store_err)?;

    let entry = match edge {
        Edge::First => range.next(),
        Edge::Last => range.next_back(),
    };
    match entry {
        Some(entry) => {
            let (key, value) = entry.map_err(store_err)?;
            Ok(Some((key.value().to_vec(), value.value().to_vec())))
        }
        None => Ok(None),
    }
}

fn scan_in<T: ReadableTable<Bytes, Bytes>>(
    table: &T,
    start: &[u8],
    end: &[u8],
    visit: &mut dyn FnMut(&[u8], &[u8]) -> ControlFlow<()>,
) -> Result<()> {
    if start > end {
        return Ok(());
    }
    for entry in table.range::<&[u8]>(start..=end).map_err(store_err)? {
        let (key, value) = entry.map_err(store_err)?;
        if visit(key.value(), value.value()).is_break() {
            break;
        }
    }
    Ok(())
}
