//! Process-wide handle for the current table.
//!
//! Replaces the load-once global of the original artifact with an explicit
//! lifecycle: a table is installed by `new` or `replace`, readers take an
//! `Arc` snapshot and keep it for as long as their query runs, and a rebuild
//! swaps a fresh instance in without disturbing in-flight readers. The old
//! table is dropped once the last snapshot goes away.

use super::SymbolTable;
use crate::indexing::BuildResult;
use crate::listing::PackageListing;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

pub struct SharedTable {
    inner: RwLock<Arc<SymbolTable>>,
}

impl SharedTable {
    pub fn new(table: SymbolTable) -> Self {
        Self {
            inner: RwLock::new(Arc::new(table)),
        }
    }

    /// Snapshot of the current table. Queries run against the snapshot and
    /// need no further locking.
    pub fn current(&self) -> Arc<SymbolTable> {
        Arc::clone(&self.inner.read())
    }

    /// Install a freshly built table for future readers.
    pub fn replace(&self, table: SymbolTable) {
        let table = Arc::new(table);
        info!(
            packages = table.package_count(),
            symbols = table.symbol_count(),
            "symbol table replaced"
        );
        *self.inner.write() = table;
    }

    /// Build from an updated listing and swap the result in. The build runs
    /// outside the lock; on failure the current table stays installed.
    pub fn rebuild(&self, listing: &PackageListing) -> BuildResult<()> {
        let table = SymbolTable::build(listing)?;
        self.replace(table);
        Ok(())
    }
}

impl std::fmt::Debug for SharedTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let table = self.current();
        f.debug_struct("SharedTable")
            .field("packages", &table.package_count())
            .field("symbols", &table.symbol_count())
            .finish()
    }
}
