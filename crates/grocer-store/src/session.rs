//! # Session
//!
//! Thread-safe handle the bridge holds for the lifetime of the process.
//!
//! ## Locking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Session (Clone = shared)                                              │
//! │    │                                                                    │
//! │    └── Arc<Mutex<GroceryStore>>                                         │
//! │          │                                                              │
//! │          │  one lock per call:                                          │
//! │          │    cart mutation + undo push + autosave                      │
//! │          ▼                                                              │
//! │        GroceryStore ──► SnapshotFile (atomic replace)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Persistence failures never fail an engine operation: autosave errors are
//! logged and the session keeps running in memory.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use grocer_core::{
    CartLine, CartView, CheckoutState, CoreResult, GroceryStore, Item, ItemId, Money, Receipt,
    RestoreSummary, Reversal, StoreSettings, UndoRecord,
};
use tracing::{info, warn};

use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::snapshot_file::SnapshotFile;

#[derive(Debug, Clone)]
pub struct Session {
    store: Arc<Mutex<GroceryStore>>,
    file: Option<SnapshotFile>,
    autosave: bool,
}

impl Session {
    /// Creates a session with fresh state. Nothing is read from disk.
    pub fn new(config: &StoreConfig) -> Self {
        Session {
            store: Arc::new(Mutex::new(GroceryStore::new(config.store.clone()))),
            file: config.snapshot_path().map(SnapshotFile::new),
            autosave: config.snapshot.autosave,
        }
    }

    /// A session with no snapshot file at all.
    pub fn in_memory(settings: StoreSettings) -> Self {
        Session {
            store: Arc::new(Mutex::new(GroceryStore::new(settings))),
            file: None,
            autosave: false,
        }
    }

    /// Creates a session and restores the configured snapshot.
    ///
    /// A missing file is a cold start. An unreadable or malformed file is
    /// logged and the session starts fresh.
    pub fn open(config: &StoreConfig) -> Self {
        let session = Self::new(config);
        match session.snapshot_load(None) {
            Ok(Some(summary)) => info!(?summary, "Session restored"),
            Ok(None) => info!("Cold start, no snapshot"),
            Err(StoreError::NoSnapshotPath) => info!("Running without a snapshot file"),
            Err(e) => warn!(error = %e, "Could not restore snapshot, starting fresh"),
        }
        session
    }

    pub fn snapshot_file(&self) -> Option<&SnapshotFile> {
        self.file.as_ref()
    }

    /// Executes a function with read access to the store.
    pub fn with_store<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&GroceryStore) -> R,
    {
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// Does not autosave; the named operations below do.
    pub fn with_store_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut GroceryStore) -> R,
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut store)
    }

    /// Runs a mutation and autosaves while still holding the lock.
    fn mutate<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut GroceryStore) -> (R, bool),
    {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        let (result, changed) = f(&mut store);
        if changed {
            self.autosave(&store);
        }
        result
    }

    fn autosave(&self, store: &GroceryStore) {
        if !self.autosave {
            return;
        }
        if let Some(file) = &self.file {
            if let Err(e) = file.save(&store.snapshot()) {
                warn!(error = %e, path = ?file.path(), "Autosave failed");
            }
        }
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub fn list_top_items(&self, n: usize) -> CoreResult<Vec<Item>> {
        self.with_store(|store| store.list_top_items(n))
    }

    pub fn list_frequent_items(&self) -> Vec<Item> {
        self.with_store(GroceryStore::list_frequent_items)
    }

    pub fn get_item(&self, id: ItemId) -> CoreResult<Item> {
        self.with_store(|store| store.get_item(id))
    }

    // =========================================================================
    // Cart & Undo
    // =========================================================================

    pub fn cart_add(
        &self,
        name: &str,
        price: Option<Money>,
        quantity: i64,
        product_id: Option<ItemId>,
    ) -> CoreResult<()> {
        self.mutate(|store| {
            let result = store.cart_add(name, price, quantity, product_id);
            let changed = result.is_ok();
            (result, changed)
        })
    }

    pub fn cart_remove(&self, position: usize) -> CoreResult<CartLine> {
        self.mutate(|store| {
            let result = store.cart_remove(position);
            let changed = result.is_ok();
            (result, changed)
        })
    }

    pub fn cart_list(&self) -> CartView {
        self.with_store(GroceryStore::cart_list)
    }

    pub fn cart_clear(&self) -> usize {
        self.mutate(|store| {
            let cleared = store.cart_clear();
            (cleared, cleared > 0)
        })
    }

    pub fn undo(&self) -> Option<Reversal> {
        self.mutate(|store| {
            let reversal = store.undo();
            let changed = reversal.is_some();
            (reversal, changed)
        })
    }

    pub fn undo_size(&self) -> usize {
        self.with_store(GroceryStore::undo_size)
    }

    pub fn undo_history(&self) -> Vec<UndoRecord> {
        self.with_store(GroceryStore::undo_history)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    pub fn checkout_start(&self) -> CoreResult<usize> {
        self.mutate(|store| {
            let result = store.checkout_start();
            let changed = result.is_ok();
            (result, changed)
        })
    }

    pub fn checkout_process(&self) -> Receipt {
        self.mutate(|store| {
            let receipt = store.checkout_process();
            let changed = !receipt.is_empty();
            (receipt, changed)
        })
    }

    pub fn checkout_state(&self) -> CheckoutState {
        self.with_store(GroceryStore::checkout_state)
    }

    pub fn queue_items(&self) -> Vec<CartLine> {
        self.with_store(GroceryStore::queue_items)
    }

    // =========================================================================
    // Reset
    // =========================================================================

    /// Clears cart, undo stack and queue; keeps purchase counts.
    pub fn reset_session(&self) {
        self.mutate(|store| {
            store.reset_session();
            ((), true)
        })
    }

    /// Reseeds the catalog, clears the session and deletes the snapshot file.
    pub fn factory_reset(&self) -> StoreResult<()> {
        let mut store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        store.factory_reset();
        if let Some(file) = &self.file {
            file.delete()?;
        }
        Ok(())
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Writes a snapshot to `path`, or to the configured file.
    ///
    /// Returns the path written.
    pub fn snapshot_save(&self, path: Option<&Path>) -> StoreResult<PathBuf> {
        let file = self.target(path)?;
        let store = self.store.lock().unwrap_or_else(PoisonError::into_inner);
        file.save(&store.snapshot())?;
        info!(path = ?file.path(), "Snapshot saved");
        Ok(file.path().to_path_buf())
    }

    /// Restores from `path`, or from the configured file.
    ///
    /// `Ok(None)` when the file does not exist; the session is untouched.
    /// Decode failures are returned and the session is untouched.
    pub fn snapshot_load(&self, path: Option<&Path>) -> StoreResult<Option<RestoreSummary>> {
        let file = self.target(path)?;
        let Some(snapshot) = file.load()? else {
            return Ok(None);
        };
        let summary = self.with_store_mut(|store| store.restore(&snapshot));
        Ok(Some(summary))
    }

    fn target(&self, path: Option<&Path>) -> StoreResult<SnapshotFile> {
        match path {
            Some(path) => Ok(SnapshotFile::new(path)),
            None => self.file.clone().ok_or(StoreError::NoSnapshotPath),
        }
    }
}
