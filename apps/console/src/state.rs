//! # Inventory State
//!
//! The shell's single [`Inventory`], shareable across threads.
//!
//! ## Thread Safety
//! The inventory is wrapped in `Arc<Mutex<T>>` because:
//! 1. Stock check-and-decrement must be one atomic step
//! 2. A ledger record (merge + re-sort) must be one atomic step
//! 3. The state may be cloned into other threads (tests, future front ends)
//!
//! ## Batch Sales
//! ```text
//! sell A:1, B:9, C:2
//!   lock ─► sell A ─► unlock
//!   lock ─► sell B ─► unlock   (fails: InsufficientStock, A stays sold)
//!   lock ─► sell C ─► unlock
//! ```
//! Each item is its own transaction; the batch as a whole is not atomic.

use std::sync::{Arc, Mutex, PoisonError};

use stockbook_core::{BatchSale, Inventory, SaleRequest};

/// Shared inventory state.
///
/// ## Why Not RwLock?
/// Most commands mutate, and every call is short.
#[derive(Debug, Clone, Default)]
pub struct InventoryState {
    inventory: Arc<Mutex<Inventory>>,
}

impl InventoryState {
    pub fn new() -> Self {
        InventoryState::default()
    }

    /// Executes a function with read access to the inventory.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let empty = state.with_inventory(|inv| inv.registry().is_empty());
    /// ```
    pub fn with_inventory<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Inventory) -> R,
    {
        // Core operations check before mutating, so a poisoned lock still
        // holds consistent data.
        let inventory = self
            .inventory
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&inventory)
    }

    /// Executes a function with write access to the inventory.
    pub fn with_inventory_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Inventory) -> R,
    {
        let mut inventory = self
            .inventory
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut inventory)
    }

    /// Sells each request under its own lock acquisition.
    pub fn sell_each(&self, requests: Vec<SaleRequest>) -> BatchSale {
        let outcomes = requests
            .into_iter()
            .map(|req| {
                let result = self.with_inventory_mut(|inv| inv.sell(&req.name, req.units));
                (req, result)
            })
            .collect();

        BatchSale { outcomes }
    }
}
