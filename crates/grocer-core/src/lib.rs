//! # grocer-core: In-Process Grocery Engine
//!
//! Catalog, frequency ranking, cart, undo history, checkout queue and the
//! snapshot codec. Everything here is pure: no files, no environment, no
//! globals. Persistence and configuration live in `grocer-store`.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Grocer Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   Presentation layer (any)                      │   │
//! │  │   list_frequent ──► cart_add ──► undo ──► checkout_process     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             grocer-store (Session, config, snapshot file)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ grocer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌──────────┐          │   │
//! │  │   │ catalog │  │  cart   │  │  undo   │  │ checkout │          │   │
//! │  │   │ ranking │  │         │  │         │  │ receipt  │          │   │
//! │  │   └─────────┘  └─────────┘  └─────────┘  └──────────┘          │   │
//! │  │         └──────────── store (GroceryStore) ──────┘             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • INTEGER MONEY                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `GroceryStore`, the single entry point
//! - [`catalog`] / [`ranking`] - known items and the top-N view
//! - [`cart`] / [`undo`] - the current selection and its history
//! - [`checkout`] - FIFO staging and receipts
//! - [`snapshot`] - JSON encode / decode of catalog + cart
//! - [`money`], [`types`], [`settings`], [`validation`], [`error`]
//!
//! ## Example Usage
//!
//! ```rust
//! use grocer_core::{GroceryStore, Money};
//!
//! let mut store = GroceryStore::default();
//! store.cart_add("Milk", Some(Money::from_major(80)), 2, Some(0)).unwrap();
//! store.cart_add("Bread", Some(Money::from_major(60)), 1, Some(1)).unwrap();
//!
//! let view = store.cart_list();
//! assert_eq!(view.lines[0].name, "Bread");
//! assert_eq!(view.total_price, Money::from_major(220));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod money;
pub mod ranking;
pub mod settings;
pub mod snapshot;
pub mod store;
pub mod types;
pub mod undo;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartView};
pub use catalog::Catalog;
pub use checkout::{CheckoutQueue, CheckoutState, Receipt, ReceiptLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use settings::{CatalogVariant, ReceiptPolicy, StoreSettings};
pub use snapshot::{RestoreSummary, Snapshot, SNAPSHOT_VERSION};
pub use store::GroceryStore;
pub use types::*;
pub use undo::{Reversal, UndoRecord, UndoStack};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity on one cart line.
///
/// Catches typos like 1000 for 10. Out-of-range values are rejected, not
/// clamped.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Maximum unit price, in minor units (1,000,000.00).
///
/// Keeps `MAX_CART_LINES × MAX_ITEM_QUANTITY` lines at this price far from
/// the `i64` range.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;

/// Maximum item name length, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

/// Default size of the frequency view.
pub const DEFAULT_TOP_N: usize = 10;
