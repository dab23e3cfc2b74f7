//! # grocer-store: Persistence & Session Layer
//!
//! Wraps the pure `grocer-core` engine with what a running process needs:
//! a snapshot file that survives restarts, layered configuration, and a
//! shareable [`Session`] handle.
//!
//! ## Startup
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  StoreConfig::load_or_default(None)                                     │
//! │        │  grocer.toml + GROCER_* env                                    │
//! │        ▼                                                                │
//! │  Session::open(&config)                                                 │
//! │        │  snapshot missing   → cold start                               │
//! │        │  snapshot malformed → warn, start fresh                        │
//! │        ▼                                                                │
//! │  bridge calls session.cart_add(..), session.undo(), ..                  │
//! │        │  autosave after each successful mutation                       │
//! │        ▼                                                                │
//! │  cart_data.json (atomic replace)                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use grocer_store::{Session, StoreConfig};
//!
//! let config = StoreConfig::load_or_default(None);
//! let session = Session::open(&config);
//! session.cart_add("Milk (1 Liter)", None, 2, Some(0)).unwrap();
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod session;
pub mod snapshot_file;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{SnapshotSettings, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use session::Session;
pub use snapshot_file::SnapshotFile;

// The engine, so callers need only one dependency
pub use grocer_core;
