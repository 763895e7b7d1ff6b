//! # oidstore
//!
//! An embedded, file-backed object store:
//! - A database is a directory tree
//! - A cluster is a named collection of opaque objects
//! - Each object is addressed by a store-assigned integer OID
//!
//! ## On-Disk Layout
//!
//! ```text
//! <database-root>/
//! ├── db.meta                  (name / description / created, one per line)
//! └── clusters/
//!     └── <cluster-name>/
//!         ├── cluster.id       (next OID, decimal ASCII)
//!         ├── 0.dat            (object payloads, named by OID)
//!         ├── 1.dat
//!         └── ...
//! ```
//!
//! ## Guarantees
//!
//! - OIDs are unique and monotonically increasing per cluster; removing
//!   an object never causes its OID to be reassigned.
//! - A cluster exists if and only if its counter file exists.
//! - Partial failures (a deletion that stops halfway, a counter write
//!   that fails after the object file landed) are surfaced as errors,
//!   never reported as success.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod layout;
pub mod fsutil;
pub mod codec;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, StoreError};
pub use config::Config;
pub use codec::{BincodeCodec, Codec};
pub use store::Store;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of oidstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
