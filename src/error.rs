//! Error types for oidstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for oidstore operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Session Errors
    // -------------------------------------------------------------------------
    #[error("not connected to a database")]
    NotConnected,

    #[error("database already exists at {0}")]
    DatabaseExists(std::path::PathBuf),

    // -------------------------------------------------------------------------
    // Cluster Errors
    // -------------------------------------------------------------------------
    #[error("cluster already exists: {0}")]
    ClusterExists(String),

    #[error("cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("cluster corrupt: {cluster}: {reason}")]
    ClusterCorrupt { cluster: String, reason: String },

    // -------------------------------------------------------------------------
    // Object Errors
    // -------------------------------------------------------------------------
    #[error("object not found: {cluster}/{oid}")]
    ObjectNotFound { cluster: String, oid: u64 },

    // -------------------------------------------------------------------------
    // Codec Errors
    // -------------------------------------------------------------------------
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("deserialization error: {0}")]
    Deserialization(String),
}
