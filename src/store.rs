//! Store Module
//!
//! The core storage engine mapping databases, clusters, and objects onto
//! directory and file operations.
//!
//! ## Responsibilities
//! - Initialize database directory trees (transactionally)
//! - Manage the connection session (one per instance)
//! - Cluster lifecycle: create, list, purge, remove
//! - Object lifecycle: store (OID assignment), get, remove

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::codec::Codec;
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::fsutil;
use crate::layout::Layout;

/// In-memory binding to one connected database
struct Session {
    /// Path computation rooted at the database directory
    layout: Layout,

    /// Metadata line 1: database name
    name: String,

    /// Metadata line 2: description
    description: String,

    /// Metadata line 3: creation timestamp (RFC 3339)
    created: String,
}

/// The storage engine
///
/// ## Concurrency Model: Single Writer
///
/// Every cluster- or object-mutating operation (`create_cluster`,
/// `purge_cluster`, `remove_cluster`, `purge_database`, `store_object`,
/// `remove_object`) serializes on `write_lock`, so the counter
/// read-modify-write in `store_object` is one critical section with the
/// object-file write. Reads (`get_object`, `clusters`, `cluster_exists`)
/// take no lock.
///
/// The lock protects one `Store` instance only. Multiple instances (or
/// processes) pointed at the same database path are uncoordinated
/// concurrent writers; callers must keep at most one connected instance
/// per path.
pub struct Store {
    /// Current connection, if any (`connect` overwrites it)
    session: Option<Session>,

    /// Serializes mutating operations
    write_lock: Mutex<()>,
}

impl Store {
    // =========================================================================
    // Database Lifecycle
    // =========================================================================

    /// Create a disconnected store
    pub fn new() -> Self {
        Self {
            session: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Create a store and connect it to an existing database (convenience)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.connect(path)?;
        Ok(store)
    }

    /// Initialize a new database at `path`
    ///
    /// Fails with [`StoreError::DatabaseExists`] if `path` already
    /// exists. The root structure (metadata file plus `clusters/`) is
    /// built in a sibling staging directory and renamed into place, so a
    /// failure partway through never leaves a half-built tree observable
    /// at `path`. Does not open a connection.
    pub fn initialize(path: impl AsRef<Path>, config: &Config) -> Result<()> {
        let path = path.as_ref();

        if path.exists() {
            return Err(StoreError::DatabaseExists(path.to_path_buf()));
        }

        // Build the full structure under a staging name, then publish
        // atomically via rename. The staging dir is a sibling so the
        // rename never crosses filesystems.
        let staging = Self::staging_path(path);
        fsutil::remove_dir_recursive(&staging)?;

        let built = Self::build_database_tree(&staging, config)
            .and_then(|_| fs::rename(&staging, path).map_err(StoreError::from));

        if built.is_err() {
            let _ = fsutil::remove_dir_recursive(&staging);
        }
        built?;

        tracing::info!(path = %path.display(), "database initialized");
        Ok(())
    }

    /// Connect this store to the database at `path`
    ///
    /// Reads the metadata file and populates the session. Any failure
    /// (missing file, short metadata, I/O error) clears the session and
    /// fails with [`StoreError::NotConnected`]; the low-level cause is
    /// logged, never returned. Reconnecting replaces the previous
    /// session.
    pub fn connect(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.session = None;

        match Self::read_metadata(path) {
            Ok(session) => {
                tracing::info!(path = %path.display(), name = %session.name, "connected");
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "connect failed");
                Err(StoreError::NotConnected)
            }
        }
    }

    // =========================================================================
    // Cluster Operations
    // =========================================================================

    /// Check whether a cluster exists
    ///
    /// A cluster exists if and only if its counter file exists; a bare
    /// directory without one is treated as non-existent. Returns false
    /// when no database is connected.
    pub fn cluster_exists(&self, cluster: &str) -> bool {
        match &self.session {
            Some(session) => session.layout.counter_path(cluster).exists(),
            None => false,
        }
    }

    /// Create a new cluster with its next-OID counter at 0
    ///
    /// Fails with [`StoreError::ClusterExists`] if the cluster already
    /// exists. If the counter write fails after the directory was made,
    /// the directory is rolled back so no counter-less cluster is left
    /// behind as "created".
    pub fn create_cluster(&self, cluster: &str) -> Result<()> {
        let _write_guard = self.write_lock.lock();
        let session = self.session()?;

        if session.layout.counter_path(cluster).exists() {
            return Err(StoreError::ClusterExists(cluster.to_string()));
        }

        // create_dir_all: an orphaned directory from an earlier failed
        // rollback does not block re-creation.
        let dir = session.layout.cluster_dir(cluster);
        fs::create_dir_all(&dir)?;

        if let Err(e) = fs::write(session.layout.counter_path(cluster), "0") {
            let _ = fs::remove_dir_all(&dir);
            return Err(e.into());
        }

        tracing::debug!(cluster, "cluster created");
        Ok(())
    }

    /// List the clusters in the connected database
    ///
    /// Returns an unordered set: directory enumeration order is
    /// filesystem-defined and not part of the contract. Fails with
    /// [`StoreError::NotConnected`] (not an empty set) when no database
    /// is connected.
    pub fn clusters(&self) -> Result<HashSet<String>> {
        let session = self.session()?;

        let mut names = HashSet::new();
        for entry in fs::read_dir(session.layout.clusters_root())? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    names.insert(name.to_string());
                }
            }
        }

        Ok(names)
    }

    /// Remove every object from a cluster and reset its counter to 0
    ///
    /// Fails with [`StoreError::ClusterNotFound`] if the cluster does
    /// not exist. Any deletion or counter-write failure is returned to
    /// the caller; the cluster may then hold partially-applied state
    /// (some objects deleted), which is not rolled back.
    pub fn purge_cluster(&self, cluster: &str) -> Result<()> {
        let _write_guard = self.write_lock.lock();
        let session = self.require_cluster(cluster)?;

        let dir = session.layout.cluster_dir(cluster);
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            fsutil::remove_dir_recursive(&entry.path())?;
        }

        // Everything (counter file included) is gone; recreate the
        // counter so the next store assigns OID 0.
        fs::write(session.layout.counter_path(cluster), "0")?;

        tracing::debug!(cluster, "cluster purged");
        Ok(())
    }

    /// Remove a cluster entirely, objects and directory included
    ///
    /// Fails with [`StoreError::ClusterNotFound`] if the cluster does
    /// not exist. After removal the name is free: a later
    /// `create_cluster` is a fresh create with the counter back at 0.
    pub fn remove_cluster(&self, cluster: &str) -> Result<()> {
        let _write_guard = self.write_lock.lock();
        let session = self.require_cluster(cluster)?;

        fsutil::remove_dir_recursive(&session.layout.cluster_dir(cluster))?;

        tracing::debug!(cluster, "cluster removed");
        Ok(())
    }

    /// Wipe everything under the clusters root, keeping the root itself
    ///
    /// A brute-force recursive delete of every entry; no per-cluster
    /// existence checks are performed. Fails only if the clusters root
    /// itself is missing (surfaced as [`StoreError::Io`]).
    pub fn purge_database(&self) -> Result<()> {
        let _write_guard = self.write_lock.lock();
        let session = self.session()?;

        fsutil::remove_dir_contents(&session.layout.clusters_root())?;

        tracing::debug!("database purged");
        Ok(())
    }

    // =========================================================================
    // Object Operations
    // =========================================================================

    /// Store a payload in a cluster, returning the assigned OID
    ///
    /// Steps (one critical section under the write lock):
    /// 1. Read the next OID from the counter file
    ///    ([`StoreError::ClusterCorrupt`] if missing or unparseable)
    /// 2. Write the payload to `<oid>.dat`; failure here leaves the
    ///    counter untouched
    /// 3. Persist the incremented counter
    pub fn store_object(&self, cluster: &str, payload: &[u8]) -> Result<u64> {
        let _write_guard = self.write_lock.lock();
        let session = self.require_cluster(cluster)?;

        let counter_path = session.layout.counter_path(cluster);
        let oid = Self::read_counter(cluster, &counter_path)?;

        fs::write(session.layout.object_path(cluster, oid), payload)?;
        fs::write(&counter_path, (oid + 1).to_string())?;

        tracing::debug!(cluster, oid, len = payload.len(), "object stored");
        Ok(oid)
    }

    /// Fetch a payload by OID
    ///
    /// Fails with [`StoreError::ClusterNotFound`] /
    /// [`StoreError::ObjectNotFound`] as appropriate. No side effects.
    pub fn get_object(&self, cluster: &str, oid: u64) -> Result<Vec<u8>> {
        let session = self.require_cluster(cluster)?;

        match fs::read(session.layout.object_path(cluster, oid)) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::ObjectNotFound {
                cluster: cluster.to_string(),
                oid,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Delete an object by OID
    ///
    /// The counter is not touched: the OID is permanently retired and a
    /// later store never reassigns it.
    pub fn remove_object(&self, cluster: &str, oid: u64) -> Result<()> {
        let _write_guard = self.write_lock.lock();
        let session = self.require_cluster(cluster)?;

        match fs::remove_file(session.layout.object_path(cluster, oid)) {
            Ok(()) => {
                tracing::debug!(cluster, oid, "object removed");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::ObjectNotFound {
                cluster: cluster.to_string(),
                oid,
            }),
            Err(e) => Err(e.into()),
        }
    }

    // =========================================================================
    // Typed Convenience Layer
    // =========================================================================

    /// Encode a value with the given codec and store it
    pub fn store_value<T, C: Codec<T>>(&self, cluster: &str, codec: &C, value: &T) -> Result<u64> {
        let bytes = codec.encode(value)?;
        self.store_object(cluster, &bytes)
    }

    /// Fetch an object and decode it with the given codec
    ///
    /// Fails with [`StoreError::Deserialization`] if the stored bytes
    /// cannot be decoded as `T`.
    pub fn get_value<T, C: Codec<T>>(&self, cluster: &str, codec: &C, oid: u64) -> Result<T> {
        let bytes = self.get_object(cluster, oid)?;
        codec.decode(&bytes)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Whether this store currently holds a connected session
    pub fn is_connected(&self) -> bool {
        self.session.is_some()
    }

    /// Root path of the connected database
    pub fn path(&self) -> Option<&Path> {
        self.session.as_ref().map(|s| s.layout.root())
    }

    /// Database name from the metadata file
    pub fn name(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.name.as_str())
    }

    /// Database description from the metadata file
    pub fn description(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.description.as_str())
    }

    /// Database creation timestamp from the metadata file
    pub fn created(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.created.as_str())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Current session, or `NotConnected`
    fn session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(StoreError::NotConnected)
    }

    /// Current session with the given cluster present, or
    /// `NotConnected` / `ClusterNotFound`
    fn require_cluster(&self, cluster: &str) -> Result<&Session> {
        let session = self.session()?;
        if !session.layout.counter_path(cluster).exists() {
            return Err(StoreError::ClusterNotFound(cluster.to_string()));
        }
        Ok(session)
    }

    /// Staging directory used while building a new database:
    /// `<path>.staging-<pid>`, always a sibling of `path`
    fn staging_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "db".into());
        name.push(format!(".staging-{}", std::process::id()));
        path.with_file_name(name)
    }

    /// Create the root directory, clusters subdirectory, and metadata file
    fn build_database_tree(root: &Path, config: &Config) -> Result<()> {
        let layout = Layout::new(root);

        fs::create_dir_all(root)?;
        fs::create_dir(layout.clusters_root())?;

        let created = chrono::Utc::now().to_rfc3339();
        // One field per line; embedded newlines would shift the lines below.
        let metadata = format!(
            "{}\n{}\n{}\n",
            sanitize_line(&config.name),
            sanitize_line(&config.description),
            created
        );
        fs::write(layout.metadata_path(), metadata)?;

        Ok(())
    }

    /// Read and parse the three metadata lines at `path`
    fn read_metadata(path: &Path) -> Result<Session> {
        let layout = Layout::new(path);
        let raw = fs::read_to_string(layout.metadata_path())?;

        let mut lines = raw.lines();
        let name = lines.next().ok_or(StoreError::NotConnected)?.to_string();
        let description = lines.next().ok_or(StoreError::NotConnected)?.to_string();
        let created = lines.next().ok_or(StoreError::NotConnected)?.to_string();

        Ok(Session {
            layout,
            name,
            description,
            created,
        })
    }

    /// Read the next OID from a counter file
    fn read_counter(cluster: &str, counter_path: &Path) -> Result<u64> {
        let raw = fs::read_to_string(counter_path).map_err(|e| StoreError::ClusterCorrupt {
            cluster: cluster.to_string(),
            reason: format!("counter file unreadable: {}", e),
        })?;

        raw.trim().parse::<u64>().map_err(|_| StoreError::ClusterCorrupt {
            cluster: cluster.to_string(),
            reason: format!("counter is not a non-negative integer: {:?}", raw.trim()),
        })
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

fn sanitize_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
