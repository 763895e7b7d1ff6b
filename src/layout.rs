//! On-disk layout
//!
//! Pure path computation for the database directory tree. No I/O happens
//! here; every function maps logical identities (database, cluster, OID)
//! to concrete paths.
//!
//! ```text
//! <database-root>/
//! ├── db.meta
//! └── clusters/
//!     └── <cluster-name>/
//!         ├── cluster.id
//!         └── <oid>.dat
//! ```

use std::path::{Path, PathBuf};

/// Metadata file at the database root (name / description / created)
pub const METADATA_FILE: &str = "db.meta";

/// Subdirectory of the database root holding all clusters
pub const CLUSTERS_DIR: &str = "clusters";

/// Per-cluster counter file holding the next OID as decimal ASCII
pub const COUNTER_FILE: &str = "cluster.id";

/// Extension of object payload files
pub const OBJECT_EXT: &str = "dat";

/// Path computation for one database root
#[derive(Debug, Clone)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Create a layout rooted at the given database directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The database root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `<root>/db.meta`
    pub fn metadata_path(&self) -> PathBuf {
        self.root.join(METADATA_FILE)
    }

    /// `<root>/clusters`
    pub fn clusters_root(&self) -> PathBuf {
        self.root.join(CLUSTERS_DIR)
    }

    /// `<root>/clusters/<cluster>`
    pub fn cluster_dir(&self, cluster: &str) -> PathBuf {
        self.clusters_root().join(cluster)
    }

    /// `<root>/clusters/<cluster>/cluster.id`
    pub fn counter_path(&self, cluster: &str) -> PathBuf {
        self.cluster_dir(cluster).join(COUNTER_FILE)
    }

    /// `<root>/clusters/<cluster>/<oid>.dat`
    pub fn object_path(&self, cluster: &str, oid: u64) -> PathBuf {
        self.cluster_dir(cluster)
            .join(format!("{}.{}", oid, OBJECT_EXT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_path_is_under_root() {
        let layout = Layout::new("/tmp/db");
        assert_eq!(layout.metadata_path(), PathBuf::from("/tmp/db/db.meta"));
    }

    #[test]
    fn cluster_paths() {
        let layout = Layout::new("/tmp/db");
        assert_eq!(
            layout.cluster_dir("people"),
            PathBuf::from("/tmp/db/clusters/people")
        );
        assert_eq!(
            layout.counter_path("people"),
            PathBuf::from("/tmp/db/clusters/people/cluster.id")
        );
    }

    #[test]
    fn object_path_uses_decimal_oid() {
        let layout = Layout::new("/tmp/db");
        assert_eq!(
            layout.object_path("people", 42),
            PathBuf::from("/tmp/db/clusters/people/42.dat")
        );
        assert_eq!(
            layout.object_path("people", 0),
            PathBuf::from("/tmp/db/clusters/people/0.dat")
        );
    }
}
