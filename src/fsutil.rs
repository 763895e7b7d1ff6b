//! Filesystem utilities
//!
//! Standalone recursive-remove primitives operating on plain paths, with
//! no knowledge of clusters or sessions. Kept separate from the engine
//! so they can be tested on bare directory trees.

use std::fs;
use std::path::Path;

use crate::error::Result;

/// Recursively delete a file or directory tree, including `path` itself.
///
/// A missing `path` is not an error; deletion is idempotent. The first
/// failing removal aborts the walk and is returned, so a partially
/// deleted tree is always reported as failure.
pub fn remove_dir_recursive(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    if path.is_dir() {
        for entry in fs::read_dir(path)? {
            let entry = entry?;
            remove_dir_recursive(&entry.path())?;
        }
        fs::remove_dir(path)?;
    } else {
        fs::remove_file(path)?;
    }

    Ok(())
}

/// Recursively delete every entry inside `path`, keeping `path` itself.
///
/// Fails if `path` does not exist or is not a directory.
pub fn remove_dir_contents(path: &Path) -> Result<()> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        remove_dir_recursive(&entry.path())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_tree(root: &Path) {
        fs::create_dir_all(root.join("a/b")).unwrap();
        fs::write(root.join("top.txt"), b"top").unwrap();
        fs::write(root.join("a/mid.txt"), b"mid").unwrap();
        fs::write(root.join("a/b/leaf.txt"), b"leaf").unwrap();
    }

    #[test]
    fn remove_recursive_deletes_nested_tree() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("tree");
        build_tree(&root);

        remove_dir_recursive(&root).unwrap();

        assert!(!root.exists());
    }

    #[test]
    fn remove_recursive_deletes_single_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("single.txt");
        fs::write(&file, b"x").unwrap();

        remove_dir_recursive(&file).unwrap();

        assert!(!file.exists());
    }

    #[test]
    fn remove_recursive_missing_path_is_ok() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        remove_dir_recursive(&missing).unwrap();
    }

    #[test]
    fn remove_contents_keeps_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("tree");
        build_tree(&root);

        remove_dir_contents(&root).unwrap();

        assert!(root.exists());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn remove_contents_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        assert!(remove_dir_contents(&missing).is_err());
    }
}
