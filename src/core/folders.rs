//! Source folder collection
//!
//! Maintains the ordered set of folders queued for conversion plus the
//! per-folder loop flag. Append order is display order; duplicates and
//! non-directories are silently skipped on add.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loop flag assigned to a freshly added folder.
///
/// A folder's animation only loops forever once the user turns the flag on.
pub const DEFAULT_LOOP: bool = false;

/// A folder of PNG frames queued for conversion
#[derive(Debug, Clone)]
pub struct SourceFolder {
    /// Filesystem path of the folder
    pub path: PathBuf,
    /// Whether the resulting animation loops forever (vs. playing once)
    pub loop_enabled: bool,
}

impl SourceFolder {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            loop_enabled: DEFAULT_LOOP,
        }
    }

    /// Folder base name for display and for deriving output file names
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }
}

/// Ordered, de-duplicated collection of source folders
#[derive(Debug, Default)]
pub struct FolderCollection {
    folders: Vec<SourceFolder>,
}

impl FolderCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceFolder> {
        self.folders.iter()
    }

    pub fn get(&self, index: usize) -> Option<&SourceFolder> {
        self.folders.get(index)
    }

    pub fn contains_path(&self, path: &Path) -> bool {
        self.folders.iter().any(|f| f.path == *path)
    }

    /// Add folders, skipping paths that are not directories or are already
    /// present. Returns the number of folders actually added.
    pub fn add_folders(&mut self, paths: &[PathBuf]) -> usize {
        let mut added = 0;
        for path in paths {
            if path.is_dir() && !self.contains_path(path) {
                self.folders.push(SourceFolder::new(path.clone()));
                added += 1;
            }
        }
        added
    }

    /// Remove the folder at `index`; later entries shift down one position.
    pub fn remove(&mut self, index: usize) {
        if index < self.folders.len() {
            let folder = self.folders.remove(index);
            log::debug!("Removed folder: {}", folder.path.display());
        }
    }

    pub fn clear(&mut self) {
        self.folders.clear();
    }

    /// Ordered snapshot of the folder paths
    pub fn paths(&self) -> Vec<PathBuf> {
        self.folders.iter().map(|f| f.path.clone()).collect()
    }

    pub fn set_loop(&mut self, path: &Path, enabled: bool) {
        if let Some(folder) = self.folders.iter_mut().find(|f| f.path == *path) {
            folder.loop_enabled = enabled;
        }
    }

    pub fn toggle_loop(&mut self, index: usize) {
        if let Some(folder) = self.folders.get_mut(index) {
            folder.loop_enabled = !folder.loop_enabled;
        }
    }

    pub fn get_loop(&self, path: &Path) -> bool {
        self.folders
            .iter()
            .find(|f| f.path == *path)
            .map(|f| f.loop_enabled)
            .unwrap_or(DEFAULT_LOOP)
    }

    /// Snapshot of path -> loop flag for a conversion run.
    ///
    /// The orchestrator treats paths missing from the mapping as looping,
    /// so lookups fall back to true on the consuming side.
    pub fn loop_map(&self) -> HashMap<PathBuf, bool> {
        self.folders
            .iter()
            .map(|f| (f.path.clone(), f.loop_enabled))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_dirs(count: usize) -> Vec<TempDir> {
        (0..count).map(|_| TempDir::new().unwrap()).collect()
    }

    #[test]
    fn test_add_folders_skips_duplicates() {
        let dirs = temp_dirs(2);
        let mut collection = FolderCollection::new();

        let paths: Vec<PathBuf> = dirs.iter().map(|d| d.path().to_path_buf()).collect();
        assert_eq!(collection.add_folders(&paths), 2);
        // Re-adding the same paths is a no-op
        assert_eq!(collection.add_folders(&paths), 0);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_add_folders_skips_non_directories() {
        let dir = TempDir::new().unwrap();
        let file_path = dir.path().join("not_a_dir.png");
        std::fs::write(&file_path, b"x").unwrap();

        let mut collection = FolderCollection::new();
        let added = collection.add_folders(&[
            file_path,
            PathBuf::from("/nonexistent/folder/xyz"),
            dir.path().to_path_buf(),
        ]);

        assert_eq!(added, 1);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let dirs = temp_dirs(3);
        let mut collection = FolderCollection::new();
        let paths: Vec<PathBuf> = dirs.iter().map(|d| d.path().to_path_buf()).collect();
        collection.add_folders(&paths);

        collection.remove(1);

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.get(0).unwrap().path, paths[0]);
        assert_eq!(collection.get(1).unwrap().path, paths[2]);
    }

    #[test]
    fn test_remove_out_of_bounds_is_noop() {
        let dirs = temp_dirs(1);
        let mut collection = FolderCollection::new();
        collection.add_folders(&[dirs[0].path().to_path_buf()]);

        collection.remove(5);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_clear() {
        let dirs = temp_dirs(2);
        let mut collection = FolderCollection::new();
        collection.add_folders(&[dirs[0].path().to_path_buf(), dirs[1].path().to_path_buf()]);

        collection.clear();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_new_folder_loop_default() {
        let dirs = temp_dirs(1);
        let mut collection = FolderCollection::new();
        collection.add_folders(&[dirs[0].path().to_path_buf()]);

        assert_eq!(collection.get_loop(dirs[0].path()), DEFAULT_LOOP);
    }

    #[test]
    fn test_set_and_toggle_loop() {
        let dirs = temp_dirs(1);
        let path = dirs[0].path().to_path_buf();
        let mut collection = FolderCollection::new();
        collection.add_folders(&[path.clone()]);

        collection.set_loop(&path, true);
        assert!(collection.get_loop(&path));

        collection.toggle_loop(0);
        assert!(!collection.get_loop(&path));
    }

    #[test]
    fn test_loop_map_snapshot() {
        let dirs = temp_dirs(2);
        let mut collection = FolderCollection::new();
        let paths: Vec<PathBuf> = dirs.iter().map(|d| d.path().to_path_buf()).collect();
        collection.add_folders(&paths);
        collection.set_loop(&paths[1], true);

        let map = collection.loop_map();
        assert_eq!(map.get(&paths[0]), Some(&false));
        assert_eq!(map.get(&paths[1]), Some(&true));

        // Mutating after the snapshot does not affect it
        collection.set_loop(&paths[0], true);
        assert_eq!(map.get(&paths[0]), Some(&false));
    }
}
