//! Artifact store capability.
//!
//! The synthesizer never touches the filesystem directly; it goes through
//! this trait. The existence check is the sole conflict-resolution
//! mechanism of the whole generator, so swapping the store implementation
//! lets tests simulate pre-existing files, and `--dry-run` reuse the same
//! policy code, without a real tree.

use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a symbolic link could not be created.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The store (or host platform) cannot create symbolic links.
    #[error("symbolic links are not supported by this store")]
    Unsupported,

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Filesystem-shaped capability the synthesizer writes through.
///
/// All paths are relative to the store's root.
pub trait ArtifactStore {
    /// Whether an artifact already exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and its ancestors; repeating is not an error.
    fn create_dir_all(&mut self, path: &Path) -> io::Result<()>;

    /// Write `content` at `path`, replacing any previous content.
    fn write(&mut self, path: &Path, content: &str) -> io::Result<()>;

    /// Whether this store can create symbolic links at all.
    fn supports_links(&self) -> bool;

    /// Create a symbolic link at `link` pointing to `original`.
    fn symlink(&mut self, original: &Path, link: &Path) -> Result<(), LinkError>;
}

/// Store backed by a real directory tree.
#[derive(Debug)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Open a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root this store resolves relative paths against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl ArtifactStore for DiskStore {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as present.
        std::fs::symlink_metadata(self.resolve(path)).is_ok()
    }

    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(self.resolve(path))
    }

    fn write(&mut self, path: &Path, content: &str) -> io::Result<()> {
        std::fs::write(self.resolve(path), content)
    }

    fn supports_links(&self) -> bool {
        cfg!(unix)
    }

    #[cfg(unix)]
    fn symlink(&mut self, original: &Path, link: &Path) -> Result<(), LinkError> {
        std::os::unix::fs::symlink(self.resolve(original), self.resolve(link))?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn symlink(&mut self, _original: &Path, _link: &Path) -> Result<(), LinkError> {
        Err(LinkError::Unsupported)
    }
}

/// In-memory store for policy tests.
#[derive(Debug, Default)]
pub struct MemStore {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    links: BTreeMap<PathBuf, PathBuf>,
    links_supported: bool,
}

impl MemStore {
    /// Empty store with symbolic links enabled.
    pub fn new() -> Self {
        Self {
            links_supported: true,
            ..Self::default()
        }
    }

    /// Empty store simulating a host without symbolic links.
    pub fn without_links() -> Self {
        Self::default()
    }

    /// Pre-seed a file, as if a user had created or edited it.
    pub fn seed(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }

    /// Content of a stored file, if any.
    pub fn content(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }

    /// All stored file paths, sorted.
    pub fn file_paths(&self) -> Vec<&Path> {
        self.files.keys().map(PathBuf::as_path).collect()
    }

    /// All stored files, for whole-tree comparisons.
    pub fn files(&self) -> &BTreeMap<PathBuf, String> {
        &self.files
    }

    /// Link target recorded for `link`, if any.
    pub fn link_target(&self, link: impl AsRef<Path>) -> Option<&Path> {
        self.links.get(link.as_ref()).map(PathBuf::as_path)
    }
}

impl ArtifactStore for MemStore {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.links.contains_key(path)
    }

    fn create_dir_all(&mut self, path: &Path) -> io::Result<()> {
        self.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn write(&mut self, path: &Path, content: &str) -> io::Result<()> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn supports_links(&self) -> bool {
        self.links_supported
    }

    fn symlink(&mut self, original: &Path, link: &Path) -> Result<(), LinkError> {
        if !self.links_supported {
            return Err(LinkError::Unsupported);
        }
        self.links
            .insert(link.to_path_buf(), original.to_path_buf());
        Ok(())
    }
}

/// Wrapper that checks existence against an underlying store but records
/// writes instead of performing them.
#[derive(Debug)]
pub struct DryRunStore<S> {
    inner: S,
    planned: BTreeSet<PathBuf>,
}

impl<S: ArtifactStore> DryRunStore<S> {
    /// Wrap an existing store.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            planned: BTreeSet::new(),
        }
    }

    /// Paths that a real run would have written, sorted.
    pub fn planned(&self) -> impl Iterator<Item = &Path> {
        self.planned.iter().map(PathBuf::as_path)
    }
}

impl<S: ArtifactStore> ArtifactStore for DryRunStore<S> {
    fn exists(&self, path: &Path) -> bool {
        // A path planned earlier in this run counts as existing, so the
        // dry run skips exactly where the real run would.
        self.inner.exists(path) || self.planned.contains(path)
    }

    fn create_dir_all(&mut self, _path: &Path) -> io::Result<()> {
        Ok(())
    }

    fn write(&mut self, path: &Path, _content: &str) -> io::Result<()> {
        self.planned.insert(path.to_path_buf());
        Ok(())
    }

    fn supports_links(&self) -> bool {
        self.inner.supports_links()
    }

    fn symlink(&mut self, _original: &Path, link: &Path) -> Result<(), LinkError> {
        if !self.inner.supports_links() {
            return Err(LinkError::Unsupported);
        }
        self.planned.insert(link.to_path_buf());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskStore::new(dir.path());

        assert!(!store.exists(Path::new("cmake/toolchain.cmake")));
        store.create_dir_all(Path::new("cmake")).unwrap();
        store
            .write(Path::new("cmake/toolchain.cmake"), "# shared\n")
            .unwrap();
        assert!(store.exists(Path::new("cmake/toolchain.cmake")));

        let on_disk = std::fs::read_to_string(dir.path().join("cmake/toolchain.cmake")).unwrap();
        assert_eq!(on_disk, "# shared\n");
    }

    #[test]
    fn disk_store_repeated_dir_creation_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskStore::new(dir.path());
        store.create_dir_all(Path::new("chip/B92")).unwrap();
        store.create_dir_all(Path::new("chip/B92")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn disk_store_symlink() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = DiskStore::new(dir.path());
        store.create_dir_all(Path::new("chip/B92")).unwrap();
        store
            .write(Path::new("chip/B92/CMakeLists.txt"), "# chip\n")
            .unwrap();

        assert!(store.supports_links());
        store
            .symlink(
                Path::new("chip/B92/CMakeLists.txt"),
                Path::new("CMakeLists_B92.txt"),
            )
            .unwrap();
        assert!(store.exists(Path::new("CMakeLists_B92.txt")));
        let resolved = std::fs::read_to_string(dir.path().join("CMakeLists_B92.txt")).unwrap();
        assert_eq!(resolved, "# chip\n");
    }

    #[test]
    fn mem_store_seeding_simulates_existing_files() {
        let mut store = MemStore::new();
        store.seed("chip/B92/CMakeLists.txt", "hand edited");
        assert!(store.exists(Path::new("chip/B92/CMakeLists.txt")));
        assert_eq!(
            store.content("chip/B92/CMakeLists.txt"),
            Some("hand edited")
        );
    }

    #[test]
    fn mem_store_without_links_refuses() {
        let mut store = MemStore::without_links();
        assert!(!store.supports_links());
        let err = store
            .symlink(Path::new("a"), Path::new("b"))
            .unwrap_err();
        assert!(matches!(err, LinkError::Unsupported));
    }

    #[test]
    fn dry_run_records_without_writing() {
        let mut inner = MemStore::new();
        inner.seed("CMakeLists.txt", "existing root");
        let mut dry = DryRunStore::new(inner);

        dry.write(Path::new("chip/B92/CMakeLists.txt"), "# chip\n")
            .unwrap();
        assert!(dry.exists(Path::new("chip/B92/CMakeLists.txt")));
        assert!(dry.exists(Path::new("CMakeLists.txt")));

        let planned: Vec<_> = dry.planned().collect();
        assert_eq!(planned, vec![Path::new("chip/B92/CMakeLists.txt")]);
    }
}
