//! Filesystem capability used by the generator.
//!
//! [`OsFileSystem`] writes to disk. [`MemoryFileSystem`] keeps the tree in
//! memory; it backs `svcgen plan` and the test suite. Both report failures as
//! [`std::io::Error`] and never panic.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf};

/// What [`FileSystem::stat`] reports about a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
    /// Size in bytes (0 for directories).
    pub len: u64,
}

/// Operations the generator needs from a filesystem.
pub trait FileSystem {
    /// Create `path` and any missing parents.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Write `contents` to `path`, replacing any existing file.
    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn stat(&self, path: &Path) -> io::Result<FileStat>;

    /// Remove `path` and everything below it.
    fn remove_all(&self, path: &Path) -> io::Result<()>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let meta = std::fs::metadata(path)?;
        Ok(FileStat {
            is_dir: meta.is_dir(),
            len: if meta.is_dir() { 0 } else { meta.len() },
        })
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        if std::fs::metadata(path)?.is_dir() {
            std::fs::remove_dir_all(path)
        } else {
            std::fs::remove_file(path)
        }
    }
}

/// In-memory filesystem.
///
/// Paths are normalized lexically (`.` dropped, `..` pops). Writing a file
/// whose parent directory was never created fails with `NotFound`, as it would
/// on disk.
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every file currently stored, sorted by path.
    pub fn files(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }

    /// Every directory currently stored, sorted by path.
    pub fn dirs(&self) -> Vec<PathBuf> {
        self.dirs.borrow().iter().cloned().collect()
    }

    /// Contents of `path` as UTF-8, if present and valid.
    pub fn contents(&self, path: &Path) -> Option<String> {
        self.files
            .borrow()
            .get(&normalize(path))
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || path == Path::new("/") || self.dirs.borrow().contains(path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        if self.files.borrow().contains_key(&path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is a file", path.display()),
            ));
        }
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() || ancestor == Path::new("/") {
                break;
            }
            dirs.insert(ancestor.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let path = normalize(path);
        let parent = path.parent().unwrap_or(Path::new(""));
        if !self.is_dir(parent) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("parent directory of {} does not exist", path.display()),
            ));
        }
        if self.dirs.borrow().contains(&path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a directory", path.display()),
            ));
        }
        self.files.borrow_mut().insert(path, contents.to_vec());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        let path = normalize(path);
        self.files.borrow().get(&path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
        })
    }

    fn stat(&self, path: &Path) -> io::Result<FileStat> {
        let path = normalize(path);
        if let Some(bytes) = self.files.borrow().get(&path) {
            return Ok(FileStat {
                is_dir: false,
                len: bytes.len() as u64,
            });
        }
        if self.is_dir(&path) {
            return Ok(FileStat { is_dir: true, len: 0 });
        }
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        ))
    }

    fn remove_all(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        self.stat(&path)?;
        self.files.borrow_mut().retain(|p, _| !p.starts_with(&path));
        self.dirs.borrow_mut().retain(|p| !p.starts_with(&path));
        Ok(())
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
