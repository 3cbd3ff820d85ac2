//! On-disk storage for rendered PDFs.
//!
//! Files live flat in one directory and are addressed by bare filename; any
//! directory components in a requested name are ignored.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

const PDF_EXTENSION: &str = "pdf";

#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)
    }

    /// Absolute location of `filename` inside the store.
    pub fn path_of(&self, filename: &str) -> PathBuf {
        let bare = Path::new(filename)
            .file_name()
            .map(Path::new)
            .unwrap_or_else(|| Path::new(""));
        self.dir.join(bare)
    }

    pub fn write(&self, filename: &str, bytes: &[u8]) -> io::Result<PathBuf> {
        let path = self.path_of(filename);
        fs::write(&path, bytes)?;
        Ok(path)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path_of(filename).is_file()
    }

    /// Deletes `filename`. Returns `Ok(false)` when there was nothing to delete.
    pub fn delete(&self, filename: &str) -> io::Result<bool> {
        match fs::remove_file(self.path_of(filename)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// PDF files in the store last modified at least `min_age` ago.
    pub fn pdfs_older_than(&self, min_age: Duration) -> io::Result<Vec<String>> {
        let now = SystemTime::now();
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(PDF_EXTENSION) {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            let age = now.duration_since(modified).unwrap_or_default();
            if age < min_age {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }
}
