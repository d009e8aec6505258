use super::Storage;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Files under a directory on the local filesystem
#[derive(Debug, Clone)]
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    /// The directory is created lazily, on the first write
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `~/.<app_name>`, or `None` when no home directory can be found
    pub fn app_private(app_name: &str) -> Option<Self> {
        home::home_dir().map(|home| Self::new(home.join(format!(".{}", app_name))))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl Storage for DiskStorage {
    type Reader = File;
    type Writer = File;

    fn open_read(&self, name: &str) -> io::Result<File> {
        File::open(self.path(name))
    }

    fn open_write(&self, name: &str) -> io::Result<File> {
        fs::create_dir_all(&self.root)?;
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.path(name))
    }
}
