use super::{Storage, StorageFile};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::io::{self, Cursor, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Default)]
struct Files {
    contents: RwLock<HashMap<String, Vec<u8>>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

/// In-process storage. Clones share the same files.
///
/// Reads and writes can be switched to fail, which stands in for a missing
/// permission or a broken disk.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    files: Arc<Files>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.files.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.files.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Current bytes of a file
    pub fn raw(&self, name: &str) -> Option<Vec<u8>> {
        self.files.contents.read().get(name).cloned()
    }

    /// Replaces a file's bytes wholesale
    pub fn insert(&self, name: &str, bytes: Vec<u8>) {
        self.files.contents.write().insert(name.to_owned(), bytes);
    }

    pub fn remove(&self, name: &str) -> Option<Vec<u8>> {
        self.files.contents.write().remove(name)
    }
}

fn denied(op: &str, name: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("{} denied for {}", op, name),
    )
}

impl Storage for MemoryStorage {
    type Reader = Cursor<Vec<u8>>;
    type Writer = MemoryFile;

    fn open_read(&self, name: &str) -> io::Result<Self::Reader> {
        if self.files.fail_reads.load(Ordering::SeqCst) {
            return Err(denied("read", name));
        }
        self.raw(name)
            .map(Cursor::new)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_owned()))
    }

    fn open_write(&self, name: &str) -> io::Result<Self::Writer> {
        if self.files.fail_writes.load(Ordering::SeqCst) {
            return Err(denied("write", name));
        }
        self.files
            .contents
            .write()
            .insert(name.to_owned(), Vec::new());

        Ok(MemoryFile {
            files: Arc::clone(&self.files),
            name: name.to_owned(),
            pos: 0,
        })
    }
}

/// Write handle into a [`MemoryStorage`] file, positioned at the start
pub struct MemoryFile {
    files: Arc<Files>,
    name: String,
    pos: usize,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.files.fail_writes.load(Ordering::SeqCst) {
            return Err(denied("write", &self.name));
        }

        let mut contents = self.files.contents.write();
        let data = contents.entry(self.name.clone()).or_default();
        let end = self.pos + buf.len();
        if data.len() < end {
            data.resize(end, 0);
        }
        data[self.pos..end].copy_from_slice(buf);
        self.pos = end;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StorageFile for MemoryFile {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length too large"))?;
        self.files
            .contents
            .write()
            .entry(self.name.clone())
            .or_default()
            .resize(len, 0);
        Ok(())
    }
}
