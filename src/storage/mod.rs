//! Application-private storage the server list is written to.
//!
//! A [`Storage`] hands out scoped file handles by name under a root chosen at
//! construction. Handles are owned values, so they are closed when dropped on
//! every exit path.

pub mod disk;
pub mod memory;

pub use disk::DiskStorage;
pub use memory::MemoryStorage;

use std::fs::File;
use std::io::{self, Read, Write};

/// A writable handle whose final length can be pinned
pub trait StorageFile: Write {
    /// Truncates or extends the file to exactly `len` bytes
    fn set_len(&mut self, len: u64) -> io::Result<()>;
}

impl StorageFile for File {
    fn set_len(&mut self, len: u64) -> io::Result<()> {
        File::set_len(self, len)
    }
}

pub trait Storage {
    type Reader: Read;
    type Writer: StorageFile;

    /// Opens an existing file; fails with `NotFound` if it was never written
    fn open_read(&self, name: &str) -> io::Result<Self::Reader>;

    /// Opens a file for writing, creating it if needed and truncating it to
    /// zero length otherwise
    fn open_write(&self, name: &str) -> io::Result<Self::Writer>;
}

impl<S: Storage + ?Sized> Storage for &S {
    type Reader = S::Reader;
    type Writer = S::Writer;

    fn open_read(&self, name: &str) -> io::Result<Self::Reader> {
        (**self).open_read(name)
    }

    fn open_write(&self, name: &str) -> io::Result<Self::Writer> {
        (**self).open_write(name)
    }
}
