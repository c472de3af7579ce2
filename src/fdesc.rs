#[cfg(feature = "std")]
use std::io::prelude::*;
#[cfg(feature = "std")]
use std::os::unix::prelude::*;

use crate::internal_prelude::*;
use crate::{DevId, LookupError, RawFd, Stat};

/// A helper struct that wraps a file descriptor and provides useful methods.
///
/// The file descriptor is automatically closed when the `FileDesc` struct is dropped.
#[must_use = "either explicitly `drop()` this FileDesc to close the file descriptor or `.forget()` it to leave it open"]
#[derive(Debug)]
pub struct FileDesc(RawFd);

impl FileDesc {
    /// Create a new `FileDesc` wrapper around a raw file descriptor.
    ///
    /// # Safety
    ///
    /// The given file descriptor must be valid and not in use elsewhere.
    #[inline]
    pub const unsafe fn new(fd: RawFd) -> Self {
        Self(fd)
    }

    /// Access the inner file descriptor.
    ///
    /// The file descriptor is only valid as long as this object is in scope. It should NOT be
    /// closed or "consumed" by other interfaces.
    #[inline]
    pub fn fd(&self) -> RawFd {
        self.0
    }

    /// Take ownership of the inner file descriptor.
    ///
    /// After this method is called, the caller is responsible for closing the file descriptor.
    #[must_use = "use `.forget()` if you don't need the inner file descriptor"]
    #[inline]
    pub fn into_fd(self) -> RawFd {
        let fd = self.fd();
        core::mem::forget(self);
        fd
    }

    /// "Forget" about this file descriptor without closing it.
    ///
    /// WARNING: This may result in file descriptor leaks, especially since the file descriptor is
    /// not returned as with [`FileDesc::into_fd()`].
    #[inline]
    pub fn forget(self) {
        core::mem::forget(self);
    }

    /// Read data from the file descriptor into a buffer.
    ///
    /// This is the equivalent of `io::Read::read()` for use in `#![no_std]` crates.
    #[inline]
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        crate::read(self.0, buf)
    }

    /// Read until `buf` is full or end-of-file is reached, returning the number of bytes read.
    ///
    /// Partial reads and `EINTR` are retried. Unlike `io::Read::read_exact()`, reaching
    /// end-of-file early is not an error.
    pub fn read_full(&mut self, buf: &mut [u8]) -> Result<usize> {
        let mut nread = 0;

        while nread < buf.len() {
            match self.read(&mut buf[nread..]) {
                Ok(0) => break,
                Ok(n) => nread += n,

                Err(e) if e.code() == libc::EINTR => (),
                Err(e) => return Err(e),
            }
        }

        Ok(nread)
    }

    #[inline]
    pub fn stat(&self) -> Result<Stat> {
        crate::fstat(self.0)
    }

    /// Check whether this file descriptor refers to a terminal.
    #[inline]
    pub fn isatty(&self) -> Result<bool> {
        crate::isatty(self.0)
    }

    /// Check whether this file descriptor refers to the controlling terminal.
    ///
    /// See [`isctty()`](./fn.isctty.html).
    #[inline]
    pub fn isctty(&self) -> bool {
        crate::isctty(self.0)
    }

    /// Check whether this file descriptor refers to the controlling terminal, reporting failures.
    ///
    /// See [`isctty_strict()`](./fn.isctty_strict.html).
    #[inline]
    pub fn isctty_strict(&self) -> core::result::Result<bool, LookupError> {
        crate::isctty_strict(self.0)
    }

    /// Get the device ID of the device this file descriptor refers to.
    #[inline]
    pub fn rdev_id(&self) -> Result<DevId> {
        Ok(self.stat()?.rdev_id())
    }
}

impl Drop for FileDesc {
    #[inline]
    fn drop(&mut self) {
        unsafe {
            libc::close(self.0);
        }
    }
}

#[cfg(feature = "std")]
impl Read for FileDesc {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Ok(crate::read(self.0, buf)?)
    }
}

#[cfg(feature = "std")]
impl FromRawFd for FileDesc {
    #[inline]
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        Self::new(fd)
    }
}

#[cfg(feature = "std")]
impl AsRawFd for FileDesc {
    #[inline]
    fn as_raw_fd(&self) -> RawFd {
        self.fd()
    }
}

#[cfg(feature = "std")]
impl IntoRawFd for FileDesc {
    #[inline]
    fn into_raw_fd(self) -> RawFd {
        self.into_fd()
    }
}

#[cfg(feature = "std")]
impl From<std::fs::File> for FileDesc {
    #[inline]
    fn from(f: std::fs::File) -> Self {
        unsafe { Self::new(f.into_raw_fd()) }
    }
}
