use crate::internal_prelude::*;

bitflags::bitflags! {
    /// Flags for [`open()`].
    ///
    /// See open(2) for more details.
    pub struct OFlag: libc::c_int {
        /// Open the file for reading only.
        const O_RDONLY = libc::O_RDONLY;
        /// Open the file for writing only.
        const O_WRONLY = libc::O_WRONLY;
        /// Open the file for reading and writing.
        ///
        /// This is not guaranteed to be the same as `O_RDONLY | O_WRONLY`! Always use this flag if
        /// you need to open a file for both reading and writing.
        const O_RDWR = libc::O_RDWR;
        /// Set the close-on-exec flag on the new file descriptor.
        const O_CLOEXEC = libc::O_CLOEXEC;
        /// If the specified file is a terminal device, do not make it the process's controlling
        /// terminal.
        const O_NOCTTY = libc::O_NOCTTY;
        /// Open the file in nonblocking mode.
        const O_NONBLOCK = libc::O_NONBLOCK;
    }
}

/// Open the file at `path`.
///
/// Files are never created, so no mode is taken. Note that, as with open(2), opening a terminal
/// without `O_NOCTTY` may make it the controlling terminal of a session leader that does not have
/// one yet.
#[inline]
pub fn open(path: &CStr, flags: OFlag) -> Result<FileDesc> {
    unsafe { Error::unpack_fdesc(libc::open(path.as_ptr(), flags.bits())) }
}
