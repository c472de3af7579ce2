use core::fmt;

use crate::internal_prelude::*;
use crate::MalformedStat;

pub type Result<T> = core::result::Result<T, Error>;

/// Represents an OS error encountered when performing an operation.
#[derive(Clone, Eq, PartialEq)]
pub struct Error(i32);

impl Error {
    /// If `res` is -1, return the last OS error. Otherwise return `Ok(res)`.
    #[inline]
    pub(crate) fn unpack(res: i32) -> Result<i32> {
        if res == -1 {
            Err(Self::last())
        } else {
            Ok(res)
        }
    }

    /// If `res` is -1, return the last OS error. Otherwise return `Ok(res)`.
    #[inline]
    pub(crate) fn unpack_size(res: isize) -> Result<usize> {
        if res == -1 {
            Err(Self::last())
        } else {
            Ok(res as usize)
        }
    }

    /// If `res` is non-zero, return the last OS error. Otherwise return `Ok(())`.
    #[inline]
    pub(crate) fn unpack_nz(res: i32) -> Result<()> {
        if res != 0 {
            Err(Self::last())
        } else {
            Ok(())
        }
    }

    /// If `res` is -1, return the last OS error. Otherwise wrap it in a [`FileDesc`].
    ///
    /// # Safety
    ///
    /// `res` must be a freshly opened file descriptor that is not owned elsewhere.
    #[inline]
    pub(crate) unsafe fn unpack_fdesc(res: i32) -> Result<FileDesc> {
        Ok(FileDesc::new(Self::unpack(res)?))
    }

    /// Get the last OS error that occured (i.e. the current `errno` value).
    #[inline]
    pub fn last() -> Self {
        Self(errno_get())
    }

    /// Construct an `Error` from an `errno` code.
    #[inline]
    pub fn from_code(eno: i32) -> Self {
        Self(eno)
    }

    /// Get the `errno` code represented by this `Error` object.
    #[inline]
    pub fn code(&self) -> i32 {
        self.0
    }

    pub(crate) fn strerror(&self) -> &'static str {
        // Most libcs format unknown codes into a static buffer as "Unknown error %d", which
        // can't be handed out as 'static.
        static UNKNOWN_ERROR: &str = "Unknown error";

        use core::cmp::Ordering;
        match self.0.cmp(&0) {
            Ordering::Less => return UNKNOWN_ERROR,
            Ordering::Equal => return "Success",
            _ => (),
        }

        let ptr = unsafe { libc::strerror(self.0) };
        if ptr.is_null() {
            return UNKNOWN_ERROR;
        }

        let msg = match core::str::from_utf8(unsafe { util::bytes_from_ptr(ptr) }) {
            Ok(msg) => msg,
            Err(_) => return UNKNOWN_ERROR,
        };

        if msg.starts_with(UNKNOWN_ERROR) {
            return UNKNOWN_ERROR;
        }

        msg
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.strerror())?;
        write!(f, " (code {})", self.0)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Error")
            .field("code", &self.0)
            .field("message", &self.strerror())
            .finish()
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl From<Error> for std::io::Error {
    #[inline]
    fn from(e: Error) -> Self {
        Self::from_raw_os_error(e.0)
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "nix")))]
#[cfg(feature = "nix")]
impl From<Error> for nix::Error {
    #[inline]
    fn from(e: Error) -> Self {
        Self::Sys(nix::errno::Errno::from_i32(e.0))
    }
}

/// The reasons the controlling terminal could not be looked up.
///
/// Returned by the strict variants, [`try_proc_ctty_dev()`](./fn.try_proc_ctty_dev.html) and
/// [`isctty_strict()`](./fn.isctty_strict.html). The lenient variants hide these behind a default
/// value.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum LookupError {
    /// The status record (or the file descriptor being checked) could not be opened, read, or
    /// `fstat()`ed. Usually this means `/proc` is not mounted.
    Unavailable(Error),
    /// The status record was read, but it could not be parsed.
    Malformed(MalformedStat),
}

impl From<Error> for LookupError {
    #[inline]
    fn from(e: Error) -> Self {
        Self::Unavailable(e)
    }
}

impl From<MalformedStat> for LookupError {
    #[inline]
    fn from(e: MalformedStat) -> Self {
        Self::Malformed(e)
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Unavailable(e) => write!(f, "process status unavailable: {}", e),
            Self::Malformed(e) => write!(f, "malformed process status: {}", e),
        }
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl std::error::Error for LookupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unavailable(e) => Some(e),
            Self::Malformed(_) => None,
        }
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl From<LookupError> for std::io::Error {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::Unavailable(e) => e.into(),
            LookupError::Malformed(e) => Self::new(std::io::ErrorKind::InvalidData, e.to_string()),
        }
    }
}
