use crate::internal_prelude::*;

#[inline]
pub fn read(fd: RawFd, buf: &mut [u8]) -> Result<usize> {
    Error::unpack_size(unsafe { libc::read(fd, buf.as_mut_ptr() as *mut _, buf.len()) })
}

/// Check if the given file descriptor refers to a terminal.
///
/// This returns `Ok(true)` if it is a terminal and `Ok(false)` if it is not (`ENOTTY`); any other
/// failure (such as `EBADF`) is returned as an error.
///
/// Note that this says nothing about whether the terminal is the controlling terminal; see
/// [`isctty()`](./fn.isctty.html) for that.
#[inline]
pub fn isatty(fd: RawFd) -> Result<bool> {
    if unsafe { libc::isatty(fd) } == 1 {
        Ok(true)
    } else {
        match errno_get() {
            libc::ENOTTY => Ok(false),
            eno => Err(Error::from_code(eno)),
        }
    }
}

/// Check if the given file descriptor refers to a terminal (simple check).
///
/// This returns `true` if the given file descriptor is a terminal, and `false` if it is not OR if
/// an error occurred.
#[inline]
pub fn isatty_simple(fd: RawFd) -> bool {
    unsafe { libc::isatty(fd) == 1 }
}

/// Get the path to the specified terminal device.
#[inline]
pub fn ttyname_r(fd: RawFd, buf: &mut [u8]) -> Result<&CStr> {
    match unsafe { libc::ttyname_r(fd, buf.as_mut_ptr() as *mut _, buf.len()) } {
        0 => util::cstr_from_buf(buf).ok_or_else(|| Error::from_code(libc::ERANGE)),
        eno => Err(Error::from_code(eno)),
    }
}

/// Get the path to the specified terminal device, allocating a buffer large enough to hold it.
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
#[cfg(feature = "alloc")]
pub fn ttyname_alloc(fd: RawFd) -> Result<CString> {
    let maxlen = match unsafe { libc::sysconf(libc::_SC_TTY_NAME_MAX) } {
        n if n > 0 => n as usize,
        _ => 100,
    };

    let mut buf = Vec::new();
    buf.resize(maxlen, 0);

    let len = ttyname_r(fd, &mut buf)?.to_bytes().len();

    buf.truncate(len);
    Ok(unsafe { CString::from_vec_unchecked(buf) })
}

/// Get the current process's PID.
#[inline]
pub fn getpid() -> libc::pid_t {
    unsafe { libc::getpid() }
}

/// Get the given process's session ID.
///
/// 0 specifies the current process.
#[inline]
pub fn getsid(pid: libc::pid_t) -> Result<libc::pid_t> {
    Error::unpack(unsafe { libc::getsid(pid) })
}

/// Create a new session if this process is not a process group leader.
///
/// The new session ID of this process is returned. The new session has no controlling terminal.
#[inline]
pub fn setsid() -> Result<libc::pid_t> {
    Error::unpack(unsafe { libc::setsid() })
}

/// Fork the current process.
///
/// On success, this returns `Ok(Some(pid))` in the parent and `Ok(None)` in the child. On failure,
/// this returns an error in the parent.
///
/// # Safety
///
/// This function is highly unsafe. Basic operations such as allocating memory are not guaranteed
/// to work in the child. Use extreme caution, and carefully evaluate each function you plan to
/// call. (The controlling terminal checks in this crate do not allocate.)
#[inline]
pub unsafe fn fork() -> Result<Option<libc::pid_t>> {
    match libc::fork() {
        0 => Ok(None),
        -1 => Err(Error::last()),
        pid => Ok(Some(pid)),
    }
}

/// Exit the process immediately with the specified `status`, without performing any cleanup.
///
/// # Safety
///
/// Generally, this function is used following a `fork()`, since the environment inside the child
/// following a `fork()` is such that a normal `exit()` may hang.
#[inline]
pub unsafe fn _exit(status: libc::c_int) -> ! {
    libc::_exit(status);
}
