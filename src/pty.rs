use crate::internal_prelude::*;

/// Open a pseudoterminal.
///
/// On success, this returns a tuple of the `(master, slave)` file descriptors. Neither has its
/// close-on-exec flag set.
///
/// # Safety
///
/// This function may call non-thread-safe functions such as `ptsname()` internally. It should not
/// be called concurrently from multiple threads.
#[inline]
pub unsafe fn openpty() -> Result<(FileDesc, FileDesc)> {
    let mut master = -1;
    let mut slave = -1;

    Error::unpack_nz(libc::openpty(
        &mut master,
        &mut slave,
        core::ptr::null_mut(),
        core::ptr::null_mut(),
        core::ptr::null_mut(),
    ))?;

    Ok((FileDesc::new(master), FileDesc::new(slave)))
}

/// Prepare for a login on the given terminal device, which may be a real terminal or a slave
/// pseudoterminal.
///
/// This performs the following steps:
/// 1. Create a new session.
/// 2. Make the given `fd` the controlling terminal for this process.
/// 3. Make the given `fd` the standard input/output/error for this process.
/// 4. Close `fd`.
///
/// # Safety
///
/// 1. This function closes `fd`, so it must not be used elsewhere.
/// 2. Some of the other operations may not be thread-safe.
#[inline]
pub unsafe fn login_tty(fd: RawFd) -> Result<()> {
    Error::unpack_nz(libc::login_tty(fd))
}

/// Give up the controlling terminal that `fd` refers to (`ioctl(fd, TIOCNOTTY)`).
///
/// If this process is the session leader, the foreground process group of the terminal is sent
/// `SIGHUP` and `SIGCONT`, and every process in the session loses its controlling terminal.
#[inline]
pub fn tiocnotty(fd: RawFd) -> Result<()> {
    Error::unpack(unsafe { libc::ioctl(fd, libc::TIOCNOTTY as _) })?;
    Ok(())
}
