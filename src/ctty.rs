use crate::internal_prelude::*;
use crate::{DevId, LookupError};

// Field 7 of a stat record is well inside the first few hundred bytes, even with a long command
// name.
const STAT_BUF_LEN: usize = 512;

type LookupResult<T> = core::result::Result<T, LookupError>;

/// Get the device ID of this process's controlling terminal, as recorded in `/proc/self/stat`.
///
/// This is *not* the device ID of `/dev/tty` (which is always `5,0`); it is the device ID of the
/// terminal that `/dev/tty` currently refers to. If this process has no controlling terminal, the
/// result is [`DevId::NONE`].
///
/// The status record is read again on every call: the controlling terminal can change (for
/// example after `setsid()`), so the result is never cached.
///
/// # Fallback
///
/// This function never fails. If `/proc/self/stat` cannot be opened or read (usually because
/// `/proc` is not mounted), or if it cannot be parsed, this returns [`DevId::DEV_TTY`]. That means
/// "unknown" cannot be distinguished from "no controlling terminal"; use [`try_proc_ctty_dev()`] if
/// the difference matters.
#[inline]
pub fn proc_ctty_dev() -> DevId {
    proc_ctty_dev_at(crate::c_paths::proc_self_stat())
}

/// Like [`proc_ctty_dev()`], but read the stat record at the given path.
///
/// This can be used to look up the controlling terminal of another process (through
/// `/proc/<pid>/stat`).
pub fn proc_ctty_dev_at(path: &CStr) -> DevId {
    match try_proc_ctty_dev_at(path) {
        Ok(Some(dev)) => dev,
        Ok(None) => DevId::NONE,
        Err(e) => {
            log::debug!(
                "cannot read controlling terminal from {:?} ({}); assuming {}",
                path,
                e,
                DevId::DEV_TTY
            );
            DevId::DEV_TTY
        }
    }
}

/// Get the device ID of this process's controlling terminal, reporting failures.
///
/// - `Ok(Some(dev))`: the controlling terminal is `dev`.
/// - `Ok(None)`: this process has no controlling terminal.
/// - `Err(LookupError::Unavailable(_))`: `/proc/self/stat` could not be opened or read.
/// - `Err(LookupError::Malformed(_))`: `/proc/self/stat` could not be parsed.
#[inline]
pub fn try_proc_ctty_dev() -> LookupResult<Option<DevId>> {
    try_proc_ctty_dev_at(crate::c_paths::proc_self_stat())
}

/// Like [`try_proc_ctty_dev()`], but read the stat record at the given path.
pub fn try_proc_ctty_dev_at(path: &CStr) -> LookupResult<Option<DevId>> {
    let tty_nr = read_tty_nr(path)?;

    let dev = DevId::from_tty_nr(tty_nr);
    log::trace!("tty_nr {} in {:?} is device {}", tty_nr, path, dev);

    Ok(if dev.is_none() { None } else { Some(dev) })
}

fn read_tty_nr(path: &CStr) -> LookupResult<i32> {
    // Dropping `file` closes it on every path out of here
    let mut file = crate::open(path, OFlag::O_RDONLY | OFlag::O_CLOEXEC | OFlag::O_NOCTTY)?;

    let mut buf = [0u8; STAT_BUF_LEN];
    let n = file.read_full(&mut buf)?;

    // A full buffer may mean the record was cut off; anything less means we hit EOF
    let complete = n < buf.len();

    crate::procstat::parse_stat_prefix_partial(&buf[..n], complete)
        .map(|st| st.tty_nr)
        .map_err(LookupError::from)
}

/// Check whether the given file descriptor refers to this process's controlling terminal.
///
/// This is the controlling-terminal counterpart of `isatty()`: `isatty()` returns `true` for any
/// terminal, while this returns `true` only for the terminal that `/dev/tty` refers to (or for
/// `/dev/tty` itself).
///
/// 1. If `fstat()` fails (for example, `fd` is not open), this returns `false`.
/// 2. If `fd` is not a character device, this returns `false`.
/// 3. If `fd` refers to `/dev/tty` (device `5,0`), this returns `true` without reading
///    `/proc/self/stat`.
/// 4. Otherwise, the device is compared with [`proc_ctty_dev()`] (including its fallback). A
///    process without a controlling terminal never matches.
///
/// # Descriptors for `/dev/tty` from other sessions
///
/// A file descriptor for `/dev/tty` is always reported as the controlling terminal, even if it was
/// opened by a process in another session and passed over a Unix socket. Which terminal such a
/// descriptor actually performs I/O on has not been verified; treat the result as unspecified in
/// that case.
#[inline]
pub fn isctty(fd: RawFd) -> bool {
    match crate::fstat(fd) {
        Ok(st) if st.is_char_device() => rdev_is_ctty(st.rdev_id(), proc_ctty_dev),
        Ok(_) => false,
        Err(e) => {
            log::debug!("fstat({}) failed: {}", fd, e);
            false
        }
    }
}

/// Like [`isctty()`], but report failures instead of hiding them.
///
/// - If `fstat()` fails, this returns `Err(LookupError::Unavailable(_))`.
/// - If the answer depends on `/proc/self/stat` and it cannot be read or parsed, the error from
///   [`try_proc_ctty_dev()`] is returned.
pub fn isctty_strict(fd: RawFd) -> LookupResult<bool> {
    let st = crate::fstat(fd)?;
    if !st.is_char_device() {
        return Ok(false);
    }

    let rdev = st.rdev_id();
    if rdev == DevId::DEV_TTY {
        return Ok(true);
    }

    Ok(try_proc_ctty_dev()? == Some(rdev))
}

/// Compare a character device's ID against the controlling terminal, calling `resolve` only if the
/// device is not `/dev/tty` itself.
#[inline]
fn rdev_is_ctty<F: FnOnce() -> DevId>(rdev: DevId, resolve: F) -> bool {
    if rdev == DevId::DEV_TTY {
        return true;
    }

    let ctty = resolve();
    !ctty.is_none() && rdev == ctty
}
