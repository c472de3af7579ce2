use crate::internal_prelude::*;
use crate::DevId;

#[derive(Copy, Clone, Debug)]
pub struct Stat(libc::stat);

impl Stat {
    /// Get the device ID of the device containing this file.
    #[inline]
    pub fn dev(&self) -> u64 {
        self.0.st_dev as u64
    }

    /// Get this file's inode number.
    #[inline]
    pub fn ino(&self) -> u64 {
        self.0.st_ino as u64
    }

    /// Get this file's mode.
    ///
    /// This embeds the file type and the access mode.
    #[inline]
    pub fn mode(&self) -> u32 {
        self.0.st_mode as u32
    }

    /// Get the file type bits of this file's mode (one of the `libc::S_IF*` constants).
    #[inline]
    pub fn file_type(&self) -> u32 {
        self.mode() & libc::S_IFMT as u32
    }

    /// Check whether this file is a character device (terminals always are).
    #[inline]
    pub fn is_char_device(&self) -> bool {
        self.file_type() == libc::S_IFCHR as u32
    }

    /// Get the device ID of this file (if it is a special file).
    #[inline]
    pub fn rdev(&self) -> u64 {
        self.0.st_rdev as u64
    }

    /// Get the device ID of this file (if it is a special file), split into major and minor
    /// numbers.
    #[inline]
    pub fn rdev_id(&self) -> DevId {
        DevId::from_raw(self.0.st_rdev)
    }
}

impl From<Stat> for libc::stat {
    #[inline]
    fn from(s: Stat) -> libc::stat {
        s.0
    }
}

#[inline]
pub fn stat(path: &CStr) -> Result<Stat> {
    let mut buf = MaybeUninit::uninit();
    Error::unpack_nz(unsafe { libc::stat(path.as_ptr(), buf.as_mut_ptr()) })?;
    Ok(Stat(unsafe { buf.assume_init() }))
}

#[inline]
pub fn fstat(fd: RawFd) -> Result<Stat> {
    let mut buf = MaybeUninit::uninit();
    Error::unpack_nz(unsafe { libc::fstat(fd, buf.as_mut_ptr()) })?;
    Ok(Stat(unsafe { buf.assume_init() }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fstat_stat() {
        let path = CStr::from_bytes_with_nul(b"/dev/null\0").unwrap();
        let fdesc = crate::open(path, OFlag::O_RDONLY | OFlag::O_CLOEXEC).unwrap();

        let st1 = fstat(fdesc.fd()).unwrap();
        let st2 = stat(path).unwrap();

        assert_eq!(st1.dev(), st2.dev());
        assert_eq!(st1.ino(), st2.ino());
        assert_eq!(st1.rdev(), st2.rdev());
        assert!(st1.is_char_device());
        assert_eq!(st1.rdev_id(), DevId::new(1, 3));
        assert_eq!(st1.rdev_id().into_raw() as u64, st1.rdev());
    }

    #[test]
    fn test_dev_tty_node() {
        // The /dev/tty node always carries 5,0, even if it can't be opened
        if let Ok(st) = stat(crate::c_paths::dev_tty()) {
            assert!(st.is_char_device());
            assert_eq!(st.rdev_id(), DevId::DEV_TTY);
        }
    }

    #[test]
    fn test_regular_file_pipe() {
        let st = stat(crate::c_paths::proc_self_stat()).unwrap();
        assert_eq!(st.file_type(), libc::S_IFREG as u32);
        assert!(!st.is_char_device());

        let mut fds = [-1; 2];
        assert_eq!(unsafe { libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) }, 0);
        let (r, w) = unsafe { (FileDesc::new(fds[0]), FileDesc::new(fds[1])) };

        let st = fstat(r.fd()).unwrap();
        assert_eq!(st.file_type(), libc::S_IFIFO as u32);
        assert_eq!(st.rdev_id(), DevId::NONE);
        drop(w);
    }

    #[test]
    fn test_fstat_error() {
        assert_eq!(fstat(-1).unwrap_err().code(), libc::EBADF);
        assert_eq!(
            stat(CStr::from_bytes_with_nul(b"/NOEXIST\0").unwrap())
                .unwrap_err()
                .code(),
            libc::ENOENT
        );
    }
}
