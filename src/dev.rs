use core::fmt;

/// A device ID, split into its major and minor numbers.
///
/// Two `DevId`s are equal if both their major and minor numbers are equal.
#[derive(Copy, Clone, Debug, Default, Eq, Hash, PartialEq, Ord, PartialOrd)]
pub struct DevId {
    major: u32,
    minor: u32,
}

impl DevId {
    /// The device ID of `/dev/tty` on Linux (`5,0`).
    pub const DEV_TTY: Self = Self::new(5, 0);

    /// The device ID `0,0`.
    ///
    /// A `tty_nr` of 0 in a process's status record decodes to this; it means the process has no
    /// controlling terminal.
    pub const NONE: Self = Self::new(0, 0);

    #[inline]
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }

    #[inline]
    pub const fn major(&self) -> u32 {
        self.major
    }

    #[inline]
    pub const fn minor(&self) -> u32 {
        self.minor
    }

    /// Split a raw `dev_t` (such as `st_rdev`) into its major and minor numbers.
    ///
    /// This uses the same 64-bit layout as glibc's and musl's `major()`/`minor()`.
    #[inline]
    pub const fn from_raw(dev: libc::dev_t) -> Self {
        let dev = dev as u64;

        Self {
            major: (((dev >> 8) & 0xfff) | ((dev >> 32) & !0xfff)) as u32,
            minor: ((dev & 0xff) | ((dev >> 12) & !0xff)) as u32,
        }
    }

    /// Join the major and minor numbers into a raw `dev_t` (the inverse of [`Self::from_raw()`]).
    #[inline]
    pub const fn into_raw(self) -> libc::dev_t {
        let major = self.major as u64;
        let minor = self.minor as u64;

        (((major & 0xfff) << 8)
            | ((major & !0xfff) << 32)
            | (minor & 0xff)
            | ((minor & !0xff) << 12)) as libc::dev_t
    }

    /// Unpack the `tty_nr` field of a process's status record.
    ///
    /// The major number is in bits 8-15. The minor number is the low 8 bits combined (by OR) with
    /// the 12 bits starting at bit 20. This is the layout the controlling terminal lookup in
    /// [`proc_ctty_dev()`](./fn.proc_ctty_dev.html) uses; it gives the kernel's answer for every
    /// minor number below 256.
    ///
    /// For minor numbers of 256 and up (`/dev/pts/256` onwards) the kernel's encoding differs; see
    /// [`Self::from_tty_nr_kernel()`].
    #[inline]
    pub const fn from_tty_nr(tty_nr: i32) -> Self {
        let tty_nr = tty_nr as u32;

        Self {
            major: (tty_nr >> 8) & 0xff,
            minor: ((tty_nr >> 20) & 0xfff) | (tty_nr & 0xff),
        }
    }

    /// Unpack a `tty_nr` value the way the kernel packs it (see `new_encode_dev()`).
    ///
    /// The low 8 bits of the minor number are in bits 0-7, and the remaining 12 bits are in bits
    /// 20-31. Unlike [`Self::from_tty_nr()`], the result always matches the `st_rdev` of the
    /// terminal.
    #[inline]
    pub const fn from_tty_nr_kernel(tty_nr: i32) -> Self {
        let tty_nr = tty_nr as u32;

        Self {
            major: (tty_nr >> 8) & 0xff,
            minor: ((tty_nr >> 12) & 0xfff00) | (tty_nr & 0xff),
        }
    }

    /// Returns whether this is [`DevId::NONE`].
    #[inline]
    pub const fn is_none(&self) -> bool {
        self.major == 0 && self.minor == 0
    }
}

impl From<DevId> for (u32, u32) {
    #[inline]
    fn from(d: DevId) -> Self {
        (d.major, d.minor)
    }
}

impl fmt::Display for DevId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{}", self.major, self.minor)
    }
}
