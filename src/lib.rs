//! Check whether a file descriptor refers to the calling process's *controlling terminal*.
//!
//! `isatty(3)` answers "is this file descriptor a terminal?", but POSIX has no way to ask "is this
//! file descriptor *the* controlling terminal?". On Linux the answer can be found by comparing the
//! device ID of the file descriptor against two things:
//!
//! 1. The device ID of `/dev/tty`, which is always `5,0`.
//! 2. The device ID encoded in the `tty_nr` field of `/proc/self/stat` (see proc(5)).
//!
//! ```no_run
//! if ctty::isctty(0) {
//!     println!("stdin is the controlling terminal");
//! } else if ctty::isatty_simple(0) {
//!     println!("stdin is some other terminal");
//! }
//! ```
//!
//! ## Fallbacks
//!
//! [`isctty()`] and [`proc_ctty_dev()`] never fail. If `/proc` is not mounted, or if the status
//! record cannot be parsed, [`proc_ctty_dev()`] returns `5,0` (the device ID of `/dev/tty`); an
//! invalid file descriptor makes [`isctty()`] return `false`. Use [`try_proc_ctty_dev()`] and
//! [`isctty_strict()`] to tell "no controlling terminal" apart from "unknown".
//!
//! ## File descriptor handling
//!
//! For all libc functions that return a file descriptor (such as `open()`), the equivalent function
//! in `ctty` returns a [`FileDesc`] struct. This struct wraps a file descriptor and automatically
//! closes it when dropped. If the `std` feature is enabled (the default), then it also implements
//! some of the `std::io` traits.
//!
//! ## Paths
//!
//! Paths are passed as `&CStr`, so no memory is allocated to add a terminating nul. The
//! [`c_paths`] module provides the paths used internally.
//!
//! ## Features
//!
//! - `std` (default): `std::io`/`std::error` integration for [`Error`], [`LookupError`] and
//!   [`FileDesc`]. Implies `alloc`.
//! - `alloc`: [`ttyname_alloc()`].
//! - `nix`: `From<Error> for nix::Error`, so the fallible functions here can be used with `?`
//!   inside code that already reports `nix` errors.
//!
//! ## Logging
//!
//! The lenient fallbacks are reported through the [`log`](https://crates.io/crates/log) facade at
//! the `debug` level. This crate never installs a logger.

#![deny(warnings)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(feature = "alloc", not(feature = "std")))]
extern crate alloc;

mod err;
mod util;

pub use err::{Error, LookupError, Result};

/// A raw file descriptor.
pub type RawFd = libc::c_int;

mod internal_prelude {
    pub use core::ffi::CStr;
    pub use core::mem::MaybeUninit;

    pub(crate) use super::util::IntParseBytes;
    pub(crate) use super::{util, Error, Result};

    pub use super::{FileDesc, RawFd};

    pub use super::errno::errno_get;
    pub use super::fcntl::OFlag;

    #[cfg(feature = "std")]
    pub use std::ffi::CString;

    #[cfg(all(feature = "alloc", not(feature = "std")))]
    pub use alloc::{ffi::CString, vec::Vec};
}

mod fdesc;

pub use fdesc::*;

mod ctty;
mod dev;
mod errno;
mod fcntl;
mod procstat;
mod pty;
mod stat;
mod unistd;

pub use self::ctty::*;
pub use dev::*;
pub use errno::*;
pub use fcntl::*;
pub use procstat::*;
pub use pty::*;
pub use stat::*;
pub use unistd::*;

/// A collection of functions that return `&'static CStr`s for the paths used by this crate.
pub mod c_paths {
    use core::ffi::CStr;

    /// Return an `&'static CStr` containing `/proc/self/stat`.
    #[inline]
    pub fn proc_self_stat() -> &'static CStr {
        unsafe { CStr::from_bytes_with_nul_unchecked(b"/proc/self/stat\0") }
    }

    /// Return an `&'static CStr` containing `/dev/tty`.
    #[inline]
    pub fn dev_tty() -> &'static CStr {
        unsafe { CStr::from_bytes_with_nul_unchecked(b"/dev/tty\0") }
    }
}
