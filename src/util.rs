use core::fmt;

use crate::internal_prelude::*;

cfg_if::cfg_if! {
    if #[cfg(target_os = "android")] {
        pub use libc::__errno as errno_ptr;
    } else {
        pub use libc::__errno_location as errno_ptr;
    }
}

/// Find the first nul in `buf` and return everything up to and including it as a `CStr`.
#[inline]
pub fn cstr_from_buf(buf: &[u8]) -> Option<&CStr> {
    let index = buf.iter().position(|&ch| ch == 0)?;
    let buf = &buf[..index + 1];

    Some(unsafe { CStr::from_bytes_with_nul_unchecked(buf) })
}

/// Equivalent to `CStr::from_ptr(ptr).to_bytes()`, but (possibly) slightly faster.
#[inline]
pub unsafe fn bytes_from_ptr<'a>(ptr: *const libc::c_char) -> &'a [u8] {
    core::slice::from_raw_parts(ptr as *const u8, libc::strlen(ptr))
}

pub trait IntParseBytes: Default {
    fn _parse_bytes_push_digit(self, base: u8, digit: u8) -> Option<Self>;

    fn _parse_bytes_negate(self) -> Option<Self>;

    /// Parse a base-10 integer, like `str::parse()` but on raw bytes.
    ///
    /// If `allow_signs` is true, a single leading `+` or `-` is accepted.
    fn parse_bytes(
        mut bytes: &[u8],
        allow_signs: bool,
    ) -> core::result::Result<Self, IntParseBytesError> {
        let mut negated = false;

        match bytes.split_first() {
            None => return Err(IntParseBytesError::Empty),

            Some((&b'+', rest)) if allow_signs => bytes = rest,

            Some((&b'-', rest)) if allow_signs => {
                bytes = rest;
                negated = true;
            }

            _ => (),
        }

        if bytes.is_empty() {
            return Err(IntParseBytesError::Empty);
        }

        let mut res = Self::default();

        for &ch in bytes {
            if !ch.is_ascii_digit() {
                return Err(IntParseBytesError::InvalidDigit);
            }

            res = res
                ._parse_bytes_push_digit(10, ch - b'0')
                .ok_or(IntParseBytesError::Overflow)?;
        }

        if negated {
            res = res
                ._parse_bytes_negate()
                .ok_or(IntParseBytesError::Overflow)?;
        }

        Ok(res)
    }
}

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum IntParseBytesError {
    Empty,
    InvalidDigit,
    Overflow,
}

impl fmt::Display for IntParseBytesError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Empty => "cannot parse from empty data",
            Self::InvalidDigit => "invalid digit",
            Self::Overflow => "numerical overflow while parsing",
        })
    }
}

macro_rules! parse_bytes_int_impl {
    ($($ty:ty)*) => {
        $(
            impl IntParseBytes for $ty {
                #[inline]
                fn _parse_bytes_push_digit(self, base: u8, digit: u8) -> Option<Self> {
                    self.checked_mul(base as _)?.checked_add(digit as _)
                }

                #[inline]
                fn _parse_bytes_negate(self) -> Option<Self> {
                    self.checked_neg()
                }
            }
        )*
    };
}

parse_bytes_int_impl! { u32 i32 i64 }
