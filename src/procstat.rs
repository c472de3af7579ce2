use core::convert::TryFrom;
use core::fmt;

use crate::internal_prelude::*;

/// The ways a `/proc/<pid>/stat` record can fail to parse.
///
/// Fields are numbered from 1, as in proc(5).
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum MalformedStat {
    /// The record ended before the given field.
    MissingField(u8),
    /// The given field is not in the expected format.
    BadField(u8),
    /// The record was cut off (it did not fit into the read buffer) before field 7 ended.
    Truncated,
}

impl fmt::Display for MalformedStat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::MissingField(n) => write!(f, "missing field {}", n),
            Self::BadField(n) => write!(f, "bad value in field {}", n),
            Self::Truncated => f.write_str("record truncated"),
        }
    }
}

#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
impl std::error::Error for MalformedStat {}

/// The first seven fields of a `/proc/<pid>/stat` record.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct StatPrefix<'a> {
    /// Field 1: the process ID.
    pub pid: libc::pid_t,
    /// Field 2: the command name, without the surrounding parentheses.
    pub comm: &'a [u8],
    /// Field 3: the process state (`R`, `S`, `Z`, ...).
    pub state: u8,
    /// Field 4: the parent's PID.
    pub ppid: libc::pid_t,
    /// Field 5: the process group ID.
    pub pgrp: libc::pid_t,
    /// Field 6: the session ID.
    pub session: libc::pid_t,
    /// Field 7: the packed device number of the controlling terminal (0 if there is none).
    pub tty_nr: i32,
}

/// Parse the first seven fields of a complete `/proc/<pid>/stat` record.
///
/// The command name (field 2) may contain whitespace and parentheses; if it starts with `(`, it
/// extends up to the *last* `)` in the record.
#[inline]
pub fn parse_stat_prefix(
    record: &[u8],
) -> core::result::Result<StatPrefix<'_>, MalformedStat> {
    parse_stat_prefix_partial(record, true)
}

/// Extract the `tty_nr` field (field 7) from a complete `/proc/<pid>/stat` record.
///
/// ```
/// let tty_nr = ctty::parse_tty_nr(b"4242 (bash) S 4241 4242 4242 34817 4242 4194304").unwrap();
/// assert_eq!(tty_nr, 34817);
/// assert_eq!(ctty::DevId::from_tty_nr(tty_nr), ctty::DevId::new(136, 1));
/// ```
#[inline]
pub fn parse_tty_nr(record: &[u8]) -> core::result::Result<i32, MalformedStat> {
    Ok(parse_stat_prefix(record)?.tty_nr)
}

/// Like [`parse_stat_prefix()`], but if `complete` is false `record` is only the beginning of the
/// record, and running out of data is reported as [`MalformedStat::Truncated`].
pub(crate) fn parse_stat_prefix_partial(
    record: &[u8],
    complete: bool,
) -> core::result::Result<StatPrefix<'_>, MalformedStat> {
    parse_fields(record, complete).map_err(|e| match e {
        MalformedStat::MissingField(_) if !complete => MalformedStat::Truncated,
        e => e,
    })
}

fn parse_fields(
    record: &[u8],
    complete: bool,
) -> core::result::Result<StatPrefix<'_>, MalformedStat> {
    let (pid, rest) = next_field(record).ok_or(MalformedStat::MissingField(1))?;
    let pid = parse_int(pid, 1)?;

    let rest = skip_whitespace(rest);
    let (comm, rest) = match rest.split_first() {
        None => return Err(MalformedStat::MissingField(2)),

        Some((&b'(', inner)) => match inner.iter().rposition(|&ch| ch == b')') {
            Some(close) => (&inner[..close], &inner[close + 1..]),
            None if complete => return Err(MalformedStat::BadField(2)),
            None => return Err(MalformedStat::Truncated),
        },

        Some(_) => next_field(rest).ok_or(MalformedStat::MissingField(2))?,
    };

    let (state, rest) = next_field(rest).ok_or(MalformedStat::MissingField(3))?;
    let state = match state {
        [ch] => *ch,
        _ => return Err(MalformedStat::BadField(3)),
    };

    let (ppid, rest) = next_field(rest).ok_or(MalformedStat::MissingField(4))?;
    let (pgrp, rest) = next_field(rest).ok_or(MalformedStat::MissingField(5))?;
    let (session, rest) = next_field(rest).ok_or(MalformedStat::MissingField(6))?;
    let (tty_nr, rest) = next_field(rest).ok_or(MalformedStat::MissingField(7))?;

    // The last digits of a cut-off record may belong to a longer number
    if rest.is_empty() && !complete {
        return Err(MalformedStat::Truncated);
    }

    Ok(StatPrefix {
        pid,
        comm,
        state,
        ppid: parse_int(ppid, 4)?,
        pgrp: parse_int(pgrp, 5)?,
        session: parse_int(session, 6)?,
        tty_nr: parse_int(tty_nr, 7)?,
    })
}

fn parse_int<T: TryFrom<i64>>(field: &[u8], n: u8) -> core::result::Result<T, MalformedStat> {
    i64::parse_bytes(field, true)
        .ok()
        .and_then(|val| T::try_from(val).ok())
        .ok_or(MalformedStat::BadField(n))
}

#[inline]
fn skip_whitespace(buf: &[u8]) -> &[u8] {
    let start = buf
        .iter()
        .position(|ch| !ch.is_ascii_whitespace())
        .unwrap_or_else(|| buf.len());
    &buf[start..]
}

/// Split off the next whitespace-separated field, returning `(field, rest)`.
#[inline]
fn next_field(buf: &[u8]) -> Option<(&[u8], &[u8])> {
    let buf = skip_whitespace(buf);
    if buf.is_empty() {
        return None;
    }

    let end = buf
        .iter()
        .position(|ch| ch.is_ascii_whitespace())
        .unwrap_or_else(|| buf.len());
    Some(buf.split_at(end))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASH: &[u8] = b"4242 (bash) S 4241 4242 4242 34816 4242 4194304 9061 0 0 0 \
        13 4 0 0 20 0 1 0 1234 8495104 1341 18446744073709551615\n";

    #[test]
    fn test_parse_stat_prefix() {
        assert_eq!(
            parse_stat_prefix(BASH).unwrap(),
            StatPrefix {
                pid: 4242,
                comm: b"bash",
                state: b'S',
                ppid: 4241,
                pgrp: 4242,
                session: 4242,
                tty_nr: 34816,
            }
        );

        assert_eq!(parse_tty_nr(BASH), Ok(34816));
        assert_eq!(parse_tty_nr(b"1 (init) S 0 1 1 0 -1"), Ok(0));
    }

    #[test]
    fn test_parse_tty_nr_minimal() {
        // Exactly seven fields, with and without a trailing newline
        assert_eq!(parse_tty_nr(b"7 (x) R 1 7 7 1025"), Ok(1025));
        assert_eq!(parse_tty_nr(b"7 (x) R 1 7 7 1025\n"), Ok(1025));
        assert_eq!(parse_tty_nr(b"  7   (x)\tR 1 7 7   +1025 "), Ok(1025));
        assert_eq!(parse_tty_nr(b"7 (x) R 1 7 7 -1"), Ok(-1));

        // A bare command name (no parentheses) is one field
        assert_eq!(parse_tty_nr(b"1 a R 1 1 1 34816"), Ok(34816));
    }

    #[test]
    fn test_parse_odd_comm() {
        let st = parse_stat_prefix(b"99 (my prog) S 1 99 99 34818 99 0").unwrap();
        assert_eq!(st.comm, b"my prog");
        assert_eq!(st.tty_nr, 34818);

        let st = parse_stat_prefix(b"99 (a) b) 1 2 3) R 1 99 99 34819 99 0").unwrap();
        assert_eq!(st.comm, b"a) b) 1 2 3");
        assert_eq!(st.state, b'R');
        assert_eq!(st.tty_nr, 34819);

        let st = parse_stat_prefix(b"99 () Z 1 99 99 0 99 0").unwrap();
        assert_eq!(st.comm, b"");
        assert_eq!(st.state, b'Z');
    }

    #[test]
    fn test_parse_malformed() {
        assert_eq!(parse_tty_nr(b""), Err(MalformedStat::MissingField(1)));
        assert_eq!(parse_tty_nr(b" \n"), Err(MalformedStat::MissingField(1)));
        assert_eq!(parse_tty_nr(b"42"), Err(MalformedStat::MissingField(2)));
        assert_eq!(parse_tty_nr(b"42 (x)"), Err(MalformedStat::MissingField(3)));
        assert_eq!(
            parse_tty_nr(b"42 (x) S 1 42 42"),
            Err(MalformedStat::MissingField(7))
        );

        assert_eq!(parse_tty_nr(b"pid (x) S 1 1 1 0"), Err(MalformedStat::BadField(1)));
        assert_eq!(parse_tty_nr(b"42 (x S 1 1 1 0"), Err(MalformedStat::BadField(2)));
        assert_eq!(parse_tty_nr(b"42 (x) SS 1 1 1 0"), Err(MalformedStat::BadField(3)));
        assert_eq!(parse_tty_nr(b"42 (x) S one 1 1 0"), Err(MalformedStat::BadField(4)));
        assert_eq!(parse_tty_nr(b"42 (x) S 1 1 1 tty"), Err(MalformedStat::BadField(7)));
        assert_eq!(parse_tty_nr(b"42 (x) S 1 1 1 0x8800"), Err(MalformedStat::BadField(7)));
        assert_eq!(
            parse_tty_nr(b"42 (x) S 1 1 1 2147483648"),
            Err(MalformedStat::BadField(7))
        );
        assert_eq!(
            parse_tty_nr(b"42 (x) S 1 1 1 -2147483648"),
            Ok(i32::MIN)
        );
    }

    #[test]
    fn test_parse_partial() {
        // The buffer ended right after field 7; it may have been cut off
        assert_eq!(
            parse_stat_prefix_partial(b"42 (x) S 1 42 42 348", false),
            Err(MalformedStat::Truncated)
        );
        assert_eq!(
            parse_stat_prefix_partial(b"42 (x) S 1 4", false),
            Err(MalformedStat::Truncated)
        );
        assert_eq!(
            parse_stat_prefix_partial(b"42 (xxxxxxxx", false),
            Err(MalformedStat::Truncated)
        );

        assert_eq!(
            parse_stat_prefix_partial(b"42 (x) S 1 42 42 34816 42 0 1", false)
                .unwrap()
                .tty_nr,
            34816
        );
        assert_eq!(
            parse_stat_prefix_partial(b"42 (x) S 1 42 42 34816 ", false)
                .unwrap()
                .tty_nr,
            34816
        );
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_malformed_display() {
        assert_eq!(MalformedStat::MissingField(7).to_string(), "missing field 7");
        assert_eq!(MalformedStat::BadField(2).to_string(), "bad value in field 2");
        assert_eq!(MalformedStat::Truncated.to_string(), "record truncated");
    }
}
