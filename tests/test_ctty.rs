use std::io::Write;
use std::os::unix::prelude::*;

use ctty::{
    c_paths, isctty, isctty_strict, open, openpty, proc_ctty_dev, try_proc_ctty_dev, DevId,
    FileDesc, LookupError, OFlag,
};

fn child_exit_status(pid: libc::pid_t) -> i32 {
    let mut status = 0;
    loop {
        let res = unsafe { libc::waitpid(pid, &mut status, 0) };
        if res == pid {
            break;
        }
        assert_eq!(std::io::Error::last_os_error().raw_os_error(), Some(libc::EINTR));
    }

    assert!(libc::WIFEXITED(status), "child did not exit: {:#x}", status);
    libc::WEXITSTATUS(status)
}

// Runs in a forked child, so it must not allocate or panic. Returns the number of the first check
// that failed, or 0.
fn check_session(slave: RawFd, slave_dev: DevId) -> i32 {
    // Become a session leader with the pty slave as the controlling terminal (and as fds 0-2)
    if unsafe { ctty::login_tty(slave) }.is_err() {
        return 1;
    }

    if !isctty(0) || !isctty(1) || !isctty(2) {
        return 2;
    }
    if proc_ctty_dev() != slave_dev {
        return 3;
    }
    if try_proc_ctty_dev() != Ok(Some(slave_dev)) {
        return 4;
    }
    if isctty_strict(0) != Ok(true) {
        return 5;
    }

    let tty = match open(c_paths::dev_tty(), OFlag::O_RDWR | OFlag::O_CLOEXEC) {
        Ok(tty) => tty,
        Err(_) => return 6,
    };
    if tty.rdev_id() != Ok(DevId::DEV_TTY) || !tty.isctty() {
        return 7;
    }

    // Give up the controlling terminal; as the session leader we'd be sent SIGHUP
    unsafe {
        libc::signal(libc::SIGHUP, libc::SIG_IGN);
    }
    if ctty::tiocnotty(0).is_err() {
        return 8;
    }

    // The status record is re-read, so the change is visible immediately
    if proc_ctty_dev() != DevId::NONE || try_proc_ctty_dev() != Ok(None) {
        return 9;
    }
    if isctty(0) || isctty_strict(0) != Ok(false) {
        return 10;
    }

    // /dev/tty descriptors are accepted on the device number alone
    if !tty.isctty() {
        return 11;
    }

    0
}

#[test]
fn test_session_ctty() {
    let (master, slave) = unsafe { openpty() }.unwrap();
    let slave_dev = slave.rdev_id().unwrap();

    // The status record lookup only names terminals with minor numbers below 256 exactly
    if slave_dev.minor() >= 256 {
        return;
    }

    // A fresh pty is not our controlling terminal
    assert!(!isctty(slave.fd()));
    assert!(!isctty(master.fd()));
    assert_ne!(proc_ctty_dev(), slave_dev);

    match unsafe { ctty::fork() }.unwrap() {
        None => {
            let code = check_session(slave.into_fd(), slave_dev);
            unsafe { ctty::_exit(code) }
        }

        Some(pid) => {
            drop(slave);
            assert_eq!(child_exit_status(pid), 0);
            drop(master);
        }
    }
}

#[test]
fn test_regular_file() {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(b"not a terminal\n").unwrap();

    assert!(!isctty(file.as_raw_fd()));
    assert_eq!(isctty_strict(file.as_raw_fd()), Ok(false));

    let fdesc = FileDesc::from(file);
    assert!(!fdesc.isctty());
    assert!(!fdesc.isatty().unwrap());
}

#[test]
fn test_pipe() {
    let mut fds = [-1; 2];
    assert_eq!(unsafe { libc::pipe2(fds.as_mut_ptr(), libc::O_CLOEXEC) }, 0);
    let (r, w) = unsafe { (FileDesc::new(fds[0]), FileDesc::new(fds[1])) };

    assert!(!isctty(r.fd()));
    assert!(!isctty(w.fd()));
    assert_eq!(r.rdev_id().unwrap(), DevId::NONE);
}

#[test]
fn test_closed_fd() {
    let fd = {
        let file = tempfile::tempfile().unwrap();
        file.as_raw_fd()
    };

    // `fd` may already be reused by another test, but not for our controlling terminal
    assert!(!isctty(fd));

    assert!(!isctty(-1));
    assert!(!isctty(libc::c_int::MAX));
    assert!(matches!(
        isctty_strict(libc::c_int::MAX),
        Err(LookupError::Unavailable(e)) if e.code() == libc::EBADF
    ));
}

#[test]
fn test_stdio_consistent() {
    // Whatever stdin/stdout/stderr are, the strict and lenient variants must agree when /proc is
    // available
    if try_proc_ctty_dev().is_err() {
        return;
    }

    for fd in 0..3 {
        if let Ok(res) = isctty_strict(fd) {
            assert_eq!(res, isctty(fd), "fd {}", fd);
        }
    }
}
