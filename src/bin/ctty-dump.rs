//! Print the controlling terminal as seen through `/proc/self/stat`, and which of the standard
//! file descriptors (plus a freshly opened `/dev/tty`) refer to it.

use std::borrow::Cow;

use ctty::{c_paths, DevId, OFlag, RawFd};

fn describe(label: &str, fd: RawFd) {
    if !ctty::isatty_simple(fd) {
        return;
    }

    let name = match ctty::ttyname_alloc(fd) {
        Ok(name) => Cow::Owned(name.to_string_lossy().into_owned()),
        Err(_) => Cow::Borrowed("?"),
    };

    let dev = match ctty::fstat(fd) {
        Ok(st) => st.rdev_id(),
        Err(e) => {
            eprintln!("{}: fstat() failed: {}", label, e);
            return;
        }
    };

    println!(
        "{} is {} called {} device ID {}",
        label,
        if ctty::isctty(fd) { "the ctty" } else { "a tty" },
        name,
        dev
    );
}

fn main() {
    println!("/proc/self/stat ctty dev is {}", ctty::proc_ctty_dev());
    println!("/dev/tty dev is {}", DevId::DEV_TTY);

    for fd in 0..3 {
        describe(&fd.to_string(), fd);
    }

    // Not every process can open /dev/tty (there may be no controlling terminal at all)
    if let Ok(tty) = ctty::open(c_paths::dev_tty(), OFlag::O_RDWR | OFlag::O_CLOEXEC) {
        describe(&tty.fd().to_string(), tty.fd());
    }
}
