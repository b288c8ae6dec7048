//! Terminal probing.

/// Width assumed when the terminal cannot be queried.
pub const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Current terminal width in columns, falling back to the default.
pub fn terminal_width() -> usize {
    terminal_size()
        .map(|(cols, _)| cols as usize)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// Query `(columns, rows)` of the controlling terminal.
#[cfg(unix)]
pub fn terminal_size() -> Option<(u16, u16)> {
    let mut size = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };
    if result == 0 && size.ws_col > 0 && size.ws_row > 0 {
        Some((size.ws_col, size.ws_row))
    } else {
        None
    }
}

#[cfg(not(unix))]
pub fn terminal_size() -> Option<(u16, u16)> {
    None
}

/// Whether stdout is attached to a terminal.
#[cfg(unix)]
pub fn stdout_is_tty() -> bool {
    unsafe { libc::isatty(libc::STDOUT_FILENO) == 1 }
}

#[cfg(not(unix))]
pub fn stdout_is_tty() -> bool {
    false
}
