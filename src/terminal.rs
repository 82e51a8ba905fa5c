//! Raw terminal mode, window geometry and byte-level I/O.

use std::io::Write;
use std::sync::Mutex;

use lazy_static::lazy_static;
use libc::{atexit, STDIN_FILENO, STDOUT_FILENO};
use nix::errno::Errno;
use simple_error::SimpleError;
use termios::{
    tcsetattr, Termios, BRKINT, CS8, ECHO, ICANON, ICRNL, IEXTEN, INPCK, ISIG, ISTRIP, IXON,
    OPOST, TCSAFLUSH, VMIN, VTIME,
};
use tracing::debug;

use crate::Result;

/// The byte stream the editor talks to.
pub trait Terminal {
    /// Read one byte, or `None` if nothing arrived within the read timeout.
    fn read_byte(&mut self) -> Result<Option<u8>>;

    fn write_all(&mut self, bytes: &[u8]) -> Result<()>;

    /// Block until a byte arrives.
    fn wait_byte(&mut self) -> Result<u8> {
        loop {
            if let Some(b) = self.read_byte()? {
                return Ok(b);
            }
        }
    }
}

lazy_static! {
    static ref ORIG_TERMIOS: Mutex<Option<Termios>> = Mutex::new(None);
}

extern "C" fn disable_raw_mode() {
    if let Ok(orig) = ORIG_TERMIOS.lock() {
        if let Some(orig) = orig.as_ref() {
            let _ = tcsetattr(STDIN_FILENO, TCSAFLUSH, orig);
        }
    }
}

/// Switch stdin into raw mode. The previous mode is restored at process exit.
pub fn enable_raw_mode() -> Result<()> {
    let orig = Termios::from_fd(STDIN_FILENO).map_err(|e| SimpleError::with("tcgetattr", e))?;
    if let Ok(mut saved) = ORIG_TERMIOS.lock() {
        *saved = Some(orig);
    }
    unsafe {
        atexit(disable_raw_mode);
    }

    let mut raw = orig;
    raw.c_iflag &= !(BRKINT | ICRNL | INPCK | ISTRIP | IXON);
    raw.c_oflag &= !OPOST;
    raw.c_cflag |= CS8;
    raw.c_lflag &= !(ECHO | ICANON | IEXTEN | ISIG);
    raw.c_cc[VMIN] = 0;
    raw.c_cc[VTIME] = 1;

    tcsetattr(STDIN_FILENO, TCSAFLUSH, &raw).map_err(|e| SimpleError::with("tcsetattr", e))?;
    debug!("raw mode enabled");
    Ok(())
}

/// The process's controlling terminal on stdin/stdout.
pub struct RawTerminal;

impl RawTerminal {
    pub fn new() -> Self {
        RawTerminal
    }

    /// Terminal size as `(rows, cols)`.
    pub fn window_size(&mut self) -> Result<(usize, usize)> {
        let mut ws = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        let res = unsafe { libc::ioctl(STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };
        if res == -1 || ws.ws_col == 0 {
            self.write_all(b"\x1b[999C\x1b[999B")?;
            return self.cursor_position();
        }
        Ok((ws.ws_row as usize, ws.ws_col as usize))
    }

    fn cursor_position(&mut self) -> Result<(usize, usize)> {
        self.write_all(b"\x1b[6n")?;

        let mut buf = Vec::with_capacity(32);
        while buf.len() < 32 {
            match self.read_byte()? {
                Some(b'R') | None => break,
                Some(b) => buf.push(b),
            }
        }
        parse_cursor_report(&buf).ok_or_else(|| SimpleError::new("window size"))
    }
}

impl Default for RawTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for RawTerminal {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut c = [0u8; 1];
        match nix::unistd::read(STDIN_FILENO, &mut c) {
            Ok(1) => Ok(Some(c[0])),
            Ok(_) => Ok(None),
            Err(nix::Error::Sys(Errno::EAGAIN)) => Ok(None),
            Err(e) => Err(SimpleError::with("read", e)),
        }
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        out.write_all(bytes)
            .and_then(|_| out.flush())
            .map_err(|e| SimpleError::with("write", e))
    }
}

/// Parse a cursor position report (`ESC [ rows ; cols`, the trailing `R` already consumed).
pub fn parse_cursor_report(report: &[u8]) -> Option<(usize, usize)> {
    if report.len() < 2 || report[0] != 0x1b || report[1] != b'[' {
        return None;
    }
    let body = std::str::from_utf8(&report[2..]).ok()?;
    let mut parts = body.splitn(2, ';');
    let rows = parts.next()?.parse().ok()?;
    let cols = parts.next()?.parse().ok()?;
    Some((rows, cols))
}
