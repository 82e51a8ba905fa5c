//! Editor state, cursor motion and the edit engine.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::config::EditorConfig;
use crate::document::Document;
use crate::keys::{ctrl, read_key, Key, BACKSPACE, ENTER};
use crate::terminal::Terminal;
use crate::Result;

const QUIT: u8 = ctrl(b'q');
const SAVE: u8 = ctrl(b's');
const FIND: u8 = ctrl(b'f');
const CTRL_H: u8 = ctrl(b'h');
const CTRL_L: u8 = ctrl(b'l');

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

/// A transient message for the message line.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub set_at: Instant,
}

impl StatusMessage {
    pub fn new<S: Into<String>>(text: S) -> Self {
        StatusMessage {
            text: text.into(),
            set_at: Instant::now(),
        }
    }

    pub fn is_visible(&self, now: Instant, timeout: Duration) -> bool {
        !self.text.is_empty() && now.saturating_duration_since(self.set_at) < timeout
    }
}

pub struct Editor {
    /// Cursor column in `chars` of the current row.
    pub cx: usize,
    /// Cursor row; `numrows` is the empty line past the end.
    pub cy: usize,
    /// Cursor column in `render` of the current row.
    pub rx: usize,
    pub rowoff: usize,
    pub coloff: usize,
    pub screenrows: usize,
    pub screencols: usize,
    pub doc: Document,
    pub status: StatusMessage,
    pub config: EditorConfig,
    quit_times: usize,
}

impl Editor {
    /// `window` is the terminal size as `(rows, cols)`. Two rows are kept for the
    /// status bar and the message line; at least one text row and column remain.
    pub fn new(doc: Document, window: (usize, usize), config: EditorConfig) -> Self {
        let (rows, cols) = window;
        Editor {
            cx: 0,
            cy: 0,
            rx: 0,
            rowoff: 0,
            coloff: 0,
            screenrows: rows.saturating_sub(2).max(1),
            screencols: cols.max(1),
            doc,
            status: StatusMessage::new(""),
            quit_times: config.quit_times,
            config,
        }
    }

    pub fn set_status_message<S: Into<String>>(&mut self, msg: S) {
        self.status = StatusMessage::new(msg);
    }

    fn row_len(&self, y: usize) -> Option<usize> {
        self.doc.rows.get(y).map(|row| row.size())
    }

    pub fn move_cursor(&mut self, key: Key) {
        let numrows = self.doc.numrows();
        match key {
            Key::ArrowLeft => {
                if self.cx != 0 {
                    self.cx -= 1;
                } else if self.cy > 0 {
                    self.cy -= 1;
                    self.cx = self.row_len(self.cy).unwrap_or(0);
                }
            }
            Key::ArrowRight => match self.row_len(self.cy) {
                Some(len) if self.cx < len => self.cx += 1,
                Some(_) => {
                    self.cy += 1;
                    self.cx = 0;
                }
                None => {}
            },
            Key::ArrowUp => {
                if self.cy != 0 {
                    self.cy -= 1;
                }
            }
            Key::ArrowDown => {
                if self.cy < numrows {
                    self.cy += 1;
                }
            }
            _ => {}
        }

        let len = self.row_len(self.cy).unwrap_or(0);
        if self.cx > len {
            self.cx = len;
        }
    }

    fn page(&mut self, key: Key) {
        let dir = if key == Key::PageUp {
            self.cy = self.rowoff;
            Key::ArrowUp
        } else {
            self.cy = (self.rowoff + self.screenrows)
                .saturating_sub(1)
                .min(self.doc.numrows());
            Key::ArrowDown
        };
        for _ in 0..self.screenrows {
            self.move_cursor(dir);
        }
    }

    pub fn insert_char(&mut self, c: u8) {
        if self.cy == self.doc.numrows() {
            let at = self.doc.numrows();
            self.doc.insert_row(at, b"");
        }
        self.doc.splice_char(self.cy, self.cx, c);
        self.cx += 1;
    }

    pub fn insert_newline(&mut self) {
        if self.cx == 0 {
            self.doc.insert_row(self.cy, b"");
        } else {
            self.doc.split_row(self.cy, self.cx);
        }
        self.cy += 1;
        self.cx = 0;
    }

    /// Delete the character left of the cursor, joining with the previous row at column 0.
    pub fn del_char(&mut self) {
        if self.cy == self.doc.numrows() || (self.cx == 0 && self.cy == 0) {
            return;
        }
        if self.cx > 0 {
            self.doc.remove_char(self.cy, self.cx - 1);
            self.cx -= 1;
        } else {
            self.cx = self.row_len(self.cy - 1).unwrap_or(0);
            let chars = self.doc.rows[self.cy].chars.clone();
            self.doc.append_text(self.cy - 1, &chars);
            self.doc.delete_row(self.cy);
            self.cy -= 1;
        }
    }

    pub fn save<T: Terminal>(&mut self, term: &mut T) -> Result<()> {
        if self.doc.filename.is_none() {
            let mut no_op = |_: &mut Editor, _: &[u8], _: Option<Key>| {};
            match self.prompt(term, "Save as: {} (ESC to cancel)", &mut no_op)? {
                Some(name) => self.doc.set_filename(PathBuf::from(name)),
                None => {
                    self.set_status_message("Save aborted");
                    return Ok(());
                }
            }
        }

        match self.doc.save() {
            Ok(bytes) => self.set_status_message(format!("{} bytes written to disk", bytes)),
            Err(e) => {
                warn!(error = %e, "save failed");
                self.set_status_message(format!("Can't save! I/O error: {}", e));
            }
        }
        Ok(())
    }

    pub fn process_keypress<T: Terminal>(&mut self, term: &mut T) -> Result<KeyOutcome> {
        let key = read_key(term)?;
        self.handle_key(term, key)
    }

    pub fn handle_key<T: Terminal>(&mut self, term: &mut T, key: Key) -> Result<KeyOutcome> {
        match key {
            Key::Char(ENTER) => self.insert_newline(),
            Key::Char(QUIT) => {
                if self.doc.is_dirty() {
                    self.quit_times = self.quit_times.saturating_sub(1);
                    if self.quit_times > 0 {
                        self.set_status_message(format!(
                            "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
                            self.quit_times
                        ));
                        return Ok(KeyOutcome::Continue);
                    }
                }
                debug!(dirty = self.doc.dirty, "quit");
                return Ok(KeyOutcome::Quit);
            }
            Key::Char(SAVE) => self.save(term)?,
            Key::Char(FIND) => self.find(term)?,
            Key::Home => self.cx = 0,
            Key::End => {
                if let Some(len) = self.row_len(self.cy) {
                    self.cx = len;
                }
            }
            Key::Char(BACKSPACE) | Key::Char(CTRL_H) => self.del_char(),
            Key::Delete => {
                self.move_cursor(Key::ArrowRight);
                self.del_char();
            }
            Key::PageUp | Key::PageDown => self.page(key),
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight => {
                self.move_cursor(key)
            }
            Key::Char(CTRL_L) | Key::Escape => {}
            Key::Char(c) if c == b'\t' || (c.is_ascii() && !c.is_ascii_control()) => {
                self.insert_char(c)
            }
            Key::Char(_) => {}
        }

        self.quit_times = self.config.quit_times;
        Ok(KeyOutcome::Continue)
    }

    /// Render and handle keys until the user quits.
    pub fn run<T: Terminal>(&mut self, term: &mut T) -> Result<()> {
        loop {
            self.refresh_screen(term)?;
            if self.process_keypress(term)? == KeyOutcome::Quit {
                term.write_all(b"\x1b[2J\x1b[H")?;
                return Ok(());
            }
        }
    }
}
