//! Viewport scrolling and frame composition.

use std::time::Instant;

use crate::config::VERSION;
use crate::editor::Editor;
use crate::syntax::Highlight;
use crate::terminal::Terminal;
use crate::Result;

impl Editor {
    /// Recompute `rx` and shift the offsets just enough to keep the cursor visible.
    pub fn scroll(&mut self) {
        self.rx = self.doc.row_to_render_column(self.cy, self.cx);

        if self.cy < self.rowoff {
            self.rowoff = self.cy;
        }
        if self.cy >= self.rowoff + self.screenrows {
            self.rowoff = (self.cy + 1).saturating_sub(self.screenrows);
        }
        if self.rx < self.coloff {
            self.coloff = self.rx;
        }
        if self.rx >= self.coloff + self.screencols {
            self.coloff = (self.rx + 1).saturating_sub(self.screencols);
        }
    }

    pub fn refresh_screen<T: Terminal>(&mut self, term: &mut T) -> Result<()> {
        self.scroll();
        let frame = self.compose_frame(Instant::now());
        term.write_all(&frame)
    }

    /// Build the full frame for the current state. Call `scroll` first.
    pub fn compose_frame(&self, now: Instant) -> Vec<u8> {
        let mut ab = Vec::new();

        ab.extend_from_slice(b"\x1b[?25l");
        ab.extend_from_slice(b"\x1b[H");

        self.draw_rows(&mut ab);
        self.draw_status_bar(&mut ab);
        self.draw_message_bar(&mut ab, now);

        let cursor = format!(
            "\x1b[{};{}H",
            self.cy.saturating_sub(self.rowoff) + 1,
            self.rx.saturating_sub(self.coloff) + 1
        );
        ab.extend_from_slice(cursor.as_bytes());
        ab.extend_from_slice(b"\x1b[?25h");
        ab
    }

    fn draw_rows(&self, ab: &mut Vec<u8>) {
        let numrows = self.doc.numrows();
        for y in 0..self.screenrows {
            let filerow = y + self.rowoff;
            if filerow >= numrows {
                if numrows == 0 && y == self.screenrows / 3 {
                    self.draw_welcome(ab);
                } else {
                    ab.push(b'~');
                }
            } else {
                let row = &self.doc.rows[filerow];
                let start = self.coloff.min(row.render_size());
                let end = (self.coloff + self.screencols).min(row.render_size());
                draw_highlighted(ab, &row.render[start..end], &row.hl[start..end]);
            }

            ab.extend_from_slice(b"\x1b[K");
            ab.extend_from_slice(b"\r\n");
        }
    }

    fn draw_welcome(&self, ab: &mut Vec<u8>) {
        let welcome = format!("termpad editor -- version {}", VERSION);
        let len = welcome.len().min(self.screencols);
        let mut padding = (self.screencols - len) / 2;
        if padding > 0 {
            ab.push(b'~');
            padding -= 1;
        }
        ab.extend(std::iter::repeat(b' ').take(padding));
        ab.extend_from_slice(&welcome.as_bytes()[..len]);
    }

    fn draw_status_bar(&self, ab: &mut Vec<u8>) {
        ab.extend_from_slice(b"\x1b[7m");

        let name = self
            .doc
            .filename
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| "[No Name]".to_string());
        let name: String = name.chars().take(20).collect();
        let status = format!(
            "{} - {} lines {}",
            name,
            self.doc.numrows(),
            if self.doc.is_dirty() { "(modified)" } else { "" }
        );
        let rstatus = format!(
            "{} | {}/{}",
            self.doc.filetype(),
            self.cy + 1,
            self.doc.numrows()
        );

        let status = status.as_bytes();
        let mut len = status.len().min(self.screencols);
        ab.extend_from_slice(&status[..len]);
        while len < self.screencols {
            if self.screencols - len == rstatus.len() {
                ab.extend_from_slice(rstatus.as_bytes());
                break;
            }
            ab.push(b' ');
            len += 1;
        }

        ab.extend_from_slice(b"\x1b[m");
        ab.extend_from_slice(b"\r\n");
    }

    fn draw_message_bar(&self, ab: &mut Vec<u8>, now: Instant) {
        ab.extend_from_slice(b"\x1b[K");
        if self.status.is_visible(now, self.config.message_timeout) {
            let msg = self.status.text.as_bytes();
            let len = msg.len().min(self.screencols);
            ab.extend_from_slice(&msg[..len]);
        }
    }
}

/// Append `text` with a color escape wherever the highlight class changes.
fn draw_highlighted(ab: &mut Vec<u8>, text: &[u8], hl: &[Highlight]) {
    let mut current_color: Option<u8> = None;
    for (&c, &h) in text.iter().zip(hl) {
        if c.is_ascii_control() {
            let sym = if c <= 26 { b'@' + c } else { b'?' };
            ab.extend_from_slice(b"\x1b[7m");
            ab.push(sym);
            ab.extend_from_slice(b"\x1b[m");
            if let Some(color) = current_color {
                ab.extend_from_slice(format!("\x1b[{}m", color).as_bytes());
            }
        } else if h == Highlight::Normal {
            if current_color.is_some() {
                ab.extend_from_slice(b"\x1b[39m");
                current_color = None;
            }
            ab.push(c);
        } else {
            let color = h.color();
            if current_color != Some(color) {
                current_color = Some(color);
                ab.extend_from_slice(format!("\x1b[{}m", color).as_bytes());
            }
            ab.push(c);
        }
    }
    ab.extend_from_slice(b"\x1b[39m");
}
