//! The row buffer of the open file, with structural edits and file I/O.
//!
//! Every mutation regenerates the touched rows' render and highlight before it
//! returns, and row `idx` fields always equal their position.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

use simple_error::SimpleError;
use tracing::{debug, info};

use crate::row::Row;
use crate::syntax::{self, Syntax};
use crate::Result;

#[derive(Debug, Default)]
pub struct Document {
    pub rows: Vec<Row>,
    /// Number of modifications since the last load or save.
    pub dirty: usize,
    pub filename: Option<PathBuf>,
    pub syntax: Option<&'static Syntax>,
}

impl Document {
    pub fn new() -> Self {
        Document::default()
    }

    /// Load `path`. A missing or unreadable file is an error.
    pub fn open(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)
            .map_err(|e| SimpleError::with(&format!("open {}", path.display()), e))?;

        let mut doc = Document::new();
        doc.filename = Some(path.to_path_buf());
        doc.syntax = Syntax::for_path(path);

        for line in BufReader::new(file).split(b'\n') {
            let mut line = line.map_err(|e| SimpleError::with("read", e))?;
            while line.last() == Some(&b'\r') {
                line.pop();
            }
            let at = doc.rows.len();
            doc.insert_row(at, &line);
        }
        doc.dirty = 0;

        info!(
            path = %path.display(),
            rows = doc.rows.len(),
            filetype = doc.filetype(),
            "opened file"
        );
        Ok(doc)
    }

    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut doc = Document::new();
        for (at, line) in lines.iter().enumerate() {
            doc.insert_row(at, line.as_ref().as_bytes());
        }
        doc.dirty = 0;
        doc
    }

    pub fn numrows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    pub fn filetype(&self) -> &'static str {
        self.syntax.map_or("no ft", |s| s.filetype)
    }

    /// Bind the profile matching the current filename and re-highlight everything.
    pub fn select_syntax(&mut self) {
        self.syntax = self.filename.as_deref().and_then(Syntax::for_path);
        debug!(filetype = self.filetype(), "syntax selected");
        for idx in 0..self.rows.len() {
            self.highlight_row(idx);
        }
    }

    pub fn set_filename(&mut self, path: PathBuf) {
        self.filename = Some(path);
        self.select_syntax();
    }

    /// Re-run the highlighter on `idx`, carrying the multi-line comment state into
    /// following rows for as long as a row's exit state changes.
    pub fn update_syntax(&mut self, idx: usize) {
        let mut idx = idx;
        while idx < self.rows.len() {
            let changed = self.highlight_row(idx);
            if !changed {
                break;
            }
            idx += 1;
        }
    }

    /// Returns whether the row's exit comment state changed.
    fn highlight_row(&mut self, idx: usize) -> bool {
        let in_comment = idx > 0 && self.rows[idx - 1].hl_open_comment;
        let row = &mut self.rows[idx];
        let (hl, open) = syntax::highlight_row(&row.render, self.syntax, in_comment);
        row.hl = hl;
        let changed = row.hl_open_comment != open;
        row.hl_open_comment = open;
        changed
    }

    fn update_row(&mut self, idx: usize) {
        self.rows[idx].update_render();
        self.update_syntax(idx);
    }

    fn renumber_from(&mut self, from: usize) {
        for (i, row) in self.rows.iter_mut().enumerate().skip(from) {
            row.idx = i;
        }
    }

    pub fn insert_row(&mut self, at: usize, text: &[u8]) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(at, text));
        self.renumber_from(at + 1);
        self.update_row(at);
        if at + 1 < self.rows.len() {
            // The next row was highlighted against the old predecessor.
            self.update_syntax(at + 1);
        }
        self.dirty += 1;
    }

    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        self.renumber_from(at);
        if at < self.rows.len() {
            // The row now at `at` has a new predecessor.
            self.update_syntax(at);
        }
        self.dirty += 1;
    }

    pub fn append_text(&mut self, at: usize, text: &[u8]) {
        if at >= self.rows.len() {
            return;
        }
        self.rows[at].append(text);
        self.update_row(at);
        self.dirty += 1;
    }

    pub fn splice_char(&mut self, at: usize, cx: usize, c: u8) {
        if at >= self.rows.len() {
            return;
        }
        self.rows[at].insert_char(cx, c);
        self.update_row(at);
        self.dirty += 1;
    }

    pub fn remove_char(&mut self, at: usize, cx: usize) {
        if at >= self.rows.len() {
            return;
        }
        if self.rows[at].delete_char(cx) {
            self.update_row(at);
            self.dirty += 1;
        }
    }

    /// Split row `at` at buffer column `cx`; the tail becomes row `at + 1`.
    pub fn split_row(&mut self, at: usize, cx: usize) {
        if at >= self.rows.len() {
            return;
        }
        let cx = cx.min(self.rows[at].size());
        let tail = self.rows[at].chars[cx..].to_vec();
        self.insert_row(at + 1, &tail);
        self.rows[at].truncate(cx);
        self.update_row(at);
    }

    pub fn row_to_render_column(&self, at: usize, cx: usize) -> usize {
        self.rows.get(at).map_or(0, |row| row.cx_to_rx(cx))
    }

    pub fn render_column_to_row(&self, at: usize, rx: usize) -> usize {
        self.rows.get(at).map_or(0, |row| row.rx_to_cx(rx))
    }

    /// Every row followed by a newline.
    pub fn to_bytes(&self) -> Vec<u8> {
        let len = self.rows.iter().map(|r| r.size() + 1).sum();
        let mut buf = Vec::with_capacity(len);
        for row in &self.rows {
            buf.extend_from_slice(&row.chars);
            buf.push(b'\n');
        }
        buf
    }

    /// Write the rows to the current filename. Returns the number of bytes written.
    pub fn save(&mut self) -> Result<usize> {
        let path = self
            .filename
            .clone()
            .ok_or_else(|| SimpleError::new("no file name"))?;
        let buf = self.to_bytes();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .mode(0o644)
            .open(&path)
            .map_err(|e| SimpleError::new(e.to_string()))?;
        file.set_len(buf.len() as u64)
            .and_then(|_| file.write_all(&buf))
            .map_err(|e| SimpleError::new(e.to_string()))?;

        self.dirty = 0;
        info!(path = %path.display(), bytes = buf.len(), "saved file");
        Ok(buf.len())
    }
}
