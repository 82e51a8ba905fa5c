//! Incremental find.

use tracing::debug;

use crate::editor::Editor;
use crate::keys::{Key, ENTER};
use crate::prompt::PromptHandler;
use crate::syntax::Highlight;
use crate::terminal::Terminal;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// Match memory for one search session.
#[derive(Debug)]
pub struct Search {
    last_match: Option<usize>,
    direction: Direction,
    /// Row whose highlight is overridden by the current match, with its prior highlight.
    saved_hl: Option<(usize, Vec<Highlight>)>,
}

impl Default for Search {
    fn default() -> Self {
        Search {
            last_match: None,
            direction: Direction::Forward,
            saved_hl: None,
        }
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn step(y: usize, dir: Direction, numrows: usize) -> usize {
    match dir {
        Direction::Forward if y + 1 >= numrows => 0,
        Direction::Forward => y + 1,
        Direction::Backward if y == 0 => numrows - 1,
        Direction::Backward => y - 1,
    }
}

impl Search {
    pub fn new() -> Self {
        Search::default()
    }

    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }

    fn restore_highlight(&mut self, editor: &mut Editor) {
        if let Some((line, hl)) = self.saved_hl.take() {
            if let Some(row) = editor.doc.rows.get_mut(line) {
                row.hl = hl;
            }
        }
    }

    fn reset(&mut self) {
        self.last_match = None;
        self.direction = Direction::Forward;
    }
}

impl PromptHandler for Search {
    fn on_key(&mut self, editor: &mut Editor, query: &[u8], key: Option<Key>) {
        self.restore_highlight(editor);

        match key {
            Some(Key::Char(ENTER)) | Some(Key::Escape) => {
                self.reset();
                return;
            }
            Some(Key::ArrowRight) | Some(Key::ArrowDown) => {
                self.direction = Direction::Forward
            }
            Some(Key::ArrowLeft) | Some(Key::ArrowUp) => self.direction = Direction::Backward,
            _ => self.reset(),
        }

        let numrows = editor.doc.numrows();
        if query.is_empty() || numrows == 0 {
            return;
        }

        let mut current = match self.last_match {
            Some(y) => step(y, self.direction, numrows),
            None => editor.cy.min(numrows - 1),
        };
        for _ in 0..numrows {
            let row = &mut editor.doc.rows[current];
            if let Some(rx) = find_bytes(&row.render, query) {
                self.last_match = Some(current);
                self.saved_hl = Some((current, row.hl.clone()));
                let end = (rx + query.len()).min(row.hl.len());
                for h in &mut row.hl[rx..end] {
                    *h = Highlight::Match;
                }

                editor.cy = current;
                editor.cx = editor.doc.render_column_to_row(current, rx);
                // Scrolls the match to the top of the screen on the next render.
                editor.rowoff = numrows;
                debug!(row = current, col = rx, "search hit");
                return;
            }
            current = step(current, self.direction, numrows);
        }
    }
}

impl Editor {
    /// Search interactively. Cancelling returns the cursor and view to where they were.
    pub fn find<T: Terminal>(&mut self, term: &mut T) -> Result<()> {
        let (cx, cy, coloff, rowoff) = (self.cx, self.cy, self.coloff, self.rowoff);

        let mut search = Search::new();
        let query = self.prompt(term, "Search: {} (Use ESC/Arrows/Enter)", &mut search)?;

        if query.is_none() {
            self.cx = cx;
            self.cy = cy;
            self.coloff = coloff;
            self.rowoff = rowoff;
        }
        Ok(())
    }
}
