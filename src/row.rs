//! A single line of the document in raw, rendered and highlighted form.

use crate::config::TAB_STOP;
use crate::syntax::Highlight;

#[derive(Debug, Clone, Default)]
pub struct Row {
    /// Position within the document.
    pub idx: usize,
    pub chars: Vec<u8>,
    pub render: Vec<u8>,
    pub hl: Vec<Highlight>,
    /// Row ends inside an unterminated multi-line comment.
    pub hl_open_comment: bool,
}

impl Row {
    /// Build a row. Its render and highlight are filled in by the document.
    pub fn new(idx: usize, chars: &[u8]) -> Self {
        Row {
            idx,
            chars: chars.to_vec(),
            ..Row::default()
        }
    }

    pub fn size(&self) -> usize {
        self.chars.len()
    }

    pub fn render_size(&self) -> usize {
        self.render.len()
    }

    /// Regenerate `render` from `chars`, expanding tabs.
    pub fn update_render(&mut self) {
        let tabs = self.chars.iter().filter(|&&c| c == b'\t').count();
        let mut render = Vec::with_capacity(self.chars.len() + tabs * (TAB_STOP - 1));
        for &c in &self.chars {
            if c == b'\t' {
                render.push(b' ');
                while render.len() % TAB_STOP != 0 {
                    render.push(b' ');
                }
            } else {
                render.push(c);
            }
        }
        self.render = render;
    }

    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for &c in self.chars.iter().take(cx) {
            if c == b'\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Buffer column whose render span covers `rx`; the row size if `rx` is past the end.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, &c) in self.chars.iter().enumerate() {
            if c == b'\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.chars.len()
    }

    pub(crate) fn insert_char(&mut self, at: usize, c: u8) {
        let at = at.min(self.chars.len());
        self.chars.insert(at, c);
    }

    pub(crate) fn delete_char(&mut self, at: usize) -> bool {
        if at >= self.chars.len() {
            return false;
        }
        self.chars.remove(at);
        true
    }

    pub(crate) fn append(&mut self, s: &[u8]) {
        self.chars.extend_from_slice(s);
    }

    pub(crate) fn truncate(&mut self, at: usize) {
        self.chars.truncate(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(s: &str) -> Row {
        let mut r = Row::new(0, s.as_bytes());
        r.update_render();
        r
    }

    #[test]
    fn tabs_expand_to_next_stop() {
        assert_eq!(row("\tx").render, b"        x".to_vec());
        assert_eq!(row("ab\tc").render, b"ab      c".to_vec());
        assert_eq!(row("12345678\t").render_size(), 16);
    }

    #[test]
    fn cx_to_rx_counts_tab_width() {
        let r = row("a\tb\t\tc");
        assert_eq!(r.cx_to_rx(0), 0);
        assert_eq!(r.cx_to_rx(1), 1);
        assert_eq!(r.cx_to_rx(2), 8);
        assert_eq!(r.cx_to_rx(3), 9);
        assert_eq!(r.cx_to_rx(4), 16);
        assert_eq!(r.cx_to_rx(5), 24);
        assert_eq!(r.cx_to_rx(6), 25);
    }

    #[test]
    fn rx_inside_a_tab_maps_to_the_tab() {
        let r = row("a\tb");
        for rx in 1..8 {
            assert_eq!(r.rx_to_cx(rx), 1);
        }
        assert_eq!(r.rx_to_cx(8), 2);
        assert_eq!(r.rx_to_cx(100), 3);
    }

    #[test]
    fn render_column_round_trip() {
        for text in &["", "plain", "\t", "a\tb\t\tc", "\t\tx\ty z\t", "12345678\t9"] {
            let r = row(text);
            for cx in 0..=r.size() {
                assert_eq!(r.rx_to_cx(r.cx_to_rx(cx)), cx, "{:?} at {}", text, cx);
            }
        }
    }

    #[test]
    fn delete_out_of_range_is_ignored() {
        let mut r = row("ab");
        assert!(!r.delete_char(2));
        assert_eq!(r.chars, b"ab".to_vec());
    }

    #[test]
    fn insert_past_end_appends() {
        let mut r = row("ab");
        r.insert_char(10, b'c');
        assert_eq!(r.chars, b"abc".to_vec());
    }
}
