//! Logical key codes and decoding of terminal escape sequences.

use crate::terminal::Terminal;
use crate::Result;

pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 127;

/// The byte a terminal sends for Ctrl + `k`.
pub const fn ctrl(k: u8) -> u8 {
    k & 0x1f
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(u8),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Escape,
}

/// Map the bytes following an ESC to a key. Unknown or truncated sequences are `Escape`.
pub fn decode_sequence(seq: &[u8]) -> Key {
    match seq {
        [b'[', b'A'] => Key::ArrowUp,
        [b'[', b'B'] => Key::ArrowDown,
        [b'[', b'C'] => Key::ArrowRight,
        [b'[', b'D'] => Key::ArrowLeft,
        [b'[', b'H'] | [b'O', b'H'] => Key::Home,
        [b'[', b'F'] | [b'O', b'F'] => Key::End,
        [b'[', b'1', b'~'] | [b'[', b'7', b'~'] => Key::Home,
        [b'[', b'4', b'~'] | [b'[', b'8', b'~'] => Key::End,
        [b'[', b'3', b'~'] => Key::Delete,
        [b'[', b'5', b'~'] => Key::PageUp,
        [b'[', b'6', b'~'] => Key::PageDown,
        _ => Key::Escape,
    }
}

/// Whether `seq` (the bytes after ESC) needs another byte before it can be decoded.
fn needs_more(seq: &[u8]) -> bool {
    match seq {
        [] | [_] => true,
        [b'[', d] => d.is_ascii_digit(),
        _ => false,
    }
}

/// Block for the next key, collapsing escape sequences.
pub fn read_key<T: Terminal>(term: &mut T) -> Result<Key> {
    let c = term.wait_byte()?;
    if c != ESC {
        return Ok(Key::Char(c));
    }

    let mut seq = Vec::with_capacity(3);
    while needs_more(&seq) {
        match term.read_byte()? {
            Some(b) => seq.push(b),
            None => return Ok(Key::Escape),
        }
        if seq[0] != b'[' && seq[0] != b'O' {
            return Ok(Key::Escape);
        }
    }
    Ok(decode_sequence(&seq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    struct Bytes(VecDeque<u8>);

    impl Terminal for Bytes {
        fn read_byte(&mut self) -> Result<Option<u8>> {
            Ok(self.0.pop_front())
        }

        fn write_all(&mut self, _bytes: &[u8]) -> Result<()> {
            Ok(())
        }
    }

    fn keys(input: &[u8]) -> Vec<Key> {
        let mut term = Bytes(input.iter().copied().collect());
        let mut out = Vec::new();
        while !term.0.is_empty() {
            out.push(read_key(&mut term).unwrap());
        }
        out
    }

    #[test]
    fn arrows() {
        assert_eq!(
            keys(b"\x1b[A\x1b[B\x1b[C\x1b[D"),
            vec![Key::ArrowUp, Key::ArrowDown, Key::ArrowRight, Key::ArrowLeft]
        );
    }

    #[test]
    fn home_and_end_variants() {
        assert_eq!(
            keys(b"\x1b[H\x1bOH\x1b[1~\x1b[7~"),
            vec![Key::Home, Key::Home, Key::Home, Key::Home]
        );
        assert_eq!(
            keys(b"\x1b[F\x1bOF\x1b[4~\x1b[8~"),
            vec![Key::End, Key::End, Key::End, Key::End]
        );
    }

    #[test]
    fn tilde_sequences() {
        assert_eq!(
            keys(b"\x1b[3~\x1b[5~\x1b[6~"),
            vec![Key::Delete, Key::PageUp, Key::PageDown]
        );
    }

    #[test]
    fn lone_escape_times_out() {
        assert_eq!(keys(b"\x1b"), vec![Key::Escape]);
        assert_eq!(keys(b"\x1b["), vec![Key::Escape]);
    }

    #[test]
    fn unknown_sequences_are_escape() {
        assert_eq!(decode_sequence(b"[Z"), Key::Escape);
        assert_eq!(decode_sequence(b"[9~"), Key::Escape);
        assert_eq!(keys(b"\x1bx"), vec![Key::Escape]);
    }

    #[test]
    fn plain_bytes_pass_through() {
        assert_eq!(
            keys(b"a\r\x7f\x11"),
            vec![
                Key::Char(b'a'),
                Key::Char(ENTER),
                Key::Char(BACKSPACE),
                Key::Char(ctrl(b'q'))
            ]
        );
    }
}
