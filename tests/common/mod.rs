//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::collections::VecDeque;

use simple_error::SimpleError;
use termpad::config::EditorConfig;
use termpad::document::Document;
use termpad::{Editor, KeyOutcome, Terminal};

/// Terminal fed from a fixed byte script, recording everything written.
pub struct ScriptedTerminal {
    input: VecDeque<u8>,
    pub output: Vec<u8>,
}

impl ScriptedTerminal {
    pub fn new(input: &[u8]) -> Self {
        ScriptedTerminal {
            input: input.iter().copied().collect(),
            output: Vec::new(),
        }
    }

    pub fn is_drained(&self) -> bool {
        self.input.is_empty()
    }

    pub fn output_contains(&self, needle: &[u8]) -> bool {
        self.output.windows(needle.len()).any(|w| w == needle)
    }
}

impl Terminal for ScriptedTerminal {
    fn read_byte(&mut self) -> termpad::Result<Option<u8>> {
        Ok(self.input.pop_front())
    }

    fn write_all(&mut self, bytes: &[u8]) -> termpad::Result<()> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    fn wait_byte(&mut self) -> termpad::Result<u8> {
        self.input
            .pop_front()
            .ok_or_else(|| SimpleError::new("input exhausted"))
    }
}

pub fn test_editor(lines: &[&str]) -> Editor {
    Editor::new(
        Document::from_lines(lines),
        (24, 80),
        EditorConfig::default(),
    )
}

/// Feed `input` through the editor until it is consumed or the editor quits.
pub fn press(editor: &mut Editor, input: &[u8]) -> (ScriptedTerminal, KeyOutcome) {
    let mut term = ScriptedTerminal::new(input);
    let mut outcome = KeyOutcome::Continue;
    while !term.is_drained() && outcome == KeyOutcome::Continue {
        editor.refresh_screen(&mut term).unwrap();
        outcome = editor.process_keypress(&mut term).unwrap();
    }
    (term, outcome)
}

pub fn lines(editor: &Editor) -> Vec<String> {
    editor
        .doc
        .rows
        .iter()
        .map(|r| String::from_utf8_lossy(&r.chars).into_owned())
        .collect()
}

pub const CTRL_F: u8 = 0x06;
pub const CTRL_Q: u8 = 0x11;
pub const CTRL_S: u8 = 0x13;
