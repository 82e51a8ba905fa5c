//! Single-line input on the message bar.

use crate::editor::Editor;
use crate::keys::{ctrl, read_key, Key, BACKSPACE, ENTER};
use crate::terminal::Terminal;
use crate::Result;

/// Side effects to run after every keystroke of a prompt, with the input typed so far.
///
/// `key` is `None` for the call made when the prompt opens, before any key is read.
pub trait PromptHandler {
    fn on_key(&mut self, editor: &mut Editor, input: &[u8], key: Option<Key>);
}

impl<F> PromptHandler for F
where
    F: FnMut(&mut Editor, &[u8], Option<Key>),
{
    fn on_key(&mut self, editor: &mut Editor, input: &[u8], key: Option<Key>) {
        self(editor, input, key)
    }
}

impl Editor {
    /// Ask for a line of input. `template` is shown with `{}` replaced by the input.
    ///
    /// Returns `None` if the prompt was cancelled with Escape. Enter only accepts a
    /// non-empty input.
    pub fn prompt<T, H>(
        &mut self,
        term: &mut T,
        template: &str,
        handler: &mut H,
    ) -> Result<Option<String>>
    where
        T: Terminal,
        H: PromptHandler,
    {
        let mut buf: Vec<u8> = Vec::new();
        handler.on_key(self, &buf, None);
        loop {
            self.set_status_message(template.replacen("{}", &String::from_utf8_lossy(&buf), 1));
            self.refresh_screen(term)?;

            let key = read_key(term)?;
            match key {
                Key::Delete | Key::Char(BACKSPACE) => {
                    buf.pop();
                }
                Key::Char(c) if c == ctrl(b'h') => {
                    buf.pop();
                }
                Key::Escape => {
                    self.set_status_message("");
                    handler.on_key(self, &buf, Some(key));
                    return Ok(None);
                }
                Key::Char(ENTER) if !buf.is_empty() => {
                    self.set_status_message("");
                    handler.on_key(self, &buf, Some(key));
                    return Ok(Some(String::from_utf8_lossy(&buf).into_owned()));
                }
                Key::Char(c) if c.is_ascii() && !c.is_ascii_control() => buf.push(c),
                _ => {}
            }
            handler.on_key(self, &buf, Some(key));
        }
    }
}
