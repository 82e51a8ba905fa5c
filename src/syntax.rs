//! Syntax profiles and the per-row highlighting state machine.

use std::path::Path;

use bitflags::bitflags;
use lazy_static::lazy_static;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Normal,
    Comment,
    MlComment,
    Keyword1,
    Keyword2,
    String,
    Number,
    Match,
}

impl Highlight {
    /// ANSI foreground color code.
    pub fn color(self) -> u8 {
        match self {
            Highlight::Comment | Highlight::MlComment => 36,
            Highlight::Keyword1 => 33,
            Highlight::Keyword2 => 32,
            Highlight::String => 35,
            Highlight::Number => 31,
            Highlight::Match => 34,
            Highlight::Normal => 37,
        }
    }
}

bitflags! {
    pub struct HighlightFlags: u32 {
        const NUMBERS = 1 << 0;
        const STRINGS = 1 << 1;
    }
}

#[derive(Debug)]
pub struct Syntax {
    pub filetype: &'static str,
    /// Extensions (leading `.`) or file name fragments.
    pub filematch: &'static [&'static str],
    pub keywords: &'static [&'static str],
    pub types: &'static [&'static str],
    pub singleline_comment_start: &'static str,
    pub multiline_comment_start: &'static str,
    pub multiline_comment_end: &'static str,
    pub flags: HighlightFlags,
}

lazy_static! {
    static ref HLDB: Vec<Syntax> = vec![
        Syntax {
            filetype: "c",
            filematch: &[".c", ".h", ".cpp"],
            keywords: &[
                "switch", "if", "while", "for", "break", "continue", "return", "else", "struct",
                "union", "typedef", "static", "enum", "class", "case",
            ],
            types: &[
                "int", "long", "double", "float", "char", "unsigned", "signed", "void",
            ],
            singleline_comment_start: "//",
            multiline_comment_start: "/*",
            multiline_comment_end: "*/",
            flags: HighlightFlags::NUMBERS | HighlightFlags::STRINGS,
        },
        Syntax {
            filetype: "rust",
            filematch: &[".rs"],
            keywords: &[
                "as", "break", "const", "continue", "else", "enum", "extern", "fn", "for", "if",
                "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref",
                "return", "static", "struct", "trait", "type", "unsafe", "use", "where",
                "while",
            ],
            types: &[
                "bool", "char", "i8", "i16", "i32", "i64", "isize", "u8", "u16", "u32", "u64",
                "usize", "f32", "f64", "str", "String", "Self", "Vec", "Option", "Result",
            ],
            singleline_comment_start: "//",
            multiline_comment_start: "/*",
            multiline_comment_end: "*/",
            flags: HighlightFlags::NUMBERS | HighlightFlags::STRINGS,
        },
        Syntax {
            filetype: "python",
            filematch: &[".py"],
            keywords: &[
                "and", "as", "assert", "break", "class", "continue", "def", "del", "elif",
                "else", "except", "finally", "for", "from", "global", "if", "import", "in",
                "is", "lambda", "not", "or", "pass", "raise", "return", "try", "while",
                "with", "yield",
            ],
            types: &["int", "float", "str", "bool", "list", "dict", "tuple", "set", "None"],
            singleline_comment_start: "#",
            multiline_comment_start: "",
            multiline_comment_end: "",
            flags: HighlightFlags::NUMBERS | HighlightFlags::STRINGS,
        },
    ];
}

impl Syntax {
    /// Find the profile for a file name.
    pub fn for_path(path: &Path) -> Option<&'static Syntax> {
        let name = path.file_name()?.to_string_lossy();
        let ext = path.extension().map(|e| format!(".{}", e.to_string_lossy()));

        HLDB.iter().find(|syntax| {
            syntax.filematch.iter().any(|pattern| {
                if pattern.starts_with('.') {
                    ext.as_deref() == Some(*pattern)
                } else {
                    name.contains(pattern)
                }
            })
        })
    }
}

pub fn is_separator(c: u8) -> bool {
    c.is_ascii_whitespace() || c == 0 || b",.()+-/*=~%<>[];".contains(&c)
}

/// Longest keyword of either class starting at `text[0]` and followed by a separator or the
/// end of the row.
fn match_keyword(syntax: &Syntax, text: &[u8]) -> Option<(usize, Highlight)> {
    let classes = [
        (syntax.keywords, Highlight::Keyword1),
        (syntax.types, Highlight::Keyword2),
    ];
    let mut best: Option<(usize, Highlight)> = None;
    for (words, hl) in classes.iter() {
        for word in words.iter() {
            let len = word.len();
            if !text.starts_with(word.as_bytes()) {
                continue;
            }
            if text.get(len).map_or(true, |&c| is_separator(c))
                && best.map_or(true, |(best_len, _)| len > best_len)
            {
                best = Some((len, *hl));
            }
        }
    }
    best
}

/// Classify every byte of `render`.
///
/// `in_comment` is whether the previous row ended inside a multi-line comment. Returns the
/// highlight vector and whether this row ends inside one.
pub fn highlight_row(
    render: &[u8],
    syntax: Option<&Syntax>,
    in_comment: bool,
) -> (Vec<Highlight>, bool) {
    let mut hl = vec![Highlight::Normal; render.len()];
    let syntax = match syntax {
        Some(syntax) => syntax,
        None => return (hl, false),
    };

    let scs = syntax.singleline_comment_start.as_bytes();
    let mcs = syntax.multiline_comment_start.as_bytes();
    let mce = syntax.multiline_comment_end.as_bytes();

    let mut prev_sep = true;
    let mut in_string: Option<u8> = None;
    let mut in_comment = in_comment && !mcs.is_empty();

    let mut i = 0;
    while i < render.len() {
        let c = render[i];
        let prev_hl = if i > 0 { hl[i - 1] } else { Highlight::Normal };
        let rest = &render[i..];

        if !scs.is_empty() && in_string.is_none() && !in_comment && rest.starts_with(scs) {
            for h in &mut hl[i..] {
                *h = Highlight::Comment;
            }
            break;
        }

        if !mcs.is_empty() && !mce.is_empty() && in_string.is_none() {
            if in_comment {
                hl[i] = Highlight::MlComment;
                if rest.starts_with(mce) {
                    for h in &mut hl[i..i + mce.len()] {
                        *h = Highlight::MlComment;
                    }
                    i += mce.len();
                    in_comment = false;
                    prev_sep = true;
                } else {
                    i += 1;
                }
                continue;
            } else if rest.starts_with(mcs) {
                for h in &mut hl[i..i + mcs.len()] {
                    *h = Highlight::MlComment;
                }
                i += mcs.len();
                in_comment = true;
                continue;
            }
        }

        if syntax.flags.contains(HighlightFlags::STRINGS) {
            if let Some(quote) = in_string {
                hl[i] = Highlight::String;
                if c == b'\\' && i + 1 < render.len() {
                    hl[i + 1] = Highlight::String;
                    i += 2;
                    continue;
                }
                if c == quote {
                    in_string = None;
                }
                i += 1;
                prev_sep = true;
                continue;
            } else if c == b'"' || c == b'\'' {
                in_string = Some(c);
                hl[i] = Highlight::String;
                i += 1;
                continue;
            }
        }

        if syntax.flags.contains(HighlightFlags::NUMBERS)
            && ((c.is_ascii_digit() && (prev_sep || prev_hl == Highlight::Number))
                || (c == b'.' && prev_hl == Highlight::Number))
        {
            hl[i] = Highlight::Number;
            i += 1;
            prev_sep = false;
            continue;
        }

        if prev_sep {
            if let Some((len, class)) = match_keyword(syntax, rest) {
                for h in &mut hl[i..i + len] {
                    *h = class;
                }
                i += len;
                prev_sep = false;
                continue;
            }
        }

        prev_sep = is_separator(c);
        i += 1;
    }

    (hl, in_comment)
}
