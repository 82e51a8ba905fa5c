use std::process;

use clap::Parser;
use simple_error::SimpleError;
use tracing::error;

use termpad::cli::CliArgs;
use termpad::config::EditorConfig;
use termpad::document::Document;
use termpad::terminal::{self, RawTerminal, Terminal};
use termpad::{logging, Editor};

fn die(err: SimpleError) -> ! {
    error!(error = %err, "fatal");
    let _ = RawTerminal::new().write_all(b"\x1b[2J\x1b[H");
    eprintln!("termpad: {}", err);
    // Raw mode is restored by the atexit handler.
    process::exit(1);
}

fn run(args: CliArgs) -> termpad::Result<()> {
    terminal::enable_raw_mode()?;

    let mut term = RawTerminal::new();
    let window = term.window_size()?;

    let doc = match &args.path {
        Some(path) => Document::open(path)?,
        None => Document::new(),
    };

    let mut editor = Editor::new(doc, window, EditorConfig::default());
    editor.set_status_message("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");
    editor.run(&mut term)
}

fn main() {
    let args = CliArgs::parse();
    logging::init(args.log.as_deref());

    if let Err(err) = run(args) {
        die(err);
    }
}
