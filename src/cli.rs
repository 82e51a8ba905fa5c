//! Command-line argument parsing

use clap::Parser;
use std::path::PathBuf;

/// A small terminal text editor
#[derive(Parser, Debug)]
#[command(name = "termpad", version, about = "A small terminal text editor")]
pub struct CliArgs {
    /// File to open; without it an unnamed buffer is started
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Write debug logs to this file
    #[arg(long, value_name = "FILE", env = "TERMPAD_LOG")]
    pub log: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_opens_unnamed_buffer() {
        let args = CliArgs::try_parse_from(["termpad"]).unwrap();
        assert!(args.path.is_none());
    }

    #[test]
    fn path_and_log_file() {
        let args =
            CliArgs::try_parse_from(["termpad", "main.c", "--log", "/tmp/termpad.log"]).unwrap();
        assert_eq!(args.path, Some(PathBuf::from("main.c")));
        assert_eq!(args.log, Some(PathBuf::from("/tmp/termpad.log")));
    }
}
