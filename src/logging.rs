//! Debug logging.
//!
//! The terminal belongs to the editor, so logs only ever go to a file. Filtering
//! follows `RUST_LOG` and defaults to `debug`:
//!
//! - `termpad --log /tmp/termpad.log foo.c`
//! - `RUST_LOG=termpad::search=trace TERMPAD_LOG=/tmp/termpad.log termpad`

use std::path::{Path, PathBuf};

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Install a file-backed subscriber. Without a log file tracing stays disabled.
pub fn init(log_file: Option<&Path>) {
    let path = match log_file {
        Some(path) => path,
        None => return,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = match path.file_name() {
        Some(name) => name.to_os_string(),
        None => return,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    let file_appender = tracing_appender::rolling::never(dir, file_name);

    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true)
        .with_filter(filter);

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry().with(file_layer).try_init();
}
