use std::time::Duration;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Render width of a tab stop.
pub const TAB_STOP: usize = 8;

/// Number of Ctrl-Q presses needed to quit with unsaved changes.
pub const QUIT_TIMES: usize = 3;

/// How long a status message stays on the message line.
pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct EditorConfig {
    pub quit_times: usize,
    pub message_timeout: Duration,
}

impl Default for EditorConfig {
    fn default() -> Self {
        EditorConfig {
            quit_times: QUIT_TIMES,
            message_timeout: MESSAGE_TIMEOUT,
        }
    }
}
