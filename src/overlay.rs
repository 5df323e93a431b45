//! Status sinks: where the latest status line ends up

use crate::config::{OverlayConfig, StatusSinkKind};
use std::io::Write;

/// Displays the most recent status text. Repeating a text is harmless.
pub trait StatusSink {
    fn display(&mut self, text: &str);
}

impl<T: StatusSink + ?Sized> StatusSink for Box<T> {
    fn display(&mut self, text: &str) {
        (**self).display(text)
    }
}

pub fn sink_from_config(config: &OverlayConfig) -> Box<dyn StatusSink + Send> {
    match config.sink {
        StatusSinkKind::Log => Box::new(LogStatusSink::default()),
        StatusSinkKind::Terminal => Box::new(TerminalStatusSink::new()),
    }
}

/// Logs the status whenever it changes
#[derive(Debug, Default)]
pub struct LogStatusSink {
    current: Option<String>,
}

impl LogStatusSink {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }
}

impl StatusSink for LogStatusSink {
    fn display(&mut self, text: &str) {
        if self.current.as_deref() == Some(text) {
            return;
        }
        log::info!("Status: {text}");
        self.current = Some(text.to_string());
    }
}

/// Rewrites a single stderr line in place
#[derive(Debug, Default)]
pub struct TerminalStatusSink {
    width: usize,
}

impl TerminalStatusSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusSink for TerminalStatusSink {
    fn display(&mut self, text: &str) {
        let len = text.chars().count();
        let pad = self.width.saturating_sub(len);
        self.width = len;
        let mut err = std::io::stderr().lock();
        // Terminal output is best effort.
        let _ = write!(err, "\r{text}{:pad$}", "");
        let _ = err.flush();
    }
}

impl Drop for TerminalStatusSink {
    fn drop(&mut self) {
        if self.width > 0 {
            eprintln!();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_sink_keeps_latest() {
        let mut sink = LogStatusSink::default();
        assert_eq!(sink.current(), None);
        sink.display("MODE: INACTIVE");
        sink.display("MODE: INACTIVE");
        sink.display("Cursor Mode");
        assert_eq!(sink.current(), Some("Cursor Mode"));
    }

    #[test]
    fn terminal_sink_tracks_width() {
        let mut sink = TerminalStatusSink::new();
        sink.display("Swipe Armed (Palm)");
        sink.display("Click");
        assert_eq!(sink.width, 5);
    }
}
