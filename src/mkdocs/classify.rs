//! Severity classification of MkDocs output lines.
//!
//! MkDocs writes plain text where some lines carry a `LEVEL   - message`
//! marker. Continuation lines (wrapped text, Python stack traces) carry no
//! marker and belong to the level of the line that introduced them, so the
//! classifier keeps the last seen level across calls.

use regex::Regex;

/// Log level a classified line is relayed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

/// Severity state carried across the lines of one stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    /// A Python traceback has started; everything after it is an error.
    Traceback,
}

impl Severity {
    fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "DEBUG" => Some(Self::Debug),
            "INFO" => Some(Self::Info),
            "WARNING" => Some(Self::Warning),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    fn level(self) -> LogLevel {
        match self {
            Self::Debug => LogLevel::Debug,
            Self::Info => LogLevel::Info,
            Self::Warning => LogLevel::Warn,
            Self::Error | Self::Traceback => LogLevel::Error,
        }
    }
}

/// A single output line with its resolved log level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedMessage {
    pub level: LogLevel,
    pub message: String,
}

/// Stateful line classifier.
///
/// One instance must exist per output stream; sharing an instance between
/// stdout and stderr would corrupt the continuation state.
#[derive(Debug)]
pub struct LineClassifier {
    pattern: Regex,
    last: Option<Severity>,
}

impl LineClassifier {
    /// Create a classifier with no level seen yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"^(DEBUG|INFO|WARNING|ERROR)\s+-\s+(.*)$")
                .expect("valid level pattern"),
            last: None,
        }
    }

    /// Classify a single complete line.
    ///
    /// A line starting with `Traceback` forces the error-equivalent state
    /// and passes through unmodified. A line with a level marker updates the
    /// state and has the marker stripped. Any other line passes through
    /// verbatim at the previous level. Before any marker has been seen,
    /// unmarked lines are classified as errors.
    pub fn classify(&mut self, line: &str) -> ClassifiedMessage {
        let mut message = line;

        if line.starts_with("Traceback") {
            self.last = Some(Severity::Traceback);
        } else if let Some(caps) = self.pattern.captures(line) {
            let marker = caps.get(1).map_or("", |m| m.as_str());
            if let Some(severity) = Severity::from_marker(marker) {
                self.last = Some(severity);
                message = caps.get(2).map_or("", |m| m.as_str());
            }
        }

        ClassifiedMessage {
            level: self.last.map_or(LogLevel::Error, Severity::level),
            message: message.to_string(),
        }
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}
