use std::fmt;
use std::sync::mpsc;
use std::time::Duration;

use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Severity of a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn label(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }
}

/// One timestamped message published by the worker.
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: Timestamp,
    pub level: LogLevel,
    pub message: String,
}

impl LogEvent {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Timestamp::now(),
            level,
            message: message.into(),
        }
    }

    /// Debug events go to the log file only, not the window's log view.
    pub fn shown_on_screen(&self) -> bool {
        self.level >= LogLevel::Info
    }
}

impl fmt::Display for LogEvent {
    /// `[<timestamp>] [<LEVEL>] <message>`, timestamp in local time.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local = self.timestamp.to_zoned(TimeZone::system());
        write!(
            f,
            "[{}] [{}] {}",
            local.strftime("%Y-%m-%d %H:%M:%S"),
            self.level.label(),
            self.message
        )
    }
}

/// Producer half of the event channel. Cheap to clone, never blocks.
#[derive(Debug, Clone)]
pub struct EventSink {
    tx: mpsc::Sender<LogEvent>,
}

impl EventSink {
    pub fn emit(&self, level: LogLevel, message: impl Into<String>) {
        let event = LogEvent::new(level, message);
        match level {
            LogLevel::Debug | LogLevel::Info => tracing::debug!(message = %event.message),
            LogLevel::Warning => tracing::warn!(message = %event.message),
            LogLevel::Error => tracing::error!(message = %event.message),
        }
        // A closed feed means nobody is watching; the run still goes on.
        let _ = self.tx.send(event);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.emit(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(LogLevel::Error, message);
    }
}

/// Consumer half of the event channel, drained by a front end on a timer.
pub struct EventFeed {
    rx: mpsc::Receiver<LogEvent>,
    poll_interval: Duration,
}

impl EventFeed {
    /// Take every event queued so far, in emission order, without blocking.
    pub fn drain(&self) -> Vec<LogEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// How often the observer should come back for more.
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }
}

/// Create a connected sink/feed pair.
pub fn channel(poll_interval: Duration) -> (EventSink, EventFeed) {
    let (tx, rx) = mpsc::channel();
    (EventSink { tx }, EventFeed { rx, poll_interval })
}
