use std::fmt;
use std::sync::Mutex;

use tracing::{Event, Subscriber, field::Visit};
use tracing_subscriber::layer::{Context, Layer};

/// Entries kept in memory before the oldest are dropped.
pub const MAX_LOG_ENTRIES: usize = 1000;

#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: tracing::Level,
    pub timestamp: String,
    pub message: String,
    pub target: String,
}

impl LogEntry {
    pub fn new(level: tracing::Level, message: String, target: String) -> Self {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        Self {
            level,
            timestamp,
            message,
            target,
        }
    }

    /// Separator line shown between runs.
    pub fn separator(label: &str) -> Self {
        Self::new(
            tracing::Level::INFO,
            format!("--- {} ---", label),
            "gui".to_string(),
        )
    }

    pub fn to_line(&self) -> String {
        format!(
            "[{}] {:<5} {}: {}",
            self.timestamp, self.level, self.target, self.message
        )
    }
}

static LOG_BUFFER: once_cell::sync::Lazy<Mutex<Vec<LogEntry>>> =
    once_cell::sync::Lazy::new(|| Mutex::new(Vec::new()));

/// Move freshly captured entries into `sink`, trimming it to the cap.
/// Returns true when anything arrived.
pub fn drain_into(sink: &Mutex<Vec<LogEntry>>) -> bool {
    let fresh: Vec<LogEntry> = match LOG_BUFFER.lock() {
        Ok(mut buf) if !buf.is_empty() => buf.drain(..).collect(),
        _ => return false,
    };
    if let Ok(mut logs) = sink.lock() {
        logs.extend(fresh);
        let len = logs.len();
        if len > MAX_LOG_ENTRIES {
            logs.drain(0..(len - MAX_LOG_ENTRIES));
        }
    }
    true
}

/// Tracing layer that copies every event into the shared GUI buffer.
#[derive(Default)]
pub struct GuiLogLayer;

impl GuiLogLayer {
    pub fn new() -> Self {
        Self
    }
}

struct MessageVisitor {
    message: String,
}

impl MessageVisitor {
    fn new() -> Self {
        Self {
            message: String::new(),
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

impl<S> Layer<S> for GuiLogLayer
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::new();
        event.record(&mut visitor);

        let message = if !visitor.message.is_empty() {
            visitor.message
        } else {
            metadata.target().to_string()
        };

        let entry = LogEntry::new(*metadata.level(), message, metadata.target().to_string());

        if let Ok(mut buf) = LOG_BUFFER.lock() {
            buf.push(entry);
            if buf.len() > MAX_LOG_ENTRIES {
                buf.remove(0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_caps_the_sink() {
        let sink = Mutex::new(
            (0..MAX_LOG_ENTRIES)
                .map(|i| LogEntry::new(tracing::Level::INFO, i.to_string(), "t".into()))
                .collect::<Vec<_>>(),
        );
        if let Ok(mut buf) = LOG_BUFFER.lock() {
            buf.push(LogEntry::new(tracing::Level::WARN, "late".into(), "t".into()));
        }
        assert!(drain_into(&sink));
        let logs = sink.lock().unwrap();
        assert_eq!(logs.len(), MAX_LOG_ENTRIES);
        assert_eq!(logs.last().unwrap().message, "late");
        assert_eq!(logs[0].message, "1");
    }

    #[test]
    fn line_format_includes_level_and_target() {
        let e = LogEntry::new(tracing::Level::WARN, "skipped".into(), "cardprint::api".into());
        let line = e.to_line();
        assert!(line.contains("WARN"));
        assert!(line.ends_with("cardprint::api: skipped"));
    }
}
