use dioxus::prelude::*;

/// Entries kept before the oldest are dropped.
pub const MAX_ENTRIES: usize = 200;

#[derive(Clone, Debug, PartialEq)]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Success => "ok",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }

    fn needs_attention(&self) -> bool {
        matches!(self, LogLevel::Warning | LogLevel::Error)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub message: String,
}

/// User-facing record of what the app did: sign-ins, generations, deletes,
/// exports and the failures among them.
#[derive(Clone, Debug, Default)]
pub struct ActivityLog {
    pub entries: Vec<LogEntry>,
    pub visible: bool,
}

impl ActivityLog {
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>) {
        self.entries.push(LogEntry {
            timestamp: current_time(),
            level,
            message: message.into(),
        });
        if self.entries.len() > MAX_ENTRIES {
            let excess = self.entries.len() - MAX_ENTRIES;
            self.entries.drain(..excess);
        }
    }

    pub fn has_errors(&self) -> bool {
        self.entries.iter().any(|e| e.level == LogLevel::Error)
    }

    /// Warnings and errors recorded so far.
    pub fn problem_count(&self) -> usize {
        self.entries.iter().filter(|e| e.level.needs_attention()).count()
    }

    /// Newest first, optionally only warnings and errors.
    pub fn recent(&self, problems_only: bool) -> Vec<&LogEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !problems_only || e.level.needs_attention())
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub fn use_activity_log() -> Signal<ActivityLog> {
    use_context::<Signal<ActivityLog>>()
}

/// Record an activity and mirror it to `tracing`.
pub fn log_activity(log: &mut Signal<ActivityLog>, level: LogLevel, message: &str) {
    match level {
        LogLevel::Error => tracing::error!("{message}"),
        LogLevel::Warning => tracing::warn!("{message}"),
        LogLevel::Info | LogLevel::Success => tracing::info!("{message}"),
    }
    log.write().push(level, message);
}

#[cfg(target_arch = "wasm32")]
fn current_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_errors() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Success, "Lesson note generated");
        assert!(!log.has_errors());
        log.push(LogLevel::Error, "Delete failed");
        assert!(log.has_errors());
        assert_eq!(log.entries[1].message, "Delete failed");
        assert_eq!(log.entries[0].timestamp.len(), 8);
        log.clear();
        assert!(log.entries.is_empty());
    }

    #[test]
    fn test_recent_filters_problems() {
        let mut log = ActivityLog::default();
        log.push(LogLevel::Info, "Loading classes");
        log.push(LogLevel::Warning, "Resend failed");
        log.push(LogLevel::Success, "Exported jss-1.pdf");
        log.push(LogLevel::Error, "Message not sent");

        assert_eq!(log.problem_count(), 2);
        let all: Vec<_> = log.recent(false).iter().map(|e| e.message.as_str()).collect();
        assert_eq!(all, ["Message not sent", "Exported jss-1.pdf", "Resend failed", "Loading classes"]);
        let problems: Vec<_> = log.recent(true).iter().map(|e| e.level.label()).collect();
        assert_eq!(problems, ["error", "warn"]);
    }

    #[test]
    fn test_oldest_entries_dropped() {
        let mut log = ActivityLog::default();
        for i in 0..MAX_ENTRIES + 5 {
            log.push(LogLevel::Info, format!("event {i}"));
        }
        assert_eq!(log.entries.len(), MAX_ENTRIES);
        assert_eq!(log.entries[0].message, "event 5");
    }
}
