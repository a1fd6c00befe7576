use chrono::{DateTime, Utc};
use std::fmt;

/// Level tag for the bit-exact persisted log line format in `spec.md` §4.7.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// Format one trigger-activation log line, bit-exact per `spec.md` §4.7:
///
/// ```text
/// [<ISO-8601-UTC-millis>] [<LEVEL>] [<triggerName>] [<ruleName>] [<actionName>] <message>
/// ```
pub fn format_log_line(
    timestamp: DateTime<Utc>,
    level: LogLevel,
    trigger_name: &str,
    rule_name: &str,
    action_name: &str,
    message: &str,
) -> String {
    format!(
        "[{}] [{}] [{}] [{}] [{}] {}",
        timestamp.format("%Y-%m-%dT%H:%M:%S%.3fZ"),
        level,
        trigger_name,
        rule_name,
        action_name,
        message,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_matches_the_bit_exact_pattern() {
        let ts = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::milliseconds(678);
        let line = format_log_line(ts, LogLevel::Info, "mytrigger", "r1", "a1", "invoked, activationId=AID");
        assert_eq!(
            line,
            "[2026-01-02T03:04:05.678Z] [INFO] [mytrigger] [r1] [a1] invoked, activationId=AID"
        );
    }
}
