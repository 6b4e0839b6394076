//! Message and context types accepted by the logger.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::error::Error as StdError;

use serde_json::{Map, Value};

/// String-keyed fields of a log record.
pub type Fields = Map<String, Value>;

/// A log message.
///
/// Every variant is normalized into [`Fields`] before filtering and
/// rendering see it.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Free text, stored under the `message` key.
    PlainText(String),
    /// Arbitrary fields, merged as-is.
    Structured(Fields),
    /// An error with its stack, stored under `message` and `stack`.
    Error(ErrorReport),
}

impl Message {
    /// Build an error message from any error value.
    pub fn error(err: &(dyn StdError + 'static)) -> Self {
        Message::Error(ErrorReport::from_error(err))
    }

    /// Normalize into record fields.
    pub fn into_fields(self) -> Fields {
        match self {
            Message::PlainText(text) => {
                let mut fields = Fields::new();
                fields.insert("message".to_string(), Value::String(text));
                fields
            }
            Message::Structured(fields) => fields,
            Message::Error(report) => report.into_fields(Fields::new()),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::PlainText(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::PlainText(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Message::PlainText(text.clone())
    }
}

impl From<Fields> for Message {
    fn from(fields: Fields) -> Self {
        Message::Structured(fields)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Message::Structured(fields),
            Value::String(text) => Message::PlainText(text),
            other => Message::PlainText(other.to_string()),
        }
    }
}

impl From<ErrorReport> for Message {
    fn from(report: ErrorReport) -> Self {
        Message::Error(report)
    }
}

/// An error message together with its stack trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub message: String,
    pub stack: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            stack: stack.into(),
        }
    }

    /// Capture an error, its source chain and, when enabled, a backtrace.
    pub fn from_error(err: &(dyn StdError + 'static)) -> Self {
        let message = err.to_string();
        let mut stack = format!("Error: {}", message);

        let mut source = err.source();
        while let Some(cause) = source {
            stack.push_str("\n    caused by: ");
            stack.push_str(&cause.to_string());
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            stack.push('\n');
            stack.push_str(&backtrace.to_string());
        }

        Self { message, stack }
    }

    /// Merge `message` and `stack` over `context`.
    pub fn into_fields(self, mut context: Fields) -> Fields {
        context.insert("message".to_string(), Value::String(self.message));
        context.insert("stack".to_string(), Value::String(self.stack));
        context
    }
}

/// Fields merged into every message of one logger instance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogContext(Fields);

impl LogContext {
    pub fn fields(&self) -> &Fields {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LogContext {
    fn from(name: &str) -> Self {
        LogContext::from(name.to_string())
    }
}

impl From<String> for LogContext {
    fn from(name: String) -> Self {
        if name.is_empty() {
            return LogContext::default();
        }
        let mut fields = Fields::new();
        fields.insert("context".to_string(), Value::String(name));
        LogContext(fields)
    }
}

impl From<Option<String>> for LogContext {
    fn from(name: Option<String>) -> Self {
        name.map(LogContext::from).unwrap_or_default()
    }
}

impl From<Fields> for LogContext {
    fn from(fields: Fields) -> Self {
        LogContext(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct Inner;

    #[derive(Debug, thiserror::Error)]
    #[error("write failed")]
    struct Outer(#[source] Inner);

    #[test]
    fn test_plain_text_normalizes_to_message_field() {
        let fields = Message::from("hello").into_fields();
        assert_eq!(Value::Object(fields), json!({ "message": "hello" }));
    }

    #[test]
    fn test_non_object_values_become_text() {
        assert_eq!(Message::from(json!(42)), Message::PlainText("42".into()));
        assert_eq!(Message::from(json!("x")), Message::PlainText("x".into()));
        assert!(matches!(
            Message::from(json!({ "a": 1 })),
            Message::Structured(_)
        ));
    }

    #[test]
    fn test_error_report_includes_source_chain() {
        let err = Outer(Inner);
        let report = ErrorReport::from_error(&err);
        assert_eq!(report.message, "write failed");
        assert!(report.stack.starts_with("Error: write failed"));
        assert!(report.stack.contains("caused by: disk full"));
    }

    #[test]
    fn test_error_fields_override_context() {
        let mut context = Fields::new();
        context.insert("message".into(), json!("old"));
        context.insert("requestId".into(), json!("r-1"));
        let fields = ErrorReport::new("boom", "trace").into_fields(context);
        assert_eq!(
            Value::Object(fields),
            json!({ "message": "boom", "requestId": "r-1", "stack": "trace" })
        );
    }

    #[test]
    fn test_context_from_string() {
        let context = LogContext::from("UsersController");
        assert_eq!(
            Value::Object(context.fields().clone()),
            json!({ "context": "UsersController" })
        );
        assert!(LogContext::from("").is_empty());
        assert!(LogContext::from(None).is_empty());
    }
}
