//! Rendering of payloads into output lines.
//!
//! # Formats
//! - Production: one JSON object per line.
//! - Human: `[date][SEVERITY][context] message rest`, styled with ANSI
//!   codes, plus the stack on a second line when present.

use colored::{ColoredString, Colorize};
use serde_json::Value;

use crate::observability::message::Fields;
use crate::observability::severity::Severity;

/// Class of an HTTP status code, used to pick its style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Warning,
    Failure,
}

impl StatusClass {
    pub fn from_code(code: u16) -> Self {
        if code < 300 {
            StatusClass::Success
        } else if code < 500 {
            StatusClass::Warning
        } else {
            StatusClass::Failure
        }
    }

    pub fn paint(self, text: &str) -> ColoredString {
        match self {
            StatusClass::Success => text.green().bold(),
            StatusClass::Warning => text.bright_yellow().bold(),
            StatusClass::Failure => text.red().bold(),
        }
    }
}

/// `"<METHOD> <URL> => <STATUS> (<N> ms)"` with styles applied.
pub fn access_line(method: &str, url: &str, status_code: u16, elapsed_ms: u64) -> String {
    let status = status_code.to_string();
    format!(
        "{} {} => {} ({} ms)",
        method.bold(),
        url.bright_yellow().bold(),
        StatusClass::from_code(status_code).paint(&status),
        elapsed_ms
    )
}

/// Render a payload as a single-line JSON record.
pub fn render_json(payload: &Fields) -> Result<String, serde_json::Error> {
    serde_json::to_string(payload)
}

/// Render a payload in the human-readable format.
///
/// Returns the main line and, if the payload carries a stack, the stack.
pub fn render_human(mut payload: Fields, severity: Severity) -> (String, Option<String>) {
    let date = payload.shift_remove("date").map(|v| display(&v)).unwrap_or_default();
    payload.shift_remove("severity");
    let context = payload.shift_remove("context").filter(is_truthy);
    let message = payload.shift_remove("message").map(|v| display(&v)).unwrap_or_default();
    let stack = payload.shift_remove("stack").filter(is_truthy).map(|v| display(&v));

    let date_str = format!("[{}]", date).bold();
    let severity_str = severity.paint(&format!("[{}]", severity.label()));
    let context_str = context
        .map(|c| format!("[{}]", display(&c)).bold().to_string())
        .unwrap_or_default();
    let rest = if payload.is_empty() {
        String::new()
    } else {
        inspect(&Value::Object(payload)).yellow().italic().to_string()
    };

    let line = format!("{}{}{} {} {}", date_str, severity_str, context_str, message, rest);
    (line, stack)
}

/// Strings verbatim, everything else inspected.
fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => inspect(other),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Node-style inspection: `{ key: 'value', list: [ 1, 2 ] }`.
pub fn inspect(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(inspect).collect();
            format!("[ {} ]", inner.join(", "))
        }
        Value::Object(fields) if fields.is_empty() => "{}".to_string(),
        Value::Object(fields) => {
            let inner: Vec<String> = fields
                .iter()
                .map(|(key, value)| format!("{}: {}", inspect_key(key), inspect(value)))
                .collect();
            format!("{{ {} }}", inner.join(", "))
        }
    }
}

fn inspect_key(key: &str) -> String {
    let is_identifier = key
        .chars()
        .next()
        .map_or(false, |c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');
    if is_identifier {
        key.to_string()
    } else {
        inspect(&Value::String(key.to_string()))
    }
}
