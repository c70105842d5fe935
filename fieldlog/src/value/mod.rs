
use serde::Serialize;
use serde_json::Value;
use std::backtrace::Backtrace;

/// A raw value a caller may set on a tracked field.
///
/// The formatter stores the raw value verbatim alongside its rendered string
/// form, so a clone can replay the original values instead of copying the
/// rendered output. `Display` gives the string form used for template
/// substitution; an error value displays its message, not its stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
  Str(String),
  Int(i64),
  Float(f64),
  Bool(bool),
  Error(LoggedError),
}

impl FieldValue {
  /// The value as a JSON value, for `%j` positional formatting.
  pub fn to_json(&self) -> Value {
    match self {
      FieldValue::Str(s) => Value::String(s.clone()),
      FieldValue::Int(i) => Value::from(*i),
      FieldValue::Float(f) => Value::from(*f),
      FieldValue::Bool(b) => Value::Bool(*b),
      FieldValue::Error(e) => serde_json::json!({ "message": e.message, "stack": e.stack }),
    }
  }

  /// The value as a number string, for `%d` positional formatting.
  ///
  /// Non-numeric values render `NaN`, matching printf-style formatters.
  pub fn to_number_string(&self) -> String {
    match self {
      FieldValue::Int(i) => i.to_string(),
      FieldValue::Float(f) => f.to_string(),
      FieldValue::Bool(b) => (*b as u8).to_string(),
      FieldValue::Str(s) => match s.parse::<f64>() {
        Ok(n) => n.to_string(),
        Err(_) => "NaN".to_string(),
      },
      FieldValue::Error(_) => "NaN".to_string(),
    }
  }
}

impl std::fmt::Display for FieldValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FieldValue::Str(s) => f.write_str(s),
      FieldValue::Int(i) => write!(f, "{}", i),
      FieldValue::Float(v) => write!(f, "{}", v),
      FieldValue::Bool(b) => write!(f, "{}", b),
      FieldValue::Error(e) => f.write_str(&e.message),
    }
  }
}

impl From<&str> for FieldValue {
  fn from(s: &str) -> Self {
    FieldValue::Str(s.to_string())
  }
}

impl From<String> for FieldValue {
  fn from(s: String) -> Self {
    FieldValue::Str(s)
  }
}

impl From<i64> for FieldValue {
  fn from(i: i64) -> Self {
    FieldValue::Int(i)
  }
}

impl From<i32> for FieldValue {
  fn from(i: i32) -> Self {
    FieldValue::Int(i as i64)
  }
}

impl From<u32> for FieldValue {
  fn from(i: u32) -> Self {
    FieldValue::Int(i as i64)
  }
}

impl From<f64> for FieldValue {
  fn from(f: f64) -> Self {
    FieldValue::Float(f)
  }
}

impl From<bool> for FieldValue {
  fn from(b: bool) -> Self {
    FieldValue::Bool(b)
  }
}

impl From<LoggedError> for FieldValue {
  fn from(e: LoggedError) -> Self {
    FieldValue::Error(e)
  }
}

/// An error message together with its captured stack text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoggedError {
  pub message: String,
  pub stack: String,
}

impl LoggedError {
  pub fn new(message: impl Into<String>, stack: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      stack: stack.into(),
    }
  }

  /// Builds an error from a message, capturing the current backtrace as the
  /// stack text.
  pub fn capture(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      stack: Backtrace::force_capture().to_string(),
    }
  }

  /// Wraps any std error, capturing the current backtrace.
  pub fn from_error(err: &dyn std::error::Error) -> Self {
    Self::capture(err.to_string())
  }
}

impl std::fmt::Display for LoggedError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.message)
  }
}

impl std::error::Error for LoggedError {}

/// What an emission method accepts: either plain message text or an error.
///
/// Dispatch is an explicit pattern match; the source of a value decides which
/// variant it is, never an inspection of the value's type at the call site.
#[derive(Debug, Clone, PartialEq)]
pub enum MessageInput {
  /// A format-control string, subject to positional-argument substitution.
  Text(String),
  /// An error whose message becomes the record message and whose stack is
  /// tracked in the `err-stack` field until the next emission.
  Error(LoggedError),
}

impl From<&str> for MessageInput {
  fn from(s: &str) -> Self {
    MessageInput::Text(s.to_string())
  }
}

impl From<String> for MessageInput {
  fn from(s: String) -> Self {
    MessageInput::Text(s)
  }
}

impl From<LoggedError> for MessageInput {
  fn from(e: LoggedError) -> Self {
    MessageInput::Error(e)
  }
}
