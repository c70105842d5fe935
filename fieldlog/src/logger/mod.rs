//! # StructuredLogger
//!
//! A [`FieldFormatter`] specialized for log emission: template `"%s"`, empty
//! separator, no key printing, so every field renders to exactly its own
//! string value. Each emission method formats the message (coercing error
//! inputs through the err-stack path), forwards the message and the full
//! rendered field mapping to the backend, then clears any pending error
//! stack.
//!
//! The logger derefs to its formatter, so field mutation is done directly on
//! the logger instance:
//!
//! ```rust,ignore
//! let mut log = StructuredLogger::with_backend(&["host", "pid"], backend)?;
//! log.set_host();
//! log.set_process_id();
//! log.info("listening on %s", &[FieldValue::from("0.0.0.0:8080")]);
//! ```


use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::backend::{Backend, BackendConfig};
use crate::formatter::{FieldFormatter, FormatterError};
use crate::level::Severity;
use crate::value::{FieldValue, MessageInput};

/// Severity-leveled emission over a fixed field set.
pub struct StructuredLogger {
  formatter: FieldFormatter,
  backend: Arc<Backend>,
}

impl StructuredLogger {
  /// Creates a logger bound to the process-wide shared backend, initializing
  /// it with the default configuration if no caller has done so yet.
  pub fn new(field_names: &[&str]) -> Result<Self, FormatterError> {
    Self::with_backend(field_names, Backend::shared(&BackendConfig::default()))
  }

  /// Creates a logger bound to an explicit backend handle.
  pub fn with_backend(field_names: &[&str], backend: Arc<Backend>) -> Result<Self, FormatterError> {
    let formatter = FieldFormatter::new("%s", field_names, "", false)?;
    Ok(Self { formatter, backend })
  }

  pub fn backend(&self) -> &Arc<Backend> {
    &self.backend
  }

  fn log(&mut self, level: Severity, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    let message = self.formatter.format_error_or_message(msg.into(), args);
    self.backend.emit(level, &message, &self.formatter.rendered_fields());
    self.formatter.clear_error_stack();
  }

  // Emission methods, one per severity level. The sequence is identical;
  // only the level varies.

  pub fn emergency(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Emergency, msg, args);
  }

  pub fn alert(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Alert, msg, args);
  }

  pub fn critical(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Critical, msg, args);
  }

  pub fn error(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Error, msg, args);
  }

  pub fn warning(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Warning, msg, args);
  }

  pub fn notice(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Notice, msg, args);
  }

  pub fn info(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Info, msg, args);
  }

  pub fn debug(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Debug, msg, args);
  }

  /// Emission at the `default` level. Named to stay clear of
  /// `Default::default`.
  pub fn default_level(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Default, msg, args);
  }

  pub fn silly(&mut self, msg: impl Into<MessageInput>, args: &[FieldValue]) {
    self.log(Severity::Silly, msg, args);
  }
}

impl Deref for StructuredLogger {
  type Target = FieldFormatter;

  fn deref(&self) -> &Self::Target {
    &self.formatter
  }
}

impl DerefMut for StructuredLogger {
  fn deref_mut(&mut self) -> &mut Self::Target {
    &mut self.formatter
  }
}

impl Clone for StructuredLogger {
  /// Another logger on the same backend handle, raw field values replayed.
  fn clone(&self) -> Self {
    Self {
      formatter: self.formatter.clone(),
      backend: self.backend.clone(),
    }
  }
}
