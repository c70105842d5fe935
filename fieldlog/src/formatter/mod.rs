//! # FieldFormatter
//!
//! The field-formatting engine. A formatter owns a fixed, ordered set of named
//! fields and renders each field's current value through one shared
//! [`Template`]. Every field keeps two representations:
//!
//! - **raw**: the last [`FieldValue`] the caller supplied, stored verbatim so
//!   a clone can replay it and re-render from scratch
//! - **rendered**: the template with the value (and optionally the field name)
//!   substituted in
//!
//! The two maps always track exactly the same key set as the field-name list.
//! The set is fixed at construction; it grows only through
//! [`FieldFormatter::ensure_field`], which the host/process/socket/error
//! setters call before writing their well-known fields.
//!
//! Operations on field names that are not tracked are silent no-ops. Callers
//! holding stale field references are tolerated, not punished.

mod __test__;

use std::collections::HashMap;

use smallvec::SmallVec;

use crate::connection::Connection;
use crate::format::{format_positional, Template};
use crate::value::{FieldValue, LoggedError, MessageInput};

/// Well-known field populated by [`FieldFormatter::set_host`].
pub const HOST_FIELD: &str = "host";
/// Well-known field populated by [`FieldFormatter::set_process_id`].
pub const PID_FIELD: &str = "pid";
/// Well-known field populated by [`FieldFormatter::set_socket_port`].
pub const PORT_FIELD: &str = "port";
/// Well-known field populated by [`FieldFormatter::set_socket_address`].
pub const ADDRESS_FIELD: &str = "ip-address";
/// Well-known field populated by the error path; cleared after each emission.
pub const ERR_STACK_FIELD: &str = "err-stack";

/// Construction failures. The only fallible path a formatter exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatterError {
  /// The separator would split a rendered line across output lines.
  NewlineSeparator,
  /// The field-name collection was empty.
  EmptyFieldSet,
}

impl std::fmt::Display for FormatterError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FormatterError::NewlineSeparator => {
        write!(f, "field separator must not contain a newline")
      },
      FormatterError::EmptyFieldSet => {
        write!(f, "field set must be a non-empty collection of field names")
      },
    }
  }
}

impl std::error::Error for FormatterError {}

/// Renders a fixed set of named fields through a shared template.
#[derive(Debug)]
pub struct FieldFormatter {
  template: Template,
  field_names: SmallVec<[String; 8]>,
  separator: String,
  print_key: bool,
  /// Last raw value per field; `None` until the field is first set.
  raw_values: HashMap<String, Option<FieldValue>>,
  rendered: HashMap<String, String>,
  pending_stack: bool,
}

impl FieldFormatter {
  /// Creates a formatter over `field_names`.
  ///
  /// Fails when `separator` contains a newline or `field_names` is empty.
  /// Duplicate names collapse; the first occurrence keeps its position. Every
  /// field starts rendered as the template with both placeholders stripped.
  pub fn new(
    template: impl Into<String>,
    field_names: &[&str],
    separator: impl Into<String>,
    print_key: bool,
  ) -> Result<Self, FormatterError> {
    let separator = separator.into();
    if separator.contains('\n') {
      return Err(FormatterError::NewlineSeparator);
    }
    if field_names.is_empty() {
      return Err(FormatterError::EmptyFieldSet);
    }

    let template = Template::new(template);
    let unset = template.stripped();

    let mut names: SmallVec<[String; 8]> = SmallVec::new();
    let mut raw_values = HashMap::new();
    let mut rendered = HashMap::new();
    for name in field_names {
      if !rendered.contains_key(*name) {
        names.push(name.to_string());
        raw_values.insert(name.to_string(), None);
        rendered.insert(name.to_string(), unset.clone());
      }
    }

    Ok(Self {
      template,
      field_names: names,
      separator,
      print_key,
      raw_values,
      rendered,
      pending_stack: false,
    })
  }

  pub fn template(&self) -> &Template {
    &self.template
  }

  pub fn separator(&self) -> &str {
    &self.separator
  }

  pub fn print_key(&self) -> bool {
    self.print_key
  }

  /// Tracked field names, in rendering order.
  pub fn field_names(&self) -> &[String] {
    &self.field_names
  }

  /// The current rendered string for a tracked field.
  pub fn rendered_value(&self, name: &str) -> Option<&str> {
    self.rendered.get(name).map(String::as_str)
  }

  /// The last raw value set for a tracked field, if it was ever set.
  pub fn raw_value(&self, name: &str) -> Option<&FieldValue> {
    self.raw_values.get(name).and_then(Option::as_ref)
  }

  /// True while a coerced error's stack is waiting to be cleared by the next
  /// emission.
  pub fn has_pending_stack(&self) -> bool {
    self.pending_stack
  }

  /// Stores `value` verbatim and re-renders the field through the template.
  ///
  /// The field's name is substituted into the key placeholder only when key
  /// printing was enabled at construction. Unknown names are ignored.
  pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) {
    if let Some(slot) = self.rendered.get_mut(name) {
      let value = value.into();
      let key = if self.print_key { Some(name) } else { None };
      *slot = self.template.render(&value.to_string(), key);
      self.raw_values.insert(name.to_string(), Some(value));
    }
  }

  /// Renders the field as if the empty string had been set. Unknown names are
  /// ignored.
  pub fn unset_value(&mut self, name: &str) {
    if self.rendered.contains_key(name) {
      self.set_value(name, "");
    }
  }

  /// Applies [`FieldFormatter::unset_value`] to each given name, validated
  /// against this formatter's own field set.
  pub fn unset_values(&mut self, names: &[&str]) {
    for name in names {
      self.unset_value(name);
    }
  }

  /// Adds `name` to the tracked set if absent.
  ///
  /// The single sanctioned growth path for the field set. A new field starts
  /// with no raw value and the stripped-template rendering, exactly like a
  /// field named at construction.
  pub fn ensure_field(&mut self, name: &str) {
    if !self.rendered.contains_key(name) {
      self.field_names.push(name.to_string());
      self.raw_values.insert(name.to_string(), None);
      self.rendered.insert(name.to_string(), self.template.stripped());
    }
  }

  /// Tracks and populates the `host` field with this machine's hostname.
  pub fn set_host(&mut self) {
    self.ensure_field(HOST_FIELD);
    let hostname = gethostname::gethostname().to_string_lossy().into_owned();
    self.set_value(HOST_FIELD, hostname);
  }

  /// Tracks and populates the `pid` field with the current process id.
  pub fn set_process_id(&mut self) {
    self.ensure_field(PID_FIELD);
    self.set_value(PID_FIELD, std::process::id());
  }

  /// Tracks and populates the `port` field as a `remote:local` pair.
  ///
  /// A value that cannot name its endpoints leaves the formatter untouched.
  pub fn set_socket_port(&mut self, conn: &impl Connection) {
    if let Some(endpoints) = conn.endpoints() {
      self.ensure_field(PORT_FIELD);
      self.set_value(PORT_FIELD, endpoints.port_pair());
    }
  }

  /// Tracks and populates the `ip-address` field as a `remote:local` pair.
  pub fn set_socket_address(&mut self, conn: &impl Connection) {
    if let Some(endpoints) = conn.endpoints() {
      self.ensure_field(ADDRESS_FIELD);
      self.set_value(ADDRESS_FIELD, endpoints.address_pair());
    }
  }

  /// Coerces an error-variant input into a message, tracking its stack.
  ///
  /// On [`MessageInput::Error`]: marks the stack as pending, tracks and
  /// populates `err-stack` with the stack text, and returns the error's own
  /// message with `args` positionally substituted. On [`MessageInput::Text`]:
  /// returns `None`, the "not an error" sentinel.
  pub fn set_error_value(&mut self, input: &MessageInput, args: &[FieldValue]) -> Option<String> {
    match input {
      MessageInput::Error(err) => Some(self.apply_error(err, args)),
      MessageInput::Text(_) => None,
    }
  }

  /// Message formatting for emission: error inputs go through the error path,
  /// text inputs are treated as a format-control string.
  pub fn format_error_or_message(&mut self, input: MessageInput, args: &[FieldValue]) -> String {
    match input {
      MessageInput::Error(err) => self.apply_error(&err, args),
      MessageInput::Text(control) => format_positional(&control, args),
    }
  }

  fn apply_error(&mut self, err: &LoggedError, args: &[FieldValue]) -> String {
    self.pending_stack = true;
    self.ensure_field(ERR_STACK_FIELD);
    self.set_value(ERR_STACK_FIELD, err.stack.clone());
    format_positional(&err.message, args)
  }

  /// Resets raw and rendered values to the empty string for each tracked name
  /// given. The fields stay tracked. Unknown names are ignored.
  pub fn clear_fields(&mut self, names: &[&str]) {
    for name in names {
      if let Some(slot) = self.rendered.get_mut(*name) {
        slot.clear();
        self.raw_values.insert(name.to_string(), Some(FieldValue::Str(String::new())));
      }
    }
  }

  /// Clears the `err-stack` field once the pending error stack has been
  /// emitted. No-op when nothing is pending.
  pub fn clear_error_stack(&mut self) {
    if self.pending_stack {
      self.clear_fields(&[ERR_STACK_FIELD]);
      self.pending_stack = false;
    }
  }

  /// All rendered fields in rendering order, ready to hand to a backend.
  pub fn rendered_fields(&self) -> Vec<(&str, &str)> {
    self
      .field_names
      .iter()
      .map(|name| (name.as_str(), self.rendered[name].as_str()))
      .collect()
  }

  /// Concatenates every rendered field in field order, joined by the
  /// separator.
  pub fn render_line(&self) -> String {
    let mut line = String::new();
    for (i, name) in self.field_names.iter().enumerate() {
      if i > 0 {
        line.push_str(&self.separator);
      }
      line.push_str(&self.rendered[name]);
    }
    line
  }
}

impl Clone for FieldFormatter {
  /// Clones by replaying raw values, not by copying rendered strings.
  ///
  /// Fields that were never set stay in their initial stripped-template
  /// rendering. The pending-stack flag is not carried over; a pending stack
  /// belongs to the emission that will clear it on the original.
  fn clone(&self) -> Self {
    let unset = self.template.stripped();
    let mut raw_values = HashMap::new();
    let mut rendered = HashMap::new();
    for name in &self.field_names {
      raw_values.insert(name.clone(), None);
      rendered.insert(name.clone(), unset.clone());
    }

    let mut copy = Self {
      template: self.template.clone(),
      field_names: self.field_names.clone(),
      separator: self.separator.clone(),
      print_key: self.print_key,
      raw_values,
      rendered,
      pending_stack: false,
    };

    for name in &self.field_names {
      if let Some(Some(value)) = self.raw_values.get(name) {
        copy.set_value(name, value.clone());
      }
    }
    copy
  }
}
