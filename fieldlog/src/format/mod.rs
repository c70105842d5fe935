
use crate::value::FieldValue;

/// Value placeholder in a field template.
pub const VALUE_PLACEHOLDER: &str = "%s";

/// Key-name placeholder in a field template.
pub const KEY_PLACEHOLDER: &str = "%k";

/// A shared per-field format string.
///
/// A template contains at most one value placeholder (`%s`) and at most one
/// key placeholder (`%k`). Rendering substitutes the current value into the
/// value placeholder and, when key printing is enabled, the field's own name
/// into the key placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
  raw: String,
}

impl Template {
  pub fn new(raw: impl Into<String>) -> Self {
    Self { raw: raw.into() }
  }

  /// The template with both placeholders removed.
  ///
  /// This is the rendering every field starts with before a value is set, and
  /// the rendering an unset field returns to.
  pub fn stripped(&self) -> String {
    self
      .raw
      .replacen(VALUE_PLACEHOLDER, "", 1)
      .replacen(KEY_PLACEHOLDER, "", 1)
  }

  /// Substitutes `value` into the value placeholder and, when `key` is given,
  /// the key name into the key placeholder.
  ///
  /// The key is substituted first so that placeholder-like text inside the
  /// value stays literal. Key names are inserted verbatim, unescaped.
  pub fn render(&self, value: &str, key: Option<&str>) -> String {
    let rendered = match key {
      Some(key) => self.raw.replacen(KEY_PLACEHOLDER, key, 1),
      None => self.raw.clone(),
    };
    rendered.replacen(VALUE_PLACEHOLDER, value, 1)
  }

  pub fn as_str(&self) -> &str {
    &self.raw
  }
}

/// Printf-style positional substitution over a control string.
///
/// Recognized specifiers: `%s` (string form), `%d` (number form, `NaN` for
/// non-numeric values), `%j` (JSON form), `%%` (literal percent). Specifiers
/// without a matching argument are left in place; surplus arguments are
/// appended to the result, space-separated.
pub fn format_positional(control: &str, args: &[FieldValue]) -> String {
  let mut out = String::with_capacity(control.len() + 16);
  let mut next = 0;
  let mut chars = control.chars().peekable();

  while let Some(c) = chars.next() {
    if c != '%' {
      out.push(c);
      continue;
    }
    match chars.peek() {
      Some('%') => {
        chars.next();
        out.push('%');
      },
      Some('s') if next < args.len() => {
        chars.next();
        out.push_str(&args[next].to_string());
        next += 1;
      },
      Some('d') if next < args.len() => {
        chars.next();
        out.push_str(&args[next].to_number_string());
        next += 1;
      },
      Some('j') if next < args.len() => {
        chars.next();
        out.push_str(&args[next].to_json().to_string());
        next += 1;
      },
      _ => out.push('%'),
    }
  }

  for arg in &args[next..] {
    out.push(' ');
    out.push_str(&arg.to_string());
  }

  out
}
