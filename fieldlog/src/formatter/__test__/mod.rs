#[cfg(test)]
mod __test__ {

  use crate::connection::Endpoints;
  use crate::formatter::{FieldFormatter, FormatterError, ERR_STACK_FIELD};
  use crate::value::{FieldValue, LoggedError, MessageInput};

  fn bracket_formatter() -> FieldFormatter {
    FieldFormatter::new("[%s]", &["a", "b"], "-", false).unwrap()
  }

  #[test]
  fn test_newline_separator_rejected() {
    let result = FieldFormatter::new("%s", &["a"], "\n", false);
    assert_eq!(result.unwrap_err(), FormatterError::NewlineSeparator);

    let result = FieldFormatter::new("%s", &["a"], " \n ", false);
    assert_eq!(result.unwrap_err(), FormatterError::NewlineSeparator);
  }

  #[test]
  fn test_empty_field_set_rejected() {
    let result = FieldFormatter::new("%s", &[], "-", false);
    assert_eq!(result.unwrap_err(), FormatterError::EmptyFieldSet);
  }

  #[test]
  fn test_initial_rendering_is_stripped_template() {
    let f = FieldFormatter::new("<%k:%s>", &["a", "b"], "", false).unwrap();
    assert_eq!(f.rendered_value("a"), Some("<:>"));
    assert_eq!(f.rendered_value("b"), Some("<:>"));
    assert_eq!(f.raw_value("a"), None);
  }

  #[test]
  fn test_duplicate_names_collapse() {
    let f = FieldFormatter::new("%s", &["a", "b", "a"], "-", false).unwrap();
    assert_eq!(f.field_names(), &["a", "b"]);
  }

  #[test]
  fn test_set_value_renders_and_keeps_raw() {
    let mut f = bracket_formatter();
    f.set_value("a", 7);
    assert_eq!(f.rendered_value("a"), Some("[7]"));
    assert_eq!(f.raw_value("a"), Some(&FieldValue::Int(7)));
  }

  #[test]
  fn test_key_substituted_only_when_enabled() {
    let mut with_key = FieldFormatter::new("%k=%s", &["user"], " ", true).unwrap();
    with_key.set_value("user", "ada");
    assert_eq!(with_key.rendered_value("user"), Some("user=ada"));

    let mut without_key = FieldFormatter::new("%k=%s", &["user"], " ", false).unwrap();
    without_key.set_value("user", "ada");
    assert_eq!(without_key.rendered_value("user"), Some("%k=ada"));
  }

  #[test]
  fn test_unknown_field_operations_are_noops() {
    let mut f = bracket_formatter();
    f.set_value("a", "x");

    f.set_value("ghost", "y");
    f.unset_value("ghost");
    f.clear_fields(&["ghost"]);

    assert_eq!(f.field_names(), &["a", "b"]);
    assert_eq!(f.rendered_value("a"), Some("[x]"));
    assert_eq!(f.rendered_value("ghost"), None);
    assert_eq!(f.raw_value("ghost"), None);
  }

  #[test]
  fn test_unset_renders_empty_value() {
    let mut f = bracket_formatter();
    f.set_value("a", "x");
    f.unset_value("a");
    assert_eq!(f.rendered_value("a"), Some("[]"));
    assert_eq!(f.raw_value("a"), Some(&FieldValue::Str(String::new())));
  }

  #[test]
  fn test_unset_values_checks_own_field_set() {
    let mut f = bracket_formatter();
    f.set_value("a", "x");
    f.set_value("b", "y");
    f.unset_values(&["a", "missing"]);
    assert_eq!(f.rendered_value("a"), Some("[]"));
    assert_eq!(f.rendered_value("b"), Some("[y]"));
    assert_eq!(f.field_names(), &["a", "b"]);
  }

  #[test]
  fn test_render_line_in_field_order() {
    let mut f = bracket_formatter();
    f.set_value("a", "x");
    f.set_value("b", "y");
    assert_eq!(f.render_line(), "[x]-[y]");
  }

  #[test]
  fn test_ensure_field_appends_once() {
    let mut f = bracket_formatter();
    f.ensure_field("c");
    f.ensure_field("c");
    assert_eq!(f.field_names(), &["a", "b", "c"]);
    assert_eq!(f.rendered_value("c"), Some("[]"));
  }

  #[test]
  fn test_host_and_pid_fields() {
    let mut f = bracket_formatter();
    f.set_host();
    f.set_process_id();

    assert_eq!(f.field_names(), &["a", "b", "host", "pid"]);
    let pid = f.rendered_value("pid").unwrap();
    assert_eq!(pid, format!("[{}]", std::process::id()));
    assert_ne!(f.rendered_value("host"), Some("[]"));
  }

  #[test]
  fn test_socket_fields_from_endpoints() {
    let mut f = FieldFormatter::new("%s", &["a"], "", false).unwrap();
    let conn = Endpoints {
      remote_addr: "10.0.0.2".to_string(),
      remote_port: 443,
      local_addr: "127.0.0.1".to_string(),
      local_port: 8080,
    };
    f.set_socket_port(&conn);
    f.set_socket_address(&conn);

    assert_eq!(f.rendered_value("port"), Some("443:8080"));
    assert_eq!(f.rendered_value("ip-address"), Some("10.0.0.2:127.0.0.1"));
  }

  #[test]
  fn test_error_populates_err_stack_until_cleared() {
    let mut f = FieldFormatter::new("%s", &["a"], "", false).unwrap();
    let err = LoggedError::new("db down: %s", "trace line");

    let message = f.set_error_value(&err.clone().into(), &[FieldValue::from("retrying")]);
    assert_eq!(message, Some("db down: retrying".to_string()));
    assert!(f.has_pending_stack());
    assert_eq!(f.rendered_value(ERR_STACK_FIELD), Some("trace line"));

    f.clear_error_stack();
    assert!(!f.has_pending_stack());
    assert_eq!(f.rendered_value(ERR_STACK_FIELD), Some(""));
    // Field stays tracked after clearing
    assert!(f.field_names().contains(&ERR_STACK_FIELD.to_string()));
  }

  #[test]
  fn test_clear_error_stack_without_pending_is_noop() {
    let mut f = bracket_formatter();
    f.set_value("a", "x");
    f.clear_error_stack();
    assert_eq!(f.rendered_value("a"), Some("[x]"));
  }

  #[test]
  fn test_text_input_is_not_an_error() {
    let mut f = FieldFormatter::new("%s", &["a"], "", false).unwrap();
    let result = f.set_error_value(&MessageInput::from("plain"), &[]);
    assert_eq!(result, None);
    assert!(!f.has_pending_stack());
    assert_eq!(f.rendered_value(ERR_STACK_FIELD), None);
  }

  #[test]
  fn test_format_error_or_message_fallback() {
    let mut f = FieldFormatter::new("%s", &["a"], "", false).unwrap();

    let text = f.format_error_or_message("count: %d".into(), &[FieldValue::from(3)]);
    assert_eq!(text, "count: 3");

    let err = LoggedError::new("broken", "trace");
    let msg = f.format_error_or_message(err.into(), &[]);
    assert_eq!(msg, "broken");
    assert!(f.has_pending_stack());
  }

  #[test]
  fn test_clone_renders_identically() {
    let mut f = FieldFormatter::new("<%k:%s>", &["a", "b"], "|", true).unwrap();
    f.set_value("a", 1);

    let copy = f.clone();
    assert_eq!(copy.rendered_value("a"), f.rendered_value("a"));
    assert_eq!(copy.rendered_value("b"), f.rendered_value("b"));
    assert_eq!(copy.raw_value("a"), f.raw_value("a"));
    assert_eq!(copy.render_line(), f.render_line());
  }

  #[test]
  fn test_clone_is_independent() {
    let mut f = bracket_formatter();
    f.set_value("a", "x");

    let mut copy = f.clone();
    copy.set_value("a", "changed");
    copy.ensure_field("extra");

    assert_eq!(f.rendered_value("a"), Some("[x]"));
    assert_eq!(f.raw_value("a"), Some(&FieldValue::Str("x".to_string())));
    assert_eq!(f.field_names(), &["a", "b"]);
  }

  #[test]
  fn test_clear_fields_empties_but_keeps_tracked() {
    let mut f = bracket_formatter();
    f.set_value("a", "x");
    f.set_value("b", "y");
    f.clear_fields(&["a"]);

    assert_eq!(f.rendered_value("a"), Some(""));
    assert_eq!(f.raw_value("a"), Some(&FieldValue::Str(String::new())));
    assert_eq!(f.rendered_value("b"), Some("[y]"));
    assert_eq!(f.field_names(), &["a", "b"]);
  }
}
