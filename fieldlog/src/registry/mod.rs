
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::backend::Backend;
use crate::formatter::FormatterError;
use crate::logger::StructuredLogger;

/// Named logger instances, owned by the application entry point.
///
/// Installation is idempotent: the first `install` for a name wins, and later
/// calls (with any field set) leave the existing logger untouched. The
/// registry replaces ambient global lookup; code that needs a named logger is
/// handed the registry, or the logger itself, explicitly.
pub struct LoggerRegistry {
  backend: Arc<Backend>,
  loggers: HashMap<String, StructuredLogger>,
}

impl LoggerRegistry {
  pub fn new(backend: Arc<Backend>) -> Self {
    Self {
      backend,
      loggers: HashMap::new(),
    }
  }

  /// Installs a logger under `name` unless one is already installed.
  ///
  /// Returns the logger bound to `name`, which on a repeat call is the
  /// original instance with its original field set.
  pub fn install(
    &mut self,
    name: &str,
    field_names: &[&str],
  ) -> Result<&mut StructuredLogger, FormatterError> {
    match self.loggers.entry(name.to_string()) {
      Entry::Occupied(entry) => Ok(entry.into_mut()),
      Entry::Vacant(entry) => {
        let logger = StructuredLogger::with_backend(field_names, self.backend.clone())?;
        Ok(entry.insert(logger))
      },
    }
  }

  pub fn get(&self, name: &str) -> Option<&StructuredLogger> {
    self.loggers.get(name)
  }

  pub fn get_mut(&mut self, name: &str) -> Option<&mut StructuredLogger> {
    self.loggers.get_mut(name)
  }

  pub fn contains(&self, name: &str) -> bool {
    self.loggers.contains_key(name)
  }
}
