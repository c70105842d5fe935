//! # Backend
//!
//! The severity-leveled sink behind [`StructuredLogger`]. A backend owns a
//! minimum severity threshold and a set of transports; `emit` builds a
//! timestamped JSON record and fans it out to every transport when the record
//! passes the threshold.
//!
//! Transports are best-effort. A write failure never surfaces to the caller;
//! durability, ordering, and backpressure are the destination's problem.
//!
//! [`StructuredLogger`]: crate::logger::StructuredLogger


use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::level::Severity;

/// One emitted log record: message, timestamp, severity, and the full field
/// mapping. Serializes to a flat JSON object with the fields inlined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
  /// RFC 3339 timestamp assigned at emission time.
  pub timestamp: String,
  pub level: Severity,
  pub message: String,
  #[serde(flatten)]
  pub fields: BTreeMap<String, String>,
}

impl LogRecord {
  pub fn to_json(&self) -> String {
    serde_json::to_string(self).unwrap_or_default()
  }
}

/// A destination for emitted records.
///
/// No error returns and no async; a transport that cannot write drops the
/// record.
pub trait Transport: Send + Sync {
  fn write_record(&self, record: &LogRecord);
}

/// Writes each record as a JSON line to stdout.
///
/// Keeps a scratch buffer behind a mutex so each record goes out in a single
/// write call.
pub struct ConsoleTransport {
  buffer: Mutex<String>,
}

impl ConsoleTransport {
  pub fn new() -> Self {
    Self {
      buffer: Mutex::new(String::with_capacity(256)),
    }
  }
}

impl Default for ConsoleTransport {
  fn default() -> Self {
    Self::new()
  }
}

impl Transport for ConsoleTransport {
  fn write_record(&self, record: &LogRecord) {
    if let Ok(mut buf) = self.buffer.lock() {
      buf.clear();
      buf.push_str(&record.to_json());
      buf.push('\n');
      let _ = io::stdout().write_all(buf.as_bytes());
    }
  }
}

/// Appends each record as a JSON line to a file.
pub struct FileTransport {
  file: Mutex<std::fs::File>,
}

impl FileTransport {
  /// Opens (or creates) the file for appending, creating parent directories
  /// as needed.
  pub fn new(path: impl AsRef<Path>) -> io::Result<Self> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
      if !parent.as_os_str().is_empty() {
        std::fs::create_dir_all(parent)?;
      }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Self {
      file: Mutex::new(file),
    })
  }
}

impl Transport for FileTransport {
  fn write_record(&self, record: &LogRecord) {
    if let Ok(mut file) = self.file.lock() {
      let mut line = record.to_json();
      line.push('\n');
      let _ = file.write_all(line.as_bytes());
    }
  }
}

/// Captures records in memory. For tests.
#[derive(Default)]
pub struct MemoryTransport {
  records: Mutex<Vec<LogRecord>>,
}

impl MemoryTransport {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn records(&self) -> Vec<LogRecord> {
    self.records.lock().map(|r| r.clone()).unwrap_or_default()
  }

  pub fn len(&self) -> usize {
    self.records.lock().map(|r| r.len()).unwrap_or(0)
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl Transport for MemoryTransport {
  fn write_record(&self, record: &LogRecord) {
    if let Ok(mut records) = self.records.lock() {
      records.push(record.clone());
    }
  }
}

/// Configuration consumed once, at backend initialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
  /// Base name of the log file transport.
  pub file_basename: String,
  /// Minimum severity; records below it (numerically above) are dropped.
  pub min_level: Severity,
  /// Whether to attach the console transport.
  pub console: bool,
}

impl Default for BackendConfig {
  fn default() -> Self {
    Self {
      file_basename: "local.log".to_string(),
      min_level: Severity::default(),
      console: true,
    }
  }
}

/// The leveled sink shared by every logger instance.
pub struct Backend {
  min_level: Severity,
  transports: Vec<Arc<dyn Transport>>,
}

static SHARED: OnceLock<Arc<Backend>> = OnceLock::new();

impl Backend {
  /// Builds a backend with the configured console and file transports.
  pub fn new(config: &BackendConfig) -> io::Result<Self> {
    let mut transports: Vec<Arc<dyn Transport>> = Vec::new();
    if config.console {
      transports.push(Arc::new(ConsoleTransport::new()));
    }
    transports.push(Arc::new(FileTransport::new(&config.file_basename)?));
    Ok(Self::with_transports(config.min_level, transports))
  }

  /// Builds a backend over explicit transports. The constructor tests use.
  pub fn with_transports(min_level: Severity, transports: Vec<Arc<dyn Transport>>) -> Self {
    Self {
      min_level,
      transports,
    }
  }

  /// The process-wide shared handle, created on first call.
  ///
  /// The first caller's configuration wins; later calls return the existing
  /// handle and ignore their configuration. A backend that fails to open its
  /// file transport falls back to its remaining transports.
  pub fn shared(config: &BackendConfig) -> Arc<Backend> {
    SHARED
      .get_or_init(|| {
        let backend = Self::new(config).unwrap_or_else(|_| {
          let mut transports: Vec<Arc<dyn Transport>> = Vec::new();
          if config.console {
            transports.push(Arc::new(ConsoleTransport::new()));
          }
          Self::with_transports(config.min_level, transports)
        });
        Arc::new(backend)
      })
      .clone()
  }

  pub fn min_level(&self) -> Severity {
    self.min_level
  }

  /// Forwards one record to every transport, if it passes the threshold.
  pub fn emit(&self, level: Severity, message: &str, fields: &[(&str, &str)]) {
    if !level.passes(self.min_level) {
      return;
    }

    let record = LogRecord {
      timestamp: Utc::now().to_rfc3339(),
      level,
      message: message.to_string(),
      fields: fields
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect(),
    };

    for transport in &self.transports {
      transport.write_record(&record);
    }
  }
}
