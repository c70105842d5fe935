//! # fieldlog
//!
//! Structured field-line formatting in front of a severity-leveled logging
//! backend. A [`FieldFormatter`] owns a fixed set of named fields and renders
//! each field's current value through one shared template; a
//! [`StructuredLogger`] specializes it for emission, forwarding every record's
//! message together with the full rendered field mapping to a shared
//! [`Backend`] and its transports.
//!
//! ```rust,ignore
//! use fieldlog::{Backend, BackendConfig, LoggerRegistry};
//!
//! let backend = Backend::shared(&BackendConfig::default());
//! let mut registry = LoggerRegistry::new(backend);
//!
//! let log = registry.install("server", &["host", "pid"])?;
//! log.set_host();
//! log.set_process_id();
//! log.notice("server starting", &[]);
//! ```

pub mod backend;
pub mod connection;
pub mod format;
pub mod formatter;
pub mod level;
pub mod logger;
pub mod registry;
pub mod value;

pub use backend::{Backend, BackendConfig, LogRecord, Transport};
pub use formatter::{FieldFormatter, FormatterError};
pub use level::Severity;
pub use logger::StructuredLogger;
pub use registry::LoggerRegistry;
pub use value::{FieldValue, LoggedError, MessageInput};
