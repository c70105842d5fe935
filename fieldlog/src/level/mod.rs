
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// The ten-level severity scale used to classify and filter log records.
///
/// Levels are ordered from the most severe (`Emergency`, code 0) to the least
/// severe (`Silly`, code 9). A numerically *lower* code means a *more* severe
/// record, so the backend emits a record only when its level code is less than
/// or equal to the configured minimum level's code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Severity {
  /// System is unusable
  Emergency = 0,
  /// Action must be taken immediately
  Alert = 1,
  /// Critical conditions
  Critical = 2,
  /// Error conditions
  Error = 3,
  /// Warning conditions
  Warning = 4,
  /// Normal but significant events
  Notice = 5,
  /// General informational messages
  Info = 6,
  /// Debug-level information
  Debug = 7,
  /// Unclassified records
  Default = 8,
  /// Extremely verbose output
  Silly = 9,
}

impl Severity {
  /// Every level in the scale, most severe first.
  pub const SCALE: [Severity; 10] = [
    Severity::Emergency,
    Severity::Alert,
    Severity::Critical,
    Severity::Error,
    Severity::Warning,
    Severity::Notice,
    Severity::Info,
    Severity::Debug,
    Severity::Default,
    Severity::Silly,
  ];

  /// The level's name as it appears in emitted records.
  pub fn as_str(&self) -> &'static str {
    match self {
      Severity::Emergency => "emergency",
      Severity::Alert => "alert",
      Severity::Critical => "critical",
      Severity::Error => "error",
      Severity::Warning => "warning",
      Severity::Notice => "notice",
      Severity::Info => "info",
      Severity::Debug => "debug",
      Severity::Default => "default",
      Severity::Silly => "silly",
    }
  }

  /// The level's numeric code (0 = most severe, 9 = least severe).
  pub fn code(&self) -> u8 {
    *self as u8
  }

  /// True when a record at this level passes a minimum-level threshold.
  #[inline]
  pub fn passes(&self, min: Severity) -> bool {
    self.code() <= min.code()
  }
}

impl std::str::FromStr for Severity {
  type Err = UnknownLevel;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "emergency" => Ok(Severity::Emergency),
      "alert" => Ok(Severity::Alert),
      "critical" => Ok(Severity::Critical),
      "error" => Ok(Severity::Error),
      "warning" => Ok(Severity::Warning),
      "notice" => Ok(Severity::Notice),
      "info" => Ok(Severity::Info),
      "debug" => Ok(Severity::Debug),
      "default" => Ok(Severity::Default),
      "silly" => Ok(Severity::Silly),
      _ => Err(UnknownLevel(s.to_string())),
    }
  }
}

impl std::fmt::Display for Severity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Default for Severity {
  /// The default minimum threshold for a freshly configured backend.
  fn default() -> Self {
    Severity::Notice
  }
}

impl Serialize for Severity {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Severity {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse().map_err(de::Error::custom)
  }
}

/// Returned when parsing a level name that is not part of the scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl std::fmt::Display for UnknownLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "unknown severity level: {:?}", self.0)
  }
}

impl std::error::Error for UnknownLevel {}
