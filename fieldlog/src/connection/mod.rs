
use std::net::TcpStream;

/// Both ends of a connection, as the socket field setters record them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
  pub remote_addr: String,
  pub remote_port: u16,
  pub local_addr: String,
  pub local_port: u16,
}

impl Endpoints {
  /// The `remote:local` port pair for the `port` field.
  pub fn port_pair(&self) -> String {
    format!("{}:{}", self.remote_port, self.local_port)
  }

  /// The `remote:local` address pair for the `ip-address` field.
  pub fn address_pair(&self) -> String {
    format!("{}:{}", self.remote_addr, self.local_addr)
  }
}

/// A value the formatter may treat as a connection.
///
/// Returning `None` makes the socket setters a no-op, not an error; a value
/// that cannot name both of its endpoints is simply not a connection.
pub trait Connection {
  fn endpoints(&self) -> Option<Endpoints>;
}

impl Connection for Endpoints {
  fn endpoints(&self) -> Option<Endpoints> {
    Some(self.clone())
  }
}

impl Connection for TcpStream {
  fn endpoints(&self) -> Option<Endpoints> {
    let remote = self.peer_addr().ok()?;
    let local = self.local_addr().ok()?;
    Some(Endpoints {
      remote_addr: remote.ip().to_string(),
      remote_port: remote.port(),
      local_addr: local.ip().to_string(),
      local_port: local.port(),
    })
  }
}
