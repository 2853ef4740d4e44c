//! Host lookup seam.

use std::io;
use std::net::IpAddr;

/// Trait for blocking host-name resolution.
///
/// Enables dependency injection for testing with mock implementations.
/// Implementations run on the blocking worker pool, never on an async task.
pub trait HostLookup: Send + Sync + 'static {
    /// Resolves `domain` into its addresses, in resolver order.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the name cannot be resolved.
    fn lookup(&self, domain: &str) -> io::Result<Vec<IpAddr>>;
}

/// [`HostLookup`] backed by the system resolver (`getaddrinfo`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLookup;

impl HostLookup for SystemLookup {
    fn lookup(&self, domain: &str) -> io::Result<Vec<IpAddr>> {
        dns_lookup::lookup_host(domain)
    }
}
