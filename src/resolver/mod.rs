//! Bounded, cancellable domain resolution.
//!
//! Every lookup runs on Tokio's blocking worker pool behind a semaphore, so
//! at most `max_concurrent` lookups are in flight. Callers wait with a
//! timeout; a lookup that outlives it finishes in the background and its
//! result is discarded.

mod lookup;

pub use lookup::{HostLookup, SystemLookup};

use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

/// Default cap on concurrent lookups.
pub const DEFAULT_MAX_CONCURRENT: usize = 4;

/// Default time to wait for a lookup.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Resolves domain names through a [`HostLookup`] on worker threads.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use netstate::resolver::DomainResolver;
///
/// # async fn run() {
/// let resolver = DomainResolver::system();
/// if let Some(addr) = resolver.resolve("example.com", Duration::from_secs(2)).await {
///     println!("{addr}");
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct DomainResolver<L = SystemLookup> {
    lookup: Arc<L>,
    permits: Arc<Semaphore>,
}

impl<L> Clone for DomainResolver<L> {
    fn clone(&self) -> Self {
        Self {
            lookup: Arc::clone(&self.lookup),
            permits: Arc::clone(&self.permits),
        }
    }
}

impl DomainResolver<SystemLookup> {
    /// Creates a resolver using the system resolver and the default cap.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SystemLookup, DEFAULT_MAX_CONCURRENT)
    }
}

impl<L: HostLookup> DomainResolver<L> {
    /// Creates a resolver allowing `max_concurrent` lookups at once.
    ///
    /// A cap of zero is raised to one.
    pub fn new(lookup: L, max_concurrent: usize) -> Self {
        Self {
            lookup: Arc::new(lookup),
            permits: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Permits currently free.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    /// Resolves `domain` to its first address, waiting at most `timeout`.
    ///
    /// Returns `None` for an empty domain, an unknown host, a failed worker
    /// or an expired timeout. Waiting for a free worker counts against the
    /// timeout.
    pub async fn resolve(&self, domain: &str, timeout: Duration) -> Option<IpAddr> {
        self.submit(domain).wait(timeout).await
    }

    /// Schedules a lookup of `domain` and returns a handle to its result.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&self, domain: &str) -> LookupTask {
        let domain = domain.trim().to_string();
        let cancelled = Arc::new(AtomicBool::new(false));

        if domain.is_empty() {
            tracing::debug!("Skipping lookup of empty domain");
            return LookupTask {
                domain,
                cancelled,
                handle: None,
            };
        }

        let handle = tokio::spawn(run_lookup(
            Arc::clone(&self.lookup),
            Arc::clone(&self.permits),
            domain.clone(),
            Arc::clone(&cancelled),
        ));

        LookupTask {
            domain,
            cancelled,
            handle: Some(handle),
        }
    }
}

/// Acquires a worker permit, then runs the blocking lookup.
///
/// The permit moves into the blocking closure so it is held until the
/// lookup returns, even after the caller has given up waiting.
async fn run_lookup<L: HostLookup>(
    lookup: Arc<L>,
    permits: Arc<Semaphore>,
    domain: String,
    cancelled: Arc<AtomicBool>,
) -> Option<IpAddr> {
    let permit = permits.acquire_owned().await.ok()?;
    if cancelled.load(Ordering::Acquire) {
        tracing::debug!(%domain, "Lookup cancelled before start");
        return None;
    }

    let worker = tokio::task::spawn_blocking(move || {
        let _permit = permit;
        if cancelled.load(Ordering::Acquire) {
            tracing::debug!(%domain, "Lookup cancelled before start");
            return None;
        }

        match lookup.lookup(&domain) {
            Ok(addrs) => {
                let first = addrs.first().copied();
                if first.is_none() {
                    tracing::debug!(%domain, "Lookup returned no addresses");
                }
                first
            }
            Err(e) => {
                tracing::debug!(%domain, "Lookup failed: {e}");
                None
            }
        }
    });

    match worker.await {
        Ok(addr) => addr,
        Err(e) => {
            tracing::debug!("Lookup worker failed: {e}");
            None
        }
    }
}

/// Handle to one scheduled lookup.
///
/// Dropping the handle does not stop the lookup.
#[derive(Debug)]
pub struct LookupTask {
    domain: String,
    cancelled: Arc<AtomicBool>,
    handle: Option<JoinHandle<Option<IpAddr>>>,
}

impl LookupTask {
    /// Domain being resolved, trimmed.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Prevents the lookup from running if it has not started yet.
    ///
    /// A lookup already running on a worker is left to finish; its result
    /// is discarded.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true if [`cancel`](Self::cancel) was called or a wait timed out.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Waits up to `timeout` for the first resolved address.
    ///
    /// On timeout the lookup is cancelled and `None` is returned.
    pub async fn wait(self, timeout: Duration) -> Option<IpAddr> {
        let handle = self.handle?;

        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(addr)) => addr,
            Ok(Err(e)) => {
                tracing::debug!(domain = %self.domain, "Lookup task failed: {e}");
                None
            }
            Err(_) => {
                self.cancelled.store(true, Ordering::Release);
                tracing::debug!(domain = %self.domain, ?timeout, "Lookup timed out");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
