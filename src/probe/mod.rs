//! Single-attempt reachability probing via the system `ping` utility.
//!
//! The probe is best-effort: every failure (spawn error, non-zero exit,
//! rejected address) collapses into `false`.

mod runner;

pub use runner::{ProcessOutcome, ProcessRunner, SystemRunner};

use crate::network::{NetworkService, is_wifi_enabled};

/// Public resolver used when no address is given.
pub const DEFAULT_PROBE_ADDRESS: &str = "223.5.5.5";

/// Default per-response timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u32 = 1;

/// Default number of echo requests.
pub const DEFAULT_ATTEMPTS: u32 = 1;

const PING: &str = "ping";

/// Address and bounds of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    /// Host name or literal address to probe.
    pub address: String,
    /// Seconds to wait for each response.
    pub timeout_secs: u32,
    /// Number of echo requests to send.
    pub attempts: u32,
}

impl Default for ProbeTarget {
    fn default() -> Self {
        Self {
            address: DEFAULT_PROBE_ADDRESS.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            attempts: DEFAULT_ATTEMPTS,
        }
    }
}

impl ProbeTarget {
    /// Creates a target for `address` with default bounds.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Self::default()
        }
    }

    /// Sets the per-response timeout.
    #[must_use]
    pub const fn with_timeout_secs(mut self, timeout_secs: u32) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Sets the number of echo requests.
    #[must_use]
    pub const fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Upper bound on the whole run: every attempt waiting its full timeout.
    #[must_use]
    pub fn deadline_secs(&self) -> u64 {
        u64::from(self.attempts) * u64::from(self.timeout_secs)
    }

    /// Returns true if the address can be passed to `ping` safely.
    #[must_use]
    pub fn is_valid_address(&self) -> bool {
        !self.address.is_empty()
            && !self.address.starts_with('-')
            && !self.address.chars().any(char::is_whitespace)
    }
}

/// Builds the `ping` argument list for the current platform.
///
/// The timeout bounds each reply. On unix the whole run is also capped at
/// `attempts * timeout` seconds.
#[must_use]
pub fn ping_args(target: &ProbeTarget) -> Vec<String> {
    #[cfg(windows)]
    let mut args = vec![
        "-n".to_string(),
        target.attempts.to_string(),
        "-w".to_string(),
        (u64::from(target.timeout_secs) * 1000).to_string(),
    ];
    #[cfg(target_os = "macos")]
    let mut args = vec![
        "-c".to_string(),
        target.attempts.to_string(),
        "-W".to_string(),
        (u64::from(target.timeout_secs) * 1000).to_string(),
        "-t".to_string(),
        target.deadline_secs().to_string(),
    ];
    #[cfg(not(any(windows, target_os = "macos")))]
    let mut args = vec![
        "-c".to_string(),
        target.attempts.to_string(),
        "-W".to_string(),
        target.timeout_secs.to_string(),
        "-w".to_string(),
        target.deadline_secs().to_string(),
    ];

    args.push(target.address.clone());
    args
}

/// Runs reachability probes through a [`ProcessRunner`].
///
/// # Example
///
/// ```no_run
/// use netstate::probe::{ProbeTarget, ReachabilityProber};
///
/// let prober = ReachabilityProber::system();
/// let reachable = prober.probe(&ProbeTarget::default());
/// println!("reachable: {reachable}");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReachabilityProber<R = SystemRunner> {
    runner: R,
}

impl ReachabilityProber<SystemRunner> {
    /// Creates a prober that spawns the system `ping`.
    #[must_use]
    pub const fn system() -> Self {
        Self {
            runner: SystemRunner,
        }
    }
}

impl<R: ProcessRunner> ReachabilityProber<R> {
    /// Creates a prober with a custom process runner.
    pub const fn new(runner: R) -> Self {
        Self { runner }
    }

    /// Sends one bounded echo probe and blocks until it finishes.
    ///
    /// Returns true only if `ping` exits successfully.
    pub fn probe(&self, target: &ProbeTarget) -> bool {
        if !target.is_valid_address() {
            tracing::warn!(address = %target.address, "Refusing to probe invalid address");
            return false;
        }

        let args = ping_args(target);
        match self.runner.run(PING, &args) {
            Ok(outcome) => {
                let reachable = outcome.success();
                tracing::debug!(
                    address = %target.address,
                    code = ?outcome.code,
                    reachable,
                    "Probe finished"
                );
                reachable
            }
            Err(e) => {
                tracing::debug!(address = %target.address, "Failed to run ping: {e}");
                false
            }
        }
    }

    /// Returns true if the Wi-Fi radio is on and `target` answers a probe.
    ///
    /// The probe is skipped when the radio is off.
    pub fn is_wifi_available<S: NetworkService + ?Sized>(
        &self,
        service: &S,
        target: &ProbeTarget,
    ) -> bool {
        is_wifi_enabled(service) && self.probe(target)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
