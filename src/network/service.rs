//! Platform network service traits and error types.

use std::io;

use thiserror::Error;

use super::{NetworkClass, NetworkSnapshot, SnapshotError, classify};

/// Error type for platform network service operations.
///
/// Describes what went wrong without dictating recovery strategy.
/// The query helpers in this crate recover from every variant locally.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Reading or writing platform state failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Permission denied to query or change network state.
    #[error("Permission denied: {context}")]
    PermissionDenied {
        /// Additional context about what permission was denied.
        context: String,
    },

    /// The platform reported contradictory connection state.
    #[error("Invalid snapshot: {0}")]
    Snapshot(#[from] SnapshotError),

    /// The capability does not exist on this platform.
    #[error("Unsupported on this platform: {capability}")]
    Unsupported {
        /// Name of the missing capability.
        capability: &'static str,
    },

    /// Platform-specific error with a generic message.
    #[error("Platform error: {message}")]
    Platform {
        /// Error message describing the platform-specific failure.
        message: String,
    },
}

impl ServiceError {
    /// Creates an `Unsupported` error for the named capability.
    #[must_use]
    pub const fn unsupported(capability: &'static str) -> Self {
        Self::Unsupported { capability }
    }

    /// Returns true if the capability is missing rather than failing.
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}

/// Access to the platform's connectivity and Wi-Fi services.
///
/// # Design
///
/// - Every call reads live state; implementations must not cache snapshots
/// - Enables dependency injection for testing with mock implementations
/// - Platform-specific implementations provided in [`super::platform`]
pub trait NetworkService: Send + Sync {
    /// Reads the current active connection.
    ///
    /// Returns [`NetworkSnapshot::disconnected`] when there is no active
    /// connection.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the platform state cannot be read.
    fn active_snapshot(&self) -> Result<NetworkSnapshot, ServiceError>;

    /// Returns true if the Wi-Fi radio is switched on.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the radio state cannot be read.
    fn is_wifi_radio_enabled(&self) -> Result<bool, ServiceError>;

    /// Switches the Wi-Fi radio on or off.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the radio state cannot be changed.
    fn set_wifi_radio_enabled(&self, enabled: bool) -> Result<(), ServiceError>;

    /// Hardware address reported by the Wi-Fi connection, if any.
    ///
    /// May return the privacy placeholder on platforms that withhold it.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] when the Wi-Fi service cannot be queried.
    fn connection_mac(&self) -> Result<Option<String>, ServiceError>;
}

impl<S: NetworkService + ?Sized> NetworkService for &S {
    fn active_snapshot(&self) -> Result<NetworkSnapshot, ServiceError> {
        (**self).active_snapshot()
    }

    fn is_wifi_radio_enabled(&self) -> Result<bool, ServiceError> {
        (**self).is_wifi_radio_enabled()
    }

    fn set_wifi_radio_enabled(&self, enabled: bool) -> Result<(), ServiceError> {
        (**self).set_wifi_radio_enabled(enabled)
    }

    fn connection_mac(&self) -> Result<Option<String>, ServiceError> {
        (**self).connection_mac()
    }
}

/// Optional cellular capabilities.
///
/// Platforms without a cellular stack answer every call with
/// [`ServiceError::Unsupported`] instead of a silent default.
pub trait MobileDataControl: Send + Sync {
    /// Returns true if mobile data is switched on.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unsupported`] where no cellular stack exists.
    fn mobile_data_enabled(&self) -> Result<bool, ServiceError>;

    /// Name of the carrier currently serving the device.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Unsupported`] where no cellular stack exists.
    fn network_operator_name(&self) -> Result<Option<String>, ServiceError>;
}

/// Reads the active snapshot, treating failures as "no connection".
pub fn current_snapshot<S: NetworkService + ?Sized>(service: &S) -> NetworkSnapshot {
    service.active_snapshot().unwrap_or_else(|e| {
        tracing::debug!("Failed to read active connection: {e}");
        NetworkSnapshot::disconnected()
    })
}

/// Classifies the live active connection.
pub fn current_class<S: NetworkService + ?Sized>(service: &S) -> NetworkClass {
    classify(&current_snapshot(service))
}

/// Returns true if the Wi-Fi radio is on, treating failures as off.
pub fn is_wifi_enabled<S: NetworkService + ?Sized>(service: &S) -> bool {
    service.is_wifi_radio_enabled().unwrap_or_else(|e| {
        tracing::debug!("Failed to read Wi-Fi radio state: {e}");
        false
    })
}

/// Switches the Wi-Fi radio to `enabled` if it is not already there.
///
/// Returns true if the radio state was changed.
///
/// # Errors
///
/// Returns [`ServiceError`] when the radio state cannot be read or changed.
pub fn set_wifi_enabled<S: NetworkService + ?Sized>(
    service: &S,
    enabled: bool,
) -> Result<bool, ServiceError> {
    if service.is_wifi_radio_enabled()? == enabled {
        return Ok(false);
    }

    service.set_wifi_radio_enabled(enabled)?;
    tracing::info!(enabled, "Wi-Fi radio state changed");
    Ok(true)
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scriptable [`NetworkService`] shared by tests across the crate.

    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::{NetworkService, ServiceError};
    use crate::network::NetworkSnapshot;

    /// Mock service returning fixed answers and counting reads.
    pub struct MockService {
        pub snapshot: Option<NetworkSnapshot>,
        pub connection_mac: Option<String>,
        pub wifi_enabled: Mutex<Option<bool>>,
        pub snapshot_reads: AtomicUsize,
        pub set_calls: Mutex<Vec<bool>>,
    }

    impl MockService {
        pub fn new(snapshot: NetworkSnapshot) -> Self {
            Self {
                snapshot: Some(snapshot),
                connection_mac: None,
                wifi_enabled: Mutex::new(Some(true)),
                snapshot_reads: AtomicUsize::new(0),
                set_calls: Mutex::new(Vec::new()),
            }
        }

        /// A service whose every call fails.
        pub fn failing() -> Self {
            Self {
                snapshot: None,
                connection_mac: None,
                wifi_enabled: Mutex::new(None),
                snapshot_reads: AtomicUsize::new(0),
                set_calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_connection_mac(mut self, mac: &str) -> Self {
            self.connection_mac = Some(mac.to_string());
            self
        }

        pub fn with_wifi_enabled(self, enabled: bool) -> Self {
            *self.wifi_enabled.lock().unwrap() = Some(enabled);
            self
        }

        fn failure() -> ServiceError {
            ServiceError::Platform {
                message: "mock failure".to_string(),
            }
        }
    }

    impl NetworkService for MockService {
        fn active_snapshot(&self) -> Result<NetworkSnapshot, ServiceError> {
            self.snapshot_reads.fetch_add(1, Ordering::SeqCst);
            self.snapshot.clone().ok_or_else(Self::failure)
        }

        fn is_wifi_radio_enabled(&self) -> Result<bool, ServiceError> {
            self.wifi_enabled.lock().unwrap().ok_or_else(Self::failure)
        }

        fn set_wifi_radio_enabled(&self, enabled: bool) -> Result<(), ServiceError> {
            self.set_calls.lock().unwrap().push(enabled);
            let mut state = self.wifi_enabled.lock().unwrap();
            if state.is_none() {
                return Err(Self::failure());
            }
            *state = Some(enabled);
            Ok(())
        }

        fn connection_mac(&self) -> Result<Option<String>, ServiceError> {
            if self.snapshot.is_none() {
                return Err(Self::failure());
            }
            Ok(self.connection_mac.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockService;
    use super::*;
    use crate::network::TransportType;
    use std::sync::atomic::Ordering;

    fn wifi_snapshot() -> NetworkSnapshot {
        NetworkSnapshot::new(TransportType::Wifi, true, true).unwrap()
    }

    #[test]
    fn current_class_reads_fresh_state_each_call() {
        let service = MockService::new(wifi_snapshot());

        assert_eq!(current_class(&service), NetworkClass::Wifi);
        assert_eq!(current_class(&service), NetworkClass::Wifi);
        assert_eq!(service.snapshot_reads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn current_class_is_no_network_when_service_fails() {
        let service = MockService::failing();
        assert_eq!(current_class(&service), NetworkClass::NoNetwork);
    }

    #[test]
    fn is_wifi_enabled_is_false_when_service_fails() {
        assert!(!is_wifi_enabled(&MockService::failing()));
        assert!(is_wifi_enabled(&MockService::new(wifi_snapshot())));
    }

    #[test]
    fn set_wifi_enabled_skips_when_already_in_state() {
        let service = MockService::new(wifi_snapshot()).with_wifi_enabled(true);

        let changed = set_wifi_enabled(&service, true).unwrap();

        assert!(!changed);
        assert!(service.set_calls.lock().unwrap().is_empty());
    }

    #[test]
    fn set_wifi_enabled_toggles_when_state_differs() {
        let service = MockService::new(wifi_snapshot()).with_wifi_enabled(true);

        let changed = set_wifi_enabled(&service, false).unwrap();

        assert!(changed);
        assert_eq!(*service.set_calls.lock().unwrap(), vec![false]);
        assert!(!service.is_wifi_radio_enabled().unwrap());
    }

    #[test]
    fn set_wifi_enabled_propagates_read_errors() {
        let result = set_wifi_enabled(&MockService::failing(), true);
        assert!(result.is_err());
    }

    #[test]
    fn unsupported_error_names_capability() {
        let error = ServiceError::unsupported("mobile data");
        assert!(error.is_unsupported());
        assert!(error.to_string().contains("mobile data"));
    }

    #[test]
    fn snapshot_error_converts() {
        let error: ServiceError = SnapshotError::ConnectedWithoutTransport.into();
        assert!(error.to_string().contains("no transport"));
        assert!(!error.is_unsupported());
    }
}
