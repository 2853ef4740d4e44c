//! Fallback service for platforms without a native implementation.

use crate::network::{MobileDataControl, NetworkService, NetworkSnapshot, ServiceError};

/// Service that reports every capability as unsupported.
///
/// Also serves as the [`MobileDataControl`] for platforms without a
/// cellular stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedService;

impl NetworkService for UnsupportedService {
    fn active_snapshot(&self) -> Result<NetworkSnapshot, ServiceError> {
        Err(ServiceError::unsupported("active connection"))
    }

    fn is_wifi_radio_enabled(&self) -> Result<bool, ServiceError> {
        Err(ServiceError::unsupported("wifi radio state"))
    }

    fn set_wifi_radio_enabled(&self, _enabled: bool) -> Result<(), ServiceError> {
        Err(ServiceError::unsupported("wifi radio control"))
    }

    fn connection_mac(&self) -> Result<Option<String>, ServiceError> {
        Err(ServiceError::unsupported("wifi connection info"))
    }
}

impl MobileDataControl for UnsupportedService {
    fn mobile_data_enabled(&self) -> Result<bool, ServiceError> {
        Err(ServiceError::unsupported("mobile data"))
    }

    fn network_operator_name(&self) -> Result<Option<String>, ServiceError> {
        Err(ServiceError::unsupported("network operator"))
    }
}
