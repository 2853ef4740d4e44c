//! OS interface table abstraction and hardware-address formatting.

use std::net::IpAddr;

use serde::Serialize;

use super::{IpVersion, ServiceError};

/// Number of octets in a formatted hardware address.
pub const HARDWARE_ADDRESS_LEN: usize = 6;

/// One entry of the OS interface table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceEntry {
    /// Interface name as known to the OS (e.g., `eth0`, `wlan0`).
    pub name: String,
    /// Whether the interface is administratively up.
    pub is_up: bool,
    /// Whether this is a loopback interface.
    pub is_loopback: bool,
    /// Raw link-layer address, if the interface has one.
    pub hardware_address: Option<Vec<u8>>,
    /// Addresses assigned to the interface.
    pub addresses: Vec<IpAddr>,
}

impl InterfaceEntry {
    /// Creates an up, non-loopback entry without addresses.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_up: true,
            is_loopback: false,
            hardware_address: None,
            addresses: Vec::new(),
        }
    }

    /// Sets the raw hardware address.
    #[must_use]
    pub fn with_hardware_address(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.hardware_address = Some(bytes.into());
        self
    }

    /// Appends an assigned address.
    #[must_use]
    pub fn with_address(mut self, addr: IpAddr) -> Self {
        self.addresses.push(addr);
        self
    }

    /// Raw hardware-address bytes of this entry.
    #[must_use]
    pub fn hardware_address(&self) -> Option<&[u8]> {
        self.hardware_address.as_deref()
    }
}

/// Trait for reading the OS interface table.
///
/// Enables dependency injection for testing with mock implementations.
pub trait InterfaceTable: Send + Sync {
    /// Lists every interface currently known to the OS.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the table cannot be read.
    fn interfaces(&self) -> Result<Vec<InterfaceEntry>, ServiceError>;

    /// Finds an interface by exact name.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError`] if the table cannot be read.
    fn find_interface(&self, name: &str) -> Result<Option<InterfaceEntry>, ServiceError> {
        Ok(self.interfaces()?.into_iter().find(|iface| iface.name == name))
    }
}

impl<T: InterfaceTable + ?Sized> InterfaceTable for &T {
    fn interfaces(&self) -> Result<Vec<InterfaceEntry>, ServiceError> {
        (**self).interfaces()
    }

    fn find_interface(&self, name: &str) -> Result<Option<InterfaceEntry>, ServiceError> {
        (**self).find_interface(name)
    }
}

/// Formats raw hardware-address bytes as `aa:bb:cc:dd:ee:ff`.
///
/// Exactly the first six octets are used. Sequences too short to yield six
/// groups produce `None`.
#[must_use]
pub fn format_hardware_address(bytes: &[u8]) -> Option<String> {
    if bytes.len() < HARDWARE_ADDRESS_LEN {
        return None;
    }

    let octets: Vec<String> = bytes[..HARDWARE_ADDRESS_LEN]
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect();
    Some(octets.join(":"))
}

/// Reads and formats the hardware address of the named interface.
///
/// Missing interfaces, missing addresses and table read failures all yield
/// an empty string.
pub fn interface_hardware_address<T: InterfaceTable + ?Sized>(table: &T, name: &str) -> String {
    match table.find_interface(name) {
        Ok(Some(entry)) => entry
            .hardware_address()
            .and_then(format_hardware_address)
            .unwrap_or_default(),
        Ok(None) => {
            tracing::debug!(interface = name, "Interface not found");
            String::new()
        }
        Err(e) => {
            tracing::debug!(interface = name, "Failed to read interface table: {e}");
            String::new()
        }
    }
}

/// Returns the first non-loopback address of `version` on an up interface.
///
/// IPv6 results have any `%scope` suffix removed and are upper-cased.
pub fn local_ip_address<T: InterfaceTable + ?Sized>(
    table: &T,
    version: IpVersion,
) -> Option<String> {
    let interfaces = match table.interfaces() {
        Ok(interfaces) => interfaces,
        Err(e) => {
            tracing::debug!("Failed to read interface table: {e}");
            return None;
        }
    };

    interfaces
        .iter()
        .filter(|iface| iface.is_up)
        .flat_map(|iface| iface.addresses.iter())
        .find(|addr| !addr.is_loopback() && version.matches(addr))
        .map(|addr| match addr {
            IpAddr::V4(v4) => v4.to_string(),
            IpAddr::V6(v6) => {
                let text = v6.to_string();
                let unscoped = text.split_once('%').map_or(text.as_str(), |(ip, _)| ip);
                unscoped.to_uppercase()
            }
        })
}
