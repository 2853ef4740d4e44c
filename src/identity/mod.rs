//! Best-effort hardware (MAC) address resolution.
//!
//! Addresses are resolved through ordered fallback chains over the
//! connection service and the OS interface table. Every step recovers from
//! failure locally; an unresolved address is the empty string.
//!
//! # Placeholder bypass
//!
//! Some platforms withhold the real Wi-Fi address and report
//! [`PRIVACY_PLACEHOLDER_MAC`] instead. That value is treated as "not
//! found" everywhere and is never returned.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::network::{
    InterfaceTable, NetworkService, NetworkSnapshot, TransportType, current_snapshot,
    interface_hardware_address,
};

/// Address reported by platforms that withhold the real Wi-Fi MAC.
pub const PRIVACY_PLACEHOLDER_MAC: &str = "02:00:00:00:00:00";

/// Default wired interface name.
pub const DEFAULT_WIRED_INTERFACE: &str = "eth0";

/// Default wireless interface name.
pub const DEFAULT_WIRELESS_INTERFACE: &str = "wlan0";

/// Returns true if `mac` is the privacy placeholder (case-insensitive).
#[must_use]
pub fn is_privacy_placeholder(mac: &str) -> bool {
    mac.eq_ignore_ascii_case(PRIVACY_PLACEHOLDER_MAC)
}

/// Interface names consulted by the table-based fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceNames {
    pub wired: String,
    pub wireless: String,
}

impl Default for InterfaceNames {
    fn default() -> Self {
        Self {
            wired: DEFAULT_WIRED_INTERFACE.to_string(),
            wireless: DEFAULT_WIRELESS_INTERFACE.to_string(),
        }
    }
}

/// Letter case applied to resolved addresses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MacCase {
    /// Upper-case only addresses read from the wireless interface table;
    /// every other source keeps its natural case.
    #[default]
    Compat,
    /// Lower-case every address.
    Lower,
    /// Upper-case every address.
    Upper,
}

impl fmt::Display for MacCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compat => write!(f, "compat"),
            Self::Lower => write!(f, "lower"),
            Self::Upper => write!(f, "upper"),
        }
    }
}

impl MacCase {
    fn apply(self, mac: String) -> String {
        match self {
            Self::Compat => mac,
            Self::Lower => mac.to_lowercase(),
            Self::Upper => mac.to_uppercase(),
        }
    }
}

/// Resolves the host's hardware address from a service and interface table.
///
/// # Example
///
/// ```no_run
/// use netstate::identity::MacResolver;
/// use netstate::network::platform::{PlatformNetworkService, SystemInterfaceTable};
///
/// let resolver = MacResolver::new(PlatformNetworkService::default(), SystemInterfaceTable::new());
/// println!("{}", resolver.read_mac());
/// ```
#[derive(Debug, Clone)]
pub struct MacResolver<S, T> {
    service: S,
    table: T,
    names: InterfaceNames,
    case: MacCase,
}

impl<S: NetworkService, T: InterfaceTable> MacResolver<S, T> {
    /// Creates a resolver using the default interface names.
    pub fn new(service: S, table: T) -> Self {
        Self {
            service,
            table,
            names: InterfaceNames::default(),
            case: MacCase::default(),
        }
    }

    /// Overrides the interface names used by the table fallbacks.
    #[must_use]
    pub fn with_interfaces(mut self, names: InterfaceNames) -> Self {
        self.names = names;
        self
    }

    /// Sets the letter case applied to results.
    #[must_use]
    pub const fn with_case(mut self, case: MacCase) -> Self {
        self.case = case;
        self
    }

    /// Interface names in use.
    pub const fn interfaces(&self) -> &InterfaceNames {
        &self.names
    }

    /// Resolves with the best-source chain (`prefer_wired`) or the
    /// connection-aware chain.
    pub fn resolve_mac(&self, prefer_wired: bool) -> String {
        if prefer_wired {
            self.read_mac()
        } else {
            self.get_mac()
        }
    }

    /// Best-source chain.
    ///
    /// Order: wired connection descriptor, wired interface table, Wi-Fi
    /// connection, wireless interface table. The first non-empty result wins.
    pub fn read_mac(&self) -> String {
        let wired = self.wired_mac();
        if !wired.is_empty() {
            return wired;
        }
        self.wireless_mac()
    }

    /// Connection-aware chain: the wired address while Ethernet is
    /// connected, otherwise the wireless address.
    pub fn get_mac(&self) -> String {
        let snapshot = current_snapshot(&self.service);
        if snapshot.is_ethernet_connected() {
            self.wired_mac_for(&snapshot)
        } else {
            self.wireless_mac()
        }
    }

    /// Wired address: connection descriptor, then the wired interface table.
    pub fn wired_mac(&self) -> String {
        self.wired_mac_for(&current_snapshot(&self.service))
    }

    /// Hardware address carried by an active Ethernet connection's descriptor.
    pub fn wired_mac_from_connection(&self) -> String {
        self.descriptor_mac(&current_snapshot(&self.service))
    }

    fn wired_mac_for(&self, snapshot: &NetworkSnapshot) -> String {
        let from_connection = self.descriptor_mac(snapshot);
        if !from_connection.is_empty() {
            return from_connection;
        }
        self.interface_mac(&self.names.wired)
    }

    fn descriptor_mac(&self, snapshot: &NetworkSnapshot) -> String {
        if snapshot.transport() != TransportType::Ethernet {
            return String::new();
        }

        snapshot
            .link_extra_info()
            .map(str::trim)
            .filter(|mac| !mac.is_empty() && !is_privacy_placeholder(mac))
            .map(|mac| self.case.apply(mac.to_string()))
            .unwrap_or_default()
    }

    /// Wireless address: the Wi-Fi connection's report, replaced by the
    /// wireless interface table when it is missing or the placeholder.
    pub fn wireless_mac(&self) -> String {
        let reported = match self.service.connection_mac() {
            Ok(mac) => mac.unwrap_or_default(),
            Err(e) => {
                tracing::debug!("Failed to read Wi-Fi connection address: {e}");
                String::new()
            }
        };

        if !reported.is_empty() && !is_privacy_placeholder(&reported) {
            return self.case.apply(reported);
        }

        if is_privacy_placeholder(&reported) {
            tracing::debug!(
                interface = %self.names.wireless,
                "Wi-Fi address withheld, reading interface table"
            );
        }

        let from_table = interface_hardware_address(&self.table, &self.names.wireless);
        if is_privacy_placeholder(&from_table) {
            return String::new();
        }

        match self.case {
            MacCase::Compat => from_table.to_uppercase(),
            other => other.apply(from_table),
        }
    }

    /// Formatted address of the named interface from the table.
    pub fn interface_mac(&self, name: &str) -> String {
        let mac = interface_hardware_address(&self.table, name);
        if is_privacy_placeholder(&mac) {
            return String::new();
        }
        self.case.apply(mac)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
