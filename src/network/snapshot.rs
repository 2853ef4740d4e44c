//! Core network types for the active-connection snapshot.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// IP version used when selecting a local address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IpVersion {
    /// IPv4 addresses only.
    V4,
    /// IPv6 addresses only.
    V6,
}

impl IpVersion {
    /// Returns true if the address belongs to this version.
    #[must_use]
    pub const fn matches(self, addr: &std::net::IpAddr) -> bool {
        matches!(
            (self, addr),
            (Self::V4, std::net::IpAddr::V4(_)) | (Self::V6, std::net::IpAddr::V6(_))
        )
    }
}

impl fmt::Display for IpVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "IPv4"),
            Self::V6 => write!(f, "IPv6"),
        }
    }
}

/// Connection medium of the active network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportType {
    /// Wired Ethernet link.
    Ethernet,
    /// Wireless (Wi-Fi) link.
    Wifi,
    /// Cellular data link.
    Mobile,
    /// Any other medium (tunnel, bridge, PPP, ...).
    Other,
    /// No active connection.
    None,
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Ethernet => "ethernet",
            Self::Wifi => "wifi",
            Self::Mobile => "mobile",
            Self::Other => "other",
            Self::None => "none",
        };
        f.write_str(label)
    }
}

/// Cellular radio technology of a mobile connection.
///
/// Replaces the platform's raw integer codes with a closed set of variants.
/// [`MobileSubtype::from_code`] and [`MobileSubtype::code`] form an exhaustive
/// mapping table; codes without a named variant are preserved in `Other`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MobileSubtype {
    #[default]
    Unknown,
    Gprs,
    Edge,
    Umts,
    Cdma,
    Evdo0,
    EvdoA,
    OneXRtt,
    Hsdpa,
    Hsupa,
    Hspa,
    Iden,
    EvdoB,
    Lte,
    Ehrpd,
    Hspap,
    Gsm,
    TdScdma,
    Iwlan,
    Nr,
    /// A code with no named variant, kept for debugging.
    Other(i32),
}

impl MobileSubtype {
    /// Maps a platform subtype code to its variant.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => Self::Unknown,
            1 => Self::Gprs,
            2 => Self::Edge,
            3 => Self::Umts,
            4 => Self::Cdma,
            5 => Self::Evdo0,
            6 => Self::EvdoA,
            7 => Self::OneXRtt,
            8 => Self::Hsdpa,
            9 => Self::Hsupa,
            10 => Self::Hspa,
            11 => Self::Iden,
            12 => Self::EvdoB,
            13 => Self::Lte,
            14 => Self::Ehrpd,
            15 => Self::Hspap,
            16 => Self::Gsm,
            17 => Self::TdScdma,
            18 => Self::Iwlan,
            20 => Self::Nr,
            other => Self::Other(other),
        }
    }

    /// Returns the platform code for this variant.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Unknown => 0,
            Self::Gprs => 1,
            Self::Edge => 2,
            Self::Umts => 3,
            Self::Cdma => 4,
            Self::Evdo0 => 5,
            Self::EvdoA => 6,
            Self::OneXRtt => 7,
            Self::Hsdpa => 8,
            Self::Hsupa => 9,
            Self::Hspa => 10,
            Self::Iden => 11,
            Self::EvdoB => 12,
            Self::Lte => 13,
            Self::Ehrpd => 14,
            Self::Hspap => 15,
            Self::Gsm => 16,
            Self::TdScdma => 17,
            Self::Iwlan => 18,
            Self::Nr => 20,
            Self::Other(code) => code,
        }
    }
}

/// Error returned when snapshot fields contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnapshotError {
    /// A connected snapshot must name its transport.
    #[error("snapshot is connected but has no transport")]
    ConnectedWithoutTransport,
}

/// A read-only, point-in-time capture of the active connection.
///
/// Fields are private so a snapshot cannot change after creation; every
/// query against the platform produces a new instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkSnapshot {
    is_connected: bool,
    is_available: bool,
    transport: TransportType,
    subtype: MobileSubtype,
    subtype_name: String,
    link_extra_info: Option<String>,
}

impl NetworkSnapshot {
    /// Creates a snapshot for an active connection.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::ConnectedWithoutTransport`] if `is_connected`
    /// is set while `transport` is [`TransportType::None`].
    pub const fn new(
        transport: TransportType,
        is_connected: bool,
        is_available: bool,
    ) -> Result<Self, SnapshotError> {
        if is_connected && matches!(transport, TransportType::None) {
            return Err(SnapshotError::ConnectedWithoutTransport);
        }

        Ok(Self {
            is_connected,
            is_available,
            transport,
            subtype: MobileSubtype::Unknown,
            subtype_name: String::new(),
            link_extra_info: None,
        })
    }

    /// Snapshot describing the absence of any active connection.
    #[must_use]
    pub const fn disconnected() -> Self {
        Self {
            is_connected: false,
            is_available: false,
            transport: TransportType::None,
            subtype: MobileSubtype::Unknown,
            subtype_name: String::new(),
            link_extra_info: None,
        }
    }

    /// Sets the cellular subtype and its vendor label.
    #[must_use]
    pub fn with_subtype(mut self, subtype: MobileSubtype, name: impl Into<String>) -> Self {
        self.subtype = subtype;
        self.subtype_name = name.into();
        self
    }

    /// Sets the platform-specific extra descriptor.
    #[must_use]
    pub fn with_link_extra_info(mut self, info: impl Into<String>) -> Self {
        self.link_extra_info = Some(info.into());
        self
    }

    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.is_connected
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.is_available
    }

    #[must_use]
    pub const fn transport(&self) -> TransportType {
        self.transport
    }

    #[must_use]
    pub const fn subtype(&self) -> MobileSubtype {
        self.subtype
    }

    #[must_use]
    pub fn subtype_name(&self) -> &str {
        &self.subtype_name
    }

    #[must_use]
    pub fn link_extra_info(&self) -> Option<&str> {
        self.link_extra_info.as_deref()
    }

    /// Returns true if an Ethernet connection is established.
    #[must_use]
    pub const fn is_ethernet_connected(&self) -> bool {
        self.is_connected && matches!(self.transport, TransportType::Ethernet)
    }

    /// Returns true if an Ethernet connection is possible.
    #[must_use]
    pub const fn is_ethernet_available(&self) -> bool {
        self.is_available && matches!(self.transport, TransportType::Ethernet)
    }

    /// Returns true if a Wi-Fi connection is established.
    #[must_use]
    pub const fn is_wifi_connected(&self) -> bool {
        self.is_connected && matches!(self.transport, TransportType::Wifi)
    }

    /// Returns true if a Wi-Fi connection is possible.
    #[must_use]
    pub const fn is_wifi_available(&self) -> bool {
        self.is_available && matches!(self.transport, TransportType::Wifi)
    }

    /// Returns true if the available connection runs over LTE.
    #[must_use]
    pub const fn is_4g(&self) -> bool {
        self.is_available && matches!(self.subtype, MobileSubtype::Lte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod mobile_subtype {
        use super::*;

        #[test]
        fn every_named_code_maps_back_to_itself() {
            for code in (0..=18).chain([20]) {
                let subtype = MobileSubtype::from_code(code);
                assert!(
                    !matches!(subtype, MobileSubtype::Other(_)),
                    "code {code} should have a named variant"
                );
                assert_eq!(subtype.code(), code);
            }
        }

        #[test]
        fn unnamed_code_is_preserved() {
            assert_eq!(MobileSubtype::from_code(19), MobileSubtype::Other(19));
            assert_eq!(MobileSubtype::from_code(-1).code(), -1);
        }

        #[test]
        fn well_known_codes() {
            assert_eq!(MobileSubtype::from_code(13), MobileSubtype::Lte);
            assert_eq!(MobileSubtype::from_code(16), MobileSubtype::Gsm);
            assert_eq!(MobileSubtype::from_code(18), MobileSubtype::Iwlan);
        }
    }

    mod network_snapshot {
        use super::*;

        #[test]
        fn connected_without_transport_is_rejected() {
            let result = NetworkSnapshot::new(TransportType::None, true, true);
            assert_eq!(result, Err(SnapshotError::ConnectedWithoutTransport));
        }

        #[test]
        fn disconnected_without_transport_is_allowed() {
            let snapshot = NetworkSnapshot::new(TransportType::None, false, false).unwrap();
            assert_eq!(snapshot, NetworkSnapshot::disconnected());
        }

        #[test]
        fn builders_set_optional_fields() {
            let snapshot = NetworkSnapshot::new(TransportType::Mobile, true, true)
                .unwrap()
                .with_subtype(MobileSubtype::Hspa, "HSPA")
                .with_link_extra_info("internet");

            assert_eq!(snapshot.subtype(), MobileSubtype::Hspa);
            assert_eq!(snapshot.subtype_name(), "HSPA");
            assert_eq!(snapshot.link_extra_info(), Some("internet"));
        }

        #[test]
        fn ethernet_predicates() {
            let up = NetworkSnapshot::new(TransportType::Ethernet, true, true).unwrap();
            let pending = NetworkSnapshot::new(TransportType::Ethernet, false, true).unwrap();

            assert!(up.is_ethernet_connected());
            assert!(up.is_ethernet_available());
            assert!(!pending.is_ethernet_connected());
            assert!(pending.is_ethernet_available());
            assert!(!up.is_wifi_connected());
        }

        #[test]
        fn wifi_predicates() {
            let wifi = NetworkSnapshot::new(TransportType::Wifi, true, true).unwrap();

            assert!(wifi.is_wifi_connected());
            assert!(wifi.is_wifi_available());
            assert!(!wifi.is_ethernet_available());
        }

        #[test]
        fn is_4g_requires_lte_and_availability() {
            let lte = NetworkSnapshot::new(TransportType::Mobile, true, true)
                .unwrap()
                .with_subtype(MobileSubtype::Lte, "LTE");
            let unavailable = NetworkSnapshot::new(TransportType::Mobile, false, false)
                .unwrap()
                .with_subtype(MobileSubtype::Lte, "LTE");
            let umts = NetworkSnapshot::new(TransportType::Mobile, true, true)
                .unwrap()
                .with_subtype(MobileSubtype::Umts, "UMTS");

            assert!(lte.is_4g());
            assert!(!unavailable.is_4g());
            assert!(!umts.is_4g());
        }
    }

    #[test]
    fn ip_version_matches_family() {
        let v4: std::net::IpAddr = "10.0.0.1".parse().unwrap();
        let v6: std::net::IpAddr = "fe80::1".parse().unwrap();

        assert!(IpVersion::V4.matches(&v4));
        assert!(!IpVersion::V4.matches(&v6));
        assert!(IpVersion::V6.matches(&v6));
        assert_eq!(IpVersion::V6.to_string(), "IPv6");
    }
}
