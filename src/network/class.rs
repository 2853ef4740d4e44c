//! Network class derivation from a snapshot.

use std::fmt;

use serde::{Serialize, Serializer};

use super::{MobileSubtype, NetworkSnapshot, TransportType};

/// Vendor labels that identify a 3G network when the subtype code itself
/// is not in any bucket.
const THREE_G_SUBTYPE_NAMES: [&str; 3] = ["TD-SCDMA", "WCDMA", "CDMA2000"];

/// Coarse class of the active network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkClass {
    Eth,
    Wifi,
    FourG,
    ThreeG,
    TwoG,
    Unknown,
    NoNetwork,
}

impl NetworkClass {
    /// Returns the canonical label (`ETH`, `4G`, `NO_NETWORK`, ...).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Wifi => "WIFI",
            Self::FourG => "4G",
            Self::ThreeG => "3G",
            Self::TwoG => "2G",
            Self::Unknown => "UNKNOWN",
            Self::NoNetwork => "NO_NETWORK",
        }
    }
}

impl fmt::Display for NetworkClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for NetworkClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Generation bucket a cellular subtype belongs to.
///
/// Returns `None` for subtypes outside every bucket; the caller then falls
/// back to the vendor label.
const fn mobile_bucket(subtype: MobileSubtype) -> Option<NetworkClass> {
    use MobileSubtype as M;

    match subtype {
        M::Gsm | M::Gprs | M::Cdma | M::Edge | M::OneXRtt | M::Iden => Some(NetworkClass::TwoG),
        M::TdScdma
        | M::EvdoA
        | M::Umts
        | M::Evdo0
        | M::Hsdpa
        | M::Hsupa
        | M::Hspa
        | M::EvdoB
        | M::Ehrpd
        | M::Hspap => Some(NetworkClass::ThreeG),
        M::Iwlan | M::Lte => Some(NetworkClass::FourG),
        M::Unknown | M::Nr | M::Other(_) => None,
    }
}

fn classify_mobile(subtype: MobileSubtype, subtype_name: &str) -> NetworkClass {
    mobile_bucket(subtype).unwrap_or_else(|| {
        if THREE_G_SUBTYPE_NAMES
            .iter()
            .any(|name| subtype_name.eq_ignore_ascii_case(name))
        {
            NetworkClass::ThreeG
        } else {
            NetworkClass::Unknown
        }
    })
}

/// Derives the network class of a snapshot.
///
/// Total and side-effect free. An unavailable snapshot is always
/// [`NetworkClass::NoNetwork`]; for mobile links the subtype code takes
/// priority and the vendor label is only consulted when the code is in no
/// bucket.
#[must_use]
pub fn classify(snapshot: &NetworkSnapshot) -> NetworkClass {
    if !snapshot.is_available() {
        return NetworkClass::NoNetwork;
    }

    match snapshot.transport() {
        TransportType::Ethernet => NetworkClass::Eth,
        TransportType::Wifi => NetworkClass::Wifi,
        TransportType::Mobile => classify_mobile(snapshot.subtype(), snapshot.subtype_name()),
        TransportType::Other | TransportType::None => NetworkClass::Unknown,
    }
}

#[cfg(test)]
#[path = "class_tests.rs"]
mod tests;
