//! Portable interface table backed by `pnet::datalink`.

use pnet::datalink::{self, NetworkInterface};
use pnet::util::MacAddr;

use crate::network::{InterfaceEntry, InterfaceTable, ServiceError};

/// [`InterfaceTable`] reading the live OS interface list.
///
/// # Example
///
/// ```no_run
/// use netstate::network::{InterfaceTable, platform::SystemInterfaceTable};
///
/// let table = SystemInterfaceTable::new();
/// for iface in table.interfaces().unwrap_or_default() {
///     println!("{}: {:?}", iface.name, iface.hardware_address);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaceTable;

impl SystemInterfaceTable {
    /// Creates a new interface table reader.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl InterfaceTable for SystemInterfaceTable {
    fn interfaces(&self) -> Result<Vec<InterfaceEntry>, ServiceError> {
        Ok(datalink::interfaces().iter().map(to_entry).collect())
    }
}

fn to_entry(iface: &NetworkInterface) -> InterfaceEntry {
    InterfaceEntry {
        name: iface.name.clone(),
        is_up: iface.is_up(),
        is_loopback: iface.is_loopback(),
        hardware_address: iface.mac.map(mac_octets),
        addresses: iface.ips.iter().map(pnet::ipnetwork::IpNetwork::ip).collect(),
    }
}

fn mac_octets(mac: MacAddr) -> Vec<u8> {
    let MacAddr(a, b, c, d, e, f) = mac;
    vec![a, b, c, d, e, f]
}
