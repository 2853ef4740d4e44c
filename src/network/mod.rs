//! Network layer for reading and classifying the active connection.
//!
//! This module provides types and traits for:
//! - Representing the active connection ([`NetworkSnapshot`])
//! - Deriving the network class ([`NetworkClass`], [`classify`])
//! - Querying platform services ([`NetworkService`], [`MobileDataControl`])
//! - Reading the OS interface table ([`InterfaceTable`])
//! - Platform-specific implementations ([`platform`])

mod class;
mod interface;
pub mod platform;
mod service;
mod snapshot;

pub use class::{NetworkClass, classify};
pub use interface::{
    HARDWARE_ADDRESS_LEN, InterfaceEntry, InterfaceTable, format_hardware_address,
    interface_hardware_address, local_ip_address,
};
pub use service::{
    MobileDataControl, NetworkService, ServiceError, current_class, current_snapshot,
    is_wifi_enabled, set_wifi_enabled,
};
pub use snapshot::{IpVersion, MobileSubtype, NetworkSnapshot, SnapshotError, TransportType};

#[cfg(test)]
pub(crate) mod mock {
    pub use super::interface::mock::MockTable;
    pub use super::service::mock::MockService;
}
