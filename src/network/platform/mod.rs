//! Platform-specific network service implementations.
//!
//! This module provides conditional compilation for platform-specific
//! implementations of the [`NetworkService`](super::NetworkService) and
//! [`MobileDataControl`](super::MobileDataControl) traits.
//!
//! # Platform Support
//!
//! - **Linux**: Reads `/proc/net/route`, `/sys/class/net` and `/sys/class/rfkill`.
//! - **Other platforms**: [`UnsupportedService`] answers every query with
//!   [`ServiceError::Unsupported`](super::ServiceError::Unsupported).
//!
//! The interface table ([`SystemInterfaceTable`]) is portable and backed by
//! `pnet::datalink` everywhere.

#[cfg(target_os = "linux")]
mod linux;
mod datalink;
mod unsupported;

#[cfg(target_os = "linux")]
pub use linux::LinuxNetworkService;
pub use datalink::SystemInterfaceTable;
pub use unsupported::UnsupportedService;

// Re-export platform-specific service as PlatformNetworkService for convenience
#[cfg(target_os = "linux")]
pub use linux::LinuxNetworkService as PlatformNetworkService;
#[cfg(not(target_os = "linux"))]
pub use unsupported::UnsupportedService as PlatformNetworkService;
