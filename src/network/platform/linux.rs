//! Linux network service reading procfs and sysfs.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::network::{
    MobileDataControl, NetworkService, NetworkSnapshot, ServiceError, TransportType,
};

const ROUTE_TABLE: &str = "/proc/net/route";
const NET_CLASS: &str = "/sys/class/net";
const RFKILL_CLASS: &str = "/sys/class/rfkill";

/// `RTF_UP` from `linux/route.h`.
const RTF_UP: u32 = 0x0001;

/// `ARPHRD_ETHER` from `linux/if_arp.h`; Wi-Fi links report it too.
const ARPHRD_ETHER: &str = "1";

/// Name prefixes used by cellular modem drivers.
const MOBILE_PREFIXES: [&str; 3] = ["wwan", "rmnet", "ccmni"];

/// Linux implementation of [`NetworkService`].
///
/// The active connection is the interface carrying the lowest-metric default
/// route. Its medium and state come from `/sys/class/net/<iface>`; the Wi-Fi
/// radio is read and switched through `/sys/class/rfkill`.
///
/// # Example
///
/// ```no_run
/// use netstate::network::{NetworkService, classify, platform::LinuxNetworkService};
///
/// let service = LinuxNetworkService::new();
/// let snapshot = service.active_snapshot().expect("Failed to read network state");
/// println!("{}", classify(&snapshot));
/// ```
#[derive(Debug, Clone)]
pub struct LinuxNetworkService {
    route_table: PathBuf,
    net_class: PathBuf,
    rfkill_class: PathBuf,
}

impl Default for LinuxNetworkService {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxNetworkService {
    /// Creates a service reading the live system paths.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roots(ROUTE_TABLE, NET_CLASS, RFKILL_CLASS)
    }

    /// Creates a service reading alternative locations (used by tests).
    #[must_use]
    pub fn with_roots(
        route_table: impl Into<PathBuf>,
        net_class: impl Into<PathBuf>,
        rfkill_class: impl Into<PathBuf>,
    ) -> Self {
        Self {
            route_table: route_table.into(),
            net_class: net_class.into(),
            rfkill_class: rfkill_class.into(),
        }
    }

    fn attr(&self, iface: &str, name: &str) -> io::Result<String> {
        fs::read_to_string(self.net_class.join(iface).join(name)).map(|s| s.trim().to_string())
    }

    fn is_wireless(&self, iface: &str) -> bool {
        let dir = self.net_class.join(iface);
        dir.join("wireless").exists() || dir.join("phy80211").exists()
    }

    fn transport_of(&self, iface: &str) -> TransportType {
        if self.is_wireless(iface) {
            return TransportType::Wifi;
        }

        let uevent = self.attr(iface, "uevent").unwrap_or_default();
        if uevent.lines().any(|line| line == "DEVTYPE=wwan")
            || MOBILE_PREFIXES.iter().any(|p| iface.starts_with(p))
        {
            return TransportType::Mobile;
        }

        match self.attr(iface, "type") {
            Ok(kind) if kind == ARPHRD_ETHER => TransportType::Ethernet,
            _ => TransportType::Other,
        }
    }

    fn snapshot_of(&self, iface: &str) -> Result<NetworkSnapshot, ServiceError> {
        let transport = self.transport_of(iface);
        // Reading `carrier` fails with EINVAL while the link is down.
        let has_carrier = self.attr(iface, "carrier").is_ok_and(|c| c == "1");
        let operstate = self.attr(iface, "operstate").unwrap_or_default();
        let is_connected = has_carrier && matches!(operstate.as_str(), "up" | "unknown");

        let mut snapshot = NetworkSnapshot::new(transport, is_connected, has_carrier)?;
        if transport == TransportType::Ethernet {
            if let Ok(mac) = self.attr(iface, "address") {
                snapshot = snapshot.with_link_extra_info(mac);
            }
        }

        tracing::debug!(
            interface = iface,
            %transport,
            is_connected,
            is_available = has_carrier,
            "Read active connection"
        );
        Ok(snapshot)
    }

    fn interface_names(&self) -> io::Result<Vec<String>> {
        let mut names: Vec<String> = fs::read_dir(&self.net_class)?
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Lists rfkill switches of type `wlan`.
    fn wlan_switches(&self) -> Result<Vec<PathBuf>, ServiceError> {
        let entries = match fs::read_dir(&self.rfkill_class) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("read rfkill switches", e)),
        };

        let mut switches: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| read_trimmed(&path.join("type")).is_ok_and(|t| t == "wlan"))
            .collect();
        switches.sort();
        Ok(switches)
    }
}

impl NetworkService for LinuxNetworkService {
    fn active_snapshot(&self) -> Result<NetworkSnapshot, ServiceError> {
        let routes = fs::read_to_string(&self.route_table)
            .map_err(|e| io_error("read routing table", e))?;

        match default_route_interface(&routes) {
            Some(iface) => self.snapshot_of(&iface),
            None => Ok(NetworkSnapshot::disconnected()),
        }
    }

    fn is_wifi_radio_enabled(&self) -> Result<bool, ServiceError> {
        let switches = self.wlan_switches()?;

        if switches.is_empty() {
            // No rfkill switch: the radio is on whenever a wireless link exists.
            let names = self
                .interface_names()
                .map_err(|e| io_error("list interfaces", e))?;
            return Ok(names.iter().any(|name| self.is_wireless(name)));
        }

        Ok(switches.iter().any(|switch| {
            read_trimmed(&switch.join("soft")).is_ok_and(|s| s == "0")
                && read_trimmed(&switch.join("hard")).is_ok_and(|h| h == "0")
        }))
    }

    fn set_wifi_radio_enabled(&self, enabled: bool) -> Result<(), ServiceError> {
        let switches = self.wlan_switches()?;
        if switches.is_empty() {
            return Err(ServiceError::unsupported("wifi radio control"));
        }

        let blocked = if enabled { "0" } else { "1" };
        for switch in &switches {
            fs::write(switch.join("soft"), blocked)
                .map_err(|e| io_error("switch wifi radio", e))?;
        }
        Ok(())
    }

    fn connection_mac(&self) -> Result<Option<String>, ServiceError> {
        let names = self
            .interface_names()
            .map_err(|e| io_error("list interfaces", e))?;

        Ok(names
            .iter()
            .find(|name| self.is_wireless(name))
            .and_then(|name| self.attr(name, "address").ok())
            .filter(|mac| !mac.is_empty()))
    }
}

impl MobileDataControl for LinuxNetworkService {
    fn mobile_data_enabled(&self) -> Result<bool, ServiceError> {
        Err(ServiceError::unsupported("mobile data"))
    }

    fn network_operator_name(&self) -> Result<Option<String>, ServiceError> {
        Err(ServiceError::unsupported("network operator"))
    }
}

/// Picks the interface of the lowest-metric default route that is up.
///
/// Expects the `/proc/net/route` layout: a header line followed by
/// whitespace-separated `Iface Destination Gateway Flags RefCnt Use Metric ...`.
fn default_route_interface(routes: &str) -> Option<String> {
    routes
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let (iface, destination, flags, metric) =
                (fields.first()?, fields.get(1)?, fields.get(3)?, fields.get(6)?);

            let flags = u32::from_str_radix(flags, 16).ok()?;
            let metric: u32 = metric.parse().ok()?;
            (*destination == "00000000" && flags & RTF_UP != 0).then_some((metric, *iface))
        })
        .min_by_key(|(metric, _)| *metric)
        .map(|(_, iface)| iface.to_string())
}

fn read_trimmed(path: &Path) -> io::Result<String> {
    fs::read_to_string(path).map(|s| s.trim().to_string())
}

fn io_error(context: &str, error: io::Error) -> ServiceError {
    if error.kind() == io::ErrorKind::PermissionDenied {
        ServiceError::PermissionDenied {
            context: context.to_string(),
        }
    } else {
        ServiceError::Io(error)
    }
}
