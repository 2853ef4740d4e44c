//! Application execution logic.
//!
//! This module runs one command against the platform services and renders
//! its result as text or JSON.

use std::net::IpAddr;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use netstate::config::{Command, ValidatedConfig};
use netstate::identity::MacResolver;
use netstate::network::platform::{PlatformNetworkService, SystemInterfaceTable};
use netstate::network::{
    InterfaceTable, IpVersion, MobileSubtype, NetworkClass, NetworkService, NetworkSnapshot,
    ServiceError, TransportType, classify, current_snapshot, local_ip_address, set_wifi_enabled,
};
use netstate::probe::{ProcessRunner, ReachabilityProber, SystemRunner};
use netstate::resolver::{DomainResolver, HostLookup, SystemLookup};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// Failed to change the Wi-Fi radio state.
    #[error("Failed to switch Wi-Fi radio: {0}")]
    WifiToggle(#[source] ServiceError),

    /// The probe worker panicked or was cancelled.
    #[error("Probe worker failed: {0}")]
    ProbeWorker(#[source] tokio::task::JoinError),

    /// Failed to serialize the report.
    #[error("Failed to encode JSON output: {0}")]
    Json(#[from] serde_json::Error),

    /// The command is handled before the runtime starts.
    #[error("Command '{0}' cannot be executed here")]
    UnexpectedCommand(&'static str),
}

/// Whether a command produced a positive answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The question was answered affirmatively.
    Positive,
    /// Unreachable address, unresolved domain, or no address found.
    Negative,
}

/// Detailed view of the active connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusReport {
    pub class: NetworkClass,
    pub transport: TransportType,
    pub connected: bool,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<MobileSubtype>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub subtype_name: String,
    pub ethernet_connected: bool,
    pub wifi_connected: bool,
    pub is_4g: bool,
    /// `None` when the radio state cannot be read.
    pub wifi_enabled: Option<bool>,
    pub ipv4: Option<String>,
}

impl StatusReport {
    fn new(snapshot: &NetworkSnapshot, wifi_enabled: Option<bool>, ipv4: Option<String>) -> Self {
        let subtype = (snapshot.transport() == TransportType::Mobile).then(|| snapshot.subtype());

        Self {
            class: classify(snapshot),
            transport: snapshot.transport(),
            connected: snapshot.is_connected(),
            available: snapshot.is_available(),
            subtype,
            subtype_name: snapshot.subtype_name().to_string(),
            ethernet_connected: snapshot.is_ethernet_connected(),
            wifi_connected: snapshot.is_wifi_connected(),
            is_4g: snapshot.is_4g(),
            wifi_enabled,
            ipv4,
        }
    }
}

/// Result of one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum Report {
    Status(StatusReport),
    Class {
        class: NetworkClass,
    },
    Ping {
        address: String,
        reachable: bool,
    },
    Mac {
        mac: String,
        connection_aware: bool,
    },
    Ip {
        version: IpVersion,
        address: Option<String>,
    },
    Resolve {
        domain: String,
        address: Option<IpAddr>,
    },
    Wifi {
        enabled: bool,
        changed: bool,
    },
}

impl Report {
    /// Negative for unreachable, unresolved or empty answers.
    pub fn outcome(&self) -> Outcome {
        let positive = match self {
            Self::Status(_) | Self::Class { .. } | Self::Wifi { .. } => true,
            Self::Ping { reachable, .. } => *reachable,
            Self::Mac { mac, .. } => !mac.is_empty(),
            Self::Ip { address, .. } => address.is_some(),
            Self::Resolve { address, .. } => address.is_some(),
        };

        if positive {
            Outcome::Positive
        } else {
            Outcome::Negative
        }
    }

    /// Human-readable rendering.
    pub fn to_text(&self) -> String {
        match self {
            Self::Status(status) => status_text(status),
            Self::Class { class } => class.to_string(),
            Self::Ping { address, reachable } => {
                let state = if *reachable { "reachable" } else { "unreachable" };
                format!("{address} is {state}")
            }
            Self::Mac { mac, .. } if mac.is_empty() => "no hardware address found".to_string(),
            Self::Mac { mac, .. } => mac.clone(),
            Self::Ip {
                address: Some(address),
                ..
            } => address.clone(),
            Self::Ip { version, .. } => format!("no {version} address found"),
            Self::Resolve {
                domain,
                address: Some(address),
            } => format!("{domain} -> {address}"),
            Self::Resolve { domain, .. } => format!("{domain} did not resolve"),
            Self::Wifi { enabled, changed } => {
                let state = if *enabled { "on" } else { "off" };
                if *changed {
                    format!("Wi-Fi radio turned {state}")
                } else {
                    format!("Wi-Fi radio already {state}")
                }
            }
        }
    }

    /// Renders as JSON or text.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Json`] if serialization fails.
    pub fn render(&self, json: bool) -> Result<String, RunError> {
        if json {
            Ok(serde_json::to_string_pretty(self)?)
        } else {
            Ok(self.to_text())
        }
    }
}

fn status_text(status: &StatusReport) -> String {
    let mut lines = vec![
        format!("class:              {}", status.class),
        format!("transport:          {}", status.transport),
        format!("connected:          {}", status.connected),
        format!("available:          {}", status.available),
    ];
    if let Some(subtype) = status.subtype {
        lines.push(format!(
            "subtype:            {subtype:?} ({})",
            subtype.code()
        ));
    }
    if !status.subtype_name.is_empty() {
        lines.push(format!("subtype name:       {}", status.subtype_name));
    }
    let wifi = status
        .wifi_enabled
        .map_or_else(|| "unknown".to_string(), |on| on.to_string());
    lines.extend([
        format!("ethernet connected: {}", status.ethernet_connected),
        format!("wifi connected:     {}", status.wifi_connected),
        format!("4g:                 {}", status.is_4g),
        format!("wifi radio:         {wifi}"),
        format!(
            "ipv4:               {}",
            status.ipv4.as_deref().unwrap_or("none")
        ),
    ]);
    lines.join("\n")
}

/// Platform services and settings needed to answer commands.
pub struct App<S, T, R = SystemRunner, L = SystemLookup> {
    service: S,
    table: T,
    prober: Arc<ReachabilityProber<R>>,
    resolver: DomainResolver<L>,
    config: ValidatedConfig,
}

impl App<PlatformNetworkService, SystemInterfaceTable> {
    /// Creates an application backed by the host's services.
    pub fn system(config: ValidatedConfig) -> Self {
        let resolver = DomainResolver::new(SystemLookup, config.max_concurrent);
        Self::new(
            PlatformNetworkService::default(),
            SystemInterfaceTable::new(),
            ReachabilityProber::system(),
            resolver,
            config,
        )
    }
}

impl<S, T, R, L> App<S, T, R, L>
where
    S: NetworkService,
    T: InterfaceTable,
    R: ProcessRunner + 'static,
    L: HostLookup,
{
    /// Creates an application from explicit services.
    pub fn new(
        service: S,
        table: T,
        prober: ReachabilityProber<R>,
        resolver: DomainResolver<L>,
        config: ValidatedConfig,
    ) -> Self {
        Self {
            service,
            table,
            prober: Arc::new(prober),
            resolver,
            config,
        }
    }

    /// Answers one command.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] when the Wi-Fi radio cannot be switched, the
    /// probe worker fails, or `command` is `init`.
    pub async fn report(&self, command: &Command) -> Result<Report, RunError> {
        match command {
            Command::Status => Ok(Report::Status(self.status())),
            Command::Class => Ok(Report::Class {
                class: classify(&current_snapshot(&self.service)),
            }),
            Command::Ping { .. } => self.ping().await,
            Command::Mac {
                connection_aware, ..
            } => Ok(self.mac(*connection_aware)),
            Command::Ip { ipv6 } => {
                let version = if *ipv6 { IpVersion::V6 } else { IpVersion::V4 };
                Ok(Report::Ip {
                    version,
                    address: local_ip_address(&self.table, version),
                })
            }
            Command::Resolve { domain, .. } => Ok(Report::Resolve {
                domain: domain.clone(),
                address: self
                    .resolver
                    .resolve(domain, self.config.resolver_timeout)
                    .await,
            }),
            Command::Wifi { state } => {
                let enabled = state.enabled();
                let changed =
                    set_wifi_enabled(&self.service, enabled).map_err(RunError::WifiToggle)?;
                Ok(Report::Wifi { enabled, changed })
            }
            Command::Init { .. } => Err(RunError::UnexpectedCommand("init")),
        }
    }

    fn status(&self) -> StatusReport {
        let snapshot = current_snapshot(&self.service);
        let wifi_enabled = match self.service.is_wifi_radio_enabled() {
            Ok(enabled) => Some(enabled),
            Err(e) => {
                tracing::debug!("Failed to read Wi-Fi radio state: {e}");
                None
            }
        };

        StatusReport::new(
            &snapshot,
            wifi_enabled,
            local_ip_address(&self.table, IpVersion::V4),
        )
    }

    async fn ping(&self) -> Result<Report, RunError> {
        let prober = Arc::clone(&self.prober);
        let target = self.config.probe.clone();
        let address = target.address.clone();

        let reachable = tokio::task::spawn_blocking(move || prober.probe(&target))
            .await
            .map_err(RunError::ProbeWorker)?;

        Ok(Report::Ping { address, reachable })
    }

    fn mac(&self, connection_aware: bool) -> Report {
        let resolver = MacResolver::new(&self.service, &self.table)
            .with_interfaces(self.config.interfaces.clone())
            .with_case(self.config.mac_case);

        Report::Mac {
            mac: resolver.resolve_mac(!connection_aware),
            connection_aware,
        }
    }
}

/// Executes one command against the host and prints its report.
///
/// # Errors
///
/// Returns [`RunError`] if the command fails or its output cannot be encoded.
pub async fn execute(command: Command, config: ValidatedConfig) -> Result<Outcome, RunError> {
    let json = config.json;
    let app = App::system(config);

    let report = app.report(&command).await?;
    println!("{}", report.render(json)?);

    let outcome = report.outcome();
    if outcome == Outcome::Negative {
        tracing::debug!(?report, "Negative result");
    }
    Ok(outcome)
}
