//! Tests for hardware address resolution.

use std::sync::atomic::Ordering;

use super::*;
use crate::network::mock::{MockService, MockTable};
use crate::network::{InterfaceEntry, NetworkSnapshot};

const ETH_CONN_MAC: &str = "00:11:22:aa:bb:cc";
const ETH0_BYTES: [u8; 6] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55];
const WLAN0_BYTES: [u8; 6] = [0xa4, 0xb1, 0xc2, 0xd3, 0xe4, 0xf5];

fn ethernet_with_descriptor() -> NetworkSnapshot {
    NetworkSnapshot::new(TransportType::Ethernet, true, true)
        .unwrap()
        .with_link_extra_info(ETH_CONN_MAC)
}

fn wifi() -> NetworkSnapshot {
    NetworkSnapshot::new(TransportType::Wifi, true, true).unwrap()
}

fn full_table() -> MockTable {
    MockTable::new(vec![
        InterfaceEntry::new("eth0").with_hardware_address(ETH0_BYTES),
        InterfaceEntry::new("wlan0").with_hardware_address(WLAN0_BYTES),
    ])
}

fn wlan_only_table() -> MockTable {
    MockTable::new(vec![
        InterfaceEntry::new("wlan0").with_hardware_address(WLAN0_BYTES),
    ])
}

mod read_mac {
    use super::*;

    #[test]
    fn connection_descriptor_comes_first() {
        let service =
            MockService::new(ethernet_with_descriptor()).with_connection_mac("de:ad:be:ef:00:01");
        let resolver = MacResolver::new(service, full_table());

        assert_eq!(resolver.read_mac(), ETH_CONN_MAC);
    }

    #[test]
    fn wired_table_when_descriptor_missing() {
        let service = MockService::new(wifi()).with_connection_mac("de:ad:be:ef:00:01");
        let resolver = MacResolver::new(service, full_table());

        assert_eq!(resolver.read_mac(), "00:11:22:33:44:55");
    }

    #[test]
    fn wireless_connection_when_no_wired_source() {
        let service = MockService::new(wifi()).with_connection_mac("de:ad:be:ef:00:01");
        let resolver = MacResolver::new(service, wlan_only_table());

        assert_eq!(resolver.read_mac(), "de:ad:be:ef:00:01");
    }

    #[test]
    fn wireless_table_when_connection_reports_placeholder() {
        let service = MockService::new(wifi()).with_connection_mac(PRIVACY_PLACEHOLDER_MAC);
        let resolver = MacResolver::new(service, wlan_only_table());

        assert_eq!(resolver.read_mac(), "A4:B1:C2:D3:E4:F5");
    }

    #[test]
    fn wireless_table_when_connection_reports_nothing() {
        let resolver = MacResolver::new(MockService::new(wifi()), wlan_only_table());
        assert_eq!(resolver.read_mac(), "A4:B1:C2:D3:E4:F5");
    }

    #[test]
    fn empty_when_every_source_fails() {
        let resolver = MacResolver::new(MockService::failing(), MockTable::failing());
        assert_eq!(resolver.read_mac(), "");
    }

    #[test]
    fn ethernet_without_descriptor_uses_wired_table() {
        let snapshot = NetworkSnapshot::new(TransportType::Ethernet, true, true).unwrap();
        let resolver = MacResolver::new(MockService::new(snapshot), full_table());

        assert_eq!(resolver.read_mac(), "00:11:22:33:44:55");
    }

    #[test]
    fn descriptor_ignored_when_not_ethernet() {
        let snapshot = NetworkSnapshot::new(TransportType::Mobile, true, true)
            .unwrap()
            .with_link_extra_info("internet.apn");
        let resolver = MacResolver::new(MockService::new(snapshot), full_table());

        assert_eq!(resolver.read_mac(), "00:11:22:33:44:55");
    }
}

mod placeholder_bypass {
    use super::*;

    #[test]
    fn placeholder_is_never_returned() {
        for table in [wlan_only_table(), MockTable::new(vec![]), MockTable::failing()] {
            let service = MockService::new(wifi()).with_connection_mac(PRIVACY_PLACEHOLDER_MAC);
            let resolver = MacResolver::new(service, table);

            for mac in [resolver.read_mac(), resolver.get_mac(), resolver.wireless_mac()] {
                assert!(!is_privacy_placeholder(&mac), "got {mac}");
                assert!(mac.is_empty() || mac == "A4:B1:C2:D3:E4:F5", "got {mac}");
            }
        }
    }

    #[test]
    fn placeholder_in_wireless_table_is_empty() {
        let table = MockTable::new(vec![
            InterfaceEntry::new("wlan0").with_hardware_address([0x02, 0, 0, 0, 0, 0]),
        ]);
        let service = MockService::new(wifi()).with_connection_mac(PRIVACY_PLACEHOLDER_MAC);
        let resolver = MacResolver::new(service, table);

        assert_eq!(resolver.wireless_mac(), "");
    }

    #[test]
    fn placeholder_descriptor_falls_through() {
        let snapshot = NetworkSnapshot::new(TransportType::Ethernet, true, true)
            .unwrap()
            .with_link_extra_info(PRIVACY_PLACEHOLDER_MAC);
        let resolver = MacResolver::new(MockService::new(snapshot), full_table());

        assert_eq!(resolver.read_mac(), "00:11:22:33:44:55");
    }

    #[test]
    fn placeholder_match_is_case_insensitive() {
        assert!(is_privacy_placeholder("02:00:00:00:00:00"));
        assert!(!is_privacy_placeholder("02:00:00:00:00:01"));
        assert!(!is_privacy_placeholder(""));
    }
}

mod get_mac {
    use super::*;

    #[test]
    fn ethernet_connected_uses_wired_address() {
        let service =
            MockService::new(ethernet_with_descriptor()).with_connection_mac("de:ad:be:ef:00:01");
        let resolver = MacResolver::new(service, full_table());

        assert_eq!(resolver.get_mac(), ETH_CONN_MAC);
    }

    #[test]
    fn connection_is_read_once_per_lookup() {
        let resolver = MacResolver::new(MockService::new(ethernet_with_descriptor()), full_table());

        assert_eq!(resolver.get_mac(), ETH_CONN_MAC);
        assert_eq!(resolver.service.snapshot_reads.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn wifi_uses_wireless_address_even_with_wired_interface() {
        let service = MockService::new(wifi()).with_connection_mac("de:ad:be:ef:00:01");
        let resolver = MacResolver::new(service, full_table());

        assert_eq!(resolver.get_mac(), "de:ad:be:ef:00:01");
    }

    #[test]
    fn ethernet_not_connected_uses_wireless_address() {
        let snapshot = NetworkSnapshot::new(TransportType::Ethernet, false, true)
            .unwrap()
            .with_link_extra_info(ETH_CONN_MAC);
        let resolver = MacResolver::new(MockService::new(snapshot), full_table());

        assert_eq!(resolver.get_mac(), "A4:B1:C2:D3:E4:F5");
    }

    #[test]
    fn resolve_mac_selects_policy() {
        let service = MockService::new(wifi()).with_connection_mac("de:ad:be:ef:00:01");
        let resolver = MacResolver::new(service, full_table());

        assert_eq!(resolver.resolve_mac(true), "00:11:22:33:44:55");
        assert_eq!(resolver.resolve_mac(false), "de:ad:be:ef:00:01");
    }
}

mod options {
    use super::*;

    #[test]
    fn custom_interface_names() {
        let table = MockTable::new(vec![
            InterfaceEntry::new("enp3s0").with_hardware_address([1, 2, 3, 4, 5, 6]),
            InterfaceEntry::new("wlp2s0").with_hardware_address(WLAN0_BYTES),
        ]);
        let resolver = MacResolver::new(MockService::new(wifi()), table).with_interfaces(
            InterfaceNames {
                wired: "enp3s0".to_string(),
                wireless: "wlp2s0".to_string(),
            },
        );

        assert_eq!(resolver.read_mac(), "01:02:03:04:05:06");
        assert_eq!(resolver.get_mac(), "A4:B1:C2:D3:E4:F5");
        assert_eq!(resolver.interfaces().wired, "enp3s0");
    }

    #[test]
    fn lower_case_normalizes_every_source() {
        let service = MockService::new(wifi()).with_connection_mac("DE:AD:BE:EF:00:01");
        let resolver = MacResolver::new(service, wlan_only_table()).with_case(MacCase::Lower);

        assert_eq!(resolver.get_mac(), "de:ad:be:ef:00:01");

        let resolver = MacResolver::new(MockService::new(wifi()), wlan_only_table())
            .with_case(MacCase::Lower);
        assert_eq!(resolver.get_mac(), "a4:b1:c2:d3:e4:f5");
    }

    #[test]
    fn upper_case_normalizes_every_source() {
        let resolver =
            MacResolver::new(MockService::new(ethernet_with_descriptor()), full_table())
                .with_case(MacCase::Upper);

        assert_eq!(resolver.read_mac(), "00:11:22:AA:BB:CC");
        assert_eq!(resolver.interface_mac("eth0"), "00:11:22:33:44:55");
    }

    #[test]
    fn compat_keeps_natural_case_outside_wireless_table() {
        let service = MockService::new(wifi()).with_connection_mac("De:Ad:Be:Ef:00:01");
        let resolver = MacResolver::new(service, wlan_only_table());

        assert_eq!(resolver.wireless_mac(), "De:Ad:Be:Ef:00:01");
        assert_eq!(resolver.interface_mac("wlan0"), "a4:b1:c2:d3:e4:f5");
    }

    #[test]
    fn mac_case_display() {
        assert_eq!(MacCase::Compat.to_string(), "compat");
        assert_eq!(MacCase::Lower.to_string(), "lower");
        assert_eq!(MacCase::Upper.to_string(), "upper");
    }
}
