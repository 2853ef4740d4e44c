//! Tests for network classification.

use super::*;

fn mobile(subtype: MobileSubtype, name: &str) -> NetworkSnapshot {
    NetworkSnapshot::new(TransportType::Mobile, true, true)
        .unwrap()
        .with_subtype(subtype, name)
}

fn all_transports() -> [TransportType; 5] {
    [
        TransportType::Ethernet,
        TransportType::Wifi,
        TransportType::Mobile,
        TransportType::Other,
        TransportType::None,
    ]
}

mod availability {
    use super::*;

    #[test]
    fn unavailable_is_no_network_for_every_transport() {
        for transport in all_transports() {
            for code in -1..=25 {
                let snapshot = NetworkSnapshot::new(transport, false, false)
                    .unwrap()
                    .with_subtype(MobileSubtype::from_code(code), "WCDMA")
                    .with_link_extra_info("aa:bb:cc:dd:ee:ff");

                assert_eq!(
                    classify(&snapshot),
                    NetworkClass::NoNetwork,
                    "transport {transport}, code {code}"
                );
            }
        }
    }

    #[test]
    fn disconnected_snapshot_is_no_network() {
        assert_eq!(
            classify(&NetworkSnapshot::disconnected()),
            NetworkClass::NoNetwork
        );
    }

    #[test]
    fn available_but_not_connected_is_still_classified() {
        let snapshot = NetworkSnapshot::new(TransportType::Wifi, false, true).unwrap();
        assert_eq!(classify(&snapshot), NetworkClass::Wifi);
    }
}

mod transport {
    use super::*;

    #[test]
    fn ethernet_is_eth() {
        let snapshot = NetworkSnapshot::new(TransportType::Ethernet, true, true).unwrap();
        assert_eq!(classify(&snapshot), NetworkClass::Eth);
    }

    #[test]
    fn wifi_is_wifi() {
        let snapshot = NetworkSnapshot::new(TransportType::Wifi, true, true).unwrap();
        assert_eq!(classify(&snapshot), NetworkClass::Wifi);
    }

    #[test]
    fn other_transport_is_unknown() {
        let snapshot = NetworkSnapshot::new(TransportType::Other, true, true).unwrap();
        assert_eq!(classify(&snapshot), NetworkClass::Unknown);
    }

    #[test]
    fn available_without_transport_is_unknown() {
        let snapshot = NetworkSnapshot::new(TransportType::None, false, true).unwrap();
        assert_eq!(classify(&snapshot), NetworkClass::Unknown);
    }
}

mod mobile_buckets {
    use super::*;
    use MobileSubtype as M;

    #[test]
    fn two_g_bucket() {
        for subtype in [M::Gsm, M::Gprs, M::Cdma, M::Edge, M::OneXRtt, M::Iden] {
            assert_eq!(classify(&mobile(subtype, "")), NetworkClass::TwoG, "{subtype:?}");
        }
    }

    #[test]
    fn three_g_bucket() {
        for subtype in [
            M::TdScdma,
            M::EvdoA,
            M::Umts,
            M::Evdo0,
            M::Hsdpa,
            M::Hsupa,
            M::Hspa,
            M::EvdoB,
            M::Ehrpd,
            M::Hspap,
        ] {
            assert_eq!(
                classify(&mobile(subtype, "")),
                NetworkClass::ThreeG,
                "{subtype:?}"
            );
        }
    }

    #[test]
    fn four_g_bucket() {
        assert_eq!(classify(&mobile(M::Lte, "")), NetworkClass::FourG);
        assert_eq!(classify(&mobile(M::Iwlan, "")), NetworkClass::FourG);
    }

    #[test]
    fn four_g_bucket_by_raw_code() {
        assert_eq!(
            classify(&mobile(MobileSubtype::from_code(13), "")),
            NetworkClass::FourG
        );
        assert_eq!(
            classify(&mobile(MobileSubtype::from_code(18), "")),
            NetworkClass::FourG
        );
    }
}

mod subtype_name_fallback {
    use super::*;

    #[test]
    fn three_g_names_match_case_insensitively() {
        for name in ["TD-SCDMA", "td-scdma", "WCDMA", "wcdma", "Cdma2000"] {
            assert_eq!(
                classify(&mobile(MobileSubtype::Unknown, name)),
                NetworkClass::ThreeG,
                "{name}"
            );
        }
    }

    #[test]
    fn unrecognized_name_is_unknown() {
        assert_eq!(
            classify(&mobile(MobileSubtype::Other(99), "LTE-A")),
            NetworkClass::Unknown
        );
        assert_eq!(
            classify(&mobile(MobileSubtype::Unknown, "")),
            NetworkClass::Unknown
        );
    }

    #[test]
    fn nr_falls_back_to_name() {
        assert_eq!(classify(&mobile(MobileSubtype::Nr, "NR")), NetworkClass::Unknown);
        assert_eq!(
            classify(&mobile(MobileSubtype::Nr, "WCDMA")),
            NetworkClass::ThreeG
        );
    }

    #[test]
    fn subtype_code_wins_over_name() {
        assert_eq!(
            classify(&mobile(MobileSubtype::Edge, "WCDMA")),
            NetworkClass::TwoG
        );
        assert_eq!(
            classify(&mobile(MobileSubtype::Lte, "TD-SCDMA")),
            NetworkClass::FourG
        );
    }

    #[test]
    fn partial_name_does_not_match() {
        assert_eq!(
            classify(&mobile(MobileSubtype::Unknown, "WCDMA+")),
            NetworkClass::Unknown
        );
    }
}

mod labels {
    use super::*;

    #[test]
    fn display_uses_canonical_labels() {
        let labels: Vec<String> = [
            NetworkClass::Eth,
            NetworkClass::Wifi,
            NetworkClass::FourG,
            NetworkClass::ThreeG,
            NetworkClass::TwoG,
            NetworkClass::Unknown,
            NetworkClass::NoNetwork,
        ]
        .iter()
        .map(ToString::to_string)
        .collect();

        assert_eq!(
            labels,
            ["ETH", "WIFI", "4G", "3G", "2G", "UNKNOWN", "NO_NETWORK"]
        );
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&NetworkClass::FourG).unwrap();
        assert_eq!(json, "\"4G\"");
    }
}

#[test]
fn classify_is_deterministic() {
    let snapshot = mobile(MobileSubtype::Hsdpa, "HSDPA");
    let first = classify(&snapshot);

    for _ in 0..10 {
        assert_eq!(classify(&snapshot), first);
    }
    assert_eq!(snapshot, mobile(MobileSubtype::Hsdpa, "HSDPA"));
}
