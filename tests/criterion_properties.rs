use std::{
    collections::{hash_map::DefaultHasher, HashSet},
    hash::{Hash, Hasher},
};

use flowcrit::prelude::*;
use proptest::prelude::*;

fn hash_of<T: Hash>(t: &T) -> u64 {
    let mut h = DefaultHasher::new();
    t.hash(&mut h);
    h.finish()
}

fn arb_port_type() -> impl Strategy<Value = CriterionType> {
    prop::sample::select(
        CriterionType::ALL
            .into_iter()
            .filter(|ty| ty.is_port())
            .collect::<Vec<_>>(),
    )
}

fn arb_numeric_type() -> impl Strategy<Value = CriterionType> {
    prop::sample::select(
        CriterionType::ALL
            .into_iter()
            .filter(|ty| !ty.is_ipv4())
            .collect::<Vec<_>>(),
    )
}

fn arb_criterion() -> impl Strategy<Value = Criterion> {
    prop_oneof![
        (arb_numeric_type(), any::<i64>())
            .prop_map(|(ty, v)| Criteria::numeric(ty, v).unwrap()),
        (any::<bool>(), any::<u32>(), 0u8..=32).prop_map(|(src, addr, len)| {
            let prefix = Ipv4Prefix::new(addr, len).unwrap();
            if src {
                Criteria::match_ipv4_src(prefix)
            } else {
                Criteria::match_ipv4_dst(prefix)
            }
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    /// Building from `v` and from `v & 0xFFFF` yields the same criterion.
    #[test]
    fn prop_port_canonicalization_is_idempotent(ty in arb_port_type(), v in any::<i64>()) {
        let raw = Criteria::port(ty, v).unwrap();
        let masked = Criteria::port(ty, v & 0xFFFF).unwrap();
        prop_assert_eq!(raw, masked);
        prop_assert_eq!(hash_of(&raw), hash_of(&masked));
        prop_assert_eq!(raw.to_string(), masked.to_string());
    }

    /// Equal criteria hash equally; equality needs both type and canonical value.
    #[test]
    fn prop_hash_consistent_with_eq(
        (ty_a, v_a) in (arb_port_type(), 0u32..0x3_0000),
        (ty_b, v_b) in (arb_port_type(), 0u32..0x3_0000),
    ) {
        let a = Criteria::port(ty_a, v_a).unwrap();
        let b = Criteria::port(ty_b, v_b).unwrap();
        prop_assert_eq!(a == b, ty_a == ty_b && (v_a & 0xFFFF) == (v_b & 0xFFFF));
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
    }

    /// Every numeric type keeps exactly its low `bit_width` bits.
    #[test]
    fn prop_numeric_keeps_field_width(ty in arb_numeric_type(), v in any::<u128>()) {
        let width = ty.bit_width();
        let a = Criteria::numeric(ty, v).unwrap();
        let b = Criteria::numeric(ty, v & ((1u128 << width) - 1)).unwrap();
        prop_assert_eq!(a, b);
        prop_assert_eq!(a.r#type(), ty);
    }

    /// Rendering is stable and parses back to the same criterion.
    #[test]
    fn prop_render_round_trips(c in arb_criterion()) {
        let rendered = c.to_string();
        prop_assert_eq!(&rendered, &c.to_string());
        prop_assert_eq!(parse(&rendered).unwrap(), c);
    }

    /// Selectors compare as sets, whatever order criteria were added in.
    #[test]
    fn prop_selector_order_independent(criteria in prop::collection::vec(arb_criterion(), 0..8)) {
        let forward: TrafficSelector = criteria.iter().copied().collect();
        let mut dedup = HashSet::new();
        let last_wins: Vec<_> = criteria
            .iter()
            .rev()
            .filter(|c| dedup.insert(c.r#type()))
            .copied()
            .collect();
        let backward: TrafficSelector = last_wins.into_iter().collect();
        prop_assert_eq!(&forward, &backward);
        prop_assert_eq!(hash_of(&forward), hash_of(&backward));
        prop_assert_eq!(forward.to_string(), backward.to_string());
    }
}

#[test]
fn test_udp_dst_end_to_end() {
    let first = Criteria::match_udp_dst(8080);
    assert_eq!(first.r#type(), CriterionType::UdpDst);
    match first {
        Criterion::UdpPort(udp) => assert_eq!(udp.udp_port(), 8080),
        other => panic!("unexpected variant {other:?}"),
    }
    let rendered = first.to_string();
    assert!(rendered.contains("UDP_DST"));
    assert!(rendered.contains("8080"));

    let second = Criteria::match_udp_dst(8080 + 65536);
    assert_eq!(first, second);
    assert_eq!(hash_of(&first), hash_of(&second));
}

#[test]
fn test_wide_and_negative_inputs() {
    assert_eq!(
        Criteria::match_udp_src(0x1FFFF),
        Criteria::match_udp_src(0xFFFF)
    );
    for c in [Criteria::match_udp_src(-1), Criteria::match_udp_dst(-1i64)] {
        match c {
            Criterion::UdpPort(udp) => assert_eq!(udp.udp_port(), 65535),
            other => panic!("unexpected variant {other:?}"),
        }
    }
    assert_ne!(Criteria::match_udp_src(80), Criteria::match_udp_dst(80));
}

#[test]
fn test_criteria_shared_across_threads() {
    let selector = TrafficSelector::builder()
        .match_eth_type(0x0800)
        .match_udp_dst(53)
        .build();
    let shared = std::sync::Arc::new(selector);
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let s = std::sync::Arc::clone(&shared);
            std::thread::spawn(move || (s.to_string(), hash_of(&*s)))
        })
        .collect();
    let results: HashSet<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results.len(), 1);
}
