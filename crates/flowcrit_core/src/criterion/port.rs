//! Transport-layer port criteria (16 bits unsigned integer).
//!
//! The three transport families share one layout: a source-or-destination discriminant and a
//! port masked to 16 bits. They stay distinct types so a TCP port never equals a UDP port.
use super::macros::field_criterion;

field_criterion! {
    /// Matches a UDP source or destination port.
    ///
    /// Legal discriminants are `UDP_SRC` and `UDP_DST`; rendered as `UDP_DST{udpPort=53}`.
    UdpPort => UdpPortCriterion {
        udp_port: u16,
        types: [UdpSrc, UdpDst],
        render: "{}",
    }
}

field_criterion! {
    /// Matches a TCP source or destination port.
    TcpPort => TcpPortCriterion {
        tcp_port: u16,
        types: [TcpSrc, TcpDst],
        render: "{}",
    }
}

field_criterion! {
    /// Matches an SCTP source or destination port.
    SctpPort => SctpPortCriterion {
        sctp_port: u16,
        types: [SctpSrc, SctpDst],
        render: "{}",
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::hash_map::DefaultHasher,
        hash::{Hash, Hasher},
    };

    use proptest::prelude::*;

    use super::*;
    use crate::criterion::{types::CriterionType, Criterion, FieldCriterion};

    fn hash_of<T: Hash>(t: &T) -> u64 {
        let mut h = DefaultHasher::new();
        t.hash(&mut h);
        h.finish()
    }

    #[test]
    fn test_udp_port_masks_wide_input() {
        let a = UdpPortCriterion::new(0x1FFFFu32, CriterionType::UdpSrc);
        let b = UdpPortCriterion::new(0xFFFFu32, CriterionType::UdpSrc);
        assert_eq!(a.udp_port(), 65535);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_udp_port_masks_negative_input() {
        for ty in UdpPortCriterion::LEGAL_TYPES {
            assert_eq!(UdpPortCriterion::new(-1i32, *ty).udp_port(), 0xFFFF);
            assert_eq!(UdpPortCriterion::new(-1i64, *ty).udp_port(), 0xFFFF);
            assert_eq!(UdpPortCriterion::new(-1i8, *ty).udp_port(), 0xFFFF);
        }
        assert_eq!(
            UdpPortCriterion::new(-65536i32, CriterionType::UdpDst).udp_port(),
            0
        );
    }

    #[test]
    fn test_udp_port_equality_needs_type() {
        let src = UdpPortCriterion::new(80u16, CriterionType::UdpSrc);
        let dst = UdpPortCriterion::new(80u16, CriterionType::UdpDst);
        assert_ne!(src, dst);
        assert_eq!(src.udp_port(), dst.udp_port());
    }

    #[test]
    fn test_udp_port_render() {
        let c = UdpPortCriterion::new(8080, CriterionType::UdpDst);
        assert_eq!(c.to_string(), "UDP_DST{udpPort=8080}");
        assert_eq!(c.to_string(), c.to_string());
        assert_eq!(c.r#type(), CriterionType::UdpDst);
        assert_eq!(c.udp_port(), 8080);
    }

    #[test]
    fn test_udp_port_end_to_end() {
        let first = UdpPortCriterion::new(8080, CriterionType::UdpDst);
        let second = UdpPortCriterion::new(8080 + 65536, CriterionType::UdpDst);
        assert_eq!(first, second);
        assert_eq!(first.to_string(), second.to_string());
        let rendered = first.to_string();
        assert!(rendered.contains("UDP_DST"));
        assert!(rendered.contains("8080"));
    }

    #[test]
    fn test_transport_families_never_equal() {
        let udp: Criterion = UdpPortCriterion::new(443, CriterionType::UdpDst).into();
        let tcp: Criterion = TcpPortCriterion::new(443, CriterionType::TcpDst).into();
        let sctp: Criterion = SctpPortCriterion::new(443, CriterionType::SctpDst).into();
        assert_ne!(udp, tcp);
        assert_ne!(tcp, sctp);
        assert_eq!(tcp.to_string(), "TCP_DST{tcpPort=443}");
        assert_eq!(sctp.to_string(), "SCTP_DST{sctpPort=443}");
    }

    #[test]
    fn test_accessors_are_stable() {
        let c = TcpPortCriterion::new(u64::MAX, CriterionType::TcpSrc);
        for _ in 0..3 {
            assert_eq!(c.r#type(), CriterionType::TcpSrc);
            assert_eq!(c.tcp_port(), u16::MAX);
        }
    }

    proptest! {
        #[test]
        fn prop_udp_port_eq_implies_hash_eq(
            src_a in any::<bool>(),
            src_b in any::<bool>(),
            a in any::<i32>(),
            b in prop_oneof![any::<i32>(), Just(0)],
        ) {
            let ty = |src: bool| if src { CriterionType::UdpSrc } else { CriterionType::UdpDst };
            // half of the cases reuse `a`'s low bits so equal pairs actually occur
            let b = if b == 0 { a.wrapping_add(0x10000) } else { b };
            let x = UdpPortCriterion::new(a, ty(src_a));
            let y = UdpPortCriterion::new(b, ty(src_b));
            prop_assert_eq!(x == y, src_a == src_b && (a & 0xFFFF) == (b & 0xFFFF));
            if x == y {
                prop_assert_eq!(hash_of(&x), hash_of(&y));
            }
            prop_assert_eq!(x.udp_port() as i32, a & 0xFFFF);
        }
    }
}
