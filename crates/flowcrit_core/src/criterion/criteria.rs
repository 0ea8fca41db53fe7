//! Factory for criteria.
//!
//! The `match_*` functions pair every variant with its legal discriminants by construction.
//! The generic entry points [Criteria::port], [Criteria::numeric] and [Criteria::checked]
//! take the discriminant as data and reject the ones the requested family cannot carry.
use super::{
    types::CriterionType, Criterion, EthTypeCriterion, FieldCriterion, Icmpv4CodeCriterion,
    Icmpv4TypeCriterion, IpDscpCriterion, IpEcnCriterion, IpProtocolCriterion, Ipv4Criterion,
    Ipv4Prefix, RawField, SctpPortCriterion, TcpPortCriterion, UdpPortCriterion, VlanIdCriterion,
    VlanPcpCriterion,
};
use crate::error::CriterionError;

pub struct Criteria;

macro_rules! criteria_fn {
    ($($(#[$meta:meta])* $fn_name:ident => $name:ident($ty:ident);)*) => {
        $(
            $(#[$meta])*
            #[inline]
            pub fn $fn_name<R: RawField>(value: R) -> Criterion {
                $name::new(value, CriterionType::$ty).into()
            }
        )*
    };
}

impl Criteria {
    criteria_fn! {
        /// Matches a UDP source port; the value is masked to 16 bits.
        match_udp_src => UdpPortCriterion(UdpSrc);
        /// Matches a UDP destination port; the value is masked to 16 bits.
        match_udp_dst => UdpPortCriterion(UdpDst);
        match_tcp_src => TcpPortCriterion(TcpSrc);
        match_tcp_dst => TcpPortCriterion(TcpDst);
        match_sctp_src => SctpPortCriterion(SctpSrc);
        match_sctp_dst => SctpPortCriterion(SctpDst);
        match_eth_type => EthTypeCriterion(EthType);
        match_vlan_id => VlanIdCriterion(VlanVid);
        match_vlan_pcp => VlanPcpCriterion(VlanPcp);
        match_ip_dscp => IpDscpCriterion(IpDscp);
        match_ip_ecn => IpEcnCriterion(IpEcn);
        match_ip_protocol => IpProtocolCriterion(IpProto);
        match_icmpv4_type => Icmpv4TypeCriterion(Icmpv4Type);
        match_icmpv4_code => Icmpv4CodeCriterion(Icmpv4Code);
    }

    #[inline]
    pub fn match_ipv4_src(prefix: Ipv4Prefix) -> Criterion {
        Ipv4Criterion::new(prefix, CriterionType::Ipv4Src).into()
    }

    #[inline]
    pub fn match_ipv4_dst(prefix: Ipv4Prefix) -> Criterion {
        Ipv4Criterion::new(prefix, CriterionType::Ipv4Dst).into()
    }

    /// Builds an IPv4 criterion from a discriminant given as data.
    pub fn ipv4(ty: CriterionType, prefix: Ipv4Prefix) -> Result<Criterion, CriterionError> {
        if !Ipv4Criterion::LEGAL_TYPES.contains(&ty) {
            return Err(CriterionError::IllegalType { ty, family: "IPv4" });
        }
        Ok(Ipv4Criterion::new(prefix, ty).into())
    }

    /// Builds a transport port criterion. Only the six port discriminants are accepted; the
    /// value is masked to 16 bits.
    pub fn port<R: RawField>(ty: CriterionType, value: R) -> Result<Criterion, CriterionError> {
        match ty {
            CriterionType::UdpSrc | CriterionType::UdpDst => {
                Ok(UdpPortCriterion::new(value, ty).into())
            }
            CriterionType::TcpSrc | CriterionType::TcpDst => {
                Ok(TcpPortCriterion::new(value, ty).into())
            }
            CriterionType::SctpSrc | CriterionType::SctpDst => {
                Ok(SctpPortCriterion::new(value, ty).into())
            }
            _ => Err(CriterionError::IllegalType {
                ty,
                family: "transport port",
            }),
        }
    }

    /// Builds any single-valued criterion, masking the value to the field width.
    pub fn numeric<R: RawField>(ty: CriterionType, value: R) -> Result<Criterion, CriterionError> {
        let c: Criterion = match ty {
            CriterionType::EthType => EthTypeCriterion::new(value, ty).into(),
            CriterionType::VlanVid => VlanIdCriterion::new(value, ty).into(),
            CriterionType::VlanPcp => VlanPcpCriterion::new(value, ty).into(),
            CriterionType::IpDscp => IpDscpCriterion::new(value, ty).into(),
            CriterionType::IpEcn => IpEcnCriterion::new(value, ty).into(),
            CriterionType::IpProto => IpProtocolCriterion::new(value, ty).into(),
            CriterionType::Icmpv4Type => Icmpv4TypeCriterion::new(value, ty).into(),
            CriterionType::Icmpv4Code => Icmpv4CodeCriterion::new(value, ty).into(),
            _ if ty.is_port() => return Criteria::port(ty, value),
            _ => {
                return Err(CriterionError::IllegalType {
                    ty,
                    family: "numeric",
                })
            }
        };
        Ok(c)
    }

    /// Same as [Criteria::numeric], but rejects values that do not fit the field instead of
    /// truncating them.
    pub fn checked<R: RawField>(ty: CriterionType, value: R) -> Result<Criterion, CriterionError> {
        if !ty.is_ipv4() && !value.fits(ty.bit_width()) {
            return Err(CriterionError::OutOfRange {
                ty,
                value: value.to_string(),
                width: ty.bit_width(),
            });
        }
        Criteria::numeric(ty, value)
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    #[test]
    fn test_match_fns_pick_type() {
        assert_eq!(Criteria::match_udp_src(1).r#type(), CriterionType::UdpSrc);
        assert_eq!(Criteria::match_udp_dst(1).r#type(), CriterionType::UdpDst);
        assert_eq!(Criteria::match_sctp_dst(1).r#type(), CriterionType::SctpDst);
        assert_eq!(Criteria::match_vlan_pcp(1).r#type(), CriterionType::VlanPcp);
        assert_eq!(
            Criteria::match_ipv4_dst(Ipv4Prefix::host(Ipv4Addr::LOCALHOST)).r#type(),
            CriterionType::Ipv4Dst
        );
    }

    #[test]
    fn test_port_rejects_other_families() {
        assert_eq!(
            Criteria::port(CriterionType::UdpDst, 8080),
            Ok(Criteria::match_udp_dst(8080))
        );
        assert_eq!(
            Criteria::port(CriterionType::IpProto, 6),
            Err(CriterionError::IllegalType {
                ty: CriterionType::IpProto,
                family: "transport port"
            })
        );
    }

    #[test]
    fn test_numeric_covers_every_numeric_type() {
        for ty in CriterionType::ALL {
            let built = Criteria::numeric(ty, 1u8);
            if ty.is_ipv4() {
                assert!(built.is_err());
            } else {
                assert_eq!(built.map(|c| c.r#type()), Ok(ty));
            }
        }
    }

    #[test]
    fn test_numeric_masks_silently() {
        assert_eq!(
            Criteria::numeric(CriterionType::UdpSrc, 0x1FFFF),
            Ok(Criteria::match_udp_src(0xFFFF))
        );
        assert_eq!(
            Criteria::numeric(CriterionType::IpDscp, 64 + 46),
            Ok(Criteria::match_ip_dscp(46))
        );
    }

    #[test]
    fn test_checked_rejects_wide_values() {
        assert_eq!(
            Criteria::checked(CriterionType::UdpSrc, 65535),
            Ok(Criteria::match_udp_src(65535))
        );
        assert_eq!(
            Criteria::checked(CriterionType::UdpSrc, 65536),
            Err(CriterionError::OutOfRange {
                ty: CriterionType::UdpSrc,
                value: "65536".to_owned(),
                width: 16
            })
        );
        assert!(Criteria::checked(CriterionType::VlanVid, -1).is_err());
        assert!(Criteria::checked(CriterionType::VlanPcp, 8).is_err());
        assert!(Criteria::checked(CriterionType::Ipv4Src, 1).is_err());
    }

    #[test]
    fn test_ipv4_rejects_other_families() {
        let prefix = Ipv4Prefix::new(Ipv4Addr::new(10, 0, 0, 0), 8).unwrap();
        assert_eq!(
            Criteria::ipv4(CriterionType::Ipv4Src, prefix),
            Ok(Criteria::match_ipv4_src(prefix))
        );
        assert!(Criteria::ipv4(CriterionType::UdpSrc, prefix).is_err());
    }
}
