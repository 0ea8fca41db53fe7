use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use crate::error::CriterionError;

/// CriterionType is the discriminant of a criterion: which header field it matches and how.
///
/// The set is closed. A variant type accepts only the discriminants listed in its
/// [LEGAL_TYPES](crate::criterion::FieldCriterion::LEGAL_TYPES).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CriterionType {
    EthType,
    VlanVid,
    VlanPcp,
    IpDscp,
    IpEcn,
    IpProto,
    Ipv4Src,
    Ipv4Dst,
    TcpSrc,
    TcpDst,
    UdpSrc,
    UdpDst,
    SctpSrc,
    SctpDst,
    Icmpv4Type,
    Icmpv4Code,
}

impl CriterionType {
    pub const ALL: [CriterionType; 16] = [
        CriterionType::EthType,
        CriterionType::VlanVid,
        CriterionType::VlanPcp,
        CriterionType::IpDscp,
        CriterionType::IpEcn,
        CriterionType::IpProto,
        CriterionType::Ipv4Src,
        CriterionType::Ipv4Dst,
        CriterionType::TcpSrc,
        CriterionType::TcpDst,
        CriterionType::UdpSrc,
        CriterionType::UdpDst,
        CriterionType::SctpSrc,
        CriterionType::SctpDst,
        CriterionType::Icmpv4Type,
        CriterionType::Icmpv4Code,
    ];

    /// Upper-snake name used in renderings, e.g. `UDP_SRC`.
    pub const fn name(self) -> &'static str {
        match self {
            CriterionType::EthType => "ETH_TYPE",
            CriterionType::VlanVid => "VLAN_VID",
            CriterionType::VlanPcp => "VLAN_PCP",
            CriterionType::IpDscp => "IP_DSCP",
            CriterionType::IpEcn => "IP_ECN",
            CriterionType::IpProto => "IP_PROTO",
            CriterionType::Ipv4Src => "IPV4_SRC",
            CriterionType::Ipv4Dst => "IPV4_DST",
            CriterionType::TcpSrc => "TCP_SRC",
            CriterionType::TcpDst => "TCP_DST",
            CriterionType::UdpSrc => "UDP_SRC",
            CriterionType::UdpDst => "UDP_DST",
            CriterionType::SctpSrc => "SCTP_SRC",
            CriterionType::SctpDst => "SCTP_DST",
            CriterionType::Icmpv4Type => "ICMPV4_TYPE",
            CriterionType::Icmpv4Code => "ICMPV4_CODE",
        }
    }

    /// Field label of the payload in renderings, e.g. `udpPort` in `UDP_SRC{udpPort=53}`.
    pub const fn label(self) -> &'static str {
        match self {
            CriterionType::EthType => "ethType",
            CriterionType::VlanVid => "vlanId",
            CriterionType::VlanPcp => "priority",
            CriterionType::IpDscp => "ipDscp",
            CriterionType::IpEcn => "ipEcn",
            CriterionType::IpProto => "protocol",
            CriterionType::Ipv4Src | CriterionType::Ipv4Dst => "ip",
            CriterionType::TcpSrc | CriterionType::TcpDst => "tcpPort",
            CriterionType::UdpSrc | CriterionType::UdpDst => "udpPort",
            CriterionType::SctpSrc | CriterionType::SctpDst => "sctpPort",
            CriterionType::Icmpv4Type => "icmpType",
            CriterionType::Icmpv4Code => "icmpCode",
        }
    }

    /// Number of significant bits in the matched value.
    pub const fn bit_width(self) -> u32 {
        match self {
            CriterionType::EthType => 16,
            CriterionType::VlanVid => 12,
            CriterionType::VlanPcp => 3,
            CriterionType::IpDscp => 6,
            CriterionType::IpEcn => 2,
            CriterionType::IpProto => 8,
            CriterionType::Ipv4Src | CriterionType::Ipv4Dst => 32,
            CriterionType::TcpSrc
            | CriterionType::TcpDst
            | CriterionType::UdpSrc
            | CriterionType::UdpDst
            | CriterionType::SctpSrc
            | CriterionType::SctpDst => 16,
            CriterionType::Icmpv4Type | CriterionType::Icmpv4Code => 8,
        }
    }

    #[inline]
    pub const fn is_port(self) -> bool {
        matches!(
            self,
            CriterionType::TcpSrc
                | CriterionType::TcpDst
                | CriterionType::UdpSrc
                | CriterionType::UdpDst
                | CriterionType::SctpSrc
                | CriterionType::SctpDst
        )
    }

    #[inline]
    pub const fn is_ipv4(self) -> bool {
        matches!(self, CriterionType::Ipv4Src | CriterionType::Ipv4Dst)
    }
}

impl Display for CriterionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CriterionType {
    type Err = CriterionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CriterionType::ALL
            .into_iter()
            .find(|ty| ty.name() == s)
            .ok_or_else(|| CriterionError::UnknownType(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for ty in CriterionType::ALL {
            assert_eq!(ty.to_string().parse::<CriterionType>(), Ok(ty));
        }
        assert_eq!(
            "UDP_PORT".parse::<CriterionType>(),
            Err(CriterionError::UnknownType("UDP_PORT".to_owned()))
        );
    }

    #[test]
    fn test_port_family() {
        let ports: Vec<_> = CriterionType::ALL
            .into_iter()
            .filter(|ty| ty.is_port())
            .collect();
        assert_eq!(ports.len(), 6);
        assert!(ports.iter().all(|ty| ty.bit_width() == 16));
        assert!(!CriterionType::EthType.is_port());
    }

    #[test]
    fn test_shared_labels() {
        assert_eq!(CriterionType::UdpSrc.label(), CriterionType::UdpDst.label());
        assert_ne!(CriterionType::UdpSrc.label(), CriterionType::TcpSrc.label());
    }
}
