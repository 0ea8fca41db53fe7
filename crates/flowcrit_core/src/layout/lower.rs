use super::{
    family::{constant::GLOBAL_LAYOUT, LayoutDecl},
    FieldMatch, Match, MaskedValue,
};
use crate::{
    criterion::{types::CriterionType, Criterion},
    error::CriterionError,
};

// 802.1Q TCI: PCP(3) | DEI(1) | VID(12)
const VLAN_PCP_SHIFT: u32 = 13;
const VLAN_PCP_MASK: u128 = 0xE000;
const VLAN_VID_MASK: u128 = 0x0FFF;
// IP traffic class: DSCP(6) | ECN(2)
const IP_DSCP_SHIFT: u32 = 2;
const IP_DSCP_MASK: u128 = 0xFC;
const IP_ECN_MASK: u128 = 0x03;

#[inline]
fn exact(value: impl Into<u128>) -> Match<u128> {
    Match::ExactMatch {
        value: value.into(),
    }
}

#[inline]
fn ternary(value: u128, mask: u128) -> Match<u128> {
    Match::TernaryMatch { value, mask }
}

#[inline]
fn direction(ty: CriterionType, src: &'static str, dst: &'static str) -> &'static str {
    match ty {
        CriterionType::Ipv4Src
        | CriterionType::TcpSrc
        | CriterionType::UdpSrc
        | CriterionType::SctpSrc => src,
        _ => dst,
    }
}

impl Criterion {
    /// Lowers the criterion to a condition on one header-layout field.
    ///
    /// Transport ports of every protocol share `sport`/`dport`; VLAN id and priority share `tag`;
    /// DSCP and ECN share `tos`. ICMPv4 criteria, and fields disabled in the build, have no
    /// layout field.
    pub fn field_match(&self) -> Result<FieldMatch<'static, u128>, CriterionError> {
        let ty = self.r#type();
        let (field, cond) = match self {
            Criterion::TcpPort(c) => (direction(ty, "sport", "dport"), exact(c.tcp_port())),
            Criterion::UdpPort(c) => (direction(ty, "sport", "dport"), exact(c.udp_port())),
            Criterion::SctpPort(c) => (direction(ty, "sport", "dport"), exact(c.sctp_port())),
            Criterion::Ipv4(c) => (
                direction(ty, "sip", "dip"),
                ternary(c.ip().bits() as u128, c.ip().mask() as u128),
            ),
            Criterion::IpProtocol(c) => ("proto", exact(c.protocol())),
            Criterion::EthType(c) => ("ethtype", exact(c.eth_type())),
            Criterion::VlanId(c) => ("tag", ternary(c.vlan_id() as u128, VLAN_VID_MASK)),
            Criterion::VlanPcp(c) => (
                "tag",
                ternary((c.priority() as u128) << VLAN_PCP_SHIFT, VLAN_PCP_MASK),
            ),
            Criterion::IpDscp(c) => (
                "tos",
                ternary((c.ip_dscp() as u128) << IP_DSCP_SHIFT, IP_DSCP_MASK),
            ),
            Criterion::IpEcn(c) => ("tos", ternary(c.ip_ecn() as u128, IP_ECN_MASK)),
            Criterion::Icmpv4Type(_) | Criterion::Icmpv4Code(_) => {
                return Err(CriterionError::Unencodable(ty))
            }
        };
        if GLOBAL_LAYOUT.get_field_declaration(field).is_none() {
            return Err(CriterionError::Unencodable(ty));
        }
        Ok(FieldMatch { field, cond })
    }

    /// The criterion as a ternary string over the whole header layout.
    pub fn masked_value(&self) -> Result<MaskedValue, CriterionError> {
        self.field_match()?
            .masked_value()
            .ok_or(CriterionError::Unencodable(self.r#type()))
    }
}
