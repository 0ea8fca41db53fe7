//! Layer-3 criteria.
use std::{
    fmt::{Display, Formatter},
    net::Ipv4Addr,
};

use super::{macros::field_criterion, types::CriterionType, Criterion, FieldCriterion};
use crate::error::CriterionError;

const INET4_LEN: u8 = u32::BITS as u8;

/// Ipv4Prefix is an IPv4 address with a prefix length. Host bits are always zero, so
/// `10.1.2.3/8` and `10.0.0.0/8` are the same prefix.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4Prefix {
    addr: u32,
    len: u8,
}

impl Ipv4Prefix {
    pub fn new(addr: impl Into<u32>, len: u8) -> Result<Self, CriterionError> {
        if len > INET4_LEN {
            return Err(CriterionError::PrefixLength { len });
        }
        let addr = addr.into() & Self::mask_of(len);
        Ok(Ipv4Prefix { addr, len })
    }

    /// A /32 prefix for a single host.
    #[inline]
    pub fn host(addr: impl Into<u32>) -> Self {
        Ipv4Prefix {
            addr: addr.into(),
            len: INET4_LEN,
        }
    }

    #[inline]
    fn mask_of(len: u8) -> u32 {
        match len {
            0 => 0,
            _ => u32::MAX << (INET4_LEN - len),
        }
    }

    #[inline]
    pub fn addr(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.addr)
    }

    #[inline]
    pub fn bits(&self) -> u32 {
        self.addr
    }

    #[inline]
    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    #[inline]
    pub fn mask(&self) -> u32 {
        Self::mask_of(self.len)
    }

    pub fn contains(&self, addr: impl Into<u32>) -> bool {
        addr.into() & self.mask() == self.addr
    }
}

impl Display for Ipv4Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr(), self.len)
    }
}

/// Matches an IPv4 source or destination prefix: `IPV4_SRC{ip=10.0.0.0/8}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4Criterion {
    ty: CriterionType,
    ip: Ipv4Prefix,
}

impl Ipv4Criterion {
    #[inline]
    pub(crate) fn new(ip: Ipv4Prefix, ty: CriterionType) -> Self {
        Ipv4Criterion { ty, ip }
    }

    #[inline]
    pub fn ip(&self) -> Ipv4Prefix {
        self.ip
    }
}

impl FieldCriterion for Ipv4Criterion {
    const LEGAL_TYPES: &'static [CriterionType] = &[CriterionType::Ipv4Src, CriterionType::Ipv4Dst];

    #[inline]
    fn r#type(&self) -> CriterionType {
        self.ty
    }
}

impl Display for Ipv4Criterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{{{}={}}}", self.ty, self.ty.label(), self.ip)
    }
}

impl From<Ipv4Criterion> for Criterion {
    #[inline]
    fn from(value: Ipv4Criterion) -> Self {
        Criterion::Ipv4(value)
    }
}

field_criterion! {
    /// Matches the IP protocol number (8 bits).
    IpProtocol => IpProtocolCriterion {
        protocol: u8,
        types: [IpProto],
        render: "{}",
    }
}

field_criterion! {
    /// Matches the DSCP bits of the IP traffic class (6 bits).
    IpDscp => IpDscpCriterion {
        ip_dscp: u8,
        types: [IpDscp],
        render: "{}",
    }
}

field_criterion! {
    /// Matches the ECN bits of the IP traffic class (2 bits).
    IpEcn => IpEcnCriterion {
        ip_ecn: u8,
        types: [IpEcn],
        render: "{}",
    }
}
