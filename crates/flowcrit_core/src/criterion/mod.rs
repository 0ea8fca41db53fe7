//! # Criterion
//!
//! ## Relations of important structs
//! ```text
//!   raw integer ──> Criteria (factory) ──> XxxCriterion ──into──> Criterion
//!                                                                    |
//!                                                                    v
//!                                           TrafficSelector / FieldMatch / MaskedValue
//! ```
//!
//! Every variant is an immutable `(type, value)` pair whose value is masked to the width of its
//! header field when built, so two criteria built from values that differ only above that width
//! are equal and hash the same. The [Criterion] enum closes the family: comparing criteria of
//! different variants is always unequal without any runtime type check.
//!
//! ## Example
//! ```
//! use flowcrit_core::criterion::{criteria::Criteria, types::CriterionType};
//!
//! let a = Criteria::match_udp_dst(8080);
//! let b = Criteria::match_udp_dst(8080 + 65536);
//! assert_eq!(a, b);
//! assert_eq!(a.r#type(), CriterionType::UdpDst);
//! assert_eq!(a.to_string(), "UDP_DST{udpPort=8080}");
//! ```

pub mod criteria;
mod ethernet;
mod icmp;
mod ip;
mod macros;
mod port;
pub mod types;

use std::{
    fmt::{Debug, Display, Formatter},
    hash::Hash,
};

use types::CriterionType;

pub use ethernet::{EthTypeCriterion, VlanIdCriterion, VlanPcpCriterion};
pub use icmp::{Icmpv4CodeCriterion, Icmpv4TypeCriterion};
pub use ip::{IpDscpCriterion, IpEcnCriterion, IpProtocolCriterion, Ipv4Criterion, Ipv4Prefix};
pub use port::{SctpPortCriterion, TcpPortCriterion, UdpPortCriterion};

/// RawField is any primitive integer a criterion value can be built from.
///
/// Signed inputs are read as two's complement, so `-1` keeps all of its low bits set.
pub trait RawField: Copy + Display {
    /// Low 128 bits of the two's complement representation.
    fn low_bits(self) -> u128;
    /// Whether the value is non-negative and has no bit set at or above `width`.
    fn fits(self, width: u32) -> bool;
}

macro_rules! raw_field_unsigned_impl {
    ($($t:ty),*) => {
        $(
            impl RawField for $t {
                #[inline]
                fn low_bits(self) -> u128 {
                    self as u128
                }

                #[inline]
                fn fits(self, width: u32) -> bool {
                    (self as u128).checked_shr(width).unwrap_or(0) == 0
                }
            }
        )*
    };
}

macro_rules! raw_field_signed_impl {
    ($($t:ty),*) => {
        $(
            impl RawField for $t {
                #[inline]
                fn low_bits(self) -> u128 {
                    self as i128 as u128
                }

                #[inline]
                fn fits(self, width: u32) -> bool {
                    self >= 0 && (self as u128).checked_shr(width).unwrap_or(0) == 0
                }
            }
        )*
    };
}

raw_field_unsigned_impl!(u8, u16, u32, u64, u128, usize);
raw_field_signed_impl!(i8, i16, i32, i64, i128, isize);

/// FieldCriterion is the capability every criterion variant provides.
///
/// Equality, hashing and rendering are all derived from `(type, canonical value)` and nothing
/// else; there is no mutator, a different criterion is a different value.
pub trait FieldCriterion:
    Copy + Clone + Eq + PartialEq + Ord + PartialOrd + Hash + Display + Debug + Into<Criterion>
{
    /// Discriminants this variant may carry. Only the factory enforces it.
    const LEGAL_TYPES: &'static [CriterionType];

    fn r#type(&self) -> CriterionType;
}

/// Criterion is the closed family of match conditions a flow rule can carry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    EthType(EthTypeCriterion),
    VlanId(VlanIdCriterion),
    VlanPcp(VlanPcpCriterion),
    IpDscp(IpDscpCriterion),
    IpEcn(IpEcnCriterion),
    IpProtocol(IpProtocolCriterion),
    Ipv4(Ipv4Criterion),
    TcpPort(TcpPortCriterion),
    UdpPort(UdpPortCriterion),
    SctpPort(SctpPortCriterion),
    Icmpv4Type(Icmpv4TypeCriterion),
    Icmpv4Code(Icmpv4CodeCriterion),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            Criterion::EthType($c) => $body,
            Criterion::VlanId($c) => $body,
            Criterion::VlanPcp($c) => $body,
            Criterion::IpDscp($c) => $body,
            Criterion::IpEcn($c) => $body,
            Criterion::IpProtocol($c) => $body,
            Criterion::Ipv4($c) => $body,
            Criterion::TcpPort($c) => $body,
            Criterion::UdpPort($c) => $body,
            Criterion::SctpPort($c) => $body,
            Criterion::Icmpv4Type($c) => $body,
            Criterion::Icmpv4Code($c) => $body,
        }
    };
}

impl FieldCriterion for Criterion {
    const LEGAL_TYPES: &'static [CriterionType] = &CriterionType::ALL;

    #[inline]
    fn r#type(&self) -> CriterionType {
        dispatch!(self, c => c.r#type())
    }
}

impl Criterion {
    /// Discriminant of the wrapped variant, without importing [FieldCriterion].
    #[inline]
    pub fn r#type(&self) -> CriterionType {
        <Self as FieldCriterion>::r#type(self)
    }
}

impl Display for Criterion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        dispatch!(self, c => Display::fmt(c, f))
    }
}
