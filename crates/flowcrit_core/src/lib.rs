//! This crate provides the flow-rule match criteria: typed, canonical, hashable descriptions of
//! a condition on one packet header field, together with the header layout they lower into.
pub mod criterion;
pub mod error;
pub mod layout;
pub mod selector;

#[allow(missing_docs)]
pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        criterion::{
            criteria::Criteria, types::CriterionType, Criterion, EthTypeCriterion, FieldCriterion,
            Icmpv4CodeCriterion, Icmpv4TypeCriterion, IpDscpCriterion, IpEcnCriterion,
            IpProtocolCriterion, Ipv4Criterion, Ipv4Prefix, RawField, SctpPortCriterion,
            TcpPortCriterion, UdpPortCriterion, VlanIdCriterion, VlanPcpCriterion,
        },
        error::CriterionError,
        layout::{
            family::{constant, FieldDeclaration, HeaderLayout, LayoutDecl},
            FieldMatch, MaskedValue, Match,
        },
        selector::{SelectorBuilder, TrafficSelector},
    };
}
