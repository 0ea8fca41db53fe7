//! # Traffic selector
//!
//! A [TrafficSelector] is the set of criteria one flow rule matches on, holding at most one
//! criterion per [CriterionType]. Two selectors with the same criteria are equal and hash the
//! same whatever order the criteria were added in.
//!
//! ## Example
//! ```
//! use flowcrit_core::{criterion::types::CriterionType, selector::TrafficSelector};
//!
//! let selector = TrafficSelector::builder()
//!     .match_eth_type(0x0800)
//!     .match_ip_protocol(17)
//!     .match_udp_dst(53)
//!     .build();
//! assert_eq!(selector.len(), 3);
//! assert_eq!(
//!     selector.get(CriterionType::UdpDst).map(|c| c.to_string()),
//!     Some("UDP_DST{udpPort=53}".to_owned())
//! );
//! ```
use std::{
    fmt::{Display, Formatter},
    hash::{Hash, Hasher},
};

use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use tracing::debug;

use crate::{
    criterion::{criteria::Criteria, types::CriterionType, Criterion, Ipv4Prefix, RawField},
    error::CriterionError,
    layout::MaskedValue,
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TrafficSelector {
    criteria: IndexMap<CriterionType, Criterion, FxBuildHasher>,
}

impl TrafficSelector {
    #[inline]
    pub fn builder() -> SelectorBuilder {
        SelectorBuilder::default()
    }

    /// A selector that matches every packet.
    #[inline]
    pub fn empty() -> Self {
        TrafficSelector::default()
    }

    /// Criteria in the order they were first added.
    pub fn criteria(&self) -> impl Iterator<Item = &Criterion> {
        self.criteria.values()
    }

    #[inline]
    pub fn get(&self, ty: CriterionType) -> Option<&Criterion> {
        self.criteria.get(&ty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Criteria sorted by type, the order used for hashing and rendering.
    fn sorted(&self) -> Vec<&Criterion> {
        let mut v: Vec<_> = self.criteria.values().collect();
        v.sort_unstable_by_key(|c| c.r#type());
        v
    }

    /// Conjunction of every criterion as one ternary string over the header layout.
    ///
    /// Fails when a criterion has no layout field, or when two criteria of different types
    /// share header bits (e.g. `TCP_DST` and `UDP_DST` both live in `dport`) with different
    /// values.
    pub fn masked_value(&self) -> Result<MaskedValue, CriterionError> {
        let mut acc = MaskedValue::default();
        let mut seen: Vec<(CriterionType, MaskedValue)> = Vec::with_capacity(self.len());
        for c in self.criteria.values() {
            let mv = c.masked_value()?;
            acc = match acc.intersect(&mv) {
                Some(next) => next,
                None => {
                    let first = seen
                        .iter()
                        .find(|(_, prev)| prev.intersect(&mv).is_none())
                        .map_or(c.r#type(), |(ty, _)| *ty);
                    return Err(CriterionError::Conflict {
                        first,
                        second: c.r#type(),
                    });
                }
            };
            seen.push((c.r#type(), mv));
        }
        Ok(acc)
    }
}

impl Hash for TrafficSelector {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.sorted().hash(state);
    }
}

impl Display for TrafficSelector {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "TrafficSelector{{criteria=[")?;
        for (i, c) in self.sorted().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", c)?;
        }
        write!(f, "]}}")
    }
}

impl FromIterator<Criterion> for TrafficSelector {
    fn from_iter<T: IntoIterator<Item = Criterion>>(iter: T) -> Self {
        iter.into_iter()
            .fold(SelectorBuilder::default(), SelectorBuilder::add)
            .build()
    }
}

/// Builds a [TrafficSelector]. Adding a criterion whose type is already present replaces the
/// earlier one in place.
#[derive(Clone, Debug, Default)]
pub struct SelectorBuilder {
    criteria: IndexMap<CriterionType, Criterion, FxBuildHasher>,
}

macro_rules! builder_match_fn {
    ($($fn_name:ident),* $(,)?) => {
        $(
            #[inline]
            pub fn $fn_name<R: RawField>(self, value: R) -> Self {
                self.add(Criteria::$fn_name(value))
            }
        )*
    };
}

impl SelectorBuilder {
    pub fn add(mut self, criterion: Criterion) -> Self {
        if let Some(prev) = self.criteria.insert(criterion.r#type(), criterion) {
            if prev != criterion {
                debug!(%prev, %criterion, "replacing criterion of the same type");
            }
        }
        self
    }

    builder_match_fn!(
        match_udp_src,
        match_udp_dst,
        match_tcp_src,
        match_tcp_dst,
        match_sctp_src,
        match_sctp_dst,
        match_eth_type,
        match_vlan_id,
        match_vlan_pcp,
        match_ip_dscp,
        match_ip_ecn,
        match_ip_protocol,
        match_icmpv4_type,
        match_icmpv4_code,
    );

    #[inline]
    pub fn match_ipv4_src(self, prefix: Ipv4Prefix) -> Self {
        self.add(Criteria::match_ipv4_src(prefix))
    }

    #[inline]
    pub fn match_ipv4_dst(self, prefix: Ipv4Prefix) -> Self {
        self.add(Criteria::match_ipv4_dst(prefix))
    }

    /// Drops the criterion of the given type, if any.
    pub fn remove(mut self, ty: CriterionType) -> Self {
        self.criteria.shift_remove(&ty);
        self
    }

    pub fn build(self) -> TrafficSelector {
        TrafficSelector {
            criteria: self.criteria,
        }
    }
}

impl From<TrafficSelector> for SelectorBuilder {
    fn from(value: TrafficSelector) -> Self {
        SelectorBuilder {
            criteria: value.criteria,
        }
    }
}
