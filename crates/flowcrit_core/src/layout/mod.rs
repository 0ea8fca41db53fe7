//! # Layout
//!
//! Lowers criteria into the ternary header representation a matching engine consumes.
//!
//! ```text
//!   Criterion ──field_match()──> FieldMatch ──masked_value()──> MaskedValue
//!                                    |
//!                                    v
//!                              HeaderLayout (field bit ranges)
//! ```
//!
//! ## Example
//! ```
//! use flowcrit_core::{criterion::criteria::Criteria, error::CriterionError};
//!
//! // `dport` and `proto` may be compiled out of the layout
//! let udp = Criteria::match_udp_dst(80);
//! let proto = Criteria::match_ip_protocol(17);
//! match (udp.masked_value(), proto.masked_value()) {
//!     (Ok(a), Ok(b)) => assert!(!a.intersect(&b).unwrap().is_wildcard()),
//!     (a, b) => {
//!         let err = a.err().or(b.err()).unwrap();
//!         assert!(matches!(err, CriterionError::Unencodable(_)));
//!     }
//! }
//! ```

pub mod family;
mod lower;

use std::fmt::{Display, Formatter, Write};

use bitvec::{field::BitField, prelude::*};
use funty::Unsigned;

use family::{constant, LayoutDecl};

/// Match is a match condition for a field.
/// No field exceeds 128 bits, so u128 is adequate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Match<U: Unsigned> {
    ExactMatch { value: U },
    TernaryMatch { value: U, mask: U },
}

/// FieldMatch contains the name of a layout field and the condition on it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FieldMatch<'a, U: Unsigned> {
    pub field: &'a str,
    pub cond: Match<U>,
}

impl<U: Unsigned> FieldMatch<'_, U> {
    /// Places the condition at the field's bit range, or `None` when the layout lacks the field.
    pub fn masked_value(&self) -> Option<MaskedValue> {
        let fdecl = constant::GLOBAL_LAYOUT.get_field_declaration(self.field)?;
        let (value, mask) = match self.cond {
            Match::ExactMatch { value } => (value, U::MAX),
            Match::TernaryMatch { value, mask } => (value & mask, mask),
        };
        Some(MaskedValue::store(value, mask, fdecl.from, fdecl.to))
    }
}

/// MaskedValue is a ternary string over the whole header layout: bits outside `mask` are
/// wildcards.
#[derive(Eq, PartialEq, Hash, Default, Clone, Copy, Debug)]
pub struct MaskedValue {
    pub value:
        BitArray<[constant::HeaderBitStore; constant::HEADERSTORENUM], constant::HeaderBitOrder>,
    pub mask:
        BitArray<[constant::HeaderBitStore; constant::HEADERSTORENUM], constant::HeaderBitOrder>,
}

impl MaskedValue {
    /// Stores the low `to - from` bits of `value` and `mask` at `[from, to)`.
    ///
    /// # Panics
    ///
    /// Panics when the range is empty, ends past `constant::MAX_POS`, or is wider than `U`.
    pub(crate) fn store<U: Unsigned>(value: U, mask: U, from: usize, to: usize) -> Self {
        let mut v = BitArray::ZERO;
        let mut m = BitArray::ZERO;
        v[from..to].store_le(value);
        m[from..to].store_le(mask);
        Self { value: v, mask: m }
    }

    /// Whether every header bit is a wildcard.
    #[inline]
    pub fn is_wildcard(&self) -> bool {
        self.mask.not_any()
    }

    /// Conjunction of two ternary strings, or `None` when they pin a shared bit to different
    /// values and so match no header at all.
    pub fn intersect(&self, rhs: &Self) -> Option<Self> {
        let common = self.mask & rhs.mask;
        if ((self.value ^ rhs.value) & common).any() {
            return None;
        }
        Some(MaskedValue {
            value: self.value | rhs.value,
            mask: self.mask | rhs.mask,
        })
    }

    /// Whether every header described by `other` is also described by `self`.
    pub fn covers(&self, other: &Self) -> bool {
        (self.mask & !other.mask).not_any() && ((self.value ^ other.value) & self.mask).not_any()
    }
}

impl Display for MaskedValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for i in (0..constant::MAX_POS).rev() {
            let bit = if !self.mask[i] {
                '*'
            } else if self.value[i] {
                '1'
            } else {
                '0'
            };
            f.write_char(bit)?;
        }
        Ok(())
    }
}
