//! Errors raised by the criterion factories and by header-layout lowering.
//!
//! Canonicalization never produces an error: out-of-range numeric input is masked to the field
//! width. Errors only come from the opt-in strict factory, from discriminants handed to a factory
//! that cannot carry them, and from lowering into a layout that lacks the field.

use thiserror::Error;

use crate::criterion::types::CriterionType;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriterionError {
    /// The discriminant does not belong to the field family the factory builds.
    #[error("{ty} is not a legal discriminant for {family} criteria")]
    IllegalType {
        ty: CriterionType,
        family: &'static str,
    },

    /// Strict construction received a value wider than the field.
    #[error("value {value} does not fit the {width}-bit field of {ty}")]
    OutOfRange {
        ty: CriterionType,
        value: String,
        width: u32,
    },

    #[error("prefix length {len} exceeds 32")]
    PrefixLength { len: u8 },

    #[error("unknown criterion type `{0}`")]
    UnknownType(String),

    /// The header layout has no field for this discriminant.
    #[error("{0} has no field in the header layout")]
    Unencodable(CriterionType),

    /// Two criteria pin the same header bits to different values.
    #[error("{first} and {second} pin the same header bits to different values")]
    Conflict {
        first: CriterionType,
        second: CriterionType,
    },
}
