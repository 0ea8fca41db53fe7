//! # flowcrit
//!
//! Typed, canonical match criteria for flow rules.
//!
//! ```
//! use flowcrit::prelude::*;
//!
//! let a = Criteria::match_udp_dst(8080);
//! let b = Criteria::match_udp_dst(8080 + 65536);
//! assert_eq!(a, b);
//! assert_eq!(parse(&a.to_string()).unwrap(), a);
//! ```
pub use flowcrit_internal::*;
