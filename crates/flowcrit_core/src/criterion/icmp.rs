//! ICMPv4 criteria.
use super::macros::field_criterion;

field_criterion! {
    /// Matches the ICMPv4 message type (8 bits).
    Icmpv4Type => Icmpv4TypeCriterion {
        icmp_type: u8,
        types: [Icmpv4Type],
        render: "{}",
    }
}

field_criterion! {
    /// Matches the ICMPv4 message code (8 bits).
    Icmpv4Code => Icmpv4CodeCriterion {
        icmp_code: u8,
        types: [Icmpv4Code],
        render: "{}",
    }
}
