//! Layer-2 criteria.
use super::macros::field_criterion;

field_criterion! {
    /// Matches the EtherType (16 bits), rendered in hex: `ETH_TYPE{ethType=0x0800}`.
    EthType => EthTypeCriterion {
        eth_type: u16,
        types: [EthType],
        render: "0x{:04x}",
    }
}

field_criterion! {
    /// Matches the 802.1Q VLAN identifier (12 bits).
    VlanId => VlanIdCriterion {
        vlan_id: u16,
        types: [VlanVid],
        render: "{}",
    }
}

field_criterion! {
    /// Matches the 802.1Q priority code point (3 bits).
    VlanPcp => VlanPcpCriterion {
        priority: u8,
        types: [VlanPcp],
        render: "{}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criterion::types::CriterionType;

    #[test]
    fn test_eth_type_render_hex() {
        let c = EthTypeCriterion::new(0x0800, CriterionType::EthType);
        assert_eq!(c.to_string(), "ETH_TYPE{ethType=0x0800}");
        let c = EthTypeCriterion::new(0x86dd, CriterionType::EthType);
        assert_eq!(c.to_string(), "ETH_TYPE{ethType=0x86dd}");
    }

    #[test]
    fn test_vlan_widths() {
        assert_eq!(VlanIdCriterion::WIDTH, 12);
        assert_eq!(VlanIdCriterion::new(0x1abc, CriterionType::VlanVid).vlan_id(), 0xabc);
        assert_eq!(VlanPcpCriterion::MASK, 0b111);
        assert_eq!(VlanPcpCriterion::new(9u8, CriterionType::VlanPcp).priority(), 1);
        assert_eq!(
            VlanPcpCriterion::new(-1, CriterionType::VlanPcp).to_string(),
            "VLAN_PCP{priority=7}"
        );
    }
}
