use serde::{Deserialize, Serialize};

use crate::config::EcanConfig;

/// The economic attention triple attached to one graph node.
///
/// STI measures immediate salience, LTI durable relevance, and VLTI marks
/// the entry as permanently exempt from forgetting. Entries are created on
/// first computation for a node id and owned by the economics engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttentionValue {
    /// Short-term importance. May be negative.
    pub sti: i64,
    /// Long-term importance. Never negative.
    pub lti: i64,
    /// Very-long-term importance: a hard binary permanence flag.
    pub vlti: bool,
}

impl AttentionValue {
    pub fn new(sti: i64, lti: i64, vlti: bool) -> Self {
        Self { sti, lti, vlti }
    }

    /// Copy of this value with sti/lti forced into the config's bounds.
    pub fn clamped(&self, config: &EcanConfig) -> Self {
        Self {
            sti: self.sti.clamp(config.min_sti, config.max_sti),
            lti: self.lti.clamp(0, config.max_lti),
            vlti: self.vlti,
        }
    }

    /// Whether both bounds invariants hold under the given config.
    pub fn in_bounds(&self, config: &EcanConfig) -> bool {
        self.sti >= config.min_sti
            && self.sti <= config.max_sti
            && self.lti >= 0
            && self.lti <= config.max_lti
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zeroed() {
        let value = AttentionValue::default();
        assert_eq!(value.sti, 0);
        assert_eq!(value.lti, 0);
        assert!(!value.vlti);
    }

    #[test]
    fn test_clamped_respects_bounds() {
        let config = EcanConfig::default();
        let wild = AttentionValue::new(i64::MAX, -50, true);
        let clamped = wild.clamped(&config);
        assert_eq!(clamped.sti, config.max_sti);
        assert_eq!(clamped.lti, 0);
        assert!(clamped.vlti, "clamping never touches vlti");
        assert!(clamped.in_bounds(&config));
    }

    #[test]
    fn test_in_bounds() {
        let config = EcanConfig::default();
        assert!(AttentionValue::new(0, 0, false).in_bounds(&config));
        assert!(!AttentionValue::new(config.max_sti + 1, 0, false).in_bounds(&config));
        assert!(!AttentionValue::new(0, -1, false).in_bounds(&config));
    }

    #[test]
    fn test_serde_roundtrip() {
        let value = AttentionValue::new(1234, 567, true);
        let json = serde_json::to_string(&value).unwrap();
        let back: AttentionValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
