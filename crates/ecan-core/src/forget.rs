use crate::system::AttentionSystem;

/// Prune entries whose STI has fallen below the forgetting threshold.
///
/// VLTI entries are exempt no matter how far their STI falls — the flag is
/// a permanence guarantee, not a score. Forgotten ids read as absent from
/// then on. Returns the number of entries removed.
pub fn forget(system: &mut AttentionSystem) -> usize {
    let threshold = system.config().forgetting_threshold;
    let before = system.len();
    system.retain(|_, value| value.vlti || value.sti >= threshold);
    before - system.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attention::AttentionValue;
    use crate::config::EcanConfig;

    fn system() -> AttentionSystem {
        AttentionSystem::new(EcanConfig::default()).unwrap()
    }

    #[test]
    fn test_below_threshold_is_forgotten() {
        let mut sys = system();
        sys.set_attention_value("faded", AttentionValue::new(-2_000, 0, false));

        let removed = forget(&mut sys);

        assert_eq!(removed, 1);
        assert!(sys.get_attention_value("faded").is_none());
    }

    #[test]
    fn test_at_threshold_survives() {
        let mut sys = system();
        let threshold = sys.config().forgetting_threshold;
        sys.set_attention_value("edge", AttentionValue::new(threshold, 0, false));

        assert_eq!(forget(&mut sys), 0);
        assert!(sys.get_attention_value("edge").is_some());
    }

    #[test]
    fn test_vlti_is_exempt() {
        let mut sys = system();
        let min = sys.config().min_sti;
        sys.set_attention_value("critical", AttentionValue::new(min, 0, true));
        sys.set_attention_value("ordinary", AttentionValue::new(min, 0, false));

        let removed = forget(&mut sys);

        assert_eq!(removed, 1);
        assert!(
            sys.get_attention_value("critical").is_some(),
            "vlti entry must survive at any sti"
        );
        assert!(sys.get_attention_value("ordinary").is_none());
    }

    #[test]
    fn test_empty_store_is_a_noop() {
        let mut sys = system();
        assert_eq!(forget(&mut sys), 0);
    }
}
