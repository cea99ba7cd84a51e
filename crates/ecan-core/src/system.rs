use std::collections::HashMap;

use crate::attention::AttentionValue;
use crate::config::{ConfigError, EcanConfig};

/// Owned state of one attention economy: the per-node attention store plus
/// the shared bank balance.
///
/// All mutation goes through this struct — there is no module-level state,
/// so independent economies can coexist in one process and tests get full
/// isolation. Single-writer discipline is the caller's concern; nothing
/// here is `Sync`-hostile, a plain `Mutex<AttentionSystem>` suffices.
#[derive(Debug)]
pub struct AttentionSystem {
    config: EcanConfig,
    values: HashMap<String, AttentionValue>,
    bank: f64,
}

impl AttentionSystem {
    /// Build an empty economy. Fails fast on invalid config — out-of-range
    /// rates or inverted bounds are programmer errors, not runtime modes.
    pub fn new(config: EcanConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let bank = config.attention_bank;
        Ok(Self {
            config,
            values: HashMap::new(),
            bank,
        })
    }

    /// Rebuild an economy from snapshot state. Entries are clamped into the
    /// config's bounds so a stale or foreign snapshot cannot violate the
    /// invariants.
    pub fn restore(
        config: EcanConfig,
        entries: impl IntoIterator<Item = (String, AttentionValue)>,
        bank: f64,
    ) -> Result<Self, ConfigError> {
        let mut system = Self::new(config)?;
        for (id, value) in entries {
            system.set_attention_value(id, value);
        }
        system.bank = if bank.is_finite() {
            bank
        } else {
            system.config.attention_bank
        };
        Ok(system)
    }

    pub fn config(&self) -> &EcanConfig {
        &self.config
    }

    /// Store a value for a node id, clamped into bounds.
    pub fn set_attention_value(&mut self, id: impl Into<String>, value: AttentionValue) {
        let clamped = value.clamped(&self.config);
        self.values.insert(id.into(), clamped);
    }

    /// Current value for a node id. `None` means no entry — callers must
    /// distinguish "zero attention" from "never computed or forgotten".
    pub fn get_attention_value(&self, id: &str) -> Option<&AttentionValue> {
        self.values.get(id)
    }

    pub fn remove_attention_value(&mut self, id: &str) -> Option<AttentionValue> {
        self.values.remove(id)
    }

    /// Current bank balance. Initialized from config, mutated only by rent
    /// collection and wage payment.
    pub fn attention_bank(&self) -> f64 {
        self.bank
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttentionValue)> {
        self.values.iter().map(|(id, value)| (id.as_str(), value))
    }

    /// Add a (possibly negative) STI delta to a node, creating a fresh entry
    /// when the node has none yet. The result is clamped into bounds.
    pub(crate) fn adjust_sti(&mut self, id: &str, delta: i64) {
        let entry = self
            .values
            .entry(id.to_string())
            .or_insert_with(AttentionValue::default);
        entry.sti = entry
            .sti
            .saturating_add(delta)
            .clamp(self.config.min_sti, self.config.max_sti);
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut AttentionValue> {
        self.values.values_mut()
    }

    pub(crate) fn retain(&mut self, f: impl FnMut(&String, &mut AttentionValue) -> bool) {
        self.values.retain(f);
    }

    pub(crate) fn credit_bank(&mut self, amount: f64) {
        self.bank += amount;
    }

    pub(crate) fn debit_bank(&mut self, amount: f64) {
        self.bank -= amount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn system() -> AttentionSystem {
        AttentionSystem::new(EcanConfig::default()).unwrap()
    }

    #[test]
    fn test_new_starts_empty_with_configured_bank() {
        let sys = system();
        assert!(sys.is_empty());
        assert!((sys.attention_bank() - EcanConfig::default().attention_bank).abs() < 1e-10);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = EcanConfig {
            min_sti: 1,
            max_sti: 0,
            ..EcanConfig::default()
        };
        assert!(AttentionSystem::new(config).is_err());
    }

    #[test]
    fn test_absent_is_not_zero() {
        let mut sys = system();
        sys.set_attention_value("known", AttentionValue::new(0, 0, false));

        assert!(sys.get_attention_value("known").is_some());
        assert!(
            sys.get_attention_value("unknown").is_none(),
            "unknown id must read as absent, not zero"
        );
    }

    #[test]
    fn test_set_clamps_out_of_bounds() {
        let mut sys = system();
        sys.set_attention_value("n", AttentionValue::new(i64::MAX, -7, false));

        let stored = sys.get_attention_value("n").unwrap();
        assert_eq!(stored.sti, sys.config().max_sti);
        assert_eq!(stored.lti, 0);
    }

    #[test]
    fn test_remove_returns_entry() {
        let mut sys = system();
        sys.set_attention_value("n", AttentionValue::new(5, 5, false));

        assert!(sys.remove_attention_value("n").is_some());
        assert!(sys.get_attention_value("n").is_none());
        assert!(sys.remove_attention_value("n").is_none());
    }

    #[test]
    fn test_adjust_sti_creates_entry() {
        let mut sys = system();
        sys.adjust_sti("fresh", 42);

        let value = sys.get_attention_value("fresh").unwrap();
        assert_eq!(value.sti, 42);
        assert_eq!(value.lti, 0);
        assert!(!value.vlti);
    }

    #[test]
    fn test_adjust_sti_clamps() {
        let mut sys = system();
        let max = sys.config().max_sti;
        sys.set_attention_value("n", AttentionValue::new(max, 0, false));
        sys.adjust_sti("n", 1_000_000);
        assert_eq!(sys.get_attention_value("n").unwrap().sti, max);
    }

    #[test]
    fn test_restore_clamps_and_keeps_bank() {
        let config = EcanConfig::default();
        let entries = vec![
            ("a".to_string(), AttentionValue::new(999_999, 10, false)),
            ("b".to_string(), AttentionValue::new(-5, -5, true)),
        ];
        let sys = AttentionSystem::restore(config.clone(), entries, 1234.5).unwrap();

        assert_eq!(sys.len(), 2);
        assert_eq!(sys.get_attention_value("a").unwrap().sti, config.max_sti);
        assert_eq!(sys.get_attention_value("b").unwrap().lti, 0);
        assert!((sys.attention_bank() - 1234.5).abs() < 1e-10);
    }

    #[test]
    fn test_restore_rejects_non_finite_bank() {
        let sys = AttentionSystem::restore(EcanConfig::default(), Vec::new(), f64::NAN).unwrap();
        // Falls back to the configured opening balance
        assert!((sys.attention_bank() - EcanConfig::default().attention_bank).abs() < 1e-10);
    }
}
