//! Attention economics: computing attention values from raw node signals,
//! collecting rent, paying wages, and decaying the store.
//!
//! Every operation here is total over the current store — no entry, zero
//! entries, and negative or extreme stored values are all legal inputs.

use crate::attention::AttentionValue;
use crate::config::EcanConfig;
use crate::constants::{
    ACTIVATION_STI_SCALE, ATTENTION_STI_SCALE, CONTEXT_STI_BONUS, HISTORY_COUNT_CAP,
    HISTORY_STI_SCALE, LTI_HISTORY_SCALE, RECENCY_HALF_LIFE_MS, WAGE_LTI_CUT,
};
use crate::graph::{GraphNode, GraphSnapshot};
use crate::system::AttentionSystem;

/// Optional task/context relevance hints for [`EconomyEngine::compute_attention`].
///
/// Only the two fields below are recognized; each grants the same flat STI
/// bonus when set. There is deliberately no open key/value bag — unrecognized
/// concerns cannot contribute.
#[derive(Clone, Debug, Default)]
pub struct StimulusContext {
    /// Content category the current task cares about.
    pub category: Option<String>,
    /// Kind of task driving the stimulation.
    pub task_kind: Option<String>,
}

impl StimulusContext {
    /// Flat additive STI bonus: granted once if any recognized hint is set.
    fn sti_bonus(&self) -> f64 {
        if self.category.is_some() || self.task_kind.is_some() {
            CONTEXT_STI_BONUS
        } else {
            0.0
        }
    }
}

/// Non-finite signals read as zero rather than poisoning the arithmetic.
fn sanitize(signal: f64) -> f64 {
    if signal.is_finite() { signal } else { 0.0 }
}

/// Base LTI by node kind. Concepts are the most durable, relations and
/// transient state the least.
fn kind_base_lti(kind: &str) -> f64 {
    match kind {
        "concept" => 800.0,
        "context" => 600.0,
        "relation" => 400.0,
        "state" => 300.0,
        _ => 200.0,
    }
}

/// Round to integer and clamp, total over any f64 including NaN and ±inf.
fn to_bounded_i64(raw: f64, lo: i64, hi: i64) -> i64 {
    // `as` saturates on overflow and maps NaN to 0
    (raw.round() as i64).clamp(lo, hi)
}

/// Stateless economics operations over an [`AttentionSystem`].
pub struct EconomyEngine;

impl EconomyEngine {
    /// Compute an attention value from a node's current signals. Pure — the
    /// store is untouched; pair with
    /// [`AttentionSystem::set_attention_value`] or use [`Self::stimulate`].
    ///
    /// STI combines activation, the external attention hint, and capped
    /// activation history, discounted by recency (the older
    /// `last_activation_ms` is relative to `now_ms`, the smaller the
    /// result), plus the flat context bonus. LTI combines the node-kind
    /// base with log-scaled activation history. VLTI mirrors
    /// `system_critical` exactly.
    pub fn compute_attention(
        config: &EcanConfig,
        node: &GraphNode,
        context: Option<&StimulusContext>,
        now_ms: u64,
    ) -> AttentionValue {
        let attrs = &node.attributes;
        let activation = sanitize(attrs.activation);
        let attention = sanitize(attrs.attention);
        let history = (attrs.activation_count as f64).min(HISTORY_COUNT_CAP);

        let base = activation * ACTIVATION_STI_SCALE
            + attention * ATTENTION_STI_SCALE
            + history * HISTORY_STI_SCALE;

        let age_ms = now_ms.saturating_sub(attrs.last_activation_ms) as f64;
        let recency = RECENCY_HALF_LIFE_MS / (RECENCY_HALF_LIFE_MS + age_ms);

        let bonus = context.map(StimulusContext::sti_bonus).unwrap_or(0.0);
        let sti = to_bounded_i64(base * recency + bonus, config.min_sti, config.max_sti);

        let lti_raw = kind_base_lti(&node.kind)
            + (1.0 + attrs.activation_count as f64).ln() * LTI_HISTORY_SCALE;
        let lti = to_bounded_i64(lti_raw, 0, config.max_lti);

        AttentionValue {
            sti,
            lti,
            vlti: attrs.system_critical,
        }
    }

    /// Compute and store attention for every node in a snapshot — the
    /// "first computation" that creates store entries. Returns the number
    /// of entries written.
    pub fn stimulate(
        system: &mut AttentionSystem,
        snapshot: &GraphSnapshot,
        context: Option<&StimulusContext>,
        now_ms: u64,
    ) -> usize {
        let mut written = 0;
        for node in snapshot.nodes.values() {
            let value = Self::compute_attention(system.config(), node, context, now_ms);
            system.set_attention_value(node.id.clone(), value);
            written += 1;
        }
        written
    }

    /// Tax every positive-STI entry by `rent_rate × sti` (at least 1 once
    /// rounded) and credit the total to the bank. Entries with `sti ≤ 0`
    /// are untouched. Returns the rent collected.
    pub fn collect_rent(system: &mut AttentionSystem) -> i64 {
        let rate = system.config().rent_rate;
        let mut collected = 0i64;
        for value in system.values_mut() {
            if value.sti <= 0 {
                continue;
            }
            // rate ≤ 1 keeps rent ≤ sti even after rounding up
            let rent = ((value.sti as f64 * rate).round() as i64).max(1);
            value.sti -= rent;
            collected += rent;
        }
        system.credit_bank(collected as f64);
        collected
    }

    /// Pay `wage_rate × lti` (at least 1 once rounded) as STI to every entry
    /// whose LTI sits above the high-LTI cut, debiting the bank by the same
    /// total. The bank may go negative — the balance is bookkeeping, not a
    /// hard floor. Returns the wages paid.
    pub fn pay_wages(system: &mut AttentionSystem) -> i64 {
        let rate = system.config().wage_rate;
        let max_sti = system.config().max_sti;
        let mut paid = 0i64;
        for value in system.values_mut() {
            if value.lti <= WAGE_LTI_CUT {
                continue;
            }
            let wage = ((value.lti as f64 * rate).round() as i64).max(1);
            value.sti = value.sti.saturating_add(wage).min(max_sti);
            paid += wage;
        }
        system.debit_bank(paid as f64);
        paid
    }

    /// Multiply every stored sti and lti by `decay_rate`, rounding toward
    /// zero. Sign-preserving for sti; any non-zero magnitude strictly
    /// shrinks. Returns the number of entries that changed.
    pub fn apply_decay(system: &mut AttentionSystem) -> usize {
        let rate = system.config().decay_rate;
        let mut decayed = 0;
        for value in system.values_mut() {
            let sti = (value.sti as f64 * rate).trunc() as i64;
            let lti = (value.lti as f64 * rate).trunc() as i64;
            if sti != value.sti || lti != value.lti {
                decayed += 1;
            }
            value.sti = sti;
            value.lti = lti;
        }
        decayed
    }
}
