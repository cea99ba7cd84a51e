use crate::economy::EconomyEngine;
use crate::forget::forget;
use crate::graph::GraphSnapshot;
use crate::spread::spread_importance;
use crate::system::AttentionSystem;

/// Per-phase figures from one full economic cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CycleReport {
    /// STI moved by importance spreading.
    pub transferred: i64,
    /// Rent collected into the bank.
    pub rent_collected: i64,
    /// Wages paid out of the bank.
    pub wages_paid: i64,
    /// Entries whose sti/lti shrank under decay.
    pub decayed: usize,
    /// Entries removed by the forgetting policy.
    pub forgotten: usize,
    /// Bank balance after the cycle.
    pub bank: f64,
}

/// Run one full economic cycle against a graph snapshot, in fixed order:
/// spread → collect rent → pay wages → decay → forget.
///
/// Total over any input: an empty snapshot and empty store is a clean
/// no-op. The bank moves whenever any entry carries non-zero sti/lti —
/// rent and wages flow in opposite directions and are not expected to
/// cancel.
pub fn run_cycle(system: &mut AttentionSystem, snapshot: &GraphSnapshot) -> CycleReport {
    let spread = spread_importance(system, snapshot);
    let rent_collected = EconomyEngine::collect_rent(system);
    let wages_paid = EconomyEngine::pay_wages(system);
    let decayed = EconomyEngine::apply_decay(system);
    let forgotten = forget(system);

    CycleReport {
        transferred: spread.transferred,
        rent_collected,
        wages_paid,
        decayed,
        forgotten,
        bank: system.attention_bank(),
    }
}
