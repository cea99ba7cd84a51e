//! Importance spreading: diffuses STI from salient nodes to their graph
//! neighbors, proportional to edge weight.

use std::collections::HashMap;

use crate::graph::GraphSnapshot;
use crate::system::AttentionSystem;

/// Outcome of one spreading pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpreadReport {
    /// Number of nodes that sent importance.
    pub sources: usize,
    /// Total STI moved between nodes.
    pub transferred: i64,
}

/// One synchronous diffusion pass over the snapshot.
///
/// Each node with positive STI sends `spreading_rate × sti` split across
/// its incident edges in proportion to edge weight; the cumulative amount
/// a source sends is capped at `⌊spreading_rate × sti⌋`. All transfers are
/// computed against the STI values as they stood at the start of the call
/// and applied afterwards, so a single pass cannot cascade. Nodes with
/// `sti ≤ 0` never originate a transfer; edges with non-positive or
/// non-finite weight carry nothing. Targets missing from the store get a
/// fresh zeroed entry credited with the transfer.
pub fn spread_importance(system: &mut AttentionSystem, snapshot: &GraphSnapshot) -> SpreadReport {
    let rate = system.config().spreading_rate;

    // Incidence lists: node id → (neighbor id, weight)
    let mut adjacency: HashMap<&str, Vec<(&str, f64)>> = HashMap::new();
    for edge in snapshot.edges.values() {
        if !edge.weight.is_finite() || edge.weight <= 0.0 {
            continue;
        }
        let [a, b] = &edge.endpoints;
        adjacency
            .entry(a.as_str())
            .or_default()
            .push((b.as_str(), edge.weight));
        adjacency
            .entry(b.as_str())
            .or_default()
            .push((a.as_str(), edge.weight));
    }

    // Frozen pre-pass read of every candidate source
    let sources: Vec<(String, i64)> = system
        .iter()
        .filter(|(_, value)| value.sti > 0)
        .map(|(id, value)| (id.to_string(), value.sti))
        .collect();

    let mut deltas: HashMap<String, i64> = HashMap::new();
    let mut report = SpreadReport::default();

    for (id, sti) in &sources {
        let Some(incident) = adjacency.get(id.as_str()) else {
            continue;
        };
        let total_weight: f64 = incident.iter().map(|(_, w)| w).sum();
        if total_weight <= 0.0 {
            continue;
        }

        let outflow = rate * *sti as f64;
        let budget = outflow.floor() as i64;
        if budget <= 0 {
            continue;
        }

        let mut sent = 0i64;
        for (neighbor, weight) in incident {
            let amount = (outflow * (weight / total_weight)).round() as i64;
            let amount = amount.min(budget - sent);
            if amount <= 0 {
                continue;
            }
            *deltas.entry((*neighbor).to_string()).or_default() += amount;
            sent += amount;
        }

        if sent > 0 {
            *deltas.entry(id.clone()).or_default() -= sent;
            report.sources += 1;
            report.transferred += sent;
        }
    }

    for (id, delta) in deltas {
        system.adjust_sti(&id, delta);
    }

    report
}
