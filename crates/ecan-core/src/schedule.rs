//! Resource-constrained task admission: greedy, priority-first-fit packing
//! of a task batch into a fixed resource budget.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Resource requirements or capacity across the four scheduled axes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceVector {
    pub cpu: f64,
    pub memory: f64,
    pub bandwidth: f64,
    pub storage: f64,
}

impl ResourceVector {
    pub fn new(cpu: f64, memory: f64, bandwidth: f64, storage: f64) -> Self {
        Self {
            cpu,
            memory,
            bandwidth,
            storage,
        }
    }

    /// Whether this requirement fits inside `budget` on every axis.
    pub fn fits_within(&self, budget: &ResourceVector) -> bool {
        self.cpu <= budget.cpu
            && self.memory <= budget.memory
            && self.bandwidth <= budget.bandwidth
            && self.storage <= budget.storage
    }

    /// Axis-wise difference. Callers check `fits_within` first.
    pub fn subtract(&self, other: &ResourceVector) -> ResourceVector {
        ResourceVector {
            cpu: self.cpu - other.cpu,
            memory: self.memory - other.memory,
            bandwidth: self.bandwidth - other.bandwidth,
            storage: self.storage - other.storage,
        }
    }

    /// Sum across all four axes.
    pub fn total(&self) -> f64 {
        self.cpu + self.memory + self.bandwidth + self.storage
    }
}

/// One unit of schedulable work, tied to a graph node.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(rename = "nodeId", default)]
    pub node_id: String,
    pub priority: f64,
    #[serde(rename = "estimatedCost", default)]
    pub estimated_cost: f64,
    #[serde(default)]
    pub resources: ResourceVector,
    /// Carried for forward compatibility; admission does not order by it.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// Outcome of one admission pass.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub admitted: Vec<Task>,
    #[serde(rename = "resourceUtilizationPercent")]
    pub resource_utilization_percent: f64,
}

/// Admit a priority-ordered batch of tasks into an available budget.
///
/// Greedy single-pass first-fit: tasks are walked in stable descending
/// priority order (ties keep input order) and admitted iff their
/// requirement fits the remaining budget on all four axes. A task that
/// does not fit is skipped, not blocking — smaller lower-priority tasks
/// behind it may still be admitted. A task with an all-zero requirement
/// always fits. Utilization is the admitted requirement sum over the
/// available sum, as a percentage (0 when the budget is all zeros).
///
/// O(n log n); deliberately not an optimal bin-packer — batches of
/// thousands must admit in well under a second.
pub fn schedule(tasks: &[Task], available: &ResourceVector) -> SchedulingResult {
    let mut ordered: Vec<&Task> = tasks.iter().collect();
    // Stable sort: NaN priorities compare equal and keep their input slot
    ordered.sort_by(|a, b| {
        b.priority
            .partial_cmp(&a.priority)
            .unwrap_or(Ordering::Equal)
    });

    let mut remaining = *available;
    let mut admitted: Vec<Task> = Vec::new();
    for task in ordered {
        if task.resources.fits_within(&remaining) {
            remaining = remaining.subtract(&task.resources);
            admitted.push(task.clone());
        }
    }

    let capacity = available.total();
    let used: f64 = admitted.iter().map(|t| t.resources.total()).sum();
    let resource_utilization_percent = if capacity > 0.0 {
        used / capacity * 100.0
    } else {
        0.0
    };

    SchedulingResult {
        admitted,
        resource_utilization_percent,
    }
}
