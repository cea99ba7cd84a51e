//! ECAN economic attention allocation engine.
//!
//! Models attention as a closed economy over graph nodes: each node carries
//! a short-term importance (STI), a long-term importance (LTI), and a
//! permanence flag (VLTI). Importance diffuses along weighted edges, rent
//! flows from salient nodes into a shared bank, wages flow back to durably
//! important nodes, and a forgetting policy prunes what falls below
//! threshold. A greedy admission scheduler packs priority-ordered tasks
//! into a fixed resource budget.
//!
//! Zero I/O — pure math engine with no opinions about transport or
//! persistence.

pub mod attention;
pub mod config;
pub mod constants;
pub mod cycle;
pub mod economy;
pub mod forget;
pub mod graph;
pub mod schedule;
pub mod serde_compat;
pub mod spread;
pub mod system;
pub mod time;

pub use attention::AttentionValue;
pub use config::{ConfigError, EcanConfig};
pub use cycle::{CycleReport, run_cycle};
pub use economy::{EconomyEngine, StimulusContext};
pub use forget::forget;
pub use graph::{GraphEdge, GraphNode, GraphSnapshot, NodeAttributes};
pub use schedule::{ResourceVector, SchedulingResult, Task, schedule};
pub use serde_compat::{CURRENT_VERSION, SnapshotError, export_json, import_json};
pub use spread::{SpreadReport, spread_importance};
pub use system::AttentionSystem;
pub use time::{now_unix_millis, unix_millis_to_iso8601};
