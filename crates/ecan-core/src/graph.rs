use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw signals attached to a graph node by the producing collaborator.
///
/// Every field is optional on the wire; absent signals read as zero/false so
/// a bare node still evaluates cleanly.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NodeAttributes {
    /// Current activation level, nominally in [0, 1].
    pub activation: f64,
    /// Externally assigned attention hint, nominally in [0, 1].
    pub attention: f64,
    /// Unix-millis timestamp of the most recent activation.
    pub last_activation_ms: u64,
    /// How many times this node has ever been activated.
    pub activation_count: u32,
    /// Marks the node as critical infrastructure — maps directly to VLTI.
    pub system_critical: bool,
}

/// A node in the externally owned graph snapshot. Read-only to this engine.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    /// Node classification, e.g. "concept", "relation", "context", "state".
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub attributes: NodeAttributes,
    #[serde(default)]
    pub embeddings: Vec<f64>,
}

impl GraphNode {
    pub fn new(id: &str, kind: &str) -> Self {
        Self {
            id: id.to_string(),
            kind: kind.to_string(),
            attributes: NodeAttributes::default(),
            embeddings: Vec::new(),
        }
    }
}

/// A weighted edge between two nodes. Used only by importance spreading.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GraphEdge {
    pub id: String,
    pub endpoints: [String; 2],
    #[serde(rename = "type", default)]
    pub kind: String,
    pub weight: f64,
}

impl GraphEdge {
    pub fn new(id: &str, from: &str, to: &str, weight: f64) -> Self {
        Self {
            id: id.to_string(),
            endpoints: [from.to_string(), to.to_string()],
            kind: String::new(),
            weight,
        }
    }
}

/// One immutable view of the graph, passed in wholesale per cycle.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphSnapshot {
    pub nodes: HashMap<String, GraphNode>,
    pub edges: HashMap<String, GraphEdge>,
}

impl GraphSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_node(&mut self, node: GraphNode) {
        self.nodes.insert(node.id.clone(), node);
    }

    pub fn insert_edge(&mut self, edge: GraphEdge) {
        self.edges.insert(edge.id.clone(), edge);
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_node_deserializes() {
        // No attributes, no embeddings — every signal defaults
        let node: GraphNode =
            serde_json::from_str(r#"{"id": "n1", "type": "concept"}"#).unwrap();
        assert_eq!(node.id, "n1");
        assert_eq!(node.kind, "concept");
        assert!((node.attributes.activation - 0.0).abs() < 1e-10);
        assert!(!node.attributes.system_critical);
        assert!(node.embeddings.is_empty());
    }

    #[test]
    fn test_camel_case_attributes() {
        let node: GraphNode = serde_json::from_str(
            r#"{
                "id": "n1",
                "type": "state",
                "attributes": {
                    "activation": 0.8,
                    "lastActivationMs": 1700000000000,
                    "activationCount": 7,
                    "systemCritical": true
                }
            }"#,
        )
        .unwrap();
        assert_eq!(node.attributes.last_activation_ms, 1_700_000_000_000);
        assert_eq!(node.attributes.activation_count, 7);
        assert!(node.attributes.system_critical);
    }

    #[test]
    fn test_snapshot_accessors() {
        let mut snapshot = GraphSnapshot::new();
        assert!(snapshot.is_empty());

        snapshot.insert_node(GraphNode::new("a", "concept"));
        snapshot.insert_node(GraphNode::new("b", "relation"));
        snapshot.insert_edge(GraphEdge::new("e1", "a", "b", 1.0));

        assert_eq!(snapshot.node_count(), 2);
        assert_eq!(snapshot.edge_count(), 1);
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn test_empty_snapshot_deserializes() {
        let snapshot: GraphSnapshot = serde_json::from_str("{}").unwrap();
        assert!(snapshot.is_empty());
    }
}
