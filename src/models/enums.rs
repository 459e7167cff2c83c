//! Named enum definitions
//!
//! An enum lists its allowed values and may declare a state-transition graph
//! over them. Transitions are documentation: nothing enforces them.

use super::scalar::{Scalar, deserialize_optional_string, value_to_string};
use indexmap::IndexMap;
use petgraph::graph::NodeIndex;
use petgraph::visit::Dfs;
use petgraph::{Directed, Graph};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::{Mapping, Value};
use std::collections::HashMap;

/// Structured enum value with display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumValueDef {
    pub value: Scalar,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub label: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

/// An enum value, written either bare (`draft`) or structured (`{ value: draft, label: Draft }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Simple(Scalar),
    Detailed(EnumValueDef),
}

impl EnumValue {
    /// The underlying scalar value
    pub fn value(&self) -> &Scalar {
        match self {
            EnumValue::Simple(value) => value,
            EnumValue::Detailed(def) => &def.value,
        }
    }

    /// Canonical string form used for comparison and display
    pub fn canonical(&self) -> String {
        self.value().to_string()
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            EnumValue::Simple(_) => None,
            EnumValue::Detailed(def) => def.label.as_deref(),
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            EnumValue::Simple(_) => None,
            EnumValue::Detailed(def) => def.description.as_deref(),
        }
    }
}

/// A named, reusable set of allowed values
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EnumDef {
    #[serde(
        default,
        deserialize_with = "deserialize_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(default)]
    pub values: Vec<EnumValue>,
    /// Allowed transitions keyed by source value; keys and targets are canonical strings
    #[serde(
        default,
        deserialize_with = "deserialize_transitions",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub transitions: IndexMap<String, Vec<String>>,
}

impl EnumDef {
    /// Canonical strings of all declared values, in declaration order
    pub fn canonical_values(&self) -> Vec<String> {
        self.values.iter().map(EnumValue::canonical).collect()
    }

    /// Whether any value carries a label or description
    pub fn has_detailed_values(&self) -> bool {
        self.values
            .iter()
            .any(|v| v.label().is_some() || v.description().is_some())
    }

    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.canonical() == value)
    }

    /// Build the directed transition graph
    ///
    /// Nodes are declared values followed by any value that only appears in
    /// `transitions`. Returns the graph and the node lookup by value.
    pub fn transition_graph(&self) -> (Graph<String, (), Directed>, HashMap<String, NodeIndex>) {
        let mut graph = Graph::<String, (), Directed>::new();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

        for value in self.canonical_values() {
            node_map
                .entry(value.clone())
                .or_insert_with(|| graph.add_node(value));
        }

        for (from, targets) in &self.transitions {
            let from_node = *node_map
                .entry(from.clone())
                .or_insert_with(|| graph.add_node(from.clone()));
            for to in targets {
                let to_node = *node_map
                    .entry(to.clone())
                    .or_insert_with(|| graph.add_node(to.clone()));
                graph.update_edge(from_node, to_node, ());
            }
        }

        (graph, node_map)
    }

    /// Every value reachable from `value` through one or more transitions
    ///
    /// `value` itself is only included when a cycle leads back to it.
    pub fn reachable_from(&self, value: &str) -> Vec<String> {
        let (graph, node_map) = self.transition_graph();
        let Some(&start) = node_map.get(value) else {
            return Vec::new();
        };

        let mut reachable = Vec::new();
        let mut revisits_start = graph.neighbors(start).any(|n| n == start);

        let mut dfs = Dfs::new(&graph, start);
        while let Some(node) = dfs.next(&graph) {
            if node == start {
                continue;
            }
            if graph.neighbors(node).any(|n| n == start) {
                revisits_start = true;
            }
            reachable.push(graph[node].clone());
        }

        if revisits_start {
            reachable.push(value.to_string());
        }
        reachable
    }

    /// Declared values with no outgoing transition, when transitions are declared
    pub fn terminal_values(&self) -> Vec<String> {
        if self.transitions.is_empty() {
            return Vec::new();
        }
        let (graph, node_map) = self.transition_graph();
        self.canonical_values()
            .into_iter()
            .filter(|value| {
                node_map
                    .get(value)
                    .is_some_and(|&idx| graph.neighbors(idx).next().is_none())
            })
            .collect()
    }
}

fn deserialize_transitions<'de, D>(deserializer: D) -> Result<IndexMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let mapping = Option::<Mapping>::deserialize(deserializer)?.unwrap_or_default();
    let mut transitions = IndexMap::new();
    for (from, targets) in mapping {
        let targets = match targets {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items.iter().map(value_to_string).collect(),
            other => vec![value_to_string(&other)],
        };
        transitions.insert(value_to_string(&from), targets);
    }
    Ok(transitions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_status() -> EnumDef {
        serde_yaml::from_str(
            r#"
values:
  - pending
  - { value: paid, label: Paid }
  - shipped
  - delivered
  - cancelled
transitions:
  pending: [paid, cancelled]
  paid: [shipped, cancelled]
  shipped: delivered
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_mixed_values_normalize() {
        let def = order_status();
        assert_eq!(
            def.canonical_values(),
            vec!["pending", "paid", "shipped", "delivered", "cancelled"]
        );
        assert!(def.has_detailed_values());
        assert_eq!(def.values[1].label(), Some("Paid"));
    }

    #[test]
    fn test_bare_transition_target_becomes_list() {
        let def = order_status();
        assert_eq!(def.transitions["shipped"], vec!["delivered"]);
    }

    #[test]
    fn test_reachable_and_terminal_values() {
        let def = order_status();
        let mut reachable = def.reachable_from("paid");
        reachable.sort();
        assert_eq!(reachable, vec!["cancelled", "delivered", "shipped"]);
        assert_eq!(def.terminal_values(), vec!["delivered", "cancelled"]);
    }

    #[test]
    fn test_cycle_includes_start() {
        let def: EnumDef = serde_yaml::from_str(
            "values: [on, off]\ntransitions:\n  'on': ['off']\n  'off': ['on']\n",
        )
        .unwrap();
        let mut reachable = def.reachable_from("on");
        reachable.sort();
        assert_eq!(reachable, vec!["off", "on"]);
        assert!(def.terminal_values().is_empty());
    }

    #[test]
    fn test_numeric_transition_keys() {
        let def: EnumDef =
            serde_yaml::from_str("values: [1, 2, 3]\ntransitions:\n  1: [2]\n  2: [3]\n").unwrap();
        assert_eq!(def.transitions["1"], vec!["2"]);
        assert_eq!(def.terminal_values(), vec!["3"]);
    }
}
