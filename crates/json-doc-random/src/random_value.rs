use json_doc::{Map, Value};
use rand::Rng;

use crate::number::{random_double, random_int};
use crate::string::random_string;

/// Largest number of children a single container receives.
const MAX_FANOUT: usize = 8;

/// Kind of a generated node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Null,
    Boolean,
    Integer,
    Double,
    String,
    Array,
    Object,
}

/// Relative odds for each node kind.
#[derive(Debug, Clone)]
pub struct NodeOdds {
    pub null: u32,
    pub boolean: u32,
    pub integer: u32,
    pub double: u32,
    pub string: u32,
    pub array: u32,
    pub object: u32,
}

impl Default for NodeOdds {
    fn default() -> Self {
        Self {
            null: 1,
            boolean: 2,
            integer: 6,
            double: 4,
            string: 8,
            array: 2,
            object: 2,
        }
    }
}

impl NodeOdds {
    fn weights(&self) -> [(NodeType, u32); 7] {
        [
            (NodeType::Null, self.null),
            (NodeType::Boolean, self.boolean),
            (NodeType::Integer, self.integer),
            (NodeType::Double, self.double),
            (NodeType::String, self.string),
            (NodeType::Array, self.array),
            (NodeType::Object, self.object),
        ]
    }

    fn scalars(&self) -> Self {
        Self {
            array: 0,
            object: 0,
            ..self.clone()
        }
    }

    fn pick<R: Rng>(&self, rng: &mut R) -> NodeType {
        let weights = self.weights();
        let total: u32 = weights.iter().map(|(_, w)| w).sum();
        if total == 0 {
            return NodeType::Null;
        }
        let mut odd = rng.gen_range(0..total);
        for (node_type, weight) in weights {
            if odd < weight {
                return node_type;
            }
            odd -= weight;
        }
        NodeType::Null
    }
}

/// Root node kind for generated trees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RootNode {
    #[default]
    Object,
    Array,
    String,
}

/// Options for random value generation.
#[derive(Debug, Clone)]
pub struct RandomValueOptions {
    /// `None` picks the root kind from `odds`.
    pub root_node: Option<RootNode>,
    /// Upper bound on nodes below the root.
    pub node_count: usize,
    /// Containers deeper than this only receive scalars.
    pub max_depth: usize,
    pub max_string_len: usize,
    pub odds: NodeOdds,
}

impl Default for RandomValueOptions {
    fn default() -> Self {
        Self {
            root_node: Some(RootNode::Object),
            node_count: 32,
            max_depth: 6,
            max_string_len: 16,
            odds: NodeOdds::default(),
        }
    }
}

/// Random value tree generator.
pub struct RandomValue<'a, R> {
    opts: &'a RandomValueOptions,
    rng: &'a mut R,
    budget: usize,
}

impl<'a, R: Rng> RandomValue<'a, R> {
    /// Generates one tree. Doubles are always finite, so every tree
    /// serializes.
    pub fn generate(opts: &'a RandomValueOptions, rng: &'a mut R) -> Value {
        let root = match opts.root_node {
            Some(RootNode::Object) => NodeType::Object,
            Some(RootNode::Array) => NodeType::Array,
            Some(RootNode::String) => NodeType::String,
            None => opts.odds.pick(rng),
        };
        let mut gen = Self {
            opts,
            rng,
            budget: opts.node_count,
        };
        gen.node(root, 0)
    }

    fn node(&mut self, node_type: NodeType, depth: usize) -> Value {
        match node_type {
            NodeType::Null => Value::Null,
            NodeType::Boolean => Value::Bool(self.rng.gen()),
            NodeType::Integer => Value::Int(random_int(self.rng)),
            NodeType::Double => Value::Double(random_double(self.rng)),
            NodeType::String => Value::String(random_string(self.rng, self.opts.max_string_len)),
            NodeType::Array => {
                let mut arr = Vec::new();
                while let Some(child) = self.child(depth) {
                    arr.push(child);
                }
                Value::Array(arr)
            }
            NodeType::Object => {
                let mut obj = Map::new();
                while let Some(child) = self.child(depth) {
                    obj.insert(random_string(self.rng, self.opts.max_string_len), child);
                }
                Value::Object(obj)
            }
        }
    }

    // Returns `None` once the container is full or the node budget is spent.
    fn child(&mut self, depth: usize) -> Option<Value> {
        if self.budget == 0 || self.rng.gen_range(0..=MAX_FANOUT) == 0 {
            return None;
        }
        self.budget -= 1;
        let node_type = if depth + 1 >= self.opts.max_depth {
            self.opts.odds.scalars().pick(self.rng)
        } else {
            self.opts.odds.pick(self.rng)
        };
        Some(self.node(node_type, depth + 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::{count_nodes, depth, deterministic};

    fn visit(value: &Value, f: &mut impl FnMut(&Value)) {
        f(value);
        match value {
            Value::Array(arr) => arr.iter().for_each(|v| visit(v, f)),
            Value::Object(obj) => obj.values().for_each(|v| visit(v, f)),
            _ => {}
        }
    }

    #[test]
    fn same_seed_same_tree() {
        let opts = RandomValueOptions {
            node_count: 200,
            ..Default::default()
        };
        for seed in 0..20 {
            let a = RandomValue::generate(&opts, &mut deterministic(seed));
            let b = RandomValue::generate(&opts, &mut deterministic(seed));
            assert_eq!(a, b);
        }
    }

    #[test]
    fn root_variants() {
        let mut rng = deterministic(1);
        for (root, kind) in [
            (RootNode::Object, json_doc::ValueKind::Object),
            (RootNode::Array, json_doc::ValueKind::Array),
            (RootNode::String, json_doc::ValueKind::String),
        ] {
            let opts = RandomValueOptions {
                root_node: Some(root),
                ..Default::default()
            };
            assert_eq!(RandomValue::generate(&opts, &mut rng).kind(), kind);
        }
    }

    #[test]
    fn node_budget_and_depth_hold() {
        let mut rng = deterministic(9);
        let opts = RandomValueOptions {
            root_node: Some(RootNode::Array),
            node_count: 50,
            max_depth: 3,
            odds: NodeOdds {
                array: 10,
                object: 10,
                ..Default::default()
            },
            ..Default::default()
        };
        for _ in 0..200 {
            let value = RandomValue::generate(&opts, &mut rng);
            assert!(count_nodes(&value) <= 51);
            assert!(depth(&value) <= 3);
        }
    }

    #[test]
    fn zero_budget_gives_empty_root() {
        let opts = RandomValueOptions {
            node_count: 0,
            ..Default::default()
        };
        let value = RandomValue::generate(&opts, &mut deterministic(4));
        assert_eq!(value, Value::Object(Map::new()));
    }

    #[test]
    fn only_enabled_kinds_appear() {
        let opts = RandomValueOptions {
            root_node: Some(RootNode::Array),
            node_count: 100,
            odds: NodeOdds {
                null: 0,
                boolean: 1,
                integer: 0,
                double: 0,
                string: 0,
                array: 0,
                object: 0,
            },
            ..Default::default()
        };
        let value = RandomValue::generate(&opts, &mut deterministic(8));
        for item in value.as_array().unwrap_or_default() {
            assert!(item.as_bool().is_some());
        }
    }

    #[test]
    fn doubles_are_finite() {
        let opts = RandomValueOptions {
            node_count: 500,
            ..Default::default()
        };
        let mut rng = deterministic(21);
        for _ in 0..20 {
            visit(&RandomValue::generate(&opts, &mut rng), &mut |v| {
                if let Value::Double(d) = v {
                    assert!(d.is_finite());
                }
            });
        }
    }
}
