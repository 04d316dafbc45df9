//! Raw-tree normalization.
//!
//! Strips "unset" values from a parsed document before it is deserialized:
//!
//! - `null` values are removed.
//! - Empty maps and lists are removed, depth-first, so a container that only
//!   held unset values disappears as well.
//! - Entries of identity maps (`objects`, `actions`, `fields`, `associations`)
//!   are kept even when empty, since their key alone declares something.
//! - Inside action templates, shorthand is widened: `methods: GET` becomes
//!   `methods: [GET]`, `defaults: x` becomes `defaults: {"0": x}` and
//!   `defaults: [x, y]` becomes `defaults: {"0": x, "1": y}`.
//!
//! # Invariants
//!
//! - `normalize(normalize(t)) == normalize(t)` for every tree `t`.

use serde_json::{Map, Value};

/// Action keys whose scalar shorthand widens to a one-element list.
const LIST_COERCED: &[&str] = &["methods", "schemes"];

/// Action keys whose scalar or list shorthand widens to an index-keyed map.
const MAP_COERCED: &[&str] = &["defaults", "requirements", "options"];

/// Where a node sits in the metadata schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
	Root,
	Defaults,
	Objects,
	Object,
	ActionMap,
	ChildMap,
	Action,
	Plain,
}

impl Node {
	fn child(self, key: &str) -> Node {
		match (self, key) {
			(Node::Root, "defaults") => Node::Defaults,
			(Node::Root, "objects") => Node::Objects,
			(Node::Defaults | Node::Object, "actions") => Node::ActionMap,
			(Node::Defaults | Node::Object, "fields" | "associations") => Node::ChildMap,
			(Node::Object, "default_action") => Node::Action,
			(Node::Objects, _) => Node::Object,
			(Node::ActionMap, _) => Node::Action,
			_ => Node::Plain,
		}
	}

	/// Identity maps keep their entries even when those are empty.
	fn is_identity_map(self) -> bool {
		matches!(self, Node::Objects | Node::ActionMap | Node::ChildMap)
	}
}

/// Normalizes a raw configuration tree.
pub fn normalize(tree: Value) -> Value {
	match tree {
		Value::Object(map) => Value::Object(normalize_map(map, Node::Root)),
		Value::Array(items) => Value::Array(normalize_list(items)),
		other => other,
	}
}

fn normalize_map(map: Map<String, Value>, node: Node) -> Map<String, Value> {
	let mut out = Map::with_capacity(map.len());
	for (key, value) in map {
		let child = node.child(&key);
		let value = if node == Node::Action {
			coerce_shorthand(&key, value)
		} else {
			value
		};

		if node.is_identity_map() {
			let entry = match value {
				Value::Null => Map::new(),
				Value::Object(inner) => normalize_map(inner, child),
				other => {
					// Left for the schema check to reject.
					if let Some(other) = normalize_value(other, child) {
						out.insert(key, other);
					}
					continue;
				}
			};
			out.insert(key, Value::Object(entry));
			continue;
		}

		if let Some(value) = normalize_value(value, child) {
			out.insert(key, value);
		}
	}
	out
}

fn normalize_list(items: Vec<Value>) -> Vec<Value> {
	items.into_iter().filter_map(|item| normalize_value(item, Node::Plain)).collect()
}

/// Returns `None` when the value is unset after normalization.
fn normalize_value(value: Value, node: Node) -> Option<Value> {
	match value {
		Value::Null => None,
		Value::Object(map) => {
			let map = normalize_map(map, node);
			(!map.is_empty()).then_some(Value::Object(map))
		}
		Value::Array(items) => {
			let items = normalize_list(items);
			(!items.is_empty()).then_some(Value::Array(items))
		}
		scalar => Some(scalar),
	}
}

fn coerce_shorthand(key: &str, value: Value) -> Value {
	match value {
		Value::Array(items) if MAP_COERCED.contains(&key) => {
			Value::Object(items.into_iter().enumerate().map(|(i, item)| (i.to_string(), item)).collect())
		}
		Value::Bool(_) | Value::Number(_) | Value::String(_) if LIST_COERCED.contains(&key) => Value::Array(vec![value]),
		Value::Bool(_) | Value::Number(_) | Value::String(_) if MAP_COERCED.contains(&key) => {
			let mut map = Map::with_capacity(1);
			map.insert("0".to_string(), value);
			Value::Object(map)
		}
		other => other,
	}
}

#[cfg(test)]
mod tests;
