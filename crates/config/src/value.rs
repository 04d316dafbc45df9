//! Leaf values and container aliases shared by config trees and descriptors.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Ordered set of strings (methods, groups, contexts, ...).
pub type StringSet = IndexSet<String>;

/// Ordered string-to-scalar mapping (form options, route defaults, ...).
pub type ScalarMap = IndexMap<String, Scalar>;

/// A scalar config value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
	/// Boolean value (true/false).
	Bool(bool),
	/// Integer value.
	Int(i64),
	/// Floating point value.
	Float(f64),
	/// String value.
	String(String),
}

impl From<bool> for Scalar {
	fn from(b: bool) -> Self {
		Self::Bool(b)
	}
}

impl From<i64> for Scalar {
	fn from(i: i64) -> Self {
		Self::Int(i)
	}
}

impl From<f64> for Scalar {
	fn from(f: f64) -> Self {
		Self::Float(f)
	}
}

impl From<String> for Scalar {
	fn from(s: String) -> Self {
		Self::String(s)
	}
}

impl From<&str> for Scalar {
	fn from(s: &str) -> Self {
		Self::String(s.to_string())
	}
}

impl std::fmt::Display for Scalar {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Bool(b) => write!(f, "{b}"),
			Self::Int(i) => write!(f, "{i}"),
			Self::Float(x) => write!(f, "{x}"),
			Self::String(s) => f.write_str(s),
		}
	}
}

/// Containers that count as "unset" when empty.
pub trait Container {
	/// Returns true when the container holds nothing.
	fn is_empty_container(&self) -> bool;
}

impl<T: std::hash::Hash + Eq> Container for IndexSet<T> {
	fn is_empty_container(&self) -> bool {
		self.is_empty()
	}
}

impl<K: std::hash::Hash + Eq, V> Container for IndexMap<K, V> {
	fn is_empty_container(&self) -> bool {
		self.is_empty()
	}
}

impl<T> Container for Vec<T> {
	fn is_empty_container(&self) -> bool {
		self.is_empty()
	}
}

/// Drops an empty container to `None`.
pub fn prune<C: Container>(slot: &mut Option<C>) {
	if slot.as_ref().is_some_and(Container::is_empty_container) {
		*slot = None;
	}
}
