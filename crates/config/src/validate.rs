//! Structural checks on the raw document, before normalization erases them.

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

const CHILD_MAPS: &[&str] = &["actions", "fields", "associations"];

/// Checks the constraints normalization cannot preserve.
///
/// - the root is a map
/// - `objects` exists and holds at least one entry
/// - every `actions`, `fields` and `associations` map, at object level and
///   under `defaults`, holds at least one entry when present
pub fn validate_raw(tree: &Value) -> Result<()> {
	let root = tree.as_object().ok_or_else(|| ConfigError::schema("", format!("expected a map at the document root, got {}", type_name(tree))))?;

	for key in root.keys() {
		if key != "defaults" && key != "objects" {
			return Err(ConfigError::schema(key.as_str(), "unknown section"));
		}
	}

	if let Some(defaults) = root.get("defaults").filter(|v| !v.is_null()) {
		let defaults = expect_map(defaults, "defaults")?;
		check_child_maps(defaults, "defaults")?;
	}

	let objects = match root.get("objects") {
		None | Some(Value::Null) => return Err(ConfigError::schema("objects", "at least one object must be configured")),
		Some(objects) => expect_map(objects, "objects")?,
	};
	if objects.is_empty() {
		return Err(ConfigError::schema("objects", "at least one object must be configured"));
	}

	for (class, object) in objects {
		let path = format!("objects.{class}");
		match object {
			Value::Null => {}
			Value::Object(object) => check_child_maps(object, &path)?,
			other => return Err(ConfigError::schema(path, format!("expected a map, got {}", type_name(other)))),
		}
	}

	Ok(())
}

fn check_child_maps(node: &Map<String, Value>, path: &str) -> Result<()> {
	for &kind in CHILD_MAPS {
		let Some(children) = node.get(kind).filter(|v| !v.is_null()) else {
			continue;
		};
		let path = format!("{path}.{kind}");
		let children = expect_map(children, &path)?;
		if children.is_empty() {
			return Err(ConfigError::schema(path, format!("at least one entry is required when `{kind}` is present")));
		}
	}
	Ok(())
}

fn expect_map<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>> {
	value.as_object().ok_or_else(|| ConfigError::schema(path, format!("expected a map, got {}", type_name(value))))
}

pub(crate) fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "bool",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "list",
		Value::Object(_) => "map",
	}
}
