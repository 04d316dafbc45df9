//! Config document loading.
//!
//! Documents are parsed into a neutral [`serde_json::Value`] tree, whatever
//! their on-disk format, then validated, normalized and deserialized into
//! [`MetadataConfig`].

use std::path::Path;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::normalize::normalize;
use crate::schema::{DefaultsConfig, MetadataConfig, ObjectConfig};
use crate::validate::validate_raw;

/// On-disk document format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
	Toml,
	Json,
}

impl ConfigFormat {
	/// Picks the format from a file extension.
	pub fn from_path(path: &Path) -> Option<Self> {
		match path.extension()?.to_str()? {
			"toml" => Some(Self::Toml),
			"json" => Some(Self::Json),
			_ => None,
		}
	}
}

/// Loads a metadata configuration from a file.
pub fn load_path(path: impl AsRef<Path>) -> Result<MetadataConfig> {
	let path = path.as_ref();
	let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat(path.to_path_buf()))?;
	let content = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
		path: path.to_path_buf(),
		error,
	})?;

	let mut config = load_str(&content, format)?;
	config.source = Some(path.to_path_buf());
	tracing::debug!(path = %path.display(), objects = config.objects.len(), "loaded metadata config");
	Ok(config)
}

/// Loads a metadata configuration from document text.
pub fn load_str(content: &str, format: ConfigFormat) -> Result<MetadataConfig> {
	from_value(parse_document(content, format)?)
}

/// Parses document text into the neutral value tree.
pub fn parse_document(content: &str, format: ConfigFormat) -> Result<Value> {
	match format {
		ConfigFormat::Json => Ok(serde_json::from_str(content)?),
		ConfigFormat::Toml => {
			let table: toml::Table = toml::from_str(content)?;
			Ok(toml_to_json(toml::Value::Table(table)))
		}
	}
}

/// Validates, normalizes and deserializes a raw value tree.
pub fn from_value(raw: Value) -> Result<MetadataConfig> {
	validate_raw(&raw)?;

	let Value::Object(mut root) = normalize(raw) else {
		return Err(ConfigError::schema("", "expected a map at the document root"));
	};

	let defaults: DefaultsConfig = match root.remove("defaults") {
		Some(value) => deserialize_node(value, "defaults")?,
		None => DefaultsConfig::default(),
	};

	let objects = match root.remove("objects") {
		Some(Value::Object(objects)) => deserialize_objects(objects)?,
		_ => return Err(ConfigError::schema("objects", "at least one object must be configured")),
	};

	let mut config = MetadataConfig {
		defaults,
		objects,
		source: None,
	};
	config.derive_names();
	Ok(config)
}

fn deserialize_objects(objects: Map<String, Value>) -> Result<IndexMap<String, ObjectConfig>> {
	let mut out = IndexMap::with_capacity(objects.len());
	for (class, value) in objects {
		let object = deserialize_node(value, &format!("objects.{class}"))?;
		out.insert(class, object);
	}
	Ok(out)
}

fn deserialize_node<T: DeserializeOwned>(value: Value, path: &str) -> Result<T> {
	serde_json::from_value(value).map_err(|e| ConfigError::schema(path, e.to_string()))
}

/// Converts a TOML value into the neutral JSON tree.
fn toml_to_json(value: toml::Value) -> Value {
	match value {
		toml::Value::String(s) => Value::String(s),
		toml::Value::Integer(i) => Value::Number(i.into()),
		toml::Value::Float(f) => serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
		toml::Value::Boolean(b) => Value::Bool(b),
		toml::Value::Datetime(dt) => Value::String(dt.to_string()),
		toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
		toml::Value::Table(table) => Value::Object(table.into_iter().map(|(k, v)| (k, toml_to_json(v))).collect()),
	}
}
