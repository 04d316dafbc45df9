//! Error types for metadata configuration loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating a metadata configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// Error parsing JSON syntax.
	#[error("JSON parse error: {0}")]
	Json(#[from] serde_json::Error),

	/// Error reading a configuration file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// The file extension does not map to a known document format.
	#[error("unsupported configuration format: {0}")]
	UnsupportedFormat(PathBuf),

	/// The document does not match the metadata schema.
	#[error("invalid configuration at '{path}': {message}")]
	Schema {
		/// Dotted path of the offending node.
		path: String,
		/// What is wrong with it.
		message: String,
	},
}

impl ConfigError {
	pub(crate) fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
		Self::Schema {
			path: path.into(),
			message: message.into(),
		}
	}
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
