//! Error types for metadata building and registry assembly.

use std::fmt;

use thiserror::Error;

/// Kind of child descriptor attached to an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKind {
	Action,
	Field,
	Association,
}

impl fmt::Display for MetadataKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Action => write!(f, "action"),
			Self::Field => write!(f, "field"),
			Self::Association => write!(f, "association"),
		}
	}
}

/// Errors raised while building object metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
	/// Two children of the same kind share a name within one object.
	#[error("duplicate {kind} name '{name}' in object '{object}'")]
	DuplicateMetadataName {
		/// Class name of the object being built.
		object: String,
		kind: MetadataKind,
		/// The conflicting child name.
		name: String,
	},

	/// A custom object-builder contributor failed.
	#[error("object builder failed: {message}")]
	Contributor { message: String },
}

impl BuildError {
	/// Creates a [`BuildError::Contributor`] from any message.
	pub fn contributor(message: impl Into<String>) -> Self {
		Self::Contributor { message: message.into() }
	}
}

/// Errors raised while assembling a [`crate::MetadataRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// Two contributors produced metadata for the same class.
	#[error("duplicate object metadata for class '{class}' (contributor priorities {first_priority} and {second_priority})")]
	DuplicateObjectMetadata {
		class: String,
		/// Priority of the contributor that registered the class first.
		first_priority: i32,
		/// Priority of the contributor that tried to register it again.
		second_priority: i32,
	},

	/// The registry was already frozen by an earlier assembly.
	#[error("metadata registry is already assembled")]
	AlreadyAssembled,

	#[error(transparent)]
	Build(#[from] BuildError),
}

/// Result type for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
