//! Contributor capabilities consumed by the registry assembler.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::builder::ObjectMetadataBuilder;
use crate::error::BuildError;
use crate::metadata::{AssociationMetadata, FieldMetadata, ObjectMetadata};

/// Eagerly produces object metadata at assembly time.
pub trait ObjectBuilder: Send + Sync {
	fn build_objects(&self) -> Result<Vec<ObjectMetadata>, BuildError>;
}

impl ObjectBuilder for ObjectMetadataBuilder {
	fn build_objects(&self) -> Result<Vec<ObjectMetadata>, BuildError> {
		Ok(vec![self.build()?])
	}
}

/// Supplies object metadata lazily, for classes no builder covered.
pub trait ObjectLoader: Send + Sync {
	fn load(&self, class: &str) -> Option<Arc<ObjectMetadata>>;
}

/// Infers child metadata that an object does not declare.
pub trait Guesser: Send + Sync {
	fn guess_field(&self, _class: &str, _field: &str) -> Option<FieldMetadata> {
		None
	}

	fn guess_association(&self, _class: &str, _association: &str) -> Option<AssociationMetadata> {
		None
	}
}

/// Source of resolve-target aliases (interface or abstract class → concrete class).
pub trait AliasSource: Send + Sync {
	fn resolve_targets(&self) -> FxHashMap<String, String>;
}

impl<S: BuildHasher + Send + Sync> AliasSource for HashMap<String, String, S> {
	fn resolve_targets(&self) -> FxHashMap<String, String> {
		self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
	}
}

impl AliasSource for BTreeMap<String, String> {
	fn resolve_targets(&self) -> FxHashMap<String, String> {
		self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
	}
}

impl<S: BuildHasher + Send + Sync> AliasSource for IndexMap<String, String, S> {
	fn resolve_targets(&self) -> FxHashMap<String, String> {
		self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
	}
}

/// A contributor with its declared priority and registration ordinal.
pub struct Prioritized<T: ?Sized> {
	priority: i32,
	ordinal: u32,
	component: Arc<T>,
}

impl<T: ?Sized> Prioritized<T> {
	/// Wraps a contributor. The ordinal is assigned when the registry is assembled.
	pub fn new(component: Arc<T>, priority: i32) -> Self {
		Self {
			priority,
			ordinal: 0,
			component,
		}
	}

	pub fn priority(&self) -> i32 {
		self.priority
	}

	/// Position in registration order.
	pub fn ordinal(&self) -> u32 {
		self.ordinal
	}

	pub fn component(&self) -> &Arc<T> {
		&self.component
	}
}

impl<T: ?Sized> Clone for Prioritized<T> {
	fn clone(&self) -> Self {
		Self {
			priority: self.priority,
			ordinal: self.ordinal,
			component: Arc::clone(&self.component),
		}
	}
}

impl<T: ?Sized> fmt::Debug for Prioritized<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Prioritized")
			.field("priority", &self.priority)
			.field("ordinal", &self.ordinal)
			.finish_non_exhaustive()
	}
}

/// Numbers `list` in its current order, then sorts it for consultation.
pub(crate) fn sort_contributors<T: ?Sized>(list: &mut [Prioritized<T>]) {
	for (ordinal, entry) in (0u32..).zip(list.iter_mut()) {
		entry.ordinal = ordinal;
	}
	list.sort_by(cmp_contributors);
}

/// Higher priority first; equal priorities keep registration order.
pub(crate) fn cmp_contributors<T: ?Sized>(a: &Prioritized<T>, b: &Prioritized<T>) -> Ordering {
	b.priority.cmp(&a.priority).then_with(|| a.ordinal.cmp(&b.ordinal))
}
