//! Write-once metadata registry.
//!
//! # Purpose
//!
//! Hold every compiled [`ObjectMetadata`] together with the priority-ordered
//! contributor lists and the resolve-target alias map, and answer lookups
//! against them without locking.
//!
//! # Mental model
//!
//! * A registry starts empty and is assembled exactly once.
//! * Assembly builds every eager object, then publishes one immutable
//!   state through a [`OnceLock`].
//! * Readers see either nothing (before assembly) or the complete state.
//!
//! # Key types
//!
//! | Type | Meaning | Constructed in |
//! |---|---|---|
//! | [`MetadataRegistry`] | Write-once container with the query API | [`MetadataRegistry::new`] |
//! | [`RegistryAssembler`] | Contributor registration and assembly entry point | [`RegistryAssembler::new`] |
//! | [`Prioritized`] | Contributor with priority and registration ordinal | [`Prioritized::new`] |
//!
//! # Invariants
//!
//! * Contributor lists are sorted by priority (descending), ties broken by
//!   registration order.
//! * Class names are unique among eagerly built objects.
//! * A failed assembly publishes nothing; the registry stays unassembled.
//! * A second assembly fails with [`RegistryError::AlreadyAssembled`].
//!
//! # Lookup order
//!
//! 1. [`MetadataRegistry::resolve`]: alias substitution, then the eager table.
//! 2. [`MetadataRegistry::object`]: `resolve`, then each loader in priority order.
//! 3. [`MetadataRegistry::field`] / [`MetadataRegistry::association`]: the
//!    object's own child, then each guesser in priority order.

mod assembler;

use std::fmt;
use std::sync::{Arc, OnceLock};

use indexmap::IndexSet;
use objmeta_config::{CascadeOptions, MetadataConfig};
use rustc_hash::FxHashMap;

pub use self::assembler::RegistryAssembler;
use crate::contributor::{AliasSource, Guesser, ObjectBuilder, ObjectLoader, Prioritized, sort_contributors};
use crate::error::{RegistryError, Result};
use crate::metadata::{AssociationMetadata, FieldMetadata, ObjectMetadata, Resource};

/// Central, write-once store of object metadata.
#[derive(Default)]
pub struct MetadataRegistry {
	state: OnceLock<Frozen>,
}

/// Published registry state.
struct Frozen {
	objects: Vec<Arc<ObjectMetadata>>,
	by_class: FxHashMap<String, Arc<ObjectMetadata>>,
	object_builders: Vec<Prioritized<dyn ObjectBuilder>>,
	object_loaders: Vec<Prioritized<dyn ObjectLoader>>,
	guessers: Vec<Prioritized<dyn Guesser>>,
	resolve_targets: FxHashMap<String, String>,
	resources: IndexSet<Resource>,
}

impl MetadataRegistry {
	/// Creates an empty, unassembled registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Compiles `config` with default cascading and assembles a registry from it.
	pub fn from_config(config: &MetadataConfig) -> Result<Self> {
		let mut assembler = RegistryAssembler::new();
		assembler.register_config(config, 0);
		assembler.assemble()
	}

	/// Like [`Self::from_config`] with explicit cascade options.
	pub fn from_config_with(config: &MetadataConfig, options: CascadeOptions) -> Result<Self> {
		let mut assembler = RegistryAssembler::new();
		assembler.set_cascade_options(options).register_config(config, 0);
		assembler.assemble()
	}

	/// Sorts the contributor lists, builds every eager object and freezes the registry.
	///
	/// Lists are taken in registration order; each entry's ordinal is its
	/// position in its list.
	pub fn assemble(
		&self,
		mut object_builders: Vec<Prioritized<dyn ObjectBuilder>>,
		mut object_loaders: Vec<Prioritized<dyn ObjectLoader>>,
		mut guessers: Vec<Prioritized<dyn Guesser>>,
		alias_source: Option<&dyn AliasSource>,
	) -> Result<()> {
		if self.is_assembled() {
			return Err(RegistryError::AlreadyAssembled);
		}

		sort_contributors(&mut object_builders);
		sort_contributors(&mut object_loaders);
		sort_contributors(&mut guessers);

		let mut objects = Vec::new();
		let mut by_class = FxHashMap::default();
		let mut first_priority: FxHashMap<String, i32> = FxHashMap::default();

		for builder in &object_builders {
			for object in builder.component().build_objects()? {
				if let Some(&first) = first_priority.get(&object.class) {
					return Err(RegistryError::DuplicateObjectMetadata {
						class: object.class,
						first_priority: first,
						second_priority: builder.priority(),
					});
				}
				tracing::trace!(class = %object.class, name = %object.name, priority = builder.priority(), "built object metadata");

				first_priority.insert(object.class.clone(), builder.priority());
				let object = Arc::new(object);
				by_class.insert(object.class.clone(), Arc::clone(&object));
				objects.push(object);
			}
		}

		let resolve_targets = alias_source.map(|source| source.resolve_targets()).unwrap_or_default();
		for (alias, target) in &resolve_targets {
			if !by_class.contains_key(target) {
				tracing::warn!(%alias, %target, "resolve target has no eagerly built metadata");
			}
		}

		let resources = objects.iter().flat_map(|o| o.resources.iter().cloned()).collect();

		tracing::debug!(
			builders = object_builders.len(),
			loaders = object_loaders.len(),
			guessers = guessers.len(),
			objects = objects.len(),
			aliases = resolve_targets.len(),
			"assembled metadata registry"
		);

		let frozen = Frozen {
			objects,
			by_class,
			object_builders,
			object_loaders,
			guessers,
			resolve_targets,
			resources,
		};
		self.state.set(frozen).map_err(|_| RegistryError::AlreadyAssembled)
	}

	pub fn is_assembled(&self) -> bool {
		self.state.get().is_some()
	}

	/// Returns the concrete class registered for `name`, if `name` is an alias.
	pub fn resolve_target(&self, name: &str) -> Option<&str> {
		self.state.get()?.resolve_targets.get(name).map(String::as_str)
	}

	/// Looks up eagerly built metadata, substituting aliases first.
	pub fn resolve(&self, class: &str) -> Option<Arc<ObjectMetadata>> {
		let state = self.state.get()?;
		let class = state.resolve_targets.get(class).map_or(class, String::as_str);
		state.by_class.get(class).cloned()
	}

	/// Resolves `class`, falling back to the object loaders in priority order.
	pub fn object(&self, class: &str) -> Option<Arc<ObjectMetadata>> {
		if let Some(object) = self.resolve(class) {
			return Some(object);
		}
		let target = self.resolve_target(class).unwrap_or(class);
		self.object_loaders().iter().find_map(|loader| loader.component().load(target))
	}

	/// Returns a field of `class`, falling back to the guessers in priority order.
	///
	/// Guessers are only consulted when the object itself is known.
	pub fn field(&self, class: &str, name: &str) -> Option<FieldMetadata> {
		let object = self.object(class)?;
		if let Some(field) = object.field(name) {
			return Some(field.clone());
		}
		self.guessers().iter().find_map(|guesser| guesser.component().guess_field(&object.class, name))
	}

	/// Returns an association of `class`, falling back to the guessers in priority order.
	pub fn association(&self, class: &str, name: &str) -> Option<AssociationMetadata> {
		let object = self.object(class)?;
		if let Some(association) = object.association(name) {
			return Some(association.clone());
		}
		self.guessers()
			.iter()
			.find_map(|guesser| guesser.component().guess_association(&object.class, name))
	}

	pub fn has(&self, class: &str) -> bool {
		self.resolve(class).is_some()
	}

	/// Every eagerly built object, in builder priority order.
	pub fn all(&self) -> &[Arc<ObjectMetadata>] {
		self.state.get().map(|s| s.objects.as_slice()).unwrap_or_default()
	}

	/// Distinct resources of every eagerly built object.
	pub fn resources(&self) -> impl Iterator<Item = &Resource> {
		self.state.get().into_iter().flat_map(|s| s.resources.iter())
	}

	pub fn object_builders(&self) -> &[Prioritized<dyn ObjectBuilder>] {
		self.state.get().map(|s| s.object_builders.as_slice()).unwrap_or_default()
	}

	pub fn object_loaders(&self) -> &[Prioritized<dyn ObjectLoader>] {
		self.state.get().map(|s| s.object_loaders.as_slice()).unwrap_or_default()
	}

	pub fn guessers(&self) -> &[Prioritized<dyn Guesser>] {
		self.state.get().map(|s| s.guessers.as_slice()).unwrap_or_default()
	}

	/// Number of eagerly built objects.
	pub fn len(&self) -> usize {
		self.all().len()
	}

	pub fn is_empty(&self) -> bool {
		self.all().is_empty()
	}
}

impl fmt::Debug for MetadataRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut s = f.debug_struct("MetadataRegistry");
		match self.state.get() {
			Some(state) => s
				.field("objects", &state.objects.len())
				.field("object_builders", &state.object_builders.len())
				.field("object_loaders", &state.object_loaders.len())
				.field("guessers", &state.guessers.len())
				.field("resolve_targets", &state.resolve_targets.len())
				.finish(),
			None => s.field("assembled", &false).finish(),
		}
	}
}
