//! Metadata builders.
//!
//! Builders are mutable accumulators keyed by an identity fixed at
//! construction (class name for objects, name for children). Every setter
//! accepts `impl Into<Option<T>>`; passing `None`, or an empty container, leaves
//! the builder untouched.
//!
//! # Invariants
//!
//! - `build` never mutates the builder and can be called any number of times.
//! - Child names are unique per kind within one object; a collision fails the
//!   whole object with [`BuildError::DuplicateMetadataName`].

mod child;

use heck::ToSnakeCase;
use indexmap::IndexMap;
use indexmap::map::Entry;
use objmeta_config::{ScalarMap, StringSet};

pub use self::child::{ActionMetadataBuilder, AssociationMetadataBuilder, FieldMetadataBuilder};
use crate::error::{BuildError, MetadataKind};
use crate::metadata::{ObjectMetadata, Resource};

/// Generates `set_*` methods for optional attributes.
///
/// `scalar` setters store any `Some` value; `container` setters also skip
/// empty containers; `flag` setters toggle a bit of `self.flags`.
macro_rules! setters {
	(@one scalar $setter:ident, $field:ident, $ty:ty) => {
		pub fn $setter(&mut self, value: impl Into<Option<$ty>>) -> &mut Self {
			if let Some(value) = value.into() {
				self.$field = Some(value);
			}
			self
		}
	};
	(@one container $setter:ident, $field:ident, $ty:ty) => {
		pub fn $setter(&mut self, value: impl Into<Option<$ty>>) -> &mut Self {
			if let Some(value) = value.into().filter(|v| !v.is_empty()) {
				self.$field = Some(value);
			}
			self
		}
	};
	(@one flag $setter:ident, $flag:ident, $ty:ty) => {
		pub fn $setter(&mut self, value: impl Into<Option<bool>>) -> &mut Self {
			if let Some(value) = value.into() {
				self.flags.set($crate::metadata::FieldFlags::$flag, value);
			}
			self
		}
	};
	($($kind:ident $setter:ident => $field:ident: $ty:ty;)*) => {
		$( $crate::builder::setters!(@one $kind $setter, $field, $ty); )*
	};
}

pub(crate) use setters;

/// Builder for [`ObjectMetadata`].
#[derive(Debug, Clone, Default)]
pub struct ObjectMetadataBuilder {
	class: String,
	name: Option<String>,
	plural_name: Option<String>,
	label: Option<String>,
	description: Option<String>,
	translation_domain: Option<String>,
	public: Option<bool>,
	sortable: Option<bool>,
	multi_sortable: Option<bool>,
	default_sortable: Option<StringSet>,
	available_contexts: Option<StringSet>,
	field_identifier: Option<String>,
	field_label: Option<String>,
	form_type: Option<String>,
	form_options: Option<ScalarMap>,
	groups: Option<StringSet>,
	build_default_actions: Option<bool>,
	default_action: Option<ActionMetadataBuilder>,
	actions: Vec<ActionMetadataBuilder>,
	fields: Vec<FieldMetadataBuilder>,
	associations: Vec<AssociationMetadataBuilder>,
	resources: Vec<Resource>,
}

impl ObjectMetadataBuilder {
	pub fn new(class: impl Into<String>) -> Self {
		Self {
			class: class.into(),
			..Self::default()
		}
	}

	pub fn class(&self) -> &str {
		&self.class
	}

	setters! {
		scalar set_name => name: String;
		scalar set_plural_name => plural_name: String;
		scalar set_label => label: String;
		scalar set_description => description: String;
		scalar set_translation_domain => translation_domain: String;
		scalar set_public => public: bool;
		scalar set_sortable => sortable: bool;
		scalar set_multi_sortable => multi_sortable: bool;
		container set_default_sortable => default_sortable: StringSet;
		container set_available_contexts => available_contexts: StringSet;
		scalar set_field_identifier => field_identifier: String;
		scalar set_field_label => field_label: String;
		scalar set_form_type => form_type: String;
		container set_form_options => form_options: ScalarMap;
		container set_groups => groups: StringSet;
		scalar set_build_default_actions => build_default_actions: bool;
	}

	pub fn set_default_action(&mut self, action: ActionMetadataBuilder) -> &mut Self {
		self.default_action = Some(action);
		self
	}

	pub fn add_action(&mut self, action: ActionMetadataBuilder) -> &mut Self {
		self.actions.push(action);
		self
	}

	pub fn add_field(&mut self, field: FieldMetadataBuilder) -> &mut Self {
		self.fields.push(field);
		self
	}

	pub fn add_association(&mut self, association: AssociationMetadataBuilder) -> &mut Self {
		self.associations.push(association);
		self
	}

	/// Records a file or directory whose changes invalidate this metadata.
	pub fn add_resource(&mut self, resource: Resource) -> &mut Self {
		if !self.resources.contains(&resource) {
			self.resources.push(resource);
		}
		self
	}

	/// Resolves nested builders and returns the immutable descriptor.
	pub fn build(&self) -> Result<ObjectMetadata, BuildError> {
		let actions = self.unique(MetadataKind::Action, self.actions.iter().map(|b| (b.name().to_string(), b.build())))?;
		let fields = self.unique(MetadataKind::Field, self.fields.iter().map(|b| (b.name().to_string(), b.build())))?;
		let associations = self.unique(MetadataKind::Association, self.associations.iter().map(|b| (b.name().to_string(), b.build())))?;

		Ok(ObjectMetadata {
			class: self.class.clone(),
			name: self.name.clone().unwrap_or_else(|| default_object_name(&self.class)),
			plural_name: self.plural_name.clone(),
			label: self.label.clone(),
			description: self.description.clone(),
			translation_domain: self.translation_domain.clone(),
			public: self.public.unwrap_or_default(),
			sortable: self.sortable.unwrap_or_default(),
			multi_sortable: self.multi_sortable.unwrap_or_default(),
			default_sortable: self.default_sortable.clone().unwrap_or_default(),
			available_contexts: self.available_contexts.clone().unwrap_or_default(),
			field_identifier: self.field_identifier.clone(),
			field_label: self.field_label.clone(),
			form_type: self.form_type.clone(),
			form_options: self.form_options.clone().unwrap_or_default(),
			groups: self.groups.clone().unwrap_or_default(),
			build_default_actions: self.build_default_actions.unwrap_or_default(),
			default_action: self.default_action.as_ref().map(ActionMetadataBuilder::build),
			actions,
			fields,
			associations,
			resources: self.resources.clone(),
		})
	}

	fn unique<T>(&self, kind: MetadataKind, children: impl Iterator<Item = (String, T)>) -> Result<IndexMap<String, T>, BuildError> {
		let mut out = IndexMap::new();
		for (name, child) in children {
			match out.entry(name) {
				Entry::Occupied(entry) => {
					return Err(BuildError::DuplicateMetadataName {
						object: self.class.clone(),
						kind,
						name: entry.key().clone(),
					});
				}
				Entry::Vacant(entry) => {
					entry.insert(child);
				}
			}
		}
		Ok(out)
	}
}

/// Derives an object name from the short class name, e.g. `App\Entity\OrderItem` → `order_item`.
pub fn default_object_name(class: &str) -> String {
	let short = class.rsplit(['\\', ':', '.']).find(|segment| !segment.is_empty()).unwrap_or(class);
	short.to_snake_case()
}
