//! Immutable metadata descriptors.
//!
//! Descriptors are produced by the builders in [`crate::builder`] and never
//! change afterwards. Unset attributes are `None` for scalars and empty for
//! containers.

mod resource;

use indexmap::IndexMap;
use objmeta_config::{ScalarMap, StringSet};
use serde::{Deserialize, Serialize};

pub use self::resource::Resource;

bitflags::bitflags! {
	/// Boolean attributes of a field or association.
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
	pub struct FieldFlags: u8 {
		/// Exposed outside the admin surface.
		const PUBLIC = 1 << 0;
		const SORTABLE = 1 << 1;
		const FILTERABLE = 1 << 2;
		const SEARCHABLE = 1 << 3;
		/// Value is stored per locale.
		const TRANSLATABLE = 1 << 4;
		const READ_ONLY = 1 << 5;
		const REQUIRED = 1 << 6;
	}
}

/// Compiled metadata for one domain class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ObjectMetadata {
	/// Fully-qualified class name, unique across a registry.
	pub class: String,
	pub name: String,
	pub plural_name: Option<String>,
	pub label: Option<String>,
	pub description: Option<String>,
	pub translation_domain: Option<String>,
	pub public: bool,
	pub sortable: bool,
	pub multi_sortable: bool,
	/// Field names in default sort order.
	pub default_sortable: StringSet,
	pub available_contexts: StringSet,
	pub field_identifier: Option<String>,
	pub field_label: Option<String>,
	pub form_type: Option<String>,
	pub form_options: ScalarMap,
	pub groups: StringSet,
	pub build_default_actions: bool,
	pub default_action: Option<ActionMetadata>,
	pub actions: IndexMap<String, ActionMetadata>,
	pub fields: IndexMap<String, FieldMetadata>,
	pub associations: IndexMap<String, AssociationMetadata>,
	/// Files and directories this descriptor was compiled from.
	pub resources: Vec<Resource>,
}

impl ObjectMetadata {
	pub fn action(&self, name: &str) -> Option<&ActionMetadata> {
		self.actions.get(name)
	}

	pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
		self.fields.get(name)
	}

	pub fn association(&self, name: &str) -> Option<&AssociationMetadata> {
		self.associations.get(name)
	}

	/// Returns the field used to identify instances, if configured and declared.
	pub fn identifier_field(&self) -> Option<&FieldMetadata> {
		self.field(self.field_identifier.as_deref()?)
	}
}

/// Compiled metadata for one action (route) of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ActionMetadata {
	pub name: String,
	pub methods: StringSet,
	pub schemes: StringSet,
	pub host: Option<String>,
	pub path: Option<String>,
	pub fragment: Option<String>,
	pub controller: Option<String>,
	pub format: Option<String>,
	pub locale: Option<String>,
	pub defaults: ScalarMap,
	pub requirements: ScalarMap,
	pub options: ScalarMap,
	/// Expression guarding the route.
	pub condition: Option<String>,
	pub configurations: StringSet,
}

impl ActionMetadata {
	/// Returns true if the action accepts `method`; an empty method set accepts all.
	pub fn allows_method(&self, method: &str) -> bool {
		self.methods.is_empty() || self.methods.iter().any(|m| m.eq_ignore_ascii_case(method))
	}
}

/// Compiled metadata for one field of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct FieldMetadata {
	pub name: String,
	pub field_type: Option<String>,
	pub label: Option<String>,
	pub description: Option<String>,
	pub translation_domain: Option<String>,
	pub flags: FieldFlags,
	pub input: Option<String>,
	pub input_config: ScalarMap,
	pub form_type: Option<String>,
	pub form_options: ScalarMap,
	pub groups: StringSet,
}

/// Compiled metadata for one association of an object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AssociationMetadata {
	pub name: String,
	/// Association kind, e.g. `one-to-many`.
	pub association_type: Option<String>,
	/// Class name of the related object.
	pub target: Option<String>,
	pub label: Option<String>,
	pub description: Option<String>,
	pub translation_domain: Option<String>,
	pub flags: FieldFlags,
	pub input: Option<String>,
	pub input_config: ScalarMap,
	pub form_type: Option<String>,
	pub form_options: ScalarMap,
	pub groups: StringSet,
}

macro_rules! flag_accessors {
	($($ty:ty),*) => {
		$(
			impl $ty {
				pub fn is_public(&self) -> bool {
					self.flags.contains(FieldFlags::PUBLIC)
				}

				pub fn is_sortable(&self) -> bool {
					self.flags.contains(FieldFlags::SORTABLE)
				}

				pub fn is_filterable(&self) -> bool {
					self.flags.contains(FieldFlags::FILTERABLE)
				}

				pub fn is_searchable(&self) -> bool {
					self.flags.contains(FieldFlags::SEARCHABLE)
				}

				pub fn is_translatable(&self) -> bool {
					self.flags.contains(FieldFlags::TRANSLATABLE)
				}

				pub fn is_read_only(&self) -> bool {
					self.flags.contains(FieldFlags::READ_ONLY)
				}

				pub fn is_required(&self) -> bool {
					self.flags.contains(FieldFlags::REQUIRED)
				}
			}
		)*
	};
}

flag_accessors!(FieldMetadata, AssociationMetadata);
