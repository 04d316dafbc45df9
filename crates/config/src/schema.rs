//! Typed metadata configuration trees.
//!
//! Every attribute is optional: `None` means "unset" and lets defaults cascade
//! into it (see [`crate::cascade`]). Containers follow the same rule once
//! normalized; an empty set or map is indistinguishable from an absent one.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::value::{ScalarMap, StringSet, prune};

/// Copies every unset attribute of `$dst` from `$src`.
///
/// Attributes are taken wholesale, containers included.
macro_rules! fill_unset {
	($dst:expr, $src:expr; $($field:ident),* $(,)?) => {
		$(
			if $dst.$field.is_none() {
				$dst.$field = $src.$field.clone();
			}
		)*
	};
}

/// Drops every empty container attribute of `$node` to `None`.
macro_rules! prune_empty {
	($node:expr; $($field:ident),* $(,)?) => {
		$( prune(&mut $node.$field); )*
	};
}

/// Child config maps keyed by action, field or association name.
pub type ActionConfigs = IndexMap<String, ActionConfig>;
/// Field configs keyed by field name.
pub type FieldConfigs = IndexMap<String, FieldConfig>;
/// Association configs keyed by association name.
pub type AssociationConfigs = IndexMap<String, AssociationConfig>;

/// Root of a metadata configuration document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataConfig {
	/// Global and per-kind defaults.
	pub defaults: DefaultsConfig,
	/// Object configs keyed by fully-qualified class name.
	pub objects: IndexMap<String, ObjectConfig>,
	/// File the document was loaded from, if any.
	#[serde(skip)]
	pub source: Option<PathBuf>,
}

/// The `defaults` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultsConfig {
	pub global: GlobalDefaults,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub actions: Option<ActionConfigs>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub fields: Option<FieldConfigs>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub associations: Option<AssociationConfigs>,
}

/// The `defaults.global` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalDefaults {
	pub translation_domain: Option<String>,
	pub public: Option<bool>,
	pub sortable: Option<bool>,
	pub multi_sortable: Option<bool>,
	pub filterable: Option<bool>,
	pub searchable: Option<bool>,
	pub available_contexts: Option<StringSet>,
}

/// Configuration of one object class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObjectConfig {
	pub name: Option<String>,
	pub plural_name: Option<String>,
	pub label: Option<String>,
	pub description: Option<String>,
	pub translation_domain: Option<String>,
	pub public: Option<bool>,
	pub sortable: Option<bool>,
	pub multi_sortable: Option<bool>,
	pub default_sortable: Option<StringSet>,
	pub available_contexts: Option<StringSet>,
	pub field_identifier: Option<String>,
	pub field_label: Option<String>,
	pub form_type: Option<String>,
	pub form_options: Option<ScalarMap>,
	pub groups: Option<StringSet>,
	pub build_default_actions: Option<bool>,
	pub default_action: Option<ActionConfig>,
	pub actions: Option<ActionConfigs>,
	pub fields: Option<FieldConfigs>,
	pub associations: Option<AssociationConfigs>,
}

/// Configuration of one action (also used for `default_action` and templates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ActionConfig {
	pub name: Option<String>,
	pub methods: Option<StringSet>,
	pub schemes: Option<StringSet>,
	pub host: Option<String>,
	pub path: Option<String>,
	pub fragment: Option<String>,
	pub controller: Option<String>,
	pub format: Option<String>,
	pub locale: Option<String>,
	pub condition: Option<String>,
	pub defaults: Option<ScalarMap>,
	pub requirements: Option<ScalarMap>,
	pub options: Option<ScalarMap>,
	pub configurations: Option<StringSet>,
}

/// Configuration of one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldConfig {
	pub name: Option<String>,
	#[serde(rename = "type")]
	pub field_type: Option<String>,
	pub label: Option<String>,
	pub description: Option<String>,
	pub translation_domain: Option<String>,
	pub public: Option<bool>,
	pub sortable: Option<bool>,
	pub filterable: Option<bool>,
	pub searchable: Option<bool>,
	pub translatable: Option<bool>,
	pub read_only: Option<bool>,
	pub required: Option<bool>,
	pub input: Option<String>,
	pub input_config: Option<ScalarMap>,
	pub form_type: Option<String>,
	pub form_options: Option<ScalarMap>,
	pub groups: Option<StringSet>,
}

/// Configuration of one association.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssociationConfig {
	pub name: Option<String>,
	/// Association kind, e.g. `one-to-many`.
	#[serde(rename = "type")]
	pub association_type: Option<String>,
	pub target: Option<String>,
	pub label: Option<String>,
	pub description: Option<String>,
	pub translation_domain: Option<String>,
	pub public: Option<bool>,
	pub sortable: Option<bool>,
	pub filterable: Option<bool>,
	pub searchable: Option<bool>,
	pub translatable: Option<bool>,
	pub read_only: Option<bool>,
	pub required: Option<bool>,
	pub input: Option<String>,
	pub input_config: Option<ScalarMap>,
	pub form_type: Option<String>,
	pub form_options: Option<ScalarMap>,
	pub groups: Option<StringSet>,
}

impl MetadataConfig {
	/// Normalizes every node of the tree in place.
	pub fn normalize(&mut self) {
		self.defaults.normalize();
		for object in self.objects.values_mut() {
			object.normalize();
		}
	}

	/// Assigns child names from their map keys.
	///
	/// Actions always take their key. Fields and associations take their key
	/// unless an explicit `name` renames them.
	pub fn derive_names(&mut self) {
		self.defaults.derive_names();
		for object in self.objects.values_mut() {
			object.derive_names();
		}
	}
}

impl DefaultsConfig {
	pub fn normalize(&mut self) {
		self.global.normalize();
		normalize_children(&mut self.actions, ActionConfig::normalize);
		normalize_children(&mut self.fields, FieldConfig::normalize);
		normalize_children(&mut self.associations, AssociationConfig::normalize);
	}

	pub(crate) fn derive_names(&mut self) {
		derive_child_names(&mut self.actions, &mut self.fields, &mut self.associations);
	}

	/// Returns the action template registered under `name`.
	pub fn action(&self, name: &str) -> Option<&ActionConfig> {
		self.actions.as_ref()?.get(name)
	}

	/// Returns the field template registered under `name`.
	pub fn field(&self, name: &str) -> Option<&FieldConfig> {
		self.fields.as_ref()?.get(name)
	}

	/// Returns the association template registered under `name`.
	pub fn association(&self, name: &str) -> Option<&AssociationConfig> {
		self.associations.as_ref()?.get(name)
	}
}

impl GlobalDefaults {
	pub fn normalize(&mut self) {
		prune_empty!(self; available_contexts);
	}

	/// Projects the global attributes that apply to objects.
	pub fn as_object(&self) -> ObjectConfig {
		ObjectConfig {
			translation_domain: self.translation_domain.clone(),
			public: self.public,
			sortable: self.sortable,
			multi_sortable: self.multi_sortable,
			available_contexts: self.available_contexts.clone(),
			..ObjectConfig::default()
		}
	}

	/// Projects the global attributes that apply to fields.
	pub fn as_field(&self) -> FieldConfig {
		FieldConfig {
			translation_domain: self.translation_domain.clone(),
			public: self.public,
			sortable: self.sortable,
			filterable: self.filterable,
			searchable: self.searchable,
			..FieldConfig::default()
		}
	}

	/// Projects the global attributes that apply to associations.
	pub fn as_association(&self) -> AssociationConfig {
		AssociationConfig {
			translation_domain: self.translation_domain.clone(),
			public: self.public,
			sortable: self.sortable,
			filterable: self.filterable,
			searchable: self.searchable,
			..AssociationConfig::default()
		}
	}
}

impl ObjectConfig {
	pub fn normalize(&mut self) {
		prune_empty!(self; default_sortable, available_contexts, form_options, groups);
		if let Some(action) = self.default_action.as_mut() {
			action.normalize();
		}
		normalize_children(&mut self.actions, ActionConfig::normalize);
		normalize_children(&mut self.fields, FieldConfig::normalize);
		normalize_children(&mut self.associations, AssociationConfig::normalize);
	}

	pub(crate) fn derive_names(&mut self) {
		derive_child_names(&mut self.actions, &mut self.fields, &mut self.associations);
	}

	/// Fills every unset object-level attribute from `lower`.
	///
	/// Children and `default_action` are never filled here.
	pub fn fill_from(&mut self, lower: &ObjectConfig) {
		fill_unset!(self, lower;
			name, plural_name, label, description, translation_domain, public, sortable,
			multi_sortable, default_sortable, available_contexts, field_identifier, field_label,
			form_type, form_options, groups, build_default_actions,
		);
	}
}

impl ActionConfig {
	pub fn normalize(&mut self) {
		prune_empty!(self; methods, schemes, defaults, requirements, options, configurations);
	}

	/// Fills every unset attribute except `name` from `lower`.
	pub fn fill_from(&mut self, lower: &ActionConfig) {
		fill_unset!(self, lower;
			methods, schemes, host, path, fragment, controller, format, locale, condition,
			defaults, requirements, options, configurations,
		);
	}
}

impl FieldConfig {
	pub fn normalize(&mut self) {
		prune_empty!(self; input_config, form_options, groups);
	}

	/// Fills every unset attribute except `name` from `lower`.
	pub fn fill_from(&mut self, lower: &FieldConfig) {
		fill_unset!(self, lower;
			field_type, label, description, translation_domain, public, sortable, filterable,
			searchable, translatable, read_only, required, input, input_config, form_type,
			form_options, groups,
		);
	}
}

impl AssociationConfig {
	pub fn normalize(&mut self) {
		prune_empty!(self; input_config, form_options, groups);
	}

	/// Fills every unset attribute except `name` from `lower`.
	pub fn fill_from(&mut self, lower: &AssociationConfig) {
		fill_unset!(self, lower;
			association_type, target, label, description, translation_domain, public, sortable,
			filterable, searchable, translatable, read_only, required, input, input_config,
			form_type, form_options, groups,
		);
	}
}

fn normalize_children<T>(children: &mut Option<IndexMap<String, T>>, normalize: fn(&mut T)) {
	if let Some(map) = children.as_mut() {
		map.values_mut().for_each(normalize);
	}
	prune(children);
}

fn derive_child_names(actions: &mut Option<ActionConfigs>, fields: &mut Option<FieldConfigs>, associations: &mut Option<AssociationConfigs>) {
	for (key, action) in actions.iter_mut().flatten() {
		action.name = Some(key.clone());
	}
	for (key, field) in fields.iter_mut().flatten() {
		field.name.get_or_insert_with(|| key.clone());
	}
	for (key, association) in associations.iter_mut().flatten() {
		association.name.get_or_insert_with(|| key.clone());
	}
}
