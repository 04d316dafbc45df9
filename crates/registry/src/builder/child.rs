use objmeta_config::{ScalarMap, StringSet};

use super::setters;
use crate::metadata::{ActionMetadata, AssociationMetadata, FieldFlags, FieldMetadata};

/// Builder for [`ActionMetadata`].
#[derive(Debug, Clone, Default)]
pub struct ActionMetadataBuilder {
	name: String,
	methods: Option<StringSet>,
	schemes: Option<StringSet>,
	host: Option<String>,
	path: Option<String>,
	fragment: Option<String>,
	controller: Option<String>,
	format: Option<String>,
	locale: Option<String>,
	defaults: Option<ScalarMap>,
	requirements: Option<ScalarMap>,
	options: Option<ScalarMap>,
	condition: Option<String>,
	configurations: Option<StringSet>,
}

impl ActionMetadataBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	setters! {
		container set_methods => methods: StringSet;
		container set_schemes => schemes: StringSet;
		scalar set_host => host: String;
		scalar set_path => path: String;
		scalar set_fragment => fragment: String;
		scalar set_controller => controller: String;
		scalar set_format => format: String;
		scalar set_locale => locale: String;
		container set_defaults => defaults: ScalarMap;
		container set_requirements => requirements: ScalarMap;
		container set_options => options: ScalarMap;
		scalar set_condition => condition: String;
		container set_configurations => configurations: StringSet;
	}

	pub fn build(&self) -> ActionMetadata {
		ActionMetadata {
			name: self.name.clone(),
			methods: self.methods.clone().unwrap_or_default(),
			schemes: self.schemes.clone().unwrap_or_default(),
			host: self.host.clone(),
			path: self.path.clone(),
			fragment: self.fragment.clone(),
			controller: self.controller.clone(),
			format: self.format.clone(),
			locale: self.locale.clone(),
			defaults: self.defaults.clone().unwrap_or_default(),
			requirements: self.requirements.clone().unwrap_or_default(),
			options: self.options.clone().unwrap_or_default(),
			condition: self.condition.clone(),
			configurations: self.configurations.clone().unwrap_or_default(),
		}
	}
}

/// Builder for [`FieldMetadata`].
#[derive(Debug, Clone, Default)]
pub struct FieldMetadataBuilder {
	name: String,
	field_type: Option<String>,
	label: Option<String>,
	description: Option<String>,
	translation_domain: Option<String>,
	flags: FieldFlags,
	input: Option<String>,
	input_config: Option<ScalarMap>,
	form_type: Option<String>,
	form_options: Option<ScalarMap>,
	groups: Option<StringSet>,
}

impl FieldMetadataBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Renames the field; duplicate detection uses the final name.
	pub fn set_name(&mut self, name: impl Into<Option<String>>) -> &mut Self {
		if let Some(name) = name.into() {
			self.name = name;
		}
		self
	}

	setters! {
		scalar set_type => field_type: String;
		scalar set_label => label: String;
		scalar set_description => description: String;
		scalar set_translation_domain => translation_domain: String;
		flag set_public => PUBLIC: bool;
		flag set_sortable => SORTABLE: bool;
		flag set_filterable => FILTERABLE: bool;
		flag set_searchable => SEARCHABLE: bool;
		flag set_translatable => TRANSLATABLE: bool;
		flag set_read_only => READ_ONLY: bool;
		flag set_required => REQUIRED: bool;
		scalar set_input => input: String;
		container set_input_config => input_config: ScalarMap;
		scalar set_form_type => form_type: String;
		container set_form_options => form_options: ScalarMap;
		container set_groups => groups: StringSet;
	}

	pub fn build(&self) -> FieldMetadata {
		FieldMetadata {
			name: self.name.clone(),
			field_type: self.field_type.clone(),
			label: self.label.clone(),
			description: self.description.clone(),
			translation_domain: self.translation_domain.clone(),
			flags: self.flags,
			input: self.input.clone(),
			input_config: self.input_config.clone().unwrap_or_default(),
			form_type: self.form_type.clone(),
			form_options: self.form_options.clone().unwrap_or_default(),
			groups: self.groups.clone().unwrap_or_default(),
		}
	}
}

/// Builder for [`AssociationMetadata`].
#[derive(Debug, Clone, Default)]
pub struct AssociationMetadataBuilder {
	name: String,
	association_type: Option<String>,
	target: Option<String>,
	label: Option<String>,
	description: Option<String>,
	translation_domain: Option<String>,
	flags: FieldFlags,
	input: Option<String>,
	input_config: Option<ScalarMap>,
	form_type: Option<String>,
	form_options: Option<ScalarMap>,
	groups: Option<StringSet>,
}

impl AssociationMetadataBuilder {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Renames the association; duplicate detection uses the final name.
	pub fn set_name(&mut self, name: impl Into<Option<String>>) -> &mut Self {
		if let Some(name) = name.into() {
			self.name = name;
		}
		self
	}

	setters! {
		scalar set_type => association_type: String;
		scalar set_target => target: String;
		scalar set_label => label: String;
		scalar set_description => description: String;
		scalar set_translation_domain => translation_domain: String;
		flag set_public => PUBLIC: bool;
		flag set_sortable => SORTABLE: bool;
		flag set_filterable => FILTERABLE: bool;
		flag set_searchable => SEARCHABLE: bool;
		flag set_translatable => TRANSLATABLE: bool;
		flag set_read_only => READ_ONLY: bool;
		flag set_required => REQUIRED: bool;
		scalar set_input => input: String;
		container set_input_config => input_config: ScalarMap;
		scalar set_form_type => form_type: String;
		container set_form_options => form_options: ScalarMap;
		container set_groups => groups: StringSet;
	}

	pub fn build(&self) -> AssociationMetadata {
		AssociationMetadata {
			name: self.name.clone(),
			association_type: self.association_type.clone(),
			target: self.target.clone(),
			label: self.label.clone(),
			description: self.description.clone(),
			translation_domain: self.translation_domain.clone(),
			flags: self.flags,
			input: self.input.clone(),
			input_config: self.input_config.clone().unwrap_or_default(),
			form_type: self.form_type.clone(),
			form_options: self.form_options.clone().unwrap_or_default(),
			groups: self.groups.clone().unwrap_or_default(),
		}
	}
}
