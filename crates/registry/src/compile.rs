//! Compiles metadata configuration into object builders.

use std::path::Path;

use objmeta_config::{ActionConfig, AssociationConfig, CascadeOptions, FieldConfig, MetadataConfig, ObjectConfig, cascade};

use crate::builder::{ActionMetadataBuilder, AssociationMetadataBuilder, FieldMetadataBuilder, ObjectMetadataBuilder};
use crate::metadata::Resource;

/// Name given to an object's default action.
pub const DEFAULT_ACTION_NAME: &str = "_default";

/// Cascades `config` and returns one builder per configured object, in
/// declaration order.
///
/// Builders of a config loaded from a file carry that file and its directory
/// as resources.
pub fn compile(config: &MetadataConfig, options: CascadeOptions) -> Vec<ObjectMetadataBuilder> {
	let effective = cascade(config, options);
	let resources = source_resources(effective.source.as_deref());

	effective
		.objects
		.iter()
		.map(|(class, object)| {
			let mut builder = object_builder(class, object);
			for resource in &resources {
				builder.add_resource(resource.clone());
			}
			builder
		})
		.collect()
}

/// The source file, then its config directory (sibling documents live there).
fn source_resources(source: Option<&Path>) -> Vec<Resource> {
	let Some(source) = source else {
		return Vec::new();
	};
	let mut resources = vec![Resource::File(source.to_path_buf())];
	if let Some(dir) = source.parent().filter(|dir| !dir.as_os_str().is_empty()) {
		resources.push(Resource::Directory(dir.to_path_buf()));
	}
	resources
}

/// Builds an object builder from an already cascaded object config.
pub fn object_builder(class: &str, config: &ObjectConfig) -> ObjectMetadataBuilder {
	let mut builder = ObjectMetadataBuilder::new(class);
	builder
		.set_name(config.name.clone())
		.set_plural_name(config.plural_name.clone())
		.set_label(config.label.clone())
		.set_description(config.description.clone())
		.set_translation_domain(config.translation_domain.clone())
		.set_public(config.public)
		.set_sortable(config.sortable)
		.set_multi_sortable(config.multi_sortable)
		.set_default_sortable(config.default_sortable.clone())
		.set_available_contexts(config.available_contexts.clone())
		.set_field_identifier(config.field_identifier.clone())
		.set_field_label(config.field_label.clone())
		.set_form_type(config.form_type.clone())
		.set_form_options(config.form_options.clone())
		.set_groups(config.groups.clone())
		.set_build_default_actions(config.build_default_actions);

	if let Some(action) = &config.default_action {
		builder.set_default_action(action_builder(DEFAULT_ACTION_NAME, action));
	}
	for (key, action) in config.actions.iter().flatten() {
		builder.add_action(action_builder(key, action));
	}
	for (key, field) in config.fields.iter().flatten() {
		builder.add_field(field_builder(key, field));
	}
	for (key, association) in config.associations.iter().flatten() {
		builder.add_association(association_builder(key, association));
	}
	builder
}

/// Actions are always named after their key.
fn action_builder(name: &str, config: &ActionConfig) -> ActionMetadataBuilder {
	let mut builder = ActionMetadataBuilder::new(name);
	builder
		.set_methods(config.methods.clone())
		.set_schemes(config.schemes.clone())
		.set_host(config.host.clone())
		.set_path(config.path.clone())
		.set_fragment(config.fragment.clone())
		.set_controller(config.controller.clone())
		.set_format(config.format.clone())
		.set_locale(config.locale.clone())
		.set_defaults(config.defaults.clone())
		.set_requirements(config.requirements.clone())
		.set_options(config.options.clone())
		.set_condition(config.condition.clone())
		.set_configurations(config.configurations.clone());
	builder
}

fn field_builder(key: &str, config: &FieldConfig) -> FieldMetadataBuilder {
	let mut builder = FieldMetadataBuilder::new(key);
	builder
		.set_name(config.name.clone())
		.set_type(config.field_type.clone())
		.set_label(config.label.clone())
		.set_description(config.description.clone())
		.set_translation_domain(config.translation_domain.clone())
		.set_public(config.public)
		.set_sortable(config.sortable)
		.set_filterable(config.filterable)
		.set_searchable(config.searchable)
		.set_translatable(config.translatable)
		.set_read_only(config.read_only)
		.set_required(config.required)
		.set_input(config.input.clone())
		.set_input_config(config.input_config.clone())
		.set_form_type(config.form_type.clone())
		.set_form_options(config.form_options.clone())
		.set_groups(config.groups.clone());
	builder
}

fn association_builder(key: &str, config: &AssociationConfig) -> AssociationMetadataBuilder {
	let mut builder = AssociationMetadataBuilder::new(key);
	builder
		.set_name(config.name.clone())
		.set_type(config.association_type.clone())
		.set_target(config.target.clone())
		.set_label(config.label.clone())
		.set_description(config.description.clone())
		.set_translation_domain(config.translation_domain.clone())
		.set_public(config.public)
		.set_sortable(config.sortable)
		.set_filterable(config.filterable)
		.set_searchable(config.searchable)
		.set_translatable(config.translatable)
		.set_read_only(config.read_only)
		.set_required(config.required)
		.set_input(config.input.clone())
		.set_input_config(config.input_config.clone())
		.set_form_type(config.form_type.clone())
		.set_form_options(config.form_options.clone())
		.set_groups(config.groups.clone());
	builder
}
