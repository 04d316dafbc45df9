//! Default cascading.
//!
//! Fills the unset attributes of every object, action, field and association
//! from the `defaults` section. Three levels take part:
//!
//! - the explicit value on the object or child itself,
//! - the kind template, `defaults.{actions,fields,associations}.<key>`,
//! - the global defaults, `defaults.global`.
//!
//! # Invariants
//!
//! - Explicit values always win. Cascading only ever fills `None` slots.
//! - Containers are taken wholesale from the first level that sets them.
//! - `cascade` is pure, and cascading its own output again changes nothing.

use crate::schema::{ActionConfig, ActionConfigs, DefaultsConfig, MetadataConfig, ObjectConfig};

/// Relative order of kind templates and global defaults.
///
/// Explicit values beat both regardless of this setting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precedence {
	/// object > kind template > global.
	#[default]
	KindOverGlobal,
	/// object > global > kind template.
	GlobalOverKind,
}

/// Knobs for [`cascade`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CascadeOptions {
	pub precedence: Precedence,
}

/// Returns the effective configuration with defaults cascaded into every object.
pub fn cascade(config: &MetadataConfig, options: CascadeOptions) -> MetadataConfig {
	let mut defaults = config.defaults.clone();
	defaults.normalize();
	defaults.derive_names();

	let objects = config
		.objects
		.iter()
		.map(|(class, object)| (class.clone(), cascade_object(&defaults, object, options)))
		.collect();

	MetadataConfig {
		defaults,
		objects,
		source: config.source.clone(),
	}
}

/// Cascades `defaults` into a single object.
///
/// `defaults` is expected to be normalized, as it is after loading; an empty
/// container left in a template would otherwise shadow the global level.
pub fn cascade_object(defaults: &DefaultsConfig, object: &ObjectConfig, options: CascadeOptions) -> ObjectConfig {
	let mut out = object.clone();
	out.normalize();
	out.derive_names();

	let global = &defaults.global;
	out.fill_from(&global.as_object());

	if out.build_default_actions == Some(true) {
		add_default_actions(&mut out, defaults);
	}

	for (key, action) in out.actions.iter_mut().flatten() {
		if let Some(template) = defaults.action(key) {
			action.fill_from(template);
		}
	}

	let field_global = global.as_field();
	for (key, field) in out.fields.iter_mut().flatten() {
		fill_layers(field, defaults.field(key), &field_global, options.precedence, |dst, src| dst.fill_from(src));
	}

	let association_global = global.as_association();
	for (key, association) in out.associations.iter_mut().flatten() {
		fill_layers(association, defaults.association(key), &association_global, options.precedence, |dst, src| {
			dst.fill_from(src)
		});
	}

	out
}

/// Declares every default action template the object does not declare itself.
fn add_default_actions(object: &mut ObjectConfig, defaults: &DefaultsConfig) {
	let Some(templates) = defaults.actions.as_ref().filter(|t| !t.is_empty()) else {
		return;
	};

	let actions = object.actions.get_or_insert_with(ActionConfigs::new);
	for key in templates.keys() {
		if !actions.contains_key(key) {
			actions.insert(
				key.clone(),
				ActionConfig {
					name: Some(key.clone()),
					..ActionConfig::default()
				},
			);
		}
	}
}

fn fill_layers<T>(node: &mut T, kind: Option<&T>, global: &T, precedence: Precedence, fill: impl Fn(&mut T, &T)) {
	let layers = match precedence {
		Precedence::KindOverGlobal => [kind, Some(global)],
		Precedence::GlobalOverKind => [Some(global), kind],
	};
	for layer in layers.into_iter().flatten() {
		fill(node, layer);
	}
}

#[cfg(test)]
mod tests {
	use indexmap::IndexMap;
	use pretty_assertions::assert_eq;
	use proptest::option;
	use proptest::prelude::*;

	use super::*;
	use crate::schema::{AssociationConfig, AssociationConfigs, FieldConfig, FieldConfigs, GlobalDefaults};
	use crate::value::StringSet;

	fn set(items: &[&str]) -> StringSet {
		items.iter().map(|s| s.to_string()).collect()
	}

	fn single_object(defaults: DefaultsConfig, object: ObjectConfig) -> MetadataConfig {
		MetadataConfig {
			defaults,
			objects: IndexMap::from([("App\\Order".to_string(), object)]),
			source: None,
		}
	}

	fn with_field(name: &str, field: FieldConfig) -> ObjectConfig {
		ObjectConfig {
			fields: Some(FieldConfigs::from([(name.to_string(), field)])),
			..ObjectConfig::default()
		}
	}

	#[test]
	fn test_explicit_field_value_beats_global_default() {
		let defaults = DefaultsConfig {
			global: GlobalDefaults {
				sortable: Some(false),
				public: Some(true),
				..GlobalDefaults::default()
			},
			..DefaultsConfig::default()
		};
		let object = with_field(
			"status",
			FieldConfig {
				field_type: Some("string".into()),
				sortable: Some(true),
				..FieldConfig::default()
			},
		);

		let out = cascade(&single_object(defaults, object), CascadeOptions::default());
		let status = &out.objects["App\\Order"].fields.as_ref().unwrap()["status"];
		assert_eq!(status.name.as_deref(), Some("status"));
		assert_eq!(status.sortable, Some(true));
		assert_eq!(status.public, Some(true));
		assert_eq!(status.filterable, None);
	}

	#[test]
	fn test_kind_template_applies_by_child_key() {
		let defaults = DefaultsConfig {
			fields: Some(FieldConfigs::from([(
				"created_at".to_string(),
				FieldConfig {
					field_type: Some("datetime".into()),
					read_only: Some(true),
					..FieldConfig::default()
				},
			)])),
			..DefaultsConfig::default()
		};
		let object = ObjectConfig {
			fields: Some(FieldConfigs::from([
				("created_at".to_string(), FieldConfig::default()),
				("status".to_string(), FieldConfig::default()),
			])),
			..ObjectConfig::default()
		};

		let out = cascade(&single_object(defaults, object), CascadeOptions::default());
		let fields = out.objects["App\\Order"].fields.as_ref().unwrap();
		assert_eq!(fields["created_at"].field_type.as_deref(), Some("datetime"));
		assert_eq!(fields["created_at"].read_only, Some(true));
		assert_eq!(fields["status"].field_type, None);
	}

	#[test]
	fn test_precedence_decides_between_kind_and_global() {
		let defaults = DefaultsConfig {
			global: GlobalDefaults {
				searchable: Some(false),
				..GlobalDefaults::default()
			},
			associations: Some(AssociationConfigs::from([(
				"customer".to_string(),
				AssociationConfig {
					searchable: Some(true),
					..AssociationConfig::default()
				},
			)])),
			..DefaultsConfig::default()
		};
		let object = ObjectConfig {
			associations: Some(AssociationConfigs::from([("customer".to_string(), AssociationConfig::default())])),
			..ObjectConfig::default()
		};

		let kind_first = cascade_object(&defaults, &object, CascadeOptions::default());
		assert_eq!(kind_first.associations.as_ref().unwrap()["customer"].searchable, Some(true));

		let global_first = cascade_object(
			&defaults,
			&object,
			CascadeOptions {
				precedence: Precedence::GlobalOverKind,
			},
		);
		assert_eq!(global_first.associations.as_ref().unwrap()["customer"].searchable, Some(false));
	}

	#[test]
	fn test_containers_are_replaced_wholesale() {
		let defaults = DefaultsConfig {
			fields: Some(FieldConfigs::from([(
				"status".to_string(),
				FieldConfig {
					groups: Some(set(&["admin", "api"])),
					..FieldConfig::default()
				},
			)])),
			..DefaultsConfig::default()
		};
		let object = with_field(
			"status",
			FieldConfig {
				groups: Some(set(&["public"])),
				..FieldConfig::default()
			},
		);

		let out = cascade_object(&defaults, &object, CascadeOptions::default());
		assert_eq!(out.fields.unwrap()["status"].groups, Some(set(&["public"])));
	}

	#[test]
	fn test_empty_explicit_container_does_not_block_defaults() {
		let defaults = DefaultsConfig {
			global: GlobalDefaults {
				available_contexts: Some(set(&["admin"])),
				..GlobalDefaults::default()
			},
			..DefaultsConfig::default()
		};
		let object = ObjectConfig {
			available_contexts: Some(StringSet::new()),
			..ObjectConfig::default()
		};

		let out = cascade_object(&defaults, &object, CascadeOptions::default());
		assert_eq!(out.available_contexts, Some(set(&["admin"])));
	}

	#[test]
	fn test_global_defaults_reach_objects_but_not_actions() {
		let defaults = DefaultsConfig {
			global: GlobalDefaults {
				translation_domain: Some("admin".into()),
				multi_sortable: Some(true),
				filterable: Some(true),
				..GlobalDefaults::default()
			},
			..DefaultsConfig::default()
		};
		let object = ObjectConfig {
			actions: Some(ActionConfigs::from([("list".to_string(), ActionConfig::default())])),
			..ObjectConfig::default()
		};

		let out = cascade_object(&defaults, &object, CascadeOptions::default());
		assert_eq!(out.translation_domain.as_deref(), Some("admin"));
		assert_eq!(out.multi_sortable, Some(true));
		assert_eq!(
			out.actions.unwrap()["list"],
			ActionConfig {
				name: Some("list".into()),
				..ActionConfig::default()
			}
		);
	}

	#[test]
	fn test_default_actions_are_materialized_on_request() {
		let defaults = DefaultsConfig {
			actions: Some(ActionConfigs::from([
				(
					"list".to_string(),
					ActionConfig {
						methods: Some(set(&["GET"])),
						..ActionConfig::default()
					},
				),
				(
					"delete".to_string(),
					ActionConfig {
						methods: Some(set(&["DELETE"])),
						..ActionConfig::default()
					},
				),
			])),
			..DefaultsConfig::default()
		};
		let declared = ActionConfigs::from([(
			"list".to_string(),
			ActionConfig {
				path: Some("/orders".into()),
				..ActionConfig::default()
			},
		)]);

		let without = ObjectConfig {
			actions: Some(declared.clone()),
			..ObjectConfig::default()
		};
		let out = cascade(&single_object(defaults.clone(), without), CascadeOptions::default());
		let actions = out.objects["App\\Order"].actions.as_ref().unwrap();
		assert_eq!(actions.keys().collect::<Vec<_>>(), vec!["list"]);

		let with = ObjectConfig {
			build_default_actions: Some(true),
			actions: Some(declared),
			..ObjectConfig::default()
		};
		let out = cascade(&single_object(defaults, with), CascadeOptions::default());
		let actions = out.objects["App\\Order"].actions.as_ref().unwrap();
		assert_eq!(actions.keys().collect::<Vec<_>>(), vec!["list", "delete"]);
		assert_eq!(actions["list"].path.as_deref(), Some("/orders"));
		assert_eq!(actions["list"].methods, Some(set(&["GET"])));
		assert_eq!(actions["delete"].name.as_deref(), Some("delete"));
		assert_eq!(actions["delete"].methods, Some(set(&["DELETE"])));
	}

	#[test]
	fn test_cascading_twice_changes_nothing() {
		let defaults = DefaultsConfig {
			global: GlobalDefaults {
				public: Some(false),
				..GlobalDefaults::default()
			},
			actions: Some(ActionConfigs::from([("list".to_string(), ActionConfig::default())])),
			..DefaultsConfig::default()
		};
		let object = ObjectConfig {
			build_default_actions: Some(true),
			..with_field("status", FieldConfig::default())
		};

		let once = cascade(&single_object(defaults, object), CascadeOptions::default());
		let twice = cascade(&once, CascadeOptions::default());
		assert_eq!(twice, once);
	}

	fn arb_field() -> impl Strategy<Value = FieldConfig> {
		(
			option::of(any::<bool>()),
			option::of(any::<bool>()),
			option::of("[a-z]{1,6}"),
			option::of(prop::collection::vec("[a-z]{1,4}", 1..3)),
		)
			.prop_map(|(public, sortable, label, groups)| FieldConfig {
				public,
				sortable,
				label,
				groups: groups.map(|g| g.into_iter().collect()),
				..FieldConfig::default()
			})
	}

	fn arb_global() -> impl Strategy<Value = GlobalDefaults> {
		(option::of(any::<bool>()), option::of(any::<bool>())).prop_map(|(public, sortable)| GlobalDefaults {
			public,
			sortable,
			..GlobalDefaults::default()
		})
	}

	fn arb_precedence() -> impl Strategy<Value = Precedence> {
		prop_oneof![Just(Precedence::KindOverGlobal), Just(Precedence::GlobalOverKind)]
	}

	proptest! {
		/// Explicit field values survive any combination of defaults.
		#[test]
		fn prop_cascade_only_fills_unset(
			explicit in arb_field(),
			kind in arb_field(),
			global in arb_global(),
			precedence in arb_precedence(),
		) {
			let defaults = DefaultsConfig {
				global: global.clone(),
				fields: Some(FieldConfigs::from([("status".to_string(), kind.clone())])),
				..DefaultsConfig::default()
			};
			let object = with_field("status", explicit.clone());
			let out = cascade_object(&defaults, &object, CascadeOptions { precedence });
			let status = &out.fields.as_ref().unwrap()["status"];

			if explicit.public.is_some() {
				prop_assert_eq!(status.public, explicit.public);
			}
			if explicit.sortable.is_some() {
				prop_assert_eq!(status.sortable, explicit.sortable);
			}
			if explicit.label.is_some() {
				prop_assert_eq!(&status.label, &explicit.label);
			}
			if explicit.groups.is_some() {
				prop_assert_eq!(&status.groups, &explicit.groups);
			}

			let (first, second) = match precedence {
				Precedence::KindOverGlobal => (kind.sortable, global.sortable),
				Precedence::GlobalOverKind => (global.sortable, kind.sortable),
			};
			prop_assert_eq!(status.sortable, explicit.sortable.or(first).or(second));
			prop_assert_eq!(&status.label, &explicit.label.clone().or(kind.label.clone()));
		}
	}
}
