use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Value, json};

use super::normalize;

#[test]
fn test_removes_nulls_and_empty_containers() {
	let tree = json!({
		"defaults": {
			"global": { "translation_domain": null, "public": true, "available_contexts": [] }
		},
		"objects": {
			"App\\Order": { "label": null, "groups": [], "form_options": {} }
		}
	});

	assert_eq!(
		normalize(tree),
		json!({
			"defaults": { "global": { "public": true } },
			"objects": { "App\\Order": {} }
		})
	);
}

#[test]
fn test_container_emptied_by_pruning_is_removed() {
	let tree = json!({
		"defaults": { "global": { "sortable": null } },
		"objects": { "App\\Order": { "groups": [null, null] } }
	});

	assert_eq!(normalize(tree), json!({ "objects": { "App\\Order": {} } }));
}

#[test]
fn test_identity_map_entries_survive_when_unset() {
	let tree = json!({
		"objects": {
			"App\\Order": null,
			"App\\Invoice": { "fields": { "number": null, "total": {} } }
		}
	});

	assert_eq!(
		normalize(tree),
		json!({
			"objects": {
				"App\\Order": {},
				"App\\Invoice": { "fields": { "number": {}, "total": {} } }
			}
		})
	);
}

#[test]
fn test_action_scalar_shorthand_is_widened() {
	let tree = json!({
		"defaults": { "actions": { "list": { "methods": "GET" } } },
		"objects": {
			"App\\Order": {
				"default_action": { "schemes": "https" },
				"actions": {
					"view": { "methods": ["GET", "HEAD"], "defaults": "html", "requirements": 5 }
				}
			}
		}
	});

	assert_eq!(
		normalize(tree),
		json!({
			"defaults": { "actions": { "list": { "methods": ["GET"] } } },
			"objects": {
				"App\\Order": {
					"default_action": { "schemes": ["https"] },
					"actions": {
						"view": {
							"methods": ["GET", "HEAD"],
							"defaults": { "0": "html" },
							"requirements": { "0": 5 }
						}
					}
				}
			}
		})
	);
}

#[test]
fn test_action_lists_widen_to_index_keyed_maps() {
	let tree = json!({
		"objects": {
			"App\\Order": {
				"actions": {
					"view": { "requirements": ["\\d+", null, "[a-z]+"], "options": [], "methods": ["GET"] }
				}
			}
		}
	});

	assert_eq!(
		normalize(tree),
		json!({
			"objects": {
				"App\\Order": {
					"actions": {
						"view": { "requirements": { "0": "\\d+", "2": "[a-z]+" }, "methods": ["GET"] }
					}
				}
			}
		})
	);
}

#[test]
fn test_shorthand_is_only_widened_inside_actions() {
	let tree = json!({
		"objects": { "App\\Order": { "fields": { "methods": { "label": "Methods" } }, "label": "x" } }
	});

	assert_eq!(normalize(tree.clone()), tree);
}

#[test]
fn test_non_object_roots_pass_through() {
	assert_eq!(normalize(Value::Null), Value::Null);
	assert_eq!(normalize(json!("scalar")), json!("scalar"));
	assert_eq!(normalize(json!([null, 1, []])), json!([1]));
}

fn arb_key() -> impl Strategy<Value = String> {
	prop_oneof![
		Just("objects"),
		Just("defaults"),
		Just("global"),
		Just("actions"),
		Just("fields"),
		Just("associations"),
		Just("default_action"),
		Just("methods"),
		Just("schemes"),
		Just("options"),
		Just("groups"),
		Just("label"),
		Just("App\\Order"),
	]
	.prop_map(String::from)
}

fn arb_tree() -> impl Strategy<Value = Value> {
	let leaf = prop_oneof![
		Just(Value::Null),
		any::<bool>().prop_map(Value::Bool),
		any::<i64>().prop_map(Value::from),
		"[a-z]{0,4}".prop_map(Value::String),
	];
	leaf.prop_recursive(5, 64, 5, |inner| {
		prop_oneof![
			prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
			prop::collection::vec((arb_key(), inner), 0..5).prop_map(|entries| Value::Object(entries.into_iter().collect())),
		]
	})
}

proptest! {
	/// Normalizing twice gives the same tree as normalizing once.
	#[test]
	fn prop_normalize_is_idempotent(tree in arb_tree()) {
		let once = normalize(tree);
		let twice = normalize(once.clone());
		prop_assert_eq!(twice, once);
	}

	/// A normalized tree never contains nulls below the root.
	#[test]
	fn prop_normalized_tree_has_no_nulls(tree in arb_tree()) {
		fn has_null(value: &Value) -> bool {
			match value {
				Value::Null => true,
				Value::Array(items) => items.iter().any(has_null),
				Value::Object(map) => map.values().any(has_null),
				_ => false,
			}
		}

		let normalized = normalize(tree);
		if !normalized.is_null() {
			prop_assert!(!has_null(&normalized));
		}
	}
}
