//! Metadata configuration for objmeta.
//!
//! This crate turns configuration documents into typed, fully defaulted
//! [`MetadataConfig`] trees ready for compilation into metadata descriptors.
//! Documents are written in TOML or JSON:
//!
//! ```toml
//! [defaults.global]
//! translation_domain = "admin"
//! sortable = false
//!
//! [defaults.actions.list]
//! methods = "GET"
//!
//! [objects."App\\Order"]
//! label = "Order"
//! build_default_actions = true
//!
//! [objects."App\\Order".fields.status]
//! type = "string"
//! sortable = true
//!
//! [objects."App\\Order".associations.customer]
//! type = "many-to-one"
//! target = "App\\Customer"
//! ```
//!
//! # Pipeline
//!
//! 1. [`load_path`] / [`load_str`] parse the document into a neutral value tree.
//! 2. [`validate::validate_raw`] checks the structural constraints.
//! 3. [`normalize()`] strips unset values and widens action shorthand.
//! 4. The tree is deserialized into [`MetadataConfig`], deriving child names
//!    from their keys.
//! 5. [`cascade()`] fills unset attributes from the `defaults` section.

pub mod cascade;
pub mod error;
pub mod load;
pub mod normalize;
pub mod schema;
pub mod validate;
pub mod value;

pub use cascade::{CascadeOptions, Precedence, cascade, cascade_object};
pub use error::{ConfigError, Result};
pub use load::{ConfigFormat, from_value, load_path, load_str};
pub use normalize::normalize;
pub use schema::{
	ActionConfig, ActionConfigs, AssociationConfig, AssociationConfigs, DefaultsConfig, FieldConfig, FieldConfigs, GlobalDefaults, MetadataConfig,
	ObjectConfig,
};
pub use value::{Scalar, ScalarMap, StringSet};
