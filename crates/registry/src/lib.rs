//! Object metadata compilation and the metadata registry.
//!
//! Configuration loaded by [`objmeta_config`] is compiled into
//! [`ObjectMetadataBuilder`]s, which are registered with a
//! [`RegistryAssembler`] next to any custom contributors:
//!
//! - **object builders** produce [`ObjectMetadata`] eagerly at assembly time,
//! - **object loaders** supply metadata lazily for classes no builder covers,
//! - **guessers** infer fields and associations an object does not declare.
//!
//! Each contributor declares an integer priority; higher priorities are
//! consulted first and equal priorities keep registration order. An optional
//! [`AliasSource`] maps interface classes to the concrete classes whose
//! metadata they should resolve to.
//!
//! ```no_run
//! use objmeta_registry::{MetadataRegistry, RegistryAssembler};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = objmeta_config::load_path("config/metadata.toml")?;
//!
//! let mut assembler = RegistryAssembler::new();
//! assembler.register_config(&config, 0);
//! let registry: MetadataRegistry = assembler.assemble()?;
//!
//! if let Some(order) = registry.resolve("App\\Entity\\Order") {
//! 	println!("{} has {} fields", order.name, order.fields.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod compile;
pub mod contributor;
pub mod error;
pub mod metadata;
pub mod registry;

pub use builder::{ActionMetadataBuilder, AssociationMetadataBuilder, FieldMetadataBuilder, ObjectMetadataBuilder};
pub use compile::compile;
pub use contributor::{AliasSource, Guesser, ObjectBuilder, ObjectLoader, Prioritized};
pub use error::{BuildError, MetadataKind, RegistryError, Result};
pub use metadata::{ActionMetadata, AssociationMetadata, FieldFlags, FieldMetadata, ObjectMetadata, Resource};
pub use registry::{MetadataRegistry, RegistryAssembler};
