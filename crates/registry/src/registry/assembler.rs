use std::fmt;
use std::sync::Arc;

use objmeta_config::{CascadeOptions, MetadataConfig};

use super::MetadataRegistry;
use crate::compile::compile;
use crate::contributor::{AliasSource, Guesser, ObjectBuilder, ObjectLoader, Prioritized};
use crate::error::Result;

/// Collects contributors in registration order and assembles registries from them.
///
/// Cloning is cheap: contributors are shared behind `Arc`, so one assembler can
/// produce any number of identical registries.
#[derive(Clone, Default)]
pub struct RegistryAssembler {
	object_builders: Vec<Prioritized<dyn ObjectBuilder>>,
	object_loaders: Vec<Prioritized<dyn ObjectLoader>>,
	guessers: Vec<Prioritized<dyn Guesser>>,
	alias_source: Option<Arc<dyn AliasSource>>,
	cascade: CascadeOptions,
}

impl RegistryAssembler {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_object_builder(&mut self, builder: impl ObjectBuilder + 'static, priority: i32) -> &mut Self {
		let builder: Arc<dyn ObjectBuilder> = Arc::new(builder);
		self.object_builders.push(Prioritized::new(builder, priority));
		self
	}

	pub fn register_loader(&mut self, loader: impl ObjectLoader + 'static, priority: i32) -> &mut Self {
		let loader: Arc<dyn ObjectLoader> = Arc::new(loader);
		self.object_loaders.push(Prioritized::new(loader, priority));
		self
	}

	pub fn register_guesser(&mut self, guesser: impl Guesser + 'static, priority: i32) -> &mut Self {
		let guesser: Arc<dyn Guesser> = Arc::new(guesser);
		self.guessers.push(Prioritized::new(guesser, priority));
		self
	}

	/// Sets the resolve-target alias source, replacing any previous one.
	pub fn set_alias_source(&mut self, source: impl AliasSource + 'static) -> &mut Self {
		self.alias_source = Some(Arc::new(source));
		self
	}

	/// Cascade options used by later [`Self::register_config`] calls.
	pub fn set_cascade_options(&mut self, options: CascadeOptions) -> &mut Self {
		self.cascade = options;
		self
	}

	/// Compiles `config` and registers one object builder per configured object.
	pub fn register_config(&mut self, config: &MetadataConfig, priority: i32) -> &mut Self {
		let builders = compile(config, self.cascade);
		tracing::debug!(objects = builders.len(), priority, "registered metadata config");
		for builder in builders {
			self.register_object_builder(builder, priority);
		}
		self
	}

	/// Assembles `registry` from the registered contributors.
	pub fn assemble_into(&self, registry: &MetadataRegistry) -> Result<()> {
		registry.assemble(
			self.object_builders.clone(),
			self.object_loaders.clone(),
			self.guessers.clone(),
			self.alias_source.as_deref(),
		)
	}

	/// Assembles a fresh registry.
	pub fn assemble(&self) -> Result<MetadataRegistry> {
		let registry = MetadataRegistry::new();
		self.assemble_into(&registry)?;
		Ok(registry)
	}
}

impl fmt::Debug for RegistryAssembler {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegistryAssembler")
			.field("object_builders", &self.object_builders)
			.field("object_loaders", &self.object_loaders)
			.field("guessers", &self.guessers)
			.field("alias_source", &self.alias_source.is_some())
			.field("cascade", &self.cascade)
			.finish()
	}
}
