use std::sync::Arc;

use cobble_registry::{ActiveRegistries, DynamicRegistry, RegistrySet, TagCatalog};

use crate::{CodecError, ErrorKind, Result};

/// Read-only view of the registries and tags one encode or decode pass resolves against.
///
/// Cloning is two reference-count bumps. A context never changes under a pass:
/// a reload publishes a new [`RegistrySet`] and only contexts created after the
/// swap observe it.
#[derive(Clone, Default)]
pub struct Context {
	registries: Arc<RegistrySet>,
	tags: Arc<TagCatalog>,
}

impl Context {
	pub fn new(registries: Arc<RegistrySet>, tags: Arc<TagCatalog>) -> Self {
		Self { registries, tags }
	}

	/// Snapshots the currently published registries.
	pub fn current(active: &ActiveRegistries, tags: Arc<TagCatalog>) -> Self {
		Self::new(active.load(), tags)
	}

	pub fn registries(&self) -> &RegistrySet {
		&self.registries
	}

	/// The live tag catalog. Unlike the registries it is shared, not snapshotted.
	pub fn tags(&self) -> &TagCatalog {
		&self.tags
	}

	/// Returns the registry holding `T` values.
	pub fn registry<T: Send + Sync + 'static>(&self) -> Result<&DynamicRegistry<T>> {
		self.registries.get::<T>().ok_or_else(|| {
			CodecError::new(ErrorKind::MissingRegistry {
				family: std::any::type_name::<T>(),
			})
		})
	}
}

impl std::fmt::Debug for Context {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Context")
			.field("registries", &self.registries)
			.field("tags", &self.tags)
			.finish()
	}
}
