//! The complete set of registries for one reload and its atomic publication.
//!
//! # Concurrency
//!
//! - **Reads:** wait-free. [`ActiveRegistries::load`] returns an `Arc` snapshot
//!   that stays consistent for as long as the caller holds it.
//! - **Writes:** a reload builds a whole [`RegistrySet`] off to the side and
//!   publishes it with a single pointer swap; readers never observe a partially
//!   populated set.

use std::any::{Any, TypeId};
use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::FxHashMap;

use crate::DynamicRegistry;

struct Slot {
	family: &'static str,
	registry: Arc<dyn Any + Send + Sync>,
}

/// Frozen registries keyed by value type, one per family.
#[derive(Default)]
pub struct RegistrySet {
	slots: FxHashMap<TypeId, Slot>,
}

impl RegistrySet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a registry, replacing any registry of the same value type.
	pub fn insert<T: Send + Sync + 'static>(&mut self, registry: DynamicRegistry<T>) {
		self.insert_arc(Arc::new(registry));
	}

	pub fn insert_arc<T: Send + Sync + 'static>(&mut self, registry: Arc<DynamicRegistry<T>>) {
		let family = registry.family();
		self.slots.insert(TypeId::of::<T>(), Slot { family, registry });
	}

	/// Builder-style [`Self::insert`].
	pub fn with<T: Send + Sync + 'static>(mut self, registry: DynamicRegistry<T>) -> Self {
		self.insert(registry);
		self
	}

	pub fn get<T: Send + Sync + 'static>(&self) -> Option<&DynamicRegistry<T>> {
		self.slots.get(&TypeId::of::<T>())?.registry.downcast_ref()
	}

	/// Returns a shared handle that outlives this set.
	pub fn get_arc<T: Send + Sync + 'static>(&self) -> Option<Arc<DynamicRegistry<T>>> {
		let slot = self.slots.get(&TypeId::of::<T>())?;
		slot.registry.clone().downcast().ok()
	}

	/// Family names of every registry in the set, sorted.
	pub fn families(&self) -> Vec<&'static str> {
		let mut families: Vec<_> = self.slots.values().map(|s| s.family).collect();
		families.sort_unstable();
		families
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

impl std::fmt::Debug for RegistrySet {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RegistrySet").field("families", &self.families()).finish()
	}
}

/// The process-wide current [`RegistrySet`].
pub struct ActiveRegistries {
	current: ArcSwap<RegistrySet>,
}

impl ActiveRegistries {
	pub fn new(initial: RegistrySet) -> Self {
		Self {
			current: ArcSwap::from_pointee(initial),
		}
	}

	/// Returns the current snapshot.
	pub fn load(&self) -> Arc<RegistrySet> {
		self.current.load_full()
	}

	/// Publishes `next` and returns the set it replaced.
	pub fn swap(&self, next: RegistrySet) -> Arc<RegistrySet> {
		let families = next.len();
		let previous = self.current.swap(Arc::new(next));
		tracing::info!(families, "registry set published");
		previous
	}
}

impl Default for ActiveRegistries {
	fn default() -> Self {
		Self::new(RegistrySet::new())
	}
}
