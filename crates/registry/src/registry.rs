//! Frozen identifier registries.
//!
//! # Invariants
//!
//! - Identifiers are unique within an instance; [`RawId`]s are dense and in
//!   registration order.
//! - An instance never changes after [`crate::RegistryBuilder::freeze`]. A reload
//!   builds and publishes a new instance instead.
//! - [`RegistryKey`]s resolve by identifier, so a key from an older generation
//!   resolves against a newer one when the identifier is still registered and
//!   fails with [`RegistryError::NotFound`] otherwise.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::{DataPack, Identifier, RawId, RegistryError, RegistryKey};

/// Converts a `usize` index to `u32` for registry storage.
///
/// # Panics
///
/// Panics if `idx` exceeds `u32::MAX`.
pub(crate) fn u32_index(idx: usize, what: &'static str) -> u32 {
	u32::try_from(idx).unwrap_or_else(|_| panic!("{what} index overflow: {idx}"))
}

pub(crate) struct Entry<T> {
	pub(crate) key: RegistryKey<T>,
	pub(crate) value: Arc<T>,
	pub(crate) pack: DataPack,
}

impl<T> Clone for Entry<T> {
	fn clone(&self) -> Self {
		Self {
			key: self.key.clone(),
			value: self.value.clone(),
			pack: self.pack.clone(),
		}
	}
}

/// An immutable generation of one registry family.
pub struct DynamicRegistry<T> {
	family: &'static str,
	generation: u64,
	entries: Vec<Entry<T>>,
	by_id: FxHashMap<Identifier, RawId>,
}

impl<T> DynamicRegistry<T> {
	pub(crate) fn from_parts(family: &'static str, generation: u64, entries: Vec<Entry<T>>, by_id: FxHashMap<Identifier, RawId>) -> Self {
		Self {
			family,
			generation,
			entries,
			by_id,
		}
	}

	pub(crate) fn entries(&self) -> &[Entry<T>] {
		&self.entries
	}

	/// Family name, e.g. `minecraft:enchantment_entity_effect_type`.
	pub fn family(&self) -> &'static str {
		self.family
	}

	/// Monotonic build counter; distinct for every frozen instance in the process.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Resolves a key against this instance.
	pub fn get(&self, key: &RegistryKey<T>) -> Result<&Arc<T>, RegistryError> {
		self.get_id(key.id()).ok_or_else(|| RegistryError::NotFound {
			family: self.family,
			id: key.id().clone(),
		})
	}

	/// Looks up a value by identifier.
	pub fn get_id(&self, id: &Identifier) -> Option<&Arc<T>> {
		let raw = self.by_id.get(id)?;
		Some(&self.entries[raw.index()].value)
	}

	/// Returns the key for `id` if it is registered here.
	pub fn key(&self, id: &Identifier) -> Option<RegistryKey<T>> {
		self.by_id.get(id).map(|raw| self.entries[raw.index()].key.clone())
	}

	pub fn contains(&self, id: &Identifier) -> bool {
		self.by_id.contains_key(id)
	}

	pub fn raw_id(&self, key: &RegistryKey<T>) -> Option<RawId> {
		self.by_id.get(key.id()).copied()
	}

	pub fn by_raw_id(&self, raw: RawId) -> Option<&Arc<T>> {
		self.entries.get(raw.index()).map(|e| &e.value)
	}

	/// Reverse mapping from a raw id to the entry's key.
	pub fn key_of(&self, raw: RawId) -> Option<&RegistryKey<T>> {
		self.entries.get(raw.index()).map(|e| &e.key)
	}

	/// Returns the pack that contributed `key`.
	pub fn pack_of(&self, key: &RegistryKey<T>) -> Option<&DataPack> {
		self.by_id.get(key.id()).map(|raw| &self.entries[raw.index()].pack)
	}

	/// Finds the first entry whose value satisfies `pred`.
	pub fn find_key(&self, mut pred: impl FnMut(&T) -> bool) -> Option<&RegistryKey<T>> {
		self.entries.iter().find(|e| pred(&e.value)).map(|e| &e.key)
	}

	/// Keys in raw id order.
	pub fn keys(&self) -> impl Iterator<Item = &RegistryKey<T>> + '_ {
		self.entries.iter().map(|e| &e.key)
	}

	/// `(key, value)` pairs in raw id order.
	pub fn iter(&self) -> impl Iterator<Item = (&RegistryKey<T>, &Arc<T>)> + '_ {
		self.entries.iter().map(|e| (&e.key, &e.value))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<T> std::fmt::Debug for DynamicRegistry<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("DynamicRegistry")
			.field("family", &self.family)
			.field("generation", &self.generation)
			.field("len", &self.entries.len())
			.finish()
	}
}
