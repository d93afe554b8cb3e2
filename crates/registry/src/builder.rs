//! Mutable staging area for one registry generation.
//!
//! # Role
//!
//! Bootstrap code and the content-pack loader register into a
//! [`RegistryBuilder`]; [`RegistryBuilder::freeze`] turns it into the immutable
//! [`DynamicRegistry`] readers see. Nothing a builder does is visible to
//! readers until the frozen registry is published.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::registry::{Entry, u32_index};
use crate::{DataPack, DynamicRegistry, Identifier, RawId, RegistryError, RegistryKey};

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// What to do when an identifier is registered twice in one generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
	/// Every duplicate is an error.
	Reject,
	/// A different pack may replace an entry; the same pack registering twice is an error.
	#[default]
	OverrideOtherPacks,
}

pub struct RegistryBuilder<T> {
	family: &'static str,
	policy: DuplicatePolicy,
	entries: Vec<Entry<T>>,
	by_id: FxHashMap<Identifier, RawId>,
}

impl<T> RegistryBuilder<T> {
	/// Creates an empty builder for `family` (e.g. `minecraft:damage_type`).
	pub fn new(family: &'static str) -> Self {
		Self::with_policy(family, DuplicatePolicy::default())
	}

	pub fn with_policy(family: &'static str, policy: DuplicatePolicy) -> Self {
		Self {
			family,
			policy,
			entries: Vec::new(),
			by_id: FxHashMap::default(),
		}
	}

	pub fn family(&self) -> &'static str {
		self.family
	}

	pub fn policy(&self) -> DuplicatePolicy {
		self.policy
	}

	/// Changes the duplicate policy for subsequent registrations.
	pub fn set_policy(&mut self, policy: DuplicatePolicy) {
		self.policy = policy;
	}

	/// Registers `value` under `id`, returning its key.
	///
	/// A replaced entry keeps its raw id.
	pub fn register(&mut self, id: Identifier, value: T, pack: DataPack) -> Result<RegistryKey<T>, RegistryError> {
		self.register_arc(id, Arc::new(value), pack)
	}

	/// Like [`Self::register`] for a value that is already shared.
	pub fn register_arc(&mut self, id: Identifier, value: Arc<T>, pack: DataPack) -> Result<RegistryKey<T>, RegistryError> {
		let key = RegistryKey::new(id.clone());
		if let Some(&raw) = self.by_id.get(&id) {
			let existing = &mut self.entries[raw.index()];
			let allowed = match self.policy {
				DuplicatePolicy::Reject => false,
				DuplicatePolicy::OverrideOtherPacks => existing.pack != pack,
			};
			if !allowed {
				return Err(RegistryError::Duplicate {
					family: self.family,
					id,
					existing: existing.pack.clone(),
					incoming: pack,
				});
			}
			tracing::debug!(family = self.family, %id, from = %existing.pack, to = %pack, "registry entry overridden");
			existing.value = value;
			existing.pack = pack;
			return Ok(key);
		}

		let raw = RawId(u32_index(self.entries.len(), self.family));
		self.by_id.insert(id, raw);
		self.entries.push(Entry {
			key: key.clone(),
			value,
			pack,
		});
		Ok(key)
	}

	/// Returns true if `id` is already staged.
	pub fn contains(&self, id: &Identifier) -> bool {
		self.by_id.contains_key(id)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Freezes the staged entries into a new registry generation.
	pub fn freeze(self) -> DynamicRegistry<T> {
		let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
		tracing::debug!(family = self.family, generation, entries = self.entries.len(), "registry frozen");
		DynamicRegistry::from_parts(self.family, generation, self.entries, self.by_id)
	}
}

impl<T> DynamicRegistry<T> {
	/// Starts a new generation seeded with this one's entries.
	pub fn to_builder(&self) -> RegistryBuilder<T> {
		let mut builder = RegistryBuilder::new(self.family());
		for entry in self.entries() {
			builder.by_id.insert(entry.key.id().clone(), RawId(u32_index(builder.entries.len(), self.family())));
			builder.entries.push(entry.clone());
		}
		builder
	}
}
