//! Externally maintained tag collections.
//!
//! # Role
//!
//! A tag names a group of identifiers of one [`BasicType`] (e.g. the
//! `minecraft:logs` block tag). Membership changes whenever content packs are
//! reloaded, so consumers such as [`crate::ObjectSet`] query the catalog at call
//! time instead of copying members out of it.
//!
//! # Concurrency
//!
//! Mutations build a new catalog state and publish it through `ArcSwap::rcu`.
//! A membership query works on one state from start to finish.

use std::sync::Arc;

use arc_swap::ArcSwap;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::Identifier;

/// The namespaces tags can be declared over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasicType {
	Blocks,
	Items,
	Fluids,
	EntityTypes,
	GameEvents,
	SoundEvents,
	PotionEffects,
	Enchantments,
	DamageTypes,
	Biomes,
}

impl BasicType {
	pub const ALL: [BasicType; 10] = [
		Self::Blocks,
		Self::Items,
		Self::Fluids,
		Self::EntityTypes,
		Self::GameEvents,
		Self::SoundEvents,
		Self::PotionEffects,
		Self::Enchantments,
		Self::DamageTypes,
		Self::Biomes,
	];

	/// Identifier of the registry the tagged elements live in.
	pub const fn registry_name(self) -> &'static str {
		match self {
			Self::Blocks => "minecraft:block",
			Self::Items => "minecraft:item",
			Self::Fluids => "minecraft:fluid",
			Self::EntityTypes => "minecraft:entity_type",
			Self::GameEvents => "minecraft:game_event",
			Self::SoundEvents => "minecraft:sound_event",
			Self::PotionEffects => "minecraft:mob_effect",
			Self::Enchantments => "minecraft:enchantment",
			Self::DamageTypes => "minecraft:damage_type",
			Self::Biomes => "minecraft:worldgen/biome",
		}
	}

	/// Directory under `data/<namespace>/tags/` holding this type's tag files.
	pub const fn directory(self) -> &'static str {
		match self {
			Self::Blocks => "block",
			Self::Items => "item",
			Self::Fluids => "fluid",
			Self::EntityTypes => "entity_type",
			Self::GameEvents => "game_event",
			Self::SoundEvents => "sound_event",
			Self::PotionEffects => "mob_effect",
			Self::Enchantments => "enchantment",
			Self::DamageTypes => "damage_type",
			Self::Biomes => "worldgen/biome",
		}
	}

	pub fn from_directory(dir: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|t| t.directory() == dir)
	}
}

/// One line of a tag definition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagEntry {
	Element(Identifier),
	/// Includes every member of another tag of the same basic type.
	Tag(Identifier),
}

impl TagEntry {
	/// Parses `ns:path` or `#ns:path`.
	pub fn parse(s: &str) -> Result<Self, crate::IdentifierError> {
		match s.strip_prefix('#') {
			Some(tag) => Identifier::parse(tag).map(Self::Tag),
			None => Identifier::parse(s).map(Self::Element),
		}
	}
}

type TagKey = (BasicType, Identifier);

#[derive(Clone, Default)]
struct CatalogState {
	tags: FxHashMap<TagKey, Arc<[TagEntry]>>,
}

impl CatalogState {
	fn contains(&self, key: &TagKey, id: &Identifier, seen: &mut FxHashSet<Identifier>) -> bool {
		if !seen.insert(key.1.clone()) {
			return false;
		}
		let Some(entries) = self.tags.get(key) else {
			return false;
		};
		entries.iter().any(|entry| match entry {
			TagEntry::Element(e) => e == id,
			TagEntry::Tag(nested) => self.contains(&(key.0, nested.clone()), id, seen),
		})
	}

	fn collect(&self, key: &TagKey, out: &mut Vec<Identifier>, seen: &mut FxHashSet<Identifier>) {
		if !seen.insert(key.1.clone()) {
			return;
		}
		let Some(entries) = self.tags.get(key) else {
			return;
		};
		for entry in entries.iter() {
			match entry {
				TagEntry::Element(e) if !out.contains(e) => out.push(e.clone()),
				TagEntry::Element(_) => {}
				TagEntry::Tag(nested) => self.collect(&(key.0, nested.clone()), out, seen),
			}
		}
	}
}

/// Live tag membership, shared by every decode pass.
#[derive(Default)]
pub struct TagCatalog {
	state: ArcSwap<CatalogState>,
}

impl TagCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// Defines or replaces a tag.
	pub fn insert(&self, basic: BasicType, tag: Identifier, entries: impl IntoIterator<Item = TagEntry>) {
		let entries: Arc<[TagEntry]> = entries.into_iter().collect();
		self.state.rcu(|old| {
			let mut next = CatalogState::clone(old);
			next.tags.insert((basic, tag.clone()), entries.clone());
			next
		});
	}

	/// Appends one entry, creating the tag if needed.
	pub fn add_entry(&self, basic: BasicType, tag: Identifier, entry: TagEntry) {
		self.state.rcu(|old| {
			let mut next = CatalogState::clone(old);
			let key = (basic, tag.clone());
			let mut entries: Vec<TagEntry> = next.tags.get(&key).map(|e| e.to_vec()).unwrap_or_default();
			if !entries.contains(&entry) {
				entries.push(entry.clone());
			}
			next.tags.insert(key, entries.into());
			next
		});
	}

	/// Removes a tag, returning whether it existed.
	pub fn remove(&self, basic: BasicType, tag: &Identifier) -> bool {
		let key = (basic, tag.clone());
		let previous = self.state.rcu(|old| {
			let mut next = CatalogState::clone(old);
			next.tags.remove(&key);
			next
		});
		previous.tags.contains_key(&key)
	}

	/// Replaces the whole catalog in one step, as a reload does.
	pub fn replace_all(&self, tags: impl IntoIterator<Item = (BasicType, Identifier, Vec<TagEntry>)>) {
		let tags = tags.into_iter().map(|(basic, id, entries)| ((basic, id), Arc::from(entries))).collect();
		self.state.store(Arc::new(CatalogState { tags }));
	}

	/// Direct entries of a tag, unflattened.
	pub fn get(&self, basic: BasicType, tag: &Identifier) -> Option<Arc<[TagEntry]>> {
		self.state.load().tags.get(&(basic, tag.clone())).cloned()
	}

	/// Tests membership, following nested tag references.
	///
	/// Unknown tags contain nothing. Reference cycles are cut off.
	pub fn contains(&self, basic: BasicType, tag: &Identifier, id: &Identifier) -> bool {
		let state = self.state.load();
		state.contains(&(basic, tag.clone()), id, &mut FxHashSet::default())
	}

	/// Flattened members in declaration order, or `None` for an unknown tag.
	pub fn resolve(&self, basic: BasicType, tag: &Identifier) -> Option<Vec<Identifier>> {
		let state = self.state.load();
		let key = (basic, tag.clone());
		if !state.tags.contains_key(&key) {
			return None;
		}
		let mut out = Vec::new();
		state.collect(&key, &mut out, &mut FxHashSet::default());
		Some(out)
	}

	/// Every tag declared for `basic`, sorted.
	pub fn tags(&self, basic: BasicType) -> Vec<Identifier> {
		let state = self.state.load();
		let mut tags: Vec<_> = state.tags.keys().filter(|(b, _)| *b == basic).map(|(_, id)| id.clone()).collect();
		tags.sort_unstable();
		tags
	}

	pub fn len(&self) -> usize {
		self.state.load().tags.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

impl std::fmt::Debug for TagCatalog {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TagCatalog").field("tags", &self.len()).finish()
	}
}
