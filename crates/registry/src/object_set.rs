use indexmap::IndexSet;

use crate::{BasicType, Identifier, RegistryKey, TagCatalog};

/// A set of namespaced objects: nothing, an explicit list, or a tag.
///
/// A tag reference is never expanded when the set is built. Every
/// [`ObjectSet::contains`] call asks the catalog, so membership follows tag
/// reloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectSet {
	Empty,
	/// Explicit members; built only through [`ObjectSet::of`].
	Entries(ObjectEntries),
	Tag { basic_type: BasicType, tag: Identifier },
}

impl ObjectSet {
	pub fn empty() -> Self {
		Self::Empty
	}

	/// Builds an explicit set; no entries gives [`ObjectSet::Empty`].
	pub fn of(entries: impl IntoIterator<Item = Identifier>) -> Self {
		let entries: IndexSet<Identifier> = entries.into_iter().collect();
		if entries.is_empty() { Self::Empty } else { Self::Entries(ObjectEntries(entries)) }
	}

	pub fn tag(basic_type: BasicType, tag: Identifier) -> Self {
		Self::Tag { basic_type, tag }
	}

	pub fn is_empty(&self) -> bool {
		matches!(self, Self::Empty)
	}

	/// Tests membership of `id`.
	pub fn contains(&self, catalog: &TagCatalog, id: &Identifier) -> bool {
		match self {
			Self::Empty => false,
			Self::Entries(entries) => entries.contains(id),
			Self::Tag { basic_type, tag } => catalog.contains(*basic_type, tag, id),
		}
	}

	pub fn contains_key<T>(&self, catalog: &TagCatalog, key: &RegistryKey<T>) -> bool {
		self.contains(catalog, key.id())
	}
}

/// Non-empty explicit members in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntries(IndexSet<Identifier>);

impl ObjectEntries {
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Always false; kept for the `len`/`is_empty` pair.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn contains(&self, id: &Identifier) -> bool {
		self.0.contains(id)
	}

	pub fn first(&self) -> Option<&Identifier> {
		self.0.first()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Identifier> + '_ {
		self.0.iter()
	}
}

impl FromIterator<Identifier> for ObjectSet {
	fn from_iter<I: IntoIterator<Item = Identifier>>(iter: I) -> Self {
		Self::of(iter)
	}
}
