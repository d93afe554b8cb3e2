use std::fmt;

use indexmap::IndexMap;

use crate::Tag;

/// An insertion-ordered `name → tag` mapping with unique keys.
///
/// Equality ignores order: two compounds are equal when they hold the same
/// key/value pairs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Compound {
	entries: IndexMap<String, Tag>,
}

impl Compound {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			entries: IndexMap::with_capacity(capacity),
		}
	}

	/// Inserts a value, returning the previous one for `key`.
	///
	/// A replaced key keeps its original position.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Tag>) -> Option<Tag> {
		self.entries.insert(key.into(), value.into())
	}

	/// Inserts a value at the front, moving the key if it already exists.
	pub fn insert_first(&mut self, key: impl Into<String>, value: impl Into<Tag>) {
		let (index, _) = self.entries.insert_full(key.into(), value.into());
		self.entries.move_index(index, 0);
	}

	/// Builder-style insert.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Tag>) -> Self {
		self.insert(key, value);
		self
	}

	pub fn get(&self, key: &str) -> Option<&Tag> {
		self.entries.get(key)
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	/// Removes `key`, preserving the order of the remaining entries.
	pub fn remove(&mut self, key: &str) -> Option<Tag> {
		self.entries.shift_remove(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
		self.entries.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> + '_ {
		self.entries.iter().map(|(k, v)| (k.as_str(), v))
	}

	/// Reads `key` as a boolean, falling back to `default` when absent or non-numeric.
	pub fn get_bool(&self, key: &str, default: bool) -> bool {
		self.get(key).and_then(Tag::as_bool).unwrap_or(default)
	}

	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(Tag::as_str)
	}
}

impl FromIterator<(String, Tag)> for Compound {
	fn from_iter<I: IntoIterator<Item = (String, Tag)>>(iter: I) -> Self {
		Self {
			entries: iter.into_iter().collect(),
		}
	}
}

impl IntoIterator for Compound {
	type Item = (String, Tag);
	type IntoIter = indexmap::map::IntoIter<String, Tag>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.into_iter()
	}
}

impl fmt::Display for Compound {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("{")?;
		for (i, (key, value)) in self.entries.iter().enumerate() {
			if i > 0 {
				f.write_str(",")?;
			}
			if key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '+')) && !key.is_empty() {
				f.write_str(key)?;
			} else {
				crate::tag::write_quoted(f, key)?;
			}
			write!(f, ":{value}")?;
		}
		f.write_str("}")
	}
}
