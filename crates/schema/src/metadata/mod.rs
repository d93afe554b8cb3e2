//! Indexed entity metadata.
//!
//! # Mental Model
//!
//! An entity's metadata is a sparse map from a small index to a typed value.
//! Entity-specific views such as [`AreaEffectCloudMeta`] give the indices
//! names and defaults; a view reads and writes the same index for a field.
//!
//! Writes are recorded as pending changes until [`Metadata::take_changes`]
//! drains them, in index order.

mod area_effect_cloud;

use rustc_hash::{FxHashMap, FxHashSet};

pub use area_effect_cloud::AreaEffectCloudMeta;

use crate::particle::Particle;

/// One metadata entry.
#[derive(Debug, Clone, PartialEq)]
pub enum MetadataValue {
	Byte(i8),
	VarInt(i32),
	Float(f32),
	String(String),
	Boolean(bool),
	Particle(Particle),
}

impl MetadataValue {
	pub fn type_name(&self) -> &'static str {
		match self {
			Self::Byte(_) => "byte",
			Self::VarInt(_) => "varint",
			Self::Float(_) => "float",
			Self::String(_) => "string",
			Self::Boolean(_) => "boolean",
			Self::Particle(_) => "particle",
		}
	}
}

/// A Rust type stored as one [`MetadataValue`] variant.
pub trait MetadataType: Sized {
	fn into_value(self) -> MetadataValue;
	fn from_value(value: &MetadataValue) -> Option<Self>;
}

macro_rules! metadata_type {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl MetadataType for $ty {
				fn into_value(self) -> MetadataValue {
					MetadataValue::$variant(self)
				}

				fn from_value(value: &MetadataValue) -> Option<Self> {
					match value {
						MetadataValue::$variant(v) => Some(v.clone()),
						_ => None,
					}
				}
			}
		)*
	};
}

metadata_type! {
	i8 => Byte,
	i32 => VarInt,
	f32 => Float,
	String => String,
	bool => Boolean,
	Particle => Particle,
}

#[derive(Debug, Clone, Default)]
pub struct Metadata {
	entries: FxHashMap<u8, MetadataValue>,
	changed: FxHashSet<u8>,
}

impl Metadata {
	pub fn new() -> Self {
		Self::default()
	}

	/// Value at `index`, or `default` when the index is unset or holds
	/// another type.
	pub fn get_index<T: MetadataType>(&self, index: u8, default: T) -> T {
		self.entries.get(&index).and_then(T::from_value).unwrap_or(default)
	}

	pub fn get_raw(&self, index: u8) -> Option<&MetadataValue> {
		self.entries.get(&index)
	}

	pub fn set_index(&mut self, index: u8, value: impl MetadataType) {
		self.entries.insert(index, value.into_value());
		self.changed.insert(index);
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Drains the entries written since the last call, sorted by index.
	pub fn take_changes(&mut self) -> Vec<(u8, MetadataValue)> {
		let mut changed: Vec<u8> = self.changed.drain().collect();
		changed.sort_unstable();
		changed
			.into_iter()
			.filter_map(|index| self.entries.get(&index).map(|value| (index, value.clone())))
			.collect()
	}
}
