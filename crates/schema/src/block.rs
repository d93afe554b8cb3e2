//! Block-level value types.
//!
//! Block state providers and block predicates are open-ended schemas of their
//! own; they are carried as raw compounds and round-trip unchanged.

use cobble_codec::{BLOCK_POSITION, Codec, CodecError, CodecExt, Context, RAW_COMPOUND, Result};
use cobble_nbt::{Compound, Tag};
use indexmap::IndexMap;

/// Integer block coordinates, encoded as a three-int array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
	pub x: i32,
	pub y: i32,
	pub z: i32,
}

impl BlockPos {
	pub const ORIGIN: BlockPos = BlockPos { x: 0, y: 0, z: 0 };

	pub const fn new(x: i32, y: i32, z: i32) -> Self {
		Self { x, y, z }
	}

	pub fn codec() -> impl Codec<Self> {
		BLOCK_POSITION.map(|[x, y, z]: [i32; 3]| Self { x, y, z }, |p: &Self| [p.x, p.y, p.z])
	}
}

/// Block state property overrides, `{"facing": "north", ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ItemBlockState {
	pub properties: IndexMap<String, String>,
}

impl ItemBlockState {
	pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.properties.insert(key.into(), value.into());
		self
	}

	pub fn get(&self, key: &str) -> Option<&str> {
		self.properties.get(key).map(String::as_str)
	}

	pub fn codec() -> ItemBlockStateCodec {
		ItemBlockStateCodec
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ItemBlockStateCodec;

impl Codec<ItemBlockState> for ItemBlockStateCodec {
	fn write(&self, _: &Context, value: &ItemBlockState) -> Result<Tag> {
		Ok(Tag::Compound(
			value.properties.iter().map(|(k, v)| (k.clone(), Tag::string(v.as_str()))).collect(),
		))
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<ItemBlockState> {
		let compound = tag.as_compound().ok_or_else(|| CodecError::type_mismatch("compound", tag))?;
		let mut properties = IndexMap::with_capacity(compound.len());
		for (key, value) in compound.iter() {
			let value = value.as_str().ok_or_else(|| CodecError::type_mismatch("string", value).at_field(key))?;
			properties.insert(key.to_owned(), value.to_owned());
		}
		Ok(ItemBlockState { properties })
	}
}

/// Opaque block state provider.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockStateProvider(pub Compound);

impl BlockStateProvider {
	pub fn codec() -> impl Codec<Self> {
		RAW_COMPOUND.map(Self, |v: &Self| v.0.clone())
	}
}

/// Opaque block predicate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockPredicate(pub Compound);

impl BlockPredicate {
	pub fn codec() -> impl Codec<Self> {
		RAW_COMPOUND.map(Self, |v: &Self| v.0.clone())
	}
}
