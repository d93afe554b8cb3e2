//! Scalar codecs.
//!
//! Numeric codecs read any numeric tag, narrowing the way NBT number tags do,
//! and always write their own canonical kind.

use std::marker::PhantomData;

use cobble_nbt::{Compound, Tag};
use cobble_registry::{Identifier, RegistryKey};

use crate::{Codec, CodecError, Context, ErrorKind, Result};

macro_rules! numeric_codec {
	($(#[$meta:meta])* $name:ident, $konst:ident, $ty:ty, $variant:ident, $read:expr) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, Default)]
		pub struct $name;

		$(#[$meta])*
		pub const $konst: $name = $name;

		impl Codec<$ty> for $name {
			fn write(&self, _: &Context, value: &$ty) -> Result<Tag> {
				Ok(Tag::$variant(*value))
			}

			fn read(&self, _: &Context, tag: &Tag) -> Result<$ty> {
				let read: fn(&Tag) -> Option<$ty> = $read;
				read(tag).ok_or_else(|| CodecError::type_mismatch("number", tag))
			}
		}
	};
}

numeric_codec!(ByteCodec, BYTE, i8, Byte, |t| t.as_i64().map(|v| v as i8));
numeric_codec!(ShortCodec, SHORT, i16, Short, |t| t.as_i64().map(|v| v as i16));
numeric_codec!(IntCodec, INT, i32, Int, Tag::as_i32);
numeric_codec!(LongCodec, LONG, i64, Long, Tag::as_i64);
numeric_codec!(FloatCodec, FLOAT, f32, Float, Tag::as_f32);
numeric_codec!(DoubleCodec, DOUBLE, f64, Double, Tag::as_f64);

/// Booleans as `Byte(0)` / `Byte(1)`; any number reads, non-zero is true.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

pub const BOOL: BoolCodec = BoolCodec;

impl Codec<bool> for BoolCodec {
	fn write(&self, _: &Context, value: &bool) -> Result<Tag> {
		Ok(Tag::bool(*value))
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<bool> {
		tag.as_bool().ok_or_else(|| CodecError::type_mismatch("boolean", tag))
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

pub const STRING: StringCodec = StringCodec;

impl Codec<String> for StringCodec {
	fn write(&self, _: &Context, value: &String) -> Result<Tag> {
		Ok(Tag::String(value.clone()))
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<String> {
		tag.as_str().map(str::to_owned).ok_or_else(|| CodecError::type_mismatch("string", tag))
	}
}

/// Namespaced identifiers; a bare path reads in the default namespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierCodec;

pub const IDENTIFIER: IdentifierCodec = IdentifierCodec;

impl Codec<Identifier> for IdentifierCodec {
	fn write(&self, _: &Context, value: &Identifier) -> Result<Tag> {
		Ok(Tag::string(value.as_str()))
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<Identifier> {
		let raw = tag.as_str().ok_or_else(|| CodecError::type_mismatch("identifier", tag))?;
		Identifier::parse(raw).map_err(|e| CodecError::invalid(e.to_string()))
	}
}

/// `[x, y, z]` written as an int array. Lists of three integers also read.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockPositionCodec;

pub const BLOCK_POSITION: BlockPositionCodec = BlockPositionCodec;

impl Codec<[i32; 3]> for BlockPositionCodec {
	fn write(&self, _: &Context, value: &[i32; 3]) -> Result<Tag> {
		Ok(Tag::IntArray(value.to_vec()))
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<[i32; 3]> {
		let values = tag.as_int_array().ok_or_else(|| CodecError::type_mismatch("int array", tag))?;
		<[i32; 3]>::try_from(values)
			.map_err(|values| CodecError::invalid(format!("block position needs 3 coordinates, found {}", values.len())))
	}
}

/// Passes a compound through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawCompoundCodec;

pub const RAW_COMPOUND: RawCompoundCodec = RawCompoundCodec;

impl Codec<Compound> for RawCompoundCodec {
	fn write(&self, _: &Context, value: &Compound) -> Result<Tag> {
		Ok(Tag::Compound(value.clone()))
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<Compound> {
		tag.as_compound().cloned().ok_or_else(|| CodecError::type_mismatch("compound", tag))
	}
}

/// Passes any tag through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawTagCodec;

pub const RAW_TAG: RawTagCodec = RawTagCodec;

impl Codec<Tag> for RawTagCodec {
	fn write(&self, _: &Context, value: &Tag) -> Result<Tag> {
		Ok(value.clone())
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<Tag> {
		Ok(tag.clone())
	}
}

/// A closed enumeration serialized by canonical lowercase name.
pub trait StringEnum: Sized + Copy + PartialEq + Send + Sync + 'static {
	/// Human-readable family name used in errors.
	const FAMILY: &'static str;
	const VARIANTS: &'static [Self];

	fn name(self) -> &'static str;

	/// Case-insensitive lookup by name.
	fn from_name(name: &str) -> Option<Self> {
		Self::VARIANTS.iter().copied().find(|v| v.name().eq_ignore_ascii_case(name))
	}
}

/// Codec for a [`StringEnum`]; see [`enum_str`] and [`enum_str_or`].
#[derive(Debug, Clone, Copy)]
pub struct EnumStrCodec<E> {
	fallback: Option<E>,
}

/// Unknown names fail with `UnknownVariant`.
pub fn enum_str<E: StringEnum>() -> EnumStrCodec<E> {
	EnumStrCodec { fallback: None }
}

/// Unknown names read as `fallback`.
pub fn enum_str_or<E: StringEnum>(fallback: E) -> EnumStrCodec<E> {
	EnumStrCodec { fallback: Some(fallback) }
}

impl<E: StringEnum> Codec<E> for EnumStrCodec<E> {
	fn write(&self, _: &Context, value: &E) -> Result<Tag> {
		Ok(Tag::string(value.name()))
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<E> {
		let name = tag.as_str().ok_or_else(|| CodecError::type_mismatch("string", tag))?;
		E::from_name(name).or(self.fallback).ok_or_else(|| {
			CodecError::new(ErrorKind::UnknownVariant {
				family: E::FAMILY,
				name: name.to_owned(),
			})
		})
	}
}

/// Identifier that must name an entry of the context's `T` registry.
pub struct RegistryKeyCodec<T> {
	_marker: PhantomData<fn() -> T>,
}

pub fn registry_key<T: Send + Sync + 'static>() -> RegistryKeyCodec<T> {
	RegistryKeyCodec { _marker: PhantomData }
}

impl<T: Send + Sync + 'static> Codec<RegistryKey<T>> for RegistryKeyCodec<T> {
	fn write(&self, _: &Context, value: &RegistryKey<T>) -> Result<Tag> {
		Ok(Tag::string(value.id().as_str()))
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<RegistryKey<T>> {
		let id = IDENTIFIER.read(cx, tag)?;
		let registry = cx.registry::<T>()?;
		registry.key(&id).ok_or_else(|| {
			CodecError::new(ErrorKind::UnknownIdentifier {
				id: id.to_string(),
				family: registry.family(),
			})
		})
	}
}
