//! Record codecs built field by field.
//!
//! ```ignore
//! let codec = object(
//! 	|w, v: &DamageItem| w.field("amount", &LevelBasedValue::codec(), &v.amount),
//! 	|r| Ok(DamageItem { amount: r.field("amount", &LevelBasedValue::codec())? }),
//! );
//! ```
//!
//! Keys the read side never asks for are ignored, so newer data with extra
//! fields still decodes.

use std::marker::PhantomData;

use cobble_nbt::{Compound, Tag};

use crate::{Codec, CodecError, Context, Result};

/// Builds a compound codec from a write closure and a read closure.
pub fn object<T, W, R>(write: W, read: R) -> ObjectCodec<T, W, R>
where
	W: Fn(&mut CompoundWriter<'_>, &T) -> Result<()> + Send + Sync,
	R: Fn(&CompoundReader<'_>) -> Result<T> + Send + Sync,
{
	ObjectCodec {
		write,
		read,
		_marker: PhantomData,
	}
}

pub struct ObjectCodec<T, W, R> {
	write: W,
	read: R,
	_marker: PhantomData<fn() -> T>,
}

impl<T, W, R> Codec<T> for ObjectCodec<T, W, R>
where
	W: Fn(&mut CompoundWriter<'_>, &T) -> Result<()> + Send + Sync,
	R: Fn(&CompoundReader<'_>) -> Result<T> + Send + Sync,
{
	fn write(&self, cx: &Context, value: &T) -> Result<Tag> {
		let mut writer = CompoundWriter::new(cx);
		(self.write)(&mut writer, value)?;
		Ok(writer.finish())
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<T> {
		let compound = tag.as_compound().ok_or_else(|| CodecError::type_mismatch("compound", tag))?;
		(self.read)(&CompoundReader::new(cx, compound))
	}
}

/// Write side of an [`object`] codec.
pub struct CompoundWriter<'a> {
	cx: &'a Context,
	out: Compound,
}

impl<'a> CompoundWriter<'a> {
	/// Starts an empty compound, for codecs that dispatch by hand.
	pub fn new(cx: &'a Context) -> Self {
		Self { cx, out: Compound::new() }
	}

	pub fn context(&self) -> &Context {
		self.cx
	}

	pub fn finish(self) -> Tag {
		Tag::Compound(self.out)
	}

	/// Writes an entry; the codec may choose to omit it (see [`Codec::write_entry`]).
	pub fn field<V>(&mut self, name: &str, codec: &impl Codec<V>, value: &V) -> Result<()> {
		if let Some(tag) = codec.write_entry(self.cx, value).map_err(|e| e.at_field(name))? {
			self.out.insert(name, tag);
		}
		Ok(())
	}

	/// Writes `value` when present.
	pub fn optional<V>(&mut self, name: &str, codec: &impl Codec<V>, value: &Option<V>) -> Result<()> {
		match value {
			Some(value) => self.field(name, codec, value),
			None => Ok(()),
		}
	}

	/// Writes `value` unless it equals `default`.
	pub fn default<V: PartialEq>(&mut self, name: &str, codec: &impl Codec<V>, value: &V, default: &V) -> Result<()> {
		if value == default {
			return Ok(());
		}
		self.field(name, codec, value)
	}

	/// Inserts an already-built tag.
	pub fn put(&mut self, name: &str, tag: impl Into<Tag>) {
		self.out.insert(name, tag);
	}
}

/// Read side of an [`object`] codec.
pub struct CompoundReader<'a> {
	cx: &'a Context,
	compound: &'a Compound,
}

impl<'a> CompoundReader<'a> {
	pub fn new(cx: &'a Context, compound: &'a Compound) -> Self {
		Self { cx, compound }
	}

	pub fn context(&self) -> &'a Context {
		self.cx
	}

	pub fn compound(&self) -> &'a Compound {
		self.compound
	}

	pub fn has(&self, name: &str) -> bool {
		self.compound.contains_key(name)
	}

	pub fn get(&self, name: &str) -> Option<&'a Tag> {
		self.compound.get(name)
	}

	/// Reads an entry. A missing key falls back to [`Codec::absent`] and fails
	/// with `MissingField` when the codec has no absent value.
	pub fn field<V>(&self, name: &str, codec: &impl Codec<V>) -> Result<V> {
		match self.compound.get(name) {
			Some(tag) => codec.read(self.cx, tag).map_err(|e| e.at_field(name)),
			None => codec.absent().ok_or_else(|| CodecError::missing_field(name)),
		}
	}

	pub fn optional<V>(&self, name: &str, codec: &impl Codec<V>) -> Result<Option<V>> {
		match self.compound.get(name) {
			Some(tag) => codec.read(self.cx, tag).map(Some).map_err(|e| e.at_field(name)),
			None => Ok(None),
		}
	}

	pub fn default<V>(&self, name: &str, codec: &impl Codec<V>, default: V) -> Result<V> {
		Ok(self.optional(name, codec)?.unwrap_or(default))
	}
}
