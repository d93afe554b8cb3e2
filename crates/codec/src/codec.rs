//! The [`Codec`] trait and its generic combinators.
//!
//! # Field Presence
//!
//! A codec also decides how it behaves as a compound entry. [`Codec::write_entry`]
//! may return `None` to omit the key, and [`Codec::absent`] supplies the value of
//! a missing key. Plain codecs make their entry required. [`CodecExt::optional`]
//! and [`CodecExt::default_value`] override both, which is how defaults are
//! omitted on write and reconstructed on read.

use std::marker::PhantomData;
use std::sync::{Arc, OnceLock};

use cobble_nbt::Tag;

use crate::{CodecError, Context, Result};

/// A bidirectional mapping between `T` and a tag tree node.
///
/// Implementations are immutable and pure. Everything they need from the
/// outside world comes through the [`Context`].
pub trait Codec<T>: Send + Sync {
	fn write(&self, cx: &Context, value: &T) -> Result<Tag>;

	fn read(&self, cx: &Context, tag: &Tag) -> Result<T>;

	/// Writes `value` as a compound entry; `None` omits the key.
	fn write_entry(&self, cx: &Context, value: &T) -> Result<Option<Tag>> {
		self.write(cx, value).map(Some)
	}

	/// Value for a compound entry whose key is missing; `None` means required.
	fn absent(&self) -> Option<T> {
		None
	}
}

/// A shared, type-erased codec.
pub type BoxCodec<T> = Arc<dyn Codec<T>>;

impl<T, C: Codec<T> + ?Sized> Codec<T> for Arc<C> {
	fn write(&self, cx: &Context, value: &T) -> Result<Tag> {
		(**self).write(cx, value)
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<T> {
		(**self).read(cx, tag)
	}

	fn write_entry(&self, cx: &Context, value: &T) -> Result<Option<Tag>> {
		(**self).write_entry(cx, value)
	}

	fn absent(&self) -> Option<T> {
		(**self).absent()
	}
}

/// Combinators available on every sized codec.
pub trait CodecExt<T>: Codec<T> + Sized + 'static {
	/// Ordered sequence codec. An empty sequence is written as an empty list.
	fn list(self) -> ListCodec<Self> {
		ListCodec { inner: self }
	}

	/// `None` omits the entry and a missing entry reads as `None`.
	fn optional(self) -> OptionalCodec<Self> {
		OptionalCodec { inner: self }
	}

	/// A value equal to `default` omits the entry and a missing entry reads as `default`.
	fn default_value(self, default: T) -> DefaultCodec<Self, T>
	where
		T: PartialEq + Clone + Send + Sync,
	{
		DefaultCodec { inner: self, default }
	}

	/// Lifts the codec to `B` through a pair of total conversions.
	///
	/// `to(from(b))` must equal `b`.
	fn map<B, F, G>(self, to: F, from: G) -> MapCodec<Self, T, F, G>
	where
		F: Fn(T) -> B + Send + Sync,
		G: Fn(&B) -> T + Send + Sync,
	{
		MapCodec {
			inner: self,
			to,
			from,
			_marker: PhantomData,
		}
	}

	/// Like [`Self::map`] but the read-side conversion may reject a value.
	fn try_map<B, F, G>(self, to: F, from: G) -> TryMapCodec<Self, T, F, G>
	where
		F: Fn(T) -> std::result::Result<B, String> + Send + Sync,
		G: Fn(&B) -> T + Send + Sync,
	{
		TryMapCodec {
			inner: self,
			to,
			from,
			_marker: PhantomData,
		}
	}

	fn boxed(self) -> BoxCodec<T>
	where
		T: 'static,
	{
		Arc::new(self)
	}
}

impl<T, C: Codec<T> + Sized + 'static> CodecExt<T> for C {}

pub struct ListCodec<C> {
	inner: C,
}

impl<T, C: Codec<T>> Codec<Vec<T>> for ListCodec<C> {
	fn write(&self, cx: &Context, value: &Vec<T>) -> Result<Tag> {
		value
			.iter()
			.enumerate()
			.map(|(i, item)| self.inner.write(cx, item).map_err(|e| e.at_index(i)))
			.collect::<Result<Vec<_>>>()
			.map(Tag::List)
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<Vec<T>> {
		let items = tag.as_list().ok_or_else(|| CodecError::type_mismatch("list", tag))?;
		items
			.iter()
			.enumerate()
			.map(|(i, item)| self.inner.read(cx, item).map_err(|e| e.at_index(i)))
			.collect()
	}
}

pub struct OptionalCodec<C> {
	inner: C,
}

impl<T, C: Codec<T>> Codec<Option<T>> for OptionalCodec<C> {
	/// An absent value has no tag of its own; only [`Codec::write_entry`] can omit it.
	fn write(&self, cx: &Context, value: &Option<T>) -> Result<Tag> {
		match value {
			Some(value) => self.inner.write(cx, value),
			None => Err(CodecError::invalid("absent value has no standalone tag form")),
		}
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<Option<T>> {
		self.inner.read(cx, tag).map(Some)
	}

	fn write_entry(&self, cx: &Context, value: &Option<T>) -> Result<Option<Tag>> {
		match value {
			Some(value) => self.inner.write_entry(cx, value),
			None => Ok(None),
		}
	}

	fn absent(&self) -> Option<Option<T>> {
		Some(None)
	}
}

pub struct DefaultCodec<C, T> {
	inner: C,
	default: T,
}

impl<T, C> Codec<T> for DefaultCodec<C, T>
where
	T: PartialEq + Clone + Send + Sync,
	C: Codec<T>,
{
	fn write(&self, cx: &Context, value: &T) -> Result<Tag> {
		self.inner.write(cx, value)
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<T> {
		self.inner.read(cx, tag)
	}

	fn write_entry(&self, cx: &Context, value: &T) -> Result<Option<Tag>> {
		if *value == self.default {
			return Ok(None);
		}
		self.inner.write_entry(cx, value)
	}

	fn absent(&self) -> Option<T> {
		Some(self.default.clone())
	}
}

pub struct MapCodec<C, A, F, G> {
	inner: C,
	to: F,
	from: G,
	_marker: PhantomData<fn() -> A>,
}

impl<A, B, C, F, G> Codec<B> for MapCodec<C, A, F, G>
where
	C: Codec<A>,
	F: Fn(A) -> B + Send + Sync,
	G: Fn(&B) -> A + Send + Sync,
{
	fn write(&self, cx: &Context, value: &B) -> Result<Tag> {
		self.inner.write(cx, &(self.from)(value))
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<B> {
		self.inner.read(cx, tag).map(&self.to)
	}

	fn write_entry(&self, cx: &Context, value: &B) -> Result<Option<Tag>> {
		self.inner.write_entry(cx, &(self.from)(value))
	}

	fn absent(&self) -> Option<B> {
		self.inner.absent().map(&self.to)
	}
}

pub struct TryMapCodec<C, A, F, G> {
	inner: C,
	to: F,
	from: G,
	_marker: PhantomData<fn() -> A>,
}

impl<A, B, C, F, G> Codec<B> for TryMapCodec<C, A, F, G>
where
	C: Codec<A>,
	F: Fn(A) -> std::result::Result<B, String> + Send + Sync,
	G: Fn(&B) -> A + Send + Sync,
{
	fn write(&self, cx: &Context, value: &B) -> Result<Tag> {
		self.inner.write(cx, &(self.from)(value))
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<B> {
		let value = self.inner.read(cx, tag)?;
		(self.to)(value).map_err(CodecError::invalid)
	}

	fn write_entry(&self, cx: &Context, value: &B) -> Result<Option<Tag>> {
		self.inner.write_entry(cx, &(self.from)(value))
	}

	fn absent(&self) -> Option<B> {
		self.inner.absent().and_then(|a| (self.to)(a).ok())
	}
}

/// A codec built on first use.
///
/// Self-referential schemas (a variant containing a list of its own family)
/// name the family codec through a `Lazy` so that building one codec never
/// requires the other to exist yet.
pub struct Lazy<T> {
	init: fn() -> BoxCodec<T>,
	cell: OnceLock<BoxCodec<T>>,
}

pub fn lazy<T>(init: fn() -> BoxCodec<T>) -> Lazy<T> {
	Lazy {
		init,
		cell: OnceLock::new(),
	}
}

impl<T> Lazy<T> {
	fn get(&self) -> &BoxCodec<T> {
		self.cell.get_or_init(self.init)
	}
}

impl<T> Codec<T> for Lazy<T> {
	fn write(&self, cx: &Context, value: &T) -> Result<Tag> {
		self.get().write(cx, value)
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<T> {
		self.get().read(cx, tag)
	}

	fn write_entry(&self, cx: &Context, value: &T) -> Result<Option<Tag>> {
		self.get().write_entry(cx, value)
	}

	fn absent(&self) -> Option<T> {
		self.get().absent()
	}
}
