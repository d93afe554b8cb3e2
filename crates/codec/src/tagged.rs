//! Registry-driven tagged unions.
//!
//! # Role
//!
//! A family such as "enchantment entity effect" is a Rust sum type whose
//! variants are not known to this crate. Each variant contributes a
//! [`VariantCodec`], and a [`DynamicRegistry`] of those codecs maps
//! discriminator identifiers to them. [`TaggedUnionCodec`] is the single codec
//! for the whole family.
//!
//! # Wire Shape
//!
//! `{"type": "<identifier>", ...payload fields}`. The payload is flat, never
//! nested under a sub-key, and the discriminator is the first key written.
//!
//! # Invariants
//!
//! - Reading never guesses: a missing or unregistered discriminator is an error.
//! - Writing asks the value for its own codec and looks up the identifier that
//!   exact codec instance is registered under. Codecs compare by identity.
//! - The variant codec reads the original compound, discriminator included.
//!   Object codecs skip keys they never ask for, and nothing is copied per
//!   nesting level.
//! - The registry is reached through an accessor function of the [`Context`],
//!   so a variant may contain its own family and the registry need not exist
//!   when the codecs are built.

use std::sync::Arc;

use cobble_nbt::Tag;
use cobble_registry::{DynamicRegistry, Identifier};

use crate::{BoxCodec, Codec, CodecError, Context, ErrorKind, Result};

/// Discriminator key used unless a family says otherwise.
pub const DEFAULT_DISCRIMINATOR: &str = "type";

/// A family value that knows which codec produced it.
pub trait TaggedVariant: Sized + Send + Sync + 'static {
	fn variant_codec(&self) -> VariantCodec<Self>;
}

/// One variant's codec, compared by identity.
///
/// Build each variant codec once (typically in a `static`) and hand out
/// clones; two separately built codecs are never equal even if they behave
/// the same.
pub struct VariantCodec<E> {
	codec: Arc<dyn Codec<E>>,
}

impl<E: 'static> VariantCodec<E> {
	pub fn new(codec: impl Codec<E> + 'static) -> Self {
		Self { codec: Arc::new(codec) }
	}

	/// Lifts a payload codec into the family.
	///
	/// `extract` projects the family value onto this variant's payload and
	/// `wrap` builds the family value from a decoded payload.
	pub fn of<V, C, X, W>(codec: C, extract: X, wrap: W) -> Self
	where
		V: 'static,
		C: Codec<V> + 'static,
		X: Fn(&E) -> Option<&V> + Send + Sync + 'static,
		W: Fn(V) -> E + Send + Sync + 'static,
	{
		Self::new(Projected {
			codec,
			extract,
			wrap,
			_marker: std::marker::PhantomData::<fn() -> V>,
		})
	}
}

impl<E> VariantCodec<E> {
	/// True when both handles point at the same codec instance.
	pub fn same(&self, other: &Self) -> bool {
		std::ptr::addr_eq(Arc::as_ptr(&self.codec), Arc::as_ptr(&other.codec))
	}
}

impl<E> Clone for VariantCodec<E> {
	fn clone(&self) -> Self {
		Self { codec: self.codec.clone() }
	}
}

impl<E> PartialEq for VariantCodec<E> {
	fn eq(&self, other: &Self) -> bool {
		self.same(other)
	}
}

impl<E> Eq for VariantCodec<E> {}

impl<E> std::fmt::Debug for VariantCodec<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "VariantCodec({:p})", Arc::as_ptr(&self.codec))
	}
}

impl<E> Codec<E> for VariantCodec<E> {
	fn write(&self, cx: &Context, value: &E) -> Result<Tag> {
		self.codec.write(cx, value)
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<E> {
		self.codec.read(cx, tag)
	}
}

struct Projected<C, X, W, V> {
	codec: C,
	extract: X,
	wrap: W,
	_marker: std::marker::PhantomData<fn() -> V>,
}

impl<E, V, C, X, W> Codec<E> for Projected<C, X, W, V>
where
	C: Codec<V>,
	X: Fn(&E) -> Option<&V> + Send + Sync,
	W: Fn(V) -> E + Send + Sync,
{
	fn write(&self, cx: &Context, value: &E) -> Result<Tag> {
		let payload = (self.extract)(value).ok_or_else(|| CodecError::invalid("value does not belong to this variant"))?;
		self.codec.write(cx, payload)
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<E> {
		self.codec.read(cx, tag).map(&self.wrap)
	}
}

/// Resolves a family's variant registry from a context.
pub type RegistryAccessor<E> = fn(&Context) -> Result<&DynamicRegistry<VariantCodec<E>>>;

fn registry_in_context<E: 'static>(cx: &Context) -> Result<&DynamicRegistry<VariantCodec<E>>> {
	cx.registry::<VariantCodec<E>>()
}

struct Inline<E> {
	codec: BoxCodec<E>,
	applies: fn(&E) -> bool,
}

/// The codec for a whole open family.
pub struct TaggedUnionCodec<E> {
	accessor: RegistryAccessor<E>,
	discriminator: &'static str,
	inline: Option<Arc<Inline<E>>>,
}

/// Family codec using the context's `VariantCodec<E>` registry and the `"type"` key.
pub fn tagged_union<E: TaggedVariant>() -> TaggedUnionCodec<E> {
	TaggedUnionCodec::new(registry_in_context::<E>, DEFAULT_DISCRIMINATOR)
}

impl<E: TaggedVariant> TaggedUnionCodec<E> {
	pub fn new(accessor: RegistryAccessor<E>, discriminator: &'static str) -> Self {
		Self {
			accessor,
			discriminator,
			inline: None,
		}
	}

	/// Accepts a non-compound shorthand.
	///
	/// Values for which `applies` is true are written with `codec` in place of
	/// the tagged compound, and any non-compound tag is read with `codec`.
	pub fn with_inline(mut self, codec: impl Codec<E> + 'static, applies: fn(&E) -> bool) -> Self {
		self.inline = Some(Arc::new(Inline {
			codec: Arc::new(codec),
			applies,
		}));
		self
	}

	pub fn discriminator(&self) -> &'static str {
		self.discriminator
	}

	/// Identifier `value`'s variant is registered under in `cx`.
	pub fn variant_id(&self, cx: &Context, value: &E) -> Result<Identifier> {
		let registry = (self.accessor)(cx)?;
		let codec = value.variant_codec();
		registry
			.find_key(|candidate| candidate.same(&codec))
			.map(|key| key.id().clone())
			.ok_or_else(|| {
				CodecError::new(ErrorKind::UnregisteredVariant {
					family: registry.family(),
				})
			})
	}
}

impl<E> Clone for TaggedUnionCodec<E> {
	fn clone(&self) -> Self {
		Self {
			accessor: self.accessor,
			discriminator: self.discriminator,
			inline: self.inline.clone(),
		}
	}
}

impl<E: TaggedVariant> Codec<E> for TaggedUnionCodec<E> {
	fn write(&self, cx: &Context, value: &E) -> Result<Tag> {
		if let Some(inline) = &self.inline
			&& (inline.applies)(value)
		{
			return inline.codec.write(cx, value);
		}
		let id = self.variant_id(cx, value)?;
		let mut payload = match value.variant_codec().write(cx, value)? {
			Tag::Compound(payload) => payload,
			other => {
				return Err(CodecError::invalid(format!(
					"variant {id} wrote a {} payload, expected compound",
					other.kind()
				)));
			}
		};
		payload.insert_first(self.discriminator, id.as_str());
		Ok(Tag::Compound(payload))
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<E> {
		let Some(compound) = tag.as_compound() else {
			return match &self.inline {
				Some(inline) => inline.codec.read(cx, tag),
				None => Err(CodecError::type_mismatch("compound", tag)),
			};
		};

		let disc = self.discriminator;
		let raw = compound.get(disc).ok_or_else(|| CodecError::missing_field(disc))?;
		let raw = raw.as_str().ok_or_else(|| CodecError::type_mismatch("string", raw).at_field(disc))?;
		let id = Identifier::parse(raw).map_err(|e| CodecError::invalid(e.to_string()).at_field(disc))?;

		let registry = (self.accessor)(cx)?;
		let codec = registry.get_id(&id).ok_or_else(|| {
			CodecError::new(ErrorKind::UnknownIdentifier {
				id: id.to_string(),
				family: registry.family(),
			})
			.at_field(disc)
		})?;

		codec.read(cx, tag)
	}
}
