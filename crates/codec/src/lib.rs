//! Typed codecs over the tag tree.
//!
//! # Mental Model
//!
//! - A [`Codec<T>`] converts between `T` and a [`cobble_nbt::Tag`]. Codecs are
//!   immutable values built once and shared.
//! - Records are assembled with [`object`]; sequences, optional fields,
//!   defaults and conversions come from [`CodecExt`].
//! - Open families (effects, value providers) use [`TaggedUnionCodec`]: a
//!   registry of [`VariantCodec`]s selected by a discriminator key.
//! - Cross-references resolve through the [`Context`] handed to every call.
//!   Codecs hold no registries and perform no I/O or logging; the caller
//!   decides what to do with a [`CodecError`].

mod codec;
mod context;
mod error;
mod object;
mod object_set;
mod primitive;
mod tagged;

pub use codec::{
	BoxCodec, Codec, CodecExt, DefaultCodec, Lazy, ListCodec, MapCodec, OptionalCodec, TryMapCodec, lazy,
};
pub use context::Context;
pub use error::{CodecError, ErrorKind, PathSegment};
pub use object::{CompoundReader, CompoundWriter, ObjectCodec, object};
pub use object_set::{ObjectSetCodec, object_set};
pub use primitive::{
	BLOCK_POSITION, BOOL, BYTE, BlockPositionCodec, BoolCodec, ByteCodec, DOUBLE, DoubleCodec, EnumStrCodec, FLOAT, FloatCodec,
	IDENTIFIER, INT, IdentifierCodec, IntCodec, LONG, LongCodec, RAW_COMPOUND, RAW_TAG, RawCompoundCodec, RawTagCodec,
	RegistryKeyCodec, SHORT, STRING, ShortCodec, StringCodec, StringEnum, enum_str, enum_str_or, registry_key,
};
pub use tagged::{DEFAULT_DISCRIMINATOR, RegistryAccessor, TaggedUnionCodec, TaggedVariant, VariantCodec, tagged_union};

/// Result alias for codec operations.
pub type Result<T, E = CodecError> = std::result::Result<T, E>;
