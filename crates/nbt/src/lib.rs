//! Binary tag tree.
//!
//! The universal value format every codec reads and writes. A [`Tag`] is an
//! untyped tree of compounds, lists and typed scalars; schemas live one layer up
//! in `cobble-codec`.
//!
//! # Mental Model
//!
//! - [`Tag`] owns its children. Decoding always produces a fresh tree.
//! - [`Compound`] keeps insertion order for output but compares as a key/value
//!   set, so two compounds with the same entries in different order are equal.
//! - Numeric tags keep their subtype ([`TagKind::Int`] vs [`TagKind::Float`]);
//!   the lossy `as_*` accessors exist for readers that accept any number.
//!
//! # Untrusted Input
//!
//! [`io::read_named`] and [`io::read_unnamed`] never panic on malformed bytes.
//! Nesting depth and total allocation are bounded by [`io::NbtLimits`].

mod compound;
mod error;
pub mod io;
mod json;
mod kind;
mod tag;

pub use compound::Compound;
pub use error::NbtError;
pub use kind::TagKind;
pub use tag::Tag;

/// Result alias for tag tree operations.
pub type Result<T, E = NbtError> = std::result::Result<T, E>;
