use std::fmt;

use crate::{Compound, TagKind};

/// A node of the tag tree.
///
/// Booleans have no dedicated kind: they are written as `Byte(0)` / `Byte(1)`
/// and read back from any numeric tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
	Byte(i8),
	Short(i16),
	Int(i32),
	Long(i64),
	Float(f32),
	Double(f64),
	ByteArray(Vec<i8>),
	String(String),
	List(Vec<Tag>),
	Compound(Compound),
	IntArray(Vec<i32>),
	LongArray(Vec<i64>),
}

impl Tag {
	/// Returns the kind of this tag.
	pub fn kind(&self) -> TagKind {
		match self {
			Tag::Byte(_) => TagKind::Byte,
			Tag::Short(_) => TagKind::Short,
			Tag::Int(_) => TagKind::Int,
			Tag::Long(_) => TagKind::Long,
			Tag::Float(_) => TagKind::Float,
			Tag::Double(_) => TagKind::Double,
			Tag::ByteArray(_) => TagKind::ByteArray,
			Tag::String(_) => TagKind::String,
			Tag::List(_) => TagKind::List,
			Tag::Compound(_) => TagKind::Compound,
			Tag::IntArray(_) => TagKind::IntArray,
			Tag::LongArray(_) => TagKind::LongArray,
		}
	}

	/// Encodes a boolean the NBT way.
	#[inline]
	pub fn bool(value: bool) -> Self {
		Tag::Byte(value as i8)
	}

	/// Creates a string tag.
	pub fn string(value: impl Into<String>) -> Self {
		Tag::String(value.into())
	}

	/// Returns true for any numeric kind.
	pub fn is_number(&self) -> bool {
		self.kind().is_numeric()
	}

	/// Reads any numeric tag as `i64`, truncating floating values.
	pub fn as_i64(&self) -> Option<i64> {
		Some(match *self {
			Tag::Byte(v) => v as i64,
			Tag::Short(v) => v as i64,
			Tag::Int(v) => v as i64,
			Tag::Long(v) => v,
			Tag::Float(v) => v as i64,
			Tag::Double(v) => v as i64,
			_ => return None,
		})
	}

	/// Reads any numeric tag as `i32`, with NBT narrowing semantics.
	pub fn as_i32(&self) -> Option<i32> {
		Some(match *self {
			Tag::Long(v) => v as i32,
			Tag::Float(v) => v as i32,
			Tag::Double(v) => v as i32,
			ref other => other.as_i64()? as i32,
		})
	}

	/// Reads any numeric tag as `f64`.
	pub fn as_f64(&self) -> Option<f64> {
		Some(match *self {
			Tag::Float(v) => v as f64,
			Tag::Double(v) => v,
			ref other => other.as_i64()? as f64,
		})
	}

	/// Reads any numeric tag as `f32`.
	pub fn as_f32(&self) -> Option<f32> {
		self.as_f64().map(|v| v as f32)
	}

	/// Reads any numeric tag as a boolean (non-zero is true).
	pub fn as_bool(&self) -> Option<bool> {
		match *self {
			Tag::Float(v) => Some(v != 0.0),
			Tag::Double(v) => Some(v != 0.0),
			ref other => other.as_i64().map(|v| v != 0),
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Tag::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_compound(&self) -> Option<&Compound> {
		match self {
			Tag::Compound(c) => Some(c),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Tag]> {
		match self {
			Tag::List(items) => Some(items),
			_ => None,
		}
	}

	/// Views the three array kinds and homogeneous integer lists as `i32`s.
	pub fn as_int_array(&self) -> Option<Vec<i32>> {
		match self {
			Tag::IntArray(v) => Some(v.clone()),
			Tag::ByteArray(v) => Some(v.iter().map(|&b| b as i32).collect()),
			Tag::LongArray(v) => Some(v.iter().map(|&l| l as i32).collect()),
			Tag::List(items) => items
				.iter()
				.map(|t| if t.kind().is_integral() { t.as_i32() } else { None })
				.collect(),
			_ => None,
		}
	}
}

macro_rules! impl_from {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl From<$ty> for Tag {
				#[inline]
				fn from(v: $ty) -> Self {
					Tag::$variant(v)
				}
			}
		)*
	};
}

impl_from! {
	i8 => Byte,
	i16 => Short,
	i32 => Int,
	i64 => Long,
	f32 => Float,
	f64 => Double,
	String => String,
	Compound => Compound,
	Vec<Tag> => List,
}

impl From<bool> for Tag {
	fn from(v: bool) -> Self {
		Tag::bool(v)
	}
}

impl From<&str> for Tag {
	fn from(v: &str) -> Self {
		Tag::String(v.to_owned())
	}
}

/// Renders the tree in the stringified (SNBT) notation.
impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Tag::Byte(v) => write!(f, "{v}b"),
			Tag::Short(v) => write!(f, "{v}s"),
			Tag::Int(v) => write!(f, "{v}"),
			Tag::Long(v) => write!(f, "{v}L"),
			Tag::Float(v) => write!(f, "{v}f"),
			Tag::Double(v) => write!(f, "{v}d"),
			Tag::String(s) => write_quoted(f, s),
			Tag::ByteArray(v) => write_array(f, "B", v.iter().map(|b| format!("{b}b"))),
			Tag::IntArray(v) => write_array(f, "I", v.iter().map(|i| i.to_string())),
			Tag::LongArray(v) => write_array(f, "L", v.iter().map(|l| format!("{l}L"))),
			Tag::List(items) => {
				f.write_str("[")?;
				for (i, item) in items.iter().enumerate() {
					if i > 0 {
						f.write_str(",")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str("]")
			}
			Tag::Compound(c) => write!(f, "{c}"),
		}
	}
}

pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
	f.write_str("\"")?;
	for ch in s.chars() {
		match ch {
			'"' => f.write_str("\\\"")?,
			'\\' => f.write_str("\\\\")?,
			c => write!(f, "{c}")?,
		}
	}
	f.write_str("\"")
}

fn write_array(f: &mut fmt::Formatter<'_>, prefix: &str, items: impl Iterator<Item = String>) -> fmt::Result {
	write!(f, "[{prefix};")?;
	for (i, item) in items.enumerate() {
		if i > 0 {
			f.write_str(",")?;
		}
		f.write_str(&item)?;
	}
	f.write_str("]")
}
