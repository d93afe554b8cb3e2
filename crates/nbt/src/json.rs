//! Bridge between JSON documents and tag trees.
//!
//! Content packs are authored as JSON; codecs only understand tags.

use serde_json::{Map, Number, Value};

use crate::{Compound, NbtError, Result, Tag};

impl Tag {
	/// Converts a JSON value into a tag tree.
	///
	/// Integers become `Int` when they fit and `Long` otherwise, other numbers
	/// become `Double`, booleans become `Byte`. `null` has no tag form.
	pub fn from_json(value: &Value) -> Result<Tag> {
		Ok(match value {
			Value::Null => return Err(NbtError::Json("null".into())),
			Value::Bool(b) => Tag::bool(*b),
			Value::Number(n) => number(n)?,
			Value::String(s) => Tag::String(s.clone()),
			Value::Array(items) => Tag::List(items.iter().map(Tag::from_json).collect::<Result<_>>()?),
			Value::Object(map) => Tag::Compound(
				map.iter()
					.map(|(k, v)| Ok((k.clone(), Tag::from_json(v)?)))
					.collect::<Result<Compound>>()?,
			),
		})
	}

	/// Converts the tree into JSON for display. Arrays become JSON arrays.
	pub fn to_json(&self) -> Value {
		match self {
			Tag::Byte(v) => Value::from(*v),
			Tag::Short(v) => Value::from(*v),
			Tag::Int(v) => Value::from(*v),
			Tag::Long(v) => Value::from(*v),
			Tag::Float(v) => Number::from_f64(*v as f64).map_or(Value::Null, Value::Number),
			Tag::Double(v) => Number::from_f64(*v).map_or(Value::Null, Value::Number),
			Tag::String(s) => Value::String(s.clone()),
			Tag::ByteArray(v) => Value::Array(v.iter().map(|b| Value::from(*b)).collect()),
			Tag::IntArray(v) => Value::Array(v.iter().map(|i| Value::from(*i)).collect()),
			Tag::LongArray(v) => Value::Array(v.iter().map(|l| Value::from(*l)).collect()),
			Tag::List(items) => Value::Array(items.iter().map(Tag::to_json).collect()),
			Tag::Compound(c) => Value::Object(c.iter().map(|(k, v)| (k.to_owned(), v.to_json())).collect::<Map<_, _>>()),
		}
	}
}

fn number(n: &Number) -> Result<Tag> {
	if let Some(i) = n.as_i64() {
		return Ok(i32::try_from(i).map_or(Tag::Long(i), Tag::Int));
	}
	if let Some(u) = n.as_u64() {
		return i64::try_from(u)
			.map(Tag::Long)
			.map_err(|_| NbtError::Json(format!("{u} is out of range")));
	}
	n.as_f64().map(Tag::Double).ok_or_else(|| NbtError::Json(n.to_string()))
}
