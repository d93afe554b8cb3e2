//! Numbers that scale with an enchantment level.
//!
//! `calc` follows the game's evaluation rules; levels start at 1.

use cobble_codec::{Codec, CodecError, CodecExt, Context, FLOAT, Result, TaggedUnionCodec, object, tagged_union};
use cobble_nbt::Tag;

use crate::family::tagged_family;

tagged_family! {
	/// A number computed from an enchantment level.
	///
	/// A bare number is shorthand for [`LevelBasedValue::Constant`] and is
	/// written back in that form.
	pub enum LevelBasedValue in "minecraft:enchantment_level_based_value_type" {
		"constant" => Constant(f32) = object(|w, v: &f32| w.field("value", &FLOAT, v), |r| r.field("value", &FLOAT)),
		"linear" => Linear(Linear) = Linear::codec(),
		"clamped" => Clamped(Clamped) = Clamped::codec(),
		"fraction" => Fraction(Fraction) = Fraction::codec(),
		"levels_squared" => LevelsSquared(LevelsSquared) = LevelsSquared::codec(),
		"lookup" => Lookup(Lookup) = Lookup::codec(),
	}
}

impl LevelBasedValue {
	pub fn codec() -> TaggedUnionCodec<Self> {
		tagged_union::<Self>().with_inline(ConstantShorthand, |v| matches!(v, Self::Constant(_)))
	}

	pub fn calc(&self, level: i32) -> f32 {
		match self {
			Self::Constant(value) => *value,
			Self::Linear(l) => l.base + l.per_level_above_first * level.saturating_sub(1) as f32,
			Self::Clamped(c) => {
				let value = c.value.calc(level);
				if value < c.min { c.min } else { value.min(c.max) }
			}
			Self::Fraction(f) => {
				let denominator = f.denominator.calc(level);
				if denominator == 0.0 { 0.0 } else { f.numerator.calc(level) / denominator }
			}
			Self::LevelsSquared(s) => (level as f32).powi(2) + s.added,
			Self::Lookup(l) => match usize::try_from(level.saturating_sub(1)).ok().and_then(|i| l.values.get(i)) {
				Some(value) => *value,
				None => l.fallback.calc(level),
			},
		}
	}
}

/// `Constant(v)` as a bare float.
struct ConstantShorthand;

impl Codec<LevelBasedValue> for ConstantShorthand {
	fn write(&self, _: &Context, value: &LevelBasedValue) -> Result<Tag> {
		match value {
			LevelBasedValue::Constant(v) => Ok(Tag::Float(*v)),
			_ => Err(CodecError::invalid("only constant values have a number form")),
		}
	}

	fn read(&self, _: &Context, tag: &Tag) -> Result<LevelBasedValue> {
		tag.as_f32()
			.map(LevelBasedValue::Constant)
			.ok_or_else(|| CodecError::type_mismatch("number or compound", tag))
	}
}

fn boxed() -> impl Codec<Box<LevelBasedValue>> {
	LevelBasedValue::codec().map(Box::new, |b: &Box<LevelBasedValue>| LevelBasedValue::clone(b))
}

/// `base + per_level_above_first * (level - 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Linear {
	pub base: f32,
	pub per_level_above_first: f32,
}

impl Linear {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("base", &FLOAT, &v.base)?;
				w.field("per_level_above_first", &FLOAT, &v.per_level_above_first)
			},
			|r| {
				Ok(Self {
					base: r.field("base", &FLOAT)?,
					per_level_above_first: r.field("per_level_above_first", &FLOAT)?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Clamped {
	pub value: Box<LevelBasedValue>,
	pub min: f32,
	pub max: f32,
}

impl Clamped {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("value", &boxed(), &v.value)?;
				w.field("min", &FLOAT, &v.min)?;
				w.field("max", &FLOAT, &v.max)
			},
			|r| {
				let (min, max) = (r.field("min", &FLOAT)?, r.field("max", &FLOAT)?);
				if max < min {
					return Err(CodecError::invalid(format!("max {max} is below min {min}")));
				}
				Ok(Self {
					value: r.field("value", &boxed())?,
					min,
					max,
				})
			},
		)
	}
}

/// `numerator / denominator`, zero when the denominator is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Fraction {
	pub numerator: Box<LevelBasedValue>,
	pub denominator: Box<LevelBasedValue>,
}

impl Fraction {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("numerator", &boxed(), &v.numerator)?;
				w.field("denominator", &boxed(), &v.denominator)
			},
			|r| {
				Ok(Self {
					numerator: r.field("numerator", &boxed())?,
					denominator: r.field("denominator", &boxed())?,
				})
			},
		)
	}
}

/// `level² + added`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelsSquared {
	pub added: f32,
}

impl LevelsSquared {
	pub fn codec() -> impl Codec<Self> {
		object(|w, v: &Self| w.field("added", &FLOAT, &v.added), |r| Ok(Self { added: r.field("added", &FLOAT)? }))
	}
}

/// `values[level - 1]`, or `fallback` past the end of the table.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
	pub values: Vec<f32>,
	pub fallback: Box<LevelBasedValue>,
}

impl Lookup {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("values", &FLOAT.list(), &v.values)?;
				w.field("fallback", &boxed(), &v.fallback)
			},
			|r| {
				Ok(Self {
					values: r.field("values", &FLOAT.list())?,
					fallback: r.field("fallback", &boxed())?,
				})
			},
		)
	}
}

/// An inclusive `[min, max]` pair of level-based values.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberRange {
	pub min: LevelBasedValue,
	pub max: LevelBasedValue,
}

impl NumberRange {
	/// A range holding exactly `value`.
	pub fn exactly(value: f32) -> Self {
		Self {
			min: LevelBasedValue::Constant(value),
			max: LevelBasedValue::Constant(value),
		}
	}

	/// `(min, max)` evaluated at `level`.
	pub fn bounds(&self, level: i32) -> (f32, f32) {
		(self.min.calc(level), self.max.calc(level))
	}

	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("min", &LevelBasedValue::codec(), &v.min)?;
				w.field("max", &LevelBasedValue::codec(), &v.max)
			},
			|r| {
				Ok(Self {
					min: r.field("min", &LevelBasedValue::codec())?,
					max: r.field("max", &LevelBasedValue::codec())?,
				})
			},
		)
	}
}
