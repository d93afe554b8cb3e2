use cobble_codec::{Codec, CodecError, CompoundReader, Context, ErrorKind, FLOAT, Result, StringEnum};
use cobble_nbt::{Compound, Tag};
use cobble_registry::{DEFAULT_NAMESPACE, Identifier};

use crate::family::string_enum;

/// A float drawn from a distribution.
///
/// Closed set: the variants are fixed and dispatch does not go through a
/// registry. A bare number reads as [`FloatProvider::Constant`] and constants
/// are written back as bare numbers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FloatProvider {
	Constant(f32),
	Uniform { min_inclusive: f32, max_exclusive: f32 },
	ClampedNormal { mean: f32, deviation: f32, min: f32, max: f32 },
	Trapezoid { min: f32, max: f32, plateau: f32 },
}

impl FloatProvider {
	pub fn codec() -> FloatProviderCodec {
		FloatProviderCodec
	}

	pub fn min_value(&self) -> f32 {
		match *self {
			Self::Constant(value) => value,
			Self::Uniform { min_inclusive, .. } => min_inclusive,
			Self::ClampedNormal { min, .. } | Self::Trapezoid { min, .. } => min,
		}
	}

	pub fn max_value(&self) -> f32 {
		match *self {
			Self::Constant(value) => value,
			Self::Uniform { max_exclusive, .. } => max_exclusive,
			Self::ClampedNormal { max, .. } | Self::Trapezoid { max, .. } => max,
		}
	}

	fn kind(&self) -> ProviderType {
		match self {
			Self::Constant(_) => ProviderType::Constant,
			Self::Uniform { .. } => ProviderType::Uniform,
			Self::ClampedNormal { .. } => ProviderType::ClampedNormal,
			Self::Trapezoid { .. } => ProviderType::Trapezoid,
		}
	}

	fn validate(self) -> Result<Self> {
		let ok = match self {
			Self::Constant(_) => true,
			Self::Uniform {
				min_inclusive,
				max_exclusive,
			} => max_exclusive > min_inclusive,
			Self::ClampedNormal { min, max, .. } => max >= min,
			Self::Trapezoid { min, max, plateau } => max >= min && plateau <= max - min,
		};
		if ok {
			Ok(self)
		} else {
			Err(CodecError::invalid(format!("{} bounds out of order: {self:?}", self.kind().name())))
		}
	}
}

impl From<f32> for FloatProvider {
	fn from(value: f32) -> Self {
		Self::Constant(value)
	}
}

string_enum! {
	enum ProviderType as "float provider type" {
		Constant = "constant",
		Uniform = "uniform",
		ClampedNormal = "clamped_normal",
		Trapezoid = "trapezoid",
	}
}

/// Codec for [`FloatProvider`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatProviderCodec;

impl FloatProviderCodec {
	fn provider_type(raw: &Tag) -> Result<ProviderType> {
		let name = raw.as_str().ok_or_else(|| CodecError::type_mismatch("string", raw))?;
		let id = Identifier::parse(name).map_err(|e| CodecError::invalid(e.to_string()))?;
		let unknown = || {
			CodecError::new(ErrorKind::UnknownVariant {
				family: ProviderType::FAMILY,
				name: id.to_string(),
			})
		};
		if id.namespace() != DEFAULT_NAMESPACE {
			return Err(unknown());
		}
		ProviderType::from_name(id.path()).ok_or_else(unknown)
	}
}

impl Codec<FloatProvider> for FloatProviderCodec {
	fn write(&self, _: &Context, value: &FloatProvider) -> Result<Tag> {
		let fields: Vec<(&str, f32)> = match *value {
			FloatProvider::Constant(value) => return Ok(Tag::Float(value)),
			FloatProvider::Uniform {
				min_inclusive,
				max_exclusive,
			} => vec![("min_inclusive", min_inclusive), ("max_exclusive", max_exclusive)],
			FloatProvider::ClampedNormal { mean, deviation, min, max } => {
				vec![("mean", mean), ("deviation", deviation), ("min", min), ("max", max)]
			}
			FloatProvider::Trapezoid { min, max, plateau } => vec![("min", min), ("max", max), ("plateau", plateau)],
		};
		let mut out = Compound::with_capacity(fields.len() + 1);
		out.insert("type", Identifier::minecraft(value.kind().name()).as_str());
		for (name, value) in fields {
			out.insert(name, value);
		}
		Ok(Tag::Compound(out))
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<FloatProvider> {
		if let Some(value) = tag.as_f32() {
			return Ok(FloatProvider::Constant(value));
		}
		let compound = tag.as_compound().ok_or_else(|| CodecError::type_mismatch("number or compound", tag))?;
		let raw = compound.get("type").ok_or_else(|| CodecError::missing_field("type"))?;
		let kind = Self::provider_type(raw).map_err(|e| e.at_field("type"))?;

		let r = CompoundReader::new(cx, compound);
		let provider = match kind {
			ProviderType::Constant => FloatProvider::Constant(r.field("value", &FLOAT)?),
			ProviderType::Uniform => FloatProvider::Uniform {
				min_inclusive: r.field("min_inclusive", &FLOAT)?,
				max_exclusive: r.field("max_exclusive", &FLOAT)?,
			},
			ProviderType::ClampedNormal => FloatProvider::ClampedNormal {
				mean: r.field("mean", &FLOAT)?,
				deviation: r.field("deviation", &FLOAT)?,
				min: r.field("min", &FLOAT)?,
				max: r.field("max", &FLOAT)?,
			},
			ProviderType::Trapezoid => FloatProvider::Trapezoid {
				min: r.field("min", &FLOAT)?,
				max: r.field("max", &FLOAT)?,
				plateau: r.field("plateau", &FLOAT)?,
			},
		};
		provider.validate()
	}
}
