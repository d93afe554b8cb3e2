use cobble_codec::{Codec, CodecExt, FLOAT, enum_str, object};

use crate::family::string_enum;
use crate::value::FloatProvider;

string_enum! {
	/// Where along an axis a particle spawns relative to the entity.
	pub enum PositionType as "particle position type" {
		EntityPosition = "entity_position",
		InBoundingBox = "in_bounding_box",
	}
}

/// Spawn position along one axis. Defaults are omitted on write.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSource {
	pub kind: PositionType,
	pub offset: f32,
	pub scale: f32,
}

impl PositionSource {
	pub fn new(kind: PositionType) -> Self {
		Self {
			kind,
			offset: 0.0,
			scale: 1.0,
		}
	}

	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("type", &enum_str::<PositionType>(), &v.kind)?;
				w.default("offset", &FLOAT, &v.offset, &0.0)?;
				w.default("scale", &FLOAT, &v.scale, &1.0)
			},
			|r| {
				Ok(Self {
					kind: r.field("type", &enum_str::<PositionType>())?,
					offset: r.default("offset", &FLOAT, 0.0)?,
					scale: r.default("scale", &FLOAT, 1.0)?,
				})
			},
		)
	}
}

/// Spawn velocity along one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VelocitySource {
	pub base: Option<FloatProvider>,
	pub movement_scale: f32,
}

impl VelocitySource {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("base", &FloatProvider::codec().optional(), &v.base)?;
				w.field("movement_scale", &FLOAT.default_value(0.0), &v.movement_scale)
			},
			|r| {
				Ok(Self {
					base: r.field("base", &FloatProvider::codec().optional())?,
					movement_scale: r.field("movement_scale", &FLOAT.default_value(0.0))?,
				})
			},
		)
	}
}
