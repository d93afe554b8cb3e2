use cobble_codec::{Codec, CodecError, Context, IDENTIFIER, Result};
use cobble_nbt::{Compound, Tag};
use cobble_registry::Identifier;

/// A particle type with its options.
///
/// Options are kept as an untyped compound: per-particle option schemas are
/// not modelled, so they pass through unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
	pub id: Identifier,
	pub options: Compound,
}

impl Particle {
	pub fn new(id: Identifier) -> Self {
		Self {
			id,
			options: Compound::new(),
		}
	}

	/// `minecraft:effect`, the area effect cloud default.
	pub fn effect() -> Self {
		Self::new(Identifier::minecraft("effect"))
	}

	pub fn codec() -> ParticleCodec {
		ParticleCodec
	}
}

/// Reads a bare identifier or `{type, ...options}`; writes the bare form when
/// there are no options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParticleCodec;

impl Codec<Particle> for ParticleCodec {
	fn write(&self, _: &Context, value: &Particle) -> Result<Tag> {
		if value.options.is_empty() {
			return Ok(Tag::string(value.id.as_str()));
		}
		if value.options.contains_key("type") {
			return Err(CodecError::invalid("particle options may not contain a \"type\" key").at_field("type"));
		}
		let mut out = value.options.clone();
		out.insert_first("type", value.id.as_str());
		Ok(Tag::Compound(out))
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<Particle> {
		match tag {
			Tag::String(_) => IDENTIFIER.read(cx, tag).map(Particle::new),
			Tag::Compound(compound) => {
				let raw = compound.get("type").ok_or_else(|| CodecError::missing_field("type"))?;
				let id = IDENTIFIER.read(cx, raw).map_err(|e| e.at_field("type"))?;
				let mut options = compound.clone();
				options.remove("type");
				Ok(Particle { id, options })
			}
			other => Err(CodecError::type_mismatch("string or compound", other)),
		}
	}
}
