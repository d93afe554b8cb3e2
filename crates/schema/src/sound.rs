use cobble_codec::{Codec, CodecError, CompoundReader, Context, FLOAT, IDENTIFIER, Result};
use cobble_nbt::{Compound, Tag};
use cobble_registry::Identifier;

/// A sound reference, optionally with a fixed audible range.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundEvent {
	pub sound_id: Identifier,
	pub range: Option<f32>,
}

impl SoundEvent {
	pub fn new(sound_id: Identifier) -> Self {
		Self { sound_id, range: None }
	}

	pub fn with_range(sound_id: Identifier, range: f32) -> Self {
		Self {
			sound_id,
			range: Some(range),
		}
	}

	pub fn codec() -> SoundEventCodec {
		SoundEventCodec
	}
}

/// Writes a bare identifier when there is no range, `{sound_id, range}` otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct SoundEventCodec;

impl Codec<SoundEvent> for SoundEventCodec {
	fn write(&self, _: &Context, value: &SoundEvent) -> Result<Tag> {
		Ok(match value.range {
			None => Tag::string(value.sound_id.as_str()),
			Some(range) => Tag::Compound(
				Compound::new()
					.with("sound_id", value.sound_id.as_str())
					.with("range", range),
			),
		})
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<SoundEvent> {
		match tag {
			Tag::String(_) => IDENTIFIER.read(cx, tag).map(SoundEvent::new),
			Tag::Compound(compound) => {
				let r = CompoundReader::new(cx, compound);
				Ok(SoundEvent {
					sound_id: r.field("sound_id", &IDENTIFIER)?,
					range: r.optional("range", &FLOAT)?,
				})
			}
			other => Err(CodecError::type_mismatch("string or compound", other)),
		}
	}
}
