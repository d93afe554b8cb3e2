use cobble_nbt::Tag;
use cobble_registry::{BasicType, Identifier, ObjectSet};

use crate::{Codec, CodecError, Context, IDENTIFIER, Result};

/// Codec for an [`ObjectSet`] over one [`BasicType`].
///
/// | Tag | Set |
/// |---|---|
/// | `"ns:id"` | one entry |
/// | `"#ns:tag"` | tag reference |
/// | `["a", "b"]` | entries, `[]` is empty |
///
/// Tag references are stored unresolved; membership is answered by the
/// catalog when asked.
#[derive(Debug, Clone, Copy)]
pub struct ObjectSetCodec {
	basic_type: BasicType,
}

impl ObjectSetCodec {
	pub fn new(basic_type: BasicType) -> Self {
		Self { basic_type }
	}

	pub fn basic_type(&self) -> BasicType {
		self.basic_type
	}
}

/// Shorthand for [`ObjectSetCodec::new`].
pub fn object_set(basic_type: BasicType) -> ObjectSetCodec {
	ObjectSetCodec::new(basic_type)
}

impl Codec<ObjectSet> for ObjectSetCodec {
	fn write(&self, _: &Context, value: &ObjectSet) -> Result<Tag> {
		Ok(match value {
			ObjectSet::Empty => Tag::List(Vec::new()),
			ObjectSet::Entries(entries) => match entries.first() {
				Some(only) if entries.len() == 1 => Tag::string(only.as_str()),
				_ => Tag::List(entries.iter().map(|id| Tag::string(id.as_str())).collect()),
			},
			ObjectSet::Tag { basic_type, tag } => {
				if *basic_type != self.basic_type {
					return Err(CodecError::invalid(format!(
						"tag #{tag} is over {basic_type:?}, expected {:?}",
						self.basic_type
					)));
				}
				Tag::String(format!("#{tag}"))
			}
		})
	}

	fn read(&self, cx: &Context, tag: &Tag) -> Result<ObjectSet> {
		match tag {
			Tag::String(s) => match s.strip_prefix('#') {
				Some(name) => Identifier::parse(name)
					.map(|id| ObjectSet::tag(self.basic_type, id))
					.map_err(|e| CodecError::invalid(e.to_string())),
				None => Ok(ObjectSet::of([IDENTIFIER.read(cx, tag)?])),
			},
			Tag::List(items) => items
				.iter()
				.enumerate()
				.map(|(i, item)| IDENTIFIER.read(cx, item).map_err(|e| e.at_index(i)))
				.collect::<Result<Vec<_>>>()
				.map(ObjectSet::of),
			other => Err(CodecError::type_mismatch("string or list", other)),
		}
	}
}
