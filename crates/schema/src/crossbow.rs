use cobble_codec::{Codec, CodecExt, object, object_set};
use cobble_registry::{BasicType, ObjectSet};

/// Sounds played while a crossbow charges, one set per stage.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CrossbowChargingSounds {
	pub start: Option<ObjectSet>,
	pub mid: Option<ObjectSet>,
	pub end: Option<ObjectSet>,
}

impl CrossbowChargingSounds {
	pub fn codec() -> impl Codec<Self> {
		let sounds = || object_set(BasicType::SoundEvents).optional();
		object(
			move |w, v: &Self| {
				w.field("start", &sounds(), &v.start)?;
				w.field("mid", &sounds(), &v.mid)?;
				w.field("end", &sounds(), &v.end)
			},
			move |r| {
				Ok(Self {
					start: r.field("start", &sounds())?,
					mid: r.field("mid", &sounds())?,
					end: r.field("end", &sounds())?,
				})
			},
		)
	}
}
