//! Damage types, the first registry every reload builds.
//!
//! Effect payloads refer to damage types by [`RegistryKey`], so damage types
//! from content packs must be in place before any effect is decoded.

use cobble_codec::{Codec, CodecExt, FLOAT, STRING, enum_str, object};
use cobble_registry::{DataPack, Identifier, RegistryBuilder, RegistryError, RegistryKey};

use crate::family::string_enum;

string_enum! {
	/// Whether the damage scales with world difficulty.
	pub enum DamageScaling as "damage scaling" {
		Never = "never",
		WhenCausedByLivingNonPlayer = "when_caused_by_living_non_player",
		Always = "always",
	}
}

string_enum! {
	/// Sound and feedback played when the damage lands.
	pub enum DamageEffects as "damage effects" {
		Hurt = "hurt",
		Thorns = "thorns",
		Drowning = "drowning",
		Burning = "burning",
		Poking = "poking",
		Freezing = "freezing",
	}
}

string_enum! {
	pub enum DeathMessageType as "death message type" {
		Default = "default",
		FallVariants = "fall_variants",
		IntentionalGameDesign = "intentional_game_design",
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct DamageType {
	pub message_id: String,
	pub scaling: DamageScaling,
	pub exhaustion: f32,
	pub effects: DamageEffects,
	pub death_message_type: DeathMessageType,
}

impl DamageType {
	pub const FAMILY: &'static str = "minecraft:damage_type";

	pub fn new(message_id: impl Into<String>, scaling: DamageScaling, exhaustion: f32) -> Self {
		Self {
			message_id: message_id.into(),
			scaling,
			exhaustion,
			effects: DamageEffects::Hurt,
			death_message_type: DeathMessageType::Default,
		}
	}

	pub fn with_effects(mut self, effects: DamageEffects) -> Self {
		self.effects = effects;
		self
	}

	pub fn with_death_message_type(mut self, death_message_type: DeathMessageType) -> Self {
		self.death_message_type = death_message_type;
		self
	}

	/// Key of a built-in damage type.
	pub fn minecraft(path: &str) -> RegistryKey<DamageType> {
		RegistryKey::new(Identifier::minecraft(path))
	}

	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("message_id", &STRING, &v.message_id)?;
				w.field("scaling", &enum_str::<DamageScaling>(), &v.scaling)?;
				w.field("exhaustion", &FLOAT, &v.exhaustion)?;
				w.field("effects", &enum_str::<DamageEffects>().default_value(DamageEffects::Hurt), &v.effects)?;
				w.field(
					"death_message_type",
					&enum_str::<DeathMessageType>().default_value(DeathMessageType::Default),
					&v.death_message_type,
				)
			},
			|r| {
				Ok(Self {
					message_id: r.field("message_id", &STRING)?,
					scaling: r.field("scaling", &enum_str::<DamageScaling>())?,
					exhaustion: r.field("exhaustion", &FLOAT)?,
					effects: r.field("effects", &enum_str::<DamageEffects>().default_value(DamageEffects::Hurt))?,
					death_message_type: r.field("death_message_type", &enum_str::<DeathMessageType>().default_value(DeathMessageType::Default))?,
				})
			},
		)
	}

	/// Fresh builder holding the built-in damage types.
	pub fn create_default_registry() -> Result<RegistryBuilder<DamageType>, RegistryError> {
		use DamageScaling::{Always, WhenCausedByLivingNonPlayer as Living};

		let builtin = [
			("arrow", Self::new("arrow", Living, 0.1)),
			("cactus", Self::new("cactus", Living, 0.1)),
			("drown", Self::new("drown", Living, 0.0).with_effects(DamageEffects::Drowning)),
			("explosion", Self::new("explosion", Always, 0.1)),
			(
				"fall",
				Self::new("fall", Living, 0.0).with_death_message_type(DeathMessageType::FallVariants),
			),
			("generic", Self::new("generic", Living, 0.0)),
			("in_fire", Self::new("inFire", Living, 0.1).with_effects(DamageEffects::Burning)),
			("lava", Self::new("lava", Living, 0.1).with_effects(DamageEffects::Burning)),
			("magic", Self::new("magic", Living, 0.0)),
			("mob_attack", Self::new("mob", Living, 0.1)),
			("on_fire", Self::new("onFire", Living, 0.0).with_effects(DamageEffects::Burning)),
			("out_of_world", Self::new("outOfWorld", Living, 0.0)),
			("player_attack", Self::new("player", Living, 0.1)),
			("player_explosion", Self::new("explosion.player", Always, 0.1)),
			("thorns", Self::new("thorns", Living, 0.1).with_effects(DamageEffects::Thorns)),
			("freeze", Self::new("freeze", Living, 0.0).with_effects(DamageEffects::Freezing)),
			("wither", Self::new("wither", Living, 0.0)),
		];

		let mut builder = RegistryBuilder::new(Self::FAMILY);
		for (path, value) in builtin {
			builder.register(Identifier::minecraft(path), value, DataPack::MinecraftCore)?;
		}
		Ok(builder)
	}
}
