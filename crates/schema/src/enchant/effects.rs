//! Payloads of the built-in entity effects.

use cobble_codec::{BOOL, Codec, CodecExt, IDENTIFIER, STRING, enum_str, object, object_set, registry_key};
use cobble_registry::{BasicType, Identifier, ObjectSet, RegistryKey};

use super::EntityEffect;
use super::particles::{PositionSource, VelocitySource};
use crate::block::{BlockPos, BlockPredicate, BlockStateProvider, ItemBlockState};
use crate::damage::DamageType;
use crate::family::string_enum;
use crate::particle::Particle;
use crate::sound::SoundEvent;
use crate::value::{FloatProvider, LevelBasedValue, NumberRange};

/// Runs every effect in order.
#[derive(Debug, Clone, PartialEq)]
pub struct AllOf {
	pub effects: Vec<EntityEffect>,
}

impl AllOf {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| w.field("effects", &EntityEffect::codec().list(), &v.effects),
			|r| {
				Ok(Self {
					effects: r.field("effects", &EntityEffect::codec().list())?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApplyMobEffect {
	pub to_apply: ObjectSet,
	pub min_duration: LevelBasedValue,
	pub max_duration: LevelBasedValue,
	pub min_amplifier: LevelBasedValue,
	pub max_amplifier: LevelBasedValue,
}

impl ApplyMobEffect {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("to_apply", &object_set(BasicType::PotionEffects), &v.to_apply)?;
				w.field("min_duration", &LevelBasedValue::codec(), &v.min_duration)?;
				w.field("max_duration", &LevelBasedValue::codec(), &v.max_duration)?;
				w.field("min_amplifier", &LevelBasedValue::codec(), &v.min_amplifier)?;
				w.field("max_amplifier", &LevelBasedValue::codec(), &v.max_amplifier)
			},
			|r| {
				Ok(Self {
					to_apply: r.field("to_apply", &object_set(BasicType::PotionEffects))?,
					min_duration: r.field("min_duration", &LevelBasedValue::codec())?,
					max_duration: r.field("max_duration", &LevelBasedValue::codec())?,
					min_amplifier: r.field("min_amplifier", &LevelBasedValue::codec())?,
					max_amplifier: r.field("max_amplifier", &LevelBasedValue::codec())?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct DamageEntity {
	pub damage_type: RegistryKey<DamageType>,
	pub min_damage: LevelBasedValue,
	pub max_damage: LevelBasedValue,
}

impl DamageEntity {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("damage_type", &registry_key::<DamageType>(), &v.damage_type)?;
				w.field("min_damage", &LevelBasedValue::codec(), &v.min_damage)?;
				w.field("max_damage", &LevelBasedValue::codec(), &v.max_damage)
			},
			|r| {
				Ok(Self {
					damage_type: r.field("damage_type", &registry_key::<DamageType>())?,
					min_damage: r.field("min_damage", &LevelBasedValue::codec())?,
					max_damage: r.field("max_damage", &LevelBasedValue::codec())?,
				})
			},
		)
	}
}

/// Damages the enchanted item.
#[derive(Debug, Clone, PartialEq)]
pub struct DamageItem {
	pub amount: LevelBasedValue,
}

impl DamageItem {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| w.field("amount", &LevelBasedValue::codec(), &v.amount),
			|r| {
				Ok(Self {
					amount: r.field("amount", &LevelBasedValue::codec())?,
				})
			},
		)
	}
}

string_enum! {
	/// How an explosion treats blocks.
	pub enum BlockInteraction as "block interaction" {
		None = "none",
		Block = "block",
		Mob = "mob",
		Tnt = "tnt",
		Trigger = "trigger",
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Explode {
	pub attribute_to_user: bool,
	pub damage_type: Option<RegistryKey<DamageType>>,
	pub immune_blocks: Option<ObjectSet>,
	pub knockback_multiplier: Option<LevelBasedValue>,
	pub offset: Option<BlockPos>,
	pub radius: LevelBasedValue,
	pub create_fire: bool,
	pub block_interaction: BlockInteraction,
	pub small_particle: Particle,
	pub large_particle: Particle,
	pub sound: SoundEvent,
}

impl Explode {
	/// The two flags are always written and read as `false` when missing.
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("attribute_to_user", &BOOL, &v.attribute_to_user)?;
				w.optional("damage_type", &registry_key::<DamageType>(), &v.damage_type)?;
				w.optional("immune_blocks", &object_set(BasicType::Blocks), &v.immune_blocks)?;
				w.optional("knockback_multiplier", &LevelBasedValue::codec(), &v.knockback_multiplier)?;
				w.optional("offset", &BlockPos::codec(), &v.offset)?;
				w.field("radius", &LevelBasedValue::codec(), &v.radius)?;
				w.field("create_fire", &BOOL, &v.create_fire)?;
				w.field("block_interaction", &enum_str::<BlockInteraction>(), &v.block_interaction)?;
				w.field("small_particle", &Particle::codec(), &v.small_particle)?;
				w.field("large_particle", &Particle::codec(), &v.large_particle)?;
				w.field("sound", &SoundEvent::codec(), &v.sound)
			},
			|r| {
				Ok(Self {
					attribute_to_user: r.default("attribute_to_user", &BOOL, false)?,
					damage_type: r.optional("damage_type", &registry_key::<DamageType>())?,
					immune_blocks: r.optional("immune_blocks", &object_set(BasicType::Blocks))?,
					knockback_multiplier: r.optional("knockback_multiplier", &LevelBasedValue::codec())?,
					offset: r.optional("offset", &BlockPos::codec())?,
					radius: r.field("radius", &LevelBasedValue::codec())?,
					create_fire: r.default("create_fire", &BOOL, false)?,
					block_interaction: r.field("block_interaction", &enum_str::<BlockInteraction>())?,
					small_particle: r.field("small_particle", &Particle::codec())?,
					large_particle: r.field("large_particle", &Particle::codec())?,
					sound: r.field("sound", &SoundEvent::codec())?,
				})
			},
		)
	}
}

/// Sets the target on fire for a level-dependent number of seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct Ignite {
	pub duration: NumberRange,
}

impl Ignite {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| w.field("duration", &NumberRange::codec(), &v.duration),
			|r| {
				Ok(Self {
					duration: r.field("duration", &NumberRange::codec())?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaySound {
	pub sound: SoundEvent,
	pub volume: FloatProvider,
	pub pitch: FloatProvider,
}

impl PlaySound {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("sound", &SoundEvent::codec(), &v.sound)?;
				w.field("volume", &FloatProvider::codec(), &v.volume)?;
				w.field("pitch", &FloatProvider::codec(), &v.pitch)
			},
			|r| {
				Ok(Self {
					sound: r.field("sound", &SoundEvent::codec())?,
					volume: r.field("volume", &FloatProvider::codec())?,
					pitch: r.field("pitch", &FloatProvider::codec())?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceBlock {
	pub block_state: BlockStateProvider,
	pub offset: Option<BlockPos>,
	pub predicate: Option<BlockPredicate>,
	pub trigger_game_event: Option<Identifier>,
}

impl ReplaceBlock {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("block_state", &BlockStateProvider::codec(), &v.block_state)?;
				w.optional("offset", &BlockPos::codec(), &v.offset)?;
				w.optional("predicate", &BlockPredicate::codec(), &v.predicate)?;
				w.optional("trigger_game_event", &IDENTIFIER, &v.trigger_game_event)
			},
			|r| {
				Ok(Self {
					block_state: r.field("block_state", &BlockStateProvider::codec())?,
					offset: r.optional("offset", &BlockPos::codec())?,
					predicate: r.optional("predicate", &BlockPredicate::codec())?,
					trigger_game_event: r.optional("trigger_game_event", &IDENTIFIER)?,
				})
			},
		)
	}
}

/// Replaces blocks in a disk around the target.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceDisk {
	pub block_state: BlockStateProvider,
	pub radius: LevelBasedValue,
	pub height: LevelBasedValue,
	pub offset: Option<BlockPos>,
	pub predicate: Option<BlockPredicate>,
	pub trigger_game_event: Option<Identifier>,
}

impl ReplaceDisk {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("block_state", &BlockStateProvider::codec(), &v.block_state)?;
				w.field("radius", &LevelBasedValue::codec(), &v.radius)?;
				w.field("height", &LevelBasedValue::codec(), &v.height)?;
				w.optional("offset", &BlockPos::codec(), &v.offset)?;
				w.optional("predicate", &BlockPredicate::codec(), &v.predicate)?;
				w.optional("trigger_game_event", &IDENTIFIER, &v.trigger_game_event)
			},
			|r| {
				Ok(Self {
					block_state: r.field("block_state", &BlockStateProvider::codec())?,
					radius: r.field("radius", &LevelBasedValue::codec())?,
					height: r.field("height", &LevelBasedValue::codec())?,
					offset: r.optional("offset", &BlockPos::codec())?,
					predicate: r.optional("predicate", &BlockPredicate::codec())?,
					trigger_game_event: r.optional("trigger_game_event", &IDENTIFIER)?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunFunction {
	pub function: String,
}

impl RunFunction {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| w.field("function", &STRING, &v.function),
			|r| {
				Ok(Self {
					function: r.field("function", &STRING)?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetBlockProperties {
	pub properties: ItemBlockState,
	pub offset: Option<BlockPos>,
	pub trigger_game_event: Option<Identifier>,
}

impl SetBlockProperties {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("properties", &ItemBlockState::codec(), &v.properties)?;
				w.optional("offset", &BlockPos::codec(), &v.offset)?;
				w.optional("trigger_game_event", &IDENTIFIER, &v.trigger_game_event)
			},
			|r| {
				Ok(Self {
					properties: r.field("properties", &ItemBlockState::codec())?,
					offset: r.optional("offset", &BlockPos::codec())?,
					trigger_game_event: r.optional("trigger_game_event", &IDENTIFIER)?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnParticles {
	pub particle: Particle,
	pub horizontal_position: PositionSource,
	pub vertical_position: PositionSource,
	pub horizontal_velocity: VelocitySource,
	pub vertical_velocity: VelocitySource,
	pub speed: Option<FloatProvider>,
}

impl SpawnParticles {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("particle", &Particle::codec(), &v.particle)?;
				w.field("horizontal_position", &PositionSource::codec(), &v.horizontal_position)?;
				w.field("vertical_position", &PositionSource::codec(), &v.vertical_position)?;
				w.field("horizontal_velocity", &VelocitySource::codec(), &v.horizontal_velocity)?;
				w.field("vertical_velocity", &VelocitySource::codec(), &v.vertical_velocity)?;
				w.optional("speed", &FloatProvider::codec(), &v.speed)
			},
			|r| {
				Ok(Self {
					particle: r.field("particle", &Particle::codec())?,
					horizontal_position: r.field("horizontal_position", &PositionSource::codec())?,
					vertical_position: r.field("vertical_position", &PositionSource::codec())?,
					horizontal_velocity: r.field("horizontal_velocity", &VelocitySource::codec())?,
					vertical_velocity: r.field("vertical_velocity", &VelocitySource::codec())?,
					speed: r.optional("speed", &FloatProvider::codec())?,
				})
			},
		)
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummonEntity {
	pub entity: ObjectSet,
	pub join_team: bool,
}

impl SummonEntity {
	pub fn codec() -> impl Codec<Self> {
		object(
			|w, v: &Self| {
				w.field("entity", &object_set(BasicType::EntityTypes), &v.entity)?;
				w.field("join_team", &BOOL, &v.join_team)
			},
			|r| {
				Ok(Self {
					entity: r.field("entity", &object_set(BasicType::EntityTypes))?,
					join_team: r.default("join_team", &BOOL, false)?,
				})
			},
		)
	}
}
