//! Enchantment entity effects.
//!
//! # Role
//!
//! [`EntityEffect`] is an open family: the built-in variants below are
//! registered under `minecraft:` by [`EntityEffect::create_default_registry`],
//! and the registry in the decoding [`cobble_codec::Context`] decides which
//! discriminators are accepted.
//!
//! # Invariants
//!
//! - Every built-in variant round-trips through its registered identifier.
//! - [`AllOf`] nests the family in itself; order of the inner effects is kept.

mod effects;
mod particles;

use cobble_codec::{TaggedUnionCodec, tagged_union};

pub use effects::{
	AllOf, ApplyMobEffect, BlockInteraction, DamageEntity, DamageItem, Explode, Ignite, PlaySound, ReplaceBlock, ReplaceDisk,
	RunFunction, SetBlockProperties, SpawnParticles, SummonEntity,
};
pub use particles::{PositionSource, PositionType, VelocitySource};

use crate::family::tagged_family;

tagged_family! {
	/// An effect applied to an entity by an enchantment.
	pub enum EntityEffect in "minecraft:enchantment_entity_effect_type" {
		"all_of" => AllOf(AllOf) = AllOf::codec(),
		"apply_mob_effect" => ApplyMobEffect(ApplyMobEffect) = ApplyMobEffect::codec(),
		"damage_entity" => DamageEntity(DamageEntity) = DamageEntity::codec(),
		"damage_item" => DamageItem(DamageItem) = DamageItem::codec(),
		"explode" => Explode(Explode) = Explode::codec(),
		"ignite" => Ignite(Ignite) = Ignite::codec(),
		"play_sound" => PlaySound(PlaySound) = PlaySound::codec(),
		"replace_block" => ReplaceBlock(ReplaceBlock) = ReplaceBlock::codec(),
		"replace_disk" => ReplaceDisk(ReplaceDisk) = ReplaceDisk::codec(),
		"run_function" => RunFunction(RunFunction) = RunFunction::codec(),
		"set_block_properties" => SetBlockProperties(SetBlockProperties) = SetBlockProperties::codec(),
		"spawn_particles" => SpawnParticles(SpawnParticles) = SpawnParticles::codec(),
		"summon_entity" => SummonEntity(SummonEntity) = SummonEntity::codec(),
	}
}

impl EntityEffect {
	pub fn codec() -> TaggedUnionCodec<Self> {
		tagged_union()
	}

	/// Nesting depth of [`AllOf`] wrappers; a leaf effect has depth 1.
	pub fn depth(&self) -> usize {
		match self {
			Self::AllOf(all) => 1 + all.effects.iter().map(Self::depth).max().unwrap_or(0),
			_ => 1,
		}
	}
}
