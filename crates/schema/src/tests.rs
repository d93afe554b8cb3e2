use std::fs;
use std::path::Path;
use std::sync::Arc;

use cobble_codec::{Codec, CodecError, Context, ErrorKind, PathSegment, TaggedVariant};
use cobble_nbt::{Compound, Tag};
use cobble_registry::{
	ActiveRegistries, BasicType, DataPack, DuplicatePolicy, Identifier, ObjectSet, RegistryError, RegistryKey, TagCatalog,
	TagEntry,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::block::{BlockPos, BlockPredicate, BlockStateProvider, ItemBlockState};
use crate::crossbow::CrossbowChargingSounds;
use crate::damage::{DamageEffects, DamageScaling, DamageType};
use crate::enchant::*;
use crate::loader::{LoadError, LoaderConfig, PackContents, PackLoader, RecordFailure, RecordKind};
use crate::metadata::{AreaEffectCloudMeta, Metadata, MetadataValue};
use crate::particle::Particle;
use crate::sound::SoundEvent;
use crate::value::*;
use crate::{default_context, default_registries};

fn cx() -> Context {
	default_context().unwrap()
}

fn mc(path: &str) -> Identifier {
	Identifier::minecraft(path)
}

fn id(s: &str) -> Identifier {
	Identifier::parse(s).unwrap()
}

fn compound(tag: &Tag) -> &Compound {
	tag.as_compound().expect("compound")
}

fn json(cx: &Context, codec: &impl Codec<EntityEffect>, source: &str) -> Result<EntityEffect, CodecError> {
	let value: serde_json::Value = serde_json::from_str(source).unwrap();
	codec.read(cx, &Tag::from_json(&value).unwrap())
}

fn ignite(level: f32) -> EntityEffect {
	EntityEffect::Ignite(Ignite {
		duration: NumberRange::exactly(level),
	})
}

fn one_of_each() -> Vec<EntityEffect> {
	let linear = LevelBasedValue::Linear(Linear {
		base: 2.0,
		per_level_above_first: 0.5,
	});
	let block_state = BlockStateProvider(
		Compound::new()
			.with("type", "minecraft:simple_state_provider")
			.with("state", Compound::new().with("Name", "minecraft:stone")),
	);
	let predicate = BlockPredicate(Compound::new().with("type", "minecraft:solid"));
	vec![
		EntityEffect::AllOf(AllOf {
			effects: vec![ignite(3.0)],
		}),
		EntityEffect::ApplyMobEffect(ApplyMobEffect {
			to_apply: ObjectSet::of([mc("speed"), mc("haste")]),
			min_duration: LevelBasedValue::Constant(5.0),
			max_duration: linear.clone(),
			min_amplifier: LevelBasedValue::Constant(0.0),
			max_amplifier: LevelBasedValue::LevelsSquared(LevelsSquared { added: 1.0 }),
		}),
		EntityEffect::DamageEntity(DamageEntity {
			damage_type: DamageType::minecraft("magic"),
			min_damage: LevelBasedValue::Constant(1.0),
			max_damage: linear.clone(),
		}),
		EntityEffect::DamageItem(DamageItem {
			amount: LevelBasedValue::Constant(1.0),
		}),
		EntityEffect::Explode(Explode {
			attribute_to_user: true,
			damage_type: Some(DamageType::minecraft("explosion")),
			immune_blocks: Some(ObjectSet::tag(BasicType::Blocks, mc("blocks_wind_charge_explosions"))),
			knockback_multiplier: Some(LevelBasedValue::Constant(1.5)),
			offset: Some(BlockPos::new(0, 1, 0)),
			radius: linear.clone(),
			create_fire: false,
			block_interaction: BlockInteraction::Tnt,
			small_particle: Particle::new(mc("gust_emitter_small")),
			large_particle: Particle {
				id: mc("dust"),
				options: Compound::new().with("scale", 2.0f32),
			},
			sound: SoundEvent::with_range(mc("entity.wind_charge.wind_burst"), 16.0),
		}),
		ignite(4.0),
		EntityEffect::PlaySound(PlaySound {
			sound: SoundEvent::new(mc("item.trident.thunder")),
			volume: FloatProvider::Constant(5.0),
			pitch: FloatProvider::Uniform {
				min_inclusive: 0.8,
				max_exclusive: 1.2,
			},
		}),
		EntityEffect::ReplaceBlock(ReplaceBlock {
			block_state: block_state.clone(),
			offset: Some(BlockPos::new(0, -1, 0)),
			predicate: Some(predicate.clone()),
			trigger_game_event: Some(mc("block_place")),
		}),
		EntityEffect::ReplaceDisk(ReplaceDisk {
			block_state,
			radius: linear.clone(),
			height: LevelBasedValue::Constant(1.0),
			offset: None,
			predicate: Some(predicate),
			trigger_game_event: None,
		}),
		EntityEffect::RunFunction(RunFunction {
			function: "demo:on_hit".into(),
		}),
		EntityEffect::SetBlockProperties(SetBlockProperties {
			properties: ItemBlockState::default().with("lit", "true"),
			offset: None,
			trigger_game_event: Some(mc("block_change")),
		}),
		EntityEffect::SpawnParticles(SpawnParticles {
			particle: Particle::new(mc("flame")),
			horizontal_position: PositionSource {
				kind: PositionType::InBoundingBox,
				offset: 0.0,
				scale: 2.0,
			},
			vertical_position: PositionSource::new(PositionType::EntityPosition),
			horizontal_velocity: VelocitySource {
				base: Some(FloatProvider::Trapezoid {
					min: 0.0,
					max: 1.0,
					plateau: 0.5,
				}),
				movement_scale: 0.0,
			},
			vertical_velocity: VelocitySource {
				base: None,
				movement_scale: 1.0,
			},
			speed: Some(FloatProvider::ClampedNormal {
				mean: 0.0,
				deviation: 1.0,
				min: -1.0,
				max: 1.0,
			}),
		}),
		EntityEffect::SummonEntity(SummonEntity {
			entity: ObjectSet::of([mc("lightning_bolt")]),
			join_team: true,
		}),
	]
}

#[test]
fn test_ignite_encodes_to_the_exact_compound() {
	let cx = cx();
	let tag = EntityEffect::codec().write(&cx, &ignite(1.0)).unwrap();

	let expected = Tag::Compound(
		Compound::new()
			.with("type", "minecraft:ignite")
			.with("duration", Compound::new().with("min", 1.0f32).with("max", 1.0f32)),
	);
	assert_eq!(tag, expected);
	assert_eq!(compound(&tag).keys().next(), Some("type"));
	assert_eq!(EntityEffect::codec().read(&cx, &expected).unwrap(), ignite(1.0));
}

#[test]
fn test_all_of_keeps_inner_order() {
	let cx = cx();
	let damage = EntityEffect::DamageItem(DamageItem {
		amount: LevelBasedValue::Constant(2.0),
	});
	let value = EntityEffect::AllOf(AllOf {
		effects: vec![ignite(1.0), damage.clone()],
	});

	let tag = EntityEffect::codec().write(&cx, &value).unwrap();
	let root = compound(&tag);
	assert_eq!(root.get_str("type"), Some("minecraft:all_of"));
	let types: Vec<_> = root
		.get("effects")
		.and_then(Tag::as_list)
		.unwrap()
		.iter()
		.map(|e| compound(e).get_str("type").unwrap())
		.collect();
	assert_eq!(types, ["minecraft:ignite", "minecraft:damage_item"]);

	let EntityEffect::AllOf(back) = EntityEffect::codec().read(&cx, &tag).unwrap() else {
		panic!("expected all_of");
	};
	assert_eq!(back.effects, vec![ignite(1.0), damage]);
}

#[test]
fn test_every_builtin_effect_round_trips() {
	let cx = cx();
	let codec = EntityEffect::codec();
	let samples = one_of_each();
	assert_eq!(samples.len(), EntityEffect::BUILTIN.len());

	for (effect, path) in samples.iter().zip(EntityEffect::BUILTIN) {
		assert_eq!(effect.builtin_name(), *path);
		assert_eq!(codec.variant_id(&cx, effect).unwrap(), mc(path));
		let tag = codec.write(&cx, effect).unwrap();
		assert_eq!(compound(&tag).get_str("type"), Some(mc(path).as_str()));
		assert_eq!(&codec.read(&cx, &tag).unwrap(), effect, "{path}");
	}
}

#[test]
fn test_default_registry_holds_every_builtin() {
	let registry = EntityEffect::create_default_registry().unwrap().freeze();
	assert_eq!(registry.family(), EntityEffect::FAMILY);
	assert_eq!(registry.len(), 13);
	for path in EntityEffect::BUILTIN {
		assert!(registry.contains(&mc(path)), "{path}");
		assert_eq!(registry.pack_of(&registry.key(&mc(path)).unwrap()), Some(&DataPack::MinecraftCore));
	}
}

#[test]
fn test_variant_codecs_are_shared_instances() {
	let a = ignite(1.0).variant_codec();
	let b = ignite(2.0).variant_codec();
	assert!(a.same(&b));
	assert!(!a.same(&one_of_each()[0].variant_codec()));
}

#[test]
fn test_unknown_effect_type_names_identifier_and_family() {
	let err = json(&cx(), &EntityEffect::codec(), r#"{"type": "minecraft:does_not_exist"}"#).unwrap_err();
	assert!(err.is_unknown_identifier());
	assert_eq!(
		err.kind(),
		&ErrorKind::UnknownIdentifier {
			id: "minecraft:does_not_exist".into(),
			family: EntityEffect::FAMILY,
		}
	);
	assert_eq!(err.path(), [PathSegment::Field("type".into())]);
}

#[test]
fn test_nested_errors_carry_the_full_path() {
	let cx = cx();
	let err = json(
		&cx,
		&EntityEffect::codec(),
		r#"{"type": "all_of", "effects": [{"type": "ignite", "duration": {"min": 1, "max": 1}}, {"type": "nope"}]}"#,
	)
	.unwrap_err();
	assert_eq!(
		err.path(),
		[
			PathSegment::Field("effects".into()),
			PathSegment::Index(1),
			PathSegment::Field("type".into())
		]
	);

	let err = json(&cx, &EntityEffect::codec(), r#"{"type": "ignite", "duration": {"min": "soon", "max": 1}}"#).unwrap_err();
	assert!(err.is_structural());
	assert_eq!(err.to_string(), "duration.min: expected number or compound, found string");
}

#[test]
fn test_missing_discriminator_is_structural() {
	let err = json(&cx(), &EntityEffect::codec(), r#"{"amount": 1}"#).unwrap_err();
	assert_eq!(err.kind(), &ErrorKind::MissingField { name: "type".into() });
}

#[test]
fn test_deep_nesting_round_trips() {
	let cx = cx();
	let mut effect = ignite(2.0);
	for _ in 0..4 {
		effect = EntityEffect::AllOf(AllOf {
			effects: vec![effect, ignite(1.0)],
		});
	}
	assert_eq!(effect.depth(), 5);
	let tag = EntityEffect::codec().write(&cx, &effect).unwrap();
	assert_eq!(EntityEffect::codec().read(&cx, &tag).unwrap(), effect);
}

#[test]
fn test_damage_entity_requires_a_registered_damage_type() {
	let err = json(
		&cx(),
		&EntityEffect::codec(),
		r#"{"type": "damage_entity", "damage_type": "demo:zap", "min_damage": 1, "max_damage": 2}"#,
	)
	.unwrap_err();
	assert_eq!(
		err.kind(),
		&ErrorKind::UnknownIdentifier {
			id: "demo:zap".into(),
			family: DamageType::FAMILY,
		}
	);
	assert_eq!(err.path(), [PathSegment::Field("damage_type".into())]);
}

#[test]
fn test_explode_writes_flags_and_omits_absent_options() {
	let cx = cx();
	let explode = EntityEffect::Explode(Explode {
		attribute_to_user: false,
		damage_type: None,
		immune_blocks: None,
		knockback_multiplier: None,
		offset: None,
		radius: LevelBasedValue::Constant(3.0),
		create_fire: false,
		block_interaction: BlockInteraction::None,
		small_particle: Particle::new(mc("explosion")),
		large_particle: Particle::new(mc("explosion_emitter")),
		sound: SoundEvent::new(mc("entity.generic.explode")),
	});
	let tag = EntityEffect::codec().write(&cx, &explode).unwrap();
	let root = compound(&tag);
	assert_eq!(root.get("attribute_to_user"), Some(&Tag::Byte(0)));
	assert_eq!(root.get("create_fire"), Some(&Tag::Byte(0)));
	assert_eq!(root.get("radius"), Some(&Tag::Float(3.0)));
	assert_eq!(root.get_str("block_interaction"), Some("none"));
	assert_eq!(root.get_str("sound"), Some("minecraft:entity.generic.explode"));
	for absent in ["damage_type", "immune_blocks", "knockback_multiplier", "offset"] {
		assert!(!root.contains_key(absent), "{absent}");
	}

	let mut trimmed = root.clone();
	trimmed.remove("attribute_to_user");
	trimmed.remove("create_fire");
	assert_eq!(EntityEffect::codec().read(&cx, &Tag::Compound(trimmed)).unwrap(), explode);
}

#[test]
fn test_explode_rejects_unknown_block_interaction() {
	let err = json(
		&cx(),
		&EntityEffect::codec(),
		r#"{"type": "explode", "radius": 1, "block_interaction": "shatter",
		    "small_particle": "explosion", "large_particle": "explosion", "sound": "boom"}"#,
	)
	.unwrap_err();
	assert_eq!(
		err.kind(),
		&ErrorKind::UnknownVariant {
			family: "block interaction",
			name: "shatter".into(),
		}
	);
}

#[test]
fn test_position_source_omits_defaults() {
	let cx = cx();
	let codec = PositionSource::codec();
	let tag = codec.write(&cx, &PositionSource::new(PositionType::EntityPosition)).unwrap();
	assert_eq!(tag, Tag::Compound(Compound::new().with("type", "entity_position")));

	let shifted = PositionSource {
		kind: PositionType::InBoundingBox,
		offset: 0.5,
		scale: 1.0,
	};
	let tag = codec.write(&cx, &shifted).unwrap();
	assert_eq!(compound(&tag).len(), 2);
	assert_eq!(codec.read(&cx, &tag).unwrap(), shifted);
}

#[test]
fn test_velocity_source_reads_empty_compound_as_defaults() {
	let cx = cx();
	let codec = VelocitySource::codec();
	let empty = Tag::Compound(Compound::new());
	assert_eq!(codec.read(&cx, &empty).unwrap(), VelocitySource::default());
	assert_eq!(codec.write(&cx, &VelocitySource::default()).unwrap(), empty);
}

#[test]
fn test_level_based_values_evaluate() {
	let linear = LevelBasedValue::Linear(Linear {
		base: 2.0,
		per_level_above_first: 3.0,
	});
	assert_eq!(linear.calc(1), 2.0);
	assert_eq!(linear.calc(3), 8.0);

	let clamped = LevelBasedValue::Clamped(Clamped {
		value: Box::new(linear.clone()),
		min: 3.0,
		max: 6.0,
	});
	assert_eq!(clamped.calc(1), 3.0);
	assert_eq!(clamped.calc(2), 5.0);
	assert_eq!(clamped.calc(5), 6.0);

	let fraction = LevelBasedValue::Fraction(Fraction {
		numerator: Box::new(LevelBasedValue::Constant(1.0)),
		denominator: Box::new(LevelBasedValue::Linear(Linear {
			base: 0.0,
			per_level_above_first: 2.0,
		})),
	});
	assert_eq!(fraction.calc(1), 0.0);
	assert_eq!(fraction.calc(2), 0.5);

	assert_eq!(LevelBasedValue::LevelsSquared(LevelsSquared { added: 1.0 }).calc(3), 10.0);

	let lookup = LevelBasedValue::Lookup(Lookup {
		values: vec![1.0, 2.0],
		fallback: Box::new(LevelBasedValue::Constant(9.0)),
	});
	assert_eq!(lookup.calc(2), 2.0);
	assert_eq!(lookup.calc(5), 9.0);
	assert_eq!(lookup.calc(0), 9.0);

	assert_eq!(NumberRange::exactly(4.0).bounds(7), (4.0, 4.0));
}

#[test]
fn test_level_based_values_accept_extreme_levels() {
	let linear = LevelBasedValue::Linear(Linear {
		base: 0.0,
		per_level_above_first: 1.0,
	});
	assert_eq!(linear.calc(i32::MIN), i32::MIN as f32);

	let lookup = LevelBasedValue::Lookup(Lookup {
		values: vec![1.0, 2.0],
		fallback: Box::new(LevelBasedValue::Constant(9.0)),
	});
	assert_eq!(lookup.calc(i32::MIN), 9.0);
	assert_eq!(lookup.calc(0), 9.0);
	assert_eq!(lookup.calc(2), 2.0);
	assert_eq!(lookup.calc(i32::MAX), 9.0);
}

#[test]
fn test_level_based_number_shorthand() {
	let cx = cx();
	let codec = LevelBasedValue::codec();
	assert_eq!(codec.read(&cx, &Tag::Int(3)).unwrap(), LevelBasedValue::Constant(3.0));
	assert_eq!(codec.write(&cx, &LevelBasedValue::Constant(3.0)).unwrap(), Tag::Float(3.0));

	let tagged = Tag::Compound(Compound::new().with("type", "minecraft:constant").with("value", 4.0f32));
	assert_eq!(codec.read(&cx, &tagged).unwrap(), LevelBasedValue::Constant(4.0));

	let err = codec.read(&cx, &Tag::string("three")).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::TypeMismatch { .. }));
}

#[test]
fn test_clamped_rejects_inverted_bounds() {
	let cx = cx();
	let tag = Tag::Compound(
		Compound::new()
			.with("type", "minecraft:clamped")
			.with("value", 1.0f32)
			.with("min", 5.0f32)
			.with("max", 2.0f32),
	);
	let err = LevelBasedValue::codec().read(&cx, &tag).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidValue(_)));
}

#[test]
fn test_float_provider_forms() {
	let cx = cx();
	let codec = FloatProvider::codec();
	assert_eq!(codec.read(&cx, &Tag::Double(2.5)).unwrap(), FloatProvider::Constant(2.5));
	assert_eq!(codec.write(&cx, &FloatProvider::Constant(2.5)).unwrap(), Tag::Float(2.5));

	let uniform = FloatProvider::Uniform {
		min_inclusive: 1.0,
		max_exclusive: 2.0,
	};
	let tag = codec.write(&cx, &uniform).unwrap();
	assert_eq!(
		tag,
		Tag::Compound(
			Compound::new()
				.with("type", "minecraft:uniform")
				.with("min_inclusive", 1.0f32)
				.with("max_exclusive", 2.0f32)
		)
	);
	assert_eq!(codec.read(&cx, &tag).unwrap(), uniform);
	assert_eq!((uniform.min_value(), uniform.max_value()), (1.0, 2.0));

	let constant = Tag::Compound(Compound::new().with("type", "constant").with("value", 3));
	assert_eq!(codec.read(&cx, &constant).unwrap(), FloatProvider::Constant(3.0));
}

#[test]
fn test_float_provider_validation() {
	let cx = cx();
	let codec = FloatProvider::codec();
	let read = |c: Compound| codec.read(&cx, &Tag::Compound(c));

	let inverted = Compound::new()
		.with("type", "uniform")
		.with("min_inclusive", 2.0f32)
		.with("max_exclusive", 2.0f32);
	assert!(matches!(read(inverted).unwrap_err().kind(), ErrorKind::InvalidValue(_)));

	let wide_plateau = Compound::new()
		.with("type", "trapezoid")
		.with("min", 0.0f32)
		.with("max", 1.0f32)
		.with("plateau", 2.0f32);
	assert!(read(wide_plateau).is_err());

	for bogus in ["minecraft:bogus", "demo:uniform"] {
		let err = read(Compound::new().with("type", bogus)).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::UnknownVariant { .. }), "{bogus}");
		assert_eq!(err.path(), [PathSegment::Field("type".into())]);
	}
}

#[test]
fn test_sound_event_forms() {
	let cx = cx();
	let codec = SoundEvent::codec();
	let plain = SoundEvent::new(mc("block.note_block.bell"));
	assert_eq!(codec.write(&cx, &plain).unwrap(), Tag::string("minecraft:block.note_block.bell"));
	assert_eq!(codec.read(&cx, &Tag::string("block.note_block.bell")).unwrap(), plain);

	let ranged = SoundEvent::with_range(mc("ambient.cave"), 8.0);
	let tag = codec.write(&cx, &ranged).unwrap();
	assert_eq!(compound(&tag).get_str("sound_id"), Some("minecraft:ambient.cave"));
	assert_eq!(codec.read(&cx, &tag).unwrap(), ranged);
}

#[test]
fn test_particle_forms() {
	let cx = cx();
	let codec = Particle::codec();
	assert_eq!(codec.write(&cx, &Particle::effect()).unwrap(), Tag::string("minecraft:effect"));

	let dust = Tag::Compound(Compound::new().with("type", "dust").with("scale", 1.5f32));
	let particle = codec.read(&cx, &dust).unwrap();
	assert_eq!(particle.id, mc("dust"));
	assert_eq!(particle.options, Compound::new().with("scale", 1.5f32));
	assert_eq!(compound(&codec.write(&cx, &particle).unwrap()).keys().next(), Some("type"));

	let clashing = Particle {
		id: mc("dust"),
		options: Compound::new().with("type", "minecraft:flame").with("scale", 1.0f32),
	};
	let err = codec.write(&cx, &clashing).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::InvalidValue(_)));
	assert_eq!(err.path(), [PathSegment::Field("type".into())]);
}

#[test]
fn test_block_values() {
	let cx = cx();
	let pos = BlockPos::new(1, -2, 3);
	let tag = BlockPos::codec().write(&cx, &pos).unwrap();
	assert_eq!(tag, Tag::IntArray(vec![1, -2, 3]));
	assert_eq!(BlockPos::codec().read(&cx, &tag).unwrap(), pos);

	let state = ItemBlockState::default().with("facing", "north").with("lit", "false");
	let tag = ItemBlockState::codec().write(&cx, &state).unwrap();
	assert_eq!(ItemBlockState::codec().read(&cx, &tag).unwrap(), state);

	let bad = Tag::Compound(Compound::new().with("level", 3));
	let err = ItemBlockState::codec().read(&cx, &bad).unwrap_err();
	assert_eq!(err.path(), [PathSegment::Field("level".into())]);
}

#[test]
fn test_damage_types() {
	let cx = cx();
	let registry = DamageType::create_default_registry().unwrap().freeze();
	assert_eq!(registry.len(), 17);
	let drown = registry.get(&DamageType::minecraft("drown")).unwrap();
	assert_eq!(drown.effects, DamageEffects::Drowning);

	let generic = DamageType::new("generic", DamageScaling::Never, 0.0);
	let tag = DamageType::codec().write(&cx, &generic).unwrap();
	let root = compound(&tag);
	assert!(!root.contains_key("effects"));
	assert!(!root.contains_key("death_message_type"));
	assert_eq!(DamageType::codec().read(&cx, &tag).unwrap(), generic);

	let odd = Tag::Compound(root.clone().with("scaling", "sometimes"));
	assert!(DamageType::codec().read(&cx, &odd).unwrap_err().is_structural());
}

#[test]
fn test_crossbow_sounds() {
	let cx = cx();
	let codec = CrossbowChargingSounds::codec();
	let empty = Tag::Compound(Compound::new());
	assert_eq!(codec.read(&cx, &empty).unwrap(), CrossbowChargingSounds::default());
	assert_eq!(codec.write(&cx, &CrossbowChargingSounds::default()).unwrap(), empty);

	let tag = Tag::Compound(Compound::new().with("start", "item.crossbow.loading_start").with("end", "#demo:clicks"));
	let sounds = codec.read(&cx, &tag).unwrap();
	assert_eq!(sounds.start, Some(ObjectSet::of([mc("item.crossbow.loading_start")])));
	assert_eq!(sounds.mid, None);
	assert_eq!(sounds.end, Some(ObjectSet::tag(BasicType::SoundEvents, id("demo:clicks"))));
	assert_eq!(codec.write(&cx, &sounds).unwrap(), Tag::Compound(Compound::new().with("start", "minecraft:item.crossbow.loading_start").with("end", "#demo:clicks")));
}

#[test]
fn test_area_effect_cloud_defaults_and_indices() {
	let mut meta = AreaEffectCloudMeta::default();
	assert_eq!(meta.radius(), 0.5);
	assert_eq!(meta.color(), 0);
	assert!(!meta.is_single_point());
	assert_eq!(meta.particle(), Particle::effect());

	meta.set_radius(3.0);
	meta.set_color(0xff0000);
	meta.set_single_point(true);
	meta.set_particle(Particle::new(mc("flame")));

	assert_eq!(meta.radius(), 3.0);
	assert_eq!(meta.color(), 0xff0000);
	assert!(meta.is_single_point());
	assert_eq!(meta.particle(), Particle::new(mc("flame")));

	let metadata = meta.metadata();
	assert_eq!(metadata.get_raw(7), Some(&MetadataValue::Float(3.0)));
	assert_eq!(metadata.get_raw(8), Some(&MetadataValue::VarInt(0xff0000)));
	assert_eq!(metadata.get_raw(9), Some(&MetadataValue::Boolean(true)));
	assert_eq!(metadata.get_raw(10), Some(&MetadataValue::Particle(Particle::new(mc("flame")))));
	assert_eq!(metadata.get_raw(11), None);
}

#[test]
fn test_metadata_changes_drain_in_index_order() {
	let mut metadata = Metadata::new();
	metadata.set_index(9, true);
	metadata.set_index(7, 1.0f32);
	metadata.set_index(9, false);

	let changes = metadata.take_changes();
	assert_eq!(changes, vec![(7, MetadataValue::Float(1.0)), (9, MetadataValue::Boolean(false))]);
	assert!(metadata.take_changes().is_empty());
	// a stored value of another type falls back to the default
	assert_eq!(metadata.get_index(7, 0i32), 0);
}

#[test]
fn test_loader_config_from_toml() {
	assert_eq!(LoaderConfig::from_toml("").unwrap(), LoaderConfig::default());
	assert!(LoaderConfig::default().strict);

	let config = LoaderConfig::from_toml("duplicate_policy = \"reject\"\nstrict = false\nmax_depth = 4\n").unwrap();
	assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
	assert!(!config.strict);
	assert_eq!(config.max_depth, 4);

	assert!(matches!(LoaderConfig::from_toml("stritc = true"), Err(LoadError::Config(_))));
}

const ZAP: &str = r#"{"message_id": "zap", "scaling": "never", "exhaustion": 0.1}"#;
const SHOCK: &str = r#"{"type": "minecraft:damage_entity", "damage_type": "demo:zap", "min_damage": 1,
	"max_damage": {"type": "minecraft:linear", "base": 1, "per_level_above_first": 2}}"#;
const BROKEN: &str = r#"{"type": "minecraft:ignite"}"#;

fn demo_pack(effect: &str) -> PackContents {
	PackContents::new(DataPack::named("demo"))
		.with(RecordKind::DamageType, id("demo:zap"), ZAP)
		.with(RecordKind::EntityEffect, id("demo:shock"), SHOCK)
		.with(RecordKind::EntityEffect, id("demo:other"), effect)
		.with(RecordKind::Tag(BasicType::Blocks), id("demo:soft"), r#"{"values": ["minecraft:sand"]}"#)
}

fn loader(strict: bool) -> PackLoader {
	PackLoader::new(LoaderConfig {
		strict,
		..LoaderConfig::default()
	})
}

#[test]
fn test_strict_reload_with_a_bad_record_leaves_everything_untouched() {
	let active = ActiveRegistries::new(default_registries().unwrap());
	let tags = TagCatalog::new();
	let before = active.load();

	let err = loader(true).reload(&active, &tags, &[demo_pack(BROKEN)]).unwrap_err();
	let rejected = err.rejected();
	assert_eq!(rejected.len(), 1);
	assert_eq!(rejected[0].id, id("demo:other"));
	assert_eq!(rejected[0].kind, RecordKind::EntityEffect);
	match &rejected[0].failure {
		RecordFailure::Codec(e) => assert_eq!(e.kind(), &ErrorKind::MissingField { name: "duration".into() }),
		other => panic!("unexpected failure {other:?}"),
	}

	assert!(Arc::ptr_eq(&before, &active.load()));
	assert!(!active.load().get::<DamageType>().unwrap().contains(&id("demo:zap")));
	assert!(tags.is_empty());
}

#[test]
fn test_lenient_reload_commits_the_valid_records() {
	let active = ActiveRegistries::new(default_registries().unwrap());
	let tags = Arc::new(TagCatalog::new());

	let report = loader(false).reload(&active, &tags, &[demo_pack(BROKEN)]).unwrap();
	assert_eq!(report.rejected.len(), 1);
	assert!(!report.is_clean());
	assert_eq!(report.effects, 1);
	assert_eq!(report.damage_types, 18);
	assert_eq!(report.tags, 1);

	let set = active.load();
	let effects = set.get::<EntityEffect>().unwrap();
	let Some(shock) = effects.get_id(&id("demo:shock")) else {
		panic!("demo:shock missing");
	};
	let EntityEffect::DamageEntity(damage) = &**shock else {
		panic!("expected damage_entity");
	};
	assert_eq!(damage.damage_type, RegistryKey::new(id("demo:zap")));
	assert_eq!(damage.max_damage.calc(3), 5.0);
	assert!(!effects.contains(&id("demo:other")));

	let cx = Context::current(&active, tags.clone());
	assert!(cx.registry::<DamageType>().unwrap().get(&damage.damage_type).is_ok());
	assert!(ObjectSet::tag(BasicType::Blocks, id("demo:soft")).contains(cx.tags(), &mc("sand")));
}

#[test]
fn test_new_registries_are_never_seen_without_their_tags() {
	use std::sync::atomic::{AtomicBool, Ordering};

	let active = Arc::new(ActiveRegistries::new(default_registries().unwrap()));
	let tags = Arc::new(TagCatalog::new());
	let done = Arc::new(AtomicBool::new(false));

	let reader = {
		let (active, tags, done) = (active.clone(), tags.clone(), done.clone());
		std::thread::spawn(move || {
			while !done.load(Ordering::Acquire) {
				if active.load().get::<DamageType>().unwrap().contains(&id("demo:zap")) {
					assert!(tags.get(BasicType::Blocks, &id("demo:soft")).is_some());
				}
			}
		})
	};

	loader(true)
		.reload(&active, &tags, &[demo_pack(r#"{"type": "run_function", "function": "demo:tick"}"#)])
		.unwrap();
	done.store(true, Ordering::Release);
	reader.join().unwrap();
}

#[test]
fn test_keys_survive_reloads() {
	let active = ActiveRegistries::new(default_registries().unwrap());
	let tags = TagCatalog::new();
	let loader = PackLoader::default();
	let pack = [demo_pack(r#"{"type": "run_function", "function": "demo:tick"}"#)];

	loader.reload(&active, &tags, &pack).unwrap();
	let key: RegistryKey<DamageType> = active.load().get::<DamageType>().unwrap().key(&id("demo:zap")).unwrap();
	let first = active.load().get::<DamageType>().unwrap().generation();

	loader.reload(&active, &tags, &pack).unwrap();
	let registry = active.load().get_arc::<DamageType>().unwrap();
	assert_ne!(registry.generation(), first);
	assert_eq!(registry.get(&key).unwrap().message_id, "zap");

	loader.reload(&active, &tags, &[]).unwrap();
	let registry = active.load().get_arc::<DamageType>().unwrap();
	assert!(matches!(registry.get(&key), Err(RegistryError::NotFound { .. })));
}

#[test]
fn test_duplicate_policy_governs_cross_pack_overrides() {
	let active = ActiveRegistries::new(default_registries().unwrap());
	let tags = TagCatalog::new();
	let louder = r#"{"message_id": "zap.loud", "scaling": "always", "exhaustion": 0.5}"#;
	let packs = [
		PackContents::new(DataPack::named("base")).with(RecordKind::DamageType, id("demo:zap"), ZAP),
		PackContents::new(DataPack::named("patch")).with(RecordKind::DamageType, id("demo:zap"), louder),
	];

	PackLoader::default().reload(&active, &tags, &packs).unwrap();
	let set = active.load();
	assert_eq!(set.get::<DamageType>().unwrap().get_id(&id("demo:zap")).unwrap().message_id, "zap.loud");

	let strict_reject = PackLoader::new(LoaderConfig {
		duplicate_policy: DuplicatePolicy::Reject,
		..LoaderConfig::default()
	});
	let err = strict_reject.reload(&active, &tags, &packs).unwrap_err();
	assert!(matches!(
		err.rejected()[0].failure,
		RecordFailure::Registry(RegistryError::Duplicate { .. })
	));
}

#[test]
fn test_effects_deeper_than_the_limit_are_rejected() {
	let active = ActiveRegistries::default();
	let tags = TagCatalog::new();
	let nested = r#"{"type": "all_of", "effects": [{"type": "all_of", "effects": [{"type": "run_function", "function": "f"}]}]}"#;
	let pack = PackContents::new(DataPack::named("deep")).with(RecordKind::EntityEffect, id("deep:nest"), nested);

	let shallow = PackLoader::new(LoaderConfig {
		max_depth: 2,
		..LoaderConfig::default()
	});
	let err = shallow.reload(&active, &tags, &[pack.clone()]).unwrap_err();
	assert!(matches!(err.rejected()[0].failure, RecordFailure::TooDeep { depth: 3, max: 2 }));

	PackLoader::default().reload(&active, &tags, &[pack]).unwrap();
}

#[test]
fn test_tag_files_merge_across_packs() {
	let active = ActiveRegistries::default();
	let tags = TagCatalog::new();
	let kind = RecordKind::Tag(BasicType::Items);
	let soft = id("demo:soft");
	let packs = [
		PackContents::new(DataPack::named("a")).with(kind, soft.clone(), r#"{"values": ["minecraft:wool"]}"#),
		PackContents::new(DataPack::named("b")).with(kind, soft.clone(), r##"{"values": [{"id": "minecraft:moss", "required": false}, "#demo:fluffy"]}"##),
	];
	PackLoader::default().reload(&active, &tags, &packs).unwrap();
	assert_eq!(
		tags.get(BasicType::Items, &soft).unwrap().to_vec(),
		vec![
			TagEntry::Element(mc("wool")),
			TagEntry::Element(mc("moss")),
			TagEntry::Tag(id("demo:fluffy"))
		]
	);

	let replacing = PackContents::new(DataPack::named("c")).with(kind, soft.clone(), r#"{"replace": true, "values": ["minecraft:snow"]}"#);
	PackLoader::default()
		.reload(&active, &tags, &[packs[0].clone(), packs[1].clone(), replacing])
		.unwrap();
	assert_eq!(tags.get(BasicType::Items, &soft).unwrap().to_vec(), vec![TagEntry::Element(mc("snow"))]);
}

fn write_file(root: &Path, relative: &str, contents: &str) {
	let path = root.join(relative);
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, contents).unwrap();
}

#[test]
fn test_pack_directories_are_discovered_by_layout() {
	let dir = tempfile::tempdir().unwrap();
	let root = dir.path();
	write_file(root, "data/demo/damage_type/zap.json", ZAP);
	write_file(root, "data/demo/enchantment_entity_effect/shock/strong.json", SHOCK);
	write_file(root, "data/demo/tags/block/soft.json", r#"{"values": ["minecraft:sand"]}"#);
	write_file(root, "data/demo/tags/worldgen/biome/warm.json", r#"{"values": ["minecraft:desert"]}"#);
	write_file(root, "data/demo/recipe/ignored.json", "{}");
	write_file(root, "data/demo/damage_type/notes.txt", "not json");

	let pack = PackContents::from_dir(DataPack::named("demo"), root).unwrap();
	let mut found: Vec<_> = pack.records().iter().map(|r| (r.kind, r.id.to_string())).collect();
	found.sort_by(|a, b| a.1.cmp(&b.1));
	assert_eq!(
		found,
		vec![
			(RecordKind::EntityEffect, "demo:shock/strong".to_owned()),
			(RecordKind::Tag(BasicType::Blocks), "demo:soft".to_owned()),
			(RecordKind::Tag(BasicType::Biomes), "demo:warm".to_owned()),
			(RecordKind::DamageType, "demo:zap".to_owned()),
		]
	);
	assert!(pack.records().iter().all(|r| r.path.is_some()));

	let active = ActiveRegistries::default();
	let tags = TagCatalog::new();
	let report = PackLoader::default().reload(&active, &tags, &[pack]).unwrap();
	assert!(report.is_clean());
	assert!(active.load().get::<EntityEffect>().unwrap().contains(&id("demo:shock/strong")));
	assert!(tags.contains(BasicType::Biomes, &id("demo:warm"), &mc("desert")));
}

#[test]
fn test_a_directory_without_data_is_not_a_pack() {
	let dir = tempfile::tempdir().unwrap();
	assert!(matches!(
		PackContents::from_dir(DataPack::named("empty"), dir.path()),
		Err(LoadError::NotAPack { .. })
	));
}

fn arb_level_based() -> impl Strategy<Value = LevelBasedValue> {
	let leaf = prop_oneof![
		(-100.0f32..100.0).prop_map(LevelBasedValue::Constant),
		(-10.0f32..10.0, -10.0f32..10.0).prop_map(|(base, per_level_above_first)| LevelBasedValue::Linear(Linear {
			base,
			per_level_above_first
		})),
		(-10.0f32..10.0).prop_map(|added| LevelBasedValue::LevelsSquared(LevelsSquared { added })),
	];
	leaf.prop_recursive(3, 16, 3, |inner| {
		prop_oneof![
			(inner.clone(), -5.0f32..0.0, 0.0f32..5.0).prop_map(|(value, min, max)| LevelBasedValue::Clamped(Clamped {
				value: Box::new(value),
				min,
				max
			})),
			(inner.clone(), inner.clone()).prop_map(|(n, d)| LevelBasedValue::Fraction(Fraction {
				numerator: Box::new(n),
				denominator: Box::new(d)
			})),
			(proptest::collection::vec(-5.0f32..5.0, 0..4), inner).prop_map(|(values, fallback)| {
				LevelBasedValue::Lookup(Lookup {
					values,
					fallback: Box::new(fallback),
				})
			}),
		]
	})
}

proptest! {
	#[test]
	fn prop_level_based_round_trip(value in arb_level_based()) {
		let cx = cx();
		let tag = LevelBasedValue::codec().write(&cx, &value).unwrap();
		prop_assert_eq!(LevelBasedValue::codec().read(&cx, &tag).unwrap(), value);
	}

	#[test]
	fn prop_ignite_duration_round_trip(min in -1000.0f32..1000.0, max in -1000.0f32..1000.0) {
		let cx = cx();
		let effect = EntityEffect::Ignite(Ignite {
			duration: NumberRange { min: LevelBasedValue::Constant(min), max: LevelBasedValue::Constant(max) },
		});
		let tag = EntityEffect::codec().write(&cx, &effect).unwrap();
		prop_assert_eq!(EntityEffect::codec().read(&cx, &tag).unwrap(), effect);
	}
}
