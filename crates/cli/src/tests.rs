use std::path::{Path, PathBuf};

use clap::Parser;
use pretty_assertions::assert_eq;

use crate::cli::{Cli, Command, LoadOptions};
use crate::commands;

fn write_file(root: &Path, relative: &str, contents: &str) {
	let path = root.join(relative);
	std::fs::create_dir_all(path.parent().unwrap()).unwrap();
	std::fs::write(path, contents).unwrap();
}

fn strict() -> LoadOptions {
	LoadOptions {
		config: None,
		lenient: false,
	}
}

fn demo_pack(root: &Path) -> PathBuf {
	let pack = root.join("demo");
	write_file(
		&pack,
		"data/demo/damage_type/zap.json",
		r#"{"message_id": "zap", "scaling": "never", "exhaustion": 0.1}"#,
	);
	write_file(
		&pack,
		"data/demo/enchantment_entity_effect/shock.json",
		r#"{"type": "damage_entity", "damage_type": "demo:zap", "min_damage": 1, "max_damage": 2}"#,
	);
	pack
}

#[test]
fn test_parses_load_with_options() {
	let cli = Cli::try_parse_from(["cobble", "load", "a", "b", "--lenient", "-c", "loader.toml"]).unwrap();
	let Command::Load { packs, options } = cli.command else {
		panic!("expected load");
	};
	assert_eq!(packs, vec![PathBuf::from("a"), PathBuf::from("b")]);
	assert!(options.lenient);
	assert_eq!(options.config, Some(PathBuf::from("loader.toml")));
}

#[test]
fn test_load_requires_a_pack() {
	assert!(Cli::try_parse_from(["cobble", "load"]).is_err());
}

#[test]
fn test_load_reports_pack_effects() {
	let dir = tempfile::tempdir().unwrap();
	let pack = demo_pack(dir.path());

	let out = commands::load(&[pack], &strict()).unwrap();
	let mut lines = out.lines();
	assert_eq!(lines.next(), Some("18 damage types, 1 effects, 0 tags"));
	assert_eq!(lines.next(), Some("  effect demo:shock (damage_entity) from pack:demo"));
	assert_eq!(lines.next(), None);
}

#[test]
fn test_strict_load_fails_on_a_bad_record_and_lenient_skips_it() {
	let dir = tempfile::tempdir().unwrap();
	let pack = demo_pack(dir.path());
	write_file(&pack, "data/demo/enchantment_entity_effect/broken.json", r#"{"type": "demo:nothing"}"#);

	assert!(commands::load(std::slice::from_ref(&pack), &strict()).is_err());

	let lenient = LoadOptions {
		config: None,
		lenient: true,
	};
	let out = commands::load(&[pack], &lenient).unwrap();
	assert!(out.starts_with("18 damage types, 1 effects"));
	assert!(out.contains("skipped entity effect demo:broken from pack:demo"), "{out}");
}

#[test]
fn test_config_file_is_read_and_lenient_overrides_strict() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("loader.toml");
	std::fs::write(&path, "max_depth = 4\n").unwrap();

	let config = commands::loader_config(&LoadOptions {
		config: Some(path),
		lenient: true,
	})
	.unwrap();
	assert_eq!(config.max_depth, 4);
	assert!(!config.strict);
}

#[test]
fn test_decode_prints_the_canonical_form() {
	let dir = tempfile::tempdir().unwrap();
	let file = dir.path().join("ignite.json");
	std::fs::write(&file, r#"{"duration": {"max": 4, "min": 4}, "type": "ignite"}"#).unwrap();

	let snbt = commands::decode(&file, &[], false, &strict()).unwrap();
	assert_eq!(snbt, "{type:\"minecraft:ignite\",duration:{min:4f,max:4f}}\n");

	let json = commands::decode(&file, &[], true, &strict()).unwrap();
	let value: serde_json::Value = serde_json::from_str(&json).unwrap();
	assert_eq!(value["type"], "minecraft:ignite");
	assert_eq!(value["duration"]["min"], 4.0);
}

#[test]
fn test_decode_sees_damage_types_from_packs() {
	let dir = tempfile::tempdir().unwrap();
	let pack = demo_pack(dir.path());
	let file = dir.path().join("effect.json");
	std::fs::write(
		&file,
		r#"{"type": "damage_entity", "damage_type": "demo:zap", "min_damage": 1, "max_damage": 1}"#,
	)
	.unwrap();

	assert!(commands::decode(&file, &[], false, &strict()).is_err());
	let out = commands::decode(&file, &[pack], false, &strict()).unwrap();
	assert!(out.contains("damage_type:\"demo:zap\""), "{out}");
}

#[test]
fn test_families_lists_builtins() {
	let out = commands::families().unwrap();
	assert!(out.contains("minecraft:damage_type (17)"), "{out}");
	assert!(out.contains("minecraft:enchantment_entity_effect_type (13)"), "{out}");
	assert!(out.contains("  minecraft:levels_squared"), "{out}");
}

#[test]
fn test_pack_name_is_the_directory_name() {
	assert_eq!(commands::pack_name(Path::new("/srv/packs/vanilla_plus")), "vanilla_plus");
}
