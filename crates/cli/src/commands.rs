//! Subcommand bodies. Each returns the text to print so tests can inspect it.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use cobble_codec::{Codec, Context, VariantCodec};
use cobble_nbt::Tag;
use cobble_registry::{ActiveRegistries, DataPack, RegistrySet, TagCatalog};
use cobble_schema::damage::DamageType;
use cobble_schema::default_registries;
use cobble_schema::enchant::EntityEffect;
use cobble_schema::loader::{LoadError, LoadReport, LoaderConfig, PackContents, PackLoader};
use cobble_schema::value::LevelBasedValue;

use crate::cli::LoadOptions;

/// Registries and tags after a reload over the requested packs.
pub struct Loaded {
	pub active: ActiveRegistries,
	pub tags: Arc<TagCatalog>,
	pub report: LoadReport,
}

impl Loaded {
	pub fn context(&self) -> Context {
		Context::current(&self.active, self.tags.clone())
	}
}

pub fn loader_config(options: &LoadOptions) -> anyhow::Result<LoaderConfig> {
	let mut config = match &options.config {
		Some(path) => {
			let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
			LoaderConfig::from_toml(&text)?
		}
		None => LoaderConfig::default(),
	};
	if options.lenient {
		config.strict = false;
	}
	Ok(config)
}

/// A pack is named after its directory.
pub fn pack_name(root: &Path) -> String {
	root.file_name()
		.map(|name| name.to_string_lossy().into_owned())
		.unwrap_or_else(|| root.display().to_string())
}

pub fn load_packs(roots: &[PathBuf], options: &LoadOptions) -> anyhow::Result<Loaded> {
	let loader = PackLoader::new(loader_config(options)?);
	let packs = roots
		.iter()
		.map(|root| PackContents::from_dir(DataPack::named(pack_name(root)), root))
		.collect::<Result<Vec<_>, _>>()?;
	tracing::debug!(packs = packs.len(), strict = loader.config().strict, "loading packs");

	let active = ActiveRegistries::new(default_registries()?);
	let tags = Arc::new(TagCatalog::new());
	let report = match loader.reload(&active, &tags, &packs) {
		Ok(report) => report,
		Err(err @ LoadError::Rejected { .. }) => {
			for record in err.rejected() {
				tracing::error!("{record}");
			}
			return Err(err.into());
		}
		Err(err) => return Err(err.into()),
	};
	Ok(Loaded { active, tags, report })
}

pub fn load(roots: &[PathBuf], options: &LoadOptions) -> anyhow::Result<String> {
	let loaded = load_packs(roots, options)?;
	let registries = loaded.active.load();
	let mut out = String::new();

	let report = &loaded.report;
	writeln!(
		out,
		"{} damage types, {} effects, {} tags",
		report.damage_types, report.effects, report.tags
	)?;
	if let Some(effects) = registries.get::<EntityEffect>() {
		for (key, effect) in effects.iter() {
			let pack = effects.pack_of(key).map(ToString::to_string).unwrap_or_default();
			writeln!(out, "  effect {key} ({}) from {pack}", effect.builtin_name())?;
		}
	}
	for record in &report.rejected {
		writeln!(out, "  skipped {record}")?;
	}
	Ok(out)
}

pub fn decode(file: &Path, roots: &[PathBuf], json: bool, options: &LoadOptions) -> anyhow::Result<String> {
	let cx = if roots.is_empty() {
		cobble_schema::default_context()?
	} else {
		load_packs(roots, options)?.context()
	};

	let text = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
	let value: serde_json::Value = serde_json::from_str(&text).with_context(|| format!("parsing {}", file.display()))?;
	let codec = EntityEffect::codec();
	let effect = codec.read(&cx, &Tag::from_json(&value)?)?;
	let canonical = codec.write(&cx, &effect)?;
	tracing::debug!(variant = effect.builtin_name(), depth = effect.depth(), "decoded effect");

	Ok(if json {
		format!("{}\n", serde_json::to_string_pretty(&canonical.to_json())?)
	} else {
		format!("{canonical}\n")
	})
}

pub fn families() -> anyhow::Result<String> {
	let registries = default_registries()?;
	let mut out = String::new();
	section::<DamageType>(&mut out, &registries)?;
	section::<VariantCodec<LevelBasedValue>>(&mut out, &registries)?;
	section::<VariantCodec<EntityEffect>>(&mut out, &registries)?;
	Ok(out)
}

fn section<T: Send + Sync + 'static>(out: &mut String, registries: &RegistrySet) -> std::fmt::Result {
	let Some(registry) = registries.get::<T>() else {
		return Ok(());
	};
	writeln!(out, "{} ({})", registry.family(), registry.len())?;
	for key in registry.keys() {
		writeln!(out, "  {key}")?;
	}
	Ok(())
}
