//! Content-pack loader.
//!
//! # Role
//!
//! Turns the records of an ordered list of packs into a new registry
//! generation and publishes it.
//!
//! # Invariants
//!
//! - Every reload starts from the built-in defaults; nothing from the previous
//!   generation carries over.
//! - Packs are layered in the order given. Whether a later pack may redefine an
//!   identifier is decided by [`LoaderConfig::duplicate_policy`].
//! - Damage types are registered before any effect is decoded, so effects can
//!   refer to damage types from the same reload.
//! - In strict mode any rejected record aborts the reload and the active
//!   registries and tags are left untouched. In lenient mode rejected records
//!   are reported and skipped.
//!
//! # Concurrency
//!
//! Decoding happens against a private staging context. Readers of the active
//! registries see the old generation until the single swap at the end.
//!
//! Tags and registries are two publications. Tags go first, so a reader that
//! sees the new registries also sees the new tags. A reader between the two
//! sees the old registries paired with the new tags.

mod config;
mod error;
mod pack;

use std::sync::Arc;

use cobble_codec::{Codec, Context};
use cobble_nbt::Tag;
use cobble_registry::{
	ActiveRegistries, BasicType, DataPack, Identifier, RegistryBuilder, RegistryError, RegistrySet, TagCatalog, TagEntry,
};
use indexmap::IndexMap;
use serde::Deserialize;

pub use config::LoaderConfig;
pub use error::{LoadError, RecordError, RecordFailure, RecordKind};
pub use pack::{DAMAGE_TYPE_DIR, ENTITY_EFFECT_DIR, PackContents, Record, TAGS_DIR};

use crate::damage::DamageType;
use crate::enchant::EntityEffect;
use crate::value::LevelBasedValue;

/// Registry family of effect records loaded from packs.
pub const EFFECT_RECORDS_FAMILY: &str = "cobble:enchantment_entity_effect";

/// Outcome of a published reload.
#[derive(Debug, Default)]
pub struct LoadReport {
	pub damage_types: usize,
	pub effects: usize,
	pub tags: usize,
	/// Records skipped in lenient mode.
	pub rejected: Vec<RecordError>,
}

impl LoadReport {
	pub fn is_clean(&self) -> bool {
		self.rejected.is_empty()
	}
}

/// `{"replace": false, "values": ["ns:a", "#ns:tag", {"id": "ns:b", "required": false}]}`
#[derive(Debug, Deserialize)]
struct TagFile {
	#[serde(default)]
	replace: bool,
	values: Vec<TagValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TagValue {
	Plain(String),
	/// `required` is accepted and ignored; entries are never validated against a registry.
	Detailed { id: String },
}

impl TagValue {
	fn id(&self) -> &str {
		match self {
			Self::Plain(id) | Self::Detailed { id } => id,
		}
	}
}

pub struct PackLoader {
	config: LoaderConfig,
}

impl PackLoader {
	pub fn new(config: LoaderConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &LoaderConfig {
		&self.config
	}

	/// Builds a fresh generation from `packs` and publishes it to `active` and
	/// `tags`.
	pub fn reload(&self, active: &ActiveRegistries, tags: &TagCatalog, packs: &[PackContents]) -> Result<LoadReport, LoadError> {
		let mut rejected = Vec::new();

		let staged_tags = self.stage_tags(packs, &mut rejected);
		let damage_types = Arc::new(self.stage_damage_types(packs, &mut rejected)?.freeze());
		let values = Arc::new(LevelBasedValue::create_default_registry()?.freeze());
		let variants = Arc::new(EntityEffect::create_default_registry()?.freeze());

		let mut staging = RegistrySet::new();
		staging.insert_arc(damage_types.clone());
		staging.insert_arc(values.clone());
		staging.insert_arc(variants.clone());
		let catalog = TagCatalog::new();
		catalog.replace_all(staged_tags.iter().map(|((basic, id), entries)| (*basic, id.clone(), entries.clone())));
		let cx = Context::new(Arc::new(staging), Arc::new(catalog));

		let effects = self.stage_effects(&cx, packs, &mut rejected)?.freeze();

		if self.config.strict && !rejected.is_empty() {
			tracing::warn!(rejected = rejected.len(), "strict reload aborted; active registries unchanged");
			return Err(LoadError::Rejected { errors: rejected });
		}

		let report = LoadReport {
			damage_types: damage_types.len(),
			effects: effects.len(),
			tags: staged_tags.len(),
			rejected,
		};

		let mut next = RegistrySet::new();
		next.insert_arc(damage_types);
		next.insert_arc(values);
		next.insert_arc(variants);
		next.insert(effects);
		tags.replace_all(staged_tags.into_iter().map(|((basic, id), entries)| (basic, id, entries)));
		active.swap(next);

		tracing::info!(
			packs = packs.len(),
			damage_types = report.damage_types,
			effects = report.effects,
			tags = report.tags,
			rejected = report.rejected.len(),
			"registries reloaded",
		);
		Ok(report)
	}

	fn stage_damage_types(
		&self,
		packs: &[PackContents],
		rejected: &mut Vec<RecordError>,
	) -> Result<RegistryBuilder<DamageType>, RegistryError> {
		let mut builder = DamageType::create_default_registry()?;
		builder.set_policy(self.config.duplicate_policy);
		let cx = Context::default();
		for (pack, record) in records_of(packs, |kind| kind == RecordKind::DamageType) {
			let result = decode(&cx, &DamageType::codec(), &record.source)
				.and_then(|value| Ok(builder.register(record.id.clone(), value, pack.clone())?));
			if let Err(failure) = result {
				reject(rejected, pack, record, failure);
			}
		}
		Ok(builder)
	}

	fn stage_effects(
		&self,
		cx: &Context,
		packs: &[PackContents],
		rejected: &mut Vec<RecordError>,
	) -> Result<RegistryBuilder<EntityEffect>, RegistryError> {
		let mut builder = RegistryBuilder::with_policy(EFFECT_RECORDS_FAMILY, self.config.duplicate_policy);
		let codec = EntityEffect::codec();
		for (pack, record) in records_of(packs, |kind| kind == RecordKind::EntityEffect) {
			let result = decode(cx, &codec, &record.source).and_then(|effect| {
				let depth = effect.depth();
				if depth > self.config.max_depth {
					return Err(RecordFailure::TooDeep {
						depth,
						max: self.config.max_depth,
					});
				}
				Ok(builder.register(record.id.clone(), effect, pack.clone())?)
			});
			if let Err(failure) = result {
				reject(rejected, pack, record, failure);
			}
		}
		Ok(builder)
	}

	/// Merges tag files across packs; `replace` drops what earlier packs
	/// contributed to the same tag.
	fn stage_tags(&self, packs: &[PackContents], rejected: &mut Vec<RecordError>) -> IndexMap<(BasicType, Identifier), Vec<TagEntry>> {
		let mut staged: IndexMap<(BasicType, Identifier), Vec<TagEntry>> = IndexMap::new();
		for (pack, record) in records_of(packs, |kind| matches!(kind, RecordKind::Tag(_))) {
			let RecordKind::Tag(basic) = record.kind else { continue };
			let parsed = serde_json::from_str::<TagFile>(&record.source)
				.map_err(RecordFailure::from)
				.and_then(|file| {
					let entries = file
						.values
						.iter()
						.map(|value| TagEntry::parse(value.id()))
						.collect::<Result<Vec<_>, _>>()?;
					Ok((file.replace, entries))
				});
			match parsed {
				Ok((replace, entries)) => {
					let slot = staged.entry((basic, record.id.clone())).or_default();
					if replace {
						slot.clear();
					}
					for entry in entries {
						if !slot.contains(&entry) {
							slot.push(entry);
						}
					}
				}
				Err(failure) => reject(rejected, pack, record, failure),
			}
		}
		staged
	}
}

impl Default for PackLoader {
	fn default() -> Self {
		Self::new(LoaderConfig::default())
	}
}

fn records_of<'a>(
	packs: &'a [PackContents],
	mut wanted: impl FnMut(RecordKind) -> bool + 'a,
) -> impl Iterator<Item = (&'a DataPack, &'a Record)> + 'a {
	packs
		.iter()
		.flat_map(|pack| pack.records().iter().map(move |record| (pack.pack(), record)))
		.filter(move |(_, record)| wanted(record.kind))
}

fn decode<T>(cx: &Context, codec: &impl Codec<T>, source: &str) -> Result<T, RecordFailure> {
	let json: serde_json::Value = serde_json::from_str(source)?;
	let tag = Tag::from_json(&json)?;
	Ok(codec.read(cx, &tag)?)
}

fn reject(rejected: &mut Vec<RecordError>, pack: &DataPack, record: &Record, failure: RecordFailure) {
	tracing::warn!(
		pack = %pack,
		kind = %record.kind,
		id = %record.id,
		error = %failure,
		"rejected pack record",
	);
	rejected.push(RecordError {
		pack: pack.clone(),
		kind: record.kind,
		id: record.id.clone(),
		failure,
	});
}
