//! Content pack contents and on-disk discovery.

use std::path::{Path, PathBuf};

use cobble_registry::{BasicType, DataPack, Identifier};
use walkdir::WalkDir;

use super::{LoadError, RecordKind};

/// Directory under `data/<namespace>/` holding damage type records.
pub const DAMAGE_TYPE_DIR: &str = "damage_type";
/// Directory under `data/<namespace>/` holding standalone effect records.
pub const ENTITY_EFFECT_DIR: &str = "enchantment_entity_effect";
/// Directory under `data/<namespace>/` holding tag files, one sub-directory per basic type.
pub const TAGS_DIR: &str = "tags";

/// One JSON record as found in a pack; parsed during reload.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
	pub kind: RecordKind,
	pub id: Identifier,
	pub source: String,
	/// File the record was read from, when it came from disk.
	pub path: Option<PathBuf>,
}

/// Every record one pack contributes, in the order the pack lists them.
#[derive(Debug, Clone)]
pub struct PackContents {
	pack: DataPack,
	records: Vec<Record>,
}

impl PackContents {
	pub fn new(pack: DataPack) -> Self {
		Self { pack, records: Vec::new() }
	}

	pub fn pack(&self) -> &DataPack {
		&self.pack
	}

	pub fn records(&self) -> &[Record] {
		&self.records
	}

	pub fn add(&mut self, kind: RecordKind, id: Identifier, source: impl Into<String>) -> &mut Self {
		self.records.push(Record {
			kind,
			id,
			source: source.into(),
			path: None,
		});
		self
	}

	pub fn with(mut self, kind: RecordKind, id: Identifier, source: impl Into<String>) -> Self {
		self.add(kind, id, source);
		self
	}

	/// Reads `<root>/data/<namespace>/<kind dir>/<path>.json` files.
	///
	/// Files outside the known directories are skipped. Records are ordered by
	/// path so repeated loads of the same tree register in the same order.
	pub fn from_dir(pack: DataPack, root: &Path) -> Result<Self, LoadError> {
		let data = root.join("data");
		if !data.is_dir() {
			return Err(LoadError::NotAPack { path: root.to_path_buf() });
		}

		let mut contents = Self::new(pack);
		for entry in WalkDir::new(&data).sort_by_file_name() {
			let entry = entry?;
			let path = entry.path();
			if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "json") {
				continue;
			}
			let Some((kind, id)) = path.strip_prefix(&data).ok().and_then(classify) else {
				tracing::debug!(path = %path.display(), "skipping unrecognised pack file");
				continue;
			};
			let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
				path: path.to_path_buf(),
				source,
			})?;
			contents.records.push(Record {
				kind,
				id,
				source,
				path: Some(path.to_path_buf()),
			});
		}

		tracing::debug!(pack = %contents.pack, records = contents.records.len(), "read pack directory");
		Ok(contents)
	}
}

/// Maps `<namespace>/<kind dir>/<path>.json` to a record kind and identifier.
fn classify(relative: &Path) -> Option<(RecordKind, Identifier)> {
	let parts: Vec<&str> = relative.iter().map(|part| part.to_str()).collect::<Option<_>>()?;
	let (namespace, rest) = parts.split_first()?;
	let (dir, rest) = rest.split_first()?;
	let (kind, rest) = match *dir {
		DAMAGE_TYPE_DIR => (RecordKind::DamageType, rest),
		ENTITY_EFFECT_DIR => (RecordKind::EntityEffect, rest),
		// basic type directories may span two components ("worldgen/biome")
		TAGS_DIR => (1..=2).filter(|&n| n < rest.len()).find_map(|n| {
			BasicType::from_directory(&rest[..n].join("/")).map(|basic| (RecordKind::Tag(basic), &rest[n..]))
		})?,
		_ => return None,
	};
	let path = rest.join("/");
	let path = path.strip_suffix(".json")?;
	Identifier::parse(&format!("{namespace}:{path}")).ok().map(|id| (kind, id))
}
