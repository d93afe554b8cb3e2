use std::fmt;
use std::path::PathBuf;

use cobble_codec::CodecError;
use cobble_nbt::NbtError;
use cobble_registry::{BasicType, DataPack, Identifier, IdentifierError, RegistryError};

/// What a record defines, and so which registry it lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
	DamageType,
	EntityEffect,
	Tag(BasicType),
}

impl fmt::Display for RecordKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DamageType => f.write_str("damage type"),
			Self::EntityEffect => f.write_str("entity effect"),
			Self::Tag(basic) => write!(f, "{} tag", basic.directory()),
		}
	}
}

/// Why a single record was rejected.
#[derive(Debug, thiserror::Error)]
pub enum RecordFailure {
	#[error("malformed json: {0}")]
	Json(#[from] serde_json::Error),

	#[error(transparent)]
	Nbt(#[from] NbtError),

	#[error(transparent)]
	Codec(#[from] CodecError),

	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error("bad tag entry: {0}")]
	TagEntry(#[from] IdentifierError),

	#[error("effects nest {depth} deep, limit is {max}")]
	TooDeep { depth: usize, max: usize },
}

/// A rejected record with its provenance.
#[derive(Debug, thiserror::Error)]
#[error("{kind} {id} from {pack}: {failure}")]
pub struct RecordError {
	pub pack: DataPack,
	pub kind: RecordKind,
	pub id: Identifier,
	#[source]
	pub failure: RecordFailure,
}

/// Reload and pack discovery failures.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
	/// Strict reload refused; nothing was published.
	#[error("reload rejected {} record(s); first: {}", .errors.len(), .errors.first().map(ToString::to_string).unwrap_or_default())]
	Rejected { errors: Vec<RecordError> },

	#[error(transparent)]
	Registry(#[from] RegistryError),

	#[error("invalid loader config: {0}")]
	Config(#[from] toml::de::Error),

	#[error("{path} has no data directory")]
	NotAPack { path: PathBuf },

	#[error("reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("walking pack directory: {0}")]
	Walk(#[from] walkdir::Error),
}

impl LoadError {
	/// Rejected records, empty for other failures.
	pub fn rejected(&self) -> &[RecordError] {
		match self {
			Self::Rejected { errors } => errors,
			_ => &[],
		}
	}
}
