use std::fmt;
use std::sync::Arc;

/// Where a registry entry came from.
///
/// Provenance is diagnostic: it decides duplicate handling between packs and
/// shows up in logs, but never affects lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataPack {
	/// Built into the engine; the seed of every reload.
	MinecraftCore,
	/// An external content pack, by name.
	Named(Arc<str>),
}

impl DataPack {
	pub fn named(name: impl Into<Arc<str>>) -> Self {
		Self::Named(name.into())
	}

	pub fn is_core(&self) -> bool {
		matches!(self, Self::MinecraftCore)
	}

	pub fn name(&self) -> &str {
		match self {
			Self::MinecraftCore => "minecraft:core",
			Self::Named(name) => name,
		}
	}
}

impl fmt::Display for DataPack {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::MinecraftCore => f.write_str("core"),
			Self::Named(name) => write!(f, "pack:{name}"),
		}
	}
}
