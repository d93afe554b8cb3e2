use cobble_registry::DuplicatePolicy;
use serde::{Deserialize, Serialize};

use super::LoadError;

/// Loader settings, usually read from TOML.
///
/// ```toml
/// duplicate_policy = "reject"
/// strict = false
/// max_depth = 16
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoaderConfig {
	/// How identifiers registered by more than one record are handled.
	pub duplicate_policy: DuplicatePolicy,
	/// Abort the whole reload on the first bad record instead of skipping it.
	pub strict: bool,
	/// Deepest `all_of` nesting accepted in an effect record.
	pub max_depth: usize,
}

impl Default for LoaderConfig {
	fn default() -> Self {
		Self {
			duplicate_policy: DuplicatePolicy::default(),
			strict: true,
			max_depth: 32,
		}
	}
}

impl LoaderConfig {
	pub fn from_toml(input: &str) -> Result<Self, LoadError> {
		Ok(toml::from_str(input)?)
	}
}
