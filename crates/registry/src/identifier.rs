use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Namespace assumed when an identifier is written without one.
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A namespaced identifier such as `minecraft:ignite`.
///
/// Stored as one shared string, so clones are a reference-count bump.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
	full: Arc<str>,
	split: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
	#[error("empty identifier")]
	Empty,
	#[error("invalid character {ch:?} in namespace of {input:?}")]
	Namespace { input: String, ch: char },
	#[error("invalid character {ch:?} in path of {input:?}")]
	Path { input: String, ch: char },
}

fn valid_namespace_char(c: char) -> bool {
	matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.')
}

fn valid_path_char(c: char) -> bool {
	valid_namespace_char(c) || c == '/'
}

impl Identifier {
	/// Parses `namespace:path` or a bare `path` in the default namespace.
	pub fn parse(input: &str) -> Result<Self, IdentifierError> {
		let (namespace, path) = match input.split_once(':') {
			Some((ns, path)) if !ns.is_empty() => (ns, path),
			Some((_, path)) => (DEFAULT_NAMESPACE, path),
			None => (DEFAULT_NAMESPACE, input),
		};
		if path.is_empty() {
			return Err(IdentifierError::Empty);
		}
		if let Some(ch) = namespace.chars().find(|&c| !valid_namespace_char(c)) {
			return Err(IdentifierError::Namespace { input: input.to_owned(), ch });
		}
		if let Some(ch) = path.chars().find(|&c| !valid_path_char(c)) {
			return Err(IdentifierError::Path { input: input.to_owned(), ch });
		}
		Ok(Self::from_parts(namespace, path))
	}

	/// Builds an identifier from trusted parts.
	///
	/// # Panics
	///
	/// Panics if either part contains a character outside the identifier alphabet.
	pub fn new(namespace: &str, path: &str) -> Self {
		assert!(
			!path.is_empty() && namespace.chars().all(valid_namespace_char) && path.chars().all(valid_path_char),
			"invalid identifier {namespace}:{path}"
		);
		Self::from_parts(namespace, path)
	}

	/// Shorthand for `Identifier::new("minecraft", path)`.
	pub fn minecraft(path: &str) -> Self {
		Self::new(DEFAULT_NAMESPACE, path)
	}

	fn from_parts(namespace: &str, path: &str) -> Self {
		let full: Arc<str> = format!("{namespace}:{path}").into();
		Self {
			full,
			split: namespace.len(),
		}
	}

	pub fn namespace(&self) -> &str {
		&self.full[..self.split]
	}

	pub fn path(&self) -> &str {
		&self.full[self.split + 1..]
	}

	pub fn as_str(&self) -> &str {
		&self.full
	}
}

impl fmt::Display for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.full)
	}
}

impl fmt::Debug for Identifier {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Identifier({})", self.full)
	}
}

impl FromStr for Identifier {
	type Err = IdentifierError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl Serialize for Identifier {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.full)
	}
}

impl<'de> Deserialize<'de> for Identifier {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let s = String::deserialize(deserializer)?;
		Identifier::parse(&s).map_err(serde::de::Error::custom)
	}
}
