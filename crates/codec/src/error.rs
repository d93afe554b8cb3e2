use std::fmt;

use cobble_nbt::{Tag, TagKind};

/// One step from the root of a tag tree to the failing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
	Field(String),
	Index(usize),
}

/// What went wrong, independent of where.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
	#[error("expected {expected}, found {found}")]
	TypeMismatch { expected: &'static str, found: TagKind },

	#[error("missing required field {name:?}")]
	MissingField { name: String },

	#[error("{0}")]
	InvalidValue(String),

	/// A closed enumeration received a name it does not define.
	#[error("unknown {family} {name:?}")]
	UnknownVariant { family: &'static str, name: String },

	/// An identifier is not registered in the registry family it names.
	#[error("unknown identifier {id} in registry {family}")]
	UnknownIdentifier { id: String, family: &'static str },

	/// A value's variant codec is not registered in its family, so it has no discriminator.
	#[error("variant is not registered in {family}")]
	UnregisteredVariant { family: &'static str },

	#[error("no registry for {family} in context")]
	MissingRegistry { family: &'static str },
}

/// A codec failure together with the path to the offending node.
///
/// Displays as `path: message`, e.g. `effects[1].duration: expected compound, found string`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}{}", PathPrefix(.path), .kind)]
pub struct CodecError {
	path: Vec<PathSegment>,
	kind: ErrorKind,
}

impl CodecError {
	pub fn new(kind: ErrorKind) -> Self {
		Self { path: Vec::new(), kind }
	}

	pub fn type_mismatch(expected: &'static str, found: &Tag) -> Self {
		Self::new(ErrorKind::TypeMismatch {
			expected,
			found: found.kind(),
		})
	}

	pub fn missing_field(name: &str) -> Self {
		Self::new(ErrorKind::MissingField { name: name.to_owned() })
	}

	pub fn invalid(message: impl Into<String>) -> Self {
		Self::new(ErrorKind::InvalidValue(message.into()))
	}

	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Path from the root, outermost segment first.
	pub fn path(&self) -> &[PathSegment] {
		&self.path
	}

	/// Prefixes the path with a field name.
	pub fn at_field(mut self, name: &str) -> Self {
		self.path.insert(0, PathSegment::Field(name.to_owned()));
		self
	}

	/// Prefixes the path with a list index.
	pub fn at_index(mut self, index: usize) -> Self {
		self.path.insert(0, PathSegment::Index(index));
		self
	}

	/// True for malformed trees: wrong shapes, missing keys, bad values.
	pub fn is_structural(&self) -> bool {
		matches!(
			self.kind,
			ErrorKind::TypeMismatch { .. } | ErrorKind::MissingField { .. } | ErrorKind::InvalidValue(_) | ErrorKind::UnknownVariant { .. }
		)
	}

	pub fn is_unknown_identifier(&self) -> bool {
		matches!(self.kind, ErrorKind::UnknownIdentifier { .. })
	}
}

struct PathPrefix<'a>(&'a [PathSegment]);

impl fmt::Display for PathPrefix<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return Ok(());
		}
		for (i, segment) in self.0.iter().enumerate() {
			match segment {
				PathSegment::Field(name) if i == 0 => f.write_str(name)?,
				PathSegment::Field(name) => write!(f, ".{name}")?,
				PathSegment::Index(index) => write!(f, "[{index}]")?,
			}
		}
		f.write_str(": ")
	}
}
