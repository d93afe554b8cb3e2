//! Big-endian binary encoding of tag trees.
//!
//! Two root forms are supported:
//!
//! - **named** (`read_named` / `write_named`): type id, u16-prefixed name, payload.
//!   The root must be a compound. Used by files.
//! - **unnamed** (`read_unnamed` / `write_unnamed`): type id then payload. Any kind
//!   may be the root. Used by the network protocol.
//!
//! Strings are encoded as standard UTF-8 rather than Java's modified UTF-8.

mod read;
mod write;

pub use read::{read_named, read_unnamed};
pub use write::{write_named, write_unnamed};

/// Bounds applied while decoding untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NbtLimits {
	/// Maximum nesting of lists and compounds below the root.
	pub max_depth: usize,
	/// Maximum number of payload bytes the decoded tree may allocate.
	pub max_bytes: usize,
}

impl NbtLimits {
	pub const DEFAULT_MAX_DEPTH: usize = 512;
	pub const DEFAULT_MAX_BYTES: usize = 2 * 1024 * 1024;

	/// No allocation cap; depth is still bounded to protect the stack.
	pub const fn unbounded() -> Self {
		Self {
			max_depth: Self::DEFAULT_MAX_DEPTH,
			max_bytes: usize::MAX,
		}
	}

	pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}
}

impl Default for NbtLimits {
	fn default() -> Self {
		Self {
			max_depth: Self::DEFAULT_MAX_DEPTH,
			max_bytes: Self::DEFAULT_MAX_BYTES,
		}
	}
}
