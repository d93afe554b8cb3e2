use crate::TagKind;

/// Failures while reading, writing or bridging tag trees.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NbtError {
	#[error("unexpected end of input: needed {needed} more bytes at offset {offset}")]
	UnexpectedEof { offset: usize, needed: usize },

	#[error("unknown tag type id {id} at offset {offset}")]
	UnknownTagId { id: u8, offset: usize },

	#[error("negative length {len} at offset {offset}")]
	NegativeLength { len: i32, offset: usize },

	#[error("list of end tags declares {len} elements")]
	EndListNotEmpty { len: i32 },

	#[error("root must be a compound, found {found}")]
	RootNotCompound { found: TagKind },

	#[error("nesting deeper than {max} levels")]
	TooDeep { max: usize },

	#[error("input would allocate more than {max} bytes")]
	TooLarge { max: usize },

	#[error("invalid utf-8 string at offset {offset}")]
	InvalidUtf8 { offset: usize },

	#[error("string of {len} bytes exceeds the u16 length prefix")]
	StringTooLong { len: usize },

	#[error("heterogeneous list: expected {expected}, found {found} at index {index}")]
	MixedList { expected: TagKind, found: TagKind, index: usize },

	#[error("{0} trailing bytes after root tag")]
	TrailingBytes(usize),

	#[error("json value cannot be represented as a tag: {0}")]
	Json(String),
}
