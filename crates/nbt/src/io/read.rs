use bytes::Buf;

use super::NbtLimits;
use crate::{Compound, NbtError, Result, Tag, TagKind};

/// Decodes a named root compound, returning its name and value.
///
/// The whole input must be consumed.
pub fn read_named(input: &[u8], limits: NbtLimits) -> Result<(String, Compound)> {
	let mut reader = Reader::new(input, limits);
	let kind = reader.kind()?;
	if kind != TagKind::Compound {
		return Err(NbtError::RootNotCompound { found: kind });
	}
	let name = reader.string()?;
	let root = match reader.payload(kind, 0)? {
		Tag::Compound(root) => root,
		other => return Err(NbtError::RootNotCompound { found: other.kind() }),
	};
	reader.finish()?;
	Ok((name, root))
}

/// Decodes a nameless root of any kind.
pub fn read_unnamed(input: &[u8], limits: NbtLimits) -> Result<Tag> {
	let mut reader = Reader::new(input, limits);
	let kind = reader.kind()?;
	if kind == TagKind::End {
		return Err(NbtError::UnknownTagId { id: 0, offset: 0 });
	}
	let tag = reader.payload(kind, 0)?;
	reader.finish()?;
	Ok(tag)
}

struct Reader<'a> {
	buf: &'a [u8],
	total: usize,
	limits: NbtLimits,
	allocated: usize,
}

impl<'a> Reader<'a> {
	fn new(buf: &'a [u8], limits: NbtLimits) -> Self {
		Self {
			buf,
			total: buf.len(),
			limits,
			allocated: 0,
		}
	}

	fn offset(&self) -> usize {
		self.total - self.buf.remaining()
	}

	fn need(&self, needed: usize) -> Result<()> {
		if self.buf.remaining() < needed {
			return Err(NbtError::UnexpectedEof {
				offset: self.offset(),
				needed: needed - self.buf.remaining(),
			});
		}
		Ok(())
	}

	fn charge(&mut self, bytes: usize) -> Result<()> {
		self.allocated = self.allocated.saturating_add(bytes);
		if self.allocated > self.limits.max_bytes {
			return Err(NbtError::TooLarge { max: self.limits.max_bytes });
		}
		Ok(())
	}

	fn finish(self) -> Result<()> {
		match self.buf.remaining() {
			0 => Ok(()),
			n => Err(NbtError::TrailingBytes(n)),
		}
	}

	fn kind(&mut self) -> Result<TagKind> {
		self.need(1)?;
		let offset = self.offset();
		let id = self.buf.get_u8();
		TagKind::from_id(id).ok_or(NbtError::UnknownTagId { id, offset })
	}

	/// Reads an i32 length prefix, checking that `len * min_size` bytes remain.
	fn len(&mut self, min_size: usize) -> Result<usize> {
		self.need(4)?;
		let offset = self.offset();
		let len = self.buf.get_i32();
		if len < 0 {
			return Err(NbtError::NegativeLength { len, offset });
		}
		let len = len as usize;
		self.need(len.saturating_mul(min_size))?;
		Ok(len)
	}

	fn string(&mut self) -> Result<String> {
		self.need(2)?;
		let len = self.buf.get_u16() as usize;
		self.need(len)?;
		self.charge(len)?;
		let offset = self.offset();
		let bytes = &self.buf[..len];
		let s = std::str::from_utf8(bytes)
			.map_err(|_| NbtError::InvalidUtf8 { offset })?
			.to_owned();
		self.buf.advance(len);
		Ok(s)
	}

	fn payload(&mut self, kind: TagKind, depth: usize) -> Result<Tag> {
		Ok(match kind {
			TagKind::End => return Err(NbtError::UnknownTagId { id: 0, offset: self.offset() }),
			TagKind::Byte => {
				self.need(1)?;
				Tag::Byte(self.buf.get_i8())
			}
			TagKind::Short => {
				self.need(2)?;
				Tag::Short(self.buf.get_i16())
			}
			TagKind::Int => {
				self.need(4)?;
				Tag::Int(self.buf.get_i32())
			}
			TagKind::Long => {
				self.need(8)?;
				Tag::Long(self.buf.get_i64())
			}
			TagKind::Float => {
				self.need(4)?;
				Tag::Float(self.buf.get_f32())
			}
			TagKind::Double => {
				self.need(8)?;
				Tag::Double(self.buf.get_f64())
			}
			TagKind::String => Tag::String(self.string()?),
			TagKind::ByteArray => {
				let len = self.len(1)?;
				self.charge(len)?;
				Tag::ByteArray((0..len).map(|_| self.buf.get_i8()).collect())
			}
			TagKind::IntArray => {
				let len = self.len(4)?;
				self.charge(len * 4)?;
				Tag::IntArray((0..len).map(|_| self.buf.get_i32()).collect())
			}
			TagKind::LongArray => {
				let len = self.len(8)?;
				self.charge(len * 8)?;
				Tag::LongArray((0..len).map(|_| self.buf.get_i64()).collect())
			}
			TagKind::List => {
				let depth = self.descend(depth)?;
				let element = self.kind()?;
				let len = self.len(min_payload_size(element))?;
				if element == TagKind::End && len > 0 {
					return Err(NbtError::EndListNotEmpty { len: len as i32 });
				}
				self.charge(len.saturating_mul(std::mem::size_of::<Tag>()))?;
				let mut items = Vec::with_capacity(len);
				for _ in 0..len {
					items.push(self.payload(element, depth)?);
				}
				Tag::List(items)
			}
			TagKind::Compound => {
				let depth = self.descend(depth)?;
				let mut compound = Compound::new();
				loop {
					let kind = self.kind()?;
					if kind == TagKind::End {
						break;
					}
					let name = self.string()?;
					self.charge(std::mem::size_of::<Tag>())?;
					let value = self.payload(kind, depth)?;
					compound.insert(name, value);
				}
				Tag::Compound(compound)
			}
		})
	}

	fn descend(&self, depth: usize) -> Result<usize> {
		let next = depth + 1;
		if next > self.limits.max_depth {
			return Err(NbtError::TooDeep { max: self.limits.max_depth });
		}
		Ok(next)
	}
}

/// Smallest number of bytes a payload of `kind` can occupy.
fn min_payload_size(kind: TagKind) -> usize {
	match kind {
		TagKind::End => 0,
		TagKind::Byte | TagKind::Compound => 1,
		TagKind::Short | TagKind::String => 2,
		TagKind::Int | TagKind::Float | TagKind::ByteArray | TagKind::IntArray | TagKind::LongArray => 4,
		TagKind::Long | TagKind::Double => 8,
		TagKind::List => 5,
	}
}
