use bytes::BufMut;

use crate::{Compound, NbtError, Result, Tag, TagKind};

/// Encodes `root` as a named compound.
pub fn write_named(out: &mut impl BufMut, name: &str, root: &Compound) -> Result<()> {
	out.put_u8(TagKind::Compound.id());
	write_string(out, name)?;
	write_compound(out, root)
}

/// Encodes `tag` in the nameless network form.
pub fn write_unnamed(out: &mut impl BufMut, tag: &Tag) -> Result<()> {
	out.put_u8(tag.kind().id());
	write_payload(out, tag)
}

fn write_string(out: &mut impl BufMut, s: &str) -> Result<()> {
	let len = u16::try_from(s.len()).map_err(|_| NbtError::StringTooLong { len: s.len() })?;
	out.put_u16(len);
	out.put_slice(s.as_bytes());
	Ok(())
}

fn write_len(out: &mut impl BufMut, len: usize) -> Result<()> {
	let len = i32::try_from(len).map_err(|_| NbtError::TooLarge { max: i32::MAX as usize })?;
	out.put_i32(len);
	Ok(())
}

fn write_compound(out: &mut impl BufMut, compound: &Compound) -> Result<()> {
	for (key, value) in compound.iter() {
		out.put_u8(value.kind().id());
		write_string(out, key)?;
		write_payload(out, value)?;
	}
	out.put_u8(TagKind::End.id());
	Ok(())
}

fn write_payload(out: &mut impl BufMut, tag: &Tag) -> Result<()> {
	match tag {
		Tag::Byte(v) => out.put_i8(*v),
		Tag::Short(v) => out.put_i16(*v),
		Tag::Int(v) => out.put_i32(*v),
		Tag::Long(v) => out.put_i64(*v),
		Tag::Float(v) => out.put_f32(*v),
		Tag::Double(v) => out.put_f64(*v),
		Tag::String(s) => write_string(out, s)?,
		Tag::ByteArray(v) => {
			write_len(out, v.len())?;
			v.iter().for_each(|b| out.put_i8(*b));
		}
		Tag::IntArray(v) => {
			write_len(out, v.len())?;
			v.iter().for_each(|i| out.put_i32(*i));
		}
		Tag::LongArray(v) => {
			write_len(out, v.len())?;
			v.iter().for_each(|l| out.put_i64(*l));
		}
		Tag::List(items) => {
			let element = items.first().map_or(TagKind::End, Tag::kind);
			if let Some((index, found)) = items.iter().map(Tag::kind).enumerate().find(|(_, k)| *k != element) {
				return Err(NbtError::MixedList {
					expected: element,
					found,
					index,
				});
			}
			out.put_u8(element.id());
			write_len(out, items.len())?;
			for item in items {
				write_payload(out, item)?;
			}
		}
		Tag::Compound(c) => write_compound(out, c)?,
	}
	Ok(())
}
