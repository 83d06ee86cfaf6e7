// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Cursor-based reader for the tagged wire format.
//!
//! Every field starts with a varint tag `(field_number << 3) | wire_type`.
//! Length-delimited values carry a varint length prefix and are used for
//! strings, raw bytes, nested messages and packed integer arrays. Nested
//! messages are decoded by running the same field loop with a tighter end
//! offset, so a length prefix can never reach past its enclosing message.

use tracing::trace;

use crate::error::{DecodeError, Result};
use crate::message::Message;

/// Largest field number the format allows (29 bits).
const MAX_FIELD_NUMBER: u64 = (1 << 29) - 1;

/// Maximum encoded size of a 64-bit varint.
const MAX_VARINT_BYTES: usize = 10;

/// Default limit on nested messages below the top-level one.
///
/// Decoding recurses once per nesting level, so an unbounded chain of
/// `children` would exhaust the thread stack. A sampler payload spends two
/// levels on the thread envelope, leaving the rest for call frames.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// How a field's value is laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
	Varint,
	Fixed64,
	LengthDelimited,
	Fixed32,
}

impl WireType {
	fn from_raw(raw: u8, offset: usize) -> Result<Self> {
		match raw {
			0 => Ok(Self::Varint),
			1 => Ok(Self::Fixed64),
			2 => Ok(Self::LengthDelimited),
			5 => Ok(Self::Fixed32),
			// 3 and 4 are the deprecated group markers
			other => Err(DecodeError::UnsupportedWireType {
				wire_type: other,
				offset,
			}),
		}
	}

	pub fn raw(self) -> u8 {
		match self {
			Self::Varint => 0,
			Self::Fixed64 => 1,
			Self::LengthDelimited => 2,
			Self::Fixed32 => 5,
		}
	}
}

/// A decoded field header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
	pub field: u32,
	pub wire_type: WireType,
}

/// Reads fields out of a byte buffer.
///
/// The cursor is local to one decode call. `limit` is the end offset of the
/// message currently being decoded; every read is bounds-checked against it.
#[derive(Debug)]
pub struct Reader<'a> {
	buf: &'a [u8],
	pos: usize,
	limit: usize,
	depth: usize,
	max_depth: usize,
}

impl<'a> Reader<'a> {
	pub fn new(buf: &'a [u8]) -> Self {
		Self::with_max_depth(buf, DEFAULT_MAX_DEPTH)
	}

	/// A reader that rejects messages nested deeper than `max_depth`.
	pub fn with_max_depth(buf: &'a [u8], max_depth: usize) -> Self {
		Self {
			buf,
			pos: 0,
			limit: buf.len(),
			depth: 0,
			max_depth,
		}
	}

	/// Nesting level of the message currently being decoded; 0 at top level.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Current cursor offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Bytes left before the end of the current message.
	pub fn remaining(&self) -> usize {
		self.limit.saturating_sub(self.pos)
	}

	/// Run the field loop for message `M` until `end`, starting from its
	/// default value.
	///
	/// Fields missing from `M::FIELDS` are skipped. A known field whose wire
	/// type does not match its declared kind is rejected.
	pub fn read_fields<M: Message>(&mut self, end: usize) -> Result<M> {
		if end > self.limit {
			return Err(DecodeError::LengthOverrun {
				offset: self.pos,
				len: (end - self.pos) as u64,
				available: self.remaining(),
			});
		}

		let outer = std::mem::replace(&mut self.limit, end);
		let mut message = M::default();

		while self.pos < end {
			let tag = self.read_tag()?;
			match M::FIELDS.iter().find(|spec| spec.number == tag.field) {
				Some(spec) if spec.kind.accepts(tag.wire_type) => {
					message.merge_field(tag, self)?;
				}
				Some(spec) => {
					return Err(DecodeError::WireTypeMismatch {
						message: M::NAME,
						field: spec.name,
						number: spec.number,
						expected: spec.kind.wire_type(),
						actual: tag.wire_type,
					});
				}
				None => {
					trace!(message = M::NAME, field = tag.field, "skipping unknown field");
					self.skip(tag.wire_type)?;
				}
			}
		}

		self.limit = outer;
		Ok(message)
	}

	/// Read a length-prefixed nested message.
	pub fn read_message<M: Message>(&mut self) -> Result<M> {
		if self.depth >= self.max_depth {
			return Err(DecodeError::RecursionLimit {
				limit: self.max_depth,
				offset: self.pos,
			});
		}

		let len = self.read_len()?;
		let end = self.pos + len;
		self.depth += 1;
		let message = self.read_fields(end);
		self.depth -= 1;
		message
	}

	pub fn read_tag(&mut self) -> Result<Tag> {
		let offset = self.pos;
		let raw = self.read_varint()?;
		let number = raw >> 3;
		if number == 0 || number > MAX_FIELD_NUMBER {
			return Err(DecodeError::InvalidFieldNumber { number, offset });
		}
		let wire_type = WireType::from_raw((raw & 0x7) as u8, offset)?;
		Ok(Tag {
			field: number as u32,
			wire_type,
		})
	}

	pub fn read_varint(&mut self) -> Result<u64> {
		let start = self.pos;
		let mut value = 0u64;

		for i in 0..MAX_VARINT_BYTES {
			if self.pos >= self.limit {
				return Err(DecodeError::UnexpectedEof { offset: self.pos });
			}
			let byte = self.buf[self.pos];
			self.pos += 1;

			// The tenth byte may only carry the top bit of a u64.
			if i == MAX_VARINT_BYTES - 1 && byte > 1 {
				return Err(DecodeError::VarintOverflow { offset: start });
			}

			value |= u64::from(byte & 0x7f) << (7 * i);
			if byte & 0x80 == 0 {
				return Ok(value);
			}
		}

		Err(DecodeError::VarintOverflow { offset: start })
	}

	/// Two's complement 64-bit integer (`int64`).
	pub fn read_int64(&mut self) -> Result<i64> {
		Ok(self.read_varint()? as i64)
	}

	/// Two's complement 32-bit integer (`int32`). Negative values are sent
	/// sign-extended to ten bytes, so truncation recovers them.
	pub fn read_int32(&mut self) -> Result<i32> {
		Ok(self.read_varint()? as i32)
	}

	/// Zig-zag encoded signed integer (`sint64`).
	pub fn read_sint64(&mut self) -> Result<i64> {
		let n = self.read_varint()?;
		Ok((n >> 1) as i64 ^ -((n & 1) as i64))
	}

	pub fn read_bool(&mut self) -> Result<bool> {
		Ok(self.read_varint()? != 0)
	}

	pub fn read_double(&mut self) -> Result<f64> {
		let bytes = self.take(8)?;
		let mut raw = [0u8; 8];
		raw.copy_from_slice(bytes);
		Ok(f64::from_le_bytes(raw))
	}

	pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
		let len = self.read_len()?;
		self.take(len)
	}

	pub fn read_string(&mut self) -> Result<String> {
		let offset = self.pos;
		let bytes = self.read_bytes()?;
		std::str::from_utf8(bytes)
			.map(str::to_owned)
			.map_err(|_| DecodeError::InvalidUtf8 { offset })
	}

	/// Append a repeated varint field to `out`.
	///
	/// Accepts both the packed layout (one length-delimited span of
	/// back-to-back varints) and a single unpacked element.
	pub fn read_packed_varint(&mut self, wire_type: WireType, out: &mut Vec<i64>) -> Result<()> {
		if wire_type != WireType::LengthDelimited {
			out.push(self.read_int64()?);
			return Ok(());
		}

		let len = self.read_len()?;
		let end = self.pos + len;
		let outer = std::mem::replace(&mut self.limit, end);
		while self.pos < end {
			out.push(self.read_int64()?);
		}
		self.limit = outer;
		Ok(())
	}

	/// Advance past a value of the given wire type without interpreting it.
	pub fn skip(&mut self, wire_type: WireType) -> Result<()> {
		match wire_type {
			WireType::Varint => {
				self.read_varint()?;
			}
			WireType::Fixed64 => {
				self.take(8)?;
			}
			WireType::LengthDelimited => {
				self.read_bytes()?;
			}
			WireType::Fixed32 => {
				self.take(4)?;
			}
		}
		Ok(())
	}

	fn read_len(&mut self) -> Result<usize> {
		let offset = self.pos;
		let len = self.read_varint()?;
		let available = self.remaining();
		if len > available as u64 {
			return Err(DecodeError::LengthOverrun {
				offset,
				len,
				available,
			});
		}
		Ok(len as usize)
	}

	fn take(&mut self, n: usize) -> Result<&'a [u8]> {
		let start = self.pos;
		if n > self.remaining() {
			return Err(DecodeError::UnexpectedEof { offset: start });
		}
		self.pos += n;
		Ok(&self.buf[start..self.pos])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::message::{FieldKind, FieldSpec};

	/// A message whose only field is another `Chain`.
	#[derive(Debug, Default, PartialEq)]
	struct Chain {
		next: Option<Box<Chain>>,
	}

	impl Chain {
		fn levels(&self) -> usize {
			let mut levels = 0;
			let mut current = self.next.as_deref();
			while let Some(chain) = current {
				levels += 1;
				current = chain.next.as_deref();
			}
			levels
		}
	}

	impl Message for Chain {
		const NAME: &'static str = "Chain";
		const FIELDS: &'static [FieldSpec] = &[FieldSpec::new(1, "next", FieldKind::Message)];

		fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
			match tag.field {
				1 => self.next = Some(Box::new(reader.read_message()?)),
				_ => reader.skip(tag.wire_type)?,
			}
			Ok(())
		}
	}

	#[test]
	fn test_read_varint_single_byte() {
		let mut reader = Reader::new(&[0x7f]);
		assert_eq!(reader.read_varint().unwrap(), 127);
		assert_eq!(reader.pos(), 1);
	}

	#[test]
	fn test_read_varint_multi_byte() {
		// 300 = 0b1_0010_1100
		let mut reader = Reader::new(&[0xac, 0x02]);
		assert_eq!(reader.read_varint().unwrap(), 300);
	}

	#[test]
	fn test_read_varint_max() {
		let bytes = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
		let mut reader = Reader::new(&bytes);
		assert_eq!(reader.read_varint().unwrap(), u64::MAX);
	}

	#[test]
	fn test_read_varint_overflow() {
		let bytes = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x02];
		let mut reader = Reader::new(&bytes);
		assert_eq!(
			reader.read_varint(),
			Err(DecodeError::VarintOverflow { offset: 0 })
		);
	}

	#[test]
	fn test_read_varint_truncated() {
		let mut reader = Reader::new(&[0x80, 0x80]);
		assert_eq!(
			reader.read_varint(),
			Err(DecodeError::UnexpectedEof { offset: 2 })
		);
	}

	#[test]
	fn test_read_sint64_zigzag() {
		let mut reader = Reader::new(&[0x00, 0x01, 0x02, 0x03]);
		assert_eq!(reader.read_sint64().unwrap(), 0);
		assert_eq!(reader.read_sint64().unwrap(), -1);
		assert_eq!(reader.read_sint64().unwrap(), 1);
		assert_eq!(reader.read_sint64().unwrap(), -2);
	}

	#[test]
	fn test_read_int32_negative() {
		// -1 as int32 is sign-extended to ten bytes on the wire
		let bytes = [0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01];
		let mut reader = Reader::new(&bytes);
		assert_eq!(reader.read_int32().unwrap(), -1);
	}

	#[test]
	fn test_read_double() {
		let bytes = 12.5f64.to_le_bytes();
		let mut reader = Reader::new(&bytes);
		assert_eq!(reader.read_double().unwrap(), 12.5);
	}

	#[test]
	fn test_read_double_truncated() {
		let mut reader = Reader::new(&[0, 0, 0]);
		assert!(matches!(
			reader.read_double(),
			Err(DecodeError::UnexpectedEof { .. })
		));
	}

	#[test]
	fn test_read_string() {
		let mut reader = Reader::new(&[0x03, b'f', b'o', b'o']);
		assert_eq!(reader.read_string().unwrap(), "foo");
	}

	#[test]
	fn test_read_string_length_overrun() {
		let mut reader = Reader::new(&[0x05, b'f', b'o']);
		assert_eq!(
			reader.read_string(),
			Err(DecodeError::LengthOverrun {
				offset: 0,
				len: 5,
				available: 2,
			})
		);
	}

	#[test]
	fn test_read_string_invalid_utf8() {
		let mut reader = Reader::new(&[0x02, 0xc3, 0x28]);
		assert_eq!(
			reader.read_string(),
			Err(DecodeError::InvalidUtf8 { offset: 0 })
		);
	}

	#[test]
	fn test_nesting_past_max_depth_is_rejected() {
		// three nested empty messages in field 1: 0a 04 0a 02 0a 00
		let bytes = [0x0a, 0x04, 0x0a, 0x02, 0x0a, 0x00];

		let mut reader = Reader::with_max_depth(&bytes, 3);
		let chain: Chain = reader.read_fields(bytes.len()).unwrap();
		assert_eq!(chain.levels(), 3);
		assert_eq!(reader.depth(), 0);

		let mut reader = Reader::with_max_depth(&bytes, 2);
		assert_eq!(
			reader.read_fields::<Chain>(bytes.len()),
			Err(DecodeError::RecursionLimit { limit: 2, offset: 5 })
		);
	}

	#[test]
	fn test_read_tag() {
		// field 3, length-delimited
		let mut reader = Reader::new(&[0x1a]);
		let tag = reader.read_tag().unwrap();
		assert_eq!(tag.field, 3);
		assert_eq!(tag.wire_type, WireType::LengthDelimited);
	}

	#[test]
	fn test_read_tag_rejects_groups() {
		// field 1, start group
		let mut reader = Reader::new(&[0x0b]);
		assert_eq!(
			reader.read_tag(),
			Err(DecodeError::UnsupportedWireType {
				wire_type: 3,
				offset: 0,
			})
		);
	}

	#[test]
	fn test_read_tag_rejects_field_zero() {
		let mut reader = Reader::new(&[0x00]);
		assert!(matches!(
			reader.read_tag(),
			Err(DecodeError::InvalidFieldNumber { number: 0, .. })
		));
	}

	#[test]
	fn test_read_packed_varint() {
		let mut reader = Reader::new(&[0x03, 0x01, 0x96, 0x01]);
		let mut out = Vec::new();
		reader
			.read_packed_varint(WireType::LengthDelimited, &mut out)
			.unwrap();
		assert_eq!(out, vec![1, 150]);
		assert_eq!(reader.remaining(), 0);
	}

	#[test]
	fn test_read_packed_varint_unpacked_element() {
		let mut reader = Reader::new(&[0x07]);
		let mut out = vec![1];
		reader.read_packed_varint(WireType::Varint, &mut out).unwrap();
		assert_eq!(out, vec![1, 7]);
	}

	#[test]
	fn test_skip_each_wire_type() {
		let bytes = [
			0x96, 0x01, // varint
			1, 2, 3, 4, 5, 6, 7, 8, // fixed64
			0x02, b'h', b'i', // length-delimited
			1, 2, 3, 4, // fixed32
		];
		let mut reader = Reader::new(&bytes);
		reader.skip(WireType::Varint).unwrap();
		assert_eq!(reader.pos(), 2);
		reader.skip(WireType::Fixed64).unwrap();
		assert_eq!(reader.pos(), 10);
		reader.skip(WireType::LengthDelimited).unwrap();
		assert_eq!(reader.pos(), 13);
		reader.skip(WireType::Fixed32).unwrap();
		assert_eq!(reader.remaining(), 0);
	}
}
