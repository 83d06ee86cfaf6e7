// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Message trait and field tables shared by every schema.

use crate::error::Result;
use crate::reader::{Reader, Tag, WireType};
use crate::writer::Writer;

/// Declared value kind of a schema field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
	/// Plain varint: integers and booleans.
	Varint,
	/// Closed enumeration sent as a varint.
	Enum,
	/// Zig-zag varint.
	SignedVarint,
	/// Little-endian IEEE 754 double.
	Double,
	String,
	Bytes,
	/// Nested message (also used for map entries).
	Message,
	/// Repeated varints, packed or not.
	PackedVarint,
}

impl FieldKind {
	/// The wire type a well-formed encoder emits for this kind.
	pub fn wire_type(self) -> WireType {
		match self {
			Self::Varint | Self::Enum | Self::SignedVarint => WireType::Varint,
			Self::Double => WireType::Fixed64,
			Self::String | Self::Bytes | Self::Message | Self::PackedVarint => {
				WireType::LengthDelimited
			}
		}
	}

	pub fn accepts(self, wire_type: WireType) -> bool {
		match self {
			Self::PackedVarint => {
				matches!(wire_type, WireType::LengthDelimited | WireType::Varint)
			}
			other => other.wire_type() == wire_type,
		}
	}
}

/// One row of a message's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
	pub number: u32,
	pub name: &'static str,
	pub kind: FieldKind,
}

impl FieldSpec {
	pub const fn new(number: u32, name: &'static str, kind: FieldKind) -> Self {
		Self { number, name, kind }
	}
}

/// A decodable message type.
///
/// `Default` supplies the value of every omitted field. `merge_field` is
/// only called for field numbers present in `FIELDS` whose wire type
/// matched; it must consume exactly one value.
pub trait Message: Default {
	const NAME: &'static str;
	const FIELDS: &'static [FieldSpec];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()>;
}

/// An encodable message type, used by the reference encoder.
pub trait Encode {
	fn encode(&self, writer: &mut Writer);
}

/// Decode a complete buffer as message `M`, with nesting bounded by
/// [`DEFAULT_MAX_DEPTH`](crate::reader::DEFAULT_MAX_DEPTH).
pub fn decode<M: Message>(buf: &[u8]) -> Result<M> {
	let mut reader = Reader::new(buf);
	reader.read_fields(buf.len())
}

/// Like [`decode`] with a caller-chosen nesting limit.
pub fn decode_with_max_depth<M: Message>(buf: &[u8], max_depth: usize) -> Result<M> {
	let mut reader = Reader::with_max_depth(buf, max_depth);
	reader.read_fields(buf.len())
}

/// Encode `message` into a fresh buffer.
pub fn encode<M: Encode>(message: &M) -> Vec<u8> {
	let mut writer = Writer::new();
	message.encode(&mut writer);
	writer.into_inner()
}
