// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Reference encoder for the wire format.
//!
//! Varint fields holding 0 and empty string fields are omitted, matching
//! what the producers of these payloads emit. Doubles and raw byte fields
//! are always written, so a `0.0` time still appears on the wire.

use crate::message::Encode;
use crate::reader::WireType;

#[derive(Debug, Default)]
pub struct Writer {
	buf: Vec<u8>,
}

impl Writer {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn into_inner(self) -> Vec<u8> {
		self.buf
	}

	pub fn write_tag(&mut self, field: u32, wire_type: WireType) {
		self.write_varint((u64::from(field) << 3) | u64::from(wire_type.raw()));
	}

	pub fn write_varint(&mut self, mut value: u64) {
		while value >= 0x80 {
			self.buf.push((value as u8 & 0x7f) | 0x80);
			value >>= 7;
		}
		self.buf.push(value as u8);
	}

	pub fn write_varint_field(&mut self, field: u32, value: u64) {
		if value != 0 {
			self.write_tag(field, WireType::Varint);
			self.write_varint(value);
		}
	}

	/// `int32`/`int64`/enum fields: negatives are sign-extended to 64 bits.
	pub fn write_int_field(&mut self, field: u32, value: i64) {
		self.write_varint_field(field, value as u64);
	}

	pub fn write_sint_field(&mut self, field: u32, value: i64) {
		self.write_varint_field(field, ((value << 1) ^ (value >> 63)) as u64);
	}

	pub fn write_double_field(&mut self, field: u32, value: f64) {
		self.write_tag(field, WireType::Fixed64);
		self.buf.extend_from_slice(&value.to_le_bytes());
	}

	pub fn write_bytes_field(&mut self, field: u32, value: &[u8]) {
		self.write_tag(field, WireType::LengthDelimited);
		self.write_varint(value.len() as u64);
		self.buf.extend_from_slice(value);
	}

	pub fn write_string_field(&mut self, field: u32, value: &str) {
		if !value.is_empty() {
			self.write_bytes_field(field, value.as_bytes());
		}
	}

	pub fn write_packed_varint_field(&mut self, field: u32, values: &[i64]) {
		if values.is_empty() {
			return;
		}
		let mut packed = Writer::new();
		for value in values {
			packed.write_varint(*value as u64);
		}
		self.write_bytes_field(field, &packed.buf);
	}

	pub fn write_message_field<M: Encode>(&mut self, field: u32, message: &M) {
		self.write_nested(field, |w| message.encode(w));
	}

	/// Write a nested message whose body is produced by `body`.
	pub fn write_nested(&mut self, field: u32, body: impl FnOnce(&mut Writer)) {
		let mut nested = Writer::new();
		body(&mut nested);
		self.write_bytes_field(field, &nested.buf);
	}
}
