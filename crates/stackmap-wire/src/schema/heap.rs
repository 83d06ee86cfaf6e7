// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Heap snapshot payload.

use crate::error::Result;
use crate::message::{Encode, FieldKind, FieldSpec, Message};
use crate::reader::{Reader, Tag};
use crate::schema::sampler::CommandSender;
use crate::writer::Writer;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeapMetadata {
	pub user: Option<CommandSender>,
}

impl Message for HeapMetadata {
	const NAME: &'static str = "HeapMetadata";
	const FIELDS: &'static [FieldSpec] = &[FieldSpec::new(1, "user", FieldKind::Message)];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.user = Some(reader.read_message()?),
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for HeapMetadata {
	fn encode(&self, writer: &mut Writer) {
		if let Some(user) = &self.user {
			writer.write_message_field(1, user);
		}
	}
}

/// One row of a class histogram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeapEntry {
	/// Rank in the histogram, 1 = largest.
	pub order: i32,
	pub instances: i32,
	/// Total shallow size in bytes.
	pub size: i64,
	pub type_name: String,
}

impl Message for HeapEntry {
	const NAME: &'static str = "HeapEntry";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "order", FieldKind::Varint),
		FieldSpec::new(2, "instances", FieldKind::Varint),
		FieldSpec::new(3, "size", FieldKind::Varint),
		FieldSpec::new(4, "type", FieldKind::String),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.order = reader.read_int32()?,
			2 => self.instances = reader.read_int32()?,
			3 => self.size = reader.read_int64()?,
			4 => self.type_name = reader.read_string()?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for HeapEntry {
	fn encode(&self, writer: &mut Writer) {
		writer.write_int_field(1, i64::from(self.order));
		writer.write_int_field(2, i64::from(self.instances));
		writer.write_int_field(3, self.size);
		writer.write_string_field(4, &self.type_name);
	}
}

/// Top-level heap snapshot payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeapData {
	pub metadata: Option<HeapMetadata>,
	pub entries: Vec<HeapEntry>,
}

impl HeapData {
	/// Sum of all entry sizes in bytes, saturating at `i64::MAX`.
	pub fn total_size(&self) -> i64 {
		self.entries
			.iter()
			.fold(0i64, |total, entry| total.saturating_add(entry.size))
	}
}

impl Message for HeapData {
	const NAME: &'static str = "HeapData";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "metadata", FieldKind::Message),
		FieldSpec::new(2, "entries", FieldKind::Message),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.metadata = Some(reader.read_message()?),
			2 => self.entries.push(reader.read_message()?),
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for HeapData {
	fn encode(&self, writer: &mut Writer) {
		if let Some(metadata) = &self.metadata {
			writer.write_message_field(1, metadata);
		}
		for entry in &self.entries {
			writer.write_message_field(2, entry);
		}
	}
}
