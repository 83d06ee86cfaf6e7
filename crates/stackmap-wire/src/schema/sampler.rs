// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sampler payload envelope and its metadata.

use crate::enums::{
	CommandSenderType, DataAggregatorType, PlatformType, ThreadDumperType, ThreadGrouper,
};
use crate::error::Result;
use crate::message::{Encode, FieldKind, FieldSpec, Message};
use crate::reader::{Reader, Tag};
use crate::schema::stack::ThreadNode;
use crate::writer::Writer;

/// Identity of whoever started the profiler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSender {
	pub kind: CommandSenderType,
	pub name: String,
	pub unique_id: String,
}

impl Message for CommandSender {
	const NAME: &'static str = "CommandSender";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "type", FieldKind::Enum),
		FieldSpec::new(2, "name", FieldKind::String),
		FieldSpec::new(3, "unique_id", FieldKind::String),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.kind = CommandSenderType::from_raw(reader.read_int32()?),
			2 => self.name = reader.read_string()?,
			3 => self.unique_id = reader.read_string()?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for CommandSender {
	fn encode(&self, writer: &mut Writer) {
		writer.write_int_field(1, i64::from(self.kind.raw()));
		writer.write_string_field(2, &self.name);
		writer.write_string_field(3, &self.unique_id);
	}
}

/// Platform the profiled process was running on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlatformMetadata {
	pub kind: PlatformType,
	pub name: String,
	pub version: String,
	pub minecraft_version: String,
}

impl Message for PlatformMetadata {
	const NAME: &'static str = "PlatformMetadata";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "type", FieldKind::Enum),
		FieldSpec::new(2, "name", FieldKind::String),
		FieldSpec::new(3, "version", FieldKind::String),
		FieldSpec::new(4, "minecraft_version", FieldKind::String),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.kind = PlatformType::from_raw(reader.read_int32()?),
			2 => self.name = reader.read_string()?,
			3 => self.version = reader.read_string()?,
			4 => self.minecraft_version = reader.read_string()?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for PlatformMetadata {
	fn encode(&self, writer: &mut Writer) {
		writer.write_int_field(1, i64::from(self.kind.raw()));
		writer.write_string_field(2, &self.name);
		writer.write_string_field(3, &self.version);
		writer.write_string_field(4, &self.minecraft_version);
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThreadDumper {
	pub kind: ThreadDumperType,
	/// Thread ids, for [`ThreadDumperType::Specific`].
	pub ids: Vec<i64>,
	/// Name patterns, for [`ThreadDumperType::Regex`].
	pub patterns: Vec<String>,
}

impl Message for ThreadDumper {
	const NAME: &'static str = "ThreadDumper";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "type", FieldKind::Enum),
		FieldSpec::new(2, "ids", FieldKind::PackedVarint),
		FieldSpec::new(3, "patterns", FieldKind::String),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.kind = ThreadDumperType::from_raw(reader.read_int32()?),
			2 => reader.read_packed_varint(tag.wire_type, &mut self.ids)?,
			3 => self.patterns.push(reader.read_string()?),
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for ThreadDumper {
	fn encode(&self, writer: &mut Writer) {
		writer.write_int_field(1, i64::from(self.kind.raw()));
		writer.write_packed_varint_field(2, &self.ids);
		for pattern in &self.patterns {
			writer.write_bytes_field(3, pattern.as_bytes());
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataAggregator {
	pub kind: DataAggregatorType,
	pub thread_grouper: ThreadGrouper,
	/// Minimum tick duration recorded by a ticked aggregator.
	pub tick_length_threshold: i64,
}

impl Message for DataAggregator {
	const NAME: &'static str = "DataAggregator";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "type", FieldKind::Enum),
		FieldSpec::new(2, "thread_grouper", FieldKind::Enum),
		FieldSpec::new(3, "tick_length_threshold", FieldKind::Varint),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.kind = DataAggregatorType::from_raw(reader.read_int32()?),
			2 => self.thread_grouper = ThreadGrouper::from_raw(reader.read_int32()?),
			3 => self.tick_length_threshold = reader.read_int64()?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for DataAggregator {
	fn encode(&self, writer: &mut Writer) {
		writer.write_int_field(1, i64::from(self.kind.raw()));
		writer.write_int_field(2, i64::from(self.thread_grouper.raw()));
		writer.write_int_field(3, self.tick_length_threshold);
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SamplerMetadata {
	pub user: Option<CommandSender>,
	/// Unix epoch millis.
	pub start_time: i64,
	/// Sampling interval in milliseconds.
	pub interval: i32,
	pub thread_dumper: Option<ThreadDumper>,
	pub data_aggregator: Option<DataAggregator>,
	pub comment: String,
	pub platform: Option<PlatformMetadata>,
}

impl Message for SamplerMetadata {
	const NAME: &'static str = "SamplerMetadata";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "user", FieldKind::Message),
		FieldSpec::new(2, "start_time", FieldKind::Varint),
		FieldSpec::new(3, "interval", FieldKind::Varint),
		FieldSpec::new(4, "thread_dumper", FieldKind::Message),
		FieldSpec::new(5, "data_aggregator", FieldKind::Message),
		FieldSpec::new(6, "comment", FieldKind::String),
		FieldSpec::new(7, "platform", FieldKind::Message),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.user = Some(reader.read_message()?),
			2 => self.start_time = reader.read_int64()?,
			3 => self.interval = reader.read_int32()?,
			4 => self.thread_dumper = Some(reader.read_message()?),
			5 => self.data_aggregator = Some(reader.read_message()?),
			6 => self.comment = reader.read_string()?,
			7 => self.platform = Some(reader.read_message()?),
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for SamplerMetadata {
	fn encode(&self, writer: &mut Writer) {
		if let Some(user) = &self.user {
			writer.write_message_field(1, user);
		}
		writer.write_int_field(2, self.start_time);
		writer.write_int_field(3, i64::from(self.interval));
		if let Some(thread_dumper) = &self.thread_dumper {
			writer.write_message_field(4, thread_dumper);
		}
		if let Some(data_aggregator) = &self.data_aggregator {
			writer.write_message_field(5, data_aggregator);
		}
		writer.write_string_field(6, &self.comment);
		if let Some(platform) = &self.platform {
			writer.write_message_field(7, platform);
		}
	}
}

/// Top-level sampler payload.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SamplerData {
	pub metadata: Option<SamplerMetadata>,
	pub threads: Vec<ThreadNode>,
}

impl SamplerData {
	pub fn platform(&self) -> Option<&PlatformMetadata> {
		self.metadata.as_ref().and_then(|m| m.platform.as_ref())
	}
}

impl Message for SamplerData {
	const NAME: &'static str = "SamplerData";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "metadata", FieldKind::Message),
		FieldSpec::new(2, "threads", FieldKind::Message),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.metadata = Some(reader.read_message()?),
			2 => self.threads.push(reader.read_message()?),
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for SamplerData {
	fn encode(&self, writer: &mut Writer) {
		if let Some(metadata) = &self.metadata {
			writer.write_message_field(1, metadata);
		}
		for thread in &self.threads {
			writer.write_message_field(2, thread);
		}
	}
}
