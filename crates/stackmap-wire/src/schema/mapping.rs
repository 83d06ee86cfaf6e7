// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mapping table schemas (`*.pbmapping` payloads).
//!
//! Map fields are sent as repeated entry messages with the key in field 1
//! and the value in field 2. A key that appears twice keeps the later value.

use std::collections::HashMap;

use crate::error::Result;
use crate::message::{Encode, FieldKind, FieldSpec, Message};
use crate::reader::{Reader, Tag};
use crate::writer::Writer;

/// A method of a mapped class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodMapping {
	pub mapped: String,
	pub obfuscated: String,
	/// Method descriptor in the table's obfuscated type space.
	pub description: String,
}

impl Message for MethodMapping {
	const NAME: &'static str = "MethodMapping";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "mapped", FieldKind::String),
		FieldSpec::new(2, "obfuscated", FieldKind::String),
		FieldSpec::new(3, "description", FieldKind::String),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.mapped = reader.read_string()?,
			2 => self.obfuscated = reader.read_string()?,
			3 => self.description = reader.read_string()?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for MethodMapping {
	fn encode(&self, writer: &mut Writer) {
		writer.write_string_field(1, &self.mapped);
		writer.write_string_field(2, &self.obfuscated);
		writer.write_string_field(3, &self.description);
	}
}

/// A class and the methods scoped to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassMapping {
	pub mapped: String,
	pub obfuscated: String,
	pub methods: Vec<MethodMapping>,
}

impl Message for ClassMapping {
	const NAME: &'static str = "ClassMapping";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "mapped", FieldKind::String),
		FieldSpec::new(2, "obfuscated", FieldKind::String),
		FieldSpec::new(3, "methods", FieldKind::Message),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.mapped = reader.read_string()?,
			2 => self.obfuscated = reader.read_string()?,
			3 => self.methods.push(reader.read_message()?),
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for ClassMapping {
	fn encode(&self, writer: &mut Writer) {
		writer.write_string_field(1, &self.mapped);
		writer.write_string_field(2, &self.obfuscated);
		for method in &self.methods {
			writer.write_message_field(3, method);
		}
	}
}

/// `map<string, ClassMapping>` entry.
#[derive(Debug, Default)]
struct ClassEntry {
	key: String,
	value: ClassMapping,
}

impl Message for ClassEntry {
	const NAME: &'static str = "ClassEntry";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "key", FieldKind::String),
		FieldSpec::new(2, "value", FieldKind::Message),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.key = reader.read_string()?,
			2 => self.value = reader.read_message()?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

/// `map<string, string>` entry.
#[derive(Debug, Default)]
struct StringEntry {
	key: String,
	value: String,
}

impl Message for StringEntry {
	const NAME: &'static str = "StringEntry";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "key", FieldKind::String),
		FieldSpec::new(2, "value", FieldKind::String),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.key = reader.read_string()?,
			2 => self.value = reader.read_string()?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

fn read_class_entry(reader: &mut Reader<'_>, into: &mut HashMap<String, ClassMapping>) -> Result<()> {
	let entry: ClassEntry = reader.read_message()?;
	into.insert(entry.key, entry.value);
	Ok(())
}

fn read_string_entry(reader: &mut Reader<'_>, into: &mut HashMap<String, String>) -> Result<()> {
	let entry: StringEntry = reader.read_message()?;
	into.insert(entry.key, entry.value);
	Ok(())
}

fn write_class_map(writer: &mut Writer, field: u32, map: &HashMap<String, ClassMapping>) {
	for (key, value) in map {
		writer.write_nested(field, |w| {
			w.write_string_field(1, key);
			w.write_message_field(2, value);
		});
	}
}

fn write_string_map(writer: &mut Writer, field: u32, map: &HashMap<String, String>) {
	for (key, value) in map {
		writer.write_nested(field, |w| {
			w.write_string_field(1, key);
			w.write_string_field(2, value);
		});
	}
}

/// Bukkit (CraftBukkit) mappings.
///
/// `classes` is keyed by the Bukkit short class name as it appears under
/// `net.minecraft.server.<nms>.`; each entry's `obfuscated` is the vanilla
/// obfuscated identifier shared with the Mojang and MCP tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BukkitMappings {
	pub classes: HashMap<String, ClassMapping>,
}

impl Message for BukkitMappings {
	const NAME: &'static str = "BukkitMappings";
	const FIELDS: &'static [FieldSpec] = &[FieldSpec::new(1, "classes", FieldKind::Message)];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => read_class_entry(reader, &mut self.classes)?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for BukkitMappings {
	fn encode(&self, writer: &mut Writer) {
		write_class_map(writer, 1, &self.classes);
	}
}

/// Mojang official mappings, keyed by obfuscated class name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MojangMappings {
	pub classes: HashMap<String, ClassMapping>,
}

impl Message for MojangMappings {
	const NAME: &'static str = "MojangMappings";
	const FIELDS: &'static [FieldSpec] = &[FieldSpec::new(1, "classes", FieldKind::Message)];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => read_class_entry(reader, &mut self.classes)?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for MojangMappings {
	fn encode(&self, writer: &mut Writer) {
		write_class_map(writer, 1, &self.classes);
	}
}

/// MCP mappings.
///
/// `classes` is keyed by obfuscated class name. `methods` is a flat
/// obfuscated → mapped method name table that is not scoped to a class.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct McpMappings {
	pub classes: HashMap<String, ClassMapping>,
	pub methods: HashMap<String, String>,
}

impl Message for McpMappings {
	const NAME: &'static str = "McpMappings";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "classes", FieldKind::Message),
		FieldSpec::new(2, "methods", FieldKind::Message),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => read_class_entry(reader, &mut self.classes)?,
			2 => read_string_entry(reader, &mut self.methods)?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for McpMappings {
	fn encode(&self, writer: &mut Writer) {
		write_class_map(writer, 1, &self.classes);
		write_string_map(writer, 2, &self.methods);
	}
}

/// Yarn mappings: flat obfuscated → mapped tables for classes and methods.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YarnMappings {
	pub classes: HashMap<String, String>,
	pub methods: HashMap<String, String>,
}

impl Message for YarnMappings {
	const NAME: &'static str = "YarnMappings";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "classes", FieldKind::Message),
		FieldSpec::new(2, "methods", FieldKind::Message),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => read_string_entry(reader, &mut self.classes)?,
			2 => read_string_entry(reader, &mut self.methods)?,
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for YarnMappings {
	fn encode(&self, writer: &mut Writer) {
		write_string_map(writer, 1, &self.classes);
		write_string_map(writer, 2, &self.methods);
	}
}
