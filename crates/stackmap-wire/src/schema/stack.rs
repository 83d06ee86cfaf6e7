// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sampled call trees.

use crate::error::Result;
use crate::message::{Encode, FieldKind, FieldSpec, Message};
use crate::reader::{Reader, Tag};
use crate::writer::Writer;

/// Class name the sampler uses for frames outside managed code.
pub const NATIVE_CLASS_NAME: &str = "native";

/// One frame in a sampled call tree.
///
/// A node with an empty class or method name is a synthetic thread root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StackTraceNode {
	/// Time spent in this frame and its children, in the producer's unit
	/// (normally milliseconds).
	pub time: f64,
	pub children: Vec<StackTraceNode>,
	pub class_name: String,
	pub method_name: String,
	/// 0 when unknown.
	pub line_number: i32,
	/// JVM method descriptor, e.g. `(Lnet/minecraft/server/v1/Entity;)V`.
	pub method_desc: Option<String>,
}

impl StackTraceNode {
	pub fn is_thread_root(&self) -> bool {
		self.class_name.is_empty() || self.method_name.is_empty()
	}

	pub fn is_native(&self) -> bool {
		self.class_name == NATIVE_CLASS_NAME
	}
}

impl Message for StackTraceNode {
	const NAME: &'static str = "StackTraceNode";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "time", FieldKind::Double),
		FieldSpec::new(2, "children", FieldKind::Message),
		FieldSpec::new(3, "class_name", FieldKind::String),
		FieldSpec::new(4, "method_name", FieldKind::String),
		FieldSpec::new(5, "line_number", FieldKind::Varint),
		FieldSpec::new(6, "method_desc", FieldKind::String),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.time = reader.read_double()?,
			2 => self.children.push(reader.read_message()?),
			3 => self.class_name = reader.read_string()?,
			4 => self.method_name = reader.read_string()?,
			5 => self.line_number = reader.read_int32()?,
			6 => self.method_desc = Some(reader.read_string()?),
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for StackTraceNode {
	fn encode(&self, writer: &mut Writer) {
		writer.write_double_field(1, self.time);
		for child in &self.children {
			writer.write_message_field(2, child);
		}
		writer.write_string_field(3, &self.class_name);
		writer.write_string_field(4, &self.method_name);
		writer.write_int_field(5, i64::from(self.line_number));
		if let Some(desc) = &self.method_desc {
			writer.write_bytes_field(6, desc.as_bytes());
		}
	}
}

/// Root of one sampled thread's call tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadNode {
	pub name: String,
	pub time: f64,
	pub children: Vec<StackTraceNode>,
}

impl Message for ThreadNode {
	const NAME: &'static str = "ThreadNode";
	const FIELDS: &'static [FieldSpec] = &[
		FieldSpec::new(1, "name", FieldKind::String),
		FieldSpec::new(2, "time", FieldKind::Double),
		FieldSpec::new(3, "children", FieldKind::Message),
	];

	fn merge_field(&mut self, tag: Tag, reader: &mut Reader<'_>) -> Result<()> {
		match tag.field {
			1 => self.name = reader.read_string()?,
			2 => self.time = reader.read_double()?,
			3 => self.children.push(reader.read_message()?),
			_ => reader.skip(tag.wire_type)?,
		}
		Ok(())
	}
}

impl Encode for ThreadNode {
	fn encode(&self, writer: &mut Writer) {
		writer.write_string_field(1, &self.name);
		writer.write_double_field(2, self.time);
		for child in &self.children {
			writer.write_message_field(3, child);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::DecodeError;
	use crate::message::{decode, encode};
	use crate::reader::{WireType, DEFAULT_MAX_DEPTH};
	use proptest::prelude::*;

	fn frame(class_name: &str, method_name: &str) -> StackTraceNode {
		StackTraceNode {
			time: 1.0,
			class_name: class_name.to_string(),
			method_name: method_name.to_string(),
			..StackTraceNode::default()
		}
	}

	#[test]
	fn test_empty_buffer_yields_defaults() {
		let node: StackTraceNode = decode(&[]).unwrap();
		assert_eq!(node, StackTraceNode::default());
		assert!(node.is_thread_root());
		assert_eq!(node.method_desc, None);
	}

	#[test]
	fn test_decode_hand_encoded_node() {
		let mut bytes = vec![0x09];
		bytes.extend_from_slice(&2.5f64.to_le_bytes());
		bytes.extend_from_slice(&[0x1a, 0x03, b'F', b'o', b'o']);
		bytes.extend_from_slice(&[0x22, 0x03, b'b', b'a', b'r']);
		bytes.extend_from_slice(&[0x28, 0x2a]);

		let node: StackTraceNode = decode(&bytes).unwrap();
		assert_eq!(node.time, 2.5);
		assert_eq!(node.class_name, "Foo");
		assert_eq!(node.method_name, "bar");
		assert_eq!(node.line_number, 42);
		assert!(node.children.is_empty());
	}

	#[test]
	fn test_unknown_fields_are_skipped() {
		let mut writer = Writer::new();
		writer.write_string_field(3, "Foo");
		writer.write_varint_field(15, 99);
		writer.write_bytes_field(16, b"future");
		writer.write_tag(17, WireType::Fixed32);
		writer.write_varint(0);
		writer.write_varint(0);
		writer.write_varint(0);
		writer.write_varint(0);
		writer.write_string_field(4, "bar");

		let node: StackTraceNode = decode(&writer.into_inner()).unwrap();
		assert_eq!(node.class_name, "Foo");
		assert_eq!(node.method_name, "bar");
	}

	#[test]
	fn test_wire_type_mismatch_is_rejected() {
		// field 1 (time) sent as a varint
		let result: Result<StackTraceNode> = decode(&[0x08, 0x01]);
		assert!(matches!(
			result,
			Err(DecodeError::WireTypeMismatch {
				message: "StackTraceNode",
				number: 1,
				..
			})
		));
	}

	#[test]
	fn test_truncated_child_aborts_decode() {
		let parent = StackTraceNode {
			children: vec![frame("a.B", "c")],
			..frame("a.A", "run")
		};
		let mut bytes = encode(&parent);
		bytes.truncate(bytes.len() - 8);

		let result: Result<StackTraceNode> = decode(&bytes);
		assert!(result.is_err());
	}

	#[test]
	fn test_child_length_cannot_escape_parent() {
		// ThreadNode whose child (field 3) claims 10 bytes inside a 3 byte body
		let mut writer = Writer::new();
		writer.write_nested(3, |w| {
			w.write_tag(3, WireType::LengthDelimited);
			w.write_varint(10);
			w.write_varint(0);
		});
		writer.write_string_field(1, "padding-after-the-child");

		let result: Result<ThreadNode> = decode(&writer.into_inner());
		assert!(matches!(result, Err(DecodeError::LengthOverrun { .. })));
	}

	/// A single-child chain `levels` frames below the root, built without
	/// recursing so the encoder is not what gets exercised.
	fn chain_bytes(levels: usize) -> Vec<u8> {
		let mut bytes = encode(&frame("a.Leaf", "run"));
		for _ in 0..levels {
			let mut writer = Writer::new();
			writer.write_bytes_field(2, &bytes);
			bytes = writer.into_inner();
		}
		bytes
	}

	fn chain_levels(node: &StackTraceNode) -> usize {
		let mut levels = 0;
		let mut current = node;
		while let Some(child) = current.children.first() {
			levels += 1;
			current = child;
		}
		levels
	}

	#[test]
	fn test_chain_at_depth_limit_decodes() {
		let node: StackTraceNode = decode(&chain_bytes(DEFAULT_MAX_DEPTH)).unwrap();
		assert_eq!(chain_levels(&node), DEFAULT_MAX_DEPTH);
	}

	#[test]
	fn test_chain_past_depth_limit_is_rejected() {
		let result: Result<StackTraceNode> = decode(&chain_bytes(DEFAULT_MAX_DEPTH + 1));
		assert!(matches!(
			result,
			Err(DecodeError::RecursionLimit {
				limit: DEFAULT_MAX_DEPTH,
				..
			})
		));
	}

	#[test]
	fn test_very_deep_chain_fails_without_overflowing_stack() {
		let result: Result<StackTraceNode> = decode(&chain_bytes(10_000));
		assert!(matches!(result, Err(DecodeError::RecursionLimit { .. })));
	}

	#[test]
	fn test_nested_tree_roundtrip() {
		let thread = ThreadNode {
			name: "Server thread".to_string(),
			time: 100.0,
			children: vec![StackTraceNode {
				children: vec![
					frame("net.minecraft.server.v1.EntityA", "b"),
					StackTraceNode {
						method_desc: Some("(I)V".to_string()),
						line_number: 12,
						..frame("com.example.Foo$$Lambda$12", "run")
					},
				],
				..frame("java.lang.Thread", "run")
			}],
		};

		let decoded: ThreadNode = decode(&encode(&thread)).unwrap();
		assert_eq!(decoded, thread);
	}

	fn arb_leaf() -> impl Strategy<Value = StackTraceNode> {
		(
			-1.0e9f64..1.0e9,
			".{0,12}",
			".{0,12}",
			any::<i32>(),
			proptest::option::of(".{0,16}"),
		)
			.prop_map(|(time, class_name, method_name, line_number, method_desc)| {
				StackTraceNode {
					time,
					children: Vec::new(),
					class_name,
					method_name,
					line_number,
					method_desc,
				}
			})
	}

	fn arb_node() -> impl Strategy<Value = StackTraceNode> {
		arb_leaf().prop_recursive(3, 24, 4, |inner| {
			(arb_leaf(), proptest::collection::vec(inner, 0..4)).prop_map(|(mut node, children)| {
				node.children = children;
				node
			})
		})
	}

	proptest! {
		#[test]
		fn stack_node_roundtrip(node in arb_node()) {
			let decoded: StackTraceNode = decode(&encode(&node)).unwrap();
			prop_assert_eq!(decoded, node);
		}

		#[test]
		fn decode_never_panics(bytes in proptest::collection::vec(any::<u8>(), 0..256)) {
			let _ = decode::<ThreadNode>(&bytes);
		}
	}
}
