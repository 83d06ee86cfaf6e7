// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Remap strategies: turning an obfuscated frame into mapped names.

use std::fmt;
use std::sync::Arc;

use stackmap_wire::{McpMappings, StackTraceNode, YarnMappings};
use tracing::trace;

use crate::bukkit::BukkitRemap;

/// Replacement names for a frame. `None` leaves the original name in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remapped {
	pub class_name: Option<String>,
	pub method_name: Option<String>,
}

impl Remapped {
	pub fn method(method_name: impl Into<String>) -> Self {
		Self {
			class_name: None,
			method_name: Some(method_name.into()),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.class_name.is_none() && self.method_name.is_none()
	}
}

pub trait RemapStrategy: Send + Sync {
	/// Short label used in logs.
	fn name(&self) -> &'static str;

	fn remap(&self, node: &StackTraceNode) -> Remapped;
}

/// A shareable, immutable remap strategy.
#[derive(Clone)]
pub struct Remapper(Arc<dyn RemapStrategy>);

impl Remapper {
	pub fn new(strategy: impl RemapStrategy + 'static) -> Self {
		Self(Arc::new(strategy))
	}

	pub fn identity() -> Self {
		Self::new(IdentityRemap)
	}

	pub fn mcp(mappings: McpMappings) -> Self {
		Self::new(McpRemap::new(mappings))
	}

	pub fn yarn(mappings: YarnMappings) -> Self {
		Self::new(YarnRemap::new(mappings))
	}

	pub fn bukkit(remap: BukkitRemap) -> Self {
		Self::new(remap)
	}
}

impl RemapStrategy for Remapper {
	fn name(&self) -> &'static str {
		self.0.name()
	}

	fn remap(&self, node: &StackTraceNode) -> Remapped {
		self.0.remap(node)
	}
}

impl fmt::Debug for Remapper {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("Remapper").field(&self.0.name()).finish()
	}
}

impl Default for Remapper {
	fn default() -> Self {
		Self::identity()
	}
}

/// Leaves every frame untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityRemap;

impl RemapStrategy for IdentityRemap {
	fn name(&self) -> &'static str {
		"identity"
	}

	fn remap(&self, _node: &StackTraceNode) -> Remapped {
		Remapped::default()
	}
}

/// MCP: only method names are remapped, through the flat method table.
#[derive(Debug, Clone)]
pub struct McpRemap {
	mappings: McpMappings,
}

impl McpRemap {
	pub fn new(mappings: McpMappings) -> Self {
		Self { mappings }
	}
}

impl RemapStrategy for McpRemap {
	fn name(&self) -> &'static str {
		"mcp"
	}

	fn remap(&self, node: &StackTraceNode) -> Remapped {
		match self.mappings.methods.get(&node.method_name) {
			Some(mapped) => Remapped::method(mapped.clone()),
			None => {
				trace!(method = %node.method_name, "no mcp method mapping");
				Remapped::default()
			}
		}
	}
}

/// Yarn: class and method names are looked up independently.
#[derive(Debug, Clone)]
pub struct YarnRemap {
	mappings: YarnMappings,
}

impl YarnRemap {
	pub fn new(mappings: YarnMappings) -> Self {
		Self { mappings }
	}
}

impl RemapStrategy for YarnRemap {
	fn name(&self) -> &'static str {
		"yarn"
	}

	fn remap(&self, node: &StackTraceNode) -> Remapped {
		Remapped {
			class_name: self.mappings.classes.get(&node.class_name).cloned(),
			method_name: self.mappings.methods.get(&node.method_name).cloned(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn frame(class_name: &str, method_name: &str) -> StackTraceNode {
		StackTraceNode {
			class_name: class_name.to_string(),
			method_name: method_name.to_string(),
			..StackTraceNode::default()
		}
	}

	#[test]
	fn test_identity_is_always_empty() {
		let remapper = Remapper::identity();
		assert!(remapper.remap(&frame("a", "b")).is_empty());
		assert_eq!(remapper.name(), "identity");
	}

	#[test]
	fn test_mcp_remaps_methods_only() {
		let mut mappings = McpMappings::default();
		mappings.methods.insert("a".to_string(), "tick".to_string());
		let remapper = Remapper::mcp(mappings);

		assert_eq!(
			remapper.remap(&frame("X", "a")),
			Remapped {
				class_name: None,
				method_name: Some("tick".to_string()),
			}
		);
		assert!(remapper.remap(&frame("X", "b")).is_empty());
	}

	#[test]
	fn test_yarn_resolves_class_and_method_independently() {
		let mut mappings = YarnMappings::default();
		mappings
			.classes
			.insert("net.minecraft.class_1".to_string(), "net.minecraft.entity.Entity".to_string());
		mappings.methods.insert("method_5773".to_string(), "tick".to_string());
		let remapper = Remapper::yarn(mappings);

		let class_miss = remapper.remap(&frame("net.minecraft.class_2", "method_5773"));
		assert_eq!(class_miss.class_name, None);
		assert_eq!(class_miss.method_name.as_deref(), Some("tick"));

		let method_miss = remapper.remap(&frame("net.minecraft.class_1", "method_1"));
		assert_eq!(method_miss.class_name.as_deref(), Some("net.minecraft.entity.Entity"));
		assert_eq!(method_miss.method_name, None);
	}

	#[test]
	fn test_remapper_debug_shows_strategy_name() {
		assert_eq!(format!("{:?}", Remapper::default()), "Remapper(\"identity\")");
	}
}
