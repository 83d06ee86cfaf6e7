// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Composite remapping for CraftBukkit servers.
//!
//! Frames are named with Bukkit's `net.minecraft.server.<nms>.<Class>`
//! names. The Bukkit table translates the class to its vanilla obfuscated
//! id, and the output table (Mojang or MCP, keyed by that id) supplies the
//! method name. Overloads are told apart by rewriting each candidate's
//! descriptor into Bukkit's type space and comparing it with the frame's.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use stackmap_wire::{BukkitMappings, ClassMapping, MethodMapping, StackTraceNode};
use tracing::trace;

use crate::index::ReverseIndex;
use crate::strategy::{RemapStrategy, Remapped};

/// Object type references in a JVM descriptor, e.g. `La;` or `Ljava/lang/String;`.
static OBJECT_TYPE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"L([^;]+);").expect("valid regex"));

const MINECRAFT_SERVER: &str = "MinecraftServer";
const MINECRAFT_SERVER_KEY: &str = "net.minecraft.server.MinecraftServer";

#[derive(Debug, Clone)]
pub struct BukkitRemap {
	output: HashMap<String, ClassMapping>,
	bukkit: BukkitMappings,
	index: ReverseIndex,
	nms_version: String,
	class_prefix: String,
}

impl BukkitRemap {
	/// `output` is the Mojang or MCP class table, keyed by obfuscated id.
	pub fn new(
		output: HashMap<String, ClassMapping>,
		bukkit: BukkitMappings,
		nms_version: impl Into<String>,
	) -> Self {
		let nms_version = nms_version.into();
		let index = ReverseIndex::build(&bukkit);
		Self {
			output,
			bukkit,
			index,
			class_prefix: format!("net.minecraft.server.{nms_version}."),
			nms_version,
		}
	}

	pub fn nms_version(&self) -> &str {
		&self.nms_version
	}

	fn bukkit_class(&self, nms_class_name: &str) -> Option<&ClassMapping> {
		let key = if nms_class_name == MINECRAFT_SERVER {
			MINECRAFT_SERVER_KEY
		} else {
			nms_class_name
		};
		self.bukkit.classes.get(key)
	}

	/// Rewrites an obfuscated descriptor into Bukkit's type space. Types with
	/// no Bukkit class are left as they are.
	fn bukkit_descriptor(&self, obfuscated_desc: &str) -> String {
		OBJECT_TYPE
			.replace_all(obfuscated_desc, |caps: &Captures<'_>| {
				match self.index.get(&self.bukkit, &caps[1]) {
					Some(class) => format!(
						"Lnet/minecraft/server/{}/{};",
						self.nms_version, class.mapped
					),
					None => caps[0].to_string(),
				}
			})
			.into_owned()
	}

	fn pick_overload<'a>(
		&self,
		candidates: &[&'a MethodMapping],
		node_desc: &str,
	) -> Option<&'a MethodMapping> {
		candidates
			.iter()
			.copied()
			.find(|method| self.bukkit_descriptor(&method.description) == node_desc)
	}
}

impl RemapStrategy for BukkitRemap {
	fn name(&self) -> &'static str {
		"bukkit"
	}

	fn remap(&self, node: &StackTraceNode) -> Remapped {
		let Some(nms_class_name) = node.class_name.strip_prefix(self.class_prefix.as_str()) else {
			return Remapped::default();
		};

		let Some(bukkit_class) = self.bukkit_class(nms_class_name) else {
			trace!(class = %nms_class_name, "no bukkit class mapping");
			return Remapped::default();
		};
		let Some(output_class) = self.output.get(&bukkit_class.obfuscated) else {
			trace!(obfuscated = %bukkit_class.obfuscated, "no output class mapping");
			return Remapped::default();
		};

		// Bukkit already deobfuscated this method.
		if bukkit_class
			.methods
			.iter()
			.any(|method| method.mapped == node.method_name)
		{
			return Remapped::default();
		}

		let candidates: Vec<&MethodMapping> = output_class
			.methods
			.iter()
			.filter(|method| method.obfuscated == node.method_name)
			.collect();

		match candidates.as_slice() {
			[] => Remapped::default(),
			[only] => Remapped::method(only.mapped.clone()),
			_ => {
				let Some(node_desc) = node.method_desc.as_deref() else {
					trace!(
						method = %node.method_name,
						candidates = candidates.len(),
						"ambiguous overload without a descriptor"
					);
					return Remapped::default();
				};
				self.pick_overload(&candidates, node_desc)
					.map(|method| Remapped::method(method.mapped.clone()))
					.unwrap_or_default()
			}
		}
	}
}
