// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The `mappings.json` manifest: available datasets and the auto-detection
//! table.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use stackmap_wire::PlatformMetadata;

use crate::mapping_type::MappingFamily;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingManifest {
	/// `"{platform}/{minecraftVersion}"` → mapping type name.
	#[serde(default)]
	pub auto: HashMap<String, String>,
	/// Family prefix → dataset description.
	#[serde(default)]
	pub types: BTreeMap<String, MappingTypeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingTypeInfo {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub versions: BTreeMap<String, MappingVersionInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MappingVersionInfo {
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default, rename = "nmsVersion", skip_serializing_if = "Option::is_none")]
	pub nms_version: Option<String>,
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

impl MappingManifest {
	pub fn from_slice(bytes: &[u8]) -> serde_json::Result<Self> {
		serde_json::from_slice(bytes)
	}

	/// Looks up the mapping type the manifest recommends for a platform.
	///
	/// Returns `None` when the platform metadata is missing or incomplete, or
	/// when the manifest has no entry for it.
	pub fn detect_auto_type(&self, platform: Option<&PlatformMetadata>) -> Option<String> {
		let platform = platform?;
		if platform.name.is_empty() || platform.minecraft_version.is_empty() {
			return None;
		}

		let key = format!(
			"{}/{}",
			platform.name.to_lowercase(),
			platform.minecraft_version
		);
		self.auto.get(&key).cloned()
	}

	pub fn nms_version(&self, family: MappingFamily, version: &str) -> Option<&str> {
		self.types
			.get(family.prefix())?
			.versions
			.get(version)?
			.nms_version
			.as_deref()
	}

	/// Family names listed in the manifest, sorted.
	pub fn families(&self) -> impl Iterator<Item = &str> {
		self.types.keys().map(String::as_str)
	}

	/// Versions available for a family, sorted. Empty for an unknown family.
	pub fn versions(&self, family: &str) -> Vec<&str> {
		self.types
			.get(family)
			.map(|info| info.versions.keys().map(String::as_str).collect())
			.unwrap_or_default()
	}
}
