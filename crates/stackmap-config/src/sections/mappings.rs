// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mapping dataset configuration section.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://sparkmappings.lucko.me/dist/";
pub const DEFAULT_MAPPING_TYPE: &str = "auto";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Mapping dataset configuration (runtime, fully resolved).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MappingsConfig {
	/// Root URL serving `mappings.json` and `<version>/<table>.pbmapping`.
	pub base_url: String,
	/// `auto` or `{family}-{version}`.
	pub mapping_type: String,
	pub request_timeout_secs: u64,
	/// Overrides the default `stackmap/<version>` User-Agent.
	pub user_agent: Option<String>,
}

impl MappingsConfig {
	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}
}

impl Default for MappingsConfig {
	fn default() -> Self {
		MappingsConfigLayer::default().finalize()
	}
}

/// Mapping configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MappingsConfigLayer {
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub mapping_type: Option<String>,
	#[serde(default)]
	pub request_timeout_secs: Option<u64>,
	#[serde(default)]
	pub user_agent: Option<String>,
}

impl MappingsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.mapping_type.is_some() {
			self.mapping_type = other.mapping_type;
		}
		if other.request_timeout_secs.is_some() {
			self.request_timeout_secs = other.request_timeout_secs;
		}
		if other.user_agent.is_some() {
			self.user_agent = other.user_agent;
		}
	}

	pub fn finalize(self) -> MappingsConfig {
		MappingsConfig {
			base_url: self
				.base_url
				.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
			mapping_type: self
				.mapping_type
				.unwrap_or_else(|| DEFAULT_MAPPING_TYPE.to_string()),
			request_timeout_secs: self
				.request_timeout_secs
				.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
			user_agent: self.user_agent,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_values() {
		let config = MappingsConfigLayer::default().finalize();
		assert_eq!(config.base_url, "https://sparkmappings.lucko.me/dist/");
		assert_eq!(config.mapping_type, "auto");
		assert_eq!(config.request_timeout(), Duration::from_secs(30));
		assert_eq!(config.user_agent, None);
	}

	#[test]
	fn test_merge_keeps_unset_fields() {
		let mut base = MappingsConfigLayer {
			base_url: Some("https://mirror.example/dist/".to_string()),
			mapping_type: Some("yarn-1.17.1".to_string()),
			..Default::default()
		};
		base.merge(MappingsConfigLayer {
			mapping_type: Some("mcp-1.12.2".to_string()),
			request_timeout_secs: Some(5),
			..Default::default()
		});

		let config = base.finalize();
		assert_eq!(config.base_url, "https://mirror.example/dist/");
		assert_eq!(config.mapping_type, "mcp-1.12.2");
		assert_eq!(config.request_timeout_secs, 5);
	}

	#[test]
	fn test_deserialize_layer_partial() {
		let layer: MappingsConfigLayer = toml::from_str("mapping_type = \"bukkit-mojang-1.16.5\"").unwrap();
		assert_eq!(layer.mapping_type.as_deref(), Some("bukkit-mojang-1.16.5"));
		assert!(layer.base_url.is_none());
	}
}
