// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Mapping type identifiers: `auto` or `{family}-{version}`.

use std::fmt;
use std::str::FromStr;

use crate::error::RemapError;

/// A mapping dataset family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingFamily {
	/// Bukkit names remapped to Mojang names.
	BukkitMojang,
	/// Bukkit names remapped to MCP names.
	Bukkit,
	Mcp,
	Yarn,
}

impl MappingFamily {
	/// Families in prefix-matching order. `bukkit-mojang` must be tried
	/// before `bukkit`.
	pub const ALL: [MappingFamily; 4] = [Self::BukkitMojang, Self::Bukkit, Self::Mcp, Self::Yarn];

	pub fn prefix(self) -> &'static str {
		match self {
			Self::BukkitMojang => "bukkit-mojang",
			Self::Bukkit => "bukkit",
			Self::Mcp => "mcp",
			Self::Yarn => "yarn",
		}
	}
}

impl fmt::Display for MappingFamily {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.prefix())
	}
}

/// One downloadable `*.pbmapping` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
	Mojang,
	Bukkit,
	Mcp,
	Yarn,
}

impl TableKind {
	pub fn file_stem(self) -> &'static str {
		match self {
			Self::Mojang => "mojang",
			Self::Bukkit => "bukkit",
			Self::Mcp => "mcp",
			Self::Yarn => "yarn",
		}
	}
}

impl fmt::Display for TableKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.file_stem())
	}
}

/// A requested mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MappingType {
	/// Pick a dataset from the profiled platform's metadata.
	Auto,
	Dataset {
		family: MappingFamily,
		version: String,
	},
}

impl MappingType {
	pub fn dataset(family: MappingFamily, version: impl Into<String>) -> Self {
		Self::Dataset {
			family,
			version: version.into(),
		}
	}
}

impl Default for MappingType {
	fn default() -> Self {
		Self::Auto
	}
}

impl fmt::Display for MappingType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Auto => f.write_str("auto"),
			Self::Dataset { family, version } => write!(f, "{family}-{version}"),
		}
	}
}

impl FromStr for MappingType {
	type Err = RemapError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		if s == "auto" {
			return Ok(Self::Auto);
		}

		// The first family whose prefix matches decides. "bukkit-mojang-" and
		// a bare "bukkit-mojang" must not fall through to bukkit.
		let family = MappingFamily::ALL
			.into_iter()
			.find(|family| s.starts_with(family.prefix()))
			.ok_or_else(|| RemapError::UnknownMappingType(s.to_string()))?;

		s[family.prefix().len()..]
			.strip_prefix('-')
			.filter(|version| !version.is_empty())
			.map(|version| Self::dataset(family, version))
			.ok_or_else(|| RemapError::UnknownMappingType(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_parse_auto() {
		assert_eq!("auto".parse::<MappingType>().unwrap(), MappingType::Auto);
	}

	#[test]
	fn test_parse_each_family() {
		assert_eq!(
			"bukkit-mojang-1.16.5".parse::<MappingType>().unwrap(),
			MappingType::dataset(MappingFamily::BukkitMojang, "1.16.5")
		);
		assert_eq!(
			"bukkit-1.15.2".parse::<MappingType>().unwrap(),
			MappingType::dataset(MappingFamily::Bukkit, "1.15.2")
		);
		assert_eq!(
			"mcp-1.12.2".parse::<MappingType>().unwrap(),
			MappingType::dataset(MappingFamily::Mcp, "1.12.2")
		);
		assert_eq!(
			"yarn-1.17.1+build.65".parse::<MappingType>().unwrap(),
			MappingType::dataset(MappingFamily::Yarn, "1.17.1+build.65")
		);
	}

	#[test]
	fn test_parse_rejects_unknown() {
		assert!(matches!(
			"forge-1.16.5".parse::<MappingType>(),
			Err(RemapError::UnknownMappingType(_))
		));
		assert!("mcp-".parse::<MappingType>().is_err());
		assert!("mcp".parse::<MappingType>().is_err());
		assert!("bukkit-mojang".parse::<MappingType>().is_err());
		assert!("".parse::<MappingType>().is_err());
	}

	#[test]
	fn test_parse_rejects_empty_bukkit_mojang_version() {
		assert!(matches!(
			"bukkit-mojang-".parse::<MappingType>(),
			Err(RemapError::UnknownMappingType(_))
		));
		assert!("bukkit-mojangx-1.16.5".parse::<MappingType>().is_err());
		assert!("mcpx-1.12.2".parse::<MappingType>().is_err());
	}

	proptest! {
		#[test]
		fn display_parse_roundtrip(family_idx in 0usize..4, version in "[0-9][0-9a-z.+-]{0,12}") {
			let mapping_type = MappingType::dataset(MappingFamily::ALL[family_idx], version);
			let parsed: MappingType = mapping_type.to_string().parse().unwrap();
			prop_assert_eq!(parsed, mapping_type);
		}
	}
}
