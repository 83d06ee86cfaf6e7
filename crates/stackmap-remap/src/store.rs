// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Loading manifests and mapping tables into remap strategies.

use std::time::Duration;

use stackmap_wire::{
	decode, BukkitMappings, McpMappings, Message, MojangMappings, PlatformMetadata, YarnMappings,
};
use tracing::{debug, info, warn};

use crate::bukkit::BukkitRemap;
use crate::error::{RemapError, Result};
use crate::manifest::MappingManifest;
use crate::mapping_type::{MappingFamily, MappingType, TableKind};
use crate::source::{HttpMappingSource, MappingSource};
use crate::strategy::{RemapStrategy, Remapper};

pub struct MappingStore<S> {
	source: S,
}

impl MappingStore<HttpMappingSource> {
	pub fn http(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
		Ok(Self::new(HttpMappingSource::new(base_url, timeout)?))
	}
}

impl<S: MappingSource> MappingStore<S> {
	pub fn new(source: S) -> Self {
		Self { source }
	}

	pub fn source(&self) -> &S {
		&self.source
	}

	pub async fn load_manifest(&self) -> Result<MappingManifest> {
		let bytes = self.source.fetch_manifest().await?;
		let manifest = MappingManifest::from_slice(&bytes)?;
		info!(
			types = manifest.types.len(),
			auto = manifest.auto.len(),
			"loaded mapping manifest"
		);
		Ok(manifest)
	}

	/// Builds a remapper for `mapping_type`.
	///
	/// `Auto` consults the manifest's auto table with `platform`; when no
	/// dataset matches, the identity remapper is returned without fetching
	/// anything.
	pub async fn load_mapping(
		&self,
		mapping_type: &MappingType,
		manifest: &MappingManifest,
		platform: Option<&PlatformMetadata>,
	) -> Result<Remapper> {
		let (family, version) = match mapping_type {
			MappingType::Dataset { family, version } => (*family, version.clone()),
			MappingType::Auto => match manifest.detect_auto_type(platform) {
				None => {
					debug!("no mapping dataset matches the platform, names stay obfuscated");
					return Ok(Remapper::identity());
				}
				Some(detected) => match detected.parse::<MappingType>() {
					Ok(MappingType::Dataset { family, version }) => {
						debug!(detected = %detected, "auto-detected mapping type");
						(family, version)
					}
					_ => {
						warn!(detected = %detected, "manifest auto entry is not a usable mapping type");
						return Ok(Remapper::identity());
					}
				},
			},
		};

		self.load_dataset(family, &version, manifest).await
	}

	async fn load_dataset(
		&self,
		family: MappingFamily,
		version: &str,
		manifest: &MappingManifest,
	) -> Result<Remapper> {
		info!(family = %family, version = %version, "loading mappings");

		let remapper = match family {
			MappingFamily::BukkitMojang => {
				let nms_version = required_nms_version(manifest, family, version)?;
				let (mojang, bukkit) = futures::try_join!(
					self.fetch_table::<MojangMappings>(version, TableKind::Mojang),
					self.fetch_table::<BukkitMappings>(version, TableKind::Bukkit),
				)?;
				Remapper::bukkit(BukkitRemap::new(mojang.classes, bukkit, nms_version))
			}
			MappingFamily::Bukkit => {
				let nms_version = required_nms_version(manifest, family, version)?;
				let (mcp, bukkit) = futures::try_join!(
					self.fetch_table::<McpMappings>(version, TableKind::Mcp),
					self.fetch_table::<BukkitMappings>(version, TableKind::Bukkit),
				)?;
				Remapper::bukkit(BukkitRemap::new(mcp.classes, bukkit, nms_version))
			}
			MappingFamily::Mcp => {
				Remapper::mcp(self.fetch_table::<McpMappings>(version, TableKind::Mcp).await?)
			}
			MappingFamily::Yarn => {
				Remapper::yarn(self.fetch_table::<YarnMappings>(version, TableKind::Yarn).await?)
			}
		};

		info!(
			family = %family,
			version = %version,
			strategy = remapper.name(),
			"mappings ready"
		);
		Ok(remapper)
	}

	async fn fetch_table<M: Message>(&self, version: &str, table: TableKind) -> Result<M> {
		let bytes = self.source.fetch_table(version, table).await?;
		let decoded = decode::<M>(&bytes).map_err(|source| RemapError::Decode { table, source })?;
		debug!(table = %table, version = %version, bytes = bytes.len(), "decoded mapping table");
		Ok(decoded)
	}
}

fn required_nms_version(
	manifest: &MappingManifest,
	family: MappingFamily,
	version: &str,
) -> Result<String> {
	manifest
		.nms_version(family, version)
		.map(str::to_string)
		.ok_or_else(|| RemapError::MissingNmsVersion {
			family,
			version: version.to_string(),
		})
}
