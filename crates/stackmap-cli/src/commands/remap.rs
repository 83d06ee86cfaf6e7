// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::Args;
use console::style;
use stackmap_config::StackmapConfig;
use stackmap_remap::{resolve_thread, MappingType, RemapStrategy, Remapper};
use stackmap_wire::{PlatformMetadata, SamplerData};
use tracing::{info, instrument, warn};

use crate::commands::{mapping_store, read_payload};
use crate::render::{render_thread, RenderOptions};

#[derive(Debug, Clone, Args)]
pub struct RemapArgs {
	/// Sampler payload file
	pub payload: PathBuf,

	/// Mapping type, `auto` or `{family}-{version}` (defaults to the configured type)
	#[arg(long)]
	pub mappings: Option<String>,

	/// Platform name used for auto-detection instead of the payload's metadata
	#[arg(long, requires = "minecraft_version")]
	pub platform: Option<String>,

	/// Minecraft version used for auto-detection
	#[arg(long, requires = "platform")]
	pub minecraft_version: Option<String>,

	/// Do not print frames deeper than this
	#[arg(long)]
	pub max_depth: Option<usize>,
}

impl RemapArgs {
	fn platform_override(&self) -> Option<PlatformMetadata> {
		match (&self.platform, &self.minecraft_version) {
			(Some(name), Some(minecraft_version)) => Some(PlatformMetadata {
				name: name.clone(),
				minecraft_version: minecraft_version.clone(),
				..PlatformMetadata::default()
			}),
			_ => None,
		}
	}
}

#[instrument(skip(args, config), fields(payload = %args.payload.display()))]
pub async fn handle_remap(args: RemapArgs, config: &StackmapConfig) -> anyhow::Result<()> {
	let data: SamplerData = read_payload(&args.payload)?;
	info!(threads = data.threads.len(), "decoded sampler payload");

	let mapping_type: MappingType = args
		.mappings
		.as_deref()
		.unwrap_or(config.mappings.mapping_type.as_str())
		.parse()?;
	let platform = args.platform_override().or_else(|| data.platform().cloned());

	let remapper = match load_remapper(config, &mapping_type, platform.as_ref()).await {
		Ok(remapper) => remapper,
		Err(e) => {
			warn!(error = %e, mapping_type = %mapping_type, "failed to load mappings");
			eprintln!(
				"{} could not load {mapping_type} mappings ({e:#}); printing obfuscated names",
				style("warning:").yellow().bold()
			);
			Remapper::identity()
		}
	};
	info!(strategy = remapper.name(), "remapping threads");

	let options = RenderOptions {
		max_depth: args.max_depth,
	};
	for thread in &data.threads {
		let resolved = resolve_thread(thread, &remapper);
		print!("{}", render_thread(&resolved, options));
	}
	Ok(())
}

async fn load_remapper(
	config: &StackmapConfig,
	mapping_type: &MappingType,
	platform: Option<&PlatformMetadata>,
) -> anyhow::Result<Remapper> {
	let store = mapping_store(&config.mappings)?;
	let manifest = store.load_manifest().await?;
	Ok(store.load_mapping(mapping_type, &manifest, platform).await?)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn args() -> RemapArgs {
		RemapArgs {
			payload: PathBuf::from("profile.bin"),
			mappings: None,
			platform: None,
			minecraft_version: None,
			max_depth: None,
		}
	}

	#[test]
	fn test_platform_override_needs_both_fields() {
		assert_eq!(args().platform_override(), None);

		let with_platform = RemapArgs {
			platform: Some("Paper".to_string()),
			minecraft_version: Some("1.16.5".to_string()),
			..args()
		};
		let platform = with_platform.platform_override().unwrap();
		assert_eq!(platform.name, "Paper");
		assert_eq!(platform.minecraft_version, "1.16.5");
	}
}
