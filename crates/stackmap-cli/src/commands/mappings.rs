// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use console::style;
use stackmap_config::StackmapConfig;
use stackmap_remap::MappingManifest;

use crate::commands::mapping_store;

pub async fn handle_mappings(config: &StackmapConfig) -> anyhow::Result<()> {
	let store = mapping_store(&config.mappings)?;
	let manifest = store.load_manifest().await?;
	print!("{}", describe_manifest(&manifest));
	if manifest.types.is_empty() {
		eprintln!(
			"{} manifest at {} lists no mapping types",
			style("warning:").yellow().bold(),
			config.mappings.base_url
		);
	}
	Ok(())
}

/// One line per family with its versions, then the auto-detection table.
fn describe_manifest(manifest: &MappingManifest) -> String {
	let mut out = String::new();
	for family in manifest.families() {
		let versions = manifest.versions(family);
		let display_name = manifest
			.types
			.get(family)
			.and_then(|info| info.name.as_deref())
			.unwrap_or(family);
		out.push_str(&format!("{display_name} [{family}]: {}\n", versions.join(", ")));
	}

	if !manifest.auto.is_empty() {
		out.push_str("auto:\n");
		let mut auto: Vec<_> = manifest.auto.iter().collect();
		auto.sort();
		for (platform, mapping_type) in auto {
			out.push_str(&format!("  {platform} -> {mapping_type}\n"));
		}
	}
	out
}
