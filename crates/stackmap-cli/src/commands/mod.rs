// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod heap;
mod mappings;
mod remap;

pub use heap::{handle_heap, HeapArgs};
pub use mappings::handle_mappings;
pub use remap::{handle_remap, RemapArgs};

use std::path::Path;

use anyhow::Context;
use stackmap_config::MappingsConfig;
use stackmap_remap::{HttpMappingSource, MappingStore};
use stackmap_wire::Message;

fn mapping_store(config: &MappingsConfig) -> anyhow::Result<MappingStore<HttpMappingSource>> {
	let source = match &config.user_agent {
		Some(user_agent) => HttpMappingSource::with_user_agent(
			&config.base_url,
			config.request_timeout(),
			user_agent.clone(),
		)?,
		None => HttpMappingSource::new(&config.base_url, config.request_timeout())?,
	};
	Ok(MappingStore::new(source))
}

fn read_payload<M: Message>(path: &Path) -> anyhow::Result<M> {
	let bytes =
		std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
	stackmap_wire::decode(&bytes)
		.with_context(|| format!("failed to decode {} from {}", M::NAME, path.display()))
}
