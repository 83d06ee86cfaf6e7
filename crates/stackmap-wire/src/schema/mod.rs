// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Message schemas. Pure data: field tables, defaults and recursive dispatch.

pub mod heap;
pub mod mapping;
pub mod sampler;
pub mod stack;

pub use heap::{HeapData, HeapEntry, HeapMetadata};
pub use mapping::{
	BukkitMappings, ClassMapping, McpMappings, MethodMapping, MojangMappings, YarnMappings,
};
pub use sampler::{
	CommandSender, DataAggregator, PlatformMetadata, SamplerData, SamplerMetadata, ThreadDumper,
};
pub use stack::{StackTraceNode, ThreadNode, NATIVE_CLASS_NAME};
