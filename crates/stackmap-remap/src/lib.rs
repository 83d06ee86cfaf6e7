// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Deobfuscation of sampled stack traces.
//!
//! This crate provides:
//! - Loading the mapping manifest and mapping tables from a [`MappingSource`]
//! - Remap strategies for the Mojang, Bukkit, MCP and Yarn datasets
//! - Resolving stack nodes into display records (package, class, lambda,
//!   method and whether each name was remapped)
//!
//! # Example
//!
//! ```
//! use stackmap_remap::{resolve, Remapper, ResolvedNode};
//! use stackmap_wire::{McpMappings, StackTraceNode};
//!
//! let mut mappings = McpMappings::default();
//! mappings.methods.insert("a".to_string(), "tick".to_string());
//! let remapper = Remapper::mcp(mappings);
//!
//! let node = StackTraceNode {
//!     class_name: "net.minecraft.Entity".to_string(),
//!     method_name: "a".to_string(),
//!     ..StackTraceNode::default()
//! };
//!
//! match resolve(&node, &remapper) {
//!     ResolvedNode::Frame(frame) => {
//!         assert_eq!(frame.method_name, "tick");
//!         assert!(frame.remapped_method);
//!     }
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

pub mod bukkit;
pub mod error;
pub mod index;
pub mod manifest;
pub mod mapping_type;
pub mod resolve;
pub mod source;
pub mod store;
pub mod strategy;

pub use bukkit::BukkitRemap;
pub use error::{FetchError, RemapError, Result};
pub use index::ReverseIndex;
pub use manifest::{MappingManifest, MappingTypeInfo, MappingVersionInfo};
pub use mapping_type::{MappingFamily, MappingType, TableKind};
pub use resolve::{
	resolve, resolve_thread, resolve_tree, ResolvedFrame, ResolvedNode, ResolvedThread, ResolvedTree,
};
pub use source::{table_path, HttpMappingSource, InMemorySource, MappingSource, MANIFEST_FILE};
pub use store::MappingStore;
pub use strategy::{IdentityRemap, McpRemap, RemapStrategy, Remapped, Remapper, YarnRemap};
