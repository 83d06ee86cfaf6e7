// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Binary wire decoding for profiler payloads and mapping tables.
//!
//! This crate provides:
//! - A bounds-checked reader for the tagged, length-prefixed wire format
//! - Typed schemas for sampler and heap payloads, call trees and the four
//!   mapping table formats
//! - A reference encoder producing the same layout
//!
//! # Example
//!
//! ```
//! use stackmap_wire::{decode, encode, StackTraceNode};
//!
//! let node = StackTraceNode {
//!     time: 12.0,
//!     class_name: "net.minecraft.server.v1.EntityA".to_string(),
//!     method_name: "b".to_string(),
//!     ..StackTraceNode::default()
//! };
//!
//! let bytes = encode(&node);
//! let decoded: StackTraceNode = decode(&bytes).unwrap();
//! assert_eq!(decoded, node);
//! ```

pub mod enums;
pub mod error;
pub mod message;
pub mod reader;
pub mod schema;
pub mod writer;

pub use enums::{
	CommandSenderType, DataAggregatorType, PlatformType, ThreadDumperType, ThreadGrouper,
};
pub use error::{DecodeError, Result};
pub use message::{decode, decode_with_max_depth, encode, Encode, FieldKind, FieldSpec, Message};
pub use reader::{Reader, Tag, WireType, DEFAULT_MAX_DEPTH};
pub use schema::*;
pub use writer::Writer;
