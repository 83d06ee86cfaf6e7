// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for mapping retrieval and strategy construction.

use stackmap_wire::DecodeError;
use thiserror::Error;

use crate::mapping_type::{MappingFamily, TableKind};

/// Errors raised by a [`MappingSource`](crate::source::MappingSource).
#[derive(Debug, Error)]
pub enum FetchError {
	#[error("HTTP request failed: {0}")]
	Request(#[from] reqwest::Error),

	#[error("GET {url} returned status {status}")]
	Status { url: String, status: u16 },

	#[error("Mapping resource not found: {0}")]
	NotFound(String),
}

/// Errors that can occur while loading a manifest or building a remapper.
#[derive(Debug, Error)]
pub enum RemapError {
	#[error("Failed to fetch mapping data: {0}")]
	Fetch(#[from] FetchError),

	#[error("Failed to decode {table} mapping table: {source}")]
	Decode {
		table: TableKind,
		#[source]
		source: DecodeError,
	},

	#[error("Invalid mapping manifest: {0}")]
	Manifest(#[from] serde_json::Error),

	#[error("Unknown mapping type: {0:?}")]
	UnknownMappingType(String),

	#[error("Manifest has no nmsVersion for {family} {version}")]
	MissingNmsVersion {
		family: MappingFamily,
		version: String,
	},
}

pub type Result<T> = std::result::Result<T, RemapError>;
