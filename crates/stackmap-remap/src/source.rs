// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where mapping bytes come from.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use tracing::debug;

use crate::error::FetchError;
use crate::mapping_type::TableKind;

pub const MANIFEST_FILE: &str = "mappings.json";

/// Path of a mapping table relative to the dataset root.
pub fn table_path(version: &str, table: TableKind) -> String {
	format!("{version}/{}.pbmapping", table.file_stem())
}

/// Fetches the manifest and raw mapping tables.
#[async_trait]
pub trait MappingSource: Send + Sync {
	async fn fetch_manifest(&self) -> Result<Bytes, FetchError>;
	async fn fetch_table(&self, version: &str, table: TableKind) -> Result<Bytes, FetchError>;
}

/// Fetches mapping data over HTTP from a static file host.
#[derive(Debug, Clone)]
pub struct HttpMappingSource {
	client: Client,
	base_url: String,
}

impl HttpMappingSource {
	pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
		let client = stackmap_common_http::builder().timeout(timeout).build()?;
		Ok(Self::with_client(client, base_url))
	}

	/// Like [`HttpMappingSource::new`] but sends a caller-chosen User-Agent.
	pub fn with_user_agent(
		base_url: impl Into<String>,
		timeout: Duration,
		user_agent: impl Into<String>,
	) -> Result<Self, FetchError> {
		let client = stackmap_common_http::builder_with_user_agent(user_agent)
			.timeout(timeout)
			.build()?;
		Ok(Self::with_client(client, base_url))
	}

	pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
		Self {
			client,
			base_url: base_url.into(),
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, path: &str) -> String {
		format!("{}/{}", self.base_url.trim_end_matches('/'), path)
	}

	async fn get(&self, path: &str) -> Result<Bytes, FetchError> {
		let url = self.url(path);
		debug!(url = %url, "fetching mapping resource");

		let response = self.client.get(&url).send().await?;
		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::Status {
				url,
				status: status.as_u16(),
			});
		}

		let body = response.bytes().await?;
		debug!(url = %url, bytes = body.len(), "fetched mapping resource");
		Ok(body)
	}
}

#[async_trait]
impl MappingSource for HttpMappingSource {
	async fn fetch_manifest(&self) -> Result<Bytes, FetchError> {
		self.get(MANIFEST_FILE).await
	}

	async fn fetch_table(&self, version: &str, table: TableKind) -> Result<Bytes, FetchError> {
		self.get(&table_path(version, table)).await
	}
}

/// Serves pre-registered buffers. Useful for tests and offline use.
#[derive(Debug, Default)]
pub struct InMemorySource {
	manifest: Option<Bytes>,
	tables: HashMap<String, Bytes>,
	fetches: AtomicUsize,
}

impl InMemorySource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_manifest(mut self, manifest: impl Into<Bytes>) -> Self {
		self.manifest = Some(manifest.into());
		self
	}

	pub fn add_table(&mut self, version: &str, table: TableKind, data: impl Into<Bytes>) {
		self.tables.insert(table_path(version, table), data.into());
	}

	/// Number of fetch calls served so far, hits and misses alike.
	pub fn fetch_count(&self) -> usize {
		self.fetches.load(Ordering::Relaxed)
	}
}

#[async_trait]
impl MappingSource for InMemorySource {
	async fn fetch_manifest(&self) -> Result<Bytes, FetchError> {
		self.fetches.fetch_add(1, Ordering::Relaxed);
		self.manifest
			.clone()
			.ok_or_else(|| FetchError::NotFound(MANIFEST_FILE.to_string()))
	}

	async fn fetch_table(&self, version: &str, table: TableKind) -> Result<Bytes, FetchError> {
		self.fetches.fetch_add(1, Ordering::Relaxed);
		let path = table_path(version, table);
		self.tables
			.get(&path)
			.cloned()
			.ok_or(FetchError::NotFound(path))
	}
}
