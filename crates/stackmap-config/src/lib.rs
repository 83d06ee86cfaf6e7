// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for stackmap.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Validation of the merged result
//! - Consistent environment variable naming (`STACKMAP_*`)
//!
//! # Usage
//!
//! ```ignore
//! use stackmap_config::load_config;
//!
//! let config = load_config()?;
//! println!("Fetching mappings from {}", config.mappings.base_url);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::StackmapConfigLayer;
pub use sections::*;
pub use sources::{
	default_config_path, ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource,
};

use std::path::PathBuf;

use tracing::{debug, info};

/// Fully resolved configuration.
#[derive(Debug, Clone, Default)]
pub struct StackmapConfig {
	pub mappings: MappingsConfig,
	pub logging: LoggingConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`STACKMAP_*`)
/// 2. Config file (`$XDG_CONFIG_HOME/stackmap/config.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<StackmapConfig, ConfigError> {
	let mut sources: Vec<Box<dyn ConfigSource>> = vec![Box::new(DefaultsSource), Box::new(EnvSource)];
	if let Some(user) = TomlSource::user() {
		sources.push(Box::new(user));
	}
	load_from_sources(sources)
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(config_path: impl Into<PathBuf>) -> Result<StackmapConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

/// Merge the given sources in precedence order and finalize the result.
pub fn load_from_sources(
	mut sources: Vec<Box<dyn ConfigSource>>,
) -> Result<StackmapConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = StackmapConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
fn finalize(layer: StackmapConfigLayer) -> Result<StackmapConfig, ConfigError> {
	let mappings = layer.mappings.unwrap_or_default().finalize();
	let logging = layer.logging.unwrap_or_default().finalize();

	validate_config(&mappings)?;

	info!(
		base_url = %mappings.base_url,
		mapping_type = %mappings.mapping_type,
		timeout_secs = mappings.request_timeout_secs,
		log_level = %logging.level,
		"Configuration loaded"
	);

	Ok(StackmapConfig { mappings, logging })
}

fn validate_config(mappings: &MappingsConfig) -> Result<(), ConfigError> {
	if !(mappings.base_url.starts_with("http://") || mappings.base_url.starts_with("https://")) {
		return Err(ConfigError::Validation(format!(
			"mappings.base_url must be an http(s) URL, got '{}'",
			mappings.base_url
		)));
	}
	if mappings.request_timeout_secs == 0 {
		return Err(ConfigError::Validation(
			"mappings.request_timeout_secs must be greater than zero".to_string(),
		));
	}
	if mappings.mapping_type.trim().is_empty() {
		return Err(ConfigError::Validation(
			"mappings.mapping_type must not be empty".to_string(),
		));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	/// A fixed layer at config-file precedence.
	struct StaticSource(StackmapConfigLayer);

	impl ConfigSource for StaticSource {
		fn name(&self) -> &'static str {
			"static"
		}

		fn precedence(&self) -> Precedence {
			Precedence::ConfigFile
		}

		fn load(&self) -> Result<StackmapConfigLayer, ConfigError> {
			Ok(self.0.clone())
		}
	}

	#[test]
	fn test_defaults_only() {
		let config = load_from_sources(vec![Box::new(DefaultsSource)]).unwrap();
		assert_eq!(config.mappings, MappingsConfig::default());
		assert_eq!(config.logging.level, "info");
	}

	#[test]
	fn test_file_overrides_defaults() {
		let mut file = NamedTempFile::new().unwrap();
		writeln!(
			file,
			"[mappings]\nbase_url = \"http://127.0.0.1:8000/dist/\"\n\n[logging]\nlevel = \"trace\""
		)
		.unwrap();

		let config = load_from_sources(vec![
			Box::new(TomlSource::new(file.path())),
			Box::new(DefaultsSource),
		])
		.unwrap();
		assert_eq!(config.mappings.base_url, "http://127.0.0.1:8000/dist/");
		assert_eq!(config.mappings.mapping_type, "auto");
		assert_eq!(config.logging.level, "trace");
	}

	#[test]
	fn test_validation_rejects_zero_timeout() {
		let layer = StackmapConfigLayer {
			mappings: Some(MappingsConfigLayer {
				request_timeout_secs: Some(0),
				..Default::default()
			}),
			..Default::default()
		};
		let result = load_from_sources(vec![Box::new(DefaultsSource), Box::new(StaticSource(layer))]);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_validation_rejects_non_http_base_url() {
		let layer = StackmapConfigLayer {
			mappings: Some(MappingsConfigLayer {
				base_url: Some("file:///tmp/mappings".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let result = load_from_sources(vec![Box::new(StaticSource(layer))]);
		assert!(matches!(result, Err(ConfigError::Validation(_))));
	}
}
