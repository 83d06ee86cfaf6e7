// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections.

pub mod logging;
pub mod mappings;

pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use mappings::{MappingsConfig, MappingsConfigLayer, DEFAULT_BASE_URL};
