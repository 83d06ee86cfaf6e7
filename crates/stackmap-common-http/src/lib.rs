// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for stackmap.
//!
//! Every outbound request (mapping manifest, mapping tables) goes through a
//! client built here so the User-Agent is consistent.

mod client;

pub use client::{builder, builder_with_user_agent, user_agent};
