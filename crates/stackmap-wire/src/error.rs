// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for wire decoding.

use thiserror::Error;

use crate::reader::WireType;

/// Errors that abort a decode. There is no partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
	#[error("unexpected end of message at offset {offset}")]
	UnexpectedEof { offset: usize },

	#[error("length prefix at offset {offset} declares {len} bytes but only {available} remain")]
	LengthOverrun {
		offset: usize,
		len: u64,
		available: usize,
	},

	#[error("varint at offset {offset} does not fit in 64 bits")]
	VarintOverflow { offset: usize },

	#[error("invalid field number {number} at offset {offset}")]
	InvalidFieldNumber { number: u64, offset: usize },

	#[error("unsupported wire type {wire_type} at offset {offset}")]
	UnsupportedWireType { wire_type: u8, offset: usize },

	#[error("{message}.{field} (#{number}) arrived as {actual:?}, expected {expected:?}")]
	WireTypeMismatch {
		message: &'static str,
		field: &'static str,
		number: u32,
		expected: WireType,
		actual: WireType,
	},

	#[error("invalid UTF-8 in string at offset {offset}")]
	InvalidUtf8 { offset: usize },

	#[error("message at offset {offset} is nested more than {limit} levels deep")]
	RecursionLimit { limit: usize, offset: usize },
}

pub type Result<T> = std::result::Result<T, DecodeError>;
