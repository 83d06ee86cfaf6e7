// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Closed enumerations carried as varints.
//!
//! Producers may be newer than this crate, so every enum keeps an
//! `Unknown(raw)` variant instead of rejecting values it does not know.

use std::fmt;

macro_rules! wire_enum {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$($(#[$vmeta:meta])* $variant:ident = $value:literal => $label:literal,)+
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub enum $name {
			$($(#[$vmeta])* $variant,)+
			/// A value this build does not recognise, preserved as sent.
			Unknown(i32),
		}

		impl $name {
			pub fn from_raw(raw: i32) -> Self {
				match raw {
					$($value => Self::$variant,)+
					other => Self::Unknown(other),
				}
			}

			pub fn raw(self) -> i32 {
				match self {
					$(Self::$variant => $value,)+
					Self::Unknown(raw) => raw,
				}
			}

			/// Display label; `"unknown"` for unrecognised values.
			pub fn label(self) -> &'static str {
				match self {
					$(Self::$variant => $label,)+
					Self::Unknown(_) => "unknown",
				}
			}

			pub fn is_known(self) -> bool {
				!matches!(self, Self::Unknown(_))
			}
		}

		impl Default for $name {
			fn default() -> Self {
				Self::from_raw(0)
			}
		}

		impl From<i32> for $name {
			fn from(raw: i32) -> Self {
				Self::from_raw(raw)
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str(self.label())
			}
		}
	};
}

wire_enum! {
	/// Who started a profiler or heap dump.
	pub enum CommandSenderType {
		Other = 0 => "other",
		Player = 1 => "player",
	}
}

wire_enum! {
	/// Which threads the sampler captured.
	pub enum ThreadDumperType {
		All = 0 => "all",
		Specific = 1 => "specific",
		Regex = 2 => "regex",
	}
}

wire_enum! {
	pub enum DataAggregatorType {
		Simple = 0 => "simple",
		/// Only ticks longer than a threshold were recorded.
		Ticked = 1 => "ticked",
	}
}

wire_enum! {
	/// How sampled threads were grouped into thread nodes.
	pub enum ThreadGrouper {
		ByName = 0 => "by name",
		ByPool = 1 => "by pool",
		AsOne = 2 => "as one",
	}
}

wire_enum! {
	pub enum PlatformType {
		Server = 0 => "server",
		Client = 1 => "client",
		Proxy = 2 => "proxy",
	}
}
