// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;

use stackmap_wire::{BukkitMappings, ClassMapping};

/// Obfuscated class id → Bukkit class entry.
///
/// Stores table keys rather than references so it can live next to the
/// table it was built from. When two Bukkit classes share an obfuscated id,
/// the one iterated last wins.
#[derive(Debug, Clone, Default)]
pub struct ReverseIndex {
	by_obfuscated: HashMap<String, String>,
}

impl ReverseIndex {
	pub fn build(bukkit: &BukkitMappings) -> Self {
		let by_obfuscated = bukkit
			.classes
			.iter()
			.map(|(key, class)| (class.obfuscated.clone(), key.clone()))
			.collect();
		Self { by_obfuscated }
	}

	pub fn get<'a>(&self, bukkit: &'a BukkitMappings, obfuscated: &str) -> Option<&'a ClassMapping> {
		let key = self.by_obfuscated.get(obfuscated)?;
		bukkit.classes.get(key)
	}

	pub fn len(&self) -> usize {
		self.by_obfuscated.len()
	}

	pub fn is_empty(&self) -> bool {
		self.by_obfuscated.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn class(mapped: &str, obfuscated: &str) -> ClassMapping {
		ClassMapping {
			mapped: mapped.to_string(),
			obfuscated: obfuscated.to_string(),
			methods: Vec::new(),
		}
	}

	#[test]
	fn test_lookup_by_obfuscated_id() {
		let mut bukkit = BukkitMappings::default();
		bukkit.classes.insert("EntityA".to_string(), class("EntityA", "a"));
		bukkit.classes.insert("World".to_string(), class("World", "bq"));

		let index = ReverseIndex::build(&bukkit);
		assert_eq!(index.len(), 2);
		assert_eq!(index.get(&bukkit, "a").map(|c| c.mapped.as_str()), Some("EntityA"));
		assert_eq!(index.get(&bukkit, "bq").map(|c| c.mapped.as_str()), Some("World"));
		assert!(index.get(&bukkit, "zz").is_none());
	}

	#[test]
	fn test_duplicate_obfuscated_ids_keep_one_entry() {
		let mut bukkit = BukkitMappings::default();
		bukkit.classes.insert("First".to_string(), class("First", "a"));
		bukkit.classes.insert("Second".to_string(), class("Second", "a"));

		let index = ReverseIndex::build(&bukkit);
		assert_eq!(index.len(), 1);
		let hit = index.get(&bukkit, "a").unwrap();
		assert!(hit.mapped == "First" || hit.mapped == "Second");
	}

	#[test]
	fn test_empty_table() {
		let bukkit = BukkitMappings::default();
		let index = ReverseIndex::build(&bukkit);
		assert!(index.is_empty());
	}
}
