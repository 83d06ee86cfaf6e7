// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use clap::Args;
use stackmap_wire::HeapData;
use tracing::info;

use crate::commands::read_payload;

#[derive(Debug, Clone, Args)]
pub struct HeapArgs {
	/// Heap snapshot payload file
	pub payload: PathBuf,

	/// Only print the first N entries
	#[arg(long)]
	pub limit: Option<usize>,
}

pub fn handle_heap(args: HeapArgs) -> anyhow::Result<()> {
	let heap: HeapData = read_payload(&args.payload)?;
	info!(entries = heap.entries.len(), "decoded heap snapshot");
	print!("{}", format_histogram(&heap, args.limit));
	Ok(())
}

fn format_histogram(heap: &HeapData, limit: Option<usize>) -> String {
	let mut out = format!("{:>5} {:>12} {:>14}  {}\n", "#", "instances", "bytes", "type");
	for entry in heap.entries.iter().take(limit.unwrap_or(usize::MAX)) {
		out.push_str(&format!(
			"{:>5} {:>12} {:>14}  {}\n",
			entry.order, entry.instances, entry.size, entry.type_name
		));
	}
	out.push_str(&format!(
		"{} entries, {} bytes total\n",
		heap.entries.len(),
		heap.total_size()
	));
	out
}
