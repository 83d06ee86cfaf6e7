// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! `stackmap`: decode profiler payloads and print deobfuscated call trees.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod render;

use commands::{HeapArgs, RemapArgs};

#[derive(Parser, Debug)]
#[command(
	name = "stackmap",
	about = "Deobfuscate sampled stack traces with Minecraft mapping datasets",
	version
)]
struct Args {
	/// Config file to use instead of $XDG_CONFIG_HOME/stackmap/config.toml
	#[arg(long, global = true, env = "STACKMAP_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Decode a sampler payload and print each thread with remapped names
	Remap(RemapArgs),
	/// List the mapping datasets published in the manifest
	Mappings,
	/// Decode a heap snapshot and print its class histogram
	Heap(HeapArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let args = Args::parse();

	let config = match &args.config {
		Some(path) => stackmap_config::load_config_with_file(path)?,
		None => stackmap_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.init();

	match args.command {
		Command::Remap(remap_args) => commands::handle_remap(remap_args, &config).await,
		Command::Mappings => commands::handle_mappings(&config).await,
		Command::Heap(heap_args) => commands::handle_heap(heap_args),
	}
}
