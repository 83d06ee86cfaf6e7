// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plain-text rendering of resolved call trees.

use std::fmt::Write;

use stackmap_remap::{ResolvedFrame, ResolvedNode, ResolvedThread, ResolvedTree};

/// Appended to names that came from a mapping table.
const REMAPPED_MARKER: char = '*';
const INDENT: &str = "  ";

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
	/// Frames deeper than this are not printed. `None` prints everything.
	pub max_depth: Option<usize>,
}

pub fn frame_label(frame: &ResolvedFrame) -> String {
	let mut label = String::new();
	if let Some(package) = &frame.package_name {
		label.push_str(package);
	}
	label.push_str(&frame.class_name);
	if frame.remapped_class {
		label.push(REMAPPED_MARKER);
	}
	if let Some(lambda) = &frame.lambda {
		label.push_str(lambda);
	}
	label.push('.');
	label.push_str(&frame.method_name);
	if frame.remapped_method {
		label.push(REMAPPED_MARKER);
	}
	label
}

fn node_label(tree: &ResolvedTree) -> String {
	match &tree.node {
		ResolvedNode::Thread => "(thread)".to_string(),
		ResolvedNode::Native => "native".to_string(),
		ResolvedNode::Frame(frame) if tree.line_number > 0 => {
			format!("{}:{}", frame_label(frame), tree.line_number)
		}
		ResolvedNode::Frame(frame) => frame_label(frame),
	}
}

pub fn render_thread(thread: &ResolvedThread, options: RenderOptions) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "{} ({:.1}ms)", thread.name, thread.time);

	// Pre-order walk; children are pushed in reverse so they pop in order.
	let mut pending: Vec<(&ResolvedTree, usize)> =
		thread.children.iter().rev().map(|child| (child, 1)).collect();
	while let Some((tree, depth)) = pending.pop() {
		if options.max_depth.is_some_and(|max| depth > max) {
			continue;
		}
		render_line(&mut out, tree, depth, thread.time);
		pending.extend(tree.children.iter().rev().map(|child| (child, depth + 1)));
	}
	out
}

fn render_line(out: &mut String, tree: &ResolvedTree, depth: usize, total: f64) {
	let percent = if total > 0.0 {
		tree.time / total * 100.0
	} else {
		0.0
	};
	let _ = writeln!(
		out,
		"{}{} {:.1}ms ({:.1}%)",
		INDENT.repeat(depth),
		node_label(tree),
		tree.time,
		percent
	);
}

#[cfg(test)]
mod tests {
	use super::*;
	use stackmap_remap::{resolve_thread, IdentityRemap, Remapper};
	use stackmap_wire::{McpMappings, StackTraceNode, ThreadNode};

	fn frame(class_name: &str, method_name: &str, time: f64) -> StackTraceNode {
		StackTraceNode {
			time,
			class_name: class_name.to_string(),
			method_name: method_name.to_string(),
			..StackTraceNode::default()
		}
	}

	fn thread() -> ThreadNode {
		ThreadNode {
			name: "Server thread".to_string(),
			time: 100.0,
			children: vec![StackTraceNode {
				line_number: 12,
				children: vec![
					frame("com.example.Foo$$Lambda$12", "a", 50.0),
					frame("native", "park", 10.0),
				],
				..frame("java.lang.Thread", "run", 60.0)
			}],
		}
	}

	#[test]
	fn test_render_unmapped_thread() {
		let resolved = resolve_thread(&thread(), &IdentityRemap);
		let text = render_thread(&resolved, RenderOptions::default());
		assert_eq!(
			text,
			"Server thread (100.0ms)\n\
			 \x20 java.lang.Thread.run:12 60.0ms (60.0%)\n\
			 \x20   com.example.Foo$$Lambda$12.a 50.0ms (50.0%)\n\
			 \x20   native 10.0ms (10.0%)\n"
		);
	}

	#[test]
	fn test_render_marks_remapped_names() {
		let mut mappings = McpMappings::default();
		mappings.methods.insert("a".to_string(), "tick".to_string());
		let resolved = resolve_thread(&thread(), &Remapper::mcp(mappings));
		let text = render_thread(&resolved, RenderOptions::default());
		assert!(text.contains("com.example.Foo$$Lambda$12.tick* 50.0ms"));
		assert!(text.contains("java.lang.Thread.run:12"));
	}

	#[test]
	fn test_render_respects_max_depth() {
		let resolved = resolve_thread(&thread(), &IdentityRemap);
		let text = render_thread(&resolved, RenderOptions { max_depth: Some(1) });
		assert_eq!(text.lines().count(), 2);
	}

	#[test]
	fn test_render_deep_chain() {
		const DEPTH: usize = 2_000;
		let mut node = frame("x.Leaf", "run", 1.0);
		for _ in 0..DEPTH {
			node = StackTraceNode {
				children: vec![node],
				..frame("x.Caller", "call", 1.0)
			};
		}
		let thread = ThreadNode {
			name: "deep".to_string(),
			time: 1.0,
			children: vec![node],
		};

		let resolved = resolve_thread(&thread, &IdentityRemap);
		let text = render_thread(&resolved, RenderOptions::default());
		assert_eq!(text.lines().count(), DEPTH + 2);
		let last = text.lines().last().unwrap();
		assert!(last.ends_with("x.Leaf.run 1.0ms (100.0%)"));
		assert_eq!(last.len() - last.trim_start().len(), INDENT.len() * (DEPTH + 1));
	}

	#[test]
	fn test_frame_label_marks_remapped_class() {
		let label = frame_label(&ResolvedFrame {
			class_name: "Entity".to_string(),
			method_name: "tick".to_string(),
			package_name: Some("net.minecraft.entity.".to_string()),
			lambda: None,
			remapped_class: true,
			remapped_method: false,
		});
		assert_eq!(label, "net.minecraft.entity.Entity*.tick");
	}
}
