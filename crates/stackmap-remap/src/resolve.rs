// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Turning stack nodes into display records.

use stackmap_wire::{StackTraceNode, ThreadNode};

use crate::strategy::RemapStrategy;

const LAMBDA_MARKER: &str = "$$Lambda";

/// Display form of a single frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedNode {
	/// Synthetic thread root (empty class or method name).
	Thread,
	/// Frame outside managed code.
	Native,
	Frame(ResolvedFrame),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFrame {
	/// Bare class name without package or lambda suffix.
	pub class_name: String,
	pub method_name: String,
	/// Package including the trailing `.`, e.g. `com.example.`.
	pub package_name: Option<String>,
	/// Synthetic lambda suffix starting at `$$Lambda`.
	pub lambda: Option<String>,
	pub remapped_class: bool,
	pub remapped_method: bool,
}

impl ResolvedFrame {
	/// Package, class and lambda joined back together.
	pub fn qualified_class_name(&self) -> String {
		let mut name = String::new();
		if let Some(package) = &self.package_name {
			name.push_str(package);
		}
		name.push_str(&self.class_name);
		if let Some(lambda) = &self.lambda {
			name.push_str(lambda);
		}
		name
	}
}

/// Resolves one node. Does not look at children.
pub fn resolve(node: &StackTraceNode, strategy: &dyn RemapStrategy) -> ResolvedNode {
	if node.is_thread_root() {
		return ResolvedNode::Thread;
	}
	if node.is_native() {
		return ResolvedNode::Native;
	}

	// An empty mapped name means the table has no useful entry.
	let remapped = strategy.remap(node);
	let remapped_class_name = remapped.class_name.filter(|name| !name.is_empty());
	let remapped_method_name = remapped.method_name.filter(|name| !name.is_empty());
	let remapped_class = remapped_class_name.is_some();
	let remapped_method = remapped_method_name.is_some();
	let full_class = remapped_class_name.unwrap_or_else(|| node.class_name.clone());
	let method_name = remapped_method_name.unwrap_or_else(|| node.method_name.clone());

	let (package_name, class_name) = split_package(&full_class);
	let (class_name, lambda) = split_lambda(class_name);

	ResolvedNode::Frame(ResolvedFrame {
		class_name: class_name.to_string(),
		method_name,
		package_name: package_name.map(str::to_string),
		lambda: lambda.map(str::to_string),
		remapped_class,
		remapped_method,
	})
}

/// `com.example.Foo` → (`Some("com.example.")`, `Foo`).
fn split_package(class_name: &str) -> (Option<&str>, &str) {
	match class_name.rfind('.') {
		Some(idx) => (Some(&class_name[..=idx]), &class_name[idx + 1..]),
		None => (None, class_name),
	}
}

/// `Foo$$Lambda$12` → (`Foo`, `Some("$$Lambda$12")`).
fn split_lambda(class_name: &str) -> (&str, Option<&str>) {
	match class_name.find(LAMBDA_MARKER) {
		Some(idx) => (&class_name[..idx], Some(&class_name[idx..])),
		None => (class_name, None),
	}
}

/// A resolved call tree with the same shape as its source.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTree {
	pub time: f64,
	pub line_number: i32,
	pub node: ResolvedNode,
	pub children: Vec<ResolvedTree>,
}

impl ResolvedTree {
	/// Total number of nodes, including this one.
	pub fn node_count(&self) -> usize {
		let mut count = 0;
		let mut pending = vec![self];
		while let Some(tree) = pending.pop() {
			count += 1;
			pending.extend(&tree.children);
		}
		count
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedThread {
	pub name: String,
	pub time: f64,
	pub children: Vec<ResolvedTree>,
}

pub fn resolve_tree(node: &StackTraceNode, strategy: &dyn RemapStrategy) -> ResolvedTree {
	ResolvedTree {
		time: node.time,
		line_number: node.line_number,
		node: resolve(node, strategy),
		children: resolve_children(&node.children, strategy),
	}
}

pub fn resolve_thread(thread: &ThreadNode, strategy: &dyn RemapStrategy) -> ResolvedThread {
	ResolvedThread {
		name: thread.name.clone(),
		time: thread.time,
		children: resolve_children(&thread.children, strategy),
	}
}

/// Resolves each subtree depth-first with an explicit stack, so tree depth
/// is bounded by memory rather than the call stack.
fn resolve_children(nodes: &[StackTraceNode], strategy: &dyn RemapStrategy) -> Vec<ResolvedTree> {
	let mut resolved = Vec::with_capacity(nodes.len());
	for root in nodes {
		// Each entry is a source node and the children resolved so far.
		let mut stack = vec![(root, Vec::with_capacity(root.children.len()))];
		while let Some((node, children)) = stack.pop() {
			if let Some(child) = node.children.get(children.len()) {
				stack.push((node, children));
				stack.push((child, Vec::with_capacity(child.children.len())));
				continue;
			}

			let tree = ResolvedTree {
				time: node.time,
				line_number: node.line_number,
				node: resolve(node, strategy),
				children,
			};
			match stack.last_mut() {
				Some((_, siblings)) => siblings.push(tree),
				None => resolved.push(tree),
			}
		}
	}
	resolved
}
