use std::ops::Range;

use serde::Serialize;

use crate::{ByteRange, FourCc};

/// Index of a node inside a [`ChunkTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

/// One decoded RIFF chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChunkNode {
	/// Chunk tag.
	pub tag: FourCc,
	/// Absolute offset of the chunk header.
	pub at: usize,
	/// Payload range, clipped to the enclosing chunk when the declared length overran it.
	pub payload: ByteRange,
	/// Enclosing chunk; `None` for the root.
	pub parent: Option<NodeId>,
	/// Nesting depth; the root `RIFF` chunk is 0.
	pub depth: usize,
	/// False when the legality table rejects this tag under its parent.
	pub conformant: bool,
	children: Range<usize>,
}

/// Arena-stored chunk hierarchy: a flat node list plus contiguous child-index runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChunkTree {
	nodes: Vec<ChunkNode>,
	child_ids: Vec<NodeId>,
}

impl ChunkTree {
	pub(crate) fn push(&mut self, tag: FourCc, at: usize, payload: ByteRange, parent: Option<NodeId>, depth: usize, conformant: bool) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(ChunkNode {
			tag,
			at,
			payload,
			parent,
			depth,
			conformant,
			children: 0..0,
		});
		id
	}

	/// Store `children` as the child run of `parent`.
	pub(crate) fn set_children(&mut self, parent: NodeId, children: &[NodeId]) {
		let start = self.child_ids.len();
		self.child_ids.extend_from_slice(children);
		if let Some(node) = self.nodes.get_mut(parent.0) {
			node.children = start..self.child_ids.len();
		}
	}

	/// Root node id, when the tree is non-empty.
	pub fn root(&self) -> Option<NodeId> {
		(!self.nodes.is_empty()).then_some(NodeId(0))
	}

	/// Node by id.
	pub fn get(&self, id: NodeId) -> Option<&ChunkNode> {
		self.nodes.get(id.0)
	}

	/// Direct children of `id`, in file order.
	pub fn children(&self, id: NodeId) -> &[NodeId] {
		self.get(id)
			.and_then(|node| self.child_ids.get(node.children.clone()))
			.unwrap_or(&[])
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the tree has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// All nodes in creation order (parents before their children).
	pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ChunkNode)> {
		self.nodes.iter().enumerate().map(|(index, node)| (NodeId(index), node))
	}

	/// Nodes carrying `tag`, in creation order.
	pub fn find_all(&self, tag: FourCc) -> impl Iterator<Item = (NodeId, &ChunkNode)> {
		self.iter().filter(move |(_, node)| node.tag == tag)
	}

	/// First direct child of `id` carrying `tag`.
	pub fn child_by_tag(&self, id: NodeId, tag: FourCc) -> Option<NodeId> {
		self.children(id)
			.iter()
			.copied()
			.find(|child| self.get(*child).is_some_and(|node| node.tag == tag))
	}

	/// Tags from the root down to `id`.
	pub fn path(&self, id: NodeId) -> Vec<FourCc> {
		let mut path = Vec::new();
		let mut current = self.get(id);
		while let Some(node) = current {
			path.push(node.tag);
			current = node.parent.and_then(|parent| self.get(parent));
		}
		path.reverse();
		path
	}
}
