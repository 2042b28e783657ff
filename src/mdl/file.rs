use serde::Serialize;

use crate::error::record;
use crate::mdl::header::read_payload;
use crate::mdl::parse::parse_tree;
use crate::mdl::{ChunkNode, ChunkTree, MdlHeader, MdlOptions, NodeId, tag};
use crate::{DecodeError, Result};

/// Width of one `TEXT` texture name entry.
pub const TEXTURE_NAME_WIDTH: usize = 64;

/// Decoded MDL file borrowing its source buffer.
#[derive(Debug, Clone, Serialize)]
pub struct MdlFile<'a> {
	#[serde(skip)]
	bytes: &'a [u8],
	/// Top-level identity fields.
	pub header: MdlHeader,
	/// Full chunk hierarchy.
	pub tree: ChunkTree,
	/// Texture file names referenced by `TEXT` chunks.
	pub textures: Vec<Box<str>>,
	/// Recovered chunk-level errors, in file order.
	pub diagnostics: Vec<DecodeError>,
}

impl<'a> MdlFile<'a> {
	/// Decode an MDL buffer with default options.
	pub fn parse(bytes: &'a [u8]) -> Result<Self> {
		Self::parse_with(bytes, &MdlOptions::default())
	}

	/// Decode an MDL buffer.
	///
	/// A missing `RIFF` header or a truncated chunk header is returned as `Err`;
	/// length overruns, illegal nesting and legacy interiors become diagnostics.
	pub fn parse_with(bytes: &'a [u8], options: &MdlOptions) -> Result<Self> {
		let mut diagnostics = Vec::new();
		let parsed = parse_tree(bytes, options, &mut diagnostics)?;
		let header = MdlHeader::extract(bytes, &parsed.tree, parsed.form, &mut diagnostics);
		let textures = texture_names(bytes, &parsed.tree, &mut diagnostics);
		tracing::debug!(
			chunks = parsed.tree.len(),
			textures = textures.len(),
			diagnostics = diagnostics.len(),
			"mdl parsed"
		);

		Ok(Self {
			bytes,
			header,
			tree: parsed.tree,
			textures,
			diagnostics,
		})
	}

	/// Source buffer.
	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}

	/// Payload bytes of `id`.
	pub fn payload(&self, id: NodeId) -> Option<&'a [u8]> {
		self.tree.get(id).and_then(|node| node.payload.slice(self.bytes))
	}

	/// Nodes flagged as violating the legality table.
	pub fn nonconformant(&self) -> impl Iterator<Item = (NodeId, &ChunkNode)> {
		self.tree.iter().filter(|(_, node)| !node.conformant)
	}
}

fn texture_names(bytes: &[u8], tree: &ChunkTree, diagnostics: &mut Vec<DecodeError>) -> Vec<Box<str>> {
	let mut names = Vec::new();
	for (_, node) in tree.find_all(tag::TEXT) {
		let count = node.payload.len / TEXTURE_NAME_WIDTH;
		if node.payload.len % TEXTURE_NAME_WIDTH != 0 {
			record(
				diagnostics,
				DecodeError::InvalidLength {
					at: node.at,
					declared: node.payload.len as u64,
					rem: count * TEXTURE_NAME_WIDTH,
				},
			);
		}
		let entries = read_payload(bytes, node, diagnostics, |cursor| {
			(0..count)
				.map(|_| cursor.read_fixed_string(TEXTURE_NAME_WIDTH).map(String::into_boxed_str))
				.collect::<Result<Vec<_>>>()
		});
		names.extend(entries.unwrap_or_default());
	}
	names
}
