use crate::bytes::Cursor;
use crate::error::record;
use crate::mdl::tag::{self, form_prefix, is_container, is_legal_child};
use crate::mdl::{ChunkTree, NodeId};
use crate::{ChunkHeader, DecodeError, FourCc, Result};

/// MDL decoding options.
#[derive(Debug, Clone)]
pub struct MdlOptions {
	/// Nesting level at which containers are no longer descended; the root `RIFF` is level 0.
	pub max_depth: usize,
	/// Keep `VERB` as an opaque leaf instead of listing its vertex chunks.
	pub metadata_only: bool,
}

impl Default for MdlOptions {
	fn default() -> Self {
		Self {
			max_depth: 16,
			metadata_only: false,
		}
	}
}

impl MdlOptions {
	/// Preset for name, GUID and texture extraction without geometry chunks.
	pub fn metadata_only() -> Self {
		Self {
			metadata_only: true,
			..Self::default()
		}
	}
}

/// Outcome of the tree walk: the tree and the RIFF form type.
pub(crate) struct ParsedTree {
	pub tree: ChunkTree,
	pub form: FourCc,
}

struct TreeBuilder<'a, 'd> {
	options: &'a MdlOptions,
	tree: ChunkTree,
	diagnostics: &'d mut Vec<DecodeError>,
}

/// Parse the full chunk hierarchy of an MDL buffer.
///
/// Legacy and unknown form types are listed one level deep only, with an
/// `UnsupportedVariant` diagnostic.
pub(crate) fn parse_tree(bytes: &[u8], options: &MdlOptions, diagnostics: &mut Vec<DecodeError>) -> Result<ParsedTree> {
	let mut cursor = Cursor::new(bytes);
	let header = ChunkHeader::read_raw(&mut cursor)?;
	if header.tag != tag::RIFF {
		return Err(DecodeError::NotRiff { got: header.tag });
	}
	let payload = clip_payload(&header, cursor.remaining(), diagnostics);
	let clipped = payload != header.payload();
	let mut body = cursor.sub(payload.len)?;
	let form = FourCc(body.read_code4()?);
	tracing::debug!(form = %form, len = header.len, "mdl riff");

	let mut builder = TreeBuilder {
		options,
		tree: ChunkTree::default(),
		diagnostics,
	};
	let root = builder.tree.push(header.tag, header.at, payload, None, 0, true);

	let children = if form == tag::FORM_MDLX {
		builder.parse_children(body, root, header.tag, 1, clipped)?
	} else {
		record(
			builder.diagnostics,
			DecodeError::UnsupportedVariant {
				at: header.at + ChunkHeader::SIZE,
				what: format!("MDL form {form}, interior not decoded").into(),
			},
		);
		builder.list_opaque(body, root, clipped)?
	};
	builder.tree.set_children(root, &children);

	Ok(ParsedTree { tree: builder.tree, form })
}

impl TreeBuilder<'_, '_> {
	fn parse_children(&mut self, mut cursor: Cursor<'_>, parent: NodeId, parent_tag: FourCc, depth: usize, clipped: bool) -> Result<Vec<NodeId>> {
		let mut ids = Vec::new();
		while cursor.remaining() > 0 {
			let Some(header) = self.next_header(&mut cursor, clipped)? else {
				break;
			};
			let payload = clip_payload(&header, cursor.remaining(), self.diagnostics);
			let body = cursor.sub(payload.len)?;
			if header.is_padded() && cursor.remaining() > 0 {
				cursor.skip(1)?;
			}

			let conformant = is_legal_child(header.tag, Some(parent_tag));
			if !conformant {
				record(
					self.diagnostics,
					DecodeError::IllegalNesting {
						at: header.at,
						tag: header.tag,
						parent: parent_tag,
					},
				);
			}

			let id = self.tree.push(header.tag, header.at, payload, Some(parent), depth, conformant);
			ids.push(id);

			if !is_container(header.tag) || (self.options.metadata_only && header.tag == tag::VERB) {
				continue;
			}
			if depth >= self.options.max_depth {
				record(
					self.diagnostics,
					DecodeError::DepthExceeded {
						at: header.at,
						max_depth: self.options.max_depth,
					},
				);
				continue;
			}

			tracing::debug!(tag = %header.tag, offset = header.at, depth, "mdl container");
			let mut inner = body;
			inner.skip(form_prefix(header.tag).min(inner.remaining()))?;
			let inner_clipped = clipped || payload != header.payload();
			let children = self.parse_children(inner, id, header.tag, depth + 1, inner_clipped)?;
			self.tree.set_children(id, &children);
		}
		Ok(ids)
	}

	fn list_opaque(&mut self, mut cursor: Cursor<'_>, parent: NodeId, clipped: bool) -> Result<Vec<NodeId>> {
		let mut ids = Vec::new();
		while cursor.remaining() > 0 {
			let Some(header) = self.next_header(&mut cursor, clipped)? else {
				break;
			};
			let payload = clip_payload(&header, cursor.remaining(), self.diagnostics);
			cursor.skip(payload.len)?;
			if header.is_padded() && cursor.remaining() > 0 {
				cursor.skip(1)?;
			}
			ids.push(self.tree.push(header.tag, header.at, payload, Some(parent), 1, true));
		}
		Ok(ids)
	}

	/// Next chunk header, or `None` when a range already cut short ends mid-header.
	fn next_header(&mut self, cursor: &mut Cursor<'_>, clipped: bool) -> Result<Option<ChunkHeader>> {
		match ChunkHeader::read_raw(cursor) {
			Ok(header) => Ok(Some(header)),
			Err(DecodeError::TruncatedHeader { at, rem, .. }) if clipped => {
				record(
					self.diagnostics,
					DecodeError::InvalidLength {
						at,
						declared: ChunkHeader::SIZE as u64,
						rem,
					},
				);
				Ok(None)
			}
			Err(err) => Err(err),
		}
	}
}

/// Declared payload, or the available bytes plus an `InvalidLength` diagnostic when it overruns.
fn clip_payload(header: &ChunkHeader, available: usize, diagnostics: &mut Vec<DecodeError>) -> crate::ByteRange {
	match header.check_len(available) {
		Ok(()) => header.payload(),
		Err(err) => {
			record(diagnostics, err);
			header.truncated_payload(available)
		}
	}
}
