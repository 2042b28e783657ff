use serde::Serialize;
use uuid::Uuid;

use crate::bytes::Cursor;
use crate::error::record;
use crate::mdl::{ChunkNode, ChunkTree, tag};
use crate::{DecodeError, FourCc, Result};

/// Model generation implied by the RIFF form type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MdlVariant {
	/// `MDLX`.
	Fsx,
	/// `MDL8` or `MDL9`; only top-level identity fields are extracted.
	LegacyFs9,
	/// Any other form type.
	Unknown,
}

impl MdlVariant {
	/// Classify a RIFF form type.
	pub fn from_form(form: FourCc) -> Self {
		match form {
			tag::FORM_MDLX => Self::Fsx,
			tag::FORM_MDL8 | tag::FORM_MDL9 => Self::LegacyFs9,
			_ => Self::Unknown,
		}
	}
}

/// Axis-aligned model bounds from `BBOX`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
	/// Minimum corner.
	pub min: [f32; 3],
	/// Maximum corner.
	pub max: [f32; 3],
}

/// Top-level model identity and metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdlHeader {
	/// RIFF form type.
	pub form: FourCc,
	/// Model generation implied by `form`.
	pub variant: MdlVariant,
	/// `MDLH` magic number.
	pub magic: Option<u32>,
	/// `MDLH` model version.
	pub model_version: Option<f32>,
	/// `MDLG` model GUID.
	pub guid: Option<Uuid>,
	/// `MDLN` friendly name.
	pub name: Option<Box<str>>,
	/// `BBOX` bounds.
	pub bounding_box: Option<BoundingBox>,
	/// `RADI` radius.
	pub radius: Option<f32>,
}

impl MdlHeader {
	/// Collect header fields from the root's direct children.
	pub(crate) fn extract(bytes: &[u8], tree: &ChunkTree, form: FourCc, diagnostics: &mut Vec<DecodeError>) -> Self {
		let mut header = Self {
			form,
			variant: MdlVariant::from_form(form),
			magic: None,
			model_version: None,
			guid: None,
			name: None,
			bounding_box: None,
			radius: None,
		};
		let Some(root) = tree.root() else {
			return header;
		};

		for child in tree.children(root) {
			let Some(node) = tree.get(*child) else {
				continue;
			};
			match node.tag {
				tag::MDLH => {
					if let Some((magic, version)) = read_payload(bytes, node, diagnostics, |c| Ok((c.read_u32_le()?, c.read_f32_le()?))) {
						header.magic = Some(magic);
						header.model_version = Some(version);
					}
				}
				tag::MDLG => header.guid = read_payload(bytes, node, diagnostics, |c| c.read_guid()),
				tag::MDLN => {
					header.name = read_payload(bytes, node, diagnostics, |c| {
						let width = c.remaining();
						c.read_fixed_string(width)
					})
					.map(String::into_boxed_str)
				}
				tag::BBOX => {
					header.bounding_box = read_payload(bytes, node, diagnostics, |c| {
						let min = [c.read_f32_le()?, c.read_f32_le()?, c.read_f32_le()?];
						let max = [c.read_f32_le()?, c.read_f32_le()?, c.read_f32_le()?];
						Ok(BoundingBox { min, max })
					})
				}
				tag::RADI => header.radius = read_payload(bytes, node, diagnostics, |c| c.read_f32_le()),
				_ => {}
			}
		}
		header
	}
}

/// Run `read` over a chunk payload; a short payload becomes an `InvalidLength` diagnostic.
pub(crate) fn read_payload<T>(
	bytes: &[u8],
	node: &ChunkNode,
	diagnostics: &mut Vec<DecodeError>,
	read: impl FnOnce(&mut Cursor<'_>) -> Result<T>,
) -> Option<T> {
	let result = Cursor::over(bytes, node.payload).and_then(|mut cursor| read(&mut cursor));
	match result {
		Ok(value) => Some(value),
		Err(DecodeError::OutOfBounds { need, .. }) => {
			record(
				diagnostics,
				DecodeError::InvalidLength {
					at: node.at,
					declared: need as u64,
					rem: node.payload.len,
				},
			);
			None
		}
		Err(err) => {
			record(diagnostics, err);
			None
		}
	}
}
