//! MDL chunk tags and the parent/child legality table.

use crate::FourCc;

/// RIFF container.
pub const RIFF: FourCc = FourCc::new(b"RIFF");

/// Model header.
pub const MDLH: FourCc = FourCc::new(b"MDLH");
/// Model GUID.
pub const MDLG: FourCc = FourCc::new(b"MDLG");
/// Model name.
pub const MDLN: FourCc = FourCc::new(b"MDLN");
/// Unidentified header chunk.
pub const SMAP: FourCc = FourCc::new(b"SMAP");
/// Parameter block.
pub const PARA: FourCc = FourCc::new(b"PARA");
/// Crash tree.
pub const CRAS: FourCc = FourCc::new(b"CRAS");
/// Bounding box.
pub const BBOX: FourCc = FourCc::new(b"BBOX");
/// Bounding radius.
pub const RADI: FourCc = FourCc::new(b"RADI");
/// Model data container.
pub const MDLD: FourCc = FourCc::new(b"MDLD");
/// Unidentified top-level chunk.
pub const SHAM: FourCc = FourCc::new(b"SHAM");

/// Texture list.
pub const TEXT: FourCc = FourCc::new(b"TEXT");
/// Material list.
pub const MATE: FourCc = FourCc::new(b"MATE");
/// Triangle vertex indices.
pub const INDE: FourCc = FourCc::new(b"INDE");
/// Vertex buffer container.
pub const VERB: FourCc = FourCc::new(b"VERB");
/// Static transform matrices.
pub const TRAN: FourCc = FourCc::new(b"TRAN");
/// Animation map.
pub const AMAP: FourCc = FourCc::new(b"AMAP");
/// Scene graph.
pub const SCEN: FourCc = FourCc::new(b"SCEN");
/// Scene graph animation links.
pub const SGAL: FourCc = FourCc::new(b"SGAL");
/// Scene graph visibility links.
pub const SGVL: FourCc = FourCc::new(b"SGVL");
/// Scene graph joint constraints.
pub const SGJC: FourCc = FourCc::new(b"SGJC");
/// Scene graph bone references.
pub const SGBR: FourCc = FourCc::new(b"SGBR");
/// LOD table.
pub const LODT: FourCc = FourCc::new(b"LODT");
/// Animation block.
pub const ANIB: FourCc = FourCc::new(b"ANIB");
/// Platform list.
pub const PLAL: FourCc = FourCc::new(b"PLAL");
/// Attach point list.
pub const REFL: FourCc = FourCc::new(b"REFL");
/// Attached objects, keyed by attach point name.
pub const ATTO: FourCc = FourCc::new(b"ATTO");
/// Unidentified model data chunk.
pub const VISL: FourCc = FourCc::new(b"VISL");
/// Unidentified; seen holding gauge XML.
pub const MREC: FourCc = FourCc::new(b"MREC");
/// Unidentified model data chunk.
pub const MREI: FourCc = FourCc::new(b"MREI");

/// Vertex data.
pub const VERT: FourCc = FourCc::new(b"VERT");
/// Tangent data.
pub const TANS: FourCc = FourCc::new(b"TANS");
/// Bone map.
pub const BMAP: FourCc = FourCc::new(b"BMAP");
/// Skin weights.
pub const SKIN: FourCc = FourCc::new(b"SKIN");

/// Level of detail entry.
pub const LODE: FourCc = FourCc::new(b"LODE");
/// Drawable part.
pub const PART: FourCc = FourCc::new(b"PART");
/// Platform surface.
pub const PLAT: FourCc = FourCc::new(b"PLAT");
/// Attach point.
pub const REFP: FourCc = FourCc::new(b"REFP");

/// FSX model form type.
pub const FORM_MDLX: FourCc = FourCc::new(b"MDLX");
/// FS9 model form type.
pub const FORM_MDL8: FourCc = FourCc::new(b"MDL8");
/// FS9 model form type.
pub const FORM_MDL9: FourCc = FourCc::new(b"MDL9");

const RIFF_CHILDREN: &[FourCc] = &[MDLH, MDLG, MDLN, SMAP, PARA, CRAS, BBOX, RADI, MDLD, SHAM];
const MDLD_CHILDREN: &[FourCc] = &[
	TEXT, MATE, INDE, VERB, TRAN, AMAP, SCEN, SGAL, SGVL, SGJC, SGBR, LODT, ANIB, PLAL, REFL, ATTO, VISL, MREC, MREI,
];
const VERB_CHILDREN: &[FourCc] = &[VERT, TANS, BMAP, SKIN];

/// Allowed children of `parent`; empty for leaves and unknown tags.
pub fn legal_children(parent: FourCc) -> &'static [FourCc] {
	match parent {
		RIFF => RIFF_CHILDREN,
		MDLD => MDLD_CHILDREN,
		VERB => VERB_CHILDREN,
		LODT => &[LODE],
		LODE => &[PART],
		PLAL => &[PLAT],
		REFL => &[REFP],
		_ => &[],
	}
}

/// Whether `tag` may appear under `parent`; only `RIFF` is legal at the top level.
pub fn is_legal_child(tag: FourCc, parent: Option<FourCc>) -> bool {
	match parent {
		None => tag == RIFF,
		Some(parent) => legal_children(parent).contains(&tag),
	}
}

/// Whether `tag` is a container whose payload is a sequence of chunks.
pub fn is_container(tag: FourCc) -> bool {
	matches!(tag, RIFF | MDLD | VERB | LODT | LODE | PLAL | REFL)
}

/// Bytes preceding the first child inside a container payload.
pub fn form_prefix(tag: FourCc) -> usize {
	if tag == RIFF { 4 } else { 0 }
}
