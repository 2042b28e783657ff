//! Record variant resolution.
//!
//! Every FS9/FSX layout difference lives in the tables below; record readers
//! only consult the returned [`RecordLayout`].

use serde::Serialize;

/// Platform generation a record layout belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormatVersion {
	/// Flight Simulator 2004 layout.
	Fs9,
	/// Flight Simulator X layout.
	Fsx,
}

/// How well a type-id mapping is established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Confidence {
	/// Listed in the public format description.
	Documented,
	/// Not documented but seen in real files.
	Observed,
	/// Inferred; may be wrong.
	Heuristic,
}

/// Id space a type id is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordFamily {
	/// Record ids of a SceneryObject subsection stream.
	SceneryObject,
	/// `object_type_id` values inside an attached object block.
	AttachedPayload,
}

/// Logical record kind, shared by the FS9 and FSX ids that denote it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RecordKind {
	/// Generic building.
	GenericBuilding,
	/// Library object.
	LibraryObject,
	/// Windsock.
	Windsock,
	/// Effect.
	Effect,
	/// Taxiway sign.
	TaxiwaySign,
	/// Trigger.
	Trigger,
	/// Beacon.
	Beacon,
	/// Extrusion bridge.
	ExtrusionBridge,
	/// Attached object block.
	AttachedObject,
}

/// How a record's extent is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Framing {
	/// The record header's declared length.
	Declared,
	/// Attached object block: start size plus data size plus the closing delimiter.
	AttachBlock {
		/// Expected id of the closing delimiter.
		closing_id: u16,
	},
}

/// Trailing handling of variable-length strings in a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StringPadding {
	/// Next field starts right after the terminator.
	Unpadded,
	/// Terminator is followed by zero padding up to a 2-byte boundary.
	Word,
}

/// Field layout selected for one `(family, type_id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RecordLayout {
	/// Logical record kind.
	pub kind: RecordKind,
	/// FS9 or FSX layout family.
	pub version: FormatVersion,
	/// Whether the layout is documented or inferred.
	pub confidence: Confidence,
	/// Whether the common 28-byte SceneryObject header precedes the body.
	pub has_header: bool,
	/// Whether a 16-byte instance GUID follows the header's `unknown` field.
	pub has_instance_id: bool,
	/// Whether the record contributes to the subsection's declared count.
	pub counted: bool,
	/// How the record extent is found.
	pub framing: Framing,
	/// Padding rule for the record's strings, when it has any.
	pub string_padding: Option<StringPadding>,
}

impl RecordLayout {
	/// Size of the common SceneryObject header without the instance GUID.
	pub const BASE_HEADER_SIZE: usize = 28;
	/// Size of the FSX instance GUID.
	pub const INSTANCE_ID_SIZE: usize = 16;

	const fn scenery(kind: RecordKind, version: FormatVersion) -> Self {
		Self {
			kind,
			version,
			confidence: Confidence::Documented,
			has_header: true,
			has_instance_id: matches!(version, FormatVersion::Fsx),
			counted: true,
			framing: Framing::Declared,
			string_padding: None,
		}
	}

	const fn attach_block(version: FormatVersion, closing_id: u16) -> Self {
		Self {
			kind: RecordKind::AttachedObject,
			version,
			confidence: Confidence::Documented,
			has_header: false,
			has_instance_id: matches!(version, FormatVersion::Fsx),
			counted: false,
			framing: Framing::AttachBlock { closing_id },
			string_padding: Some(StringPadding::Word),
		}
	}

	const fn payload(kind: RecordKind, version: FormatVersion) -> Self {
		Self {
			kind,
			version,
			confidence: Confidence::Documented,
			has_header: false,
			has_instance_id: false,
			counted: false,
			framing: Framing::Declared,
			string_padding: None,
		}
	}

	const fn confidence(mut self, confidence: Confidence) -> Self {
		self.confidence = confidence;
		self
	}

	const fn strings(mut self, padding: StringPadding) -> Self {
		self.string_padding = Some(padding);
		self
	}

	/// Bytes taken by the common header, instance GUID included.
	pub fn header_size(&self) -> usize {
		match (self.has_header, self.has_instance_id) {
			(false, _) => 0,
			(true, false) => Self::BASE_HEADER_SIZE,
			(true, true) => Self::BASE_HEADER_SIZE + Self::INSTANCE_ID_SIZE,
		}
	}
}

use Confidence::{Heuristic, Observed};
use FormatVersion::{Fs9, Fsx};
use RecordKind::*;

/// FS9 attached object start delimiter.
pub const FS9_ATTACH_START: u16 = 0x1000;
/// FS9 attached object closing delimiter.
pub const FS9_ATTACH_END: u16 = 0x1001;
/// FSX attached object start delimiter.
pub const FSX_ATTACH_START: u16 = 0x1002;
/// FSX attached object closing delimiter.
pub const FSX_ATTACH_END: u16 = 0x1003;

const SCENERY_OBJECT: &[(u16, RecordLayout)] = &[
	(0x01, RecordLayout::scenery(GenericBuilding, Fs9)),
	(0x02, RecordLayout::scenery(LibraryObject, Fs9)),
	(0x03, RecordLayout::scenery(Windsock, Fs9)),
	(0x04, RecordLayout::scenery(Effect, Fs9).confidence(Observed).strings(StringPadding::Unpadded)),
	(0x05, RecordLayout::scenery(TaxiwaySign, Fs9).strings(StringPadding::Word)),
	(0x07, RecordLayout::scenery(Trigger, Fs9).confidence(Heuristic)),
	(0x08, RecordLayout::scenery(Beacon, Fs9)),
	(0x0a, RecordLayout::scenery(GenericBuilding, Fsx)),
	(0x0b, RecordLayout::scenery(LibraryObject, Fsx)),
	(0x0c, RecordLayout::scenery(Windsock, Fsx)),
	(0x0d, RecordLayout::scenery(Effect, Fsx).strings(StringPadding::Unpadded)),
	(0x0e, RecordLayout::scenery(TaxiwaySign, Fsx).strings(StringPadding::Word)),
	(0x10, RecordLayout::scenery(Trigger, Fsx)),
	(0x11, RecordLayout::scenery(Beacon, Fsx)),
	(0x12, RecordLayout::scenery(ExtrusionBridge, Fsx)),
	(FS9_ATTACH_START, RecordLayout::attach_block(Fs9, FS9_ATTACH_END)),
	(FSX_ATTACH_START, RecordLayout::attach_block(Fsx, FSX_ATTACH_END)),
];

const ATTACHED_PAYLOAD: &[(u16, RecordLayout)] = &[
	(0x02, RecordLayout::payload(LibraryObject, Fs9)),
	(0x08, RecordLayout::payload(Beacon, Fs9)),
	(0x0b, RecordLayout::payload(LibraryObject, Fsx)),
	(0x11, RecordLayout::payload(Beacon, Fsx)),
];

/// Look up the layout for `type_id` in `family`; `None` for unrecognized ids.
pub fn resolve(family: RecordFamily, type_id: u16) -> Option<RecordLayout> {
	let table = match family {
		RecordFamily::SceneryObject => SCENERY_OBJECT,
		RecordFamily::AttachedPayload => ATTACHED_PAYLOAD,
	};
	table.iter().find(|(id, _)| *id == type_id).map(|(_, layout)| *layout)
}
