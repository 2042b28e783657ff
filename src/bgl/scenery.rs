use serde::Serialize;
use uuid::Uuid;

use crate::ByteRange;
use crate::bgl::coords;
use crate::bgl::{Confidence, FormatVersion};

/// Common SceneryObject header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneryHeader {
	/// Record type id.
	pub type_id: u16,
	/// Declared record length, header included.
	pub size: u16,
	/// Packed longitude.
	pub lon_raw: u32,
	/// Packed latitude.
	pub lat_raw: u32,
	/// Altitude in millimetres.
	pub alt_raw: i32,
	/// Placement flags.
	pub flags: SceneryFlags,
	/// Packed pitch.
	pub pitch_raw: u16,
	/// Packed bank.
	pub bank_raw: u16,
	/// Packed heading.
	pub heading_raw: u16,
	/// Display density threshold.
	pub image_complexity: ImageComplexity,
	/// Reserved word, kept as read.
	pub unknown: u16,
	/// FSX instance GUID; `None` for FS9 layouts.
	pub instance_id: Option<Uuid>,
	/// Layout family implied by the type id.
	pub version: FormatVersion,
}

impl SceneryHeader {
	/// Longitude in decimal degrees.
	pub fn longitude(&self) -> f64 {
		coords::longitude(self.lon_raw)
	}

	/// Latitude in decimal degrees.
	pub fn latitude(&self) -> f64 {
		coords::latitude(self.lat_raw)
	}

	/// Altitude in metres.
	pub fn altitude(&self) -> f64 {
		coords::altitude(self.alt_raw)
	}

	/// Pitch in degrees.
	pub fn pitch(&self) -> f32 {
		coords::angle(self.pitch_raw)
	}

	/// Bank in degrees.
	pub fn bank(&self) -> f32 {
		coords::angle(self.bank_raw)
	}

	/// Heading in degrees.
	pub fn heading(&self) -> f32 {
		coords::angle(self.heading_raw)
	}
}

/// Placement flag bits of a SceneryObject header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct SceneryFlags(pub u16);

impl SceneryFlags {
	/// Altitude is relative to the ground.
	pub fn is_above_agl(self) -> bool {
		self.0 & 0x0001 != 0
	}

	/// Autogen is not suppressed under the object.
	pub fn no_autogen_suppression(self) -> bool {
		self.0 & 0x0002 != 0
	}

	/// Object is not a crash hazard.
	pub fn no_crash(self) -> bool {
		self.0 & 0x0004 != 0
	}

	/// Object is not drawn through fog.
	pub fn no_fog(self) -> bool {
		self.0 & 0x0008 != 0
	}

	/// Object casts no shadow.
	pub fn no_shadow(self) -> bool {
		self.0 & 0x0010 != 0
	}

	/// Object does not write the depth buffer.
	pub fn no_z_write(self) -> bool {
		self.0 & 0x0020 != 0
	}

	/// Object ignores the depth test.
	pub fn no_z_test(self) -> bool {
		self.0 & 0x0040 != 0
	}
}

/// Display density at which an object is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageComplexity {
	/// Raw 0.
	VerySparse,
	/// Raw 1.
	Sparse,
	/// Raw 2.
	Normal,
	/// Raw 3.
	Dense,
	/// Raw 4.
	VeryDense,
	/// Value outside 0..=4.
	Other(u16),
}

impl ImageComplexity {
	/// Map the raw header value.
	pub fn from_raw(raw: u16) -> Self {
		match raw {
			0 => Self::VerySparse,
			1 => Self::Sparse,
			2 => Self::Normal,
			3 => Self::Dense,
			4 => Self::VeryDense,
			other => Self::Other(other),
		}
	}
}

/// Library model reference with scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LibraryObject {
	/// Model GUID, matched against ModelData entries.
	pub name: Uuid,
	/// Uniform scale factor.
	pub scale: f32,
}

/// Beacon body shared by FS9 and FSX placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Beacon {
	/// Beacon kind id.
	pub beacon_type: u8,
	/// Always 1 in files seen so far.
	pub unknown_1: u8,
	/// Always 0 in files seen so far.
	pub unknown_2: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Generic building placement.
pub struct GenericBuildingRecord {
	/// Common header.
	pub header: SceneryHeader,
	/// Body after the header, kept opaque.
	pub body: ByteRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Library model placement.
pub struct LibraryObjectRecord {
	/// Common header.
	pub header: SceneryHeader,
	/// Referenced model and scale.
	pub object: LibraryObject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Windsock placement.
pub struct WindsockRecord {
	/// Common header.
	pub header: SceneryHeader,
	/// Pole height in metres.
	pub pole_height: f32,
	/// Sock length in metres.
	pub sock_length: f32,
	/// Pole colour bytes.
	pub pole_color: [u8; 4],
	/// Sock colour bytes.
	pub sock_color: [u8; 4],
	/// Windsock flag bits.
	pub flags: u16,
}

impl WindsockRecord {
	/// Whether the lighted bit is set.
	pub fn is_lighted(&self) -> bool {
		self.flags & 1 != 0
	}
}

/// Effect placement: fixed 80-byte name, then an unpadded parameter string.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectRecord {
	/// Common header.
	pub header: SceneryHeader,
	/// Effect name, trailing NULs removed.
	pub name: Box<str>,
	/// Effect parameter string.
	pub params: Box<str>,
	/// Byte range of `params`, terminator included when present.
	pub params_range: ByteRange,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Taxiway sign placement.
pub struct TaxiwaySignRecord {
	/// Common header.
	pub header: SceneryHeader,
	/// Signs in file order.
	pub signs: Vec<TaxiwaySign>,
}

/// One sign inside a taxiway sign record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxiwaySign {
	/// East offset from the record position, in metres.
	pub lon_offset: f32,
	/// North offset from the record position, in metres.
	pub lat_offset: f32,
	/// Packed heading.
	pub heading_raw: u16,
	/// Sign size code.
	pub size: u8,
	/// Justification code.
	pub justification: u8,
	/// Sign label text.
	pub label: Box<str>,
}

impl TaxiwaySign {
	/// Heading in degrees.
	pub fn heading(&self) -> f32 {
		coords::angle(self.heading_raw)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Trigger placement.
pub struct TriggerRecord {
	/// Common header.
	pub header: SceneryHeader,
	/// Body after the header, kept opaque.
	pub body: ByteRange,
	/// `Heuristic` for the FS9 id, whose meaning is inferred.
	pub confidence: Confidence,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Beacon placement.
pub struct BeaconRecord {
	/// Common header.
	pub header: SceneryHeader,
	/// Beacon body.
	pub beacon: Beacon,
}

/// Packed `(a, b, alt)` triple as stored in extrusion bridge records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackedPoint {
	/// Packed longitude.
	pub lon_raw: u32,
	/// Packed latitude.
	pub lat_raw: u32,
	/// Packed altitude.
	pub alt_raw: u32,
}

impl PackedPoint {
	/// Longitude in decimal degrees.
	pub fn longitude(&self) -> f64 {
		coords::longitude(self.lon_raw)
	}

	/// Latitude in decimal degrees.
	pub fn latitude(&self) -> f64 {
		coords::latitude(self.lat_raw)
	}
}

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Extrusion bridge placement.
pub struct ExtrusionBridgeRecord {
	/// Common header.
	pub header: SceneryHeader,
	/// Profile GUID.
	pub profile: Uuid,
	/// Material set GUID.
	pub material_set: Uuid,
	/// Altitude sample locations, stored latitude first.
	pub altitude_samples: [PackedPoint; 2],
	/// Road width in metres.
	pub road_width: f32,
	/// Placement probability.
	pub probability: f32,
	/// Autogen suppression flag.
	pub suppress: u8,
	/// Placement GUIDs.
	pub placements: Vec<Uuid>,
	/// Polyline points.
	pub points: Vec<PackedPoint>,
}

/// Object hung on an attach point of the preceding library object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachedObjectRecord {
	/// Start delimiter id (`0x1000` FS9, `0x1002` FSX).
	pub type_id: u16,
	/// Layout family of the block.
	pub version: FormatVersion,
	/// Id of the attached payload kind.
	pub object_type_id: u16,
	/// Packed pitch.
	pub pitch_raw: u16,
	/// Packed bank.
	pub bank_raw: u16,
	/// Packed heading.
	pub heading_raw: u16,
	/// Offset from the attach point.
	pub bias: [f32; 3],
	/// FSX only.
	pub instance_id: Option<Uuid>,
	/// FSX only.
	pub probability: Option<u16>,
	/// FSX only.
	pub randomness: Option<u16>,
	/// Attached object.
	pub payload: AttachedPayload,
	/// Attach point name.
	pub attach_point: Box<str>,
	/// Index of the library object this block follows, within the same subsection.
	pub attached_to: Option<usize>,
}

/// Object carried by an attached object block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AttachedPayload {
	/// Library model.
	LibraryObject(LibraryObject),
	/// Beacon.
	Beacon(Beacon),
	/// `object_type_id` with no known payload layout.
	Opaque {
		/// Payload kind id.
		object_type_id: u16,
		/// Payload bytes.
		range: ByteRange,
	},
}

/// One decoded record of a SceneryObject subsection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SceneryRecord {
	/// Generic building.
	GenericBuilding(GenericBuildingRecord),
	/// Library object.
	LibraryObject(LibraryObjectRecord),
	/// Windsock.
	Windsock(WindsockRecord),
	/// Effect.
	Effect(EffectRecord),
	/// Taxiway sign.
	TaxiwaySign(TaxiwaySignRecord),
	/// Trigger.
	Trigger(TriggerRecord),
	/// Beacon.
	Beacon(BeaconRecord),
	/// Extrusion bridge.
	ExtrusionBridge(ExtrusionBridgeRecord),
	/// Attached object block.
	AttachedObject(AttachedObjectRecord),
	/// Unrecognized type id, skipped by its declared length.
	Unknown {
		/// Raw type id.
		type_id: u16,
		/// Full record bytes.
		raw: ByteRange,
	},
}

impl SceneryRecord {
	/// Common header, for kinds that have one.
	pub fn header(&self) -> Option<&SceneryHeader> {
		match self {
			Self::GenericBuilding(record) => Some(&record.header),
			Self::LibraryObject(record) => Some(&record.header),
			Self::Windsock(record) => Some(&record.header),
			Self::Effect(record) => Some(&record.header),
			Self::TaxiwaySign(record) => Some(&record.header),
			Self::Trigger(record) => Some(&record.header),
			Self::Beacon(record) => Some(&record.header),
			Self::ExtrusionBridge(record) => Some(&record.header),
			Self::AttachedObject(_) | Self::Unknown { .. } => None,
		}
	}

	/// Format version implied by the type id; `None` for unknown records.
	pub fn version(&self) -> Option<FormatVersion> {
		match self {
			Self::AttachedObject(record) => Some(record.version),
			Self::Unknown { .. } => None,
			other => other.header().map(|header| header.version),
		}
	}

	/// Raw type id from the record header.
	pub fn type_id(&self) -> u16 {
		match self {
			Self::AttachedObject(record) => record.type_id,
			Self::Unknown { type_id, .. } => *type_id,
			other => other.header().map_or(0, |header| header.type_id),
		}
	}
}

/// A decoded record with the bytes it occupies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneryEntry {
	/// Full extent of the record in the file.
	pub range: ByteRange,
	/// Whether this record counts toward the subsection's declared count.
	pub counted: bool,
	/// Decoded record.
	pub record: SceneryRecord,
}
