pub mod coords;

mod decode;
mod file;
mod header;
mod model;
mod scenery;
mod section;
mod stream;
mod variant;

/// File entry point, options and section/subsection tree.
pub use file::{BglFile, BglOptions, BglSection, BglSubsection, SubsectionBody};
/// File header and timestamp interpretation.
pub use header::{BglHeader, BglTimestamp, TimestampUnit};
/// ModelData entries.
pub use model::ModelDataRecord;
/// Decoded scenery record types.
pub use scenery::{
	AttachedObjectRecord, AttachedPayload, Beacon, BeaconRecord, EffectRecord, ExtrusionBridgeRecord, GenericBuildingRecord, ImageComplexity, LibraryObject,
	LibraryObjectRecord, PackedPoint, SceneryEntry, SceneryFlags, SceneryHeader, SceneryRecord, TaxiwaySign, TaxiwaySignRecord, TriggerRecord, WindsockRecord,
};
/// Section table and subsection header types.
pub use section::{SectionEntry, SectionType, SubsectionHeader};
/// Record variant resolver.
pub use variant::{
	Confidence, FS9_ATTACH_END, FS9_ATTACH_START, FSX_ATTACH_END, FSX_ATTACH_START, FormatVersion, Framing, RecordFamily, RecordKind, RecordLayout, StringPadding,
	resolve,
};
