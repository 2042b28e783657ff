use serde::Serialize;

use crate::bytes::Cursor;
use crate::{ByteRange, Result};

/// Section type ids found in the BGL section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SectionType {
	/// `0x00`.
	None,
	/// `0x01`.
	Copyright,
	/// `0x02`.
	Guid,
	/// `0x03`.
	Airport,
	/// `0x13`.
	IlsVor,
	/// `0x17`.
	Ndb,
	/// `0x18`.
	Marker,
	/// `0x20`.
	Boundary,
	/// `0x22`.
	Waypoint,
	/// `0x23`.
	Geopol,
	/// `0x25`, decoded into scenery records.
	SceneryObject,
	/// `0x27`.
	NameList,
	/// `0x28`.
	VorIlsIcaoIndex,
	/// `0x29`.
	NdbIcaoIndex,
	/// `0x2a`.
	WaypointIcaoIndex,
	/// `0x2b`, decoded into model entries.
	ModelData,
	/// `0x2c`.
	AirportSummary,
	/// `0x2e`.
	Exclusion,
	/// `0x2f`.
	TimeZone,
	/// `0x3e`.
	IcaoRunway,
	/// `0x65`.
	TerrainVectorDb,
	/// `0x67`.
	TerrainElevation,
	/// `0x68`.
	TerrainLandClass,
	/// `0x69`.
	TerrainWaterClass,
	/// `0x6a`.
	TerrainRegion,
	/// `0x6c`.
	PopulationDensity,
	/// `0x6d`.
	AutogenAnnotation,
	/// `0x6e`.
	TerrainIndex,
	/// `0x6f`.
	TerrainTextureLookup,
	/// Monthly season texture section; carries the month, 1..=12.
	TerrainSeason(u8),
	/// Monthly photo texture section; carries the month, 1..=12.
	TerrainPhoto(u8),
	/// `0x98`.
	TerrainPhotoNight,
	/// `0xa0`.
	Tacan,
	/// `0xa1`.
	TacanIndex,
	/// `0x2710`.
	FakeTypes,
	/// Id not in the known table.
	Other(u32),
}

impl SectionType {
	/// Map a raw section id.
	pub fn from_raw(raw: u32) -> Self {
		match raw {
			0x00 => Self::None,
			0x01 => Self::Copyright,
			0x02 => Self::Guid,
			0x03 => Self::Airport,
			0x13 => Self::IlsVor,
			0x17 => Self::Ndb,
			0x18 => Self::Marker,
			0x20 => Self::Boundary,
			0x22 => Self::Waypoint,
			0x23 => Self::Geopol,
			0x25 => Self::SceneryObject,
			0x27 => Self::NameList,
			0x28 => Self::VorIlsIcaoIndex,
			0x29 => Self::NdbIcaoIndex,
			0x2a => Self::WaypointIcaoIndex,
			0x2b => Self::ModelData,
			0x2c => Self::AirportSummary,
			0x2e => Self::Exclusion,
			0x2f => Self::TimeZone,
			0x3e => Self::IcaoRunway,
			0x65 => Self::TerrainVectorDb,
			0x67 => Self::TerrainElevation,
			0x68 => Self::TerrainLandClass,
			0x69 => Self::TerrainWaterClass,
			0x6a => Self::TerrainRegion,
			0x6c => Self::PopulationDensity,
			0x6d => Self::AutogenAnnotation,
			0x6e => Self::TerrainIndex,
			0x6f => Self::TerrainTextureLookup,
			0x78..=0x83 => Self::TerrainSeason((raw - 0x77) as u8),
			0x8c..=0x97 => Self::TerrainPhoto((raw - 0x8b) as u8),
			0x98 => Self::TerrainPhotoNight,
			0xa0 => Self::Tacan,
			0xa1 => Self::TacanIndex,
			0x2710 => Self::FakeTypes,
			other => Self::Other(other),
		}
	}
}

/// One 20-byte entry of the section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionEntry {
	/// Decoded section type.
	pub section_type: SectionType,
	/// Section id as stored.
	pub raw_type: u32,
	/// Size flags; bit 16 selects the 20-byte subsection header.
	pub size_flags: u32,
	/// Number of subsection headers.
	pub subsection_count: u32,
	/// Absolute offset of the first subsection header.
	pub subsection_offset: u32,
	/// Total size of the section's subsection data.
	pub total_size: u32,
}

impl SectionEntry {
	/// Entry width in the section table.
	pub const SIZE: usize = 20;

	/// Read one section table entry.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let raw_type = cursor.read_u32_le()?;
		let size_flags = cursor.read_u32_le()?;
		let subsection_count = cursor.read_u32_le()?;
		let subsection_offset = cursor.read_u32_le()?;
		let total_size = cursor.read_u32_le()?;
		Ok(Self {
			section_type: SectionType::from_raw(raw_type),
			raw_type,
			size_flags,
			subsection_count,
			subsection_offset,
			total_size,
		})
	}

	/// Width of each subsection header in this section: 16 or 20 bytes.
	pub fn subsection_header_size(&self) -> usize {
		(((self.size_flags & 0x1_0000) | 0x4_0000) >> 14) as usize
	}

	/// Range of the `index`-th subsection header.
	pub fn subsection_header_range(&self, index: u32) -> ByteRange {
		let width = self.subsection_header_size();
		ByteRange::new(self.subsection_offset as usize + index as usize * width, width)
	}
}

/// Subsection header in either the 16-byte or 20-byte form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubsectionHeader {
	/// First QMID word.
	pub qmid_a: u32,
	/// Present only in the 20-byte form.
	pub qmid_b: Option<u32>,
	/// Declared record count.
	pub record_count: u32,
	/// Absolute offset of the record data.
	pub data_offset: u32,
	/// Declared data length in bytes.
	pub data_size: u32,
}

impl SubsectionHeader {
	/// Read a subsection header of `width` bytes (16 or 20).
	pub fn read(cursor: &mut Cursor<'_>, width: usize) -> Result<Self> {
		let qmid_a = cursor.read_u32_le()?;
		let qmid_b = if width >= 20 { Some(cursor.read_u32_le()?) } else { None };
		let record_count = cursor.read_u32_le()?;
		let data_offset = cursor.read_u32_le()?;
		let data_size = cursor.read_u32_le()?;
		Ok(Self {
			qmid_a,
			qmid_b,
			record_count,
			data_offset,
			data_size,
		})
	}

	/// Declared data range.
	pub fn data_range(&self) -> ByteRange {
		ByteRange::new(self.data_offset as usize, self.data_size as usize)
	}
}
