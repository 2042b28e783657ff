use serde::Serialize;

use crate::bgl::model::walk_models;
use crate::bgl::stream::walk_scenery;
use crate::bgl::{BglHeader, FormatVersion, LibraryObjectRecord, ModelDataRecord, SceneryEntry, SceneryRecord, SectionEntry, SectionType, SubsectionHeader};
use crate::bytes::Cursor;
use crate::error::record;
use crate::mdl::MdlFile;
use crate::{ByteRange, DecodeError, Result};

/// BGL decoding options.
#[derive(Debug, Clone)]
pub struct BglOptions {
	/// Maximum records walked in one SceneryObject subsection.
	pub max_records_per_subsection: usize,
	/// Record a `CountMismatch` diagnostic when walked counted records differ from the declared count.
	pub check_declared_counts: bool,
}

impl Default for BglOptions {
	fn default() -> Self {
		Self {
			max_records_per_subsection: 1 << 20,
			check_declared_counts: true,
		}
	}
}

/// Decoded BGL file borrowing its source buffer.
#[derive(Debug, Clone, Serialize)]
pub struct BglFile<'a> {
	#[serde(skip)]
	bytes: &'a [u8],
	/// Fixed file header.
	pub header: BglHeader,
	/// Section table entries with their subsections, in table order.
	pub sections: Vec<BglSection>,
	/// Recovered record-level errors, in file order.
	pub diagnostics: Vec<DecodeError>,
}

/// One section table entry and its subsections.
#[derive(Debug, Clone, Serialize)]
pub struct BglSection {
	/// Raw section table entry.
	pub entry: SectionEntry,
	/// Subsections in header order.
	pub subsections: Vec<BglSubsection>,
}

/// One subsection with its decoded body.
#[derive(Debug, Clone, Serialize)]
pub struct BglSubsection {
	/// Raw subsection header.
	pub header: SubsectionHeader,
	/// Data range actually walked, truncated to the buffer.
	pub data: ByteRange,
	/// Records decoded from `data`.
	pub body: SubsectionBody,
}

impl BglSubsection {
	/// Declared record count from the subsection header.
	pub fn declared_count(&self) -> u32 {
		self.header.record_count
	}

	/// Scenery entries, when this is a SceneryObject subsection.
	pub fn scenery(&self) -> &[SceneryEntry] {
		match &self.body {
			SubsectionBody::Scenery(entries) => entries,
			_ => &[],
		}
	}

	/// Model entries, when this is a ModelData subsection.
	pub fn models(&self) -> &[ModelDataRecord] {
		match &self.body {
			SubsectionBody::Models(models) => models,
			_ => &[],
		}
	}
}

/// Decoded contents of a subsection.
#[derive(Debug, Clone, Serialize)]
pub enum SubsectionBody {
	/// SceneryObject records.
	Scenery(Vec<SceneryEntry>),
	/// ModelData entries.
	Models(Vec<ModelDataRecord>),
	/// Section kind not decoded here; only its byte range is kept.
	Opaque,
}

impl<'a> BglFile<'a> {
	/// Decode a BGL buffer with default options.
	pub fn parse(bytes: &'a [u8]) -> Result<Self> {
		Self::parse_with(bytes, &BglOptions::default())
	}

	/// Decode a BGL buffer.
	///
	/// Header and section table problems are returned as `Err`. Subsection and
	/// record problems are skipped and collected in [`BglFile::diagnostics`].
	pub fn parse_with(bytes: &'a [u8], options: &BglOptions) -> Result<Self> {
		let header = BglHeader::parse(bytes)?;
		tracing::debug!(
			sections = header.section_count,
			timestamp = header.timestamp.raw(),
			"bgl header"
		);

		let table_len = header.section_count as usize * SectionEntry::SIZE;
		let mut table = Cursor::over(bytes, ByteRange::new(BglHeader::SIZE, table_len))?;
		let mut diagnostics = Vec::new();
		let mut sections = Vec::with_capacity(header.section_count as usize);
		for _ in 0..header.section_count {
			let entry = SectionEntry::read(&mut table)?;
			tracing::debug!(
				section = ?entry.section_type,
				subsections = entry.subsection_count,
				offset = entry.subsection_offset,
				"bgl section"
			);
			let subsections = parse_subsections(bytes, &entry, options, &mut diagnostics)?;
			sections.push(BglSection { entry, subsections });
		}

		Ok(Self {
			bytes,
			header,
			sections,
			diagnostics,
		})
	}

	/// Source buffer.
	pub fn bytes(&self) -> &'a [u8] {
		self.bytes
	}

	/// Borrow the bytes covered by `range`.
	pub fn slice(&self, range: ByteRange) -> Option<&'a [u8]> {
		range.slice(self.bytes)
	}

	/// All decoded scenery entries across SceneryObject sections.
	pub fn scenery_records(&self) -> impl Iterator<Item = &SceneryEntry> {
		self.sections
			.iter()
			.flat_map(|section| &section.subsections)
			.flat_map(|subsection| subsection.scenery())
	}

	/// Library object placements.
	pub fn placements(&self) -> impl Iterator<Item = &LibraryObjectRecord> {
		self.scenery_records().filter_map(|entry| match &entry.record {
			SceneryRecord::LibraryObject(placement) => Some(placement),
			_ => None,
		})
	}

	/// Model definitions from ModelData sections.
	pub fn models(&self) -> impl Iterator<Item = &ModelDataRecord> {
		self.sections
			.iter()
			.flat_map(|section| &section.subsections)
			.flat_map(|subsection| subsection.models())
	}

	/// Format version of the first scenery record that has one.
	pub fn detected_version(&self) -> Option<FormatVersion> {
		self.scenery_records().find_map(|entry| entry.record.version())
	}

	/// Decode the MDL embedded for `model`.
	pub fn decode_model(&self, model: &ModelDataRecord) -> Result<MdlFile<'a>> {
		let range = model.mdl.ok_or(DecodeError::OutOfBounds {
			at: model.offset as usize,
			need: model.len as usize,
			rem: 0,
		})?;
		let mdl = Cursor::over(self.bytes, range)?.rest();
		MdlFile::parse(mdl)
	}
}

fn parse_subsections(bytes: &[u8], entry: &SectionEntry, options: &BglOptions, diagnostics: &mut Vec<DecodeError>) -> Result<Vec<BglSubsection>> {
	let width = entry.subsection_header_size();
	let mut subsections = Vec::new();
	for index in 0..entry.subsection_count {
		let range = entry.subsection_header_range(index);
		let Ok(mut cursor) = Cursor::over(bytes, range) else {
			record(
				diagnostics,
				DecodeError::InvalidLength {
					at: range.offset,
					declared: range.len as u64,
					rem: bytes.len().saturating_sub(range.offset),
				},
			);
			break;
		};
		let header = SubsectionHeader::read(&mut cursor, width)?;

		let declared = header.data_range();
		let data = declared.clamp_end(bytes.len());
		let clipped = data != declared;
		if clipped {
			record(
				diagnostics,
				DecodeError::InvalidLength {
					at: range.offset,
					declared: u64::from(header.data_size),
					rem: data.len,
				},
			);
		}

		let body = match entry.section_type {
			SectionType::SceneryObject => SubsectionBody::Scenery(walk_scenery(bytes, data, clipped, header.record_count, options, diagnostics)?),
			SectionType::ModelData => SubsectionBody::Models(walk_models(bytes, data, header.record_count, diagnostics)?),
			_ => SubsectionBody::Opaque,
		};
		subsections.push(BglSubsection { header, data, body });
	}
	Ok(subsections)
}
