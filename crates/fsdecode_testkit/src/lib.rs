//! Byte-buffer builders for hand-constructed BGL and MDL test inputs.

/// Little-endian byte writer with chained field methods.
#[derive(Debug, Clone, Default)]
pub struct ByteWriter {
	buf: Vec<u8>,
}

impl ByteWriter {
	/// Create an empty writer.
	pub fn new() -> Self {
		Self::default()
	}

	/// Append one byte.
	pub fn u8(mut self, value: u8) -> Self {
		self.buf.push(value);
		self
	}

	/// Append a little-endian `u16`.
	pub fn u16(mut self, value: u16) -> Self {
		self.buf.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a little-endian `u32`.
	pub fn u32(mut self, value: u32) -> Self {
		self.buf.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a little-endian `i32`.
	pub fn i32(mut self, value: i32) -> Self {
		self.buf.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a little-endian `u64`.
	pub fn u64(mut self, value: u64) -> Self {
		self.buf.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append a little-endian `f32`.
	pub fn f32(mut self, value: f32) -> Self {
		self.buf.extend_from_slice(&value.to_le_bytes());
		self
	}

	/// Append raw bytes.
	pub fn bytes(mut self, value: &[u8]) -> Self {
		self.buf.extend_from_slice(value);
		self
	}

	/// Append a zero-terminated string without padding.
	pub fn cstr(self, value: &str) -> Self {
		self.bytes(value.as_bytes()).u8(0)
	}

	/// Append a zero-terminated string padded with zeros to an even length.
	pub fn cstr_word(self, value: &str) -> Self {
		self.bytes(&cstring_word(value))
	}

	/// Append a string zero-padded to exactly `width` bytes.
	pub fn fixed_str(self, value: &str, width: usize) -> Self {
		let mut field = vec![0_u8; width];
		let len = value.len().min(width);
		field[..len].copy_from_slice(&value.as_bytes()[..len]);
		self.bytes(&field)
	}

	/// Current length in bytes.
	pub fn len(&self) -> usize {
		self.buf.len()
	}

	/// True when nothing was written.
	pub fn is_empty(&self) -> bool {
		self.buf.is_empty()
	}

	/// Take the written bytes.
	pub fn finish(self) -> Vec<u8> {
		self.buf
	}
}

/// Zero-terminated string padded to an even length.
pub fn cstring_word(value: &str) -> Vec<u8> {
	let mut out = value.as_bytes().to_vec();
	out.push(0);
	if out.len() % 2 == 1 {
		out.push(0);
	}
	out
}

/// Deterministic GUID bytes: `seed`, `seed + 1`, ... in file order.
pub fn guid_bytes(seed: u8) -> [u8; 16] {
	let mut out = [0_u8; 16];
	for (i, byte) in out.iter_mut().enumerate() {
		*byte = seed.wrapping_add(i as u8);
	}
	out
}

/// Fields of the common SceneryObject header.
#[derive(Debug, Clone, Copy)]
pub struct Placement {
	/// Packed longitude.
	pub lon: u32,
	/// Packed latitude.
	pub lat: u32,
	/// Altitude in millimetres.
	pub alt: i32,
	/// Placement flag bits.
	pub flags: u16,
	/// Packed pitch.
	pub pitch: u16,
	/// Packed bank.
	pub bank: u16,
	/// Packed heading.
	pub heading: u16,
	/// Image complexity, 0..=4.
	pub image_complexity: u16,
	/// Trailing unknown field.
	pub unknown: u16,
	/// FSX instance GUID; written only when present.
	pub instance_id: Option<[u8; 16]>,
}

impl Placement {
	/// FS9 placement at the null island with no instance id.
	pub fn fs9() -> Self {
		Self {
			lon: 0x1800_0000,
			lat: 0x1000_0000,
			alt: 0,
			flags: 0,
			pitch: 0,
			bank: 0,
			heading: 0,
			image_complexity: 2,
			unknown: 0,
			instance_id: None,
		}
	}

	/// FSX placement with instance id bytes from [`guid_bytes`].
	pub fn fsx(seed: u8) -> Self {
		Self {
			instance_id: Some(guid_bytes(seed)),
			..Self::fs9()
		}
	}

	fn header_len(&self) -> usize {
		28 + if self.instance_id.is_some() { 16 } else { 0 }
	}
}

/// Build a SceneryObject record: header with the declared size filled in, then `body`.
pub fn scenery_record(type_id: u16, placement: &Placement, body: &[u8]) -> Vec<u8> {
	let size = placement.header_len() + body.len();
	scenery_record_sized(type_id, size as u16, placement, body)
}

/// Like [`scenery_record`] but with an explicit declared size.
pub fn scenery_record_sized(type_id: u16, size: u16, placement: &Placement, body: &[u8]) -> Vec<u8> {
	let mut w = ByteWriter::new()
		.u16(type_id)
		.u16(size)
		.u32(placement.lon)
		.u32(placement.lat)
		.i32(placement.alt)
		.u16(placement.flags)
		.u16(placement.pitch)
		.u16(placement.bank)
		.u16(placement.heading)
		.u16(placement.image_complexity)
		.u16(placement.unknown);
	if let Some(guid) = placement.instance_id {
		w = w.bytes(&guid);
	}
	w.bytes(body).finish()
}

/// Attached object block contents.
#[derive(Debug, Clone)]
pub struct AttachSpec {
	/// FSX layout (`0x1002`/`0x1003` with instance id) instead of FS9 (`0x1000`/`0x1001`).
	pub fsx: bool,
	/// Type id of the payload object.
	pub object_type_id: u16,
	/// Packed pitch, bank and heading.
	pub pbh: [u16; 3],
	/// Bias offsets.
	pub bias: [f32; 3],
	/// FSX instance id.
	pub instance_id: [u8; 16],
	/// FSX probability.
	pub probability: u16,
	/// FSX randomness.
	pub randomness: u16,
	/// Payload body bytes.
	pub payload: Vec<u8>,
	/// Attach point name.
	pub attach_point: String,
}

impl AttachSpec {
	/// Attached beacon with the given layout.
	pub fn beacon(fsx: bool, attach_point: &str) -> Self {
		Self {
			fsx,
			object_type_id: if fsx { 0x11 } else { 0x08 },
			pbh: [0, 0, 0x4000],
			bias: [1.0, 2.0, 3.0],
			instance_id: guid_bytes(0x40),
			probability: 100,
			randomness: 0,
			payload: ByteWriter::new().u8(2).u8(1).u16(0).finish(),
			attach_point: attach_point.to_owned(),
		}
	}
}

/// Build an attached object block: start delimiter, payload, attach point name and closing delimiter.
pub fn attached_object(spec: &AttachSpec) -> Vec<u8> {
	let (start_id, end_id, fixed) = if spec.fsx { (0x1002_u16, 0x1003_u16, 48_usize) } else { (0x1000, 0x1001, 28) };
	let name = cstring_word(&spec.attach_point);
	let start_size = 4_usize;
	let attach_point_offset = fixed + spec.payload.len() - start_size;
	let data_size = attach_point_offset + name.len();

	let mut w = ByteWriter::new()
		.u16(start_id)
		.u16(start_size as u16)
		.u16(spec.object_type_id)
		.u16(data_size as u16)
		.u16(attach_point_offset as u16)
		.u16(spec.pbh[0])
		.u16(spec.pbh[1])
		.u16(spec.pbh[2])
		.f32(spec.bias[0])
		.f32(spec.bias[1])
		.f32(spec.bias[2]);
	if spec.fsx {
		w = w.bytes(&spec.instance_id).u16(spec.probability).u16(spec.randomness);
	}
	w.bytes(&spec.payload).bytes(&name).u16(end_id).u16(4).finish()
}

/// One subsection of a [`BglBuilder`] section.
#[derive(Debug, Clone)]
pub struct SubsectionSpec {
	/// QMID written to the first header slot.
	pub qmid: u32,
	/// Declared record count.
	pub declared_count: u32,
	/// Record data.
	pub data: Vec<u8>,
	/// Declared data size to write instead of `data.len()`.
	pub size_override: Option<u32>,
	/// Data offset to write instead of the computed one.
	pub offset_override: Option<u32>,
}

impl SubsectionSpec {
	/// Subsection with `data` and a declared count.
	pub fn new(declared_count: u32, data: Vec<u8>) -> Self {
		Self {
			qmid: 0x0123_4567,
			declared_count,
			data,
			size_override: None,
			offset_override: None,
		}
	}
}

#[derive(Debug, Clone)]
struct SectionSpec {
	section_type: u32,
	wide_headers: bool,
	subsections: Vec<SubsectionSpec>,
}

/// Builder for complete BGL files.
///
/// Layout: 56-byte header, section table, all subsection headers, then all
/// subsection data in declaration order.
#[derive(Debug, Clone, Default)]
pub struct BglBuilder {
	timestamp: u64,
	sections: Vec<SectionSpec>,
}

impl BglBuilder {
	/// BGL section id for SceneryObject sections.
	pub const SCENERY_OBJECT: u32 = 0x25;
	/// BGL section id for ModelData sections.
	pub const MODEL_DATA: u32 = 0x2b;

	/// Empty file with a zero timestamp.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the header timestamp.
	pub fn timestamp(mut self, value: u64) -> Self {
		self.timestamp = value;
		self
	}

	/// Add a section using 16-byte subsection headers.
	pub fn section(mut self, section_type: u32, subsections: Vec<SubsectionSpec>) -> Self {
		self.sections.push(SectionSpec {
			section_type,
			wide_headers: false,
			subsections,
		});
		self
	}

	/// Add a section using 20-byte subsection headers.
	pub fn wide_section(mut self, section_type: u32, subsections: Vec<SubsectionSpec>) -> Self {
		self.sections.push(SectionSpec {
			section_type,
			wide_headers: true,
			subsections,
		});
		self
	}

	/// Serialize the file.
	pub fn build(&self) -> Vec<u8> {
		let table_len = self.sections.len() * 20;
		let headers_len: usize = self
			.sections
			.iter()
			.map(|section| section.subsections.len() * header_width(section.wide_headers))
			.sum();

		let mut header_at = 56 + table_len;
		let mut data_at = header_at + headers_len;
		let mut table = ByteWriter::new();
		let mut headers = ByteWriter::new();
		let mut data = ByteWriter::new();

		for section in &self.sections {
			let width = header_width(section.wide_headers);
			table = table
				.u32(section.section_type)
				.u32(if section.wide_headers { 0x1_0000 } else { 0 })
				.u32(section.subsections.len() as u32)
				.u32(header_at as u32)
				.u32((section.subsections.len() * width) as u32);
			header_at += section.subsections.len() * width;

			for sub in &section.subsections {
				headers = headers.u32(sub.qmid);
				if section.wide_headers {
					headers = headers.u32(sub.qmid + 1);
				}
				headers = headers
					.u32(sub.declared_count)
					.u32(sub.offset_override.unwrap_or(data_at as u32))
					.u32(sub.size_override.unwrap_or(sub.data.len() as u32));
				data = data.bytes(&sub.data);
				data_at += sub.data.len();
			}
		}

		ByteWriter::new()
			.u32(0x1992_0201)
			.u32(56)
			.u64(self.timestamp)
			.u32(0x0805_1803)
			.u32(self.sections.len() as u32)
			.bytes(&[0_u8; 32])
			.bytes(&table.finish())
			.bytes(&headers.finish())
			.bytes(&data.finish())
			.finish()
	}
}

fn header_width(wide: bool) -> usize {
	if wide { 20 } else { 16 }
}

/// RIFF leaf chunk, with a pad byte after odd-length payloads.
pub fn chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
	chunk_with_len(tag, payload.len() as u32, payload)
}

/// RIFF chunk with an explicit declared length; pads when `payload` is odd-length.
pub fn chunk_with_len(tag: &[u8; 4], declared_len: u32, payload: &[u8]) -> Vec<u8> {
	let mut out = ByteWriter::new().bytes(tag).u32(declared_len).bytes(payload).finish();
	if payload.len() % 2 == 1 {
		out.push(0);
	}
	out
}

/// RIFF container chunk whose payload is the concatenated `children`.
pub fn container(tag: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
	chunk(tag, &children.concat())
}

/// Whole RIFF file: `RIFF`, length, form type, then `children`.
pub fn riff(form: &[u8; 4], children: &[Vec<u8>]) -> Vec<u8> {
	let mut payload = form.to_vec();
	payload.extend(children.concat());
	chunk(b"RIFF", &payload)
}
