use serde::Serialize;

use crate::bytes::Cursor;
use crate::{ByteRange, DecodeError, FourCc, Result};

/// BGL record header: `type_id: u16`, `len: u16`, where `len` counts the header itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordHeader {
	/// Record type id.
	pub type_id: u16,
	/// Declared record length including the 4-byte header.
	pub declared_len: u16,
	/// Absolute offset of the header.
	pub at: usize,
}

impl RecordHeader {
	/// Header width in bytes.
	pub const SIZE: usize = 4;

	/// Read a record header, validating the declared length against remaining bytes.
	///
	/// Fails with `TruncatedHeader` when fewer than [`Self::SIZE`] bytes remain and with
	/// `InvalidLength` when the declared length is shorter than the header or longer
	/// than what is left in `cursor`.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let header = Self::peek(cursor)?;
		let rem = cursor.remaining();
		let declared = usize::from(header.declared_len);
		if declared < Self::SIZE || declared > rem {
			return Err(DecodeError::InvalidLength {
				at: header.at,
				declared: u64::from(header.declared_len),
				rem,
			});
		}
		cursor.skip(Self::SIZE)?;
		Ok(header)
	}

	/// Read the header fields without advancing and without length validation.
	pub fn peek(cursor: &Cursor<'_>) -> Result<Self> {
		let at = cursor.offset();
		if cursor.remaining() < Self::SIZE {
			return Err(DecodeError::TruncatedHeader {
				at,
				need: Self::SIZE,
				rem: cursor.remaining(),
			});
		}

		let mut ahead = *cursor;
		let type_id = ahead.read_u16_le()?;
		let declared_len = ahead.read_u16_le()?;
		Ok(Self { type_id, declared_len, at })
	}

	/// Byte range of the whole record, header included.
	pub fn range(&self) -> ByteRange {
		ByteRange::new(self.at, usize::from(self.declared_len))
	}
}

/// RIFF chunk header: four-character tag and payload length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChunkHeader {
	/// Chunk tag.
	pub tag: FourCc,
	/// Declared payload length, header excluded.
	pub len: u32,
	/// Absolute offset of the header.
	pub at: usize,
}

impl ChunkHeader {
	/// Header width in bytes.
	pub const SIZE: usize = 8;

	/// Read a chunk header and validate its payload length against remaining bytes.
	pub fn read(cursor: &mut Cursor<'_>) -> Result<Self> {
		let header = Self::read_raw(cursor)?;
		header.check_len(cursor.remaining())?;
		Ok(header)
	}

	/// Read tag and length, failing only when the header itself is truncated.
	pub fn read_raw(cursor: &mut Cursor<'_>) -> Result<Self> {
		let at = cursor.offset();
		if cursor.remaining() < Self::SIZE {
			return Err(DecodeError::TruncatedHeader {
				at,
				need: Self::SIZE,
				rem: cursor.remaining(),
			});
		}

		let tag = FourCc(cursor.read_code4()?);
		let len = cursor.read_u32_le()?;
		Ok(Self { tag, len, at })
	}

	/// Validate the declared payload length against `rem` bytes left after the header.
	pub fn check_len(&self, rem: usize) -> Result<()> {
		if self.len as usize > rem {
			return Err(DecodeError::InvalidLength {
				at: self.at,
				declared: u64::from(self.len),
				rem,
			});
		}
		Ok(())
	}

	/// Payload range as declared.
	pub fn payload(&self) -> ByteRange {
		ByteRange::new(self.at + Self::SIZE, self.len as usize)
	}

	/// Payload range clipped to `available` bytes.
	pub fn truncated_payload(&self, available: usize) -> ByteRange {
		ByteRange::new(self.at + Self::SIZE, (self.len as usize).min(available))
	}

	/// True when the payload is followed by a RIFF pad byte.
	pub fn is_padded(&self) -> bool {
		self.len % 2 == 1
	}
}
