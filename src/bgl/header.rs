use serde::Serialize;

use crate::bytes::Cursor;
use crate::{DecodeError, Result};

/// Parsed BGL file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BglHeader {
	/// Leading magic, always [`BglHeader::MAGIC`].
	pub magic: u32,
	/// Header size as declared by the file.
	pub header_size: u32,
	/// Raw compilation timestamp; its unit is not fixed by the format.
	pub timestamp: BglTimestamp,
	/// Second magic number (`0x08051803` in files seen so far).
	pub magic2: u32,
	/// Number of entries in the section table.
	pub section_count: u32,
	/// QMID bounding slots.
	pub qmids: [u32; 8],
}

impl BglHeader {
	/// Leading BGL magic number.
	pub const MAGIC: u32 = 0x1992_0201;
	/// Usual value of [`BglHeader::magic2`].
	pub const MAGIC2: u32 = 0x0805_1803;
	/// Fixed header size; the section table follows immediately.
	pub const SIZE: usize = 56;

	/// Parse the header from the start of `bytes`.
	pub fn parse(bytes: &[u8]) -> Result<Self> {
		if bytes.len() < Self::SIZE {
			return Err(DecodeError::TruncatedHeader {
				at: 0,
				need: Self::SIZE,
				rem: bytes.len(),
			});
		}

		let mut cursor = Cursor::new(bytes);
		let magic = cursor.read_u32_le()?;
		if magic != Self::MAGIC {
			return Err(DecodeError::BadMagic {
				at: 0,
				expected: Self::MAGIC,
				got: magic,
			});
		}

		let header_size = cursor.read_u32_le()?;
		let timestamp = BglTimestamp(cursor.read_u64_le()?);
		let magic2 = cursor.read_u32_le()?;
		let section_count = cursor.read_u32_le()?;
		let mut qmids = [0_u32; 8];
		for slot in &mut qmids {
			*slot = cursor.read_u32_le()?;
		}

		Ok(Self {
			magic,
			header_size,
			timestamp,
			magic2,
			section_count,
			qmids,
		})
	}
}

/// 64-bit header timestamp of ambiguous unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BglTimestamp(pub u64);

/// Unit guessed for a [`BglTimestamp`] from its magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimestampUnit {
	/// Seconds since 1970-01-01.
	UnixSeconds,
	/// 100 ns ticks since 1601-01-01.
	FileTime,
	/// Nanoseconds since 1970-01-01.
	UnixNanos,
	/// No plausible interpretation.
	Unknown,
}

impl BglTimestamp {
	const FILETIME_UNIX_EPOCH: u64 = 116_444_736_000_000_000;
	const FILETIME_UPPER: u64 = 250_000_000_000_000_000;
	const NANOS_LOWER: u64 = 600_000_000_000_000_000;
	const SECONDS_UPPER: u64 = 100_000_000_000;

	/// Raw value as stored in the file.
	pub fn raw(self) -> u64 {
		self.0
	}

	/// Guess the unit from the value's magnitude.
	///
	/// Seconds stay below 1e11, FILETIME ticks for years 1970..2390 sit in
	/// 1.16e17..2.5e17 and Unix nanoseconds for years after 1989 start at 6e17.
	pub fn guess_unit(self) -> TimestampUnit {
		match self.0 {
			0 => TimestampUnit::Unknown,
			raw if raw < Self::SECONDS_UPPER => TimestampUnit::UnixSeconds,
			raw if (Self::FILETIME_UNIX_EPOCH..Self::FILETIME_UPPER).contains(&raw) => TimestampUnit::FileTime,
			raw if raw >= Self::NANOS_LOWER => TimestampUnit::UnixNanos,
			_ => TimestampUnit::Unknown,
		}
	}

	/// Seconds since the Unix epoch, using [`BglTimestamp::guess_unit`].
	pub fn unix_seconds(self) -> Option<u64> {
		match self.guess_unit() {
			TimestampUnit::UnixSeconds => Some(self.0),
			TimestampUnit::FileTime => Some((self.0 - Self::FILETIME_UNIX_EPOCH) / 10_000_000),
			TimestampUnit::UnixNanos => Some(self.0 / 1_000_000_000),
			TimestampUnit::Unknown => None,
		}
	}
}
