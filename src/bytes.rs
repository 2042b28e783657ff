use crate::{ByteRange, DecodeError, Result};

/// Bounded forward cursor over an immutable byte slice.
///
/// Offsets reported by [`Cursor::offset`] and carried in errors are absolute
/// file offsets: a cursor created with [`Cursor::over`] or [`Cursor::sub`]
/// remembers where its slice starts inside the source buffer.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0 of a whole buffer.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0, base: 0 }
	}

	/// Create a cursor over `range` of `bytes`, failing when the range is out of bounds.
	pub fn over(bytes: &'a [u8], range: ByteRange) -> Result<Self> {
		let slice = range.slice(bytes).ok_or(DecodeError::OutOfBounds {
			at: range.offset,
			need: range.len,
			rem: bytes.len().saturating_sub(range.offset),
		})?;
		Ok(Self {
			bytes: slice,
			pos: 0,
			base: range.offset,
		})
	}

	/// Return the position relative to the start of this cursor's slice.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Return the absolute offset of the next unread byte.
	pub fn offset(&self) -> usize {
		self.base + self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Return the unread tail without advancing.
	pub fn rest(&self) -> &'a [u8] {
		&self.bytes[self.pos.min(self.bytes.len())..]
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(DecodeError::OutOfBounds {
				at: self.offset(),
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a fixed-size byte array.
	pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut out = [0_u8; N];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Skip `n` bytes.
	pub fn skip(&mut self, n: usize) -> Result<()> {
		let _ = self.read_exact(n)?;
		Ok(())
	}

	/// Split off the next `len` bytes as a child cursor and advance past them.
	pub fn sub(&mut self, len: usize) -> Result<Cursor<'a>> {
		let base = self.offset();
		let bytes = self.read_exact(len)?;
		Ok(Cursor { bytes, pos: 0, base })
	}

	/// Byte range of the next `len` bytes, without reading them.
	pub fn range_ahead(&self, len: usize) -> ByteRange {
		ByteRange::new(self.offset(), len)
	}

	/// Read a four-byte code.
	pub fn read_code4(&mut self) -> Result<[u8; 4]> {
		self.read_array::<4>()
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_array::<1>()?[0])
	}

	/// Read a little-endian `u16`.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		Ok(u16::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u32`.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		Ok(u32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(i32::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian `u64`.
	pub fn read_u64_le(&mut self) -> Result<u64> {
		Ok(u64::from_le_bytes(self.read_array()?))
	}

	/// Read a little-endian IEEE-754 `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(f32::from_le_bytes(self.read_array()?))
	}

	/// Read a 16-byte GUID stored in the mixed-endian Windows layout.
	pub fn read_guid(&mut self) -> Result<uuid::Uuid> {
		Ok(uuid::Uuid::from_bytes_le(self.read_array()?))
	}

	/// Read a zero-terminated byte string without the terminator.
	///
	/// The cursor is left immediately past the zero byte; no alignment is applied.
	pub fn read_cstring_bytes(&mut self) -> Result<&'a [u8]> {
		let rem = self.rest();
		let Some(rel_end) = rem.iter().position(|byte| *byte == 0) else {
			return Err(DecodeError::OutOfBounds {
				at: self.offset(),
				need: rem.len() + 1,
				rem: rem.len(),
			});
		};

		let value = &rem[..rel_end];
		self.pos += rel_end + 1;
		Ok(value)
	}

	/// Read a zero-terminated string, replacing invalid UTF-8.
	pub fn read_cstring(&mut self) -> Result<String> {
		Ok(lossy_string(self.read_cstring_bytes()?))
	}

	/// Read a fixed-width, zero-padded string field.
	pub fn read_fixed_string(&mut self, width: usize) -> Result<String> {
		let raw = self.read_exact(width)?;
		let end = raw.iter().position(|byte| *byte == 0).unwrap_or(raw.len());
		Ok(lossy_string(&raw[..end]))
	}

	/// Advance to the next multiple of `align` measured from the absolute offset `origin`.
	pub fn align_to(&mut self, align: usize, origin: usize) -> Result<()> {
		if align <= 1 {
			return Ok(());
		}

		let rel = self.offset().saturating_sub(origin);
		let pad = (align - rel % align) % align;
		self.skip(pad)
	}
}

fn lossy_string(bytes: &[u8]) -> String {
	String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests;
