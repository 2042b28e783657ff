use serde::Serialize;

/// Offset and length into the source buffer; never owns the bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct ByteRange {
	/// Absolute start offset.
	pub offset: usize,
	/// Length in bytes.
	pub len: usize,
}

impl ByteRange {
	/// Build a range from offset and length.
	pub const fn new(offset: usize, len: usize) -> Self {
		Self { offset, len }
	}

	/// One past the last byte, saturating on overflow.
	pub fn end(&self) -> usize {
		self.offset.saturating_add(self.len)
	}

	/// True when the range covers no bytes.
	pub fn is_empty(&self) -> bool {
		self.len == 0
	}

	/// Borrow the covered bytes, or `None` when the range exceeds `bytes`.
	pub fn slice<'a>(&self, bytes: &'a [u8]) -> Option<&'a [u8]> {
		let end = self.offset.checked_add(self.len)?;
		bytes.get(self.offset..end)
	}

	/// Clamp the range so it ends no later than `limit`.
	pub fn clamp_end(&self, limit: usize) -> Self {
		let offset = self.offset.min(limit);
		Self {
			offset,
			len: self.end().min(limit) - offset,
		}
	}
}
