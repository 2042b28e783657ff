use serde::Serialize;
use uuid::Uuid;

use crate::bytes::Cursor;
use crate::error::record;
use crate::{ByteRange, DecodeError, Result};

/// One entry of a ModelData subsection: a library model GUID and its embedded MDL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDataRecord {
	/// Library model GUID.
	pub name: Uuid,
	/// MDL offset relative to the subsection data start.
	pub offset: u32,
	/// Declared MDL length in bytes.
	pub len: u32,
	/// Absolute range of the embedded MDL; `None` when it lies outside the subsection.
	pub mdl: Option<ByteRange>,
}

impl ModelDataRecord {
	/// Fixed entry width.
	pub const SIZE: usize = 24;
}

/// Read `declared_count` model entries from the start of `data`.
pub(crate) fn walk_models(bytes: &[u8], data: ByteRange, declared_count: u32, diagnostics: &mut Vec<DecodeError>) -> Result<Vec<ModelDataRecord>> {
	let mut cursor = Cursor::over(bytes, data)?;
	let fits = data.len / ModelDataRecord::SIZE;
	let count = (declared_count as usize).min(fits);
	if count < declared_count as usize {
		record(
			diagnostics,
			DecodeError::InvalidLength {
				at: data.offset,
				declared: declared_count as u64 * ModelDataRecord::SIZE as u64,
				rem: data.len,
			},
		);
	}

	let mut models = Vec::with_capacity(count);
	for _ in 0..count {
		let at = cursor.offset();
		let name = cursor.read_guid()?;
		let offset = cursor.read_u32_le()?;
		let len = cursor.read_u32_le()?;

		let mdl = ByteRange::new(data.offset + offset as usize, len as usize);
		let mdl = if mdl.end() <= data.end() {
			Some(mdl)
		} else {
			record(
				diagnostics,
				DecodeError::InvalidLength {
					at,
					declared: u64::from(len),
					rem: data.len.saturating_sub(offset as usize),
				},
			);
			None
		};
		models.push(ModelDataRecord { name, offset, len, mdl });
	}

	tracing::debug!(offset = data.offset, models = models.len(), "model data subsection");
	Ok(models)
}
