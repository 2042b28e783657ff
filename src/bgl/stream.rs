use crate::bgl::decode::{attach_block_len, decode_record};
use crate::bgl::{BglOptions, Framing, RecordFamily, SceneryEntry, SceneryRecord, resolve};
use crate::bytes::Cursor;
use crate::error::record;
use crate::{ByteRange, DecodeError, RecordHeader, Result};

/// Walk the record stream of one SceneryObject subsection.
///
/// Byte exhaustion ends the walk; `declared_count` is only cross-checked,
/// since uncounted attached object blocks may follow the last counted record.
/// `clipped` marks a data range already cut to the buffer end, where a partial
/// trailing record header ends the walk with `InvalidLength` instead of failing the file.
pub(crate) fn walk_scenery(
	bytes: &[u8],
	data: ByteRange,
	clipped: bool,
	declared_count: u32,
	options: &BglOptions,
	diagnostics: &mut Vec<DecodeError>,
) -> Result<Vec<SceneryEntry>> {
	let mut cursor = Cursor::over(bytes, data)?;
	let mut entries = Vec::new();
	let mut walked = 0_u32;
	let mut last_library = None;

	while cursor.remaining() > 0 {
		if entries.len() >= options.max_records_per_subsection {
			record(
				diagnostics,
				DecodeError::UnsupportedVariant {
					at: cursor.offset(),
					what: format!("record limit {} reached, rest of subsection skipped", options.max_records_per_subsection).into(),
				},
			);
			break;
		}

		let header = match RecordHeader::peek(&cursor) {
			Ok(header) => header,
			Err(DecodeError::TruncatedHeader { at, rem, .. }) if clipped => {
				record(
					diagnostics,
					DecodeError::InvalidLength {
						at,
						declared: RecordHeader::SIZE as u64,
						rem,
					},
				);
				break;
			}
			Err(err) => return Err(err),
		};
		let layout = resolve(RecordFamily::SceneryObject, header.type_id);
		let extent = match layout.map(|layout| layout.framing) {
			Some(Framing::AttachBlock { .. }) => attach_block_len(&cursor),
			_ => {
				let mut ahead = cursor;
				RecordHeader::read(&mut ahead).map(|header| usize::from(header.declared_len))
			}
		};
		let len = match extent {
			Ok(len) => len,
			Err(err) if err.is_recoverable() => {
				record(diagnostics, err);
				break;
			}
			Err(err) => return Err(err),
		};

		let range = ByteRange::new(header.at, len);
		let body = cursor.sub(len)?;
		let Some(layout) = layout else {
			tracing::debug!(type_id = header.type_id, offset = header.at, len, "unknown scenery record");
			walked += 1;
			last_library = None;
			entries.push(SceneryEntry {
				range,
				counted: true,
				record: SceneryRecord::Unknown {
					type_id: header.type_id,
					raw: range,
				},
			});
			continue;
		};

		if layout.counted {
			walked += 1;
		}

		match decode_record(body, &layout) {
			Ok(mut decoded) => {
				match &mut decoded {
					SceneryRecord::LibraryObject(_) => last_library = Some(entries.len()),
					SceneryRecord::AttachedObject(attached) => attached.attached_to = last_library,
					_ => last_library = None,
				}
				entries.push(SceneryEntry {
					range,
					counted: layout.counted,
					record: decoded,
				});
			}
			Err(err) => {
				last_library = None;
				record(diagnostics, malformed(&header, err));
			}
		}
	}

	if options.check_declared_counts && walked != declared_count {
		record(
			diagnostics,
			DecodeError::CountMismatch {
				at: data.offset,
				declared: declared_count,
				walked,
			},
		);
	}

	tracing::debug!(offset = data.offset, records = entries.len(), walked, declared_count, "scenery subsection");
	Ok(entries)
}

fn malformed(header: &RecordHeader, err: DecodeError) -> DecodeError {
	match err {
		DecodeError::MalformedRecord { .. } => err,
		other => DecodeError::MalformedRecord {
			at: header.at,
			type_id: header.type_id,
			detail: other.to_string().into(),
		},
	}
}

#[cfg(test)]
mod tests;
