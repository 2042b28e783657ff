use uuid::Uuid;

use crate::bgl::{
	AttachedObjectRecord, AttachedPayload, Beacon, BeaconRecord, EffectRecord, ExtrusionBridgeRecord, Framing, GenericBuildingRecord, ImageComplexity, LibraryObject,
	LibraryObjectRecord, PackedPoint, RecordFamily, RecordKind, RecordLayout, SceneryFlags, SceneryHeader, SceneryRecord, StringPadding, TaxiwaySign,
	TaxiwaySignRecord, TriggerRecord, WindsockRecord, resolve,
};
use crate::bytes::Cursor;
use crate::{ByteRange, DecodeError, Result};

const EFFECT_NAME_WIDTH: usize = 80;

/// Decode one record whose extent is exactly `record`.
///
/// Reads never leave `record`, so an internal layout overrun surfaces as an
/// `OutOfBounds` error for the caller to turn into `MalformedRecord`.
pub(crate) fn decode_record(mut record: Cursor<'_>, layout: &RecordLayout) -> Result<SceneryRecord> {
	let cursor = &mut record;
	let decoded = match layout.kind {
		RecordKind::AttachedObject => SceneryRecord::AttachedObject(decode_attached(*cursor, layout)?),
		RecordKind::GenericBuilding => SceneryRecord::GenericBuilding(GenericBuildingRecord {
			header: read_header(cursor, layout)?,
			body: rest_range(cursor),
		}),
		RecordKind::LibraryObject => SceneryRecord::LibraryObject(LibraryObjectRecord {
			header: read_header(cursor, layout)?,
			object: read_library_object(cursor)?,
		}),
		RecordKind::Windsock => SceneryRecord::Windsock(WindsockRecord {
			header: read_header(cursor, layout)?,
			pole_height: cursor.read_f32_le()?,
			sock_length: cursor.read_f32_le()?,
			pole_color: cursor.read_array()?,
			sock_color: cursor.read_array()?,
			flags: cursor.read_u16_le()?,
		}),
		RecordKind::Effect => {
			let header = read_header(cursor, layout)?;
			let name = cursor.read_fixed_string(EFFECT_NAME_WIDTH)?.into_boxed_str();
			let (params, params_range) = read_params(cursor, layout.string_padding)?;
			SceneryRecord::Effect(EffectRecord {
				header,
				name,
				params,
				params_range,
			})
		}
		RecordKind::TaxiwaySign => {
			let header = read_header(cursor, layout)?;
			let count = cursor.read_u32_le()?;
			let mut signs = Vec::new();
			for _ in 0..count {
				signs.push(read_taxiway_sign(cursor, layout.string_padding)?);
			}
			SceneryRecord::TaxiwaySign(TaxiwaySignRecord { header, signs })
		}
		RecordKind::Trigger => SceneryRecord::Trigger(TriggerRecord {
			header: read_header(cursor, layout)?,
			body: rest_range(cursor),
			confidence: layout.confidence,
		}),
		RecordKind::Beacon => SceneryRecord::Beacon(BeaconRecord {
			header: read_header(cursor, layout)?,
			beacon: read_beacon(cursor)?,
		}),
		RecordKind::ExtrusionBridge => {
			let header = read_header(cursor, layout)?;
			SceneryRecord::ExtrusionBridge(read_extrusion_bridge(cursor, header)?)
		}
	};
	Ok(decoded)
}

fn read_header(cursor: &mut Cursor<'_>, layout: &RecordLayout) -> Result<SceneryHeader> {
	let type_id = cursor.read_u16_le()?;
	let size = cursor.read_u16_le()?;
	let lon_raw = cursor.read_u32_le()?;
	let lat_raw = cursor.read_u32_le()?;
	let alt_raw = cursor.read_i32_le()?;
	let flags = SceneryFlags(cursor.read_u16_le()?);
	let pitch_raw = cursor.read_u16_le()?;
	let bank_raw = cursor.read_u16_le()?;
	let heading_raw = cursor.read_u16_le()?;
	let image_complexity = ImageComplexity::from_raw(cursor.read_u16_le()?);
	let unknown = cursor.read_u16_le()?;
	let instance_id = if layout.has_instance_id { Some(cursor.read_guid()?) } else { None };

	Ok(SceneryHeader {
		type_id,
		size,
		lon_raw,
		lat_raw,
		alt_raw,
		flags,
		pitch_raw,
		bank_raw,
		heading_raw,
		image_complexity,
		unknown,
		instance_id,
		version: layout.version,
	})
}

fn rest_range(cursor: &Cursor<'_>) -> ByteRange {
	cursor.range_ahead(cursor.remaining())
}

fn read_library_object(cursor: &mut Cursor<'_>) -> Result<LibraryObject> {
	Ok(LibraryObject {
		name: cursor.read_guid()?,
		scale: cursor.read_f32_le()?,
	})
}

fn read_beacon(cursor: &mut Cursor<'_>) -> Result<Beacon> {
	Ok(Beacon {
		beacon_type: cursor.read_u8()?,
		unknown_1: cursor.read_u8()?,
		unknown_2: cursor.read_u16_le()?,
	})
}

/// Zero-terminated string plus the bytes it took, padding included.
fn read_string(cursor: &mut Cursor<'_>, padding: Option<StringPadding>) -> Result<(Box<str>, ByteRange)> {
	let start = cursor.offset();
	let value = cursor.read_cstring()?.into_boxed_str();
	if padding == Some(StringPadding::Word) {
		cursor.align_to(2, start)?;
	}
	Ok((value, ByteRange::new(start, cursor.offset() - start)))
}

/// Effect parameters; without a terminator they run to the end of the record.
fn read_params(cursor: &mut Cursor<'_>, padding: Option<StringPadding>) -> Result<(Box<str>, ByteRange)> {
	if cursor.rest().contains(&0) {
		return read_string(cursor, padding);
	}
	let range = rest_range(cursor);
	let raw = cursor.read_exact(range.len)?;
	Ok((String::from_utf8_lossy(raw).into(), range))
}

fn read_taxiway_sign(cursor: &mut Cursor<'_>, padding: Option<StringPadding>) -> Result<TaxiwaySign> {
	let lon_offset = cursor.read_f32_le()?;
	let lat_offset = cursor.read_f32_le()?;
	let heading_raw = cursor.read_u16_le()?;
	let size = cursor.read_u8()?;
	let justification = cursor.read_u8()?;
	let (label, _) = read_string(cursor, padding)?;
	Ok(TaxiwaySign {
		lon_offset,
		lat_offset,
		heading_raw,
		size,
		justification,
		label,
	})
}

fn read_packed_point(cursor: &mut Cursor<'_>) -> Result<PackedPoint> {
	Ok(PackedPoint {
		lon_raw: cursor.read_u32_le()?,
		lat_raw: cursor.read_u32_le()?,
		alt_raw: cursor.read_u32_le()?,
	})
}

fn read_extrusion_bridge(cursor: &mut Cursor<'_>, header: SceneryHeader) -> Result<ExtrusionBridgeRecord> {
	let profile = cursor.read_guid()?;
	let material_set = cursor.read_guid()?;
	let mut altitude_samples = [PackedPoint {
		lon_raw: 0,
		lat_raw: 0,
		alt_raw: 0,
	}; 2];
	for sample in &mut altitude_samples {
		// samples store latitude before longitude
		let lat_raw = cursor.read_u32_le()?;
		let lon_raw = cursor.read_u32_le()?;
		let alt_raw = cursor.read_u32_le()?;
		*sample = PackedPoint { lon_raw, lat_raw, alt_raw };
	}
	let road_width = cursor.read_f32_le()?;
	let probability = cursor.read_f32_le()?;
	let suppress = cursor.read_u8()?;
	let placement_count = cursor.read_u8()?;
	let point_count = cursor.read_u16_le()?;

	let placements = (0..placement_count).map(|_| cursor.read_guid()).collect::<Result<Vec<Uuid>>>()?;
	let points = (0..point_count).map(|_| read_packed_point(cursor)).collect::<Result<Vec<_>>>()?;

	Ok(ExtrusionBridgeRecord {
		header,
		profile,
		material_set,
		altitude_samples,
		road_width,
		probability,
		suppress,
		placements,
		points,
	})
}

/// Total byte extent of the attached object block starting at `cursor`.
///
/// The extent is `start_size + data_size + closing_size`, where the closing
/// delimiter's size is read from the delimiter at `start_size + data_size`.
pub(crate) fn attach_block_len(cursor: &Cursor<'_>) -> Result<usize> {
	let at = cursor.offset();
	let rem = cursor.remaining();
	let invalid = |declared: usize| DecodeError::InvalidLength {
		at,
		declared: declared as u64,
		rem,
	};

	let start_size = peek_u16(cursor, 2).map_err(|_| invalid(8))?;
	let data_size = peek_u16(cursor, 6).map_err(|_| invalid(8))?;
	let closing_at = usize::from(start_size) + usize::from(data_size);
	let closing_size = peek_u16(cursor, closing_at + 2).map_err(|_| invalid(closing_at + 4))?;

	let len = closing_at + usize::from(closing_size);
	if len < 4 || len > rem {
		return Err(invalid(len));
	}
	Ok(len)
}

fn peek_u16(cursor: &Cursor<'_>, rel: usize) -> Result<u16> {
	let mut ahead = *cursor;
	ahead.skip(rel)?;
	ahead.read_u16_le()
}

fn decode_attached(block: Cursor<'_>, layout: &RecordLayout) -> Result<AttachedObjectRecord> {
	let start = block.offset();
	let mut cursor = block;
	let type_id = cursor.read_u16_le()?;
	let start_size = usize::from(cursor.read_u16_le()?);
	let object_type_id = cursor.read_u16_le()?;
	let data_size = usize::from(cursor.read_u16_le()?);
	let attach_point_offset = usize::from(cursor.read_u16_le()?);
	let pitch_raw = cursor.read_u16_le()?;
	let bank_raw = cursor.read_u16_le()?;
	let heading_raw = cursor.read_u16_le()?;
	let bias = [cursor.read_f32_le()?, cursor.read_f32_le()?, cursor.read_f32_le()?];
	let (instance_id, probability, randomness) = if layout.has_instance_id {
		(Some(cursor.read_guid()?), Some(cursor.read_u16_le()?), Some(cursor.read_u16_le()?))
	} else {
		(None, None, None)
	};

	let name_at = start_size + attach_point_offset;
	let payload = match resolve(RecordFamily::AttachedPayload, object_type_id).map(|payload| payload.kind) {
		Some(RecordKind::LibraryObject) => AttachedPayload::LibraryObject(read_library_object(&mut cursor)?),
		Some(RecordKind::Beacon) => AttachedPayload::Beacon(read_beacon(&mut cursor)?),
		_ => {
			let payload_at = cursor.offset();
			let len = (start + name_at).saturating_sub(payload_at).min(cursor.remaining());
			AttachedPayload::Opaque {
				object_type_id,
				range: ByteRange::new(payload_at, len),
			}
		}
	};

	let mut name = block;
	name.skip(name_at)?;
	let (attach_point, _) = read_string(&mut name, layout.string_padding)?;

	let mut closing = block;
	closing.skip(start_size + data_size)?;
	let closing_id = closing.read_u16_le()?;
	if let Framing::AttachBlock { closing_id: expected } = layout.framing {
		if closing_id != expected {
			return Err(DecodeError::MalformedRecord {
				at: start,
				type_id,
				detail: format!("closing delimiter 0x{closing_id:04x}, expected 0x{expected:04x}").into(),
			});
		}
	}

	Ok(AttachedObjectRecord {
		type_id,
		version: layout.version,
		object_type_id,
		pitch_raw,
		bank_raw,
		heading_raw,
		bias,
		instance_id,
		probability,
		randomness,
		payload,
		attach_point,
		attached_to: None,
	})
}

#[cfg(test)]
mod tests;
