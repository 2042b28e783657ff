use fsdecode_testkit::{AttachSpec, ByteWriter, Placement, attached_object, guid_bytes, scenery_record};
use uuid::Uuid;

use crate::bgl::decode::{attach_block_len, decode_record};
use crate::bgl::{AttachedPayload, Confidence, FormatVersion, ImageComplexity, RecordFamily, SceneryRecord, resolve};
use crate::{ByteRange, Cursor, DecodeError};

fn decode(bytes: &[u8]) -> crate::Result<SceneryRecord> {
	let type_id = u16::from_le_bytes([bytes[0], bytes[1]]);
	let layout = resolve(RecordFamily::SceneryObject, type_id).expect("known type id");
	decode_record(Cursor::new(bytes), &layout)
}

#[test]
fn fsx_header_carries_instance_id_and_decoded_position() {
	let mut placement = Placement::fsx(0x10);
	placement.alt = 12_500;
	placement.flags = 0x0005;
	placement.heading = 0x8000;
	placement.image_complexity = 4;
	let bytes = scenery_record(0x0b, &placement, &ByteWriter::new().bytes(&guid_bytes(0x80)).f32(1.5).finish());

	let SceneryRecord::LibraryObject(record) = decode(&bytes).expect("decodes") else {
		panic!("expected library object");
	};
	let header = &record.header;
	assert_eq!(header.version, FormatVersion::Fsx);
	assert_eq!(header.instance_id, Some(Uuid::from_bytes_le(guid_bytes(0x10))));
	assert_eq!(header.longitude(), 0.0);
	assert_eq!(header.latitude(), 0.0);
	assert_eq!(header.altitude(), 12.5);
	assert_eq!(header.heading(), 180.0);
	assert!(header.flags.is_above_agl());
	assert!(header.flags.no_crash());
	assert!(!header.flags.no_autogen_suppression());
	assert_eq!(header.image_complexity, ImageComplexity::VeryDense);
	assert_eq!(record.object.name, Uuid::from_bytes_le(guid_bytes(0x80)));
	assert_eq!(record.object.scale, 1.5);
}

#[test]
fn fs9_header_has_no_instance_id() {
	let bytes = scenery_record(0x02, &Placement::fs9(), &ByteWriter::new().bytes(&guid_bytes(0x80)).f32(1.0).finish());
	let record = decode(&bytes).expect("decodes");
	assert_eq!(record.version(), Some(FormatVersion::Fs9));
	assert_eq!(record.header().and_then(|header| header.instance_id), None);
}

#[test]
fn effect_params_are_not_word_aligned() {
	let body = ByteWriter::new().fixed_str("fx_beacon", 80).cstr("ab").finish();
	let bytes = scenery_record(0x0d, &Placement::fsx(1), &body);
	assert_eq!(bytes.len() % 2, 1, "odd-length record");

	let SceneryRecord::Effect(effect) = decode(&bytes).expect("decodes") else {
		panic!("expected effect");
	};
	assert_eq!(&*effect.name, "fx_beacon");
	assert_eq!(&*effect.params, "ab");
	assert_eq!(effect.params_range, ByteRange::new(44 + 80, 3));
	assert_eq!(effect.params_range.end(), bytes.len());
}

#[test]
fn fs9_effect_id_is_observed() {
	let body = ByteWriter::new().fixed_str("fx_smoke", 80).cstr("").finish();
	let bytes = scenery_record(0x04, &Placement::fs9(), &body);
	let layout = resolve(RecordFamily::SceneryObject, 0x04).expect("layout");
	assert_eq!(layout.confidence, Confidence::Observed);
	let record = decode(&bytes).expect("decodes");
	assert_eq!(record.version(), Some(FormatVersion::Fs9));
}

#[test]
fn taxiway_sign_labels_are_word_aligned() {
	let body = ByteWriter::new()
		.u32(2)
		.f32(10.0)
		.f32(-5.0)
		.u16(0x4000)
		.u8(3)
		.u8(1)
		.cstr_word("A1")
		.f32(0.0)
		.f32(0.0)
		.u16(0)
		.u8(2)
		.u8(0)
		.cstr_word("B")
		.finish();
	let bytes = scenery_record(0x0e, &Placement::fsx(2), &body);

	let SceneryRecord::TaxiwaySign(record) = decode(&bytes).expect("decodes") else {
		panic!("expected taxiway sign");
	};
	assert_eq!(record.signs.len(), 2);
	assert_eq!(&*record.signs[0].label, "A1");
	assert_eq!(record.signs[0].heading(), 90.0);
	assert_eq!(record.signs[0].lon_offset, 10.0);
	assert_eq!(&*record.signs[1].label, "B");
	assert_eq!(record.signs[1].size, 2);
}

#[test]
fn windsock_fields() {
	let body = ByteWriter::new()
		.f32(8.0)
		.f32(3.0)
		.bytes(&[255, 255, 255, 255])
		.bytes(&[255, 128, 0, 255])
		.u16(1)
		.finish();
	let bytes = scenery_record(0x03, &Placement::fs9(), &body);
	let SceneryRecord::Windsock(sock) = decode(&bytes).expect("decodes") else {
		panic!("expected windsock");
	};
	assert_eq!(sock.pole_height, 8.0);
	assert_eq!(sock.sock_color, [255, 128, 0, 255]);
	assert!(sock.is_lighted());
}

#[test]
fn trigger_body_is_opaque_and_fs9_is_heuristic() {
	let bytes = scenery_record(0x07, &Placement::fs9(), &[1, 2, 3, 4, 5, 6]);
	let SceneryRecord::Trigger(trigger) = decode(&bytes).expect("decodes") else {
		panic!("expected trigger");
	};
	assert_eq!(trigger.body, ByteRange::new(28, 6));
	assert_eq!(trigger.confidence, Confidence::Heuristic);
}

#[test]
fn extrusion_bridge_lists_placements_and_points() {
	let body = ByteWriter::new()
		.bytes(&guid_bytes(0x20))
		.bytes(&guid_bytes(0x30))
		.u32(0x1000_0000)
		.u32(0x1800_0000)
		.u32(100)
		.u32(0x1000_0000)
		.u32(0x1800_0000)
		.u32(200)
		.f32(12.0)
		.f32(1.0)
		.u8(0)
		.u8(1)
		.u16(2)
		.bytes(&guid_bytes(0x50))
		.u32(0x1800_0000)
		.u32(0x1000_0000)
		.u32(5)
		.u32(0)
		.u32(0)
		.u32(6)
		.finish();
	let bytes = scenery_record(0x12, &Placement::fsx(3), &body);

	let SceneryRecord::ExtrusionBridge(bridge) = decode(&bytes).expect("decodes") else {
		panic!("expected bridge");
	};
	assert_eq!(bridge.profile, Uuid::from_bytes_le(guid_bytes(0x20)));
	assert_eq!(bridge.altitude_samples[1].alt_raw, 200);
	assert_eq!(bridge.altitude_samples[0].longitude(), 0.0);
	assert_eq!(bridge.placements, vec![Uuid::from_bytes_le(guid_bytes(0x50))]);
	assert_eq!(bridge.points.len(), 2);
	assert_eq!(bridge.points[0].latitude(), 0.0);
	assert_eq!(bridge.points[1].longitude(), -180.0);
}

#[test]
fn overrun_inside_record_is_an_error() {
	// beacon body needs four bytes, only two declared
	let bytes = scenery_record(0x11, &Placement::fsx(4), &[1, 1]);
	let err = decode(&bytes).expect_err("overrun");
	assert!(matches!(err, DecodeError::OutOfBounds { .. }));
}

#[test]
fn attached_block_extent_and_fields() {
	let spec = AttachSpec::beacon(true, "attachpt_light");
	let bytes = attached_object(&spec);
	let len = attach_block_len(&Cursor::new(&bytes)).expect("extent");
	assert_eq!(len, bytes.len());

	let SceneryRecord::AttachedObject(attached) = decode(&bytes).expect("decodes") else {
		panic!("expected attached object");
	};
	assert_eq!(attached.version, FormatVersion::Fsx);
	assert_eq!(attached.instance_id, Some(Uuid::from_bytes_le(guid_bytes(0x40))));
	assert_eq!(attached.probability, Some(100));
	assert_eq!(attached.bias, [1.0, 2.0, 3.0]);
	assert_eq!(&*attached.attach_point, "attachpt_light");
	let AttachedPayload::Beacon(beacon) = attached.payload else {
		panic!("expected beacon payload");
	};
	assert_eq!(beacon.beacon_type, 2);
	assert_eq!(beacon.unknown_1, 1);
}

#[test]
fn fs9_attached_block_omits_fsx_fields() {
	let mut spec = AttachSpec::beacon(false, "pt");
	spec.object_type_id = 0x02;
	spec.payload = ByteWriter::new().bytes(&guid_bytes(0x60)).f32(2.0).finish();
	let bytes = attached_object(&spec);

	let SceneryRecord::AttachedObject(attached) = decode(&bytes).expect("decodes") else {
		panic!("expected attached object");
	};
	assert_eq!(attached.version, FormatVersion::Fs9);
	assert_eq!(attached.instance_id, None);
	assert_eq!(attached.probability, None);
	assert_eq!(attached.randomness, None);
	assert_eq!(&*attached.attach_point, "pt");
	assert!(matches!(attached.payload, AttachedPayload::LibraryObject(object) if object.scale == 2.0));
}

#[test]
fn wrong_closing_delimiter_is_malformed() {
	let mut bytes = attached_object(&AttachSpec::beacon(true, "x"));
	let closing = bytes.len() - 4;
	bytes[closing] = 0x01;
	bytes[closing + 1] = 0x10;
	let err = decode(&bytes).expect_err("fs9 closing id in fsx block");
	assert!(matches!(err, DecodeError::MalformedRecord { type_id: 0x1002, .. }));
}

#[test]
fn attached_block_running_past_data_is_invalid_length() {
	let bytes = attached_object(&AttachSpec::beacon(false, "x"));
	let cut = &bytes[..bytes.len() - 6];
	let err = attach_block_len(&Cursor::new(cut)).expect_err("truncated block");
	assert!(matches!(err, DecodeError::InvalidLength { at: 0, .. }));
}

#[test]
fn unterminated_effect_params_run_to_record_end() {
	let body = ByteWriter::new().fixed_str("fx_fire", 80).bytes(b"scale=2").finish();
	let bytes = scenery_record(0x0d, &Placement::fsx(1), &body);

	let SceneryRecord::Effect(effect) = decode(&bytes).expect("decodes") else {
		panic!("expected effect");
	};
	assert_eq!(&*effect.name, "fx_fire");
	assert_eq!(&*effect.params, "scale=2");
	assert_eq!(effect.params_range, ByteRange::new(44 + 80, 7));
}
