use crate::{ByteRange, Cursor, DecodeError};

#[test]
fn reads_little_endian_fields() {
	let bytes = [0x34, 0x12, 0x78, 0x56, 0x34, 0x12, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x80, 0x3f];
	let mut cursor = Cursor::new(&bytes);
	assert_eq!(cursor.read_u16_le().expect("u16"), 0x1234);
	assert_eq!(cursor.read_u32_le().expect("u32"), 0x1234_5678);
	assert_eq!(cursor.read_i32_le().expect("i32"), -1);
	assert_eq!(cursor.read_f32_le().expect("f32"), 1.0);
	assert_eq!(cursor.remaining(), 0);
}

#[test]
fn short_read_is_out_of_bounds_and_does_not_advance() {
	let bytes = [1_u8, 2, 3];
	let mut cursor = Cursor::new(&bytes);
	let err = cursor.read_u32_le().expect_err("needs four bytes");
	assert_eq!(err, DecodeError::OutOfBounds { at: 0, need: 4, rem: 3 });
	assert_eq!(cursor.pos(), 0);
}

#[test]
fn cstring_stops_after_terminator_without_alignment() {
	let bytes = b"abc\0Z";
	let mut cursor = Cursor::new(bytes);
	assert_eq!(cursor.read_cstring().expect("string"), "abc");
	assert_eq!(cursor.pos(), 4);
	assert_eq!(cursor.read_u8().expect("next byte"), b'Z');
}

#[test]
fn unterminated_cstring_fails() {
	let bytes = b"abc";
	let mut cursor = Cursor::new(bytes);
	assert!(matches!(cursor.read_cstring(), Err(DecodeError::OutOfBounds { at: 0, .. })));
}

#[test]
fn fixed_string_trims_at_first_zero() {
	let bytes = b"fx_smoke\0\0garbage!";
	let mut cursor = Cursor::new(bytes);
	assert_eq!(cursor.read_fixed_string(18).expect("fixed"), "fx_smoke");
	assert_eq!(cursor.remaining(), 0);
}

#[test]
fn align_is_relative_to_the_given_origin() {
	let bytes = [0_u8; 16];
	let mut cursor = Cursor::over(&bytes, ByteRange::new(3, 10)).expect("range");
	cursor.skip(3).expect("skip");
	assert_eq!(cursor.offset(), 6);

	let mut from_record = cursor;
	from_record.align_to(4, 3).expect("align from record start");
	assert_eq!(from_record.offset(), 7);

	let mut from_file = cursor;
	from_file.align_to(4, 0).expect("align from file start");
	assert_eq!(from_file.offset(), 8);
}

#[test]
fn sub_cursor_keeps_absolute_offsets() {
	let bytes = [0_u8, 1, 2, 3, 4, 5, 6, 7];
	let mut cursor = Cursor::new(&bytes);
	cursor.skip(2).expect("skip");
	let mut sub = cursor.sub(4).expect("sub");
	assert_eq!(cursor.offset(), 6);
	assert_eq!(sub.offset(), 2);
	assert_eq!(sub.remaining(), 4);
	sub.skip(4).expect("drain");
	let err = sub.read_u8().expect_err("sub is bounded");
	assert_eq!(err, DecodeError::OutOfBounds { at: 6, need: 1, rem: 0 });
}

#[test]
fn over_rejects_range_past_end() {
	let bytes = [0_u8; 4];
	let err = Cursor::over(&bytes, ByteRange::new(2, 4)).expect_err("range too long");
	assert_eq!(err, DecodeError::OutOfBounds { at: 2, need: 4, rem: 2 });
}

#[test]
fn guid_uses_mixed_endian_layout() {
	let bytes = [
		0x33, 0x22, 0x11, 0x00, 0x55, 0x44, 0x77, 0x66, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
	];
	let mut cursor = Cursor::new(&bytes);
	let guid = cursor.read_guid().expect("guid");
	assert_eq!(guid.to_string(), "00112233-4455-6677-8899-aabbccddeeff");
}
