use fsdecode_testkit::{AttachSpec, ByteWriter, Placement, attached_object, guid_bytes, scenery_record, scenery_record_sized};

use crate::bgl::stream::walk_scenery;
use crate::bgl::{BglOptions, SceneryEntry, SceneryRecord};
use crate::{ByteRange, DecodeError, Result};

fn walk(data: &[u8], declared: u32) -> (Result<Vec<SceneryEntry>>, Vec<DecodeError>) {
	walk_with(data, declared, &BglOptions::default())
}

fn walk_with(data: &[u8], declared: u32, options: &BglOptions) -> (Result<Vec<SceneryEntry>>, Vec<DecodeError>) {
	let mut diagnostics = Vec::new();
	let entries = walk_scenery(data, ByteRange::new(0, data.len()), false, declared, options, &mut diagnostics);
	(entries, diagnostics)
}

fn library(placement: &Placement, type_id: u16) -> Vec<u8> {
	scenery_record(type_id, placement, &ByteWriter::new().bytes(&guid_bytes(0x80)).f32(1.0).finish())
}

#[test]
fn attached_block_after_last_counted_record_is_still_walked() {
	let data = [library(&Placement::fsx(1), 0x0b), attached_object(&AttachSpec::beacon(true, "light"))].concat();
	let (entries, diagnostics) = walk(&data, 1);
	let entries = entries.expect("walk");

	assert!(diagnostics.is_empty(), "{diagnostics:?}");
	assert_eq!(entries.len(), 2);
	assert!(entries[0].counted);
	assert!(!entries[1].counted);
	let SceneryRecord::AttachedObject(attached) = &entries[1].record else {
		panic!("expected attached object");
	};
	assert_eq!(attached.attached_to, Some(0));
	assert_eq!(entries[1].range.end(), data.len());
}

#[test]
fn attachment_link_resets_after_other_records() {
	let beacon = scenery_record(0x11, &Placement::fsx(2), &[2, 1, 0, 0]);
	let data = [library(&Placement::fsx(1), 0x0b), beacon, attached_object(&AttachSpec::beacon(true, "x"))].concat();
	let (entries, _) = walk(&data, 2);
	let entries = entries.expect("walk");
	let SceneryRecord::AttachedObject(attached) = &entries[2].record else {
		panic!("expected attached object");
	};
	assert_eq!(attached.attached_to, None);
}

#[test]
fn record_ranges_tile_the_subsection() {
	let data = [
		library(&Placement::fs9(), 0x02),
		scenery_record(0x08, &Placement::fs9(), &[1, 1, 0, 0]),
		attached_object(&AttachSpec::beacon(false, "pt")),
		scenery_record(0x01, &Placement::fs9(), &[9; 10]),
	]
	.concat();
	let (entries, diagnostics) = walk(&data, 3);
	let entries = entries.expect("walk");
	assert!(diagnostics.is_empty(), "{diagnostics:?}");

	let mut at = 0;
	for entry in &entries {
		assert_eq!(entry.range.offset, at);
		at = entry.range.end();
	}
	assert_eq!(at, data.len());
}

#[test]
fn unknown_type_id_is_skipped_by_length_and_counted() {
	let unknown = ByteWriter::new().u16(0x33).u16(8).u32(0xdead_beef).finish();
	let data = [unknown, library(&Placement::fs9(), 0x02)].concat();
	let (entries, diagnostics) = walk(&data, 2);
	let entries = entries.expect("walk");

	assert!(diagnostics.is_empty(), "{diagnostics:?}");
	assert_eq!(
		entries[0].record,
		SceneryRecord::Unknown {
			type_id: 0x33,
			raw: ByteRange::new(0, 8),
		}
	);
	assert!(matches!(entries[1].record, SceneryRecord::LibraryObject(_)));
}

#[test]
fn overlong_declared_length_stops_the_subsection() {
	let bad = scenery_record_sized(0x02, 0x7fff, &Placement::fs9(), &[0; 20]);
	let data = [library(&Placement::fs9(), 0x02), bad].concat();
	let (entries, diagnostics) = walk(&data, 2);
	let entries = entries.expect("walk");

	assert_eq!(entries.len(), 1);
	assert!(matches!(diagnostics[0], DecodeError::InvalidLength { at: 48, declared: 0x7fff, .. }));
	assert!(matches!(diagnostics[1], DecodeError::CountMismatch { declared: 2, walked: 1, .. }));
}

#[test]
fn short_body_is_malformed_and_walk_continues() {
	let short = scenery_record(0x11, &Placement::fsx(3), &[2]);
	let data = [short, library(&Placement::fsx(1), 0x0b)].concat();
	let (entries, diagnostics) = walk(&data, 2);
	let entries = entries.expect("walk");

	assert_eq!(entries.len(), 1);
	assert!(matches!(entries[0].record, SceneryRecord::LibraryObject(_)));
	assert_eq!(diagnostics.len(), 1);
	assert!(matches!(diagnostics[0], DecodeError::MalformedRecord { at: 0, type_id: 0x11, .. }));
}

#[test]
fn trailing_partial_header_is_fatal() {
	let data = [library(&Placement::fs9(), 0x02), vec![0x02, 0x00]].concat();
	let (entries, _) = walk(&data, 1);
	assert!(matches!(entries, Err(DecodeError::TruncatedHeader { at: 48, need: 4, rem: 2 })));
}

#[test]
fn count_mismatch_is_reported_and_can_be_disabled() {
	let data = library(&Placement::fs9(), 0x02);
	let (_, diagnostics) = walk(&data, 3);
	assert!(matches!(diagnostics[..], [DecodeError::CountMismatch { at: 0, declared: 3, walked: 1 }]));

	let options = BglOptions {
		check_declared_counts: false,
		..BglOptions::default()
	};
	let (_, diagnostics) = walk_with(&data, 3, &options);
	assert!(diagnostics.is_empty());
}

#[test]
fn record_cap_stops_the_walk() {
	let data = [library(&Placement::fs9(), 0x02), library(&Placement::fs9(), 0x02), library(&Placement::fs9(), 0x02)].concat();
	let options = BglOptions {
		max_records_per_subsection: 2,
		check_declared_counts: false,
	};
	let (entries, diagnostics) = walk_with(&data, 3, &options);
	assert_eq!(entries.expect("walk").len(), 2);
	assert!(matches!(diagnostics[..], [DecodeError::UnsupportedVariant { at: 96, .. }]));
}
