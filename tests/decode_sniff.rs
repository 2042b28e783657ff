#![allow(missing_docs)]

use std::thread;

use fsdecode::bgl::{BglFile, SceneryRecord};
use fsdecode::mdl::MdlFile;
use fsdecode::{DecodeError, Decoded, decode};
use fsdecode_testkit::{BglBuilder, Placement, SubsectionSpec, chunk, container, guid_bytes, riff, scenery_record};
use serde_json::Value;

fn beacon_bgl(kind: u8) -> Vec<u8> {
	BglBuilder::new()
		.timestamp(1_700_000_000)
		.section(
			BglBuilder::SCENERY_OBJECT,
			vec![SubsectionSpec::new(1, scenery_record(0x11, &Placement::fsx(0x10), &[kind, 1, 0, 0]))],
		)
		.build()
}

fn small_mdl() -> Vec<u8> {
	riff(b"MDLX", &[chunk(b"MDLN", b"pole\0"), container(b"MDLD", &[chunk(b"VERT", &[0; 4])])])
}

#[test]
fn leading_magic_selects_the_decoder() {
	let bgl = beacon_bgl(1);
	assert!(matches!(decode(&bgl), Ok(Decoded::Bgl(_))));

	let mdl = small_mdl();
	let decoded = decode(&mdl).expect("mdl");
	assert!(matches!(decoded, Decoded::Mdl(_)));
	assert_eq!(decoded.diagnostics().len(), 1);

	assert_eq!(decode(b"PK\x03\x04rest").err(), Some(DecodeError::UnrecognizedContainer { magic: *b"PK\x03\x04" }));
	assert_eq!(decode(b"RI").err(), Some(DecodeError::UnrecognizedContainer { magic: *b"RI\0\0" }));
}

#[test]
fn decoded_bgl_serializes_without_source_bytes() {
	let bytes = beacon_bgl(3);
	let file = BglFile::parse(&bytes).expect("parse");
	let json: Value = serde_json::to_value(&file).expect("serialize");

	assert!(json.get("bytes").is_none());
	assert_eq!(json["header"]["timestamp"], 1_700_000_000_u64);
	assert_eq!(json["sections"][0]["entry"]["section_type"], "SceneryObject");

	let record = &json["sections"][0]["subsections"][0]["body"]["Scenery"][0];
	assert_eq!(record["counted"], true);
	let beacon = &record["record"]["Beacon"];
	assert_eq!(beacon["header"]["version"], "Fsx");
	assert_eq!(beacon["beacon"]["beacon_type"], 3);
	let expected_id = uuid::Uuid::from_bytes_le(guid_bytes(0x10)).to_string();
	assert_eq!(beacon["header"]["instance_id"], expected_id.as_str());
	assert_eq!(json["diagnostics"], Value::Array(Vec::new()));
}

#[test]
fn decoded_mdl_serializes_tags_as_strings() {
	let bytes = small_mdl();
	let file = MdlFile::parse(&bytes).expect("parse");
	let json: Value = serde_json::to_value(&file).expect("serialize");

	assert_eq!(json["header"]["form"], "MDLX");
	assert_eq!(json["header"]["variant"], "Fsx");
	assert_eq!(json["header"]["name"], "pole");
	assert_eq!(json["tree"]["nodes"][0]["tag"], "RIFF");
	let diagnostic = &json["diagnostics"][0]["IllegalNesting"];
	assert_eq!(diagnostic["tag"], "VERT");
	assert_eq!(diagnostic["parent"], "MDLD");
}

#[test]
fn decoded_files_are_send_and_sync() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<BglFile<'static>>();
	assert_send_sync::<MdlFile<'static>>();
	assert_send_sync::<Decoded<'static>>();
	assert_send_sync::<DecodeError>();
}

#[test]
fn independent_files_decode_in_parallel() {
	let buffers: Vec<Vec<u8>> = (0..8).map(beacon_bgl).collect();
	let kinds: Vec<u8> = thread::scope(|scope| {
		let handles: Vec<_> = buffers
			.iter()
			.map(|bytes| {
				scope.spawn(move || {
					let file = BglFile::parse(bytes).expect("parse");
					match file.scenery_records().next().map(|entry| &entry.record) {
						Some(SceneryRecord::Beacon(beacon)) => beacon.beacon.beacon_type,
						other => panic!("unexpected record {other:?}"),
					}
				})
			})
			.collect();
		handles.into_iter().map(|handle| handle.join().expect("decoder thread")).collect()
	});
	assert_eq!(kinds, (0..8).collect::<Vec<u8>>());
}
