use serde::Serialize;

use crate::bgl::{BglFile, BglHeader};
use crate::mdl::{MdlFile, tag};
use crate::{DecodeError, Result};

/// A decoded file of either container kind.
#[derive(Debug, Clone, Serialize)]
pub enum Decoded<'a> {
	/// A BGL scenery file.
	Bgl(BglFile<'a>),
	/// An MDL model file.
	Mdl(MdlFile<'a>),
}

impl Decoded<'_> {
	/// Recovered diagnostics of the decoded file.
	pub fn diagnostics(&self) -> &[DecodeError] {
		match self {
			Self::Bgl(file) => &file.diagnostics,
			Self::Mdl(file) => &file.diagnostics,
		}
	}
}

/// Decode `bytes` as BGL or MDL, chosen by the leading magic.
pub fn decode(bytes: &[u8]) -> Result<Decoded<'_>> {
	let mut magic = [0_u8; 4];
	let len = bytes.len().min(4);
	magic[..len].copy_from_slice(&bytes[..len]);

	if magic == *tag::RIFF.as_bytes() {
		return MdlFile::parse(bytes).map(Decoded::Mdl);
	}
	if u32::from_le_bytes(magic) == BglHeader::MAGIC {
		return BglFile::parse(bytes).map(Decoded::Bgl);
	}
	Err(DecodeError::UnrecognizedContainer { magic })
}
