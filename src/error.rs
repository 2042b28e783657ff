use serde::Serialize;
use thiserror::Error;

use crate::FourCc;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while decoding BGL and MDL containers.
///
/// `OutOfBounds`, `TruncatedHeader` and the container-identification variants
/// abort the current file and are returned as `Err`. Every other variant is
/// recovered locally and lands in the decoded file's `diagnostics` list.
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum DecodeError {
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	OutOfBounds {
		/// Absolute offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Fewer bytes remained than the record or chunk header width.
	#[error("truncated header at offset {at}, need {need} bytes, remaining {rem}")]
	TruncatedHeader {
		/// Absolute offset of the header.
		at: usize,
		/// Header width in bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Declared length exceeds the enclosing range or is shorter than its own header.
	#[error("declared length {declared} at offset {at} does not fit remaining {rem}")]
	InvalidLength {
		/// Absolute offset of the owning header.
		at: usize,
		/// Declared length.
		declared: u64,
		/// Bytes available in the enclosing range.
		rem: usize,
	},
	/// Fixed-layout read overran the record's own declared length.
	#[error("malformed record 0x{type_id:04x} at offset {at}: {detail}")]
	MalformedRecord {
		/// Absolute offset of the record header.
		at: usize,
		/// Record type id.
		type_id: u16,
		/// Inner failure description.
		detail: Box<str>,
	},
	/// Chunk appears under a parent the legality table does not allow.
	#[error("illegal nesting at offset {at}: {tag} under {parent}")]
	IllegalNesting {
		/// Absolute offset of the chunk header.
		at: usize,
		/// Offending chunk tag.
		tag: FourCc,
		/// Parent chunk tag.
		parent: FourCc,
	},
	/// Known structure whose layout is not decoded; kept as an opaque placeholder.
	#[error("unsupported variant at offset {at}: {what}")]
	UnsupportedVariant {
		/// Absolute offset of the structure.
		at: usize,
		/// Short description of the variant.
		what: Box<str>,
	},
	/// Declared record count disagrees with the counted records walked.
	#[error("subsection at offset {at} declares {declared} records, walked {walked}")]
	CountMismatch {
		/// Absolute offset of the subsection data.
		at: usize,
		/// Count from the subsection header.
		declared: u32,
		/// Counted records actually present.
		walked: u32,
	},
	/// Chunk nesting exceeded the configured depth.
	#[error("chunk depth exceeded at offset {at} (max={max_depth})")]
	DepthExceeded {
		/// Absolute offset of the chunk header.
		at: usize,
		/// Configured depth ceiling.
		max_depth: usize,
	},
	/// A magic number did not match its expected value.
	#[error("bad magic at offset {at}: expected 0x{expected:08x}, got 0x{got:08x}")]
	BadMagic {
		/// Absolute offset of the magic number.
		at: usize,
		/// Expected value.
		expected: u32,
		/// Value found.
		got: u32,
	},
	/// MDL buffer does not start with a RIFF chunk.
	#[error("not a RIFF container (tag={got})")]
	NotRiff {
		/// Leading tag found.
		got: FourCc,
	},
	/// Leading bytes match neither BGL nor MDL.
	#[error("unrecognized container (magic={magic:?})")]
	UnrecognizedContainer {
		/// First up-to-4 bytes of the buffer.
		magic: [u8; 4],
	},
}

impl DecodeError {
	/// Absolute byte offset the error refers to.
	pub fn offset(&self) -> usize {
		match self {
			Self::OutOfBounds { at, .. }
			| Self::TruncatedHeader { at, .. }
			| Self::InvalidLength { at, .. }
			| Self::MalformedRecord { at, .. }
			| Self::IllegalNesting { at, .. }
			| Self::UnsupportedVariant { at, .. }
			| Self::CountMismatch { at, .. }
			| Self::DepthExceeded { at, .. }
			| Self::BadMagic { at, .. } => *at,
			Self::NotRiff { .. } | Self::UnrecognizedContainer { .. } => 0,
		}
	}

	/// True for record/chunk-level errors that decoding skips past.
	pub fn is_recoverable(&self) -> bool {
		matches!(
			self,
			Self::InvalidLength { .. }
				| Self::MalformedRecord { .. }
				| Self::IllegalNesting { .. }
				| Self::UnsupportedVariant { .. }
				| Self::CountMismatch { .. }
				| Self::DepthExceeded { .. }
		)
	}
}

/// Append a recovered error to a diagnostics list.
pub(crate) fn record(diagnostics: &mut Vec<DecodeError>, err: DecodeError) {
	tracing::warn!(offset = err.offset(), error = %err, "recovered decode error");
	diagnostics.push(err);
}
