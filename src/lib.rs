//! Decoder for flight simulator BGL scenery containers and MDL (RIFF) model containers.
//!
//! Decoding runs over an already-loaded, immutable buffer. Structural failures abort the
//! file with an `Err`; record and chunk level problems are skipped and collected in the
//! decoded file's `diagnostics` list.

/// BGL scenery container parsing: header, sections, subsections and record streams.
pub mod bgl;
/// MDL RIFF chunk tree parsing and model metadata extraction.
pub mod mdl;

mod bytes;
mod chunk;
mod detect;
mod error;
mod fourcc;
mod range;

/// Bounded byte cursor used by every reader.
pub use bytes::Cursor;
/// BGL record header and RIFF chunk header decoders.
pub use chunk::{ChunkHeader, RecordHeader};
/// Format sniffing entry point.
pub use detect::{Decoded, decode};
/// Error and result aliases.
pub use error::{DecodeError, Result};
/// Four-character RIFF tags.
pub use fourcc::FourCc;
/// Borrow-free byte ranges into the source buffer.
pub use range::ByteRange;
