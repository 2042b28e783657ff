pub mod tag;

mod file;
mod header;
mod parse;
mod tree;

/// File entry point and texture name width.
pub use file::{MdlFile, TEXTURE_NAME_WIDTH};
/// Model identity fields.
pub use header::{BoundingBox, MdlHeader, MdlVariant};
/// Parse options.
pub use parse::MdlOptions;
/// Arena chunk tree.
pub use tree::{ChunkNode, ChunkTree, NodeId};
