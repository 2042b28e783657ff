use std::fmt;

use serde::{Serialize, Serializer};

/// Four-character chunk tag such as `RIFF` or `MDLD`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FourCc(pub [u8; 4]);

impl FourCc {
	/// Build a tag from its four bytes.
	pub const fn new(bytes: &[u8; 4]) -> Self {
		Self(*bytes)
	}

	/// Raw tag bytes.
	pub fn as_bytes(&self) -> &[u8; 4] {
		&self.0
	}
}

impl fmt::Display for FourCc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for byte in self.0 {
			if byte.is_ascii_graphic() || byte == b' ' {
				write!(f, "{}", byte as char)?;
			} else {
				write!(f, "\\x{byte:02x}")?;
			}
		}
		Ok(())
	}
}

impl fmt::Debug for FourCc {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "FourCc({self})")
	}
}

impl Serialize for FourCc {
	fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}
