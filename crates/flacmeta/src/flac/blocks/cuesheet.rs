use std::{fmt::Debug, io::Read};

use super::FlacMetablockDecode;
use crate::flac::errors::FlacDecodeError;

/// A cuesheet block in a flac file.
/// We keep this block's content as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct FlacCuesheetBlock {
	/// The cuesheet, without its header
	pub data: Vec<u8>,
}

impl Debug for FlacCuesheetBlock {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FlacCuesheetBlock")
			.field("data_len", &self.data.len())
			.finish()
	}
}

impl FlacMetablockDecode for FlacCuesheetBlock {
	fn decode<R: Read>(read: &mut R) -> Result<Self, FlacDecodeError> {
		let mut data = Vec::new();
		read.read_to_end(&mut data)?;
		Ok(Self { data })
	}
}
