use std::{fmt::Debug, io::Read};

use super::FlacMetablockDecode;
use crate::flac::errors::FlacDecodeError;

/// An application block in a flac file
#[derive(Clone, PartialEq, Eq)]
pub struct FlacApplicationBlock {
	/// Registered application ID
	pub application_id: u32,

	/// The application data
	pub data: Vec<u8>,
}

impl Debug for FlacApplicationBlock {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FlacApplicationBlock")
			.field("application_id", &self.application_id)
			.field("data_len", &self.data.len())
			.finish()
	}
}

impl FlacMetablockDecode for FlacApplicationBlock {
	fn decode<R: Read>(read: &mut R) -> Result<Self, FlacDecodeError> {
		let mut block = [0u8; 4];
		read.read_exact(&mut block)?;
		let application_id = u32::from_be_bytes(block);

		let mut data = Vec::new();
		read.read_to_end(&mut data)?;

		Ok(Self {
			application_id,
			data,
		})
	}
}
