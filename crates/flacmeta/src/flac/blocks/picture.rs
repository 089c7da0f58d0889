use std::{fmt::Debug, io::Read};

use super::FlacMetablockDecode;
use crate::{
	common::{mime::MimeType, picturetype::PictureType},
	flac::errors::FlacDecodeError,
};

/// A picture metablock in a flac file
#[derive(Clone, PartialEq, Eq)]
pub struct FlacPictureBlock {
	/// The type of this picture
	pub picture_type: PictureType,

	/// The format of this picture
	pub mime: MimeType,

	/// The description of this picture
	pub description: String,

	/// The width of this picture, in px
	pub width: u32,

	/// The height of this picture, in px
	pub height: u32,

	/// The bit depth of this picture
	pub bit_depth: u32,

	/// The color count of this picture (if indexed)
	pub color_count: u32,

	/// The image data
	pub img_data: Vec<u8>,
}

impl Debug for FlacPictureBlock {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FlacPictureBlock")
			.field("type", &self.picture_type)
			.field("mime", &self.mime)
			.field("img_len", &self.img_data.len())
			.finish()
	}
}

fn read_u32<R: Read>(read: &mut R) -> Result<u32, FlacDecodeError> {
	let mut block = [0u8; 4];
	read.read_exact(&mut block)?;
	Ok(u32::from_be_bytes(block))
}

/// Read a big-endian u32 length, then that many bytes.
/// A length that runs past the end of the block is malformed.
fn read_sized<R: Read>(read: &mut R) -> Result<Vec<u8>, FlacDecodeError> {
	let length = u64::from(read_u32(read)?);

	let mut data = Vec::new();
	let n = read.by_ref().take(length).read_to_end(&mut data)?;
	if u64::try_from(n).ok() != Some(length) {
		return Err(FlacDecodeError::MalformedBlock);
	}

	Ok(data)
}

impl FlacMetablockDecode for FlacPictureBlock {
	fn decode<R: Read>(read: &mut R) -> Result<Self, FlacDecodeError> {
		let picture_type = PictureType::try_from(read_u32(read)?)?;
		let mime = MimeType::from(String::from_utf8(read_sized(read)?)?);
		let description = String::from_utf8(read_sized(read)?)?;

		let width = read_u32(read)?;
		let height = read_u32(read)?;
		let bit_depth = read_u32(read)?;

		// Zero for non-indexed images
		let color_count = read_u32(read)?;

		let img_data = read_sized(read)?;

		Ok(Self {
			picture_type,
			mime,
			description,
			width,
			height,
			bit_depth,
			color_count,
			img_data,
		})
	}
}
