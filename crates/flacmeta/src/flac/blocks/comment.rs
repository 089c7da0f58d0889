use std::io::Read;

use super::FlacMetablockDecode;
use crate::{common::vorbiscomment::VorbisComment, flac::errors::FlacDecodeError};

/// A vorbis comment metablock in a flac file
#[derive(Debug)]
pub struct FlacCommentBlock {
	/// The vorbis comment stored inside this block
	pub comment: VorbisComment,
}

impl FlacMetablockDecode for FlacCommentBlock {
	fn decode<R: Read>(read: &mut R) -> Result<Self, FlacDecodeError> {
		let comment = VorbisComment::decode(read)?;
		Ok(Self { comment })
	}
}
