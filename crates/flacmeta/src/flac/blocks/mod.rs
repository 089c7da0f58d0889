//! Decoders for every flac metadata block body

mod header;
pub use header::{FlacDecodedHeader, FlacMetablockHeader};

mod streaminfo;
pub use streaminfo::FlacStreaminfoBlock;

mod picture;
pub use picture::FlacPictureBlock;

mod padding;
pub use padding::FlacPaddingBlock;

mod application;
pub use application::FlacApplicationBlock;

mod seektable;
pub use seektable::{FlacSeekpoint, FlacSeektableBlock};

mod cuesheet;
pub use cuesheet::FlacCuesheetBlock;

mod comment;
pub use comment::FlacCommentBlock;

use super::errors::FlacDecodeError;
use std::io::Read;

/// A decode implementation for a
/// flac metadata block body.
pub trait FlacMetablockDecode: Sized {
	/// Try to decode this block's body.
	///
	/// `read` starts at the first body byte (NOT the metablock header)
	/// and yields no more than the body's declared length.
	/// Implementations may stop before the end of the body.
	fn decode<R: Read>(read: &mut R) -> Result<Self, FlacDecodeError>;
}
