//! FLAC errors
use crate::common::{picturetype::PictureTypeError, vorbiscomment::VorbisCommentDecodeError};
use std::string::FromUtf8Error;
use thiserror::Error;

#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum FlacDecodeError {
	/// FLAC does not start with 0x66 0x4C 0x61 0x43
	#[error("flac signature is missing or malformed")]
	BadMagicBytes,

	/// The first metablock isn't StreamInfo
	#[error("first metablock isn't streaminfo")]
	BadFirstBlock,

	/// We got an invalid metadata block type.
	/// This is only ever 127, which could be confused with a frame sync code.
	#[error("invalid flac metablock type {0}")]
	BadMetablockType(u8),

	/// We encountered an i/o error while processing.
	/// This includes reads cut off by the end of a block body.
	#[error("io error while reading flac")]
	IoError(#[from] std::io::Error),

	/// We could not parse a vorbis comment
	#[error("error while decoding vorbis comment")]
	VorbisComment(#[from] VorbisCommentDecodeError),

	/// We tried to decode a string, but found invalid UTF-8
	#[error("error while decoding string")]
	FailedStringDecode(#[from] FromUtf8Error),

	/// A block body is malformed
	#[error("malformed flac block")]
	MalformedBlock,

	/// We tried to decode a bad picture type
	#[error("bad picture type")]
	PictureTypeError(#[from] PictureTypeError),

	/// We tried to read past the last metadata block,
	/// or kept reading after an error.
	#[error("flac metadata reader is already finished")]
	AlreadyFinished,
}
