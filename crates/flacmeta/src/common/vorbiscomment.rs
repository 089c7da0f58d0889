//! Decode vorbis comment blocks

use base64::Engine;
use smartstring::{LazyCompact, SmartString};
use std::{fmt::Display, io::Read, string::FromUtf8Error};

use crate::flac::blocks::{FlacMetablockDecode, FlacPictureBlock};

use super::tagtype::TagType;

#[derive(Debug)]
#[allow(missing_docs)]
pub enum VorbisCommentDecodeError {
	/// We encountered an IoError while processing a block
	IoError(std::io::Error),

	/// We tried to decode a string, but got invalid data
	FailedStringDecode(FromUtf8Error),

	/// The given comment string has no `=`
	MalformedCommentString(String),

	/// A length field points past the end of the block
	MalformedData,

	/// We tried to decode picture data, but it was malformed.
	MalformedPicture,
}

impl Display for VorbisCommentDecodeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::IoError(_) => write!(f, "io error while reading vorbis comments"),
			Self::FailedStringDecode(_) => {
				write!(f, "string decode error while reading vorbis comments")
			}
			Self::MalformedCommentString(x) => {
				write!(f, "malformed comment string `{x}`")
			}
			Self::MalformedData => {
				write!(f, "malformed comment data")
			}
			Self::MalformedPicture => {
				write!(f, "malformed picture data")
			}
		}
	}
}

impl std::error::Error for VorbisCommentDecodeError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::IoError(x) => Some(x),
			Self::FailedStringDecode(x) => Some(x),
			_ => None,
		}
	}
}

impl From<std::io::Error> for VorbisCommentDecodeError {
	fn from(value: std::io::Error) -> Self {
		Self::IoError(value)
	}
}

impl From<FromUtf8Error> for VorbisCommentDecodeError {
	fn from(value: FromUtf8Error) -> Self {
		Self::FailedStringDecode(value)
	}
}

/// A decoded vorbis comment block
#[derive(Debug)]
pub struct VorbisComment {
	/// This comment's vendor string
	pub vendor: SmartString<LazyCompact>,

	/// List of (tag, value).
	/// Repeated tags are allowed!
	pub comments: Vec<(TagType, SmartString<LazyCompact>)>,

	/// Pictures stored as `METADATA_BLOCK_PICTURE` comments
	pub pictures: Vec<FlacPictureBlock>,
}

/// Read a little-endian u32 length, then that many bytes.
///
/// Lengths are untrusted, so we never allocate more than
/// the reader can actually produce.
fn read_le_string<R: Read>(read: &mut R) -> Result<String, VorbisCommentDecodeError> {
	let mut block = [0u8; 4];
	read.read_exact(&mut block)?;
	let length = u64::from(u32::from_le_bytes(block));

	let mut text = Vec::new();
	let n = read.by_ref().take(length).read_to_end(&mut text)?;
	if u64::try_from(n).ok() != Some(length) {
		return Err(VorbisCommentDecodeError::MalformedData);
	}

	Ok(String::from_utf8(text)?)
}

impl VorbisComment {
	/// Try to decode a vorbis comment from the given reader.
	/// Stops reading right after the last comment.
	pub fn decode<R: Read>(read: &mut R) -> Result<Self, VorbisCommentDecodeError> {
		let vendor = read_le_string(read)?;

		let mut block = [0u8; 4];
		read.read_exact(&mut block)?;
		let n_comments = u32::from_le_bytes(block);

		let mut comments = Vec::new();
		let mut pictures = Vec::new();
		for _ in 0..n_comments {
			let comment = read_le_string(read)?;
			let (var, val) =
				comment
					.split_once('=')
					.ok_or(VorbisCommentDecodeError::MalformedCommentString(
						comment.clone(),
					))?;

			// Empty values carry no information
			if val.is_empty() {
				continue;
			}

			if var.eq_ignore_ascii_case("METADATA_BLOCK_PICTURE") {
				#[expect(clippy::map_err_ignore)]
				let data = base64::prelude::BASE64_STANDARD
					.decode(val)
					.map_err(|_| VorbisCommentDecodeError::MalformedPicture)?;

				#[expect(clippy::map_err_ignore)]
				pictures.push(
					FlacPictureBlock::decode(&mut &data[..])
						.map_err(|_| VorbisCommentDecodeError::MalformedPicture)?,
				);
			} else {
				comments.push((TagType::from_vorbis_key(var), val.into()));
			}
		}

		Ok(Self {
			vendor: vendor.into(),
			comments,
			pictures,
		})
	}

	/// Get the first value of the given tag, if there is one
	pub fn get_tag(&self, tag: &TagType) -> Option<&str> {
		self.comments
			.iter()
			.find(|(t, _)| t == tag)
			.map(|(_, v)| v.as_str())
	}

	/// Get every value of the given tag, in order
	pub fn get_tags<'a>(&'a self, tag: &'a TagType) -> impl Iterator<Item = &'a str> + 'a {
		self.comments
			.iter()
			.filter(move |(t, _)| t == tag)
			.map(|(_, v)| v.as_str())
	}
}
