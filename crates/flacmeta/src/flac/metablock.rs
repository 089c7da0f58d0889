//! The life of a single metadata block.
//!
//! Opening a [`FlacMetablock`] decodes its header and leaves the source at
//! the first body byte. The block must then be resolved exactly once, by
//! [`FlacMetablock::parse`] or [`FlacMetablock::skip`]. Both consume the block
//! and leave the source at the first byte of the next header.

use std::io::Read;

use super::{
	blocks::{
		FlacApplicationBlock, FlacCommentBlock, FlacCuesheetBlock, FlacMetablockDecode,
		FlacMetablockHeader, FlacPaddingBlock, FlacPictureBlock, FlacSeektableBlock,
		FlacStreaminfoBlock,
	},
	errors::FlacDecodeError,
	metablocktype::{FlacHeaderNotice, FlacMetablockType},
	source::FlacSource,
};

/// A decoded metadata block body
#[derive(Debug)]
#[allow(missing_docs)]
pub enum FlacBlock {
	Streaminfo(FlacStreaminfoBlock),
	Padding(FlacPaddingBlock),
	Application(FlacApplicationBlock),
	Seektable(FlacSeektableBlock),
	VorbisComment(FlacCommentBlock),
	Cuesheet(FlacCuesheetBlock),
	Picture(FlacPictureBlock),
}

impl FlacBlock {
	/// The type of this block
	pub fn block_type(&self) -> FlacMetablockType {
		match self {
			Self::Streaminfo(_) => FlacMetablockType::Streaminfo,
			Self::Padding(_) => FlacMetablockType::Padding,
			Self::Application(_) => FlacMetablockType::Application,
			Self::Seektable(_) => FlacMetablockType::Seektable,
			Self::VorbisComment(_) => FlacMetablockType::VorbisComment,
			Self::Cuesheet(_) => FlacMetablockType::Cuesheet,
			Self::Picture(_) => FlacMetablockType::Picture,
		}
	}
}

/// What we did with a block's body
#[derive(Debug)]
pub enum FlacBlockBody {
	/// We decoded this body
	Parsed(FlacBlock),

	/// This block has a reserved type. This is its body, untouched.
	Raw(Vec<u8>),

	/// We skipped this body
	Skipped,
}

/// How to resolve a block's body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlacResolveMode {
	/// Decode the body
	Parse,

	/// Advance past the body without reading it into memory
	Skip,
}

/// A metadata block with a resolved body
#[derive(Debug)]
pub struct FlacResolvedBlock {
	/// This block's header
	pub header: FlacMetablockHeader,

	/// This block's body
	pub body: FlacBlockBody,
}

/// A metadata block whose header we've read, but whose body we haven't.
///
/// This holds the source until it is resolved, so nothing else
/// can move the cursor in the meantime.
pub struct FlacMetablock<'a, S: FlacSource> {
	header: FlacMetablockHeader,
	notice: Option<FlacHeaderNotice>,
	source: &'a mut S,
}

impl<'a, S: FlacSource> FlacMetablock<'a, S> {
	/// Read a block header from `source`.
	/// This reads exactly four bytes.
	pub fn open(source: &'a mut S) -> Result<Self, FlacDecodeError> {
		let decoded = FlacMetablockHeader::decode(source)?;
		Ok(Self {
			header: decoded.header,
			notice: decoded.notice,
			source,
		})
	}

	/// This block's header
	pub fn header(&self) -> &FlacMetablockHeader {
		&self.header
	}

	/// Anything odd we noticed while decoding this block's header
	pub fn notice(&self) -> Option<FlacHeaderNotice> {
		self.notice
	}

	/// Decode this block's body
	pub fn parse(self) -> Result<FlacResolvedBlock, FlacDecodeError> {
		self.resolve(FlacResolveMode::Parse)
	}

	/// Advance past this block's body
	pub fn skip(self) -> Result<FlacResolvedBlock, FlacDecodeError> {
		self.resolve(FlacResolveMode::Skip)
	}

	/// Parse or skip this block's body
	pub fn resolve(self, mode: FlacResolveMode) -> Result<FlacResolvedBlock, FlacDecodeError> {
		let body = resolve_body(&self.header, self.source, mode)?;
		Ok(FlacResolvedBlock {
			header: self.header,
			body,
		})
	}
}

/// Open a block and parse its body
pub fn parse_block<S: FlacSource>(source: &mut S) -> Result<FlacResolvedBlock, FlacDecodeError> {
	FlacMetablock::open(source)?.parse()
}

/// Resolve the body described by `header`.
/// `source` must be at the first byte of that body.
///
/// On success, `source` is left at the first byte after the body.
/// On failure, `source`'s position is unspecified.
fn resolve_body<S: FlacSource>(
	header: &FlacMetablockHeader,
	source: &mut S,
	mode: FlacResolveMode,
) -> Result<FlacBlockBody, FlacDecodeError> {
	let length = u64::from(header.length());

	match mode {
		FlacResolveMode::Skip => {
			source.skip_bytes(length)?;
			return Ok(FlacBlockBody::Skipped);
		}

		FlacResolveMode::Parse => {
			// Decoders never see bytes past the end of this body
			let mut body = source.by_ref().take(length);
			let out = decode_body(header.block_type(), &mut body)?;

			// Decoders may stop early. Skip whatever they didn't read.
			let rest = body.limit();
			if rest != 0 {
				source.skip_bytes(rest)?;
			}

			return Ok(out);
		}
	}
}

fn decode_body<R: Read>(
	block_type: FlacMetablockType,
	read: &mut R,
) -> Result<FlacBlockBody, FlacDecodeError> {
	Ok(match block_type {
		FlacMetablockType::Streaminfo => {
			FlacBlockBody::Parsed(FlacBlock::Streaminfo(FlacStreaminfoBlock::decode(read)?))
		}
		FlacMetablockType::Padding => {
			FlacBlockBody::Parsed(FlacBlock::Padding(FlacPaddingBlock::decode(read)?))
		}
		FlacMetablockType::Application => {
			FlacBlockBody::Parsed(FlacBlock::Application(FlacApplicationBlock::decode(read)?))
		}
		FlacMetablockType::Seektable => {
			FlacBlockBody::Parsed(FlacBlock::Seektable(FlacSeektableBlock::decode(read)?))
		}
		FlacMetablockType::VorbisComment => {
			FlacBlockBody::Parsed(FlacBlock::VorbisComment(FlacCommentBlock::decode(read)?))
		}
		FlacMetablockType::Cuesheet => {
			FlacBlockBody::Parsed(FlacBlock::Cuesheet(FlacCuesheetBlock::decode(read)?))
		}
		FlacMetablockType::Picture => {
			FlacBlockBody::Parsed(FlacBlock::Picture(FlacPictureBlock::decode(read)?))
		}
		FlacMetablockType::Reserved => {
			let mut data = Vec::new();
			read.read_to_end(&mut data)?;
			FlacBlockBody::Raw(data)
		}
	})
}
