//! FLAC metablock headers.
//!
//! A header is exactly four bytes:
//! ```notrust
//! is_last    : 1 bit
//! block_type : 7 bits
//! length     : 24 bits, big-endian
//! ```

use std::io::{Read, Write};

use crate::flac::{
	bitfield::read_fields,
	errors::FlacDecodeError,
	metablocktype::{FlacHeaderNotice, FlacMetablockType},
};

/// The header of a flac metadata block
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FlacMetablockHeader {
	is_last: bool,
	block_type: FlacMetablockType,
	type_code: u8,
	length: u32,
}

/// A header we just decoded, and anything unusual we noticed about it
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FlacDecodedHeader {
	/// The header
	pub header: FlacMetablockHeader,

	/// Set if this header is valid but odd
	pub notice: Option<FlacHeaderNotice>,
}

impl FlacMetablockHeader {
	/// The size of an encoded header, in bytes
	pub const SIZE: u64 = 4;

	/// The largest body length a header can hold
	pub const MAX_LENGTH: u32 = (1 << 24) - 1;

	/// Make a new header for a block type with a known code.
	/// Returns `None` if `length` doesn't fit in 24 bits or
	/// `block_type` is [`FlacMetablockType::Reserved`] (use [`Self::new_reserved`]).
	pub fn new(block_type: FlacMetablockType, length: u32, is_last: bool) -> Option<Self> {
		if length > Self::MAX_LENGTH {
			return None;
		}

		Some(Self {
			is_last,
			block_type,
			type_code: block_type.code()?,
			length,
		})
	}

	/// Make a new header with a reserved type code.
	/// Returns `None` if `type_code` isn't in `7..=126` or `length` doesn't fit in 24 bits.
	pub fn new_reserved(type_code: u8, length: u32, is_last: bool) -> Option<Self> {
		if !(7..=126).contains(&type_code) || length > Self::MAX_LENGTH {
			return None;
		}

		Some(Self {
			is_last,
			block_type: FlacMetablockType::Reserved,
			type_code,
			length,
		})
	}

	/// Read and decode a metablock header from the given reader.
	/// This reads exactly four bytes.
	pub fn decode<R: Read>(read: &mut R) -> Result<FlacDecodedHeader, FlacDecodeError> {
		let [is_last, type_code, length] = read_fields(read, [1, 7, 24])?;

		// Field widths guarantee these conversions succeed
		#[expect(clippy::map_err_ignore)]
		let type_code = u8::try_from(type_code).map_err(|_| FlacDecodeError::MalformedBlock)?;
		#[expect(clippy::map_err_ignore)]
		let length = u32::try_from(length).map_err(|_| FlacDecodeError::MalformedBlock)?;

		let (block_type, notice) = FlacMetablockType::from_code(type_code)?;

		Ok(FlacDecodedHeader {
			header: Self {
				is_last: is_last != 0,
				block_type,
				type_code,
				length,
			},
			notice,
		})
	}

	/// Decode a header we already have in memory
	pub fn from_bytes(bytes: &[u8; 4]) -> Result<FlacDecodedHeader, FlacDecodeError> {
		Self::decode(&mut &bytes[..])
	}

	/// Encode this header as four bytes
	pub fn to_bytes(&self) -> [u8; 4] {
		let mut block_type = self.type_code;
		if self.is_last {
			block_type |= 0b1000_0000;
		};

		let x = self.length.to_be_bytes();
		return [block_type, x[1], x[2], x[3]];
	}

	/// Write this header
	pub fn encode(&self, target: &mut impl Write) -> Result<(), std::io::Error> {
		target.write_all(&self.to_bytes())
	}
}

impl FlacMetablockHeader {
	/// If true, this is the last metadata block
	/// before the audio frames.
	pub fn is_last(&self) -> bool {
		self.is_last
	}

	/// The type of block this is
	pub fn block_type(&self) -> FlacMetablockType {
		self.block_type
	}

	/// The raw 7-bit type code this header was decoded from
	pub fn type_code(&self) -> u8 {
		self.type_code
	}

	/// The length of this block's body, in bytes
	/// (not including this header)
	pub fn length(&self) -> u32 {
		self.length
	}
}
