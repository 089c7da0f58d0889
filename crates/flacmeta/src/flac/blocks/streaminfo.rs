use std::io::Read;

use super::FlacMetablockDecode;
use crate::flac::{bitfield::read_fields, errors::FlacDecodeError};

/// A streaminfo block in a flac file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlacStreaminfoBlock {
	/// The minimum block size (in samples) used in the stream.
	pub min_block_size: u32,

	/// The maximum block size (in samples) used in the stream.
	/// (Minimum blocksize == maximum blocksize) implies a fixed-blocksize stream.
	pub max_block_size: u32,

	/// The minimum frame size (in bytes) used in the stream.
	/// May be 0 to imply the value is not known.
	pub min_frame_size: u32,

	/// The maximum frame size (in bytes) used in the stream.
	/// May be 0 to imply the value is not known.
	pub max_frame_size: u32,

	/// Sample rate in Hz.
	pub sample_rate: u32,

	/// Number of channels. FLAC supports from 1 to 8 channels.
	pub channels: u8,

	/// Bits per sample. FLAC supports from 4 to 32.
	pub bits_per_sample: u8,

	/// Total inter-channel samples in the stream.
	/// One second of 44.1Khz audio has 44100 samples regardless of the number of channels.
	/// Zero means we don't know.
	pub total_samples: u64,

	/// MD5 signature of the unencoded audio data.
	pub md5_signature: [u8; 16],
}

impl FlacMetablockDecode for FlacStreaminfoBlock {
	#[expect(clippy::map_err_ignore)]
	fn decode<R: Read>(read: &mut R) -> Result<Self, FlacDecodeError> {
		let [min_block_size, max_block_size, min_frame_size, max_frame_size, sample_rate, channels, bits_per_sample, total_samples] =
			read_fields(read, [16, 16, 24, 24, 20, 3, 5, 36])?;

		let md5_signature = {
			let mut block = [0u8; 16];
			read.read_exact(&mut block)?;
			block
		};

		// Field widths guarantee none of these conversions fail
		let narrow = |x: u64| u32::try_from(x).map_err(|_| FlacDecodeError::MalformedBlock);

		Ok(Self {
			min_block_size: narrow(min_block_size)?,
			max_block_size: narrow(max_block_size)?,
			min_frame_size: narrow(min_frame_size)?,
			max_frame_size: narrow(max_frame_size)?,
			sample_rate: narrow(sample_rate)?,
			channels: u8::try_from(channels + 1).map_err(|_| FlacDecodeError::MalformedBlock)?,
			bits_per_sample: u8::try_from(bits_per_sample + 1)
				.map_err(|_| FlacDecodeError::MalformedBlock)?,
			total_samples,
			md5_signature,
		})
	}
}
