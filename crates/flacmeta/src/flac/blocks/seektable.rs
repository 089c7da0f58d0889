use std::io::Read;

use super::FlacMetablockDecode;
use crate::flac::errors::FlacDecodeError;

/// One point in a seek table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlacSeekpoint {
	/// The first sample in the target frame,
	/// or `u64::MAX` for a placeholder point.
	pub sample_number: u64,

	/// Offset, in bytes, from the first byte of the first frame header
	/// to the first byte of the target frame's header.
	pub stream_offset: u64,

	/// Number of samples in the target frame
	pub frame_samples: u16,
}

impl FlacSeekpoint {
	/// The size of one encoded seek point
	pub const SIZE: usize = 18;

	/// Is this a placeholder point?
	pub fn is_placeholder(&self) -> bool {
		self.sample_number == u64::MAX
	}
}

/// A seektable block in a flac file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlacSeektableBlock {
	/// Seek points, in the order they appear in the file.
	/// Placeholder points are included.
	pub points: Vec<FlacSeekpoint>,
}

impl FlacMetablockDecode for FlacSeektableBlock {
	fn decode<R: Read>(read: &mut R) -> Result<Self, FlacDecodeError> {
		let mut data = Vec::new();
		read.read_to_end(&mut data)?;

		let chunks = data.chunks_exact(FlacSeekpoint::SIZE);
		if !chunks.remainder().is_empty() {
			return Err(FlacDecodeError::MalformedBlock);
		}

		let points = chunks
			.map(|c| {
				let mut sample_number = [0u8; 8];
				let mut stream_offset = [0u8; 8];
				let mut frame_samples = [0u8; 2];
				sample_number.copy_from_slice(&c[0..8]);
				stream_offset.copy_from_slice(&c[8..16]);
				frame_samples.copy_from_slice(&c[16..18]);

				FlacSeekpoint {
					sample_number: u64::from_be_bytes(sample_number),
					stream_offset: u64::from_be_bytes(stream_offset),
					frame_samples: u16::from_be_bytes(frame_samples),
				}
			})
			.collect();

		Ok(Self { points })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn point(sample: u64, offset: u64, samples: u16) -> Vec<u8> {
		let mut v = Vec::new();
		v.extend(sample.to_be_bytes());
		v.extend(offset.to_be_bytes());
		v.extend(samples.to_be_bytes());
		v
	}

	#[test]
	fn decode_points() {
		let mut data = point(0, 0, 4096);
		data.extend(point(441_000, 123_456, 4096));
		data.extend(point(u64::MAX, 0, 0));

		let t = FlacSeektableBlock::decode(&mut &data[..]).unwrap();
		assert_eq!(t.points.len(), 3);
		assert_eq!(t.points[1].sample_number, 441_000);
		assert_eq!(t.points[1].stream_offset, 123_456);
		assert_eq!(t.points[1].frame_samples, 4096);
		assert!(!t.points[0].is_placeholder());
		assert!(t.points[2].is_placeholder());
	}

	#[test]
	fn partial_point() {
		let mut data = point(0, 0, 4096);
		data.extend([0u8; 5]);
		let e = FlacSeektableBlock::decode(&mut &data[..]).unwrap_err();
		assert!(matches!(e, FlacDecodeError::MalformedBlock));
	}
}
