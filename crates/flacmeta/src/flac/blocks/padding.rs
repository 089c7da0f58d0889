use std::io::Read;

use super::FlacMetablockDecode;
use crate::flac::errors::FlacDecodeError;

/// A padding block in a FLAC file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlacPaddingBlock {
	/// The length of this padding, in bytes.
	pub size: u32,
}

impl FlacMetablockDecode for FlacPaddingBlock {
	/// Make sure this padding is all zeros.
	/// Padding can be large, so we don't keep it in memory.
	fn decode<R: Read>(read: &mut R) -> Result<Self, FlacDecodeError> {
		let mut buf = [0u8; 4096];
		let mut size = 0u32;

		loop {
			let n = match read.read(&mut buf) {
				Ok(0) => break,
				Ok(n) => n,
				Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
				Err(e) => return Err(e.into()),
			};

			if buf[..n].iter().any(|x| *x != 0u8) {
				return Err(FlacDecodeError::MalformedBlock);
			}

			size = u32::try_from(n)
				.ok()
				.and_then(|n| size.checked_add(n))
				.ok_or(FlacDecodeError::MalformedBlock)?;
		}

		Ok(Self { size })
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn zeros() {
		let data = vec![0u8; 10_000];
		let p = FlacPaddingBlock::decode(&mut &data[..]).unwrap();
		assert_eq!(p.size, 10_000);
	}

	#[test]
	fn empty() {
		let p = FlacPaddingBlock::decode(&mut &[][..]).unwrap();
		assert_eq!(p.size, 0);
	}

	#[test]
	fn nonzero_byte() {
		let mut data = vec![0u8; 5000];
		data[4500] = 1;
		let e = FlacPaddingBlock::decode(&mut &data[..]).unwrap_err();
		assert!(matches!(e, FlacDecodeError::MalformedBlock));
	}
}
