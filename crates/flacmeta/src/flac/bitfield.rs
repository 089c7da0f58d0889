//! Read packed, non-byte-aligned integer fields.

use bitstream_io::{BigEndian, BitRead, BitReader};
use std::io::{Error, ErrorKind, Read};

/// The widest field we can read
pub const MAX_FIELD_WIDTH: u32 = u64::BITS;

/// Read one unsigned integer for each width in `widths`, in order.
///
/// Fields are packed MSB-first and may span byte boundaries.
/// If the widths don't add up to a multiple of eight, the unused
/// low bits of the last byte are consumed and discarded.
///
/// Fails with [`ErrorKind::UnexpectedEof`] if `read` ends before every field
/// is available, and with [`ErrorKind::InvalidInput`] if any width is wider
/// than [`MAX_FIELD_WIDTH`].
pub fn read_fields<R, const N: usize>(read: &mut R, widths: [u32; N]) -> std::io::Result<[u64; N]>
where
	R: Read,
{
	if let Some(w) = widths.iter().find(|w| **w > MAX_FIELD_WIDTH) {
		return Err(Error::new(
			ErrorKind::InvalidInput,
			format!("cannot read a {w}-bit field into a u64"),
		));
	}

	let mut bits = BitReader::endian(read, BigEndian);
	let mut out = [0u64; N];
	for (field, width) in out.iter_mut().zip(widths) {
		if width != 0 {
			*field = bits.read_var::<u64>(width)?;
		}
	}

	return Ok(out);
}
