//! Byte sources that metadata blocks are read from.
//!
//! Skipping a block body is the only operation that cares whether
//! the underlying reader can seek: a [`SeekableSource`] jumps over
//! the body, a [`SequentialSource`] reads and discards it.

use std::io::{Error, ErrorKind, Read, Seek, SeekFrom};

/// A reader that metablocks can be read from
pub trait FlacSource: Read {
	/// Advance exactly `n` bytes without returning them.
	/// Fails with [`ErrorKind::UnexpectedEof`] if fewer than `n` bytes are left.
	fn skip_bytes(&mut self, n: u64) -> std::io::Result<()>;

	/// The number of bytes read or skipped since this source was made
	fn position(&self) -> u64;
}

impl<S: FlacSource + ?Sized> FlacSource for &mut S {
	fn skip_bytes(&mut self, n: u64) -> std::io::Result<()> {
		(**self).skip_bytes(n)
	}

	fn position(&self) -> u64 {
		(**self).position()
	}
}

fn short_skip(wanted: u64) -> Error {
	Error::new(
		ErrorKind::UnexpectedEof,
		format!("stream ended before {wanted} bytes could be skipped"),
	)
}

/// A source backed by a reader that can seek.
/// Skips are O(1).
#[derive(Debug)]
pub struct SeekableSource<R: Read + Seek> {
	inner: R,
	position: u64,
}

impl<R: Read + Seek> SeekableSource<R> {
	/// Read from `inner`, starting at its current position
	pub fn new(inner: R) -> Self {
		Self { inner, position: 0 }
	}

	/// Get the underlying reader
	pub fn get_ref(&self) -> &R {
		&self.inner
	}

	/// Give back the underlying reader, at its current position
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read + Seek> Read for SeekableSource<R> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		let n = self.inner.read(buf)?;
		self.position += n as u64;
		Ok(n)
	}
}

impl<R: Read + Seek> FlacSource for SeekableSource<R> {
	fn skip_bytes(&mut self, n: u64) -> std::io::Result<()> {
		let offset = i64::try_from(n).map_err(|e| Error::new(ErrorKind::InvalidInput, e))?;
		let target = self.inner.seek(SeekFrom::Current(offset))?;

		// Seeking past the end isn't an error for most readers,
		// so check where the end actually is.
		let end = self.inner.seek(SeekFrom::End(0))?;
		if target > end {
			return Err(short_skip(n));
		}
		self.inner.seek(SeekFrom::Start(target))?;

		self.position += n;
		Ok(())
	}

	fn position(&self) -> u64 {
		self.position
	}
}

/// A source backed by a reader that cannot seek.
/// Skips are O(n).
#[derive(Debug)]
pub struct SequentialSource<R: Read> {
	inner: R,
	position: u64,
}

impl<R: Read> SequentialSource<R> {
	/// Read from `inner`
	pub fn new(inner: R) -> Self {
		Self { inner, position: 0 }
	}

	/// Get the underlying reader
	pub fn get_ref(&self) -> &R {
		&self.inner
	}

	/// Give back the underlying reader
	pub fn into_inner(self) -> R {
		self.inner
	}
}

impl<R: Read> Read for SequentialSource<R> {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		let n = self.inner.read(buf)?;
		self.position += n as u64;
		Ok(n)
	}
}

impl<R: Read> FlacSource for SequentialSource<R> {
	fn skip_bytes(&mut self, n: u64) -> std::io::Result<()> {
		let skipped = std::io::copy(&mut self.inner.by_ref().take(n), &mut std::io::sink())?;
		self.position += skipped;

		if skipped != n {
			return Err(short_skip(n));
		}
		Ok(())
	}

	fn position(&self) -> u64 {
		self.position
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	#[test]
	fn seekable_skip() {
		let data: Vec<u8> = (0..100).collect();
		let mut s = SeekableSource::new(Cursor::new(data));
		s.skip_bytes(10).unwrap();

		let mut b = [0u8; 2];
		s.read_exact(&mut b).unwrap();
		assert_eq!(b, [10, 11]);
		assert_eq!(s.position(), 12);
		assert_eq!(s.get_ref().position(), 12);

		// Skipping to exactly the end is fine
		s.skip_bytes(88).unwrap();
		assert_eq!(s.position(), 100);
	}

	#[test]
	fn seekable_short_skip() {
		let mut s = SeekableSource::new(Cursor::new(vec![0u8; 10]));
		let e = s.skip_bytes(11).unwrap_err();
		assert_eq!(e.kind(), ErrorKind::UnexpectedEof);
	}

	#[test]
	fn sequential_skip() {
		let data: Vec<u8> = (0..100).collect();
		let mut s = SequentialSource::new(&data[..]);
		s.skip_bytes(10).unwrap();

		let mut b = [0u8; 2];
		s.read_exact(&mut b).unwrap();
		assert_eq!(b, [10, 11]);
		assert_eq!(s.position(), 12);
		assert_eq!(s.get_ref().len(), 88);
	}

	#[test]
	fn sequential_short_skip() {
		let data = [0u8; 10];
		let mut s = SequentialSource::new(&data[..]);
		let e = s.skip_bytes(11).unwrap_err();
		assert_eq!(e.kind(), ErrorKind::UnexpectedEof);
		assert_eq!(s.position(), 10);
	}
}
