//! Walk the metadata section of a FLAC stream

use serde::Deserialize;
use std::io::ErrorKind;
use tracing::{debug, trace, warn};

use super::{
	blocks::FlacCommentBlock,
	errors::FlacDecodeError,
	metablock::{FlacBlock, FlacBlockBody, FlacMetablock, FlacResolveMode, FlacResolvedBlock},
	metablocktype::{FlacBlockTypeMask, FlacMetablockType},
	source::FlacSource,
	FLAC_MAGIC,
};
use crate::common::vorbiscomment::VorbisComment;

/// How a [`FlacMetaReader`] treats the stream it reads
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlacMetaReaderConfig {
	/// Which block types to parse.
	/// Blocks of any other type are skipped.
	#[serde(default = "FlacMetaReaderConfig::default_parse")]
	pub parse: FlacBlockTypeMask,

	/// If true, the stream must start with `fLaC`.
	/// If false, the stream must start with a block header.
	#[serde(default = "FlacMetaReaderConfig::default_check_magic")]
	pub check_magic: bool,

	/// If true, the first block must be stream info
	#[serde(default = "FlacMetaReaderConfig::default_require_streaminfo_first")]
	pub require_streaminfo_first: bool,
}

impl Default for FlacMetaReaderConfig {
	fn default() -> Self {
		Self {
			parse: Self::default_parse(),
			check_magic: Self::default_check_magic(),
			require_streaminfo_first: Self::default_require_streaminfo_first(),
		}
	}
}

impl FlacMetaReaderConfig {
	fn default_parse() -> FlacBlockTypeMask {
		FlacBlockTypeMask::ALL_EXCEPT_PADDING
	}

	fn default_check_magic() -> bool {
		true
	}

	fn default_require_streaminfo_first() -> bool {
		true
	}
}

/// Reads metadata blocks from a FLAC stream, in order.
///
/// Every block is either parsed or skipped, depending on
/// [`FlacMetaReaderConfig::parse`]. Once the last block has been
/// read, the source is positioned at the first byte of audio data.
pub struct FlacMetaReader<S: FlacSource> {
	source: S,
	config: FlacMetaReaderConfig,

	/// Have we checked the magic bytes yet?
	started: bool,

	/// How many blocks we've read
	blocks_read: usize,

	/// If true, we've read the last block
	finished: bool,

	/// If true, we ran into an error and can't continue
	failed: bool,
}

impl<S: FlacSource> FlacMetaReader<S> {
	/// Make a new reader. Nothing is read until the first call to
	/// [`Self::next_block`].
	pub fn new(source: S, config: FlacMetaReaderConfig) -> Self {
		Self {
			source,
			config,
			started: false,
			blocks_read: 0,
			finished: false,
			failed: false,
		}
	}

	/// The config this reader was made with
	pub fn config(&self) -> &FlacMetaReaderConfig {
		&self.config
	}

	/// Has this reader read the last block?
	pub fn is_finished(&self) -> bool {
		self.finished
	}

	/// Read the next block.
	///
	/// Returns `Ok(None)` once the last block has been read.
	/// After an error, every call returns [`FlacDecodeError::AlreadyFinished`].
	pub fn next_block(&mut self) -> Result<Option<FlacResolvedBlock>, FlacDecodeError> {
		if self.failed {
			return Err(FlacDecodeError::AlreadyFinished);
		}

		if self.finished {
			return Ok(None);
		}

		match self.read_next() {
			Ok(x) => return Ok(Some(x)),
			Err(e) => {
				self.failed = true;
				return Err(e);
			}
		}
	}

	/// Read every remaining block
	pub fn read_all(&mut self) -> Result<Vec<FlacResolvedBlock>, FlacDecodeError> {
		if self.failed {
			return Err(FlacDecodeError::AlreadyFinished);
		}

		self.by_ref().collect()
	}

	/// Give back this reader's source.
	///
	/// If [`Self::is_finished`] is true, the source is at the first byte of audio data.
	pub fn into_inner(self) -> S {
		self.source
	}

	fn check_magic(&mut self) -> Result<(), FlacDecodeError> {
		let mut magic = [0u8; 4];
		match self.source.read_exact(&mut magic) {
			Ok(()) => {}
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => {
				return Err(FlacDecodeError::BadMagicBytes)
			}
			Err(e) => return Err(e.into()),
		}

		if magic != FLAC_MAGIC {
			return Err(FlacDecodeError::BadMagicBytes);
		}

		return Ok(());
	}

	fn read_next(&mut self) -> Result<FlacResolvedBlock, FlacDecodeError> {
		if !self.started {
			self.started = true;
			if self.config.check_magic {
				self.check_magic()?;
			}
		}

		let block = FlacMetablock::open(&mut self.source)?;
		let header = *block.header();

		if let Some(notice) = block.notice() {
			warn!(
				message = "Unusual metablock header",
				notice = %notice,
				block_index = self.blocks_read,
			);
		}

		if self.blocks_read == 0
			&& self.config.require_streaminfo_first
			&& header.block_type() != FlacMetablockType::Streaminfo
		{
			return Err(FlacDecodeError::BadFirstBlock);
		}

		let mode = if self.config.parse.contains(header.block_type()) {
			FlacResolveMode::Parse
		} else {
			FlacResolveMode::Skip
		};

		trace!(
			message = "Reading metablock",
			block_index = self.blocks_read,
			block_type = %header.block_type(),
			type_code = header.type_code(),
			length = header.length(),
			is_last = header.is_last(),
			parse = mode == FlacResolveMode::Parse,
		);

		let resolved = block.resolve(mode)?;
		self.blocks_read += 1;

		if header.is_last() {
			self.finished = true;
			debug!(
				message = "Finished reading flac metadata",
				blocks = self.blocks_read,
				audio_start = self.source.position(),
			);
		}

		return Ok(resolved);
	}
}

impl<S: FlacSource> Iterator for FlacMetaReader<S> {
	type Item = Result<FlacResolvedBlock, FlacDecodeError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		self.next_block().transpose()
	}
}

/// Find the first vorbis comment in a FLAC stream.
/// Every other block is skipped.
///
/// Returns `Ok(None)` if the stream has no vorbis comment.
pub fn flac_read_tags<S: FlacSource>(source: S) -> Result<Option<VorbisComment>, FlacDecodeError> {
	let mut reader = FlacMetaReader::new(
		source,
		FlacMetaReaderConfig {
			parse: FlacMetablockType::VorbisComment.into(),
			..Default::default()
		},
	);

	while let Some(block) = reader.next_block()? {
		if let FlacBlockBody::Parsed(FlacBlock::VorbisComment(FlacCommentBlock { comment })) =
			block.body
		{
			return Ok(Some(comment));
		}
	}

	return Ok(None);
}

#[cfg(test)]
mod tests {
	use rand::Rng;
	use std::io::Cursor;

	use super::*;
	use crate::{
		common::tagtype::TagType,
		flac::{
			source::{SeekableSource, SequentialSource},
			tests::{comment_body, picture_body, streaminfo_body, three_block_stream, TestStream},
		},
	};

	fn body_kind(b: &FlacResolvedBlock) -> &'static str {
		match b.body {
			FlacBlockBody::Parsed(_) => "parsed",
			FlacBlockBody::Raw(_) => "raw",
			FlacBlockBody::Skipped => "skipped",
		}
	}

	#[test]
	fn default_config() {
		let c = FlacMetaReaderConfig::default();
		assert_eq!(c.parse, FlacBlockTypeMask::ALL_EXCEPT_PADDING);
		assert!(c.check_magic);
		assert!(c.require_streaminfo_first);
	}

	#[test]
	fn config_from_toml() {
		let c: FlacMetaReaderConfig = toml::from_str("").unwrap();
		assert_eq!(c, FlacMetaReaderConfig::default());

		let c: FlacMetaReaderConfig = toml::from_str(
			r#"
			parse = ["stream info", "Vorbis_Comment", "picture"]
			check_magic = false
			"#,
		)
		.unwrap();
		assert_eq!(
			c.parse,
			FlacMetablockType::Streaminfo
				| FlacMetablockType::VorbisComment
				| FlacMetablockType::Picture
		);
		assert!(!c.check_magic);
		assert!(c.require_streaminfo_first);

		assert!(toml::from_str::<FlacMetaReaderConfig>(r#"parse = ["not a block"]"#).is_err());
	}

	#[test]
	fn three_blocks_default() {
		let stream = three_block_stream(true);
		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&stream.data[..]),
			FlacMetaReaderConfig::default(),
		);

		let blocks = reader.read_all().unwrap();
		assert_eq!(
			blocks.iter().map(body_kind).collect::<Vec<_>>(),
			vec!["parsed", "skipped", "parsed"]
		);
		assert!(reader.is_finished());
		assert!(reader.next_block().unwrap().is_none());
		assert!(reader.next().is_none());

		match &blocks[0].body {
			FlacBlockBody::Parsed(FlacBlock::Streaminfo(s)) => {
				assert_eq!(s.sample_rate, 44100);
				assert_eq!(s.channels, 2);
				assert_eq!(s.bits_per_sample, 16);
				assert_eq!(s.total_samples, 441_000);
			}
			x => panic!("Unexpected body {x:?}"),
		}

		match &blocks[2].body {
			FlacBlockBody::Parsed(FlacBlock::VorbisComment(c)) => {
				assert_eq!(c.comment.vendor.as_str(), "reference libFLAC 1.3.2 20170101");
				assert_eq!(c.comment.get_tag(&TagType::TrackTitle), Some("Example"));
			}
			x => panic!("Unexpected body {x:?}"),
		}

		let source = reader.into_inner();
		assert_eq!(source.position(), stream.audio_start.unwrap());
		assert_eq!(source.into_inner()[..2], [0xFF, 0xF8]);
	}

	#[test]
	fn three_blocks_masks() {
		let stream = three_block_stream(true);
		let cases = [
			(FlacBlockTypeMask::NONE, ["skipped", "skipped", "skipped"]),
			(
				FlacBlockTypeMask::ALL_INCLUDING_PADDING,
				["parsed", "parsed", "parsed"],
			),
			(
				FlacMetablockType::Padding.into(),
				["skipped", "parsed", "skipped"],
			),
		];

		for (mask, expected) in cases {
			let mut reader = FlacMetaReader::new(
				SeekableSource::new(Cursor::new(stream.data.clone())),
				FlacMetaReaderConfig {
					parse: mask,
					..Default::default()
				},
			);

			let blocks = reader.read_all().unwrap();
			assert_eq!(blocks.iter().map(body_kind).collect::<Vec<_>>(), expected);
			assert_eq!(
				reader.into_inner().position(),
				stream.audio_start.unwrap(),
				"mask {mask}"
			);
		}
	}

	#[test]
	fn without_magic() {
		let stream = three_block_stream(false);

		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&stream.data[..]),
			FlacMetaReaderConfig::default(),
		);
		assert!(matches!(
			reader.next_block(),
			Err(FlacDecodeError::BadMagicBytes)
		));
		assert!(matches!(
			reader.next_block(),
			Err(FlacDecodeError::AlreadyFinished)
		));
		assert!(reader.next().is_none());

		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&stream.data[..]),
			FlacMetaReaderConfig {
				check_magic: false,
				..Default::default()
			},
		);
		assert_eq!(reader.read_all().unwrap().len(), 3);
	}

	#[test]
	fn short_magic() {
		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&b"fL"[..]),
			FlacMetaReaderConfig::default(),
		);
		assert!(matches!(
			reader.next_block(),
			Err(FlacDecodeError::BadMagicBytes)
		));
	}

	#[test]
	fn first_block_not_streaminfo() {
		let stream = TestStream::new()
			.magic()
			.block(FlacMetablockType::Padding, &[0; 4], false)
			.block(
				FlacMetablockType::Streaminfo,
				&streaminfo_body(8000, 1, 8, 0),
				true,
			);

		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&stream.data[..]),
			FlacMetaReaderConfig::default(),
		);
		assert!(matches!(
			reader.read_all(),
			Err(FlacDecodeError::BadFirstBlock)
		));
		assert!(matches!(
			reader.read_all(),
			Err(FlacDecodeError::AlreadyFinished)
		));

		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&stream.data[..]),
			FlacMetaReaderConfig {
				require_streaminfo_first: false,
				..Default::default()
			},
		);
		assert_eq!(reader.read_all().unwrap().len(), 2);
	}

	#[test]
	fn reserved_blocks_are_kept() {
		let stream = TestStream::new()
			.magic()
			.block(
				FlacMetablockType::Streaminfo,
				&streaminfo_body(8000, 1, 8, 0),
				false,
			)
			.reserved(7, &[1, 2, 3], false)
			.reserved(126, &[4, 5], true)
			.audio(10);

		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&stream.data[..]),
			FlacMetaReaderConfig::default(),
		);
		let blocks = reader.read_all().unwrap();
		assert_eq!(blocks.len(), 3);

		assert_eq!(blocks[1].header.type_code(), 7);
		assert!(matches!(&blocks[1].body, FlacBlockBody::Raw(d) if d == &[1, 2, 3]));
		assert_eq!(blocks[2].header.type_code(), 126);
		assert!(matches!(&blocks[2].body, FlacBlockBody::Raw(d) if d == &[4, 5]));
		assert_eq!(reader.into_inner().position(), stream.audio_start.unwrap());
	}

	#[test]
	fn invalid_type_stops_reader() {
		let stream = TestStream::new()
			.magic()
			.block(
				FlacMetablockType::Streaminfo,
				&streaminfo_body(8000, 1, 8, 0),
				false,
			)
			.raw_block([0xFF, 0x00, 0x00, 0x01], &[0])
			.audio(10);

		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&stream.data[..]),
			FlacMetaReaderConfig::default(),
		);

		let results: Vec<_> = reader.by_ref().collect();
		assert_eq!(results.len(), 2);
		assert!(results[0].is_ok());
		assert!(matches!(
			results[1],
			Err(FlacDecodeError::BadMetablockType(127))
		));
		assert!(matches!(
			reader.next_block(),
			Err(FlacDecodeError::AlreadyFinished)
		));
	}

	#[test]
	fn truncated_stream() {
		let mut data = three_block_stream(true).data;
		// Cut the stream inside the vorbis comment
		data.truncate(4 + 38 + 14 + 4 + 20);

		for mask in [FlacBlockTypeMask::NONE, FlacBlockTypeMask::ALL_EXCEPT_PADDING] {
			let mut reader = FlacMetaReader::new(
				SequentialSource::new(&data[..]),
				FlacMetaReaderConfig {
					parse: mask,
					..Default::default()
				},
			);
			assert!(reader.read_all().is_err());
			assert!(!reader.is_finished());
		}
	}

	#[test]
	fn random_padding_lengths() {
		let mut rng = rand::thread_rng();

		for _ in 0..20 {
			let pad_len = rng.gen_range(0..5000usize);
			let stream = TestStream::new()
				.magic()
				.block(
					FlacMetablockType::Streaminfo,
					&streaminfo_body(96000, 6, 24, 12345),
					false,
				)
				.block(FlacMetablockType::Padding, &vec![0u8; pad_len], false)
				.block(
					FlacMetablockType::Picture,
					&picture_body(3, "image/jpeg", "", &[1, 2, 3]),
					true,
				)
				.audio(rng.gen_range(0..100usize));

			let mut seq = FlacMetaReader::new(
				SequentialSource::new(&stream.data[..]),
				FlacMetaReaderConfig::default(),
			);
			let mut seek = FlacMetaReader::new(
				SeekableSource::new(Cursor::new(stream.data.clone())),
				FlacMetaReaderConfig::default(),
			);

			let a = seq.read_all().unwrap();
			let b = seek.read_all().unwrap();
			assert_eq!(a.len(), 3);
			assert_eq!(b.len(), 3);
			assert_eq!(a[1].header, b[1].header);
			assert_eq!(a[1].header.length() as usize, pad_len);

			let audio_start = stream.audio_start.unwrap();
			assert_eq!(seq.into_inner().position(), audio_start);
			assert_eq!(seek.into_inner().position(), audio_start);
		}
	}

	#[test]
	fn read_tags() {
		let stream = three_block_stream(true);

		let mut source = SeekableSource::new(Cursor::new(stream.data.clone()));
		let tags = flac_read_tags(&mut source).unwrap().unwrap();
		assert_eq!(tags.get_tag(&TagType::TrackTitle), Some("Example"));
		assert_eq!(source.position(), stream.audio_start.unwrap());

		// No vorbis comment
		let stream = TestStream::new()
			.magic()
			.block(
				FlacMetablockType::Streaminfo,
				&streaminfo_body(8000, 1, 8, 0),
				true,
			)
			.audio(5);
		let tags = flac_read_tags(SequentialSource::new(&stream.data[..])).unwrap();
		assert!(tags.is_none());
	}

	#[test]
	fn read_tags_stops_at_first_comment() {
		let stream = TestStream::new()
			.magic()
			.block(
				FlacMetablockType::Streaminfo,
				&streaminfo_body(8000, 1, 8, 0),
				false,
			)
			.block(
				FlacMetablockType::VorbisComment,
				&comment_body("first", &["ARTIST=a"]),
				false,
			)
			.block(
				FlacMetablockType::VorbisComment,
				&comment_body("second", &["ARTIST=b"]),
				true,
			);

		let tags = flac_read_tags(SequentialSource::new(&stream.data[..]))
			.unwrap()
			.unwrap();
		assert_eq!(tags.vendor.as_str(), "first");
	}

	#[test]
	fn header_matches_stream_bytes() {
		let stream = three_block_stream(true);
		let mut reader = FlacMetaReader::new(
			SequentialSource::new(&stream.data[..]),
			FlacMetaReaderConfig::default(),
		);

		for (block, start) in reader.read_all().unwrap().iter().zip(&stream.block_starts) {
			let start = usize::try_from(*start).unwrap();
			let bytes: [u8; 4] = stream.data[start..start + 4].try_into().unwrap();
			assert_eq!(block.header.to_bytes(), bytes);
		}
	}
}
