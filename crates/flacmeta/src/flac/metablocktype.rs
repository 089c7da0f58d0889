//! FLAC metablock types, and masks of them.

use itertools::Itertools;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::{borrow::Cow, fmt::Display, ops::BitOr, str::FromStr};
use thiserror::Error;

use super::errors::FlacDecodeError;

/// A type of flac metadata block.
///
/// Every variant is a distinct power of two,
/// so types can be combined into a [`FlacBlockTypeMask`].
/// Type code 127 is invalid and has no variant: decoding it fails.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, DeserializeFromStr, SerializeDisplay)]
#[repr(u8)]
pub enum FlacMetablockType {
	/// Type code 0
	Streaminfo = 1 << 0,
	/// Type code 1
	Padding = 1 << 1,
	/// Type code 2
	Application = 1 << 2,
	/// Type code 3
	Seektable = 1 << 3,
	/// Type code 4
	VorbisComment = 1 << 4,
	/// Type code 5
	Cuesheet = 1 << 5,
	/// Type code 6
	Picture = 1 << 6,
	/// Any of the type codes 7 to 126
	Reserved = 1 << 7,
}

/// Something odd, but legal, we found while decoding a header.
/// These never stop decoding; the caller decides what to do with them.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FlacHeaderNotice {
	/// This header has a reserved type code (7 to 126)
	ReservedBlockType(u8),
}

impl Display for FlacHeaderNotice {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::ReservedBlockType(x) => write!(f, "reserved block type {x}"),
		}
	}
}

impl FlacMetablockType {
	/// Every block type, in type code order
	pub const ALL: [Self; 8] = [
		Self::Streaminfo,
		Self::Padding,
		Self::Application,
		Self::Seektable,
		Self::VorbisComment,
		Self::Cuesheet,
		Self::Picture,
		Self::Reserved,
	];

	/// Map a 7-bit header type code to a block type.
	///
	/// Codes 7 to 126 map to [`FlacMetablockType::Reserved`] with a notice.
	/// Code 127 (and anything wider than seven bits) is an error.
	pub fn from_code(code: u8) -> Result<(Self, Option<FlacHeaderNotice>), FlacDecodeError> {
		return Ok(match code {
			0 => (Self::Streaminfo, None),
			1 => (Self::Padding, None),
			2 => (Self::Application, None),
			3 => (Self::Seektable, None),
			4 => (Self::VorbisComment, None),
			5 => (Self::Cuesheet, None),
			6 => (Self::Picture, None),
			7..=126 => (
				Self::Reserved,
				Some(FlacHeaderNotice::ReservedBlockType(code)),
			),
			x => return Err(FlacDecodeError::BadMetablockType(x)),
		});
	}

	/// The type code that identifies this block type in a header.
	/// `None` for [`FlacMetablockType::Reserved`], which covers many codes.
	pub fn code(self) -> Option<u8> {
		match self {
			Self::Streaminfo => Some(0),
			Self::Padding => Some(1),
			Self::Application => Some(2),
			Self::Seektable => Some(3),
			Self::VorbisComment => Some(4),
			Self::Cuesheet => Some(5),
			Self::Picture => Some(6),
			Self::Reserved => None,
		}
	}

	/// This type's bit in a [`FlacBlockTypeMask`]
	pub const fn bits(self) -> u8 {
		self as u8
	}
}

/// Get the name of the block type with the given mask bits.
///
/// This is total: values that aren't exactly one block type
/// are named `unknown block type {bits}`.
pub fn type_name(bits: u8) -> Cow<'static, str> {
	const STREAMINFO: u8 = FlacMetablockType::Streaminfo.bits();
	const PADDING: u8 = FlacMetablockType::Padding.bits();
	const APPLICATION: u8 = FlacMetablockType::Application.bits();
	const SEEKTABLE: u8 = FlacMetablockType::Seektable.bits();
	const VORBISCOMMENT: u8 = FlacMetablockType::VorbisComment.bits();
	const CUESHEET: u8 = FlacMetablockType::Cuesheet.bits();
	const PICTURE: u8 = FlacMetablockType::Picture.bits();
	const RESERVED: u8 = FlacMetablockType::Reserved.bits();

	Cow::Borrowed(match bits {
		STREAMINFO => "stream info",
		PADDING => "padding",
		APPLICATION => "application",
		SEEKTABLE => "seek table",
		VORBISCOMMENT => "vorbis comment",
		CUESHEET => "cue sheet",
		PICTURE => "picture",
		// Reserved gets a real name instead of the unknown fallback
		RESERVED => "reserved",
		x => return Cow::Owned(format!("unknown block type {x}")),
	})
}

impl Display for FlacMetablockType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", type_name(self.bits()))
	}
}

/// We could not parse a block type name
#[derive(Debug, Error)]
#[error("unknown flac block type name `{0}`")]
pub struct FlacBlockTypeNameError(String);

impl FromStr for FlacMetablockType {
	type Err = FlacBlockTypeNameError;

	/// Accepts the names produced by [`Display`] and the FLAC format's
	/// upper-case names (`VORBIS_COMMENT`), ignoring case, spaces and underscores.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let norm: String = s
			.chars()
			.filter(|c| *c != ' ' && *c != '_')
			.map(|c| c.to_ascii_lowercase())
			.collect();

		Ok(match &norm[..] {
			"streaminfo" => Self::Streaminfo,
			"padding" => Self::Padding,
			"application" => Self::Application,
			"seektable" => Self::Seektable,
			"vorbiscomment" => Self::VorbisComment,
			"cuesheet" => Self::Cuesheet,
			"picture" => Self::Picture,
			"reserved" => Self::Reserved,
			_ => return Err(FlacBlockTypeNameError(s.into())),
		})
	}
}

/// A set of block types.
///
/// This tells a [`crate::flac::metareader::FlacMetaReader`] which
/// blocks to parse. Everything else is skipped.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct FlacBlockTypeMask(u8);

impl FlacBlockTypeMask {
	/// No block types
	pub const NONE: Self = Self(0);

	/// Every block type except padding.
	/// Includes reserved types.
	pub const ALL_EXCEPT_PADDING: Self = Self(
		FlacMetablockType::Streaminfo.bits()
			| FlacMetablockType::Application.bits()
			| FlacMetablockType::Seektable.bits()
			| FlacMetablockType::VorbisComment.bits()
			| FlacMetablockType::Cuesheet.bits()
			| FlacMetablockType::Picture.bits()
			| FlacMetablockType::Reserved.bits(),
	);

	/// Every block type defined by FLAC, including padding.
	/// Excludes reserved types.
	pub const ALL_INCLUDING_PADDING: Self = Self(
		FlacMetablockType::Streaminfo.bits()
			| FlacMetablockType::Padding.bits()
			| FlacMetablockType::Application.bits()
			| FlacMetablockType::Seektable.bits()
			| FlacMetablockType::VorbisComment.bits()
			| FlacMetablockType::Cuesheet.bits()
			| FlacMetablockType::Picture.bits(),
	);

	/// Make a mask from raw bits
	pub const fn from_bits(bits: u8) -> Self {
		Self(bits)
	}

	/// The raw bits of this mask
	pub const fn bits(self) -> u8 {
		self.0
	}

	/// Does this mask select the given type?
	pub const fn contains(self, block_type: FlacMetablockType) -> bool {
		self.0 & block_type.bits() != 0
	}

	/// Is this mask empty?
	pub const fn is_empty(self) -> bool {
		self.0 == 0
	}

	/// Iterate over the types in this mask, in type code order
	pub fn iter(self) -> impl Iterator<Item = FlacMetablockType> {
		FlacMetablockType::ALL
			.into_iter()
			.filter(move |t| self.contains(*t))
	}
}

impl From<FlacMetablockType> for FlacBlockTypeMask {
	fn from(value: FlacMetablockType) -> Self {
		Self(value.bits())
	}
}

impl FromIterator<FlacMetablockType> for FlacBlockTypeMask {
	fn from_iter<T: IntoIterator<Item = FlacMetablockType>>(iter: T) -> Self {
		iter.into_iter().fold(Self::NONE, |m, t| m | t)
	}
}

impl BitOr for FlacBlockTypeMask {
	type Output = Self;
	fn bitor(self, rhs: Self) -> Self::Output {
		Self(self.0 | rhs.0)
	}
}

impl BitOr<FlacMetablockType> for FlacBlockTypeMask {
	type Output = Self;
	fn bitor(self, rhs: FlacMetablockType) -> Self::Output {
		Self(self.0 | rhs.bits())
	}
}

impl BitOr for FlacMetablockType {
	type Output = FlacBlockTypeMask;
	fn bitor(self, rhs: Self) -> Self::Output {
		FlacBlockTypeMask(self.bits() | rhs.bits())
	}
}

impl BitOr<FlacBlockTypeMask> for FlacMetablockType {
	type Output = FlacBlockTypeMask;
	fn bitor(self, rhs: FlacBlockTypeMask) -> Self::Output {
		FlacBlockTypeMask(self.bits() | rhs.0)
	}
}

impl Display for FlacBlockTypeMask {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.iter().join(", "))
	}
}

// Masks are written as lists of type names
impl Serialize for FlacBlockTypeMask {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_seq(self.iter())
	}
}

impl<'de> Deserialize<'de> for FlacBlockTypeMask {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let types = Vec::<FlacMetablockType>::deserialize(deserializer)?;
		Ok(types.into_iter().collect())
	}
}
