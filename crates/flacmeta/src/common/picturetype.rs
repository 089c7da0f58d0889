//! Picture types, as numbered by the ID3v2 APIC frame

use std::fmt::Display;

/// A picture type index outside of `0..=20`
#[derive(Debug, PartialEq, Eq)]
pub struct PictureTypeError {
	idx: u32,
}

impl Display for PictureTypeError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "bad picture type `{}`", self.idx)
	}
}

impl std::error::Error for PictureTypeError {}

/// What a picture in a FLAC picture block depicts
#[allow(missing_docs)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[repr(u32)]
pub enum PictureType {
	Other = 0,
	PngFileIcon = 1,
	OtherFileIcon = 2,
	FrontCover = 3,
	BackCover = 4,
	LeafletPage = 5,
	Media = 6,
	LeadArtist = 7,
	Artist = 8,
	Conductor = 9,
	BandOrchestra = 10,
	Composer = 11,
	Lyricist = 12,
	RecLocation = 13,
	DuringRecording = 14,
	DuringPerformance = 15,
	VideoScreenCapture = 16,
	ABrightColoredFish = 17,
	Illustration = 18,
	ArtistLogotype = 19,
	PublisherLogotype = 20,
}

impl PictureType {
	/// Every picture type, indexed by its code
	const BY_CODE: [Self; 21] = [
		Self::Other,
		Self::PngFileIcon,
		Self::OtherFileIcon,
		Self::FrontCover,
		Self::BackCover,
		Self::LeafletPage,
		Self::Media,
		Self::LeadArtist,
		Self::Artist,
		Self::Conductor,
		Self::BandOrchestra,
		Self::Composer,
		Self::Lyricist,
		Self::RecLocation,
		Self::DuringRecording,
		Self::DuringPerformance,
		Self::VideoScreenCapture,
		Self::ABrightColoredFish,
		Self::Illustration,
		Self::ArtistLogotype,
		Self::PublisherLogotype,
	];

	/// The code of this picture type
	pub const fn code(self) -> u32 {
		self as u32
	}
}

impl TryFrom<u32> for PictureType {
	type Error = PictureTypeError;

	fn try_from(idx: u32) -> Result<Self, Self::Error> {
		usize::try_from(idx)
			.ok()
			.and_then(|i| Self::BY_CODE.get(i).copied())
			.ok_or(PictureTypeError { idx })
	}
}

impl Display for PictureType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let name = match self {
			Self::Other => "other",
			Self::PngFileIcon => "32x32 png file icon",
			Self::OtherFileIcon => "file icon",
			Self::FrontCover => "front cover",
			Self::BackCover => "back cover",
			Self::LeafletPage => "leaflet page",
			Self::Media => "media",
			Self::LeadArtist => "lead artist",
			Self::Artist => "artist",
			Self::Conductor => "conductor",
			Self::BandOrchestra => "band",
			Self::Composer => "composer",
			Self::Lyricist => "lyricist",
			Self::RecLocation => "recording location",
			Self::DuringRecording => "during recording",
			Self::DuringPerformance => "during performance",
			Self::VideoScreenCapture => "screen capture",
			Self::ABrightColoredFish => "a bright colored fish",
			Self::Illustration => "illustration",
			Self::ArtistLogotype => "artist logotype",
			Self::PublisherLogotype => "publisher logotype",
		};
		write!(f, "{name}")
	}
}
