//! Normalized tag names

use smartstring::{LazyCompact, SmartString};

/// A tag type, independent of the container that stored it
#[derive(Debug, Hash, PartialEq, Eq, Clone)]
pub enum TagType {
	/// A tag we didn't recognize.
	/// Holds the key as it appeared in the file, upper-cased.
	Other(SmartString<LazyCompact>),

	/// Album name
	Album,
	/// Album artist
	AlbumArtist,
	/// Comment
	Comment,
	/// Release date
	ReleaseDate,
	/// Disk number
	DiskNumber,
	/// Total disks in album
	DiskTotal,
	/// Genre
	Genre,
	/// International standard recording code
	Isrc,
	/// Track lyrics, possibly time-coded
	Lyrics,
	/// This track's number in its album
	TrackNumber,
	/// The total number of tracks in this track's album
	TrackTotal,
	/// The title of this track
	TrackTitle,
	/// This track's artist (compare to `AlbumArtist`)
	TrackArtist,
	/// The year this track was released
	Year,
}

impl TagType {
	/// Map a vorbis comment field name to a tag type.
	/// Field names are case-insensitive.
	pub fn from_vorbis_key(key: &str) -> Self {
		let key = key.to_uppercase();
		match &key[..] {
			"TITLE" => Self::TrackTitle,
			"ALBUM" => Self::Album,
			"TRACKNUMBER" => Self::TrackNumber,
			"ARTIST" => Self::TrackArtist,
			"ALBUMARTIST" => Self::AlbumArtist,
			"GENRE" => Self::Genre,
			"ISRC" => Self::Isrc,
			"DATE" => Self::ReleaseDate,
			"TOTALTRACKS" | "TRACKTOTAL" => Self::TrackTotal,
			"DISCNUMBER" | "DISKNUMBER" => Self::DiskNumber,
			"DISCTOTAL" | "DISKTOTAL" | "TOTALDISCS" => Self::DiskTotal,
			"LYRICS" => Self::Lyrics,
			"COMMENT" | "DESCRIPTION" => Self::Comment,
			"YEAR" => Self::Year,
			x => Self::Other(x.into()),
		}
	}
}
