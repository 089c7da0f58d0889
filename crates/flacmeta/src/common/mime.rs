//! Media types of embedded pictures

use smartstring::{LazyCompact, SmartString};
use std::{fmt::Display, str::FromStr};
use tracing::debug;

/// The media type of an embedded picture, conveniently parsed
#[allow(missing_docs)]
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum MimeType {
	/// A mimetype we didn't recognize
	Other(SmartString<LazyCompact>),

	/// The picture data is a URL, not an image.
	/// FLAC spells this as `-->`.
	Url,

	Png,
	Jpg,
	Gif,
	Bmp,
	Avif,
}

impl FromStr for MimeType {
	// Must match `display` below, but may provide other alternatives.

	type Err = std::convert::Infallible;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"-->" => Self::Url,
			"image/png" => Self::Png,
			"image/jpg" => Self::Jpg,
			"image/jpeg" => Self::Jpg,
			"image/gif" => Self::Gif,
			"image/bmp" => Self::Bmp,
			"image/avif" => Self::Avif,
			_ => {
				debug!(message = "Encountered unknown mimetype", mime_string = s);
				Self::Other(s.into())
			}
		})
	}
}

impl From<String> for MimeType {
	fn from(value: String) -> Self {
		match Self::from_str(&value) {
			Ok(x) => x,
			Err(e) => match e {},
		}
	}
}

impl Display for MimeType {
	/// Get a string representation of this mimetype.
	///
	/// `MimeType::from(x.to_string()) == x` always holds,
	/// but `MimeType::from(y).to_string() == y` might not
	/// (`image/jpg` becomes `image/jpeg`).
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Url => write!(f, "-->"),
			Self::Png => write!(f, "image/png"),
			Self::Jpg => write!(f, "image/jpeg"),
			Self::Gif => write!(f, "image/gif"),
			Self::Bmp => write!(f, "image/bmp"),
			Self::Avif => write!(f, "image/avif"),
			Self::Other(x) => write!(f, "{x}"),
		}
	}
}
