//! Types shared between audio metadata formats

pub mod mime;
pub mod picturetype;
pub mod tagtype;
pub mod vorbiscomment;
