#![warn(missing_docs)]

//! Read the metadata section of a FLAC stream, one block at a time.
//!
//! The entry points are [`flac::metablock::FlacMetablock`], which decodes a
//! single block header and lets the caller parse or skip its body, and
//! [`flac::metareader::FlacMetaReader`], which walks a whole metadata section.

pub mod common;
pub mod flac;
