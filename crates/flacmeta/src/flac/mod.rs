//! Read FLAC metadata blocks.

pub mod bitfield;
pub mod blocks;
pub mod errors;
pub mod metablock;
pub mod metablocktype;
pub mod metareader;
pub mod source;

/// Every FLAC stream starts with these bytes
pub const FLAC_MAGIC: [u8; 4] = [0x66, 0x4C, 0x61, 0x43];
