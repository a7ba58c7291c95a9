/// Magic bytes at the start of a program image.
pub const MAGIC: [u8; 4] = *b"CHRY";

/// Image format version.
pub const VERSION: u32 = 1;

/// Size of the image header in bytes.
pub const HEADER_SIZE: usize = 32;
