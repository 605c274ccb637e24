use mpeg_flags::mpeg::crc16;

use std::io::{Seek as _, Write as _};
use std::path::Path;

use tempfile::NamedTempFile;

/// The size of the frames built by [`frame()`]
pub const FRAME_SIZE: usize = 104;

/// The size of the region covered by the CRC of a [`protected_frame()`]
pub const PROTECTED_SIZE: usize = 38;

/// In the third header byte
pub const PRIVATE_BIT: u8 = 0x01;
/// In the last header byte, as are the others
pub const COPYRIGHT_BIT: u8 = 0x08;
pub const ORIGINAL_BIT: u8 = 0x04;

/// An MPEG-1 Layer III frame (32 kbps, 44.1 kHz, stereo) without a CRC
///
/// `flags` is the last header byte, holding the copyright, original, and emphasis fields.
pub fn frame(flags: u8) -> Vec<u8> {
	let mut frame = vec![0xFF, 0xFB, 0x10, flags];
	frame.resize(FRAME_SIZE, 0);
	frame
}

/// Same as [`frame()`], with a valid CRC and some side information
pub fn protected_frame(flags: u8) -> Vec<u8> {
	let mut frame = frame(flags);
	frame[1] = 0xFA;
	for (index, byte) in frame[6..PROTECTED_SIZE].iter_mut().enumerate() {
		*byte = index as u8;
	}

	let crc = crc16(&frame[..PROTECTED_SIZE]);
	frame[4..6].copy_from_slice(&crc.to_be_bytes());
	frame
}

/// `count` copies of [`frame()`]
pub fn frames(count: usize, flags: u8) -> Vec<u8> {
	frame(flags).repeat(count)
}

/// An ID3v2.4 tag with `body_size` (< 128) bytes of padding
pub fn id3v2(body_size: u8) -> Vec<u8> {
	let mut tag = b"ID3\x04\x00\x00\x00\x00\x00".to_vec();
	tag.push(body_size);
	tag.resize(10 + usize::from(body_size), 0);
	tag
}

/// An empty ID3v1 tag
pub fn id3v1() -> Vec<u8> {
	let mut tag = b"TAG".to_vec();
	tag.resize(128, b' ');
	tag
}

/// An APEv2 tag with a header, footer, and `items_size` bytes of items
pub fn ape(items_size: u16) -> Vec<u8> {
	let header_or_footer = |flags: u8| {
		let mut bytes = b"APETAGEX".to_vec();
		bytes.extend(2000_u16.to_le_bytes());
		bytes.extend([0, 0]);
		bytes.extend((items_size + 32).to_le_bytes());
		bytes.extend([0; 6]);
		bytes.extend([0, 0, 0, flags]);
		bytes.extend([0; 8]);
		bytes
	};

	let mut tag = header_or_footer(0xA0);
	tag.extend(vec![b'i'; usize::from(items_size)]);
	tag.extend(header_or_footer(0x80));
	tag
}

/// A Lyrics3v2 tag
pub fn lyrics3v2(lyrics: &str) -> Vec<u8> {
	let mut tag = b"LYRICSBEGIN".to_vec();
	tag.extend(format!("LYR{:05}{lyrics}", lyrics.len()).into_bytes());
	tag.extend(format!("{:06}LYRICS200", tag.len()).into_bytes());
	tag
}

/// Create a new temporary file holding `content`
pub fn temp_file(content: &[u8]) -> NamedTempFile {
	let mut file = NamedTempFile::new().unwrap();
	file.write_all(content).unwrap();
	file.rewind().unwrap();

	file
}

/// The current content of the file at `path`
pub fn content(path: impl AsRef<Path>) -> Vec<u8> {
	std::fs::read(path).unwrap()
}
