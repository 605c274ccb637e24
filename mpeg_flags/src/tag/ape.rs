use crate::mpeg::stream::MpegStream;

use std::io::{Read, Seek};

use byteorder::{ByteOrder, LittleEndian};

const APE_PREAMBLE: &[u8] = b"APETAGEX";
const FOOTER_SIZE: usize = 32;

const MAX_TAG_SIZE: u64 = 0x2000;

const FLAG_HAS_HEADER: u8 = 0x80;
const FLAG_IS_HEADER: u8 = 0x20;

// The size of an APE tag ending at `tag_end`
pub(super) fn tag_size<R>(
	stream: &mut MpegStream<'_, R>,
	min_offset: u64,
	tag_end: u64,
) -> std::io::Result<Option<u64>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an APE tag");

	let Some(footer_start) = tag_end
		.checked_sub(FOOTER_SIZE as u64)
		.filter(|start| *start >= min_offset)
	else {
		return Ok(None);
	};

	if !read_header_or_footer(stream, footer_start)? {
		return Ok(None);
	}

	let version = LittleEndian::read_u16(&stream.buffer[8..10]);
	let flags = stream.buffer[23];
	let is_v1 = match version {
		1000 => true,
		2000 if flags & FLAG_IS_HEADER == 0 => false,
		_ => return Ok(None),
	};

	// The size covers the items and the footer
	let size = u64::from(LittleEndian::read_u16(&stream.buffer[12..14]));
	if size > MAX_TAG_SIZE {
		return Ok(None);
	}

	if is_v1 || flags & FLAG_HAS_HEADER == 0 {
		let fits = (footer_start + FOOTER_SIZE as u64)
			.checked_sub(size)
			.is_some_and(|start| start >= min_offset);

		return Ok(fits.then_some(size));
	}

	let Some(header_start) = footer_start
		.checked_sub(size)
		.filter(|start| *start >= min_offset)
	else {
		return Ok(None);
	};

	if !read_header_or_footer(stream, header_start)? {
		return Ok(None);
	}

	Ok(Some(size + FOOTER_SIZE as u64))
}

// Reads 32 bytes at `offset`, and checks the parts of them that are fixed in both headers and footers
fn read_header_or_footer<R>(stream: &mut MpegStream<'_, R>, offset: u64) -> std::io::Result<bool>
where
	R: Read + Seek,
{
	if !stream.read_buffer(offset, FOOTER_SIZE)? {
		return Ok(false);
	}

	let buffer = &stream.buffer[..FOOTER_SIZE];

	// The version and size are limited to 16 bits, and the reserved bytes are zero
	Ok(buffer.starts_with(APE_PREAMBLE)
		&& buffer[10..12] == [0, 0]
		&& buffer[14..16] == [0, 0]
		&& buffer[24..].iter().all(|b| *b == 0))
}
