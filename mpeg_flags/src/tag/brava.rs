use crate::mpeg::stream::MpegStream;

use std::io::{Read, Seek};

const FOOTER_SIZE: usize = 48;
const VENDOR: &[u8] = b"Brava Software Inc.";
// The footer is padded with spaces, apart from a "d.dd" version at this position
const VERSION_POSITION: usize = 32;

// The tag starts with 4 unknown bytes, followed by this
const HEADER_MAGIC: &[u8] = b"\0\0\0\0\0\0\0\018273645";

// Only a few fixed sizes were ever written
const TAG_SIZES: [u64; 4] = [8472, 8468, 8272, 8204];

// The size of a Brava Software tag ending at `tag_end`
pub(super) fn tag_size<R>(
	stream: &mut MpegStream<'_, R>,
	min_offset: u64,
	tag_end: u64,
) -> std::io::Result<Option<u64>>
where
	R: Read + Seek,
{
	log::debug!("Searching for a Brava Software tag");

	let Some(footer_start) = tag_end
		.checked_sub(FOOTER_SIZE as u64)
		.filter(|start| *start >= min_offset)
	else {
		return Ok(None);
	};

	if !stream.read_buffer(footer_start, FOOTER_SIZE)?
		|| !is_footer(&stream.buffer[..FOOTER_SIZE])
	{
		return Ok(None);
	}

	for size in TAG_SIZES {
		let Some(header_start) = tag_end.checked_sub(size).filter(|start| *start >= min_offset)
		else {
			continue;
		};

		if stream.read_buffer(header_start + 4, HEADER_MAGIC.len())?
			&& stream.buffer_contains(HEADER_MAGIC, 0)
		{
			return Ok(Some(size));
		}
	}

	Ok(None)
}

fn is_footer(footer: &[u8]) -> bool {
	let (text, version) = footer.split_at(VERSION_POSITION);
	let (version, padding) = version.split_at(4);

	text.starts_with(VENDOR)
		&& text[VENDOR.len()..].iter().all(|b| *b == b' ')
		&& version[0].is_ascii_digit()
		&& version[1] == b'.'
		&& version[2..].iter().all(u8::is_ascii_digit)
		&& padding.iter().all(|b| *b == b' ')
}
