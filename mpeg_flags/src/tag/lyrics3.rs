use crate::mpeg::stream::MpegStream;
use crate::util::io::ReadExt;

use std::io::{Read, Seek};

const FOOTER_SIZE: usize = 15;
const BEGIN: &[u8] = b"LYRICSBEGIN";

// Lyrics3v1 has no size field, the tag is at most 5100 bytes
const V1_MAX_SIZE: u64 = 5100;

// The size of a Lyrics3 tag ending at `tag_end`, including its footer
//
// The footer is a 6 digit size followed by "LYRICS200" (v2), or "LYRICSEND" (v1). The tag is
// accepted if "LYRICSBEGIN" is found where the size says it starts. For v1, the first
// "LYRICSBEGIN" within the maximum size is taken.
pub(super) fn tag_size<R>(
	stream: &mut MpegStream<'_, R>,
	min_offset: u64,
	tag_end: u64,
) -> std::io::Result<Option<u64>>
where
	R: Read + Seek,
{
	log::debug!("Searching for a Lyrics3 tag");

	let Some(footer_start) = tag_end
		.checked_sub(FOOTER_SIZE as u64)
		.filter(|start| *start >= min_offset)
	else {
		return Ok(None);
	};

	if !stream.read_buffer(footer_start, FOOTER_SIZE)? {
		return Ok(None);
	}

	let footer = &stream.buffer[..FOOTER_SIZE];
	let (max_size, min_size) = if &footer[6..] == b"LYRICS200" {
		let Some(size) = parse_size(&footer[..6]) else {
			return Ok(None);
		};

		(size, size)
	} else if &footer[6..] == b"LYRICSEND" {
		(V1_MAX_SIZE, BEGIN.len() as u64)
	} else {
		return Ok(None);
	};

	let max_size = max_size.min(footer_start - min_offset);
	if max_size < min_size {
		return Ok(None);
	}

	// Every candidate start, from the furthest to the closest to the footer
	let window_start = footer_start - max_size;
	let mut window = vec![0; (max_size - min_size) as usize + BEGIN.len()];
	if !stream.inner().read_exact_at(window_start, &mut window)? {
		return Ok(None);
	}

	let size = window
		.windows(BEGIN.len())
		.position(|candidate| candidate == BEGIN)
		.map(|position| max_size - position as u64);

	Ok(size.map(|size| size + FOOTER_SIZE as u64))
}

fn parse_size(digits: &[u8]) -> Option<u64> {
	digits.iter().try_fold(0, |size, digit| {
		digit
			.is_ascii_digit()
			.then(|| size * 10 + u64::from(digit - b'0'))
	})
}
