use crate::mpeg::FrameHeader;
use crate::mpeg::stream::MpegStream;

use std::io::{BufReader, Read, Seek, SeekFrom};

// The number of frames following a candidate header that need to be valid as well
const LOOKAHEAD_FRAMES: usize = 2;

// Finds the first frame at or after `offset`
//
// A valid header alone is easily found in garbage, so it is only accepted if the frames following
// it are valid too. Running out of data (or reaching the trailing tags at `end`) while checking
// them is fine, a file may well consist of a single frame.
pub(super) fn find_first_frame<R>(
	stream: &mut MpegStream<'_, R>,
	offset: u64,
	end: u64,
) -> std::io::Result<Option<u64>>
where
	R: Read + Seek,
{
	log::debug!("Searching for the first frame, starting at offset {offset}");

	let Some((first_frame, mut header)) = search_for_header(stream.inner(), offset, end)? else {
		log::debug!("No frame header found");
		return Ok(None);
	};

	let mut next = first_frame;
	for _ in 0..LOOKAHEAD_FRAMES {
		let size = header.frame_size();
		if size == 0 {
			log::debug!("Frame at offset {next} has an unknown size");
			return Ok(None);
		}

		next += u64::from(size);
		if next >= end {
			break;
		}

		match stream.read_header(next)? {
			Some(next_header) if next_header.is_valid() => header = next_header,
			Some(_) => {
				log::debug!("Expected a frame at offset {next}, following the frame at {first_frame}");
				return Ok(None);
			},
			None => break,
		}
	}

	log::debug!("Found the first frame at offset {first_frame}");
	Ok(Some(first_frame))
}

// Searches for a valid header byte by byte, starting at `offset`
//
// The whole header has to fit before `end`, anything past it belongs to the trailing tags.
fn search_for_header<R>(
	reader: &mut R,
	offset: u64,
	end: u64,
) -> std::io::Result<Option<(u64, FrameHeader)>>
where
	R: Read + Seek,
{
	reader.seek(SeekFrom::Start(offset))?;

	// The last 4 bytes read, big endian
	let mut window = 0_u32;
	let region = reader.take(end.saturating_sub(offset));
	for (index, byte) in BufReader::new(region).bytes().enumerate() {
		window = (window << 8) | u32::from(byte?);
		if index < 3 {
			continue;
		}

		let header = FrameHeader::from(window);
		if header.is_valid() {
			return Ok(Some((offset + index as u64 - 3, header)));
		}
	}

	Ok(None)
}
