use crate::mpeg::stream::MpegStream;

use std::io::{Read, Seek};

use byteorder::{BigEndian, ByteOrder};

pub(super) const ID3V1_SIZE: u64 = 128;
pub(super) const MGIX_SIZE: u64 = 128;

const ID3V2_HEADER_SIZE: u64 = 10;

// The size of the ID3v2 tag at the start of the stream, including its header, or 0
pub(super) fn id3v2_size<R>(stream: &mut MpegStream<'_, R>) -> std::io::Result<u64>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v2 tag");

	if !stream.read_buffer(0, ID3V2_HEADER_SIZE as usize)? {
		return Ok(0);
	}

	let header = &stream.buffer[..ID3V2_HEADER_SIZE as usize];
	if &header[..3] != b"ID3"
		|| header[3] == 0xFF
		|| header[4] == 0xFF
		|| header[6..].iter().any(|b| b & 0x80 != 0)
	{
		return Ok(0);
	}

	let size = unsynch(BigEndian::read_u32(&header[6..]));
	Ok(ID3V2_HEADER_SIZE + u64::from(size))
}

fn unsynch(n: u32) -> u32 {
	((n & 0x7F00_0000) >> 3) | ((n & 0x7F_0000) >> 2) | ((n & 0x7F00) >> 1) | (n & 0x7F)
}

// The offset of the ID3v1 tag at the end of the stream
pub(super) fn find_id3v1<R>(
	stream: &mut MpegStream<'_, R>,
	min_offset: u64,
) -> std::io::Result<Option<u64>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v1 tag");

	let Some(start) = stream
		.len()
		.checked_sub(ID3V1_SIZE)
		.filter(|start| *start >= min_offset)
	else {
		return Ok(None);
	};

	if !stream.read_buffer(start, 3)? || !stream.buffer_contains(b"TAG", 0) {
		return Ok(None);
	}

	Ok(Some(start))
}

// Whether a MusicMatch tag sits right in front of the ID3v1 tag
pub(super) fn has_mgix<R>(stream: &mut MpegStream<'_, R>, min_offset: u64) -> std::io::Result<bool>
where
	R: Read + Seek,
{
	let Some(start) = stream
		.len()
		.checked_sub(ID3V1_SIZE + MGIX_SIZE)
		.filter(|start| *start >= min_offset)
	else {
		return Ok(false);
	};

	Ok(stream.read_buffer(start, 4)? && stream.buffer_contains(b"MGIX", 0))
}
