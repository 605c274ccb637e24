use super::constants::{HEADER_SIZE, SCRATCH_BUFFER_SIZE};
use super::header::{FrameHeader, ProtectedRegion};
use crate::util::io::{ReadExt, SeekStreamLen};

use std::io::{Read, Seek, SeekFrom, Write};

/// A byte stream with a scratch buffer for headers, protected regions, and tag signatures
pub(crate) struct MpegStream<'a, R> {
	inner: &'a mut R,
	len: u64,
	pub(crate) buffer: [u8; SCRATCH_BUFFER_SIZE],
}

impl<'a, R> MpegStream<'a, R>
where
	R: Read + Seek,
{
	pub(crate) fn new(inner: &'a mut R) -> std::io::Result<Self> {
		let len = inner.stream_len_hack()?;
		Ok(Self {
			inner,
			len,
			buffer: [0; SCRATCH_BUFFER_SIZE],
		})
	}

	pub(crate) fn len(&self) -> u64 {
		self.len
	}

	pub(crate) fn inner(&mut self) -> &mut R {
		&mut *self.inner
	}

	// Fill `buffer[..count]` from `offset`, `false` if the stream ends first
	pub(crate) fn read_buffer(&mut self, offset: u64, count: usize) -> std::io::Result<bool> {
		self.inner.read_exact_at(offset, &mut self.buffer[..count])
	}

	// Whether `buffer[start..]` begins with `signature`
	pub(crate) fn buffer_contains(&self, signature: &[u8], start: usize) -> bool {
		self.buffer[start..].starts_with(signature)
	}

	pub(crate) fn read_header(&mut self, offset: u64) -> std::io::Result<Option<FrameHeader>> {
		if !self.read_buffer(offset, HEADER_SIZE)? {
			return Ok(None);
		}

		let mut header = [0; HEADER_SIZE];
		header.copy_from_slice(&self.buffer[..HEADER_SIZE]);

		Ok(Some(FrameHeader::from_bytes(header)))
	}

	// Loads the rest of the protected region of the frame at `offset` into the buffer, after
	// the header that was already read by `read_header`.
	//
	// A region that can't be read in full is unknown.
	pub(crate) fn read_protected_data(
		&mut self,
		offset: u64,
		header: FrameHeader,
	) -> std::io::Result<ProtectedRegion> {
		let region = header.protected_region();
		let ProtectedRegion::Bytes(size) = region else {
			return Ok(region);
		};

		let rest = offset + HEADER_SIZE as u64;
		if !self
			.inner
			.read_exact_at(rest, &mut self.buffer[HEADER_SIZE..size])?
		{
			log::debug!("MPEG: Protected region of frame at offset {offset} is truncated");
			return Ok(ProtectedRegion::Unknown);
		}

		Ok(region)
	}
}

impl<R> MpegStream<'_, R>
where
	R: Write + Seek,
{
	// Write `buffer[..count]` to `offset`
	pub(crate) fn write_buffer(&mut self, offset: u64, count: usize) -> std::io::Result<()> {
		self.inner.seek(SeekFrom::Start(offset))?;
		self.inner.write_all(&self.buffer[..count])
	}
}
