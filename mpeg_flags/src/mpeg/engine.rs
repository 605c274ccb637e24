//! The frame scanner
//!
//! Every frame in a scan region is read, optionally CRC tested, folded into an accumulated
//! [`AttributeSet`], and rewritten in place if its attributes differ from the requested ones.

use super::constants::{CRC_SIZE, HEADER_SIZE};
use super::crc::crc16;
use super::header::{FrameHeader, ProtectedRegion};
use super::stream::MpegStream;
use crate::attribute::{AttributeKind, AttributeSet};
use crate::config::{CrcMismatch, ProcessOptions};
use crate::error::Result;
use crate::macros::{err, frame_err};
use crate::tag::ScanRegion;

use std::io::{Read, Seek, Write};

/// A single run over the frames of a scan region
pub(crate) struct FrameScan<'a> {
	pub(crate) region: &'a ScanRegion,
	/// The attributes to write, an unspecified set only observes
	pub(crate) requested: AttributeSet,
	pub(crate) test_crc: bool,
	pub(crate) options: &'a ProcessOptions,
	pub(crate) key_frame_required: bool,
}

impl FrameScan<'_> {
	/// Process the frames, returning the attributes observed before any change
	///
	/// A request that isn't whole-file stops at the key frame.
	pub(crate) fn run<F>(&self, stream: &mut MpegStream<'_, F>) -> Result<AttributeSet>
	where
		F: Read + Write + Seek,
	{
		let key_frame = self.options.key_frame.get();
		let whole_file = self.requested.is_whole_file();

		log::debug!(
			"MPEG: Scanning frames {}..{} (key frame: {key_frame}, whole file: {whole_file}, CRC \
			 test: {})",
			self.region.start,
			self.region.end,
			self.test_crc
		);

		let mut accumulator = self.requested.unspecified();
		let mut offset = self.region.start;
		let mut frames_seen = 0_u64;

		while offset < self.region.end {
			let Some(mut header) = stream.read_header(offset)? else {
				break;
			};

			if !header.is_valid() {
				log::debug!("MPEG: No frame header at offset {offset}");
				break;
			}

			let frame = frames_seen + 1;
			let frame_size = header.frame_size();
			if frame_size == 0 {
				frame_err!(@BAIL FrameSizeUnknown, offset, frame);
			}

			frames_seen = frame;

			let mut protected = None;
			if self.test_crc {
				let region = stream.read_protected_data(offset, header)?;
				if let ProtectedRegion::Bytes(size) = region {
					self.test_frame_crc(&stream.buffer[..size], offset, frame)?;
				}

				protected = Some(region);
			}

			let is_key_frame = frame == key_frame;
			if self.apply_attributes(&mut header, is_key_frame, &mut accumulator) {
				let region = match protected {
					Some(region) => region,
					None => stream.read_protected_data(offset, header)?,
				};

				write_frame(stream, offset, frame, header, region)?;
			}

			if is_key_frame && !whole_file {
				log::debug!("MPEG: Stopping at the key frame");
				return Ok(accumulator);
			}

			offset += u64::from(frame_size);
		}

		log::debug!("MPEG: Scanned {frames_seen} frames, stopped at offset {offset}");

		if offset < self.region.end {
			err!(DataUnknown { offset });
		}

		if frames_seen < key_frame {
			if self.key_frame_required {
				err!(KeyFrameNotFound);
			}

			// Without a key frame, only whole-file attributes mean anything
			accumulator = accumulator.subset(true);
		}

		Ok(accumulator)
	}

	fn test_frame_crc(&self, region: &[u8], offset: u64, frame: u64) -> Result<()> {
		let stored = u16::from_be_bytes([region[HEADER_SIZE], region[HEADER_SIZE + 1]]);
		let computed = crc16(region);
		if stored == computed {
			return Ok(());
		}

		match self.options.crc_mismatch {
			CrcMismatch::Fail => frame_err!(@BAIL FrameCrcTest, offset, frame),
			CrcMismatch::Ignore => {
				log::warn!(
					"MPEG: Frame {frame} at offset {offset} failed the CRC test (stored: {stored:#06X}, \
					 computed: {computed:#06X})"
				);
				Ok(())
			},
		}
	}

	// Fold the frame's attributes into `accumulator`, and change the ones that differ from the
	// request. Returns whether the header changed.
	fn apply_attributes(
		&self,
		header: &mut FrameHeader,
		is_key_frame: bool,
		accumulator: &mut AttributeSet,
	) -> bool {
		let mut changed = false;

		for kind in AttributeKind::ALL {
			let current = header.attribute_status(kind);

			if is_key_frame || accumulator.get(kind).is_whole_file() {
				accumulator.update_attribute_status(kind, current, is_key_frame);

				// Consistency is only tracked for the attributes requested as whole-file
				if !self.requested.get(kind).is_whole_file() {
					accumulator.set_attribute_whole_file(kind, false);
				}
			}

			let requested = self.requested.get(kind);
			if (is_key_frame || requested.is_whole_file())
				&& !requested.is_unspecified()
				&& requested.status() != current
			{
				header.set_attribute_status(kind, requested.status());
				changed = true;
			}
		}

		changed
	}
}

// Write a changed header back, along with its recalculated CRC
fn write_frame<F>(
	stream: &mut MpegStream<'_, F>,
	offset: u64,
	frame: u64,
	header: FrameHeader,
	region: ProtectedRegion,
) -> Result<()>
where
	F: Read + Write + Seek,
{
	stream.buffer[..HEADER_SIZE].copy_from_slice(&header.to_bytes());

	let count = match region {
		ProtectedRegion::Unknown => frame_err!(@BAIL FrameCrcUnknown, offset, frame),
		ProtectedRegion::Unprotected => HEADER_SIZE,
		ProtectedRegion::Bytes(size) => {
			let crc = crc16(&stream.buffer[..size]);
			stream.buffer[HEADER_SIZE..HEADER_SIZE + CRC_SIZE].copy_from_slice(&crc.to_be_bytes());
			HEADER_SIZE + CRC_SIZE
		},
	};

	log::trace!("MPEG: Rewriting frame {frame} at offset {offset} ({header:?})");
	stream.write_buffer(offset, count)?;

	Ok(())
}
