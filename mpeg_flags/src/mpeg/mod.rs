//! MPEG audio frame headers and the frame scanner
//!
//! A file is a sequence of self-describing frames, each starting with a 4 byte [`FrameHeader`].
//! Frames may be followed by a CRC-16 (see [`crc16`]) covering the header and the side information.

mod constants;
mod crc;
pub(crate) mod engine;
mod header;
pub(crate) mod stream;

pub use crc::crc16;
pub use header::{ChannelMode, FrameHeader, Layer, MpegVersion, ProtectedRegion};

use std::fmt::{Display, Formatter};

/// A 1-based frame number
///
/// # Examples
///
/// ```rust
/// use mpeg_flags::mpeg::FrameNumber;
///
/// assert_eq!(FrameNumber::new(0), None);
/// assert_eq!(FrameNumber::new(2), Some(FrameNumber::SECOND));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameNumber(u64);

impl FrameNumber {
	/// The first frame
	pub const FIRST: Self = Self(1);
	/// The second frame
	pub const SECOND: Self = Self(2);

	/// Creates a `FrameNumber`, `None` if `number` is 0
	pub const fn new(number: u64) -> Option<Self> {
		if number == 0 {
			return None;
		}

		Some(Self(number))
	}

	/// The frame number as a plain integer
	pub const fn get(self) -> u64 {
		self.0
	}
}

impl Display for FrameNumber {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}
