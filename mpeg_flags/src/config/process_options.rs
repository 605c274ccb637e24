use crate::mpeg::FrameNumber;

/// What to do with a frame that fails the CRC test
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum CrcMismatch {
	/// Log a warning and carry on
	///
	/// Many encoders write broken CRCs, and the frames are still played just fine.
	#[default]
	Ignore,
	/// Fail with [`ErrorKind::FrameCrcTest`](crate::error::ErrorKind::FrameCrcTest)
	Fail,
}

/// Options to control how a [`FlagEditor`](crate::FlagEditor) processes files
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ProcessOptions {
	pub(crate) key_frame: FrameNumber,
	pub(crate) verify_before_write: bool,
	pub(crate) crc_mismatch: CrcMismatch,
}

impl Default for ProcessOptions {
	/// The default implementation for `ProcessOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ProcessOptions {
	/// 	key_frame: FrameNumber::SECOND,
	/// 	verify_before_write: true,
	/// 	crc_mismatch: CrcMismatch::Ignore,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ProcessOptions {
	/// Default key frame
	pub const DEFAULT_KEY_FRAME: FrameNumber = FrameNumber::SECOND;

	/// Creates a new `ProcessOptions`, alias for `Default` implementation
	///
	/// See also: [`ProcessOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::config::ProcessOptions;
	///
	/// let options = ProcessOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			key_frame: Self::DEFAULT_KEY_FRAME,
			verify_before_write: true,
			crc_mismatch: CrcMismatch::Ignore,
		}
	}

	/// The frame whose attributes are authoritative
	///
	/// When the frames of a file disagree, the attributes of the key frame are the ones reported,
	/// and, when a request isn't whole-file, the only ones changed. Frames before the key frame are
	/// still read and rewritten if needed.
	///
	/// The first frame of many files is a Xing/LAME/VBRI header frame written by the encoder, so
	/// the second frame is the default. Use [`FrameNumber::FIRST`] for compatibility with tools
	/// that only look at the first frame.
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::config::ProcessOptions;
	/// use mpeg_flags::mpeg::FrameNumber;
	///
	/// let options = ProcessOptions::new().key_frame(FrameNumber::FIRST);
	/// ```
	pub fn key_frame(&mut self, key_frame: FrameNumber) -> Self {
		self.key_frame = key_frame;
		*self
	}

	/// Whether to read the file (testing every CRC) before writing to it
	///
	/// With verification, a file that already has the requested attributes is never opened for
	/// writing, and a corrupt file can be caught (see [`CrcMismatch::Fail`]) before a single byte
	/// is changed.
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::config::ProcessOptions;
	///
	/// // These files were checked already
	/// let options = ProcessOptions::new().verify_before_write(false);
	/// ```
	pub fn verify_before_write(&mut self, verify_before_write: bool) -> Self {
		self.verify_before_write = verify_before_write;
		*self
	}

	/// What to do with a frame that fails the CRC test, see [`CrcMismatch`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::config::{CrcMismatch, ProcessOptions};
	///
	/// let options = ProcessOptions::new().crc_mismatch(CrcMismatch::Fail);
	/// ```
	pub fn crc_mismatch(&mut self, crc_mismatch: CrcMismatch) -> Self {
		self.crc_mismatch = crc_mismatch;
		*self
	}

	/// The frame whose attributes are authoritative
	pub fn key_frame_number(&self) -> FrameNumber {
		self.key_frame
	}

	/// Whether files are verified before they are written to
	pub fn verifies_before_write(&self) -> bool {
		self.verify_before_write
	}

	/// What a failed CRC test does
	pub fn crc_mismatch_policy(&self) -> CrcMismatch {
		self.crc_mismatch
	}
}
