//! Contains the errors that can arise within mpeg_flags
//!
//! The primary error is [`MpegFlagsError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.
//!
//! Every error is fatal to the file being processed, and only to that file. Errors are tied to the
//! file through [`MpegFlagsError::path`], which is filled in by [`FlagEditor`](crate::FlagEditor)
//! before the error reaches the caller.

use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};

/// Alias for `Result<T, MpegFlagsError>`
pub type Result<T> = std::result::Result<T, MpegFlagsError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// An unanticipated failure while processing the file
	///
	/// This wraps I/O errors, as well as any other failure that isn't related to the contents of
	/// the file. The cause, if any, is available through [`std::error::Error::source`].
	Generic(Option<Box<dyn std::error::Error + Send + Sync + 'static>>),
	/// The file has no frame at the configured key frame position
	///
	/// This is only raised by reads that require a key frame, see
	/// [`FlagEditor::read_attributes`](crate::FlagEditor::read_attributes).
	KeyFrameNotFound,

	// File format related errors
	/// The file is malformed
	Format {
		/// Where the problem was found
		offset: u64,
	},
	/// No valid MPEG frame sequence could be found
	FileInvalid {
		/// The offset the search for a frame started at
		offset: u64,
	},
	/// The ID3v2 tag claims to be larger than the file itself
	FirstFrameNotFound {
		/// The offset the first frame was expected at
		offset: u64,
	},
	/// The frame sequence is followed by data that is neither a frame nor a known tag
	DataUnknown {
		/// The offset of the unknown data
		offset: u64,
	},

	// Frame related errors
	/// A frame is malformed
	Frame {
		/// The offset of the frame header
		offset: u64,
		/// The 1-based frame number
		frame: u64,
	},
	/// A frame header uses a free or reserved bitrate, sampling rate, layer, or version
	FrameSizeUnknown {
		/// The offset of the frame header
		offset: u64,
		/// The 1-based frame number
		frame: u64,
	},
	/// A frame has to be rewritten, but the region covered by its CRC can't be determined
	FrameCrcUnknown {
		/// The offset of the frame header
		offset: u64,
		/// The 1-based frame number
		frame: u64,
	},
	/// A frame failed the CRC test
	///
	/// This is only raised with [`CrcMismatch::Fail`](crate::config::CrcMismatch::Fail).
	FrameCrcTest {
		/// The offset of the frame header
		offset: u64,
		/// The 1-based frame number
		frame: u64,
	},
}

/// Errors that could occur while processing a file
pub struct MpegFlagsError {
	pub(crate) path: Option<PathBuf>,
	pub(crate) kind: ErrorKind,
}

impl MpegFlagsError {
	/// Create a `MpegFlagsError` from an [`ErrorKind`]
	///
	/// The error isn't tied to a file yet, see [`MpegFlagsError::path`].
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::error::{ErrorKind, MpegFlagsError};
	///
	/// let unknown_data = MpegFlagsError::new(ErrorKind::DataUnknown { offset: 1234 });
	/// assert!(unknown_data.is_format_error());
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { path: None, kind }
	}

	// Errors raised deep in the stream don't know which file they belong to
	pub(crate) fn with_path(mut self, path: &Path) -> Self {
		if self.path.is_none() {
			self.path = Some(path.to_path_buf());
		}

		self
	}

	/// Returns the [`ErrorKind`]
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// The path of the file that failed to process, if known
	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	/// The offset the error refers to, if any
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::error::{ErrorKind, MpegFlagsError};
	///
	/// let error = MpegFlagsError::new(ErrorKind::FrameSizeUnknown { offset: 417, frame: 2 });
	/// assert_eq!(error.offset(), Some(417));
	/// assert_eq!(error.frame_number(), Some(2));
	/// ```
	pub fn offset(&self) -> Option<u64> {
		match self.kind {
			ErrorKind::Format { offset }
			| ErrorKind::FileInvalid { offset }
			| ErrorKind::FirstFrameNotFound { offset }
			| ErrorKind::DataUnknown { offset }
			| ErrorKind::Frame { offset, .. }
			| ErrorKind::FrameSizeUnknown { offset, .. }
			| ErrorKind::FrameCrcUnknown { offset, .. }
			| ErrorKind::FrameCrcTest { offset, .. } => Some(offset),
			ErrorKind::Generic(_) | ErrorKind::KeyFrameNotFound => None,
		}
	}

	/// The 1-based number of the frame the error refers to, if any
	pub fn frame_number(&self) -> Option<u64> {
		match self.kind {
			ErrorKind::Frame { frame, .. }
			| ErrorKind::FrameSizeUnknown { frame, .. }
			| ErrorKind::FrameCrcUnknown { frame, .. }
			| ErrorKind::FrameCrcTest { frame, .. } => Some(frame),
			_ => None,
		}
	}

	/// Whether the error was caused by the contents of the file
	///
	/// This is `false` for [`ErrorKind::Generic`] and [`ErrorKind::KeyFrameNotFound`].
	pub fn is_format_error(&self) -> bool {
		self.offset().is_some()
	}

	/// Whether the error was caused by a specific frame
	pub fn is_frame_error(&self) -> bool {
		self.frame_number().is_some()
	}
}

impl std::error::Error for MpegFlagsError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match &self.kind {
			ErrorKind::Generic(Some(cause)) => Some(cause.as_ref()),
			_ => None,
		}
	}
}

impl Debug for MpegFlagsError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)?;
		if let Some(path) = &self.path {
			write!(f, " ({})", path.display())?;
		}

		Ok(())
	}
}

impl From<ErrorKind> for MpegFlagsError {
	fn from(input: ErrorKind) -> Self {
		Self::new(input)
	}
}

impl From<std::io::Error> for MpegFlagsError {
	fn from(input: std::io::Error) -> Self {
		Self::new(ErrorKind::Generic(Some(Box::new(input))))
	}
}

impl From<crate::attribute::InvalidAttributeSet> for MpegFlagsError {
	fn from(input: crate::attribute::InvalidAttributeSet) -> Self {
		Self::new(ErrorKind::Generic(Some(Box::new(input))))
	}
}

// "path", quoted
struct DisplayPath<'a>(Option<&'a Path>);

impl Display for DisplayPath<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.0 {
			Some(path) => write!(f, "\"{}\"", path.display()),
			None => f.write_str("<stream>"),
		}
	}
}

// 1234 (0x4D2)
struct DisplayOffset(u64);

impl Display for DisplayOffset {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} (0x{:X})", self.0, self.0)
	}
}

impl Display for MpegFlagsError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let path = DisplayPath(self.path.as_deref());

		match self.kind {
			ErrorKind::Generic(Some(ref cause)) => write!(
				f,
				"An error occurred while processing file {path}: {cause}."
			),
			ErrorKind::Generic(None) => {
				write!(f, "An error occurred while processing file {path}.")
			},
			ErrorKind::KeyFrameNotFound => write!(f, "The file {path} has no key frame."),

			ErrorKind::Format { offset } => write!(
				f,
				"An error occurred while processing file {path} at offset {}.",
				DisplayOffset(offset)
			),
			ErrorKind::FileInvalid { .. } => write!(f, "{path} is not an MP3 file."),
			ErrorKind::FirstFrameNotFound { .. } => write!(
				f,
				"Either the size of the file {path} or the information in the ID3v2 tag is wrong."
			),
			ErrorKind::DataUnknown { offset } => write!(
				f,
				"The file {path} contains unknown data at offset {}.",
				DisplayOffset(offset)
			),

			ErrorKind::Frame { offset, frame } => write!(
				f,
				"An error occurred while processing frame {frame} in file {path} at offset {}.",
				DisplayOffset(offset)
			),
			ErrorKind::FrameSizeUnknown { offset, frame } => write!(
				f,
				"The size of frame {frame} in file {path} at offset {} cannot be determined.",
				DisplayOffset(offset)
			),
			ErrorKind::FrameCrcUnknown { offset, frame } => write!(
				f,
				"The CRC of frame {frame} in file {path} at offset {} cannot be recalculated.",
				DisplayOffset(offset)
			),
			ErrorKind::FrameCrcTest { offset, frame } => write!(
				f,
				"Frame {frame} in file {path} at offset {} is corrupt and did not pass the CRC test.",
				DisplayOffset(offset)
			),
		}
	}
}
