use crate::attribute::{AttributeSet, InvalidAttributeSet};
use crate::config::ProcessOptions;
use crate::error::Result;
use crate::mpeg::engine::FrameScan;
use crate::mpeg::stream::MpegStream;
use crate::tag::{self, NonFramedData};
use crate::util::io::{FileLike, ReadOnly};

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek};
use std::path::Path;

/// Reads and rewrites the attributes of MPEG audio files
///
/// The editor holds the attributes to apply, the [`ProcessOptions`], and the kinds of
/// [`NonFramedData`] found in the last file processed.
///
/// Every file is processed on its own, an error only concerns the file it was raised for.
///
/// # Examples
///
/// ```rust,no_run
/// use mpeg_flags::FlagEditor;
/// use mpeg_flags::attribute::{AttributeKind, AttributeSet, BinaryStatus};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut copyrighted = AttributeSet::new();
/// copyrighted.init_attribute_status(AttributeKind::Copyright, BinaryStatus::Set.into());
/// copyrighted.set_whole_file(true);
///
/// let mut editor = FlagEditor::new();
/// editor.set_attributes(copyrighted)?;
///
/// // Mark every frame as copyrighted
/// let before = editor.apply("track.mp3")?;
/// if before.matches(copyrighted) {
/// 	println!("No changes needed.");
/// }
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct FlagEditor {
	attributes: AttributeSet,
	options: ProcessOptions,
	non_framed_data: NonFramedData,
}

impl Default for FlagEditor {
	fn default() -> Self {
		Self {
			attributes: AttributeSet::new(),
			options: ProcessOptions::new(),
			non_framed_data: NonFramedData::empty(),
		}
	}
}

impl FlagEditor {
	/// Creates a new `FlagEditor` with an unspecified attribute set and the default options
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a new `FlagEditor` with the provided options
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::FlagEditor;
	/// use mpeg_flags::config::ProcessOptions;
	/// use mpeg_flags::mpeg::FrameNumber;
	///
	/// let editor = FlagEditor::with_options(ProcessOptions::new().key_frame(FrameNumber::FIRST));
	/// assert_eq!(editor.options().key_frame_number(), FrameNumber::FIRST);
	/// ```
	pub fn with_options(options: ProcessOptions) -> Self {
		Self {
			options,
			..Self::default()
		}
	}

	/// The attributes used by [`FlagEditor::apply`] and [`FlagEditor::read`]
	pub fn attributes(&self) -> AttributeSet {
		self.attributes
	}

	/// Set the attributes used by [`FlagEditor::apply`] and [`FlagEditor::read`]
	///
	/// # Errors
	///
	/// `attributes` holds an out of range status, see [`AttributeSet::is_valid`].
	/// The configured attributes are left unchanged.
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::FlagEditor;
	/// use mpeg_flags::attribute::{AttributeKind, AttributeSet};
	///
	/// let mut invalid = AttributeSet::new();
	/// invalid.set_attribute_status(AttributeKind::Private, 3);
	///
	/// let mut editor = FlagEditor::new();
	/// assert!(editor.set_attributes(invalid).is_err());
	/// assert!(editor.attributes().is_unspecified());
	/// ```
	pub fn set_attributes(
		&mut self,
		attributes: AttributeSet,
	) -> std::result::Result<(), InvalidAttributeSet> {
		if !attributes.is_valid() {
			return Err(InvalidAttributeSet(attributes));
		}

		self.attributes = attributes;
		Ok(())
	}

	/// The options used to process files
	pub fn options(&self) -> ProcessOptions {
		self.options
	}

	/// Replace the options used to process files
	pub fn set_options(&mut self, options: ProcessOptions) {
		self.options = options;
	}

	/// The non-framed data found in the last file processed
	///
	/// This is cleared before every file. If the frames of a file couldn't be located, it holds
	/// whatever was found before giving up.
	pub fn non_framed_data(&self) -> NonFramedData {
		self.non_framed_data
	}

	/// Apply the configured attributes to the file at `path`
	///
	/// Unlike [`FlagEditor::read`], a file with fewer frames than the key frame number is not an
	/// error. Only its whole-file attributes are reported.
	///
	/// See [`FlagEditor::apply_attributes`].
	///
	/// # Errors
	///
	/// See [`FlagEditor::apply_attributes`]
	pub fn apply(&mut self, path: impl AsRef<Path>) -> Result<AttributeSet> {
		self.apply_attributes(path, self.attributes, false)
	}

	/// Read the attributes of the file at `path`
	///
	/// The attributes are read from the whole file if the configured attributes are whole-file,
	/// else from the key frame.
	///
	/// # Errors
	///
	/// See [`FlagEditor::read_attributes`]
	pub fn read(&mut self, path: impl AsRef<Path>) -> Result<AttributeSet> {
		self.read_attributes(path, self.attributes.is_whole_file())
	}

	/// Read the attributes of the file at `path`
	///
	/// With `whole_file`, every frame is read, and each attribute is marked whole-file if all
	/// frames agree on it. The status reported for an attribute the frames disagree on is the
	/// key frame's. Otherwise, reading stops at the key frame.
	///
	/// The file is only opened for reading.
	///
	/// # Errors
	///
	/// * The file has fewer frames than the key frame number ([`ErrorKind::KeyFrameNotFound`](crate::error::ErrorKind::KeyFrameNotFound))
	/// * See [`FlagEditor::apply_attributes`]
	///
	/// # Examples
	///
	/// ```rust,no_run
	/// use mpeg_flags::FlagEditor;
	///
	/// # fn main() -> mpeg_flags::error::Result<()> {
	/// let mut editor = FlagEditor::new();
	///
	/// let attributes = editor.read_attributes("track.mp3", true)?;
	/// println!("{attributes}    track.mp3");
	/// # Ok(()) }
	/// ```
	pub fn read_attributes(
		&mut self,
		path: impl AsRef<Path>,
		whole_file: bool,
	) -> Result<AttributeSet> {
		self.apply_attributes(path, read_request(whole_file), true)
	}

	/// Apply `requested` to the file at `path`, returning the attributes found before any change
	///
	/// An attribute is changed in every frame if it is whole-file in `requested`, and only in the
	/// key frame otherwise. Unspecified attributes are left alone, and an unspecified `requested`
	/// makes this a plain read, for which the file is only opened for reading.
	///
	/// Unless disabled through [`ProcessOptions::verify_before_write`], the file is read first,
	/// testing the CRC of every frame. If it already has the requested attributes, it is never
	/// written to.
	///
	/// Frames are rewritten in place, along with their CRC. The file is not written atomically, an
	/// I/O error while writing can leave it partially modified.
	///
	/// # Errors
	///
	/// * `requested` is invalid ([`ErrorKind::Generic`](crate::error::ErrorKind::Generic))
	/// * The file can't be opened, read, or written ([`ErrorKind::Generic`](crate::error::ErrorKind::Generic))
	/// * `key_frame_required` is set, and the file has fewer frames than the key frame number
	/// * The file is malformed, see [`MpegFlagsError::is_format_error`](crate::error::MpegFlagsError::is_format_error)
	///
	/// All errors carry `path`.
	pub fn apply_attributes(
		&mut self,
		path: impl AsRef<Path>,
		requested: AttributeSet,
		key_frame_required: bool,
	) -> Result<AttributeSet> {
		let path = path.as_ref();
		log::debug!("Processing {}", path.display());

		self.open_and_process(path, requested, key_frame_required)
			.map_err(|e| e.with_path(path))
	}

	/// Apply `requested` to `file`
	///
	/// This is [`FlagEditor::apply_attributes`] for any [`FileLike`], `file` has to be writable
	/// even if no change is needed. The errors carry no path.
	///
	/// # Errors
	///
	/// See [`FlagEditor::apply_attributes`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::FlagEditor;
	/// use mpeg_flags::attribute::{AttributeKind, AttributeSet, BinaryStatus};
	/// use std::io::Cursor;
	///
	/// # fn main() -> mpeg_flags::error::Result<()> {
	/// // Two MPEG-1 Layer III frames
	/// let mut frames = Vec::new();
	/// for _ in 0..2 {
	/// 	frames.extend([0xFF, 0xFB, 0x10, 0x00]);
	/// 	frames.extend([0; 100]);
	/// }
	/// let mut file = Cursor::new(frames);
	///
	/// let mut original = AttributeSet::new();
	/// original.init_attribute_status(AttributeKind::Original, BinaryStatus::Set.into());
	/// original.set_whole_file(true);
	///
	/// let mut editor = FlagEditor::new();
	/// editor.apply_attributes_to(&mut file, original, false)?;
	///
	/// let after = editor.read_attributes_from(&mut file, true)?;
	/// assert!(after.matches(original));
	/// # Ok(()) }
	/// ```
	pub fn apply_attributes_to<F>(
		&mut self,
		file: &mut F,
		requested: AttributeSet,
		key_frame_required: bool,
	) -> Result<AttributeSet>
	where
		F: FileLike,
	{
		self.non_framed_data = NonFramedData::empty();
		check_request(requested)?;
		self.process(file, requested, key_frame_required)
	}

	/// Read the attributes of `reader`
	///
	/// This is [`FlagEditor::read_attributes`] for any reader, which is never written to. The
	/// errors carry no path.
	///
	/// # Errors
	///
	/// See [`FlagEditor::read_attributes`]
	pub fn read_attributes_from<R>(&mut self, reader: &mut R, whole_file: bool) -> Result<AttributeSet>
	where
		R: Read + Seek,
	{
		self.non_framed_data = NonFramedData::empty();
		self.process(&mut ReadOnly(reader), read_request(whole_file), true)
	}

	fn open_and_process(
		&mut self,
		path: &Path,
		requested: AttributeSet,
		key_frame_required: bool,
	) -> Result<AttributeSet> {
		self.non_framed_data = NonFramedData::empty();
		check_request(requested)?;

		if requested.is_unspecified() {
			let file = File::open(path)?;
			return self.process(&mut ReadOnly(file), requested, key_frame_required);
		}

		let mut file = OpenOptions::new().read(true).write(true).open(path)?;
		self.process(&mut file, requested, key_frame_required)
	}

	fn process<F>(
		&mut self,
		file: &mut F,
		requested: AttributeSet,
		key_frame_required: bool,
	) -> Result<AttributeSet>
	where
		F: FileLike,
	{
		let options = self.options;

		let mut stream = MpegStream::new(file)?;
		let region = tag::locate_frames(&mut stream, &mut self.non_framed_data)?;

		let mut test_crc = true;
		if options.verify_before_write && !requested.is_unspecified() {
			let before = FrameScan {
				region: &region,
				requested: requested.unspecified(),
				test_crc: true,
				options: &options,
				key_frame_required,
			}
			.run(&mut stream)?;

			if before.matches(requested) {
				log::debug!("The attributes are already as requested, nothing to write");
				return Ok(before);
			}

			test_crc = false;
		}

		FrameScan {
			region: &region,
			requested,
			test_crc,
			options: &options,
			key_frame_required,
		}
		.run(&mut stream)
	}
}

// An unspecified set, only carrying the whole-file flags
fn read_request(whole_file: bool) -> AttributeSet {
	let mut request = AttributeSet::new();
	request.set_whole_file(whole_file);
	request
}

fn check_request(requested: AttributeSet) -> Result<()> {
	if !requested.is_valid() {
		return Err(InvalidAttributeSet(requested).into());
	}

	Ok(())
}
