//! Detection of the non-framed data surrounding the frames of a file
//!
//! Tags are never parsed, they are only located so that the frame scan can be bounded. A file is
//! laid out as:
//!
//! ```text
//! [ID3v2] [garbage] frames... [Brava Software | Lyrics3 | APE] [MGIX] [ID3v1]
//! ```

mod ape;
mod brava;
mod id3;
mod lyrics3;
mod resync;

use crate::error::Result;
use crate::macros::err;
use crate::mpeg::stream::MpegStream;

use std::fmt::{Display, Formatter};
use std::io::{Read, Seek};

use bitflags::bitflags;

bitflags! {
	/// The kinds of non-framed data found in a file
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::tag::NonFramedData;
	///
	/// let found = NonFramedData::ID3V2 | NonFramedData::APE;
	///
	/// assert!(found.intersects(NonFramedData::LEADING));
	/// assert_eq!(found.to_string(), "ID3v2, APE");
	/// ```
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
	pub struct NonFramedData: u8 {
		/// An ID3v2 tag at the start of the file
		const ID3V2 = 0x01;
		/// Unidentified bytes between the start of the file (or the ID3v2 tag) and the first frame
		const DATA_BEFORE_FIRST_FRAME = 0x02;
		/// An ID3v1 tag at the end of the file
		const ID3V1 = 0x08;
		/// A Brava Software tag
		const BRAVA_SOFTWARE = 0x10;
		/// A Lyrics3 (v1 or v2) tag
		const LYRICS3 = 0x20;
		/// An APE (v1 or v2) tag
		const APE = 0x40;
		/// A MusicMatch tag, only recognized in front of an ID3v1 tag
		///
		/// This is not part of [`TRAILING`](Self::TRAILING).
		const MGIX = 0x80;

		/// Everything found before the first frame
		const LEADING = Self::ID3V2.bits() | Self::DATA_BEFORE_FIRST_FRAME.bits();
		/// The tags found after the last frame
		const TRAILING = Self::ID3V1.bits()
			| Self::BRAVA_SOFTWARE.bits()
			| Self::LYRICS3.bits()
			| Self::APE.bits();
	}
}

const NAMES: [(NonFramedData, &str); 7] = [
	(NonFramedData::ID3V2, "ID3v2"),
	(NonFramedData::DATA_BEFORE_FIRST_FRAME, "data before first frame"),
	(NonFramedData::ID3V1, "ID3v1"),
	(NonFramedData::BRAVA_SOFTWARE, "Brava Software"),
	(NonFramedData::LYRICS3, "Lyrics3"),
	(NonFramedData::APE, "APE"),
	(NonFramedData::MGIX, "MGIX"),
];

impl Display for NonFramedData {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if self.is_empty() {
			return f.write_str("none");
		}

		let mut first = true;
		for (flag, name) in NAMES {
			if !self.contains(flag) {
				continue;
			}

			if !first {
				f.write_str(", ")?;
			}

			f.write_str(name)?;
			first = false;
		}

		Ok(())
	}
}

/// The part of a file holding the frame sequence
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanRegion {
	/// The offset of the first frame
	pub start: u64,
	/// The offset just past the last frame, where the trailing tags begin
	pub end: u64,
	/// The non-framed data found around the frames
	pub non_framed_data: NonFramedData,
}

/// Locate the frame sequence of an MPEG audio stream
///
/// This skips a leading ID3v2 tag and any garbage before the first frame, and stops short of the
/// trailing tags. The reader is never written to.
///
/// # Errors
///
/// * The ID3v2 tag is larger than the stream ([`ErrorKind::FirstFrameNotFound`](crate::error::ErrorKind::FirstFrameNotFound))
/// * No run of valid frames was found ([`ErrorKind::FileInvalid`](crate::error::ErrorKind::FileInvalid))
/// * `reader` fails to read or seek
///
/// # Examples
///
/// ```rust
/// use mpeg_flags::tag::{NonFramedData, scan_region};
/// use std::io::Cursor;
///
/// # fn main() -> mpeg_flags::error::Result<()> {
/// // Three minimal MPEG-1 Layer III frames, followed by an ID3v1 tag
/// let mut file = Vec::new();
/// for _ in 0..3 {
/// 	file.extend([0xFF, 0xFB, 0x10, 0x00]);
/// 	file.extend([0; 100]);
/// }
/// file.extend(b"TAG");
/// file.extend([0; 125]);
///
/// let region = scan_region(&mut Cursor::new(file))?;
/// assert_eq!(region.start, 0);
/// assert_eq!(region.end, 312);
/// assert_eq!(region.non_framed_data, NonFramedData::ID3V1);
/// # Ok(()) }
/// ```
pub fn scan_region<R>(reader: &mut R) -> Result<ScanRegion>
where
	R: Read + Seek,
{
	let mut stream = MpegStream::new(reader)?;
	locate_frames(&mut stream, &mut NonFramedData::empty())
}

// The flags are recorded into `non_framed_data` as they are found, so they remain available when
// no frames could be located
pub(crate) fn locate_frames<R>(
	stream: &mut MpegStream<'_, R>,
	non_framed_data: &mut NonFramedData,
) -> Result<ScanRegion>
where
	R: Read + Seek,
{
	let mut start = id3::id3v2_size(stream)?;
	if start != 0 {
		log::debug!("Found an ID3v2 tag, {start} bytes");
		*non_framed_data |= NonFramedData::ID3V2;

		if start > stream.len() {
			err!(FirstFrameNotFound { offset: 0 });
		}
	}

	let (trailing_size, trailing) = find_trailing_data(stream, start)?;
	*non_framed_data |= trailing;
	let end = stream.len().saturating_sub(trailing_size);

	let Some(first_frame) = resync::find_first_frame(stream, start, end)? else {
		err!(FileInvalid { offset: start });
	};

	if first_frame != start {
		log::warn!(
			"Skipping {} bytes of unknown data before the first frame",
			first_frame - start
		);
		*non_framed_data |= NonFramedData::DATA_BEFORE_FIRST_FRAME;
		start = first_frame;
	}

	Ok(ScanRegion {
		start,
		end,
		non_framed_data: *non_framed_data,
	})
}

// The total size of the tags at the end of the stream, none of which may start before `min_offset`
//
// Tags without an ID3v1 tag behind them are compared against tags in front of one, and the larger
// interpretation wins.
fn find_trailing_data<R>(
	stream: &mut MpegStream<'_, R>,
	min_offset: u64,
) -> std::io::Result<(u64, NonFramedData)>
where
	R: Read + Seek,
{
	let len = stream.len();

	let (mut size, mut found) =
		find_tag_ending_at(stream, min_offset, len)?.unwrap_or((0, NonFramedData::empty()));

	if let Some(id3v1_start) = id3::find_id3v1(stream, min_offset)? {
		let (tag_size, mut tags) = match find_tag_ending_at(stream, min_offset, id3v1_start)? {
			Some(tag) => tag,
			None if id3::has_mgix(stream, min_offset)? => (id3::MGIX_SIZE, NonFramedData::MGIX),
			None => (0, NonFramedData::empty()),
		};

		tags |= NonFramedData::ID3V1;
		let with_id3v1 = tag_size + id3::ID3V1_SIZE;
		if with_id3v1 > size {
			size = with_id3v1;
			found = tags;
		}
	}

	if !found.is_empty() {
		log::debug!("Found trailing tags ({found}), {size} bytes");
	}

	Ok((size, found))
}

// A single Brava Software, Lyrics3, or APE tag ending at `tag_end`
fn find_tag_ending_at<R>(
	stream: &mut MpegStream<'_, R>,
	min_offset: u64,
	tag_end: u64,
) -> std::io::Result<Option<(u64, NonFramedData)>>
where
	R: Read + Seek,
{
	if let Some(size) = brava::tag_size(stream, min_offset, tag_end)? {
		return Ok(Some((size, NonFramedData::BRAVA_SOFTWARE)));
	}

	if let Some(size) = lyrics3::tag_size(stream, min_offset, tag_end)? {
		return Ok(Some((size, NonFramedData::LYRICS3)));
	}

	if let Some(size) = ape::tag_size(stream, min_offset, tag_end)? {
		return Ok(Some((size, NonFramedData::APE)));
	}

	Ok(None)
}

#[cfg(test)]
mod tests {
	use super::{NonFramedData, scan_region};
	use crate::error::ErrorKind;

	use std::io::Cursor;

	fn frames(count: usize) -> Vec<u8> {
		let mut data = Vec::new();
		for _ in 0..count {
			data.extend([0xFF, 0xFB, 0x10, 0x00]);
			data.extend([0; 100]);
		}

		data
	}

	fn id3v1() -> Vec<u8> {
		let mut tag = b"TAG".to_vec();
		tag.resize(128, 0);
		tag
	}

	fn ape_footer(size: u16) -> Vec<u8> {
		let mut footer = b"APETAGEX".to_vec();
		footer.extend(1000_u16.to_le_bytes());
		footer.extend([0, 0]);
		footer.extend(size.to_le_bytes());
		footer.resize(32, 0);
		footer
	}

	#[test_log::test]
	fn plain_frames() {
		let region = scan_region(&mut Cursor::new(frames(3))).unwrap();
		assert_eq!(region.start, 0);
		assert_eq!(region.end, 312);
		assert_eq!(region.non_framed_data, NonFramedData::empty());
	}

	#[test_log::test]
	fn id3v2_and_garbage() {
		let mut data = b"ID3\x04\x00\x00\x00\x00\x00\x05".to_vec();
		data.extend([0xAA; 5]);
		data.extend([1, 2, 3]);
		data.extend(frames(3));

		let region = scan_region(&mut Cursor::new(data)).unwrap();
		assert_eq!(region.start, 18);
		assert_eq!(region.end, 330);
		assert_eq!(
			region.non_framed_data,
			NonFramedData::ID3V2 | NonFramedData::DATA_BEFORE_FIRST_FRAME
		);
	}

	#[test_log::test]
	fn oversized_id3v2() {
		let mut data = b"ID3\x04\x00\x00\x00\x00\x10\x00".to_vec();
		data.extend(frames(3));

		let err = scan_region(&mut Cursor::new(data)).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::FirstFrameNotFound { offset: 0 }));
	}

	#[test_log::test]
	fn no_frames() {
		let err = scan_region(&mut Cursor::new(vec![0; 500])).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::FileInvalid { offset: 0 }));
	}

	#[test_log::test]
	fn ape_in_front_of_id3v1() {
		let mut data = frames(3);
		data.extend([0x55; 10]);
		data.extend(ape_footer(42));
		data.extend(id3v1());

		let region = scan_region(&mut Cursor::new(data)).unwrap();
		assert_eq!(region.end, 312);
		assert_eq!(
			region.non_framed_data,
			NonFramedData::APE | NonFramedData::ID3V1
		);
	}

	#[test_log::test]
	fn mgix_in_front_of_id3v1() {
		let mut data = frames(3);
		let mut mgix = b"MGIX".to_vec();
		mgix.resize(128, 0);
		data.extend(mgix);
		data.extend(id3v1());

		let region = scan_region(&mut Cursor::new(data)).unwrap();
		assert_eq!(region.end, 312);
		assert_eq!(
			region.non_framed_data,
			NonFramedData::MGIX | NonFramedData::ID3V1
		);
	}

	#[test_log::test]
	fn rendering() {
		assert_eq!(NonFramedData::empty().to_string(), "none");
		assert_eq!(
			(NonFramedData::DATA_BEFORE_FIRST_FRAME | NonFramedData::LYRICS3).to_string(),
			"data before first frame, Lyrics3"
		);
		assert_eq!(
			NonFramedData::TRAILING.to_string(),
			"ID3v1, Brava Software, Lyrics3, APE"
		);
		assert!(!NonFramedData::TRAILING.contains(NonFramedData::MGIX));
	}
}
