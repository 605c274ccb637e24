use crate::util::{COPYRIGHT_BIT, frame, frames, id3v1, protected_frame, temp_file};
use mpeg_flags::FlagEditor;
use mpeg_flags::attribute::AttributeSet;
use mpeg_flags::config::{CrcMismatch, ProcessOptions};
use mpeg_flags::error::ErrorKind;
use mpeg_flags::tag::NonFramedData;

use std::error::Error as _;

fn copyright_everywhere() -> AttributeSet {
	"=P  +C* =O  E. ".parse().unwrap()
}

#[test_log::test]
fn layer_2_crc_cannot_be_recalculated() {
	// MPEG-1 Layer II, 32 kbps, 44.1 kHz, with a CRC
	let mut layer_2 = frame(0);
	layer_2[1] = 0xFC;
	let data = [layer_2.clone(), layer_2].concat();
	let file = temp_file(&data);

	// Reading doesn't need the protected region
	let mut editor = FlagEditor::new();
	editor.read_attributes(file.path(), true).unwrap();

	let err = editor
		.apply_attributes(file.path(), copyright_everywhere(), false)
		.unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::FrameCrcUnknown {
			offset: 0,
			frame: 1
		}
	));
	assert!(err.is_frame_error());
	assert_eq!(err.path(), Some(file.path()));
	assert!(
		err.to_string()
			.contains(&format!("\"{}\"", file.path().display()))
	);
}

#[test_log::test]
fn unknown_data_after_the_frames() {
	let mut data = frames(3, 0);
	data.extend([0x55; 50]);
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	let err = editor.read_attributes(file.path(), true).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::DataUnknown { offset: 312 }));
	assert_eq!(err.offset(), Some(312));
	assert!(
		err.to_string()
			.ends_with("contains unknown data at offset 312 (0x138).")
	);

	// Only the key frame is needed
	editor.read_attributes(file.path(), false).unwrap();
}

#[test_log::test]
fn not_an_mp3_file() {
	let file = temp_file(&b"Not an MP3 file, just some text.\n".repeat(20));

	let mut editor = FlagEditor::new();
	let err = editor.read_attributes(file.path(), true).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FileInvalid { offset: 0 }));
	assert_eq!(
		err.to_string(),
		format!("\"{}\" is not an MP3 file.", file.path().display())
	);
}

#[test_log::test]
fn oversized_id3v2_tag() {
	// 2048 bytes, in a much smaller file
	let mut data = b"ID3\x04\x00\x00\x00\x00\x10\x00".to_vec();
	data.extend(frames(2, 0));
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	let err = editor.read_attributes(file.path(), true).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FirstFrameNotFound { .. }));
	assert!(err.is_format_error());
	assert_eq!(editor.non_framed_data(), NonFramedData::ID3V2);
}

#[test_log::test]
fn frame_header_in_id3v1_tag() {
	let mut data = b"Not an MP3 file, just some text.\n".repeat(20);
	let mut tag = id3v1();
	tag[3..7].copy_from_slice(&[0xFF, 0xFB, 0x10, 0x00]);
	data.extend(tag);
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	let err = editor.read_attributes(file.path(), true).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FileInvalid { offset: 0 }));
	assert_eq!(
		err.to_string(),
		format!("\"{}\" is not an MP3 file.", file.path().display())
	);
	assert_eq!(editor.non_framed_data(), NonFramedData::ID3V1);

	let err = editor
		.apply_attributes(file.path(), AttributeSet::new(), false)
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FileInvalid { offset: 0 }));
}

#[test_log::test]
fn crc_mismatch() {
	let mut data = [protected_frame(0), protected_frame(0)].concat();
	data[104 + 4] ^= 0xFF;
	let file = temp_file(&data);

	// Only reported by default
	let mut editor = FlagEditor::new();
	editor.read_attributes(file.path(), true).unwrap();

	let mut editor =
		FlagEditor::with_options(ProcessOptions::new().crc_mismatch(CrcMismatch::Fail));
	let err = editor.read_attributes(file.path(), true).unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::FrameCrcTest {
			offset: 104,
			frame: 2
		}
	));
	assert!(err.to_string().ends_with("is corrupt and did not pass the CRC test."));

	// Nothing is written after a failed verification
	let err = editor
		.apply_attributes(file.path(), copyright_everywhere(), false)
		.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::FrameCrcTest { .. }));
	assert_eq!(crate::util::content(file.path()), data);
}

#[test_log::test]
fn missing_file() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("missing.mp3");

	let mut editor = FlagEditor::new();
	let err = editor.read_attributes(&path, true).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::Generic(Some(_))));
	assert!(!err.is_format_error());
	assert_eq!(err.path(), Some(path.as_path()));

	let source = err.source().unwrap();
	let io = source.downcast_ref::<std::io::Error>().unwrap();
	assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
}

#[test_log::test]
fn unknown_frame_size() {
	// A reserved sampling rate
	let mut data = frames(3, 0);
	data.extend([0xFF, 0xFB, 0x1C, 0x00]);
	data.resize(data.len() + 200, 0);
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	let err = editor.read_attributes(file.path(), true).unwrap_err();
	assert!(matches!(
		err.kind(),
		ErrorKind::FrameSizeUnknown {
			offset: 312,
			frame: 4
		}
	));
	assert_eq!(err.frame_number(), Some(4));
}

#[test_log::test]
fn no_key_frame() {
	let file = temp_file(&frame(COPYRIGHT_BIT));

	let mut editor = FlagEditor::new();
	let err = editor.read_attributes(file.path(), false).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::KeyFrameNotFound));
	assert!(!err.is_format_error());
	assert_eq!(
		err.to_string(),
		format!("The file \"{}\" has no key frame.", file.path().display())
	);

	// Writes don't need one
	let before = editor
		.apply_attributes(file.path(), copyright_everywhere(), false)
		.unwrap();
	assert!(before.matches(copyright_everywhere()));
}

#[test_log::test]
fn errors_from_streams_have_no_path() {
	let mut editor = FlagEditor::new();
	let err = editor
		.read_attributes_from(&mut std::io::Cursor::new(vec![0; 300]), true)
		.unwrap_err();

	assert_eq!(err.path(), None);
	assert_eq!(err.to_string(), "<stream> is not an MP3 file.");
}
