use crate::util::{
	COPYRIGHT_BIT, FRAME_SIZE, ORIGINAL_BIT, PRIVATE_BIT, content, frame, frames, protected_frame,
	temp_file,
};
use mpeg_flags::FlagEditor;
use mpeg_flags::attribute::{
	AttributeKind, AttributeSet, BinaryStatus, DefaultFormatInfo, EmphasisStatus, TextFormat,
};
use mpeg_flags::config::{CrcMismatch, ProcessOptions};
use mpeg_flags::mpeg::{FrameNumber, crc16};

fn request(text: &str) -> AttributeSet {
	text.parse().unwrap()
}

#[test_log::test]
fn whole_file_copyright() {
	let file = temp_file(&[frame(0), frame(COPYRIGHT_BIT), frame(0)].concat());

	let mut editor = FlagEditor::new();
	let before = editor
		.apply_attributes(file.path(), request("=P  +C* =O  E. "), false)
		.unwrap();
	assert_eq!(before.to_string(), "-P  +C  -O  E0 ");
	assert!(!before.matches(request("=P  +C* =O  E. ")));

	let data = content(file.path());
	assert_eq!(data, frames(3, COPYRIGHT_BIT));

	let after = editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(after.to_string(), "-P* +C* -O* E0*");
}

#[test_log::test]
fn no_op_request_leaves_the_file_alone() {
	let original = frames(2, ORIGINAL_BIT);
	let file = temp_file(&original);
	let modified = std::fs::metadata(file.path()).unwrap().modified().unwrap();

	let requested = request("=P  =C  +O* E. ");
	let mut editor = FlagEditor::new();
	let before = editor.apply_attributes(file.path(), requested, false).unwrap();

	assert!(before.matches(requested));
	assert_eq!(content(file.path()), original);
	assert_eq!(
		std::fs::metadata(file.path()).unwrap().modified().unwrap(),
		modified
	);
}

#[test_log::test]
fn key_frame_request() {
	let file = temp_file(&frames(3, 0));

	let mut editor = FlagEditor::new();
	editor
		.apply_attributes(file.path(), request("+P  =C  =O  E. "), false)
		.unwrap();

	let data = content(file.path());
	assert_eq!(data[2], 0x10);
	assert_eq!(data[FRAME_SIZE + 2], 0x10 | PRIVATE_BIT);
	assert_eq!(data[2 * FRAME_SIZE + 2], 0x10);
}

#[test_log::test]
fn emphasis() {
	let file = temp_file(&frames(2, 0));

	let mut requested = AttributeSet::new();
	requested.init_attribute_status(AttributeKind::Emphasis, EmphasisStatus::CcittJ17.into());
	requested.set_whole_file(true);
	assert_eq!(
		requested.to_text(TextFormat::Compact, &DefaultFormatInfo),
		"   J"
	);

	let mut editor = FlagEditor::new();
	editor.apply_attributes(file.path(), requested, false).unwrap();

	let data = content(file.path());
	assert_eq!(data[3], 0b11);
	assert_eq!(data[FRAME_SIZE + 3], 0b11);

	let after = editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(after.to_string(), "-P* -C* -O* E2*");
}

#[test_log::test]
fn crc_is_recalculated() {
	let file = temp_file(&[protected_frame(0), protected_frame(0)].concat());

	let mut editor = FlagEditor::new();
	editor
		.apply_attributes(file.path(), request("=P  +C* +O* E. "), false)
		.unwrap();

	let data = content(file.path());
	let expected = protected_frame(COPYRIGHT_BIT | ORIGINAL_BIT);
	assert_eq!(data, [expected.clone(), expected].concat());

	// Everything but the header and the CRC is untouched
	assert_eq!(data[6..FRAME_SIZE], protected_frame(0)[6..]);

	// The file still passes the CRC test
	let mut editor =
		FlagEditor::with_options(ProcessOptions::new().crc_mismatch(CrcMismatch::Fail));
	editor.read_attributes(file.path(), true).unwrap();
}

#[test_log::test]
fn known_crc() {
	// Zeroed side information
	let mut protected = frame(0);
	protected[1] = 0xFA;
	protected[4..6].copy_from_slice(&[0x40, 0xEB]);
	let file = temp_file(&[protected.clone(), protected].concat());

	let mut editor =
		FlagEditor::with_options(ProcessOptions::new().crc_mismatch(CrcMismatch::Fail));
	editor
		.apply_attributes(file.path(), request("=P  +C* =O  E. "), false)
		.unwrap();

	let data = content(file.path());
	assert_eq!(&data[..6], &[0xFF, 0xFA, 0x10, 0x08, 0xC3, 0x88]);
	assert_eq!(crc16(&data[..38]), 0xC388);
}

#[test_log::test]
fn without_verification() {
	let data = [frame(COPYRIGHT_BIT), frame(0)].concat();
	let file = temp_file(&data);

	let options = ProcessOptions::new()
		.verify_before_write(false)
		.key_frame(FrameNumber::FIRST);
	let mut editor = FlagEditor::with_options(options);
	editor.set_attributes(request("=P  -C* =O  E. ")).unwrap();

	let before = editor.apply(file.path()).unwrap();
	assert_eq!(
		before.status(AttributeKind::Copyright),
		u8::from(BinaryStatus::Set)
	);

	assert_eq!(content(file.path()), frames(2, 0));
}

#[test_log::test]
fn writing_to_a_stream() {
	let mut file = std::io::Cursor::new(frames(2, 0));

	let mut editor = FlagEditor::new();
	editor
		.apply_attributes_to(&mut file, request("+P* +C* +O* E. "), false)
		.unwrap();

	let after = editor.read_attributes_from(&mut file, true).unwrap();
	assert_eq!(after.to_string(), "+P* +C* +O* E0*");
}
