use crate::util::{COPYRIGHT_BIT, ORIGINAL_BIT, content, frame, frames, temp_file};
use mpeg_flags::FlagEditor;
use mpeg_flags::attribute::{AttributeKind, AttributeSet, BinaryStatus, EmphasisStatus};
use mpeg_flags::config::ProcessOptions;
use mpeg_flags::mpeg::FrameNumber;
use mpeg_flags::tag::NonFramedData;

#[test_log::test]
fn consistent_copyright() {
	let file = temp_file(&frames(2, COPYRIGHT_BIT));

	let mut editor = FlagEditor::new();
	let attributes = editor.read_attributes(file.path(), true).unwrap();

	let copyright = attributes.get(AttributeKind::Copyright);
	assert_eq!(copyright.status(), u8::from(BinaryStatus::Set));
	assert!(copyright.is_whole_file());

	assert_eq!(attributes.to_string(), "-P* +C* -O* E0*");
	assert_eq!(format!("{attributes:#}"), "NYNN");
	assert_eq!(editor.non_framed_data(), NonFramedData::empty());
}

#[test_log::test]
fn key_frame_wins() {
	let file = temp_file(&[frame(0), frame(COPYRIGHT_BIT)].concat());

	let mut editor = FlagEditor::new();
	let attributes = editor.read_attributes(file.path(), true).unwrap();

	let copyright = attributes.get(AttributeKind::Copyright);
	assert_eq!(copyright.status(), u8::from(BinaryStatus::Set));
	assert!(!copyright.is_whole_file());
	assert_eq!(attributes.to_string(), "-P* +C  -O* E0*");
}

#[test_log::test]
fn key_frame_only() {
	// Everything after the key frame is ignored, even garbage
	let mut data = [frame(ORIGINAL_BIT), frame(ORIGINAL_BIT | 0x01)].concat();
	data.extend(frame(0));
	data.extend([0x55; 300]);
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	let attributes = editor.read_attributes(file.path(), false).unwrap();

	assert_eq!(
		attributes.status(AttributeKind::Emphasis),
		u8::from(EmphasisStatus::Ms5015)
	);
	assert_eq!(attributes.to_string(), "-P  -C  +O  E1 ");
	assert_eq!(format!("{attributes:#}"), "nnym");
}

#[test_log::test]
fn first_frame_as_key_frame() {
	let file = temp_file(&[frame(COPYRIGHT_BIT), frame(0)].concat());

	let mut editor =
		FlagEditor::with_options(ProcessOptions::new().key_frame(FrameNumber::FIRST));
	let attributes = editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(attributes.to_string(), "-P* +C  -O* E0*");

	let mut editor = FlagEditor::new();
	let attributes = editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(attributes.to_string(), "-P* -C  -O* E0*");
}

#[test_log::test]
fn configured_set_selects_the_read() {
	let file = temp_file(&[frame(0), frame(COPYRIGHT_BIT), frame(0)].concat());

	let mut editor = FlagEditor::new();
	let attributes = editor.read(file.path()).unwrap();
	assert_eq!(attributes.to_string(), "-P  +C  -O  E0 ");

	let mut whole_file = AttributeSet::new();
	whole_file.set_whole_file(true);
	editor.set_attributes(whole_file).unwrap();

	let attributes = editor.read(file.path()).unwrap();
	assert_eq!(attributes.to_string(), "-P* +C  -O* E0*");
}

#[test_log::test]
fn single_frame_after_garbage() {
	let mut data = vec![0x01, 0x02, 0x03, 0x04, 0x05];
	data.extend(frame(COPYRIGHT_BIT));
	let file = temp_file(&data);

	// Without a second frame, there's no key frame
	let mut editor = FlagEditor::new();
	assert!(editor.read_attributes(file.path(), true).is_err());
	assert_eq!(
		editor.non_framed_data(),
		NonFramedData::DATA_BEFORE_FIRST_FRAME
	);

	// But the whole-file attributes are still known
	let mut editor =
		FlagEditor::with_options(ProcessOptions::new().key_frame(FrameNumber::FIRST));
	let attributes = editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(attributes.to_string(), "-P* +C* -O* E0*");
	assert_eq!(
		editor.non_framed_data(),
		NonFramedData::DATA_BEFORE_FIRST_FRAME
	);

	// Nothing was written
	assert_eq!(content(file.path()), data);
}

#[test_log::test]
fn reading_from_a_reader() {
	let data = frames(4, ORIGINAL_BIT);

	let mut editor = FlagEditor::new();
	let attributes = editor
		.read_attributes_from(&mut std::io::Cursor::new(&data[..]), true)
		.unwrap();

	assert_eq!(attributes.to_string(), "-P* -C* +O* E0*");
}
