use crate::util::{
	COPYRIGHT_BIT, FRAME_SIZE, ape, content, frame, frames, id3v1, id3v2, lyrics3v2, temp_file,
};
use mpeg_flags::FlagEditor;
use mpeg_flags::tag::NonFramedData;

// A Brava Software tag of one of the known sizes, starting with a frame header
fn brava() -> Vec<u8> {
	let mut tag = frame(0)[..4].to_vec();
	tag.extend(b"\0\0\0\0\0\0\0\018273645");
	tag.resize(8204 - 48, 0);
	tag.extend(format!("{:<32}{}{:12}", "Brava Software Inc.", "1.00", "").into_bytes());
	tag
}

#[test_log::test]
fn tags_on_both_ends() {
	let leading = id3v2(20);
	let trailing = [ape(40), id3v1()].concat();
	let data = [leading.clone(), frames(3, 0), trailing.clone()].concat();
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	let attributes = editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(attributes.to_string(), "-P* -C* -O* E0*");
	assert_eq!(
		editor.non_framed_data(),
		NonFramedData::ID3V2 | NonFramedData::APE | NonFramedData::ID3V1
	);
	assert_eq!(editor.non_framed_data().to_string(), "ID3v2, ID3v1, APE");

	// Only the frames are touched
	editor
		.apply_attributes(file.path(), "=P  +C* =O  E. ".parse().unwrap(), false)
		.unwrap();

	let modified = content(file.path());
	assert_eq!(modified.len(), data.len());
	assert_eq!(modified[..leading.len()], leading[..]);
	assert_eq!(
		modified[leading.len()..leading.len() + 3 * FRAME_SIZE],
		frames(3, COPYRIGHT_BIT)[..]
	);
	assert_eq!(modified[leading.len() + 3 * FRAME_SIZE..], trailing[..]);
}

#[test_log::test]
fn lyrics3_in_front_of_id3v1() {
	let data = [frames(3, COPYRIGHT_BIT), lyrics3v2("Some lyrics"), id3v1()].concat();
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	let attributes = editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(attributes.to_string(), "-P* +C* -O* E0*");
	assert_eq!(
		editor.non_framed_data(),
		NonFramedData::LYRICS3 | NonFramedData::ID3V1
	);
}

#[test_log::test]
fn brava_tag_bounds_the_scan() {
	let data = [frames(3, 0), brava()].concat();
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	let attributes = editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(attributes.to_string(), "-P* -C* -O* E0*");
	assert_eq!(editor.non_framed_data(), NonFramedData::BRAVA_SOFTWARE);
}

#[test_log::test]
fn mgix_in_front_of_id3v1() {
	let mut mgix = b"MGIX".to_vec();
	mgix.resize(128, b' ');

	let data = [frames(3, 0), mgix, id3v1()].concat();
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(
		editor.non_framed_data(),
		NonFramedData::MGIX | NonFramedData::ID3V1
	);
}

#[test_log::test]
fn lone_id3v1() {
	let data = [frames(2, 0), id3v1()].concat();
	let file = temp_file(&data);

	let mut editor = FlagEditor::new();
	editor.read_attributes(file.path(), true).unwrap();
	assert_eq!(editor.non_framed_data(), NonFramedData::ID3V1);
	assert_eq!(editor.non_framed_data().to_string(), "ID3v1");
}
