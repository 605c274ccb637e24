#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use mpeg_flags::FlagEditor;
use mpeg_flags::attribute::AttributeSet;

fuzz_target!(|data: Vec<u8>| {
	let Some((raw, data)) = data.split_first_chunk::<4>() else {
		return;
	};

	let requested = AttributeSet::from_raw(u32::from_le_bytes(*raw));
	if !requested.is_valid() {
		return;
	}

	let mut file = Cursor::new(data.to_vec());
	let mut editor = FlagEditor::new();
	if editor.apply_attributes_to(&mut file, requested, false).is_ok() {
		let _ = editor.read_attributes_from(&mut file, true);
	}
});
