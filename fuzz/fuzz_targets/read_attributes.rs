#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use mpeg_flags::FlagEditor;

fuzz_target!(|data: Vec<u8>| {
	let mut editor = FlagEditor::new();
	let _ = editor.read_attributes_from(&mut Cursor::new(&data), true);
	let _ = editor.read_attributes_from(&mut Cursor::new(&data), false);
});
