#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: Vec<u8>| {
	let _ = mpeg_flags::tag::scan_region(&mut Cursor::new(data));
});
