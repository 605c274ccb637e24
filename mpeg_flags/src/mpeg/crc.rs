const CRC16_POLYNOMIAL: u16 = 0x8005;
const CRC16_INITIAL: u16 = 0xFFFF;

/// The MPEG audio CRC-16 of a protected region
///
/// `region` starts with the frame header, followed by the stored CRC and the data it protects. The
/// checksum covers bytes 2 and 3 of the header and everything after the stored CRC, the frame sync
/// (bytes 0 and 1) and the CRC itself (bytes 4 and 5) are skipped.
///
/// # Examples
///
/// ```rust
/// use mpeg_flags::mpeg::crc16;
///
/// // MPEG1 Layer III, stereo, with all side information zeroed
/// let mut region = [0; 38];
/// region[..4].copy_from_slice(&[0xFF, 0xFA, 0x10, 0x00]);
///
/// assert_eq!(crc16(&region), 0x40EB);
/// ```
pub fn crc16(region: &[u8]) -> u16 {
	let mut crc = CRC16_INITIAL;

	let protected = region
		.iter()
		.enumerate()
		.filter(|(index, _)| *index >= 2 && !(4..6).contains(index))
		.map(|(_, byte)| *byte);

	for byte in protected {
		for bit in (0..8).rev() {
			let data_bit = (byte >> bit) & 1 == 1;
			let high_bit = crc & 0x8000 != 0;

			crc <<= 1;
			if high_bit != data_bit {
				crc ^= CRC16_POLYNOMIAL;
			}
		}
	}

	crc
}
