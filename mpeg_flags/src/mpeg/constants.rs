// Bitrates in units of 8 kbit/s
//
// Indexed by [MPEG2/2.5, MPEG1][Layer III, Layer II, Layer I][bitrate index - 1]
pub(crate) const BITRATES: [[[u32; 14]; 3]; 2] = [
	[
		[1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 14, 16, 18, 20],
		[1, 2, 3, 4, 5, 6, 7, 8, 10, 12, 14, 16, 18, 20],
		[4, 6, 7, 8, 10, 12, 14, 16, 18, 20, 22, 24, 28, 32],
	],
	[
		[4, 5, 6, 7, 8, 10, 12, 14, 16, 20, 24, 28, 32, 40],
		[4, 6, 7, 8, 10, 12, 14, 16, 20, 24, 28, 32, 40, 48],
		[4, 8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48, 52, 56],
	],
];

// MPEG2.5 sampling rates divided by 25, indexed by the sampling rate index.
// MPEG2 doubles these, MPEG1 quadruples them.
pub(crate) const SAMPLING_RATES_DIV25: [u32; 3] = [441, 480, 320];

// Raw `id` field values
pub(crate) const MPEG1: u32 = 0b11;
pub(crate) const MPEG2: u32 = 0b10;
pub(crate) const MPEG2_5: u32 = 0b00;

// Raw `layer` field values
pub(crate) const LAYER_I: u32 = 0b11;
pub(crate) const LAYER_II: u32 = 0b10;
pub(crate) const LAYER_III: u32 = 0b01;

pub(crate) const CHANNEL_MODE_JOINT_STEREO: u32 = 0b01;
pub(crate) const CHANNEL_MODE_MONO: u32 = 0b11;

// The largest protected region (header + CRC + side information) is 38 bytes, the
// largest signature we probe for is the 48 byte Brava Software footer
pub(crate) const SCRATCH_BUFFER_SIZE: usize = 48;

pub(crate) const HEADER_SIZE: usize = 4;
pub(crate) const CRC_SIZE: usize = 2;
