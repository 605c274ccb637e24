use super::constants::{
	BITRATES, CHANNEL_MODE_JOINT_STEREO, CHANNEL_MODE_MONO, LAYER_I, LAYER_II, LAYER_III, MPEG1,
	MPEG2, MPEG2_5, SAMPLING_RATES_DIV25,
};
use crate::attribute::AttributeKind;

use std::fmt::{Debug, Formatter};

/// MPEG Audio version
#[derive(Default, PartialEq, Eq, Copy, Clone, Debug)]
#[allow(missing_docs)]
pub enum MpegVersion {
	#[default]
	V1,
	V2,
	V2_5,
}

/// MPEG layer
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Layer {
	Layer1 = 1,
	Layer2 = 2,
	#[default]
	Layer3 = 3,
}

/// Channel mode
#[derive(Default, Copy, Clone, PartialEq, Eq, Debug)]
#[allow(missing_docs)]
pub enum ChannelMode {
	#[default]
	Stereo = 0,
	JointStereo = 1,
	/// Two independent mono channels
	DualChannel = 2,
	SingleChannel = 3,
}

/// The region of a frame covered by its CRC
///
/// The region always starts at the frame header, and includes the header and the CRC itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProtectedRegion {
	/// The frame has no CRC
	Unprotected,
	/// The frame has a CRC, but the size of the region it covers can't be determined
	///
	/// This is the case for Layer II, as well as reserved layers and versions.
	Unknown,
	/// The frame has a CRC covering this many bytes
	Bytes(usize),
}

impl ProtectedRegion {
	/// The classic integer representation of the region
	///
	/// `-1` for [`ProtectedRegion::Unprotected`], `0` for [`ProtectedRegion::Unknown`], and the
	/// size otherwise.
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::mpeg::ProtectedRegion;
	///
	/// assert_eq!(ProtectedRegion::Unprotected.as_raw(), -1);
	/// assert_eq!(ProtectedRegion::Bytes(38).as_raw(), 38);
	/// ```
	pub fn as_raw(self) -> isize {
		match self {
			ProtectedRegion::Unprotected => -1,
			ProtectedRegion::Unknown => 0,
			ProtectedRegion::Bytes(size) => size as isize,
		}
	}
}

/// A 4 byte MPEG audio frame header
///
/// The header is kept in its packed form, every field is read and written through shifts and masks.
/// Most significant bit first, the layout is:
///
/// | Field            | Bits |
/// |------------------|------|
/// | Frame sync       | 11   |
/// | Version (`id`)   | 2    |
/// | Layer            | 2    |
/// | Protection bit   | 1    |
/// | Bitrate index    | 4    |
/// | Sampling rate    | 2    |
/// | Padding          | 1    |
/// | Private          | 1    |
/// | Channel mode     | 2    |
/// | Mode extension   | 2    |
/// | Copyright        | 1    |
/// | Original         | 1    |
/// | Emphasis         | 2    |
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct FrameHeader(u32);

impl FrameHeader {
	/// Unpack a header from its big endian representation
	///
	/// No validation is done, see [`FrameHeader::is_valid`].
	pub const fn from_bytes(bytes: [u8; 4]) -> Self {
		Self(u32::from_be_bytes(bytes))
	}

	/// The big endian representation of the header
	pub const fn to_bytes(self) -> [u8; 4] {
		self.0.to_be_bytes()
	}

	/// The packed header
	pub const fn as_u32(self) -> u32 {
		self.0
	}

	const fn field(self, shift: u32, width: u32) -> u32 {
		(self.0 >> shift) & ((1 << width) - 1)
	}

	/// The raw version field (MPEG1 = 3, MPEG2 = 2, MPEG2.5 = 0, 1 is reserved)
	pub const fn raw_version(self) -> u32 {
		self.field(19, 2)
	}

	/// The raw layer field (Layer I = 3, Layer II = 2, Layer III = 1, 0 is reserved)
	pub const fn raw_layer(self) -> u32 {
		self.field(17, 2)
	}

	/// Whether the frame is followed by a CRC
	///
	/// Note that the bit in the header is set when the CRC is *absent*.
	pub const fn is_protected(self) -> bool {
		self.field(16, 1) == 0
	}

	/// The bitrate index, 0 means "free format" and 15 is invalid
	pub const fn bitrate_index(self) -> u32 {
		self.field(12, 4)
	}

	/// The sampling rate index, 3 is reserved
	pub const fn sampling_rate_index(self) -> u32 {
		self.field(10, 2)
	}

	/// Whether the frame carries a padding slot
	pub const fn has_padding(self) -> bool {
		self.field(9, 1) == 1
	}

	/// The raw channel mode field
	pub const fn raw_channel_mode(self) -> u32 {
		self.field(6, 2)
	}

	/// The mode extension, only meaningful for joint stereo
	pub const fn mode_extension(self) -> u32 {
		self.field(4, 2)
	}

	/// The MPEG version, if it isn't reserved
	pub fn version(self) -> Option<MpegVersion> {
		match self.raw_version() {
			MPEG1 => Some(MpegVersion::V1),
			MPEG2 => Some(MpegVersion::V2),
			MPEG2_5 => Some(MpegVersion::V2_5),
			_ => None,
		}
	}

	/// The MPEG layer, if it isn't reserved
	pub fn layer(self) -> Option<Layer> {
		match self.raw_layer() {
			LAYER_I => Some(Layer::Layer1),
			LAYER_II => Some(Layer::Layer2),
			LAYER_III => Some(Layer::Layer3),
			_ => None,
		}
	}

	/// The channel mode
	pub fn channel_mode(self) -> ChannelMode {
		match self.raw_channel_mode() {
			0b00 => ChannelMode::Stereo,
			0b01 => ChannelMode::JointStereo,
			0b10 => ChannelMode::DualChannel,
			_ => ChannelMode::SingleChannel,
		}
	}

	/// Whether the header is plausible
	///
	/// This only requires the 11 bit frame sync and a bitrate index other than `0xF`. Headers with
	/// reserved fields are valid, but have an unknown size.
	pub const fn is_valid(self) -> bool {
		self.0 >> 21 == 0x7FF && self.bitrate_index() != 0xF
	}

	/// The size of the whole frame in bytes, including the header
	///
	/// This is 0 if the size can't be determined, which is the case for reserved versions, layers,
	/// and sampling rates, as well as free format bitrates.
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::mpeg::FrameHeader;
	///
	/// // MPEG1 Layer III, 128 kbit/s, 44.1 kHz
	/// let header = FrameHeader::from_bytes([0xFF, 0xFB, 0x90, 0x00]);
	/// assert_eq!(header.frame_size(), 417);
	/// ```
	pub fn frame_size(self) -> u32 {
		let version = self.raw_version();
		let sampling_rate_shift = match version {
			MPEG1 => 2,
			MPEG2 => 1,
			MPEG2_5 => 0,
			_ => return 0,
		};

		let layer = self.raw_layer();
		if layer == 0 {
			return 0;
		}

		let bitrate_index = self.bitrate_index();
		if bitrate_index == 0 {
			return 0;
		}

		let Some(sampling_rate_base) = SAMPLING_RATES_DIV25
			.get(self.sampling_rate_index() as usize)
			.copied()
		else {
			return 0;
		};

		let Some(bitrate_div25) = BITRATES[(version & 1) as usize][(layer - 1) as usize]
			.get((bitrate_index - 1) as usize)
			.map(|bitrate| bitrate * 320)
		else {
			return 0;
		};

		let samples_per_frame_div8 = if layer == LAYER_I {
			48
		} else if layer == LAYER_II || version == MPEG1 {
			144
		} else {
			72
		};

		let padding = match (self.has_padding(), layer) {
			(false, _) => 0,
			(true, LAYER_I) => 4,
			(true, _) => 1,
		};

		samples_per_frame_div8 * bitrate_div25 / (sampling_rate_base << sampling_rate_shift)
			+ padding
	}

	/// The region of the frame covered by its CRC
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::mpeg::{FrameHeader, ProtectedRegion};
	///
	/// // MPEG1 Layer III, stereo, with a CRC
	/// let header = FrameHeader::from_bytes([0xFF, 0xFA, 0x90, 0x00]);
	/// assert_eq!(header.protected_region(), ProtectedRegion::Bytes(38));
	/// ```
	pub fn protected_region(self) -> ProtectedRegion {
		if !self.is_protected() {
			return ProtectedRegion::Unprotected;
		}

		let channel_mode = self.raw_channel_mode();
		match self.raw_layer() {
			LAYER_I => match channel_mode {
				CHANNEL_MODE_MONO => ProtectedRegion::Bytes(22),
				CHANNEL_MODE_JOINT_STEREO => {
					ProtectedRegion::Bytes(24 + 2 * self.mode_extension() as usize)
				},
				_ => ProtectedRegion::Bytes(38),
			},
			LAYER_III => {
				let version = self.raw_version();
				if version == 0b01 {
					return ProtectedRegion::Unknown;
				}

				match (version == MPEG1, channel_mode == CHANNEL_MODE_MONO) {
					(true, false) => ProtectedRegion::Bytes(38),
					(false, true) => ProtectedRegion::Bytes(15),
					_ => ProtectedRegion::Bytes(23),
				}
			},
			_ => ProtectedRegion::Unknown,
		}
	}

	/// The status of `kind`, which is always the field's value + 1
	pub fn attribute_status(self, kind: AttributeKind) -> u8 {
		let mask = kind.header_mask();
		((self.0 & mask) >> mask.trailing_zeros()) as u8 + 1
	}

	/// Store `status` (the field's value + 1) in the field of `kind`
	///
	/// An unspecified status (0) leaves the header untouched, out of range values are truncated
	/// to the width of the field.
	pub fn set_attribute_status(&mut self, kind: AttributeKind, status: u8) {
		if status == 0 {
			return;
		}

		let mask = kind.header_mask();
		let value = (u32::from(status) - 1) << mask.trailing_zeros();
		self.0 = (self.0 & !mask) | (value & mask);
	}
}

impl From<u32> for FrameHeader {
	fn from(input: u32) -> Self {
		Self(input)
	}
}

impl From<FrameHeader> for u32 {
	fn from(input: FrameHeader) -> Self {
		input.0
	}
}

impl Debug for FrameHeader {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "FrameHeader({:#010X})", self.0)
	}
}
