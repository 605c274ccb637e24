//! The attributes stored in MPEG frame headers, and sets of them
//!
//! Every frame header carries four attributes: the private bit, the copyright bit, the original bit,
//! and the emphasis. Their values are expressed as *statuses*, which are always the header field's
//! value + 1, so that a status of [`UNSPECIFIED`] (0) can mean "not requested" or "not yet observed".
//!
//! An [`AttributeSet`] holds one status for each attribute, along with a *whole-file* flag stating
//! whether the status was (or must be) the same in every frame of a file.

mod format;
mod set;

pub use format::{DefaultFormatInfo, FormatInfo, TextFormat};
pub use set::{AttributeSet, InvalidAttributeSet, ParseAttributeSetError};

/// The status of an attribute that is neither requested nor observed
pub const UNSPECIFIED: u8 = 0;

/// An attribute stored in every MPEG frame header
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeKind {
	/// The private bit, free for application specific use
	Private = 0,
	/// The copyright bit
	Copyright = 1,
	/// The original bit, set if the bitstream is an original rather than a copy
	Original = 2,
	/// The emphasis the decoder has to undo
	Emphasis = 3,
}

impl AttributeKind {
	/// Every attribute, in order
	pub const ALL: [Self; 4] = [
		AttributeKind::Private,
		AttributeKind::Copyright,
		AttributeKind::Original,
		AttributeKind::Emphasis,
	];

	/// The position of the attribute in [`AttributeKind::ALL`]
	pub const fn index(self) -> usize {
		self as usize
	}

	/// Whether the attribute is stored as a single bit
	pub const fn is_binary(self) -> bool {
		!matches!(self, AttributeKind::Emphasis)
	}

	/// The highest valid status for the attribute
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::attribute::{AttributeKind, BinaryStatus, EmphasisStatus};
	///
	/// assert_eq!(AttributeKind::Copyright.max_status(), u8::from(BinaryStatus::Set));
	/// assert_eq!(AttributeKind::Emphasis.max_status(), u8::from(EmphasisStatus::CcittJ17));
	/// ```
	pub const fn max_status(self) -> u8 {
		if self.is_binary() { 2 } else { 4 }
	}

	pub(crate) const fn header_mask(self) -> u32 {
		match self {
			AttributeKind::Private => 0x100,
			AttributeKind::Copyright => 0x08,
			AttributeKind::Original => 0x04,
			AttributeKind::Emphasis => 0x03,
		}
	}
}

/// The status of the private, copyright, and original attributes
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
#[allow(missing_docs)]
pub enum BinaryStatus {
	NotSet = 1,
	Set = 2,
}

impl From<bool> for BinaryStatus {
	fn from(input: bool) -> Self {
		if input {
			BinaryStatus::Set
		} else {
			BinaryStatus::NotSet
		}
	}
}

impl From<BinaryStatus> for u8 {
	fn from(input: BinaryStatus) -> Self {
		input as u8
	}
}

/// The status of the emphasis attribute
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EmphasisStatus {
	/// No emphasis
	None = 1,
	/// 50/15 µs
	Ms5015 = 2,
	/// The reserved emphasis value
	Invalid = 3,
	/// CCITT J.17
	CcittJ17 = 4,
}

impl From<EmphasisStatus> for u8 {
	fn from(input: EmphasisStatus) -> Self {
		input as u8
	}
}

/// A specified attribute status
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub enum AttributeStatus {
	Binary(BinaryStatus),
	Emphasis(EmphasisStatus),
}

impl AttributeStatus {
	/// Interpret a raw status of `kind`
	///
	/// This returns `None` for [`UNSPECIFIED`] and out of range statuses.
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::attribute::{AttributeKind, AttributeStatus, EmphasisStatus};
	///
	/// assert_eq!(
	/// 	AttributeStatus::new(AttributeKind::Emphasis, 2),
	/// 	Some(AttributeStatus::Emphasis(EmphasisStatus::Ms5015))
	/// );
	/// assert_eq!(AttributeStatus::new(AttributeKind::Private, 3), None);
	/// ```
	pub fn new(kind: AttributeKind, status: u8) -> Option<Self> {
		let status = match (kind.is_binary(), status) {
			(true, 1) => AttributeStatus::Binary(BinaryStatus::NotSet),
			(true, 2) => AttributeStatus::Binary(BinaryStatus::Set),
			(false, 1) => AttributeStatus::Emphasis(EmphasisStatus::None),
			(false, 2) => AttributeStatus::Emphasis(EmphasisStatus::Ms5015),
			(false, 3) => AttributeStatus::Emphasis(EmphasisStatus::Invalid),
			(false, 4) => AttributeStatus::Emphasis(EmphasisStatus::CcittJ17),
			_ => return None,
		};

		Some(status)
	}

	/// The raw status
	pub fn raw(self) -> u8 {
		match self {
			AttributeStatus::Binary(status) => status.into(),
			AttributeStatus::Emphasis(status) => status.into(),
		}
	}
}

/// One attribute of an [`AttributeSet`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AttributeSlot {
	pub(crate) kind: AttributeKind,
	pub(crate) status: u8,
	pub(crate) whole_file: bool,
}

impl AttributeSlot {
	/// The attribute this slot holds
	pub fn kind(self) -> AttributeKind {
		self.kind
	}

	/// The raw status
	pub fn status(self) -> u8 {
		self.status
	}

	/// Whether the status is (or must be) the same across the whole file
	pub fn is_whole_file(self) -> bool {
		self.whole_file
	}

	/// Whether the status is [`UNSPECIFIED`]
	pub fn is_unspecified(self) -> bool {
		self.status == UNSPECIFIED
	}

	/// Whether the status is in the valid range of the attribute
	pub fn is_valid(self) -> bool {
		self.status <= self.kind.max_status()
	}

	/// The typed status, if specified and valid
	pub fn value(self) -> Option<AttributeStatus> {
		AttributeStatus::new(self.kind, self.status)
	}
}
