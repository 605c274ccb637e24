use super::format::{BINARY_SIGNS, EMPHASIS_PREDICATES};
use super::{AttributeKind, AttributeSlot, DefaultFormatInfo, FormatInfo, TextFormat, UNSPECIFIED};

use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;

const STATUS_MASK: u32 = 0x0F;
const WHOLE_FILE_MASK: u32 = 0x10;

const ALL_STATUSES_MASK: u32 = 0x0F0F_0F0F;
const ALL_WHOLE_FILE_MASK: u32 = 0x1010_1010;

const fn shift(kind: AttributeKind) -> u32 {
	8 * kind as u32
}

/// A status and a whole-file flag for each [`AttributeKind`]
///
/// Each attribute occupies one byte of a packed `u32`, at bit offset `8 * kind.index()`. The low
/// nibble of the byte is the status, bit 4 is the whole-file flag.
///
/// Sets are used in two ways:
///
/// * As a *request*, where a specified status is the value to write, and the whole-file flag
///   states whether it must be written to every frame or only to the key frame.
/// * As a *result*, where a status is the value found in the key frame, and the whole-file flag
///   states whether every frame scanned had the same value.
///
/// # Examples
///
/// ```rust
/// use mpeg_flags::attribute::{AttributeKind, AttributeSet, BinaryStatus};
///
/// let mut set = AttributeSet::new();
/// set.init_attribute_status(AttributeKind::Copyright, BinaryStatus::Set.into());
/// set.set_whole_file(true);
///
/// assert_eq!(set.to_string(), "=P* +C* =O* E.*");
/// assert_eq!(format!("{set:#}"), " Y  ");
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet(u32);

impl AttributeSet {
	/// Creates a new set, with every attribute unspecified and not whole-file
	pub const fn new() -> Self {
		Self(0)
	}

	/// Creates a set from its packed representation
	///
	/// No validation is done, see [`AttributeSet::is_valid`].
	pub const fn from_raw(raw: u32) -> Self {
		Self(raw)
	}

	/// The packed representation
	pub const fn as_raw(self) -> u32 {
		self.0
	}

	/// Get a view of the attribute `kind`
	pub fn get(self, kind: AttributeKind) -> AttributeSlot {
		let byte = self.0 >> shift(kind);
		AttributeSlot {
			kind,
			status: (byte & STATUS_MASK) as u8,
			whole_file: byte & WHOLE_FILE_MASK != 0,
		}
	}

	/// The raw status of the attribute `kind`
	pub fn status(self, kind: AttributeKind) -> u8 {
		self.get(kind).status
	}

	/// Overwrite the status of the attribute `kind`, keeping its whole-file flag
	///
	/// The status is truncated to 4 bits.
	pub fn set_attribute_status(&mut self, kind: AttributeKind, status: u8) {
		let shift = shift(kind);
		self.0 = (self.0 & !(STATUS_MASK << shift)) | ((u32::from(status) & STATUS_MASK) << shift);
	}

	/// Set or clear the whole-file flag of the attribute `kind`
	pub fn set_attribute_whole_file(&mut self, kind: AttributeKind, whole_file: bool) {
		let mask = WHOLE_FILE_MASK << shift(kind);
		if whole_file {
			self.0 |= mask;
		} else {
			self.0 &= !mask;
		}
	}

	/// Set the status of `kind`, unless it is already specified
	///
	/// The first status wins. The previous status is returned, so that callers composing a set
	/// can detect attributes that were specified more than once.
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::attribute::{AttributeKind, AttributeSet, BinaryStatus, UNSPECIFIED};
	///
	/// let mut set = AttributeSet::new();
	///
	/// let previous = set.init_attribute_status(AttributeKind::Private, BinaryStatus::Set.into());
	/// assert_eq!(previous, UNSPECIFIED);
	///
	/// // Already specified, this has no effect
	/// let previous = set.init_attribute_status(AttributeKind::Private, BinaryStatus::NotSet.into());
	/// assert_eq!(previous, u8::from(BinaryStatus::Set));
	/// assert_eq!(set.status(AttributeKind::Private), u8::from(BinaryStatus::Set));
	/// ```
	pub fn init_attribute_status(&mut self, kind: AttributeKind, status: u8) -> u8 {
		let current = self.status(kind);
		if current == UNSPECIFIED {
			self.set_attribute_status(kind, status);
		}

		current
	}

	/// Fold the status of `kind` observed in a frame into the set
	///
	/// * An unspecified attribute adopts `status`, and is marked whole-file, as the first
	///   observation is trivially consistent.
	/// * A differing status from the key frame overwrites the current one, and clears the
	///   whole-file flag.
	/// * A differing status from any other frame only clears the whole-file flag.
	/// * An equal status changes nothing.
	pub fn update_attribute_status(&mut self, kind: AttributeKind, status: u8, is_key_frame: bool) {
		let current = self.status(kind);
		if current == UNSPECIFIED {
			self.set_attribute_status(kind, status);
			self.set_attribute_whole_file(kind, true);
		} else if current != status {
			if is_key_frame {
				self.set_attribute_status(kind, status);
			}

			self.set_attribute_whole_file(kind, false);
		}
	}

	/// Whether this set satisfies the request `other`
	///
	/// Unspecified attributes of `other` are always matched. A specified attribute of `other` is
	/// matched by the same status, and, if `other` requires it to be whole-file, by a whole-file
	/// attribute. The whole-file flags of `self` alone are never checked.
	pub fn matches(self, other: AttributeSet) -> bool {
		AttributeKind::ALL.into_iter().all(|kind| {
			let requested = other.get(kind);
			let actual = self.get(kind);

			requested.is_unspecified()
				|| (requested.status == actual.status
					&& (!requested.whole_file || actual.whole_file))
		})
	}

	/// Keep only the attributes whose whole-file flag equals `whole_file`
	///
	/// The other attributes are cleared entirely.
	pub fn subset(self, whole_file: bool) -> Self {
		let mut subset = self;
		for kind in AttributeKind::ALL {
			if self.get(kind).whole_file != whole_file {
				subset.0 &= !((STATUS_MASK | WHOLE_FILE_MASK) << shift(kind));
			}
		}

		subset
	}

	/// A copy of the set with every status cleared, keeping the whole-file flags
	pub fn unspecified(self) -> Self {
		Self(self.0 & ALL_WHOLE_FILE_MASK)
	}

	/// Set or clear the whole-file flag of every attribute
	pub fn set_whole_file(&mut self, whole_file: bool) {
		if whole_file {
			self.0 |= ALL_WHOLE_FILE_MASK;
		} else {
			self.0 &= !ALL_WHOLE_FILE_MASK;
		}
	}

	/// Whether every status is [`UNSPECIFIED`]
	pub fn is_unspecified(self) -> bool {
		self.0 & ALL_STATUSES_MASK == 0
	}

	/// Whether the set concerns the whole file
	///
	/// A set with specified attributes is whole-file if all of them are. A set without any
	/// (a plain read request) is whole-file if any of its whole-file flags is set.
	pub fn is_whole_file(self) -> bool {
		if self.is_unspecified() {
			return self.0 & ALL_WHOLE_FILE_MASK != 0;
		}

		AttributeKind::ALL
			.into_iter()
			.map(|kind| self.get(kind))
			.filter(|slot| !slot.is_unspecified())
			.all(AttributeSlot::is_whole_file)
	}

	/// Whether every status is within the valid range of its attribute
	pub fn is_valid(self) -> bool {
		AttributeKind::ALL
			.into_iter()
			.all(|kind| self.get(kind).is_valid())
	}

	/// Render the set as text
	///
	/// See [`TextFormat`] for the layouts. Invalid sets are rendered as
	/// [`FormatInfo::invalid_symbol`].
	///
	/// # Examples
	///
	/// ```rust
	/// use mpeg_flags::attribute::{AttributeKind, AttributeSet, DefaultFormatInfo, TextFormat};
	///
	/// let mut set = AttributeSet::new();
	/// set.init_attribute_status(AttributeKind::Emphasis, 2);
	///
	/// assert_eq!(set.to_text(TextFormat::Extended, &DefaultFormatInfo), "=P  =C  =O  E1 ");
	/// assert_eq!(set.to_text(TextFormat::Compact, &DefaultFormatInfo), "   m");
	/// ```
	pub fn to_text(self, format: TextFormat, format_info: &dyn FormatInfo) -> String {
		if !self.is_valid() {
			return format_info.invalid_symbol().to_owned();
		}

		let mut text = String::with_capacity(16);
		for kind in AttributeKind::ALL {
			let slot = self.get(kind);

			if format == TextFormat::Compact {
				text.push(format_info.compact_char(slot));
				continue;
			}

			let letter = format_info.attribute_char(kind);
			let whole_file = if slot.whole_file {
				format_info.whole_file_char()
			} else {
				' '
			};

			if kind.is_binary() {
				text.push(BINARY_SIGNS[slot.status as usize]);
				text.push(letter);
				text.push(whole_file);
				text.push(' ');
			} else {
				text.push(letter);
				text.push(EMPHASIS_PREDICATES[slot.status as usize]);
				text.push(whole_file);
			}
		}

		text
	}
}

impl From<u32> for AttributeSet {
	fn from(input: u32) -> Self {
		Self(input)
	}
}

impl Display for AttributeSet {
	/// Renders [`TextFormat::Extended`], or [`TextFormat::Compact`] with `{:#}`
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let format = if f.alternate() {
			TextFormat::Compact
		} else {
			TextFormat::Extended
		};

		f.write_str(&self.to_text(format, &DefaultFormatInfo))
	}
}

impl Debug for AttributeSet {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AttributeSet")
			.field("text", &self.to_string())
			.field("raw", &format_args!("{:#010X}", self.0))
			.finish()
	}
}

/// Parses the [`TextFormat::Extended`] rendering of [`DefaultFormatInfo`]
///
/// # Examples
///
/// ```rust
/// use mpeg_flags::attribute::{AttributeKind, AttributeSet};
///
/// # fn main() -> Result<(), mpeg_flags::attribute::ParseAttributeSetError> {
/// let set: AttributeSet = "-P  +C* =O  E0*".parse()?;
/// assert_eq!(set.status(AttributeKind::Copyright), 2);
/// assert!(set.get(AttributeKind::Copyright).is_whole_file());
/// assert_eq!(set.to_string(), "-P  +C* =O  E0*");
/// # Ok(()) }
/// ```
impl FromStr for AttributeSet {
	type Err = ParseAttributeSetError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		fn expect(
			chars: &mut std::str::Chars<'_>,
			expected: char,
		) -> Result<(), ParseAttributeSetError> {
			match chars.next() {
				Some(c) if c == expected => Ok(()),
				_ => Err(ParseAttributeSetError),
			}
		}

		fn position(
			chars: &mut std::str::Chars<'_>,
			table: &[char],
		) -> Result<u8, ParseAttributeSetError> {
			let c = chars.next().ok_or(ParseAttributeSetError)?;
			table
				.iter()
				.position(|candidate| *candidate == c)
				.map(|status| status as u8)
				.ok_or(ParseAttributeSetError)
		}

		let mut chars = s.chars();
		let mut set = AttributeSet::new();

		for kind in AttributeKind::ALL {
			let letter = DefaultFormatInfo.attribute_char(kind);
			let status = if kind.is_binary() {
				let status = position(&mut chars, &BINARY_SIGNS)?;
				expect(&mut chars, letter)?;
				status
			} else {
				expect(&mut chars, letter)?;
				position(&mut chars, &EMPHASIS_PREDICATES)?
			};

			let whole_file = match chars.next() {
				Some('*') => true,
				Some(' ') => false,
				_ => return Err(ParseAttributeSetError),
			};

			if kind.is_binary() {
				expect(&mut chars, ' ')?;
			}

			set.set_attribute_status(kind, status);
			set.set_attribute_whole_file(kind, whole_file);
		}

		if chars.next().is_some() {
			return Err(ParseAttributeSetError);
		}

		Ok(set)
	}
}

/// The text isn't a rendering of an [`AttributeSet`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParseAttributeSetError;

impl Display for ParseAttributeSetError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("invalid attribute set text")
	}
}

impl std::error::Error for ParseAttributeSetError {}

/// An [`AttributeSet`] with out of range statuses was used as a request
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InvalidAttributeSet(pub AttributeSet);

impl Display for InvalidAttributeSet {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "attribute set {:#010X} is invalid", self.0.as_raw())
	}
}

impl std::error::Error for InvalidAttributeSet {}
