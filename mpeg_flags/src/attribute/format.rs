use super::{AttributeKind, AttributeSlot, AttributeStatus, BinaryStatus, EmphasisStatus};

/// The textual representations of an [`AttributeSet`](super::AttributeSet)
///
/// See [`AttributeSet::to_text`](super::AttributeSet::to_text).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TextFormat {
	/// One character per attribute
	///
	/// Unspecified attributes are a space, binary attributes are `n` (not set) or `y` (set), and
	/// the emphasis is `n` (none), `m` (50/15 µs), `j` (CCITT J.17) or `x` (reserved). Whole-file
	/// attributes are uppercase.
	Compact,
	/// Several characters per attribute
	///
	/// Binary attributes are a sign (`=` unspecified, `-` not set, `+` set), the attribute letter,
	/// the whole-file character (or a space), and a trailing space. The emphasis is the attribute
	/// letter, a predicate (`.` unspecified, `0` none, `1` 50/15 µs, `2` CCITT J.17, `x` reserved),
	/// and the whole-file character (or a space).
	///
	/// For example: `+P* =C  -O  E0*`
	#[default]
	Extended,
}

/// The characters used to render an [`AttributeSet`](super::AttributeSet)
pub trait FormatInfo {
	/// The text of a set with out of range statuses
	fn invalid_symbol(&self) -> &str;

	/// Marks whole-file attributes in [`TextFormat::Extended`]
	fn whole_file_char(&self) -> char;

	/// The letter of an attribute in [`TextFormat::Extended`]
	fn attribute_char(&self, kind: AttributeKind) -> char;

	/// The character of an attribute in [`TextFormat::Compact`]
	fn compact_char(&self, slot: AttributeSlot) -> char;
}

/// The culture invariant [`FormatInfo`], which can be parsed back
///
/// # Examples
///
/// ```rust
/// use mpeg_flags::attribute::{AttributeKind, DefaultFormatInfo, FormatInfo};
///
/// assert_eq!(DefaultFormatInfo.attribute_char(AttributeKind::Original), 'O');
/// assert_eq!(DefaultFormatInfo.invalid_symbol(), "Invalid");
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DefaultFormatInfo;

impl FormatInfo for DefaultFormatInfo {
	fn invalid_symbol(&self) -> &str {
		"Invalid"
	}

	fn whole_file_char(&self) -> char {
		'*'
	}

	fn attribute_char(&self, kind: AttributeKind) -> char {
		match kind {
			AttributeKind::Private => 'P',
			AttributeKind::Copyright => 'C',
			AttributeKind::Original => 'O',
			AttributeKind::Emphasis => 'E',
		}
	}

	fn compact_char(&self, slot: AttributeSlot) -> char {
		let c = match slot.value() {
			None => return ' ',
			Some(AttributeStatus::Binary(BinaryStatus::NotSet)) => 'n',
			Some(AttributeStatus::Binary(BinaryStatus::Set)) => 'y',
			Some(AttributeStatus::Emphasis(EmphasisStatus::None)) => 'n',
			Some(AttributeStatus::Emphasis(EmphasisStatus::Ms5015)) => 'm',
			// c would be confused with copyright
			Some(AttributeStatus::Emphasis(EmphasisStatus::CcittJ17)) => 'j',
			Some(AttributeStatus::Emphasis(EmphasisStatus::Invalid)) => 'x',
		};

		if slot.is_whole_file() {
			c.to_ascii_uppercase()
		} else {
			c
		}
	}
}

// Signs of the binary attributes in `TextFormat::Extended`, indexed by status
pub(super) const BINARY_SIGNS: [char; 3] = ['=', '-', '+'];

// Predicates of the emphasis in `TextFormat::Extended`, indexed by status
pub(super) const EMPHASIS_PREDICATES: [char; 5] = ['.', '0', '1', 'x', '2'];
