use crate::error::CliError;

use mpeg_flags::attribute::{
	AttributeKind, AttributeSet, BinaryStatus, EmphasisStatus, TextFormat, UNSPECIFIED,
};
use mpeg_flags::config::{CrcMismatch, ProcessOptions};
use mpeg_flags::mpeg::FrameNumber;

use std::path::PathBuf;

use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
	name = "mpflags",
	about = "Lists and changes the private, copyright, original, and emphasis attributes of MP3 \
	         files"
)]
pub(crate) struct Opt {
	/// Set attributes: private (P), copyright (C), original (O)
	#[structopt(long, value_name = "LETTERS")]
	pub(crate) set: Option<String>,

	/// Clear attributes: private (P), copyright (C), original (O)
	#[structopt(long, value_name = "LETTERS")]
	pub(crate) clear: Option<String>,

	/// Emphasis: none (0), 50/15 µs (1), CCITT J.17 (2), reserved (x, only to list files)
	#[structopt(short, long, possible_values = &["0", "1", "2", "x", "X"])]
	pub(crate) emphasis: Option<String>,

	/// List the attributes in the extended format
	#[structopt(short, long, conflicts_with = "short")]
	pub(crate) long: bool,

	/// List the attributes in the compact format
	#[structopt(short, long)]
	pub(crate) short: bool,

	/// Consider every frame, rather than the key frame only
	#[structopt(short, long)]
	pub(crate) whole_file: bool,

	/// Use the first frame as the key frame, rather than the second
	#[structopt(short, long)]
	pub(crate) first_frame: bool,

	/// Write without reading the files first
	#[structopt(long)]
	pub(crate) no_verify: bool,

	/// Treat frames failing the CRC test as errors
	#[structopt(long)]
	pub(crate) strict_crc: bool,

	#[structopt(parse(from_os_str), required = true)]
	pub(crate) paths: Vec<PathBuf>,
}

impl Opt {
	/// The attributes given through `--set`, `--clear`, and `-e`
	///
	/// With `-w`, they are all whole-file.
	pub(crate) fn attributes(&self) -> Result<AttributeSet, CliError> {
		let mut attributes = AttributeSet::new();

		let letters = [(&self.set, BinaryStatus::Set), (&self.clear, BinaryStatus::NotSet)];
		for (letters, status) in letters {
			let Some(letters) = letters else {
				continue;
			};

			for letter in letters.chars() {
				let letter = letter.to_ascii_uppercase();
				let kind = match letter {
					'P' => AttributeKind::Private,
					'C' => AttributeKind::Copyright,
					'O' => AttributeKind::Original,
					_ => return Err(CliError::InvalidAttribute(letter)),
				};

				if attributes.init_attribute_status(kind, status.into()) != UNSPECIFIED {
					return Err(CliError::RepeatedAttribute(letter));
				}
			}
		}

		if let Some(emphasis) = &self.emphasis {
			let status = match emphasis.as_str() {
				"0" => EmphasisStatus::None,
				"1" => EmphasisStatus::Ms5015,
				"2" => EmphasisStatus::CcittJ17,
				_ => EmphasisStatus::Invalid,
			};

			attributes.init_attribute_status(AttributeKind::Emphasis, status.into());
		}

		if self.whole_file {
			attributes.set_whole_file(true);
		}

		Ok(attributes)
	}

	/// Whether any of `-l`, `-s`, `-w`, or `-f` was given, making this a listing
	pub(crate) fn is_reading(&self) -> bool {
		self.long || self.short || self.whole_file || self.first_frame
	}

	pub(crate) fn text_format(&self) -> TextFormat {
		if self.short {
			TextFormat::Compact
		} else {
			TextFormat::Extended
		}
	}

	pub(crate) fn process_options(&self) -> ProcessOptions {
		let key_frame = if self.first_frame {
			FrameNumber::FIRST
		} else {
			FrameNumber::SECOND
		};

		let crc_mismatch = if self.strict_crc {
			CrcMismatch::Fail
		} else {
			CrcMismatch::Ignore
		};

		ProcessOptions::new()
			.key_frame(key_frame)
			.verify_before_write(!self.no_verify)
			.crc_mismatch(crc_mismatch)
	}
}
