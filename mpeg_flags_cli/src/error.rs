use mpeg_flags::attribute::InvalidAttributeSet;

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Errors that stop a run before (or while) any file is processed
///
/// Errors of individual files aren't part of this, they are reported and the run continues.
#[derive(Debug)]
pub(crate) enum CliError {
	/// An attribute letter given more than once, through `--set` or `--clear`
	RepeatedAttribute(char),
	/// An attribute letter other than `P`, `C`, or `O`
	InvalidAttribute(char),
	/// `-e x` in a run that would write it
	InvalidEmphasisWrite,
	Directory(PathBuf),
	NotFound(PathBuf),
	Request(InvalidAttributeSet),
	Io(std::io::Error),
}

impl std::error::Error for CliError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			CliError::Request(err) => Some(err),
			CliError::Io(err) => Some(err),
			_ => None,
		}
	}
}

impl From<std::io::Error> for CliError {
	fn from(input: std::io::Error) -> Self {
		Self::Io(input)
	}
}

impl From<InvalidAttributeSet> for CliError {
	fn from(input: InvalidAttributeSet) -> Self {
		Self::Request(input)
	}
}

impl Display for CliError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			CliError::RepeatedAttribute(letter) => write!(
				f,
				"The attribute specification \"{letter}\" was repeated."
			),
			CliError::InvalidAttribute(letter) => write!(
				f,
				"The attribute specification \"{letter}\" is not valid."
			),
			CliError::InvalidEmphasisWrite => f.write_str(
				"The -e x option can only be used together with any of the options -l, -s, -w or -f.",
			),
			CliError::Directory(path) => {
				write!(f, "The path {} denotes a directory.", path.display())
			},
			CliError::NotFound(path) => write!(f, "The path {} was not found.", path.display()),
			CliError::Request(err) => write!(f, "{err}"),
			CliError::Io(err) => write!(f, "{err}"),
		}
	}
}
