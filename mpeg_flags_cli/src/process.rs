use crate::args::Opt;
use crate::error::CliError;

use mpeg_flags::FlagEditor;
use mpeg_flags::attribute::{
	AttributeKind, AttributeSet, DefaultFormatInfo, EmphasisStatus, TextFormat,
};

use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FileOutcome {
	/// The file failed to process, and an error was printed
	Unprocessed,
	Unmodified,
	Modified,
}

/// The counts printed after a writing run
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Summary {
	pub(crate) processed: usize,
	pub(crate) modified: usize,
}

impl Summary {
	pub(crate) fn record(&mut self, outcome: FileOutcome) {
		match outcome {
			FileOutcome::Modified => {
				self.modified += 1;
				self.processed += 1;
			},
			FileOutcome::Unmodified => self.processed += 1,
			FileOutcome::Unprocessed => {},
		}
	}

	/// The summary line, if any
	///
	/// A single failed file already had its error printed, so there's nothing to summarize.
	pub(crate) fn message(self, multiple_files: bool) -> Option<String> {
		if !multiple_files {
			return match (self.processed, self.modified) {
				(0, _) => None,
				(_, 0) => Some(String::from("No changes needed.")),
				_ => Some(String::from("The file has been modified.")),
			};
		}

		if self.processed == 0 {
			return Some(String::from("No files processed."));
		}

		let processed = match self.processed {
			1 => String::from("1 file processed"),
			n => format!("{n} files processed"),
		};

		let modified = match self.modified {
			0 => String::from("no changes needed"),
			n => format!("{n} modified"),
		};

		Some(format!("{processed}, {modified}."))
	}
}

/// Process every path given on the command line, writing the listing and summary to `out`
pub(crate) fn run<W>(opt: &Opt, out: &mut W) -> Result<(), CliError>
where
	W: Write,
{
	let filter = opt.attributes()?;
	let reading = opt.is_reading();

	if !reading && filter.status(AttributeKind::Emphasis) == u8::from(EmphasisStatus::Invalid) {
		return Err(CliError::InvalidEmphasisWrite);
	}

	check_paths(&opt.paths)?;

	// Without an attribute to write, the attributes given only select the files to list
	let (requested, listing) = if reading || filter.is_unspecified() {
		(filter.unspecified(), Some(opt.text_format()))
	} else {
		let mut requested = filter;
		requested.set_whole_file(true);
		(requested, None)
	};

	log::debug!("Requested attributes: {requested}, listing: {}", listing.is_some());

	let mut editor = FlagEditor::with_options(opt.process_options());
	editor.set_attributes(requested)?;

	let mut summary = Summary::default();
	for path in &opt.paths {
		let outcome = process_file(&mut editor, path, filter, listing, out)?;
		summary.record(outcome);
	}

	if !requested.is_unspecified() {
		if let Some(message) = summary.message(opt.paths.len() > 1) {
			writeln!(out, "{message}")?;
		}
	}

	Ok(())
}

fn check_paths(paths: &[PathBuf]) -> Result<(), CliError> {
	for path in paths {
		match std::fs::metadata(path) {
			Ok(metadata) if metadata.is_dir() => return Err(CliError::Directory(path.clone())),
			Ok(_) => {},
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(CliError::NotFound(path.clone()));
			},
			// Reported when the file is processed
			Err(_) => {},
		}
	}

	Ok(())
}

/// Apply the editor's attributes to a single file, or read them if it has none
///
/// Errors are printed to `out` along with the listing, so that a redirected listing holds
/// everything. `filter` selects the files listed with `listing`.
pub(crate) fn process_file<W>(
	editor: &mut FlagEditor,
	path: &Path,
	filter: AttributeSet,
	listing: Option<TextFormat>,
	out: &mut W,
) -> std::io::Result<FileOutcome>
where
	W: Write,
{
	let result = if editor.attributes().is_unspecified() {
		editor.read(path)
	} else {
		editor.apply(path)
	};

	let before = match result {
		Ok(before) => before,
		Err(e) => {
			writeln!(out, "ERROR: {e}")?;
			return Ok(FileOutcome::Unprocessed);
		},
	};

	if let Some(format) = listing {
		if before.matches(filter) {
			writeln!(
				out,
				"{}    {}",
				before.to_text(format, &DefaultFormatInfo),
				path.display()
			)?;
		}
	}

	if before.matches(editor.attributes()) {
		Ok(FileOutcome::Unmodified)
	} else {
		Ok(FileOutcome::Modified)
	}
}
