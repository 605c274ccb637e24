//! Various traits for reading and writing to file-like objects

use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};

// TODO: https://github.com/rust-lang/rust/issues/59359
pub(crate) trait SeekStreamLen: Seek {
	fn stream_len_hack(&mut self) -> std::io::Result<u64> {
		let current_pos = self.stream_position()?;
		let len = self.seek(SeekFrom::End(0))?;

		self.seek(SeekFrom::Start(current_pos))?;

		Ok(len)
	}
}

impl<T> SeekStreamLen for T where T: Seek {}

pub(crate) trait ReadExt: Read + Seek {
	// Fill `buf` from `offset`. Running into the end of the stream is not an error, it
	// returns `false` instead.
	fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> std::io::Result<bool> {
		self.seek(SeekFrom::Start(offset))?;
		match self.read_exact(buf) {
			Ok(()) => Ok(true),
			Err(e) if e.kind() == ErrorKind::UnexpectedEof => Ok(false),
			Err(e) => Err(e),
		}
	}
}

impl<R> ReadExt for R where R: Read + Seek {}

/// Provides a set of methods to read and write to a file-like object
///
/// This is a combination of the [`Read`], [`Write`], and [`Seek`] traits, and is implemented for
/// every type providing them, such as [`File`](std::fs::File) and [`Cursor<Vec<u8>>`](std::io::Cursor).
///
/// Reads never write to the object, so objects only opened for reading can be used for
/// [`FlagEditor::read_attributes_from`](crate::FlagEditor::read_attributes_from).
///
/// Frames are patched in place, the length of the object never changes.
pub trait FileLike: Read + Write + Seek {}

impl<T> FileLike for T where T: Read + Write + Seek {}

// Passes a reader through code that requires `Write`, refusing every write
pub(crate) struct ReadOnly<R>(pub(crate) R);

impl<R> Read for ReadOnly<R>
where
	R: Read,
{
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		self.0.read(buf)
	}
}

impl<R> Seek for ReadOnly<R>
where
	R: Seek,
{
	fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
		self.0.seek(pos)
	}
}

impl<R> Write for ReadOnly<R> {
	fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
		Err(std::io::Error::new(
			ErrorKind::PermissionDenied,
			"the stream is only open for reading",
		))
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}
