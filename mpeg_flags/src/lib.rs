//! Read and rewrite the attributes embedded in MPEG audio frames.
//!
//! Every frame of an MPEG-1, MPEG-2, or MPEG-2.5 Layer I/II/III stream carries a private bit, a
//! copyright bit, an original bit, and an emphasis field. This crate reads them, checks whether
//! they are consistent across a file, and changes them in place, keeping the CRCs of protected
//! frames valid.
//!
//! Tags (ID3v2, ID3v1, APE, Lyrics3, and a few others) are only detected, never parsed, to find
//! where the frames begin and end.
//!
//! # Examples
//!
//! ## Reading the attributes of a file
//!
//! ```rust,no_run
//! # fn main() -> mpeg_flags::error::Result<()> {
//! use mpeg_flags::FlagEditor;
//! use mpeg_flags::attribute::{AttributeKind, BinaryStatus};
//!
//! let mut editor = FlagEditor::new();
//!
//! // Read every frame, checking that they agree with each other
//! let attributes = editor.read_attributes("track.mp3", true)?;
//!
//! let copyright = attributes.get(AttributeKind::Copyright);
//! if copyright.status() == u8::from(BinaryStatus::Set) && copyright.is_whole_file() {
//! 	println!("Every frame is copyrighted");
//! }
//!
//! // Prints something like "-P  +C* +O* E0*"
//! println!("{attributes}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Changing the attributes of a file
//!
//! ```rust,no_run
//! # fn main() -> mpeg_flags::error::Result<()> {
//! use mpeg_flags::FlagEditor;
//! use mpeg_flags::attribute::AttributeSet;
//!
//! // Clear the private bit, and mark the file as an original, in every frame
//! let requested: AttributeSet = "-P* =C  +O* E. ".parse().expect("valid attribute set");
//!
//! let mut editor = FlagEditor::new();
//! let before = editor.apply_attributes("track.mp3", requested, false)?;
//!
//! if before.matches(requested) {
//! 	println!("No changes needed.");
//! } else {
//! 	println!("The file has been modified.");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Key frames
//!
//! The frames of a file don't necessarily agree on their attributes. The attributes of the
//! *key frame* (the second frame by default, see [`ProcessOptions::key_frame`](config::ProcessOptions::key_frame))
//! are the authoritative ones, and the only ones changed by requests that aren't whole-file.
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod attribute;
pub mod config;
pub mod error;
pub(crate) mod macros;
pub mod mpeg;
pub mod tag;
mod util;

mod editor;

pub use editor::FlagEditor;

pub use util::io;
