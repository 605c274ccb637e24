//! Various configuration options to control how files are processed

mod process_options;

pub use process_options::{CrcMismatch, ProcessOptions};
