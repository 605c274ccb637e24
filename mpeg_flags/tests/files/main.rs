#![allow(missing_docs)]

mod errors;
mod read;
mod tags;
pub(crate) mod util;
mod write;
