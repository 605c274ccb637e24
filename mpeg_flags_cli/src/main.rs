//! `mpflags`, list and change the private, copyright, original, and emphasis attributes of MP3
//! files
//!
//! ```text
//! mpflags track.mp3                    # List the attributes of the key frame
//! mpflags -w -s *.mp3                  # List the attributes of every frame, compactly
//! mpflags -l --set c *.mp3             # List the copyrighted files
//! mpflags --set c --clear o track.mp3  # Mark every frame as a copyrighted copy
//! ```

mod args;
mod error;
mod process;

use std::process::ExitCode;

use structopt::StructOpt;

fn main() -> ExitCode {
	env_logger::init();

	let opt = args::Opt::from_args();
	log::debug!("{opt:?}");

	match process::run(&opt, &mut std::io::stdout().lock()) {
		Ok(()) => ExitCode::SUCCESS,
		Err(e) => {
			eprintln!("{e}");
			ExitCode::FAILURE
		},
	}
}
