//! Utils for the `ytfetch` binary

use crate::clap_conf::CliDerive;
use indicatif::{
	ProgressBar,
	ProgressDrawTarget,
};
use libytfetch::error::IOErrorToError;
use std::io::Write;

/// Helper function to set the progressbar to a draw target if mode is interactive
pub fn set_progressbar(bar: &ProgressBar, main_args: &CliDerive) {
	if main_args.is_interactive() {
		bar.set_draw_target(ProgressDrawTarget::stderr());
	}
}

/// Get free-text input from STDIN, repeating the prompt until the input is non-empty
pub fn get_text_input(msg: &str) -> Result<String, crate::Error> {
	loop {
		print!("{msg}");
		// ensure the message is printed before reading
		std::io::stdout().flush().attach_location_err("stdout flush")?;

		let mut input = String::new();
		std::io::stdin()
			.read_line(&mut input)
			.attach_location_err("stdin read_line")?;

		let input = input.trim();

		if input.is_empty() {
			// special case when empty, to more emphasize that its empty
			println!("... Invalid Input: (Empty)");
			continue;
		}

		return Ok(input.to_owned());
	}
}
