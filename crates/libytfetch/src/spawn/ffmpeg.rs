//! Module that contains all logic for spawning the "ffmpeg" command
use std::{
	process::{
		Command,
		Output,
		Stdio,
	},
	sync::LazyLock,
};

use regex::Regex;

use crate::error::IOErrorToError;

/// Binary name to spawn for the ffmpeg process
pub const FFMPEG_BIN_NAME: &str = "ffmpeg";

/// Create a new [FFMPEG_BIN_NAME] [Command] instance
#[inline]
#[must_use]
pub fn base_ffmpeg(overwrite: bool) -> Command {
	let mut cmd = super::multiplatform::spawn_command(FFMPEG_BIN_NAME);

	if overwrite {
		cmd.arg("-y"); // always overwrite output path
	}

	// explicitly disable interactive mode
	cmd.arg("-nostdin");

	return cmd;
}

/// Test if ffmpeg is installed and reachable and return the version found.
///
/// This function is not automatically called in the library, it is recommended to run this in any binary trying to run libytfetch.
pub fn require_ffmpeg_installed() -> Result<String, crate::Error> {
	return match ffmpeg_version() {
		Ok(v) => Ok(v),
		Err(err) => {
			log::error!("Could not start or find ffmpeg! Error: {}", err);

			return Err(crate::Error::custom_ioerror_location(
				std::io::ErrorKind::NotFound,
				"FFMPEG Version could not be determined, is it installed and reachable?",
				format!("{} in PATH", FFMPEG_BIN_NAME),
			));
		},
	};
}

/// Regex to parse the version from a "ffmpeg -version" output
/// cap1: version
static FFMPEG_VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	return Regex::new(r"(?mi)^ffmpeg version ([a-z0-9.-]+) Copyright").unwrap();
});

/// Get Version of `ffmpeg`
#[inline]
pub fn ffmpeg_version() -> Result<String, crate::Error> {
	let mut cmd = base_ffmpeg(false);
	cmd.arg("-version");

	let command_output: Output = cmd
		.stderr(Stdio::null())
		.stdout(Stdio::piped())
		.stdin(Stdio::null())
		.spawn()
		.attach_location_err("ffmpeg spawn")?
		.wait_with_output()
		.attach_location_err("ffmpeg wait_with_output")?;

	if !command_output.status.success() {
		return Err(crate::Error::command_unsuccessful("FFMPEG did not successfully exit!"));
	}

	let as_string = String::from_utf8(command_output.stdout)?;

	return ffmpeg_parse_version(&as_string);
}

/// Internal Function to parse the input to a ffmpeg version with regex
#[inline]
fn ffmpeg_parse_version(input: &str) -> Result<String, crate::Error> {
	return Ok(FFMPEG_VERSION_REGEX
		.captures_iter(input)
		.next()
		.ok_or_else(|| return crate::Error::no_captures("FFMPEG Version could not be determined"))?[1]
		.to_owned());
}
