//! Module for handling youtube-dl

use assemble_cmd::assemble_ytdl_command;
use chrono::NaiveDate;
use parse_linetype::LineType;
use std::{
	io::{
		BufRead,
		BufReader,
	},
	time::Duration,
};

use crate::error::IOErrorToError;
use crate::spawn::ytdl::YTDL_BIN_NAME;

pub use download_options::DownloadOptions;

mod assemble_cmd;
mod download_options;
mod parse_linetype;

/// The minimal youtube-dl(p) version that is expected to be used.
///
/// Newer versions can be used to likely unlock extra functionality, but ytfetch is build around this as the minimal in mind.
pub const MINIMAL_YTDL_VERSION: chrono::NaiveDate = chrono::NaiveDate::from_ymd_opt(2023, 3, 3).unwrap();

/// Enum for hooks to know what is currently happening
/// The variants have a certain order in which they are called ([`Starting`](DownloadProgress::Starting) is always first, [`Finished`](DownloadProgress::Finished) always last)
/// but no variant inbetween is guranteed to be called (like a skipped element will not emit any [`Progress`](DownloadProgress::Progress))
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DownloadProgress {
	/// Variant representing that the download command has started
	Starting,
	/// Variant representing a download progress report for the current media
	/// values: (percent)
	Progress(u8),
	/// Variant representing that ytdl found the output file already on disk and did not transfer anything
	AlreadySaved,
	/// Variant representing that the download command has finished
	/// The value is whether any media was actually transferred (and not just found or skipped)
	/// values: (had_download)
	Finished(bool),
}

/// Warn if a version lower than the minimal is used
fn warn_minimal_version(ytdl_version: NaiveDate) {
	if ytdl_version < MINIMAL_YTDL_VERSION {
		warn!(
			"Used {} version ({}) is lower than the recommended minimal {}",
			YTDL_BIN_NAME,
			ytdl_version.format("%Y.%m.%d"),
			MINIMAL_YTDL_VERSION.format("%Y.%m.%d"),
		);
	}
}

/// Download a single media element (one URL)
/// Assumes ytdl and ffmpeg have already been checked to exist and work (like using [`crate::spawn::ytdl::require_ytdl_installed`])
pub fn download_entry<A: DownloadOptions, C: FnMut(DownloadProgress)>(
	options: &A,
	pgcb: C,
) -> Result<(), crate::Error> {
	warn_minimal_version(options.ytdl_version());

	let ytdl_child = {
		let args = assemble_ytdl_command(options)?;

		// merge stderr into stdout
		duct::cmd(YTDL_BIN_NAME, args)
			.stderr_to_stdout()
			.reader()
			.attach_location_err("duct ytdl reader")?
	};

	let stdout_reader = BufReader::new(&ytdl_child);

	handle_stdout(options, pgcb, stdout_reader)?;

	loop {
		// wait loop, because somehow a "ReaderHandle" does not implement "wait", only "try_wait", but have to wait for it to exit here
		match ytdl_child.try_wait() {
			Ok(v) => {
				// only in the "Some" case is the wait actually finished
				if v.is_some() {
					break;
				}
			},
			Err(err) => {
				// ignore duct errors as non-"Err" worthy
				warn!("youtube-dl exited with a non-0 code: {err}");
				break;
			},
		}

		std::thread::sleep(Duration::from_millis(100)); // sleep to save some time between the next wait (to not cause constant cpu spike)
	}

	return Ok(());
}

/// Helper function to handle the output from a spawned ytdl command
/// Returns the last encountered "ERROR:" line as a error, unless a later line indicated recovery
#[inline]
fn handle_stdout<A: DownloadOptions, C: FnMut(DownloadProgress), R: BufRead>(
	options: &A,
	mut pgcb: C,
	reader: R,
) -> Result<(), crate::Error> {
	// report that the downloading is now starting
	pgcb(DownloadProgress::Starting);

	// cache the bool for "print_command_log" to not execute the function for every line (should be a static value)
	let print_stdout = options.print_command_log();

	// value to determine if a media has actually been transferred, or just found
	let mut had_download = false;
	// store the last error line encountered
	let mut last_error = None;

	// HACK: .lines() iter never exits on non-0 exit codes in duct, see https://github.com/oconnor663/duct.rs/issues/112
	for line in reader.lines() {
		let line = match line {
			Ok(v) => v,
			Err(err) => {
				debug!("duct lines reader errored: {}", err);
				break; // handle it as a non-breaking case, because in 99% of cases it is just a error of "command ... exited with code ?"
			},
		};

		// only print the command output when requested
		if print_stdout {
			trace!("ytdl [STDOUT]: \"{}\"", line);
		}

		if let Some(linetype) = LineType::try_from_line(&line) {
			// clear last_error once the linetype is not error anymore, like when ytdl internally recovered and continued
			if linetype != LineType::Error {
				last_error = None;
			}
			match linetype {
				// currently there is nothing that needs to be done with "Ffmpeg" lines
				LineType::Ffmpeg
				// currently there is nothing that needs to be done with "ProviderSpecific" Lines
				| LineType::ProviderSpecific
				// currently there is nothing that needs to be done with "Generic" Lines
				| LineType::Generic => (),
				LineType::Download => {
					had_download = true;
					if let Some(percent) = linetype.try_get_download_percent(line) {
						pgcb(DownloadProgress::Progress(percent));
					}
				},
				LineType::AlreadySaved => {
					pgcb(DownloadProgress::AlreadySaved);
				},
				LineType::Error => {
					// the following is using debug printing, because the line may include escape characters, which would mess-up the printing, but is still good to know when reading
					warn!("Encountered youtube-dl error: {:#?}", line);
					last_error = Some(crate::Error::other(line));
				},
				LineType::Warning => {
					// ytdl warnings are non-fatal, but should still be logged
					warn!("youtube-dl: {:#?}", line);
				},
			}
		} else if !line.is_empty() {
			info!("No type has been found for line \"{}\"", line);
		}
	}

	// report that downloading is now finished
	pgcb(DownloadProgress::Finished(had_download));

	if let Some(last_error) = last_error {
		return Err(last_error);
	}

	return Ok(());
}


#[cfg(test)]
mod test {
	use std::sync::Arc;
	use std::sync::atomic::AtomicUsize;

	use super::*;

	mod handle_stdout {
		use test_utils::{
			TestOptions,
			callback_counter,
		};

		use super::*;

		#[test]
		fn test_basic_single_usage() {
			let expected_pg = &vec![
				DownloadProgress::Starting,
				DownloadProgress::Progress(0),
				DownloadProgress::Progress(50),
				DownloadProgress::Progress(100),
				DownloadProgress::Progress(100),
				DownloadProgress::Progress(0),
				DownloadProgress::Progress(57),
				DownloadProgress::Progress(100),
				DownloadProgress::Progress(100),
				DownloadProgress::Finished(true),
			];
			let expect_index = Arc::new(AtomicUsize::new(0));

			let options = TestOptions::new_handle_stdout(false);

			let input = r#"
[youtube] Extracting URL: https://someurl.com/watch?v=-----------
[youtube] -----------: Downloading webpage
[info] -----------: Downloading 1 format(s): 248+251
[download] Destination: Some Title Here.webm
[download]   0.0% of 78.44MiB at 207.76KiB/s ETA 06:27
[download]  50.0% of 78.44MiB at 526.19KiB/s ETA 01:16
[download] 100% of 78.44MiB at  5.89MiB/s ETA 00:00
[download] 100% of 78.44MiB in 00:07
[download]   0.0% of 3.47MiB at 196.76KiB/s ETA 00:18
[download]  57.6% of 3.47MiB at  9.57MiB/s ETA 00:00
[download] 100% of 3.47MiB at 10.57MiB/s ETA 00:00
[download] 100% of 3.47MiB in 00:00
[Merger] Merging formats into "Some Title Here.mp4"
Deleting original file Some Title Here.f248.webm (pass -k to keep)
Deleting original file Some Title Here.f251.webm (pass -k to keep)
[VideoConvertor] Converting video from webm to mp4; Destination: Some Title Here.mp4
			"#;

			let res = handle_stdout(
				&options,
				callback_counter(&expect_index, expected_pg),
				BufReader::new(input.as_bytes()),
			);

			assert!(res.is_ok());
			assert_eq!(expected_pg.len(), expect_index.load(std::sync::atomic::Ordering::Relaxed));
		}

		#[test]
		fn test_already_saved() {
			let expected_pg = &vec![
				DownloadProgress::Starting,
				DownloadProgress::AlreadySaved,
				DownloadProgress::Finished(false),
			];
			let expect_index = Arc::new(AtomicUsize::new(0));

			let options = TestOptions::new_handle_stdout(false);

			let input = r#"
[youtube] Extracting URL: https://someurl.com/watch?v=-----------
[youtube] -----------: Downloading webpage
[info] -----------: Downloading 1 format(s): 248+251
[download] Some Title Here.mp4 has already been downloaded
			"#;

			let res = handle_stdout(
				&options,
				callback_counter(&expect_index, expected_pg),
				BufReader::new(input.as_bytes()),
			);

			assert!(res.is_ok());
			assert_eq!(expected_pg.len(), expect_index.load(std::sync::atomic::Ordering::Relaxed));
		}

		#[test]
		fn test_trailing_error() {
			let expected_pg = &vec![
				DownloadProgress::Starting,
				DownloadProgress::Progress(2),
				DownloadProgress::Finished(true),
			];
			let expect_index = Arc::new(AtomicUsize::new(0));

			let options = TestOptions::new_handle_stdout(false);

			let input = r#"
[youtube] Extracting URL: https://someurl.com/watch?v=-----------
[youtube] -----------: Downloading webpage
[download] Destination: Some Title Here.mp4
[download]   2.7% of  5.00MiB at    4.18MiB/s ETA 01:09
ERROR: unable to write data: [Errno 28] No space left on device
			"#;

			let res = handle_stdout(
				&options,
				callback_counter(&expect_index, expected_pg),
				BufReader::new(input.as_bytes()),
			);

			assert_eq!(
				Err(crate::Error::other(
					"ERROR: unable to write data: [Errno 28] No space left on device"
				)),
				res
			);
			assert_eq!(expected_pg.len(), expect_index.load(std::sync::atomic::Ordering::Relaxed));
		}

		#[test]
		fn test_error_recovery() {
			// a error line followed by more handled lines counts as recovered
			let expected_pg = &vec![
				DownloadProgress::Starting,
				DownloadProgress::Progress(0),
				DownloadProgress::Progress(100),
				DownloadProgress::Finished(true),
			];
			let expect_index = Arc::new(AtomicUsize::new(0));

			let options = TestOptions::new_handle_stdout(false);

			let input = r#"
[youtube] Extracting URL: https://someurl.com/watch?v=-----------
ERROR: [youtube] -----------: Unable to download webpage: The read operation timed out
[youtube] -----------: Downloading webpage
[download] Destination: Some Title Here.mp4
[download]   0.0% of 78.44MiB at 207.76KiB/s ETA 06:27
[download] 100% of 78.44MiB in 00:07
			"#;

			let res = handle_stdout(
				&options,
				callback_counter(&expect_index, expected_pg),
				BufReader::new(input.as_bytes()),
			);

			assert!(res.is_ok());
			assert_eq!(expected_pg.len(), expect_index.load(std::sync::atomic::Ordering::Relaxed));
		}

		#[test]
		fn test_warning_line() {
			let expected_pg = &vec![
				DownloadProgress::Starting,
				DownloadProgress::Progress(0),
				DownloadProgress::Progress(100),
				DownloadProgress::Finished(true),
			];
			let expect_index = Arc::new(AtomicUsize::new(0));

			let options = TestOptions::new_handle_stdout(false);

			let input = r#"
WARNING: [youtube] Falling back to generic n function search
[youtube] -----------: Downloading webpage
[download] Destination: Some Title Here.mp4
[download]   0.0% of 78.44MiB at 207.76KiB/s ETA 06:27
[download] 100% of 78.44MiB in 00:07
			"#;

			let res = handle_stdout(
				&options,
				callback_counter(&expect_index, expected_pg),
				BufReader::new(input.as_bytes()),
			);

			assert!(res.is_ok());
			assert_eq!(expected_pg.len(), expect_index.load(std::sync::atomic::Ordering::Relaxed));
		}

		#[test]
		fn test_error_without_download() {
			// nothing transferred, error stays the result
			let expected_pg = &vec![DownloadProgress::Starting, DownloadProgress::Finished(false)];
			let expect_index = Arc::new(AtomicUsize::new(0));

			let options = TestOptions::new_handle_stdout(false);

			let input = r#"
[youtube] Extracting URL: https://someurl.com/watch?v=-----------
ERROR: [youtube] -----------: Video unavailable
			"#;

			let res = handle_stdout(
				&options,
				callback_counter(&expect_index, expected_pg),
				BufReader::new(input.as_bytes()),
			);

			assert_eq!(
				Err(crate::Error::other("ERROR: [youtube] -----------: Video unavailable")),
				res
			);
			assert_eq!(expected_pg.len(), expect_index.load(std::sync::atomic::Ordering::Relaxed));
		}
	}
}
