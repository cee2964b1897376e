//! Module for probing a url for its media entries without downloading

use std::{
	io::{
		BufRead,
		BufReader,
	},
	process::Stdio,
	thread,
};

use serde::Deserialize;

use crate::{
	data::{
		media_entry::MediaEntry,
		url_kind::UrlKind,
	},
	error::{
		CustomThreadJoin,
		IOErrorToError,
	},
};

/// The result of probing a url
#[derive(Debug, PartialEq, Default)]
pub struct ProbeResult {
	/// All entries the url resolved to, in playlist order
	pub entries:     Vec<MediaEntry>,
	/// How many entries the provider reported as erroring (like private or deleted media)
	pub unavailable: usize,
}

/// One line of "--dump-json" output, reduced to the fields needed
/// flat playlist entries carry "url", full extractions carry "webpage_url"
#[derive(Debug, Deserialize)]
struct RawProbeLine {
	id:          String,
	#[serde(default)]
	title:       Option<String>,
	#[serde(default)]
	url:         Option<String>,
	#[serde(default)]
	webpage_url: Option<String>,
}

impl From<RawProbeLine> for MediaEntry {
	fn from(v: RawProbeLine) -> Self {
		let mut entry = MediaEntry::new(v.id);
		if let Some(title) = v.title {
			entry = entry.with_title(title);
		}
		// prefer the full webpage url over the flat-playlist one
		if let Some(url) = v.webpage_url.or(v.url) {
			entry = entry.with_page_url(url);
		}

		return entry;
	}
}

/// Probe a url for all media entries it resolves to, without downloading anything
/// Wrapper for [`probe_with_command`] with [`crate::spawn::ytdl::base_ytdl`]
pub fn probe_url<T: AsRef<str>>(url: T, kind: UrlKind) -> Result<ProbeResult, crate::Error> {
	let mut cmd = crate::spawn::ytdl::base_ytdl();
	cmd.args(["--simulate", "--dump-json"]);
	if kind == UrlKind::Playlist {
		// flat to not fetch every entry page, ignore-errors to keep going over private media
		cmd.args(["--flat-playlist", "--ignore-errors"]);
	}
	cmd.arg(url.as_ref());

	return probe_with_command(cmd);
}

/// Spawn the `cmd` and parse its output into a [`ProbeResult`]
///
/// This function should not be used directly, use [`probe_url`] instead
pub fn probe_with_command(mut cmd: std::process::Command) -> Result<ProbeResult, crate::Error> {
	let mut result = ProbeResult::default();

	// create a command and spawn it
	let mut child = {
		cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).stdin(Stdio::null());

		cmd.spawn().attach_location_err("ytdl probe spawn")?
	};

	let stdout_reader = BufReader::new(child.stdout.take().ok_or_else(|| {
		return crate::Error::custom_ioerror_location(
			std::io::ErrorKind::BrokenPipe,
			"Failed to get Child STDOUT",
			"ytdl probe",
		);
	})?);

	let stderr_reader = BufReader::new(child.stderr.take().ok_or_else(|| {
		return crate::Error::custom_ioerror_location(
			std::io::ErrorKind::BrokenPipe,
			"Failed to get Child STDERR",
			"ytdl probe",
		);
	})?);

	// offload the stderr reader to a different thread to not block main
	// it also counts how many entries the provider reported as failing
	let stderrreader_thread = thread::Builder::new()
		.name("ytdl probe stderr".to_owned())
		.spawn(move || {
			let mut unavailable = 0usize;
			for line in stderr_reader.lines().filter_map(|v| return v.ok()) {
				if line.starts_with("ERROR:") {
					unavailable += 1;
				}
				info!("ytdl STDERR: {}", line);
			}

			return unavailable;
		})
		.attach_location_err("ytdl probe stderr thread")?;

	for line in stdout_reader.lines() {
		let Ok(line) = line else {
			continue;
		};

		// ignore empty lines, like the last line being a EOF
		if line.is_empty() {
			continue;
		}

		match serde_json::from_str::<RawProbeLine>(&line) {
			Ok(raw) => result.entries.push(raw.into()),
			Err(err) => {
				// a non-json line inbetween (like a late warning), log it and keep going
				warn!("Ignoring non-json probe line, error: {}", err);
			},
		}
	}

	result.unavailable = stderrreader_thread.join_err()?;

	let exit_status = child.wait().attach_location_err("ytdl probe wait")?;

	if !exit_status.success() {
		// with "--ignore-errors" ytdl still exits non-0 when any entry errored,
		// so only treat the exit code as fatal when nothing was found at all
		if result.entries.is_empty() && result.unavailable == 0 {
			return Err(crate::Error::command_unsuccessful(format!(
				"Child Process for probing did not successfully exit: {exit_status}"
			)));
		}

		warn!(
			"probe command exited with \"{}\", but {} entries were found",
			exit_status,
			result.entries.len()
		);
	}

	if result.entries.is_empty() && result.unavailable == 0 {
		return Err(crate::Error::unexpected_eof("Probe did not output any entries"));
	}

	return Ok(result);
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_rawline_into_mediaentry() {
		// flat playlist style line, "url" but no "webpage_url"
		let line = r#"{"_type": "url", "ie_key": "Youtube", "id": "someid1", "url": "https://www.youtube.com/watch?v=someid1", "title": "Some Title 1", "duration": 120}"#;
		let raw: RawProbeLine = serde_json::from_str(line).expect("Expected the line to parse");
		assert_eq!(
			MediaEntry::new("someid1")
				.with_title("Some Title 1")
				.with_page_url("https://www.youtube.com/watch?v=someid1"),
			MediaEntry::from(raw)
		);

		// full extraction style line, "webpage_url" is preferred
		let line = r#"{"id": "someid2", "title": "Some Title 2", "webpage_url": "https://www.youtube.com/watch?v=someid2", "url": "https://direct.stream/media.m3u8"}"#;
		let raw: RawProbeLine = serde_json::from_str(line).expect("Expected the line to parse");
		assert_eq!(
			MediaEntry::new("someid2")
				.with_title("Some Title 2")
				.with_page_url("https://www.youtube.com/watch?v=someid2"),
			MediaEntry::from(raw)
		);

		// unavailable entries have a "null" title
		let line = r#"{"id": "someid3", "title": null, "url": "https://www.youtube.com/watch?v=someid3"}"#;
		let raw: RawProbeLine = serde_json::from_str(line).expect("Expected the line to parse");
		assert!(MediaEntry::from(raw).is_unavailable());
	}

	#[test]
	fn test_basic_func() {
		let mut fake_command = std::process::Command::new("echo");
		fake_command.args([
			// "-e" to explicitly enable escape-sequences
			"-e",
			// concat all together, because otherwise "echo" would add a leading space to each argument
			&[
				r#"{"id": "someid1", "title": "SomeTitle1", "url": "https://www.youtube.com/watch?v=someid1"}"#,
				"\n",
				r#"{"id": "someid2", "title": "SomeTitle2", "url": "https://www.youtube.com/watch?v=someid2"}"#,
				"\n",
			]
			.concat(),
		]);

		let output = probe_with_command(fake_command);

		assert!(output.is_ok());

		assert_eq!(
			ProbeResult {
				entries:     vec![
					MediaEntry::new("someid1")
						.with_title("SomeTitle1")
						.with_page_url("https://www.youtube.com/watch?v=someid1"),
					MediaEntry::new("someid2")
						.with_title("SomeTitle2")
						.with_page_url("https://www.youtube.com/watch?v=someid2"),
				],
				unavailable: 0,
			},
			output.expect("Expected Assert to test Result to be OK")
		);
	}

	#[test]
	fn test_non_json_lines_are_ignored() {
		let mut fake_command = std::process::Command::new("echo");
		fake_command.args([
			"-e",
			&[
				"some stray line\n",
				r#"{"id": "someid1", "title": "SomeTitle1"}"#,
				"\n",
			]
			.concat(),
		]);

		let output = probe_with_command(fake_command);

		assert!(output.is_ok());

		assert_eq!(
			ProbeResult {
				entries:     vec![MediaEntry::new("someid1").with_title("SomeTitle1")],
				unavailable: 0,
			},
			output.expect("Expected Assert to test Result to be OK")
		);
	}

	#[test]
	fn test_unavailable_counted_from_stderr() {
		let mut fake_command = std::process::Command::new("sh");
		fake_command.args([
			"-c",
			// one good entry on stdout, one provider error on stderr, non-0 exit like ytdl with "--ignore-errors"
			r#"echo '{"id": "someid1", "title": "SomeTitle1"}'; echo 'ERROR: [youtube] someid2: Private video' >&2; exit 1"#,
		]);

		let output = probe_with_command(fake_command);

		assert!(output.is_ok());

		assert_eq!(
			ProbeResult {
				entries:     vec![MediaEntry::new("someid1").with_title("SomeTitle1")],
				unavailable: 1,
			},
			output.expect("Expected Assert to test Result to be OK")
		);
	}

	#[test]
	fn test_all_unavailable() {
		let mut fake_command = std::process::Command::new("sh");
		fake_command.args([
			"-c",
			r#"echo 'ERROR: [youtube] someid1: Private video' >&2; echo 'ERROR: [youtube] someid2: Video unavailable' >&2; exit 1"#,
		]);

		let output = probe_with_command(fake_command);

		assert!(output.is_ok());

		assert_eq!(
			ProbeResult {
				entries:     Vec::default(),
				unavailable: 2,
			},
			output.expect("Expected Assert to test Result to be OK")
		);
	}

	#[test]
	fn test_err_exit_status() {
		let mut fake_command = std::process::Command::new("sh");
		fake_command.args([
			"-c", // random exit code that is non-0
			"exit 1",
		]);

		let output = probe_with_command(fake_command);

		assert!(output.is_err());

		assert_eq!(
			crate::Error::command_unsuccessful(
				"Child Process for probing did not successfully exit: exit status: 1".to_owned()
			),
			output.expect_err("Expected Assert to test Result to be ERR")
		);
	}

	#[test]
	fn test_err_no_output() {
		let mut fake_command = std::process::Command::new("sh");
		fake_command.args(["-c", "exit 0"]);

		let output = probe_with_command(fake_command);

		assert!(output.is_err());

		assert_eq!(
			crate::Error::unexpected_eof("Probe did not output any entries".to_owned()),
			output.expect_err("Expected Assert to test Result to be ERR")
		);
	}
}
