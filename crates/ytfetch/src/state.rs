//! Module for the Download State Struct

use libytfetch::{
	chrono,
	main::download::{
		DownloadOptions,
		MINIMAL_YTDL_VERSION,
	},
	spawn::ytdl::ytdl_parse_version_naivedate,
};
use std::{
	ffi::{
		OsStr,
		OsString,
	},
	path::{
		Path,
		PathBuf,
	},
};

use crate::clap_conf::CommandDownload;

/// Struct to keep the configuration data for the [`DownloadOptions`] trait
/// This data does not change between entries, except for the current URL
#[derive(Debug, PartialEq, Clone)]
pub struct DownloadState {
	/// Extra arguments that get passed through to the downloader
	extra_command_arguments: Vec<OsString>,
	/// Whether to print the raw downloader output lines as trace logs
	print_command_log:       bool,
	/// The path all finished media gets downloaded to
	download_path:           PathBuf,
	/// Highest video height to consider for stream selection
	height_cap:              u16,
	/// The URL that is currently being downloaded
	current_url:             String,
	/// The version of the downloader binary in use
	ytdl_version:            chrono::NaiveDate,
}

impl DownloadState {
	/// Create a new instance of [`DownloadState`] with the required options
	pub fn new(sub_args: &CommandDownload, ytdl_version: &str) -> Self {
		let ytdl_version = match ytdl_parse_version_naivedate(ytdl_version) {
			Ok(v) => v,
			Err(err) => {
				warn!("Could not determine youtube-dl version, assuming the minimal version. Error: {err}");

				MINIMAL_YTDL_VERSION
			},
		};

		return Self {
			extra_command_arguments: sub_args
				.extra_ytdl_args
				.iter()
				.flat_map(|v| {
					// a argument like "--remux-video mp4" has to arrive at the downloader as two arguments
					if let Some((split1, split2)) = v.split_once(' ') {
						return Vec::from([OsString::from(split1), OsString::from(split2)]);
					}

					return Vec::from([OsString::from(v)]);
				})
				.collect(),
			print_command_log: sub_args.print_youtubedl_stdout,
			download_path: sub_args.output_path.clone(),
			height_cap: sub_args.max_height,
			current_url: String::new(),
			ytdl_version,
		};
	}

	/// Set the current URL to be downloaded
	pub fn set_current_url<S: AsRef<str>>(&mut self, new_url: S) {
		// replace the already allocated string with the new URL
		self.current_url.replace_range(.., new_url.as_ref());
	}
}

impl DownloadOptions for DownloadState {
	fn download_path(&self) -> &Path {
		return &self.download_path;
	}

	fn get_url(&self) -> &str {
		// a download without a URL is a programmer error
		assert!(
			!self.current_url.is_empty(),
			"Expected \"current_url\" to be set before a download"
		);

		return &self.current_url;
	}

	fn height_cap(&self) -> u16 {
		return self.height_cap;
	}

	fn extra_ytdl_arguments(&self) -> Vec<&OsStr> {
		return self.extra_command_arguments.iter().map(|v| return v.as_os_str()).collect();
	}

	fn print_command_log(&self) -> bool {
		return self.print_command_log;
	}

	fn ytdl_version(&self) -> chrono::NaiveDate {
		return self.ytdl_version;
	}
}
