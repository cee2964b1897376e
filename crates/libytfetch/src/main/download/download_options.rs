//! Module for the [`DownloadOptions`] trait

use std::{
	ffi::OsStr,
	path::Path,
};

/// Options specific for the [`crate::main::download::download_entry`] function
pub trait DownloadOptions {
	/// Get the path to where the media should be downloaded to
	fn download_path(&self) -> &Path;
	/// Get the URL to download
	fn get_url(&self) -> &str;
	/// Get the height cap for video stream selection
	/// Streams above this height are not considered, the best stream within the cap is taken
	fn height_cap(&self) -> u16;
	/// Get Extra Arguments that should be added to the ytdl command
	fn extra_ytdl_arguments(&self) -> Vec<&OsStr>;
	/// Get whether or not to print out the raw command output lines
	/// STDERR is merged into STDOUT for the download, so with this returning `true` everything is printed with [`log::trace`]
	fn print_command_log(&self) -> bool;
	/// Get the version of the ytdl binary in use
	/// Used to gate arguments that only newer releases understand
	fn ytdl_version(&self) -> chrono::NaiveDate;
}
