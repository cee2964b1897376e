use std::path::Path;

use libytfetch::{
	chrono::NaiveDate,
	data::url_kind::UrlKind,
	main::{
		download::{
			DownloadOptions,
			DownloadProgress,
			MINIMAL_YTDL_VERSION,
			download_entry,
		},
		probe::probe_url,
		saved::find_saved_media,
	},
	spawn::ytdl::{
		require_ytdl_installed,
		ytdl_parse_version_naivedate,
	},
};

/// Where this example stores finished downloads
const DOWNLOAD_PATH: &str = "/tmp/download";

struct Options {
	ytdl_version: NaiveDate,
	url:          String,
}

impl DownloadOptions for Options {
	fn download_path(&self) -> &Path {
		return Path::new(DOWNLOAD_PATH);
	}

	fn get_url(&self) -> &str {
		return &self.url;
	}

	fn height_cap(&self) -> u16 {
		return 1080;
	}

	fn extra_ytdl_arguments(&self) -> Vec<&std::ffi::OsStr> {
		return Vec::new();
	}

	fn print_command_log(&self) -> bool {
		return false;
	}

	fn ytdl_version(&self) -> NaiveDate {
		return self.ytdl_version;
	}
}

fn progress_callback(event: DownloadProgress) {
	match event {
		DownloadProgress::Starting => println!("Download starting"),
		DownloadProgress::Progress(percent) => println!("Progress: {percent}%"),
		DownloadProgress::AlreadySaved => println!("Provider reported the file as already saved"),
		DownloadProgress::Finished(had_download) => println!("Finished, transferred anything: {had_download}"),
	}
}

fn main() -> Result<(), libytfetch::Error> {
	let ytdl_version = require_ytdl_installed()?;

	let ytdl_version = ytdl_parse_version_naivedate(&ytdl_version).unwrap_or_else(|_| {
		eprintln!("Could not determine youtube-dl version properly, using default");

		return MINIMAL_YTDL_VERSION;
	});

	let mut args = std::env::args();

	let _ = args.next();

	let url = args.next().expect("Expected a URL as a argument");

	assert!(!url.is_empty(), "Given URL is empty!");

	let kind = UrlKind::classify(&url);
	println!("Given url is a {kind}");

	let probed = probe_url(&url, kind)?;

	if probed.unavailable > 0 {
		println!("{} entries are not available for download", probed.unavailable);
	}

	for entry in probed.entries {
		if entry.is_unavailable() {
			println!("Skipping a unavailable entry");
			continue;
		}

		if let Some(existing) = find_saved_media(DOWNLOAD_PATH, entry.title_or_id()) {
			println!(
				"Skipping \"{}\", already saved at \"{}\"",
				entry.title_or_id(),
				existing.display()
			);
			continue;
		}

		println!("Downloading \"{}\"", entry.title_or_id());

		let options = Options {
			ytdl_version,
			url: entry.best_url().to_owned(),
		};

		download_entry(&options, progress_callback)?;
	}

	println!("Finished downloading everything");

	return Ok(());
}
