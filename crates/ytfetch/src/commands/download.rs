//! Module for handling the "download" subcommand

use crate::{
	clap_conf::{
		CliDerive,
		CommandDownload,
	},
	session_log::SessionLog,
	state::DownloadState,
	utils,
};
use indicatif::{
	ProgressBar,
	ProgressStyle,
};
use libytfetch::{
	data::{
		media_entry::MediaEntry,
		url_kind::UrlKind,
	},
	error::{
		CustomThreadJoin,
		IOErrorToError,
	},
	main::{
		download::{
			DownloadOptions,
			DownloadProgress,
			download_entry,
		},
		probe::probe_url,
		saved::find_saved_media,
	},
	spawn::ytdl::require_ytdl_installed,
};
use std::{
	sync::LazyLock,
	time::Duration,
};

/// Static for easily referencing the 100% length of the progressbar
const PG_PERCENT_100: u64 = 100;

/// Progressbar style for the download progress of a single media
static DOWNLOAD_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
	return ProgressStyle::default_bar()
		.template("{prefix:.dim} [{elapsed_precise}] {wide_bar:.cyan/blue} {msg}")
		.expect("Expected the progressbar template to be valid")
		.progress_chars("#>-");
});

/// Helper function to quickly check for a requested termination
fn check_termination() -> Result<(), crate::Error> {
	// handle terminate
	if crate::TERMINATE
		.read()
		.map_err(|err| return crate::Error::other(format!("{err}")))?
		.termination_requested()
	{
		return Err(crate::Error::other("Termination Requested"));
	}

	return Ok(());
}

/// Counters of what happened to all media entries of one URL
#[derive(Debug, Default, PartialEq)]
struct UrlSummary {
	/// How many entries have been newly downloaded
	downloaded: usize,
	/// How many entries have been skipped because they already existed on disk
	skipped:    usize,
	/// How many entries failed or were unavailable
	failed:     usize,
}

/// Handler function for the "download" subcommand
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn command_download(main_args: &CliDerive, sub_args: &CommandDownload) -> Result<(), crate::Error> {
	let ytdl_version = require_ytdl_installed()?;

	let urls = gather_urls(main_args, sub_args)?;

	let session_log = SessionLog::create(&main_args.log_dir)?;
	debug!("Using session log file \"{}\"", session_log.path().display());

	session_log.log("Session started.")?;

	let pgbar: ProgressBar = ProgressBar::new(PG_PERCENT_100).with_style(DOWNLOAD_STYLE.clone());
	utils::set_progressbar(&pgbar, main_args);

	let mut download_state = DownloadState::new(sub_args, &ytdl_version);

	// all downloading happens on a separate thread, which is joined right away
	std::thread::scope(|scope| -> Result<(), crate::Error> {
		let worker_thread = std::thread::Builder::new()
			.name("download worker".to_owned())
			.spawn_scoped(scope, || {
				return download_worker(&urls, &pgbar, &mut download_state, &session_log);
			})
			.attach_location_err("download worker spawn")?;

		session_log.log("Download worker started.")?;

		return worker_thread.join_err()?;
	})?;

	session_log.log("Session finished.")?;

	println!("Session log written to \"{}\"", session_log.path().display());

	return Ok(());
}

/// The actual work of the "download" subcommand, runs on the worker thread
/// A failure of one URL does not end the worker, it gets logged and the next URL is processed
fn download_worker(
	urls: &[String],
	pgbar: &ProgressBar,
	download_state: &mut DownloadState,
	session_log: &SessionLog,
) -> Result<(), crate::Error> {
	let url_len = urls.len();

	for (index, url) in urls.iter().enumerate() {
		// stop before the next url, when a termination was requested
		check_termination()?;

		let kind = UrlKind::classify(url);

		info!("Processing url {}/{} as a {}", index + 1, url_len, kind);
		session_log.log(format!("Processing {kind}: {url}"))?;

		match process_url(url, kind, pgbar, download_state, session_log) {
			Ok(summary) => {
				info!(
					"Finished \"{}\": {} new, {} skipped, {} failed",
					url, summary.downloaded, summary.skipped, summary.failed
				);
			},
			Err(err) => {
				// a termination request should not get logged as a failure of the url
				check_termination()?;

				session_log.log(format!("Failed to process {kind}: {url}\nError: {err}"))?;
			},
		}
	}

	return Ok(());
}

/// Process all media entries of one URL, probing first and then handling entry after entry
fn process_url(
	url: &str,
	kind: UrlKind,
	pgbar: &ProgressBar,
	download_state: &mut DownloadState,
	session_log: &SessionLog,
) -> Result<UrlSummary, crate::Error> {
	let probe = probe_url(url, kind)?;

	let mut summary = UrlSummary::default();

	// entries the provider already reported as gone at probe time
	for _ in 0..probe.unavailable {
		session_log.log("Skipping unavailable video.")?;
		summary.failed += 1;
	}

	let entry_len = probe.entries.len();

	for (index, entry) in probe.entries.iter().enumerate() {
		// stop before the next entry, when a termination was requested
		check_termination()?;

		pgbar.set_prefix(format!("[{}/{}]", index + 1, entry_len));

		if entry.is_unavailable() {
			session_log.log("Skipping unavailable video.")?;
			summary.failed += 1;

			continue;
		}

		let title = entry.title_or_id();

		if let Some(existing) = find_saved_media(download_state.download_path(), title) {
			debug!("Media already exists at \"{}\"", existing.display());
			session_log.log(format!("Skipping already downloaded video: {title}"))?;
			summary.skipped += 1;

			continue;
		}

		session_log.log(format!("Downloading video: {title}"))?;

		match download_single_entry(entry, pgbar, download_state) {
			Ok(()) => {
				session_log.log(format!("Downloaded video: {title}"))?;
				summary.downloaded += 1;
			},
			Err(err) => {
				// continue with the remaining entries, like the downloader itself does with "--ignore-errors"
				session_log.log(format!("Failed to download video: {title}\nError: {err}"))?;
				summary.failed += 1;
			},
		}
	}

	return Ok(summary);
}

/// Download one media entry over the current [`DownloadState`] while driving the progressbar
fn download_single_entry(
	entry: &MediaEntry,
	pgbar: &ProgressBar,
	download_state: &mut DownloadState,
) -> Result<(), crate::Error> {
	download_state.set_current_url(entry.best_url());

	let pgcb = |dpg| match dpg {
		DownloadProgress::Starting => {
			pgbar.reset();
			pgbar.set_length(PG_PERCENT_100);
			// steady-ticks have to be re-done after every "finish_and_clear", because the ticker exits once it notices the finished state
			pgbar.enable_steady_tick(Duration::from_secs(1));
			pgbar.set_message(entry.title_or_id().to_owned());
		},
		DownloadProgress::Progress(percent) => {
			pgbar.set_position(percent.into());
		},
		DownloadProgress::AlreadySaved => {
			// can happen when a same-titled file exists with a extension that is not checked
			debug!("The downloader already had the media on disk");
		},
		DownloadProgress::Finished(had_download) => {
			pgbar.finish_and_clear();
			debug!("Finished a entry, anything transferred: {had_download}");
		},
	};

	return download_entry(&*download_state, pgcb);
}

/// Get the URLs to process, either from the arguments or from a STDIN prompt
fn gather_urls(main_args: &CliDerive, sub_args: &CommandDownload) -> Result<Vec<String>, crate::Error> {
	if !sub_args.urls.is_empty() {
		return Ok(sub_args.urls.clone());
	}

	if !main_args.is_interactive() {
		return Err(crate::Error::other("At least one URL is required"));
	}

	let url = utils::get_text_input("Enter the YouTube video or playlist URL: ")?;

	return Ok(Vec::from([url]));
}
