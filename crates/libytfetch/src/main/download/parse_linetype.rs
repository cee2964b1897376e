use std::sync::LazyLock;

use regex::Regex;

/// Line type for a ytdl output line
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum LineType {
	/// Variant for FFmpeg processing lines
	Ffmpeg,
	/// Variant for ytdl download progress lines
	Download,
	/// Variant for provider specific lines (like youtube counting website)
	ProviderSpecific,
	/// Variant for generic lines (like "Deleting original file")
	Generic,
	/// Variant for lines reporting that the output file already exists on disk
	AlreadySaved,
	/// Variant for lines that start with "ERROR:"
	Error,
	/// Variant for lines that start with "WARNING:"
	Warning,
}

impl LineType {
	/// Try to get the correct Variant for a input line
	/// Will return [`None`] if no type has been found
	pub fn try_from_line(input: &str) -> Option<Self> {
		/// basic regex to test if the line is "[something] something", and if it is, return what is inside "[]"
		static BASIC_TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
			return Regex::new(r"(?mi)^\[([\da-z:_]*)\]").unwrap();
		});
		/// regex to check for generic lines
		static GENERIC_TYPE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
			return Regex::new(r"(?mi)^deleting original file").unwrap();
		});
		/// regex to check for lines where the output file already exists
		static YTDL_ALREADY_SAVED_REGEX: LazyLock<Regex> = LazyLock::new(|| {
			return Regex::new(r"(?m)^\[download\] .+ has already been downloaded( and merged)?$").unwrap();
		});

		// check if the line is from a provider-like output
		if let Some(cap) = BASIC_TYPE_REGEX.captures(input) {
			let name = &cap[1];

			if YTDL_ALREADY_SAVED_REGEX.is_match(input) {
				return Some(Self::AlreadySaved);
			}

			// this case is first, because it is the most common case
			if name == "download" {
				return Some(Self::Download);
			}

			if name == "ffmpeg" {
				return Some(Self::Ffmpeg);
			}

			// everything that is not specially handled before, will get treated as being a provider
			return Some(Self::ProviderSpecific);
		}

		// check for Generic lines that dont have a prefix
		if GENERIC_TYPE_REGEX.is_match(input) {
			return Some(Self::Generic);
		}

		if input.starts_with("ERROR:") {
			return Some(Self::Error);
		}

		if input.starts_with("youtube-dl: error:") {
			return Some(Self::Error);
		}

		if input.starts_with("WARNING:") {
			return Some(Self::Warning);
		}

		// if nothing above matches, return None, because no type has been found
		return None;
	}

	/// Try to get the download precent from input
	/// Returns [`None`] if not being of variant [`LineType::Download`] or if no percentage can be found or could not be parsed
	pub fn try_get_download_percent<I: AsRef<str>>(&self, input: I) -> Option<u8> {
		// this function only works with Download lines
		if self != &Self::Download {
			return None;
		}

		/// Regex to parse the download percentage from a line
		/// cap1: precentage(not decimal)
		static DOWNLOAD_PERCENTAGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
			return Regex::new(r"(?mi)^\[download\]\s+(\d{1,3})(?:\.\d)?%").unwrap();
		});

		let input = input.as_ref();

		if let Some(cap) = DOWNLOAD_PERCENTAGE_REGEX.captures(input) {
			let percent_str = &cap[1];

			// directly use the "Result" returned by "parse" and convert it to a "Option"
			return percent_str.parse::<u8>().ok();
		}

		return None;
	}
}
