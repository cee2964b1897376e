use std::ffi::OsString;

use crate::error::IOErrorToError as _;

use super::download_options::DownloadOptions;

/// Container format everything gets merged and recoded into
const OUTPUT_CONTAINER: &str = "mp4";
/// ffmpeg arguments for the recode post-processor, pinning a widely playable h264 / aac baseline
const RECODE_PPA: &str = "VideoConvertor:-vcodec libx264 -acodec aac -strict experimental";
/// Output file naming, has to line up with the probe done in [`crate::main::saved`]
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Internal Struct for easily adding various types that resolve to [`OsString`] and output a [`Vec<OsString>`]
/// exists because [std::process::Command] is too overkill to use for a argument collection for having to use [duct] later
#[derive(Debug)]
struct ArgsHelper(Vec<OsString>);
impl ArgsHelper {
	/// Create a new instance of ArgsHelper
	pub fn new() -> Self {
		return Self(Vec::default());
	}

	/// Add a new Argument to the list, added at the end and converted to a [`OsString`]
	/// Returns the input reference to "self" for chaining
	pub fn arg<U>(&mut self, arg: U) -> &mut Self
	where
		U: Into<OsString>,
	{
		self.0.push(arg.into());

		return self;
	}

	/// Convert Self to the inner value
	/// Consumes self
	pub fn into_inner(self) -> Vec<OsString> {
		return self.0;
	}
}

impl From<ArgsHelper> for Vec<OsString> {
	fn from(v: ArgsHelper) -> Self {
		return v.into_inner();
	}
}

/// Helper Function to assemble all ytdl command arguments
/// Returns a list of arguments for youtube-dl in order
#[inline]
pub fn assemble_ytdl_command<A: DownloadOptions>(options: &A) -> Result<Vec<OsString>, crate::Error> {
	let mut ytdl_args = ArgsHelper::new();

	let output_dir = options.download_path();
	debug!("YTDL Output dir is \"{}\"", output_dir.to_string_lossy());

	std::fs::create_dir_all(output_dir).attach_path_err(output_dir)?;

	// using unwrap, because it is checked via tests that this statement compiles and is meant to be static
	// 2023.3.24 is the date of the commit that added "--no-quiet"
	if options.ytdl_version() >= chrono::NaiveDate::from_ymd_opt(2023, 3, 24).unwrap() {
		// required to get messages about when a element is skipped because the output file already exists
		ytdl_args.arg("--no-quiet");
	}

	// select the best streams within the height cap, with a pre-merged fallback within the same cap
	let height_cap = options.height_cap();
	ytdl_args.arg("-f").arg(format!(
		"bestvideo[height<={height_cap}]+bestaudio/best[height<={height_cap}]"
	));

	// merge separate video & audio streams into one consistent container
	ytdl_args.arg("--merge-output-format").arg(OUTPUT_CONTAINER);

	// recode into the output container when the source is something else (like webm)
	ytdl_args.arg("--recode-video").arg(OUTPUT_CONTAINER);
	// and pin the codecs used for that recode
	ytdl_args.arg("--ppa").arg(RECODE_PPA);

	// keep going over unavailable media instead of aborting
	ytdl_args.arg("--ignore-errors");

	// ensure ytdl is printing progress reports
	ytdl_args.arg("--progress");
	// ensure ytdl prints the progress reports on a new line
	ytdl_args.arg("--newline");

	// ensure it is not in simulate mode (for example set via extra arguments)
	ytdl_args.arg("--no-simulate");

	// set the output directory and file naming for ytdl
	ytdl_args.arg("-o").arg(output_dir.join(OUTPUT_TEMPLATE));

	// apply all extra arguments
	for extra_arg in &options.extra_ytdl_arguments() {
		ytdl_args.arg(extra_arg);
	}

	// apply the url to download as the last argument
	ytdl_args.arg(options.get_url());

	return Ok(ytdl_args.into());
}
