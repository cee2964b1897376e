//! Module for Clap related structs (derived)

#![deny(missing_docs)] // comments are used for "--help" generation, so it should always be defined

use clap::{
	ArgAction,
	Parser,
	Subcommand,
};
use clap_complete::Shell;
use is_terminal::IsTerminal;
use libytfetch::error::IOErrorToError;
use std::path::PathBuf;

/// Trait to check and transform all Command Structures
trait Check {
	/// Check and transform self to be correct
	fn check(&mut self) -> Result<(), crate::Error>;
}

#[derive(Debug, Parser, Clone, PartialEq)]
#[command(author, version = env!("YTFETCH_VERSION"), about, long_about = None)]
#[command(bin_name("ytfetch"))]
#[command(args_override_self(true))] // specifying a argument multiple times overwrites the earlier ones
#[command(disable_help_subcommand(true))] // Disable subcommand "help", only "-h --help" should be used
pub struct CliDerive {
	/// Set Logging verbosity (0 - Default - WARN, 1 - INFO, 2 - DEBUG, 3 - TRACE)
	#[arg(short, long, action = ArgAction::Count, env = "YTFETCH_VERBOSITY")]
	pub verbosity:    u8,
	/// Directory to place the session log files in
	#[arg(long = "log-dir", env = "YTFETCH_LOG_DIR", default_value = "./logs")]
	pub log_dir:      PathBuf,
	/// Request vscode lldb debugger before continuing to execute
	#[arg(long)]
	pub debugger:     bool,
	/// Explicitly set interactive / not interactive
	#[arg(long = "interactive")]
	pub explicit_tty: Option<bool>,
	/// Force Color to be active in any mode
	#[arg(long = "color")]
	pub force_color:  bool,

	/// The subcommand to execute
	#[command(subcommand)]
	pub subcommands: SubCommands,
}

impl CliDerive {
	/// Execute clap::Parser::parse and apply custom validation and transformation logic
	#[must_use]
	pub fn custom_parse() -> Self {
		let mut parsed = Self::parse();

		Check::check(&mut parsed).expect("Expected the check to not fail"); // TODO: this should maybe be actually handled

		return parsed;
	}

	/// Get if the mode is interactive or not
	#[must_use]
	pub fn is_interactive(&self) -> bool {
		if let Some(explicit) = self.explicit_tty {
			return explicit;
		}

		return std::io::stdout().is_terminal() && std::io::stdin().is_terminal();
	}

	/// Get if the colors are enabled or not
	#[must_use]
	pub fn enable_colors(&self) -> bool {
		return self.force_color | self.is_interactive();
	}
}

impl Check for CliDerive {
	fn check(&mut self) -> Result<(), crate::Error> {
		// resolve "~" and relative paths before any directory gets created
		self.log_dir = libytfetch::utils::to_absolute(&self.log_dir).attach_path_err(&self.log_dir)?;

		return Check::check(&mut self.subcommands);
	}
}

#[derive(Debug, Subcommand, Clone, PartialEq)]
pub enum SubCommands {
	/// The main purpose of the binary, download URL(s)
	Download(CommandDownload),
	/// Generate shell completions
	Completions(CommandCompletions),
}

impl Check for SubCommands {
	fn check(&mut self) -> Result<(), crate::Error> {
		match self {
			SubCommands::Download(v) => return Check::check(v),
			SubCommands::Completions(v) => return Check::check(v),
		}
	}
}

/// Run and download a given URL(s)
#[derive(Debug, Parser, Clone, PartialEq)]
pub struct CommandDownload {
	/// Output directory for all finished media files
	#[arg(short, long = "out", env = "YTFETCH_OUT", default_value = "./downloads")]
	pub output_path:            PathBuf,
	/// Highest video height (like 1080) to consider for stream selection
	#[arg(long = "max-height", env = "YTFETCH_MAX_HEIGHT", default_value_t = 1080)]
	pub max_height:             u16,
	/// Extra arguments to pass through to the downloader, a value with a space gets split into two arguments
	#[arg(long = "extra-ytdl-args")]
	pub extra_ytdl_args:        Vec<String>,
	/// Print Youtube-DL stdout
	/// This will still require logging verbosity set to 3 or "RUST_LOG=trace"
	#[arg(long = "youtubedl-stdout")]
	pub print_youtubedl_stdout: bool,

	/// The URLs to download, if none are given and the mode is interactive, a URL is prompted for on STDIN
	pub urls: Vec<String>,
}

impl Check for CommandDownload {
	fn check(&mut self) -> Result<(), crate::Error> {
		if self.max_height == 0 {
			return Err(crate::Error::other("\"--max-height\" cannot be \"0\""));
		}

		// resolve "~" and relative paths before anything gets downloaded
		self.output_path = libytfetch::utils::to_absolute(&self.output_path).attach_path_err(&self.output_path)?;

		return Ok(());
	}
}

/// Generate shell completions
#[derive(Debug, Parser, Clone, PartialEq)]
pub struct CommandCompletions {
	/// Shell to generate the completions for
	#[arg(short, long)]
	pub shell:            Shell,
	/// Output file path for the completions, by default STDOUT
	#[arg(short = 'o', long = "out")]
	pub output_file_path: Option<PathBuf>,
}

impl Check for CommandCompletions {
	fn check(&mut self) -> Result<(), crate::Error> {
		return Ok(());
	}
}
