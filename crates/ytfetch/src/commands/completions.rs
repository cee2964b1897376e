//! Module for handling the "completions" subcommand

use clap::CommandFactory;
use clap_complete::generate;
use libytfetch::error::IOErrorToError;
use std::io::{
	BufWriter,
	Write,
};

use crate::clap_conf::{
	CliDerive,
	CommandCompletions,
};

/// Handler function for the "completions" subcommand
/// This function is mainly to keep the code structured and sorted
#[inline]
pub fn command_completions(_main_args: &CliDerive, sub_args: &CommandCompletions) -> Result<(), crate::Error> {
	let mut writer: BufWriter<Box<dyn Write>> = match &sub_args.output_file_path {
		Some(v) => {
			if v.exists() {
				return Err(crate::Error::other(format!(
					"Completions output file already exists: \"{}\"",
					v.display()
				)));
			}

			// "parent" returns a empty path for a bare file name, which "create_dir_all" would reject
			if let Some(parent) = v.parent().filter(|p| return !p.as_os_str().is_empty()) {
				std::fs::create_dir_all(parent).attach_path_err(parent)?;
			}

			BufWriter::new(Box::from(std::fs::File::create(v).attach_path_err(v)?))
		},
		None => BufWriter::new(Box::from(std::io::stdout())),
	};

	let mut parsed = CliDerive::command();
	let bin_name = parsed
		.get_bin_name()
		.expect("Expected binary to have a binary name")
		.to_string();
	generate(sub_args.shell, &mut parsed, bin_name, &mut writer);

	return Ok(());
}
