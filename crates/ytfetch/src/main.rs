//! Binary crate for the `ytfetch` CLI

#[macro_use]
extern crate log;

use colored::Colorize;
use flexi_logger::LogSpecification;
use libytfetch::*;
use std::sync::RwLock;

mod clap_conf;
use clap_conf::*;
mod commands;
mod logger;
mod session_log;
mod state;
mod utils;

/// Store for whether a termination has been requested, shared over all threads
#[derive(Debug, Default)]
pub struct TerminateStore {
	/// Set once a termination signal has been received
	requested: bool,
}

impl TerminateStore {
	/// Get whether a termination has been requested
	pub fn termination_requested(&self) -> bool {
		return self.requested;
	}

	/// Mark that a termination has been requested
	pub fn set_termination_requested(&mut self) {
		self.requested = true;
	}
}

/// Static to track over all threads whether a termination (like CTRL-C) has been requested
pub static TERMINATE: RwLock<TerminateStore> = RwLock::new(TerminateStore { requested: false });

fn main() {
	let mut logger_handle = logger::setup_logger().expect("Expected the logger to be setup without errors");

	let cli_matches = CliDerive::custom_parse();

	// apply the color choice to everything "colored" touches, even if the checks of "colored" would decide otherwise
	colored::control::set_override(cli_matches.enable_colors());

	if cli_matches.debugger {
		warn!("Requesting Debugger");

		#[cfg(debug_assertions)]
		{
			invoke_vscode_debugger();
		}
		#[cfg(not(debug_assertions))]
		{
			println!("Debugger Invocation is only available in Debug Target");
		}
	}

	info!("CLI Verbosity is {}", cli_matches.verbosity);

	// apply cli "verbosity" argument to the log level
	logger_handle.set_new_spec(
		match cli_matches.verbosity {
			0 => LogSpecification::parse("warn"),
			1 => LogSpecification::parse("info"),
			2 => LogSpecification::parse("debug"),
			3.. => LogSpecification::parse("trace"),
		}
		.expect("Expected the LogSpecification to be parseable"),
	);

	install_terminate_handler();

	let res = match &cli_matches.subcommands {
		SubCommands::Download(v) => commands::download::command_download(&cli_matches, v),
		SubCommands::Completions(v) => commands::completions::command_completions(&cli_matches, v),
	};

	if let Err(err) = res {
		error!("A command failed, Error: {}", err);
		eprintln!("{} {}", "An Error occured:".red(), err);
		std::process::exit(1);
	}
}

/// Install the handler for termination signals (like CTRL-C), so that the session can stop in a clean state
fn install_terminate_handler() {
	ctrlc::set_handler(move || {
		// exit immediately when a termination has already been requested before
		if TERMINATE.read().is_ok_and(|v| return v.termination_requested()) {
			info!("Termination requested again, exiting immediately");
			std::process::exit(1);
		}

		info!("Termination requested");
		eprintln!("Termination requested, stopping before the next media");

		if let Ok(mut lock) = TERMINATE.write() {
			lock.set_termination_requested();
		}
	})
	.expect("Expected to be able to install the termination signal handler");
}
