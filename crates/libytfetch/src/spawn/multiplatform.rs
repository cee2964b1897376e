use std::process::Command;

// This file is seperated so platform quirks only have to be changed in one place

/// Create a [Command] for `binary_name` on non-windows systems
#[cfg(not(target_os = "windows"))]
#[inline]
pub fn spawn_command(binary_name: &str) -> Command {
	return Command::new(binary_name);
}

/// Create a [Command] for `binary_name` on windows / DOS systems
/// rust automatically adds a extension (".exe") if none is specified
/// and searches all paths, including the current binary's path
#[cfg(target_os = "windows")]
#[inline]
pub fn spawn_command(binary_name: &str) -> Command {
	return Command::new(binary_name);
}
