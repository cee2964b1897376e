//! Module for the Session Log, the history file of what happened to each media in a session

use libytfetch::{
	chrono,
	error::IOErrorToError,
};
use std::{
	fs::File,
	io::{
		BufWriter,
		Write,
	},
	path::{
		Path,
		PathBuf,
	},
	sync::Mutex,
};

/// Time format for the prefix of each logged line
const LINE_TIME_FORMAT: &str = "[%Y-%m-%d %H:%M:%S]";
/// Time format for the file name of a new session log file
const FILE_NAME_FORMAT: &str = "log_%Y%m%d_%H%M%S.txt";

/// A append-only log file for one session, where each line is prefixed with a timestamp
/// Each logged line is also echoed to STDOUT, so the session can be followed without opening the file
///
/// The writer is behind a mutex so that one instance can be shared between the main and the worker thread
#[derive(Debug)]
pub struct SessionLog {
	/// Path of the created log file
	path:   PathBuf,
	/// Writer to the created log file
	writer: Mutex<BufWriter<File>>,
}

impl SessionLog {
	/// Create a new session log file inside `log_dir`, creating the directory if it does not exist yet
	pub fn create<P: AsRef<Path>>(log_dir: P) -> Result<Self, crate::Error> {
		let log_dir = log_dir.as_ref();
		std::fs::create_dir_all(log_dir).attach_path_err(log_dir)?;

		let path = log_dir.join(chrono::Local::now().format(FILE_NAME_FORMAT).to_string());
		let writer = BufWriter::new(File::create(&path).attach_path_err(&path)?);

		return Ok(Self {
			path,
			writer: Mutex::new(writer),
		});
	}

	/// Get the path of the created log file
	pub fn path(&self) -> &Path {
		return &self.path;
	}

	/// Append one timestamped line to the log file and echo the message to STDOUT
	/// Writes are flushed immediately, so the file stays usable while the session is still running
	pub fn log<M: AsRef<str>>(&self, msg: M) -> Result<(), crate::Error> {
		let msg = msg.as_ref();

		{
			let mut writer = self
				.writer
				.lock()
				.map_err(|err| return crate::Error::other(format!("Session log lock is poisoned: {err}")))?;

			writeln!(writer, "{} {}", chrono::Local::now().format(LINE_TIME_FORMAT), msg)
				.attach_path_err(&self.path)?;
			writer.flush().attach_path_err(&self.path)?;
		}

		println!("{msg}");

		return Ok(());
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use regex::Regex;

	/// Helper to create a temporary directory for a test
	fn create_test_dir() -> tempfile::TempDir {
		return tempfile::Builder::new()
			.prefix("ytf-test-sessionLog-")
			.tempdir()
			.expect("Expected a temporary directory to be created");
	}

	#[test]
	fn test_file_name_format() {
		let testdir = create_test_dir();

		let session_log = SessionLog::create(testdir.as_ref()).expect("Expected the session log to be created");

		let file_name = session_log
			.path()
			.file_name()
			.expect("Expected the log path to have a file name")
			.to_string_lossy();

		let file_name_regex = Regex::new(r"^log_\d{8}_\d{6}\.txt$").unwrap();
		assert!(
			file_name_regex.is_match(&file_name),
			"file name \"{file_name}\" did not match"
		);
		assert!(session_log.path().exists());
	}

	#[test]
	fn test_lines_are_timestamped() {
		let testdir = create_test_dir();

		let session_log = SessionLog::create(testdir.as_ref()).expect("Expected the session log to be created");

		session_log.log("First line").expect("Expected the line to be written");
		session_log.log("Second line").expect("Expected the line to be written");

		let content = std::fs::read_to_string(session_log.path()).expect("Expected the log file to be readable");
		let lines: Vec<&str> = content.lines().collect();
		assert_eq!(2, lines.len());

		let line_regex = Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\] (.+)$").unwrap();

		let captures_first = line_regex.captures(lines[0]).expect("Expected line 1 to match");
		assert_eq!("First line", &captures_first[1]);
		let captures_second = line_regex.captures(lines[1]).expect("Expected line 2 to match");
		assert_eq!("Second line", &captures_second[1]);
	}

	#[test]
	fn test_multiline_message_keeps_one_timestamp() {
		let testdir = create_test_dir();

		let session_log = SessionLog::create(testdir.as_ref()).expect("Expected the session log to be created");

		// failure messages span two lines, only the first line carries the timestamp
		session_log
			.log("Failed to process video: someurl\nError: some error text")
			.expect("Expected the line to be written");

		let content = std::fs::read_to_string(session_log.path()).expect("Expected the log file to be readable");
		let lines: Vec<&str> = content.lines().collect();
		assert_eq!(2, lines.len());

		let line_regex = Regex::new(r"^\[\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}\] (.+)$").unwrap();

		let captures_first = line_regex.captures(lines[0]).expect("Expected line 1 to match");
		assert_eq!("Failed to process video: someurl", &captures_first[1]);
		assert_eq!("Error: some error text", lines[1]);
	}

	#[test]
	fn test_create_missing_dir() {
		let testdir = create_test_dir();

		let nested = testdir.as_ref().join("logs");
		assert!(!nested.exists());

		let _session_log = SessionLog::create(&nested).expect("Expected the session log to be created");
		assert!(nested.exists());
	}
}
