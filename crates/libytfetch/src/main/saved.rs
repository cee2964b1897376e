//! Module for checking whether a media entry already exists on disk

use std::path::{
	Path,
	PathBuf,
};

/// All extensions a finished download may end up with
/// has to line up with the containers assembled in [`crate::main::download`]
pub const SAVED_MEDIA_EXTENSIONS: &[&str] = &["mp4", "mkv", "webm"];

/// Find the saved file for `title` inside `download_path`, if any exists
///
/// A entry counts as saved when a file named "{title}.{ext}" exists for one of [`SAVED_MEDIA_EXTENSIONS`]
pub fn find_saved_media<P, T>(download_path: P, title: T) -> Option<PathBuf>
where
	P: AsRef<Path>,
	T: AsRef<str>,
{
	let download_path = download_path.as_ref();

	for ext in SAVED_MEDIA_EXTENSIONS {
		let media_path = download_path.join(format!("{}.{}", title.as_ref(), ext));

		if media_path.exists() {
			return Some(media_path);
		}
	}

	return None;
}

/// Check if a entry named `title` is already saved in `download_path`
/// Wrapper around [`find_saved_media`] for when the path itself is not needed
pub fn is_media_saved<P, T>(download_path: P, title: T) -> bool
where
	P: AsRef<Path>,
	T: AsRef<str>,
{
	return find_saved_media(download_path, title).is_some();
}
