//! Module containing [`UrlKind`]

/// What a input URL denotes, a single media element or a collection of them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
	/// URL points to a single media element
	Single,
	/// URL points to a collection of media elements
	Playlist,
}

impl UrlKind {
	/// Classify a URL, a URL is considered a playlist if it carries a "list=" query fragment
	/// This is a plain substring check, no URL parsing is done
	pub fn classify<U: AsRef<str>>(url: U) -> Self {
		if url.as_ref().contains("list=") {
			return Self::Playlist;
		}

		return Self::Single;
	}
}

impl std::fmt::Display for UrlKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		return write!(
			f,
			"{}",
			match self {
				Self::Single => "video",
				Self::Playlist => "playlist",
			}
		);
	}
}
