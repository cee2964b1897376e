//! Module containing [`MediaEntry`]

/// Titles yt-dlp reports for playlist members that cannot be downloaded
const UNAVAILABLE_TITLES: &[&str] = &["[Private video]", "[Deleted video]", "[Unavailable video]"];

/// A single media element to consider for download, either standalone or one entry of a playlist
#[derive(Debug, Clone, PartialEq)]
pub struct MediaEntry {
	/// The ID of the media
	pub id:       String,
	/// The title of the media, if the provider reported one
	pub title:    Option<String>,
	/// The page URL of the media, usable to download this entry on its own
	pub page_url: Option<String>,
}

impl MediaEntry {
	/// Create a new instance of [`MediaEntry`]
	pub fn new<I: AsRef<str>>(id: I) -> Self {
		return Self {
			id:       id.as_ref().into(),
			title:    None,
			page_url: None,
		};
	}

	/// Builder function to add a title
	pub fn with_title<T: AsRef<str>>(mut self, title: T) -> Self {
		self.title = Some(title.as_ref().into());

		return self;
	}

	/// Builder function to add a page url
	pub fn with_page_url<U: AsRef<str>>(mut self, page_url: U) -> Self {
		self.page_url = Some(page_url.as_ref().into());

		return self;
	}

	/// Get the best url to download this entry with
	/// Falls back to the bare id, which yt-dlp resolves for youtube media
	pub fn best_url(&self) -> &str {
		return self.page_url.as_deref().unwrap_or(&self.id);
	}

	/// Get the title for display purposes, falling back to the id
	pub fn title_or_id(&self) -> &str {
		return self.title.as_deref().unwrap_or(&self.id);
	}

	/// Check if this entry is known to not be downloadable (private / deleted media)
	/// Such entries carry either no title or one of the known placeholder titles
	pub fn is_unavailable(&self) -> bool {
		return match &self.title {
			None => true,
			Some(title) => UNAVAILABLE_TITLES.contains(&title.as_str()),
		};
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_new() {
		assert_eq!(
			MediaEntry {
				id:       "".to_owned(),
				title:    None,
				page_url: None,
			},
			MediaEntry::new("")
		);

		assert_eq!(
			MediaEntry {
				id:       "hello".to_owned(),
				title:    None,
				page_url: None,
			},
			MediaEntry::new("hello")
		);
	}

	#[test]
	fn test_with_title() {
		assert_eq!(
			MediaEntry {
				id:       "someid".to_owned(),
				title:    Some("Hello".to_owned()),
				page_url: None,
			},
			MediaEntry::new("someid").with_title("Hello")
		);
	}

	#[test]
	fn test_with_page_url() {
		assert_eq!(
			MediaEntry {
				id:       "someid".to_owned(),
				title:    None,
				page_url: Some("https://youtube.com/watch?v=someid".to_owned()),
			},
			MediaEntry::new("someid").with_page_url("https://youtube.com/watch?v=someid")
		);
	}

	#[test]
	fn test_best_url() {
		assert_eq!("someid", MediaEntry::new("someid").best_url());

		assert_eq!(
			"https://youtube.com/watch?v=someid",
			MediaEntry::new("someid")
				.with_page_url("https://youtube.com/watch?v=someid")
				.best_url()
		);
	}

	#[test]
	fn test_title_or_id() {
		assert_eq!("someid", MediaEntry::new("someid").title_or_id());

		assert_eq!("Some Title", MediaEntry::new("someid").with_title("Some Title").title_or_id());
	}

	#[test]
	fn test_is_unavailable() {
		// no title at all
		assert!(MediaEntry::new("someid").is_unavailable());

		// placeholder titles
		assert!(MediaEntry::new("someid").with_title("[Private video]").is_unavailable());
		assert!(MediaEntry::new("someid").with_title("[Deleted video]").is_unavailable());

		// a normal title
		assert!(!MediaEntry::new("someid").with_title("Some Title").is_unavailable());
	}
}
