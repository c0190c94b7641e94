//! Idea post entity.

use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;

/// A single image reference as delivered by the content API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageRef {
    /// Image URL, possibly relative to the API origin.
    #[serde(default)]
    pub url: Option<String>,
}

/// One image field of a post.
///
/// The API does not normalize these: depending on the post, a field may be
/// missing, a bare URL string, an object carrying a `url`, or a list of such
/// objects. Deserialization is defensive so a malformed field degrades to
/// [`ImageField::Absent`] rather than failing the whole page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ImageField {
    /// Bare URL string.
    Url(String),
    /// Single object with a `url` member.
    Object(ImageRef),
    /// Ordered list of image objects.
    List(Vec<ImageRef>),
    /// Field missing or null.
    #[default]
    Absent,
}

impl ImageField {
    /// Returns the first non-empty candidate URL carried by this field.
    ///
    /// For a list the first element's `url` is consulted; empty and
    /// whitespace-only strings count as no candidate.
    #[must_use]
    pub fn first_url(&self) -> Option<&str> {
        let candidate = match self {
            Self::Url(url) => Some(url.as_str()),
            Self::Object(image) => image.url.as_deref(),
            Self::List(images) => images.first().and_then(|image| image.url.as_deref()),
            Self::Absent => None,
        };
        candidate.filter(|url| !url.trim().is_empty())
    }

    /// Returns true if the field carries no usable URL.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.first_url().is_none()
    }
}

/// A post in the ideas feed.
#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    /// Post identifier.
    pub id: u64,
    /// Post title, may be missing.
    #[serde(default)]
    pub title: Option<String>,
    /// Publication timestamp as delivered (RFC 3339 or `Y-m-d H:M:S`).
    #[serde(default)]
    pub published_at: Option<String>,
    /// Small rendition of the cover image.
    #[serde(default)]
    pub small_image: ImageField,
    /// Medium rendition of the cover image.
    #[serde(default)]
    pub medium_image: ImageField,
    /// Generic cover image.
    #[serde(default)]
    pub image: ImageField,
}

impl Post {
    /// Returns the title, falling back to a stand-in for untitled posts.
    #[must_use]
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "Untitled",
        }
    }

    /// Returns the publication date formatted for display.
    ///
    /// Unparseable timestamps are shown verbatim; missing ones as "No date".
    #[must_use]
    pub fn published_label(&self) -> String {
        let Some(raw) = self.published_at.as_deref() else {
            return "No date".to_string();
        };

        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return parsed.format("%-d %B %Y").to_string();
        }
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return parsed.format("%-d %B %Y").to_string();
        }

        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(json: &str) -> ImageField {
        serde_json::from_str(json).expect("image field should deserialize")
    }

    #[test]
    fn test_field_from_string() {
        let field = field(r#""https://example.com/a.jpg""#);
        assert_eq!(field.first_url(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn test_field_from_object() {
        let field = field(r#"{"url": "/storage/a.jpg"}"#);
        assert_eq!(field.first_url(), Some("/storage/a.jpg"));
    }

    #[test]
    fn test_field_from_list_takes_first() {
        let field = field(r#"[{"url": "/storage/first.jpg"}, {"url": "/storage/second.jpg"}]"#);
        assert_eq!(field.first_url(), Some("/storage/first.jpg"));
    }

    #[test]
    fn test_field_from_null_is_absent() {
        let field = field("null");
        assert_eq!(field, ImageField::Absent);
        assert!(field.is_absent());
    }

    #[test]
    fn test_empty_string_is_no_candidate() {
        assert!(field(r#""""#).first_url().is_none());
        assert!(field(r#"[{"url": "  "}]"#).first_url().is_none());
    }

    #[test]
    fn test_object_without_url_is_no_candidate() {
        assert!(field(r#"{"id": 7}"#).first_url().is_none());
    }

    #[test]
    fn test_post_with_missing_fields() {
        let post: Post = serde_json::from_str(r#"{"id": 42}"#).expect("post");
        assert_eq!(post.display_title(), "Untitled");
        assert_eq!(post.published_label(), "No date");
        assert!(post.small_image.is_absent());
    }

    #[test]
    fn test_published_label_formats() {
        let post: Post = serde_json::from_str(
            r#"{"id": 1, "published_at": "2022-09-05 13:58:10"}"#,
        )
        .expect("post");
        assert_eq!(post.published_label(), "5 September 2022");
    }
}
