//! Polarity-carrying tag value
//!
//! A tag is the text of one variant attribute of a displayed image. A leading
//! [`MARKER`] means the attribute is being removed rather than added.
//!
//! # Examples
//!
//! ```
//! use spritetags::domain::tags::Tag;
//!
//! let tag = Tag::new("-hello");
//! assert_eq!(tag.name(), "hello");
//! assert!(!tag.added());
//! assert_eq!(tag, Tag::with_polarity("hello", false));
//! ```

use std::borrow::Borrow;
use std::fmt;

/// Reserved leading character marking a removed tag
pub const MARKER: char = '-';

/// An immutable tag; equality, ordering and hashing use the rendered text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag(String);

impl Tag {
    /// Build a tag from raw text, inferring polarity from the leading marker.
    pub fn new(text: impl AsRef<str>) -> Self {
        let text = text.as_ref();
        let added = !text.starts_with(MARKER);
        Self::with_polarity(text, added)
    }

    /// Build a tag with an explicit polarity. At most one leading marker is
    /// stripped from `text`; the rest is the name and is kept verbatim, so
    /// `Tag::new(t)` always renders back to `t`.
    pub fn with_polarity(text: impl AsRef<str>, added: bool) -> Self {
        let text = text.as_ref();
        let name = text.strip_prefix(MARKER).unwrap_or(text);
        if added {
            Tag(name.to_string())
        } else {
            let mut rendered = String::with_capacity(name.len() + 1);
            rendered.push(MARKER);
            rendered.push_str(name);
            Tag(rendered)
        }
    }

    /// The tag without its polarity marker
    pub fn name(&self) -> &str {
        self.0.strip_prefix(MARKER).unwrap_or(&self.0)
    }

    /// False when the tag carries the removal marker
    pub fn added(&self) -> bool {
        !self.0.starts_with(MARKER)
    }

    /// Same name, opposite polarity
    pub fn negated(&self) -> Self {
        if self.added() {
            Tag(format!("{}{}", MARKER, self.0))
        } else {
            Tag(self.name().to_string())
        }
    }

    /// Rendered text, marker included
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Sound because Eq, Ord and Hash are all derived from the inner String.
impl Borrow<str> for Tag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Tag {
    fn from(text: &str) -> Self {
        Tag::new(text)
    }
}

impl From<String> for Tag {
    fn from(text: String) -> Self {
        Tag::new(text)
    }
}

impl From<&String> for Tag {
    fn from(text: &String) -> Self {
        Tag::new(text)
    }
}

impl From<&Tag> for Tag {
    fn from(tag: &Tag) -> Self {
        tag.clone()
    }
}

impl From<Tag> for String {
    fn from(tag: Tag) -> Self {
        tag.0
    }
}

impl PartialEq<str> for Tag {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Tag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_tag() {
        let tag = Tag::new("hello");
        assert_eq!(tag.name(), "hello");
        assert!(tag.added());
        assert_eq!(tag.to_string(), "hello");
    }

    #[test]
    fn test_removed_tag() {
        let tag = Tag::new("-hello");
        assert_eq!(tag.name(), "hello");
        assert!(!tag.added());
        assert_eq!(tag.to_string(), "-hello");
    }

    #[test]
    fn test_round_trip() {
        for text in ["happy", "-sad", "eyes_closed", "-mouth_open", "x-ray", "--x", "-"] {
            assert_eq!(Tag::new(text).as_str(), text);
        }
    }

    #[test]
    fn test_explicit_polarity_inserts_marker() {
        let tag = Tag::with_polarity("hello", false);
        assert_eq!(tag, Tag::new("-hello"));
        assert_eq!(tag.name(), "hello");
        assert_eq!(tag.to_string(), "-hello");
    }

    #[test]
    fn test_explicit_polarity_strips_marker() {
        let tag = Tag::with_polarity("-hello", true);
        assert_eq!(tag, Tag::new("hello"));
        assert!(tag.added());
    }

    #[test]
    fn test_explicit_polarity_keeps_existing_marker() {
        let tag = Tag::with_polarity("-hello", false);
        assert_eq!(tag.as_str(), "-hello");
    }

    #[test]
    fn test_polarities_are_distinct() {
        assert_ne!(Tag::new("x"), Tag::with_polarity("x", false));
    }

    #[test]
    fn test_only_one_marker_is_stripped() {
        let tag = Tag::new("--x");
        assert_eq!(tag.as_str(), "--x");
        assert_eq!(tag.name(), "-x");
        assert!(!tag.added());
        assert_ne!(tag, Tag::new("-x"));
        assert_eq!(Tag::with_polarity("-x", false), tag);
    }

    #[test]
    fn test_negated() {
        assert_eq!(Tag::new("smile").negated(), Tag::new("-smile"));
        assert_eq!(Tag::new("-smile").negated(), Tag::new("smile"));
    }

    #[test]
    fn test_empty_name() {
        let added = Tag::new("");
        assert!(added.added());
        assert_eq!(added.name(), "");

        let removed = Tag::new("-");
        assert!(!removed.added());
        assert_eq!(removed.name(), "");
        assert_eq!(removed.as_str(), "-");
    }

    #[test]
    fn test_compares_with_str() {
        assert_eq!(Tag::new("-sad"), "-sad");
        assert_eq!(String::from(Tag::new("sad")), "sad");
    }
}
