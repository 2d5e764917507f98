//! Media data model: items, collection blocks, and YouTube URL handling.
//!
//! The serialized form mirrors the portfolio API wire format: camelCase block
//! fields, media `type` as one of `"image" | "video" | "youtube"`, locators
//! under `src` / `thumbnail`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Render strategy of a media item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Youtube,
}

/// A single displayable asset with tags and key/value metadata.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl MediaItem {
    pub fn image(src: String, title: String) -> Self {
        Self {
            id: format!("media-{}", Uuid::new_v4()),
            kind: MediaKind::Image,
            src,
            thumbnail: None,
            title,
            tags: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn video(src: String, thumbnail: Option<String>, title: String) -> Self {
        Self {
            id: format!("media-{}", Uuid::new_v4()),
            kind: MediaKind::Video,
            src,
            thumbnail,
            title,
            tags: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Builds a YouTube item from an extracted 11-character video id.
    pub fn youtube(video_id: &str) -> Self {
        Self {
            id: format!("youtube-{}", Uuid::new_v4()),
            kind: MediaKind::Youtube,
            src: format!("https://www.youtube.com/embed/{video_id}"),
            thumbnail: Some(format!("https://img.youtube.com/vi/{video_id}/0.jpg")),
            title: format!("YouTube Video {video_id}"),
            tags: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// A seeded stand-in slide. The `placeholder://` locator is painted by the
    /// renderer rather than fetched.
    pub fn placeholder(index: usize) -> Self {
        Self {
            id: format!("placeholder-{index}"),
            kind: MediaKind::Image,
            src: "placeholder://200x200".to_string(),
            thumbnail: None,
            title: format!("Placeholder {index}"),
            tags: Vec::new(),
            metadata: BTreeMap::new(),
        }
    }

    /// Tags have set semantics: inserting a duplicate is a no-op.
    /// Returns whether the tag was actually inserted.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Removes a tag by value. Returns whether anything was removed.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }

    pub fn is_placeholder(&self) -> bool {
        self.src.starts_with("placeholder://")
    }

    pub fn is_remote(&self) -> bool {
        self.src.starts_with("http://") || self.src.starts_with("https://")
    }
}

/// A named gallery grouping a cover asset and an ordered list of media assets.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionBlock {
    pub id: String,
    pub name: String,
    pub cover_media: MediaItem,
    pub media: Vec<MediaItem>,
}

impl CollectionBlock {
    /// A freshly seeded block: placeholder cover plus `media_count` placeholder
    /// slides. `number` is 1-based and becomes part of the block identity.
    pub fn seeded(number: usize, media_count: usize) -> Self {
        Self {
            id: format!("collection-{number}"),
            name: format!("Collection {number}"),
            cover_media: MediaItem {
                id: format!("cover-{number}"),
                kind: MediaKind::Image,
                src: "placeholder://400x400".to_string(),
                thumbnail: None,
                title: format!("Cover {number}"),
                tags: Vec::new(),
                metadata: BTreeMap::new(),
            },
            media: placeholder_media(media_count),
        }
    }
}

/// Generates `count` placeholder slides, numbered from 1.
pub fn placeholder_media(count: usize) -> Vec<MediaItem> {
    (1..=count).map(MediaItem::placeholder).collect()
}

// Accepts youtu.be/, /v/, /u/<user>/, /embed/ and watch?v= / &v= forms.
static YOUTUBE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:youtu\.be/|/v/|/u/\w/|embed/|watch\?v=|&v=)([^#&?]*)").unwrap());

/// Extracts an 11-character YouTube video id from an arbitrary URL.
/// Returns `None` when no id of exactly 11 characters is found.
pub fn extract_youtube_id(url: &str) -> Option<&str> {
    let captures = YOUTUBE_ID_RE.captures(url)?;
    let id = captures.get(1)?.as_str();
    (id.len() == 11).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_id_from_watch_url() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_id_from_short_url() {
        assert_eq!(
            extract_youtube_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn extracts_id_from_embed_and_query_forms() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0"),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?feature=shared&v=dQw4w9WgXcQ#t=1"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn rejects_non_urls_and_wrong_length_ids() {
        assert_eq!(extract_youtube_id("not a url"), None);
        assert_eq!(extract_youtube_id("https://youtu.be/short"), None);
    }

    #[test]
    fn tag_insert_is_set_like() {
        let mut item = MediaItem::placeholder(1);
        assert!(item.add_tag("x"));
        assert!(!item.add_tag("x"));
        assert_eq!(item.tags, vec!["x"]);

        assert!(item.remove_tag("x"));
        assert!(!item.remove_tag("x"));
        assert!(item.tags.is_empty());
    }

    #[test]
    fn youtube_item_derives_embed_and_thumbnail() {
        let item = MediaItem::youtube("dQw4w9WgXcQ");
        assert_eq!(item.kind, MediaKind::Youtube);
        assert_eq!(item.src, "https://www.youtube.com/embed/dQw4w9WgXcQ");
        assert_eq!(
            item.thumbnail.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/0.jpg")
        );
    }

    #[test]
    fn block_wire_format_uses_camel_case_keys() {
        let block = CollectionBlock::seeded(1, 2);
        let json = serde_json::to_value(&block).unwrap();
        assert!(json.get("coverMedia").is_some());
        assert_eq!(json["coverMedia"]["type"], "image");
        assert_eq!(json["media"][0]["src"], "placeholder://200x200");
        // Absent thumbnails stay off the wire.
        assert!(json["media"][0].get("thumbnail").is_none());
    }
}
