use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A bookmarked manga as it is persisted in the storage slot.
///
/// Field names on the wire are camelCase so the payload stays compatible with
/// shelves written by the web reader (`originalTitle`, `coverImage`, `addedAt`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkRecord {
    pub id: String,
    /// Older shelves may hold `null` or no title at all; both read as `""`.
    #[serde(default, deserialize_with = "title_or_empty")]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl BookmarkRecord {
    /// Builds a record from caller input, stamping it with `added_at`.
    pub fn from_new(manga: NewBookmark, added_at: DateTime<Utc>) -> Self {
        Self {
            id: manga.id,
            title: manga.title,
            original_title: manga.original_title,
            cover_image: manga.cover_image,
            added_at,
        }
    }

    /// Case-insensitive substring match against the display and original titles.
    /// `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .original_title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(needle))
    }
}

fn title_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Manga data handed to the shelf by view code, already normalized from the
/// catalog API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewBookmark {
    pub id: String,
    #[serde(default, deserialize_with = "title_or_empty")]
    pub title: String,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub cover_image: Option<String>,
}

impl NewBookmark {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            original_title: None,
            cover_image: None,
        }
    }

    pub fn with_original_title(mut self, original_title: impl Into<String>) -> Self {
        self.original_title = Some(original_title.into());
        self
    }

    pub fn with_cover_image(mut self, cover_image: impl Into<String>) -> Self {
        self.cover_image = Some(cover_image.into());
        self
    }
}
