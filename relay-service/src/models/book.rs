use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const MISSING_PUBLISHER: &str = "N/A";
pub const MISSING_PUBLISHED_DATE: &str = "Unknown";
pub const MISSING_LANGUAGE: &str = "N/A";

/// One page of results from the provider's volume-search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePage {
    pub items: Option<Vec<VolumeItem>>,
    pub total_items: Option<u64>,
}

/// A single provider volume, as returned by both the search and the lookup endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    pub id: Option<String>,
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
    pub language: Option<String>,
    pub categories: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub ratings_count: Option<u32>,
    pub image_links: Option<ImageLinks>,
    pub preview_link: Option<String>,
    pub info_link: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

/// Normalized book as served by the relay. Every field except the rating
/// and the two links is always present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub publisher: String,
    pub published_date: String,
    pub page_count: u32,
    pub language: String,
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings_count: Option<u32>,
    pub thumbnail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_link: Option<String>,
}

impl Book {
    pub fn first_author(&self) -> &str {
        self.authors.first().map(String::as_str).unwrap_or("")
    }
}

// Empty strings from the provider count as missing.
fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| sentinel.to_string())
}

impl From<VolumeItem> for Book {
    fn from(item: VolumeItem) -> Self {
        let info = item.volume_info.unwrap_or_default();

        Book {
            id: item.id.unwrap_or_default(),
            title: info.title.unwrap_or_default(),
            authors: info
                .authors
                .unwrap_or_else(|| vec![UNKNOWN_AUTHOR.to_string()]),
            publisher: or_sentinel(info.publisher, MISSING_PUBLISHER),
            published_date: or_sentinel(info.published_date, MISSING_PUBLISHED_DATE),
            page_count: info.page_count.unwrap_or(0),
            language: or_sentinel(info.language, MISSING_LANGUAGE),
            categories: info.categories.unwrap_or_default(),
            average_rating: info.average_rating,
            ratings_count: info.ratings_count,
            thumbnail: info
                .image_links
                .and_then(|links| links.thumbnail)
                .unwrap_or_default(),
            preview_link: info.preview_link,
            info_link: info.info_link,
        }
    }
}
