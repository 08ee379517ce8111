use std::fmt;

use serde::{Deserialize, Serialize};

// ── Common ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub path: String,
    pub extension: String,
}

impl Thumbnail {
    /// `path.extension`, with a plain `http://` scheme upgraded to `https://`.
    pub fn secure_url(&self) -> String {
        let url = format!("{}.{}", self.path, self.extension);
        match url.strip_prefix("http://") {
            Some(rest) => format!("https://{rest}"),
            None => url,
        }
    }
}

/// A labelled link, e.g. `{ "type": "detail", "url": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlLink {
    #[serde(rename = "type")]
    pub label: String,
    pub url: String,
}

/// One page of an offset-paginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedResult<T> {
    #[serde(default)]
    pub offset: u32,
    #[serde(default)]
    pub limit: u32,
    pub total: u32,
    pub count: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn new(offset: u32, total: u32, results: Vec<T>) -> Self {
        let count = results.len() as u32;
        Self {
            offset,
            limit: count,
            total,
            count,
            results,
        }
    }
}

// ── Characters ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    #[serde(rename = "resourceURI")]
    pub resource_uri: String,
    pub name: String,
}

/// Reference to one appearance category embedded in a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub available: u32,
    #[serde(rename = "collectionURI", default)]
    pub collection_uri: String,
    #[serde(default)]
    pub items: Vec<ResourceSummary>,
    #[serde(default)]
    pub returned: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub modified: Option<String>,
    pub thumbnail: Thumbnail,
    #[serde(rename = "resourceURI", default)]
    pub resource_uri: String,
    #[serde(default)]
    pub comics: CollectionRef,
    #[serde(default)]
    pub series: CollectionRef,
    #[serde(default)]
    pub stories: CollectionRef,
    #[serde(default)]
    pub events: CollectionRef,
    #[serde(default)]
    pub urls: Vec<UrlLink>,
}

impl Character {
    pub fn image_url(&self) -> String {
        self.thumbnail.secure_url()
    }

    /// First url labelled `detail`.
    pub fn detail_url(&self) -> Option<&str> {
        detail_url(&self.urls)
    }

    pub fn collection(&self, kind: AppearanceType) -> &CollectionRef {
        match kind {
            AppearanceType::Comics => &self.comics,
            AppearanceType::Series => &self.series,
            AppearanceType::Stories => &self.stories,
            AppearanceType::Events => &self.events,
        }
    }
}

// ── Appearances ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceType {
    Comics,
    Series,
    Stories,
    Events,
}

impl AppearanceType {
    /// Order in which appearance buttons are presented.
    pub const BUTTON_ORDER: [AppearanceType; 4] = [
        AppearanceType::Comics,
        AppearanceType::Events,
        AppearanceType::Series,
        AppearanceType::Stories,
    ];

    /// Path segment used by the remote API.
    pub fn as_str(self) -> &'static str {
        match self {
            AppearanceType::Comics => "comics",
            AppearanceType::Series => "series",
            AppearanceType::Stories => "stories",
            AppearanceType::Events => "events",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AppearanceType::Comics => "Comics",
            AppearanceType::Series => "Series",
            AppearanceType::Stories => "Stories",
            AppearanceType::Events => "Events",
        }
    }
}

impl fmt::Display for AppearanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary item for a comic, series entry, story or event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<UrlLink>>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

impl Appearance {
    pub fn image_url(&self) -> Option<String> {
        self.thumbnail.as_ref().map(Thumbnail::secure_url)
    }

    pub fn detail_url(&self) -> Option<&str> {
        self.urls.as_deref().and_then(detail_url)
    }

    /// Replaces this summary with the authoritative story detail. Detail
    /// fields win; the summary's links and thumbnail are kept only where the
    /// detail has none.
    pub fn enriched_with(self, story: Story) -> Appearance {
        Appearance {
            id: story.id,
            title: story.title,
            description: Some(story.description.unwrap_or_default()),
            urls: story.urls.or(self.urls),
            thumbnail: story.thumbnail.or(self.thumbnail),
        }
    }
}

/// Story detail record from the story info endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub urls: Option<Vec<UrlLink>>,
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
}

fn detail_url(urls: &[UrlLink]) -> Option<&str> {
    urls.iter()
        .find(|link| link.label == "detail")
        .map(|link| link.url.as_str())
}

// ── Presentation records ──

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterListRecord {
    pub id: i64,
    pub name: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceButton {
    pub kind: AppearanceType,
    pub count: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterDetailRecord {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub details_url: Option<String>,
    pub buttons: Vec<AppearanceButton>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceRecord {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
    /// Whether re-issuing the same request may succeed.
    pub retryable: bool,
}
