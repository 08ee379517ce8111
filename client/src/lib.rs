//! Pagination and aggregation core for browsing the comics character catalog.
//!
//! The core talks to the remote API only through [`CatalogSource`]. On top
//! of it sit the [`CharacterListController`] (paged, deduplicated character
//! list with a search overlay), the [`AppearanceAggregator`] (drains every
//! page of one appearance type), the [`StoryEnricher`] (per-story detail
//! fetches) and the pure [`mapper`] that produces presentation records.

pub mod aggregator;
pub mod characters;
pub mod config;
pub mod enricher;
pub mod error;
pub mod gallery;
pub mod mapper;
pub mod source;
pub mod transport;

pub use aggregator::{AggregationState, AppearanceAggregator};
pub use characters::{character_detail, CharacterListController, CharacterListState};
pub use config::{ApiConfig, ConfigError};
pub use enricher::StoryEnricher;
pub use error::{ClientError, SourceError};
pub use gallery::AppearanceGallery;
pub use source::{CatalogSource, SharedSource};
pub use transport::MarvelApi;
