//! Appearance loading as a two-stage pipeline: aggregate every page, then
//! enrich when the type is `stories`.

use heroes_shared::{Appearance, AppearanceRecord, AppearanceType};

use crate::aggregator::AppearanceAggregator;
use crate::enricher::StoryEnricher;
use crate::error::Result;
use crate::mapper;
use crate::source::SharedSource;

pub struct AppearanceGallery {
    aggregator: AppearanceAggregator,
    enricher: StoryEnricher,
}

impl AppearanceGallery {
    pub fn new(source: SharedSource, story_concurrency: usize) -> Self {
        Self {
            aggregator: AppearanceAggregator::new(source.clone()),
            enricher: StoryEnricher::new(source, story_concurrency),
        }
    }

    pub async fn load(&self, character_id: i64, kind: AppearanceType) -> Result<Vec<Appearance>> {
        let summaries = self.aggregator.aggregate(character_id, kind).await?;
        match kind {
            AppearanceType::Stories => Ok(self.enricher.enrich(summaries).await),
            _ => Ok(summaries),
        }
    }

    /// [`load`](Self::load) followed by the sorted gallery mapping.
    pub async fn records(
        &self,
        character_id: i64,
        kind: AppearanceType,
    ) -> Result<Vec<AppearanceRecord>> {
        let appearances = self.load(character_id, kind).await?;
        Ok(mapper::gallery_records(&appearances))
    }
}
