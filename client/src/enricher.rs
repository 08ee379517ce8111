//! Second-round detail fetches for story summaries.

use futures::stream::{self, StreamExt};
use heroes_shared::Appearance;

use crate::source::SharedSource;

/// Replaces story summaries with their detail records.
///
/// Unlike page aggregation this is best effort: a story whose detail fetch
/// fails is dropped and the rest are still returned.
pub struct StoryEnricher {
    source: SharedSource,
    concurrency: usize,
}

impl StoryEnricher {
    pub fn new(source: SharedSource, concurrency: usize) -> Self {
        Self {
            source,
            concurrency: concurrency.max(1),
        }
    }

    /// Output order follows `summaries`, not completion order.
    pub async fn enrich(&self, summaries: Vec<Appearance>) -> Vec<Appearance> {
        let requested = summaries.len();
        let source = self.source.as_ref();

        let enriched: Vec<Appearance> = stream::iter(summaries)
            .map(move |summary| async move {
                match source.fetch_story_detail(summary.id).await {
                    Ok(story) => Some(summary.enriched_with(story)),
                    Err(err) => {
                        tracing::warn!(story_id = summary.id, error = %err, "dropping story");
                        None
                    }
                }
            })
            .buffered(self.concurrency)
            .filter_map(|story| async move { story })
            .collect()
            .await;

        tracing::info!(requested, enriched = enriched.len(), "enriched stories");
        enriched
    }
}
