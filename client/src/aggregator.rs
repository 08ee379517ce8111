//! Drains every page of one appearance type into a single collection.

use heroes_shared::{Appearance, AppearanceType, PagedResult};

use crate::error::{ClientError, Result};
use crate::source::SharedSource;

/// Running state of one `(character, type)` aggregation.
///
/// Created fresh by every call to [`AppearanceAggregator::drain`] and never
/// shared between types or characters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationState {
    pub accumulated: Vec<Appearance>,
    pub next_offset: u32,
    pub declared_total: u32,
    pub pages_fetched: u32,
}

impl AggregationState {
    fn absorb(&mut self, page: PagedResult<Appearance>) {
        self.next_offset = self.next_offset.saturating_add(page.count);
        // The most recent page's total wins.
        self.declared_total = page.total;
        self.pages_fetched += 1;
        self.accumulated.extend(page.results);
    }

    pub fn is_complete(&self) -> bool {
        self.next_offset >= self.declared_total
    }
}

pub struct AppearanceAggregator {
    source: SharedSource,
}

impl AppearanceAggregator {
    pub fn new(source: SharedSource) -> Self {
        Self { source }
    }

    /// All appearances of `kind` for `character_id`, across every page.
    pub async fn aggregate(
        &self,
        character_id: i64,
        kind: AppearanceType,
    ) -> Result<Vec<Appearance>> {
        Ok(self.drain(character_id, kind).await?.accumulated)
    }

    /// Like [`aggregate`](Self::aggregate) but returns the final state.
    ///
    /// Each page is awaited before deciding whether another is needed. The
    /// first fetch always happens since it is the only way to learn the
    /// total. Any page failure aborts the whole run.
    pub async fn drain(&self, character_id: i64, kind: AppearanceType) -> Result<AggregationState> {
        if character_id <= 0 {
            return Err(ClientError::InvalidCharacterId(character_id));
        }

        let mut state = AggregationState::default();

        loop {
            let offset = state.next_offset;
            let page = self
                .source
                .fetch_appearance_page(character_id, kind, offset)
                .await
                .map_err(|source| ClientError::Page {
                    character_id,
                    kind,
                    offset,
                    source,
                })?;

            tracing::debug!(
                character_id,
                %kind,
                offset,
                count = page.count,
                total = page.total,
                "fetched appearance page"
            );

            let empty = page.count == 0;
            state.absorb(page);

            if state.is_complete() {
                break;
            }
            if empty {
                return Err(ClientError::ProtocolInconsistency {
                    character_id,
                    kind,
                    offset: state.next_offset,
                    total: state.declared_total,
                });
            }
        }

        tracing::info!(
            character_id,
            %kind,
            items = state.accumulated.len(),
            pages = state.pages_fetched,
            "aggregated appearances"
        );

        Ok(state)
    }
}
