mod common;

use std::collections::HashSet;

use assert_matches::assert_matches;
use common::{appearance, story, Call, FakeSource};
use heroes_client::{AppearanceAggregator, AppearanceGallery, ClientError, SourceError};
use heroes_shared::{AppearanceType, PagedResult};

#[tokio::test]
async fn drains_every_page_without_duplicates() {
    let source = FakeSource::new();
    source.paginate_appearances(250, 100);
    let aggregator = AppearanceAggregator::new(source.shared());

    let state = aggregator.drain(1009610, AppearanceType::Comics).await.unwrap();

    assert_eq!(state.accumulated.len(), 250);
    assert_eq!(state.next_offset, 250);
    assert_eq!(state.declared_total, 250);
    assert_eq!(state.pages_fetched, 3);
    let unique: HashSet<i64> = state.accumulated.iter().map(|a| a.id).collect();
    assert_eq!(unique.len(), 250);

    assert_eq!(
        source.calls(),
        [
            Call::AppearancePage(1009610, AppearanceType::Comics, 0),
            Call::AppearancePage(1009610, AppearanceType::Comics, 100),
            Call::AppearancePage(1009610, AppearanceType::Comics, 200),
        ]
    );
}

#[tokio::test]
async fn short_pages_advance_by_count_not_page_size() {
    let source = FakeSource::new();
    source.push_appearances(Ok(PagedResult::new(
        0,
        5,
        vec![appearance(1, "A"), appearance(2, "B")],
    )));
    source.push_appearances(Ok(PagedResult::new(2, 5, vec![appearance(3, "C")])));
    source.push_appearances(Ok(PagedResult::new(
        3,
        5,
        vec![appearance(4, "D"), appearance(5, "E")],
    )));
    let aggregator = AppearanceAggregator::new(source.shared());

    let items = aggregator.aggregate(7, AppearanceType::Series).await.unwrap();

    assert_eq!(items.len(), 5);
    let offsets: Vec<u32> = source
        .calls()
        .into_iter()
        .map(|call| match call {
            Call::AppearancePage(_, _, offset) => offset,
            other => panic!("unexpected call {other:?}"),
        })
        .collect();
    assert_eq!(offsets, [0, 2, 3]);
}

#[tokio::test]
async fn latest_declared_total_wins() {
    let source = FakeSource::new();
    source.push_appearances(Ok(PagedResult::new(0, 4, vec![appearance(1, "A"), appearance(2, "B")])));
    // The server shrank the collection between pages.
    source.push_appearances(Ok(PagedResult::new(2, 3, vec![appearance(3, "C")])));
    let aggregator = AppearanceAggregator::new(source.shared());

    let state = aggregator.drain(7, AppearanceType::Events).await.unwrap();

    assert_eq!(state.declared_total, 3);
    assert_eq!(state.next_offset, 3);
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn empty_collection_needs_exactly_one_fetch() {
    let source = FakeSource::new();
    source.push_appearances(Ok(PagedResult::new(0, 0, vec![])));
    let aggregator = AppearanceAggregator::new(source.shared());

    let items = aggregator.aggregate(7, AppearanceType::Events).await.unwrap();

    assert!(items.is_empty());
    assert_eq!(source.calls().len(), 1);
}

#[tokio::test]
async fn empty_page_before_total_is_a_protocol_error() {
    let source = FakeSource::new();
    source.push_appearances(Ok(PagedResult::new(0, 10, vec![appearance(1, "A")])));
    source.push_appearances(Ok(PagedResult::new(1, 10, vec![])));
    let aggregator = AppearanceAggregator::new(source.shared());

    let err = aggregator
        .aggregate(7, AppearanceType::Comics)
        .await
        .unwrap_err();

    assert_matches!(
        err,
        ClientError::ProtocolInconsistency {
            character_id: 7,
            kind: AppearanceType::Comics,
            offset: 1,
            total: 10,
        }
    );
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn page_failure_aborts_with_context() {
    let source = FakeSource::new();
    source.push_appearances(Ok(PagedResult::new(0, 3, vec![appearance(1, "A")])));
    source.push_appearances(Err(SourceError::Transport("timed out".into())));
    let aggregator = AppearanceAggregator::new(source.shared());

    let err = aggregator
        .aggregate(42, AppearanceType::Stories)
        .await
        .unwrap_err();

    assert_matches!(
        &err,
        ClientError::Page {
            character_id: 42,
            kind: AppearanceType::Stories,
            offset: 1,
            source: SourceError::Transport(_),
        }
    );
    assert!(err.is_retryable());
    // No retry from the aggregator itself.
    assert_eq!(source.calls().len(), 2);
}

#[tokio::test]
async fn rejects_non_positive_character_id() {
    let source = FakeSource::new();
    let aggregator = AppearanceAggregator::new(source.shared());

    let err = aggregator
        .aggregate(0, AppearanceType::Comics)
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::InvalidCharacterId(0));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn retry_after_failure_starts_from_scratch() {
    let source = FakeSource::new();
    source.push_appearances(Err(SourceError::Status {
        status: 503,
        body: "busy".into(),
    }));
    source.paginate_appearances(3, 2);
    let aggregator = AppearanceAggregator::new(source.shared());

    assert!(aggregator.aggregate(7, AppearanceType::Comics).await.is_err());
    let items = aggregator.aggregate(7, AppearanceType::Comics).await.unwrap();

    assert_eq!(items.len(), 3);
    assert_eq!(
        source.calls(),
        [
            Call::AppearancePage(7, AppearanceType::Comics, 0),
            Call::AppearancePage(7, AppearanceType::Comics, 0),
            Call::AppearancePage(7, AppearanceType::Comics, 2),
        ]
    );
}

#[tokio::test]
async fn gallery_enriches_stories_only() {
    let source = FakeSource::new();
    source.push_appearances(Ok(PagedResult::new(
        0,
        2,
        vec![appearance(11, "cover"), appearance(12, "")],
    )));
    source.insert_story(story(11, "Zeta: The End", Some("Detailed")));
    source.insert_story(story(12, "Alpha (1963)", None));
    let gallery = AppearanceGallery::new(source.shared(), 4);

    let records = gallery.records(1, AppearanceType::Stories).await.unwrap();

    let titles: Vec<&str> = records.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, ["Alpha \n(1963)", "Zeta\n: The End"]);
    assert_eq!(records[1].description, "Detailed");
    assert!(source.calls().contains(&Call::StoryDetail(12)));
}

#[tokio::test]
async fn gallery_skips_enrichment_for_other_types() {
    let source = FakeSource::new();
    source.push_appearances(Ok(PagedResult::new(0, 1, vec![appearance(5, "Hulk (2008) #1")])));
    let gallery = AppearanceGallery::new(source.shared(), 4);

    let items = gallery.load(1, AppearanceType::Comics).await.unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(source.calls(), [Call::AppearancePage(1, AppearanceType::Comics, 0)]);
}
