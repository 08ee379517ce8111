//! The network boundary the core calls through.
//!
//! Every operation is a single asynchronous call that yields either a typed
//! page or a [`SourceError`]. Retry policy, request signing and transport
//! details all live behind this trait.

use std::sync::Arc;

use async_trait::async_trait;
use heroes_shared::{Appearance, AppearanceType, Character, PagedResult, Story};

use crate::error::SourceError;

#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// One page of the full character catalog, starting at `offset`.
    async fn fetch_characters(&self, offset: u32) -> Result<PagedResult<Character>, SourceError>;

    /// A page expected to hold exactly one character.
    async fn fetch_character_by_id(&self, id: i64) -> Result<PagedResult<Character>, SourceError>;

    /// Characters matching `name` (matching semantics are the server's).
    async fn search_characters_by_name(
        &self,
        name: &str,
    ) -> Result<PagedResult<Character>, SourceError>;

    /// One page of a character's appearances of the given type.
    async fn fetch_appearance_page(
        &self,
        character_id: i64,
        kind: AppearanceType,
        offset: u32,
    ) -> Result<PagedResult<Appearance>, SourceError>;

    /// Story detail. A missing story is [`SourceError::NotFound`].
    async fn fetch_story_detail(&self, story_id: i64) -> Result<Story, SourceError>;
}

pub type SharedSource = Arc<dyn CatalogSource>;
