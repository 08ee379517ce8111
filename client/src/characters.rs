//! The incrementally-growing character list and its search overlay.

use std::collections::HashSet;

use heroes_shared::Character;
use tokio::sync::Mutex;

use crate::error::{ClientError, Result};
use crate::source::{CatalogSource, SharedSource};

/// In-memory list state owned by one [`CharacterListController`].
#[derive(Debug, Clone, Default)]
pub struct CharacterListState {
    /// Insertion ordered, unique by id.
    pub items: Vec<Character>,
    /// Server-side position of the next page.
    pub offset: u32,
    pub search_results: Option<Vec<Character>>,
    pub is_search_active: bool,
    list_token: u64,
    search_token: u64,
}

impl CharacterListState {
    /// The list a view should currently show.
    pub fn active(&self) -> &[Character] {
        match (&self.search_results, self.is_search_active) {
            (Some(results), true) => results,
            _ => &self.items,
        }
    }

    fn issue_list_token(&mut self) -> u64 {
        self.list_token += 1;
        self.list_token
    }

    fn issue_search_token(&mut self) -> u64 {
        self.search_token += 1;
        self.search_token
    }

    /// Append characters not already present; first seen wins.
    fn append_unique(&mut self, characters: Vec<Character>) -> Vec<Character> {
        let mut seen: HashSet<i64> = self.items.iter().map(|c| c.id).collect();
        let fresh: Vec<Character> = characters
            .into_iter()
            .filter(|c| seen.insert(c.id))
            .collect();
        self.items.extend(fresh.iter().cloned());
        fresh
    }

    fn clear_search(&mut self) {
        self.search_results = None;
        self.is_search_active = false;
    }
}

/// Owns the character list for one session.
///
/// Operations take `&self` and only hold the state lock around the network
/// call, never across it. Every request gets a token from a monotonically
/// increasing counter; a response whose token is no longer the latest for its
/// channel (list loads, or searches) is discarded with
/// [`ClientError::Superseded`] and leaves the state untouched.
pub struct CharacterListController {
    source: SharedSource,
    state: Mutex<CharacterListState>,
    /// Serializes lazy first loads.
    first_load: Mutex<()>,
}

impl CharacterListController {
    pub fn new(source: SharedSource) -> Self {
        Self {
            source,
            state: Mutex::new(CharacterListState::default()),
            first_load: Mutex::new(()),
        }
    }

    pub async fn snapshot(&self) -> CharacterListState {
        self.state.lock().await.clone()
    }

    pub async fn items(&self) -> Vec<Character> {
        self.state.lock().await.items.clone()
    }

    pub async fn active(&self) -> Vec<Character> {
        self.state.lock().await.active().to_vec()
    }

    pub async fn is_loaded(&self) -> bool {
        !self.state.lock().await.items.is_empty()
    }

    /// The active list, fetching the first page only if nothing is loaded.
    ///
    /// Concurrent callers share a single first-page request: later ones wait
    /// for it and then read the loaded list. If an explicit reload overtakes
    /// the lazy load, the current list is returned instead of `Superseded`.
    pub async fn ensure_loaded(&self) -> Result<Vec<Character>> {
        let _guard = self.first_load.lock().await;
        if !self.is_loaded().await {
            match self.load_initial().await {
                Ok(_) | Err(ClientError::Superseded) => {}
                Err(err) => return Err(err),
            }
        }
        Ok(self.active().await)
    }

    /// Fetch the first page and replace the list with it.
    ///
    /// On failure the list is emptied: nothing loaded before can be trusted.
    pub async fn load_initial(&self) -> Result<Vec<Character>> {
        let token = self.state.lock().await.issue_list_token();

        let result = self.source.fetch_characters(0).await;

        let mut state = self.state.lock().await;
        if state.list_token != token {
            tracing::warn!(token, latest = state.list_token, "discarding stale initial load");
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(page) => {
                state.items.clear();
                state.offset = page.count;
                state.append_unique(page.results);
                tracing::info!(items = state.items.len(), offset = state.offset, "loaded characters");
                Ok(state.items.clone())
            }
            Err(source) => {
                state.items.clear();
                state.offset = 0;
                Err(ClientError::Characters { offset: 0, source })
            }
        }
    }

    /// Fetch the next page and append the characters not already listed.
    ///
    /// Returns only the newly appended characters. The offset advances by the
    /// page's count even when some of them were duplicates.
    pub async fn load_more(&self) -> Result<Vec<Character>> {
        let (token, offset) = {
            let mut state = self.state.lock().await;
            (state.issue_list_token(), state.offset)
        };

        let result = self.source.fetch_characters(offset).await;

        let mut state = self.state.lock().await;
        if state.list_token != token {
            tracing::warn!(token, latest = state.list_token, offset, "discarding stale page");
            return Err(ClientError::Superseded);
        }

        let page = result.map_err(|source| ClientError::Characters { offset, source })?;
        state.offset = offset.saturating_add(page.count);
        let fresh = state.append_unique(page.results);
        tracing::info!(
            offset,
            count = page.count,
            appended = fresh.len(),
            "loaded more characters"
        );
        Ok(fresh)
    }

    /// Filter the loaded list, falling back to a remote search.
    ///
    /// A blank query clears the search and returns the full list without any
    /// remote call. Otherwise loaded characters are matched by
    /// case-insensitive substring; only when none match is the remote search
    /// issued. Never touches `items` or `offset`.
    pub async fn search(&self, name: &str) -> Result<Vec<Character>> {
        let query = name.trim();

        let token = {
            let mut state = self.state.lock().await;
            // Invalidates any remote search still in flight.
            let token = state.issue_search_token();

            if query.is_empty() {
                state.clear_search();
                return Ok(state.items.clone());
            }

            let local = filter_by_name(&state.items, query);
            if !local.is_empty() {
                state.search_results = Some(local.clone());
                state.is_search_active = true;
                return Ok(local);
            }
            token
        };

        tracing::debug!(query, "no local match, searching remotely");
        let result = self.source.search_characters_by_name(query).await;

        let mut state = self.state.lock().await;
        if state.search_token != token {
            tracing::warn!(query, token, latest = state.search_token, "discarding stale search");
            return Err(ClientError::Superseded);
        }

        let page = result.map_err(|source| ClientError::Search {
            name: query.to_string(),
            source,
        })?;
        state.search_results = Some(page.results.clone());
        state.is_search_active = true;
        Ok(page.results)
    }

    /// Drop the search overlay and return the full list.
    pub async fn clear_search(&self) -> Vec<Character> {
        let mut state = self.state.lock().await;
        state.issue_search_token();
        state.clear_search();
        state.items.clone()
    }
}

/// Fetch one character by id.
pub async fn character_detail(source: &dyn CatalogSource, id: i64) -> Result<Character> {
    if id <= 0 {
        return Err(ClientError::InvalidCharacterId(id));
    }
    let page = source
        .fetch_character_by_id(id)
        .await
        .map_err(|source| ClientError::Character { id, source })?;
    page.results
        .into_iter()
        .next()
        .ok_or(ClientError::CharacterNotFound(id))
}

fn filter_by_name(characters: &[Character], query: &str) -> Vec<Character> {
    let needle = query.to_lowercase();
    characters
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
