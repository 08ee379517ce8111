#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use heroes_client::{CatalogSource, SharedSource, SourceError};
use heroes_shared::{
    Appearance, AppearanceType, Character, CollectionRef, PagedResult, Story, Thumbnail,
};
use tokio::sync::Notify;

/// Every call made against the fake, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Characters(u32),
    CharacterById(i64),
    Search(String),
    AppearancePage(i64, AppearanceType, u32),
    StoryDetail(i64),
}

type Scripted<T> = Mutex<VecDeque<Result<PagedResult<T>, SourceError>>>;

/// In-memory [`CatalogSource`] that replays scripted responses.
#[derive(Default)]
pub struct FakeSource {
    character_pages: Scripted<Character>,
    search_pages: Scripted<Character>,
    appearance_pages: Scripted<Appearance>,
    characters_by_id: Mutex<HashMap<i64, Character>>,
    stories: Mutex<HashMap<i64, Story>>,
    failing_stories: Mutex<HashSet<i64>>,
    story_delays: Mutex<HashMap<i64, Duration>>,
    search_gate: Mutex<Option<Arc<Notify>>>,
    characters_gate: Mutex<Option<Arc<Notify>>>,
    calls: Mutex<Vec<Call>>,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn shared(self: &Arc<Self>) -> SharedSource {
        self.clone()
    }

    pub fn push_characters(&self, page: Result<PagedResult<Character>, SourceError>) {
        self.character_pages.lock().unwrap().push_back(page);
    }

    pub fn push_search(&self, page: Result<PagedResult<Character>, SourceError>) {
        self.search_pages.lock().unwrap().push_back(page);
    }

    pub fn push_appearances(&self, page: Result<PagedResult<Appearance>, SourceError>) {
        self.appearance_pages.lock().unwrap().push_back(page);
    }

    /// Script `total` appearances split into pages of `page_size`.
    pub fn paginate_appearances(&self, total: u32, page_size: u32) {
        let mut offset = 0;
        loop {
            let end = (offset + page_size).min(total);
            let items = (offset..end)
                .map(|i| appearance(i64::from(i) + 1, &format!("Item {i}")))
                .collect();
            self.push_appearances(Ok(PagedResult::new(offset, total, items)));
            offset = end;
            if offset >= total {
                break;
            }
        }
    }

    pub fn insert_character(&self, character: Character) {
        self.characters_by_id
            .lock()
            .unwrap()
            .insert(character.id, character);
    }

    pub fn insert_story(&self, story: Story) {
        self.stories.lock().unwrap().insert(story.id, story);
    }

    pub fn fail_story(&self, id: i64) {
        self.failing_stories.lock().unwrap().insert(id);
    }

    pub fn delay_story(&self, id: i64, delay: Duration) {
        self.story_delays.lock().unwrap().insert(id, delay);
    }

    /// Hold remote searches until the returned handle is notified.
    pub fn gate_search(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.search_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Hold only the next character page request until notified.
    pub fn gate_next_characters(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.characters_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn pop<T>(queue: &Scripted<T>) -> Result<PagedResult<T>, SourceError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(SourceError::Transport("no scripted response".into())))
    }
}

#[async_trait]
impl CatalogSource for FakeSource {
    async fn fetch_characters(&self, offset: u32) -> Result<PagedResult<Character>, SourceError> {
        self.record(Call::Characters(offset));
        let gate = self.characters_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Self::pop(&self.character_pages)
    }

    async fn fetch_character_by_id(&self, id: i64) -> Result<PagedResult<Character>, SourceError> {
        self.record(Call::CharacterById(id));
        let found = self.characters_by_id.lock().unwrap().get(&id).cloned();
        Ok(PagedResult::new(0, u32::from(found.is_some()), found.into_iter().collect()))
    }

    async fn search_characters_by_name(
        &self,
        name: &str,
    ) -> Result<PagedResult<Character>, SourceError> {
        self.record(Call::Search(name.to_string()));
        let gate = self.search_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Self::pop(&self.search_pages)
    }

    async fn fetch_appearance_page(
        &self,
        character_id: i64,
        kind: AppearanceType,
        offset: u32,
    ) -> Result<PagedResult<Appearance>, SourceError> {
        self.record(Call::AppearancePage(character_id, kind, offset));
        Self::pop(&self.appearance_pages)
    }

    async fn fetch_story_detail(&self, story_id: i64) -> Result<Story, SourceError> {
        self.record(Call::StoryDetail(story_id));
        let delay = self.story_delays.lock().unwrap().get(&story_id).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.failing_stories.lock().unwrap().contains(&story_id) {
            return Err(SourceError::Transport("connection reset".into()));
        }
        self.stories
            .lock()
            .unwrap()
            .get(&story_id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("story {story_id}")))
    }
}

pub fn character(id: i64, name: &str) -> Character {
    Character {
        id,
        name: name.to_string(),
        description: String::new(),
        modified: None,
        thumbnail: Thumbnail {
            path: format!("http://i.annihil.us/{id}"),
            extension: "jpg".into(),
        },
        resource_uri: format!("http://gateway.marvel.com/v1/public/characters/{id}"),
        comics: CollectionRef::default(),
        series: CollectionRef::default(),
        stories: CollectionRef::default(),
        events: CollectionRef::default(),
        urls: vec![],
    }
}

pub fn appearance(id: i64, title: &str) -> Appearance {
    Appearance {
        id,
        title: title.to_string(),
        description: None,
        urls: None,
        thumbnail: None,
    }
}

pub fn story(id: i64, title: &str, description: Option<&str>) -> Story {
    Story {
        id,
        title: title.to_string(),
        description: description.map(str::to_string),
        urls: None,
        thumbnail: Some(Thumbnail {
            path: format!("http://i.annihil.us/story/{id}"),
            extension: "jpg".into(),
        }),
    }
}

/// A character page with an explicit count and total.
pub fn character_page(offset: u32, total: u32, characters: Vec<Character>) -> PagedResult<Character> {
    PagedResult::new(offset, total, characters)
}

pub fn ids(characters: &[Character]) -> Vec<i64> {
    characters.iter().map(|c| c.id).collect()
}
