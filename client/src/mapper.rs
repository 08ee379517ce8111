//! Pure formatting from domain entities to presentation records.

use heroes_shared::{
    Appearance, AppearanceButton, AppearanceRecord, AppearanceType, Character,
    CharacterDetailRecord, CharacterListRecord,
};

pub const CHARACTER_DESCRIPTION_PLACEHOLDER: &str = "(This character hasn't description)";
pub const APPEARANCE_DESCRIPTION_PLACEHOLDER: &str = "(This item hasn't description)";

/// Break the line right before the first `(`, separating an alias from its
/// qualifier.
pub fn format_name(name: &str) -> String {
    match name.find('(') {
        Some(at) => format!("{}\n{}", &name[..at], &name[at..]),
        None => name.to_string(),
    }
}

/// Break the line before every `(` and every `": "`.
pub fn format_title(title: &str) -> String {
    title.replace('(', "\n(").replace(": ", "\n: ")
}

pub fn character_list_record(character: &Character) -> CharacterListRecord {
    CharacterListRecord {
        id: character.id,
        name: format_name(&character.name),
        image_url: character.image_url(),
    }
}

pub fn character_list_records(characters: &[Character]) -> Vec<CharacterListRecord> {
    characters.iter().map(character_list_record).collect()
}

pub fn character_detail_record(character: &Character) -> CharacterDetailRecord {
    CharacterDetailRecord {
        id: character.id,
        name: format_name(&character.name),
        image_url: character.image_url(),
        description: or_placeholder(&character.description, CHARACTER_DESCRIPTION_PLACEHOLDER),
        details_url: character.detail_url().map(str::to_string),
        buttons: appearance_buttons(character),
    }
}

/// One button per type with at least one appearance, in button order.
pub fn appearance_buttons(character: &Character) -> Vec<AppearanceButton> {
    AppearanceType::BUTTON_ORDER
        .into_iter()
        .filter_map(|kind| {
            let count = character.collection(kind).available;
            (count > 0).then(|| AppearanceButton {
                kind,
                count,
                label: format!("{}: {count}", kind.title()),
            })
        })
        .collect()
}

pub fn appearance_record(appearance: &Appearance) -> AppearanceRecord {
    AppearanceRecord {
        id: appearance.id,
        title: format_title(&appearance.title),
        description: or_placeholder(
            appearance.description.as_deref().unwrap_or_default(),
            APPEARANCE_DESCRIPTION_PLACEHOLDER,
        ),
        image_url: appearance.image_url(),
        link: appearance
            .urls
            .as_ref()
            .and_then(|urls| urls.first())
            .map(|link| link.url.clone()),
    }
}

/// Gallery records with empty titles dropped, sorted by title.
pub fn gallery_records(appearances: &[Appearance]) -> Vec<AppearanceRecord> {
    let mut records: Vec<AppearanceRecord> = appearances
        .iter()
        .filter(|appearance| !appearance.title.is_empty())
        .map(appearance_record)
        .collect();
    records.sort_by(|a, b| a.title.cmp(&b.title));
    records
}

/// The `detail` link of the appearance with `id` in a loaded gallery.
pub fn detail_link(appearances: &[Appearance], id: i64) -> Option<&str> {
    appearances
        .iter()
        .find(|appearance| appearance.id == id)
        .and_then(Appearance::detail_url)
}

fn or_placeholder(text: &str, placeholder: &str) -> String {
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text.to_string()
    }
}
