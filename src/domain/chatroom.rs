use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title sentinel for freshly created rooms. The auto-title rule only fires
/// while the title is still exactly this value.
pub const DEFAULT_TITLE: &str = "New Chat";

const TITLE_PREVIEW_CHARS: usize = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chatroom {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub message_count: u32,
}

impl Chatroom {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: DEFAULT_TITLE.to_owned(),
            created_at: now,
            updated_at: now,
            message_count: 0,
        }
    }
}

impl Default for Chatroom {
    fn default() -> Self {
        Self::new()
    }
}

/// Derives a room title from the first user message: the first 30 characters,
/// with an ellipsis marker when the content is longer.
pub fn derive_title(content: &str) -> String {
    let mut title: String = content.chars().take(TITLE_PREVIEW_CHARS).collect();
    if content.chars().count() > TITLE_PREVIEW_CHARS {
        title.push_str("...");
    }
    title
}

/// Chatrooms slice: rooms ordered newest-first plus the active selection,
/// which mirrors one of the stored entries by value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChatroomsState {
    pub rooms: Vec<Chatroom>,
    pub active: Option<Chatroom>,
}

impl ChatroomsState {
    pub fn create(&mut self, room: Chatroom) {
        self.rooms.insert(0, room);
    }

    /// Removes the room. Clears the active selection when it referenced the
    /// removed id. Returns whether an entry was actually removed.
    pub fn delete(&mut self, id: &Uuid) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|room| room.id != *id);
        if self.active.as_ref().is_some_and(|room| room.id == *id) {
            self.active = None;
        }
        self.rooms.len() != before
    }

    pub fn select(&mut self, room: Option<Chatroom>) {
        self.active = room;
    }

    pub fn rename_title(&mut self, id: &Uuid, title: &str) {
        let now = Utc::now();
        if let Some(room) = self.rooms.iter_mut().find(|room| room.id == *id) {
            room.title = title.to_owned();
            room.updated_at = now;
        }
        if let Some(active) = self.active.as_mut().filter(|room| room.id == *id) {
            active.title = title.to_owned();
            active.updated_at = now;
        }
    }

    pub fn bump_message_count(&mut self, id: &Uuid) {
        if let Some(room) = self.rooms.iter_mut().find(|room| room.id == *id) {
            room.message_count += 1;
        }
        if let Some(active) = self.active.as_mut().filter(|room| room.id == *id) {
            active.message_count += 1;
        }
    }

    pub fn get(&self, id: &Uuid) -> Option<&Chatroom> {
        self.rooms.iter().find(|room| room.id == *id)
    }

    /// Case-insensitive title filter used by the sidebar search.
    pub fn filtered_by_title(&self, query: &str) -> Vec<&Chatroom> {
        let needle = query.to_lowercase();
        self.rooms
            .iter()
            .filter(|room| room.title.to_lowercase().contains(&needle))
            .collect()
    }
}
