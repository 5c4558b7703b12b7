use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const FIRST_PAGE: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub image_ref: Option<String>,
}

impl Message {
    pub fn user(content: impl Into<String>, image_ref: Option<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            content: content.into(),
            sender: Sender::User,
            timestamp: Utc::now(),
            image_ref,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            content: content.into(),
            sender: Sender::Assistant,
            timestamp: Utc::now(),
            image_ref: None,
        }
    }
}

/// Messages slice: one map per concern, all keyed by chatroom id. Keys are
/// created on first use and never assumed present. An entry whose room was
/// deleted is an orphan; it is tolerated and simply never read again.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MessagesState {
    pub by_chatroom: HashMap<Uuid, Vec<Message>>,
    pub pending_reply: HashMap<Uuid, bool>,
    pub page_cursor: HashMap<Uuid, u32>,
    pub has_more: HashMap<Uuid, bool>,
}

impl MessagesState {
    pub fn append(&mut self, chatroom_id: Uuid, message: Message) {
        self.by_chatroom.entry(chatroom_id).or_default().push(message);
    }

    /// Prepends an older page so earlier history precedes what is already
    /// loaded. The page itself stays in chronological order.
    pub fn append_history(&mut self, chatroom_id: Uuid, older: Vec<Message>) {
        let list = self.by_chatroom.entry(chatroom_id).or_default();
        let mut merged = older;
        merged.append(list);
        *list = merged;
    }

    pub fn set_pending_reply(&mut self, chatroom_id: Uuid, pending: bool) {
        self.pending_reply.insert(chatroom_id, pending);
    }

    pub fn set_page_cursor(&mut self, chatroom_id: Uuid, page: u32) {
        self.page_cursor.insert(chatroom_id, page);
    }

    pub fn set_has_more(&mut self, chatroom_id: Uuid, has_more: bool) {
        self.has_more.insert(chatroom_id, has_more);
    }

    pub fn reset(&mut self, chatroom_id: Uuid) {
        self.by_chatroom.insert(chatroom_id, Vec::new());
        self.pending_reply.insert(chatroom_id, false);
        self.page_cursor.insert(chatroom_id, FIRST_PAGE);
        self.has_more.insert(chatroom_id, true);
    }

    pub fn messages(&self, chatroom_id: &Uuid) -> &[Message] {
        self.by_chatroom
            .get(chatroom_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_reply_pending(&self, chatroom_id: &Uuid) -> bool {
        self.pending_reply.get(chatroom_id).copied().unwrap_or(false)
    }

    pub fn current_page(&self, chatroom_id: &Uuid) -> u32 {
        self.page_cursor
            .get(chatroom_id)
            .copied()
            .unwrap_or(FIRST_PAGE)
    }

    pub fn more_history_available(&self, chatroom_id: &Uuid) -> bool {
        self.has_more.get(chatroom_id).copied().unwrap_or(true)
    }

    pub fn first_user_message(&self, chatroom_id: &Uuid) -> Option<&Message> {
        self.messages(chatroom_id)
            .iter()
            .find(|message| message.sender == Sender::User)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_creates_the_list_on_first_use() {
        let mut state = MessagesState::default();
        let room = Uuid::now_v7();

        state.append(room, Message::user("hello", None));

        assert_eq!(state.messages(&room).len(), 1);
        assert_eq!(state.messages(&room)[0].content, "hello");
    }

    #[test]
    fn append_history_places_older_pages_before_loaded_messages() {
        let mut state = MessagesState::default();
        let room = Uuid::now_v7();
        state.append(room, Message::user("newest", None));

        state.append_history(
            room,
            vec![Message::user("oldest", None), Message::user("older", None)],
        );

        let contents: Vec<&str> = state
            .messages(&room)
            .iter()
            .map(|message| message.content.as_str())
            .collect();
        assert_eq!(contents, vec!["oldest", "older", "newest"]);
    }

    #[test]
    fn unknown_room_reads_as_empty_defaults() {
        let state = MessagesState::default();
        let room = Uuid::now_v7();

        assert!(state.messages(&room).is_empty());
        assert!(!state.is_reply_pending(&room));
        assert_eq!(state.current_page(&room), 1);
        assert!(state.more_history_available(&room));
    }

    #[test]
    fn reset_restores_first_page_defaults() {
        let mut state = MessagesState::default();
        let room = Uuid::now_v7();
        state.append(room, Message::user("hello", None));
        state.set_pending_reply(room, true);
        state.set_page_cursor(room, 4);
        state.set_has_more(room, false);

        state.reset(room);

        assert!(state.messages(&room).is_empty());
        assert!(!state.is_reply_pending(&room));
        assert_eq!(state.current_page(&room), 1);
        assert!(state.more_history_available(&room));
    }

    #[test]
    fn first_user_message_skips_assistant_entries() {
        let mut state = MessagesState::default();
        let room = Uuid::now_v7();
        state.append(room, Message::assistant("welcome"));
        state.append(room, Message::user("question", None));

        let first = state.first_user_message(&room).expect("user message");

        assert_eq!(first.content, "question");
    }
}
