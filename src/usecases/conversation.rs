use std::{sync::Arc, time::Duration};

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::{
    domain::{
        chatroom::{self, DEFAULT_TITLE},
        message::Message,
    },
    infra::config::SimulationConfig,
    sim::ReplySource,
    store::SharedStore,
};

const MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendRequest {
    pub chatroom_id: Uuid,
    pub content: String,
    /// Opaque data reference, typically a `data:*;base64,` URL.
    pub image_ref: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendError {
    /// Both trimmed content and image are absent.
    EmptyMessage,
    /// The attachment exceeds the 5 MiB contract.
    AttachmentTooLarge,
    /// A reply for this chatroom is still outstanding. The second send is
    /// rejected, never queued.
    ReplyPending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyOutcome {
    Delivered,
    /// The pending flag was cleared while the reply was in flight; the
    /// result was dropped without touching the store.
    Dropped,
    Failed,
}

/// Handle on an in-flight reply. There is no cancellation: the task always
/// runs to completion and re-checks relevance before applying its result.
pub struct ReplyTicket {
    handle: JoinHandle<ReplyOutcome>,
}

impl ReplyTicket {
    pub async fn outcome(self) -> ReplyOutcome {
        self.handle.await.unwrap_or(ReplyOutcome::Failed)
    }
}

/// Per-chatroom send/receive cycle: `idle -> awaiting-reply -> idle`,
/// guarded by the pending-reply flag.
pub struct ConversationFlow {
    store: SharedStore,
    replies: Arc<dyn ReplySource>,
    composing_window_ms: (u64, u64),
}

impl ConversationFlow {
    pub fn new(store: SharedStore, replies: Arc<dyn ReplySource>, config: &SimulationConfig) -> Self {
        Self {
            store,
            replies,
            composing_window_ms: (config.composing_min_ms, config.composing_max_ms),
        }
    }

    /// Validates, commits the user message, and spawns the reply task.
    ///
    /// The commit is a single logical action: append, message-count bump,
    /// auto-title derivation, and the pending flag all land together.
    pub fn send(&self, request: SendRequest) -> Result<ReplyTicket, SendError> {
        let content = request.content.trim().to_owned();
        if content.is_empty() && request.image_ref.is_none() {
            return Err(SendError::EmptyMessage);
        }

        if let Some(image_ref) = request.image_ref.as_deref() {
            if attachment_size_bytes(image_ref) > MAX_ATTACHMENT_BYTES {
                return Err(SendError::AttachmentTooLarge);
            }
        }

        let chatroom_id = request.chatroom_id;
        let message = Message::user(content.clone(), request.image_ref);
        self.store.update(|state| {
            if state.messages.is_reply_pending(&chatroom_id) {
                return Err(SendError::ReplyPending);
            }

            state.messages.append(chatroom_id, message);
            state.chatrooms.bump_message_count(&chatroom_id);
            apply_auto_title(state, &chatroom_id);
            state.messages.set_pending_reply(chatroom_id, true);
            Ok(())
        })?;

        Ok(self.spawn_reply_task(chatroom_id, content))
    }

    fn spawn_reply_task(&self, chatroom_id: Uuid, content: String) -> ReplyTicket {
        let store = Arc::clone(&self.store);
        let replies = Arc::clone(&self.replies);
        let (min_ms, max_ms) = self.composing_window_ms;

        let handle = tokio::spawn(async move {
            let reply = match replies.generate_reply(&content).await {
                Ok(reply) => reply,
                Err(error) => {
                    tracing::warn!(chatroom = %chatroom_id, ?error, "reply generation failed");
                    store.update(|state| state.messages.set_pending_reply(chatroom_id, false));
                    return ReplyOutcome::Failed;
                }
            };

            // The composing delay on top of the request latency is what the
            // typing indicator's visible duration comes from.
            let composing_ms = {
                let mut rng = rand::rng();
                rand::Rng::random_range(&mut rng, min_ms..=max_ms)
            };
            tokio::time::sleep(Duration::from_millis(composing_ms)).await;

            store.update(|state| {
                // Re-check before apply: anything may have happened while
                // the reply was in flight.
                if !state.messages.is_reply_pending(&chatroom_id) {
                    tracing::debug!(chatroom = %chatroom_id, "reply dropped, no longer awaited");
                    return ReplyOutcome::Dropped;
                }

                state.messages.append(chatroom_id, Message::assistant(reply));
                state.chatrooms.bump_message_count(&chatroom_id);
                state.messages.set_pending_reply(chatroom_id, false);
                ReplyOutcome::Delivered
            })
        });

        ReplyTicket { handle }
    }
}

/// Fires at most once per room: only while the title is still the default
/// sentinel and a first user message exists.
fn apply_auto_title(state: &mut crate::store::AppState, chatroom_id: &Uuid) {
    let still_default = state
        .chatrooms
        .get(chatroom_id)
        .is_some_and(|room| room.title == DEFAULT_TITLE);
    if !still_default {
        return;
    }

    let Some(first) = state.messages.first_user_message(chatroom_id) else {
        return;
    };

    let title = chatroom::derive_title(&first.content);
    state.chatrooms.rename_title(chatroom_id, &title);
}

fn attachment_size_bytes(image_ref: &str) -> usize {
    match image_ref.split_once(";base64,") {
        Some((_, payload)) => base64::decoded_len_estimate(payload.len()),
        None => image_ref.len(),
    }
}
