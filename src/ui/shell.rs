use std::io;

use crate::{
    domain::chatroom::Chatroom,
    store::SharedStore,
    usecases::{
        conversation::{ConversationFlow, ReplyOutcome, SendError, SendRequest},
        logout::logout,
        manage_chatrooms::{create_chatroom, delete_chatroom, rename_chatroom, select_chatroom},
        search::SearchDebouncer,
        validate,
    },
};

use super::console::Console;

/// System clipboard seam. The real implementation degrades to an error line
/// when no clipboard is available (headless sessions).
pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> Result<(), String>;
}

pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), String> {
        arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_owned()))
            .map_err(|error| error.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellOutcome {
    Quit,
    /// `/logout` was issued; the caller decides whether to re-run login.
    LoggedOut,
}

const HELP_LINES: [&str; 13] = [
    "/new              start a new chat",
    "/list             list chats (filtered by the current search)",
    "/open <n>         open chat number n from /list",
    "/rename <title>   rename the open chat",
    "/delete <n>       delete chat number n from /list",
    "/search <text>    filter the chat list (empty to clear)",
    "/clear            wipe the open chat's messages",
    "/copy <n>         copy message number n to the clipboard",
    "/dark             toggle dark mode",
    "/image <ref>      send an image by data reference",
    "/logout           sign out (chats are kept)",
    "/quit             exit",
    "Anything else is sent as a message.",
];

/// The interactive chat surface. Deliberately thin: every semantic lives in
/// the store and the use cases.
pub struct Shell<'a> {
    console: &'a mut dyn Console,
    store: SharedStore,
    conversation: ConversationFlow,
    debouncer: SearchDebouncer,
    clipboard: Box<dyn ClipboardSink>,
}

impl<'a> Shell<'a> {
    pub fn new(
        console: &'a mut dyn Console,
        store: SharedStore,
        conversation: ConversationFlow,
        debouncer: SearchDebouncer,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            console,
            store,
            conversation,
            debouncer,
            clipboard,
        }
    }

    pub async fn run(&mut self) -> io::Result<ShellOutcome> {
        self.console
            .print_line("Type a message, or /help for commands.")?;

        loop {
            let Some(line) = self.console.prompt_line("> ")? else {
                return Ok(ShellOutcome::Quit);
            };
            let line = line.trim().to_owned();
            if line.is_empty() {
                continue;
            }

            if let Some(command) = line.strip_prefix('/') {
                if let Some(outcome) = self.handle_command(command).await? {
                    return Ok(outcome);
                }
            } else {
                self.send(line, None).await?;
            }
        }
    }

    async fn handle_command(&mut self, command: &str) -> io::Result<Option<ShellOutcome>> {
        let (name, argument) = match command.split_once(' ') {
            Some((name, rest)) => (name, rest.trim()),
            None => (command, ""),
        };

        match name {
            "help" => {
                for line in HELP_LINES {
                    self.console.print_line(line)?;
                }
            }
            "new" => {
                let room = create_chatroom(&self.store);
                self.console
                    .print_line(&format!("Started \"{}\".", room.title))?;
            }
            "list" => self.print_room_list()?,
            "open" => match self.room_by_number(argument) {
                Some(room) => {
                    self.console.print_line(&format!("Opened \"{}\".", room.title))?;
                    select_chatroom(&self.store, Some(room));
                }
                None => self.console.print_line("No chat with that number.")?,
            },
            "rename" => match self.active_room() {
                Some(room) if validate::is_valid_title(argument) => {
                    match rename_chatroom(&self.store, &room.id, argument) {
                        Ok(()) => self.console.print_line("Renamed.")?,
                        Err(_) => self.console.print_line("Titles cannot be empty.")?,
                    }
                }
                Some(_) => self.console.print_line("Titles are 1-100 characters.")?,
                None => self.console.print_line("No chat open. Use /new or /open.")?,
            },
            "delete" => match self.room_by_number(argument) {
                Some(room) => {
                    delete_chatroom(&self.store, &room.id);
                    self.console
                        .print_line(&format!("Deleted \"{}\".", room.title))?;
                }
                None => self.console.print_line("No chat with that number.")?,
            },
            "search" => {
                self.debouncer.submit(argument);
            }
            "clear" => match self.active_room() {
                Some(room) => {
                    self.store.update(|state| state.messages.reset(room.id));
                    self.console.print_line("Messages cleared.")?;
                }
                None => self.console.print_line("No chat open.")?,
            },
            "copy" => self.copy_message(argument)?,
            "dark" => {
                let dark = self
                    .store
                    .update(|state| {
                        state.ui.toggle_dark_mode();
                        state.ui.dark_mode
                    });
                self.console.print_line(if dark {
                    "Dark mode on."
                } else {
                    "Dark mode off."
                })?;
            }
            "image" => {
                if argument.is_empty() {
                    self.console.print_line("Usage: /image <ref>")?;
                } else {
                    self.send(String::new(), Some(argument.to_owned())).await?;
                }
            }
            "logout" => {
                let outcome = logout(&self.store);
                self.console.print_line(&format!(
                    "Logged out. {} chat(s) kept for next time.",
                    outcome.chatrooms_retained
                ))?;
                return Ok(Some(ShellOutcome::LoggedOut));
            }
            "quit" => return Ok(Some(ShellOutcome::Quit)),
            _ => self.console.print_line("Unknown command. Try /help.")?,
        }

        Ok(None)
    }

    async fn send(&mut self, content: String, image_ref: Option<String>) -> io::Result<()> {
        let Some(room) = self.active_room() else {
            self.console.print_line("No chat open. Use /new to start one.")?;
            return Ok(());
        };

        if image_ref.is_none() && !validate::is_valid_message(&content) {
            self.console.print_line("Messages are 1-4000 characters.")?;
            return Ok(());
        }

        let ticket = match self.conversation.send(SendRequest {
            chatroom_id: room.id,
            content,
            image_ref,
        }) {
            Ok(ticket) => ticket,
            Err(SendError::EmptyMessage) => {
                self.console.print_line("Nothing to send.")?;
                return Ok(());
            }
            Err(SendError::AttachmentTooLarge) => {
                self.console.print_line("Images must be 5 MiB or smaller.")?;
                return Ok(());
            }
            Err(SendError::ReplyPending) => {
                self.console
                    .print_line("Still composing a reply for this chat.")?;
                return Ok(());
            }
        };

        self.console.print_line("Assistant is composing...")?;
        match ticket.outcome().await {
            ReplyOutcome::Delivered => {
                let reply = self.store.read(|state| {
                    state
                        .messages
                        .messages(&room.id)
                        .last()
                        .map(|message| message.content.clone())
                });
                if let Some(reply) = reply {
                    self.console.print_line(&reply)?;
                }
            }
            ReplyOutcome::Dropped => {}
            ReplyOutcome::Failed => {
                self.console
                    .print_line("The assistant could not reply. Try again.")?;
            }
        }

        Ok(())
    }

    fn print_room_list(&mut self) -> io::Result<()> {
        let query = self.store.read(|state| state.ui.search_query.clone());
        let rooms: Vec<(String, u32, bool)> = self.store.read(|state| {
            let active_id = state.chatrooms.active.as_ref().map(|room| room.id);
            state
                .chatrooms
                .filtered_by_title(&query)
                .into_iter()
                .map(|room| {
                    (
                        room.title.clone(),
                        room.message_count,
                        Some(room.id) == active_id,
                    )
                })
                .collect()
        });

        if rooms.is_empty() {
            return self.console.print_line("No chats yet. Use /new.");
        }

        for (index, (title, count, is_active)) in rooms.iter().enumerate() {
            let marker = if *is_active { "*" } else { " " };
            self.console.print_line(&format!(
                "{marker}{:>2}) {title} ({count} messages)",
                index + 1
            ))?;
        }
        Ok(())
    }

    /// Resolves a 1-based number against the same filtered list `/list`
    /// shows.
    fn room_by_number(&self, argument: &str) -> Option<Chatroom> {
        let number: usize = argument.parse().ok()?;
        self.store.read(|state| {
            let filtered = state.chatrooms.filtered_by_title(&state.ui.search_query);
            filtered.get(number.checked_sub(1)?).map(|room| (*room).clone())
        })
    }

    fn active_room(&self) -> Option<Chatroom> {
        self.store.read(|state| state.chatrooms.active.clone())
    }

    fn copy_message(&mut self, argument: &str) -> io::Result<()> {
        let Some(room) = self.active_room() else {
            return self.console.print_line("No chat open.");
        };

        let content = argument.parse::<usize>().ok().and_then(|number| {
            self.store.read(|state| {
                state
                    .messages
                    .messages(&room.id)
                    .get(number.checked_sub(1)?)
                    .map(|message| message.content.clone())
            })
        });

        match content {
            Some(content) => match self.clipboard.copy(&content) {
                Ok(()) => self.console.print_line("Copied."),
                Err(error) => {
                    tracing::debug!(error = %error, "clipboard unavailable");
                    self.console.print_line("Clipboard is not available here.")
                }
            },
            None => self.console.print_line("No message with that number."),
        }
    }
}
