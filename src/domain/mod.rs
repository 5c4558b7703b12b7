//! Domain layer: state slices and their transition functions.

pub mod chatroom;
pub mod identity;
pub mod message;
pub mod ui_prefs;
