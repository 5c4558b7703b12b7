//! Console front: a line-oriented collaborator driving the flows. All chat
//! semantics live in the store and use cases; this layer only prompts,
//! prints, and dispatches.

pub mod console;
pub mod login;
pub mod shell;
