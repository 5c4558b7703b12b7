//! Use case layer: orchestrators sequencing store transitions with the
//! simulated backend.

pub mod conversation;
pub mod logout;
pub mod manage_chatrooms;
pub mod search;
pub mod validate;
pub mod verify_identity;
