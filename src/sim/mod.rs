//! Simulated backend: stands in for network and model latency. No real
//! transport exists anywhere in this crate.

mod backend;
pub mod countries;

pub use backend::{
    ReplySource, ReplySourceError, SimulatedBackend, VerificationApi, VerificationApiError,
};
