//! Infrastructure layer: config, logging, storage, and persistence adapters.

pub mod config;
pub mod error;
pub mod logging;
pub mod persistence;
pub mod storage_layout;
