use std::time::Duration;

use async_trait::async_trait;
use rand::seq::IndexedRandom;

use crate::infra::config::SimulationConfig;

use super::countries::{Country, COUNTRIES};

/// Seam for the OTP round-trip. Implemented by [`SimulatedBackend`];
/// scripted fakes drive failure paths in tests.
#[async_trait]
pub trait VerificationApi: Send + Sync {
    async fn send_verification_code(&self, phone: &str) -> Result<(), VerificationApiError>;
    async fn verify_code(&self, code: &str) -> Result<bool, VerificationApiError>;
}

/// Seam for reply generation.
#[async_trait]
pub trait ReplySource: Send + Sync {
    async fn generate_reply(&self, user_text: &str) -> Result<String, ReplySourceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationApiError {
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySourceError {
    Unavailable,
}

const OPENING_PHRASES: [&str; 5] = [
    "That's an interesting question! Let me think about that...",
    "I understand what you're asking. Here's what I can tell you...",
    "Great question! Based on my knowledge, I would say...",
    "I'm here to help! Let me provide you with some information...",
    "That's a fascinating topic. Here's my perspective...",
];

/// In-process stand-in for a chat backend: artificial latency, randomized
/// reply content, no persistent side effects.
pub struct SimulatedBackend {
    request_delay: Duration,
    directory_delay: Duration,
}

impl SimulatedBackend {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            request_delay: Duration::from_millis(config.request_delay_ms),
            directory_delay: Duration::from_millis(config.directory_delay_ms),
        }
    }

    /// Static country directory behind half the usual request latency.
    pub async fn list_countries(&self) -> Vec<Country> {
        tokio::time::sleep(self.directory_delay).await;
        COUNTRIES.to_vec()
    }
}

#[async_trait]
impl VerificationApi for SimulatedBackend {
    async fn send_verification_code(&self, phone: &str) -> Result<(), VerificationApiError> {
        tokio::time::sleep(self.request_delay).await;
        tracing::debug!(phone_digits = phone.len(), "verification code dispatched");
        Ok(())
    }

    async fn verify_code(&self, code: &str) -> Result<bool, VerificationApiError> {
        tokio::time::sleep(self.request_delay).await;
        Ok(code.len() == 6 && code.chars().all(|ch| ch.is_ascii_digit()))
    }
}

#[async_trait]
impl ReplySource for SimulatedBackend {
    async fn generate_reply(&self, user_text: &str) -> Result<String, ReplySourceError> {
        tokio::time::sleep(self.request_delay).await;

        let opening = {
            let mut rng = rand::rng();
            OPENING_PHRASES
                .choose(&mut rng)
                .copied()
                .unwrap_or(OPENING_PHRASES[0])
        };

        Ok(format!(
            "{opening}\n\nThis is a simulated response. In a real application, this would be an \
             actual AI response based on your message: \"{user_text}\""
        ))
    }
}
