use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stage of the three-step verification flow. One-directional except that a
/// resend loops `AwaitingOtp` back onto itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationStage {
    #[default]
    CollectingPhone,
    AwaitingOtp,
    AwaitingName,
    Complete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    /// Full phone including the dial code, e.g. "+15551234567".
    pub phone: String,
    pub country_code: String,
    pub name: String,
}

/// Identity slice. Invariant: `is_authenticated` implies `user` is present
/// and `stage` is `Complete`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IdentityState {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub stage: VerificationStage,
    pub is_pending: bool,
    pub last_error: Option<String>,
}

impl IdentityState {
    pub fn set_pending(&mut self, pending: bool) {
        self.is_pending = pending;
    }

    pub fn mark_otp_sent(&mut self) {
        self.stage = VerificationStage::AwaitingOtp;
    }

    pub fn mark_otp_verified(&mut self) {
        self.stage = VerificationStage::AwaitingName;
    }

    pub fn set_error(&mut self, error: Option<String>) {
        self.last_error = error;
    }

    pub fn complete_login(&mut self, user: UserProfile) {
        self.user = Some(user);
        self.is_authenticated = true;
        self.stage = VerificationStage::Complete;
        self.last_error = None;
    }

    pub fn logout(&mut self) {
        *self = Self::default();
    }
}
