use std::sync::Arc;

use uuid::Uuid;

use crate::{
    domain::identity::UserProfile,
    sim::VerificationApi,
    store::SharedStore,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneDraft {
    pub dial_code: String,
    pub digits: String,
}

impl PhoneDraft {
    fn full_phone(&self) -> String {
        format!("{}{}", self.dial_code, self.digits)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityFlowError {
    /// The send-code operation failed; stage stays at collecting-phone.
    SendFailed,
    /// Verification returned false; stage stays at awaiting-otp.
    InvalidOtp,
    /// The verify operation itself failed; stage stays at awaiting-otp.
    VerifyFailed,
    /// `submit_name` or `resend` called without a stored phone draft.
    MissingPhoneDraft,
}

/// Sequences the three-step verification flow against the identity slice.
/// The phone draft is orchestrator-local and never persisted.
pub struct IdentityFlow {
    store: SharedStore,
    api: Arc<dyn VerificationApi>,
    draft: Option<PhoneDraft>,
}

impl IdentityFlow {
    pub fn new(store: SharedStore, api: Arc<dyn VerificationApi>) -> Self {
        Self {
            store,
            api,
            draft: None,
        }
    }

    /// Sends the verification code. On success stores the draft and advances
    /// to awaiting-otp. Pending clears on every exit path.
    pub async fn submit_phone(
        &mut self,
        dial_code: &str,
        digits: &str,
    ) -> Result<(), IdentityFlowError> {
        self.store.update(|state| {
            state.identity.set_pending(true);
            state.identity.set_error(None);
        });

        let draft = PhoneDraft {
            dial_code: dial_code.to_owned(),
            digits: digits.to_owned(),
        };
        let sent = self.api.send_verification_code(&draft.full_phone()).await;

        let outcome = match sent {
            Ok(()) => {
                self.draft = Some(draft);
                self.store.update(|state| state.identity.mark_otp_sent());
                Ok(())
            }
            Err(_) => {
                self.store
                    .update(|state| state.identity.set_error(Some("Failed to send OTP".to_owned())));
                Err(IdentityFlowError::SendFailed)
            }
        };

        self.store.update(|state| state.identity.set_pending(false));
        outcome
    }

    /// Verifies the code. A valid code advances to awaiting-name; anything
    /// else records an error and leaves the stage unchanged.
    pub async fn submit_otp(&mut self, code: &str) -> Result<(), IdentityFlowError> {
        self.store.update(|state| {
            state.identity.set_pending(true);
            state.identity.set_error(None);
        });

        let verified = self.api.verify_code(code).await;

        let outcome = match verified {
            Ok(true) => {
                self.store.update(|state| state.identity.mark_otp_verified());
                Ok(())
            }
            Ok(false) => {
                self.store
                    .update(|state| state.identity.set_error(Some("Invalid OTP".to_owned())));
                Err(IdentityFlowError::InvalidOtp)
            }
            Err(_) => {
                self.store.update(|state| {
                    state.identity.set_error(Some("Failed to verify OTP".to_owned()))
                });
                Err(IdentityFlowError::VerifyFailed)
            }
        };

        self.store.update(|state| state.identity.set_pending(false));
        outcome
    }

    /// Re-sends the code without changing stage. Independent of whether the
    /// previous send succeeded.
    pub async fn resend(&mut self) -> Result<(), IdentityFlowError> {
        let Some(draft) = self.draft.clone() else {
            return Err(IdentityFlowError::MissingPhoneDraft);
        };

        self.store.update(|state| state.identity.set_pending(true));
        let sent = self.api.send_verification_code(&draft.full_phone()).await;
        self.store.update(|state| state.identity.set_pending(false));

        sent.map_err(|_| IdentityFlowError::SendFailed)
    }

    /// Completes login with a freshly generated user id.
    pub fn submit_name(&mut self, name: &str) -> Result<UserProfile, IdentityFlowError> {
        let Some(draft) = self.draft.as_ref() else {
            return Err(IdentityFlowError::MissingPhoneDraft);
        };

        let profile = UserProfile {
            id: Uuid::now_v7(),
            phone: draft.full_phone(),
            country_code: draft.dial_code.clone(),
            name: name.trim().to_owned(),
        };

        let committed = profile.clone();
        self.store
            .update(move |state| state.identity.complete_login(committed));
        tracing::info!("identity verification complete");

        Ok(profile)
    }
}
