use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// The only identity operations the catalog core reads. Credential handling,
/// session tokens and OAuth stay with the vendor behind this seam.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn is_signed_in(&self) -> bool;
    async fn current_user(&self) -> Option<UserProfile>;
}

/// Identity provider with nobody signed in.
pub struct AnonymousIdentity;

#[async_trait]
impl IdentityProvider for AnonymousIdentity {
    async fn is_signed_in(&self) -> bool {
        false
    }

    async fn current_user(&self) -> Option<UserProfile> {
        None
    }
}

/// Progress of an email-code sign-up flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignUpState {
    NotStarted,
    /// Credentials accepted; a verification code was emailed to the user.
    AwaitingCode,
    Complete,
    Failed(String),
}

impl SignUpState {
    /// Provider accepted the credentials and sent a verification code.
    /// Re-submitting after a failure starts the flow over.
    pub fn submitted(self) -> Self {
        match self {
            SignUpState::NotStarted | SignUpState::Failed(_) => SignUpState::AwaitingCode,
            other => other,
        }
    }

    /// Provider confirmed the emailed code.
    pub fn verified(self) -> Self {
        match self {
            SignUpState::AwaitingCode => SignUpState::Complete,
            other => other,
        }
    }

    /// Provider rejected the credentials or the code. A finished sign-up
    /// cannot fail retroactively.
    pub fn failed(self, reason: impl Into<String>) -> Self {
        match self {
            SignUpState::Complete => SignUpState::Complete,
            _ => SignUpState::Failed(reason.into()),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, SignUpState::Complete)
    }
}
