//! Session management port.

use uuid::Uuid;

/// Handle to the caller's session, scoped to a single request.
///
/// The domain core never reads identity from ambient state: operations that
/// touch session state receive this handle as an explicit parameter, and
/// owner-gated operations receive the resolved user id directly.
///
/// Deliberately not `Send`/`Sync`: implementations wrap a per-request
/// cookie handle that never crosses threads.
pub trait SessionManager {
    /// Associate the session with an authenticated user.
    fn establish(&self, user_id: Uuid) -> Result<(), SessionError>;

    /// Drop the authenticated identity, ending the session.
    fn terminate(&self);

    /// The user id the session currently carries, if any.
    fn current_user(&self) -> Result<Option<Uuid>, SessionError>;
}

/// Session store failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session store failure: {0}")]
    Store(String),
}

impl From<SessionError> for crate::error::DomainError {
    fn from(err: SessionError) -> Self {
        crate::error::DomainError::Internal(err.to_string())
    }
}
