//! Request identity, stored in the session.

use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;
use tracing::debug;

use crate::models::AdminUser;
use crate::state::AppState;

/// Session key holding the logged-in username.
pub const SESSION_USER_ID: &str = "user_id";

/// The user behind the current request.
#[derive(Debug, Clone, Default)]
pub enum CurrentUser {
    #[default]
    Anonymous,
    Authenticated(AdminUser),
}

impl CurrentUser {
    /// Resolve the session's user against the directory.
    ///
    /// A username that no longer exists, or an unreadable session, resolves
    /// to [`CurrentUser::Anonymous`].
    pub async fn from_session(state: &AppState, session: &Session) -> Self {
        let username: Option<String> = session.get(SESSION_USER_ID).await.ok().flatten();

        match username {
            Some(name) => match state.users().find(&name) {
                Some(user) => Self::Authenticated(user.clone()),
                None => {
                    debug!(username = %name, "session refers to unknown user");
                    Self::Anonymous
                }
            },
            None => Self::Anonymous,
        }
    }

    pub fn user(&self) -> Option<&AdminUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Authenticated, active and flagged staff.
    pub fn is_staff(&self) -> bool {
        self.user().is_some_and(|u| u.is_active && u.is_staff)
    }
}

/// Store `user` in the session under a fresh session id.
pub async fn login(session: &Session, user: &AdminUser) -> Result<(), SessionError> {
    session.cycle_id().await?;
    session.insert(SESSION_USER_ID, &user.username).await
}

/// Drop the session entirely.
pub async fn logout(session: &Session) -> Result<(), SessionError> {
    session.flush().await
}
