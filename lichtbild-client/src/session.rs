use crate::backend::Backend;
use lichtbild_common::model::user::User;
use tracing::{debug, error};

/// Who is signed in, as last confirmed by the remote service.
///
/// Resolved once when the application starts and refreshed only through
/// [`SessionContext::check_auth_user`]; workflows receive it as a parameter.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct SessionContext {
    user: Option<User>,
}

impl SessionContext {
    #[must_use]
    pub fn signed_out() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub async fn resolve<B: Backend + ?Sized>(backend: &B) -> Self {
        let mut session = Self::signed_out();
        session.check_auth_user(backend).await;
        session
    }

    /// Asks the remote service for the current account and returns whether there is one.
    ///
    /// A failing remote call counts as signed out.
    pub async fn check_auth_user<B: Backend + ?Sized>(&mut self, backend: &B) -> bool {
        match backend.check_session().await {
            Ok(Some(user)) => {
                debug!(user_id = %user.id, "Session confirmed");
                self.user = Some(user);
                true
            }
            Ok(None) => {
                self.user = None;
                false
            }
            Err(err) => {
                error!(error = %err, "Checking the session failed");
                self.user = None;
                false
            }
        }
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
