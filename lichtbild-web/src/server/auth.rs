use crate::server::{ServerError, SharedSession};
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use lichtbild_common::model::user::User;

/// The user of the current session; signed out requests are sent to sign in.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct SignedInUser(pub User);

impl<S> FromRequestParts<S> for SignedInUser
where
    SharedSession: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        SharedSession::from_ref(state)
            .read()
            .await
            .user()
            .cloned()
            .map(Self)
            .ok_or(ServerError::SignedOut)
    }
}
