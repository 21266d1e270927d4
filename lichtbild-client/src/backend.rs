//! The narrow capability set the workflows need from the remote account/content service.

use async_trait::async_trait;
use lichtbild_common::model::{
    Id, ModelValidationError,
    auth::{Credentials, Session},
    post::{NewPost, Post, PostMarker},
    user::User,
};
use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T, E = BackendError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Request to the remote service failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Invalid remote service url: {0}")]
    Url(#[from] url::ParseError),
    #[error("Remote service replied with status {0}")]
    Status(StatusCode),
    #[error("A record from the remote service was invalid: {0}")]
    Data(#[from] ModelValidationError),
    #[error("Id {0:?} can not be sent as a path segment")]
    PathSegment(String),
    #[error("Remote service unavailable: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// The account of the current session, if there is one.
    async fn check_session(&self) -> Result<Option<User>>;

    /// `None` when the remote service rejects the credentials.
    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>>;

    async fn create_post(&self, post: &NewPost) -> Result<Post>;
}

/// Reads backing the feed and the update form.
#[async_trait]
pub trait PostSource: Send + Sync {
    async fn recent_posts(&self) -> Result<Vec<Post>>;

    async fn fetch_post(&self, post_id: &Id<PostMarker>) -> Result<Option<Post>>;
}
