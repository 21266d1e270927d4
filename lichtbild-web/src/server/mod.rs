use axum::{
    Router,
    extract::{
        FromRef, Request,
        multipart::MultipartError,
        rejection::{FormRejection, PathRejection},
    },
    http::{StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use lichtbild_client::{
    backend::{Backend, BackendError, PostSource},
    session::SessionContext,
    ui::Route,
    workflow::UnknownAccountPolicy,
};
use lichtbild_common::model::{Id, post::PostMarker};
use std::sync::Arc;
use thiserror::Error;
use toast::ToastQueue;
use tokio::sync::RwLock;
use tracing::{debug, error};

mod auth;
mod form;
mod html;
mod routes;
mod toast;

pub type ServerRouter = Router<ServerState>;

pub type SharedSession = Arc<RwLock<SessionContext>>;

#[derive(Clone, FromRef)]
pub struct ServerState {
    pub backend: Arc<dyn Backend>,
    pub posts: Arc<dyn PostSource>,
    pub session: SharedSession,
    pub toasts: Arc<ToastQueue>,
    pub unknown_account: UnknownAccountPolicy,
}

impl ServerState {
    pub fn new<B>(
        backend: Arc<B>,
        session: SessionContext,
        unknown_account: UnknownAccountPolicy,
    ) -> Self
    where
        B: Backend + PostSource + 'static,
    {
        Self {
            backend: backend.clone(),
            posts: backend,
            session: Arc::new(RwLock::new(session)),
            toasts: Arc::default(),
            unknown_account,
        }
    }
}

pub fn routes() -> ServerRouter {
    routes::routes().fallback(fallback)
}

pub async fn fallback(request: Request) -> ServerError {
    ServerError::UnknownRoute(request.into_parts().0.uri)
}

pub type Result<T, E = ServerError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Unknown route requested: {0}")]
    UnknownRoute(Uri),
    #[error("Path rejected: {0}")]
    PathRejection(#[from] PathRejection),
    #[error("Incoming form rejected: {0}")]
    FormRejection(#[from] FormRejection),
    #[error("Multipart form could not be read: {0}")]
    Multipart(#[from] MultipartError),
    #[error("Page could not be rendered: {0}")]
    Template(#[from] askama::Error),
    #[error("Post with id {0} was not found.")]
    PostByIdNotFound(Id<PostMarker>),
    #[error("Page requires a signed in user")]
    SignedOut,
    #[error(transparent)]
    Backend(#[from] BackendError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::UnknownRoute(_)
            | ServerError::PathRejection(_)
            | ServerError::PostByIdNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::FormRejection(_) | ServerError::Multipart(_) => StatusCode::BAD_REQUEST,
            ServerError::SignedOut => StatusCode::SEE_OTHER,
            ServerError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Backend(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        if let ServerError::SignedOut = self {
            debug!("Signed out, redirecting to sign in");
            return Redirect::to(&Route::SignIn.to_string()).into_response();
        }

        let status = self.status();

        error!(error = %self, %status, "Replying with error");

        (status, status.to_string()).into_response()
    }
}
