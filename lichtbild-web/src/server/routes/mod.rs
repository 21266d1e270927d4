use crate::server::{ServerRouter, html::Html, toast::ToastQueue};
use askama::Template;
use axum::{
    Router,
    response::{IntoResponse, Redirect, Response},
};
use lichtbild_client::ui::{Effects, Toast};

mod auth;
mod posts;

pub fn routes() -> ServerRouter {
    Router::new().merge(auth::routes()).merge(posts::routes())
}

/// Follows the navigation a workflow asked for, or renders `page` again.
///
/// Toasts are queued either way so the next rendered page shows them.
async fn respond<T, F>(effects: Effects, toasts: &ToastQueue, page: F) -> Response
where
    T: Template,
    F: FnOnce(Vec<Toast>) -> T,
{
    toasts.push_all(effects.toasts).await;

    match effects.navigation {
        Some(route) => Redirect::to(&route.to_string()).into_response(),
        None => Html(page(toasts.drain().await)).into_response(),
    }
}
