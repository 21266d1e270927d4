use crate::server::{
    ServerError, ServerRouter, SharedSession, form::Form, html::Html, routes::respond,
    toast::ToastQueue,
};
use askama::Template;
use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::routing::{RouterExt, TypedPath};
use lichtbild_client::{
    backend::Backend,
    form::{SigninForm, SigninValues},
    ui::{Effects, Notifier, Route, SIGN_IN_FAILED, Toast},
    workflow::{UnknownAccountPolicy, submit_sign_in},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(sign_in_page)
        .typed_post(sign_in)
        .typed_get(sign_up_page)
}

#[derive(Template)]
#[template(path = "sign_in.html")]
struct SignInTemplate {
    toasts: Vec<Toast>,
    email: String,
    email_error: String,
    password_error: String,
}

impl SignInTemplate {
    fn new(form: &SigninForm, toasts: Vec<Toast>) -> Self {
        Self {
            toasts,
            email: form.values.email.clone(),
            email_error: form.errors.get("email").unwrap_or_default().to_owned(),
            password_error: form.errors.get("password").unwrap_or_default().to_owned(),
        }
    }
}

#[derive(Template)]
#[template(path = "sign_up.html")]
struct SignUpTemplate {
    toasts: Vec<Toast>,
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/sign-in", rejection(ServerError))]
struct SignInPath();

async fn sign_in_page(
    SignInPath(): SignInPath,
    State(session): State<SharedSession>,
    State(toasts): State<Arc<ToastQueue>>,
) -> Response {
    if session.read().await.is_authenticated() {
        return Redirect::to(&Route::Home.to_string()).into_response();
    }

    let page = SignInTemplate::new(&SigninForm::default(), toasts.drain().await);
    Html(page).into_response()
}

async fn sign_in(
    SignInPath(): SignInPath,
    State(backend): State<Arc<dyn Backend>>,
    State(session): State<SharedSession>,
    State(toasts): State<Arc<ToastQueue>>,
    State(unknown_account): State<UnknownAccountPolicy>,
    Form(values): Form<SigninValues>,
) -> Response {
    let mut form = SigninForm::new(values);
    let mut effects = Effects::default();

    let mut session = session.write().await;
    let result = submit_sign_in(
        &mut form,
        &mut session,
        backend.as_ref(),
        unknown_account,
        &mut effects,
    )
    .await;
    drop(session);

    if let Err(err) = result {
        warn!(error = %err, "Signing in failed");
        effects.toast(Toast::new(SIGN_IN_FAILED));
    }

    let page = |toasts| SignInTemplate::new(&form, toasts);
    respond(effects, &toasts, page).await
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/sign-up", rejection(ServerError))]
struct SignUpPath();

async fn sign_up_page(
    SignUpPath(): SignUpPath,
    State(toasts): State<Arc<ToastQueue>>,
) -> Html<SignUpTemplate> {
    Html(SignUpTemplate {
        toasts: toasts.drain().await,
    })
}
