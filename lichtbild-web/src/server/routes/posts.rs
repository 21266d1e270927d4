use crate::server::{
    Result, ServerError, ServerRouter, auth::SignedInUser, html::Html, routes::respond,
    toast::ToastQueue,
};
use askama::Template;
use axum::{
    extract::{Multipart, State},
    response::Response,
};
use axum_extra::routing::{RouterExt, TypedPath};
use lichtbild_client::{
    backend::{Backend, PostSource},
    card::PostCard,
    form::{PostForm, PostValues},
    ui::{Effects, Route, Toast},
    workflow::submit_post,
};
use lichtbild_common::model::{
    Id,
    post::{ImageAttachment, Post, PostMarker},
    user::User,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

pub fn routes() -> ServerRouter {
    ServerRouter::new()
        .typed_get(home)
        .typed_get(create_post_page)
        .typed_post(create_post)
        .typed_get(update_post_page)
        .typed_post(update_post)
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate {
    toasts: Vec<Toast>,
    user_name: String,
    cards: Vec<PostCard>,
}

#[derive(Template)]
#[template(path = "post_form.html")]
struct PostFormTemplate {
    toasts: Vec<Toast>,
    heading: &'static str,
    action: String,
    submit_label: &'static str,
    caption: String,
    location: String,
    tags: String,
    caption_error: String,
    location_error: String,
    media_url: String,
}

impl PostFormTemplate {
    fn create(form: &PostForm, toasts: Vec<Toast>) -> Self {
        Self::new(
            "Create Post",
            &Route::CreatePost,
            "Create Post",
            form,
            toasts,
        )
    }

    fn update(id: &Id<PostMarker>, form: &PostForm, toasts: Vec<Toast>) -> Self {
        Self::new(
            "Edit Post",
            &Route::UpdatePost(id.clone()),
            "Update Post",
            form,
            toasts,
        )
    }

    fn new(
        heading: &'static str,
        action: &Route,
        submit_label: &'static str,
        form: &PostForm,
        toasts: Vec<Toast>,
    ) -> Self {
        Self {
            toasts,
            heading,
            action: action.to_string(),
            submit_label,
            caption: form.values.caption.clone(),
            location: form.values.location.clone(),
            tags: form.values.tags.clone(),
            caption_error: form.errors.get("caption").unwrap_or_default().to_owned(),
            location_error: form.errors.get("location").unwrap_or_default().to_owned(),
            media_url: form.media_url.clone().unwrap_or_default(),
        }
    }
}

async fn read_post_form(mut multipart: Multipart) -> Result<PostForm> {
    let mut values = PostValues::default();
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        match name.as_str() {
            "caption" => values.caption = field.text().await?,
            "location" => values.location = field.text().await?,
            "tags" => values.tags = field.text().await?,
            "file" => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_owned();
                let bytes = field.bytes().await?;

                // Browsers send an empty part when no file was picked.
                if !bytes.is_empty() {
                    files.push(ImageAttachment {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            }
            other => debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(PostForm::new(values, files))
}

/// Posts created by someone other than `user` are reported as not found.
async fn fetch_own_post(posts: &dyn PostSource, id: Id<PostMarker>, user: &User) -> Result<Post> {
    match posts.fetch_post(&id).await? {
        Some(post) if post.creator.as_ref().is_some_and(|c| c.is(&user.id)) => Ok(post),
        Some(_) => {
            debug!(post_id = %id, "Post belongs to another user");
            Err(ServerError::PostByIdNotFound(id))
        }
        None => Err(ServerError::PostByIdNotFound(id)),
    }
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/", rejection(ServerError))]
struct HomePath();

async fn home(
    HomePath(): HomePath,
    SignedInUser(user): SignedInUser,
    State(posts): State<Arc<dyn PostSource>>,
    State(toasts): State<Arc<ToastQueue>>,
) -> Result<Html<HomeTemplate>> {
    let cards = posts
        .recent_posts()
        .await?
        .iter()
        .filter_map(|post| PostCard::new(post, Some(&user)))
        .collect();

    Ok(Html(HomeTemplate {
        toasts: toasts.drain().await,
        user_name: user.name,
        cards,
    }))
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/create-post", rejection(ServerError))]
struct CreatePostPath();

async fn create_post_page(
    CreatePostPath(): CreatePostPath,
    _user: SignedInUser,
    State(toasts): State<Arc<ToastQueue>>,
) -> Html<PostFormTemplate> {
    Html(PostFormTemplate::create(
        &PostForm::default(),
        toasts.drain().await,
    ))
}

async fn create_post(
    CreatePostPath(): CreatePostPath,
    SignedInUser(user): SignedInUser,
    State(backend): State<Arc<dyn Backend>>,
    State(toasts): State<Arc<ToastQueue>>,
    multipart: Multipart,
) -> Result<Response> {
    let mut form = read_post_form(multipart).await?;
    let mut effects = Effects::default();

    submit_post(&mut form, &user.id, backend.as_ref(), &mut effects).await;

    let page = |toasts| PostFormTemplate::create(&form, toasts);
    Ok(respond(effects, &toasts, page).await)
}

#[derive(TypedPath, Deserialize)]
#[typed_path("/update-post/{id}", rejection(ServerError))]
struct UpdatePostPath {
    id: Id<PostMarker>,
}

async fn update_post_page(
    UpdatePostPath { id }: UpdatePostPath,
    SignedInUser(user): SignedInUser,
    State(posts): State<Arc<dyn PostSource>>,
    State(toasts): State<Arc<ToastQueue>>,
) -> Result<Html<PostFormTemplate>> {
    let post = fetch_own_post(posts.as_ref(), id, &user).await?;

    Ok(Html(PostFormTemplate::update(
        &post.id,
        &PostForm::from_post(&post),
        toasts.drain().await,
    )))
}

/// Edits are submitted as a new post.
async fn update_post(
    UpdatePostPath { id }: UpdatePostPath,
    SignedInUser(user): SignedInUser,
    State(backend): State<Arc<dyn Backend>>,
    State(posts): State<Arc<dyn PostSource>>,
    State(toasts): State<Arc<ToastQueue>>,
    multipart: Multipart,
) -> Result<Response> {
    let post = fetch_own_post(posts.as_ref(), id, &user).await?;
    let mut form = read_post_form(multipart).await?;
    form.media_url = post.image_url;
    let mut effects = Effects::default();

    submit_post(&mut form, &user.id, backend.as_ref(), &mut effects).await;

    let page = |toasts| PostFormTemplate::update(&post.id, &form, toasts);
    Ok(respond(effects, &toasts, page).await)
}
