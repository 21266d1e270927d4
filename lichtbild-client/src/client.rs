use crate::{
    backend::{Backend, BackendError, PostSource, Result},
    record::{
        FileRecord, NewPostRequest, PostListRecord, PostRecord, SessionRecord, SignInRequest,
        UserRecord,
    },
};
use async_trait::async_trait;
use lichtbild_common::model::{
    Id, ModelValidationError,
    auth::{Credentials, Session},
    post::{FileMarker, ImageAttachment, NewPost, Post, PostMarker},
    user::User,
};
use reqwest::{
    RequestBuilder, Response, StatusCode,
    multipart::{Form, Part},
};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

/// The remote service reached over JSON/HTTP.
///
/// The session secret handed out by a successful sign-in is kept here and sent as a bearer
/// token with every later request.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    session_token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            session_token: RwLock::new(None),
        })
    }

    #[must_use]
    pub fn with_session_token(mut self, token: Option<String>) -> Self {
        self.session_token = RwLock::new(token);
        self
    }

    pub async fn has_session_token(&self) -> bool {
        self.session_token.read().await.is_some()
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// `collection` followed by `id` as one percent-encoded path segment.
    fn record_endpoint(&self, collection: &str, id: &str) -> Result<Url> {
        if id == "." || id == ".." {
            return Err(BackendError::PathSegment(id.to_owned()));
        }

        let mut url = self.endpoint(collection)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .push(id);

        Ok(url)
    }

    async fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session_token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn upload_file(&self, file: &ImageAttachment) -> Result<FileRecord> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let request = self
            .http
            .post(self.endpoint("storage/files")?)
            .multipart(form);
        let response = self.authorized(request).await.send().await?;

        Ok(success(response)?.json().await?)
    }

    async fn delete_file(&self, file_id: &Id<FileMarker>) -> Result<()> {
        let url = self.record_endpoint("storage/files", file_id.get())?;
        let response = self.authorized(self.http.delete(url)).await.send().await?;

        success(response)?;
        Ok(())
    }

    async fn insert_post(
        &self,
        post: &NewPost,
        image: Option<(&Id<FileMarker>, &str)>,
    ) -> Result<Post> {
        let body = NewPostRequest {
            creator: &post.creator,
            caption: &post.caption,
            image_id: image.map(|(id, _)| id),
            image_url: image.map(|(_, url)| url),
            location: &post.location,
            tags: &post.tags,
        };

        let request = self.http.post(self.endpoint("posts")?).json(&body);
        let response = self.authorized(request).await.send().await?;
        let record: PostRecord = success(response)?.json().await?;

        Ok(Post::try_from(record)?)
    }
}

fn success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(BackendError::Status(status))
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn check_session(&self) -> Result<Option<User>> {
        let request = self.http.get(self.endpoint("account")?);
        let response = self.authorized(request).await.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        let record: UserRecord = success(response)?.json().await?;
        Ok(Some(User::try_from(record)?))
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>> {
        let body = SignInRequest {
            email: &credentials.email,
            password: &credentials.password,
        };
        let response = self
            .http
            .post(self.endpoint("account/sessions/email")?)
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            debug!("Remote service rejected the credentials");
            return Ok(None);
        }

        let record: SessionRecord = success(response)?.json().await?;
        let session = Session::try_from(&record)?;
        *self.session_token.write().await = Some(record.secret);

        Ok(Some(session))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let Some((first, rest)) = post.files.split_first() else {
            return self.insert_post(post, None).await;
        };

        if !rest.is_empty() {
            warn!(
                dropped = rest.len(),
                "A post carries one image, only the first attachment is uploaded"
            );
        }

        let file = self.upload_file(first).await?;
        let file_id: Id<FileMarker> = Id::parse(file.id).map_err(ModelValidationError::from)?;

        match self.insert_post(post, Some((&file_id, file.url.as_str()))).await {
            Ok(post) => Ok(post),
            Err(err) => {
                if let Err(delete_err) = self.delete_file(&file_id).await {
                    warn!(%file_id, error = %delete_err, "Could not delete orphaned upload");
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl PostSource for ApiClient {
    async fn recent_posts(&self) -> Result<Vec<Post>> {
        let request = self.http.get(self.endpoint("posts")?);
        let response = self.authorized(request).await.send().await?;
        let list: PostListRecord = success(response)?.json().await?;

        let posts = list
            .documents
            .into_iter()
            .map(Post::try_from)
            .collect::<Result<_, _>>()?;
        Ok(posts)
    }

    async fn fetch_post(&self, post_id: &Id<PostMarker>) -> Result<Option<Post>> {
        let request = self.http.get(self.record_endpoint("posts", post_id.get())?);
        let response = self.authorized(request).await.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let record: PostRecord = success(response)?.json().await?;
        Ok(Some(Post::try_from(record)?))
    }
}
