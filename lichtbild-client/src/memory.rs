use crate::backend::{Backend, BackendError, PostSource, Result};
use async_trait::async_trait;
use lichtbild_common::model::{
    Id,
    auth::{Credentials, Session},
    post::{NewPost, Post, PostMarker},
    user::User,
};
use std::{cmp::Reverse, sync::Arc};
use time::OffsetDateTime;
use tokio::sync::Mutex;

/// In-memory remote service for tests and local development.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    accounts: Vec<Account>,
    current_user: Option<User>,
    posts: Vec<Post>,
    fail_post_creation: bool,
    next_id: u64,
    sign_in_calls: usize,
    create_post_calls: usize,
}

#[derive(Debug)]
struct Account {
    email: String,
    password: String,
    user: User,
}

impl MemoryState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_account(&self, email: &str, password: &str, user: User) {
        self.state.lock().await.accounts.push(Account {
            email: email.to_owned(),
            password: password.to_owned(),
            user,
        });
    }

    /// Starts a session for `user` as if a sign-in had already happened.
    pub async fn sign_in_as(&self, user: User) {
        self.state.lock().await.current_user = Some(user);
    }

    pub async fn sign_out(&self) {
        self.state.lock().await.current_user = None;
    }

    pub async fn add_post(&self, post: Post) {
        self.state.lock().await.posts.push(post);
    }

    /// Makes every later `create_post` call fail.
    pub async fn fail_post_creation(&self) {
        self.state.lock().await.fail_post_creation = true;
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.lock().await.posts.clone()
    }

    pub async fn sign_in_calls(&self) -> usize {
        self.state.lock().await.sign_in_calls
    }

    pub async fn create_post_calls(&self) -> usize {
        self.state.lock().await.create_post_calls
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn check_session(&self) -> Result<Option<User>> {
        Ok(self.state.lock().await.current_user.clone())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<Option<Session>> {
        let mut state = self.state.lock().await;
        state.sign_in_calls += 1;

        let Some(user) = state
            .accounts
            .iter()
            .find(|account| {
                account.email == credentials.email.get()
                    && account.password == credentials.password.get()
            })
            .map(|account| account.user.clone())
        else {
            return Ok(None);
        };

        let session = Session {
            id: Id::new(state.next_id("session-")),
            user_id: user.id.clone(),
        };
        state.current_user = Some(user);

        Ok(Some(session))
    }

    async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let mut state = self.state.lock().await;
        state.create_post_calls += 1;

        if state.fail_post_creation {
            return Err(BackendError::Unavailable(
                "post creation is switched off".to_owned(),
            ));
        }

        let creator = state
            .accounts
            .iter()
            .map(|account| &account.user)
            .chain(state.current_user.as_ref())
            .find(|user| user.id == post.creator)
            .cloned();

        let image_url = post
            .files
            .first()
            .map(|file| format!("memory://files/{}", file.file_name));

        let created = Post {
            id: Id::new(state.next_id("post-")),
            created_at: OffsetDateTime::now_utc(),
            caption: post.caption.get().to_owned(),
            location: post.location.get().to_owned(),
            tags: post.tags.get().to_vec(),
            creator,
            image_url,
        };
        state.posts.push(created.clone());

        Ok(created)
    }
}

#[async_trait]
impl PostSource for MemoryBackend {
    async fn recent_posts(&self) -> Result<Vec<Post>> {
        let state = self.state.lock().await;
        let mut posts = state.posts.clone();
        posts.sort_by_key(|post| Reverse(post.created_at));
        Ok(posts)
    }

    async fn fetch_post(&self, post_id: &Id<PostMarker>) -> Result<Option<Post>> {
        let state = self.state.lock().await;
        Ok(state.posts.iter().find(|post| post.id == *post_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        backend::{Backend, PostSource},
        memory::MemoryBackend,
    };
    use lichtbild_common::model::{
        Id,
        auth::{Credentials, Email, Password},
        post::{Caption, Location, NewPost, Tags},
        user::User,
    };

    fn jane() -> User {
        User {
            id: Id::new("u1"),
            name: "Jane".to_owned(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn sign_in_starts_a_session() {
        let backend = MemoryBackend::new();
        backend
            .add_account("jane@example.com", "correct horse", jane())
            .await;

        let wrong = Credentials {
            email: Email::new("jane@example.com".to_owned()).unwrap(),
            password: Password::new("wrong horse".to_owned()).unwrap(),
        };
        assert_eq!(backend.sign_in(&wrong).await.unwrap(), None);
        assert_eq!(backend.check_session().await.unwrap(), None);

        let right = Credentials {
            password: Password::new("correct horse".to_owned()).unwrap(),
            ..wrong
        };
        let session = backend.sign_in(&right).await.unwrap().unwrap();
        assert_eq!(session.user_id, jane().id);
        assert_eq!(backend.check_session().await.unwrap(), Some(jane()));
        assert_eq!(backend.sign_in_calls().await, 2);
    }

    #[tokio::test]
    async fn created_posts_are_listed_and_fetchable() {
        let backend = MemoryBackend::new();
        backend.sign_in_as(jane()).await;

        let post = backend
            .create_post(&NewPost {
                creator: jane().id,
                caption: Caption::new("Hello".to_owned()).unwrap(),
                files: Vec::new(),
                location: Location::new("Bern".to_owned()).unwrap(),
                tags: Tags::parse("a,b"),
            })
            .await
            .unwrap();

        assert_eq!(post.creator, Some(jane()));
        assert_eq!(backend.recent_posts().await.unwrap(), [post.clone()]);
        assert_eq!(backend.fetch_post(&post.id).await.unwrap(), Some(post));
        assert_eq!(backend.fetch_post(&Id::new("nope")).await.unwrap(), None);
    }
}
