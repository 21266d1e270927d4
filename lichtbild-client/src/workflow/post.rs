use crate::{
    backend::Backend,
    form::PostForm,
    ui::{Navigator, Notifier, POST_FAILED, Route, Toast},
};
use lichtbild_common::model::{Id, post::Post, user::UserMarker};
use tracing::{debug, warn};

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum PostOutcome {
    /// Field errors were stored on the form; nothing was sent.
    Invalid,
    Created(Box<Post>),
    Failed,
}

/// Creates a post from `form` on behalf of `creator`.
///
/// Any valid submission ends on the home route, whether the remote call succeeded or not.
pub async fn submit_post<B, U>(
    form: &mut PostForm,
    creator: &Id<UserMarker>,
    backend: &B,
    ui: &mut U,
) -> PostOutcome
where
    B: Backend + ?Sized,
    U: Navigator + Notifier,
{
    let Some(new_post) = form.validate(creator) else {
        debug!("Post form has invalid fields");
        return PostOutcome::Invalid;
    };

    let outcome = match backend.create_post(&new_post).await {
        Ok(post) => {
            debug!(post_id = %post.id, "Post created");
            PostOutcome::Created(Box::new(post))
        }
        Err(err) => {
            warn!(error = %err, "Creating the post failed");
            ui.toast(Toast::new(POST_FAILED));
            PostOutcome::Failed
        }
    };

    ui.navigate(Route::Home);
    outcome
}

#[cfg(test)]
mod tests {
    use crate::{
        form::{PostForm, PostValues},
        memory::MemoryBackend,
        ui::{Effects, POST_FAILED, Route, Toast},
        workflow::{PostOutcome, submit_post},
    };
    use lichtbild_common::model::{Id, post::ImageAttachment, user::User};

    fn jane() -> User {
        User {
            id: Id::new("u1"),
            name: "Jane".to_owned(),
            image_url: None,
        }
    }

    fn hello_form() -> PostForm {
        PostForm::new(
            PostValues {
                caption: "Hello".to_owned(),
                location: "Bern".to_owned(),
                tags: "a,b,c".to_owned(),
            },
            vec![ImageAttachment {
                file_name: "sunset.png".to_owned(),
                content_type: "image/png".to_owned(),
                bytes: vec![0x89, b'P', b'N', b'G'],
            }],
        )
    }

    #[tokio::test]
    async fn creates_post_and_goes_home() {
        let backend = MemoryBackend::new();
        backend.sign_in_as(jane()).await;
        let mut form = hello_form();
        let mut effects = Effects::default();

        let outcome = submit_post(&mut form, &jane().id, &backend, &mut effects).await;

        let PostOutcome::Created(post) = outcome else {
            panic!("unexpected outcome {outcome:?}");
        };
        assert_eq!(post.caption, "Hello");
        assert_eq!(post.location, "Bern");
        assert_eq!(post.tags, ["a", "b", "c"]);
        assert_eq!(post.creator, Some(jane()));
        assert_eq!(post.image_url.as_deref(), Some("memory://files/sunset.png"));
        assert_eq!(effects.navigation, Some(Route::Home));
        assert!(effects.toasts.is_empty());
        assert_eq!(backend.posts().await, [*post]);
    }

    #[tokio::test]
    async fn failure_still_goes_home_with_notice() {
        let backend = MemoryBackend::new();
        backend.fail_post_creation().await;
        let mut form = hello_form();
        let mut effects = Effects::default();

        let outcome = submit_post(&mut form, &jane().id, &backend, &mut effects).await;

        assert_eq!(outcome, PostOutcome::Failed);
        assert_eq!(effects.navigation, Some(Route::Home));
        assert_eq!(effects.toasts, [Toast::new(POST_FAILED)]);
        assert!(backend.posts().await.is_empty());
    }

    #[tokio::test]
    async fn invalid_form_is_not_submitted() {
        let backend = MemoryBackend::new();
        let mut form = hello_form();
        form.values.caption = "Hi".to_owned();
        let mut effects = Effects::default();

        let outcome = submit_post(&mut form, &jane().id, &backend, &mut effects).await;

        assert_eq!(outcome, PostOutcome::Invalid);
        assert_eq!(form.errors.get("caption"), Some("Minimum 5 characters."));
        assert_eq!(effects, Effects::default());
        assert_eq!(backend.create_post_calls().await, 0);
    }
}
