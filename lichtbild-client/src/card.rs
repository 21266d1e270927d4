use crate::ui::{PLACEHOLDER_AVATAR, Route};
use lichtbild_common::{
    model::{post::Post, user::User},
    util::format_date_string,
};
use tracing::warn;

/// Everything a post card shows, derived from a fetched post.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct PostCard {
    pub creator_name: String,
    pub avatar_url: String,
    pub profile_route: Route,
    pub created_at: String,
    pub location: String,
    pub caption: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    /// Only set when the viewer created the post.
    pub edit_route: Option<Route>,
}

impl PostCard {
    /// `None` for a post without a creator, which is not rendered at all.
    #[must_use]
    pub fn new(post: &Post, viewer: Option<&User>) -> Option<Self> {
        let creator = post.creator.as_ref()?;

        let created_at = format_date_string(post.created_at).unwrap_or_else(|err| {
            warn!(post_id = %post.id, error = %err, "Could not format post date");
            String::new()
        });
        let is_owner = viewer.is_some_and(|viewer| viewer.is(&creator.id));

        Some(Self {
            creator_name: creator.name.clone(),
            avatar_url: creator
                .image_url
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_AVATAR.to_owned()),
            profile_route: Route::Profile(creator.id.clone()),
            created_at,
            location: post.location.clone(),
            caption: post.caption.clone(),
            tags: post.tags.clone(),
            image_url: post.image_url.clone(),
            edit_route: is_owner.then(|| Route::UpdatePost(post.id.clone())),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        card::PostCard,
        ui::{PLACEHOLDER_AVATAR, Route},
    };
    use lichtbild_common::model::{Id, post::Post, user::User};
    use time::macros::datetime;

    fn user(id: &str) -> User {
        User {
            id: Id::new(id),
            name: format!("User {id}"),
            image_url: None,
        }
    }

    fn post(creator: Option<User>) -> Post {
        Post {
            id: Id::new("p1"),
            created_at: datetime!(2026-10-19 14:05 UTC),
            caption: "Hello".to_owned(),
            location: "Bern".to_owned(),
            tags: vec!["a".to_owned()],
            creator,
            image_url: None,
        }
    }

    #[test]
    fn missing_creator_renders_nothing() {
        assert_eq!(PostCard::new(&post(None), Some(&user("u1"))), None);
    }

    #[test]
    fn owner_gets_edit_route() {
        let card = PostCard::new(&post(Some(user("u1"))), Some(&user("u1"))).unwrap();
        assert_eq!(card.edit_route, Some(Route::UpdatePost(Id::new("p1"))));
    }

    #[test]
    fn others_do_not() {
        let post = post(Some(user("u1")));
        let stranger = PostCard::new(&post, Some(&user("u2"))).unwrap();
        assert_eq!(stranger.edit_route, None);
        assert_eq!(PostCard::new(&post, None).unwrap().edit_route, None);
    }

    #[test]
    fn maps_creator_and_date() {
        let mut creator = user("u1");
        let card = PostCard::new(&post(Some(creator.clone())), None).unwrap();
        assert_eq!(card.avatar_url, PLACEHOLDER_AVATAR);
        assert_eq!(card.creator_name, "User u1");
        assert_eq!(card.profile_route.to_string(), "/profile/u1");
        assert_eq!(card.created_at, "Oct 19, 2026 at 2:05 PM");
        assert_eq!(card.location, "Bern");

        creator.image_url = Some("https://cdn.example.com/u1.png".to_owned());
        let card = PostCard::new(&post(Some(creator)), None).unwrap();
        assert_eq!(card.avatar_url, "https://cdn.example.com/u1.png");
    }
}
