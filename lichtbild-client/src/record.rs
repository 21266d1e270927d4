use lichtbild_common::model::{
    Id, ModelValidationError,
    auth::{Email, Password, Session},
    post::{Caption, FileMarker, Location, Post, Tags},
    user::{User, UserMarker},
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct UserRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Hash, Deserialize)]
pub(crate) struct SessionRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub secret: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize)]
pub(crate) struct FileRecord {
    #[serde(rename = "$id")]
    pub id: String,
    pub url: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub(crate) struct PostRecord {
    #[serde(rename = "$id")]
    pub id: String,
    #[serde(rename = "$createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub creator: Option<UserRecord>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Deserialize)]
pub(crate) struct PostListRecord {
    pub documents: Vec<PostRecord>,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub(crate) struct SignInRequest<'a> {
    pub email: &'a Email,
    pub password: &'a Password,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct NewPostRequest<'a> {
    pub creator: &'a Id<UserMarker>,
    pub caption: &'a Caption,
    pub image_id: Option<&'a Id<FileMarker>>,
    pub image_url: Option<&'a str>,
    pub location: &'a Location,
    pub tags: &'a Tags,
}

impl std::fmt::Debug for SessionRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionRecord")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("secret", &"[redacted]")
            .finish()
    }
}

impl TryFrom<UserRecord> for User {
    type Error = ModelValidationError;

    fn try_from(value: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::parse(value.id)?,
            name: value.name,
            image_url: value.image_url.filter(|url| !url.is_empty()),
        })
    }
}

impl TryFrom<&SessionRecord> for Session {
    type Error = ModelValidationError;

    fn try_from(value: &SessionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::parse(value.id.clone())?,
            user_id: Id::parse(value.user_id.clone())?,
        })
    }
}

impl TryFrom<PostRecord> for Post {
    type Error = ModelValidationError;

    fn try_from(value: PostRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: Id::parse(value.id)?,
            created_at: value.created_at,
            caption: value.caption,
            location: value.location,
            tags: value.tags,
            creator: value.creator.map(User::try_from).transpose()?,
            image_url: value.image_url.filter(|url| !url.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{PostListRecord, PostRecord};
    use lichtbild_common::model::{ModelValidationError, post::Post};

    #[test]
    fn post_with_null_creator() {
        let record: PostRecord = serde_json::from_str(
            r#"{"$id":"p1","$createdAt":"2026-10-19T14:05:00.000+00:00","caption":"Hello",
            "location":"Bern","tags":["a"],"creator":null,"imageUrl":null}"#,
        )
        .unwrap();

        let post = Post::try_from(record).unwrap();
        assert_eq!(post.id.get(), "p1");
        assert!(post.creator.is_none());
        assert!(post.image_url.is_none());
    }

    #[test]
    fn post_list_with_creator() {
        let list: PostListRecord = serde_json::from_str(
            r#"{"documents":[{"$id":"p1","$createdAt":"2026-10-19T14:05:00Z",
            "caption":"Hello","location":"Bern","tags":["a","b"],
            "creator":{"$id":"u1","name":"Jane","imageUrl":""},
            "imageUrl":"https://cdn.example.com/p1.png"}]}"#,
        )
        .unwrap();

        let post = Post::try_from(list.documents.into_iter().next().unwrap()).unwrap();
        let creator = post.creator.unwrap();
        assert_eq!(creator.id.get(), "u1");
        assert_eq!(creator.name, "Jane");
        assert_eq!(creator.image_url, None);
        assert_eq!(post.tags, ["a", "b"]);
    }

    #[test]
    fn post_with_empty_id_is_invalid() {
        let record: PostRecord = serde_json::from_str(
            r#"{"$id":"","$createdAt":"2026-10-19T14:05:00Z","creator":null}"#,
        )
        .unwrap();

        assert!(matches!(
            Post::try_from(record),
            Err(ModelValidationError::Id(_))
        ));
    }
}
