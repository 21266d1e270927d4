use crate::model::{
    Id,
    user::{User, UserMarker},
};
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use thiserror::Error;
use time::OffsetDateTime;

pub const CAPTION_MIN_LEN: usize = 5;
pub const CAPTION_MAX_LEN: usize = 2200;
pub const LOCATION_MIN_LEN: usize = 1;
pub const LOCATION_MAX_LEN: usize = 1000;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct PostMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct FileMarker;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum InvalidCaptionError {
    #[error("Minimum 5 characters.")]
    TooShort,
    #[error("Maximum 2,200 characters.")]
    TooLong,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Error)]
pub enum InvalidLocationError {
    #[error("This field is required")]
    Missing,
    #[error("Maximum 1000 characters.")]
    TooLong,
}

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct Post {
    pub id: Id<PostMarker>,
    pub created_at: OffsetDateTime,
    pub caption: String,
    pub location: String,
    pub tags: Vec<String>,
    pub creator: Option<User>,
    pub image_url: Option<String>,
}

/// A post as submitted to the remote service.
#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub struct NewPost {
    pub creator: Id<UserMarker>,
    pub caption: Caption,
    pub files: Vec<ImageAttachment>,
    pub location: Location,
    pub tags: Tags,
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct ImageAttachment {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Debug for ImageAttachment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct Caption(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct Location(String);

/// Tag list parsed from the comma separated form field.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Caption {
    pub fn new(caption: String) -> Result<Self, InvalidCaptionError> {
        let len = caption.chars().count();
        if len < CAPTION_MIN_LEN {
            Err(InvalidCaptionError::TooShort)
        } else if len > CAPTION_MAX_LEN {
            Err(InvalidCaptionError::TooLong)
        } else {
            Ok(Self(caption))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Location {
    pub fn new(location: String) -> Result<Self, InvalidLocationError> {
        let len = location.chars().count();
        if len < LOCATION_MIN_LEN {
            Err(InvalidLocationError::Missing)
        } else if len > LOCATION_MAX_LEN {
            Err(InvalidLocationError::TooLong)
        } else {
            Ok(Self(location))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Tags {
    /// Whitespace is removed entirely, so `"art, city life"` yields `["art", "citylife"]`.
    #[must_use]
    pub fn parse(tags: &str) -> Self {
        let tags = tags
            .split(',')
            .map(|tag| tag.split_whitespace().collect::<String>())
            .filter(|tag| !tag.is_empty())
            .collect();

        Self(tags)
    }

    #[must_use]
    pub fn get(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }

    /// Inverse of [`Tags::parse`] for pre-filling a form.
    #[must_use]
    pub fn join(tags: &[String]) -> String {
        tags.join(",")
    }
}

#[cfg(test)]
mod tests {
    use crate::model::post::{Caption, InvalidCaptionError, InvalidLocationError, Location, Tags};

    #[test]
    fn caption_bounds() {
        assert_eq!(
            Caption::new("Hey".to_owned()),
            Err(InvalidCaptionError::TooShort)
        );
        assert_eq!(Caption::new("Hello".to_owned()).unwrap().get(), "Hello");
        assert!(Caption::new("x".repeat(2200)).is_ok());
        assert_eq!(
            Caption::new("x".repeat(2201)),
            Err(InvalidCaptionError::TooLong)
        );
    }

    #[test]
    fn location_bounds() {
        assert_eq!(
            Location::new(String::new()),
            Err(InvalidLocationError::Missing)
        );
        assert!(Location::new("Zürich".to_owned()).is_ok());
        assert_eq!(
            Location::new("x".repeat(1001)),
            Err(InvalidLocationError::TooLong)
        );
    }

    #[test]
    fn tags_split_on_commas() {
        assert_eq!(Tags::parse("a,b,c").get(), ["a", "b", "c"]);
        assert_eq!(
            Tags::parse(" Art, city life ,,Learn ").get(),
            ["Art", "citylife", "Learn"]
        );
        assert!(Tags::parse("").get().is_empty());
        assert!(Tags::parse(" , ").get().is_empty());
    }

    #[test]
    fn tags_join_for_prefill() {
        let tags = vec!["a".to_owned(), "b".to_owned()];
        assert_eq!(Tags::join(&tags), "a,b");
        assert_eq!(Tags::parse(&Tags::join(&tags)).into_inner(), tags);
    }
}
