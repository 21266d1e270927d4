//! Form state for the sign-in and post forms, with per-field validation.

use lichtbild_common::model::{
    Id,
    auth::{Credentials, Email, Password},
    post::{Caption, ImageAttachment, Location, NewPost, Post, Tags},
    user::UserMarker,
};
use serde::Deserialize;
use std::{collections::BTreeMap, fmt::Display};

/// Validation messages keyed by form field name.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn insert(&mut self, field: &'static str, message: &impl Display) {
        self.0.insert(field, message.to_string());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
pub struct SigninValues {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct SigninForm {
    pub values: SigninValues,
    pub errors: FieldErrors,
}

impl SigninForm {
    #[must_use]
    pub fn new(values: SigninValues) -> Self {
        Self {
            values,
            errors: FieldErrors::default(),
        }
    }

    /// Validates every field; errors replace the previous ones.
    pub fn validate(&mut self) -> Option<Credentials> {
        self.errors.clear();

        let email = Email::new(self.values.email.clone())
            .map_err(|err| self.errors.insert("email", &err))
            .ok();
        let password = Password::new(self.values.password.clone())
            .map_err(|err| self.errors.insert("password", &err))
            .ok();

        Some(Credentials {
            email: email?,
            password: password?,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Deserialize)]
pub struct PostValues {
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub location: String,
    /// Comma separated.
    #[serde(default)]
    pub tags: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct PostForm {
    pub values: PostValues,
    pub files: Vec<ImageAttachment>,
    pub errors: FieldErrors,
    /// Image of the post being edited, shown next to the file picker.
    pub media_url: Option<String>,
}

impl PostForm {
    #[must_use]
    pub fn new(values: PostValues, files: Vec<ImageAttachment>) -> Self {
        Self {
            values,
            files,
            ..Self::default()
        }
    }

    /// Defaults for editing an existing post.
    #[must_use]
    pub fn from_post(post: &Post) -> Self {
        Self {
            values: PostValues {
                caption: post.caption.clone(),
                location: post.location.clone(),
                tags: Tags::join(&post.tags),
            },
            media_url: post.image_url.clone(),
            ..Self::default()
        }
    }

    pub fn validate(&mut self, creator: &Id<UserMarker>) -> Option<NewPost> {
        self.errors.clear();

        let caption = Caption::new(self.values.caption.clone())
            .map_err(|err| self.errors.insert("caption", &err))
            .ok();
        let location = Location::new(self.values.location.clone())
            .map_err(|err| self.errors.insert("location", &err))
            .ok();

        Some(NewPost {
            creator: creator.clone(),
            caption: caption?,
            files: self.files.clone(),
            location: location?,
            tags: Tags::parse(&self.values.tags),
        })
    }
}
