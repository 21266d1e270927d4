pub mod auth;
pub mod post;
pub mod user;

use crate::model::{
    auth::{InvalidEmailError, InvalidPasswordError},
    post::{InvalidCaptionError, InvalidLocationError},
};
use derive_where::derive_where;
use std::{fmt::Display, marker::PhantomData};
use thiserror::Error;

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum ModelValidationError {
    #[error(transparent)]
    Email(#[from] InvalidEmailError),
    #[error(transparent)]
    Password(#[from] InvalidPasswordError),
    #[error(transparent)]
    Caption(#[from] InvalidCaptionError),
    #[error(transparent)]
    Location(#[from] InvalidLocationError),
    #[error(transparent)]
    Id(#[from] EmptyIdError),
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The id was empty")]
pub struct EmptyIdError;

/// Identifier issued by the remote service.
///
/// The marker keeps ids of different record kinds apart; the remote service treats all of them
/// as opaque strings.
#[derive_where(
    Clone,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Debug,
    Default,
    Hash,
    Serialize,
    Deserialize
)]
#[serde(transparent)]
pub struct Id<Marker>(String, #[serde(skip)] PhantomData<Marker>);

impl<Marker> Id<Marker> {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into(), PhantomData)
    }

    /// Like [`Id::new`] but refuses an empty id, for ids coming off the wire.
    pub fn parse(id: String) -> Result<Self, EmptyIdError> {
        if id.is_empty() {
            Err(EmptyIdError)
        } else {
            Ok(Self::new(id))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<Marker> Display for Id<Marker> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<Marker> From<String> for Id<Marker> {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl<Marker> From<&str> for Id<Marker> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{EmptyIdError, Id, post::PostMarker, user::UserMarker};

    #[test]
    fn id_is_transparent_string() {
        let id = Id::<UserMarker>::new("64f1c0a2");
        assert_eq!(id.get(), "64f1c0a2");
        assert_eq!(id.to_string(), "64f1c0a2");

        let post_id: Id<PostMarker> = "abc".into();
        assert_eq!(post_id.into_inner(), "abc");
    }

    #[test]
    fn parse_refuses_empty_ids() {
        assert_eq!(Id::<PostMarker>::parse(String::new()), Err(EmptyIdError));
        assert_eq!(Id::<PostMarker>::parse("p1".to_owned()), Ok(Id::new("p1")));
    }
}
