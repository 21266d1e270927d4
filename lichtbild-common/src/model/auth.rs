use crate::model::{Id, user::UserMarker};
use serde::Serialize;
use std::fmt::{Debug, Formatter};
use thiserror::Error;

pub const PASSWORD_MIN_LEN: usize = 8;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Invalid email")]
pub struct InvalidEmailError(pub String);

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Password must be at least 8 characters.")]
pub struct InvalidPasswordError;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

#[derive(Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(transparent)]
pub struct Password(String);

#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct SessionMarker;

#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Session {
    pub id: Id<SessionMarker>,
    pub user_id: Id<UserMarker>,
}

impl Email {
    pub fn new(email: String) -> Result<Self, InvalidEmailError> {
        if is_email(&email) {
            Ok(Self(email))
        } else {
            Err(InvalidEmailError(email))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

fn is_email(email: &str) -> bool {
    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };

    !local.is_empty()
        && !local.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

impl Password {
    pub fn new(password: String) -> Result<Self, InvalidPasswordError> {
        if password.chars().count() >= PASSWORD_MIN_LEN {
            Ok(Self(password))
        } else {
            Err(InvalidPasswordError)
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Debug for Password {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Password").field(&"[redacted]").finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::model::auth::{Credentials, Email, InvalidPasswordError, Password};

    #[test]
    fn accepts_plain_addresses() {
        for email in ["jane@example.com", "a.b+c@mail.example.org", "x@y.io"] {
            assert!(Email::new(email.to_owned()).is_ok(), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "jane",
            "jane@",
            "@example.com",
            "jane@example",
            "jane@.com",
            "jane@example.",
            "jane@exa..mple.com",
            "ja ne@example.com",
            "jane@@example.com",
        ] {
            assert!(Email::new(email.to_owned()).is_err(), "{email:?}");
        }
    }

    #[test]
    fn password_length_is_counted_in_chars() {
        assert_eq!(Password::new("short".to_owned()), Err(InvalidPasswordError));
        assert!(Password::new("12345678".to_owned()).is_ok());
        assert!(Password::new("äöüäöüäö".to_owned()).is_ok());
        assert!(Password::new("äöüäöüä".to_owned()).is_err());
    }

    #[test]
    fn debug_redacts_password() {
        let credentials = Credentials {
            email: Email::new("jane@example.com".to_owned()).unwrap(),
            password: Password::new("hunter2hunter2".to_owned()).unwrap(),
        };

        let debug = format!("{credentials:?}");
        assert!(debug.contains("jane@example.com"));
        assert!(!debug.contains("hunter2"));
    }
}
