//! Navigation and notification surfaces the workflows report to.

use lichtbild_common::model::{Id, post::PostMarker, user::UserMarker};
use std::fmt::{Display, Formatter};

pub const ACCOUNT_NOT_FOUND: &str = "I can't find your account. Please sign up.";
pub const SIGN_IN_FAILED: &str = "Something went wrong. Please log in to your new account";
pub const POST_FAILED: &str = "Please try again";
pub const PLACEHOLDER_AVATAR: &str = "/assets/icons/profile-placeholder.svg";

#[derive(Clone, Eq, PartialEq, Debug, Hash)]
pub enum Route {
    Home,
    SignUp,
    SignIn,
    CreatePost,
    Profile(Id<UserMarker>),
    UpdatePost(Id<PostMarker>),
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::SignUp => f.write_str("/sign-up"),
            Route::SignIn => f.write_str("/sign-in"),
            Route::CreatePost => f.write_str("/create-post"),
            Route::Profile(id) => write!(f, "/profile/{id}"),
            Route::UpdatePost(id) => write!(f, "/update-post/{id}"),
        }
    }
}

/// A short user-visible message, shown once.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
pub struct Toast {
    pub title: String,
}

impl Toast {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

pub trait Navigator {
    fn navigate(&mut self, route: Route);
}

pub trait Notifier {
    fn toast(&mut self, toast: Toast);
}

/// Records what a workflow asked the UI to do.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Effects {
    pub navigation: Option<Route>,
    pub toasts: Vec<Toast>,
}

impl Navigator for Effects {
    fn navigate(&mut self, route: Route) {
        self.navigation = Some(route);
    }
}

impl Notifier for Effects {
    fn toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }
}
