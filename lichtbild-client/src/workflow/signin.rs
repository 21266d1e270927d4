use crate::{
    backend::Backend,
    form::SigninForm,
    session::SessionContext,
    ui::{ACCOUNT_NOT_FOUND, Navigator, Notifier, Route, SIGN_IN_FAILED, Toast},
    workflow::WorkflowError,
};
use lichtbild_common::model::auth::Session;
use serde::{Deserialize, Deserializer, de::Error};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;
use tracing::debug;

/// What a sign-in does when the remote service reports no current session.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum UnknownAccountPolicy {
    /// Send the user to sign up without trying the credentials.
    #[default]
    SignUp,
    /// Try the credentials against the remote service.
    SignIn,
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("Unknown account policy {0:?}, expected \"sign-up\" or \"sign-in\"")]
pub struct UnknownAccountPolicyParseError(String);

impl FromStr for UnknownAccountPolicy {
    type Err = UnknownAccountPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sign-up" => Ok(Self::SignUp),
            "sign-in" => Ok(Self::SignIn),
            other => Err(UnknownAccountPolicyParseError(other.to_owned())),
        }
    }
}

impl Display for UnknownAccountPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SignUp => f.write_str("sign-up"),
            Self::SignIn => f.write_str("sign-in"),
        }
    }
}

impl<'de> Deserialize<'de> for UnknownAccountPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer)?
            .parse()
            .map_err(D::Error::custom)
    }
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub enum SignInOutcome {
    /// Field errors were stored on the form; nothing was sent.
    Invalid,
    AlreadySignedIn,
    AccountNotFound,
    SignedIn(Session),
    /// The remote service did not accept the credentials.
    Rejected,
}

pub async fn submit_sign_in<B, U>(
    form: &mut SigninForm,
    session: &mut SessionContext,
    backend: &B,
    policy: UnknownAccountPolicy,
    ui: &mut U,
) -> Result<SignInOutcome, WorkflowError>
where
    B: Backend + ?Sized,
    U: Navigator + Notifier,
{
    let Some(credentials) = form.validate() else {
        debug!("Sign-in form has invalid fields");
        return Ok(SignInOutcome::Invalid);
    };

    if session.check_auth_user(backend).await {
        form.reset();
        ui.navigate(Route::Home);
        return Ok(SignInOutcome::AlreadySignedIn);
    }

    match policy {
        UnknownAccountPolicy::SignUp => {
            debug!("No session, sending the user to sign up");
            ui.navigate(Route::SignUp);
            ui.toast(Toast::new(ACCOUNT_NOT_FOUND));
            Ok(SignInOutcome::AccountNotFound)
        }
        UnknownAccountPolicy::SignIn => {
            let Some(remote_session) = backend.sign_in(&credentials).await? else {
                ui.toast(Toast::new(SIGN_IN_FAILED));
                return Ok(SignInOutcome::Rejected);
            };

            session.check_auth_user(backend).await;
            form.reset();
            ui.navigate(Route::Home);
            Ok(SignInOutcome::SignedIn(remote_session))
        }
    }
}
