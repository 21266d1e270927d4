//! Form submission workflows.
//!
//! Each workflow validates its form, talks to the remote service in sequential awaited steps and
//! reports navigation and notices to the UI it is given.

mod post;
mod signin;

pub use post::{PostOutcome, submit_post};
pub use signin::{
    SignInOutcome, UnknownAccountPolicy, UnknownAccountPolicyParseError, submit_sign_in,
};

use crate::backend::BackendError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Backend(#[from] BackendError),
}
