use crate::server::ServerError;
use askama::Template;
use axum::response::{IntoResponse, Response};
use axum_extra::TypedHeader;
use headers::ContentType;

#[derive(Debug, Clone, Copy, Default)]
pub struct Html<T>(pub T);

impl<T: Template> IntoResponse for Html<T> {
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => (TypedHeader(ContentType::html()), html).into_response(),
            Err(err) => ServerError::Template(err).into_response(),
        }
    }
}
