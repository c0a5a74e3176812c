use crate::ForumsError;
use crate::guard::REQUEST_FAILED_MESSAGE;
use crate::views::Navigation;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;
use tracing::{debug, error};

impl IntoResponse for ForumsError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound { message, .. } => {
                debug!(%message, "Not found");
                StatusCode::NOT_FOUND.into_response()
            },
            Self::Unauthorized { message, .. } => {
                (StatusCode::UNAUTHORIZED, message.into_owned()).into_response()
            },
            Self::InvalidState { message, .. } => {
                (StatusCode::BAD_REQUEST, message.into_owned()).into_response()
            },
            Self::Validation { errors, .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(errors)).into_response()
            },
            err @ (Self::Data { .. } | Self::Config { .. } | Self::Internal { .. }) => {
                error!(error = ?err, "Forums request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, REQUEST_FAILED_MESSAGE).into_response()
            },
        }
    }
}

impl<T: Serialize> IntoResponse for Navigation<T> {
    fn into_response(self) -> Response {
        match self {
            Self::Render(view) => Json(view).into_response(),
            Self::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}
