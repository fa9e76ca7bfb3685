//! Rendering of single-record lookups, including the absent-record policy.

use crate::error::AppError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// How a GET of a missing id is answered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AbsentPolicy {
    /// 404 with an error body.
    #[default]
    NotFound,
    /// 200 with a `null` body, as older clients of this API expect.
    Null,
}

pub fn one_or_absent<T: Serialize>(
    row: Option<T>,
    policy: AbsentPolicy,
    what: impl FnOnce() -> String,
) -> Result<Response, AppError> {
    match (row, policy) {
        (Some(row), _) => Ok((StatusCode::OK, Json(row)).into_response()),
        (None, AbsentPolicy::Null) => Ok((StatusCode::OK, Json(serde_json::Value::Null)).into_response()),
        (None, AbsentPolicy::NotFound) => Err(AppError::NotFound(what())),
    }
}
