use anyhow::Result;
use axum::Json;
use validator::ValidationErrors;

use crate::errors::{AppError, internal_error};

/// Map a domain Result<T> into Json<T>; validation failures become 400.
pub fn to_json<T: serde::Serialize>(
    result: Result<T>
) -> Result<Json<T>, AppError> {
    match result {
        Ok(value) => Ok(Json(value)),
        Err(err) if err.is::<ValidationErrors>() => Err(AppError::BadRequest(err.to_string())),
        Err(err) => Err(internal_error(err)), // keeps the error message
    }
}
