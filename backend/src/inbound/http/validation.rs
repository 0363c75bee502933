//! Request-shape validation shared by the HTTP handlers.
//!
//! Extractor failures are rewritten into the common error payload so clients
//! never see Actix's plain-text defaults.

use actix_web::error::{JsonPayloadError, PathError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, RecipeId, UserId};

/// Validation error codes for malformed requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MalformedBody,
    InvalidId,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MalformedBody => "malformed_body",
            Self::InvalidId => "invalid_id",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn invalid_id_error(field: FieldName, value: i64) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a positive integer")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidId.as_str(),
    }))
}

pub(crate) fn parse_recipe_id(value: i64, field: FieldName) -> Result<RecipeId, Error> {
    RecipeId::new(value).map_err(|_| invalid_id_error(field, value))
}

pub(crate) fn parse_user_id(value: i64, field: FieldName) -> Result<UserId, Error> {
    UserId::new(value).map_err(|_| invalid_id_error(field, value))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON body");
    Error::invalid_request(format!("malformed request body: {err}"))
        .with_details(json!({ "code": ErrorCode::MalformedBody.as_str() }))
        .into()
}

/// A non-numeric id segment cannot name any resource.
fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected path parameters");
    Error::not_found("resource not found").into()
}

/// JSON extractor configuration answering with the common error payload.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Path extractor configuration answering with the common error payload.
#[must_use]
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
