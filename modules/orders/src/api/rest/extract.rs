//! Request extractors: acting user identity and validated JSON bodies.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{request::Parts, HeaderName},
    Json,
};
use modkit::{Problem, ProblemResponse, ValidationError};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::contract::model::ActingUser;

/// Header set by the upstream gateway after authenticating the caller.
pub const ACTING_USER_HEADER: HeaderName = HeaderName::from_static("x-user-id");

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = ProblemResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let instance = parts.uri.path();
        let raw = parts
            .headers
            .get(&ACTING_USER_HEADER)
            .ok_or_else(|| unauthorized("missing x-user-id header", instance))?;

        let id = raw
            .to_str()
            .ok()
            .and_then(|s| s.trim().parse::<i32>().ok())
            .ok_or_else(|| unauthorized("x-user-id must be an integer user id", instance))?;

        Ok(ActingUser { id })
    }
}

fn unauthorized(detail: &str, instance: &str) -> ProblemResponse {
    let mut resp = modkit::unauthorized(detail);
    resp.0 = resp.0.with_code("ORDERS_UNAUTHENTICATED").with_instance(instance);
    resp
}

/// JSON body that passed both deserialization and `Validate`.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = ProblemResponse;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let instance = req.uri().path().to_owned();

        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| json_rejection(rejection, &instance))?;

        value
            .validate()
            .map_err(|errors| validation_failed(&errors, &instance))?;

        Ok(Self(value))
    }
}

fn json_rejection(rejection: JsonRejection, instance: &str) -> ProblemResponse {
    let status = rejection.status();
    Problem::new(
        status,
        status.canonical_reason().unwrap_or("Bad Request"),
        rejection.body_text(),
    )
    .with_code("ORDERS_INVALID_BODY")
    .with_instance(instance)
    .into()
}

fn validation_failed(errors: &ValidationErrors, instance: &str) -> ProblemResponse {
    let mut details: Vec<ValidationError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| ValidationError {
                detail: e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
                pointer: format!("/{field}"),
            })
        })
        .collect();
    details.sort_by(|a, b| a.pointer.cmp(&b.pointer));

    let mut resp = modkit::unprocessable("Request body failed validation", details);
    resp.0 = resp.0.with_code("ORDERS_VALIDATION").with_instance(instance);
    resp
}
