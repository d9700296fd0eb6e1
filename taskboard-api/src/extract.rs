/// Request extractors
///
/// Wrappers around axum's `Json` and `Path` whose rejections are `ApiError`,
/// so malformed input still gets the JSON envelope instead of axum's plain
/// text bodies.
///
/// - `ApiPath<T>`: path parameters
/// - `ValidatedJson<T>`: JSON body whose required fields must be present
/// - `JsonOrDefault<T>`: JSON body, or `T::default()` when none was sent

use crate::error::ApiError;
use axum::{
    async_trait,
    body::Bytes,
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Request},
    http::{header, HeaderMap},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Path extractor that rejects with `ApiError`
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// A request body with fields that must be present and non-empty
///
/// The `Validate` impl encodes which fields are required; any failure is
/// reported to the client as the single `MISSING_FIELDS` message.
pub trait RequiredFields: Validate {
    /// Message returned with 400 when a required field is absent
    const MISSING_FIELDS: &'static str;
}

/// JSON body extractor that also runs presence validation
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + RequiredFields,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let value = match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => value,
            // A field of the wrong type is no more usable than an absent one
            Err(JsonRejection::JsonDataError(rejection)) => {
                tracing::debug!(error = %rejection, "Request body has mistyped fields");
                return Err(ApiError::BadRequest(T::MISSING_FIELDS.to_string()));
            }
            Err(rejection) => return Err(rejection.into()),
        };

        value.validate().map_err(|errors| {
            tracing::debug!(%errors, "Required fields missing");
            ApiError::BadRequest(T::MISSING_FIELDS.to_string())
        })?;

        Ok(ValidatedJson(value))
    }
}

/// JSON body extractor for full-replace updates
///
/// A request without a JSON content type, or with an empty body, yields
/// `T::default()` so the handler still looks the target up first. A JSON
/// body that doesn't parse is rejected with 400.
#[derive(Debug)]
pub struct JsonOrDefault<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonOrDefault<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Ok(JsonOrDefault(T::default()));
        }

        let body = Bytes::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection, "Failed to read request body");
            ApiError::BadRequest("Invalid request body".to_string())
        })?;

        if body.iter().all(|byte| byte.is_ascii_whitespace()) {
            return Ok(JsonOrDefault(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&body)?;
        Ok(JsonOrDefault(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Method};
    use serde::Deserialize;

    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Changes {
        name: Option<String>,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = axum::http::Request::builder()
            .method(Method::PUT)
            .uri("/api/users/1");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn extract(req: Request) -> Result<Changes, ApiError> {
        JsonOrDefault::<Changes>::from_request(req, &())
            .await
            .map(|JsonOrDefault(changes)| changes)
    }

    #[tokio::test]
    async fn test_missing_body_defaults() {
        assert_eq!(extract(request(None, "")).await.unwrap(), Changes::default());
        assert_eq!(
            extract(request(Some("application/json"), "")).await.unwrap(),
            Changes::default()
        );
    }

    #[tokio::test]
    async fn test_non_json_content_type_defaults() {
        let changes = extract(request(Some("text/plain"), "name=Ana")).await.unwrap();
        assert_eq!(changes, Changes::default());
    }

    #[tokio::test]
    async fn test_json_body_is_parsed() {
        let changes = extract(request(
            Some("application/json; charset=utf-8"),
            r#"{"name":"Ana"}"#,
        ))
        .await
        .unwrap();
        assert_eq!(changes.name.as_deref(), Some("Ana"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let err = extract(request(Some("application/json"), "{\"name\":"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
