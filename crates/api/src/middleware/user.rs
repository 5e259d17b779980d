//! Shopper identity from the `userid` header.
//!
//! There is no login. The shell sends a client-generated id with every
//! request; handlers that need per-shopper state use [`RequireUser`], handlers
//! where identity is optional use [`OptionalUser`].

use axum::{
    extract::{FromRequestParts, Request},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use microshop_core::{UserId, UserIdError};
use tracing::Span;

use crate::error::AppError;

/// The HTTP header carrying the shopper id. Header names are case-insensitive.
pub const USER_ID_HEADER: &str = "userid";

/// Read the shopper id from request headers.
///
/// A missing, non-UTF-8 or blank header is `Ok(None)`.
///
/// # Errors
///
/// Returns `UserIdError` if the header is present but not a valid id.
pub fn user_from_headers(headers: &HeaderMap) -> Result<Option<UserId>, UserIdError> {
    let Some(raw) = headers.get(USER_ID_HEADER).and_then(|h| h.to_str().ok()) else {
        return Ok(None);
    };

    match UserId::parse(raw) {
        Ok(user) => Ok(Some(user)),
        Err(UserIdError::Empty) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Extractor that requires a shopper id.
///
/// Rejects with `401` when the header is absent and `400` when it is
/// malformed.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(RequireUser(user): RequireUser) -> impl IntoResponse {
///     format!("Hello, {user}!")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireUser(pub UserId);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match user_from_headers(&parts.headers) {
            Ok(Some(user)) => Ok(Self(user)),
            Ok(None) => Err(AppError::Unauthorized("User ID is required".to_string())),
            Err(e) => Err(AppError::BadRequest(format!("Invalid user ID: {e}"))),
        }
    }
}

/// Extractor that optionally gets the shopper id.
///
/// Unlike `RequireUser`, this never rejects. A malformed id is treated as
/// anonymous.
#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<UserId>);

impl<S> FromRequestParts<S> for OptionalUser
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(user_from_headers(&parts.headers).ok().flatten()))
    }
}

/// Middleware that adds the shopper id to the request span and Sentry scope.
pub async fn user_context_middleware(request: Request, next: Next) -> Response {
    if let Ok(Some(user)) = user_from_headers(request.headers()) {
        Span::current().record("user_id", user.as_str());

        sentry::configure_scope(|scope| {
            scope.set_user(Some(sentry::User {
                id: Some(user.to_string()),
                ..Default::default()
            }));
        });
    }

    next.run(request).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::response::IntoResponse;

    use super::*;

    fn parts(user: Option<&str>) -> Parts {
        let mut builder = HttpRequest::builder().uri("/api/cart");
        if let Some(user) = user {
            builder = builder.header("UserId", user);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_require_user_reads_header_case_insensitively() {
        let RequireUser(user) = RequireUser::from_request_parts(&mut parts(Some(" alice ")), &())
            .await
            .unwrap();
        assert_eq!(user.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_require_user_missing_is_unauthorized() {
        let rejection = RequireUser::from_request_parts(&mut parts(None), &())
            .await
            .unwrap_err();
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_user_blank_is_unauthorized() {
        let rejection = RequireUser::from_request_parts(&mut parts(Some("   ")), &())
            .await
            .unwrap_err();
        assert_eq!(rejection.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_user_too_long_is_bad_request() {
        let long = "x".repeat(UserId::MAX_LENGTH + 1);
        let rejection = RequireUser::from_request_parts(&mut parts(Some(&long)), &())
            .await
            .unwrap_err();
        assert_eq!(rejection.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_optional_user() {
        let OptionalUser(user) = OptionalUser::from_request_parts(&mut parts(Some("bob")), &())
            .await
            .unwrap();
        assert_eq!(user.unwrap().as_str(), "bob");

        let OptionalUser(user) = OptionalUser::from_request_parts(&mut parts(None), &())
            .await
            .unwrap();
        assert!(user.is_none());

        let long = "x".repeat(UserId::MAX_LENGTH + 1);
        let OptionalUser(user) = OptionalUser::from_request_parts(&mut parts(Some(&long)), &())
            .await
            .unwrap();
        assert!(user.is_none());
    }
}
