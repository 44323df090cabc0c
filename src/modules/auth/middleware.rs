use crate::modules::restaurant::{self, repository::Restaurant};
use crate::types::Context;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum::{extract::Extension, http, http::request::Parts, response::Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, PartialEq)]
enum Error {
    InvalidToken,
}

fn get_token_from_header(header: &str) -> Result<String, Error> {
    let mut parts = header.split(' ');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None)
            if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() =>
        {
            Ok(token.to_string())
        }
        _ => Err(Error::InvalidToken),
    }
}

fn get_token_from_request(headers: &HeaderMap) -> Result<String, Error> {
    headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(Error::InvalidToken)
        .and_then(get_token_from_header)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Invalid dashboard token" })),
    )
        .into_response()
}

async fn get_restaurant_from_token(ctx: Arc<Context>, token: String) -> Result<Restaurant, Response> {
    restaurant::repository::find_by_panel_token(&ctx.db_conn.pool, token)
        .await
        .map_err(|_| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to verify dashboard token" })),
            )
                .into_response()
        })?
        .ok_or_else(unauthorized)
}

/// Staff of one restaurant, identified by the restaurant's dashboard token.
#[derive(Serialize, Clone)]
pub struct StaffAuth {
    pub restaurant: Restaurant,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for StaffAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| err.into_response())?;
        let headers = parts
            .extract::<HeaderMap>()
            .await
            .map_err(|err| err.into_response())?;

        let token = get_token_from_request(&headers).map_err(|_| unauthorized())?;

        get_restaurant_from_token(ctx, token)
            .await
            .map(|restaurant| Self { restaurant })
    }
}

/// Operator of the global dashboard, authorized by `ADMIN_TOKEN`.
#[derive(Serialize, Clone)]
pub struct AdminAuth;

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts
            .extract::<Extension<Arc<Context>>>()
            .await
            .map_err(|err| err.into_response())?;
        let headers = parts
            .extract::<HeaderMap>()
            .await
            .map_err(|err| err.into_response())?;

        let expected = match ctx.app.admin_token.as_deref() {
            Some(expected) => expected,
            None => {
                return Err(
                    (StatusCode::FORBIDDEN, Json(json!({ "error": "Forbidden" }))).into_response(),
                )
            }
        };

        match get_token_from_request(&headers) {
            Ok(token) if token == expected => Ok(Self),
            _ => Err((
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Unauthorized" })),
            )
                .into_response()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_bearer_token() {
        assert_eq!(get_token_from_header("Bearer abc123"), Ok("abc123".to_string()));
        assert_eq!(get_token_from_header("bearer abc123"), Ok("abc123".to_string()));
    }

    #[test]
    fn rejects_malformed_headers() {
        assert_eq!(get_token_from_header("abc123"), Err(Error::InvalidToken));
        assert_eq!(get_token_from_header("Basic abc123"), Err(Error::InvalidToken));
        assert_eq!(get_token_from_header("Bearer "), Err(Error::InvalidToken));
        assert_eq!(get_token_from_header("Bearer a b"), Err(Error::InvalidToken));
    }

    #[test]
    fn missing_header_is_invalid() {
        assert_eq!(get_token_from_request(&HeaderMap::new()), Err(Error::InvalidToken));
    }
}
