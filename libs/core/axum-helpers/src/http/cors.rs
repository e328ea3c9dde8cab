use axum::http::{HeaderName, HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::extractors::SHARER_USER_ID_HEADER;

/// CORS layer for browser clients of the ShareIt API.
///
/// Allows the methods the API uses and the `X-Sharer-User-Id` header.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-sharer-user-id"),
        ])
        .max_age(Duration::from_secs(3600))
}

/// Reads comma-separated origins from `CORS_ALLOWED_ORIGIN`.
///
/// Returns `Ok(None)` when the variable is unset: the API is then only
/// reachable same-origin or server-to-server, which is how the gateway
/// talks to the server.
pub fn cors_layer_from_env() -> io::Result<Option<CorsLayer>> {
    let Ok(origins_str) = std::env::var("CORS_ALLOWED_ORIGIN") else {
        return Ok(None);
    };

    let allowed_origins: Vec<HeaderValue> = origins_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    tracing::info!(
        origins = %origins_str,
        header = SHARER_USER_ID_HEADER,
        "CORS enabled"
    );
    Ok(Some(create_cors_layer(allowed_origins)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_means_no_cors() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            assert!(cors_layer_from_env().unwrap().is_none());
        });
    }

    #[test]
    fn test_origins_are_parsed() {
        temp_env::with_var(
            "CORS_ALLOWED_ORIGIN",
            Some("http://localhost:3000, https://shareit.example"),
            || {
                assert!(cors_layer_from_env().unwrap().is_some());
            },
        );
    }

    #[test]
    fn test_blank_value_is_an_error() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            assert!(cors_layer_from_env().is_err());
        });
    }
}
