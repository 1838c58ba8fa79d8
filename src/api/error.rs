use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Unauthorized - sign in again with a current token")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited - please wait before retrying")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Longest raw body slice carried into an error message
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Error envelope the API wraps its failure responses in
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

impl ApiError {
    /// Pull the human-readable message out of a failure body.
    ///
    /// The server answers errors as `{"detail": "..."}` JSON; anything
    /// else (a proxy page, an empty body) is carried raw, truncated on a
    /// character boundary.
    fn extract_detail(body: &str) -> String {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            return parsed.detail;
        }
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            return body.to_string();
        }
        let mut end = MAX_ERROR_BODY_LENGTH;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!(
            "{}... (truncated, {} total bytes)",
            &body[..end],
            body.len()
        )
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let detail = Self::extract_detail(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            403 => ApiError::AccessDenied(detail),
            404 => ApiError::NotFound(detail),
            429 => ApiError::RateLimited,
            500..=599 => ApiError::ServerError(detail),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, detail)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_maps_failure_codes() {
        assert!(matches!(
            ApiError::from_status(StatusCode::UNAUTHORIZED, ""),
            ApiError::Unauthorized
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::FORBIDDEN, "no"),
            ApiError::AccessDenied(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::NOT_FOUND, "missing"),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::TOO_MANY_REQUESTS, ""),
            ApiError::RateLimited
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::BAD_GATEWAY, ""),
            ApiError::ServerError(_)
        ));
        assert!(matches!(
            ApiError::from_status(StatusCode::IM_A_TEAPOT, ""),
            ApiError::InvalidResponse(_)
        ));
    }

    #[test]
    fn test_detail_field_is_extracted_from_json_bodies() {
        let err = ApiError::from_status(
            StatusCode::NOT_FOUND,
            r#"{"detail": "Public Water System not found"}"#,
        );
        match err {
            ApiError::NotFound(detail) => assert_eq!(detail, "Public Water System not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_non_json_bodies_are_carried_raw() {
        let err = ApiError::from_status(StatusCode::FORBIDDEN, "plain denial from a proxy");
        match err {
            ApiError::AccessDenied(detail) => assert_eq!(detail, "plain denial from a proxy"),
            other => panic!("expected AccessDenied, got {:?}", other),
        }
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(2000);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ApiError::ServerError(msg) => {
                assert!(msg.len() < body.len());
                assert!(msg.contains("truncated"));
                assert!(msg.contains("2000 total bytes"));
            }
            other => panic!("expected ServerError, got {:?}", other),
        }
    }

    #[test]
    fn test_multibyte_bodies_truncate_on_a_char_boundary() {
        // 3-byte characters put the truncation limit mid-character
        let body = "€".repeat(200);
        let err = ApiError::from_status(StatusCode::INTERNAL_SERVER_ERROR, &body);
        match err {
            ApiError::ServerError(msg) => {
                assert!(msg.starts_with(&"€".repeat(166)));
                assert!(msg.contains("600 total bytes"));
            }
            other => panic!("expected ServerError, got {:?}", other),
        }
    }
}
