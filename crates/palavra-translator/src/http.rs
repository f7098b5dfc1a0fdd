use reqwest::StatusCode;

use crate::TranslateError;

/// Error for a non-success HTTP status, if any
pub(crate) fn status_error(status: StatusCode) -> Option<TranslateError> {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Some(TranslateError::RateLimitExceeded),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Some(TranslateError::AuthenticationError)
        }
        s if !s.is_success() => Some(TranslateError::ApiError(format!("HTTP {s}"))),
        _ => None,
    }
}

pub(crate) async fn read_json(
    response: reqwest::Response,
) -> Result<serde_json::Value, TranslateError> {
    if let Some(err) = status_error(response.status()) {
        return Err(err);
    }

    response
        .json()
        .await
        .map_err(|e| TranslateError::ApiError(format!("Malformed response body: {e}")))
}
