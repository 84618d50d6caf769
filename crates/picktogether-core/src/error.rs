//! Client Error Taxonomy
//!
//! Every failure the storefront can surface to the user.

use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

/// Errors are converted to view state at the call site, so they must be
/// cheap to clone and compare.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("no saved location")]
    MissingLocation,

    #[error("malformed saved location: {0}")]
    MalformedLocation(String),

    #[error("HTTP {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Network(String),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error("service error: {0}")]
    Service(String),

    #[error("login required")]
    AuthRequired,

    #[error("storage error: {0}")]
    Storage(String),
}

impl ClientError {
    /// Map a non-success HTTP status.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => ClientError::AuthRequired,
            other => ClientError::Status(other),
        }
    }

    /// Text shown inline (or in an alert for `AuthRequired`).
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::MissingLocation => "위치 정보가 없습니다.",
            ClientError::MalformedLocation(_) => "좌표 형식이 잘못되었습니다.",
            ClientError::Status(_) | ClientError::Network(_) | ClientError::Decode(_) => {
                "목록을 불러오지 못했습니다."
            }
            ClientError::Service(_) => "서버와 연결할 수 없습니다.",
            ClientError::AuthRequired => "로그인이 필요합니다.",
            ClientError::Storage(_) => "브라우저 저장소를 사용할 수 없습니다.",
        }
    }

    /// Whether the error should block the view with a login prompt.
    pub fn needs_login(&self) -> bool {
        matches!(self, ClientError::AuthRequired)
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_statuses_map_to_login() {
        assert_eq!(ClientError::from_status(403), ClientError::AuthRequired);
        assert_eq!(ClientError::from_status(401), ClientError::AuthRequired);
        assert_eq!(ClientError::from_status(500), ClientError::Status(500));
        assert!(ClientError::from_status(403).needs_login());
    }

    #[test]
    fn test_location_errors_share_message() {
        let malformed = ClientError::MalformedLocation("lat".into());
        assert_eq!(malformed.user_message(), "좌표 형식이 잘못되었습니다.");
        assert_eq!(ClientError::MissingLocation.user_message(), "위치 정보가 없습니다.");
    }
}
