//! Failure taxonomy for reporting backend calls.

use reportal_ui_types::ErrorDetail;
use thiserror::Error;

/// Fallback shown when the backend rejected the request without a usable
/// `userMessage`.
pub const GENERATE_FALLBACK_MESSAGE: &str = "レポート生成に失敗しました";

/// Fallback shown for transport failures and undecodable responses.
pub const GENERIC_FALLBACK_MESSAGE: &str = "エラーが発生しました";

/// Failures surfaced by a reporting backend call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or protocol failure before a response body was read.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// Non-success status with a well-formed error envelope.
    #[error("backend error ({status}): {code:?}", code = .detail.code)]
    Backend { status: u16, detail: ErrorDetail },
    /// Non-success status without a parseable error envelope.
    #[error("backend returned status {0}")]
    Status(u16),
    /// Success status but the body did not decode as a report response.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl ClientError {
    /// The string shown to the user in the transcript.
    ///
    /// The backend's `userMessage` is surfaced verbatim when present; every
    /// other failure collapses to a generic localized fallback.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Backend { detail, .. } if !detail.user_message.is_empty() => {
                detail.user_message.clone()
            }
            ClientError::Backend { .. } | ClientError::Status(_) => {
                GENERATE_FALLBACK_MESSAGE.to_string()
            }
            ClientError::Transport(_) | ClientError::MalformedResponse(_) => {
                GENERIC_FALLBACK_MESSAGE.to_string()
            }
        }
    }
}
