//! Response Envelope
//!
//! Uniform success/failure shape returned by every controller operation, so a
//! caller inspects one structure regardless of outcome.

use serde::{Deserialize, Serialize};

use crate::error::{app_error::AppError, kind::ErrorKind};

/// Fallback status for failures that carry no usable status
pub const DEFAULT_ERROR_STATUS: u16 = 500;

/// Success or failure wrapper
///
/// `T` is the payload type, `M` optional metadata attached to a success.
///
/// ## Examples
/// ```rust
/// use kernel::envelope::Envelope;
///
/// let ok: Envelope<u32> = Envelope::success(200, 7);
/// assert!(ok.success);
///
/// let err: Envelope<u32> = Envelope::error(401, "");
/// assert_eq!(err.message.as_deref(), Some("Unauthorized"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T, M = ()> {
    pub status_code: u16,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<M>,
}

impl<T, M> Envelope<T, M> {
    pub fn success(status_code: u16, data: T) -> Self {
        Self {
            status_code,
            success: true,
            data: Some(data),
            message: None,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: M) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Failure envelope
    ///
    /// A status outside `400..=599` is replaced by [`DEFAULT_ERROR_STATUS`];
    /// an empty message is replaced by the status' reason phrase.
    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        let status_code = if (400..=599).contains(&status_code) {
            status_code
        } else {
            DEFAULT_ERROR_STATUS
        };

        let mut message = message.into();
        if message.trim().is_empty() {
            message = reason_phrase(status_code).to_string();
        }

        Self {
            status_code,
            success: false,
            data: None,
            message: Some(message),
            metadata: None,
        }
    }

    pub fn from_error(err: &AppError) -> Self {
        Self::error(err.status_code(), err.message())
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl<T, M> From<AppError> for Envelope<T, M> {
    fn from(err: AppError) -> Self {
        Self::from_error(&err)
    }
}

fn reason_phrase(status_code: u16) -> &'static str {
    match ErrorKind::from_status_code(status_code) {
        Some(kind) => kind.as_str(),
        None if status_code >= 500 => ErrorKind::InternalServerError.as_str(),
        None => "Request failed",
    }
}
