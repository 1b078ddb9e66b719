use std::fmt;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppError {
    /// Client-side rejection; no request was made.
    Validation(String),
    Config(String),
    Network(String),
    Timeout(String),
    Http { status: u16, message: String },
    Parse(String),
    Serialization(String),
}

impl AppError {
    /// Message suitable for inline form alerts. Backend bodies are surfaced
    /// verbatim; transport problems keep their generic phrasing.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(message)
            | AppError::Config(message)
            | AppError::Http { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(message) => write!(formatter, "Validation error: {message}"),
            AppError::Config(message) => write!(formatter, "Config error: {message}"),
            AppError::Network(message) => write!(formatter, "Network error: {message}"),
            AppError::Timeout(message) => write!(formatter, "Timeout: {message}"),
            AppError::Http { status, message } => {
                write!(formatter, "Request failed ({status}): {message}")
            }
            AppError::Parse(message) => write!(formatter, "Response error: {message}"),
            AppError::Serialization(message) => {
                write!(formatter, "Request error: {message}")
            }
        }
    }
}

impl std::error::Error for AppError {}

/// Builds an `Http` error from a non-success response, preferring the
/// backend's own `error`/`message` JSON field so it can be shown verbatim.
pub fn backend_error(status: u16, body: String) -> AppError {
    let message = extract_message(&body).unwrap_or_else(|| sanitize_body(body));
    AppError::Http { status, message }
}

/// Maps transport failures into user-facing variants with timeout detection.
pub fn transport_error(message: String) -> AppError {
    let lowered = message.to_lowercase();
    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        AppError::Network(format!("Unable to reach the server: {message}"))
    }
}

/// Pulls a string `error` or `message` field out of a JSON error body.
fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body.trim()).ok()?;
    let object = value.as_object()?;
    object
        .get("error")
        .or_else(|| object.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

/// Trims and truncates raw error bodies for user-facing messages.
fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, backend_error, transport_error};

    #[test]
    fn user_message_surfaces_backend_body_verbatim() {
        let err = AppError::Http {
            status: 410,
            message: "expired".to_string(),
        };
        assert_eq!(err.user_message(), "expired");
    }

    #[test]
    fn user_message_keeps_validation_text_bare() {
        let err = AppError::Validation("Passwords do not match.".to_string());
        assert_eq!(err.user_message(), "Passwords do not match.");
    }

    #[test]
    fn user_message_keeps_transport_prefix() {
        let err = AppError::Network("Unable to reach the server.".to_string());
        assert_eq!(
            err.user_message(),
            "Network error: Unable to reach the server."
        );
    }

    #[test]
    fn backend_error_extracts_json_error_field() {
        let err = backend_error(410, r#"{"error":"expired"}"#.to_string());
        assert_eq!(
            err,
            AppError::Http {
                status: 410,
                message: "expired".to_string(),
            }
        );
    }

    #[test]
    fn backend_error_falls_back_to_message_field() {
        let err = backend_error(400, r#"{"message":"Setup already completed"}"#.to_string());
        assert_eq!(err.user_message(), "Setup already completed");
    }

    #[test]
    fn backend_error_keeps_plain_bodies_trimmed() {
        let err = backend_error(500, "  something broke  ".to_string());
        assert_eq!(err.user_message(), "something broke");
    }

    #[test]
    fn backend_error_truncates_long_bodies() {
        let err = backend_error(500, "x".repeat(1000));
        assert_eq!(err.user_message().chars().count(), 200);
    }

    #[test]
    fn backend_error_fallback_for_empty_bodies() {
        let err = backend_error(502, String::new());
        assert_eq!(err.user_message(), "Request failed.");
    }

    #[test]
    fn transport_error_detects_timeouts() {
        assert!(matches!(
            transport_error("signal aborted".to_string()),
            AppError::Timeout(_)
        ));
        assert!(matches!(
            transport_error("connection refused".to_string()),
            AppError::Network(_)
        ));
    }
}
