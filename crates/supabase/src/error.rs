/// Errors from the hosted auth backend.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Auth API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Human-readable message extracted from the error body.
        message: String,
    },

    /// A code exchange was attempted without the PKCE verifier cookie,
    /// i.e. the link was opened outside the browser that started sign-in.
    #[error("Missing PKCE code verifier")]
    MissingCodeVerifier,
}

/// Shown instead of transport details, which name internal hosts.
pub const UNAVAILABLE_MESSAGE: &str = "Authentication service unavailable";

pub const MISSING_VERIFIER_MESSAGE: &str =
    "Sign-in link must be opened in the browser that requested it";

impl SupabaseError {
    /// The message shown to the user on the error page.
    ///
    /// Only backend-authored messages pass through; callers log the full
    /// error.
    pub fn message(&self) -> String {
        match self {
            SupabaseError::Request(_) => UNAVAILABLE_MESSAGE.to_string(),
            SupabaseError::Api { message, .. } => message.clone(),
            SupabaseError::MissingCodeVerifier => MISSING_VERIFIER_MESSAGE.to_string(),
        }
    }
}

/// Pull a readable message out of a GoTrue error body.
///
/// GoTrue is inconsistent across endpoints: OAuth-style errors use
/// `error_description`, newer endpoints use `msg`, some proxies use
/// `message`. Falls back to the raw body, then to the status text.
pub(crate) fn extract_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "msg", "message", "error"] {
            if let Some(message) = json.get(key).and_then(|v| v.as_str()) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Authentication failed")
        .to_string()
}
