//! Sign-in confirmation: credential selection and redirect targets.
//!
//! A confirmation request carries either an OAuth authorization code or an
//! email one-time token. [`Credential::from_params`] decides which one is
//! used exactly once, at entry, and every outcome of the flow is expressed as
//! a [`RedirectTarget`].

use std::fmt;
use std::str::FromStr;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Destination when the request does not name one.
pub const DEFAULT_NEXT: &str = "/dashboard";
/// Setup flow for users who have not finished onboarding.
pub const ONBOARDING_PATH: &str = "/onboarding";
/// Error display page; the message travels in the `error` query parameter.
pub const AUTH_ERROR_PATH: &str = "/auth/error";

/// Message used when neither credential form is present.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "No token hash or type";
/// Message used when a session was issued but no user could be resolved.
pub const NO_USER_MESSAGE: &str = "No user found for session";

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

// ---------------------------------------------------------------------------
// One-time token purposes
// ---------------------------------------------------------------------------

/// Purpose of an email one-time token, as understood by the auth backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OtpType {
    Signup,
    Invite,
    Magiclink,
    Recovery,
    EmailChange,
    Email,
}

impl OtpType {
    pub fn as_str(self) -> &'static str {
        match self {
            OtpType::Signup => "signup",
            OtpType::Invite => "invite",
            OtpType::Magiclink => "magiclink",
            OtpType::Recovery => "recovery",
            OtpType::EmailChange => "email_change",
            OtpType::Email => "email",
        }
    }
}

impl fmt::Display for OtpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a `type` parameter names no known token purpose.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown one-time token type '{0}'")]
pub struct UnknownOtpType(pub String);

impl FromStr for OtpType {
    type Err = UnknownOtpType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(OtpType::Signup),
            "invite" => Ok(OtpType::Invite),
            "magiclink" => Ok(OtpType::Magiclink),
            "recovery" => Ok(OtpType::Recovery),
            "email_change" => Ok(OtpType::EmailChange),
            "email" => Ok(OtpType::Email),
            other => Err(UnknownOtpType(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Request parameters
// ---------------------------------------------------------------------------

/// Raw query parameters of a confirmation request.
///
/// Every field is optional so that any query string deserializes; the
/// meaning of the combination is decided by [`Credential::from_params`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfirmationParams {
    pub token_hash: Option<String>,
    #[serde(rename = "type")]
    pub otp_type: Option<String>,
    pub code: Option<String>,
    pub next: Option<String>,
}

impl ConfirmationParams {
    /// The sanitized post-login destination.
    pub fn next(&self) -> String {
        sanitize_next(self.next.as_deref())
    }
}

/// The credential a confirmation request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// OAuth / PKCE authorization code.
    AuthorizationCode(String),
    /// Hashed email one-time token and its purpose.
    OneTimeToken { token_hash: String, otp_type: OtpType },
    /// Neither form is usable.
    Missing,
}

impl Credential {
    /// Select the credential from raw parameters.
    ///
    /// `code` takes priority over `token_hash` + `type`. Empty values count
    /// as absent, and an unrecognized `type` makes the token form unusable.
    pub fn from_params(params: &ConfirmationParams) -> Self {
        if let Some(code) = non_empty(params.code.as_deref()) {
            return Credential::AuthorizationCode(code.to_string());
        }

        let token_hash = non_empty(params.token_hash.as_deref());
        let otp_type = non_empty(params.otp_type.as_deref()).and_then(|t| t.parse().ok());

        match (token_hash, otp_type) {
            (Some(token_hash), Some(otp_type)) => Credential::OneTimeToken {
                token_hash: token_hash.to_string(),
                otp_type,
            },
            _ => Credential::Missing,
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Credential::AuthorizationCode(_) => "authorization_code",
            Credential::OneTimeToken { .. } => "one_time_token",
            Credential::Missing => "missing",
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Resolve `next` to a path on this site.
///
/// Relative values resolve against the site root (`projects` becomes
/// `/projects`, `?tab=1` becomes `/?tab=1`). Values that would leave the
/// site fall back to [`DEFAULT_NEXT`]: URLs with a scheme, protocol-relative
/// `//host` and the `/\host` and `\\host` forms browsers treat the same way.
pub fn sanitize_next(next: Option<&str>) -> String {
    let Some(raw) = non_empty(next) else {
        return DEFAULT_NEXT.to_string();
    };
    if raw.chars().any(char::is_control) || has_scheme(raw) {
        return DEFAULT_NEXT.to_string();
    }

    let path = if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    };

    if path.starts_with("//") || path.starts_with("/\\") {
        return DEFAULT_NEXT.to_string();
    }
    path
}

/// `scheme:` prefix per RFC 3986: a letter, then letters, digits, `+`, `-`
/// or `.`, before any `/`, `?` or `#`.
fn has_scheme(value: &str) -> bool {
    let Some((scheme, _)) = value.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

// ---------------------------------------------------------------------------
// Redirect targets
// ---------------------------------------------------------------------------

/// Terminal outcome of a confirmation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedirectTarget {
    /// The caller's intended destination.
    Next(String),
    /// The onboarding flow, overriding `next`.
    Onboarding,
    /// The error page, carrying a human-readable message.
    Error(String),
}

impl RedirectTarget {
    pub fn error(message: impl Into<String>) -> Self {
        RedirectTarget::Error(message.into())
    }

    /// Path-only `Location` value, resolved by the browser against the
    /// request's own origin.
    pub fn location(&self) -> String {
        match self {
            RedirectTarget::Next(path) => path.clone(),
            RedirectTarget::Onboarding => ONBOARDING_PATH.to_string(),
            RedirectTarget::Error(message) => {
                format!("{AUTH_ERROR_PATH}?error={}", encode_uri_component(message))
            }
        }
    }

    /// Short label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            RedirectTarget::Next(_) => "next",
            RedirectTarget::Onboarding => "onboarding",
            RedirectTarget::Error(_) => "error",
        }
    }
}

/// Percent-encode a query component the way `encodeURIComponent` does
/// (spaces become `%20`).
pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
