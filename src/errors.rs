use thiserror::Error;

/// Every failure the client can run into at the HTTP or platform boundary.
/// All variants render to a message that is safe to show inline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    // ── Transport ────────────────────────────────────────────────────────────
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error! status: {status}")]
    Status { status: u16, body: String },

    // ── Response shape ───────────────────────────────────────────────────────
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Unexpected response format: {0}")]
    UnexpectedShape(String),

    // ── Browser capabilities ─────────────────────────────────────────────────
    #[error("{capability} access was denied")]
    PermissionDenied { capability: String },

    #[error("{capability} is not supported in this browser")]
    Unsupported { capability: String },

    #[error("{0}")]
    Platform(String),
}

impl ClientError {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        ClientError::Status { status, body: body.into() }
    }

    pub fn denied(capability: impl Into<String>) -> Self {
        ClientError::PermissionDenied { capability: capability.into() }
    }

    pub fn unsupported(capability: impl Into<String>) -> Self {
        ClientError::Unsupported { capability: capability.into() }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, ClientError::PermissionDenied { .. })
    }

    /// Server-provided body for non-2xx responses, when it carries any text.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            ClientError::Status { body, .. } if !body.trim().is_empty() => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn status_error_matches_fetch_wording() {
        let err = ClientError::status(502, "");
        assert_eq!(err.to_string(), "HTTP error! status: 502");
        assert_eq!(err.response_body(), None);
    }

    #[test]
    fn status_error_exposes_non_empty_body() {
        let err = ClientError::status(401, "Invalid credentials");
        assert_eq!(err.response_body(), Some("Invalid credentials"));
    }

    #[test]
    fn capability_predicates() {
        assert!(ClientError::denied("Microphone").is_permission_denied());
        assert!(!ClientError::unsupported("Clipboard").is_permission_denied());
        assert_eq!(
            ClientError::unsupported("Speech recognition").to_string(),
            "Speech recognition is not supported in this browser"
        );
    }
}
