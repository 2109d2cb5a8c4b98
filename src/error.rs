#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The provider signalled denial by redirecting without a `code` parameter.
    #[error("Access denied")]
    AccessDenied,

    #[error("No login attempt in progress")]
    NoActiveLogin,

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{}", format_provider(.status, .error, .description.as_deref()))]
    Provider {
        status: u16,
        error: String,
        description: Option<String>,
    },

    #[error("Empty response body (status {0})")]
    EmptyResponse(u16),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

fn format_provider(status: &u16, error: &str, description: Option<&str>) -> String {
    match description {
        Some(d) => format!("Provider error '{error}' (status {status}): {d}"),
        None => format!("Provider error '{error}' (status {status})"),
    }
}

impl LoginError {
    /// Error code string for structured output and programmatic branching.
    pub fn code(&self) -> &'static str {
        match self {
            LoginError::AccessDenied => "access_denied",
            LoginError::NoActiveLogin => "no_active_login",
            LoginError::Transport(_) => "transport_error",
            LoginError::Provider { .. } => "provider_error",
            LoginError::EmptyResponse(_) => "empty_response",
            LoginError::Decode(_) => "decode_error",
        }
    }

    /// The provider's machine-readable error string, if this is a provider error.
    pub fn provider_error(&self) -> Option<&str> {
        match self {
            LoginError::Provider { error, .. } => Some(error),
            _ => None,
        }
    }
}
