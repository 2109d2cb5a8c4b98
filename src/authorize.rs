use crate::config::ClientConfig;
use crate::pkce::PkceContext;

/// Read-only view of one authorization request, ready for display by the
/// host application's browser surface.
#[derive(Debug, Clone)]
pub struct AuthorizationRequest {
    pub url: String,
    pub account_hint: Option<String>,
}

/// Build the URL the browser surface should display.
///
/// Without an account hint this is the standard authorize URL carrying the
/// PKCE challenge. With a hint the provider instead expects its
/// credential-prefill page with a single `login` parameter; the two branches
/// are never merged (the provider does not accept the challenge parameters
/// on the prefill page).
pub fn build_authorization_url(
    config: &ClientConfig,
    context: &PkceContext,
    account_hint: Option<&str>,
) -> AuthorizationRequest {
    match account_hint {
        Some(email) => AuthorizationRequest {
            url: format!("{}?login={}", config.login_endpoint(), urlencoded(email)),
            account_hint: Some(email.to_string()),
        },
        None => AuthorizationRequest {
            url: format!(
                "{}?response_type=code&access_type=offline&client_id={}&redirect_uri={}&code_challenge_method={}&code_challenge={}",
                config.authorize_endpoint(),
                urlencoded(&config.client_id),
                urlencoded(&config.redirect_uri),
                context.code_challenge_method,
                urlencoded(&context.code_challenge),
            ),
            account_hint: None,
        },
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set, which
/// includes the sub-delimiters `:#[]@!$&'()*+,;=`.
pub(crate) fn urlencoded(s: &str) -> String {
    let mut result = String::with_capacity(s.len() * 2);
    for b in s.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                result.push(b as char);
            }
            _ => {
                result.push('%');
                result.push_str(&format!("{b:02X}"));
            }
        }
    }
    result
}
