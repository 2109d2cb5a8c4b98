/// Configuration for one registered client of the identity provider.
///
/// Immutable once a login session starts; all three endpoints are derived
/// from `login_base_url`.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub client_id: String,
    pub redirect_uri: String,
    pub login_base_url: String,
}

impl ClientConfig {
    pub fn new(
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        login_base_url: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            login_base_url: login_base_url.into(),
        }
    }

    /// Authorization endpoint. The provider expects the trailing slash.
    pub fn authorize_endpoint(&self) -> String {
        format!("{}/authorize/", self.base())
    }

    /// Credential-prefill page used by the account-hint branch.
    pub fn login_endpoint(&self) -> String {
        format!("{}/login", self.base())
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/token", self.base())
    }

    fn base(&self) -> &str {
        self.login_base_url.trim_end_matches('/')
    }
}
