use crate::authorize::{build_authorization_url, AuthorizationRequest};
use crate::config::ClientConfig;
use crate::error::LoginError;
use crate::pkce::PkceContext;
use crate::redirect::handle_redirect;
use crate::token::TokenClient;

/// Outcome of a completed redirect: the authorization code plus the verifier
/// it was bound to. Redeeming the code is a separate, explicit call on
/// [`TokenClient`] so the caller decides when (and whether) to exchange.
#[derive(Debug, Clone)]
pub struct LoginCompletion {
    pub code: String,
    pub verifier: String,
}

/// Orchestrates one login flow at a time for a single client configuration.
///
/// Holds at most one outstanding [`PkceContext`]; starting a new attempt
/// silently invalidates the previous one. Hosts that need concurrent logins
/// create one coordinator per flow.
#[derive(Debug)]
pub struct SessionCoordinator {
    config: ClientConfig,
    context: Option<PkceContext>,
}

impl SessionCoordinator {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            context: None,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Swap in a new client configuration, abandoning any in-flight attempt.
    pub fn reconfigure(&mut self, config: ClientConfig) {
        self.config = config;
        self.context = None;
    }

    /// Begin a login attempt: generate a fresh verifier/challenge pair and
    /// return the URL for the browser surface to display.
    pub fn start_login(&mut self, account_hint: Option<&str>) -> AuthorizationRequest {
        let context = PkceContext::generate();
        let request = build_authorization_url(&self.config, &context, account_hint);
        if self.context.is_some() {
            tracing::debug!("replacing outstanding login attempt");
        }
        self.context = Some(context);
        request
    }

    /// Consume the intercepted redirect. Success yields the code paired with
    /// the current attempt's verifier; either way the attempt is over and
    /// its context is discarded.
    pub fn complete_login(&mut self, redirect_uri: &str) -> Result<LoginCompletion, LoginError> {
        let context = self.context.take().ok_or(LoginError::NoActiveLogin)?;
        let code = handle_redirect(redirect_uri)?;
        Ok(LoginCompletion {
            code,
            verifier: context.code_verifier,
        })
    }

    /// Client for the explicit token-exchange step.
    pub fn token_client(&self) -> TokenClient {
        TokenClient::new(&self.config)
    }
}
