//! OAuth2 Authorization Code + PKCE (RFC 7636) login core for native clients.
//!
//! The crate covers the protocol side of a login flow only: generating
//! verifier/challenge pairs, building the authorization URL, parsing the
//! redirect callback, and exchanging credentials for tokens. Presenting a
//! browser surface and persisting the resulting token are the host
//! application's job.

pub mod authorize;
pub mod config;
pub mod error;
pub mod pkce;
pub mod redirect;
pub mod session;
pub mod token;

pub use authorize::{build_authorization_url, AuthorizationRequest};
pub use config::ClientConfig;
pub use error::LoginError;
pub use pkce::{generate_code_challenge, generate_code_verifier, PkceContext};
pub use redirect::handle_redirect;
pub use session::{LoginCompletion, SessionCoordinator};
pub use token::{ApiError, ApiToken, TokenClient};
