use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sha2::{Digest, Sha256};

/// The only challenge method supported; plain-text PKCE is not.
pub const CODE_CHALLENGE_METHOD: &str = "S256";

/// Verifier/challenge pair for one login attempt (RFC 7636 §4.1/§4.2).
///
/// Generated fresh for every attempt and never reused across attempts.
#[derive(Debug, Clone)]
pub struct PkceContext {
    pub code_verifier: String,
    pub code_challenge: String,
    pub code_challenge_method: &'static str,
}

impl PkceContext {
    pub fn generate() -> Self {
        let code_verifier = generate_code_verifier();
        let code_challenge = generate_code_challenge(&code_verifier);
        Self {
            code_verifier,
            code_challenge,
            code_challenge_method: CODE_CHALLENGE_METHOD,
        }
    }
}

/// Draw 32 bytes from the OS CSPRNG, base64url-encoded without padding.
///
/// RNG failure is a process-level fault; the RNG layer aborts rather than
/// returning weak output, so no `Result` in the signature.
pub fn generate_code_verifier() -> String {
    let mut buf = [0u8; 32];
    rand::Rng::fill_bytes(&mut rand::rng(), &mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

/// SHA-256 of the UTF-8 verifier bytes, base64url-encoded without padding.
pub fn generate_code_challenge(verifier: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hasher.finalize())
}
