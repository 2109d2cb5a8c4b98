use crate::error::LoginError;

/// Extract the authorization code from an intercepted redirect URI.
///
/// The provider signals failure by omitting the `code` parameter rather than
/// returning a structured error on the redirect, so a missing (or empty)
/// code maps to [`LoginError::AccessDenied`]. Pure function; dismissing any
/// presented browser surface is the caller's job.
pub fn handle_redirect(uri: &str) -> Result<String, LoginError> {
    let query = uri
        .split('?')
        .nth(1)
        .and_then(|rest| rest.split('#').next())
        .unwrap_or("");

    for param in query.split('&') {
        if let Some(value) = param.strip_prefix("code=") {
            let decoded = urldecode(value);
            if !decoded.is_empty() {
                return Ok(decoded);
            }
        }
    }
    Err(LoginError::AccessDenied)
}

fn urldecode(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.bytes();
    while let Some(b) = chars.next() {
        if b == b'%' {
            let hi = chars.next();
            let lo = chars.next();
            if let (Some(h), Some(l)) = (hi, lo) {
                let hex = [h, l];
                if let Ok(s) = std::str::from_utf8(&hex) {
                    if let Ok(val) = u8::from_str_radix(s, 16) {
                        result.push(val as char);
                        continue;
                    }
                }
            }
            result.push('%');
        } else if b == b'+' {
            result.push(' ');
        } else {
            result.push(b as char);
        }
    }
    result
}
