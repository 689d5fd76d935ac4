//! Stateless signed session tokens.
//!
//! A token is `<claim>.<base64url(hmac-sha256(claim, secret))>`. Nothing is
//! stored server-side; possession of a validly signed token is the whole
//! session. Expiry is enforced by the cookie's `Max-Age` only, so `verify`
//! is a pure signature check.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

pub const AUTH_COOKIE: &str = "auth";
/// The single claim this system ever asserts.
pub const AUTH_CLAIM: &str = "true";
pub const SESSION_TTL: time::Duration = time::Duration::days(30);

type HmacSha256 = Hmac<Sha256>;

pub fn issue(claim: &str, secret: &str) -> String {
    format!("{claim}.{}", sign(claim, secret))
}

/// Returns the embedded claim when the token carries a valid signature,
/// `None` for absent separators, undecodable signatures, or a MAC mismatch.
pub fn verify(token: &str, secret: &str) -> Option<String> {
    let (claim, sig_b64) = token.rsplit_once('.')?;
    let sig = URL_SAFE_NO_PAD.decode(sig_b64).ok()?;
    let mut mac = mac_for(secret);
    mac.update(claim.as_bytes());
    mac.verify_slice(&sig).ok()?;
    Some(claim.to_string())
}

fn sign(claim: &str, secret: &str) -> String {
    let mut mac = mac_for(secret);
    mac.update(claim.as_bytes());
    URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
}

fn mac_for(secret: &str) -> HmacSha256 {
    // new_from_slice accepts keys of any length
    HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length")
}
