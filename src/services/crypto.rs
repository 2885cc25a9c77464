use chrono::Utc;
use openssl::hash::MessageDigest;
use openssl::pkey::PKey;
use openssl::sign::Signer;
use serde_json::Value;
use subtle::ConstantTimeEq;
use thiserror::Error;

pub const APP_TOKEN_HEADER: &str = "X-App-Token";
pub const SIGNATURE_HEADER: &str = "X-App-Access-Sig";
pub const TIMESTAMP_HEADER: &str = "X-App-Access-Ts";

#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("OpenSSL error: {0}")]
    OpenSsl(#[from] openssl::error::ErrorStack),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Authentication headers for one request. Derived deterministically from the
/// request tuple and the credential pair; recomputed fresh for every call and
/// never reused.
#[derive(Debug, Clone)]
pub struct AuthHeaders {
    pub app_token: String,
    pub signature: String,
    pub timestamp: String,
}

/// Signs requests following Sumsub's shared-secret HMAC scheme.
pub struct SigningService {
    secret: String,
    app_token: String,
}

impl SigningService {
    pub fn new(secret: impl Into<String>, app_token: impl Into<String>) -> Self {
        SigningService {
            secret: secret.into(),
            app_token: app_token.into(),
        }
    }

    /// Sign a request at the current Unix timestamp. `path` is the
    /// server-relative request path including any query string.
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<AuthHeaders, CryptoError> {
        let timestamp = Utc::now().timestamp().to_string();
        let signature = self.sign_at(method, path, &timestamp, body)?;

        Ok(AuthHeaders {
            app_token: self.app_token.clone(),
            signature,
            timestamp,
        })
    }

    /// Compute the hex signature for an explicit timestamp.
    pub fn sign_at(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        body: Option<&Value>,
    ) -> Result<String, CryptoError> {
        let message = canonical_message(method, path, timestamp, body)?;

        let key = PKey::hmac(self.secret.as_bytes())?;
        let mut signer = Signer::new(MessageDigest::sha256(), &key)?;
        let digest = signer.sign_oneshot_to_vec(message.as_bytes())?;

        let signature = digest
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<String>>()
            .join("");

        Ok(signature)
    }

    /// Recompute the signature for the given tuple and compare it against
    /// `signature` in constant time.
    pub fn verify(
        &self,
        method: &str,
        path: &str,
        timestamp: &str,
        body: Option<&Value>,
        signature: &str,
    ) -> Result<bool, CryptoError> {
        let expected = self.sign_at(method, path, timestamp, body)?;
        Ok(expected.as_bytes().ct_eq(signature.as_bytes()).unwrap_u8() == 1)
    }
}

// The message the server recomputes on its side: uppercased method, path,
// timestamp and body joined with newlines. An absent body serializes as the
// literal `null`.
fn canonical_message(
    method: &str,
    path: &str,
    timestamp: &str,
    body: Option<&Value>,
) -> Result<String, CryptoError> {
    let body_json = serde_json::to_string(&body)?;
    Ok(format!(
        "{}\n{}\n{}\n{}",
        method.to_uppercase(),
        path,
        timestamp,
        body_json
    ))
}
