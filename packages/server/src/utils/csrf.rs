use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Form token claims.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub purpose: String, // Always "form"
    pub exp: usize,      // Expiration timestamp
}

const PURPOSE: &str = "form";

/// Signs and checks anti-forgery tokens embedded in every form.
#[derive(Clone)]
pub struct CsrfGuard {
    secret: Vec<u8>,
    ttl: Duration,
}

impl CsrfGuard {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl: Duration::seconds(ttl_secs as i64),
        }
    }

    /// Sign a new token.
    pub fn issue(&self) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::Internal("Token expiry out of range".into()))?
            .timestamp();

        let claims = Claims {
            purpose: PURPOSE.to_owned(),
            exp: expiration as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign form token: {e}")))
    }

    /// Verify a submitted token.
    pub fn verify(&self, token: Option<&str>) -> Result<(), AppError> {
        let token = token.filter(|t| !t.is_empty()).ok_or(AppError::Forbidden)?;
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &Validation::default(),
        )
        .map_err(|_| AppError::Forbidden)?;

        if data.claims.purpose != PURPOSE {
            return Err(AppError::Forbidden);
        }
        Ok(())
    }
}

/// Issue a token when protection is on.
pub fn issue(guard: Option<&CsrfGuard>) -> Result<Option<String>, AppError> {
    guard.map(CsrfGuard::issue).transpose()
}

/// Verify a token when protection is on; always passes otherwise.
pub fn verify(guard: Option<&CsrfGuard>, token: Option<&str>) -> Result<(), AppError> {
    match guard {
        Some(guard) => guard.verify(token),
        None => Ok(()),
    }
}
