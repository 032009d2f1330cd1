use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::AuthError;

/// How long an issued credential stays valid
pub const CREDENTIAL_TTL_DAYS: i64 = 7;

/// Claims carried by a credential: whatever the client asked to be signed,
/// plus issue and expiry times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iat: i64,
    pub exp: i64,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Claims {
    /// The asserted identity, if the signed payload had one
    pub fn email(&self) -> Option<&str> {
        self.payload.get("email").and_then(Value::as_str)
    }
}

/// HS256 signer/verifier bound to the server secret
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &str) -> Self {
        // Registered claims other than `exp` are ordinary payload here
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn issue(&self, payload: Map<String, Value>) -> Result<String, AuthError> {
        self.issue_at(payload, Utc::now())
    }

    /// Sign `payload` as if issued at `now`
    pub fn issue_at(
        &self,
        mut payload: Map<String, Value>,
        now: DateTime<Utc>,
    ) -> Result<String, AuthError> {
        // Timing claims are always server-controlled
        payload.remove("iat");
        payload.remove("exp");

        let claims = Claims {
            iat: now.timestamp(),
            exp: (now + Duration::days(CREDENTIAL_TTL_DAYS)).timestamp(),
            payload,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(AuthError::Signing)
    }

    /// Check signature and expiry, returning the decoded claims
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn issued_token_verifies_with_email() {
        let signer = TokenSigner::new("secret");
        let token = signer.issue(payload(json!({ "email": "ada@example.com" }))).unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.email(), Some("ada@example.com"));
        assert_eq!(claims.exp - claims.iat, CREDENTIAL_TTL_DAYS * 24 * 60 * 60);
    }

    #[test]
    fn payload_without_email_still_signs() {
        let signer = TokenSigner::new("secret");
        let token = signer.issue(payload(json!({ "name": "ada" }))).unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.email(), None);
        assert_eq!(claims.payload["name"], "ada");
    }

    #[test]
    fn client_cannot_choose_expiry() {
        let signer = TokenSigner::new("secret");
        let token = signer
            .issue(payload(json!({ "email": "ada@example.com", "exp": 1 })))
            .unwrap();
        assert!(signer.verify(&token).is_ok());
    }

    #[test]
    fn audience_in_payload_is_carried_not_enforced() {
        let signer = TokenSigner::new("secret");
        let token = signer
            .issue(payload(json!({ "email": "ada@example.com", "aud": "frontend" })))
            .unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.email(), Some("ada@example.com"));
        assert_eq!(claims.payload["aud"], "frontend");
    }

    #[test]
    fn expired_token_is_rejected() {
        let signer = TokenSigner::new("secret");
        let issued = Utc::now() - Duration::days(CREDENTIAL_TTL_DAYS + 1);
        let token = signer
            .issue_at(payload(json!({ "email": "ada@example.com" })), issued)
            .unwrap();

        assert!(matches!(signer.verify(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = TokenSigner::new("other")
            .issue(payload(json!({ "email": "ada@example.com" })))
            .unwrap();

        assert!(matches!(
            TokenSigner::new("secret").verify(&token),
            Err(AuthError::InvalidToken(_))
        ));
        assert!(TokenSigner::new("secret").verify("not-a-token").is_err());
    }
}
