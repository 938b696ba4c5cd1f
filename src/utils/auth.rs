use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::controllers::user::UserController;
use crate::core::config::AuthConfig;
use crate::core::error::{Error, TokenError};
use crate::credential::store::CredentialStore;

/// Claims carried in an access token. The payload is readable by anyone
/// holding the token, so it names the subject and nothing else.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub(crate) struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) sub: Option<String>,
    pub(crate) iat: i64,
    pub(crate) exp: i64,
}

impl Claims {
    pub(crate) fn subject(&self) -> Option<i32> {
        self.sub.as_deref()?.parse().ok()
    }
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub(crate) struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("ttl", &self.ttl)
            .field("leeway", &self.validation.leeway)
            .finish_non_exhaustive()
    }
}

impl TokenCodec {
    pub(crate) fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_seconds;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: config.token_ttl,
        }
    }

    /// The lifetime given to tokens minted at login.
    pub(crate) fn ttl(&self) -> Duration {
        self.ttl
    }

    pub(crate) fn issue(&self, subject: i32, ttl: Duration) -> Result<String, Error> {
        self.issue_at(subject, Utc::now(), ttl)
    }

    pub(crate) fn issue_at(
        &self,
        subject: i32,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, Error> {
        let expires_at = issued_at
            .checked_add_signed(ttl)
            .ok_or(Error::TokenExpiry)?;

        let claims = Claims {
            sub: Some(subject.to_string()),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        Ok(jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    pub(crate) fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        match jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(token_data) => Ok(token_data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                ErrorKind::InvalidSignature => Err(TokenError::SignatureInvalid),
                _ => Err(TokenError::Malformed),
            },
        }
    }
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();

    let (scheme, token) = (parts.next()?, parts.next()?);

    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return None;
    }

    Some(token)
}

/// Gate for protected routes: resolves the caller and stores the
/// [`AuthenticatedIdentity`](crate::types::user::AuthenticatedIdentity) in
/// the request extensions, or rejects the request with a bare 401.
pub(crate) async fn authorize<S: CredentialStore>(
    State(users): State<UserController<S>>,
    mut request: Request,
    next: Next,
) -> Result<Response, Error> {
    let token = bearer_token(request.headers()).map(str::to_owned);

    let identity = users.resolve_identity(token.as_deref()).await?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn codec() -> TokenCodec {
        let config = AuthConfig::new("test-secret", Duration::minutes(240), 0, 4).unwrap();
        TokenCodec::new(&config)
    }

    #[test]
    fn issued_token_verifies_and_carries_the_subject() {
        let codec = codec();
        let token = codec.issue(42, codec.ttl()).unwrap();

        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.subject(), Some(42));
        assert_eq!(claims.exp - claims.iat, 240 * 60);
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn zero_ttl_token_is_expired_a_tick_later() {
        let codec = codec();
        let issued_at = Utc::now() - Duration::seconds(1);
        let token = codec.issue_at(7, issued_at, Duration::zero()).unwrap();

        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn leeway_is_only_granted_when_configured() {
        let config = AuthConfig::new("test-secret", Duration::minutes(1), 30, 4).unwrap();
        let lenient = TokenCodec::new(&config);
        let issued_at = Utc::now() - Duration::seconds(5);

        let token = lenient.issue_at(7, issued_at, Duration::zero()).unwrap();

        assert!(lenient.verify(&token).is_ok());
        assert_eq!(codec().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn unrepresentable_expiry_is_an_error() {
        let result = codec().issue(7, Duration::days(1_000_000_000));

        assert!(matches!(result, Err(Error::TokenExpiry)));
    }

    #[test]
    fn flipped_payload_byte_breaks_the_signature() {
        let codec = codec();
        let token = codec.issue(42, codec.ttl()).unwrap();

        let segments: Vec<&str> = token.split('.').collect();
        let mut payload = segments[1].as_bytes().to_vec();
        payload[0] = if payload[0] == b'A' { b'B' } else { b'A' };
        let tampered = format!(
            "{}.{}.{}",
            segments[0],
            String::from_utf8(payload).unwrap(),
            segments[2]
        );

        assert_eq!(codec.verify(&tampered), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let config = AuthConfig::new("someone-else", Duration::minutes(5), 0, 4).unwrap();
        let token = TokenCodec::new(&config).issue(42, Duration::minutes(5)).unwrap();

        assert_eq!(codec().verify(&token), Err(TokenError::SignatureInvalid));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(codec().verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(codec().verify("a.b.c"), Err(TokenError::Malformed));
        assert_eq!(codec().verify(""), Err(TokenError::Malformed));
    }

    #[test]
    fn non_numeric_subject_has_no_identifier() {
        let claims = Claims {
            sub: Some("alice".into()),
            iat: 0,
            exp: 0,
        };

        assert_eq!(claims.subject(), None);
    }

    #[test]
    fn bearer_header_is_parsed() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));

        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("bearer   xyz"));
        assert_eq!(bearer_token(&headers), Some("xyz"));
    }

    #[test]
    fn non_bearer_headers_yield_nothing() {
        let mut headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);

        for value in ["Basic dXNlcjpwYXNz", "Bearer", "Bearer ", "abc.def.ghi", "Bearer a b"] {
            headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
            assert_eq!(bearer_token(&headers), None, "{value}");
        }
    }
}
