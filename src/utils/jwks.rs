//! Bearer token verification against a remote JWKS document.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::JwkSet;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode, decode_header};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

#[derive(Debug, Deserialize)]
struct SubjectClaims {
    #[serde(default)]
    sub: String,
}

#[derive(Default)]
struct KeyCache {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Option<Instant>,
}

impl KeyCache {
    fn replace(&mut self, set: &JwkSet) {
        self.keys = set
            .keys
            .iter()
            .filter_map(|jwk| {
                let kid = jwk.common.key_id.clone()?;
                match DecodingKey::from_jwk(jwk) {
                    Ok(key) => Some((kid, key)),
                    Err(e) => {
                        tracing::warn!(kid = %kid, error = %e, "Skipping unusable JWK");
                        None
                    }
                }
            })
            .collect();
        self.fetched_at = Some(Instant::now());
    }
}

/// Verifies RS256 tokens and returns their subject.
///
/// Keys are cached by `kid`. An unknown `kid` triggers a refetch of the
/// JWKS document, at most once per `jwks_refresh_interval` whether or not
/// the fetch succeeds. Tokens that cannot be matched to a key are rejected
/// as unauthorized.
pub struct JwksVerifier {
    http: reqwest::Client,
    jwks_uri: String,
    refresh_interval: Duration,
    validation: Validation,
    cache: RwLock<KeyCache>,
}

impl JwksVerifier {
    pub fn new(http: reqwest::Client, config: &AuthConfig) -> Self {
        Self {
            http,
            jwks_uri: config.jwks_uri.clone(),
            refresh_interval: Duration::from_secs(config.jwks_refresh_interval),
            validation: validation(config),
            cache: RwLock::new(KeyCache::default()),
        }
    }

    /// Starts with `keys` already cached, as if they had just been fetched.
    pub fn with_key_set(http: reqwest::Client, config: &AuthConfig, keys: &JwkSet) -> Self {
        let mut cache = KeyCache::default();
        cache.replace(keys);
        Self {
            cache: RwLock::new(cache),
            ..Self::new(http, config)
        }
    }

    /// Validates `token` and returns its `sub` claim.
    pub async fn verify(&self, token: &str) -> AppResult<String> {
        let header = decode_header(token)
            .map_err(|e| AppError::unauthorized(format!("Malformed token: {}", e)))?;
        if header.alg != Algorithm::RS256 {
            return Err(AppError::unauthorized(format!(
                "Unsupported token algorithm {:?}",
                header.alg
            )));
        }
        let kid = header
            .kid
            .ok_or_else(|| AppError::unauthorized("Token has no key id"))?;

        let key = self.key_for(&kid).await?;
        let data = decode::<SubjectClaims>(token, &key, &self.validation)
            .map_err(|e| AppError::unauthorized(format!("Invalid token: {}", e)))?;

        if data.claims.sub.trim().is_empty() {
            return Err(AppError::unauthorized("Token has no subject"));
        }
        Ok(data.claims.sub)
    }

    async fn key_for(&self, kid: &str) -> AppResult<DecodingKey> {
        if let Some(key) = self.cache.read().await.keys.get(kid) {
            return Ok(key.clone());
        }

        let mut cache = self.cache.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(key) = cache.keys.get(kid) {
            return Ok(key.clone());
        }

        let stale = cache
            .fetched_at
            .is_none_or(|at| at.elapsed() >= self.refresh_interval);
        if stale {
            // Failed fetches also wait out the interval.
            cache.fetched_at = Some(Instant::now());
            match self.fetch().await {
                Ok(set) => {
                    cache.replace(&set);
                    tracing::info!(keys = cache.keys.len(), "Refreshed JWKS");
                }
                Err(e) => tracing::warn!(error = ?e, "JWKS refresh failed"),
            }
        }

        cache
            .keys
            .get(kid)
            .cloned()
            .ok_or_else(|| AppError::unauthorized("Unknown signing key"))
    }

    async fn fetch(&self) -> AppResult<JwkSet> {
        let operation = "fetch jwks";
        self.http
            .get(&self.jwks_uri)
            .send()
            .await
            .map_err(|e| AppError::upstream("jwks", operation, e))?
            .error_for_status()
            .map_err(|e| AppError::upstream("jwks", operation, e))?
            .json::<JwkSet>()
            .await
            .map_err(|e| AppError::upstream("jwks", operation, e))
    }
}

fn validation(config: &AuthConfig) -> Validation {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.leeway = config.leeway;
    validation.set_required_spec_claims(&["exp", "sub"]);
    if let Some(issuer) = &config.issuer {
        validation.set_issuer(&[issuer]);
    }
    match &config.audience {
        Some(audience) => validation.set_audience(&[audience]),
        None => validation.validate_aud = false,
    }
    validation
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use axum::Router;
    use axum::routing::get;
    use jsonwebtoken::{EncodingKey, Header, encode, get_current_timestamp};
    use serde_json::{Value, json};

    const PRIVATE_KEY: &[u8] = include_bytes!("../../tests/fixtures/jwt_private.pem");
    const JWKS: &str = include_str!("../../tests/fixtures/jwks.json");

    fn key_set() -> JwkSet {
        serde_json::from_str(JWKS).unwrap()
    }

    fn config() -> AuthConfig {
        AuthConfig {
            jwks_uri: "http://127.0.0.1:1/jwks".into(),
            ..AuthConfig::default()
        }
    }

    fn sign(kid: &str, claims: Value) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(kid.to_string());
        encode(&header, &claims, &EncodingKey::from_rsa_pem(PRIVATE_KEY).unwrap()).unwrap()
    }

    fn claims(sub: &str) -> Value {
        json!({"sub": sub, "exp": get_current_timestamp() + 600})
    }

    #[tokio::test]
    async fn test_valid_token_yields_subject() {
        let verifier = JwksVerifier::with_key_set(reqwest::Client::new(), &config(), &key_set());
        let token = sign("test-key-1", claims("user_2abc"));
        assert_eq!(verifier.verify(&token).await.unwrap(), "user_2abc");
    }

    #[tokio::test]
    async fn test_expired_token_is_unauthorized() {
        let verifier = JwksVerifier::with_key_set(reqwest::Client::new(), &config(), &key_set());
        let token = sign("test-key-1", json!({"sub": "u", "exp": get_current_timestamp() - 3600}));
        assert!(matches!(
            verifier.verify(&token).await,
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_subject_is_unauthorized() {
        let verifier = JwksVerifier::with_key_set(reqwest::Client::new(), &config(), &key_set());
        let token = sign("test-key-1", claims(""));
        let err = verifier.verify(&token).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_issuer_is_checked_when_configured() {
        let config = AuthConfig {
            issuer: Some("https://clerk.example.com".into()),
            ..config()
        };
        let verifier = JwksVerifier::with_key_set(reqwest::Client::new(), &config, &key_set());

        let wrong = sign(
            "test-key-1",
            json!({"sub": "u", "iss": "https://evil.example", "exp": get_current_timestamp() + 600}),
        );
        assert!(verifier.verify(&wrong).await.is_err());

        let right = sign(
            "test-key-1",
            json!({"sub": "u", "iss": "https://clerk.example.com", "exp": get_current_timestamp() + 600}),
        );
        assert_eq!(verifier.verify(&right).await.unwrap(), "u");
    }

    #[tokio::test]
    async fn test_garbage_token_is_unauthorized() {
        let verifier = JwksVerifier::with_key_set(reqwest::Client::new(), &config(), &key_set());
        assert!(matches!(
            verifier.verify("not.a.jwt").await,
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_kid_refetches_at_most_once_per_interval() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/jwks",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    axum::Json(serde_json::from_str::<Value>(JWKS).unwrap())
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config = AuthConfig {
            jwks_uri: format!("http://{}/jwks", addr),
            ..config()
        };
        let verifier = JwksVerifier::new(reqwest::Client::new(), &config);

        // First use fetches the document.
        let token = sign("test-key-1", claims("u1"));
        assert_eq!(verifier.verify(&token).await.unwrap(), "u1");
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        // A kid that is not in the document does not refetch inside the interval.
        let rotated = sign("rotated-key", claims("u1"));
        assert!(verifier.verify(&rotated).await.is_err());
        assert!(verifier.verify(&rotated).await.is_err());
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_is_not_retried_per_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/jwks",
            get(move || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    axum::http::StatusCode::SERVICE_UNAVAILABLE
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        let config = AuthConfig {
            jwks_uri: format!("http://{}/jwks", addr),
            ..config()
        };
        let verifier = JwksVerifier::new(reqwest::Client::new(), &config);

        for i in 0..5 {
            let token = sign(&format!("bogus-{i}"), claims("u1"));
            let err = verifier.verify(&token).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized { .. }), "{err:?}");
        }
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }
}
