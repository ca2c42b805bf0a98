use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Header, Validation, decode, decode_header};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::{claims_error::ClaimsError, key_provider::KeyProvider};

/// How often the background task asks the provider whether a refresh is due.
const REFRESH_CHECK_PERIOD: Duration = Duration::from_secs(60);
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(300);
/// Minimum gap between two fetches triggered by unknown `kid`s.
const ON_DEMAND_COOLDOWN: Duration = Duration::from_secs(60);
const BACKOFF_BASE: Duration = Duration::from_secs(60);
const MAX_BACKOFF: Duration = Duration::from_secs(3600);

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    n: Option<String>,
    e: Option<String>,
    alg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct JwkSet {
    keys: Vec<Jwk>,
}

#[derive(Debug, Default)]
struct RefreshState {
    last_attempt: Option<Instant>,
    consecutive_failures: u32,
    last_on_demand: Option<Instant>,
}

impl RefreshState {
    fn is_due(&self, interval: Duration) -> bool {
        let Some(last) = self.last_attempt else {
            return true;
        };
        let wait = if self.consecutive_failures == 0 {
            interval
        } else {
            backoff(self.consecutive_failures)
        };
        last.elapsed() >= wait
    }

    fn on_demand_cooling_down(&self) -> bool {
        self.last_on_demand
            .is_some_and(|at| at.elapsed() < ON_DEMAND_COOLDOWN)
    }
}

/// Wait after `failures` consecutive failed fetches: doubles from one
/// minute, capped at one hour.
fn backoff(failures: u32) -> Duration {
    BACKOFF_BASE
        .saturating_mul(1 << failures.min(10))
        .min(MAX_BACKOFF)
}

/// RSA signing keys published by the identity provider, cached by `kid`.
///
/// Lookups read an `ArcSwap` snapshot and never wait on a fetch. The cache is
/// refreshed by [`run_jwks_refresh_task`] and, at most once per cooldown, when
/// a token names a `kid` the cache does not know (key rotation).
#[must_use]
pub struct JwksKeyProvider {
    jwks_uri: String,
    client: reqwest::Client,
    keys: ArcSwap<HashMap<String, DecodingKey>>,
    state: Mutex<RefreshState>,
    refresh_interval: Duration,
}

impl JwksKeyProvider {
    /// # Errors
    /// Returns error if the HTTP client cannot be built (e.g., TLS setup)
    pub fn with_http_timeout(
        jwks_uri: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            jwks_uri: jwks_uri.into(),
            client,
            keys: ArcSwap::from_pointee(HashMap::new()),
            state: Mutex::new(RefreshState::default()),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
        })
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    #[must_use]
    pub fn jwks_uri(&self) -> &str {
        &self.jwks_uri
    }

    fn key(&self, kid: &str) -> Option<DecodingKey> {
        self.keys.load().get(kid).cloned()
    }

    async fn fetch(&self) -> Result<HashMap<String, DecodingKey>, ClaimsError> {
        let set: JwkSet = self
            .client
            .get(&self.jwks_uri)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| map_http_error(&e))?
            .json()
            .await
            .map_err(|e| map_http_error(&e))?;

        let mut keys = HashMap::new();
        for jwk in set.keys {
            if jwk.kty != "RSA" || jwk.alg.as_deref().is_some_and(|alg| alg != "RS256") {
                tracing::debug!(
                    kid = %jwk.kid,
                    kty = %jwk.kty,
                    alg = ?jwk.alg,
                    "skipping non-RS256 JWK"
                );
                continue;
            }
            let (Some(n), Some(e)) = (jwk.n.as_deref(), jwk.e.as_deref()) else {
                tracing::debug!(kid = %jwk.kid, "skipping RSA JWK without modulus/exponent");
                continue;
            };
            let key = DecodingKey::from_rsa_components(n, e)
                .map_err(|e| ClaimsError::JwksFetchFailed(format!("Invalid RSA key: {e}")))?;
            keys.insert(jwk.kid, key);
        }

        if keys.is_empty() {
            return Err(ClaimsError::JwksFetchFailed(
                "No valid RSA keys found in JWKS".into(),
            ));
        }
        Ok(keys)
    }

    /// Fetch the key set and swap it in; failures only grow the back-off,
    /// the previous keys stay usable.
    async fn refresh(&self) -> Result<(), ClaimsError> {
        let outcome = self.fetch().await;

        let mut state = self.state.lock().await;
        state.last_attempt = Some(Instant::now());
        match outcome {
            Ok(keys) => {
                state.consecutive_failures = 0;
                tracing::info!(keys = keys.len(), uri = %self.jwks_uri, "JWKS refreshed");
                self.keys.store(Arc::new(keys));
                Ok(())
            }
            Err(e) => {
                state.consecutive_failures = state.consecutive_failures.saturating_add(1);
                tracing::warn!(
                    uri = %self.jwks_uri,
                    failures = state.consecutive_failures,
                    error = %e,
                    "JWKS refresh failed"
                );
                Err(e)
            }
        }
    }

    async fn refresh_for_unknown_kid(&self, kid: &str) -> Result<DecodingKey, ClaimsError> {
        {
            let mut state = self.state.lock().await;
            if state.on_demand_cooling_down() {
                tracing::debug!(kid, "unknown kid, on-demand JWKS refresh cooling down");
                return Err(ClaimsError::UnknownKeyId(kid.to_owned()));
            }
            state.last_on_demand = Some(Instant::now());
        }

        tracing::info!(kid, "unknown kid, refreshing JWKS");
        self.refresh().await?;

        self.key(kid).ok_or_else(|| {
            tracing::warn!(kid, "kid still unknown after JWKS refresh");
            ClaimsError::UnknownKeyId(kid.to_owned())
        })
    }

    /// Check the RS256 signature only; claim rules are applied by the verifier.
    fn verify_signature(token: &str, key: &DecodingKey) -> Result<Value, ClaimsError> {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims::<&str>(&[]);

        decode::<Value>(token, key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => ClaimsError::InvalidSignature,
                _ => ClaimsError::DecodeFailed(format!("JWT validation failed: {e}")),
            })
    }
}

#[async_trait]
impl KeyProvider for JwksKeyProvider {
    fn name(&self) -> &'static str {
        "jwks"
    }

    async fn validate_and_decode(&self, token: &str) -> Result<(Header, Value), ClaimsError> {
        let token = token.trim_start_matches("Bearer ").trim();

        let header = decode_header(token)
            .map_err(|e| ClaimsError::DecodeFailed(format!("Invalid JWT header: {e}")))?;
        if header.alg != Algorithm::RS256 {
            return Err(ClaimsError::UnsupportedAlgorithm(format!("{:?}", header.alg)));
        }
        let Some(kid) = header.kid.as_deref() else {
            return Err(ClaimsError::DecodeFailed("Missing kid in JWT header".into()));
        };

        let key = match self.key(kid) {
            Some(key) => key,
            None => self.refresh_for_unknown_kid(kid).await?,
        };
        let claims = Self::verify_signature(token, &key)?;

        Ok((header, claims))
    }

    async fn refresh_keys(&self) -> Result<(), ClaimsError> {
        let due = self.state.lock().await.is_due(self.refresh_interval);
        if due { self.refresh().await } else { Ok(()) }
    }
}

/// Periodically refresh JWKS until `cancellation_token` is cancelled.
///
/// The first tick fires immediately, so spawning this task also primes the
/// key cache.
pub async fn run_jwks_refresh_task(
    provider: Arc<JwksKeyProvider>,
    cancellation_token: CancellationToken,
) {
    let mut interval = tokio::time::interval(REFRESH_CHECK_PERIOD);

    loop {
        tokio::select! {
            () = cancellation_token.cancelled() => {
                tracing::info!("JWKS refresh task shutting down");
                break;
            }
            _ = interval.tick() => {
                // failures are logged by `refresh`; the next tick retries after back-off
                let _ = provider.refresh_keys().await;
            }
        }
    }
}

fn map_http_error(e: &reqwest::Error) -> ClaimsError {
    ClaimsError::JwksFetchFailed(crate::http_error::format_http_error(e, "JWKS"))
}
