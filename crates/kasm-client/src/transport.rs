//! The single authenticated HTTPS exchange.
//!
//! One `Transport` is built per TLS policy and reused for every call,
//! so connection pooling and timeouts stay consistent. It knows nothing
//! about operation schemas: it sends one request, checks the status
//! against the accepted {200, 201} set, and hands the raw body back.

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Serialize;
use url::Url;

use crate::errors::{ClientError, Result, TransportError};

/// Connect and whole-request timeouts, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransportTimeout {
    pub connect: f64,
    pub request: f64,
}

impl Default for TransportTimeout {
    fn default() -> Self {
        Self {
            connect: 10.0,
            request: 30.0,
        }
    }
}

/// Proof that the caller explicitly chose to skip certificate
/// verification. There is no other way to obtain one, so the downgrade
/// can never happen silently.
pub struct InsecureTlsConfirmation(());

impl InsecureTlsConfirmation {
    pub fn confirm() -> Self {
        Self(())
    }
}

/// TLS policy and timeouts for a client.
#[derive(Clone, Debug, PartialEq)]
pub struct TransportConfig {
    pub verify_tls: bool,
    pub timeout: TransportTimeout,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            verify_tls: true,
            timeout: TransportTimeout::default(),
        }
    }
}

impl TransportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable certificate-chain verification. The channel remains TLS
    /// encrypted; only the peer identity check is dropped.
    pub fn skip_tls_verify(mut self, _confirmation: InsecureTlsConfirmation) -> Self {
        self.verify_tls = false;
        self
    }

    pub fn with_timeout(mut self, timeout: TransportTimeout) -> Self {
        self.timeout = timeout;
        self
    }
}

/// How credentials ride on a request.
pub enum AuthChannel<'a> {
    /// Credentials are already embedded in the JSON body. The normal
    /// path for this API.
    Body,
    /// `Authorization: Bearer <token>` header, no body credentials.
    Bearer(&'a str),
}

/// Executes one request/response exchange at a time. No retries, no
/// queues; a transient failure surfaces immediately.
#[derive(Clone, Debug)]
pub struct Transport {
    http: reqwest::Client,
}

impl Transport {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs_f64(config.timeout.connect))
            .timeout(Duration::from_secs_f64(config.timeout.request))
            .default_headers(headers);
        if !config.verify_tls {
            builder = builder.danger_accept_invalid_certs(true);
        }
        let http = builder
            .build()
            .map_err(|error| ClientError::Config(format!("could not build HTTP client: {error}")))?;

        Ok(Self { http })
    }

    /// Sends one request and returns the raw response body.
    ///
    /// Any status outside {200, 201} is a transport error carrying the
    /// numeric code and its canonical status text. The service mixes
    /// 200 and 201 between create and read operations, so both are
    /// accepted for every request kind.
    pub async fn execute<T: Serialize + ?Sized>(
        &self,
        operation: &'static str,
        method: Method,
        url: Url,
        auth: AuthChannel<'_>,
        body: Option<&T>,
    ) -> Result<Vec<u8>> {
        let mut request = self.http.request(method, url.clone());
        if let AuthChannel::Bearer(token) = auth {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|source| TransportError::Connection { operation, source })?;

        let status = response.status();
        tracing::debug!(operation, %url, status = status.as_u16(), "kasm api exchange");
        if !matches!(status.as_u16(), 200 | 201) {
            return Err(TransportError::Status {
                operation,
                status: status.as_u16(),
                status_text: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            }
            .into());
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| TransportError::Connection { operation, source })?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_is_on_by_default() {
        assert!(TransportConfig::default().verify_tls);
        assert!(TransportConfig::new().verify_tls);
    }

    #[test]
    fn skipping_verification_needs_an_explicit_confirmation() {
        let config = TransportConfig::new().skip_tls_verify(InsecureTlsConfirmation::confirm());
        assert!(!config.verify_tls);
    }

    #[test]
    fn default_timeouts_match_the_documented_values() {
        let timeout = TransportTimeout::default();
        assert_eq!(timeout.connect, 10.0);
        assert_eq!(timeout.request, 30.0);
    }
}
