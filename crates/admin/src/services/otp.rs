//! SMS verification provider client.
//!
//! Wraps the external OTP HTTP API used during signup. The provider
//! generates, delivers, and checks the codes; this service never sees or
//! stores the code value.
//!
//! # API
//!
//! - Authentication: `Authorization: Bearer <key>`
//! - `POST /send` with `{"phone", "signature"}` - deliver a code
//! - `POST /verify` with `{"phone", "code"}` - check a submitted code
//! - `POST /sms` with `{"phone", "message"}` - plain notification SMS
//!
//! Every endpoint answers `{"success": bool, "error"?: string}`.

use std::sync::Arc;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use boutique_core::Phone;

use crate::config::OtpConfig;

/// Errors that can occur when talking to the verification provider.
#[derive(Debug, Error)]
pub enum OtpError {
    /// HTTP request failed.
    #[error("verification service unreachable: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with `success: false`.
    #[error("{0}")]
    Provider(String),

    /// Client could not be built from the configuration.
    #[error("invalid OTP configuration: {0}")]
    Config(String),
}

#[derive(Serialize)]
struct SendRequest<'a> {
    phone: &'a str,
    signature: &'a str,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    phone: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
struct SmsRequest<'a> {
    phone: &'a str,
    message: &'a str,
}

#[derive(Deserialize)]
struct ProviderResponse {
    success: bool,
    error: Option<String>,
}

/// Client for the SMS verification provider.
#[derive(Clone)]
pub struct OtpClient {
    inner: Arc<OtpClientInner>,
}

struct OtpClientInner {
    client: reqwest::Client,
    base_url: String,
    signature: String,
}

impl OtpClient {
    /// Create a new verification client.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::Config` if the API key is not a valid header
    /// value, `OtpError::Http` if the HTTP client fails to build.
    pub fn new(config: &OtpConfig) -> Result<Self, OtpError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_value = HeaderValue::from_str(&auth_value)
            .map_err(|e| OtpError::Config(format!("invalid API key: {e}")))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            inner: Arc::new(OtpClientInner {
                client,
                base_url: config.api_url.trim_end_matches('/').to_owned(),
                signature: config.signature.clone(),
            }),
        })
    }

    /// Ask the provider to deliver a verification code to this phone.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::Http` if the request fails, `OtpError::Provider`
    /// with the provider's message if delivery was refused.
    pub async fn send_code(&self, phone: &Phone) -> Result<(), OtpError> {
        let response = self
            .inner
            .client
            .post(format!("{}/send", self.inner.base_url))
            .json(&SendRequest {
                phone: phone.as_str(),
                signature: &self.inner.signature,
            })
            .send()
            .await?
            .json::<ProviderResponse>()
            .await?;

        Self::unpack(response, "Failed to send the verification code")
    }

    /// Check a submitted code against the one the provider delivered.
    ///
    /// # Errors
    ///
    /// Returns `OtpError::Http` if the request fails, `OtpError::Provider`
    /// with the provider's message if the code is wrong or expired.
    pub async fn verify_code(&self, phone: &Phone, code: &str) -> Result<(), OtpError> {
        let response = self
            .inner
            .client
            .post(format!("{}/verify", self.inner.base_url))
            .json(&VerifyRequest {
                phone: phone.as_str(),
                code,
            })
            .send()
            .await?
            .json::<ProviderResponse>()
            .await?;

        Self::unpack(response, "Invalid verification code")
    }

    /// Send a plain notification SMS (used for delivery confirmations).
    ///
    /// # Errors
    ///
    /// Returns `OtpError::Http` if the request fails, `OtpError::Provider`
    /// with the provider's message if the SMS was refused.
    pub async fn send_sms(&self, phone: &Phone, message: &str) -> Result<(), OtpError> {
        let response = self
            .inner
            .client
            .post(format!("{}/sms", self.inner.base_url))
            .json(&SmsRequest {
                phone: phone.as_str(),
                message,
            })
            .send()
            .await?
            .json::<ProviderResponse>()
            .await?;

        Self::unpack(response, "Failed to send the SMS")
    }

    fn unpack(response: ProviderResponse, fallback: &str) -> Result<(), OtpError> {
        if response.success {
            Ok(())
        } else {
            Err(OtpError::Provider(
                response.error.unwrap_or_else(|| fallback.to_owned()),
            ))
        }
    }
}
