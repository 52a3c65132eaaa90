//! Thin asynchronous client for the text-to-APU generation service.
//!
//! - One call: a free-text construction description goes in, a partial APU
//!   (description, unit, resources) may come back.
//! - An empty or absent result means "no generation" and is `Ok(None)`, not
//!   an error; only transport and API failures surface as `Err`.
//! - Callers hand the result to `ApuDraft::apply_generated`, which replaces
//!   the draft's resources wholesale; nothing here merges incrementally.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::GeneratedApu;

const DEFAULT_BASE_URL: &str = "https://api.apu-estimator.dev/v1/";
const USER_AGENT: &str = "apu-estimator/1.0.0";

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    description: &'a str,
}

#[derive(Deserialize)]
struct ApiEnvelope<T> {
    status: String,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Clone, Debug)]
pub struct GeneratorClient {
    http: Client,
    base_url: Url,
}

impl GeneratorClient {
    pub fn new() -> Result<Self, GeneratorError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base: &str) -> Result<Self, GeneratorError> {
        let base_url = Url::parse(base)?;
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base_url })
    }

    /// Asks the service to draft an APU from a free-text description.
    pub async fn generate(&self, description: &str) -> Result<Option<GeneratedApu>, GeneratorError> {
        let url = self.base_url.join("generate")?;
        let response = self
            .http
            .post(url)
            .json(&GenerateRequest { description })
            .send()
            .await?
            .error_for_status()?;

        let envelope: ApiEnvelope<GeneratedApu> = response.json().await?;
        if envelope.status != "ok" {
            return Err(GeneratorError::Api(
                envelope
                    .message
                    .unwrap_or_else(|| format!("unexpected status: {}", envelope.status)),
            ));
        }

        Ok(envelope.data.filter(|generated| !generated.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_an_invalid_base_url() {
        let err = GeneratorClient::with_base_url("not a url").unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidUrl(_)));
    }

    #[test]
    fn empty_payload_means_no_generation() {
        let envelope: ApiEnvelope<GeneratedApu> =
            serde_json::from_str(r#"{"status":"ok","data":{}}"#).unwrap();
        assert!(envelope.data.filter(|g| !g.is_empty()).is_none());
    }

    #[tokio::test]
    async fn transport_failures_surface_as_http_errors() {
        // Bind-then-drop reserves a port nothing is listening on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = GeneratorClient::with_base_url(&format!("http://127.0.0.1:{port}/")).unwrap();

        let err = client.generate("brick wall, 15cm").await.unwrap_err();
        assert!(matches!(err, GeneratorError::Http(_)));
    }
}
