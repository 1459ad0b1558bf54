//! Health probe for the generator backend.
//!
//! Ollama: `GET {endpoint}/api/tags` (best-effort model existence check).
//!
//! The returned [`HealthStatus`] is JSON-serializable and suitable for a `/health` endpoint.
//! [`HealthService::check`] is resilient and never fails (errors mapped to `ok=false`).
//! The provider-specific probe returns a strict `Result`.

use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HealthError, HttpError, make_snippet};

/// A serializable health snapshot for the generator backend.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    /// Backend/provider (e.g., "Ollama").
    pub provider: String,
    /// Target endpoint base URL.
    pub endpoint: String,
    /// Model identifier the probe looked for.
    pub model: Option<String>,
    /// Overall health flag.
    pub ok: bool,
    /// Measured HTTP latency in milliseconds for the probe.
    pub latency_ms: u128,
    /// Short human-readable message with details.
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: Some(cfg.model.clone()),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

/// Health checker that reuses a single HTTP client.
pub struct HealthService {
    client: reqwest::Client,
    default_timeout: Duration,
}

impl HealthService {
    /// Creates a new health service with an optional client timeout (seconds, default 10).
    ///
    /// # Errors
    /// Returns [`AiLlmError::HttpTransport`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let timeout = Duration::from_secs(timeout_secs.unwrap_or(10));
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        info!(
            default_timeout_secs = timeout.as_secs(),
            "HealthService initialized"
        );

        Ok(Self {
            client,
            default_timeout: timeout,
        })
    }

    /// Checks the backend described by `cfg`.
    ///
    /// Never returns an error: any failure becomes `HealthStatus { ok: false, .. }`.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            warn!(
                provider = ?cfg.provider,
                endpoint = %cfg.endpoint,
                "invalid endpoint (empty or missing http/https)"
            );
            let err = HealthError::InvalidEndpoint(cfg.endpoint.clone());
            return HealthStatus::new(cfg, false, 0, err.to_string());
        }

        let start = Instant::now();
        #[allow(unreachable_patterns)]
        let result = match cfg.provider {
            LlmProvider::Ollama => self.try_probe_ollama(cfg).await,
        };

        match result {
            Ok(status) => {
                info!(
                    provider = %status.provider,
                    model = %cfg.model,
                    ok = status.ok,
                    latency_ms = status.latency_ms,
                    "health probe completed"
                );
                status
            }
            Err(err) => {
                let status =
                    HealthStatus::new(cfg, false, start.elapsed().as_millis(), err.to_string());
                warn!(
                    provider = %status.provider,
                    endpoint = %status.endpoint,
                    latency_ms = status.latency_ms,
                    message = %status.message,
                    "health probe failed"
                );
                status
            }
        }
    }

    /// Strict Ollama probe.
    ///
    /// - `GET {endpoint}/api/tags`
    /// - Ensure 2xx
    /// - Best-effort: verify `cfg.model` exists in the returned tags
    ///   (a bare name also matches its `:latest` tag)
    async fn try_probe_ollama(&self, cfg: &LlmModelConfig) -> Result<HealthStatus, AiLlmError> {
        let url = format!("{}/api/tags", cfg.endpoint.trim().trim_end_matches('/'));
        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(self.default_timeout)
            .min(self.default_timeout);

        let start = Instant::now();
        debug!(endpoint = %cfg.endpoint, model = %cfg.model, "GET {}", url);

        let resp = self.client.get(&url).timeout(timeout).send().await?;
        let latency = start.elapsed().as_millis();

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %url,
                %status,
                %snippet,
                latency_ms = latency,
                "health GET /api/tags returned non-success status"
            );

            return Err(AiLlmError::from(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet,
            })));
        }

        // Expected minimal JSON: { "models": [ { "name": "<model>" }, ... ] }
        #[derive(serde::Deserialize)]
        struct Tag {
            name: String,
        }
        #[derive(serde::Deserialize)]
        struct Tags {
            models: Option<Vec<Tag>>,
        }

        match resp.json::<Tags>().await {
            Ok(Tags {
                models: Some(models),
            }) => {
                if models.iter().any(|m| model_matches(&m.name, &cfg.model)) {
                    Ok(HealthStatus::new(
                        cfg,
                        true,
                        latency,
                        "Ollama is healthy; model is available",
                    ))
                } else {
                    Ok(HealthStatus::new(
                        cfg,
                        false,
                        latency,
                        "Ollama is up, but model not found in /api/tags",
                    ))
                }
            }
            Ok(Tags { models: None }) => Ok(HealthStatus::new(
                cfg,
                true,
                latency,
                "Ollama is healthy; tags response without `models` field",
            )),
            Err(e) => {
                warn!(
                    endpoint = %cfg.endpoint,
                    error = %e,
                    latency_ms = latency,
                    "failed to decode /api/tags; treating server as reachable"
                );
                Ok(HealthStatus::new(
                    cfg,
                    true,
                    latency,
                    format!("Ollama is reachable; failed to decode /api/tags: {e}"),
                ))
            }
        }
    }
}

/// Tag comparison where `gpt2` matches `gpt2:latest`.
fn model_matches(tag: &str, wanted: &str) -> bool {
    tag == wanted || (!wanted.contains(':') && tag == format!("{wanted}:latest"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: "gpt2".into(),
            endpoint: endpoint.into(),
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(2),
            max_prompt_chars: 1024,
        }
    }

    #[test]
    fn bare_model_name_matches_latest_tag() {
        assert!(model_matches("gpt2:latest", "gpt2"));
        assert!(model_matches("gpt2", "gpt2"));
        assert!(!model_matches("gpt2:large", "gpt2"));
        assert!(!model_matches("gpt2:latest", "gpt2:large"));
    }

    #[tokio::test]
    async fn invalid_endpoint_reports_not_ok() {
        let svc = HealthService::new(Some(1)).unwrap();
        let status = svc.check(&cfg("ftp://nowhere")).await;
        assert!(!status.ok);
        assert_eq!(status.provider, "Ollama");
        assert!(status.message.contains("invalid endpoint"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_never_errors() {
        let svc = HealthService::new(Some(1)).unwrap();
        let status = svc.check(&cfg("http://127.0.0.1:9")).await;
        assert!(!status.ok);
        assert_eq!(status.model.as_deref(), Some("gpt2"));
    }
}
