//! Description generation
//!
//! For every base emoji without a description file, ask a chat model for
//! one, tidy the answer and write `desc/<glyph>.txt`. Failures of a single
//! emoji are logged and skipped; nothing is retried.

use anyhow::{bail, Context, Result};
use emojifind_core::{clean_generated, description_file_name, description_prompt, Catalog};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::path::Path;
use std::time::Duration;

/// Something that answers a prompt
pub trait ChatModel {
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>>;
}

// =============================================================================
// OpenAI-compatible client
// =============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat completions over HTTP
pub struct OpenAiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Both the key and the endpoint are required
    pub fn new(api_key: Option<String>, endpoint: Option<String>, model: impl Into<String>) -> Result<Self> {
        let api_key = api_key.context("OPENAI_API_KEY environment variable is required")?;
        let endpoint = endpoint.context("OPENAI_ENDPOINT environment variable is required")?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            model: model.into(),
        })
    }
}

impl ChatModel for OpenAiClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .context("chat request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("chat API error: {}\n{}", status, body);
        }

        let body: ChatResponse = response.json().await.context("invalid chat response")?;
        Ok(body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default())
    }
}

// =============================================================================
// Run
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct DescribeOptions {
    /// Pause after each written file
    pub delay: Duration,
    /// Stop after this many written files
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescribeReport {
    /// Base emojis considered
    pub candidates: usize,
    pub existing: usize,
    pub written: usize,
    pub failed: usize,
}

/// Generate missing descriptions into `dir`
pub async fn describe_missing<M: ChatModel>(
    catalog: &Catalog,
    dir: &Path,
    model: &M,
    options: &DescribeOptions,
) -> Result<DescribeReport> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;

    // unlinked tone variants count as bases here
    let bases: Vec<usize> = (0..catalog.len())
        .filter(|&idx| catalog.variation_of(idx).is_none())
        .collect();

    let mut report = DescribeReport {
        candidates: bases.len(),
        ..DescribeReport::default()
    };
    tracing::info!(emojis = bases.len(), "processing emojis");

    for (position, &idx) in bases.iter().enumerate() {
        if options.limit.is_some_and(|limit| report.written >= limit) {
            break;
        }
        let Some(record) = catalog.get(idx) else {
            continue;
        };

        let path = dir.join(description_file_name(&record.glyph));
        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            report.existing += 1;
            continue;
        }

        let text = match model.complete(&description_prompt(record)).await {
            Ok(answer) => clean_generated(&answer),
            Err(e) => {
                tracing::error!(emoji = %record.glyph, error = %e, "description request failed");
                report.failed += 1;
                continue;
            }
        };
        if text.is_empty() {
            tracing::warn!(emoji = %record.glyph, "empty description, skipping");
            report.failed += 1;
            continue;
        }

        if let Err(e) = tokio::fs::write(&path, &text).await {
            tracing::error!(path = %path.display(), error = %e, "failed to write description");
            report.failed += 1;
            continue;
        }
        report.written += 1;
        tracing::info!("[{}/{}] {}", position + 1, bases.len(), record.glyph);

        if !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }
    }

    Ok(report)
}
