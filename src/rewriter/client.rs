use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::entities::is_known_category;
use crate::fetcher::api_endpoint;
use crate::rewriter::{
    RewriteError, RewrittenFields, Rewriter,
    parse::parse_reply,
    prompt::{SYSTEM_PROMPT, user_prompt},
};

pub const REWRITE_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Rewriter backed by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct ChatCompletionRewriter {
    client: Client,
    endpoint: Url,
    model: String,
}

impl fmt::Debug for ChatCompletionRewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionRewriter")
            .field("endpoint", &self.endpoint.as_str())
            .field("model", &self.model)
            .finish()
    }
}

impl ChatCompletionRewriter {
    pub fn new(api_base: &Url, model: impl Into<String>) -> Result<Self, RewriteError> {
        let client = Client::builder()
            .timeout(REWRITE_TIMEOUT)
            .build()
            .map_err(|e| RewriteError::Request(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: api_endpoint(api_base, "chat/completions")
                .map_err(|e| RewriteError::Request(e.to_string()))?,
            model: model.into(),
        })
    }
}

#[async_trait]
impl Rewriter for ChatCompletionRewriter {
    #[instrument(skip_all, fields(model = %self.model, title_len = title.len()))]
    async fn rewrite(
        &self,
        api_key: &str,
        title: &str,
        content: &str,
    ) -> Result<RewrittenFields, RewriteError> {
        let prompt = user_prompt(title, content);
        let request = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RewriteError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RewriteError::Http { status });
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| RewriteError::Format(e.to_string()))?;
        let reply = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        debug!(reply_len = reply.len(), "rewrite reply received");

        let fields = parse_reply(&reply, title, content)?;
        if !is_known_category(&fields.category) {
            warn!(category = %fields.category, "model chose a category outside the fixed list");
        }
        Ok(fields)
    }
}
