use eyre::{eyre, Result, WrapErr};
use reqwest::Client;
use serde::{Deserialize, Serialize};

const COMPLETIONS_ENDPOINT: &str = "https://api.openai.com/v1/completions";
const COMPLETION_MODEL: &str = "gpt-3.5-turbo-instruct";
const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Sampling parameters for one completion call.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Parameters for the generated description: creative and long.
pub const DESCRIPTION_PARAMS: SamplingParams = SamplingParams {
    temperature: 1.0,
    max_tokens: 1000,
};

/// Parameters for the generated name: tighter sampling and only a few
/// tokens of output.
pub const NAME_PARAMS: SamplingParams = SamplingParams {
    temperature: 0.7,
    max_tokens: 5,
};

/// Client for the hosted text-completion API.
///
/// No retry or rate-limit handling; any API error propagates.
pub struct CompletionClient {
    client: Client,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'static str,
    prompt: &'a str,
    temperature: f32,
    max_tokens: u32,
    n: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    text: String,
}

impl<'a> CompletionRequest<'a> {
    fn new(prompt: &'a str, params: SamplingParams) -> Self {
        Self {
            model: COMPLETION_MODEL,
            prompt,
            temperature: params.temperature,
            max_tokens: params.max_tokens,
            n: 1,
        }
    }
}

impl CompletionClient {
    /// Builds a client with the API key from `.env` or the process
    /// environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var(API_KEY_VAR)
            .wrap_err("OPENAI_API_KEY is not set; add it to .env or the environment")?;
        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    /// Sends `prompt` to the completion API and returns the first
    /// candidate's text, trimmed.
    pub async fn complete(&self, prompt: &str, params: SamplingParams) -> Result<String> {
        let request = CompletionRequest::new(prompt, params);
        let response = self
            .client
            .post(COMPLETIONS_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;
        let completion: CompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| eyre!("completion API returned no candidates"))?;
        Ok(choice.text.trim().to_string())
    }
}
