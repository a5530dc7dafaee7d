use crate::research::llm::model_provider::{ChatMessage, LLMChatter, LLMModelConfig, LLMResponse};

use reqwest::{header::{HeaderMap},Client, Response};
use serde::{Deserialize, Serialize};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::result::Result::Ok;


#[derive(Serialize, Debug)]
struct GroqChatRequest {
  messages: Vec<ChatMessage>, // Reusing the generic ChatMessage from model_provider
  model: String,              // e.g., "llama3-70b-8192"
  #[serde(skip_serializing_if = "Option::is_none")]
  temperature: Option<f32>,
  #[serde(rename = "max_tokens")] // OpenAI compatible APIs often use max_tokens
  #[serde(skip_serializing_if = "Option::is_none")]
  max_completion_tokens: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  top_p: Option<f32>,
}

#[derive(Deserialize, Debug)]
struct GroqResponseMessage {
  content: String,
}

#[derive(Deserialize, Debug)]
struct GroqChoice {
  message: GroqResponseMessage,
}

#[derive(Deserialize, Debug)]
struct GroqChatResponse {
  choices: Vec<GroqChoice>,
}

pub struct GroqProvider {
  groq_url : String,
  api_key : String,
  model_name: String,
  client : Client
}

impl GroqProvider {

  pub fn new(model_name: &str, api_key: &str) -> Self {
    let groq_url: String = "https://api.groq.com/openai/v1/chat/completions".to_string();
    GroqProvider {groq_url, api_key: api_key.to_string(), model_name: model_name.to_string(), client: Client::new()}
  }
}

#[async_trait]
impl LLMChatter for GroqProvider {
  async fn chat(&self, messages: Vec<ChatMessage>, config: &LLMModelConfig) -> Result<LLMResponse> {
    let request: GroqChatRequest = GroqChatRequest {
      model: self.model_name.clone(),
      messages: messages,
      temperature: config.temperature,
      max_completion_tokens: config.max_tokens,
      top_p: config.top_p,
    };

    let mut headers = HeaderMap::new();
    headers.insert("Authorization", format!("Bearer {}", self.api_key).parse().map_err(|_| anyhow!("API key is not a valid header value"))?);
    headers.insert("Content-Type", "application/json".parse().unwrap());
    let response: Response = self.client.post(&self.groq_url).headers(headers).json(&request).send().await?;

    if response.status().is_success() {
      let groq_response : GroqChatResponse = response.json().await?;
      // Pull out the first choice (or fail)
      let first : GroqChoice = groq_response.choices.into_iter().next().ok_or_else(|| anyhow!("No response choices received from Groq"))?;
      return Ok(LLMResponse{
        content: first.message.content
      });
    }
    else {
      let status = response.status();
      log::error!("Error getting response from Groq: {:?}", status);
      return Err(anyhow!("Groq request failed with status {}", status));
    }

  }
}
