use serde::{Serialize, Deserialize};
use std::str::FromStr;
use std::fmt;
use anyhow::{Result};
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelProvider {
  OpenAI,
  Groq,
}

impl ModelProvider {

  pub fn as_str(&self) -> &'static str {
    match self {
      &ModelProvider::OpenAI => "OpenAI",
      &ModelProvider::Groq => "Groq",
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMModelConfig {
  pub provider: ModelProvider,
  pub model_name: String,
  pub api_key: Option<String>, // Memory only, never logged or persisted
  pub base_url: Option<String>, // Useful for proxy setups
  pub temperature: Option<f32>,
  pub max_tokens: Option<u32>,
  pub top_p : Option<f32>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role: String, // e.g., "user", "assistant", "system"
  pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMResponse {
  pub content: String,
}

impl fmt::Display for ModelProvider {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ModelProvider {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "openai" => Ok(ModelProvider::OpenAI),
      "groq" => Ok(ModelProvider::Groq),
      _ => Err(format!("Unknown model provider: {}", s)),
    }
  }
}

#[async_trait]
pub trait LLMChatter : Send + Sync {
  async fn chat(&self, messages: Vec<ChatMessage>,config : &LLMModelConfig) -> Result<LLMResponse>;

}
