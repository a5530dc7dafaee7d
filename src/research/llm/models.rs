use serde::{Serialize, Deserialize};
use std::sync::OnceLock;
use anyhow::{Result, anyhow};

use crate::research::llm::model_provider::{LLMModelConfig, ModelProvider, LLMChatter};
use crate::research::llm::openai::OpenAIProvider;
use crate::research::llm::groq::GroqProvider;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMModel {
  pub display_name: String,
  pub model_name: String, // The actual name used in API calls
  pub provider: ModelProvider,
}

impl LLMModel {
  pub fn new(display_name: &str, model_name: &str, provider: ModelProvider) -> Self {
    LLMModel {
      display_name: display_name.to_string(),
      model_name: model_name.to_string(),
      provider,
    }
  }

  pub fn to_choice_tuple(&self) -> (String, String, String) {
    (
      self.display_name.clone(),
      self.model_name.clone(),
      self.provider.to_string(),
    )
  }
}

// --- Static list of selectable model descriptors ---
fn available_models_data() -> Vec<LLMModel> {
  vec![
    // OpenAI - gpt-4 first, it is the default the research prompts were written for.
    LLMModel::new("[openai] gpt-4", "gpt-4", ModelProvider::OpenAI),
    LLMModel::new("[openai] gpt-4o", "gpt-4o", ModelProvider::OpenAI),
    LLMModel::new("[openai] gpt-3.5-turbo", "gpt-3.5-turbo", ModelProvider::OpenAI),

    // Groq - OpenAI compatible, handy when an OpenAI key is not at hand.
    LLMModel::new("[groq] llama3-8b", "llama3-8b-8192", ModelProvider::Groq),
    LLMModel::new("[groq] llama3-70b", "llama3-70b-8192", ModelProvider::Groq),
  ]
}

pub static AVAILABLE_MODELS: OnceLock<Vec<LLMModel>> = OnceLock::new();

pub fn get_available_models() -> &'static [LLMModel] {
  AVAILABLE_MODELS.get_or_init(available_models_data).as_slice()
}

pub fn get_llm_order() -> Vec<(String, String, String)> {
  get_available_models().iter().map(|m| m.to_choice_tuple()).collect()
}

pub fn get_model(config: &LLMModelConfig) -> Result<Box<dyn LLMChatter>> {
  log::info!("Initializing LLM client for provider: {}, model: {}", config.provider,config.model_name);

  let api_key: &str = match config.api_key.as_deref() {
    Some(key) if !key.is_empty() => key,
    _ => return Err(anyhow!("No API key available for provider {}", config.provider)),
  };

  match config.provider {
    ModelProvider::OpenAI => {
      let client = OpenAIProvider::new(&config.model_name, api_key);
      return Ok(Box::new(client))
    }
    ModelProvider::Groq => {
      let client = GroqProvider::new(&config.model_name, api_key);
      return Ok(Box::new(client))
    }
  }
}
