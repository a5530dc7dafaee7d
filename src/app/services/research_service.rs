use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Error, Result};
use chrono::Local;
use serde::Serialize;

use crate::app::config::Config;
use crate::research::analysis::comparison::{comparison_to_df, ComparisonOrchestrator, ComparisonView, TickerReport};
use crate::research::data::cache::MetricCache;
use crate::research::llm::model_provider::{ChatMessage, LLMModelConfig, ModelProvider};
use crate::research::llm::models::{get_available_models, get_model};
use crate::research::report::extract::{extract_report_text, truncate_for_prompt};
use crate::research::report::prompts;
use crate::research::tools::api::YahooFinanceAPI;


#[derive(Debug, Clone, Serialize)]
pub struct NewsSummary {
  pub summary: String,
  pub news_link: String,
  pub generated_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockComparison {
  pub rows: Vec<TickerReport>,
  pub table: String,
}

pub struct ResearchService {
  config : Config,
  orchestrator : ComparisonOrchestrator,
}

impl ResearchService {

  pub fn new(config: Config) -> Self {
    let provider: Arc<YahooFinanceAPI> = Arc::new(YahooFinanceAPI::new(&config));
    // The cache is owned here and handed to the orchestrator; it lives for
    // the process and is never persisted.
    let cache: Arc<Mutex<MetricCache>> = Arc::new(Mutex::new(MetricCache::new()));
    let orchestrator: ComparisonOrchestrator = ComparisonOrchestrator::new(provider, cache);
    ResearchService { config, orchestrator }
  }

  pub fn get_available_models(&self) -> Result<Vec<HashMap<String, String>>, Error> {
    let models = get_available_models().iter().map(|model| {
      let mut map = HashMap::new();
      map.insert("display_name".to_string(), model.display_name.clone());
      map.insert("model_name".to_string(), model.model_name.clone());
      map.insert("provider".to_string(), model.provider.to_string());
      map
    }).collect();

    return Ok(models);
  }

  // A request supplied key wins over the configured one. None means neither
  // is present, so the LLM backed feature stays disabled for this call.
  fn resolve_api_key(&self, request_key: Option<&str>, provider: &ModelProvider) -> Option<String> {
    if let Some(key) = request_key {
      if !key.is_empty() {
        return Some(key.to_string());
      }
    }

    let configured: &str = match provider {
      ModelProvider::OpenAI => self.config.openai_api_key.as_str(),
      ModelProvider::Groq => self.config.groq_api_key.as_str(),
    };

    if configured.is_empty() {
      return None;
    }
    return Some(configured.to_string());
  }

  fn llm_config(&self, request_key: Option<&str>, model_name: Option<&str>, model_provider: Option<&str>) -> Result<Option<LLMModelConfig>, Error> {
    let model_name : &str = model_name.unwrap_or("gpt-4");
    let provider_name : &str = model_provider.unwrap_or("OpenAI");

    let provider : ModelProvider = ModelProvider::from_str(provider_name).map_err(|_| anyhow!("Unknown model provider: {}", provider_name))?;

    let api_key : Option<String> = self.resolve_api_key(request_key, &provider);
    if api_key.is_none() {
      return Ok(None);
    }

    return Ok(Some(LLMModelConfig {
      provider: provider,
      model_name: model_name.to_string(),
      api_key: api_key,
      base_url: None,
      temperature: None,
      max_tokens: None,
      top_p: None,
    }));
  }

  async fn run_chat(&self, messages: Vec<ChatMessage>, llm_config: &LLMModelConfig) -> Result<String, Error> {
    let client = get_model(llm_config)?;
    let response = client.chat(messages, llm_config).await?;
    return Ok(response.content);
  }

  /// Summarize an uploaded report. Ok(None) means the feature is disabled
  /// because no API key is available.
  pub async fn summarize_report(&self, pdf_bytes: &[u8], request_key: Option<&str>, model_name: Option<&str>, model_provider: Option<&str>) -> Result<Option<String>, Error> {
    let llm_config = match self.llm_config(request_key, model_name, model_provider)? {
      Some(config) => config,
      None => {
        log::info!("No LLM API key available, report summary stays disabled.");
        return Ok(None);
      }
    };

    let report_text: String = extract_report_text(pdf_bytes)?;
    let truncated: String = truncate_for_prompt(&report_text);

    log::info!("Summarizing report ({} prompt characters).", truncated.chars().count());
    let summary: String = self.run_chat(prompts::summary_messages(&truncated), &llm_config).await?;
    return Ok(Some(summary));
  }

  /// Answer a free text question about an uploaded report. The document is
  /// re-received per question; nothing is kept between requests.
  pub async fn answer_report_question(&self, pdf_bytes: &[u8], question: &str, request_key: Option<&str>, model_name: Option<&str>, model_provider: Option<&str>) -> Result<Option<String>, Error> {
    let llm_config = match self.llm_config(request_key, model_name, model_provider)? {
      Some(config) => config,
      None => {
        log::info!("No LLM API key available, report questions stay disabled.");
        return Ok(None);
      }
    };

    let report_text: String = extract_report_text(pdf_bytes)?;
    let truncated: String = truncate_for_prompt(&report_text);

    log::info!("Answering a report question ({} prompt characters).", truncated.chars().count());
    let answer: String = self.run_chat(prompts::question_messages(&truncated, question), &llm_config).await?;
    return Ok(Some(answer));
  }

  pub async fn summarize_news(&self, query: &str, request_key: Option<&str>, model_name: Option<&str>, model_provider: Option<&str>) -> Result<Option<NewsSummary>, Error> {
    let llm_config = match self.llm_config(request_key, model_name, model_provider)? {
      Some(config) => config,
      None => {
        log::info!("No LLM API key available, news summary stays disabled.");
        return Ok(None);
      }
    };

    log::info!("Summarizing news for keyword: {}", query);
    let summary: String = self.run_chat(prompts::news_messages(query), &llm_config).await?;

    return Ok(Some(NewsSummary {
      summary: summary,
      news_link: prompts::news_search_link(query),
      generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }));
  }

  pub async fn compare_stocks(&self, ticker1: &str, ticker2: &str) -> Result<StockComparison, Error> {
    let view: ComparisonView = self.orchestrator.compare(ticker1, ticker2).await?;

    let df = comparison_to_df(&view)?;
    let table: String = format!("{}", df);

    return Ok(StockComparison { rows: view.rows, table });
  }

}
