use std::result::Result::{Ok};
use std::sync::Arc;
use std::collections::HashMap;
use anyhow::{anyhow, Error};
use serde_json::Value;

use crate::app::services::research_service::{NewsSummary, ResearchService, StockComparison};

pub struct ResearchController {
  services : Arc<ResearchService>
}

impl ResearchController {
  pub fn new(services: Arc<ResearchService>) -> Self {
    ResearchController {services: services}
  }

  pub async fn get_available_models(&self) -> Result<Vec<HashMap<String, String>>, Error> {
    let models = match self.services.get_available_models() {
      Ok(models) => models,
      Err(e) => {
        let empty: Vec<HashMap<String, String>> = Vec::new();
        log::error!("Cannot list the available models with error: {}", e);
        empty
      },
    };
    return Ok(models);
  }

  // A missing credential disables the feature instead of erroring; the
  // response says so without leaking anything about the key.
  fn disabled_response() -> Value {
    serde_json::json!({
      "disabled": true,
      "message": "No language model API key available. Supply api_key with the request or configure one in the environment.",
    })
  }

  pub async fn summarize_report(&self, pdf_bytes: &[u8], api_key: Option<&str>, model_name: Option<&str>, model_provider: Option<&str>) -> Result<Value, Error> {
    match self.services.summarize_report(pdf_bytes, api_key, model_name, model_provider).await {
      Ok(Some(summary)) => Ok(serde_json::json!({ "summary": summary })),
      Ok(None) => Ok(Self::disabled_response()),
      Err(e) => {
        log::error!("Report summary failed: {}", e);
        Err(anyhow!("LLM error: {}", e))
      }
    }
  }

  pub async fn answer_report_question(&self, pdf_bytes: &[u8], question: &str, api_key: Option<&str>, model_name: Option<&str>, model_provider: Option<&str>) -> Result<Value, Error> {
    match self.services.answer_report_question(pdf_bytes, question, api_key, model_name, model_provider).await {
      Ok(Some(answer)) => Ok(serde_json::json!({ "answer": answer })),
      Ok(None) => Ok(Self::disabled_response()),
      Err(e) => {
        log::error!("Report question failed: {}", e);
        Err(anyhow!("LLM error: {}", e))
      }
    }
  }

  pub async fn summarize_news(&self, query: &str, api_key: Option<&str>, model_name: Option<&str>, model_provider: Option<&str>) -> Result<Value, Error> {
    match self.services.summarize_news(query, api_key, model_name, model_provider).await {
      Ok(Some(news)) => {
        let news: NewsSummary = news;
        Ok(serde_json::json!({
          "summary": news.summary,
          "news_link": news.news_link,
          "generated_at": news.generated_at,
        }))
      }
      Ok(None) => Ok(Self::disabled_response()),
      Err(e) => {
        log::error!("News summary failed: {}", e);
        Err(anyhow!("LLM error: {}", e))
      }
    }
  }

  pub async fn compare_stocks(&self, ticker1: &str, ticker2: &str) -> Result<Value, Error> {
    match self.services.compare_stocks(ticker1, ticker2).await {
      Ok(comparison) => {
        let comparison: StockComparison = comparison;
        Ok(serde_json::to_value(comparison)?)
      }
      Err(e) => {
        log::error!("Stock comparison failed for {} vs {}: {}", ticker1, ticker2, e);
        Err(anyhow!("Error comparing stocks: {}", e))
      }
    }
  }

}
