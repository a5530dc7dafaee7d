use std::env;

use log;

#[derive(Clone)]
pub struct Config {
  pub openai_api_key: String,
  pub groq_api_key : String,
  pub market_data_base_url : String,
}

impl Config {

  pub fn load() -> Self {
    match dotenv::dotenv() {
      Ok(_) => log::info!("Loaded .env file"),
      Err(_) => log::error!("No .env file found"),
    }

    // An empty key keeps the LLM backed features disabled instead of failing
    // the whole process. Keys live in memory only and are never logged.
    let openai_api_key: String = env::var("OPENAI_API_KEY").unwrap_or_else(|_| {
      log::warn!("OPENAI_API_KEY not set, LLM features stay disabled until a key is supplied per request");
      String::new()
    });
    let groq_api_key : String = env::var("GROQ_API_KEY").unwrap_or_else(|_| {
      log::warn!("GROQ_API_KEY not set, the Groq provider needs a per request key");
      String::new()
    });

    let market_data_base_url : String = env::var("MARKET_DATA_BASE_URL").unwrap_or_else(|_| {
      "https://query1.finance.yahoo.com".to_string()
    });

    return Config {
      openai_api_key, groq_api_key, market_data_base_url
    }
  }

}
