use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use serde::Serialize;
use polars::prelude::{DataFrame, NamedFrom, Series};

use crate::research::analysis::fundamentals::{calculate_fundamental_score, MAX_FUNDAMENTAL_SCORE};
use crate::research::analysis::owner_earnings::calculate_owner_earnings;
use crate::research::data::cache::MetricCache;
use crate::research::data::models::TickerMetrics;
use crate::research::tools::api::FundamentalsProvider;


#[derive(Debug, Clone, Serialize)]
pub struct TickerReport {
  pub metrics: TickerMetrics,
  pub fundamental_score: i64,
  pub max_score: i64,
  pub owner_earnings: Option<f64>,
}

/// Two tickers side by side, held only for the duration of one response.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonView {
  pub rows: Vec<TickerReport>,
}

impl ComparisonView {
  pub fn tickers(&self) -> Vec<String> {
    self.rows.iter().map(|row| row.metrics.ticker.clone()).collect()
  }
}

pub struct ComparisonOrchestrator {
  provider: Arc<dyn FundamentalsProvider>,
  cache: Arc<Mutex<MetricCache>>,
}

impl ComparisonOrchestrator {

  pub fn new(provider: Arc<dyn FundamentalsProvider>, cache: Arc<Mutex<MetricCache>>) -> Self {
    ComparisonOrchestrator { provider, cache }
  }

  /// Memoized per ticker: a repeat lookup within the session returns the
  /// cached record without a second provider call.
  pub async fn fetch_metrics(&self, ticker: &str) -> Result<TickerMetrics> {
    {
      let cache_guard = self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
      if let Some(record) = cache_guard.get_metrics(ticker) {
        log::info!("Returning metrics for ticker {} from cache.", ticker);
        return Ok(record);
      }
    }

    let record: TickerMetrics = self.provider.get_fundamentals(ticker).await.with_context(|| format!("Failed to fetch fundamentals for {}", ticker))?;

    let mut cache_guard = self.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    cache_guard.set_metrics(ticker, record.clone());
    log::info!("Metrics for ticker {} saved to cache.", ticker);

    return Ok(record);
  }

  /// Any lookup failure yields an unavailable estimate, never an error.
  pub async fn estimate_owner_earnings(&self, ticker: &str) -> Option<f64> {
    match self.provider.get_statements(ticker).await {
      Ok(statements) => calculate_owner_earnings(&statements),
      Err(e) => {
        log::warn!("Owner earnings unavailable for {}: {}", ticker, e);
        None
      }
    }
  }

  /// A failure on either ticker fails the whole comparison; partial results
  /// are not kept.
  pub async fn compare(&self, ticker1: &str, ticker2: &str) -> Result<ComparisonView> {
    let mut rows: Vec<TickerReport> = Vec::new();

    for ticker in [ticker1, ticker2] {
      log::info!("[Comparison] ({}) fetching fundamentals", ticker);
      let metrics: TickerMetrics = self.fetch_metrics(ticker).await?;

      log::info!("[Comparison] ({}) scoring fundamentals", ticker);
      let fundamental_score: i64 = calculate_fundamental_score(&metrics);

      log::info!("[Comparison] ({}) estimating owner earnings", ticker);
      let owner_earnings: Option<f64> = self.estimate_owner_earnings(ticker).await;

      rows.push(TickerReport {
        metrics,
        fundamental_score,
        max_score: MAX_FUNDAMENTAL_SCORE,
        owner_earnings,
      });
    }

    return Ok(ComparisonView { rows });
  }
}


/// The comparison rows as a DataFrame, one row per ticker with Ticker as the
/// row key, matching the side by side table the client renders.
pub fn comparison_to_df(view: &ComparisonView) -> Result<DataFrame> {
  let tickers: Vec<String> = view.rows.iter().map(|row| row.metrics.ticker.clone()).collect();
  let roe: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.return_on_equity).collect();
  let roa: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.return_on_assets).collect();
  let eps: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.eps_ttm).collect();
  let debt_to_equity: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.debt_to_equity).collect();
  let current_ratio: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.current_ratio).collect();
  let operating_margin: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.operating_margin).collect();
  let net_profit_margin: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.net_profit_margin).collect();
  let peg_ratio: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.peg_ratio).collect();
  let gross_margin: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.gross_margin).collect();
  let free_cash_flow: Vec<Option<f64>> = view.rows.iter().map(|row| row.metrics.free_cash_flow).collect();
  let scores: Vec<i64> = view.rows.iter().map(|row| row.fundamental_score).collect();
  let owner_earnings: Vec<Option<f64>> = view.rows.iter().map(|row| row.owner_earnings).collect();

  let df = DataFrame::new(vec![
    Series::new("Ticker",            &tickers),
    Series::new("ROE",               &roe),
    Series::new("ROA",               &roa),
    Series::new("EPS (TTM)",         &eps),
    Series::new("Debt/Equity",       &debt_to_equity),
    Series::new("Current Ratio",     &current_ratio),
    Series::new("Operating Margin",  &operating_margin),
    Series::new("Net Profit Margin", &net_profit_margin),
    Series::new("PEG Ratio",         &peg_ratio),
    Series::new("Gross Margin",      &gross_margin),
    Series::new("Free Cash Flow",    &free_cash_flow),
    Series::new("Fundamental Score", &scores),
    Series::new("Owner Earnings",    &owner_earnings),
  ])?;

  return Ok(df);
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::research::data::models::FinancialStatements;
  use anyhow::anyhow;
  use async_trait::async_trait;
  use std::sync::atomic::{AtomicUsize, Ordering};

  fn favorable(ticker: &str) -> TickerMetrics {
    TickerMetrics {
      ticker: ticker.to_string(),
      return_on_equity: Some(0.20),
      return_on_assets: Some(0.15),
      eps_ttm: Some(5.0),
      debt_to_equity: Some(0.5),
      current_ratio: Some(2.0),
      operating_margin: Some(0.20),
      net_profit_margin: Some(0.15),
      peg_ratio: Some(1.5),
      gross_margin: Some(0.5),
      free_cash_flow: Some(1000.0),
    }
  }

  // Stub provider: "AAA" is fully favorable, "BBB" has no data at all,
  // "BAD" fails outright. Fundamentals calls are counted so memoization is
  // observable.
  struct StubProvider {
    fundamentals_calls: AtomicUsize,
    statements: Option<FinancialStatements>,
  }

  impl StubProvider {
    fn new(statements: Option<FinancialStatements>) -> Self {
      StubProvider { fundamentals_calls: AtomicUsize::new(0), statements }
    }
  }

  #[async_trait]
  impl FundamentalsProvider for StubProvider {
    async fn get_fundamentals(&self, ticker: &str) -> Result<TickerMetrics> {
      self.fundamentals_calls.fetch_add(1, Ordering::SeqCst);
      match ticker {
        "BAD" => Err(anyhow!("provider rejected ticker")),
        "AAA" => Ok(favorable("AAA")),
        other => Ok(TickerMetrics::empty(other)),
      }
    }

    async fn get_statements(&self, _ticker: &str) -> Result<FinancialStatements> {
      match &self.statements {
        Some(statements) => Ok(statements.clone()),
        None => Err(anyhow!("no statements available")),
      }
    }
  }

  fn orchestrator_with(provider: Arc<StubProvider>) -> ComparisonOrchestrator {
    ComparisonOrchestrator::new(provider, Arc::new(Mutex::new(MetricCache::new())))
  }

  #[tokio::test]
  async fn fetch_metrics_hits_the_provider_once_per_ticker() {
    let provider = Arc::new(StubProvider::new(None));
    let orchestrator = orchestrator_with(provider.clone());

    let first: TickerMetrics = orchestrator.fetch_metrics("AAA").await.unwrap();
    let second: TickerMetrics = orchestrator.fetch_metrics("AAA").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(provider.fundamentals_calls.load(Ordering::SeqCst), 1);

    // A different ticker still goes upstream.
    let _ = orchestrator.fetch_metrics("BBB").await.unwrap();
    assert_eq!(provider.fundamentals_calls.load(Ordering::SeqCst), 2);
  }

  #[tokio::test]
  async fn a_preseeded_cache_avoids_the_provider_entirely() {
    let provider = Arc::new(StubProvider::new(None));
    let cache = Arc::new(Mutex::new(MetricCache::new()));
    cache.lock().unwrap().set_metrics("AAA", favorable("AAA"));

    let orchestrator = ComparisonOrchestrator::new(provider.clone(), cache);
    let record: TickerMetrics = orchestrator.fetch_metrics("AAA").await.unwrap();

    assert_eq!(record, favorable("AAA"));
    assert_eq!(provider.fundamentals_calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn comparing_a_favorable_and_an_empty_ticker() {
    let statements = FinancialStatements {
      net_income: Some(100.0),
      depreciation: Some(20.0),
      capital_expenditures: Some(30.0),
      total_current_assets: Some(50.0),
      total_current_liabilities: Some(40.0),
    };
    let provider = Arc::new(StubProvider::new(Some(statements)));
    let orchestrator = orchestrator_with(provider);

    let view: ComparisonView = orchestrator.compare("AAA", "BBB").await.unwrap();

    assert_eq!(view.tickers(), vec!["AAA".to_string(), "BBB".to_string()]);
    assert_eq!(view.rows[0].fundamental_score, 10);
    assert_eq!(view.rows[1].fundamental_score, 0);
    assert_eq!(view.rows[0].owner_earnings, Some(80.0));

    // The rendered table keeps both tickers as row keys.
    let df = comparison_to_df(&view).unwrap();
    assert_eq!(df.height(), 2);
    let ticker_column: Vec<Option<&str>> = df.column("Ticker").unwrap().str().unwrap().into_iter().collect();
    assert_eq!(ticker_column, vec![Some("AAA"), Some("BBB")]);
  }

  #[tokio::test]
  async fn owner_earnings_failures_become_unavailable_not_errors() {
    let provider = Arc::new(StubProvider::new(None)); // statements always fail
    let orchestrator = orchestrator_with(provider);

    let view: ComparisonView = orchestrator.compare("AAA", "BBB").await.unwrap();

    assert_eq!(view.rows[0].owner_earnings, None);
    assert_eq!(view.rows[1].owner_earnings, None);
  }

  #[tokio::test]
  async fn one_failing_ticker_fails_the_whole_comparison() {
    let provider = Arc::new(StubProvider::new(None));
    let orchestrator = orchestrator_with(provider);

    let result = orchestrator.compare("AAA", "BAD").await;
    assert!(result.is_err());
  }
}
