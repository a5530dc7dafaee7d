use crate::research::data::models::{
    FinancialStatements, QuoteSummaryResponse, QuoteSummaryResult, RawValue, TickerMetrics,
};
use crate::app::config::Config;


use reqwest::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::result::Result::{Ok, Err};


/// Seam for the market data lookups so the comparison pipeline can run
/// against a stub in tests. One call per ticker per method, no retry; a
/// failure here is the caller's to convert into a user visible message.
#[async_trait]
pub trait FundamentalsProvider : Send + Sync {
  async fn get_fundamentals(&self, ticker: &str) -> Result<TickerMetrics>;
  async fn get_statements(&self, ticker: &str) -> Result<FinancialStatements>;
}

// The info modules carry the ten ratio keys; the statement modules carry the
// owner earnings line items.
const INFO_MODULES : &'static str = "financialData,defaultKeyStatistics";
const STATEMENT_MODULES : &'static str = "incomeStatementHistory,cashflowStatementHistory,balanceSheetHistory";

pub struct YahooFinanceAPI {
  base_url : String,
  client : Client,
}

impl YahooFinanceAPI {
  pub fn new(config: &Config) -> Self {
    YahooFinanceAPI {
      base_url: config.market_data_base_url.clone(),
      client: Client::new(),
    }
  }

  fn default_headers(&self) -> HeaderMap {
    let mut headers: HeaderMap = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0 (compatible; AI-StockResearch/0.1)"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    return headers;
  }

  async fn quote_summary(&self, ticker: &str, modules: &str) -> Result<QuoteSummaryResult> {
    let url : String = format!("{}/v10/finance/quoteSummary/{}?modules={}", self.base_url, ticker, modules);
    log::debug!("Quote summary URL: {}", url);

    let response: Response = self.client.get(&url).headers(self.default_headers()).send().await?;

    if response.status().is_success() {
      let body : QuoteSummaryResponse = response.json().await?;
      let mut results: Vec<QuoteSummaryResult> = body.quote_summary.result.unwrap_or_default();

      if results.is_empty() {
        log::error!("Empty quoteSummary result for ticker {}", ticker);
        return Err(anyhow!("No data returned for ticker {}", ticker));
      }

      return Ok(results.remove(0));
    }
    else {
      log::error!("Error getting quote summary for ticker {} with status code: {}", ticker, response.status());
      return Err(anyhow!("Quote summary request for {} failed with status {}", ticker, response.status()));
    }
  }

  fn raw(value: Option<RawValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
  }

  // Fixed key mapping from the provider info structure to the metric record.
  // A missing upstream key stays None so scoring can tell "absent" apart
  // from "zero or unfavorable".
  pub fn metrics_from_summary(ticker: &str, summary: &QuoteSummaryResult) -> TickerMetrics {
    let financial = summary.financial_data.clone().unwrap_or_default();
    let statistics = summary.default_key_statistics.clone().unwrap_or_default();

    return TickerMetrics {
      ticker: ticker.to_string(),
      return_on_equity: Self::raw(financial.return_on_equity),
      return_on_assets: Self::raw(financial.return_on_assets),
      eps_ttm: Self::raw(statistics.trailing_eps),
      debt_to_equity: Self::raw(financial.debt_to_equity),
      current_ratio: Self::raw(financial.current_ratio),
      operating_margin: Self::raw(financial.operating_margins),
      net_profit_margin: Self::raw(financial.profit_margins),
      peg_ratio: Self::raw(statistics.peg_ratio),
      gross_margin: Self::raw(financial.gross_margins),
      free_cash_flow: Self::raw(financial.free_cashflow),
    };
  }

  // Most recent reporting period only, the first entry of each statement table.
  pub fn statements_from_summary(summary: &QuoteSummaryResult) -> FinancialStatements {
    let income = summary.income_statement_history.as_ref()
      .and_then(|history| history.income_statement_history.first().cloned())
      .unwrap_or_default();
    let cashflow = summary.cashflow_statement_history.as_ref()
      .and_then(|history| history.cashflow_statements.first().cloned())
      .unwrap_or_default();
    let balance = summary.balance_sheet_history.as_ref()
      .and_then(|history| history.balance_sheet_statements.first().cloned())
      .unwrap_or_default();

    return FinancialStatements {
      net_income: Self::raw(income.net_income),
      depreciation: Self::raw(cashflow.depreciation),
      capital_expenditures: Self::raw(cashflow.capital_expenditures),
      total_current_assets: Self::raw(balance.total_current_assets),
      total_current_liabilities: Self::raw(balance.total_current_liabilities),
    };
  }
}

#[async_trait]
impl FundamentalsProvider for YahooFinanceAPI {
  async fn get_fundamentals(&self, ticker: &str) -> Result<TickerMetrics> {
    log::info!("Fetching fundamentals for ticker {} from provider.", ticker);
    let summary: QuoteSummaryResult = self.quote_summary(ticker, INFO_MODULES).await?;
    return Ok(Self::metrics_from_summary(ticker, &summary));
  }

  async fn get_statements(&self, ticker: &str) -> Result<FinancialStatements> {
    log::info!("Fetching financial statements for ticker {} from provider.", ticker);
    let summary: QuoteSummaryResult = self.quote_summary(ticker, STATEMENT_MODULES).await?;
    return Ok(Self::statements_from_summary(&summary));
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn info_keys_map_to_the_metric_record() {
    let summary: QuoteSummaryResult = serde_json::from_value(json!({
      "financialData": {
        "returnOnEquity": {"raw": 0.2, "fmt": "20.00%"},
        "returnOnAssets": {"raw": 0.15},
        "debtToEquity": {"raw": 0.5},
        "currentRatio": {"raw": 2.0},
        "operatingMargins": {"raw": 0.2},
        "profitMargins": {"raw": 0.15},
        "grossMargins": {"raw": 0.5},
        "freeCashflow": {"raw": 1000.0}
      },
      "defaultKeyStatistics": {
        "trailingEps": {"raw": 5.0},
        "pegRatio": {"raw": 1.5}
      }
    })).unwrap();

    let metrics = YahooFinanceAPI::metrics_from_summary("AAA", &summary);

    assert_eq!(metrics.ticker, "AAA");
    assert_eq!(metrics.return_on_equity, Some(0.2));
    assert_eq!(metrics.return_on_assets, Some(0.15));
    assert_eq!(metrics.eps_ttm, Some(5.0));
    assert_eq!(metrics.debt_to_equity, Some(0.5));
    assert_eq!(metrics.current_ratio, Some(2.0));
    assert_eq!(metrics.operating_margin, Some(0.2));
    assert_eq!(metrics.net_profit_margin, Some(0.15));
    assert_eq!(metrics.peg_ratio, Some(1.5));
    assert_eq!(metrics.gross_margin, Some(0.5));
    assert_eq!(metrics.free_cash_flow, Some(1000.0));
  }

  #[test]
  fn missing_keys_stay_absent_not_zero() {
    // An empty wrapper object and a missing key both count as absent.
    let summary: QuoteSummaryResult = serde_json::from_value(json!({
      "financialData": {
        "returnOnEquity": {}
      }
    })).unwrap();

    let metrics = YahooFinanceAPI::metrics_from_summary("BBB", &summary);

    assert_eq!(metrics.return_on_equity, None);
    assert_eq!(metrics.eps_ttm, None);
    assert_eq!(metrics.free_cash_flow, None);
  }

  #[test]
  fn statements_read_the_first_period_only() {
    let summary: QuoteSummaryResult = serde_json::from_value(json!({
      "incomeStatementHistory": {
        "incomeStatementHistory": [
          {"netIncome": {"raw": 100.0}},
          {"netIncome": {"raw": 900.0}}
        ]
      },
      "cashflowStatementHistory": {
        "cashflowStatements": [
          {"depreciation": {"raw": 20.0}, "capitalExpenditures": {"raw": 30.0}}
        ]
      },
      "balanceSheetHistory": {
        "balanceSheetStatements": [
          {"totalCurrentAssets": {"raw": 50.0}, "totalCurrentLiabilities": {"raw": 40.0}}
        ]
      }
    })).unwrap();

    let statements = YahooFinanceAPI::statements_from_summary(&summary);

    assert_eq!(statements.net_income, Some(100.0));
    assert_eq!(statements.depreciation, Some(20.0));
    assert_eq!(statements.capital_expenditures, Some(30.0));
    assert_eq!(statements.total_current_assets, Some(50.0));
    assert_eq!(statements.total_current_liabilities, Some(40.0));
  }

  #[test]
  fn statements_with_no_periods_are_all_absent() {
    let summary: QuoteSummaryResult = serde_json::from_value(json!({})).unwrap();

    let statements = YahooFinanceAPI::statements_from_summary(&summary);

    assert_eq!(statements.net_income, None);
    assert_eq!(statements.depreciation, None);
    assert_eq!(statements.capital_expenditures, None);
    assert_eq!(statements.total_current_assets, None);
    assert_eq!(statements.total_current_liabilities, None);
  }
}
