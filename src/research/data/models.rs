use serde::{Serialize, Deserialize};


/// One fundamentals record per ticker. Every ratio is independently optional:
/// a key the provider does not serve stays None and is never coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerMetrics {
  pub ticker: String,
  pub return_on_equity: Option<f64>,
  pub return_on_assets: Option<f64>,
  pub eps_ttm: Option<f64>,
  pub debt_to_equity: Option<f64>,
  pub current_ratio: Option<f64>,
  pub operating_margin: Option<f64>,
  pub net_profit_margin: Option<f64>,
  pub peg_ratio: Option<f64>,
  pub gross_margin: Option<f64>,
  pub free_cash_flow: Option<f64>,
}

impl TickerMetrics {
  pub fn empty(ticker: &str) -> Self {
    TickerMetrics {
      ticker: ticker.to_string(),
      return_on_equity: None,
      return_on_assets: None,
      eps_ttm: None,
      debt_to_equity: None,
      current_ratio: None,
      operating_margin: None,
      net_profit_margin: None,
      peg_ratio: None,
      gross_margin: None,
      free_cash_flow: None,
    }
  }
}

/// The four statement line items behind the owner earnings estimate, read
/// from the most recent reporting period only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialStatements {
  pub net_income: Option<f64>,
  pub depreciation: Option<f64>,
  pub capital_expenditures: Option<f64>,
  pub total_current_assets: Option<f64>,
  pub total_current_liabilities: Option<f64>,
}


// --- quoteSummary wire shapes ---
// The provider wraps every number as {"raw": ..., "fmt": "..."}; only raw
// matters here. An empty object or a missing key both end up as None.

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RawValue {
  pub raw: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FinancialData {
  #[serde(rename = "returnOnEquity")]
  pub return_on_equity: Option<RawValue>,
  #[serde(rename = "returnOnAssets")]
  pub return_on_assets: Option<RawValue>,
  #[serde(rename = "debtToEquity")]
  pub debt_to_equity: Option<RawValue>,
  #[serde(rename = "currentRatio")]
  pub current_ratio: Option<RawValue>,
  #[serde(rename = "operatingMargins")]
  pub operating_margins: Option<RawValue>,
  #[serde(rename = "profitMargins")]
  pub profit_margins: Option<RawValue>,
  #[serde(rename = "grossMargins")]
  pub gross_margins: Option<RawValue>,
  #[serde(rename = "freeCashflow")]
  pub free_cashflow: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultKeyStatistics {
  #[serde(rename = "trailingEps")]
  pub trailing_eps: Option<RawValue>,
  #[serde(rename = "pegRatio")]
  pub peg_ratio: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatement {
  #[serde(rename = "netIncome")]
  pub net_income: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeStatementHistory {
  #[serde(rename = "incomeStatementHistory", default)]
  pub income_statement_history: Vec<IncomeStatement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashflowStatement {
  #[serde(rename = "depreciation")]
  pub depreciation: Option<RawValue>,
  #[serde(rename = "capitalExpenditures")]
  pub capital_expenditures: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashflowStatementHistory {
  #[serde(rename = "cashflowStatements", default)]
  pub cashflow_statements: Vec<CashflowStatement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetStatement {
  #[serde(rename = "totalCurrentAssets")]
  pub total_current_assets: Option<RawValue>,
  #[serde(rename = "totalCurrentLiabilities")]
  pub total_current_liabilities: Option<RawValue>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BalanceSheetHistory {
  #[serde(rename = "balanceSheetStatements", default)]
  pub balance_sheet_statements: Vec<BalanceSheetStatement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuoteSummaryResult {
  #[serde(rename = "financialData")]
  pub financial_data: Option<FinancialData>,
  #[serde(rename = "defaultKeyStatistics")]
  pub default_key_statistics: Option<DefaultKeyStatistics>,
  #[serde(rename = "incomeStatementHistory")]
  pub income_statement_history: Option<IncomeStatementHistory>,
  #[serde(rename = "cashflowStatementHistory")]
  pub cashflow_statement_history: Option<CashflowStatementHistory>,
  #[serde(rename = "balanceSheetHistory")]
  pub balance_sheet_history: Option<BalanceSheetHistory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummary {
  pub result: Option<Vec<QuoteSummaryResult>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuoteSummaryResponse {
  #[serde(rename = "quoteSummary")]
  pub quote_summary: QuoteSummary,
}
