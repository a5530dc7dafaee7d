use crate::research::data::models::FinancialStatements;

/// Owner Earnings = Net Income + Depreciation - Capital Expenditures - Working Capital.
/// The working capital term is the point in time level (total current assets
/// minus total current liabilities), not a period over period delta. Any
/// missing line item makes the whole estimate unavailable.
pub fn calculate_owner_earnings(statements: &FinancialStatements) -> Option<f64> {
  match (statements.net_income,
        statements.depreciation,
        statements.capital_expenditures,
        working_capital(statements)) {
    (Some(net_income), Some(depreciation), Some(capex), Some(working_capital)) => {
      Some(net_income + depreciation - capex - working_capital)
    }
    _ => None,
  }
}

fn working_capital(statements: &FinancialStatements) -> Option<f64> {
  match (statements.total_current_assets, statements.total_current_liabilities) {
    (Some(assets), Some(liabilities)) => Some(assets - liabilities),
    _ => None,
  }
}
