use crate::research::data::models::TickerMetrics;

pub const MAX_FUNDAMENTAL_SCORE : i64 = 10;

/// One point per favorable ratio, ten rules, strict inequalities throughout.
/// A missing field contributes nothing and a value exactly at its threshold
/// earns no point.
pub fn calculate_fundamental_score(metrics: &TickerMetrics) -> i64 {
  let mut score: i64 = 0;

  if let Some(roe) = metrics.return_on_equity {
    if roe > 0.15 { score += 1; }
  }

  if let Some(roa) = metrics.return_on_assets {
    if roa > 0.10 { score += 1; }
  }

  if let Some(operating_margin) = metrics.operating_margin {
    if operating_margin > 0.15 { score += 1; }
  }

  if let Some(net_profit_margin) = metrics.net_profit_margin {
    if net_profit_margin > 0.12 { score += 1; }
  }

  if let Some(debt_to_equity) = metrics.debt_to_equity {
    if debt_to_equity < 1.0 { score += 1; }
  }

  if let Some(current_ratio) = metrics.current_ratio {
    if current_ratio > 1.5 { score += 1; }
  }

  if let Some(eps) = metrics.eps_ttm {
    if eps > 0.0 { score += 1; }
  }

  if let Some(peg) = metrics.peg_ratio {
    if peg < 2.0 { score += 1; }
  }

  if let Some(gross_margin) = metrics.gross_margin {
    if gross_margin > 0.4 { score += 1; }
  }

  if let Some(free_cash_flow) = metrics.free_cash_flow {
    if free_cash_flow > 0.0 { score += 1; }
  }

  return score;
}

#[cfg(test)]
mod tests {
  use super::*;

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

  #[test]
  fn every_favorable_field_scores_ten() {
    assert_eq!(calculate_fundamental_score(&favorable("AAA")), 10);
  }

  #[test]
  fn every_absent_field_scores_zero() {
    assert_eq!(calculate_fundamental_score(&TickerMetrics::empty("BBB")), 0);
  }

  #[test]
  fn values_exactly_at_their_threshold_earn_no_point() {
    let boundary = TickerMetrics {
      ticker: "EDGE".to_string(),
      return_on_equity: Some(0.15),
      return_on_assets: Some(0.10),
      eps_ttm: Some(0.0),
      debt_to_equity: Some(1.0),
      current_ratio: Some(1.5),
      operating_margin: Some(0.15),
      net_profit_margin: Some(0.12),
      peg_ratio: Some(2.0),
      gross_margin: Some(0.4),
      free_cash_flow: Some(0.0),
    };
    assert_eq!(calculate_fundamental_score(&boundary), 0);
  }

  #[test]
  fn rules_are_evaluated_independently() {
    let mut metrics = TickerMetrics::empty("CCC");
    metrics.return_on_equity = Some(0.20); // one favorable
    metrics.debt_to_equity = Some(3.0);    // one unfavorable
    metrics.current_ratio = None;          // one absent
    assert_eq!(calculate_fundamental_score(&metrics), 1);
  }

  #[test]
  fn unfavorable_negative_values_score_zero() {
    let mut metrics = TickerMetrics::empty("DDD");
    metrics.eps_ttm = Some(-2.5);
    metrics.free_cash_flow = Some(-100.0);
    assert_eq!(calculate_fundamental_score(&metrics), 0);
  }
}
