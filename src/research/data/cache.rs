use std::collections::HashMap;

use crate::research::data::models::TickerMetrics;

/// Session scoped ticker -> fundamentals map. Owned by the comparison
/// orchestrator and passed by handle so tests can seed or swap it; there is
/// deliberately no process wide instance, no invalidation and no TTL.
pub struct MetricCache {
  metric_cache: HashMap<String, TickerMetrics>,
}

impl MetricCache {
  pub fn new() -> Self {
    MetricCache {
      metric_cache: HashMap::new(),
    }
  }

  pub fn get_metrics(&self, ticker: &str) -> Option<TickerMetrics> {
    match self.metric_cache.get(ticker) {
      Some(record) => Some(record.clone()),
      None => {
        log::info!("Metrics not found in cache for ticker: {}", ticker);
        None
      }
    }
  }

  pub fn set_metrics(&mut self, ticker: &str, record: TickerMetrics) {
    self.metric_cache.insert(ticker.to_string(), record);
  }

  pub fn len(&self) -> usize {
    self.metric_cache.len()
  }

  pub fn is_empty(&self) -> bool {
    self.metric_cache.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn stores_and_returns_records_by_ticker() {
    let mut cache = MetricCache::new();
    assert!(cache.is_empty());
    assert!(cache.get_metrics("TCS.NS").is_none());

    let record = TickerMetrics::empty("TCS.NS");
    cache.set_metrics("TCS.NS", record.clone());

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get_metrics("TCS.NS"), Some(record));
    assert!(cache.get_metrics("INFY.NS").is_none());
  }

  #[test]
  fn a_second_set_replaces_the_record() {
    let mut cache = MetricCache::new();
    cache.set_metrics("INFY.NS", TickerMetrics::empty("INFY.NS"));

    let mut updated = TickerMetrics::empty("INFY.NS");
    updated.return_on_equity = Some(0.25);
    cache.set_metrics("INFY.NS", updated.clone());

    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get_metrics("INFY.NS"), Some(updated));
  }
}
