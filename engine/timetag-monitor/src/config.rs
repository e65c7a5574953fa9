//! Monitor configuration with sane defaults.

use serde::Deserialize;

/// Tunables for the incremental monitor.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
  /// Histogram bin count. Passed through to the derive hook, not
  /// interpreted here.
  pub bins: usize,
  /// Multiplication factor per bin. Passed through to the derive hook.
  pub bin_factor: f64,
  /// Records to request per poll. When unset, calibrated once from the
  /// observed growth rate at construction.
  pub records_per_cut: Option<u64>,
  /// Poll sizing window in seconds.
  pub interval: f64,
  /// Max wait for new data per poll, in seconds.
  pub timeout: f64,
  /// Treat `records_per_cut` as immediately available instead of inspecting
  /// the on-disk size. For testing/demo against a file that is not actually
  /// growing.
  pub simulate_growth: bool,
}

impl Default for MonitorConfig {
  fn default() -> Self {
    Self {
      bins: 1000,
      bin_factor: 1.0,
      records_per_cut: None,
      interval: 0.1,
      timeout: 0.2,
      simulate_growth: false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_sane() {
    let config = MonitorConfig::default();
    assert_eq!(config.bins, 1000);
    assert!(config.records_per_cut.is_none());
    assert!((config.interval - 0.1).abs() < f64::EPSILON);
    assert!((config.timeout - 0.2).abs() < f64::EPSILON);
    assert!(!config.simulate_growth);
  }

  #[test]
  fn partial_json_fills_defaults() {
    let config: MonitorConfig =
      serde_json::from_str(r#"{"records_per_cut": 64, "bin_factor": 2.5}"#).unwrap();
    assert_eq!(config.records_per_cut, Some(64));
    assert!((config.bin_factor - 2.5).abs() < f64::EPSILON);
    assert_eq!(config.bins, 1000);
    assert!(!config.simulate_growth);
  }
}
