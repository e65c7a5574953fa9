//! One-shot growth-rate calibration by sampling the source file size.

use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::error::MonitorError;
use crate::types::GrowthEstimate;

impl GrowthEstimate {
  /// Derive an estimate from two size samples taken `elapsed_secs` apart.
  ///
  /// A shrinking file counts as zero growth. The recommended poll size is
  /// floor(records per second x poll interval).
  pub fn from_samples(
    size_before: u64,
    size_after: u64,
    elapsed_secs: f64,
    record_bytes: u64,
    poll_interval_secs: f64,
  ) -> Self {
    let grown = size_after.saturating_sub(size_before) as f64;
    let bytes_per_second = grown / elapsed_secs;
    let records_per_second = bytes_per_second / record_bytes as f64;
    let records_per_cut = (records_per_second * poll_interval_secs).floor() as u64;
    Self {
      bytes_per_second,
      records_per_second,
      records_per_cut,
    }
  }
}

/// Sample the file size twice, `sample_window` apart, and derive the growth
/// rate and the recommended records-per-poll.
///
/// Blocks for the whole window. Results are inherently noisy since they
/// depend on real elapsed time; zero is a valid outcome for a file that is
/// not currently growing, and callers must then tolerate polls that yield
/// no new data indefinitely.
pub fn estimate(
  path: &Path,
  record_bytes: u64,
  sample_window: Duration,
  poll_interval_secs: f64,
) -> Result<GrowthEstimate, MonitorError> {
  info!(path = %path.display(), "estimating file growth");
  let size_before = fs::metadata(path)?.len();
  thread::sleep(sample_window);
  let size_after = fs::metadata(path)?.len();

  let estimate = GrowthEstimate::from_samples(
    size_before,
    size_after,
    sample_window.as_secs_f64(),
    record_bytes,
    poll_interval_secs,
  );
  info!(
    records_per_second = estimate.records_per_second,
    records_per_cut = estimate.records_per_cut,
    "growth estimation done"
  );
  Ok(estimate)
}
