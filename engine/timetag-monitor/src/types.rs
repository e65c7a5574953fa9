//! Core types for the monitor (data model + derived summaries).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Cut (consumed byte-range boundary)
// ---------------------------------------------------------------------------

/// A contiguous byte range of the source file holding complete records.
///
/// Immutable once created. A successful advance produces a cut that starts
/// exactly where the previous one ended; a cut's byte range is never re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cut {
  /// Byte offset where this cut's records begin.
  pub seek_offset: u64,
  /// Size of one record in bytes.
  pub record_bytes: u64,
  /// Number of complete records covered.
  pub record_count: u64,
}

impl Cut {
  /// First byte offset past this cut.
  pub fn end_offset(&self) -> u64 {
    self.seek_offset + self.record_bytes * self.record_count
  }
}

// ---------------------------------------------------------------------------
// Evaluation mode
// ---------------------------------------------------------------------------

/// How each poll treats the stored evaluation context.
///
/// Mutated only by explicit setter/toggle calls; a change applies to the
/// next poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Fold each new cut into the stored context.
  Accumulation,
  /// Evaluate each new cut in isolation, discarding cumulative history.
  Align,
}

impl Mode {
  pub fn toggled(self) -> Self {
    match self {
      Self::Accumulation => Self::Align,
      Self::Align => Self::Accumulation,
    }
  }
}

// ---------------------------------------------------------------------------
// Result snapshot
// ---------------------------------------------------------------------------

/// Presentation-ready summary of the latest kernel result.
///
/// Recomputed wholesale on every successful run/update, never patched.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultSnapshot {
  pub xdata: Vec<f64>,
  pub ydata: Vec<f64>,
  /// Maximum of `ydata`.
  pub max_value: f64,
  /// Scaled axis ceiling: 1.5 x `max_value`.
  pub y_ceiling: f64,
  /// When this snapshot was produced.
  pub produced_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Growth estimate
// ---------------------------------------------------------------------------

/// One-shot growth calibration result.
///
/// Never created when the poll size comes from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GrowthEstimate {
  pub bytes_per_second: f64,
  pub records_per_second: f64,
  /// Recommended records per poll; zero when the file is not growing.
  pub records_per_cut: u64,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn cut_end_offset() {
    let cut = Cut {
      seek_offset: 40,
      record_bytes: 10,
      record_count: 6,
    };
    assert_eq!(cut.end_offset(), 100);
  }

  #[test]
  fn empty_cut_ends_where_it_starts() {
    let cut = Cut {
      seek_offset: 40,
      record_bytes: 10,
      record_count: 0,
    };
    assert_eq!(cut.end_offset(), 40);
  }

  #[test]
  fn mode_toggles_both_ways() {
    assert_eq!(Mode::Accumulation.toggled(), Mode::Align);
    assert_eq!(Mode::Align.toggled(), Mode::Accumulation);
  }

  #[test]
  fn mode_serializes_lowercase() {
    assert_eq!(
      serde_json::to_string(&Mode::Accumulation).unwrap(),
      r#""accumulation""#
    );
    assert_eq!(serde_json::to_string(&Mode::Align).unwrap(), r#""align""#);
  }
}
