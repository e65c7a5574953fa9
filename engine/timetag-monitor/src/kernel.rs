//! External kernel boundary: byte-range clipping and correlation evaluation.
//!
//! The kernel owns record parsing and the histogram computation; this crate
//! treats it as a black box behind the `Kernel` trait and only decides which
//! byte ranges to feed it, and when.

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use thiserror::Error;

use crate::types::Cut;

/// Ask the kernel to auto-detect the record format (initial inspection).
pub const FORMAT_AUTODETECT: i32 = -1;

/// Named output buffers of one kernel evaluation.
///
/// Only the per-deployment `DeriveArrays` hook looks inside.
pub type KernelResult = HashMap<String, Vec<f64>>;

/// Failures inside the kernel boundary. The engine propagates these uncaught;
/// retry policy belongs to the scheduler driving the monitor.
#[derive(Debug, Error)]
pub enum KernelError {
  #[error("malformed record: {0}")]
  MalformedRecord(String),

  #[error("evaluation: {0}")]
  Evaluation(String),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}

/// The external correlation kernel.
pub trait Kernel {
  /// Opaque resumable evaluation state. Owned by the caller between polls,
  /// passed back by value, never introspected.
  type Context;

  /// Extend `modify_clip` by up to `read_events` complete records, blocking
  /// up to `wait_timeout` for the file to grow.
  ///
  /// - `modify_clip = None` reads from the start of the file.
  /// - `Ok(None)` means no complete new record appeared within the wait;
  ///   this is a normal outcome, not an error. `read_events == 0` always
  ///   yields it.
  /// - A returned cut covers at most `read_events` complete records (fewer
  ///   when the wait expires with some but not all of them available), never
  ///   a partial record, and never bytes before the end of `modify_clip`.
  fn clip_file(
    &mut self,
    path: &Path,
    modify_clip: Option<&Cut>,
    read_events: u64,
    format: i32,
    wait_timeout: Duration,
  ) -> Result<Option<Cut>, KernelError>;

  /// Evaluate the correlation program over the given input cuts, resuming
  /// from `resume` when present.
  fn evaluate(
    &mut self,
    inputs: &HashMap<String, Cut>,
    resume: Option<Self::Context>,
    group: &str,
  ) -> Result<(KernelResult, Self::Context), KernelError>;
}
