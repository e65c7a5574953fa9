//! Structured error types for the monitor.

use thiserror::Error;

use crate::kernel::KernelError;

#[derive(Debug, Error)]
pub enum MonitorError {
  /// `update_poll` was called before a successful `run_full`.
  #[error("not initialized: run_full must succeed before update_poll")]
  NotInitialized,

  #[error("derive_arrays must be supplied by the deployment")]
  DeriveUnimplemented,

  #[error("summary: ydata is empty")]
  EmptySeries,

  #[error("xdata has {xlen} entries but ydata has {ylen}")]
  LengthMismatch { xlen: usize, ylen: usize },

  #[error("no complete records in {path}")]
  NoCompleteRecords { path: String },

  /// The kernel returned a cut re-covering already-consumed bytes.
  #[error("cut overlap: expected start at or past byte {expected}, got {got}")]
  OverlappingCut { expected: u64, got: u64 },

  #[error("kernel: {0}")]
  Kernel(#[from] KernelError),

  #[error("io: {0}")]
  Io(#[from] std::io::Error),
}
