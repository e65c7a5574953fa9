//! Derives presentation summaries from kernel results.

use chrono::Utc;

use crate::config::MonitorConfig;
use crate::error::MonitorError;
use crate::kernel::KernelResult;
use crate::types::ResultSnapshot;

/// Per-deployment hook turning a raw kernel result into paired x/y arrays.
///
/// Which named buffers exist and how they combine into a plottable pair is
/// deployment-specific, so the monitor takes this as an injected strategy at
/// construction. `config` carries `bins` and `bin_factor` for the hook's use.
pub trait DeriveArrays {
  fn derive_arrays(
    &self,
    result: &KernelResult,
    config: &MonitorConfig,
  ) -> Result<(Vec<f64>, Vec<f64>), MonitorError>;
}

/// Failing placeholder for deployments that have not supplied a hook.
pub struct UnimplementedDerive;

impl DeriveArrays for UnimplementedDerive {
  fn derive_arrays(
    &self,
    _result: &KernelResult,
    _config: &MonitorConfig,
  ) -> Result<(Vec<f64>, Vec<f64>), MonitorError> {
    tracing::error!("derive_arrays must be supplied by the deployment");
    Err(MonitorError::DeriveUnimplemented)
  }
}

/// Run the hook and compute the derived scalars.
///
/// An empty y sequence is an error; a silent zero maximum would mask a
/// broken derivation upstream.
pub fn summarize(
  hook: &dyn DeriveArrays,
  result: &KernelResult,
  config: &MonitorConfig,
) -> Result<ResultSnapshot, MonitorError> {
  let (xdata, ydata) = hook.derive_arrays(result, config)?;

  if ydata.is_empty() {
    return Err(MonitorError::EmptySeries);
  }
  if xdata.len() != ydata.len() {
    return Err(MonitorError::LengthMismatch {
      xlen: xdata.len(),
      ylen: ydata.len(),
    });
  }

  let max_value = ydata.iter().copied().fold(f64::NEG_INFINITY, f64::max);
  Ok(ResultSnapshot {
    xdata,
    ydata,
    max_value,
    y_ceiling: max_value * 1.5,
    produced_at: Utc::now(),
  })
}
