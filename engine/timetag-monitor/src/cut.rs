//! Tracks the consumed byte-range boundary into the source file.

use std::path::Path;
use std::time::Duration;

use crate::error::MonitorError;
use crate::kernel::{Kernel, FORMAT_AUTODETECT};
use crate::types::Cut;

/// Owns the boundary between consumed and unconsumed bytes.
///
/// All clipping goes through the kernel; this tracker only enforces that the
/// boundary moves forward and never re-delivers consumed bytes.
#[derive(Debug, Default)]
pub struct CutTracker {
  current: Option<Cut>,
}

impl CutTracker {
  pub fn new() -> Self {
    Self { current: None }
  }

  /// The latest consumed cut, if any.
  pub fn current(&self) -> Option<&Cut> {
    self.current.as_ref()
  }

  /// Ask the kernel for up to `records` new complete records past the
  /// current boundary, waiting up to `wait` for the file to grow.
  ///
  /// Returns `Ok(None)` when no complete new record appeared in time; the
  /// boundary is unchanged in that case.
  pub fn advance<K: Kernel>(
    &mut self,
    kernel: &mut K,
    path: &Path,
    records: u64,
    wait: Duration,
  ) -> Result<Option<Cut>, MonitorError> {
    let clipped =
      kernel.clip_file(path, self.current.as_ref(), records, FORMAT_AUTODETECT, wait)?;
    let cut = match clipped {
      Some(c) => c,
      None => return Ok(None),
    };

    if let Some(prev) = &self.current {
      if cut.seek_offset < prev.end_offset() {
        return Err(MonitorError::OverlappingCut {
          expected: prev.end_offset(),
          got: cut.seek_offset,
        });
      }
    }

    self.current = Some(cut);
    Ok(Some(cut))
  }

  /// Re-read from the start of the file, replacing the boundary.
  ///
  /// Used for a full recomputation. By the time this runs the file is known
  /// to hold at least one complete record, so an empty clip is an error.
  pub fn restart<K: Kernel>(
    &mut self,
    kernel: &mut K,
    path: &Path,
    records: u64,
    wait: Duration,
  ) -> Result<Cut, MonitorError> {
    let cut = kernel
      .clip_file(path, None, records, FORMAT_AUTODETECT, wait)?
      .ok_or_else(|| MonitorError::NoCompleteRecords {
        path: path.display().to_string(),
      })?;
    self.current = Some(cut);
    Ok(cut)
  }
}
