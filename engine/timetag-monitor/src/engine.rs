//! Orchestrates full runs and incremental updates over a growing file.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::config::MonitorConfig;
use crate::cut::CutTracker;
use crate::error::MonitorError;
use crate::growth;
use crate::kernel::{Kernel, FORMAT_AUTODETECT};
use crate::summary::{self, DeriveArrays};
use crate::types::{Cut, GrowthEstimate, Mode, ResultSnapshot};

/// Input channel name fed to the kernel.
const INPUT_CHANNEL: &str = "timetagger1";

/// Fixed calibration window for growth estimation, independent of the
/// configured poll interval.
const GROWTH_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Maximum wait for the full-range clip of a fresh run.
const FULL_RUN_WAIT: Duration = Duration::from_millis(500);

/// Long-lived incremental monitor over one growing source file.
///
/// Construction probes the file once for record geometry and, unless a poll
/// size is configured, calibrates one from the observed growth rate. After
/// that an external scheduler drives it: `run_full` once, then `update_poll`
/// at whatever cadence it likes. Both waits here are synchronous blocking
/// waits; run them off any shared event loop's critical path.
pub struct Monitor<K: Kernel> {
  config: MonitorConfig,
  file: PathBuf,
  group: String,
  kernel: K,
  derive: Box<dyn DeriveArrays>,

  tracker: CutTracker,
  context: Option<K::Context>,
  mode: Mode,
  snapshot: Option<ResultSnapshot>,
  started: bool,

  /// Size of one record, learned from the inspection probe.
  record_bytes: u64,
  /// Byte offset where records begin (end of any file header).
  header_offset: u64,
  records_per_cut: u64,
  growth: Option<GrowthEstimate>,
}

impl<K: Kernel> std::fmt::Debug for Monitor<K> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Monitor")
      .field("file", &self.file)
      .field("group", &self.group)
      .field("mode", &self.mode)
      .field("started", &self.started)
      .field("record_bytes", &self.record_bytes)
      .field("header_offset", &self.header_offset)
      .field("records_per_cut", &self.records_per_cut)
      .finish_non_exhaustive()
  }
}

impl<K: Kernel> Monitor<K> {
  /// Open a monitor over `file`, probing it for record geometry.
  ///
  /// Fails when the file does not yet hold a single complete record. When
  /// no poll size is configured this blocks for the one-second calibration
  /// window.
  pub fn new(
    file: impl Into<PathBuf>,
    group: impl Into<String>,
    config: MonitorConfig,
    mut kernel: K,
    derive: Box<dyn DeriveArrays>,
  ) -> Result<Self, MonitorError> {
    let file = file.into();

    let probe = kernel
      .clip_file(&file, None, 1, FORMAT_AUTODETECT, Duration::ZERO)?
      .ok_or_else(|| MonitorError::NoCompleteRecords {
        path: file.display().to_string(),
      })?;

    let mut growth_estimate = None;
    let records_per_cut = match config.records_per_cut {
      Some(n) => n,
      None => {
        let est = growth::estimate(
          &file,
          probe.record_bytes,
          GROWTH_SAMPLE_WINDOW,
          config.interval,
        )?;
        growth_estimate = Some(est);
        est.records_per_cut
      }
    };

    if config.simulate_growth {
      info!("simulated growth is active");
    }

    Ok(Self {
      config,
      file,
      group: group.into(),
      kernel,
      derive,
      tracker: CutTracker::new(),
      context: None,
      mode: Mode::Accumulation,
      snapshot: None,
      started: false,
      record_bytes: probe.record_bytes,
      header_offset: probe.seek_offset,
      records_per_cut,
      growth: growth_estimate,
    })
  }

  /// Recompute from the start of the file over every complete record
  /// currently on disk.
  ///
  /// Discards any prior evaluation context. Must succeed once before
  /// `update_poll` may be called; calling it again later starts a fresh
  /// accumulation session.
  pub fn run_full(&mut self) -> Result<&ResultSnapshot, MonitorError> {
    let existing = self.existing_records()?;
    let cut = self
      .tracker
      .restart(&mut self.kernel, &self.file, existing, FULL_RUN_WAIT)?;

    self.context = None;
    let (result, context) = self.evaluate(cut, None)?;
    self.context = Some(context);

    let snapshot = summary::summarize(self.derive.as_ref(), &result, &self.config)?;
    self.started = true;
    Ok(self.snapshot.insert(snapshot))
  }

  /// Poll once for new records and fold them into the result.
  ///
  /// `Ok(None)` means the file has not grown by a single complete record
  /// within the timeout; snapshot, context and cut are all unchanged. This
  /// is the expected steady-state outcome between writes, not an error.
  pub fn update_poll(&mut self) -> Result<Option<&ResultSnapshot>, MonitorError> {
    if !self.started {
      return Err(MonitorError::NotInitialized);
    }

    let wait = Duration::from_secs_f64(self.config.timeout);
    let cut = match self
      .tracker
      .advance(&mut self.kernel, &self.file, self.records_per_cut, wait)?
    {
      Some(c) => c,
      None => return Ok(None),
    };

    info!(records = cut.record_count, "new data available for the next block");

    let resume = match self.mode {
      Mode::Accumulation => self.context.take(),
      Mode::Align => {
        // Cumulative history is discarded; the new cut stands alone.
        self.context = None;
        None
      }
    };

    let (result, context) = self.evaluate(cut, resume)?;
    self.context = Some(context);

    let snapshot = summary::summarize(self.derive.as_ref(), &result, &self.config)?;
    Ok(Some(self.snapshot.insert(snapshot)))
  }

  fn evaluate(
    &mut self,
    cut: Cut,
    resume: Option<K::Context>,
  ) -> Result<(crate::kernel::KernelResult, K::Context), MonitorError> {
    let mut inputs = HashMap::new();
    inputs.insert(INPUT_CHANNEL.to_string(), cut);
    Ok(self.kernel.evaluate(&inputs, resume, &self.group)?)
  }

  /// Complete records currently on disk (or the simulated count).
  fn existing_records(&self) -> Result<u64, MonitorError> {
    if self.config.simulate_growth {
      return Ok(self.records_per_cut);
    }
    let size = fs::metadata(&self.file)?.len();
    Ok(size.saturating_sub(self.header_offset) / self.record_bytes)
  }

  pub fn mode(&self) -> Mode {
    self.mode
  }

  pub fn set_accumulation_mode(&mut self) {
    self.mode = Mode::Accumulation;
  }

  pub fn set_alignment_mode(&mut self) {
    self.mode = Mode::Align;
  }

  /// Flip between the two modes; takes effect on the next poll.
  pub fn toggle_mode(&mut self) {
    self.mode = self.mode.toggled();
  }

  /// The last successfully computed snapshot, if any.
  pub fn snapshot(&self) -> Option<&ResultSnapshot> {
    self.snapshot.as_ref()
  }

  /// The consumed boundary into the source file.
  pub fn current_cut(&self) -> Option<&Cut> {
    self.tracker.current()
  }

  /// The calibration result, when one was taken.
  pub fn growth(&self) -> Option<&GrowthEstimate> {
    self.growth.as_ref()
  }

  pub fn records_per_cut(&self) -> u64 {
    self.records_per_cut
  }
}
