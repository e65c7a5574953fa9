//! Timetag Monitor: incremental correlation results over a growing file.
//!
//! Watches a binary time-tag record file that an external writer keeps
//! appending to, feeding only newly arrived complete records to an external
//! correlation kernel and keeping a presentation-ready snapshot of the
//! latest result. Accumulation mode folds every new cut into the running
//! evaluation; align mode evaluates each new cut in isolation.
//!
//! Record decoding and the correlation computation live behind the `Kernel`
//! trait; this crate only decides which byte ranges to read, when, and what
//! to do with the results.

pub mod config;
pub mod cut;
pub mod engine;
pub mod error;
pub mod growth;
pub mod kernel;
pub mod persist;
pub mod summary;
pub mod types;

pub use config::MonitorConfig;
pub use engine::Monitor;
pub use error::MonitorError;
pub use kernel::{Kernel, KernelError, KernelResult, FORMAT_AUTODETECT};
pub use persist::save_data;
pub use summary::{summarize, DeriveArrays, UnimplementedDerive};
pub use types::{Cut, GrowthEstimate, Mode, ResultSnapshot};
