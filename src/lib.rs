//! # Sample Logger
//!
//! A bounded, row/column-organized sample buffer for measurement and
//! simulation runs:
//!
//! * **Capacity-bounded**: one allocation up front, never grown; an
//!   over-full log is an error, not a surprise
//! * **Row-major**: each row is one sample window (typically a time step),
//!   each column one sampled quantity
//! * **Persistable**: delimited text dumps, MATLAB/Octave-loadable ASCII
//!   matrices, and a compact binary format with a lossless round trip back
//!   into memory
//!
//! ## Key Features
//!
//! * Generic over any element type that renders to text and converts
//!   to/from a 64-bit float (the [`Sample`] trait)
//! * Two initialization paths: by byte budget or by row/column counts
//! * Chained appends with explicit row-fill control
//! * Checked and unchecked indexed access over the flat store
//!
//! ## Main Components
//!
//! * [`SampleLogger`]: the core capacity-bounded log with its text and
//!   binary persistence paths
//! * [`Sample`]: capability bound for loggable element types
//! * [`LoggerError`]: unified error type for every fallible operation
//!
//! ## Quick Start
//!
//! ```
//! use sample_logger::SampleLogger;
//!
//! # fn main() -> sample_logger::Result<()> {
//! // Three time steps of (time, voltage, current).
//! let mut log = SampleLogger::<f64>::new();
//! log.initialize_by_row_column(3, 3)?;
//!
//! // First row all zeros for t = 0, then one row per step.
//! log.fill_current_row(0.0)?;
//! log.push(1.0e-6)?.push(11.93)?.push(0.48)?;
//! log.push(2.0e-6)?.push(11.72)?.push(0.95)?;
//! assert!(log.is_full());
//!
//! // Persist and reload.
//! let dir = tempfile::tempdir().unwrap();
//! let titles = vec!["Time (s)".to_owned(), "V (V)".to_owned(), "I (A)".to_owned()];
//! log.dump_to_bin_file(dir.path().join("run.bin"), &titles)?;
//!
//! let mut reloaded = SampleLogger::<f64>::new();
//! let loaded_titles = reloaded.load_from_bin_file(dir.path().join("run.bin"))?;
//! assert_eq!(loaded_titles, titles);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency
//!
//! A logger is a single-threaded object: no operation is designed for
//! concurrent invocation, and callers sharing an instance across threads
//! must serialize access themselves.

mod bin_format;
pub mod error;
pub mod sample;
pub mod sample_logger;

pub use error::{LoggerError, Result};
pub use sample::Sample;
pub use sample_logger::{SampleLogger, DEFAULT_TEXT_DELIMITER};
