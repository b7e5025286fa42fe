//! Console diagnostics gated by the `-q` / `-v` flags.
//!
//! Chart generation reports through two macros instead of a logger:
//! [`dprintln!`](crate::dprintln) for skipped samples and per-source totals,
//! [`vprintln!`](crate::vprintln) for every written artifact and stage timing.
//! Errors bypass both and go to stderr from the binary.

use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, Instant};

/// How chatty the report run is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Verbosity {
    /// Only the final summary line and errors.
    Quiet,
    /// Skipped samples and per-source chart counts.
    Default,
    /// Every written artifact and stage timings.
    Verbose,
}

impl Verbosity {
    /// Level selected by the CLI flags; `quiet` wins over `verbose`.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => Self::Quiet,
            (false, true) => Self::Verbose,
            (false, false) => Self::Default,
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Quiet,
            2 => Self::Verbose,
            _ => Self::Default,
        }
    }
}

static LEVEL: AtomicU8 = AtomicU8::new(Verbosity::Default as u8);

/// Set the process-wide level. Called once by the binary before any work.
pub fn init(quiet: bool, verbose: bool) {
    LEVEL.store(Verbosity::from_flags(quiet, verbose) as u8, Ordering::Relaxed);
}

/// Current process-wide level.
pub fn verbosity() -> Verbosity {
    Verbosity::from_u8(LEVEL.load(Ordering::Relaxed))
}

/// `-v` was given.
pub fn is_verbose() -> bool {
    verbosity() >= Verbosity::Verbose
}

/// `-q` was given.
pub fn is_quiet() -> bool {
    verbosity() == Verbosity::Quiet
}

/// `println!` that only prints under `-v`.
#[macro_export]
macro_rules! vprintln {
    ($($arg:tt)*) => {
        if $crate::verbose::is_verbose() {
            println!($($arg)*);
        }
    };
}

/// `println!` that is silenced by `-q`.
#[macro_export]
macro_rules! dprintln {
    ($($arg:tt)*) => {
        if !$crate::verbose::is_quiet() {
            println!($($arg)*);
        }
    };
}

/// Stage stopwatch. Under `-v`, dropping it prints `  <stage>: <elapsed>`.
///
/// ```
/// use effcharts_core::verbose::Timer;
///
/// let stage = Timer::start("srum charts");
/// assert!(stage.elapsed().as_secs() < 60);
/// ```
pub struct Timer {
    stage: String,
    started: Instant,
}

impl Timer {
    /// Start timing `stage`.
    pub fn start(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            started: Instant::now(),
        }
    }

    /// Time since [`Timer::start`].
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        vprintln!("  {}: {:.1?}", self.stage, self.elapsed());
    }
}
