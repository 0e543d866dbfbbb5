//! Hardware Library Diagnostics
//!
//! The i.MX 2D hardware library logs through a single global callback with
//! its own threshold. This module bridges that into `tracing`: the threshold
//! is derived once from the current max level filter, and messages arriving
//! through [`forward_hardware_log`] are re-emitted as `tracing` events under
//! the `imx2d` target.
//!
//! Setup is process-wide and happens at most once. Later calls return the
//! threshold chosen by the first one, even if the subscriber has changed
//! since.

use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::{debug, Level};

/// Severity levels of the hardware library, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HardwareLogLevel {
    Error,
    Warning,
    Info,
    Debug,
    Trace,
}

impl HardwareLogLevel {
    /// The `tracing` level messages of this severity are emitted at
    #[must_use]
    pub const fn as_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warning => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Threshold matching a `tracing` max level filter
    ///
    /// `OFF` maps to [`HardwareLogLevel::Trace`]; the subscriber does the
    /// filtering in that case.
    #[must_use]
    pub fn from_level_filter(filter: LevelFilter) -> Self {
        if filter == LevelFilter::ERROR {
            Self::Error
        } else if filter == LevelFilter::WARN {
            Self::Warning
        } else if filter == LevelFilter::INFO {
            Self::Info
        } else if filter == LevelFilter::DEBUG {
            Self::Debug
        } else {
            Self::Trace
        }
    }

    const fn to_raw(self) -> u8 {
        match self {
            Self::Error => 1,
            Self::Warning => 2,
            Self::Info => 3,
            Self::Debug => 4,
            Self::Trace => 5,
        }
    }

    const fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::Error),
            2 => Some(Self::Warning),
            3 => Some(Self::Info),
            4 => Some(Self::Debug),
            5 => Some(Self::Trace),
            _ => None,
        }
    }
}

/// Signature of the logging callback handed to the hardware library
pub type HardwareLogFn = fn(HardwareLogLevel, &str, u32, &str, fmt::Arguments<'_>);

/// Serializes setup; set once the installer has returned
static SETUP_DONE: Mutex<bool> = parking_lot::const_mutex(false);

/// Threshold chosen at setup, 0 until then. Read without locking so the
/// callback stays usable while `install` is still running.
static THRESHOLD: AtomicU8 = AtomicU8::new(0);

fn published_threshold() -> Option<HardwareLogLevel> {
    HardwareLogLevel::from_raw(THRESHOLD.load(Ordering::Acquire))
}

/// Set up hardware library logging
///
/// See [`setup_logging_with`]; this variant has nothing to install into.
pub fn setup_logging() -> HardwareLogLevel {
    setup_logging_with(|_, _| {})
}

/// Set up hardware library logging, handing threshold and callback to `install`
///
/// `install` runs only on the first call in the process. The threshold is
/// published before it runs, so `install` may already log through the
/// callback. Every call returns the threshold chosen by the first one.
pub fn setup_logging_with<F>(install: F) -> HardwareLogLevel
where
    F: FnOnce(HardwareLogLevel, HardwareLogFn),
{
    let mut done = SETUP_DONE.lock();

    if let Some(level) = published_threshold().filter(|_| *done) {
        return level;
    }

    let level = HardwareLogLevel::from_level_filter(LevelFilter::current());
    THRESHOLD.store(level.to_raw(), Ordering::Release);
    install(level, forward_hardware_log);
    *done = true;

    debug!("hardware library logging set up with threshold {:?}", level);

    level
}

/// Threshold chosen at setup, if setup has happened
#[must_use]
pub fn logging_threshold() -> Option<HardwareLogLevel> {
    published_threshold()
}

/// Logging callback for the hardware library
///
/// Messages less severe than the threshold are dropped. Before setup every
/// message is forwarded. Never blocks.
pub fn forward_hardware_log(
    level: HardwareLogLevel,
    file: &str,
    line: u32,
    function: &str,
    args: fmt::Arguments<'_>,
) {
    if published_threshold().is_some_and(|threshold| level > threshold) {
        return;
    }

    match level {
        HardwareLogLevel::Error => {
            tracing::error!(target: "imx2d", file, line, function, "{}", args);
        }
        HardwareLogLevel::Warning => {
            tracing::warn!(target: "imx2d", file, line, function, "{}", args);
        }
        HardwareLogLevel::Info => {
            tracing::info!(target: "imx2d", file, line, function, "{}", args);
        }
        HardwareLogLevel::Debug => {
            tracing::debug!(target: "imx2d", file, line, function, "{}", args);
        }
        HardwareLogLevel::Trace => {
            tracing::trace!(target: "imx2d", file, line, function, "{}", args);
        }
    }
}
