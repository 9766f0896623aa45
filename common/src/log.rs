//! Engine event log.
//!
//! A small ring buffer of leveled log lines the host shell can read back
//! (for a debug overlay or a serial dump). The `face_*!` macros format into a
//! fixed-size line, push it here and, with the `defmt` feature, forward the
//! same message to `defmt`.
//!
//! ```ignore
//! face_info!(self.log, "surface {}x{}", width, height);
//! face_warn!(self.log, "timezone unresolved, keeping {}", zone.name());
//!
//! for entry in engine.log().iter() {
//!     println!("{} {}", entry.level.prefix(), entry.message);
//! }
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

/// Maximum number of log lines kept; the oldest line is dropped when full.
pub const LOG_ENTRIES: usize = 16;

/// Maximum characters per log line. Longer messages are truncated.
pub const LOG_LINE_LENGTH: usize = 48;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
}

impl LogLevel {
    /// Single-character prefix for compact display.
    pub const fn prefix(self) -> char {
        match self {
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
        }
    }
}

/// One recorded log line.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String<LOG_LINE_LENGTH>,
}

/// Writer that silently truncates at the line capacity instead of failing.
struct Truncating<'a>(&'a mut String<LOG_LINE_LENGTH>);

impl Write for Truncating<'_> {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

/// Ring buffer of engine log lines.
pub struct EventLog {
    entries: Deque<LogEntry, LOG_ENTRIES>,
}

impl EventLog {
    /// Create an empty log.
    pub const fn new() -> Self { Self { entries: Deque::new() } }

    /// Record a formatted message. If the buffer is full, the oldest line is dropped.
    pub fn record(
        &mut self,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) {
        let mut message = String::new();
        Truncating(&mut message).write_fmt(args).ok();

        if self.entries.is_full() {
            self.entries.pop_front();
        }
        self.entries.push_back(LogEntry { level, message }).ok();
    }

    /// Iterate over entries, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> { self.entries.iter() }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<&LogEntry> { self.entries.back() }

    #[inline]
    pub fn len(&self) -> usize { self.entries.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    /// Drop all entries.
    pub fn clear(&mut self) { self.entries.clear(); }
}

impl Default for EventLog {
    fn default() -> Self { Self::new() }
}

/// Log at Debug level.
macro_rules! face_debug {
    ($log:expr, $($arg:tt)*) => {{
        $log.record($crate::log::LogLevel::Debug, format_args!($($arg)*));
        #[cfg(feature = "defmt")]
        defmt::debug!($($arg)*);
    }};
}

/// Log at Info level.
macro_rules! face_info {
    ($log:expr, $($arg:tt)*) => {{
        $log.record($crate::log::LogLevel::Info, format_args!($($arg)*));
        #[cfg(feature = "defmt")]
        defmt::info!($($arg)*);
    }};
}

/// Log at Warn level.
macro_rules! face_warn {
    ($log:expr, $($arg:tt)*) => {{
        $log.record($crate::log::LogLevel::Warn, format_args!($($arg)*));
        #[cfg(feature = "defmt")]
        defmt::warn!($($arg)*);
    }};
}

// =============================================================================
// Tests
// =============================================================================
