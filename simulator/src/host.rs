//! Desktop stand-ins for the host clock and timezone broadcast.

use std::time::{SystemTime, UNIX_EPOCH};

use watchface_common::{Clock, TimeZone, TimeZoneSource};

/// Wall clock backed by `SystemTime`.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
    }
}

/// Fixed-offset zones the user can cycle through with a key.
///
/// Mirrors a device broadcast: a change is only reported while subscribed.
pub struct HostZones {
    offset_hours: i32,
    subscribed: bool,
}

impl HostZones {
    pub const fn new() -> Self {
        Self {
            offset_hours: 0,
            subscribed: false,
        }
    }

    /// Move the "system" zone one hour east, wrapping from +14 back to -12.
    ///
    /// Returns `true` if a subscriber should be notified.
    pub fn shift_east(&mut self) -> bool {
        self.offset_hours = if self.offset_hours >= 14 { -12 } else { self.offset_hours + 1 };
        self.subscribed
    }

    #[inline]
    pub const fn offset_hours(&self) -> i32 { self.offset_hours }
}

impl TimeZoneSource for HostZones {
    fn current(&self) -> Option<TimeZone> {
        let mut name: heapless::String<16> = heapless::String::new();
        if self.offset_hours == 0 {
            name.push_str("UTC").ok()?;
        } else {
            use core::fmt::Write;
            write!(name, "UTC{:+}", self.offset_hours).ok()?;
        }
        TimeZone::new(&name, self.offset_hours * 3_600)
    }

    fn subscribe(&mut self) { self.subscribed = true; }

    fn unsubscribe(&mut self) { self.subscribed = false; }
}
