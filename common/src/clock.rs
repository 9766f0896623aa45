//! Clock state: the current instant and the timezone it is displayed in.
//!
//! Instants are UTC milliseconds since the Unix epoch. A [`TimeZone`] is a
//! resolved fixed offset plus the identifier it was resolved from; resolving
//! IANA names is the job of the host's [`TimeZoneSource`].

use heapless::String;

/// Maximum length of a timezone identifier (`America/Argentina/Buenos_Aires` fits).
pub const ZONE_NAME_LENGTH: usize = 32;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Offsets beyond +/-18h are not real zones.
const MAX_OFFSET_SECONDS: i32 = 18 * 3_600;

// =============================================================================
// Collaborators
// =============================================================================

/// Source of the current wall-clock instant.
pub trait Clock {
    /// Milliseconds since the Unix epoch (UTC).
    fn now_ms(&self) -> i64;
}

/// Host timezone database plus its change broadcast.
///
/// The engine subscribes only while the face is visible and calls
/// `unsubscribe` exactly once for every successful `subscribe`.
pub trait TimeZoneSource {
    /// Resolve the device's current default timezone, or `None` if it cannot be resolved.
    fn current(&self) -> Option<TimeZone>;

    /// Start delivering timezone-change notifications to the engine.
    fn subscribe(&mut self);

    /// Stop delivering timezone-change notifications.
    fn unsubscribe(&mut self);
}

// =============================================================================
// Time Zone
// =============================================================================

/// A resolved timezone: identifier and fixed UTC offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeZone {
    name: String<ZONE_NAME_LENGTH>,
    offset_seconds: i32,
}

impl TimeZone {
    /// Build a zone, or `None` for an empty/overlong name or an impossible offset.
    pub fn new(
        name: &str,
        offset_seconds: i32,
    ) -> Option<Self> {
        if name.is_empty() || offset_seconds.unsigned_abs() > MAX_OFFSET_SECONDS.unsigned_abs() {
            return None;
        }
        let name = String::try_from(name).ok()?;
        Some(Self { name, offset_seconds })
    }

    pub fn utc() -> Self {
        Self {
            name: String::try_from("UTC").unwrap_or_default(),
            offset_seconds: 0,
        }
    }

    #[inline]
    pub fn name(&self) -> &str { self.name.as_str() }

    #[inline]
    pub const fn offset_seconds(&self) -> i32 { self.offset_seconds }
}

impl Default for TimeZone {
    fn default() -> Self { Self::utc() }
}

// =============================================================================
// Local Time
// =============================================================================

/// Civil time of day in a given zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalTime {
    /// 0-23
    pub hour: u8,
    /// 0-59
    pub minute: u8,
    /// 0-59
    pub second: u8,
    /// 0-999
    pub millisecond: u16,
}

impl LocalTime {
    /// Construct directly from fields; out-of-range values are wrapped.
    pub const fn new(
        hour: u8,
        minute: u8,
    ) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: 0,
            millisecond: 0,
        }
    }

    /// Time of day of `instant_ms` shifted by `offset_seconds`.
    ///
    /// Uses Euclidean remainders so instants before the epoch still land in 0..24h.
    pub fn from_instant(
        instant_ms: i64,
        offset_seconds: i32,
    ) -> Self {
        let local_ms = instant_ms.saturating_add(i64::from(offset_seconds) * MS_PER_SECOND);
        let day_ms = local_ms.rem_euclid(MS_PER_DAY);

        Self {
            hour: (day_ms / MS_PER_HOUR) as u8,
            minute: ((day_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u8,
            second: ((day_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u8,
            millisecond: (day_ms % MS_PER_SECOND) as u16,
        }
    }

    /// Hour on a 12-hour dial, 0-11 (twelve o'clock is 0).
    #[inline]
    pub const fn hour_of_12(self) -> u8 { self.hour % 12 }
}

// =============================================================================
// Clock State
// =============================================================================

/// Outcome of feeding a new reading into [`ClockState::refresh`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Refresh {
    Advanced,
    Unchanged,
    /// The reading was earlier than the held instant and was ignored.
    RejectedBackward,
}

/// Current instant and display timezone.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ClockState {
    instant_ms: i64,
    timezone: TimeZone,
}

impl ClockState {
    pub fn new(
        instant_ms: i64,
        timezone: TimeZone,
    ) -> Self {
        Self { instant_ms, timezone }
    }

    /// Advance to `now_ms`. Backward readings are ignored; use [`Self::correct`] for syncs.
    pub fn refresh(
        &mut self,
        now_ms: i64,
    ) -> Refresh {
        if now_ms > self.instant_ms {
            self.instant_ms = now_ms;
            Refresh::Advanced
        } else if now_ms == self.instant_ms {
            Refresh::Unchanged
        } else {
            Refresh::RejectedBackward
        }
    }

    /// Explicit time-sync correction; may move the instant backwards.
    pub fn correct(
        &mut self,
        now_ms: i64,
    ) {
        self.instant_ms = now_ms;
    }

    /// Replace the timezone. `None` (unresolvable) keeps the previous one.
    ///
    /// Returns `true` if the zone actually changed.
    pub fn set_timezone(
        &mut self,
        timezone: Option<TimeZone>,
    ) -> bool {
        match timezone {
            Some(zone) if zone != self.timezone => {
                self.timezone = zone;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub const fn instant_ms(&self) -> i64 { self.instant_ms }

    #[inline]
    pub const fn timezone(&self) -> &TimeZone { &self.timezone }

    /// Local time of day of the held instant in the held zone.
    pub fn local_time(&self) -> LocalTime { LocalTime::from_instant(self.instant_ms, self.timezone.offset_seconds) }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-01-01T00:00:00Z
    const NEW_YEAR_2024_MS: i64 = 1_704_067_200_000;

    fn at(
        hour: i64,
        minute: i64,
    ) -> i64 {
        NEW_YEAR_2024_MS + hour * MS_PER_HOUR + minute * MS_PER_MINUTE
    }

    #[test]
    fn test_local_time_utc() {
        let t = LocalTime::from_instant(at(22, 9) + 30_250, 0);
        assert_eq!(t.hour, 22);
        assert_eq!(t.minute, 9);
        assert_eq!(t.second, 30);
        assert_eq!(t.millisecond, 250);
        assert_eq!(t.hour_of_12(), 10);
    }

    #[test]
    fn test_local_time_with_offset_wraps_day() {
        // 23:30 UTC at +02:00 is 01:30 the next day
        let t = LocalTime::from_instant(at(23, 30), 2 * 3_600);
        assert_eq!((t.hour, t.minute), (1, 30));

        // 00:15 UTC at -05:00 is 19:15 the previous day
        let t = LocalTime::from_instant(at(0, 15), -5 * 3_600);
        assert_eq!((t.hour, t.minute), (19, 15));
    }

    #[test]
    fn test_local_time_before_epoch() {
        // One minute before the epoch is 23:59
        let t = LocalTime::from_instant(-MS_PER_MINUTE, 0);
        assert_eq!((t.hour, t.minute, t.second), (23, 59, 0));
    }

    #[test]
    fn test_noon_and_midnight_map_to_zero_on_dial() {
        assert_eq!(LocalTime::new(0, 0).hour_of_12(), 0);
        assert_eq!(LocalTime::new(12, 0).hour_of_12(), 0);
        assert_eq!(LocalTime::new(23, 59).hour_of_12(), 11);
    }

    #[test]
    fn test_refresh_is_monotonic() {
        let mut clock = ClockState::new(1_000, TimeZone::utc());
        assert_eq!(clock.refresh(2_000), Refresh::Advanced);
        assert_eq!(clock.refresh(2_000), Refresh::Unchanged);
        assert_eq!(clock.refresh(1_500), Refresh::RejectedBackward);
        assert_eq!(clock.instant_ms(), 2_000);
    }

    #[test]
    fn test_correct_allows_backward() {
        let mut clock = ClockState::new(5_000, TimeZone::utc());
        clock.correct(1_000);
        assert_eq!(clock.instant_ms(), 1_000);
    }

    #[test]
    fn test_unresolved_timezone_keeps_previous() {
        let paris = TimeZone::new("Europe/Paris", 3_600).unwrap();
        let mut clock = ClockState::new(at(10, 0), paris.clone());

        assert!(!clock.set_timezone(None));
        assert_eq!(clock.timezone(), &paris);
        assert_eq!(clock.local_time().hour, 11);

        let tokyo = TimeZone::new("Asia/Tokyo", 9 * 3_600).unwrap();
        assert!(clock.set_timezone(Some(tokyo.clone())));
        assert!(!clock.set_timezone(Some(tokyo)), "same zone is not a change");
        assert_eq!(clock.local_time().hour, 19);
    }

    #[test]
    fn test_timezone_validation() {
        assert!(TimeZone::new("", 0).is_none());
        assert!(TimeZone::new("Nowhere/Far", 19 * 3_600).is_none());
        assert!(TimeZone::new("Nowhere/Far", i32::MIN).is_none());
        assert!(TimeZone::new("Nowhere/Far", i32::MAX).is_none());
        assert!(TimeZone::new("Etc/GMT+12", -MAX_OFFSET_SECONDS).is_some());
        assert!(TimeZone::new("Pacific/Kiritimati", 14 * 3_600).is_some());
        let long = "x".repeat(ZONE_NAME_LENGTH + 1);
        assert!(TimeZone::new(&long, 0).is_none());
    }
}
