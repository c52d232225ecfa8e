//! The "yesterday" window every item is filtered against.
//!
//! The window is derived from the current instant on every call so a
//! long-running session keeps filtering correctly after local midnight.

use chrono::{Local, NaiveDate, TimeZone};
use time::macros::time;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Current instant plus the local time zone it is read in.
pub trait Clock: Send + Sync {
    fn now(&self) -> OffsetDateTime;

    /// The instant a local wall-clock time refers to. When the wall time
    /// occurs twice (clocks turned back), `earliest` picks between them.
    fn resolve_local(&self, wall: PrimitiveDateTime, earliest: bool) -> OffsetDateTime {
        let _ = earliest;
        wall.assume_offset(self.now().offset())
    }

    /// Local offset in effect at `instant`.
    fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        let _ = instant;
        self.now().offset()
    }
}

/// The system clock in the process time zone.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        let now = Local::now();
        from_chrono(&now).unwrap_or_else(OffsetDateTime::now_utc)
    }

    fn resolve_local(&self, wall: PrimitiveDateTime, earliest: bool) -> OffsetDateTime {
        let resolved = to_naive(wall).and_then(|naive| {
            let candidates = Local.from_local_datetime(&naive);
            if earliest {
                candidates.earliest()
            } else {
                candidates.latest()
            }
        });
        // A wall time skipped by a forward jump falls back to the current offset.
        resolved
            .as_ref()
            .and_then(from_chrono)
            .unwrap_or_else(|| wall.assume_offset(self.now().offset()))
    }

    fn offset_at(&self, instant: OffsetDateTime) -> UtcOffset {
        Local
            .timestamp_opt(instant.unix_timestamp(), 0)
            .single()
            .and_then(|dt| UtcOffset::from_whole_seconds(dt.offset().local_minus_utc()).ok())
            .unwrap_or(UtcOffset::UTC)
    }
}

fn to_naive(wall: PrimitiveDateTime) -> Option<chrono::NaiveDateTime> {
    NaiveDate::from_ymd_opt(wall.year(), u32::from(u8::from(wall.month())), u32::from(wall.day()))?
        .and_hms_milli_opt(
            u32::from(wall.hour()),
            u32::from(wall.minute()),
            u32::from(wall.second()),
            u32::from(wall.millisecond()),
        )
}

fn from_chrono(dt: &chrono::DateTime<Local>) -> Option<OffsetDateTime> {
    let offset = UtcOffset::from_whole_seconds(dt.offset().local_minus_utc()).ok()?;
    let utc = OffsetDateTime::from_unix_timestamp_nanos(i128::from(dt.timestamp_nanos_opt()?)).ok()?;
    Some(utc.to_offset(offset))
}

/// A clock pinned to one instant, in a zone with a fixed offset.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub OffsetDateTime);

impl Clock for FixedClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: OffsetDateTime,
    pub end: OffsetDateTime,
}

impl DayWindow {
    /// Inclusive on both ends.
    pub fn contains(&self, instant: OffsetDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }
}

/// Yesterday from 00:00:00.000 to 23:59:59.999 local time. Each bound
/// is resolved in the offset in effect at that moment, so a DST change
/// between yesterday and today does not shift the window.
pub fn yesterday_range(clock: &dyn Clock) -> DayWindow {
    let day = clock.now().date() - Duration::days(1);
    DayWindow {
        start: clock.resolve_local(day.midnight(), true),
        end: clock.resolve_local(day.with_time(time!(23:59:59.999)), false),
    }
}

pub fn is_yesterday(date: Option<OffsetDateTime>, clock: &dyn Clock) -> bool {
    match date {
        Some(d) => yesterday_range(clock).contains(d),
        None => false,
    }
}
