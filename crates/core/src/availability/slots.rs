use chrono::{DateTime, Duration, Utc};

/// Half-open interval overlap: `[a_start, a_end)` vs `[b_start, b_end)`.
/// Touching intervals do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}

/// Lazy iterator over the free slot starts inside a window.
///
/// Steps through the window by `interval`, yielding each candidate whose
/// full duration fits in the window, ends after `now`, and overlaps none of
/// the busy intervals. A non-positive duration or interval yields nothing.
pub struct FreeSlots<'a> {
    cursor: DateTime<Utc>,
    window_end: DateTime<Utc>,
    duration: Duration,
    interval: Duration,
    now: DateTime<Utc>,
    busy: &'a [(DateTime<Utc>, DateTime<Utc>)],
}

impl<'a> FreeSlots<'a> {
    pub fn new(
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        duration_min: u32,
        interval_min: u32,
        now: DateTime<Utc>,
        busy: &'a [(DateTime<Utc>, DateTime<Utc>)],
    ) -> Self {
        FreeSlots {
            cursor: window_start,
            window_end,
            duration: Duration::minutes(i64::from(duration_min)),
            interval: Duration::minutes(i64::from(interval_min)),
            now,
            busy,
        }
    }
}

impl Iterator for FreeSlots<'_> {
    type Item = (DateTime<Utc>, DateTime<Utc>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.duration <= Duration::zero() || self.interval <= Duration::zero() {
            return None;
        }
        loop {
            let start = self.cursor;
            let end = start + self.duration;
            if end > self.window_end {
                return None;
            }
            self.cursor = start + self.interval;
            if end <= self.now {
                continue;
            }
            if self
                .busy
                .iter()
                .any(|&(b_start, b_end)| overlaps(start, end, b_start, b_end))
            {
                continue;
            }
            return Some((start, end));
        }
    }
}
