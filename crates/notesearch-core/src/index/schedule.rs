use chrono::{DateTime, Duration, Utc};

/// Decides when the next timer-driven rebuild is due.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReindexSchedule {
    interval_minutes: f64,
    enabled: bool,
}

impl ReindexSchedule {
    #[must_use]
    pub const fn new(interval_minutes: f64, enabled: bool) -> Self {
        Self {
            interval_minutes,
            enabled,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Option<Duration> {
        if !self.enabled || !self.interval_minutes.is_finite() || self.interval_minutes <= 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "interval is a positive, finite number of minutes"
        )]
        let millis = (self.interval_minutes * 60_000.0).round() as i64;
        Duration::try_milliseconds(millis.max(1))
    }

    #[must_use]
    pub fn next_due(&self, last_run: Option<DateTime<Utc>>) -> Option<DateTime<Utc>> {
        let interval = self.interval()?;
        match last_run {
            Some(last) => last.checked_add_signed(interval),
            None => Some(Utc::now()),
        }
    }

    /// A schedule with no previous run is always due. One whose next run
    /// falls past the representable range never is.
    #[must_use]
    pub fn is_due(&self, last_run: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        let Some(interval) = self.interval() else {
            return false;
        };
        last_run.is_none_or(|last| {
            last.checked_add_signed(interval).is_some_and(|due| now >= due)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_schedule_is_never_due() {
        let schedule = ReindexSchedule::new(60.0, false);
        assert!(schedule.interval().is_none());
        assert!(!schedule.is_due(None, Utc::now()));
    }

    #[test]
    fn due_once_interval_has_elapsed() {
        let schedule = ReindexSchedule::new(30.0, true);
        let last = Utc::now();
        assert!(!schedule.is_due(Some(last), last + Duration::minutes(29)));
        assert!(schedule.is_due(Some(last), last + Duration::minutes(30)));
        assert_eq!(schedule.next_due(Some(last)), Some(last + Duration::minutes(30)));
    }

    #[test]
    fn fractional_minutes_are_supported() {
        let schedule = ReindexSchedule::new(0.5, true);
        assert_eq!(schedule.interval(), Some(Duration::seconds(30)));
    }

    #[test]
    fn unrepresentable_next_run_is_never_due() {
        let schedule = ReindexSchedule::new(1e300, true);
        let last = Utc::now();
        assert!(!schedule.is_due(Some(last), last + Duration::seconds(1)));
        assert_eq!(schedule.next_due(Some(last)), None);
    }

    #[test]
    fn first_run_is_due_immediately() {
        assert!(ReindexSchedule::new(5.0, true).is_due(None, Utc::now()));
    }
}
