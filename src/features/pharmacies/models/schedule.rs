use chrono::NaiveDate;

/// Insert shape for a weekly schedule: a validity window, inclusive at both
/// ends. Identity for deduplication is the (start_date, end_date) pair, see
/// [`ScheduleKey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewSchedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl NewSchedule {
    pub fn key(&self) -> ScheduleKey {
        ScheduleKey {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }

    /// A pharmacy linked to this window is on duty on `date` iff the window
    /// contains it, inclusive at both ends (calendar-day granularity).
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Content-addressed identity of a validity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
