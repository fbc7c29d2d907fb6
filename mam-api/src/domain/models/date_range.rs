use time::{Date, Duration, OffsetDateTime, UtcOffset};

use crate::domain::HoursError;

/// An inclusive `[start, end]` timestamp range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: OffsetDateTime,
    end: OffsetDateTime,
}

impl DateRange {
    pub fn new(start: OffsetDateTime, end: OffsetDateTime) -> Result<Self, HoursError> {
        if start > end {
            return Err(HoursError::InvalidDateRange);
        }
        Ok(Self { start, end })
    }

    /// The Sunday–Saturday calendar week containing `at`, in `at`'s offset.
    ///
    /// Runs from Sunday 00:00:00.000 to Saturday 23:59:59.999. The offset is
    /// taken as-is: callers in another timezone see a shifted week. Weeks that
    /// run past the representable calendar are an `InvalidDateRange`.
    pub fn week_containing(at: OffsetDateTime) -> Result<Self, HoursError> {
        let days_since_sunday = i64::from(at.weekday().number_days_from_sunday());
        let sunday = at
            .date()
            .checked_sub(Duration::days(days_since_sunday))
            .ok_or(HoursError::InvalidDateRange)?;
        let start = sunday.midnight().assume_offset(at.offset());
        let end = start
            .checked_add(Duration::days(7) - Duration::milliseconds(1))
            .ok_or(HoursError::InvalidDateRange)?;

        Ok(Self { start, end })
    }

    /// The week containing calendar day `date` in the given offset.
    pub fn week_of(date: Date, offset: UtcOffset) -> Result<Self, HoursError> {
        Self::week_containing(date.midnight().assume_offset(offset))
    }

    pub fn start(&self) -> OffsetDateTime {
        self.start
    }

    pub fn end(&self) -> OffsetDateTime {
        self.end
    }

    pub fn contains(&self, at: OffsetDateTime) -> bool {
        self.start <= at && at <= self.end
    }
}
