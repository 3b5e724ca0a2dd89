//! Calendar bucketing: weeks end on Sunday, months are labelled `%Y-%m`.
use chrono::{Datelike, Days, Months, NaiveDate};

/// The Sunday on or after `date`, or `None` when that Sunday lies past the
/// calendar's range.
///
/// A Sunday maps to itself, so every timestamp on a Sunday belongs to the
/// week ending that day.
pub fn week_ending(date: NaiveDate) -> Option<NaiveDate> {
    let ahead = (7 - date.weekday().num_days_from_sunday()) % 7;
    date.checked_add_days(Days::new(u64::from(ahead)))
}

/// `week_end + 7·weeks` days, or `None` past the calendar's range.
pub fn weeks_after(week_end: NaiveDate, weeks: usize) -> Option<NaiveDate> {
    week_end.checked_add_days(Days::new(7 * weeks as u64))
}

/// Last day of the month containing `date`.
pub fn month_ending(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

/// `YYYY-MM` label for the month containing `date`.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Week endings land on the same or next Sunday.
    //
    // Given
    // -----
    // - Monday 2024-01-01 through Sunday 2024-01-07, and Monday 2024-01-08.
    //
    // Expect
    // ------
    // - The first seven map to 2024-01-07; the eighth to 2024-01-14.
    fn week_ending_maps_to_following_sunday() {
        for d in 1..=7 {
            assert_eq!(week_ending(ymd(2024, 1, d)), Some(ymd(2024, 1, 7)));
        }
        assert_eq!(week_ending(ymd(2024, 1, 8)), Some(ymd(2024, 1, 14)));
        assert_eq!(week_ending(ymd(2024, 1, 8)).map(|d| d.weekday()), Some(Weekday::Sun));
    }

    #[test]
    // Purpose
    // -------
    // A week that would close past the last representable date has no
    // week ending.
    //
    // Given
    // -----
    // - `NaiveDate::MAX` and the Sunday on or before it.
    //
    // Expect
    // ------
    // - `None` for `MAX` (a weekday); the last Sunday maps to itself.
    fn week_ending_is_none_past_the_calendar_range() {
        // Arrange
        let back = NaiveDate::MAX.weekday().num_days_from_sunday();
        let last_sunday = NaiveDate::MAX.checked_sub_days(Days::new(u64::from(back))).unwrap();

        // Act / Assert
        assert_ne!(NaiveDate::MAX.weekday(), Weekday::Sun);
        assert_eq!(week_ending(NaiveDate::MAX), None);
        assert_eq!(week_ending(last_sunday), Some(last_sunday));
    }

    #[test]
    // Purpose
    // -------
    // Month endings handle leap years and December rollover.
    //
    // Given
    // -----
    // - 2024-02-10, 2023-02-10, 2024-12-31.
    //
    // Expect
    // ------
    // - 2024-02-29, 2023-02-28, 2024-12-31 and matching labels.
    fn month_ending_handles_leap_years_and_december() {
        assert_eq!(month_ending(ymd(2024, 2, 10)), ymd(2024, 2, 29));
        assert_eq!(month_ending(ymd(2023, 2, 10)), ymd(2023, 2, 28));
        assert_eq!(month_ending(ymd(2024, 12, 31)), ymd(2024, 12, 31));
        assert_eq!(month_label(ymd(2024, 2, 29)), "2024-02");
    }

    #[test]
    // Purpose
    // -------
    // Forecast weeks step by seven days.
    //
    // Given
    // -----
    // - Week ending 2024-12-29, one and four weeks ahead.
    //
    // Expect
    // ------
    // - 2025-01-05 and 2025-01-26.
    fn weeks_after_steps_by_seven_days() {
        assert_eq!(weeks_after(ymd(2024, 12, 29), 1), Some(ymd(2025, 1, 5)));
        assert_eq!(weeks_after(ymd(2024, 12, 29), 4), Some(ymd(2025, 1, 26)));
    }
}
