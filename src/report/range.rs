use chrono::NaiveDate;

use crate::errors::AppError;

/// Inclusive calendar-month boundaries: both `start` and `end` belong to the month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Earliest year a Postgres `DATE` can hold (4713 BC).
pub const MIN_STORABLE_YEAR: i32 = -4712;

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in `month` (1-12) of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// Resolve the first and last calendar day of a month.
///
/// Fails with `InvalidRange` when `month` is outside 1-12 or the year cannot be
/// represented as a calendar date by both chrono and the store.
pub fn resolve_month_range(year: i32, month: i32) -> Result<MonthRange, AppError> {
    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidRange(format!(
            "Month must be between 1 and 12, got {month}"
        )));
    }
    let month = month as u32;

    let out_of_range =
        || AppError::InvalidRange(format!("Year {year} is outside the supported calendar range"));

    if year < MIN_STORABLE_YEAR {
        return Err(out_of_range());
    }

    let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(out_of_range)?;
    let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
        .ok_or_else(out_of_range)?;

    Ok(MonthRange { start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn last_day(year: i32, month: i32) -> u32 {
        resolve_month_range(year, month).unwrap().end.day()
    }

    #[test]
    fn test_february_lengths() {
        assert_eq!(last_day(2024, 2), 29);
        assert_eq!(last_day(2023, 2), 28);
        assert_eq!(last_day(1900, 2), 28, "century years are not leap years");
        assert_eq!(last_day(2000, 2), 29, "years divisible by 400 are leap years");
    }

    #[test]
    fn test_thirty_and_thirty_one_day_months() {
        assert_eq!(last_day(2024, 4), 30);
        assert_eq!(last_day(2024, 6), 30);
        assert_eq!(last_day(2024, 1), 31);
        assert_eq!(last_day(2024, 12), 31);
    }

    #[test]
    fn test_every_month_starts_on_day_one_and_ends_before_next() {
        for year in [1899, 1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 1..=12 {
                let range = resolve_month_range(year, month).unwrap();
                assert_eq!(range.start.day(), 1);
                assert_eq!(range.start.month(), month as u32);
                assert!(range.start <= range.end);

                // The day after `end` must fall in a different month
                let next = range.end.succ_opt().unwrap();
                assert_ne!(next.month(), range.end.month(), "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_range_is_inclusive() {
        let range = resolve_month_range(2024, 3).unwrap();
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(range.contains(NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
        assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
    }

    #[test]
    fn test_invalid_month_rejected() {
        for month in [0, 13, -1, i32::MAX] {
            assert!(matches!(
                resolve_month_range(2024, month),
                Err(AppError::InvalidRange(_))
            ));
        }
    }

    #[test]
    fn test_unrepresentable_year_rejected() {
        assert!(matches!(
            resolve_month_range(i32::MAX, 1),
            Err(AppError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_years_before_storable_date_range_rejected() {
        assert!(resolve_month_range(MIN_STORABLE_YEAR, 1).is_ok());
        for year in [MIN_STORABLE_YEAR - 1, -5000, i32::MIN] {
            assert!(
                matches!(resolve_month_range(year, 1), Err(AppError::InvalidRange(_))),
                "year={year}"
            );
        }
    }

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2100, 2), 28);
    }
}
