//! Harvest term: the date range queried against the listing endpoint.

use chrono::{Datelike, Local, NaiveDate};

/// The inclusive date range a harvest run covers.
///
/// Default construction derives "current fiscal year to date" under the
/// Japanese April-start fiscal calendar; an explicit override replaces both
/// bounds atomically and is not validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Term {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Term {
    /// Fiscal year to date as of `today`.
    ///
    /// January through March belong to the fiscal year that started in
    /// April of the previous calendar year.
    #[must_use]
    pub fn fiscal_year_to_date(today: NaiveDate) -> Self {
        let start_year = if today.month() < 4 {
            today.year() - 1
        } else {
            today.year()
        };

        #[allow(clippy::expect_used)] // April 1 exists in every year
        let start = NaiveDate::from_ymd_opt(start_year, 4, 1).expect("valid date");

        Self { start, end: today }
    }

    /// Fiscal year to date as of the current local date.
    #[must_use]
    pub fn current() -> Self {
        Self::fiscal_year_to_date(Local::now().date_naive())
    }

    /// Explicit range override. Bounds are taken as given; callers wanting
    /// a non-degenerate range must check `start <= end` themselves.
    #[must_use]
    pub fn explicit(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Materialize the ordered list of dates to query.
    ///
    /// Produces `start, start+1, ..., end` with `end` appended once more;
    /// the listing step wants an eager list so it can report progress
    /// against a known total. If `end < start` the inclusive range is empty
    /// and the list is just `[end]`.
    #[must_use]
    pub fn day_list(&self) -> Vec<NaiveDate> {
        let mut days = Vec::new();
        let mut day = self.start;

        while day <= self.end {
            days.push(day);
            match day.succ_opt() {
                Some(next) => day = next,
                None => break,
            }
        }

        days.push(self.end);
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_fiscal_year_to_date_before_april() {
        for month in 1..=3 {
            let term = Term::fiscal_year_to_date(date(2024, month, 15));
            assert_eq!(term.start, date(2023, 4, 1), "month {month}");
            assert_eq!(term.end, date(2024, month, 15));
        }
    }

    #[test]
    fn test_fiscal_year_to_date_from_april() {
        for month in 4..=12 {
            let term = Term::fiscal_year_to_date(date(2024, month, 15));
            assert_eq!(term.start, date(2024, 4, 1), "month {month}");
            assert_eq!(term.end, date(2024, month, 15));
        }
    }

    #[test]
    fn test_fiscal_year_boundary_days() {
        assert_eq!(
            Term::fiscal_year_to_date(date(2024, 3, 31)).start,
            date(2023, 4, 1)
        );
        assert_eq!(
            Term::fiscal_year_to_date(date(2024, 4, 1)).start,
            date(2024, 4, 1)
        );
    }

    #[test]
    fn test_day_list_duplicates_final_date() {
        let term = Term::explicit(date(2022, 1, 1), date(2022, 1, 3));
        assert_eq!(
            term.day_list(),
            vec![
                date(2022, 1, 1),
                date(2022, 1, 2),
                date(2022, 1, 3),
                date(2022, 1, 3),
            ]
        );
    }

    #[test]
    fn test_day_list_single_day() {
        let term = Term::explicit(date(2022, 1, 1), date(2022, 1, 1));
        assert_eq!(term.day_list(), vec![date(2022, 1, 1), date(2022, 1, 1)]);
    }

    #[test]
    fn test_day_list_degenerate_range() {
        let term = Term::explicit(date(2022, 1, 3), date(2022, 1, 1));
        assert_eq!(term.day_list(), vec![date(2022, 1, 1)]);
    }
}
