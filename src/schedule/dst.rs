//! US daylight-saving rule for placing FOMC statements in local time.
//!
//! No timezone database: the US rule (second Sunday of March through the
//! first Sunday of November) is evaluated on the calendar date, and the
//! output timezone is treated as a fixed UTC offset.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta, Weekday};

use crate::schedule::Announcement;

const EDT_OFFSET_HOURS: i64 = -4;
const EST_OFFSET_HOURS: i64 = -5;

/// True from the second Sunday of March (inclusive) to the first Sunday of
/// November (exclusive).
pub fn is_us_dst(date: NaiveDate) -> bool {
    let year = date.year();
    let start = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2);
    let end = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1);
    match (start, end) {
        (Some(start), Some(end)) => date >= start && date < end,
        _ => false,
    }
}

/// UTC offset of US Eastern Time on `date`, in hours.
pub fn eastern_offset_hours(date: NaiveDate) -> i64 {
    if is_us_dst(date) {
        EDT_OFFSET_HOURS
    } else {
        EST_OFFSET_HOURS
    }
}

/// Local start of the FOMC statement on `date` in the output timezone.
pub fn fomc_announcement(date: NaiveDate, announcement: &Announcement) -> NaiveDateTime {
    let eastern = date.and_time(announcement.time_et);
    let utc = eastern - TimeDelta::hours(eastern_offset_hours(date));
    utc + TimeDelta::hours(i64::from(announcement.utc_offset_hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn announcement() -> Announcement {
        Announcement {
            timed: true,
            time_et: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            duration: TimeDelta::minutes(60),
            utc_offset_hours: -3,
        }
    }

    #[test]
    fn dst_2025_boundaries() {
        assert!(!is_us_dst(d(2025, 3, 8)));
        assert!(is_us_dst(d(2025, 3, 9)));
        assert!(is_us_dst(d(2025, 7, 30)));
        assert!(is_us_dst(d(2025, 11, 1)));
        assert!(!is_us_dst(d(2025, 11, 2)));
        assert!(!is_us_dst(d(2025, 1, 29)));
        assert!(!is_us_dst(d(2025, 12, 10)));
    }

    #[test]
    fn dst_2026_boundaries() {
        // Second Sunday of March 2026 is the 8th, first Sunday of November the 1st.
        assert!(!is_us_dst(d(2026, 3, 7)));
        assert!(is_us_dst(d(2026, 3, 8)));
        assert!(is_us_dst(d(2026, 10, 31)));
        assert!(!is_us_dst(d(2026, 11, 1)));
    }

    #[test]
    fn statement_lands_at_15h_or_16h_in_brasilia() {
        let summer = fomc_announcement(d(2025, 6, 18), &announcement());
        assert_eq!(summer, d(2025, 6, 18).and_hms_opt(15, 0, 0).unwrap());

        let winter = fomc_announcement(d(2025, 1, 29), &announcement());
        assert_eq!(winter, d(2025, 1, 29).and_hms_opt(16, 0, 0).unwrap());
    }
}
