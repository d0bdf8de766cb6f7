use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

pub const TIME_FORMAT: &str = "%Y/%m/%d %H:%M";

/// Midnight on the first of January of the year of `now`.
pub fn start_of_year(now: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_yo_opt(now.year(), 1).map_or(now, |date| date.and_time(NaiveTime::MIN))
}

pub fn format_time(time: NaiveDateTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

#[test]
fn start_of_year_resets_everything() {
    let now = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(13, 45, 12)
        .unwrap();
    let start = start_of_year(now);
    assert_eq!(format_time(start), "2026/01/01 00:00");
    assert_eq!(start.and_utc().timestamp() % 60, 0);
}
