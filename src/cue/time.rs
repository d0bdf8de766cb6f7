use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

use crate::cue;

/// A time found in an annotation, `[[[YYYY/]MM/DD] ]HH:MM`.
/// Only the parts that were written down are set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeComponents {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub hour: u32,
    pub minute: u32,
    pub text: String,
}

impl TimeComponents {
    /// Overwrites the written parts onto `current`. Seconds are always reset.
    pub fn apply(&self, current: NaiveDateTime) -> Option<NaiveDateTime> {
        let date = NaiveDate::from_ymd_opt(
            self.year.unwrap_or(current.year()),
            self.month.unwrap_or(current.month()),
            self.day.unwrap_or(current.day()),
        )?;
        let time = NaiveTime::from_hms_opt(self.hour, self.minute, 0)?;
        Some(date.and_time(time))
    }
}

/// Finds every time in `text`, left to right.
pub fn scan(text: &str) -> Vec<TimeComponents> {
    static TIME_RE: OnceLock<Regex> = OnceLock::new();
    let time_re = TIME_RE.get_or_init(|| {
        Regex::new(r"(?:(?:(\d{4})/)?(\d{1,2})/(\d{1,2}) )?(\d{1,2}):(\d{2})").expect("valid regex")
    });

    time_re
        .captures_iter(text)
        .filter_map(|caps| {
            Some(TimeComponents {
                year: caps.get(1).and_then(|year| year.as_str().parse().ok()),
                month: caps.get(2).and_then(|month| month.as_str().parse().ok()),
                day: caps.get(3).and_then(|day| day.as_str().parse().ok()),
                hour: caps[4].parse().ok()?,
                minute: caps[5].parse().ok()?,
                text: caps[0].to_string(),
            })
        })
        .collect()
}

/// Resolves the times of one cue starting from `seed`, the last time known
/// before it. Without any time in `text` the seed is carried over unchanged.
///
/// A time of day earlier than the seed is not moved to the next day; only an
/// explicit date moves the date.
pub fn infer(text: Option<&str>, seed: NaiveDateTime) -> Result<Vec<NaiveDateTime>, cue::Error> {
    let components = text.map(scan).unwrap_or_default();
    if components.is_empty() {
        return Ok(vec![seed]);
    }

    let mut current = seed;
    let mut times = Vec::with_capacity(components.len());
    for component in components {
        current = component.apply(current).ok_or(cue::Error::InvalidTime {
            text: component.text,
        })?;
        times.push(current);
    }
    Ok(times)
}
