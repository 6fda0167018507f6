use chrono::{Datelike, Days, Local, NaiveDate};

pub const ISO_FORMAT: &str = "%Y-%m-%d";

pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_FORMAT).ok()
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_FORMAT).to_string()
}

pub fn today_iso() -> String {
    format_iso(Local::now().date_naive())
}

pub fn current_year() -> i32 {
    Local::now().year()
}

/// Shift an ISO date by a signed number of days. `None` when the input
/// does not parse; callers keep the previous value in that case.
pub fn shift_days(value: &str, days: i64) -> Option<String> {
    let date = parse_iso(value)?;
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days as u64))?
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))?
    };
    Some(format_iso(shifted))
}

/// "Saturday, November 1" style heading for a day bucket.
pub fn friendly_day_heading(value: &str) -> String {
    match parse_iso(value) {
        Some(date) => date.format("%A, %B %-d").to_string(),
        None => value.to_string(),
    }
}

pub fn month_name(month: u32) -> &'static str {
    const NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("")
}

pub fn short_month_name(month: u32) -> &'static str {
    month_name(month).get(..3).unwrap_or("")
}

/// Step a (year, month) pair by a signed number of months.
pub fn step_month(year: i32, month: u32, offset: i32) -> (i32, u32) {
    let zero_based = year as i64 * 12 + (month.clamp(1, 12) as i64 - 1) + offset as i64;
    let new_year = zero_based.div_euclid(12) as i32;
    let new_month = zero_based.rem_euclid(12) as u32 + 1;
    (new_year, new_month)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = step_month(year, month, 1);
    let first = NaiveDate::from_ymd_opt(year, month, 1);
    let next_first = NaiveDate::from_ymd_opt(next_year, next_month, 1);
    match (first, next_first) {
        (Some(a), Some(b)) => b.signed_duration_since(a).num_days() as u32,
        _ => 30,
    }
}

/// Blank cells before day 1 in a Sunday-first calendar grid.
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn day_of_month(value: &str) -> Option<u32> {
    parse_iso(value).map(|d| d.day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_across_month_boundaries() {
        assert_eq!(shift_days("2025-11-01", 7).as_deref(), Some("2025-11-08"));
        assert_eq!(shift_days("2025-11-01", -7).as_deref(), Some("2025-10-25"));
        assert_eq!(shift_days("2024-12-30", 7).as_deref(), Some("2025-01-06"));
        assert_eq!(shift_days("not-a-date", 7), None);
    }

    #[test]
    fn steps_months_across_year_boundaries() {
        assert_eq!(step_month(2025, 12, 1), (2026, 1));
        assert_eq!(step_month(2025, 1, -1), (2024, 12));
        assert_eq!(step_month(2025, 6, 0), (2025, 6));
        assert_eq!(step_month(2025, 1, -13), (2023, 12));
    }

    #[test]
    fn month_lengths_respect_leap_years() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2025, 2), 28);
        assert_eq!(days_in_month(2025, 11), 30);
        assert_eq!(days_in_month(2025, 12), 31);
    }

    #[test]
    fn calendar_layout_numbers() {
        // November 2025 starts on a Saturday.
        assert_eq!(first_weekday_offset(2025, 11), 6);
        assert_eq!(day_of_month("2025-11-06"), Some(6));
    }

    #[test]
    fn day_headings() {
        assert_eq!(friendly_day_heading("2025-11-01"), "Saturday, November 1");
        assert_eq!(friendly_day_heading("garbage"), "garbage");
    }

    #[test]
    fn month_names() {
        assert_eq!(month_name(11), "November");
        assert_eq!(short_month_name(3), "Mar");
        assert_eq!(month_name(13), "");
    }
}
