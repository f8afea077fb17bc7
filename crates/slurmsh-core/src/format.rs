//! Formatting utilities for simulated dates, clocks, and wrapped text.

const MS_PER_SECOND: u64 = 1_000;
const SECONDS_PER_DAY: u64 = 86_400;

/// Format simulated time in milliseconds as `MM/DD HH:MM:SS UTC`.
///
/// Calculates month/day from the Unix epoch, accounting for leap years.
pub fn format_sim_date(ms: u64) -> String {
    let secs = ms / MS_PER_SECOND;
    let (month, day) = month_and_day(secs / SECONDS_PER_DAY);
    format!("{:02}/{:02} {} UTC", month, day, format_clock(secs % SECONDS_PER_DAY))
}

/// Format a duration in seconds as `HH:MM:SS`. Hours are not wrapped.
pub fn format_clock(secs: u64) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}

/// 1-based month and day of the given day count since the epoch.
fn month_and_day(days: u64) -> (u64, u64) {
    let mut year = 1970u64;
    let mut remaining = days;

    loop {
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if remaining < days_in_year {
            break;
        }
        remaining -= days_in_year;
        year += 1;
    }

    let days_in_months: [u64; 12] = if is_leap_year(year) {
        [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    } else {
        [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]
    };

    let mut month = 1;
    for days_in_month in days_in_months {
        if remaining < days_in_month {
            break;
        }
        remaining -= days_in_month;
        month += 1;
    }

    (month, remaining + 1)
}

fn is_leap_year(year: u64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Right-align `value` to the width of `max` (for numbered listings).
pub fn pad_number(value: usize, max: usize) -> String {
    let width = max.max(value).to_string().len();
    format!("{:>width$}", value)
}

/// Wrap text at word boundaries so no line reaches `columns` characters.
///
/// Blank lines are kept and leading indentation is preserved, which suits
/// prose such as help topics.
pub fn justify(text: &str, columns: usize) -> Vec<String> {
    let mut wrapped = Vec::new();

    for line in text.split('\n') {
        let mut col = 0;
        let mut current = String::new();
        for word in line.split(' ') {
            let len = word.chars().count();
            if col + len + 1 < columns {
                current.push_str(word);
                current.push(' ');
                col += len + 1;
            } else if len > columns {
                // Overlong words get a line of their own
                current.push_str(word);
                wrapped.push(std::mem::take(&mut current));
                col = 0;
            } else {
                wrapped.push(std::mem::replace(&mut current, format!("{} ", word)));
                col = len + 1;
            }
        }
        wrapped.push(current);
    }

    wrapped
        .iter()
        .map(|line| line.trim_end().to_string())
        .collect()
}
