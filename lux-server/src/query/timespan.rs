//! Agent active-date display
//!
//! Years are the first four characters of the stored date. A year starting
//! with `0` is shown as BCE by prefixing `-`.

/// Build the display string for an agent's begin/end dates
///
/// | begin  | end    | result          |
/// |--------|--------|-----------------|
/// | `0580` | `0550` | `-0580 – -0550` |
/// | `1976` | absent | `1976–`         |
/// | absent | `2001` | `2001`          |
/// | absent | absent | empty           |
///
/// Dates shorter than four characters count as absent.
pub fn format_timespan(begin: Option<&str>, end: Option<&str>) -> String {
    match (year_token(begin), year_token(end)) {
        (Some(begin), Some(end)) => format!("{} – {}", begin, end),
        (Some(begin), None) => format!("{}–", begin),
        (None, Some(end)) => end,
        (None, None) => String::new(),
    }
}

fn year_token(date: Option<&str>) -> Option<String> {
    let date = date?;
    if date.chars().count() < 4 {
        return None;
    }

    let year: String = date.chars().take(4).collect();
    if year.starts_with('0') {
        Some(format!("-{}", year))
    } else {
        Some(year)
    }
}
