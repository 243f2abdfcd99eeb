//! Birth-date parsing and age derivation for the pt-BR locale.

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Parse the long date form the site renders, e.g. `12 de janeiro de 1990`.
pub fn parse_long_date(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw
        .split_whitespace()
        .filter(|t| !t.eq_ignore_ascii_case("de"))
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let day: u32 = parts[0].parse().ok()?;
    let month = month_number(parts[1])?;
    let year: i32 = parts[2].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    let lowered = name.to_lowercase();
    MONTHS
        .iter()
        .position(|m| *m == lowered)
        .map(|idx| idx as u32 + 1)
}

/// Whole years between `birth` and `today`, saturating at zero.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Derive an age from the raw birth-date string.
///
/// Strings of 4 characters or fewer are placeholders the site renders when
/// the birth date is hidden (a bare year at best) and never yield an age.
pub fn derive_age(raw: &str, today: NaiveDate) -> Option<u32> {
    if raw.chars().count() <= 4 {
        return None;
    }
    let birth = parse_long_date(raw)?;
    Some(age_on(birth, today))
}
