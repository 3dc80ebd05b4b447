use chrono::{NaiveDate, NaiveDateTime};

/// Textual-month formats tried after ISO and slashed forms.
const TEXTUAL_FORMATS: &[&str] = &["%d %B %Y", "%B %d, %Y", "%B %d %Y", "%d-%b-%Y"];

/// Values carrying a time component; the date part wins.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Permissive date parsing for import input. Accepts ISO, slashed
/// year-first and US month-first (2- or 4-digit year), textual month names
/// and plain datetime strings. Returns None for anything else, so callers
/// can turn that into a row-level error. The concrete format list lives
/// only here.
pub fn parse_flexible(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Some(d) = parse_slashed(raw) {
        return Some(d);
    }
    for fmt in TEXTUAL_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

/// Slashed dates: 2026/02/01, 02/01/2026, 02/01/26. Month-first unless the
/// first part is a 4-digit year.
fn parse_slashed(raw: &str) -> Option<NaiveDate> {
    let parts: Vec<&str> = raw.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    if parts[0].len() == 4 {
        let y: i32 = parts[0].parse().ok()?;
        let m: u32 = parts[1].parse().ok()?;
        let d: u32 = parts[2].parse().ok()?;
        return NaiveDate::from_ymd_opt(y, m, d);
    }
    let m: u32 = parts[0].parse().ok()?;
    let d: u32 = parts[1].parse().ok()?;
    let y: i32 = parts[2].parse().ok()?;
    let y = if parts[2].len() == 2 {
        if y <= 68 {
            2000 + y
        } else {
            1900 + y
        }
    } else {
        y
    };
    NaiveDate::from_ymd_opt(y, m, d)
}

/// Canonical storage form for dates.
pub fn to_iso(d: NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}
