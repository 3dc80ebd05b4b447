/// Human-readable byte size for status output: 12.3 KB
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

/// Render a timeline span for table output.
pub fn span(span: &Option<(String, String)>) -> String {
    match span {
        Some((start, end)) if start == end => start.clone(),
        Some((start, end)) => format!("{start} \u{2192} {end}"),
        None => "-".to_string(),
    }
}
