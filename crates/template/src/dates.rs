use chrono::NaiveDate;

/// Formats an ISO calendar date (`2024-03-05`, optionally followed by a time
/// part) as `March 5, 2024`. Empty input stays empty; input that is not a
/// date is returned unchanged.
pub fn format_date(iso: &str) -> String {
    let trimmed = iso.trim();
    if trimmed.is_empty() {
        return String::new();
    }
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    match NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        Ok(date) => date.format("%B %-d, %Y").to_string(),
        Err(e) => {
            log::warn!("Leaving unparseable date '{}' as typed: {}", iso, e);
            iso.to_string()
        }
    }
}
