use chrono::NaiveDate;

/// Placeholder shown when a release date is missing or malformed
pub const INVALID_DATE: &str = "Date invalide";

/// Reformats an ISO `YYYY-MM-DD` date as `DD/MM/YYYY`
pub fn format_date(iso_date: Option<&str>) -> String {
    iso_date
        .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| INVALID_DATE.to_string())
}
