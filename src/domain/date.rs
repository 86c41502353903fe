use chrono::NaiveDate;

const ISO_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Parses a calendar date written either as `YYYY-MM-DD` or `DD/MM/YYYY`.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, DISPLAY_FORMAT))
}

/// Renders a date as `DD/MM/YYYY`, or an empty string when absent.
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_default()
}
