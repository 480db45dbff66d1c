use scoring::models::{Event, RaceResult};
use std::borrow::Cow;

use crate::error::Result;

pub const CSV_HEADER: &str = concat!(
    "Position,Sailor Name,Sail Number,Handicap,Finish Time,",
    "Corrected Time,Status,Points,Uploaded By,Uploaded At"
);

/// Results of `event`, ordered by position.
pub fn event_results<'a>(event: &Event, results: &'a [RaceResult]) -> Vec<&'a RaceResult> {
    let mut selected: Vec<&RaceResult> = results
        .iter()
        .filter(|r| event.has_race(&r.race_id))
        .collect();
    selected.sort_by_key(|r| r.position);
    selected
}

pub fn to_csv(event: &Event, results: &[RaceResult]) -> String {
    let mut csv = String::from(CSV_HEADER);
    csv.push('\n');

    for result in event_results(event, results) {
        let fields = [
            result.position.to_string(),
            escape_field(&result.sailor_name).into_owned(),
            escape_field(&result.sail_number).into_owned(),
            result
                .handicap_number
                .map_or_else(|| "-".to_string(), |h| h.to_string()),
            result
                .finish_time
                .map_or_else(|| "-".to_string(), |t| t.to_string()),
            scoring::models::format_seconds(result.corrected_time),
            result.status.map(|s| s.as_str()).unwrap_or_default().to_string(),
            result.points.to_string(),
            escape_field(result.uploaded_by.as_deref().unwrap_or_default()).into_owned(),
            result
                .uploaded_at
                .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default(),
        ];
        csv.push_str(&fields.join(","));
        csv.push('\n');
    }

    csv
}

pub fn to_json(event: &Event, results: &[RaceResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&event_results(event, results))?)
}

/// Quotes a field containing a comma, quote, CR or LF; inner quotes are doubled.
fn escape_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_field_untouched() {
        assert_eq!(escape_field("Ann Smith"), "Ann Smith");
        assert_eq!(escape_field(""), "");
    }

    #[test]
    fn test_escape_quotes_and_separators() {
        assert_eq!(escape_field("Smith, Ann"), "\"Smith, Ann\"");
        assert_eq!(escape_field("The \"Boss\""), "\"The \"\"Boss\"\"\"");
        assert_eq!(escape_field("two\nlines"), "\"two\nlines\"");
        assert_eq!(escape_field("cr\r"), "\"cr\r\"");
    }
}
