//! Fixed-width result table
//!
//! One line per object: label, date, first producer, classifiers. Longer
//! values are cut to the column width; newlines become spaces so every row
//! stays on one line.

use lux_common::SearchResult;

pub const LABEL_WIDTH: usize = 30;
pub const DATE_WIDTH: usize = 15;
pub const PRODUCED_BY_WIDTH: usize = 40;
pub const CLASSIFIED_AS_WIDTH: usize = 30;

fn cell(text: &str, width: usize) -> String {
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(width)
        .collect();
    format!("{:<width$}", flat, width = width)
}

pub fn header() -> String {
    format!(
        "{}{}{}{}",
        cell("Label", LABEL_WIDTH),
        cell("Date", DATE_WIDTH),
        cell("Produced By", PRODUCED_BY_WIDTH),
        cell("Classified As", CLASSIFIED_AS_WIDTH)
    )
}

pub fn render_row(result: &SearchResult) -> String {
    let producer = result
        .produced_by
        .first()
        .map(|p| p.name.as_str())
        .unwrap_or("");

    format!(
        "{}{}{}{}",
        cell(&result.label, LABEL_WIDTH),
        cell(result.date.as_deref().unwrap_or(""), DATE_WIDTH),
        cell(producer, PRODUCED_BY_WIDTH),
        cell(&result.classified_as, CLASSIFIED_AS_WIDTH)
    )
}

/// Header, dash rule and one row per result, sorted by label (case-insensitive)
///
/// Sorts regardless of the order the server sent.
pub fn render_table(results: &[SearchResult]) -> Vec<String> {
    let mut sorted: Vec<&SearchResult> = results.iter().collect();
    sorted.sort_by_cached_key(|r| r.label.to_lowercase());

    let header = header();
    let rule = "-".repeat(header.chars().count());

    let mut lines = Vec::with_capacity(sorted.len() + 2);
    lines.push(header);
    lines.push(rule);
    lines.extend(sorted.into_iter().map(render_row));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use lux_common::ProducerRecord;

    const ROW_WIDTH: usize = LABEL_WIDTH + DATE_WIDTH + PRODUCED_BY_WIDTH + CLASSIFIED_AS_WIDTH;

    fn result(label: &str, producers: &[&str], classified_as: &str) -> SearchResult {
        SearchResult {
            id: 1,
            label: label.to_string(),
            date: Some("1951".to_string()),
            produced_by: producers
                .iter()
                .map(|name| ProducerRecord {
                    part: String::new(),
                    name: name.to_string(),
                    nationalities: String::new(),
                    timespan: String::new(),
                })
                .collect(),
            classified_as: classified_as.to_string(),
        }
    }

    #[test]
    fn test_header_and_rule() {
        let lines = render_table(&[]);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Label"));
        assert_eq!(lines[0].chars().count(), ROW_WIDTH);
        assert_eq!(lines[1], "-".repeat(ROW_WIDTH));
    }

    #[test]
    fn test_row_columns() {
        let row = render_row(&result("Blue Vase", &["Maria Alba", "Ann"], "Ceramics\nVessels"));

        assert_eq!(row.chars().count(), ROW_WIDTH);
        assert_eq!(&row[..LABEL_WIDTH], format!("{:<30}", "Blue Vase"));
        assert_eq!(&row[30..45], format!("{:<15}", "1951"));
        assert_eq!(&row[45..85], format!("{:<40}", "Maria Alba"));
        assert_eq!(&row[85..], format!("{:<30}", "Ceramics Vessels"));
    }

    #[test]
    fn test_long_values_truncated() {
        let long = "x".repeat(100);
        let mut r = result(&long, &[&long], &long);
        r.date = Some(long.clone());
        let row = render_row(&r);
        assert_eq!(row.chars().count(), ROW_WIDTH);
        assert!(!row.contains(' '));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let row = render_row(&result(&"é".repeat(40), &[], ""));
        assert_eq!(row.chars().count(), ROW_WIDTH);
        assert!(row.starts_with(&"é".repeat(30)));
    }

    #[test]
    fn test_missing_producer_and_date_are_blank() {
        let mut r = result("Fragment", &[], "");
        r.date = None;
        let row = render_row(&r);
        assert_eq!(row.trim_end(), "Fragment");
    }

    #[test]
    fn test_rows_sorted_by_label_case_insensitive() {
        let lines = render_table(&[
            result("bowl", &[], ""),
            result("Cup", &[], ""),
            result("Amphora", &[], ""),
        ]);
        let labels: Vec<&str> = lines[2..].iter().map(|l| l[..LABEL_WIDTH].trim_end()).collect();
        assert_eq!(labels, vec!["Amphora", "bowl", "Cup"]);
    }
}
