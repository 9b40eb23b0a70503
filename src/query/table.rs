//! Result table formatting
//!
//! Maps measurements into display cells with timestamps shown in a local
//! timezone. Shared by the TUI results table and the one-shot CLI output.

use chrono::{DateTime, Local, TimeZone, Utc};

use crate::query::measurement::Measurement;

/// Column headings, in display order
pub const COLUMNS: [&str; 7] = [
    "ID",
    "Patient",
    "Systolic",
    "Diastolic",
    "Heart Rate",
    "Measured At",
    "Received At",
];

/// Shown instead of the table when a search has no rows
pub const EMPTY_RESULTS_HINT: &str =
    "No measurements found. Try running the simulator or sending data via Swagger.";

const DISPLAY_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub cells: [String; 7],
}

impl ResultRow {
    /// Format `m` with timestamps in the system timezone
    pub fn from_measurement(m: &Measurement) -> Self {
        Self::from_measurement_in(m, &Local)
    }

    /// Format `m` with timestamps in `tz`
    pub fn from_measurement_in<Tz: TimeZone>(m: &Measurement, tz: &Tz) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self {
            cells: [
                m.id.to_string(),
                m.patient_id.clone(),
                m.systolic.to_string(),
                m.diastolic.to_string(),
                m.heart_rate.to_string(),
                format_local(&m.measured_at, tz),
                format_local(&m.received_at, tz),
            ],
        }
    }
}

/// Results heading, e.g. `Results (3)`
pub fn results_heading(count: usize) -> String {
    format!("Results ({})", count)
}

/// Render a timestamp as wall-clock time in `tz`
pub fn format_local<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant
        .with_timezone(tz)
        .format(DISPLAY_TIME_FORMAT)
        .to_string()
}

/// Build all rows in result order
pub fn rows_in<Tz: TimeZone>(measurements: &[Measurement], tz: &Tz) -> Vec<ResultRow>
where
    Tz::Offset: std::fmt::Display,
{
    measurements
        .iter()
        .map(|m| ResultRow::from_measurement_in(m, tz))
        .collect()
}

/// Plain-text table with padded columns
///
/// Starts with the results heading; an empty result set renders the hint
/// line instead of a table.
pub fn render_text_table<Tz: TimeZone>(measurements: &[Measurement], tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let mut out = results_heading(measurements.len());
    out.push('\n');

    if measurements.is_empty() {
        out.push_str(EMPTY_RESULTS_HINT);
        out.push('\n');
        return out;
    }

    let rows = rows_in(measurements, tz);
    let mut widths = COLUMNS.map(|c| c.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header: Vec<String> = COLUMNS.iter().map(|c| c.to_string()).collect();
    push_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_line(&mut out, &rule, &widths);
    for row in &rows {
        push_line(&mut out, &row.cells, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn sample() -> Measurement {
        Measurement {
            id: 1,
            patient_id: "patient-1".to_string(),
            systolic: 120,
            diastolic: 80,
            heart_rate: 70,
            measured_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
            received_at: Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 5).unwrap(),
        }
    }

    #[test]
    fn test_row_formats_times_in_zone() {
        let plus_one = FixedOffset::east_opt(3600).unwrap();
        let row = ResultRow::from_measurement_in(&sample(), &plus_one);
        assert_eq!(
            row.cells,
            [
                "1".to_string(),
                "patient-1".to_string(),
                "120".to_string(),
                "80".to_string(),
                "70".to_string(),
                "2024-01-01 11:00:00".to_string(),
                "2024-01-01 11:00:05".to_string(),
            ]
        );
    }

    #[test]
    fn test_text_table_empty() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let text = render_text_table(&[], &utc);
        assert_eq!(text, format!("Results (0)\n{}\n", EMPTY_RESULTS_HINT));
    }

    #[test]
    fn test_text_table_layout() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let text = render_text_table(&[sample()], &utc);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Results (1)");
        assert!(lines[1].starts_with("ID  Patient    Systolic"));
        assert!(lines[2].starts_with("--  ---------  --------"));
        assert!(lines[3].starts_with("1   patient-1  120"));
        assert!(lines[3].ends_with("2024-01-01 10:00:05"));
        assert_eq!(lines.len(), 4);
    }
}
