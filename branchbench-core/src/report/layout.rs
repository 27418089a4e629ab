//! Key/value text table layout.
//!
//! Rows carrying a value are rendered as a left-aligned key and a
//! right-aligned value joined by a fill character. Rows without a value are
//! centered headers or separators.

use super::ReportError;

/// Label of the header row prepended to every table.
pub const HEADER_LABEL: &str = "  Benchmark stats  ";

/// Fill character of the header row.
pub const HEADER_FILL: char = ':';

/// Minimum number of fill characters between the widest key and widest value.
pub const MIN_SEPARATION: usize = 6;

/// One entry of a report table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub label: String,
    /// `None` marks a centered header or a blank separator.
    pub value: Option<String>,
    pub fill: char,
}

impl ReportLine {
    /// A key/value row.
    pub fn entry(label: impl Into<String>, value: impl Into<String>, fill: char) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
            fill,
        }
    }

    /// A centered row without a value.
    pub fn heading(label: impl Into<String>, fill: char) -> Self {
        Self {
            label: label.into(),
            value: None,
            fill,
        }
    }

    /// An empty row of spaces.
    pub fn blank() -> Self {
        Self::heading("", ' ')
    }
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn repeat(fill: char, count: usize) -> String {
    std::iter::repeat(fill).take(count).collect()
}

fn render_line(line: &ReportLine, full_width: usize) -> String {
    match &line.value {
        Some(value) => {
            let gap = full_width.saturating_sub(width(&line.label) + width(value));
            format!("{}{}{}", line.label, repeat(line.fill, gap), value)
        }
        None => {
            // Both sides round up, so odd gaps overshoot by one column
            let padding = repeat(
                line.fill,
                full_width.saturating_sub(width(&line.label)).div_ceil(2),
            );
            format!("{}{}{}", padding, line.label, padding)
        }
    }
}

/// Lay out `lines` under a "Benchmark stats" header.
///
/// Keys are measured over value-bearing lines only; values over all lines,
/// absent values counting as zero. After rendering, every row is truncated
/// to the width of the last value-bearing row, which trims the extra column
/// centering adds when a gap is odd.
///
/// # Errors
///
/// Returns [`ReportError::NoValueLines`] if no line carries a value, since
/// such a table has no measurable width.
pub fn render(lines: &[ReportLine]) -> Result<Vec<String>, ReportError> {
    let mut all = Vec::with_capacity(lines.len() + 1);
    all.push(ReportLine::heading(HEADER_LABEL, HEADER_FILL));
    all.extend_from_slice(lines);

    let max_key_width = all
        .iter()
        .filter(|line| line.value.is_some())
        .map(|line| width(&line.label))
        .max()
        .ok_or(ReportError::NoValueLines)?;
    let max_value_width = all
        .iter()
        .map(|line| line.value.as_deref().map_or(0, width))
        .max()
        .unwrap_or(0);
    let full_width = max_key_width + max_value_width + MIN_SEPARATION;

    let rendered: Vec<String> = all
        .iter()
        .map(|line| render_line(line, full_width))
        .collect();

    let reference = all
        .iter()
        .zip(&rendered)
        .rev()
        .find(|(line, _)| line.value.is_some())
        .map(|(_, row)| width(row))
        .ok_or(ReportError::NoValueLines)?;

    Ok(rendered
        .into_iter()
        .map(|row| row.chars().take(reference).collect())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_alignment() {
        let rows = render(&[
            ReportLine::entry("mean dev", "5.00", '.'),
            ReportLine::entry("mean base", "12.25", '.'),
        ])
        .unwrap();

        // widest key 9 + widest value 5 + separation 6
        assert_eq!(rows[1], "mean dev........5.00");
        assert_eq!(rows[2], "mean base......12.25");
    }

    #[test]
    fn test_header_is_centered_and_truncated() {
        let rows = render(&[
            ReportLine::entry("command", "dbt parse", '.'),
            ReportLine::entry("dev branch", "dbt/feature-x", '.'),
            ReportLine::blank(),
        ])
        .unwrap();

        // full width = 10 + 13 + 6 = 29; header gap 10 -> 5 per side
        assert_eq!(rows[0], ":::::  Benchmark stats  :::::");
        assert_eq!(rows[1], "command.............dbt parse");
        assert_eq!(rows[3], " ".repeat(29));
    }

    #[test]
    fn test_odd_gap_overshoot_is_trimmed() {
        let rows = render(&[
            ReportLine::entry("command", "dbt parse", '.'),
            ReportLine::heading("time measured in seconds", ' '),
            ReportLine::entry("IMPROVED BY", "12.5 %", '.'),
            ReportLine::blank(),
        ])
        .unwrap();

        // full width = 11 + 9 + 6 = 26; header gap 7 -> 4 per side, 27 chars
        assert_eq!(rows[0], "::::  Benchmark stats  :::");
        assert_eq!(rows[2], " time measured in seconds ");
        assert!(rows.iter().all(|row| row.chars().count() == 26));
    }

    #[test]
    fn test_all_rows_equal_width() {
        let rows = render(&[
            ReportLine::entry("a", "1", '.'),
            ReportLine::heading("odd", '-'),
            ReportLine::entry("longer key", "longer value", '.'),
            ReportLine::heading("even", '='),
            ReportLine::blank(),
        ])
        .unwrap();

        let widths: Vec<usize> = rows.iter().map(|row| row.chars().count()).collect();
        assert!(widths.iter().all(|&w| w == widths[0]), "{:?}", widths);
        assert_eq!(widths[0], 10 + 12 + 6);
    }

    #[test]
    fn test_headings_do_not_widen_keys() {
        let rows = render(&[
            ReportLine::entry("k", "v", '.'),
            ReportLine::heading("a very long heading that is ignored", ' '),
        ])
        .unwrap();

        // key width comes from "k" only
        assert_eq!(rows[1], "k......v");
        assert!(rows.iter().all(|row| row.chars().count() == 8));
    }

    #[test]
    fn test_single_entry() {
        let rows = render(&[ReportLine::entry("a", "1", '.')]).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], "  Benchm");
        assert_eq!(rows[1], "a......1");
    }

    #[test]
    fn test_non_ascii_fill_and_labels() {
        let rows = render(&[
            ReportLine::entry("médiane", "5 s", '·'),
            ReportLine::blank(),
        ])
        .unwrap();

        assert_eq!(rows[1], "médiane······5 s");
        assert!(rows.iter().all(|row| row.chars().count() == 16));
    }

    #[test]
    fn test_only_separators_is_rejected() {
        let result = render(&[ReportLine::blank(), ReportLine::heading("title", ' ')]);
        assert!(matches!(result, Err(ReportError::NoValueLines)));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(render(&[]), Err(ReportError::NoValueLines)));
    }
}
