use std::io::Write;

use colored::Colorize;

use super::{format_runs, render, Comparison, ReportError, Reporter};

/// A reporter that prints the comparison table and raw runs to a terminal.
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    /// Whether to use colors in output (defaults to true).
    use_colors: bool,
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalReporter {
    /// Create a new terminal reporter with default settings.
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    /// Create a terminal reporter with color output disabled.
    pub fn without_colors() -> Self {
        Self { use_colors: false }
    }

    /// Color a rendered row according to what it reports.
    ///
    /// Coloring happens after layout so escape codes never affect widths.
    fn paint(&self, row: &str, is_header: bool) -> String {
        if !self.use_colors {
            return row.to_string();
        }

        if is_header {
            row.bold().to_string()
        } else if row.starts_with("IMPROVED BY") {
            row.green().bold().to_string()
        } else if row.starts_with("DEGRADED BY") {
            row.red().bold().to_string()
        } else {
            row.to_string()
        }
    }

    /// Print the raw durations of both branches, sorted.
    fn print_raw_runs(
        &self,
        writer: &mut dyn Write,
        comparison: &Comparison,
    ) -> Result<(), ReportError> {
        writeln!(
            writer,
            "raw dev_runs:  {}",
            format_runs(&comparison.dev.sorted())
        )?;
        writeln!(
            writer,
            "raw base_runs: {}",
            format_runs(&comparison.base.sorted())
        )?;
        Ok(())
    }
}

impl Reporter for TerminalReporter {
    fn report(&self, comparison: &Comparison, writer: &mut dyn Write) -> Result<(), ReportError> {
        let rows = render(&comparison.lines()?)?;

        writeln!(writer)?;
        for (index, row) in rows.iter().enumerate() {
            writeln!(writer, "{}", self.paint(row, index == 0))?;
        }

        self.print_raw_runs(writer, comparison)?;
        writeln!(writer)?;

        Ok(())
    }
}
