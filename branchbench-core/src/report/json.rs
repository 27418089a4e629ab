use std::io::Write;

use super::{Comparison, ReportError, Reporter};

/// A reporter that writes the comparison summary as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn report(&self, comparison: &Comparison, writer: &mut dyn Write) -> Result<(), ReportError> {
        let summary = comparison.summary()?;
        serde_json::to_writer_pretty(&mut *writer, &summary)?;
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::TrialHistory;
    use crate::report::ReportMeta;

    #[test]
    fn test_json_summary() {
        let comparison = Comparison::new(
            ReportMeta {
                command: "dbt parse".to_string(),
                project: "dbt".to_string(),
                dev_branch: "feature".to_string(),
                base_branch: "develop".to_string(),
            },
            TrialHistory::from(vec![8.0, 8.0]),
            TrialHistory::from(vec![10.0, 10.0]),
        );

        let mut buffer = Vec::new();
        JsonReporter.report(&comparison, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(value["command"], "dbt parse");
        assert_eq!(value["dev_branch"], "feature");
        assert_eq!(value["mean"]["improvement"], 20.0);
        assert_eq!(value["median"]["base"], 10.0);
        assert_eq!(value["dev_runs"], serde_json::json!([8.0, 8.0]));
    }
}
