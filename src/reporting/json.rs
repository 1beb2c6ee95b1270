use crate::error::Result;
use crate::types::{BatchReport, ProcessAnalysis};

/// Pretty JSON for a whole batch.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json(report: &BatchReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Pretty JSON for a single analysis.
///
/// # Errors
/// Returns error if serialization fails.
pub fn analysis_to_json(analysis: &ProcessAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DocumentOutcome, Outcome};

    #[test]
    fn outcome_status_is_tagged() -> Result<()> {
        let report = BatchReport {
            documents: vec![DocumentOutcome {
                source: "a.bpmn".into(),
                outcome: Outcome::Skipped,
            }],
            duration_ms: 3,
        };
        let value: serde_json::Value = serde_json::from_str(&to_json(&report)?)?;
        assert_eq!(value["documents"][0]["status"], "skipped");
        assert_eq!(value["documents"][0]["source"], "a.bpmn");
        assert_eq!(value["durationMs"], 3);
        Ok(())
    }
}
