//! JSON reporter for machine-readable output

use crate::analyzer::AggregateStats;
use crate::FeedbackReport;
use serde::Serialize;

/// Reporter for JSON output
pub struct JsonReporter {
    /// Whether to pretty-print JSON
    pretty: bool,
}

impl JsonReporter {
    /// Create a new JSON reporter
    pub fn new() -> Self {
        Self { pretty: false }
    }

    /// Enable pretty-printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Report a single evaluation as JSON
    pub fn report(&self, report: &FeedbackReport) -> String {
        if self.pretty {
            serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
        }
    }

    /// Report multiple evaluations as a JSON array of {source, report}
    pub fn report_many(&self, results: &[(String, FeedbackReport)]) -> String {
        let entries: Vec<JsonEntry> = results
            .iter()
            .map(|(source, report)| JsonEntry { source, report })
            .collect();
        if self.pretty {
            serde_json::to_string_pretty(&entries).unwrap_or_else(|_| "[]".to_string())
        } else {
            serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
        }
    }

    /// Report with summary
    pub fn report_with_summary(
        &self,
        results: &[(String, FeedbackReport)],
        stats: &AggregateStats,
    ) -> String {
        let entries: Vec<JsonEntry> = results
            .iter()
            .map(|(source, report)| JsonEntry { source, report })
            .collect();
        let output = JsonOutput {
            results: entries,
            summary: JsonSummary {
                prompts_evaluated: stats.prompts_evaluated,
                average_score: stats.average_score.value,
                average_grade: stats.average_score.grade.to_string(),
                total_improvements: stats.total_improvements,
            },
        };

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        } else {
            serde_json::to_string(&output).unwrap_or_else(|_| "{}".to_string())
        }
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonEntry<'a> {
    source: &'a str,
    #[serde(flatten)]
    report: &'a FeedbackReport,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    results: Vec<JsonEntry<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonSummary {
    prompts_evaluated: usize,
    average_score: u8,
    average_grade: String,
    total_improvements: usize,
}
