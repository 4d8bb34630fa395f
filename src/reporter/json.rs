//! JSON reporter for machine-readable output

use crate::bank::Descriptions;
use crate::scoring::{radar_points, RadarPoint};
use crate::{AnswerSet, Band, QuizResults, SortOrder};
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

    /// Report quiz results as JSON. Descriptions are attached per category when given.
    pub fn report(&self, results: &QuizResults, descriptions: Option<&Descriptions>) -> String {
        let output = JsonOutput {
            generated_at: chrono::Utc::now().to_rfc3339(),
            questions_answered: results.answers.len(),
            sort_order: results.sort_order,
            results: results
                .ranked
                .iter()
                .map(|r| JsonResult {
                    category: &r.category,
                    score: r.score,
                    scale_max: r.scale_max,
                    band: r.band,
                    level: r.band.level(),
                    description: descriptions.map(|d| d.get(&r.category)),
                })
                .collect(),
            radar: radar_points(&results.scores),
            answers: &results.answers,
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
struct JsonOutput<'a> {
    generated_at: String,
    questions_answered: usize,
    sort_order: SortOrder,
    results: Vec<JsonResult<'a>>,
    radar: Vec<RadarPoint>,
    answers: &'a AnswerSet,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonResult<'a> {
    category: &'a str,
    score: f64,
    scale_max: u8,
    band: Band,
    level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
}
