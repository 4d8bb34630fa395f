//! Per-category score aggregation

use crate::{AnswerSet, CategoryScore};
use serde::Serialize;

/// Round to one decimal place, halves away from zero
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Mean answer value per category, rounded to one decimal.
///
/// One entry per category present in the answers, in the order categories
/// were first answered. Categories with no answers are absent.
pub fn aggregate(answers: &AnswerSet) -> Vec<CategoryScore> {
    let mut totals: Vec<(&str, u32, u32)> = Vec::new();
    for answer in answers.answers() {
        let value = answer.value.value() as u32;
        match totals
            .iter_mut()
            .find(|(category, _, _)| *category == answer.category)
        {
            Some((_, total, count)) => {
                *total += value;
                *count += 1;
            }
            None => totals.push((answer.category.as_str(), value, 1)),
        }
    }

    totals
        .into_iter()
        .map(|(category, total, count)| {
            CategoryScore::new(category, round_one_decimal(total as f64 / count as f64))
        })
        .collect()
}

/// One spoke of the radar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    pub subject: String,
    pub score: f64,
    pub full_mark: u8,
}

/// Chart input for the scores, in the order given
pub fn radar_points(scores: &[CategoryScore]) -> Vec<RadarPoint> {
    scores
        .iter()
        .map(|s| RadarPoint {
            subject: s.category.clone(),
            score: s.score,
            full_mark: s.scale_max,
        })
        .collect()
}
