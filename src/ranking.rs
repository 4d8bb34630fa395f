//! Ordering and banding of category scores

use crate::scoring::aggregate;
use crate::{AnswerSet, CategoryScore, RankedScore, SortOrder};
use std::cmp::Ordering;

/// Order scores and attach their bands.
///
/// Both orderings are stable: categories that compare equal keep the order
/// they were given in (discovery order when fed from [`aggregate`]).
pub fn rank(scores: &[CategoryScore], order: SortOrder) -> Vec<RankedScore> {
    let mut ranked: Vec<RankedScore> = scores.iter().map(RankedScore::from).collect();
    match order {
        SortOrder::ByScoreDesc => ranked.sort_by(|a, b| b.score.total_cmp(&a.score)),
        SortOrder::ByNameAsc => ranked.sort_by(|a, b| compare_names(&a.category, &b.category)),
    }
    ranked
}

/// Aggregate and rank in one step
pub fn results(answers: &AnswerSet, order: SortOrder) -> Vec<RankedScore> {
    rank(&aggregate(answers), order)
}

/// Case-insensitive alphabetical, exact comparison as tie-break
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
