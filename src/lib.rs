//! Healthwheel: Wheel of Health self-assessment quiz
//!
//! This library runs a shuffled rating quiz over a question bank, scores the
//! answers per category and ranks the categories into qualitative bands for
//! the console, JSON and HTML reporters.

pub mod bank;
pub mod config;
pub mod error;
pub mod prompt;
pub mod ranking;
pub mod reporter;
pub mod scoring;
pub mod session;
pub mod shuffle;

pub use error::{BankError, PromptError, RatingError, SessionError};

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Top of the rating scale; every score is reported out of this value
pub const SCALE_MAX: u8 = 10;

/// Stable identifier of a question (not its position in the bank)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QuestionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// Question banks use numeric ids as often as string ids
#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuestionId {
    Number(i64),
    Text(String),
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawQuestionId::deserialize(deserializer)? {
            RawQuestionId::Number(n) => QuestionId(n.to_string()),
            RawQuestionId::Text(s) => QuestionId(s),
        })
    }
}

/// A single quiz prompt, immutable once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Stable question id
    pub id: QuestionId,
    /// Category (dimension) this question contributes to
    pub category: String,
    /// Prompt text
    pub text: String,
    /// Caption for the low end of the scale (rating 1)
    #[serde(default)]
    pub low_label: String,
    /// Caption for the high end of the scale (rating 10)
    #[serde(default)]
    pub high_label: String,
    /// Invert the raw rating before scoring
    #[serde(default)]
    pub flip_value: bool,
}

impl Question {
    /// Final (scored) value for a raw rating, with flip applied
    pub fn score(&self, raw: Rating) -> Rating {
        if self.flip_value {
            raw.flipped()
        } else {
            raw
        }
    }
}

/// A rating on the fixed 1..=10 scale.
///
/// Out-of-range values cannot be represented, so every stored answer is in
/// range by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = SCALE_MAX;

    /// The ten selectable options, lowest first
    pub const ALL: [Rating; 10] = [
        Rating(1),
        Rating(2),
        Rating(3),
        Rating(4),
        Rating(5),
        Rating(6),
        Rating(7),
        Rating(8),
        Rating(9),
        Rating(10),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Mirror the rating across the scale: v -> 11 - v
    pub fn flipped(self) -> Self {
        Self(Self::MAX + Self::MIN - self.0)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or(RatingError::OutOfRange(value as i64))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl FromStr for Rating {
    type Err = RatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| RatingError::NotANumber(trimmed.to_string()))?;
        u8::try_from(value)
            .ok()
            .and_then(Rating::new)
            .ok_or(RatingError::OutOfRange(value))
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scored answer (post-flip value) for one question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub category: String,
    pub value: Rating,
}

/// Answers keyed by question id.
///
/// One entry per id; inserting an id again replaces its answer in place.
/// Iteration follows first-insertion order, which is the order categories
/// are discovered in when scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    entries: Vec<(QuestionId, Answer)>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the answer for `id`, returning the previous answer
    pub fn insert(&mut self, id: QuestionId, answer: Answer) -> Option<Answer> {
        match self.entries.iter_mut().find(|(existing, _)| *existing == id) {
            Some((_, slot)) => Some(std::mem::replace(slot, answer)),
            None => {
                self.entries.push((id, answer));
                None
            }
        }
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Answer> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, answer)| answer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&QuestionId, &Answer)> {
        self.entries.iter().map(|(id, answer)| (id, answer))
    }

    pub fn answers(&self) -> impl Iterator<Item = &Answer> {
        self.entries.iter().map(|(_, answer)| answer)
    }
}

impl FromIterator<(QuestionId, Answer)> for AnswerSet {
    fn from_iter<I: IntoIterator<Item = (QuestionId, Answer)>>(iter: I) -> Self {
        let mut set = AnswerSet::new();
        for (id, answer) in iter {
            set.insert(id, answer);
        }
        set
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (id, answer) in &self.entries {
            map.serialize_entry(id, answer)?;
        }
        map.end()
    }
}

/// Mean score of one category, rounded to one decimal place
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub category: String,
    pub score: f64,
    pub scale_max: u8,
}

impl CategoryScore {
    pub fn new(category: impl Into<String>, score: f64) -> Self {
        Self {
            category: category.into(),
            score,
            scale_max: SCALE_MAX,
        }
    }
}

/// Qualitative band of a category score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Band {
    /// Below 3
    Constraint,
    /// 3 up to (not including) 7
    Moderate,
    /// 7 and above
    Strong,
}

impl Band {
    pub fn from_score(score: f64) -> Self {
        if score < 3.0 {
            Band::Constraint
        } else if score < 7.0 {
            Band::Moderate
        } else {
            Band::Strong
        }
    }

    /// Severity level name used for styling (low, medium, high)
    pub fn level(self) -> &'static str {
        match self {
            Band::Constraint => "low",
            Band::Moderate => "medium",
            Band::Strong => "high",
        }
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Band::Constraint => write!(f, "Constraint"),
            Band::Moderate => write!(f, "Moderate"),
            Band::Strong => write!(f, "Strong"),
        }
    }
}

/// A category score with its band, as listed in the results view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedScore {
    pub category: String,
    pub score: f64,
    pub scale_max: u8,
    pub band: Band,
}

impl From<&CategoryScore> for RankedScore {
    fn from(score: &CategoryScore) -> Self {
        Self {
            category: score.category.clone(),
            score: score.score,
            scale_max: score.scale_max,
            band: Band::from_score(score.score),
        }
    }
}

/// Order of the ranked results list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Highest score first; equal scores keep discovery order
    #[default]
    ByScoreDesc,
    /// Alphabetical by category label
    ByNameAsc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "score" | "by-score-desc" => Ok(SortOrder::ByScoreDesc),
            "name" | "by-name-asc" => Ok(SortOrder::ByNameAsc),
            other => Err(format!("unknown sort order '{}' (expected score or name)", other)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::ByScoreDesc => write!(f, "by-score-desc"),
            SortOrder::ByNameAsc => write!(f, "by-name-asc"),
        }
    }
}

/// How quiz progress is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStyle {
    /// Bar with a percentage ("40% complete")
    #[default]
    Bar,
    /// Plain text ("Question 3 of 10")
    Text,
}

impl FromStr for ProgressStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bar" => Ok(ProgressStyle::Bar),
            "text" => Ok(ProgressStyle::Text),
            other => Err(format!("unknown progress style '{}' (expected bar or text)", other)),
        }
    }
}

/// How the results list is laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultsLayout {
    /// One row per category, descriptions expanded beneath
    #[default]
    Accordion,
    /// Compact multi-column cards
    Grid,
}

impl FromStr for ResultsLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accordion" => Ok(ResultsLayout::Accordion),
            "grid" => Ok(ResultsLayout::Grid),
            other => Err(format!(
                "unknown results layout '{}' (expected accordion or grid)",
                other
            )),
        }
    }
}

/// Presentation options shared by the prompt and the reporters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOptions {
    pub progress_style: ProgressStyle,
    pub sort_order: SortOrder,
    pub results_layout: ResultsLayout,
    pub show_descriptions: bool,
    /// Confirm a rating as soon as it is entered
    pub auto_advance: bool,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            progress_style: ProgressStyle::Bar,
            sort_order: SortOrder::ByScoreDesc,
            results_layout: ResultsLayout::Accordion,
            show_descriptions: false,
            auto_advance: true,
        }
    }
}

/// Everything the reporters need about a finished quiz
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResults {
    /// Order the ranked list was produced in
    pub sort_order: SortOrder,
    /// Per-category scores in discovery order (radar chart order)
    pub scores: Vec<CategoryScore>,
    /// Ranked and banded scores
    pub ranked: Vec<RankedScore>,
    /// The answers the scores were computed from
    pub answers: AnswerSet,
}

impl QuizResults {
    pub fn from_answers(answers: AnswerSet, order: SortOrder) -> Self {
        let scores = scoring::aggregate(&answers);
        let ranked = ranking::rank(&scores, order);
        Self {
            sort_order: order,
            scores,
            ranked,
            answers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(category: &str, value: u8) -> Answer {
        Answer {
            category: category.to_string(),
            value: Rating::new(value).unwrap(),
        }
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_none());
        assert_eq!(Rating::new(1).map(Rating::value), Some(1));
        assert_eq!(Rating::new(10).map(Rating::value), Some(10));
        assert!(Rating::new(11).is_none());
    }

    #[test]
    fn test_rating_parse() {
        assert_eq!("7".parse::<Rating>().unwrap().value(), 7);
        assert_eq!(" 10 \n".parse::<Rating>().unwrap().value(), 10);
        assert!(matches!("0".parse::<Rating>(), Err(RatingError::OutOfRange(0))));
        assert!(matches!("-3".parse::<Rating>(), Err(RatingError::OutOfRange(-3))));
        assert!(matches!("300".parse::<Rating>(), Err(RatingError::OutOfRange(300))));
        assert!(matches!("7.5".parse::<Rating>(), Err(RatingError::NotANumber(_))));
        assert!(matches!("seven".parse::<Rating>(), Err(RatingError::NotANumber(_))));
    }

    #[test]
    fn test_rating_all_is_the_full_scale() {
        let values: Vec<u8> = Rating::ALL.iter().map(|r| r.value()).collect();
        assert_eq!(values, (1..=10).collect::<Vec<u8>>());
    }

    #[test]
    fn test_flip_mirrors_scale() {
        for raw in Rating::ALL {
            assert_eq!(raw.flipped().value(), 11 - raw.value());
            assert_eq!(raw.flipped().flipped(), raw);
        }
    }

    #[test]
    fn test_question_score_applies_flip_only_when_set() {
        let mut q: Question = serde_json::from_str(
            r#"{"id": 1, "category": "Sleep", "text": "I wake up rested"}"#,
        )
        .unwrap();
        assert!(!q.flip_value);
        assert_eq!(q.score(Rating::new(3).unwrap()).value(), 3);

        q.flip_value = true;
        assert_eq!(q.score(Rating::new(3).unwrap()).value(), 8);
    }

    #[test]
    fn test_question_id_accepts_numbers_and_strings() {
        let ids: Vec<QuestionId> = serde_json::from_str(r#"[12, "sleep-1"]"#).unwrap();
        assert_eq!(ids[0].as_str(), "12");
        assert_eq!(ids[1].as_str(), "sleep-1");
    }

    #[test]
    fn test_question_camel_case_fields() {
        let q: Question = serde_json::from_str(
            r#"{"id": "n1", "category": "Nutrition", "text": "t",
                "lowLabel": "Never", "highLabel": "Always", "flipValue": true}"#,
        )
        .unwrap();
        assert_eq!(q.low_label, "Never");
        assert_eq!(q.high_label, "Always");
        assert!(q.flip_value);
    }

    #[test]
    fn test_rating_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("11").is_err());
        assert_eq!(serde_json::from_str::<Rating>("4").unwrap().value(), 4);
    }

    #[test]
    fn test_answer_set_overwrites_in_place() {
        let mut set = AnswerSet::new();
        assert!(set.insert("a".into(), answer("Sleep", 4)).is_none());
        set.insert("b".into(), answer("Stress", 6));
        let previous = set.insert("a".into(), answer("Sleep", 9));

        assert_eq!(previous, Some(answer("Sleep", 4)));
        assert_eq!(set.len(), 2);
        assert_eq!(set.get(&"a".into()), Some(&answer("Sleep", 9)));
        let order: Vec<&str> = set.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
    }

    #[test]
    fn test_answer_set_serializes_as_object() {
        let set: AnswerSet = vec![
            (QuestionId::from(2), answer("Sleep", 4)),
            (QuestionId::from(1), answer("Stress", 8)),
        ]
        .into_iter()
        .collect();

        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["2"]["category"], "Sleep");
        assert_eq!(json["2"]["value"], 4);
        assert_eq!(json["1"]["value"], 8);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(Band::from_score(1.0), Band::Constraint);
        assert_eq!(Band::from_score(2.9), Band::Constraint);
        assert_eq!(Band::from_score(3.0), Band::Moderate);
        assert_eq!(Band::from_score(6.9), Band::Moderate);
        assert_eq!(Band::from_score(7.0), Band::Strong);
        assert_eq!(Band::from_score(10.0), Band::Strong);
    }

    #[test]
    fn test_band_display_and_level() {
        assert_eq!(Band::Constraint.to_string(), "Constraint");
        assert_eq!(Band::Moderate.level(), "medium");
        assert_eq!(Band::Strong.level(), "high");
    }

    #[test]
    fn test_option_enums_parse() {
        assert_eq!("score".parse::<SortOrder>().unwrap(), SortOrder::ByScoreDesc);
        assert_eq!("by-name-asc".parse::<SortOrder>().unwrap(), SortOrder::ByNameAsc);
        assert!("random".parse::<SortOrder>().is_err());
        assert_eq!("TEXT".parse::<ProgressStyle>().unwrap(), ProgressStyle::Text);
        assert_eq!("grid".parse::<ResultsLayout>().unwrap(), ResultsLayout::Grid);
    }

    #[test]
    fn test_quiz_results_from_answers() {
        let set: AnswerSet = vec![
            (QuestionId::from("q1"), answer("catA", 4)),
            (QuestionId::from("q2"), answer("catA", 8)),
            (QuestionId::from("q3"), answer("catB", 10)),
        ]
        .into_iter()
        .collect();

        let results = QuizResults::from_answers(set, SortOrder::ByScoreDesc);
        assert_eq!(results.scores.len(), 2);
        assert_eq!(results.ranked[0].category, "catB");
        assert_eq!(results.ranked[0].band, Band::Strong);
        assert_eq!(results.ranked[1].score, 6.0);
        assert_eq!(results.answers.len(), 3);
    }
}
