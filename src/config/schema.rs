//! Config schema and deserialization

use crate::{ProgressStyle, QuizOptions, ResultsLayout, SortOrder};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root config structure for .healthwheelrc.json
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Extend another config file (path relative to this config)
    #[serde(default)]
    pub extends: Option<String>,

    /// Question bank JSON file
    #[serde(default)]
    pub questions: Option<PathBuf>,

    /// Directory of `<category>.html` description files
    #[serde(default)]
    pub descriptions: Option<PathBuf>,

    /// Fixed seed for the question order (random when unset)
    #[serde(default)]
    pub seed: Option<u64>,

    /// Progress display: bar or text
    #[serde(default)]
    pub progress_style: Option<ProgressStyle>,

    /// Results order: by-score-desc or by-name-asc
    #[serde(default)]
    pub sort_order: Option<SortOrder>,

    /// Results layout: accordion or grid
    #[serde(default)]
    pub results_layout: Option<ResultsLayout>,

    /// Include category descriptions in the results
    #[serde(default)]
    pub show_descriptions: Option<bool>,

    /// Confirm each rating as soon as it is entered
    #[serde(default)]
    pub auto_advance: Option<bool>,
}

/// Values given on the command line; these win over the config file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub questions: Option<PathBuf>,
    pub descriptions: Option<PathBuf>,
    pub seed: Option<u64>,
    pub progress_style: Option<ProgressStyle>,
    pub sort_order: Option<SortOrder>,
    pub results_layout: Option<ResultsLayout>,
    /// `--show-descriptions` can only turn descriptions on
    pub show_descriptions: bool,
    /// `--manual-advance` can only turn auto-advance off
    pub manual_advance: bool,
}

impl Config {
    /// Merge CLI overrides into config. CLI values take precedence.
    pub fn merge_with_cli(mut self, cli: CliOverrides) -> Self {
        if cli.questions.is_some() {
            self.questions = cli.questions;
        }
        if cli.descriptions.is_some() {
            self.descriptions = cli.descriptions;
        }
        if cli.seed.is_some() {
            self.seed = cli.seed;
        }
        if cli.progress_style.is_some() {
            self.progress_style = cli.progress_style;
        }
        if cli.sort_order.is_some() {
            self.sort_order = cli.sort_order;
        }
        if cli.results_layout.is_some() {
            self.results_layout = cli.results_layout;
        }
        if cli.show_descriptions {
            self.show_descriptions = Some(true);
        }
        if cli.manual_advance {
            self.auto_advance = Some(false);
        }
        self
    }

    /// Merge another config into this one (for extends)
    pub fn merge_from(&mut self, base: Config) {
        // Base values only fill what this config leaves unset
        if self.extends.is_none() {
            self.extends = base.extends;
        }
        if self.questions.is_none() {
            self.questions = base.questions;
        }
        if self.descriptions.is_none() {
            self.descriptions = base.descriptions;
        }
        if self.seed.is_none() {
            self.seed = base.seed;
        }
        if self.progress_style.is_none() {
            self.progress_style = base.progress_style;
        }
        if self.sort_order.is_none() {
            self.sort_order = base.sort_order;
        }
        if self.results_layout.is_none() {
            self.results_layout = base.results_layout;
        }
        if self.show_descriptions.is_none() {
            self.show_descriptions = base.show_descriptions;
        }
        if self.auto_advance.is_none() {
            self.auto_advance = base.auto_advance;
        }
    }

    /// Make relative paths relative to `dir` (the directory of the config file)
    pub fn resolve_paths(&mut self, dir: &Path) {
        for path in [&mut self.questions, &mut self.descriptions].into_iter().flatten() {
            if path.is_relative() {
                *path = dir.join(&*path);
            }
        }
    }

    /// Presentation options with defaults filled in
    pub fn quiz_options(&self) -> QuizOptions {
        let defaults = QuizOptions::default();
        QuizOptions {
            progress_style: self.progress_style.unwrap_or(defaults.progress_style),
            sort_order: self.sort_order.unwrap_or(defaults.sort_order),
            results_layout: self.results_layout.unwrap_or(defaults.results_layout),
            show_descriptions: self.show_descriptions.unwrap_or(defaults.show_descriptions),
            auto_advance: self.auto_advance.unwrap_or(defaults.auto_advance),
        }
    }
}
