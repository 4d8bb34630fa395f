//! Console reporter with colored output

use super::order_caption;
use crate::bank::Descriptions;
use crate::{Band, QuizOptions, QuizResults, RankedScore, ResultsLayout, SCALE_MAX};
use colored::{ColoredString, Colorize};
use std::fmt::Write;

const GRID_COLUMNS: usize = 2;
const GRID_CELL_WIDTH: usize = 38;
const DESCRIPTION_WIDTH: usize = 72;

/// Reporter for terminal output
pub struct ConsoleReporter {
    /// Whether to use colors
    use_colors: bool,
    /// Row-per-category or card grid
    layout: ResultsLayout,
    /// Whether to print category descriptions
    show_descriptions: bool,
}

impl ConsoleReporter {
    /// Create a new console reporter
    pub fn new() -> Self {
        Self {
            use_colors: true,
            layout: ResultsLayout::Accordion,
            show_descriptions: false,
        }
    }

    /// Layout and descriptions from the quiz options
    pub fn from_options(options: &QuizOptions) -> Self {
        Self {
            use_colors: true,
            layout: options.results_layout,
            show_descriptions: options.show_descriptions,
        }
    }

    /// Disable colors
    pub fn without_colors(mut self) -> Self {
        self.use_colors = false;
        self
    }

    /// Print the results view
    pub fn report(&self, results: &QuizResults, descriptions: &Descriptions) {
        print!("{}", self.render(results, descriptions));
    }

    /// Report in quiet mode (one line per category)
    pub fn report_quiet(&self, results: &QuizResults) {
        for entry in &results.ranked {
            println!(
                "{}: {:.1} ({})",
                entry.category,
                entry.score,
                self.band_label(entry.band)
            );
        }
    }

    /// Build the results view as text
    pub fn render(&self, results: &QuizResults, descriptions: &Descriptions) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", self.bold("Your Wheel of Health"));
        let _ = writeln!(out, "{}", self.dimmed(order_caption(results.sort_order)));
        let _ = writeln!(out);

        match self.layout {
            ResultsLayout::Accordion => self.render_rows(&mut out, &results.ranked, descriptions),
            ResultsLayout::Grid => self.render_grid(&mut out, &results.ranked, descriptions),
        }

        let _ = writeln!(
            out,
            "{}",
            self.dimmed(&format!(
                "{} answers across {} categories",
                results.answers.len(),
                results.ranked.len()
            ))
        );
        out
    }

    fn render_rows(&self, out: &mut String, ranked: &[RankedScore], descriptions: &Descriptions) {
        let name_width = ranked
            .iter()
            .map(|r| r.category.chars().count())
            .max()
            .unwrap_or(0);

        for entry in ranked {
            let _ = writeln!(
                out,
                "   {} {:<width$}  {:>4} / {}  {}  {}",
                self.paint("●", entry.band),
                entry.category,
                format!("{:.1}", entry.score),
                entry.scale_max,
                self.create_mini_bar(entry.score),
                self.band_label(entry.band),
                width = name_width
            );
            if self.show_descriptions {
                for line in markup_to_text(descriptions.get(&entry.category)) {
                    let _ = writeln!(out, "       {}", self.dimmed(&line));
                }
                let _ = writeln!(out);
            }
        }
        let _ = writeln!(out);
    }

    fn render_grid(&self, out: &mut String, ranked: &[RankedScore], descriptions: &Descriptions) {
        for row in ranked.chunks(GRID_COLUMNS) {
            let mut line = String::from("   ");
            for entry in row {
                let cell = format!(
                    "{} {:.1}/{} {}",
                    entry.category, entry.score, entry.scale_max, entry.band
                );
                let padding = GRID_CELL_WIDTH.saturating_sub(cell.chars().count());
                line.push_str(&format!(
                    "{} {} {:.1}/{} {}{}",
                    self.paint("■", entry.band),
                    self.bold(&entry.category),
                    entry.score,
                    entry.scale_max,
                    self.band_label(entry.band),
                    " ".repeat(padding)
                ));
            }
            let _ = writeln!(out, "{}", line.trim_end());
        }
        let _ = writeln!(out);

        if self.show_descriptions {
            for entry in ranked {
                let _ = writeln!(out, "   {}", self.bold(&entry.category));
                for text in markup_to_text(descriptions.get(&entry.category)) {
                    let _ = writeln!(out, "     {}", self.dimmed(&text));
                }
                let _ = writeln!(out);
            }
        }
    }

    fn create_mini_bar(&self, score: f64) -> String {
        let filled = (score.round() as usize).min(SCALE_MAX as usize);
        format!(
            "{}{}",
            "█".repeat(filled),
            "░".repeat(SCALE_MAX as usize - filled)
        )
    }

    fn band_label(&self, band: Band) -> String {
        self.paint(&band.to_string(), band).to_string()
    }

    fn paint(&self, text: &str, band: Band) -> ColoredString {
        if !self.use_colors {
            return text.normal();
        }
        match band {
            Band::Constraint => text.red(),
            Band::Moderate => text.yellow(),
            Band::Strong => text.green(),
        }
    }

    fn bold(&self, text: &str) -> ColoredString {
        if self.use_colors {
            text.bold()
        } else {
            text.normal()
        }
    }

    fn dimmed(&self, text: &str) -> ColoredString {
        if self.use_colors {
            text.dimmed()
        } else {
            text.normal()
        }
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Reduce description markup to plain text lines for the terminal
fn markup_to_text(markup: &str) -> Vec<String> {
    html2text::from_read(markup.as_bytes(), DESCRIPTION_WIDTH)
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
