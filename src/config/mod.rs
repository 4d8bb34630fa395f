//! Configuration loading for Healthwheel

mod schema;

pub use schema::{CliOverrides, Config};

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = ".healthwheelrc.json";

/// Find and load config file with extends resolution. Searches current directory then parents.
pub fn load_config(work_dir: &Path, custom_path: Option<&Path>) -> Result<Config> {
    let path = if let Some(p) = custom_path {
        let path = if p.is_absolute() {
            p.to_path_buf()
        } else {
            work_dir.join(p)
        };
        if path.exists() {
            Some(path)
        } else {
            anyhow::bail!("Config file not found: {}", path.display());
        }
    } else {
        find_config_in_parents(work_dir)
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load_config_with_extends(&path, &mut HashSet::new())
        }
        None => Ok(Config::default()),
    }
}

/// Load a config file and resolve extends chain
fn load_config_with_extends(config_path: &Path, visited: &mut HashSet<PathBuf>) -> Result<Config> {
    // Prevent circular extends
    let canonical = config_path
        .canonicalize()
        .unwrap_or_else(|_| config_path.to_path_buf());
    if !visited.insert(canonical) {
        anyhow::bail!(
            "Circular extends detected in config: {}",
            config_path.display()
        );
    }

    let content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config: {}", config_path.display()))?;
    let mut config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in config: {}", config_path.display()))?;

    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    config.resolve_paths(config_dir);

    if let Some(extends) = config.extends.take() {
        let base_config = resolve_extends(config_path, &extends, visited)?;
        config.merge_from(base_config);
    }

    Ok(config)
}

/// Resolve an extends reference (relative to the extending config) to a config
fn resolve_extends(
    config_path: &Path,
    extends: &str,
    visited: &mut HashSet<PathBuf>,
) -> Result<Config> {
    let config_dir = config_path.parent().unwrap_or(Path::new("."));
    let extends_path = config_dir.join(extends);

    // Ensure it has .json extension
    let extends_path = if extends_path.extension().is_none() {
        extends_path.with_extension("json")
    } else {
        extends_path
    };

    if !extends_path.exists() {
        anyhow::bail!(
            "Extended config not found: {} (referenced from {})",
            extends_path.display(),
            config_path.display()
        );
    }

    load_config_with_extends(&extends_path, visited)
}

/// Search for .healthwheelrc.json in directory and its parents
fn find_config_in_parents(mut dir: &Path) -> Option<PathBuf> {
    loop {
        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// Contents written by `healthwheel init`
pub fn default_config_json() -> String {
    r#"{
  "questions": "questions.json",
  "descriptions": "descriptions",
  "progressStyle": "bar",
  "sortOrder": "by-score-desc",
  "resultsLayout": "accordion",
  "showDescriptions": false,
  "autoAdvance": true
}
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ProgressStyle, QuizOptions, ResultsLayout, SortOrder};
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_no_config_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.quiz_options(), QuizOptions::default());
    }

    #[test]
    fn test_found_in_parent_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{ "sortOrder": "by-name-asc", "questions": "bank/questions.json" }"#,
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config(&nested, None).unwrap();
        assert_eq!(config.sort_order, Some(SortOrder::ByNameAsc));
        // Relative paths resolve against the config file's directory
        assert_eq!(
            config.questions,
            Some(dir.path().join("bank/questions.json"))
        );
    }

    #[test]
    fn test_custom_path_missing() {
        let dir = TempDir::new().unwrap();
        let err = load_config(dir.path(), Some(Path::new("missing.json"))).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_invalid_json_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILENAME), r#"{ "sortOrder": "sideways" }"#).unwrap();
        let err = load_config(dir.path(), None).unwrap_err();
        assert!(err.to_string().contains("Invalid JSON in config"));
    }

    #[test]
    fn test_config_extends() {
        let dir = TempDir::new().unwrap();

        let base_path = dir.path().join("base.json");
        let mut base_file = fs::File::create(&base_path).unwrap();
        writeln!(
            base_file,
            r#"{{
                "progressStyle": "text",
                "sortOrder": "by-name-asc",
                "seed": 11
            }}"#
        )
        .unwrap();

        let child_path = dir.path().join(CONFIG_FILENAME);
        let mut child_file = fs::File::create(&child_path).unwrap();
        writeln!(
            child_file,
            r#"{{
                "extends": "./base",
                "sortOrder": "by-score-desc",
                "resultsLayout": "grid"
            }}"#
        )
        .unwrap();

        let config = load_config(dir.path(), None).unwrap();

        // Child value overrides base
        assert_eq!(config.sort_order, Some(SortOrder::ByScoreDesc));
        assert_eq!(config.results_layout, Some(ResultsLayout::Grid));
        // Base values are inherited
        assert_eq!(config.progress_style, Some(ProgressStyle::Text));
        assert_eq!(config.seed, Some(11));
    }

    #[test]
    fn test_circular_extends_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.json"), r#"{ "extends": "./b.json" }"#).unwrap();
        fs::write(dir.path().join("b.json"), r#"{ "extends": "./a.json" }"#).unwrap();

        let err = load_config(dir.path(), Some(Path::new("a.json"))).unwrap_err();
        assert!(err.to_string().contains("Circular extends"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let config: Config = serde_json::from_str(
            r#"{ "progressStyle": "text", "sortOrder": "by-name-asc", "autoAdvance": true }"#,
        )
        .unwrap();

        let merged = config.merge_with_cli(CliOverrides {
            sort_order: Some(SortOrder::ByScoreDesc),
            show_descriptions: true,
            manual_advance: true,
            seed: Some(5),
            ..CliOverrides::default()
        });

        let options = merged.quiz_options();
        assert_eq!(options.progress_style, ProgressStyle::Text);
        assert_eq!(options.sort_order, SortOrder::ByScoreDesc);
        assert!(options.show_descriptions);
        assert!(!options.auto_advance);
        assert_eq!(merged.seed, Some(5));
    }

    #[test]
    fn test_default_config_json_parses() {
        let config: Config = serde_json::from_str(&default_config_json()).unwrap();
        assert_eq!(config.quiz_options(), QuizOptions::default());
        assert_eq!(config.questions, Some(PathBuf::from("questions.json")));
    }
}
