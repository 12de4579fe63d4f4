//! Recommend command implementation
//!
//! Loads the artifact directory, builds the similarity index, and prints the
//! books nearest to the selected title.

use super::validate_artifacts_dir;
use crate::error::{CliError, Result};
use crate::output;
use bibliorec::artifacts;
use bibliorec::config::RecommendConfig;
use bibliorec::index::{IndexKind, Metric};
use bibliorec::recommend::Recommendation;
use colored::Colorize;
use serde::Serialize;
use std::path::Path;

/// Flag overrides layered over the config file
#[derive(Debug, Default)]
pub(crate) struct Overrides {
    pub(crate) max_results: Option<usize>,
    pub(crate) index: Option<IndexKind>,
    pub(crate) metric: Option<Metric>,
}

/// Recommendation with the cover placeholder applied
#[derive(Serialize)]
struct RecommendationView<'a> {
    title: &'a str,
    author: &'a str,
    cover: &'a str,
    has_cover: bool,
    distance: f64,
}

/// Recommend result for JSON output
#[derive(Serialize)]
struct RecommendResult<'a> {
    query: &'a str,
    recommendations: Vec<RecommendationView<'a>>,
}

/// Merge the config file (if any) with flag overrides.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    overrides: &Overrides,
) -> Result<RecommendConfig> {
    let mut config = match config_path {
        Some(path) => RecommendConfig::from_json_file(path)
            .map_err(|e| CliError::InvalidConfig(format!("{}: {e}", path.display())))?,
        None => RecommendConfig::default(),
    };
    if let Some(n) = overrides.max_results {
        config.max_results = n;
    }
    if let Some(index) = overrides.index {
        config.index = index;
    }
    if let Some(metric) = overrides.metric {
        config.metric = metric;
    }
    config.validate()?;
    Ok(config)
}

/// Run the recommend command
pub(crate) fn run(
    dir: &Path,
    title: &str,
    config_path: Option<&Path>,
    overrides: &Overrides,
    json_output: bool,
) -> Result<()> {
    validate_artifacts_dir(dir)?;
    let config = resolve_config(config_path, overrides)?;
    let recommender = artifacts::load_recommender(dir, &config)?;
    let recommendations = recommender.recommend_default(title)?;
    let placeholder = config.cover.placeholder.as_str();

    if json_output {
        let result = RecommendResult {
            query: title,
            recommendations: recommendations
                .iter()
                .map(|r| view(r, placeholder))
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    output::section(&format!("Books similar to: {title}"));
    if recommendations.is_empty() {
        output::warn("No recommendations found!");
        return Ok(());
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!("\n{} {}", format!("{}.", rank + 1).dimmed(), rec.title.bold());
        output::kv("Author", &rec.author);
        output::kv("Cover", rec.cover_or(placeholder));
    }
    Ok(())
}

fn view<'a>(rec: &'a Recommendation, placeholder: &'a str) -> RecommendationView<'a> {
    RecommendationView {
        title: &rec.title,
        author: &rec.author,
        cover: rec.cover_or(placeholder),
        has_cover: rec.cover.is_some(),
        distance: rec.distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_overrides_apply_over_defaults() {
        let overrides = Overrides {
            max_results: Some(2),
            index: Some(IndexKind::Hnsw),
            metric: Some(Metric::Cosine),
        };
        let config = resolve_config(None, &overrides).expect("valid");
        assert_eq!(config.max_results, 2);
        assert_eq!(config.index, IndexKind::Hnsw);
        assert_eq!(config.metric, Metric::Cosine);
    }

    #[test]
    fn test_zero_results_rejected() {
        let overrides = Overrides {
            max_results: Some(0),
            ..Overrides::default()
        };
        assert!(matches!(
            resolve_config(None, &overrides),
            Err(CliError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{"max_results": 7, "metric": "cosine"}}"#).expect("write");
        let overrides = Overrides {
            max_results: Some(3),
            ..Overrides::default()
        };
        let config = resolve_config(Some(file.path()), &overrides).expect("valid");
        assert_eq!(config.max_results, 3);
        assert_eq!(config.metric, Metric::Cosine);
    }

    #[test]
    fn test_bad_config_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "not json").expect("write");
        assert!(matches!(
            resolve_config(Some(file.path()), &Overrides::default()),
            Err(CliError::InvalidConfig(_))
        ));
    }
}
