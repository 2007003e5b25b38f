//! TOML catalog loader

use aftersale_domain::{CatalogDefinition, CatalogError, SurveyCatalog};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Catalog shipped with the binary
pub const BUNDLED_CATALOG: &str = include_str!("../../catalog/default.toml");

const BUNDLED_ORIGIN: &str = "<bundled>";

/// Errors raised while loading a catalog
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid catalog {origin}: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: CatalogError,
    },
}

/// Loads and validates survey catalogs
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load from `path`, or the bundled catalog when no path is given
    pub fn load(path: Option<&Path>) -> Result<SurveyCatalog, CatalogLoadError> {
        match path {
            Some(path) => Self::load_file(path),
            None => Self::load_bundled(),
        }
    }

    pub fn load_bundled() -> Result<SurveyCatalog, CatalogLoadError> {
        Self::parse(BUNDLED_CATALOG, BUNDLED_ORIGIN)
    }

    pub fn load_file(path: &Path) -> Result<SurveyCatalog, CatalogLoadError> {
        let source = std::fs::read_to_string(path).map_err(|source| CatalogLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source, &path.display().to_string())
    }

    /// Parse and validate catalog TOML. `origin` names the source in errors.
    pub fn parse(source: &str, origin: &str) -> Result<SurveyCatalog, CatalogLoadError> {
        let definition: CatalogDefinition =
            toml::from_str(source).map_err(|source| CatalogLoadError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        let catalog =
            SurveyCatalog::new(definition).map_err(|source| CatalogLoadError::Invalid {
                origin: origin.to_string(),
                source,
            })?;

        // Dangling ids are dropped by the recommender
        for id in catalog.dangling_solution_ids() {
            warn!("Catalog {} refers to unknown solution '{}'", origin, id);
        }
        debug!(
            "Loaded catalog {}: {} questions, {} solutions",
            origin,
            catalog.questions().len(),
            catalog.solutions().len()
        );

        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aftersale_domain::{
        AnswerSet, CtaAction, ScenarioId, next_question, recommend, resolve_scenario,
        visible_questions,
    };
    use std::fs;

    fn recommended_ids(catalog: &SurveyCatalog, answers: &AnswerSet) -> Vec<String> {
        recommend(catalog, answers)
            .into_iter()
            .map(|s| s.id.clone())
            .collect()
    }

    #[test]
    fn test_bundled_catalog_is_valid() {
        let catalog = CatalogLoader::load_bundled().unwrap();
        assert_eq!(catalog.trigger_question_id(), "trigger");
        assert!(catalog.dangling_solution_ids().is_empty());
        assert_eq!(catalog.solutions().len(), 7);

        let parking = catalog.solution("parking-share").unwrap();
        assert_eq!(parking.cta.action, CtaAction::External);
        assert_eq!(parking.partner.as_ref().unwrap().name, "akippa");
    }

    #[test]
    fn test_bundled_catalog_starts_with_trigger() {
        let catalog = CatalogLoader::load(None).unwrap();
        let answers = AnswerSet::new();
        let first = next_question(&catalog, None, &answers, None);
        assert_eq!(first.question().map(|q| q.id.as_str()), Some("trigger"));
    }

    #[test]
    fn test_bundled_moving_excludes_scenario_a() {
        let catalog = CatalogLoader::load_bundled().unwrap();
        let mut answers = AnswerSet::new();
        answers.set_single("trigger", "moving");

        let scenario = resolve_scenario(&catalog, &answers);
        assert_eq!(scenario, Some(ScenarioId::B));
        let visible = visible_questions(&catalog, scenario, &answers);
        assert!(visible.iter().all(|q| q.branch != Some(ScenarioId::A)));
        assert!(visible.iter().any(|q| q.id == "parking"));
    }

    #[test]
    fn test_bundled_suspend_recommends_suspension_only() {
        let catalog = CatalogLoader::load_bundled().unwrap();
        let mut answers = AnswerSet::new();
        answers.set_single("trigger", "moving");
        answers.set_single("insurance", "active");
        answers.set_single("insuranceAction", "suspend");

        let ids = recommended_ids(&catalog, &answers);
        assert!(ids.contains(&"insurance-suspend".to_string()));
        assert!(!ids.contains(&"insurance-review".to_string()));
    }

    #[test]
    fn test_bundled_parking_awareness_follows_vacant_parking() {
        let catalog = CatalogLoader::load_bundled().unwrap();
        let mut answers = AnswerSet::new();
        answers.set_single("trigger", "moving");
        answers.set_single("satisfaction", "satisfied");
        answers.set_single("insurance", "cancelled");
        let scenario = resolve_scenario(&catalog, &answers);

        let next = next_question(&catalog, Some("insurance"), &answers, scenario);
        assert_eq!(next.question().map(|q| q.id.as_str()), Some("parking"));

        answers.set_single("parking", "vacant");
        let next = next_question(&catalog, Some("parking"), &answers, scenario);
        assert_eq!(
            next.question().map(|q| q.id.as_str()),
            Some("parkingAwareness")
        );
    }

    #[test]
    fn test_load_custom_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(
            &path,
            r#"
trigger_question = "reason"

[[questions]]
id = "reason"
phase = "trigger"
text = "Why?"

[[questions.options]]
value = "upgrade"
label = "Upgrade"
next_scenario = "A"
solution_ids = ["ghost"]
"#,
        )
        .unwrap();

        let catalog = CatalogLoader::load(Some(path.as_path())).unwrap();
        assert_eq!(catalog.trigger_question_id(), "reason");
        assert_eq!(catalog.dangling_solution_ids(), vec!["ghost"]);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = CatalogLoader::load_file(&dir.path().join("missing.toml"));
        assert!(matches!(result, Err(CatalogLoadError::Io { .. })));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let result = CatalogLoader::parse("questions = 3", "inline");
        assert!(matches!(result, Err(CatalogLoadError::Parse { .. })));
    }

    #[test]
    fn test_validation_failure_is_reported() {
        let source = r#"
[[questions]]
id = "satisfaction"
phase = "trigger"
text = "How was it?"

[[questions.options]]
value = "good"
label = "Good"
"#;
        let result = CatalogLoader::parse(source, "inline");
        assert!(matches!(
            result,
            Err(CatalogLoadError::Invalid {
                source: CatalogError::MissingTrigger(_),
                ..
            })
        ));
    }
}
