//! Bulk Catalog Import
//!
//! Loads a category's seed payload (consequence criteria plus risks) in
//! one validated pass. Criteria keep existing definitions; risks follow
//! the configured duplicate policy.

use std::collections::HashSet;
use std::sync::Arc;

use grc_common::{validate_scale, GrcError, GrcResult};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::{RiskCatalog, RiskDraft, RiskFilter};
use crate::catalogs::BuiltinCatalog;
use crate::criteria::CriteriaStore;

/// How payload risks that duplicate existing descriptions are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPolicy {
    /// Skip a payload risk when its normalized description already exists
    /// in the category
    #[default]
    SkipDuplicates,
    /// Append every payload risk, duplicates included
    AppendAll,
}

/// One consequence criterion seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionSeed {
    pub level: u8,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One risk seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskSeed {
    #[serde(rename = "type", default)]
    pub risk_type: Option<String>,
    pub description: String,
    #[serde(default)]
    pub caused_by: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
}

/// Catalog payload: optional rubric plus the risk list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogPayload {
    #[serde(default)]
    pub consequence_criteria: Vec<CriterionSeed>,
    pub risks: Vec<RiskSeed>,
}

/// Import result counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub risks_imported: usize,
    pub risks_skipped: usize,
    pub criteria_added: usize,
}

/// Catalog importer
pub struct CatalogImporter {
    catalog: Arc<RiskCatalog>,
    criteria: Arc<CriteriaStore>,
    policy: ImportPolicy,
}

impl CatalogImporter {
    pub fn new(catalog: Arc<RiskCatalog>, criteria: Arc<CriteriaStore>) -> Self {
        Self {
            catalog,
            criteria,
            policy: ImportPolicy::default(),
        }
    }

    /// Importer with an explicit duplicate policy
    pub fn with_policy(mut self, policy: ImportPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configured duplicate policy
    pub fn policy(&self) -> ImportPolicy {
        self.policy
    }

    /// Import a payload into the category named by `category_code`.
    ///
    /// The whole payload is validated before anything is written; one bad
    /// row means nothing lands.
    pub fn import(
        &self,
        category_code: &str,
        payload: &CatalogPayload,
    ) -> GrcResult<ImportOutcome> {
        let category = self
            .catalog
            .category_by_code(category_code)
            .ok_or_else(|| GrcError::CategoryNotFound(category_code.to_string()))?;

        for criterion in &payload.consequence_criteria {
            validate_scale("consequence level", criterion.level)?;
        }
        for (index, seed) in payload.risks.iter().enumerate() {
            if seed.description.trim().is_empty() {
                return Err(GrcError::Validation(format!(
                    "risk {} has an empty description",
                    index
                )));
            }
        }

        let mut outcome = ImportOutcome::default();

        for criterion in &payload.consequence_criteria {
            let added = self.criteria.add_if_absent(
                category.id,
                criterion.level,
                criterion.name.clone(),
                criterion.description.clone(),
            )?;
            if added {
                outcome.criteria_added += 1;
            }
        }

        let mut seen: HashSet<String> = match self.policy {
            ImportPolicy::SkipDuplicates => self
                .catalog
                .list_risks(RiskFilter {
                    category_id: Some(category.id),
                    ..Default::default()
                })
                .iter()
                .map(|r| fingerprint(&r.description))
                .collect(),
            ImportPolicy::AppendAll => HashSet::new(),
        };

        for seed in &payload.risks {
            if self.policy == ImportPolicy::SkipDuplicates
                && !seen.insert(fingerprint(&seed.description))
            {
                outcome.risks_skipped += 1;
                continue;
            }
            self.catalog.create_risk(
                &category.id,
                RiskDraft {
                    description: seed.description.clone(),
                    risk_type: seed.risk_type.clone(),
                    caused_by: seed.caused_by.clone(),
                    impact: seed.impact.clone(),
                    ..Default::default()
                },
            )?;
            outcome.risks_imported += 1;
        }

        tracing::info!(
            category = %category.code,
            imported = outcome.risks_imported,
            skipped = outcome.risks_skipped,
            criteria = outcome.criteria_added,
            "imported risk catalog"
        );

        Ok(outcome)
    }

    /// Import a raw JSON payload
    pub fn import_json(&self, category_code: &str, json: &str) -> GrcResult<ImportOutcome> {
        let payload: CatalogPayload = serde_json::from_str(json)
            .map_err(|e| GrcError::Validation(format!("malformed catalog payload: {}", e)))?;
        self.import(category_code, &payload)
    }

    /// Import one of the built-in catalogs
    pub fn import_builtin(&self, builtin: BuiltinCatalog) -> GrcResult<ImportOutcome> {
        self.import(builtin.code(), &builtin.payload())
    }
}

// Stable fingerprint over a trimmed, lowercased description.
fn fingerprint(description: &str) -> String {
    let normalized = description.trim().to_lowercase();
    let mut hasher = Sha256::new();
    hasher.update(normalized.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CategoryDraft;

    fn setup() -> (Arc<RiskCatalog>, Arc<CriteriaStore>, CatalogImporter) {
        let catalog = Arc::new(RiskCatalog::new());
        catalog
            .create_category(CategoryDraft {
                code: "SST".into(),
                name: "Seguridad y Salud en el Trabajo".into(),
                ..Default::default()
            })
            .unwrap();
        let criteria = Arc::new(CriteriaStore::new());
        let importer = CatalogImporter::new(catalog.clone(), criteria.clone());
        (catalog, criteria, importer)
    }

    fn sample_payload() -> CatalogPayload {
        CatalogPayload {
            consequence_criteria: vec![
                CriterionSeed {
                    level: 1,
                    name: "Insignificante".into(),
                    description: "Primeros auxilios".into(),
                },
                CriterionSeed {
                    level: 5,
                    name: "Catastrófico".into(),
                    description: "Fatalidad".into(),
                },
            ],
            risks: vec![
                RiskSeed {
                    risk_type: Some("Mecánico".into()),
                    description: "Atrapamiento por partes móviles".into(),
                    caused_by: Some("Guardas retiradas".into()),
                    impact: Some("Lesión grave".into()),
                },
                RiskSeed {
                    risk_type: Some("Locativo".into()),
                    description: "Caída al mismo nivel".into(),
                    caused_by: None,
                    impact: None,
                },
            ],
        }
    }

    #[test]
    fn test_unknown_category() {
        let (_, _, importer) = setup();
        let err = importer.import("NO_EXISTE", &sample_payload()).unwrap_err();
        assert!(matches!(err, GrcError::CategoryNotFound(ref code) if code == "NO_EXISTE"));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_first_import_then_reimport() {
        let (catalog, criteria, importer) = setup();

        let first = importer.import("SST", &sample_payload()).unwrap();
        assert_eq!(first.risks_imported, 2);
        assert_eq!(first.risks_skipped, 0);
        assert_eq!(first.criteria_added, 2);

        let again = importer.import("SST", &sample_payload()).unwrap();
        assert_eq!(again.risks_imported, 0);
        assert_eq!(again.risks_skipped, 2);
        assert_eq!(again.criteria_added, 0);

        assert_eq!(catalog.risk_count(), 2);
        assert_eq!(criteria.len(), 2);
    }

    #[test]
    fn test_duplicates_within_payload() {
        let (catalog, _, importer) = setup();
        let payload = CatalogPayload {
            consequence_criteria: Vec::new(),
            risks: vec![
                RiskSeed {
                    risk_type: None,
                    description: "Fuga de información".into(),
                    caused_by: None,
                    impact: None,
                },
                RiskSeed {
                    risk_type: None,
                    // trims and case-folds to the same fingerprint
                    description: "  FUGA DE INFORMACIÓN ".into(),
                    caused_by: None,
                    impact: None,
                },
            ],
        };

        let outcome = importer.import("SST", &payload).unwrap();
        assert_eq!(outcome.risks_imported, 1);
        assert_eq!(outcome.risks_skipped, 1);
        assert_eq!(catalog.risk_count(), 1);
    }

    #[test]
    fn test_append_all_policy() {
        let (catalog, _, importer) = setup();
        let importer = importer.with_policy(ImportPolicy::AppendAll);

        importer.import("SST", &sample_payload()).unwrap();
        let second = importer.import("SST", &sample_payload()).unwrap();
        assert_eq!(second.risks_imported, 2);
        assert_eq!(second.risks_skipped, 0);
        assert_eq!(catalog.risk_count(), 4);
    }

    #[test]
    fn test_nothing_lands_on_bad_criterion() {
        let (catalog, criteria, importer) = setup();
        let mut payload = sample_payload();
        payload.consequence_criteria.push(CriterionSeed {
            level: 7,
            name: "Fuera de escala".into(),
            description: String::new(),
        });

        assert!(importer.import("SST", &payload).unwrap_err().is_validation());
        assert_eq!(catalog.risk_count(), 0);
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_nothing_lands_on_blank_risk() {
        let (catalog, criteria, importer) = setup();
        let mut payload = sample_payload();
        payload.risks.push(RiskSeed {
            risk_type: None,
            description: "   ".into(),
            caused_by: None,
            impact: None,
        });

        assert!(importer.import("SST", &payload).unwrap_err().is_validation());
        assert_eq!(catalog.risk_count(), 0);
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_import_json() {
        let (catalog, _, importer) = setup();

        let bad = importer.import_json("SST", "{ not json }");
        assert!(bad.unwrap_err().is_validation());

        let json = r#"{
            "consequence_criteria": [
                {"level": 3, "name": "Moderado", "description": "Incapacidad temporal"}
            ],
            "risks": [
                {"type": "Químico", "description": "Inhalación de vapores", "caused_by": "Ventilación deficiente"}
            ]
        }"#;
        let outcome = importer.import_json("SST", json).unwrap();
        assert_eq!(outcome.risks_imported, 1);
        assert_eq!(outcome.criteria_added, 1);

        let imported = &catalog.list_risks(RiskFilter::default())[0];
        assert_eq!(imported.risk_type.as_deref(), Some("Químico"));
        assert_eq!(imported.caused_by.as_deref(), Some("Ventilación deficiente"));
    }
}
