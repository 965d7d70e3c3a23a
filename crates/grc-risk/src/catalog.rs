//! Risk Taxonomy
//!
//! Categories and the risk register. Categories are stable reference data
//! with immutable codes; risks hang off a category and carry the free-text
//! context an assessor works from.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use grc_common::{validate_text, CategoryId, GrcError, GrcResult, RiskId};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default categories seeded on new deployments: (code, name, description, color, icon)
const DEFAULT_CATEGORIES: [(&str, &str, &str, &str, &str); 6] = [
    (
        "CALIDAD",
        "Calidad",
        "Riesgos de gestión de calidad y conformidad de producto",
        "#2563eb",
        "badge-check",
    ),
    (
        "SST",
        "Seguridad y Salud en el Trabajo",
        "Riesgos de seguridad y salud ocupacional",
        "#dc2626",
        "hard-hat",
    ),
    (
        "AMBIENTAL",
        "Gestión Ambiental",
        "Riesgos ambientales y de cumplimiento normativo",
        "#16a34a",
        "leaf",
    ),
    (
        "CIBERSEGURIDAD",
        "Ciberseguridad",
        "Riesgos de seguridad de la información",
        "#7c3aed",
        "shield",
    ),
    (
        "FINANCIERO",
        "Riesgo Financiero",
        "Riesgos financieros y de fraude",
        "#d97706",
        "banknote",
    ),
    (
        "SEGURIDAD_VIAL",
        "Seguridad Vial",
        "Riesgos viales y de flota",
        "#0891b2",
        "truck",
    ),
];

/// Risk category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskCategory {
    pub id: CategoryId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Risk lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskStatus {
    /// In the register and visible on dashboards
    #[serde(rename = "ACTIVE")]
    Active,
    /// Kept for history, excluded from dashboards
    #[serde(rename = "RETIRED")]
    Retired,
}

/// A catalogued risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Risk {
    pub id: RiskId,
    pub category_id: CategoryId,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub risk_type: Option<String>,
    pub description: String,
    pub caused_by: Option<String>,
    pub impact: Option<String>,
    pub related_activity: Option<String>,
    pub related_process: Option<String>,
    pub status: RiskStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New category request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

/// Category update request; the code is immutable by construction
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

/// New risk request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskDraft {
    pub description: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(rename = "type", default)]
    pub risk_type: Option<String>,
    #[serde(default)]
    pub caused_by: Option<String>,
    #[serde(default)]
    pub impact: Option<String>,
    #[serde(default)]
    pub related_activity: Option<String>,
    #[serde(default)]
    pub related_process: Option<String>,
}

impl RiskDraft {
    /// Draft carrying only a description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }
}

/// Risk update request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskUpdate {
    pub category_id: Option<CategoryId>,
    pub code: Option<String>,
    #[serde(rename = "type")]
    pub risk_type: Option<String>,
    pub description: Option<String>,
    pub caused_by: Option<String>,
    pub impact: Option<String>,
    pub related_activity: Option<String>,
    pub related_process: Option<String>,
    pub status: Option<RiskStatus>,
}

/// Risk list filter
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskFilter {
    pub category_id: Option<CategoryId>,
    pub status: Option<RiskStatus>,
}

/// Category and risk registry
pub struct RiskCatalog {
    /// All categories
    categories: Arc<RwLock<HashMap<CategoryId, RiskCategory>>>,
    /// All risks
    risks: Arc<RwLock<HashMap<RiskId, Risk>>>,
}

impl RiskCatalog {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(HashMap::new())),
            risks: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a category with a unique, immutable code
    pub fn create_category(&self, draft: CategoryDraft) -> GrcResult<RiskCategory> {
        validate_text("category code", &draft.code)?;
        validate_text("category name", &draft.name)?;

        let mut categories = self.categories.write();
        if categories.values().any(|c| c.code == draft.code) {
            return Err(GrcError::Validation(format!(
                "category code {} already exists",
                draft.code
            )));
        }

        let now = Utc::now();
        let category = RiskCategory {
            id: Uuid::new_v4(),
            code: draft.code,
            name: draft.name,
            description: draft.description,
            color: draft.color,
            icon: draft.icon,
            created_at: now,
            updated_at: now,
        };
        categories.insert(category.id, category.clone());

        Ok(category)
    }

    /// Update a category's display fields
    pub fn update_category(
        &self,
        category_id: &CategoryId,
        update: CategoryUpdate,
    ) -> GrcResult<RiskCategory> {
        let mut categories = self.categories.write();
        let category = categories
            .get_mut(category_id)
            .ok_or_else(|| GrcError::CategoryNotFound(category_id.to_string()))?;

        if let Some(name) = update.name {
            validate_text("category name", &name)?;
            category.name = name;
        }
        if let Some(description) = update.description {
            category.description = Some(description);
        }
        if let Some(color) = update.color {
            category.color = Some(color);
        }
        if let Some(icon) = update.icon {
            category.icon = Some(icon);
        }

        category.updated_at = Utc::now();

        Ok(category.clone())
    }

    /// Delete a category with no risks.
    ///
    /// Returns `Ok(false)` when the id is unknown.
    pub fn delete_category(&self, category_id: &CategoryId) -> GrcResult<bool> {
        let mut categories = self.categories.write();
        if !categories.contains_key(category_id) {
            return Ok(false);
        }
        let in_use = self
            .risks
            .read()
            .values()
            .any(|r| r.category_id == *category_id);
        if in_use {
            return Err(GrcError::CategoryInUse(*category_id));
        }
        categories.remove(category_id);
        Ok(true)
    }

    /// Get category
    pub fn category_by_id(&self, category_id: &CategoryId) -> Option<RiskCategory> {
        self.categories.read().get(category_id).cloned()
    }

    /// Get category by its stable code
    pub fn category_by_code(&self, code: &str) -> Option<RiskCategory> {
        self.categories
            .read()
            .values()
            .find(|c| c.code == code)
            .cloned()
    }

    /// All categories, ordered by name
    pub fn list_categories(&self) -> Vec<RiskCategory> {
        let mut all: Vec<RiskCategory> = self.categories.read().values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }

    /// Seed the standard categories, skipping codes already present.
    ///
    /// Returns how many categories were inserted.
    pub fn seed_default_categories(&self) -> usize {
        let mut categories = self.categories.write();
        let mut seeded = 0;

        for (code, name, description, color, icon) in DEFAULT_CATEGORIES {
            if categories.values().any(|c| c.code == code) {
                continue;
            }
            let now = Utc::now();
            let category = RiskCategory {
                id: Uuid::new_v4(),
                code: code.into(),
                name: name.into(),
                description: Some(description.into()),
                color: Some(color.into()),
                icon: Some(icon.into()),
                created_at: now,
                updated_at: now,
            };
            categories.insert(category.id, category);
            seeded += 1;
        }

        if seeded > 0 {
            tracing::info!(seeded, "seeded default risk categories");
        }
        seeded
    }

    /// Register a risk under a category
    pub fn create_risk(&self, category_id: &CategoryId, draft: RiskDraft) -> GrcResult<Risk> {
        if !self.categories.read().contains_key(category_id) {
            return Err(GrcError::Validation(format!(
                "category {} does not exist",
                category_id
            )));
        }
        validate_text("risk description", &draft.description)?;

        let now = Utc::now();
        let risk = Risk {
            id: Uuid::new_v4(),
            category_id: *category_id,
            code: draft.code,
            risk_type: draft.risk_type,
            description: draft.description,
            caused_by: draft.caused_by,
            impact: draft.impact,
            related_activity: draft.related_activity,
            related_process: draft.related_process,
            status: RiskStatus::Active,
            created_at: now,
            updated_at: now,
        };
        self.risks.write().insert(risk.id, risk.clone());

        Ok(risk)
    }

    /// Merge non-empty update fields into a risk
    pub fn update_risk(&self, risk_id: &RiskId, update: RiskUpdate) -> GrcResult<Risk> {
        if let Some(category_id) = &update.category_id {
            if !self.categories.read().contains_key(category_id) {
                return Err(GrcError::Validation(format!(
                    "category {} does not exist",
                    category_id
                )));
            }
        }
        if let Some(description) = &update.description {
            validate_text("risk description", description)?;
        }

        let mut risks = self.risks.write();
        let risk = risks
            .get_mut(risk_id)
            .ok_or(GrcError::RiskNotFound(*risk_id))?;

        if let Some(category_id) = update.category_id {
            risk.category_id = category_id;
        }
        if let Some(code) = update.code {
            risk.code = Some(code);
        }
        if let Some(risk_type) = update.risk_type {
            risk.risk_type = Some(risk_type);
        }
        if let Some(description) = update.description {
            risk.description = description;
        }
        if let Some(caused_by) = update.caused_by {
            risk.caused_by = Some(caused_by);
        }
        if let Some(impact) = update.impact {
            risk.impact = Some(impact);
        }
        if let Some(related_activity) = update.related_activity {
            risk.related_activity = Some(related_activity);
        }
        if let Some(related_process) = update.related_process {
            risk.related_process = Some(related_process);
        }
        if let Some(status) = update.status {
            risk.status = status;
        }

        risk.updated_at = Utc::now();

        Ok(risk.clone())
    }

    /// Flip a risk to RETIRED, keeping its history
    pub fn retire_risk(&self, risk_id: &RiskId) -> GrcResult<Risk> {
        self.update_risk(
            risk_id,
            RiskUpdate {
                status: Some(RiskStatus::Retired),
                ..Default::default()
            },
        )
    }

    /// Get risk
    pub fn risk_by_id(&self, risk_id: &RiskId) -> Option<Risk> {
        self.risks.read().get(risk_id).cloned()
    }

    /// Risks matching the filter, newest first
    pub fn list_risks(&self, filter: RiskFilter) -> Vec<Risk> {
        let mut matching: Vec<Risk> = self
            .risks
            .read()
            .values()
            .filter(|r| filter.category_id.map_or(true, |c| r.category_id == c))
            .filter(|r| filter.status.map_or(true, |s| r.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
    }

    /// Risk count
    pub fn risk_count(&self) -> usize {
        self.risks.read().len()
    }

    /// Remove a risk row without reference checks; the platform facade
    /// guards against deleting assessed risks before calling this.
    pub(crate) fn remove_risk_unchecked(&self, risk_id: &RiskId) -> bool {
        self.risks.write().remove(risk_id).is_some()
    }
}

impl Default for RiskCatalog {
    fn default() -> Self {
        Self::new()
    }
}
