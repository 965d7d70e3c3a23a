//! OpenGRC Risk Engine
//!
//! Risk assessment and control-effectiveness engine built on a fixed
//! 5x5 probability/consequence matrix.
//!
//! # Built-in Catalogs
//!
//! - **CALIDAD**: Quality management
//! - **SST**: Occupational safety and health
//! - **AMBIENTAL**: Environmental management
//! - **CIBERSEGURIDAD**: Cybersecurity
//! - **FINANCIERO**: Financial risk
//! - **SEGURIDAD_VIAL**: Road safety
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RISK PLATFORM                                    │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌─────────────┐ │
//! │  │     Risk     │  │ Consequence  │  │   Catalog    │  │  Built-in   │ │
//! │  │   Catalog    │  │   Criteria   │  │   Importer   │  │  Catalogs   │ │
//! │  └──────┬───────┘  └──────┬───────┘  └──────┬───────┘  └──────┬──────┘ │
//! │         │                 │                 │                 │        │
//! │  ┌──────▼─────────────────▼─────────────────▼─────────────────▼──────┐ │
//! │  │                    ASSESSMENT ENGINE                              │ │
//! │  │   5x5 Matrix Classification | Residual Recompute | Supersede     │ │
//! │  └──────────────────────────────┬────────────────────────────────────┘ │
//! │                                 │                                       │
//! │  ┌──────────────┐  ┌────────────▼───────┐  ┌──────────────┐           │
//! │  │   Control    │  │       Action       │  │  Dashboard   │           │
//! │  │   Registry   │  │       Plans        │  │    (KPIs)    │           │
//! │  │ (Inverted 1-5)│ │  (Progress/Dates)  │  │              │           │
//! │  └──────────────┘  └────────────────────┘  └──────────────┘           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod assessment;
pub mod catalog;
pub mod catalogs;
pub mod controls;
pub mod criteria;
pub mod dashboard;
pub mod import;
pub mod matrix;
pub mod plans;

use std::sync::Arc;

use serde::Deserialize;

pub use grc_common::{GrcError, GrcResult};

pub use assessment::{
    AssessmentDraft, AssessmentEngine, AssessmentStatus, RiskAssessment, ResidualClassification,
};
pub use catalog::{Risk, RiskCatalog, RiskCategory, RiskDraft, RiskStatus};
pub use catalogs::BuiltinCatalog;
pub use controls::{ControlDraft, ControlEffectiveness, ControlRegistry, RiskControl};
pub use criteria::CriteriaStore;
pub use dashboard::{Dashboard, DashboardKpis};
pub use import::{CatalogImporter, CatalogPayload, ImportOutcome, ImportPolicy};
pub use matrix::{InherentLevel, MatrixEntry};
pub use plans::{ActionPlan, PlanDraft, PlanStatus, PlanTracker};

/// Platform construction options
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Duplicate policy handed to the importer
    pub import_policy: ImportPolicy,
    /// Seed the six default categories on construction
    pub seed_default_categories: bool,
}

/// Main risk platform
pub struct RiskPlatform {
    /// Categories and risks
    pub catalog: Arc<RiskCatalog>,
    /// Per-category consequence criteria
    pub criteria: Arc<CriteriaStore>,
    /// Assessments and matrix classification
    pub assessments: Arc<AssessmentEngine>,
    /// Controls and residual recompute
    pub controls: Arc<ControlRegistry>,
    /// Action plans
    pub plans: Arc<PlanTracker>,
    /// Catalog importer
    pub importer: Arc<CatalogImporter>,
    /// KPI dashboard
    pub dashboard: Dashboard,
}

impl RiskPlatform {
    /// Create an empty platform
    pub fn new() -> Self {
        Self::with_config(PlatformConfig::default())
    }

    /// Create a platform with the six default categories seeded
    pub fn with_defaults() -> Self {
        Self::with_config(PlatformConfig {
            seed_default_categories: true,
            ..Default::default()
        })
    }

    /// Create a platform from explicit options
    pub fn with_config(config: PlatformConfig) -> Self {
        let catalog = Arc::new(RiskCatalog::new());
        let criteria = Arc::new(CriteriaStore::new());
        let assessments = Arc::new(AssessmentEngine::new(catalog.clone()));
        let controls = Arc::new(ControlRegistry::new(assessments.clone()));
        let plans = Arc::new(PlanTracker::new(assessments.clone()));
        let importer = Arc::new(
            CatalogImporter::new(catalog.clone(), criteria.clone())
                .with_policy(config.import_policy),
        );
        let dashboard = Dashboard::new(catalog.clone(), assessments.clone(), plans.clone());

        if config.seed_default_categories {
            catalog.seed_default_categories();
        }

        Self {
            catalog,
            criteria,
            assessments,
            controls,
            plans,
            importer,
            dashboard,
        }
    }

    /// Assess a risk
    pub fn assess(&self, draft: AssessmentDraft) -> GrcResult<RiskAssessment> {
        self.assessments.create(draft)
    }

    /// Import one built-in catalog
    pub fn import_builtin(&self, builtin: BuiltinCatalog) -> GrcResult<ImportOutcome> {
        self.importer.import_builtin(builtin)
    }

    /// Current KPI snapshot
    pub fn kpis(&self) -> DashboardKpis {
        self.dashboard.kpis()
    }

    /// Hard-delete a risk that nothing references.
    ///
    /// Returns `Ok(false)` when the risk does not exist and `RiskInUse`
    /// when any assessment (whatever its status) still points at it;
    /// retiring is the supported path for risks with history.
    pub fn delete_risk(&self, risk_id: &grc_common::RiskId) -> GrcResult<bool> {
        if self.catalog.risk_by_id(risk_id).is_none() {
            return Ok(false);
        }
        if self.assessments.count_for_risk(risk_id) > 0 {
            return Err(GrcError::RiskInUse(*risk_id));
        }
        Ok(self.catalog.remove_risk_unchecked(risk_id))
    }
}

impl Default for RiskPlatform {
    fn default() -> Self {
        Self::new()
    }
}
