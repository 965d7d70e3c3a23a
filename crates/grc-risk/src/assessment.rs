//! Assessment Engine
//!
//! Turns a catalogued risk plus scored probability/consequence into an
//! inherent rating and carries the residual classification derived from
//! the control set. Inherent fields are written once at creation; the
//! four residual fields are only ever replaced together.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use dashmap::DashMap;
use grc_common::{AssessmentId, GrcError, GrcResult, RiskId};
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::RiskCatalog;
use crate::matrix::{self, InherentLevel};

/// How long a mutation waits for an assessment's critical section before
/// reporting a conflict
pub(crate) const MUTATION_LOCK_TIMEOUT: Duration = Duration::from_secs(5);

/// Acceptability verdict over the active control set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Acceptability {
    #[serde(rename = "ACEPTABLE")]
    Acceptable,
    #[serde(rename = "ALERTA")]
    Alert,
    #[serde(rename = "NO ACEPTABLE")]
    Unacceptable,
}

impl Acceptability {
    /// All verdicts, best first
    pub const ALL: [Acceptability; 3] = [
        Acceptability::Acceptable,
        Acceptability::Alert,
        Acceptability::Unacceptable,
    ];

    /// Canonical label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Acceptable => "ACEPTABLE",
            Self::Alert => "ALERTA",
            Self::Unacceptable => "NO ACEPTABLE",
        }
    }
}

impl std::fmt::Display for Acceptability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Treatment priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    #[serde(rename = "PRIORITARIO")]
    Prioritized,
    #[serde(rename = "NO PRIORITARIO")]
    NotPrioritized,
}

/// Significance flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Significance {
    #[serde(rename = "SIGNIFICATIVO")]
    Significant,
    #[serde(rename = "NO SIGNIFICATIVO")]
    NotSignificant,
}

/// Compound residual level label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResidualLevel {
    /// No active control has been registered yet
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "ACEPTABLE/NO PRIORITARIO/NO SIGNIFICATIVO")]
    Acceptable,
    #[serde(rename = "ALERTA/NO PRIORITARIO/NO SIGNIFICATIVO")]
    Alert,
    #[serde(rename = "NO ACEPTABLE/PRIORITARIO/SIGNIFICATIVO")]
    Unacceptable,
}

/// Assessment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssessmentStatus {
    /// The current assessment of its risk
    #[serde(rename = "ACTIVE")]
    Active,
    /// Replaced by a newer assessment of the same risk
    #[serde(rename = "SUPERSEDED")]
    Superseded,
}

/// Operating conditions ticked during the walkdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperatingConditions {
    pub normal: bool,
    pub abnormal: bool,
    pub emergency: bool,
    pub routine: bool,
    pub non_routine: bool,
}

/// Who is exposed to the risk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExposedGroups {
    pub permanent: bool,
    pub temporary: bool,
    pub contractors: bool,
    pub visitors: bool,
}

/// A point-in-time risk assessment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: AssessmentId,
    pub risk_id: RiskId,
    pub assessment_date: NaiveDate,
    pub assessed_by: Option<String>,
    pub probability: u8,
    pub consequence: u8,
    pub inherent_risk: u8,
    pub inherent_risk_level: InherentLevel,
    pub conversion_factor: u8,
    pub residual_risk_level: ResidualLevel,
    pub acceptability: Acceptability,
    pub priority: Priority,
    pub significance: Significance,
    pub conditions: OperatingConditions,
    pub exposure: ExposedGroups,
    pub notes: Option<String>,
    pub status: AssessmentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The four derived residual fields, always replaced as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualClassification {
    pub residual_risk_level: ResidualLevel,
    pub acceptability: Acceptability,
    pub priority: Priority,
    pub significance: Significance,
}

impl ResidualClassification {
    /// Defaults carried while no active control exists
    pub fn pending() -> Self {
        Self {
            residual_risk_level: ResidualLevel::Pending,
            acceptability: Acceptability::Alert,
            priority: Priority::NotPrioritized,
            significance: Significance::NotSignificant,
        }
    }

    /// Classify a mean control-effectiveness score.
    ///
    /// Bands: 4.0 and above ACEPTABLE, 2.5 up to 4.0 ALERTA, below 2.5
    /// NO ACEPTABLE. Only the NO ACEPTABLE band is PRIORITARIO and
    /// SIGNIFICATIVO.
    pub fn from_mean_effectiveness(avg: f64) -> Self {
        if avg >= 4.0 {
            Self {
                residual_risk_level: ResidualLevel::Acceptable,
                acceptability: Acceptability::Acceptable,
                priority: Priority::NotPrioritized,
                significance: Significance::NotSignificant,
            }
        } else if avg >= 2.5 {
            Self {
                residual_risk_level: ResidualLevel::Alert,
                acceptability: Acceptability::Alert,
                priority: Priority::NotPrioritized,
                significance: Significance::NotSignificant,
            }
        } else {
            Self {
                residual_risk_level: ResidualLevel::Unacceptable,
                acceptability: Acceptability::Unacceptable,
                priority: Priority::Prioritized,
                significance: Significance::Significant,
            }
        }
    }
}

/// New assessment request
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentDraft {
    pub risk_id: RiskId,
    pub probability: u8,
    pub consequence: u8,
    #[serde(default)]
    pub assessment_date: Option<NaiveDate>,
    #[serde(default)]
    pub assessed_by: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub conditions: OperatingConditions,
    #[serde(default)]
    pub exposure: ExposedGroups,
}

impl AssessmentDraft {
    /// Draft carrying only the scored pair
    pub fn new(risk_id: RiskId, probability: u8, consequence: u8) -> Self {
        Self {
            risk_id,
            probability,
            consequence,
            assessment_date: None,
            assessed_by: None,
            notes: None,
            conditions: OperatingConditions::default(),
            exposure: ExposedGroups::default(),
        }
    }
}

/// Assessment list filter
#[derive(Debug, Clone, Copy, Default)]
pub struct AssessmentFilter {
    pub risk_id: Option<RiskId>,
    pub status: Option<AssessmentStatus>,
}

/// Assessment joined with its risk and category for display
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    pub assessment: RiskAssessment,
    pub risk_description: String,
    pub risk_type: Option<String>,
    pub category_code: String,
    pub category_name: String,
}

/// Assessment registry and scoring engine
pub struct AssessmentEngine {
    catalog: Arc<RiskCatalog>,
    /// All assessments
    assessments: Arc<RwLock<HashMap<AssessmentId, RiskAssessment>>>,
    /// Per-assessment critical sections guarding control mutations and
    /// residual writes
    locks: DashMap<AssessmentId, Arc<Mutex<()>>>,
}

impl AssessmentEngine {
    pub fn new(catalog: Arc<RiskCatalog>) -> Self {
        Self {
            catalog,
            assessments: Arc::new(RwLock::new(HashMap::new())),
            locks: DashMap::new(),
        }
    }

    /// Score a risk.
    ///
    /// Inherent fields are derived here and never change afterwards;
    /// residual fields start at the pending defaults. A prior ACTIVE
    /// assessment of the same risk is superseded.
    pub fn create(&self, draft: AssessmentDraft) -> GrcResult<RiskAssessment> {
        if self.catalog.risk_by_id(&draft.risk_id).is_none() {
            return Err(GrcError::Validation(format!(
                "risk {} does not exist",
                draft.risk_id
            )));
        }
        let entry = matrix::classify(draft.probability, draft.consequence)?;

        let pending = ResidualClassification::pending();
        let now = Utc::now();
        let assessment = RiskAssessment {
            id: Uuid::new_v4(),
            risk_id: draft.risk_id,
            assessment_date: draft.assessment_date.unwrap_or_else(|| now.date_naive()),
            assessed_by: draft.assessed_by,
            probability: entry.probability,
            consequence: entry.consequence,
            inherent_risk: entry.inherent_risk,
            inherent_risk_level: entry.level,
            conversion_factor: entry.conversion_factor,
            residual_risk_level: pending.residual_risk_level,
            acceptability: pending.acceptability,
            priority: pending.priority,
            significance: pending.significance,
            conditions: draft.conditions,
            exposure: draft.exposure,
            notes: draft.notes,
            status: AssessmentStatus::Active,
            created_at: now,
            updated_at: now,
        };

        let mut assessments = self.assessments.write();
        for prior in assessments.values_mut() {
            if prior.risk_id == assessment.risk_id && prior.status == AssessmentStatus::Active {
                prior.status = AssessmentStatus::Superseded;
                prior.updated_at = now;
                tracing::debug!(assessment = %prior.id, "superseded prior assessment");
            }
        }
        assessments.insert(assessment.id, assessment.clone());

        Ok(assessment)
    }

    /// Get assessment
    pub fn get(&self, id: &AssessmentId) -> Option<RiskAssessment> {
        self.assessments.read().get(id).cloned()
    }

    /// Whether the assessment exists
    pub fn exists(&self, id: &AssessmentId) -> bool {
        self.assessments.read().contains_key(id)
    }

    /// Assessments matching the filter, most recent assessment date first
    pub fn list(&self, filter: AssessmentFilter) -> Vec<RiskAssessment> {
        let mut matching: Vec<RiskAssessment> = self
            .assessments
            .read()
            .values()
            .filter(|a| filter.risk_id.map_or(true, |r| a.risk_id == r))
            .filter(|a| filter.status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            b.assessment_date
                .cmp(&a.assessment_date)
                .then(b.created_at.cmp(&a.created_at))
        });
        matching
    }

    /// How many assessments reference a risk
    pub fn count_for_risk(&self, risk_id: &RiskId) -> usize {
        self.assessments
            .read()
            .values()
            .filter(|a| a.risk_id == *risk_id)
            .count()
    }

    /// Assessment joined with risk and category display fields
    pub fn view(&self, id: &AssessmentId) -> Option<AssessmentView> {
        let assessment = self.get(id)?;
        self.build_view(assessment)
    }

    /// Joined views for all assessments matching the filter
    pub fn list_views(&self, filter: AssessmentFilter) -> Vec<AssessmentView> {
        self.list(filter)
            .into_iter()
            .filter_map(|a| self.build_view(a))
            .collect()
    }

    fn build_view(&self, assessment: RiskAssessment) -> Option<AssessmentView> {
        let Some(risk) = self.catalog.risk_by_id(&assessment.risk_id) else {
            tracing::warn!(risk = %assessment.risk_id, "assessment references a missing risk");
            return None;
        };
        let Some(category) = self.catalog.category_by_id(&risk.category_id) else {
            tracing::warn!(category = %risk.category_id, "risk references a missing category");
            return None;
        };
        Some(AssessmentView {
            assessment,
            risk_description: risk.description,
            risk_type: risk.risk_type,
            category_code: category.code,
            category_name: category.name,
        })
    }

    /// The mutation lock for one assessment.
    ///
    /// Control-set changes and the residual writes they trigger serialize
    /// behind this lock; plain reads never take it.
    pub fn mutation_lock(&self, id: &AssessmentId) -> Arc<Mutex<()>> {
        self.locks
            .entry(*id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Replace the four residual fields as one unit.
    ///
    /// Callers hold the assessment's mutation lock.
    pub fn apply_residual(
        &self,
        id: &AssessmentId,
        classification: ResidualClassification,
    ) -> GrcResult<RiskAssessment> {
        let mut assessments = self.assessments.write();
        let assessment = assessments
            .get_mut(id)
            .ok_or(GrcError::AssessmentNotFound(*id))?;

        assessment.residual_risk_level = classification.residual_risk_level;
        assessment.acceptability = classification.acceptability;
        assessment.priority = classification.priority;
        assessment.significance = classification.significance;
        assessment.updated_at = Utc::now();

        Ok(assessment.clone())
    }
}
