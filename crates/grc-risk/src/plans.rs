//! Action Plan Tracker
//!
//! Treatment actions raised against assessed risks. Progress runs 0-100;
//! reaching 100 always lands the plan in COMPLETED with a completion
//! date.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use grc_common::{validate_progress, validate_text, AssessmentId, GrcError, GrcResult, PlanId};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::assessment::AssessmentEngine;
use crate::matrix::InherentLevel;

/// Action plan status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanStatus {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "IN_PROGRESS")]
    InProgress,
    #[serde(rename = "COMPLETED")]
    Completed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
}

impl PlanStatus {
    /// Whether the plan still needs work
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }
}

/// A treatment action against an assessed risk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub id: PlanId,
    pub assessment_id: AssessmentId,
    pub description: String,
    pub responsible: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub status: PlanStatus,
    pub progress: u8,
    pub budget: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub verification_method: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New plan request
#[derive(Debug, Clone, Deserialize)]
pub struct PlanDraft {
    pub description: String,
    #[serde(default)]
    pub responsible: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<PlanStatus>,
    #[serde(default)]
    pub progress: Option<u8>,
    #[serde(default)]
    pub budget: Option<Decimal>,
    #[serde(default)]
    pub actual_cost: Option<Decimal>,
    #[serde(default)]
    pub verification_method: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PlanDraft {
    /// Draft carrying only a description
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            responsible: None,
            start_date: None,
            target_date: None,
            status: None,
            progress: None,
            budget: None,
            actual_cost: None,
            verification_method: None,
            notes: None,
        }
    }
}

/// Plan update request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlanUpdate {
    pub description: Option<String>,
    pub responsible: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub target_date: Option<NaiveDate>,
    pub completion_date: Option<NaiveDate>,
    pub status: Option<PlanStatus>,
    pub progress: Option<u8>,
    pub budget: Option<Decimal>,
    pub actual_cost: Option<Decimal>,
    pub verification_method: Option<String>,
    pub notes: Option<String>,
}

/// Plan list filter
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanFilter {
    pub status: Option<PlanStatus>,
}

/// Plan joined with assessment and risk display fields
#[derive(Debug, Clone, Serialize)]
pub struct PlanView {
    pub plan: ActionPlan,
    pub inherent_risk_level: InherentLevel,
    pub risk_description: String,
    pub category_name: String,
}

/// Action plan tracker bound to the assessment engine
pub struct PlanTracker {
    /// All plans
    plans: Arc<RwLock<HashMap<PlanId, ActionPlan>>>,
    assessments: Arc<AssessmentEngine>,
}

impl PlanTracker {
    pub fn new(assessments: Arc<AssessmentEngine>) -> Self {
        Self {
            plans: Arc::new(RwLock::new(HashMap::new())),
            assessments,
        }
    }

    /// Raise a plan against an assessment
    pub fn create(&self, assessment_id: &AssessmentId, draft: PlanDraft) -> GrcResult<ActionPlan> {
        if !self.assessments.exists(assessment_id) {
            return Err(GrcError::AssessmentNotFound(*assessment_id));
        }
        validate_text("plan description", &draft.description)?;
        let progress = validate_progress(draft.progress.unwrap_or(0))?;

        let now = Utc::now();
        let mut plan = ActionPlan {
            id: Uuid::new_v4(),
            assessment_id: *assessment_id,
            description: draft.description,
            responsible: draft.responsible,
            start_date: draft.start_date,
            target_date: draft.target_date,
            completion_date: None,
            status: draft.status.unwrap_or(PlanStatus::Pending),
            progress,
            budget: draft.budget,
            actual_cost: draft.actual_cost,
            verification_method: draft.verification_method,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        enforce_completion(&mut plan);
        self.plans.write().insert(plan.id, plan.clone());

        Ok(plan)
    }

    /// Get plan
    pub fn get(&self, id: &PlanId) -> Option<ActionPlan> {
        self.plans.read().get(id).cloned()
    }

    /// Plans for an assessment, earliest target first, undated last
    pub fn for_assessment(&self, assessment_id: &AssessmentId) -> Vec<ActionPlan> {
        let mut matching: Vec<ActionPlan> = self
            .plans
            .read()
            .values()
            .filter(|p| p.assessment_id == *assessment_id)
            .cloned()
            .collect();
        sort_by_target(&mut matching);
        matching
    }

    /// Plans matching the filter, earliest target first
    pub fn list(&self, filter: PlanFilter) -> Vec<ActionPlan> {
        let mut matching: Vec<ActionPlan> = self
            .plans
            .read()
            .values()
            .filter(|p| filter.status.map_or(true, |s| p.status == s))
            .cloned()
            .collect();
        sort_by_target(&mut matching);
        matching
    }

    /// Joined views for plans matching the filter
    pub fn list_views(&self, filter: PlanFilter) -> Vec<PlanView> {
        self.list(filter)
            .into_iter()
            .filter_map(|plan| {
                let view = self.assessments.view(&plan.assessment_id)?;
                Some(PlanView {
                    inherent_risk_level: view.assessment.inherent_risk_level,
                    risk_description: view.risk_description,
                    category_name: view.category_name,
                    plan,
                })
            })
            .collect()
    }

    /// Merge update fields into a plan
    pub fn update(&self, id: &PlanId, update: PlanUpdate) -> GrcResult<ActionPlan> {
        if let Some(description) = &update.description {
            validate_text("plan description", description)?;
        }
        if let Some(progress) = update.progress {
            validate_progress(progress)?;
        }

        let mut plans = self.plans.write();
        let plan = plans.get_mut(id).ok_or(GrcError::PlanNotFound(*id))?;

        if let Some(description) = update.description {
            plan.description = description;
        }
        if let Some(responsible) = update.responsible {
            plan.responsible = Some(responsible);
        }
        if let Some(start_date) = update.start_date {
            plan.start_date = Some(start_date);
        }
        if let Some(target_date) = update.target_date {
            plan.target_date = Some(target_date);
        }
        if let Some(completion_date) = update.completion_date {
            plan.completion_date = Some(completion_date);
        }
        if let Some(status) = update.status {
            plan.status = status;
        }
        if let Some(progress) = update.progress {
            plan.progress = progress;
        }
        if let Some(budget) = update.budget {
            plan.budget = Some(budget);
        }
        if let Some(actual_cost) = update.actual_cost {
            plan.actual_cost = Some(actual_cost);
        }
        if let Some(verification_method) = update.verification_method {
            plan.verification_method = Some(verification_method);
        }
        if let Some(notes) = update.notes {
            plan.notes = Some(notes);
        }

        enforce_completion(plan);
        plan.updated_at = Utc::now();

        Ok(plan.clone())
    }

    /// Record progress; hitting 100 completes the plan regardless of the
    /// status passed alongside
    pub fn update_progress(
        &self,
        id: &PlanId,
        progress: u8,
        status: Option<PlanStatus>,
    ) -> GrcResult<ActionPlan> {
        self.update(
            id,
            PlanUpdate {
                progress: Some(progress),
                status,
                ..Default::default()
            },
        )
    }

    /// Plans still being worked (PENDING or IN_PROGRESS)
    pub fn open_count(&self) -> usize {
        self.plans
            .read()
            .values()
            .filter(|p| p.status.is_open())
            .count()
    }
}

fn sort_by_target(plans: &mut [ActionPlan]) {
    plans.sort_by(|a, b| match (a.target_date, b.target_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.created_at.cmp(&b.created_at),
    });
}

fn enforce_completion(plan: &mut ActionPlan) {
    if plan.progress == 100 {
        plan.status = PlanStatus::Completed;
        if plan.completion_date.is_none() {
            plan.completion_date = Some(Utc::now().date_naive());
        }
    }
}
