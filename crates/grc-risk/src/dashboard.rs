//! Dashboard Aggregation
//!
//! Read-only KPI snapshot over the catalog, assessments and plans.
//! Retired risks and superseded assessments are excluded; every category,
//! band and verdict appears even at zero so chart shapes stay stable.

use std::sync::Arc;

use serde::Serialize;

use crate::assessment::{Acceptability, AssessmentEngine, AssessmentFilter, AssessmentStatus};
use crate::catalog::{RiskCatalog, RiskFilter, RiskStatus};
use crate::matrix::InherentLevel;
use crate::plans::PlanTracker;

/// Per-category risk count
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub code: String,
    pub name: String,
    pub color: Option<String>,
    pub count: usize,
}

/// Per-band assessment count
#[derive(Debug, Clone, Serialize)]
pub struct LevelCount {
    pub level: InherentLevel,
    pub count: usize,
}

/// Per-acceptability assessment count
#[derive(Debug, Clone, Serialize)]
pub struct AcceptabilityCount {
    pub acceptability: Acceptability,
    pub count: usize,
}

/// KPI snapshot
#[derive(Debug, Clone, Serialize)]
pub struct DashboardKpis {
    pub total_risks: usize,
    pub total_assessments: usize,
    /// Active assessments classified NO ACEPTABLE
    pub critical_assessments: usize,
    /// Critical share of active assessments, rounded percent
    pub critical_percent: u8,
    /// Plans in PENDING or IN_PROGRESS
    pub open_action_plans: usize,
    pub risks_by_category: Vec<CategoryCount>,
    pub assessments_by_level: Vec<LevelCount>,
    pub assessments_by_acceptability: Vec<AcceptabilityCount>,
}

/// Read-only dashboard over the engine components
#[derive(Clone)]
pub struct Dashboard {
    catalog: Arc<RiskCatalog>,
    assessments: Arc<AssessmentEngine>,
    plans: Arc<PlanTracker>,
}

impl Dashboard {
    pub fn new(
        catalog: Arc<RiskCatalog>,
        assessments: Arc<AssessmentEngine>,
        plans: Arc<PlanTracker>,
    ) -> Self {
        Self {
            catalog,
            assessments,
            plans,
        }
    }

    /// Assemble the KPI snapshot
    pub fn kpis(&self) -> DashboardKpis {
        let active_risks = self.catalog.list_risks(RiskFilter {
            status: Some(RiskStatus::Active),
            ..Default::default()
        });
        let active_assessments = self.assessments.list(AssessmentFilter {
            status: Some(AssessmentStatus::Active),
            ..Default::default()
        });

        let critical_assessments = active_assessments
            .iter()
            .filter(|a| a.acceptability == Acceptability::Unacceptable)
            .count();
        let critical_percent = percent(critical_assessments, active_assessments.len());

        let risks_by_category = self
            .catalog
            .list_categories()
            .into_iter()
            .map(|category| CategoryCount {
                count: active_risks
                    .iter()
                    .filter(|r| r.category_id == category.id)
                    .count(),
                code: category.code,
                name: category.name,
                color: category.color,
            })
            .collect();

        let assessments_by_level = InherentLevel::ALL
            .iter()
            .map(|&level| LevelCount {
                level,
                count: active_assessments
                    .iter()
                    .filter(|a| a.inherent_risk_level == level)
                    .count(),
            })
            .collect();

        let assessments_by_acceptability = Acceptability::ALL
            .iter()
            .map(|&acceptability| AcceptabilityCount {
                acceptability,
                count: active_assessments
                    .iter()
                    .filter(|a| a.acceptability == acceptability)
                    .count(),
            })
            .collect();

        DashboardKpis {
            total_risks: active_risks.len(),
            total_assessments: active_assessments.len(),
            critical_assessments,
            critical_percent,
            open_action_plans: self.plans.open_count(),
            risks_by_category,
            assessments_by_level,
            assessments_by_acceptability,
        }
    }
}

fn percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::AssessmentDraft;
    use crate::catalog::{CategoryDraft, RiskDraft};
    use crate::controls::{ControlDraft, ControlRegistry};
    use crate::plans::{PlanDraft, PlanStatus};
    use grc_common::RiskId;

    struct Stack {
        catalog: Arc<RiskCatalog>,
        assessments: Arc<AssessmentEngine>,
        controls: ControlRegistry,
        plans: Arc<PlanTracker>,
        dashboard: Dashboard,
    }

    fn stack() -> Stack {
        let catalog = Arc::new(RiskCatalog::new());
        let assessments = Arc::new(AssessmentEngine::new(catalog.clone()));
        let controls = ControlRegistry::new(assessments.clone());
        let plans = Arc::new(PlanTracker::new(assessments.clone()));
        let dashboard = Dashboard::new(catalog.clone(), assessments.clone(), plans.clone());
        Stack {
            catalog,
            assessments,
            controls,
            plans,
            dashboard,
        }
    }

    fn add_risk(stack: &Stack, code: &str, description: &str) -> RiskId {
        let category = match stack.catalog.category_by_code(code) {
            Some(c) => c,
            None => stack
                .catalog
                .create_category(CategoryDraft {
                    code: code.into(),
                    name: code.into(),
                    ..Default::default()
                })
                .unwrap(),
        };
        stack
            .catalog
            .create_risk(&category.id, RiskDraft::new(description))
            .unwrap()
            .id
    }

    #[test]
    fn test_empty_snapshot() {
        let stack = stack();
        stack.catalog.seed_default_categories();

        let kpis = stack.dashboard.kpis();
        assert_eq!(kpis.total_risks, 0);
        assert_eq!(kpis.total_assessments, 0);
        assert_eq!(kpis.critical_percent, 0);
        assert_eq!(kpis.risks_by_category.len(), 6);
        assert!(kpis.risks_by_category.iter().all(|c| c.count == 0));
        assert_eq!(kpis.assessments_by_level.len(), 5);
        assert_eq!(kpis.assessments_by_acceptability.len(), 3);
    }

    #[test]
    fn test_critical_percent_rounds() {
        let stack = stack();
        let mut assessment_ids = Vec::new();
        for i in 0..3 {
            let risk_id = add_risk(&stack, "SST", &format!("Riesgo {}", i));
            let assessment = stack
                .assessments
                .create(AssessmentDraft::new(risk_id, 3, 3))
                .unwrap();
            assessment_ids.push(assessment.id);
        }

        // one of three critical -> 33
        stack
            .controls
            .add(&assessment_ids[0], ControlDraft::scored("Débil", 1))
            .unwrap();
        let kpis = stack.dashboard.kpis();
        assert_eq!(kpis.total_assessments, 3);
        assert_eq!(kpis.critical_assessments, 1);
        assert_eq!(kpis.critical_percent, 33);

        // two of three -> 67
        stack
            .controls
            .add(&assessment_ids[1], ControlDraft::scored("Débil", 2))
            .unwrap();
        let kpis = stack.dashboard.kpis();
        assert_eq!(kpis.critical_assessments, 2);
        assert_eq!(kpis.critical_percent, 67);
    }

    #[test]
    fn test_excludes_retired_and_superseded() {
        let stack = stack();
        let risk_id = add_risk(&stack, "CALIDAD", "Producto no conforme");
        let retired_id = add_risk(&stack, "CALIDAD", "Riesgo retirado");
        stack.catalog.retire_risk(&retired_id).unwrap();

        // second assessment supersedes the first
        stack
            .assessments
            .create(AssessmentDraft::new(risk_id, 5, 5))
            .unwrap();
        stack
            .assessments
            .create(AssessmentDraft::new(risk_id, 2, 2))
            .unwrap();

        let kpis = stack.dashboard.kpis();
        assert_eq!(kpis.total_risks, 1);
        assert_eq!(kpis.total_assessments, 1);

        let calidad = kpis
            .risks_by_category
            .iter()
            .find(|c| c.code == "CALIDAD")
            .unwrap();
        assert_eq!(calidad.count, 1);

        // only the active assessment (2x2 -> MUY BAJO) is banded
        let very_low = kpis
            .assessments_by_level
            .iter()
            .find(|l| l.level == InherentLevel::VeryLow)
            .unwrap();
        assert_eq!(very_low.count, 1);
        let very_high = kpis
            .assessments_by_level
            .iter()
            .find(|l| l.level == InherentLevel::VeryHigh)
            .unwrap();
        assert_eq!(very_high.count, 0);
    }

    #[test]
    fn test_open_plan_count() {
        let stack = stack();
        let risk_id = add_risk(&stack, "FINANCIERO", "Fraude interno");
        let assessment = stack
            .assessments
            .create(AssessmentDraft::new(risk_id, 3, 4))
            .unwrap();

        stack
            .plans
            .create(&assessment.id, PlanDraft::new("Segregar funciones"))
            .unwrap();
        stack
            .plans
            .create(
                &assessment.id,
                PlanDraft {
                    status: Some(PlanStatus::InProgress),
                    ..PlanDraft::new("Conciliaciones diarias")
                },
            )
            .unwrap();
        let done = stack
            .plans
            .create(&assessment.id, PlanDraft::new("Política de gastos"))
            .unwrap();
        stack.plans.update_progress(&done.id, 100, None).unwrap();

        assert_eq!(stack.dashboard.kpis().open_action_plans, 2);
    }

    #[test]
    fn test_pending_assessments_count_as_alert() {
        let stack = stack();
        let risk_id = add_risk(&stack, "SST", "Exposición a sílice");
        stack
            .assessments
            .create(AssessmentDraft::new(risk_id, 4, 4))
            .unwrap();

        let kpis = stack.dashboard.kpis();
        let alert = kpis
            .assessments_by_acceptability
            .iter()
            .find(|a| a.acceptability == Acceptability::Alert)
            .unwrap();
        assert_eq!(alert.count, 1);
        assert_eq!(kpis.critical_assessments, 0);
    }
}
