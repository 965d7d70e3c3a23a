//! Consequence Criteria
//!
//! Per-category rubric describing what each consequence level 1-5 means
//! for that management domain.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use grc_common::{validate_scale, CategoryId, GrcResult};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Descriptor for one consequence level within a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsequenceCriterion {
    pub category_id: CategoryId,
    pub level: u8,
    pub name: String,
    pub description: String,
}

/// Store of consequence criteria, one slot per (category, level)
pub struct CriteriaStore {
    criteria: Arc<RwLock<HashMap<CategoryId, BTreeMap<u8, ConsequenceCriterion>>>>,
}

impl CriteriaStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            criteria: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a criterion unless the (category, level) slot is taken.
    ///
    /// Returns whether a row was inserted. Existing definitions win, so
    /// re-importing a catalog never rewrites the rubric.
    pub fn add_if_absent(
        &self,
        category_id: CategoryId,
        level: u8,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> GrcResult<bool> {
        validate_scale("consequence level", level)?;
        let mut criteria = self.criteria.write();
        let slots = criteria.entry(category_id).or_default();
        if slots.contains_key(&level) {
            return Ok(false);
        }
        slots.insert(
            level,
            ConsequenceCriterion {
                category_id,
                level,
                name: name.into(),
                description: description.into(),
            },
        );
        Ok(true)
    }

    /// Criteria for a category, ordered by level
    pub fn for_category(&self, category_id: CategoryId) -> Vec<ConsequenceCriterion> {
        self.criteria
            .read()
            .get(&category_id)
            .map(|slots| slots.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Criterion for one (category, level) slot
    pub fn get(&self, category_id: CategoryId, level: u8) -> Option<ConsequenceCriterion> {
        self.criteria.read().get(&category_id)?.get(&level).cloned()
    }

    /// Total criteria across all categories
    pub fn len(&self) -> usize {
        self.criteria.read().values().map(|slots| slots.len()).sum()
    }

    /// Whether no criteria exist yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CriteriaStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_existing_slot_wins() {
        let store = CriteriaStore::new();
        let cat = Uuid::new_v4();

        assert!(store
            .add_if_absent(cat, 3, "Moderado", "Impacto moderado")
            .unwrap());
        assert!(!store
            .add_if_absent(cat, 3, "Otro", "No debe reemplazar")
            .unwrap());

        let kept = store.get(cat, 3).unwrap();
        assert_eq!(kept.name, "Moderado");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_ordered_by_level() {
        let store = CriteriaStore::new();
        let cat = Uuid::new_v4();
        for level in [5u8, 1, 3, 2, 4] {
            store
                .add_if_absent(cat, level, format!("L{}", level), "desc")
                .unwrap();
        }

        let levels: Vec<u8> = store.for_category(cat).iter().map(|c| c.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_level_out_of_scale() {
        let store = CriteriaStore::new();
        let cat = Uuid::new_v4();
        assert!(store.add_if_absent(cat, 0, "x", "y").is_err());
        assert!(store.add_if_absent(cat, 6, "x", "y").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_categories_isolated() {
        let store = CriteriaStore::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        store.add_if_absent(a, 1, "Leve", "").unwrap();
        store.add_if_absent(b, 1, "Menor", "").unwrap();

        assert_eq!(store.for_category(a).len(), 1);
        assert_eq!(store.get(b, 1).unwrap().name, "Menor");
    }
}
