//! Built-in Risk Catalogs
//!
//! Seed catalogs for the standard management domains, one module per
//! domain. The catalog-to-category mapping is fixed; payloads feed the
//! importer.

pub mod cybersecurity;
pub mod environmental;
pub mod financial;
pub mod occupational_safety;
pub mod quality;
pub mod road_safety;

use serde::{Deserialize, Serialize};

use crate::import::CatalogPayload;

/// Built-in catalog identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinCatalog {
    Quality,
    OccupationalSafety,
    Environmental,
    Cybersecurity,
    Financial,
    RoadSafety,
}

impl BuiltinCatalog {
    /// All built-in catalogs
    pub const ALL: [BuiltinCatalog; 6] = [
        BuiltinCatalog::Quality,
        BuiltinCatalog::OccupationalSafety,
        BuiltinCatalog::Environmental,
        BuiltinCatalog::Cybersecurity,
        BuiltinCatalog::Financial,
        BuiltinCatalog::RoadSafety,
    ];

    /// Category code the catalog seeds into
    pub fn code(self) -> &'static str {
        match self {
            Self::Quality => "CALIDAD",
            Self::OccupationalSafety => "SST",
            Self::Environmental => "AMBIENTAL",
            Self::Cybersecurity => "CIBERSEGURIDAD",
            Self::Financial => "FINANCIERO",
            Self::RoadSafety => "SEGURIDAD_VIAL",
        }
    }

    /// Seed payload for the catalog
    pub fn payload(self) -> CatalogPayload {
        match self {
            Self::Quality => quality::payload(),
            Self::OccupationalSafety => occupational_safety::payload(),
            Self::Environmental => environmental::payload(),
            Self::Cybersecurity => cybersecurity::payload(),
            Self::Financial => financial::payload(),
            Self::RoadSafety => road_safety::payload(),
        }
    }
}

impl std::fmt::Display for BuiltinCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payloads_are_well_formed() {
        for builtin in BuiltinCatalog::ALL {
            let payload = builtin.payload();

            let levels: Vec<u8> = payload
                .consequence_criteria
                .iter()
                .map(|c| c.level)
                .collect();
            assert_eq!(levels, vec![1, 2, 3, 4, 5], "{}", builtin);

            assert!(!payload.risks.is_empty(), "{}", builtin);
            assert!(payload
                .risks
                .iter()
                .all(|r| !r.description.trim().is_empty()));
        }
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes: std::collections::HashSet<_> =
            BuiltinCatalog::ALL.iter().map(|b| b.code()).collect();
        assert_eq!(codes.len(), 6);
    }
}
