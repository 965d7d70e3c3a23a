//! Road safety catalog (SEGURIDAD_VIAL)

use crate::import::{CatalogPayload, CriterionSeed, RiskSeed};

/// Seed payload for the road safety category
pub fn payload() -> CatalogPayload {
    CatalogPayload {
        consequence_criteria: vec![
            CriterionSeed {
                level: 1,
                name: "Insignificante".into(),
                description: "Incidente sin lesiones ni daños relevantes".into(),
            },
            CriterionSeed {
                level: 2,
                name: "Menor".into(),
                description: "Daños materiales menores al vehículo".into(),
            },
            CriterionSeed {
                level: 3,
                name: "Moderado".into(),
                description: "Accidente con lesiones leves".into(),
            },
            CriterionSeed {
                level: 4,
                name: "Mayor".into(),
                description: "Accidente con lesiones graves o incapacidades".into(),
            },
            CriterionSeed {
                level: 5,
                name: "Catastrófico".into(),
                description: "Accidente con una o más fatalidades".into(),
            },
        ],
        risks: vec![
            RiskSeed {
                risk_type: Some("Factor humano".into()),
                description: "Colisión por fatiga del conductor".into(),
                caused_by: Some("Jornadas de conducción superiores a las permitidas".into()),
                impact: Some("Accidentes con lesiones graves".into()),
            },
            RiskSeed {
                risk_type: Some("Factor humano".into()),
                description: "Volcamiento por exceso de velocidad en carretera".into(),
                caused_by: Some("Monitoreo de velocidad inexistente".into()),
                impact: Some("Pérdida del vehículo y lesiones a ocupantes".into()),
            },
            RiskSeed {
                risk_type: Some("Vehículo".into()),
                description: "Falla de frenos por mantenimiento vencido".into(),
                caused_by: Some("Plan de mantenimiento preventivo incumplido".into()),
                impact: Some("Colisiones por falla mecánica".into()),
            },
            RiskSeed {
                risk_type: Some("Entorno".into()),
                description: "Atropellamiento de peatones en patios de maniobra".into(),
                caused_by: Some("Tránsito peatonal sin demarcación ni separación".into()),
                impact: Some("Lesiones graves a terceros".into()),
            },
            RiskSeed {
                risk_type: Some("Factor humano".into()),
                description: "Conducción bajo efectos de alcohol o sustancias".into(),
                caused_by: Some("Pruebas aleatorias no implementadas".into()),
                impact: Some("Accidentes y responsabilidad legal directa".into()),
            },
        ],
    }
}
