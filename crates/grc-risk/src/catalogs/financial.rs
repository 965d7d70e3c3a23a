//! Financial risk catalog (FINANCIERO)

use crate::import::{CatalogPayload, CriterionSeed, RiskSeed};

/// Seed payload for the financial category
pub fn payload() -> CatalogPayload {
    CatalogPayload {
        consequence_criteria: vec![
            CriterionSeed {
                level: 1,
                name: "Insignificante".into(),
                description: "Pérdida inferior al 0,1 % del presupuesto anual".into(),
            },
            CriterionSeed {
                level: 2,
                name: "Menor".into(),
                description: "Pérdida recuperable dentro del trimestre".into(),
            },
            CriterionSeed {
                level: 3,
                name: "Moderado".into(),
                description: "Desviación presupuestal que obliga a reprogramar inversiones".into(),
            },
            CriterionSeed {
                level: 4,
                name: "Mayor".into(),
                description: "Pérdida material con impacto en resultados del ejercicio".into(),
            },
            CriterionSeed {
                level: 5,
                name: "Catastrófico".into(),
                description: "Compromiso de la continuidad financiera de la organización".into(),
            },
        ],
        risks: vec![
            RiskSeed {
                risk_type: Some("Fraude".into()),
                description: "Fraude interno en pagos a proveedores".into(),
                caused_by: Some("Segregación de funciones insuficiente en tesorería".into()),
                impact: Some("Pérdidas directas y deterioro del ambiente de control".into()),
            },
            RiskSeed {
                risk_type: Some("Liquidez".into()),
                description: "Iliquidez por concentración de cartera".into(),
                caused_by: Some("Dependencia de pocos clientes con pagos a noventa días".into()),
                impact: Some("Incumplimiento de obligaciones de corto plazo".into()),
            },
            RiskSeed {
                risk_type: Some("Mercado".into()),
                description: "Exposición cambiaria sin cobertura".into(),
                caused_by: Some("Compras en divisa sin instrumentos de cobertura".into()),
                impact: Some("Sobrecostos por devaluación".into()),
            },
            RiskSeed {
                risk_type: Some("Contractual".into()),
                description: "Sobrecostos por contratos mal estimados".into(),
                caused_by: Some("Estimaciones sin soporte histórico".into()),
                impact: Some("Margen negativo en proyectos".into()),
            },
            RiskSeed {
                risk_type: Some("Cumplimiento".into()),
                description: "Incumplimiento tributario por errores de liquidación".into(),
                caused_by: Some("Calendario tributario gestionado manualmente".into()),
                impact: Some("Sanciones e intereses moratorios".into()),
            },
        ],
    }
}
