//! Quality management catalog (CALIDAD)

use crate::import::{CatalogPayload, CriterionSeed, RiskSeed};

/// Seed payload for the quality category
pub fn payload() -> CatalogPayload {
    CatalogPayload {
        consequence_criteria: vec![
            CriterionSeed {
                level: 1,
                name: "Insignificante".into(),
                description: "Desviación puntual sin impacto en el cliente".into(),
            },
            CriterionSeed {
                level: 2,
                name: "Menor".into(),
                description: "Reproceso localizado que no compromete la entrega".into(),
            },
            CriterionSeed {
                level: 3,
                name: "Moderado".into(),
                description: "Producto no conforme detectado antes del despacho".into(),
            },
            CriterionSeed {
                level: 4,
                name: "Mayor".into(),
                description: "Reclamo formal de cliente o devolución de lote".into(),
            },
            CriterionSeed {
                level: 5,
                name: "Catastrófico".into(),
                description: "Retiro de producto del mercado o pérdida de certificación".into(),
            },
        ],
        risks: vec![
            RiskSeed {
                risk_type: Some("Proceso".into()),
                description: "Liberación de producto no conforme al cliente".into(),
                caused_by: Some("Controles de inspección final insuficientes".into()),
                impact: Some("Reclamos, devoluciones y pérdida de confianza".into()),
            },
            RiskSeed {
                risk_type: Some("Proveedores".into()),
                description: "Recepción de materia prima fuera de especificación".into(),
                caused_by: Some("Evaluación de proveedores desactualizada".into()),
                impact: Some("Paradas de línea y reprocesos".into()),
            },
            RiskSeed {
                risk_type: Some("Metrología".into()),
                description: "Uso de equipos de medición sin calibración vigente".into(),
                caused_by: Some("Programa de calibración incumplido".into()),
                impact: Some("Mediciones no confiables y lotes cuestionados".into()),
            },
            RiskSeed {
                risk_type: Some("Proceso".into()),
                description: "Cambios de proceso implementados sin validación".into(),
                caused_by: Some("Gestión de cambios informal".into()),
                impact: Some("Variabilidad y defectos recurrentes".into()),
            },
            RiskSeed {
                risk_type: Some("Documental".into()),
                description: "Registros de lote incompletos o diligenciados tardíamente".into(),
                caused_by: None,
                impact: Some("Hallazgos mayores en auditoría de certificación".into()),
            },
        ],
    }
}
