//! Occupational safety and health catalog (SST)

use crate::import::{CatalogPayload, CriterionSeed, RiskSeed};

/// Seed payload for the occupational safety category
pub fn payload() -> CatalogPayload {
    CatalogPayload {
        consequence_criteria: vec![
            CriterionSeed {
                level: 1,
                name: "Insignificante".into(),
                description: "Lesión leve atendida con primeros auxilios".into(),
            },
            CriterionSeed {
                level: 2,
                name: "Menor".into(),
                description: "Lesión con tratamiento médico sin incapacidad".into(),
            },
            CriterionSeed {
                level: 3,
                name: "Moderado".into(),
                description: "Incapacidad temporal inferior a treinta días".into(),
            },
            CriterionSeed {
                level: 4,
                name: "Mayor".into(),
                description: "Incapacidad permanente parcial".into(),
            },
            CriterionSeed {
                level: 5,
                name: "Catastrófico".into(),
                description: "Fatalidad o incapacidad permanente total".into(),
            },
        ],
        risks: vec![
            RiskSeed {
                risk_type: Some("Condiciones de seguridad".into()),
                description: "Caída de altura en trabajos sobre cubiertas".into(),
                caused_by: Some("Ausencia de líneas de vida certificadas".into()),
                impact: Some("Lesiones graves o fatalidad".into()),
            },
            RiskSeed {
                risk_type: Some("Mecánico".into()),
                description: "Atrapamiento por partes móviles de maquinaria".into(),
                caused_by: Some("Guardas retiradas durante mantenimiento".into()),
                impact: Some("Amputaciones y lesiones incapacitantes".into()),
            },
            RiskSeed {
                risk_type: Some("Físico".into()),
                description: "Exposición a ruido superior a 85 dBA".into(),
                caused_by: Some("Jornadas prolongadas sin protección auditiva".into()),
                impact: Some("Hipoacusia de origen ocupacional".into()),
            },
            RiskSeed {
                risk_type: Some("Eléctrico".into()),
                description: "Contacto con energía eléctrica en tableros de distribución".into(),
                caused_by: Some("Procedimiento de bloqueo y etiquetado incumplido".into()),
                impact: Some("Quemaduras y electrocución".into()),
            },
            RiskSeed {
                risk_type: Some("Biomecánico".into()),
                description: "Manipulación manual de cargas superiores a 25 kg".into(),
                caused_by: Some("Ayudas mecánicas insuficientes en bodega".into()),
                impact: Some("Lesiones osteomusculares".into()),
            },
            RiskSeed {
                risk_type: Some("Químico".into()),
                description: "Inhalación de sílice cristalina en corte de concreto".into(),
                caused_by: Some("Corte en seco sin extracción localizada".into()),
                impact: Some("Silicosis y enfermedad pulmonar crónica".into()),
            },
        ],
    }
}
