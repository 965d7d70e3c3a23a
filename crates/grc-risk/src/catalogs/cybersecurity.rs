//! Cybersecurity catalog (CIBERSEGURIDAD)

use crate::import::{CatalogPayload, CriterionSeed, RiskSeed};

/// Seed payload for the cybersecurity category
pub fn payload() -> CatalogPayload {
    CatalogPayload {
        consequence_criteria: vec![
            CriterionSeed {
                level: 1,
                name: "Insignificante".into(),
                description: "Evento aislado sin pérdida de información".into(),
            },
            CriterionSeed {
                level: 2,
                name: "Menor".into(),
                description: "Indisponibilidad menor a cuatro horas de un servicio interno".into(),
            },
            CriterionSeed {
                level: 3,
                name: "Moderado".into(),
                description: "Compromiso de cuentas internas sin fuga de datos".into(),
            },
            CriterionSeed {
                level: 4,
                name: "Mayor".into(),
                description: "Fuga de datos personales o indisponibilidad mayor a un día".into(),
            },
            CriterionSeed {
                level: 5,
                name: "Catastrófico".into(),
                description: "Compromiso masivo de datos o parálisis total de operaciones".into(),
            },
        ],
        risks: vec![
            RiskSeed {
                risk_type: Some("Malware".into()),
                description: "Secuestro de información por ransomware".into(),
                caused_by: Some("Copias de seguridad sin pruebas de restauración".into()),
                impact: Some("Parálisis operativa y extorsión".into()),
            },
            RiskSeed {
                risk_type: Some("Ingeniería social".into()),
                description: "Robo de credenciales mediante phishing dirigido".into(),
                caused_by: Some("Autenticación multifactor no desplegada".into()),
                impact: Some("Acceso no autorizado a sistemas críticos".into()),
            },
            RiskSeed {
                risk_type: Some("Protección de datos".into()),
                description: "Fuga de datos personales de clientes".into(),
                caused_by: Some("Bases de datos sin cifrado en reposo".into()),
                impact: Some("Sanciones regulatorias y daño reputacional".into()),
            },
            RiskSeed {
                risk_type: Some("Infraestructura".into()),
                description: "Explotación de vulnerabilidades sin parchar en servidores expuestos".into(),
                caused_by: Some("Ventanas de mantenimiento aplazadas".into()),
                impact: Some("Intrusión y movimiento lateral en la red".into()),
            },
            RiskSeed {
                risk_type: Some("Accesos".into()),
                description: "Acceso de terceros con privilegios excesivos".into(),
                caused_by: Some("Revisión periódica de cuentas de proveedores inexistente".into()),
                impact: Some("Alteración o exfiltración de información".into()),
            },
        ],
    }
}
