//! Environmental management catalog (AMBIENTAL)

use crate::import::{CatalogPayload, CriterionSeed, RiskSeed};

/// Seed payload for the environmental category
pub fn payload() -> CatalogPayload {
    CatalogPayload {
        consequence_criteria: vec![
            CriterionSeed {
                level: 1,
                name: "Insignificante".into(),
                description: "Afectación puntual contenida dentro de la instalación".into(),
            },
            CriterionSeed {
                level: 2,
                name: "Menor".into(),
                description: "Derrame menor recuperado sin afectación externa".into(),
            },
            CriterionSeed {
                level: 3,
                name: "Moderado".into(),
                description: "Afectación temporal de suelo o cuerpo de agua".into(),
            },
            CriterionSeed {
                level: 4,
                name: "Mayor".into(),
                description: "Contaminación que exige remediación y reporte a la autoridad".into(),
            },
            CriterionSeed {
                level: 5,
                name: "Catastrófico".into(),
                description: "Daño ambiental extenso o sanción de la autoridad".into(),
            },
        ],
        risks: vec![
            RiskSeed {
                risk_type: Some("Operacional".into()),
                description: "Derrame de hidrocarburos en zona de almacenamiento".into(),
                caused_by: Some("Diques de contención deteriorados".into()),
                impact: Some("Contaminación de suelo y aguas subterráneas".into()),
            },
            RiskSeed {
                risk_type: Some("Vertimientos".into()),
                description: "Vertimiento de aguas residuales fuera de norma".into(),
                caused_by: Some("Planta de tratamiento operando sobre su capacidad".into()),
                impact: Some("Sanciones y afectación del cuerpo receptor".into()),
            },
            RiskSeed {
                risk_type: Some("Residuos".into()),
                description: "Disposición inadecuada de residuos peligrosos".into(),
                caused_by: Some("Segregación incorrecta en la fuente".into()),
                impact: Some("Pasivos ambientales y responsabilidad legal".into()),
            },
            RiskSeed {
                risk_type: Some("Emisiones".into()),
                description: "Emisión de material particulado sin control".into(),
                caused_by: Some("Filtros de mangas saturados".into()),
                impact: Some("Incumplimiento de límites de emisión".into()),
            },
            RiskSeed {
                risk_type: Some("Recursos".into()),
                description: "Consumo de agua superior al caudal concesionado".into(),
                caused_by: Some("Fugas en redes internas no detectadas".into()),
                impact: Some("Reducción o revocatoria de la concesión".into()),
            },
        ],
    }
}
