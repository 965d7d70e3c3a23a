//! Probability x Consequence Risk Matrix
//!
//! Fixed 5x5 matrix keyed by the product of the two scores. Distinct
//! pairs with the same product land in the same band.

use grc_common::{validate_scale, GrcResult, SCALE_MAX, SCALE_MIN};
use serde::{Deserialize, Serialize};

/// Inherent risk band
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InherentLevel {
    /// Product 1-4
    #[serde(rename = "MUY BAJO")]
    VeryLow,
    /// Product 5-8
    #[serde(rename = "BAJO")]
    Low,
    /// Product 9-15
    #[serde(rename = "MEDIO")]
    Medium,
    /// Product 16-20
    #[serde(rename = "ALTO")]
    High,
    /// Product 21-25
    #[serde(rename = "MUY ALTO")]
    VeryHigh,
}

impl InherentLevel {
    /// All bands, lowest first
    pub const ALL: [InherentLevel; 5] = [
        InherentLevel::VeryLow,
        InherentLevel::Low,
        InherentLevel::Medium,
        InherentLevel::High,
        InherentLevel::VeryHigh,
    ];

    /// Band for an inherent score (1-25)
    pub fn from_score(score: u8) -> Self {
        match score {
            1..=4 => Self::VeryLow,
            5..=8 => Self::Low,
            9..=15 => Self::Medium,
            16..=20 => Self::High,
            _ => Self::VeryHigh,
        }
    }

    /// Reporting weight of the band (1-5)
    pub fn conversion_factor(&self) -> u8 {
        match self {
            Self::VeryLow => 1,
            Self::Low => 2,
            Self::Medium => 3,
            Self::High => 4,
            Self::VeryHigh => 5,
        }
    }

    /// Canonical band label
    pub fn label(&self) -> &'static str {
        match self {
            Self::VeryLow => "MUY BAJO",
            Self::Low => "BAJO",
            Self::Medium => "MEDIO",
            Self::High => "ALTO",
            Self::VeryHigh => "MUY ALTO",
        }
    }
}

impl std::fmt::Display for InherentLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One cell of the risk matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub probability: u8,
    pub consequence: u8,
    pub inherent_risk: u8,
    pub level: InherentLevel,
    pub conversion_factor: u8,
}

/// Classify a probability/consequence pair
pub fn classify(probability: u8, consequence: u8) -> GrcResult<MatrixEntry> {
    validate_scale("probability", probability)?;
    validate_scale("consequence", consequence)?;
    Ok(cell(probability, consequence))
}

/// The full 25-row matrix, probability-major order
pub fn entries() -> Vec<MatrixEntry> {
    let mut rows = Vec::with_capacity(25);
    for p in SCALE_MIN..=SCALE_MAX {
        for c in SCALE_MIN..=SCALE_MAX {
            rows.push(cell(p, c));
        }
    }
    rows
}

fn cell(probability: u8, consequence: u8) -> MatrixEntry {
    let inherent_risk = probability * consequence;
    let level = InherentLevel::from_score(inherent_risk);
    MatrixEntry {
        probability,
        consequence,
        inherent_risk,
        level,
        conversion_factor: level.conversion_factor(),
    }
}
