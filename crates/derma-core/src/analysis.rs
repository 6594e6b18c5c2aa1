//! Analysis response variants and the canonical [`Assessment`] callers use.
//!
//! The remote service has two product variants: a cost-based treatment
//! payload (`recommendations` + `totalCost`) and a skin-condition payload
//! (`primaryCondition` + `ingredientRecommendations`). Both are decoded at
//! the boundary and folded into one [`Assessment`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// One treatment suggestion from the cost-based variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentRecommendation {
    pub treatment: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub severity: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentAnalysis {
    pub confidence: f64,
    pub recommendations: Vec<TreatmentRecommendation>,
    #[serde(default)]
    pub total_cost: Option<String>,
}

/// One ingredient suggestion from the skin-condition variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecommendation {
    pub ingredient: String,
    #[serde(default)]
    pub purpose: String,
    #[serde(default)]
    pub concentration: Option<String>,
    #[serde(default)]
    pub application: String,
    #[serde(default)]
    pub benefits: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkinConditionAnalysis {
    pub confidence: f64,
    pub primary_condition: String,
    #[serde(default)]
    pub secondary_conditions: Vec<String>,
    #[serde(default)]
    pub skin_type: Option<String>,
    pub ingredient_recommendations: Vec<IngredientRecommendation>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Response body of the analysis endpoint, by product variant.
///
/// Untagged; the skin-condition shape is tried first since only it carries
/// `primaryCondition`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnalysisPayload {
    SkinCondition(SkinConditionAnalysis),
    Treatment(TreatmentAnalysis),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentKind {
    Treatment,
    SkinCondition,
}

impl AssessmentKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Treatment => "treatment",
            Self::SkinCondition => "skin_condition",
        }
    }
}

impl fmt::Display for AssessmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recommendation in canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Treatment or ingredient name.
    pub title: String,
    /// Facial area (treatment) or purpose (ingredient).
    pub target: String,
    /// Dosage/volume or application guidance.
    pub detail: Option<String>,
    pub severity: Option<String>,
    pub estimated_cost: Option<String>,
}

/// Variant-independent view of an analysis result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub kind: AssessmentKind,
    /// Confidence percentage, 0-100.
    pub confidence: f64,
    pub conditions: Vec<String>,
    pub skin_type: Option<String>,
    pub summary: Option<String>,
    pub recommendations: Vec<Recommendation>,
    pub total_cost: Option<String>,
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

impl From<TreatmentAnalysis> for Assessment {
    fn from(analysis: TreatmentAnalysis) -> Self {
        let recommendations = analysis
            .recommendations
            .into_iter()
            .map(|rec| {
                let detail = match (rec.dosage, rec.volume) {
                    (Some(dosage), Some(volume)) => Some(format!("{dosage}, {volume}")),
                    (dosage, volume) => dosage.or(volume),
                };
                Recommendation {
                    title: rec.treatment,
                    target: rec.area,
                    detail,
                    severity: non_empty(rec.severity),
                    estimated_cost: rec.estimated_cost,
                }
            })
            .collect();

        Self {
            kind: AssessmentKind::Treatment,
            confidence: analysis.confidence,
            conditions: Vec::new(),
            skin_type: None,
            summary: None,
            recommendations,
            total_cost: analysis.total_cost,
        }
    }
}

impl From<SkinConditionAnalysis> for Assessment {
    fn from(analysis: SkinConditionAnalysis) -> Self {
        let mut conditions = vec![analysis.primary_condition];
        conditions.extend(analysis.secondary_conditions);

        let recommendations = analysis
            .ingredient_recommendations
            .into_iter()
            .map(|rec| {
                let detail = [
                    rec.concentration.unwrap_or_default(),
                    rec.application,
                    rec.benefits,
                ]
                .into_iter()
                .filter(|part| !part.trim().is_empty())
                .collect::<Vec<_>>()
                .join("; ");
                Recommendation {
                    title: rec.ingredient,
                    target: rec.purpose,
                    detail: non_empty(detail),
                    severity: None,
                    estimated_cost: None,
                }
            })
            .collect();

        Self {
            kind: AssessmentKind::SkinCondition,
            confidence: analysis.confidence,
            conditions,
            skin_type: analysis.skin_type,
            summary: analysis.description,
            recommendations,
            total_cost: None,
        }
    }
}

impl From<AnalysisPayload> for Assessment {
    fn from(payload: AnalysisPayload) -> Self {
        match payload {
            AnalysisPayload::Treatment(analysis) => analysis.into(),
            AnalysisPayload::SkinCondition(analysis) => analysis.into(),
        }
    }
}
