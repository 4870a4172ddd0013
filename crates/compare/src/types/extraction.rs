//! Structured quote data produced by the upstream extraction step.
//!
//! Every field is optional or defaults to empty so that partially extracted
//! quotes still deserialize. A missing value becomes a `not_found` cell in the
//! comparison rather than an error.

use serde::{Deserialize, Serialize};

/// Insurance coverage categories, in the order comparison rows are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageType {
    GeneralLiability,
    Property,
    AutoLiability,
    AutoPhysicalDamage,
    Umbrella,
    WorkersComp,
    Professional,
    Cyber,
    Epli,
    DAndO,
    Crime,
    Pollution,
    InlandMarine,
    BuildersRisk,
    BusinessInterruption,
    ProductLiability,
    Garage,
    LiquorLiability,
    MedicalMalpractice,
    Fiduciary,
    /// Anything the extractor could not classify
    #[default]
    #[serde(other)]
    Other,
}

impl CoverageType {
    /// Row order for coverage sections.
    pub const CANONICAL_ORDER: [CoverageType; 21] = [
        CoverageType::GeneralLiability,
        CoverageType::Property,
        CoverageType::AutoLiability,
        CoverageType::AutoPhysicalDamage,
        CoverageType::Umbrella,
        CoverageType::WorkersComp,
        CoverageType::Professional,
        CoverageType::Cyber,
        CoverageType::Epli,
        CoverageType::DAndO,
        CoverageType::Crime,
        CoverageType::Pollution,
        CoverageType::InlandMarine,
        CoverageType::BuildersRisk,
        CoverageType::BusinessInterruption,
        CoverageType::ProductLiability,
        CoverageType::Garage,
        CoverageType::LiquorLiability,
        CoverageType::MedicalMalpractice,
        CoverageType::Fiduciary,
        CoverageType::Other,
    ];

    /// Display label used in row names and warnings.
    pub fn label(self) -> &'static str {
        match self {
            CoverageType::GeneralLiability => "General Liability",
            CoverageType::Property => "Property",
            CoverageType::AutoLiability => "Auto Liability",
            CoverageType::AutoPhysicalDamage => "Auto Physical Damage",
            CoverageType::Umbrella => "Umbrella/Excess",
            CoverageType::WorkersComp => "Workers' Compensation",
            CoverageType::Professional => "Professional Liability (E&O)",
            CoverageType::Cyber => "Cyber Liability",
            CoverageType::Epli => "Employment Practices (EPLI)",
            CoverageType::DAndO => "Directors & Officers",
            CoverageType::Crime => "Crime/Fidelity",
            CoverageType::Pollution => "Pollution Liability",
            CoverageType::InlandMarine => "Inland Marine",
            CoverageType::BuildersRisk => "Builders Risk",
            CoverageType::BusinessInterruption => "Business Interruption",
            CoverageType::ProductLiability => "Product Liability",
            CoverageType::Garage => "Garage Liability",
            CoverageType::LiquorLiability => "Liquor Liability",
            CoverageType::MedicalMalpractice => "Medical Malpractice",
            CoverageType::Fiduciary => "Fiduciary Liability",
            CoverageType::Other => "Other Coverage",
        }
    }

    /// Identifier fragment used in row ids.
    pub fn key(self) -> &'static str {
        match self {
            CoverageType::GeneralLiability => "general_liability",
            CoverageType::Property => "property",
            CoverageType::AutoLiability => "auto_liability",
            CoverageType::AutoPhysicalDamage => "auto_physical_damage",
            CoverageType::Umbrella => "umbrella",
            CoverageType::WorkersComp => "workers_comp",
            CoverageType::Professional => "professional",
            CoverageType::Cyber => "cyber",
            CoverageType::Epli => "epli",
            CoverageType::DAndO => "d_and_o",
            CoverageType::Crime => "crime",
            CoverageType::Pollution => "pollution",
            CoverageType::InlandMarine => "inland_marine",
            CoverageType::BuildersRisk => "builders_risk",
            CoverageType::BusinessInterruption => "business_interruption",
            CoverageType::ProductLiability => "product_liability",
            CoverageType::Garage => "garage",
            CoverageType::LiquorLiability => "liquor_liability",
            CoverageType::MedicalMalpractice => "medical_malpractice",
            CoverageType::Fiduciary => "fiduciary",
            CoverageType::Other => "other",
        }
    }
}

/// Exclusion categories tracked for mismatch detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExclusionCategory {
    Flood,
    Earthquake,
    Pollution,
    Mold,
    Cyber,
    Employment,
    #[default]
    #[serde(other)]
    Other,
}

impl ExclusionCategory {
    pub const ALL: [ExclusionCategory; 7] = [
        ExclusionCategory::Flood,
        ExclusionCategory::Earthquake,
        ExclusionCategory::Pollution,
        ExclusionCategory::Mold,
        ExclusionCategory::Cyber,
        ExclusionCategory::Employment,
        ExclusionCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExclusionCategory::Flood => "Flood",
            ExclusionCategory::Earthquake => "Earthquake",
            ExclusionCategory::Pollution => "Pollution",
            ExclusionCategory::Mold => "Mold",
            ExclusionCategory::Cyber => "Cyber",
            ExclusionCategory::Employment => "Employment",
            ExclusionCategory::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitType {
    PerOccurrence,
    Aggregate,
    PerPerson,
    CombinedSingle,
}

impl LimitType {
    pub fn label(self) -> &'static str {
        match self {
            LimitType::PerOccurrence => "per occurrence",
            LimitType::Aggregate => "aggregate",
            LimitType::PerPerson => "per person",
            LimitType::CombinedSingle => "combined single limit",
        }
    }
}

/// One coverage line from a quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoverageItem {
    #[serde(rename = "type")]
    pub coverage_type: CoverageType,
    pub name: String,
    pub limit: Option<f64>,
    pub sublimit: Option<f64>,
    pub limit_type: Option<LimitType>,
    pub deductible: Option<f64>,
    pub description: String,
    pub source_pages: Vec<u32>,
    pub aggregate_limit: Option<f64>,
    pub self_insured_retention: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExclusionItem {
    pub name: String,
    pub description: String,
    pub category: ExclusionCategory,
    pub source_pages: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeductibleItem {
    #[serde(rename = "type")]
    pub deductible_type: String,
    pub amount: f64,
    pub applies_to: Option<String>,
    pub source_pages: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyType {
    Occurrence,
    ClaimsMade,
}

impl PolicyType {
    pub fn label(self) -> &'static str {
        match self {
            PolicyType::Occurrence => "Occurrence",
            PolicyType::ClaimsMade => "Claims-Made",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    Iso,
    Proprietary,
    Manuscript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditType {
    Annual,
    Monthly,
    Quarterly,
    #[serde(rename = "none")]
    NoAudit,
}

/// Policy form details (claims-made vs occurrence, ISO forms, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolicyMetadata {
    pub policy_type: Option<PolicyType>,
    pub form_type: Option<FormType>,
    pub form_numbers: Vec<String>,
    pub retroactive_date: Option<String>,
    pub extended_reporting_period: Option<String>,
    pub audit_type: Option<AuditType>,
    pub source_pages: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndorsementType {
    Broadening,
    Restricting,
    Conditional,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Endorsement {
    pub form_number: String,
    pub name: String,
    #[serde(rename = "type")]
    pub endorsement_type: Option<EndorsementType>,
    pub description: String,
    pub affected_coverage: Option<String>,
    pub source_pages: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdmittedStatus {
    Admitted,
    NonAdmitted,
    SurplusLines,
}

impl AdmittedStatus {
    pub fn label(self) -> &'static str {
        match self {
            AdmittedStatus::Admitted => "Admitted",
            AdmittedStatus::NonAdmitted => "Non-Admitted",
            AdmittedStatus::SurplusLines => "Surplus Lines",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CarrierInfo {
    pub am_best_rating: Option<String>,
    pub am_best_financial_size: Option<String>,
    pub naic_code: Option<String>,
    pub admitted_status: Option<AdmittedStatus>,
    pub claims_phone: Option<String>,
    pub underwriter: Option<String>,
    pub source_pages: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoveragePremium {
    pub coverage: String,
    pub premium: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PremiumBreakdown {
    pub base_premium: Option<f64>,
    pub coverage_premiums: Vec<CoveragePremium>,
    pub taxes: Option<f64>,
    pub fees: Option<f64>,
    pub broker_fee: Option<f64>,
    pub surplus_lines_tax: Option<f64>,
    pub total_premium: Option<f64>,
    pub payment_terms: Option<String>,
    pub source_pages: Vec<u32>,
}

impl PremiumBreakdown {
    /// Sum of taxes and fees on top of the premium, if any were extracted.
    pub fn taxes_and_fees(&self) -> Option<f64> {
        [self.taxes, self.fees, self.broker_fee, self.surplus_lines_tax]
            .into_iter()
            .flatten()
            .fold(None, |total, amount| Some(total.unwrap_or(0.0) + amount))
    }
}

/// Everything extracted from one quote document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteExtraction {
    pub carrier_name: Option<String>,
    pub policy_number: Option<String>,
    pub named_insured: Option<String>,
    pub effective_date: Option<String>,
    pub expiration_date: Option<String>,
    pub annual_premium: Option<f64>,
    pub coverages: Vec<CoverageItem>,
    pub exclusions: Vec<ExclusionItem>,
    pub deductibles: Vec<DeductibleItem>,
    pub policy_metadata: Option<PolicyMetadata>,
    pub endorsements: Vec<Endorsement>,
    pub carrier_info: Option<CarrierInfo>,
    pub premium_breakdown: Option<PremiumBreakdown>,
}

impl QuoteExtraction {
    /// First coverage line of the given type.
    pub fn coverage(&self, coverage_type: CoverageType) -> Option<&CoverageItem> {
        self.coverages
            .iter()
            .find(|item| item.coverage_type == coverage_type)
    }

    pub fn has_coverage(&self, coverage_type: CoverageType) -> bool {
        self.coverage(coverage_type).is_some()
    }

    pub fn has_exclusion(&self, category: ExclusionCategory) -> bool {
        self.exclusions.iter().any(|item| item.category == category)
    }

    pub fn is_claims_made(&self) -> bool {
        self.policy_metadata
            .as_ref()
            .and_then(|metadata| metadata.policy_type)
            == Some(PolicyType::ClaimsMade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_payload_deserializes() {
        let json = r#"{
            "carrierName": "Acme Mutual",
            "annualPremium": 12500,
            "coverages": [
                {"type": "general_liability", "name": "CGL", "limit": 1000000, "limitType": "per_occurrence", "sourcePages": [3]}
            ]
        }"#;

        let extraction: QuoteExtraction = serde_json::from_str(json).unwrap();
        assert_eq!(extraction.carrier_name.as_deref(), Some("Acme Mutual"));
        assert_eq!(extraction.annual_premium, Some(12500.0));
        assert!(extraction.exclusions.is_empty());
        assert!(extraction.policy_metadata.is_none());

        let gl = extraction.coverage(CoverageType::GeneralLiability).unwrap();
        assert_eq!(gl.limit, Some(1_000_000.0));
        assert_eq!(gl.limit_type, Some(LimitType::PerOccurrence));
        assert_eq!(gl.source_pages, vec![3]);
    }

    #[test]
    fn test_unknown_coverage_type_is_other() {
        let item: CoverageItem =
            serde_json::from_str(r#"{"type": "pet_insurance", "name": "Pets"}"#).unwrap();
        assert_eq!(item.coverage_type, CoverageType::Other);
    }

    #[test]
    fn test_canonical_order_is_exhaustive() {
        let keys: std::collections::HashSet<&str> = CoverageType::CANONICAL_ORDER
            .iter()
            .map(|t| t.key())
            .collect();
        assert_eq!(keys.len(), CoverageType::CANONICAL_ORDER.len());

        for coverage_type in CoverageType::CANONICAL_ORDER {
            let json = serde_json::to_value(coverage_type).unwrap();
            assert_eq!(json, coverage_type.key());
        }
    }

    #[test]
    fn test_taxes_and_fees() {
        let breakdown = PremiumBreakdown {
            taxes: Some(120.0),
            fees: Some(50.0),
            ..Default::default()
        };
        assert_eq!(breakdown.taxes_and_fees(), Some(170.0));
        assert_eq!(PremiumBreakdown::default().taxes_and_fees(), None);
    }

    #[test]
    fn test_claims_made() {
        let mut extraction = QuoteExtraction::default();
        assert!(!extraction.is_claims_made());

        extraction.policy_metadata = Some(PolicyMetadata {
            policy_type: Some(PolicyType::ClaimsMade),
            ..Default::default()
        });
        assert!(extraction.is_claims_made());
    }
}
