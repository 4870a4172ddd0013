//! Severity tables and recommended minimums.
//!
//! Every table is an exhaustive `match`, so a new coverage type or exclusion
//! category does not compile until it is classified here.

use crate::types::{CoverageType, ExclusionCategory, Severity};

/// Severity of a coverage being absent from some quotes.
pub fn coverage_severity(coverage_type: CoverageType) -> Severity {
    match coverage_type {
        CoverageType::GeneralLiability | CoverageType::Property | CoverageType::WorkersComp => {
            Severity::High
        }
        CoverageType::AutoLiability
        | CoverageType::Umbrella
        | CoverageType::Professional
        | CoverageType::Cyber
        | CoverageType::Epli
        | CoverageType::DAndO
        | CoverageType::ProductLiability => Severity::Medium,
        CoverageType::AutoPhysicalDamage
        | CoverageType::Crime
        | CoverageType::Pollution
        | CoverageType::InlandMarine
        | CoverageType::BuildersRisk
        | CoverageType::BusinessInterruption
        | CoverageType::Garage
        | CoverageType::LiquorLiability
        | CoverageType::MedicalMalpractice
        | CoverageType::Fiduciary
        | CoverageType::Other => Severity::Low,
    }
}

/// Severity of an exclusion that only some quotes carry.
pub fn exclusion_severity(category: ExclusionCategory) -> Severity {
    match category {
        ExclusionCategory::Flood | ExclusionCategory::Earthquake => Severity::High,
        ExclusionCategory::Pollution | ExclusionCategory::Mold | ExclusionCategory::Cyber => {
            Severity::Medium
        }
        ExclusionCategory::Employment | ExclusionCategory::Other => Severity::Low,
    }
}

/// Severity of a deductible conflict: one step below the coverage's own.
pub fn deductible_conflict_severity(coverage_type: CoverageType) -> Severity {
    match coverage_severity(coverage_type) {
        Severity::High => Severity::Medium,
        Severity::Medium | Severity::Low => Severity::Low,
    }
}

/// Lowest limit considered adequate for a typical commercial account.
pub fn recommended_minimum_limit(coverage_type: CoverageType) -> Option<f64> {
    match coverage_type {
        CoverageType::GeneralLiability
        | CoverageType::AutoLiability
        | CoverageType::Umbrella
        | CoverageType::Professional
        | CoverageType::DAndO => Some(1_000_000.0),
        CoverageType::WorkersComp | CoverageType::Cyber | CoverageType::Epli => Some(500_000.0),
        CoverageType::Property
        | CoverageType::AutoPhysicalDamage
        | CoverageType::Crime
        | CoverageType::Pollution
        | CoverageType::InlandMarine
        | CoverageType::BuildersRisk
        | CoverageType::BusinessInterruption
        | CoverageType::ProductLiability
        | CoverageType::Garage
        | CoverageType::LiquorLiability
        | CoverageType::MedicalMalpractice
        | CoverageType::Fiduciary
        | CoverageType::Other => None,
    }
}

/// A general liability endorsement most contracts require.
#[derive(Debug, Clone, Copy)]
pub struct CriticalEndorsement {
    pub name: &'static str,
    pub form_number: &'static str,
    /// Lowercase name fragments that identify the endorsement
    pub keywords: &'static [&'static str],
    pub priority: Severity,
}

pub const CRITICAL_ENDORSEMENTS: [CriticalEndorsement; 4] = [
    CriticalEndorsement {
        name: "Additional Insured",
        form_number: "CG 20 10",
        keywords: &["additional insured"],
        priority: Severity::High,
    },
    CriticalEndorsement {
        name: "Waiver of Subrogation",
        form_number: "CG 24 04",
        keywords: &["waiver of subrogation", "waiver of transfer of rights"],
        priority: Severity::High,
    },
    CriticalEndorsement {
        name: "Primary and Non-Contributory",
        form_number: "CG 20 01",
        keywords: &["primary and non-contributory", "primary & non-contributory", "primary noncontributory"],
        priority: Severity::Medium,
    },
    CriticalEndorsement {
        name: "Completed Operations",
        form_number: "CG 20 37",
        keywords: &["completed operations"],
        priority: Severity::Medium,
    },
];

/// Risk points per missing coverage, by severity.
pub fn missing_coverage_points(severity: Severity) -> u32 {
    match severity {
        Severity::High => 20,
        Severity::Medium => 10,
        Severity::Low => 5,
    }
}

/// Risk points per limit below the recommended minimum.
pub const LIMIT_CONCERN_POINTS: u32 = 10;

/// Risk points per missing critical endorsement, by priority.
pub fn endorsement_gap_points(priority: Severity) -> u32 {
    match priority {
        Severity::High => 8,
        Severity::Medium => 5,
        Severity::Low => 2,
    }
}

pub const MAX_RISK_SCORE: u32 = 100;
