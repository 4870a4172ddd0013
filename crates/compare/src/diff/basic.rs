//! Quote-level rows: carrier, identifiers, premium, dates and policy form details.

use super::cells::{build_row, Ranking};
use crate::format::{format_currency, format_date, non_blank};
use crate::types::{CellValue, ComparisonRow, FieldType, QuoteExtraction, RowCategory};

fn text_cell(value: Option<&str>) -> CellValue {
    match non_blank(value) {
        Some(text) => CellValue::text(text.to_string(), text.to_string()),
        None => CellValue::not_found(),
    }
}

fn date_cell(value: Option<&str>) -> CellValue {
    match non_blank(value) {
        Some(raw) => CellValue::text(format_date(raw), raw.to_string()),
        None => CellValue::not_found(),
    }
}

fn currency_cell(value: Option<f64>) -> CellValue {
    match value {
        Some(amount) => CellValue::number(format_currency(amount), amount),
        None => CellValue::not_found(),
    }
}

fn column(
    extractions: &[QuoteExtraction],
    cell: impl Fn(&QuoteExtraction) -> CellValue,
) -> Vec<CellValue> {
    extractions.iter().map(cell).collect()
}

fn basic_row(
    id: &str,
    field: &str,
    field_type: FieldType,
    values: Vec<CellValue>,
    ranking: Ranking,
) -> ComparisonRow {
    build_row(
        id.to_string(),
        field.to_string(),
        RowCategory::Basic,
        field_type,
        values,
        ranking,
    )
}

/// Carrier, policy number, named insured, premium and policy period.
pub fn build_basic_rows(extractions: &[QuoteExtraction]) -> Vec<ComparisonRow> {
    vec![
        basic_row(
            "carrier",
            "Carrier",
            FieldType::Text,
            column(extractions, |e| text_cell(e.carrier_name.as_deref())),
            Ranking::Unranked,
        ),
        basic_row(
            "policy_number",
            "Policy Number",
            FieldType::Text,
            column(extractions, |e| text_cell(e.policy_number.as_deref())),
            Ranking::Unranked,
        ),
        basic_row(
            "named_insured",
            "Named Insured",
            FieldType::Text,
            column(extractions, |e| text_cell(e.named_insured.as_deref())),
            Ranking::Unranked,
        ),
        basic_row(
            "annual_premium",
            "Annual Premium",
            FieldType::Premium,
            column(extractions, |e| currency_cell(e.annual_premium)),
            Ranking::LowerIsBetter,
        ),
        basic_row(
            "effective_date",
            "Effective Date",
            FieldType::Date,
            column(extractions, |e| date_cell(e.effective_date.as_deref())),
            Ranking::Unranked,
        ),
        basic_row(
            "expiration_date",
            "Expiration Date",
            FieldType::Date,
            column(extractions, |e| date_cell(e.expiration_date.as_deref())),
            Ranking::Unranked,
        ),
    ]
}

/// Policy form, carrier rating and tax rows.
///
/// A row only appears when at least one quote has a value for it. The
/// retroactive date row appears whenever any quote is claims-made.
pub fn build_metadata_rows(extractions: &[QuoteExtraction]) -> Vec<ComparisonRow> {
    let mut rows = Vec::new();

    let policy_type: Vec<CellValue> = extractions
        .iter()
        .map(|e| match e.policy_metadata.as_ref() {
            Some(metadata) => match metadata.policy_type {
                Some(policy_type) => CellValue::text(
                    policy_type.label().to_string(),
                    policy_type.label().to_string(),
                )
                .with_pages(&metadata.source_pages),
                None => CellValue::not_found(),
            },
            None => CellValue::not_found(),
        })
        .collect();
    push_if_any(&mut rows, "policy_type", "Policy Type", FieldType::Text, policy_type, Ranking::Unranked);

    let rating: Vec<CellValue> = extractions
        .iter()
        .map(|e| match e.carrier_info.as_ref() {
            Some(info) => text_cell(info.am_best_rating.as_deref()).with_pages(&info.source_pages),
            None => CellValue::not_found(),
        })
        .collect();
    push_if_any(&mut rows, "am_best_rating", "AM Best Rating", FieldType::Text, rating, Ranking::Unranked);

    let admitted: Vec<CellValue> = extractions
        .iter()
        .map(|e| match e.carrier_info.as_ref() {
            Some(info) => match info.admitted_status {
                Some(status) => {
                    CellValue::text(status.label().to_string(), status.label().to_string())
                        .with_pages(&info.source_pages)
                }
                None => CellValue::not_found(),
            },
            None => CellValue::not_found(),
        })
        .collect();
    push_if_any(&mut rows, "admitted_status", "Admitted Status", FieldType::Text, admitted, Ranking::Unranked);

    let forms: Vec<CellValue> = extractions
        .iter()
        .map(|e| match e.policy_metadata.as_ref() {
            Some(metadata) => {
                let numbers: Vec<&str> = metadata
                    .form_numbers
                    .iter()
                    .map(|form| form.trim())
                    .filter(|form| !form.is_empty())
                    .collect();
                if numbers.is_empty() {
                    CellValue::not_found()
                } else {
                    let joined = numbers.join(", ");
                    CellValue::text(joined.clone(), joined).with_pages(&metadata.source_pages)
                }
            }
            None => CellValue::not_found(),
        })
        .collect();
    push_if_any(&mut rows, "form_numbers", "ISO Form Numbers", FieldType::Text, forms, Ranking::Unranked);

    if extractions.iter().any(QuoteExtraction::is_claims_made) {
        let retro: Vec<CellValue> = extractions
            .iter()
            .map(|e| match e.policy_metadata.as_ref() {
                Some(metadata) => date_cell(metadata.retroactive_date.as_deref())
                    .with_pages(&metadata.source_pages),
                None => CellValue::not_found(),
            })
            .collect();
        rows.push(basic_row(
            "retroactive_date",
            "Retroactive Date",
            FieldType::Date,
            retro,
            Ranking::Unranked,
        ));
    }

    let taxes: Vec<CellValue> = extractions
        .iter()
        .map(|e| match e.premium_breakdown.as_ref() {
            Some(breakdown) => {
                currency_cell(breakdown.taxes_and_fees()).with_pages(&breakdown.source_pages)
            }
            None => CellValue::not_found(),
        })
        .collect();
    push_if_any(&mut rows, "taxes_and_fees", "Taxes & Fees", FieldType::Premium, taxes, Ranking::LowerIsBetter);

    rows
}

fn push_if_any(
    rows: &mut Vec<ComparisonRow>,
    id: &str,
    field: &str,
    field_type: FieldType,
    values: Vec<CellValue>,
    ranking: Ranking,
) {
    if values.iter().any(CellValue::is_found) {
        rows.push(basic_row(id, field, field_type, values, ranking));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AdmittedStatus, CarrierInfo, PolicyMetadata, PolicyType, PremiumBreakdown};

    fn quote(carrier: &str, premium: Option<f64>) -> QuoteExtraction {
        QuoteExtraction {
            carrier_name: Some(carrier.to_string()),
            annual_premium: premium,
            ..Default::default()
        }
    }

    #[test]
    fn test_basic_rows_order_and_ids() {
        let rows = build_basic_rows(&[quote("Acme", Some(1000.0))]);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "carrier",
                "policy_number",
                "named_insured",
                "annual_premium",
                "effective_date",
                "expiration_date"
            ]
        );
        assert!(rows.iter().all(|r| r.category == RowCategory::Basic));
    }

    #[test]
    fn test_premium_lower_is_better() {
        let rows = build_basic_rows(&[
            quote("Acme", Some(12_000.0)),
            quote("Beta", Some(9_500.0)),
            quote("Gamma", None),
        ]);
        let premium = rows.iter().find(|r| r.id == "annual_premium").unwrap();

        assert_eq!(premium.values[0].display_value, "$12,000");
        assert_eq!(premium.values[2].display_value, "—");
        assert_eq!(premium.best_index, Some(1));
        assert_eq!(premium.worst_index, Some(0));
        assert!(premium.has_difference);
    }

    #[test]
    fn test_dates_are_formatted_not_ranked() {
        let mut a = quote("Acme", None);
        a.effective_date = Some("2024-01-15".to_string());
        let mut b = quote("Beta", None);
        b.effective_date = Some("2024-02-01".to_string());

        let rows = build_basic_rows(&[a, b]);
        let effective = rows.iter().find(|r| r.id == "effective_date").unwrap();

        assert_eq!(effective.values[0].display_value, "Jan 15, 2024");
        assert!(effective.has_difference);
        assert_eq!(effective.best_index, None);
    }

    #[test]
    fn test_blank_text_is_not_found() {
        let rows = build_basic_rows(&[quote("   ", None)]);
        assert!(!rows[0].values[0].is_found());
    }

    #[test]
    fn test_metadata_rows_skip_empty_fields() {
        let rows = build_metadata_rows(&[quote("Acme", None), quote("Beta", None)]);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_metadata_rows() {
        let mut a = quote("Acme", None);
        a.policy_metadata = Some(PolicyMetadata {
            policy_type: Some(PolicyType::ClaimsMade),
            form_numbers: vec!["CG 00 01".to_string(), "CG 20 10".to_string()],
            retroactive_date: Some("2020-06-01".to_string()),
            source_pages: vec![2],
            ..Default::default()
        });
        a.carrier_info = Some(CarrierInfo {
            am_best_rating: Some("A+".to_string()),
            admitted_status: Some(AdmittedStatus::SurplusLines),
            ..Default::default()
        });
        a.premium_breakdown = Some(PremiumBreakdown {
            taxes: Some(300.0),
            fees: Some(150.0),
            ..Default::default()
        });

        let mut b = quote("Beta", None);
        b.policy_metadata = Some(PolicyMetadata {
            policy_type: Some(PolicyType::Occurrence),
            ..Default::default()
        });
        b.premium_breakdown = Some(PremiumBreakdown {
            surplus_lines_tax: Some(200.0),
            ..Default::default()
        });

        let rows = build_metadata_rows(&[a, b]);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "policy_type",
                "am_best_rating",
                "admitted_status",
                "form_numbers",
                "retroactive_date",
                "taxes_and_fees"
            ]
        );

        assert_eq!(rows[0].values[0].display_value, "Claims-Made");
        assert_eq!(rows[0].values[0].source_pages, Some(vec![2]));
        assert_eq!(rows[2].values[0].display_value, "Surplus Lines");
        assert_eq!(rows[3].values[0].display_value, "CG 00 01, CG 20 10");
        assert_eq!(rows[4].values[0].display_value, "Jun 1, 2020");
        assert!(!rows[4].values[1].is_found());

        let taxes = &rows[5];
        assert_eq!(taxes.values[0].display_value, "$450");
        assert_eq!(taxes.best_index, Some(1));
        assert_eq!(taxes.worst_index, Some(0));
    }

    #[test]
    fn test_no_retroactive_row_without_claims_made() {
        let mut a = quote("Acme", None);
        a.policy_metadata = Some(PolicyMetadata {
            policy_type: Some(PolicyType::Occurrence),
            retroactive_date: Some("2020-06-01".to_string()),
            ..Default::default()
        });

        let rows = build_metadata_rows(&[a]);
        assert!(rows.iter().all(|r| r.id != "retroactive_date"));
    }
}
