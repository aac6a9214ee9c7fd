/// Column order of the import file; also the header line of the template
pub const TEMPLATE_COLUMNS: [&str; 10] = [
    "indicator_acronym",
    "period_type",
    "period_start",
    "period_end",
    "value",
    "text_value",
    "squad_name",
    "product_name",
    "status",
    "comparison_value",
];

/// Build the downloadable CSV template: header, one example row and comment
/// hints the parser will ignore.
pub fn generate_template() -> String {
    let header = TEMPLATE_COLUMNS.join(",");
    let example = [
        "LT",
        "mensal",
        "2024-01-01",
        "2024-01-31",
        "4.5",
        "",
        "Squad Alpha",
        "WK.app",
        "excellent",
        "5.2",
    ]
    .join(",");

    [
        header.as_str(),
        example.as_str(),
        "# Preencha com seus dados abaixo",
        "# Status: critical, warning, excellent, neutral",
        "# Period Type: sprint, mensal, trimestral, anual",
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_bulk_import::parser;
    use contracts::domain::a001_indicator::aggregate::{Indicator, IndicatorFormData};

    #[test]
    fn test_template_parses_against_its_own_example() {
        let lt = Indicator::new_for_insert(IndicatorFormData {
            is_active: true,
            is_kr: false,
            priority: 0,
            name: "Lead Time".to_string(),
            acronym: "LT".to_string(),
            indicator_type: None,
            category: "Entrega".to_string(),
            description: None,
            objective: None,
            calculation_formula: None,
            action_when_bad: None,
            result_when_good: None,
            suggested_target: None,
            default_granularity: None,
            segmentation: None,
            integration_source: None,
            base_query: None,
        });

        let outcome = parser::parse(&generate_template(), &[lt]);
        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.errors.is_empty());

        let record = &outcome.records[0];
        assert_eq!(record.value, Some(4.5));
        assert_eq!(record.comparison_value, Some(5.2));
        assert_eq!(record.squad_name.as_deref(), Some("Squad Alpha"));
        assert_eq!(record.product_name.as_deref(), Some("WK.app"));
    }
}
